use super::{interval, EngineError, Outcome, ReasonCode};
use crate::model::{add_nights, Booking, BookingId, Stay};
use crate::store::BookingStore;

/// Nombre de nuits supplémentaires, toujours > 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtraNights(u32);

impl ExtraNights {
    pub fn new(n: u32) -> Option<Self> {
        (n > 0).then_some(Self(n))
    }

    /// Entier décimal strictement positif; tout le reste est `INVALID_EXTRA_NIGHTS`.
    pub fn parse(raw: &str) -> Result<Self, ReasonCode> {
        raw.trim()
            .parse::<u32>()
            .ok()
            .and_then(Self::new)
            .ok_or(ReasonCode::InvalidExtraNights)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

/// Fenêtre `[départ actuel, départ proposé)`; `None` hors calendrier.
pub fn extension_window(booking: &Booking, extra: ExtraNights) -> Option<Stay> {
    let current = add_nights(booking.check_in, booking.nights)?;
    let proposed = add_nights(current, extra.get())?;
    Some(Stay {
        check_in: current,
        check_out: proposed,
    })
}

/// Vrai si une autre réservation de la même unité occupe une des nuits ajoutées.
pub fn extension_conflicts(booking: &Booking, window: Stay, others: &[Booking]) -> bool {
    others
        .iter()
        .filter(|o| o.id != booking.id && o.unit_id == booking.unit_id)
        .filter(|o| o.check_in < window.check_out)
        .any(|o| interval::window_intrudes(window, o.stay()))
}

/// Prolonge une réservation existante de `extra_nights` (valeur brute reçue).
///
/// La validation a lieu avant tout accès au store. L'unicité du client n'est pas
/// revérifiée.
pub fn evaluate_extension<S: BookingStore + ?Sized>(
    store: &mut S,
    id: &BookingId,
    extra_nights: &str,
) -> Result<Outcome, EngineError> {
    let extra = match ExtraNights::parse(extra_nights) {
        Ok(extra) => extra,
        Err(reason) => return Ok(super::rejected(reason)),
    };

    let Some(booking) = store.find_by_id(id)? else {
        return Ok(super::rejected(ReasonCode::BookingNotFound));
    };

    let (Some(window), Some(total)) = (
        extension_window(&booking, extra),
        booking.nights.checked_add(extra.get()),
    ) else {
        return Ok(super::rejected(ReasonCode::InvalidExtraNights));
    };

    let others = store.find_by_unit_before(&booking.unit_id, window.check_out, Some(&booking.id))?;
    if extension_conflicts(&booking, window, &others) {
        return Ok(super::rejected(ReasonCode::ExtensionConflict));
    }

    let updated = store.update_nights(&booking.id, total)?;
    #[cfg(feature = "logging")]
    tracing::info!(id = %updated.id, nights = updated.nights, "booking extended");
    Ok(Outcome::Accepted(updated))
}
