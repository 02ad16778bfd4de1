use super::{interval, EngineError, Outcome, ReasonCode};
use crate::model::{Booking, NewBooking};
use crate::store::BookingStore;

fn guest_unit_duplicate(candidate: &NewBooking, bookings: &[Booking]) -> bool {
    bookings
        .iter()
        .any(|b| b.guest_name == candidate.guest_name && b.unit_id == candidate.unit_id)
}

fn guest_already_booked(candidate: &NewBooking, bookings: &[Booking]) -> bool {
    bookings.iter().any(|b| b.guest_name == candidate.guest_name)
}

fn same_check_in(candidate: &NewBooking, bookings: &[Booking]) -> bool {
    bookings
        .iter()
        .any(|b| b.unit_id == candidate.unit_id && b.check_in == candidate.check_in)
}

fn unit_overlap(candidate: &NewBooking, bookings: &[Booking]) -> bool {
    let stay = candidate.stay();
    bookings
        .iter()
        .filter(|b| b.unit_id == candidate.unit_id && b.check_in < stay.check_out)
        .any(|b| interval::overlaps(stay, b.stay()))
}

/// Applique les règles dans l'ordre sur l'ensemble (non filtré) des réservations.
///
/// L'ordre fixe le motif renvoyé quand plusieurs règles échouent.
pub fn decide_new_booking(candidate: &NewBooking, existing: &[Booking]) -> Option<ReasonCode> {
    if guest_unit_duplicate(candidate, existing) {
        return Some(ReasonCode::GuestUnitDuplicate);
    }
    if guest_already_booked(candidate, existing) {
        return Some(ReasonCode::GuestAlreadyBooked);
    }
    if same_check_in(candidate, existing) || unit_overlap(candidate, existing) {
        return Some(ReasonCode::UnitOccupied);
    }
    None
}

/// Évalue une nouvelle réservation contre le store et l'enregistre si elle passe.
///
/// Chaque règle est alimentée par sa propre requête; on s'arrête au premier refus
/// et `create` n'est appelé qu'une fois, à l'acceptation.
pub fn evaluate_new_booking<S: BookingStore + ?Sized>(
    store: &mut S,
    candidate: NewBooking,
) -> Result<Outcome, EngineError> {
    let same_unit = store.find_by_guest_and_unit(&candidate.guest_name, &candidate.unit_id)?;
    if guest_unit_duplicate(&candidate, &same_unit) {
        return Ok(super::rejected(ReasonCode::GuestUnitDuplicate));
    }

    let by_guest = store.find_by_guest(&candidate.guest_name)?;
    if guest_already_booked(&candidate, &by_guest) {
        return Ok(super::rejected(ReasonCode::GuestAlreadyBooked));
    }

    let on_unit = store.find_by_unit_before(&candidate.unit_id, candidate.check_out(), None)?;
    if same_check_in(&candidate, &on_unit) || unit_overlap(&candidate, &on_unit) {
        return Ok(super::rejected(ReasonCode::UnitOccupied));
    }

    let booking = store.create(candidate)?;
    #[cfg(feature = "logging")]
    tracing::info!(id = %booking.id, unit = %booking.unit_id, "booking accepted");
    Ok(Outcome::Accepted(booking))
}
