use super::{interval, Violation, ViolationKind};
use crate::model::{Booking, Ledger};

/// Parcourt un registre existant et signale chaque paire incohérente.
pub fn audit(ledger: &Ledger) -> Vec<Violation> {
    let mut out = Vec::new();
    let mut sorted: Vec<&Booking> = ledger.bookings.iter().collect();
    sorted.sort_by(|a, b| (&a.unit_id, a.check_in).cmp(&(&b.unit_id, b.check_in)));

    for (idx, a) in sorted.iter().enumerate() {
        for b in sorted.iter().skip(idx + 1) {
            if a.unit_id == b.unit_id && interval::overlaps(a.stay(), b.stay()) {
                out.push(Violation {
                    kind: ViolationKind::Overlap,
                    booking_a: a.id.clone(),
                    booking_b: b.id.clone(),
                });
            }
            if a.guest_name == b.guest_name {
                out.push(Violation {
                    kind: ViolationKind::GuestDuplicate,
                    booking_a: a.id.clone(),
                    booking_b: b.id.clone(),
                });
            }
        }
    }

    out
}
