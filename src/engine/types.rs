use crate::model::{Booking, BookingId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Motif de refus (ensemble fermé)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    GuestUnitDuplicate,
    GuestAlreadyBooked,
    UnitOccupied,
    InvalidExtraNights,
    BookingNotFound,
    ExtensionConflict,
}

/// Famille de réponse côté transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasonClass {
    ClientError,
    NotFound,
    Conflict,
}

impl ReasonCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ReasonCode::GuestUnitDuplicate => "GUEST_UNIT_DUPLICATE",
            ReasonCode::GuestAlreadyBooked => "GUEST_ALREADY_BOOKED",
            ReasonCode::UnitOccupied => "UNIT_OCCUPIED",
            ReasonCode::InvalidExtraNights => "INVALID_EXTRA_NIGHTS",
            ReasonCode::BookingNotFound => "BOOKING_NOT_FOUND",
            ReasonCode::ExtensionConflict => "EXTENSION_CONFLICT",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ReasonCode::GuestUnitDuplicate => "guest already has a booking for this unit",
            ReasonCode::GuestAlreadyBooked => "guest already holds a booking",
            ReasonCode::UnitOccupied => "unit is already booked for these dates",
            ReasonCode::InvalidExtraNights => "extra nights must be a positive whole number",
            ReasonCode::BookingNotFound => "booking not found",
            ReasonCode::ExtensionConflict => "unit is not available for the extra nights",
        }
    }

    pub fn class(self) -> ReasonClass {
        match self {
            ReasonCode::GuestUnitDuplicate
            | ReasonCode::GuestAlreadyBooked
            | ReasonCode::UnitOccupied
            | ReasonCode::InvalidExtraNights => ReasonClass::ClientError,
            ReasonCode::BookingNotFound => ReasonClass::NotFound,
            ReasonCode::ExtensionConflict => ReasonClass::Conflict,
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.as_str(), self.message())
    }
}

/// Résultat d'une évaluation : acceptée (réservation écrite) ou refusée.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted(Booking),
    Rejected(ReasonCode),
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }
    pub fn reason(&self) -> Option<ReasonCode> {
        match self {
            Outcome::Rejected(r) => Some(*r),
            Outcome::Accepted(_) => None,
        }
    }
    pub fn booking(&self) -> Option<&Booking> {
        match self {
            Outcome::Accepted(b) => Some(b),
            Outcome::Rejected(_) => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    Overlap,
    GuestDuplicate,
}

/// Incohérence trouvée dans un registre existant
#[derive(Debug, Clone)]
pub struct Violation {
    pub kind: ViolationKind,
    pub booking_a: BookingId,
    pub booking_b: BookingId,
}
