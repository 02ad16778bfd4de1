use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Identifiant fort pour Booking
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(String);

impl BookingId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidBooking {
    #[error("guest name cannot be empty")]
    EmptyGuest,
    #[error("unit id cannot be empty")]
    EmptyUnit,
    #[error("number of nights must be at least 1")]
    NoNights,
    #[error("checkout date out of calendar range")]
    OutOfRange,
}

/// Ajoute `nights` jours à une date; `None` si hors calendrier.
pub fn add_nights(date: NaiveDate, nights: u32) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(u64::from(nights)))
}

/// Séjour canonique `[check_in, check_out)` (granularité jour).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stay {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

/// Demande de réservation validée (pas encore d'identifiant).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBooking {
    pub guest_name: String,
    pub unit_id: String,
    pub check_in: NaiveDate,
    pub nights: u32,
}

impl NewBooking {
    /// Valide nom, unité et nombre de nuits; les noms sont nettoyés des espaces.
    pub fn new<G: AsRef<str>, U: AsRef<str>>(
        guest_name: G,
        unit_id: U,
        check_in: NaiveDate,
        nights: u32,
    ) -> Result<Self, InvalidBooking> {
        let guest_name = guest_name.as_ref().trim();
        let unit_id = unit_id.as_ref().trim();
        if guest_name.is_empty() {
            return Err(InvalidBooking::EmptyGuest);
        }
        if unit_id.is_empty() {
            return Err(InvalidBooking::EmptyUnit);
        }
        if nights == 0 {
            return Err(InvalidBooking::NoNights);
        }
        if add_nights(check_in, nights).is_none() {
            return Err(InvalidBooking::OutOfRange);
        }
        Ok(Self {
            guest_name: guest_name.to_owned(),
            unit_id: unit_id.to_owned(),
            check_in,
            nights,
        })
    }

    pub fn check_out(&self) -> NaiveDate {
        add_nights(self.check_in, self.nights).unwrap_or(NaiveDate::MAX)
    }

    pub fn stay(&self) -> Stay {
        Stay {
            check_in: self.check_in,
            check_out: self.check_out(),
        }
    }
}

/// Réservation enregistrée
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub guest_name: String,
    pub unit_id: String,
    pub check_in: NaiveDate,
    pub nights: u32,
}

impl Booking {
    pub fn from_request(id: BookingId, req: NewBooking) -> Self {
        Self {
            id,
            guest_name: req.guest_name,
            unit_id: req.unit_id,
            check_in: req.check_in,
            nights: req.nights,
        }
    }

    /// Revérifie les invariants d'une réservation relue depuis un support.
    pub fn validate(&self) -> Result<(), InvalidBooking> {
        NewBooking::new(&self.guest_name, &self.unit_id, self.check_in, self.nights).map(|_| ())
    }

    /// Date de départ; sature à `NaiveDate::MAX` plutôt que de paniquer.
    pub fn check_out(&self) -> NaiveDate {
        add_nights(self.check_in, self.nights).unwrap_or(NaiveDate::MAX)
    }

    pub fn stay(&self) -> Stay {
        Stay {
            check_in: self.check_in,
            check_out: self.check_out(),
        }
    }
}

/// Ensemble des réservations connues
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Ledger {
    pub bookings: Vec<Booking>,
}

impl Ledger {
    pub fn find_by_id<'a>(&'a self, id: &BookingId) -> Option<&'a Booking> {
        self.bookings.iter().find(|b| &b.id == id)
    }
    pub fn find_mut_by_id(&mut self, id: &BookingId) -> Option<&mut Booking> {
        self.bookings.iter_mut().find(|b| &b.id == id)
    }
    pub fn for_guest<'a>(&'a self, guest: &'a str) -> impl Iterator<Item = &'a Booking> + 'a {
        self.bookings.iter().filter(move |b| b.guest_name == guest)
    }
    pub fn for_unit<'a>(&'a self, unit: &'a str) -> impl Iterator<Item = &'a Booking> + 'a {
        self.bookings.iter().filter(move |b| b.unit_id == unit)
    }
}
