#![forbid(unsafe_code)]
//! Lodgebook — réservations d'hébergements locales (sans BD).
//!
//! - Séjours en jours entiers, intervalles semi-ouverts `[arrivée, départ)`.
//! - Un client ne détient qu'une réservation.
//! - Une unité n'est jamais réservée deux fois la même nuit.
//! - Prolongations qui ne revérifient que les nuits ajoutées.
//! - Stockage fichier (JSON) ou mémoire, import/export CSV.
//!
//! Le moteur ne sérialise pas les requêtes concurrentes : l'appelant doit garantir
//! qu'une seule séquence lecture-vérification-écriture touche une unité (et un client)
//! à la fois.

pub mod engine;
pub mod io;
pub mod model;
pub mod store;

pub use engine::{
    audit, decide_new_booking, evaluate_extension, evaluate_new_booking, EngineError, ExtraNights,
    Outcome, ReasonClass, ReasonCode, Violation, ViolationKind,
};
pub use model::{Booking, BookingId, InvalidBooking, Ledger, NewBooking, Stay};
pub use store::{BookingStore, JsonStore, MemoryStore};
