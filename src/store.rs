use crate::model::{Booking, BookingId, Ledger, NewBooking};
use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Capacités de persistance dont le moteur a besoin.
///
/// Les écritures prennent `&mut self` : une séquence lecture-vérification-écriture
/// ne peut pas être entrelacée avec une autre sur le même store.
pub trait BookingStore {
    fn find_by_guest_and_unit(&self, guest: &str, unit: &str) -> anyhow::Result<Vec<Booking>>;
    fn find_by_guest(&self, guest: &str) -> anyhow::Result<Vec<Booking>>;
    /// Réservations de l'unité dont l'arrivée est strictement avant `before`.
    fn find_by_unit_before(
        &self,
        unit: &str,
        before: NaiveDate,
        exclude: Option<&BookingId>,
    ) -> anyhow::Result<Vec<Booking>>;
    /// Enregistre la demande et attribue un identifiant.
    fn create(&mut self, req: NewBooking) -> anyhow::Result<Booking>;
    fn find_by_id(&self, id: &BookingId) -> anyhow::Result<Option<Booking>>;
    fn update_nights(&mut self, id: &BookingId, nights: u32) -> anyhow::Result<Booking>;
}

impl Ledger {
    fn select<F: Fn(&Booking) -> bool>(&self, pred: F) -> Vec<Booking> {
        self.bookings.iter().filter(|b| pred(b)).cloned().collect()
    }

    fn unit_before(
        &self,
        unit: &str,
        before: NaiveDate,
        exclude: Option<&BookingId>,
    ) -> Vec<Booking> {
        self.for_unit(unit)
            .filter(|b| b.check_in < before && exclude.map_or(true, |id| &b.id != id))
            .cloned()
            .collect()
    }

    fn insert(&mut self, req: NewBooking) -> Booking {
        let booking = Booking::from_request(BookingId::random(), req);
        self.bookings.push(booking.clone());
        booking
    }

    fn set_nights(&mut self, id: &BookingId, nights: u32) -> anyhow::Result<Booking> {
        if nights == 0 {
            return Err(anyhow!("number of nights must be at least 1"));
        }
        let booking = self
            .find_mut_by_id(id)
            .ok_or_else(|| anyhow!("unknown booking: {id}"))?;
        booking.nights = nights;
        Ok(booking.clone())
    }
}

/// Store en mémoire (tests, simulations)
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    ledger: Ledger,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn from_ledger(ledger: Ledger) -> Self {
        Self { ledger }
    }
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
}

impl BookingStore for MemoryStore {
    fn find_by_guest_and_unit(&self, guest: &str, unit: &str) -> anyhow::Result<Vec<Booking>> {
        Ok(self.ledger.select(|b| b.guest_name == guest && b.unit_id == unit))
    }
    fn find_by_guest(&self, guest: &str) -> anyhow::Result<Vec<Booking>> {
        Ok(self.ledger.for_guest(guest).cloned().collect())
    }
    fn find_by_unit_before(
        &self,
        unit: &str,
        before: NaiveDate,
        exclude: Option<&BookingId>,
    ) -> anyhow::Result<Vec<Booking>> {
        Ok(self.ledger.unit_before(unit, before, exclude))
    }
    fn create(&mut self, req: NewBooking) -> anyhow::Result<Booking> {
        Ok(self.ledger.insert(req))
    }
    fn find_by_id(&self, id: &BookingId) -> anyhow::Result<Option<Booking>> {
        Ok(self.ledger.find_by_id(id).cloned())
    }
    fn update_nights(&mut self, id: &BookingId, nights: u32) -> anyhow::Result<Booking> {
        self.ledger.set_nights(id, nights)
    }
}

/// Store fichier JSON : chaque écriture est persistée de manière atomique.
pub struct JsonStore {
    path: PathBuf,
    ledger: Ledger,
}

impl JsonStore {
    /// Ouvre le registre; un fichier absent équivaut à un registre vide.
    /// Une réservation invalide fait échouer l'ouverture.
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let ledger: Ledger = match fs::read(&path) {
            Ok(data) => serde_json::from_slice(&data)
                .with_context(|| format!("parsing {}", path.display()))?,
            Err(e) if e.kind() == ErrorKind::NotFound => Ledger::default(),
            Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
        };
        for (idx, b) in ledger.bookings.iter().enumerate() {
            b.validate().with_context(|| {
                format!("invalid booking #{idx} (id {}) in {}", b.id, path.display())
            })?;
        }
        Ok(Self { path, ledger })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    fn persist(&self) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(&self.ledger)?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}

impl BookingStore for JsonStore {
    fn find_by_guest_and_unit(&self, guest: &str, unit: &str) -> anyhow::Result<Vec<Booking>> {
        Ok(self.ledger.select(|b| b.guest_name == guest && b.unit_id == unit))
    }
    fn find_by_guest(&self, guest: &str) -> anyhow::Result<Vec<Booking>> {
        Ok(self.ledger.for_guest(guest).cloned().collect())
    }
    fn find_by_unit_before(
        &self,
        unit: &str,
        before: NaiveDate,
        exclude: Option<&BookingId>,
    ) -> anyhow::Result<Vec<Booking>> {
        Ok(self.ledger.unit_before(unit, before, exclude))
    }
    fn create(&mut self, req: NewBooking) -> anyhow::Result<Booking> {
        let booking = self.ledger.insert(req);
        if let Err(e) = self.persist() {
            self.ledger.bookings.retain(|b| b.id != booking.id);
            return Err(e);
        }
        Ok(booking)
    }
    fn find_by_id(&self, id: &BookingId) -> anyhow::Result<Option<Booking>> {
        Ok(self.ledger.find_by_id(id).cloned())
    }
    fn update_nights(&mut self, id: &BookingId, nights: u32) -> anyhow::Result<Booking> {
        let previous = self
            .ledger
            .find_by_id(id)
            .map(|b| b.nights)
            .ok_or_else(|| anyhow!("unknown booking: {id}"))?;
        let updated = self.ledger.set_nights(id, nights)?;
        if let Err(e) = self.persist() {
            self.ledger.set_nights(id, previous)?;
            return Err(e);
        }
        Ok(updated)
    }
}
