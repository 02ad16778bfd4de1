use crate::model::{Ledger, NewBooking};
use anyhow::Context;
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import de demandes depuis CSV: header `guest_name,unit_id,check_in,nights`
pub fn import_bookings_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<NewBooking>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let row = line + 2;
        let guest = rec.get(0).with_context(|| format!("row {row}: missing guest_name"))?;
        let unit = rec.get(1).with_context(|| format!("row {row}: missing unit_id"))?;
        let check_in = rec.get(2).with_context(|| format!("row {row}: missing check_in"))?;
        let nights = rec.get(3).with_context(|| format!("row {row}: missing nights"))?;
        let check_in = parse_date(check_in).with_context(|| format!("row {row}: check_in"))?;
        let nights: u32 = nights
            .trim()
            .parse()
            .with_context(|| format!("row {row}: invalid nights {nights:?}"))?;
        let req = NewBooking::new(guest, unit, check_in, nights)
            .with_context(|| format!("row {row}: invalid booking"))?;
        out.push(req);
    }
    Ok(out)
}

/// Date calendaire `YYYY-MM-DD`
pub fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date: {raw}"))
}

/// Export JSON du registre (jolie mise en forme)
pub fn export_ledger_json<P: AsRef<Path>>(path: P, ledger: &Ledger) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(ledger)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV: header `id,guest_name,unit_id,check_in,check_out,nights`
pub fn export_bookings_csv<P: AsRef<Path>>(path: P, ledger: &Ledger) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["id", "guest_name", "unit_id", "check_in", "check_out", "nights"])?;
    for b in &ledger.bookings {
        let check_in = b.check_in.to_string();
        let check_out = b.check_out().to_string();
        let nights = b.nights.to_string();
        w.write_record([
            b.id.as_str(),
            b.guest_name.as_str(),
            b.unit_id.as_str(),
            check_in.as_str(),
            check_out.as_str(),
            nights.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}
