use crate::models::{Sample, UserProfile};
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Prefix cells a spreadsheet would evaluate as a formula with `'`.
fn sanitize_cell(s: &str) -> String {
    if s.starts_with(['=', '+', '-', '@']) {
        format!("'{s}")
    } else {
        s.to_string()
    }
}

/// Save the joined XP series as CSV with header `timestamp,amount,label`.
pub fn save_series_csv<P: AsRef<Path>>(samples: &[Sample], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    wtr.serialize(("timestamp", "amount", "label"))?;
    for s in samples {
        wtr.serialize((s.timestamp.to_rfc3339(), s.amount, sanitize_cell(&s.label)))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save a fetched profile as pretty JSON (same shape the endpoint returns).
pub fn save_profile_json<P: AsRef<Path>>(profile: &UserProfile, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let s = serde_json::to_string_pretty(profile)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Load a profile saved by [`save_profile_json`] (or a raw `user` object).
pub fn load_profile_json<P: AsRef<Path>>(path: P) -> Result<UserProfile> {
    let path = path.as_ref();
    let txt = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&txt).with_context(|| format!("parse profile {}", path.display()))
}
