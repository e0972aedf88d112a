use std::fs;
use tempfile::tempdir;
use xp_dashboard::models::{Sample, Series};
use xp_dashboard::storage;

fn fixture() -> xp_dashboard::UserProfile {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/profile.json");
    storage::load_profile_json(path).unwrap()
}

#[test]
fn profile_json_round_trips() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("profile.json");
    let profile = fixture();
    storage::save_profile_json(&profile, &out).unwrap();
    let back = storage::load_profile_json(&out).unwrap();
    assert_eq!(back, profile);

    // Dumps keep the endpoint's field names.
    let txt = fs::read_to_string(&out).unwrap();
    assert!(txt.contains("\"auditRatio\""));
    assert!(txt.contains("\"audits_aggregate\""));
    assert!(txt.contains("\"createdAt\""));
}

#[test]
fn series_csv_has_one_row_per_sample() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("xp.csv");
    let profile = fixture();
    let series = Series::join(&profile.xps, &profile.progresses);
    storage::save_series_csv(series.samples(), &out).unwrap();
    let txt = fs::read_to_string(&out).unwrap();
    assert!(txt.starts_with("timestamp,amount,label"));
    assert_eq!(txt.lines().count(), 1 + series.len());
}

#[test]
fn csv_labels_are_prefixed_to_avoid_formulas() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("evil.csv");
    let samples = vec![Sample {
        timestamp: "2024-01-01T00:00:00Z".parse().unwrap(),
        amount: 1.0,
        label: "=HYPERLINK(\"http://evil\")".into(),
    }];
    storage::save_series_csv(&samples, &out).unwrap();

    let mut rdr = csv::Reader::from_path(&out).unwrap();
    let row = rdr.records().next().expect("one data row expected").unwrap();
    let label = row.get(2).unwrap();
    assert!(label.starts_with('\''), "label not prefixed: {label}");
    assert!(label.contains("=HYPERLINK"));
}

#[test]
fn loading_a_missing_file_fails() {
    let dir = tempdir().unwrap();
    assert!(storage::load_profile_json(dir.path().join("nope.json")).is_err());
}
