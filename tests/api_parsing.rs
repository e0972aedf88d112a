use xp_dashboard::api::{extract_user, parse_profile_response};
use xp_dashboard::models::Series;

fn sample_response() -> serde_json::Value {
    let txt = include_str!("data/response.json");
    serde_json::from_str(txt).unwrap()
}

#[test]
fn parse_sample_response() {
    let v = sample_response();
    assert!(extract_user(&v).is_ok());

    let profile = parse_profile_response(&v).unwrap();
    assert_eq!(profile.login, "jdoe");
    assert_eq!(profile.total_up, 1_953_416.0);
    assert_eq!(profile.total_down, 1_801_070.0);
    assert_eq!(profile.audit_count(), Some(42));
    assert_eq!(profile.attrs.first_name.as_deref(), Some("Jane"));
    assert_eq!(profile.attrs.address_city.as_deref(), Some("Jõhvi"));
    assert_eq!(profile.transactions.len(), 2);
    assert_eq!(profile.transactions[0].kind, "skill_go");
    assert_eq!(profile.xps.len(), 5);
    assert_eq!(profile.progresses.len(), 4);
}

#[test]
fn join_keeps_only_timed_records() {
    let profile = parse_profile_response(&sample_response()).unwrap();
    let series = Series::join(&profile.xps, &profile.progresses);
    // "checkpoint/untimed" has no progress row.
    assert_eq!(series.len(), 4);
    assert!(series.samples().iter().all(|s| s.label != "untimed"));
    // Join preserves xp order; sorting is the projector's job.
    assert_eq!(series.samples()[0].label, "go-reloaded");
    assert_eq!(series.samples()[1].label, "ascii-art");
}

#[test]
fn null_attrs_and_missing_lists_default() {
    let v = serde_json::json!({
        "data": { "user": [ { "login": "ghost", "attrs": null } ] }
    });
    let profile = parse_profile_response(&v).unwrap();
    assert_eq!(profile.login, "ghost");
    assert!(profile.attrs.email.is_none());
    assert!(profile.xps.is_empty());
    assert_eq!(profile.audit_count(), None);
}
