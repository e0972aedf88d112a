use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The `user` object returned by the GraphQL endpoint (first element of `data.user`).
///
/// Field names follow the endpoint's camelCase schema so a profile dumped with
/// [`crate::storage::save_profile_json`] reads back unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub login: String,
    #[serde(default)]
    pub audit_ratio: f64,
    /// Bytes of XP handed out through audits ("given").
    #[serde(default)]
    pub total_up: f64,
    /// Bytes of XP received from audits ("received").
    #[serde(default)]
    pub total_down: f64,
    #[serde(rename = "audits_aggregate", default)]
    pub audits_aggregate: Option<AuditsAggregate>,
    #[serde(default, deserialize_with = "de_attrs_or_null")]
    pub attrs: UserAttrs,
    /// Skill levels (`skill_*` transactions, one per type).
    #[serde(default)]
    pub transactions: Vec<SkillRecord>,
    #[serde(default)]
    pub xps: Vec<XpRecord>,
    #[serde(default)]
    pub progresses: Vec<ProgressRecord>,
}

impl UserProfile {
    /// Number of audits with a non-zero grade, when the endpoint reported it.
    pub fn audit_count(&self) -> Option<u64> {
        self.audits_aggregate.as_ref().map(|a| a.aggregate.count)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditsAggregate {
    pub aggregate: AggregateCount,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregateCount {
    pub count: u64,
}

/// Free-form registration attributes; every field may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_street: Option<String>,
}

/// Serde helper: `attrs` may be `null` for accounts that never filled the form.
fn de_attrs_or_null<'de, D>(deserializer: D) -> Result<UserAttrs, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<UserAttrs>::deserialize(deserializer)?.unwrap_or_default())
}

/// XP earned for one project, keyed by its object path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct XpRecord {
    pub amount: f64,
    pub path: String,
}

/// When work on a path was registered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub created_at: DateTime<Utc>,
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
}

/// Display label for an object path: its last `/` segment.
pub fn path_label(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// One (time, amount) observation of the XP series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub amount: f64,
    pub label: String,
}

/// Samples in join order; the projector sorts by time itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    samples: Vec<Sample>,
}

impl Series {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Join XP records with progress timings on `path`.
    ///
    /// Records without a timing are dropped. When several progress rows share a path the
    /// last one wins.
    pub fn join(xps: &[XpRecord], progresses: &[ProgressRecord]) -> Self {
        let created: HashMap<&str, DateTime<Utc>> = progresses
            .iter()
            .map(|p| (p.path.as_str(), p.created_at))
            .collect();

        let samples = xps
            .iter()
            .filter_map(|xp| {
                created.get(xp.path.as_str()).map(|ts| Sample {
                    timestamp: *ts,
                    amount: xp.amount,
                    label: path_label(&xp.path).to_string(),
                })
            })
            .collect();
        Self { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl From<Vec<Sample>> for Series {
    fn from(samples: Vec<Sample>) -> Self {
        Self::new(samples)
    }
}
