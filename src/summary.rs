use crate::models::UserProfile;
use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};

/// Headline numbers shown next to the charts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileSummary {
    pub login: String,
    pub audit_ratio: f64,
    pub audit_count: Option<u64>,
    /// XP received through audits, in bytes.
    pub received: f64,
    /// XP given through audits, in bytes.
    pub given: f64,
    pub total_xp: f64,
    pub project_count: usize,
    /// `(name, level)` with the `skill_` prefix stripped, highest first.
    pub skills: Vec<(String, f64)>,
}

impl ProfileSummary {
    pub fn from_profile(profile: &UserProfile) -> Self {
        let mut skills: Vec<(String, f64)> = profile
            .transactions
            .iter()
            .map(|t| {
                let name = t.kind.strip_prefix("skill_").unwrap_or(&t.kind);
                (name.to_string(), t.amount)
            })
            .collect();
        skills.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Self {
            login: profile.login.clone(),
            audit_ratio: profile.audit_ratio,
            audit_count: profile.audit_count(),
            received: profile.total_down,
            given: profile.total_up,
            total_xp: profile.xps.iter().map(|x| x.amount).sum(),
            project_count: profile.xps.len(),
            skills,
        }
    }

    /// Total XP in kilobytes, rounded up.
    pub fn total_xp_kb(&self) -> u64 {
        (self.total_xp / 1000.0).ceil().max(0.0) as u64
    }

    pub fn audit_ratio_text(&self) -> String {
        format!("{:.2}", self.audit_ratio)
    }

    pub fn received_mb_text(&self) -> String {
        megabytes(self.received)
    }

    pub fn given_mb_text(&self) -> String {
        megabytes(self.given)
    }
}

/// Bytes as megabytes with two decimals, e.g. `1.23`.
pub fn megabytes(bytes: f64) -> String {
    format!("{:.2}", bytes / 1_000_000.0)
}

/// Whole amount with thousands separators, e.g. `12,500`.
pub fn format_amount(amount: f64) -> String {
    (amount.round() as i64).to_formatted_string(&Locale::en)
}
