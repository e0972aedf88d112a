//! Orchestration: a fetched profile plus settings → everything the renderers draw.

use crate::config::DashboardConfig;
use crate::error::GeometryError;
use crate::geometry::{Bar, BarInput, PieTotals, ProjectedPath, Sector};
use crate::models::{Series, UserAttrs, UserProfile, path_label};
use crate::summary::ProfileSummary;
use anyhow::Result;
use log::{debug, warn};

/// Scene description of the whole dashboard. Charts without data are `None`.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub summary: ProfileSummary,
    pub attrs: UserAttrs,
    pub config: DashboardConfig,
    pub series: Series,
    pub xp_chart: Option<ProjectedPath>,
    pub audit_pie: Option<[Sector; 2]>,
    pub bars: Vec<Bar>,
}

impl Dashboard {
    pub fn build(profile: &UserProfile, config: &DashboardConfig) -> Result<Self> {
        let profile = filtered(profile, config);
        let series = Series::join(&profile.xps, &profile.progresses);
        debug!(
            "{} of {} xp records have a timing",
            series.len(),
            profile.xps.len()
        );

        let xp_chart = match config.projector().project(&series) {
            Ok(p) => Some(p),
            Err(GeometryError::EmptySeries) => {
                warn!("no timed xp records; skipping the progression chart");
                None
            }
            Err(e) => return Err(e.into()),
        };

        let totals = PieTotals::new(profile.total_down, profile.total_up)?;
        let audit_pie = match config.slicer().slice(totals) {
            Ok(s) => Some(s),
            Err(GeometryError::ZeroTotal) => {
                warn!("no audit xp given or received; skipping the audit pie");
                None
            }
            Err(e) => return Err(e.into()),
        };

        let inputs: Vec<BarInput> = profile
            .xps
            .iter()
            .map(|x| BarInput {
                amount: x.amount,
                label: path_label(&x.path).to_string(),
            })
            .collect();
        let bars = config.bars.layout(&inputs)?;

        Ok(Self {
            summary: ProfileSummary::from_profile(&profile),
            attrs: profile.attrs.clone(),
            config: config.clone(),
            series,
            xp_chart,
            audit_pie,
            bars,
        })
    }
}

/// Drop xp and progress rows the configuration excludes.
fn filtered(profile: &UserProfile, config: &DashboardConfig) -> UserProfile {
    let mut p = profile.clone();
    p.xps.retain(|x| config.includes(&x.path));
    p.progresses.retain(|x| config.includes(&x.path));
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_EXCLUDE;
    use crate::models::{ProgressRecord, XpRecord};
    use chrono::{TimeZone, Utc};

    fn profile() -> UserProfile {
        let at = |s| Utc.timestamp_opt(s, 0).single().unwrap();
        UserProfile {
            login: "jdoe".into(),
            audit_ratio: 1.0,
            total_up: 0.0,
            total_down: 0.0,
            audits_aggregate: None,
            attrs: UserAttrs::default(),
            transactions: vec![],
            xps: vec![
                XpRecord { amount: 100.0, path: "/school/div-01/piscine-js/quest".into() },
                XpRecord { amount: 300.0, path: "/school/div-01/graphql".into() },
            ],
            progresses: vec![
                ProgressRecord { created_at: at(10), path: "/school/div-01/piscine-js/quest".into() },
                ProgressRecord { created_at: at(20), path: "/school/div-01/graphql".into() },
            ],
        }
    }

    #[test]
    fn excluded_paths_and_zero_totals() {
        let cfg = DashboardConfig::with_exclude(DEFAULT_EXCLUDE).unwrap();
        let d = Dashboard::build(&profile(), &cfg).unwrap();
        assert_eq!(d.series.len(), 1);
        assert_eq!(d.bars.len(), 1);
        assert_eq!(d.bars[0].label, "graphql");
        assert!(d.audit_pie.is_none());
        let chart = d.xp_chart.unwrap();
        assert_eq!(chart.markers.len(), 1);
    }

    #[test]
    fn everything_excluded_leaves_no_line_chart() {
        let cfg = DashboardConfig::with_exclude("div-01").unwrap();
        let d = Dashboard::build(&profile(), &cfg).unwrap();
        assert!(d.xp_chart.is_none());
        assert!(d.bars.is_empty());
    }
}
