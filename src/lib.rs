//! xp_dashboard
//!
//! A small Rust library for turning a user's progress data from a GraphQL endpoint into an
//! XP dashboard. Pairs with the `xpdash` CLI.
//!
//! ### Features
//! - Fetch profile, audit totals, skills, XP and progress timings in one query
//! - Pure chart geometry: XP-over-time curve, audit-ratio pie, per-project bars
//! - Render a self-contained HTML page, or chart images as SVG/PNG
//! - Export the XP series as CSV and the raw profile as JSON
//!
//! ### Example
//! ```no_run
//! use xp_dashboard::{Client, Dashboard, DashboardConfig};
//!
//! let config = DashboardConfig::with_exclude(xp_dashboard::config::DEFAULT_EXCLUDE)?;
//! let client = Client::new(config.endpoint.clone())?;
//! let profile = client.fetch_profile("header.payload.signature", config.exclude.as_str())?;
//! let dashboard = Dashboard::build(&profile, &config)?;
//! std::fs::write("dashboard.html", xp_dashboard::render::render_page(&dashboard))?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod geometry;
pub mod models;
pub mod render;
pub mod storage;
pub mod summary;

pub use api::Client;
pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use error::GeometryError;
pub use models::{Sample, Series, UserProfile};
