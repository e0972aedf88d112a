//! Typed failures of the chart geometry core.
//!
//! A flat axis (min == max) is not represented here: the projector maps it onto a fixed
//! coordinate instead of failing.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// The series to project has no samples.
    #[error("cannot project an empty series")]
    EmptySeries,

    /// Both pie quantities are zero, so no share can be derived.
    #[error("pie totals sum to zero; cannot derive sector angles")]
    ZeroTotal,

    /// Padding leaves no room to plot in.
    #[error("invalid plot area {width}x{height} with padding {padding}")]
    InvalidPlotArea { width: f64, height: f64, padding: f64 },

    /// A quantity that must be finite and non-negative is not.
    #[error("invalid {name}: {value}")]
    InvalidQuantity { name: &'static str, value: f64 },
}

pub type GeometryResult<T> = Result<T, GeometryError>;
