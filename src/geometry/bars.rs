//! Relative layout for the per-project bar graph.

use crate::error::{GeometryError, GeometryResult};
use serde::{Deserialize, Serialize};

/// Smallest bar height, in percent of the tallest bar.
pub const DEFAULT_FLOOR_PERCENT: f64 = 1.0;
/// Total horizontal gap shared by all bars, in pixels.
pub const DEFAULT_SPACING_PX: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarInput {
    pub amount: f64,
    pub label: String,
}

/// Bar width as `percent% - minus_px px` of the container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarWidth {
    pub percent: f64,
    pub minus_px: f64,
}

impl BarWidth {
    /// CSS length, e.g. `calc(50% - 2.5px)`.
    pub fn css(&self) -> String {
        format!("calc({}% - {}px)", self.percent, self.minus_px)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub width: BarWidth,
    /// Height in percent of the container, at least the floor.
    pub height_percent: f64,
    pub amount: f64,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarSeriesLayout {
    pub floor_percent: f64,
    pub spacing_px: f64,
}

impl Default for BarSeriesLayout {
    fn default() -> Self {
        Self {
            floor_percent: DEFAULT_FLOOR_PERCENT,
            spacing_px: DEFAULT_SPACING_PX,
        }
    }
}

impl BarSeriesLayout {
    /// Lay out `inputs` in order. Empty input yields no bars.
    pub fn layout(&self, inputs: &[BarInput]) -> GeometryResult<Vec<Bar>> {
        if let Some(bad) = inputs
            .iter()
            .find(|b| !b.amount.is_finite() || b.amount < 0.0)
        {
            return Err(GeometryError::InvalidQuantity {
                name: "bar amount",
                value: bad.amount,
            });
        }
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let count = inputs.len() as f64;
        let max = inputs.iter().map(|b| b.amount).fold(0.0, f64::max);
        let width = BarWidth {
            percent: 100.0 / count,
            minus_px: self.spacing_px / count,
        };

        Ok(inputs
            .iter()
            .map(|b| {
                let share = if max > 0.0 { b.amount / max * 100.0 } else { 0.0 };
                Bar {
                    width,
                    height_percent: share.max(self.floor_percent),
                    amount: b.amount,
                    label: b.label.clone(),
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_zero_amounts_hit_the_floor() {
        let bars = BarSeriesLayout::default()
            .layout(&[
                BarInput { amount: 0.0, label: "a".into() },
                BarInput { amount: 0.0, label: "b".into() },
            ])
            .unwrap();
        assert!(bars.iter().all(|b| b.height_percent == 1.0));
    }

    #[test]
    fn css_width() {
        let w = BarWidth { percent: 50.0, minus_px: 2.5 };
        assert_eq!(w.css(), "calc(50% - 2.5px)");
    }
}
