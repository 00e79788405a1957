use crate::config::GridConfig;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Base threat of the deepest zone before the centrality discount.
const BASE_THREAT: f64 = 0.01;
/// Threat added across the full pitch length.
const THREAT_GRADIENT: f64 = 0.1;
/// Maximum discount applied at the touchlines.
const CENTRALITY_DISCOUNT: f64 = 0.3;

/// PitchZoneGrid is an immutable surface of base threat values over the
/// normalized pitch.
///
/// Cells are indexed by `(zx, zy)` where `zx` runs along the pitch length
/// (toward the attacking end) and `zy` across its width. Values are built once
/// at construction; the grid is read-only afterwards and can be shared across
/// threads behind a plain reference or an `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridRepr")]
pub struct PitchZoneGrid {
    length_zones: usize,
    width_zones: usize,
    /// Row-major by `zx`: `values[zx * width_zones + zy]`
    values: Vec<f64>,
}

impl PitchZoneGrid {
    /// Builds a grid with the default threat formula.
    ///
    /// Zero dimensions are raised to one so lookups always have a cell.
    pub fn new(length_zones: usize, width_zones: usize) -> Self {
        let n = length_zones.max(1);
        let m = width_zones.max(1);
        let mut values = Vec::with_capacity(n * m);
        for zx in 0..n {
            for zy in 0..m {
                values.push(default_cell_value(zx, zy, n, m));
            }
        }
        debug!(length_zones = n, width_zones = m, "Zone grid initialized");
        Self { length_zones: n, width_zones: m, values }
    }

    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(config.length_zones, config.width_zones)
    }

    /// Builds a grid from externally supplied cell values (row-major by `zx`).
    pub fn from_values(
        length_zones: usize,
        width_zones: usize,
        values: Vec<f64>,
    ) -> Result<Self, ConfigError> {
        if length_zones == 0 || width_zones == 0 {
            return Err(ConfigError::Invalid("zone grid needs at least one cell".to_string()));
        }
        if values.len() != length_zones * width_zones {
            return Err(ConfigError::Invalid(format!(
                "expected {} zone values, got {}",
                length_zones * width_zones,
                values.len()
            )));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(ConfigError::Invalid(format!("zone value must be >= 0, got {}", bad)));
        }
        Ok(Self { length_zones, width_zones, values })
    }

    pub fn length_zones(&self) -> usize {
        self.length_zones
    }

    pub fn width_zones(&self) -> usize {
        self.width_zones
    }

    /// Map a normalized position to its zone, clamping out-of-range input to
    /// the nearest edge zone.
    pub fn zone_index(&self, x: f64, y: f64) -> (usize, usize) {
        (clamp_axis(x, self.length_zones), clamp_axis(y, self.width_zones))
    }

    /// Base threat at a normalized position. Never fails.
    pub fn base_value(&self, x: f64, y: f64) -> f64 {
        let (zx, zy) = self.zone_index(x, y);
        self.values[zx * self.width_zones + zy]
    }

    pub fn cell_value(&self, zx: usize, zy: usize) -> Option<f64> {
        if zx < self.length_zones && zy < self.width_zones {
            Some(self.values[zx * self.width_zones + zy])
        } else {
            None
        }
    }

    /// Raw cell values for export.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Unchecked wire form; deserialized grids go through [`PitchZoneGrid::from_values`].
#[derive(Deserialize)]
struct GridRepr {
    length_zones: usize,
    width_zones: usize,
    values: Vec<f64>,
}

impl TryFrom<GridRepr> for PitchZoneGrid {
    type Error = ConfigError;

    fn try_from(repr: GridRepr) -> Result<Self, Self::Error> {
        Self::from_values(repr.length_zones, repr.width_zones, repr.values)
    }
}

impl Default for PitchZoneGrid {
    fn default() -> Self {
        Self::from_config(&GridConfig::default())
    }
}

/// True when a normalized coordinate pair lies inside the unit pitch.
pub fn is_in_range(x: f64, y: f64) -> bool {
    (0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y)
}

fn clamp_axis(v: f64, zones: usize) -> usize {
    let idx = (v * zones as f64).floor();
    if idx <= 0.0 || idx.is_nan() {
        0
    } else {
        (idx as usize).min(zones - 1)
    }
}

fn default_cell_value(zx: usize, zy: usize, n: usize, m: usize) -> f64 {
    let progress = BASE_THREAT + (zx as f64 / n as f64) * THREAT_GRADIENT;
    let half = m as f64 / 2.0;
    let centrality = 1.0 - CENTRALITY_DISCOUNT * (zy as f64 - half).abs() / half;
    progress * centrality
}
