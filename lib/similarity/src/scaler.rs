//! Per-feature min-max scaling

use finlens_core::Vector;

/// Rescales every feature to `[0, 1]` using the observed min and max.
///
/// A feature with zero range maps to 0 for every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MinMaxScaler {
    mins: Vec<f64>,
    maxs: Vec<f64>,
}

impl MinMaxScaler {
    /// Learn per-feature bounds. All rows must share the dimension of the first.
    pub fn fit(rows: &[Vector]) -> Self {
        let dim = rows.first().map(Vector::dim).unwrap_or(0);
        let mut mins = vec![f64::INFINITY; dim];
        let mut maxs = vec![f64::NEG_INFINITY; dim];

        for row in rows {
            for (i, &x) in row.as_slice().iter().enumerate().take(dim) {
                mins[i] = mins[i].min(x);
                maxs[i] = maxs[i].max(x);
            }
        }

        Self { mins, maxs }
    }

    pub fn transform(&self, row: &Vector) -> Vector {
        row.as_slice()
            .iter()
            .zip(self.mins.iter().zip(self.maxs.iter()))
            .map(|(&x, (&min, &max))| {
                let range = max - min;
                if range == 0.0 {
                    0.0
                } else {
                    (x - min) / range
                }
            })
            .collect::<Vec<_>>()
            .into()
    }

    pub fn fit_transform(rows: &[Vector]) -> (Self, Vec<Vector>) {
        let scaler = Self::fit(rows);
        let scaled = rows.iter().map(|r| scaler.transform(r)).collect();
        (scaler, scaled)
    }

    /// Observed `(min, max)` of a feature
    pub fn bounds(&self, feature: usize) -> Option<(f64, f64)> {
        Some((*self.mins.get(feature)?, *self.maxs.get(feature)?))
    }

    pub fn dim(&self) -> usize {
        self.mins.len()
    }
}
