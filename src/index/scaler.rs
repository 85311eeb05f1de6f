//! Min-max scaling of a numeric column to the unit interval.

/// Bounds fit once over a column and then frozen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxScaler {
    min: f64,
    max: f64,
}

impl MinMaxScaler {
    /// Fit bounds over `values`. An empty column fits to `[0, 0]`.
    pub fn fit(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self { min: 0.0, max: 0.0 };
        }
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        Self { min, max }
    }

    /// Scale `value` into `[0, 1]` relative to the fitted bounds.
    ///
    /// A zero-variance column maps every value to 0.0.
    pub fn transform(&self, value: f64) -> f64 {
        let range = self.max - self.min;
        if range > 0.0 {
            (value - self.min) / range
        } else {
            0.0
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_to_unit_interval() {
        let s = MinMaxScaler::fit(&[10.0, 20.0, 30.0]);
        assert_eq!(s.transform(10.0), 0.0);
        assert_eq!(s.transform(20.0), 0.5);
        assert_eq!(s.transform(30.0), 1.0);
    }

    #[test]
    fn constant_column_maps_to_zero() {
        let s = MinMaxScaler::fit(&[4.2, 4.2]);
        assert_eq!(s.transform(4.2), 0.0);
        assert_eq!(MinMaxScaler::fit(&[]).transform(1.0), 0.0);
    }
}
