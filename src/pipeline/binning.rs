//! Categorical range binning shared by every continuous variable.

/// A binning rule: ordered lower bucket edges plus one label per bucket.
///
/// Label `i` covers `[bounds[i], bounds[i + 1])`; the last label is unbounded
/// above. A value exactly on an edge takes the upper bucket. Values below
/// `bounds[0]`, NaN, and missing inputs get no label.
#[derive(Debug, Clone, Copy)]
pub struct BinRule {
    bounds: &'static [f64],
    labels: &'static [&'static str],
}

impl BinRule {
    pub const fn new(bounds: &'static [f64], labels: &'static [&'static str]) -> Self {
        assert!(!bounds.is_empty());
        assert!(bounds.len() == labels.len());
        Self { bounds, labels }
    }

    pub fn bucket(&self, value: Option<f64>) -> Option<&'static str> {
        let v = value?;
        if v.is_nan() || v < self.bounds[0] {
            return None;
        }
        let mut idx = 0;
        for (i, edge) in self.bounds.iter().enumerate() {
            if v >= *edge {
                idx = i;
            } else {
                break;
            }
        }
        Some(self.labels[idx])
    }
}

pub const VISIBILITY_MI: BinRule = BinRule::new(
    &[0.0, 2.0, 4.0, 6.0, 8.0],
    &["0-2", "2-4", "4-6", "6-8", "8+"],
);

pub const TEMP_F: BinRule = BinRule::new(
    &[20.0, 40.0, 60.0, 80.0],
    &["20-40", "40-60", "60-80", "80+"],
);

pub const HUMIDITY_PCT: BinRule = BinRule::new(
    &[20.0, 40.0, 60.0, 80.0],
    &["20-40", "40-60", "60-80", "80+"],
);

pub const WIND_MPH: BinRule = BinRule::new(
    &[0.0, 5.0, 10.0, 15.0],
    &["0-5", "5-10", "10-15", "15+"],
);

pub const DEW_POINT_F: BinRule = BinRule::new(
    &[0.0, 20.0, 40.0, 60.0],
    &["0-20", "20-40", "40-60", "60+"],
);

pub const AGE_YEARS: BinRule = BinRule::new(
    &[0.0, 20.0, 40.0, 60.0],
    &["0-20", "20-40", "40-60", "60+"],
);

pub const BIKE_USE_CNT: BinRule = BinRule::new(
    &[0.0, 500.0, 1000.0, 1500.0],
    &["0-500", "500-1000", "1000-1500", "1500+"],
);

pub const BIKE_AVG_DURATION_S: BinRule = BinRule::new(
    &[500.0, 1000.0, 1500.0],
    &["500-1000", "1000-1500", "1500+"],
);
