use crate::models::Dataset;
use std::collections::BTreeMap;

/// Number of examples per crop, most frequent first. Ties are alphabetical.
pub fn crop_counts(dataset: &Dataset) -> Vec<(String, u64)> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for example in &dataset.examples {
        *counts.entry(example.crop.as_str()).or_insert(0) += 1;
    }

    let mut counts: Vec<(String, u64)> = counts
        .into_iter()
        .map(|(crop, n)| (crop.to_string(), n))
        .collect();
    // Stable sort keeps alphabetical order within equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Humidity bands used as the marker size on the scatter chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HumidityBand {
    Low,
    Medium,
    High,
}

impl HumidityBand {
    pub fn from_humidity(humidity: f64) -> Self {
        if humidity < 60.0 {
            HumidityBand::Low
        } else if humidity < 80.0 {
            HumidityBand::Medium
        } else {
            HumidityBand::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HumidityBand::Low => "<60%",
            HumidityBand::Medium => "60-80%",
            HumidityBand::High => ">=80%",
        }
    }
}

/// Temperature vs rainfall points for one crop and humidity band.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub crop: String,
    pub band: HumidityBand,
    /// (temperature, rainfall)
    pub points: Vec<(f64, f64)>,
}

pub fn scatter_series(dataset: &Dataset) -> Vec<ScatterSeries> {
    let mut grouped: BTreeMap<(&str, HumidityBand), Vec<(f64, f64)>> = BTreeMap::new();
    for e in &dataset.examples {
        grouped
            .entry((e.crop.as_str(), HumidityBand::from_humidity(e.humidity)))
            .or_default()
            .push((e.temperature, e.rainfall));
    }

    grouped
        .into_iter()
        .map(|((crop, band), points)| ScatterSeries {
            crop: crop.to_string(),
            band,
            points,
        })
        .collect()
}

/// Min and max of a column, padded so points don't sit on the axis.
pub fn axis_bounds(values: impl Iterator<Item = f64>, padding: f64) -> [f64; 2] {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    if (max - min).abs() < f64::EPSILON {
        return [min - 1.0, max + 1.0];
    }
    [min - padding, max + padding]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Conditions, TrainingExample};

    fn dataset() -> Dataset {
        let rows = [
            (25.0, 85.0, 6.5, 220.0, "rice"),
            (26.0, 70.0, 6.4, 200.0, "rice"),
            (20.0, 50.0, 6.8, 70.0, "wheat"),
            (33.0, 40.0, 7.0, 60.0, "cotton"),
            (34.0, 45.0, 7.1, 65.0, "cotton"),
            (22.0, 75.0, 5.0, 180.0, "tea"),
        ];
        Dataset::new(
            rows.iter()
                .map(|(t, h, p, r, c)| TrainingExample::new(Conditions::new(*t, *h, *p, *r), *c))
                .collect(),
        )
    }

    #[test]
    fn counts_descending_then_alphabetical() {
        let counts = crop_counts(&dataset());
        assert_eq!(
            counts,
            vec![
                ("cotton".to_string(), 2),
                ("rice".to_string(), 2),
                ("tea".to_string(), 1),
                ("wheat".to_string(), 1),
            ]
        );
    }

    #[test]
    fn counts_of_empty_dataset() {
        assert!(crop_counts(&Dataset::default()).is_empty());
    }

    #[test]
    fn humidity_bands() {
        assert_eq!(HumidityBand::from_humidity(30.0), HumidityBand::Low);
        assert_eq!(HumidityBand::from_humidity(60.0), HumidityBand::Medium);
        assert_eq!(HumidityBand::from_humidity(79.9), HumidityBand::Medium);
        assert_eq!(HumidityBand::from_humidity(80.0), HumidityBand::High);
    }

    #[test]
    fn scatter_groups_by_crop_and_band() {
        let series = scatter_series(&dataset());
        // rice splits across two bands
        let rice: Vec<_> = series.iter().filter(|s| s.crop == "rice").collect();
        assert_eq!(rice.len(), 2);
        assert_eq!(rice[0].band, HumidityBand::Medium);
        assert_eq!(rice[0].points, vec![(26.0, 200.0)]);
        assert_eq!(rice[1].band, HumidityBand::High);

        let cotton = series.iter().find(|s| s.crop == "cotton").unwrap();
        assert_eq!(cotton.points.len(), 2);

        let total: usize = series.iter().map(|s| s.points.len()).sum();
        assert_eq!(total, 6);
    }

    #[test]
    fn bounds_are_padded() {
        let b = axis_bounds([10.0, 20.0, 15.0].into_iter(), 2.0);
        assert_eq!(b, [8.0, 22.0]);
    }

    #[test]
    fn bounds_degenerate_cases() {
        assert_eq!(axis_bounds(std::iter::empty(), 5.0), [0.0, 1.0]);
        assert_eq!(axis_bounds([3.0].into_iter(), 5.0), [2.0, 4.0]);
    }
}
