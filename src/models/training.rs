use super::conditions::Conditions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One labelled row of the crop dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
    pub crop: String,
}

impl TrainingExample {
    #[cfg(test)]
    pub fn new(conditions: Conditions, crop: impl Into<String>) -> Self {
        Self {
            temperature: conditions.temperature,
            humidity: conditions.humidity,
            ph: conditions.ph,
            rainfall: conditions.rainfall,
            crop: crop.into(),
        }
    }

    pub fn conditions(&self) -> Conditions {
        Conditions::new(self.temperature, self.humidity, self.ph, self.rainfall)
    }
}

/// The full training set, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub examples: Vec<TrainingExample>,
}

impl Dataset {
    pub fn new(examples: Vec<TrainingExample>) -> Self {
        Self { examples }
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Distinct crop labels, sorted.
    pub fn labels(&self) -> BTreeSet<&str> {
        self.examples.iter().map(|e| e.crop.as_str()).collect()
    }
}
