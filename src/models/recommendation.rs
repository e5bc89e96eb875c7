use super::conditions::Conditions;
use serde::{Deserialize, Serialize};

/// Outcome of a single advisor prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub conditions: Conditions,
    pub crop: String,
    pub advice: String,
}

impl Recommendation {
    pub fn new(conditions: Conditions, crop: impl Into<String>, advice: impl Into<String>) -> Self {
        Self {
            conditions,
            crop: crop.into(),
            advice: advice.into(),
        }
    }

    /// Crop label as shown on the form.
    pub fn display_crop(&self) -> String {
        self.crop.to_uppercase()
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Recommended Crop: {}\nFertilizer Advice: {}",
            self.display_crop(),
            self.advice
        )
    }
}
