use serde::{Deserialize, Serialize};

/// Response used when no rule matches.
pub const FALLBACK_RESPONSE: &str =
    "Sorry, I can only answer crop-related queries. Please ask about crops or soil.";

/// A keyword rule: answers with `response` when the lower-cased query
/// contains any of `triggers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRule {
    pub name: String,
    pub triggers: Vec<String>,
    pub response: String,
}

impl QueryRule {
    pub fn new(name: impl Into<String>, triggers: &[&str], response: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            triggers: triggers.iter().map(|t| t.to_lowercase()).collect(),
            response: response.into(),
        }
    }

    /// `query` must already be lower-cased.
    pub fn matches(&self, query: &str) -> bool {
        self.triggers
            .iter()
            .any(|t| !t.is_empty() && query.contains(t.as_str()))
    }

    /// Triggers from config may carry upper case; matching assumes lower.
    pub fn normalized(mut self) -> Self {
        for trigger in &mut self.triggers {
            *trigger = trigger.to_lowercase();
        }
        self
    }
}

/// Built-in rules in priority order.
pub fn builtin_rules() -> Vec<QueryRule> {
    vec![
        QueryRule::new(
            "rainfall_humidity",
            &["high rainfall", "humid"],
            "Rice and sugarcane are suitable for high rainfall and humid conditions.",
        ),
        QueryRule::new(
            "dryness",
            &["dry", "low rainfall"],
            "Cotton, millet, and pulses grow well in dry or low rainfall areas.",
        ),
        QueryRule::new(
            "acidic_soil",
            &["acidic soil", "ph < 6"],
            "Tea prefers acidic soil conditions.",
        ),
        QueryRule::new(
            "neutral_soil",
            &["neutral soil", "ph 6-7"],
            "Wheat, maize, and rice grow well in neutral soil.",
        ),
        QueryRule::new(
            "heat",
            &["high temperature", "hot"],
            "Millet, cotton, and maize prefer hot climates.",
        ),
        QueryRule::new(
            "greeting",
            &["hi", "hello"],
            "Hello Sir, Tell Me Your Query.",
        ),
        QueryRule::new(
            "identity",
            &["what is this", "growwise"],
            "GrowWise, It is an AI-powered Crop Advisiory System.",
        ),
        QueryRule::new(
            "authorship",
            &["who made you", "name the developer"],
            "GrowWise is Developed By Vansh Nagpal in 2025.",
        ),
        QueryRule::new(
            "usefulness",
            &["is it useful", "is it practical to use"],
            "Yes, It is.",
        ),
    ]
}
