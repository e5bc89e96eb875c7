use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A question asked on the chat screen and the answer it got.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatExchange {
    pub query: String,
    pub response: String,
    /// Name of the rule that answered, `None` for the fallback.
    pub rule: Option<String>,
    pub asked_at: DateTime<Local>,
}

impl ChatExchange {
    pub fn new(query: impl Into<String>, response: impl Into<String>, rule: Option<&str>) -> Self {
        Self {
            query: query.into(),
            response: response.into(),
            rule: rule.map(str::to_string),
            asked_at: Local::now(),
        }
    }

    pub fn answered_by_rule(&self) -> bool {
        self.rule.is_some()
    }
}
