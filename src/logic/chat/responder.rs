use super::rules::{builtin_rules, QueryRule, FALLBACK_RESPONSE};

/// Ordered keyword rules. The first rule whose trigger appears in the query
/// answers it.
#[derive(Debug, Clone)]
pub struct QueryResponder {
    rules: Vec<QueryRule>,
}

impl QueryResponder {
    pub fn new() -> Self {
        Self {
            rules: builtin_rules(),
        }
    }

    /// Built-in rules followed by `extra`, which therefore only answer
    /// queries none of the built-ins match.
    pub fn with_extra_rules(extra: Vec<QueryRule>) -> Self {
        let mut responder = Self::new();
        responder
            .rules
            .extend(extra.into_iter().map(QueryRule::normalized));
        responder
    }

    pub fn respond(&self, text: &str) -> &str {
        self.matching_rule(text)
            .map(|r| r.response.as_str())
            .unwrap_or(FALLBACK_RESPONSE)
    }

    pub fn matching_rule(&self, text: &str) -> Option<&QueryRule> {
        let query = text.to_lowercase();
        self.rules.iter().find(|rule| rule.matches(&query))
    }

    pub fn list_rules(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name.as_str()).collect()
    }
}

impl Default for QueryResponder {
    fn default() -> Self {
        Self::new()
    }
}
