use crate::logic::stats::{self, ScatterSeries};
use crate::logic::{QueryResponder, Recommender};
use crate::models::{ChatExchange, ConditionField, Conditions, Dataset, Recommendation};

/// Chat exchanges kept on the Ask screen.
const MAX_HISTORY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Advisor,
    Ask,
    Charts,
}

impl Screen {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Screen::Advisor),
            '2' => Some(Screen::Ask),
            '3' => Some(Screen::Charts),
            _ => None,
        }
    }
}

pub struct AdvisorState {
    pub conditions: Conditions,
    pub focused_field: ConditionField,
    pub last_recommendation: Option<Recommendation>,
}

impl AdvisorState {
    pub fn new() -> Self {
        Self {
            conditions: Conditions::default(),
            focused_field: ConditionField::Temperature,
            last_recommendation: None,
        }
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
    }

    pub fn adjust(&mut self, steps: i32) {
        self.conditions.nudge(self.focused_field, steps);
    }

    pub fn reset(&mut self) {
        self.conditions = Conditions::default();
        self.last_recommendation = None;
    }

    /// True when the shown result was computed from different inputs.
    pub fn is_stale(&self) -> bool {
        self.last_recommendation
            .as_ref()
            .is_some_and(|r| r.conditions != self.conditions)
    }
}

pub struct AskState {
    pub input: String,
    /// Newest first
    pub history: Vec<ChatExchange>,
}

impl AskState {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            history: Vec::new(),
        }
    }

    pub fn push_exchange(&mut self, exchange: ChatExchange) {
        self.history.insert(0, exchange);
        self.history.truncate(MAX_HISTORY);
    }
}

/// Chart inputs derived once from the raw dataset.
pub struct ChartData {
    pub crop_counts: Vec<(String, u64)>,
    pub scatter: Vec<ScatterSeries>,
    pub temperature_bounds: [f64; 2],
    pub rainfall_bounds: [f64; 2],
}

impl ChartData {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            crop_counts: stats::crop_counts(dataset),
            scatter: stats::scatter_series(dataset),
            temperature_bounds: stats::axis_bounds(
                dataset.examples.iter().map(|e| e.temperature),
                2.0,
            ),
            rainfall_bounds: stats::axis_bounds(
                dataset.examples.iter().map(|e| e.rainfall),
                20.0,
            ),
        }
    }
}

pub struct App<'a> {
    pub screen: Screen,
    pub should_quit: bool,

    // Services, built once at startup
    pub recommender: &'a Recommender,
    pub responder: &'a QueryResponder,

    // Data
    pub chart_data: ChartData,

    // Screen states
    pub advisor_state: AdvisorState,
    pub ask_state: AskState,

    // UI state
    pub status_message: Option<String>,
}

impl<'a> App<'a> {
    pub fn new(
        recommender: &'a Recommender,
        responder: &'a QueryResponder,
        dataset: &Dataset,
    ) -> Self {
        Self {
            screen: Screen::Advisor,
            should_quit: false,
            recommender,
            responder,
            chart_data: ChartData::from_dataset(dataset),
            advisor_state: AdvisorState::new(),
            ask_state: AskState::new(),
            status_message: None,
        }
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// The Ask screen captures every printable key.
    pub fn is_typing(&self) -> bool {
        self.screen == Screen::Ask
    }

    pub fn predict(&mut self) {
        let rec = self.recommender.recommend(&self.advisor_state.conditions);
        self.set_status(&format!("Recommended {}", rec.display_crop()));
        self.advisor_state.last_recommendation = Some(rec);
    }

    /// Answer the pending chat input. Blank input is ignored.
    pub fn submit_query(&mut self) {
        let query = std::mem::take(&mut self.ask_state.input);
        let query = query.trim();
        if query.is_empty() {
            return;
        }

        let responder = self.responder;
        let rule = responder.matching_rule(query);
        let response = responder.respond(query);
        tracing::debug!(query, rule = rule.map(|r| r.name.as_str()), "Chat query answered");

        let exchange = ChatExchange::new(query, response, rule.map(|r| r.name.as_str()));
        self.ask_state.push_exchange(exchange);
        self.clear_status();
    }
}
