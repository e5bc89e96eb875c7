pub mod responder;
pub mod rules;

pub use responder::QueryResponder;
pub use rules::QueryRule;
