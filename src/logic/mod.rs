pub mod chat;
pub mod fertilizer;
pub mod recommender;
pub mod stats;
pub mod tree;

pub use chat::QueryResponder;
pub use recommender::Recommender;
pub use tree::TreeParams;
