pub mod chat;
pub mod conditions;
pub mod recommendation;
pub mod training;

pub use chat::*;
pub use conditions::*;
pub use recommendation::*;
pub use training::*;
