pub mod advisor;
pub mod ask;
pub mod charts;

pub use advisor::AdvisorScreen;
pub use ask::AskScreen;
pub use charts::ChartsScreen;
