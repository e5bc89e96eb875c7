pub mod input;
pub mod slider;

pub use input::InputWidget;
pub use slider::condition_slider;
