pub mod dataset;

pub use dataset::DatasetLoader;
