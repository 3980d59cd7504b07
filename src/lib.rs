pub mod analyzers;
pub mod cache;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod output;
pub mod sentiment;
