pub mod config;
pub mod duration;
pub mod error;
pub mod filter;
pub mod loader;
pub mod output;
pub mod prompt;
pub mod stats;
pub mod trip;
