pub mod app;
pub mod config;
pub mod fetcher;
pub mod handler;
pub mod tui;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, Message, Sender};
pub use config::Config;
pub use fetcher::{FetchFailure, FetchOutcome, HfClient};
