pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod listing;
pub mod logging;
pub mod report;
pub mod runner;
pub mod store;
