pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod gemini;
pub mod local_store;
pub mod report;
pub mod scanner;
pub mod server;
