pub mod api;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod server;
pub mod summarize;
pub mod terminal;
pub mod threads_file;
