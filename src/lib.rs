pub mod application;
pub mod cli;
pub mod client;
pub mod config;
pub mod domain;
pub mod http;
pub mod infrastructure;
