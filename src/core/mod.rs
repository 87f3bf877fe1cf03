pub mod api;
pub mod app;
pub mod config;
pub mod languages;
pub mod paths;
pub mod prompts;
