pub mod banner;
pub mod commands;
pub mod config;
pub mod consts;
pub mod events;
pub mod form;
pub mod logging;
pub mod prompts;
pub mod provider;
pub mod spinner;
pub mod summarizer;
