// Habu Assistant - cleanroom chat assistant
// Library exports

pub mod chat;
pub mod cli;
pub mod client;
pub mod config;
pub mod conversation;
pub mod health;
pub mod modes;
pub mod prompts;
pub mod support;
pub mod technical;
