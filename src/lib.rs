pub mod app;
pub mod cli;
pub mod config;
pub mod json;
pub mod logging;
pub mod offers;
pub mod plaid;
pub mod selector;
pub mod state;
pub mod universities;
pub mod utils;
pub mod web;
