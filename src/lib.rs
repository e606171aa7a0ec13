//! Polling backend: polls with text options, anonymous votes and tallied
//! results, persisted as a single JSON document.

pub mod controllers;
pub mod db;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
