//! Mochi - a terminal dashboard for Mochi chatbots
//!
//! Manage chatbots, chat with them, tune their settings and read their logs,
//! either in the TUI or through one-shot CLI commands. This library exposes
//! modules for use in integration tests.

pub mod adapters;
pub mod api;
pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod optimistic;
pub mod state;
pub mod traits;
pub mod ui;
pub mod widgets;
