//! Pokegraph - Pokemon list and detail TUI over GraphQL
//!
//! This library exposes the app's modules for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod detail;
pub mod effect;
pub mod filter;
pub mod logging;
pub mod reducer;
pub mod route;
pub mod state;
