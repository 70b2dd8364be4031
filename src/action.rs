//! Actions - everything that can happen to the app

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{PokemonDetails, PokemonSummary};

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    /// Load the list and resolve the initial route
    Init,

    // ===== List category =====
    /// Intent: reload the list (keeps the current list visible meanwhile)
    ListFetch,

    /// Result: list query completed
    ListDidLoad(Vec<PokemonSummary>),

    /// Result: list query failed
    ListDidError(String),

    /// Move the highlight to a row of the filtered view
    ListSelect(usize),

    // ===== Search category =====
    /// Focus the filter input
    SearchStart,

    /// Filter text changed
    SearchQueryChange(String),

    /// Keep the filter and leave the input
    SearchSubmit,

    /// Clear the filter and leave the input
    SearchCancel,

    // ===== Route category =====
    /// Activate a list item: navigate to `/pokemon/:id`
    RouteOpen(String),

    /// Close the overlay: navigate to `/`
    RouteClose,

    RouteBack,
    RouteForward,

    // ===== Detail category =====
    /// Result: detail query completed (`None` when no record matched)
    DetailDidLoad {
        seq: u64,
        details: Option<PokemonDetails>,
    },

    /// Result: detail query failed
    DetailDidError { seq: u64, error: String },

    // ===== UI category =====
    /// Force a re-render (for cursor movement, etc.)
    Render,

    // ===== Uncategorized (global) =====
    /// Periodic tick for the loading spinner
    Tick,

    /// Exit the application
    Quit,
}
