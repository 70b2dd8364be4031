//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use tui_dispatch::DataResource;
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::detail::DetailQuery;
use crate::filter::filter_pokemons;
use crate::route::{Route, RouteHistory};

/// Default `first` argument of the list query: the first generation.
pub const DEFAULT_LIST_SIZE: u32 = 151;

/// Spinner frame interval while something is loading.
pub const SPINNER_TICK_MS: u64 = 90;

/// One row of the list query
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonSummary {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub number: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub types: Vec<String>,
}

/// Min/max pair used for weight and height
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Dimension {
    #[serde(default, deserialize_with = "null_as_default")]
    pub minimum: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub maximum: String,
}

impl Dimension {
    pub fn range(&self) -> String {
        match (self.minimum.is_empty(), self.maximum.is_empty()) {
            (true, true) => "?".to_string(),
            (false, true) => self.minimum.clone(),
            (true, false) => self.maximum.clone(),
            (false, false) => format!("{} - {}", self.minimum, self.maximum),
        }
    }
}

/// Result of the detail query for one Pokemon
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonDetails {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub number: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weight: Dimension,
    #[serde(default, deserialize_with = "null_as_default")]
    pub height: Dimension,
    #[serde(default, deserialize_with = "null_as_default")]
    pub classification: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub types: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resistant: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weaknesses: Vec<String>,
    #[serde(rename = "fleeRate", default, deserialize_with = "null_as_default")]
    pub flee_rate: f64,
    #[serde(rename = "maxCP", default, deserialize_with = "null_as_default")]
    pub max_cp: u32,
    #[serde(rename = "maxHP", default, deserialize_with = "null_as_default")]
    pub max_hp: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Which part of the screen receives keys, derived from state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    List,
    Search,
    Detail,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchState {
    /// Whether the filter input has focus
    pub active: bool,
    pub query: String,
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// List query lifecycle: Empty → Loading → Loaded/Failed
    pub pokemons: DataResource<Vec<PokemonSummary>>,
    /// A reload is in flight while the previous list stays visible
    pub is_refreshing: bool,
    /// `first` argument of the list query
    pub list_size: u32,

    pub search: SearchState,
    /// Highlighted row, an index into the filtered view
    pub cursor: usize,

    /// Navigation history; its current entry is the active route
    pub history: RouteHistory,
    pub detail: DetailQuery,

    pub message: Option<String>,
    pub tick_count: u32,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Route::List, DEFAULT_LIST_SIZE)
    }
}

impl AppState {
    pub fn new(route: Route, list_size: u32) -> Self {
        Self {
            pokemons: DataResource::Empty,
            is_refreshing: false,
            list_size,
            search: SearchState::default(),
            cursor: 0,
            history: RouteHistory::new(route),
            detail: DetailQuery::default(),
            message: None,
            tick_count: 0,
        }
    }

    pub fn route(&self) -> &Route {
        self.history.current()
    }

    /// The loaded list, or nothing while it is loading or failed
    pub fn pokemon_list(&self) -> &[PokemonSummary] {
        self.pokemons.data().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn filtered(&self) -> Vec<&PokemonSummary> {
        filter_pokemons(self.pokemon_list(), &self.search.query)
    }

    pub fn highlighted(&self) -> Option<&PokemonSummary> {
        self.filtered().get(self.cursor).copied()
    }

    /// Look up a summary in the loaded list by id
    pub fn summary(&self, id: &str) -> Option<&PokemonSummary> {
        self.pokemon_list().iter().find(|pokemon| pokemon.id == id)
    }

    /// Summary for the current route parameter
    pub fn selected_summary(&self) -> Option<&PokemonSummary> {
        self.summary(self.route().pokemon_id()?)
    }

    /// What the detail overlay shows, derived from the current route.
    ///
    /// Requires a route parameter, a matching summary in the loaded list and
    /// a completed detail query for that same parameter.
    pub fn visible_details(&self) -> Option<(&PokemonSummary, &PokemonDetails)> {
        let id = self.route().pokemon_id()?;
        let summary = self.summary(id)?;
        let details = self.detail.details_for(id)?;
        Some((summary, details))
    }

    /// The overlay takes keys while shown, then the filter input, then the list
    pub fn focus(&self) -> Focus {
        if self.visible_details().is_some() {
            Focus::Detail
        } else if self.search.active {
            Focus::Search
        } else {
            Focus::List
        }
    }

    /// Keep the cursor inside the filtered view
    pub fn clamp_cursor(&mut self) {
        let len = self.filtered().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pokemons.is_loading() || self.is_refreshing || self.detail.is_loading()
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("List")
                .entry("total", ron_string(&self.pokemon_list().len()))
                .entry("filtered", ron_string(&self.filtered().len()))
                .entry("cursor", ron_string(&self.cursor))
                .entry("loading", ron_string(&self.pokemons.is_loading()))
                .entry("refreshing", ron_string(&self.is_refreshing)),
            DebugSection::new("Search")
                .entry("active", ron_string(&self.search.active))
                .entry("query", ron_string(&self.search.query)),
            DebugSection::new("Route")
                .entry("path", ron_string(&self.route().to_path()))
                .entry("history", ron_string(&self.history.len()))
                .entry(
                    "summary",
                    ron_string(&self.selected_summary().map(|p| p.name.clone())),
                ),
            DebugSection::new("Detail")
                .entry("request", ron_string(&self.detail.request))
                .entry("loading", ron_string(&self.detail.is_loading()))
                .entry("cached", ron_string(&self.detail.cache.len()))
                .entry(
                    "visible",
                    ron_string(&self.visible_details().map(|(_, d)| d.name.clone())),
                ),
            DebugSection::new("Status").entry("message", ron_string(&self.message)),
        ]
    }
}
