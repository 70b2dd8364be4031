//! Routes and navigation history
//!
//! The route is the single source of truth for which Pokemon is selected.
//! Paths follow the browser layout: `/` for the list and
//! `/pokemon/:pokemonId` for a selected entry.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Oldest entries are dropped once the history grows past this.
pub const MAX_HISTORY: usize = 100;

const POKEMON_SEGMENT: &str = "pokemon";

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Route {
    /// List view, nothing selected
    #[default]
    List,
    /// List view with the detail overlay for `id`
    Pokemon { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("unknown route: {0}")]
    Unknown(String),
    #[error("missing pokemon id in route: {0}")]
    MissingId(String),
    #[error("invalid encoding in route: {0}")]
    Encoding(String),
}

impl Route {
    pub fn pokemon(id: impl Into<String>) -> Self {
        Route::Pokemon { id: id.into() }
    }

    /// The `pokemonId` route parameter, if present
    pub fn pokemon_id(&self) -> Option<&str> {
        match self {
            Route::List => None,
            Route::Pokemon { id } => Some(id),
        }
    }

    pub fn is_selected(&self) -> bool {
        self.pokemon_id().is_some()
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Pokemon { id } => {
                format!("/{POKEMON_SEGMENT}/{}", urlencoding::encode(id))
            }
        }
    }

    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let trimmed = path.trim();
        // Query strings and fragments carry nothing we route on.
        let without_suffix = trimmed
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let segments: Vec<&str> = without_suffix
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Ok(Route::List),
            [POKEMON_SEGMENT] => Err(RouteError::MissingId(trimmed.to_string())),
            [POKEMON_SEGMENT, id] => {
                let id = urlencoding::decode(id)
                    .map_err(|_| RouteError::Encoding(trimmed.to_string()))?;
                if id.trim().is_empty() {
                    return Err(RouteError::MissingId(trimmed.to_string()));
                }
                Ok(Route::Pokemon { id: id.into_owned() })
            }
            _ => Err(RouteError::Unknown(trimmed.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s)
    }
}

/// Browser-style history: a list of visited routes and a cursor into it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RouteHistory {
    entries: Vec<Route>,
    index: usize,
}

impl Default for RouteHistory {
    fn default() -> Self {
        Self::new(Route::List)
    }
}

impl RouteHistory {
    pub fn new(initial: Route) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    pub fn current(&self) -> &Route {
        // A hand-edited state file may carry an empty or out-of-range history
        static LIST: Route = Route::List;
        self.entries
            .get(self.index)
            .or(self.entries.last())
            .unwrap_or(&LIST)
    }

    /// Push `route`, dropping any forward entries. Returns false when
    /// `route` is already current.
    pub fn navigate(&mut self, route: Route) -> bool {
        if *self.current() == route {
            return false;
        }
        self.entries.truncate(self.index + 1);
        self.entries.push(route);
        if self.entries.len() > MAX_HISTORY {
            let overflow = self.entries.len() - MAX_HISTORY;
            self.entries.drain(..overflow);
        }
        self.index = self.entries.len() - 1;
        true
    }

    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn forward(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
