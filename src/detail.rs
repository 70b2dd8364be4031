//! Detail query bookkeeping
//!
//! Every network request gets a fresh sequence number. A response is only
//! applied when its sequence number matches the request currently in force,
//! so results for a superseded selection are dropped no matter when they
//! arrive. Loaded records are cached by id for the rest of the session.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::state::PokemonDetails;

/// Parameters of one detail query
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DetailRequest {
    pub seq: u64,
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DetailQuery {
    next_seq: u64,
    /// The request whose response may still be applied
    pub request: Option<DetailRequest>,
    /// Loading, loaded with a record, loaded with null, or failed
    pub status: DataResource<Option<PokemonDetails>>,
    pub cache: HashMap<String, PokemonDetails>,
}

impl Default for DetailQuery {
    fn default() -> Self {
        Self {
            next_seq: 1,
            request: None,
            status: DataResource::Empty,
            cache: HashMap::new(),
        }
    }
}

impl DetailQuery {
    /// Point the query at `id`.
    ///
    /// Returns the request to send when the record has to come from the
    /// network; `None` when it is already loading, loaded or cached.
    pub fn select(&mut self, id: &str, name: Option<&str>) -> Option<DetailRequest> {
        let in_force = self.status.is_loading() || self.status.is_loaded();
        if in_force && self.requested_id() == Some(id) {
            return None;
        }

        let request = DetailRequest {
            seq: self.bump_seq(),
            id: Some(id.to_string()),
            name: name.map(str::to_string),
        };
        self.request = Some(request.clone());

        if let Some(cached) = self.cache.get(id) {
            self.status = DataResource::Loaded(Some(cached.clone()));
            return None;
        }

        self.status = DataResource::Loading;
        Some(request)
    }

    /// Forget the current request. Late responses for it are discarded.
    pub fn clear(&mut self) {
        self.request = None;
        self.status = DataResource::Empty;
    }

    pub fn is_current(&self, seq: u64) -> bool {
        self.request.as_ref().is_some_and(|request| request.seq == seq)
    }

    /// Apply a response. Returns false if it belongs to a superseded request.
    pub fn resolve(&mut self, seq: u64, details: Option<PokemonDetails>) -> bool {
        if !self.is_current(seq) {
            return false;
        }
        if let Some(details) = &details {
            let key = self
                .requested_id()
                .map(str::to_string)
                .unwrap_or_else(|| details.id.clone());
            self.cache.insert(key, details.clone());
        }
        self.status = DataResource::Loaded(details);
        true
    }

    /// Record a failure. Returns false if it belongs to a superseded request.
    pub fn fail(&mut self, seq: u64, error: String) -> bool {
        if !self.is_current(seq) {
            return false;
        }
        self.status = DataResource::Failed(error);
        true
    }

    pub fn requested_id(&self) -> Option<&str> {
        self.request.as_ref().and_then(|request| request.id.as_deref())
    }

    /// The loaded record, provided it was requested for `id`
    pub fn details_for(&self, id: &str) -> Option<&PokemonDetails> {
        if self.requested_id() != Some(id) {
            return None;
        }
        self.status.data()?.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    /// Loaded, but the API had no record for the request
    pub fn is_not_found(&self) -> bool {
        matches!(self.status.data(), Some(None))
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        seq
    }
}
