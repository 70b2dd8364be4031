//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::route::Route;
use crate::state::AppState;

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.pokemons = DataResource::Loading;
            state.is_refreshing = false;
            state.message = None;
            state.tick_count = 0;
            let mut effects = vec![Effect::FetchPokemons {
                first: state.list_size,
            }];
            effects.extend(sync_detail(state));
            DispatchResult::changed_with_many(effects)
        }

        // ===== List actions =====
        Action::ListFetch => {
            if state.pokemons.is_loaded() {
                state.is_refreshing = true;
            } else {
                state.pokemons = DataResource::Loading;
            }
            state.message = None;
            DispatchResult::changed_with(Effect::FetchPokemons {
                first: state.list_size,
            })
        }

        Action::ListDidLoad(pokemons) => {
            state.pokemons = DataResource::Loaded(pokemons);
            state.is_refreshing = false;
            state.clamp_cursor();
            DispatchResult::changed()
        }

        Action::ListDidError(error) => {
            if !state.is_refreshing {
                state.pokemons = DataResource::Failed(error.clone());
            }
            state.is_refreshing = false;
            state.message = Some(format!("Pokemon list error: {error}"));
            DispatchResult::changed()
        }

        Action::ListSelect(index) => {
            if index < state.filtered().len() && index != state.cursor {
                state.cursor = index;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Search actions =====
        Action::SearchStart => {
            if state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = true;
            DispatchResult::changed()
        }

        Action::SearchQueryChange(query) => {
            state.search.query = query;
            state.cursor = 0;
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            state.search.active = false;
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            if !state.search.active && state.search.query.is_empty() {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            state.search.query.clear();
            state.cursor = 0;
            DispatchResult::changed()
        }

        // ===== Route actions =====
        Action::RouteOpen(id) => {
            let route = Route::pokemon(id);
            // Opening the current route again after a failure asks again
            if state.route() == &route && state.detail.status.is_failed() {
                return route_changed(state);
            }
            navigate(state, route)
        }

        Action::RouteClose => navigate(state, Route::List),

        Action::RouteBack => {
            if !state.history.back() {
                return DispatchResult::unchanged();
            }
            route_changed(state)
        }

        Action::RouteForward => {
            if !state.history.forward() {
                return DispatchResult::unchanged();
            }
            route_changed(state)
        }

        // ===== Detail actions =====
        Action::DetailDidLoad { seq, details } => {
            let found = details.is_some();
            if !state.detail.resolve(seq, details) {
                tracing::debug!(seq, "discarding superseded detail response");
                return DispatchResult::unchanged();
            }
            state.message = if found {
                None
            } else {
                Some(format!("No Pokemon found at {}", state.route()))
            };
            DispatchResult::changed()
        }

        Action::DetailDidError { seq, error } => {
            if !state.detail.fail(seq, error.clone()) {
                tracing::debug!(seq, "discarding superseded detail error");
                return DispatchResult::unchanged();
            }
            state.message = Some(format!("Pokemon detail error: {error}"));
            DispatchResult::changed()
        }

        // ===== UI actions =====
        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            if state.is_loading() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn navigate(state: &mut AppState, route: Route) -> DispatchResult<Effect> {
    if !state.history.navigate(route) {
        return DispatchResult::unchanged();
    }
    route_changed(state)
}

fn route_changed(state: &mut AppState) -> DispatchResult<Effect> {
    state.message = None;
    let effects = sync_detail(state);
    if effects.is_empty() {
        DispatchResult::changed()
    } else {
        DispatchResult::changed_with_many(effects)
    }
}

/// Point the detail query at the current route parameter.
fn sync_detail(state: &mut AppState) -> Vec<Effect> {
    let Some(id) = state.route().pokemon_id().map(str::to_string) else {
        state.detail.clear();
        return Vec::new();
    };
    let name = state.summary(&id).map(|pokemon| pokemon.name.clone());
    state
        .detail
        .select(&id, name.as_deref())
        .map(Effect::FetchPokemonDetails)
        .into_iter()
        .collect()
}
