//! Runtime settings shared by the binary and tests

use crate::api::{GraphqlClient, DEFAULT_ENDPOINT};
use crate::route::Route;
use crate::state::{AppState, DEFAULT_LIST_SIZE};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// GraphQL endpoint URL
    pub endpoint: String,
    /// `first` argument of the list query
    pub list_size: u32,
    /// Route to open at startup
    pub initial_route: Route,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            list_size: DEFAULT_LIST_SIZE,
            initial_route: Route::List,
        }
    }
}

impl Config {
    pub fn initial_state(&self) -> AppState {
        AppState::new(self.initial_route.clone(), self.list_size)
    }

    pub fn client(&self) -> GraphqlClient {
        GraphqlClient::new(self.endpoint.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_uses_route_and_size() {
        let config = Config {
            list_size: 20,
            initial_route: Route::pokemon("UG9rZW1vbjowMjU="),
            ..Default::default()
        };
        let state = config.initial_state();

        assert_eq!(state.list_size, 20);
        assert_eq!(state.route(), &Route::pokemon("UG9rZW1vbjowMjU="));
        assert!(!state.history.can_go_back());
        assert_eq!(config.client().endpoint(), DEFAULT_ENDPOINT);
    }
}
