//! GraphQL Pokemon API client

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::state::{PokemonDetails, PokemonSummary};

pub const DEFAULT_ENDPOINT: &str = "https://graphql-pokemon2.vercel.app/";

// ============================================================================
// Queries
// ============================================================================

pub const GET_POKEMONS: &str = r#"
query pokemons($first: Int!) {
  pokemons(first: $first) {
    id
    number
    name
    image
    types
  }
}
"#;

pub const GET_POKEMON_DETAILS: &str = r#"
query pokemon($id: String, $name: String) {
  pokemon(id: $id, name: $name) {
    id
    number
    name
    weight {
      minimum
      maximum
    }
    height {
      minimum
      maximum
    }
    classification
    types
    resistant
    weaknesses
    fleeRate
    maxCP
    maxHP
    image
  }
}
"#;

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct GraphqlRequest<'a, V> {
    query: &'a str,
    variables: V,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<GraphqlErrorMessage>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorMessage {
    message: String,
}

#[derive(Debug, Serialize)]
struct PokemonsVariables {
    first: u32,
}

#[derive(Debug, Serialize)]
struct PokemonVariables<'a> {
    id: Option<&'a str>,
    name: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct PokemonsData {
    pokemons: Option<Vec<PokemonSummary>>,
}

#[derive(Debug, Deserialize)]
struct PokemonData {
    pokemon: Option<PokemonDetails>,
}

// ============================================================================
// Client
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server returned {0}")]
    Status(reqwest::StatusCode),
    #[error("response parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("graphql error: {0}")]
    Graphql(String),
    #[error("response has no data")]
    MissingData,
}

/// Decode a GraphQL response envelope. Any reported error fails the query.
pub fn decode_response<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    let envelope: GraphqlResponse<T> = serde_json::from_slice(body)?;
    if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
        let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
        return Err(ApiError::Graphql(messages.join("; ")));
    }
    envelope.data.ok_or(ApiError::MissingData)
}

#[derive(Clone, Debug)]
pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: String,
}

impl Default for GraphqlClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl GraphqlClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST `{query, variables}` and decode the `data` member
    pub async fn query<V, T>(&self, query: &str, variables: V) -> Result<T, ApiError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&GraphqlRequest { query, variables })
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            // query errors may arrive with a 4xx status and an error body
            return match decode_response::<serde_json::Value>(&body) {
                Err(error @ ApiError::Graphql(_)) => Err(error),
                _ => Err(ApiError::Status(status)),
            };
        }
        decode_response(&body)
    }

    /// The list query, in API order
    pub async fn fetch_pokemons(&self, first: u32) -> Result<Vec<PokemonSummary>, ApiError> {
        tracing::debug!(endpoint = %self.endpoint, first, "fetching pokemon list");
        let data: PokemonsData = self.query(GET_POKEMONS, PokemonsVariables { first }).await?;
        Ok(data.pokemons.unwrap_or_default())
    }

    /// The detail query; `Ok(None)` when the API has no matching record
    pub async fn fetch_pokemon_details(
        &self,
        id: Option<&str>,
        name: Option<&str>,
    ) -> Result<Option<PokemonDetails>, ApiError> {
        tracing::debug!(endpoint = %self.endpoint, ?id, ?name, "fetching pokemon details");
        let data: PokemonData = self
            .query(GET_POKEMON_DETAILS, PokemonVariables { id, name })
            .await?;
        Ok(data.pokemon)
    }
}
