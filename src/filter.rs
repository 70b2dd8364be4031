//! Client-side name filter for the list view

use crate::state::PokemonSummary;

/// Entries whose name contains `query` case-insensitively, in list order.
/// A blank query keeps everything.
pub fn filter_pokemons<'a>(
    pokemons: &'a [PokemonSummary],
    query: &str,
) -> Vec<&'a PokemonSummary> {
    let query = query.trim().to_lowercase();
    pokemons
        .iter()
        .filter(|pokemon| query.is_empty() || pokemon.name.to_lowercase().contains(&query))
        .collect()
}
