//! Effects - side effects declared by the reducer

use crate::detail::DetailRequest;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Run the list query
    FetchPokemons { first: u32 },
    /// Run the detail query; the response is tagged with `request.seq`
    FetchPokemonDetails(DetailRequest),
}
