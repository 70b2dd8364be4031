pub mod detail_modal;
pub mod pokedex_view;
pub mod pokemon_list;
pub mod search_bar;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use detail_modal::{DetailModal, DetailModalProps};
pub use pokedex_view::{PokedexView, PokedexViewProps, ViewAreas};
pub use pokemon_list::{PokemonList, PokemonListProps};
pub use search_bar::{SearchBar, SearchBarProps};

use ratatui::style::Color;

const BG_PANEL: Color = Color::Rgb(20, 32, 46);
const BG_MODAL: Color = Color::Rgb(35, 35, 45);
const BG_HIGHLIGHT: Color = Color::Rgb(28, 92, 110);
const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
