//! Render tests using RenderHarness

use pokegraph::{
    components::{Component, PokedexView, PokedexViewProps},
    route::Route,
    state::{AppState, PokemonDetails, PokemonSummary},
};
use tui_dispatch::{testing::*, DataResource};

fn render_view(state: &AppState, width: u16, height: u16) -> String {
    let mut render = RenderHarness::new(width, height);
    let mut view = PokedexView::new();
    render.render_to_string_plain(|frame| {
        let props = PokedexViewProps {
            state,
            is_focused: true,
        };
        view.render(frame, frame.area(), props);
    })
}

fn pokemon(id: &str, number: &str, name: &str, types: &[&str]) -> PokemonSummary {
    PokemonSummary {
        id: id.into(),
        number: number.into(),
        name: name.into(),
        image: String::new(),
        types: types.iter().map(|t| t.to_string()).collect(),
    }
}

fn kanto() -> Vec<PokemonSummary> {
    vec![
        pokemon("UG9rZW1vbjowMDE=", "001", "Bulbasaur", &["Grass", "Poison"]),
        pokemon("UG9rZW1vbjowMDQ=", "004", "Charmander", &["Fire"]),
        pokemon("UG9rZW1vbjowMDc=", "007", "Squirtle", &["Water"]),
    ]
}

#[test]
fn test_render_loading_state() {
    let state = AppState {
        pokemons: DataResource::Loading,
        ..Default::default()
    };

    let output = render_view(&state, 100, 12);
    assert!(
        output.contains("Loading..."),
        "Loading placeholder missing:\n{output}"
    );
    assert!(output.contains("loading"), "Spinner missing:\n{output}");
}

#[test]
fn test_render_full_list() {
    let state = AppState {
        pokemons: DataResource::Loaded(kanto()),
        ..Default::default()
    };

    let output = render_view(&state, 60, 12);
    for name in ["Bulbasaur", "Charmander", "Squirtle"] {
        assert!(output.contains(name), "{name} missing:\n{output}");
    }
    assert!(output.contains("3/3"));
    assert!(output.contains("#004"));
}

#[test]
fn test_render_filtered_list() {
    let mut state = AppState {
        pokemons: DataResource::Loaded(kanto()),
        ..Default::default()
    };
    state.search.query = "squ".into();

    let output = render_view(&state, 60, 12);
    assert!(output.contains("Squirtle"));
    assert!(!output.contains("Bulbasaur"));
    assert!(output.contains("1/3"));
}

#[test]
fn test_render_empty_filter_result() {
    let mut state = AppState {
        pokemons: DataResource::Loaded(kanto()),
        ..Default::default()
    };
    state.search.query = "mew".into();

    let output = render_view(&state, 60, 12);
    assert!(output.contains("0/3"));
    assert!(!output.contains("Loading..."));
    assert!(!output.contains("#00"));
}

#[test]
fn test_render_route_without_details_has_no_overlay() {
    let mut state = AppState::new(Route::pokemon("UG9rZW1vbjowMDQ="), 151);
    state.pokemons = DataResource::Loaded(kanto());

    let output = render_view(&state, 80, 24);
    assert!(output.contains("/pokemon/UG9rZW1vbjowMDQ%3D"));
    assert!(!output.contains("Classification"));
}

#[test]
fn test_render_overlay_for_route() {
    let mut state = AppState::new(Route::pokemon("UG9rZW1vbjowMDQ="), 151);
    state.pokemons = DataResource::Loaded(kanto());
    let request = state
        .detail
        .select("UG9rZW1vbjowMDQ=", Some("Charmander"))
        .unwrap();
    state.detail.resolve(
        request.seq,
        Some(PokemonDetails {
            id: "UG9rZW1vbjowMDQ=".into(),
            number: "004".into(),
            name: "Charmander".into(),
            classification: "Lizard Pokemon".into(),
            types: vec!["Fire".into()],
            weaknesses: vec!["Water".into(), "Ground".into(), "Rock".into()],
            max_cp: 841,
            max_hp: 955,
            ..Default::default()
        }),
    );

    let output = render_view(&state, 80, 24);
    assert!(output.contains("#004 Charmander"), "title missing:\n{output}");
    assert!(output.contains("Lizard Pokemon"));
    assert!(output.contains("Water, Ground, Rock"));
    assert!(output.contains("841"));
}

#[test]
fn test_render_status_message() {
    let state = AppState {
        pokemons: DataResource::Loaded(kanto()),
        message: Some("No Pokemon found at /pokemon/x".into()),
        ..Default::default()
    };

    let output = render_view(&state, 120, 12);
    assert!(output.contains("No Pokemon found"));
}
