use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{
    Component, DetailModal, DetailModalProps, PokemonList, PokemonListProps, SearchBar,
    SearchBarProps, ACCENT_GOLD, ACCENT_TEAL, TEXT_DIM, TEXT_MAIN,
};
use crate::action::Action;
use crate::state::{AppState, Focus};

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

pub struct PokedexViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Screen regions; the bus routes mouse events by these areas
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewAreas {
    pub header: Rect,
    pub search: Rect,
    pub list: Rect,
    pub status: Rect,
}

impl ViewAreas {
    pub fn new(area: Rect) -> Self {
        let [header, search, list, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);
        Self {
            header,
            search,
            list,
            status,
        }
    }
}

/// List screen with filter input, detail overlay and status bar
pub struct PokedexView {
    search: SearchBar,
    list: PokemonList,
    detail: DetailModal,
}

impl Default for PokedexView {
    fn default() -> Self {
        Self {
            search: SearchBar::new(),
            list: PokemonList::new(),
            detail: DetailModal::new(),
        }
    }
}

impl PokedexView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_list_event(&mut self, event: &EventKind, state: &AppState) -> Vec<Action> {
        let pokemons = state.filtered();
        let props = PokemonListProps {
            pokemons: &pokemons,
            query: &state.search.query,
            selected: state.cursor,
            is_focused: true,
            is_loading: state.pokemons.is_loading(),
            has_route: state.route().is_selected(),
            on_select: Action::ListSelect,
        };
        self.list.handle_event(event, props).into_iter().collect()
    }

    pub fn handle_search_event(&mut self, event: &EventKind, state: &AppState) -> Vec<Action> {
        let props = SearchBarProps {
            query: &state.search.query,
            is_focused: true,
            on_change: Action::SearchQueryChange,
        };
        self.search.handle_event(event, props).into_iter().collect()
    }

    pub fn handle_detail_event(&mut self, event: &EventKind, state: &AppState) -> Vec<Action> {
        let Some((summary, details)) = state.visible_details() else {
            return Vec::new();
        };
        let props = DetailModalProps {
            summary,
            details,
            is_focused: true,
        };
        self.detail.handle_event(event, props).into_iter().collect()
    }

    fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
        let mut spans = vec![
            Span::styled(
                " Pokedex ",
                Style::default()
                    .fg(ACCENT_GOLD)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    " {}/{} ",
                    state.filtered().len(),
                    state.pokemon_list().len()
                ),
                Style::default().fg(TEXT_DIM),
            ),
            Span::styled(
                format!(" {} ", state.route().to_path()),
                Style::default().fg(ACCENT_TEAL),
            ),
        ];
        if state.history.can_go_back() {
            spans.push(Span::styled(" [ back", Style::default().fg(TEXT_DIM)));
        }
        if state.history.can_go_forward() {
            spans.push(Span::styled(" ] forward", Style::default().fg(TEXT_DIM)));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_list(&mut self, frame: &mut Frame, area: Rect, state: &AppState, is_focused: bool) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if is_focused { ACCENT_TEAL } else { TEXT_DIM }));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if let Some(error) = state.pokemons.error() {
            let line = Line::from(Span::styled(
                format!("Failed to load: {error}"),
                Style::default().fg(TEXT_MAIN),
            ));
            frame.render_widget(Paragraph::new(line).centered(), inner);
            return;
        }

        let pokemons = state.filtered();
        let props = PokemonListProps {
            pokemons: &pokemons,
            query: &state.search.query,
            selected: state.cursor,
            is_focused,
            is_loading: state.pokemons.is_loading(),
            has_route: state.route().is_selected(),
            on_select: Action::ListSelect,
        };
        self.list.render(frame, inner, props);
    }

    fn render_status(frame: &mut Frame, area: Rect, state: &AppState) {
        let hints: Vec<StatusBarHint> = match state.focus() {
            Focus::Detail => vec![
                StatusBarHint::new("esc", "close"),
                StatusBarHint::new("[ ]", "history"),
            ],
            Focus::Search => vec![
                StatusBarHint::new("enter", "keep"),
                StatusBarHint::new("esc", "clear"),
            ],
            Focus::List => vec![
                StatusBarHint::new("enter", "open"),
                StatusBarHint::new("/", "filter"),
                StatusBarHint::new("r", "reload"),
                StatusBarHint::new("q", "quit"),
            ],
        };

        let mut left = Vec::new();
        if state.is_loading() {
            let frame_char = SPINNER[state.tick_count as usize % SPINNER.len()];
            left.push(StatusBarItem::span(Span::styled(
                format!("{frame_char} loading"),
                Style::default().fg(ACCENT_TEAL),
            )));
        }
        if let Some(message) = &state.message {
            left.push(StatusBarItem::span(Span::styled(
                message.clone(),
                Style::default().fg(ACCENT_GOLD),
            )));
        }

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            area,
            StatusBarProps {
                left: StatusBarSection::items(&left).with_separator("  "),
                center: StatusBarSection::empty(),
                right: StatusBarSection::hints(&hints),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

impl Component<Action> for PokedexView {
    type Props<'a> = PokedexViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        match props.state.focus() {
            Focus::Detail => self.handle_detail_event(event, props.state),
            Focus::Search => self.handle_search_event(event, props.state),
            Focus::List => self.handle_list_event(event, props.state),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let focus = state.focus();
        let areas = ViewAreas::new(area);

        Self::render_header(frame, areas.header, state);

        self.search.render(
            frame,
            areas.search,
            SearchBarProps {
                query: &state.search.query,
                is_focused: props.is_focused && focus == Focus::Search,
                on_change: Action::SearchQueryChange,
            },
        );

        self.render_list(
            frame,
            areas.list,
            state,
            props.is_focused && focus == Focus::List,
        );

        Self::render_status(frame, areas.status, state);

        // Only a loaded record for the current route opens the overlay
        if let Some((summary, details)) = state.visible_details() {
            self.detail.render(
                frame,
                area,
                DetailModalProps {
                    summary,
                    details,
                    is_focused: props.is_focused,
                },
            );
        }
    }
}
