use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    highlight_substring, BaseStyle, Padding, SelectList, SelectListBehavior, SelectListProps,
    SelectListStyle, SelectionStyle,
};

use super::{Component, ACCENT_GOLD, BG_HIGHLIGHT, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::state::PokemonSummary;

/// The filtered Pokemon list
pub struct PokemonList {
    list: SelectList,
    /// Row area of the last render, for mouse hit testing
    viewport: Rect,
    /// First visible row; follows the select list's own scrolling
    offset: usize,
}

pub struct PokemonListProps<'a> {
    /// Already filtered, in list order
    pub pokemons: &'a [&'a PokemonSummary],
    pub query: &'a str,
    pub selected: usize,
    pub is_focused: bool,
    pub is_loading: bool,
    /// A Pokemon route is active (Esc closes it)
    pub has_route: bool,
    pub on_select: fn(usize) -> Action,
}

impl Default for PokemonList {
    fn default() -> Self {
        Self {
            list: SelectList::new(),
            viewport: Rect::default(),
            offset: 0,
        }
    }
}

impl PokemonList {
    pub fn new() -> Self {
        Self::default()
    }

    fn rows(pokemons: &[&PokemonSummary], query: &str) -> Vec<Line<'static>> {
        let number = Style::default().fg(TEXT_DIM);
        let name = Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD);
        let highlight = Style::default()
            .fg(ACCENT_GOLD)
            .add_modifier(Modifier::BOLD);
        let types = Style::default().fg(TEXT_DIM);

        pokemons
            .iter()
            .map(|pokemon| {
                let mut spans = vec![Span::styled(format!("#{} ", pokemon.number), number)];
                let highlighted = highlight_substring(&pokemon.name, query.trim(), name, highlight);
                spans.extend(highlighted.spans);
                if !pokemon.types.is_empty() {
                    let joined = format!("  {}", pokemon.types.join(", "));
                    spans.push(Span::styled(joined, types));
                }
                Line::from(spans)
            })
            .collect()
    }

    fn style() -> SelectListStyle {
        SelectListStyle {
            base: BaseStyle {
                border: None,
                padding: Padding::xy(1, 0),
                bg: None,
                fg: Some(TEXT_MAIN),
            },
            selection: SelectionStyle {
                style: Some(
                    Style::default()
                        .bg(BG_HIGHLIGHT)
                        .fg(TEXT_MAIN)
                        .add_modifier(Modifier::BOLD),
                ),
                marker: None,
                disabled: false,
            },
            ..SelectListStyle::default()
        }
    }

    /// Keep the highlighted row in view the same way the select list does.
    fn follow(&mut self, selected: usize, count: usize) {
        let height = usize::from(self.viewport.height);
        if height == 0 {
            return;
        }
        if selected < self.offset {
            self.offset = selected;
        } else if selected >= self.offset + height {
            self.offset = selected + 1 - height;
        }
        self.offset = self.offset.min(count.saturating_sub(height));
    }

    /// A left click on a row highlights and opens it.
    fn click(&self, props: &PokemonListProps<'_>, mouse: &MouseEvent) -> Vec<Action> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left)
            || !self
                .viewport
                .contains(Position::new(mouse.column, mouse.row))
        {
            return Vec::new();
        }
        let index = self.offset + usize::from(mouse.row - self.viewport.y);
        let Some(pokemon) = props.pokemons.get(index) else {
            return Vec::new();
        };

        let mut actions = Vec::with_capacity(2);
        if index != props.selected {
            actions.push((props.on_select)(index));
        }
        actions.push(Action::RouteOpen(pokemon.id.clone()));
        actions
    }

    fn step(props: &PokemonListProps<'_>, delta: isize) -> Vec<Action> {
        if props.pokemons.is_empty() {
            return Vec::new();
        }
        let max = props.pokemons.len() - 1;
        let next = props.selected.saturating_add_signed(delta).min(max);
        if next == props.selected {
            Vec::new()
        } else {
            vec![(props.on_select)(next)]
        }
    }
}

impl Component<Action> for PokemonList {
    type Props<'a> = PokemonListProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        if let EventKind::Mouse(mouse) = event {
            return self.click(&props, mouse);
        }

        if let EventKind::Key(key) = event {
            match key.code {
                KeyCode::Enter => {
                    return props
                        .pokemons
                        .get(props.selected)
                        .map(|pokemon| Action::RouteOpen(pokemon.id.clone()))
                        .into_iter()
                        .collect();
                }
                KeyCode::Esc => {
                    if props.has_route {
                        return vec![Action::RouteClose];
                    }
                    if !props.query.is_empty() {
                        return vec![Action::SearchCancel];
                    }
                    return Vec::new();
                }
                KeyCode::Char('/') => return vec![Action::SearchStart],
                KeyCode::Char('r') | KeyCode::F(5) => return vec![Action::ListFetch],
                KeyCode::Char('[') => return vec![Action::RouteBack],
                KeyCode::Char(']') => return vec![Action::RouteForward],
                KeyCode::Char('q') => return vec![Action::Quit],
                KeyCode::Char('j') => return Self::step(&props, 1),
                KeyCode::Char('k') => return Self::step(&props, -1),
                _ => {}
            }
        }

        // Arrows and Home/End go to the select list, which only needs the count
        let count = props.pokemons.len();
        if count == 0 {
            return Vec::new();
        }
        let list_props = SelectListProps {
            items: &[],
            count,
            selected: props.selected.min(count - 1),
            is_focused: true,
            style: Self::style(),
            behavior: SelectListBehavior {
                show_scrollbar: true,
                wrap_navigation: false,
            },
            on_select: props.on_select,
            render_item: &|item: &Line<'static>| item.clone(),
        };
        self.list
            .handle_event(event, list_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if props.pokemons.is_empty() {
            self.viewport = Rect::default();
            // An empty filter result renders nothing
            if props.is_loading {
                let loading = Paragraph::new(Line::from("Loading...").centered())
                    .style(Style::default().fg(TEXT_DIM));
                frame.render_widget(loading, area);
            }
            return;
        }

        let items = Self::rows(props.pokemons, props.query);
        let style = Self::style();
        let padding = style.base.padding;
        self.viewport = Rect {
            x: area.x + padding.left,
            y: area.y + padding.top,
            width: area.width.saturating_sub(padding.horizontal()),
            height: area.height.saturating_sub(padding.vertical()),
        };
        let selected = props.selected.min(items.len() - 1);
        self.follow(selected, items.len());

        let list_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected,
            is_focused: props.is_focused,
            style,
            behavior: SelectListBehavior {
                show_scrollbar: true,
                wrap_navigation: false,
            },
            on_select: props.on_select,
            render_item: &|item| item.clone(),
        };
        self.list.render(frame, area, list_props);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use tui_dispatch::testing::*;

    fn pokemon(id: &str, number: &str, name: &str) -> PokemonSummary {
        PokemonSummary {
            id: id.into(),
            number: number.into(),
            name: name.into(),
            image: String::new(),
            types: vec!["Grass".into(), "Poison".into()],
        }
    }

    fn props<'a>(pokemons: &'a [&'a PokemonSummary], selected: usize) -> PokemonListProps<'a> {
        PokemonListProps {
            pokemons,
            query: "",
            selected,
            is_focused: true,
            is_loading: false,
            has_route: false,
            on_select: Action::ListSelect,
        }
    }

    #[test]
    fn test_enter_opens_highlighted_pokemon() {
        let bulbasaur = pokemon("1", "001", "Bulbasaur");
        let ivysaur = pokemon("2", "002", "Ivysaur");
        let rows = [&bulbasaur, &ivysaur];
        let mut component = PokemonList::new();

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("enter")), props(&rows, 1))
            .into_iter()
            .collect();
        actions.assert_count(1);
        actions.assert_first(Action::RouteOpen("2".into()));
    }

    #[test]
    fn test_enter_on_empty_list_does_nothing() {
        let mut component = PokemonList::new();
        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("enter")), props(&[], 0))
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_esc_closes_route_first() {
        let bulbasaur = pokemon("1", "001", "Bulbasaur");
        let rows = [&bulbasaur];
        let mut component = PokemonList::new();

        let mut with_route = props(&rows, 0);
        with_route.has_route = true;
        with_route.query = "bulb";
        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("esc")), with_route)
            .into_iter()
            .collect();
        actions.assert_first(Action::RouteClose);

        let mut with_query = props(&rows, 0);
        with_query.query = "bulb";
        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("esc")), with_query)
            .into_iter()
            .collect();
        actions.assert_first(Action::SearchCancel);
    }

    #[test]
    fn test_vim_keys_move_within_bounds() {
        let bulbasaur = pokemon("1", "001", "Bulbasaur");
        let ivysaur = pokemon("2", "002", "Ivysaur");
        let rows = [&bulbasaur, &ivysaur];
        let mut component = PokemonList::new();

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("j")), props(&rows, 0))
            .into_iter()
            .collect();
        actions.assert_first(Action::ListSelect(1));

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("j")), props(&rows, 1))
            .into_iter()
            .collect();
        actions.assert_empty();

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("k")), props(&rows, 1))
            .into_iter()
            .collect();
        actions.assert_first(Action::ListSelect(0));
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let bulbasaur = pokemon("1", "001", "Bulbasaur");
        let rows = [&bulbasaur];
        let mut component = PokemonList::new();
        let mut unfocused = props(&rows, 0);
        unfocused.is_focused = false;

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("q")), unfocused)
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    fn left_click(column: u16, row: u16) -> EventKind {
        EventKind::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_click_highlights_and_opens_row() {
        let bulbasaur = pokemon("1", "001", "Bulbasaur");
        let ivysaur = pokemon("2", "002", "Ivysaur");
        let venusaur = pokemon("3", "003", "Venusaur");
        let rows = [&bulbasaur, &ivysaur, &venusaur];
        let mut render = RenderHarness::new(40, 6);
        let mut component = PokemonList::new();
        render.render_to_string_plain(|frame| {
            component.render(frame, frame.area(), props(&rows, 0));
        });

        let actions: Vec<_> = component
            .handle_event(&left_click(5, 1), props(&rows, 0))
            .into_iter()
            .collect();
        assert_eq!(
            actions,
            vec![Action::ListSelect(1), Action::RouteOpen("2".into())]
        );

        // Already highlighted: just open
        let actions: Vec<_> = component
            .handle_event(&left_click(5, 0), props(&rows, 0))
            .into_iter()
            .collect();
        assert_eq!(actions, vec![Action::RouteOpen("1".into())]);
    }

    #[test]
    fn test_click_outside_rows_does_nothing() {
        let bulbasaur = pokemon("1", "001", "Bulbasaur");
        let rows = [&bulbasaur];
        let mut render = RenderHarness::new(40, 6);
        let mut component = PokemonList::new();
        render.render_to_string_plain(|frame| {
            component.render(frame, frame.area(), props(&rows, 0));
        });

        // Below the last row
        let actions: Vec<_> = component
            .handle_event(&left_click(5, 3), props(&rows, 0))
            .into_iter()
            .collect();
        actions.assert_empty();

        // Right button
        let right = EventKind::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            column: 5,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        let actions: Vec<_> = component
            .handle_event(&right, props(&rows, 0))
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_click_accounts_for_scrolling() {
        let pokemons: Vec<_> = (1..=5)
            .map(|n| pokemon(&n.to_string(), &format!("00{n}"), "Pidgey"))
            .collect();
        let rows: Vec<&PokemonSummary> = pokemons.iter().collect();
        let mut render = RenderHarness::new(40, 3);
        let mut component = PokemonList::new();
        render.render_to_string_plain(|frame| {
            component.render(frame, frame.area(), props(&rows, 4));
        });

        // Rows 3..=5 are visible; the top line is the third Pokemon
        let actions: Vec<_> = component
            .handle_event(&left_click(5, 0), props(&rows, 4))
            .into_iter()
            .collect();
        assert_eq!(
            actions,
            vec![Action::ListSelect(2), Action::RouteOpen("3".into())]
        );
    }

    #[test]
    fn test_arrow_keys_reach_select_list() {
        let bulbasaur = pokemon("1", "001", "Bulbasaur");
        let ivysaur = pokemon("2", "002", "Ivysaur");
        let rows = [&bulbasaur, &ivysaur];
        let mut component = PokemonList::new();

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("down")), props(&rows, 0))
            .into_iter()
            .collect();
        actions.assert_first(Action::ListSelect(1));

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("end")), props(&rows, 0))
            .into_iter()
            .collect();
        actions.assert_first(Action::ListSelect(1));
    }

    #[test]
    fn test_render_rows() {
        let bulbasaur = pokemon("1", "001", "Bulbasaur");
        let rows = [&bulbasaur];
        let mut render = RenderHarness::new(50, 5);
        let mut component = PokemonList::new();

        let output = render.render_to_string_plain(|frame| {
            component.render(frame, frame.area(), props(&rows, 0));
        });

        assert!(output.contains("#001"), "number missing:\n{output}");
        assert!(output.contains("Bulbasaur"), "name missing:\n{output}");
        assert!(output.contains("Grass, Poison"), "types missing:\n{output}");
    }

    #[test]
    fn test_render_loading_placeholder() {
        let mut render = RenderHarness::new(40, 5);
        let mut component = PokemonList::new();
        let mut loading = props(&[], 0);
        loading.is_loading = true;

        let output = render.render_to_string_plain(|frame| {
            component.render(frame, frame.area(), loading);
        });
        assert!(output.contains("Loading..."));
    }
}
