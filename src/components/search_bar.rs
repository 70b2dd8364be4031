use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::{Component, ACCENT_TEAL, BG_PANEL, TEXT_DIM};
use crate::action::Action;

const PLACEHOLDER: &str = "Filter by name...";

pub struct SearchBar {
    input: TextInput,
}

pub struct SearchBarProps<'a> {
    pub query: &'a str,
    pub is_focused: bool,
    pub on_change: fn(String) -> Action,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
        }
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Build the input props inline; the input's props type borrows `query`.
macro_rules! input_props {
    ($props:expr) => {
        TextInputProps {
            value: $props.query,
            placeholder: PLACEHOLDER,
            is_focused: $props.is_focused,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::xy(1, 0),
                    bg: Some(BG_PANEL),
                    fg: None,
                },
                placeholder_style: Some(Style::default().fg(TEXT_DIM)),
                cursor_style: None,
            },
            on_change: $props.on_change,
            on_submit: |_| Action::SearchSubmit,
            on_cursor_move: Some(|_| Action::Render),
        }
    };
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Esc => vec![Action::SearchCancel],
            KeyCode::Enter => vec![Action::SearchSubmit],
            _ => self
                .input
                .handle_event(event, input_props!(props))
                .into_iter()
                .collect(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let border = if props.is_focused { ACCENT_TEAL } else { TEXT_DIM };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Filter ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.input.render(frame, inner, input_props!(props));
    }
}
