use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    centered_rect, BaseStyle, BorderStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding,
};

use super::{Component, ACCENT_GOLD, ACCENT_TEAL, BG_MODAL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::state::{PokemonDetails, PokemonSummary};

const MODAL_WIDTH: u16 = 64;
const MODAL_HEIGHT: u16 = 18;

/// Overlay for the Pokemon named by the current route
pub struct DetailModal {
    modal: Modal,
}

pub struct DetailModalProps<'a> {
    pub summary: &'a PokemonSummary,
    pub details: &'a PokemonDetails,
    pub is_focused: bool,
}

impl Default for DetailModal {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
        }
    }
}

impl DetailModal {
    pub fn new() -> Self {
        Self::default()
    }

    fn style() -> ModalStyle {
        ModalStyle {
            dim_factor: 0.6,
            base: BaseStyle {
                border: Some(BorderStyle {
                    borders: Borders::ALL,
                    style: Style::default().fg(TEXT_DIM),
                    focused_style: Some(Style::default().fg(ACCENT_TEAL)),
                }),
                padding: Padding::xy(2, 1),
                bg: Some(BG_MODAL),
                fg: None,
            },
        }
    }
}

fn field(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<16}"), Style::default().fg(TEXT_DIM)),
        Span::styled(value, Style::default().fg(TEXT_MAIN)),
    ])
}

fn list_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}

/// Body lines of the overlay
pub fn detail_lines(details: &PokemonDetails) -> Vec<Line<'static>> {
    vec![
        field("Classification", details.classification.clone()),
        field("Types", list_or_dash(&details.types)),
        field("Weight", details.weight.range()),
        field("Height", details.height.range()),
        field("Max CP", details.max_cp.to_string()),
        field("Max HP", details.max_hp.to_string()),
        field("Flee rate", format!("{:.0}%", details.flee_rate * 100.0)),
        field("Resistant", list_or_dash(&details.resistant)),
        field("Weaknesses", list_or_dash(&details.weaknesses)),
        field("Image", details.image.clone()),
    ]
}

impl Component<Action> for DetailModal {
    type Props<'a> = DetailModalProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        let EventKind::Key(key) = event else {
            return None;
        };

        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(Action::RouteClose),
            KeyCode::Char('[') => Some(Action::RouteBack),
            KeyCode::Char(']') => Some(Action::RouteForward),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let modal_area = centered_rect(MODAL_WIDTH, MODAL_HEIGHT, area);
        let DetailModalProps {
            summary, details, ..
        } = props;

        let mut render_content = |frame: &mut Frame, inner: Rect| {
            let [title_area, body_area, footer_area] = Layout::vertical([
                Constraint::Length(2),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .areas(inner);

            // The list supplies the heading so it matches the row that was opened
            let title = Line::from(vec![
                Span::styled(
                    format!("#{} ", summary.number),
                    Style::default().fg(TEXT_DIM),
                ),
                Span::styled(
                    summary.name.clone(),
                    Style::default()
                        .fg(ACCENT_GOLD)
                        .add_modifier(Modifier::BOLD),
                ),
            ]);
            frame.render_widget(Paragraph::new(title), title_area);

            let body = Paragraph::new(detail_lines(details)).wrap(Wrap { trim: true });
            frame.render_widget(body, body_area);

            let footer = Paragraph::new(Line::from(Span::styled(
                "Esc: Close  |  [ ]: History",
                Style::default().fg(TEXT_DIM),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(footer, footer_area);
        };

        self.modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: Self::style(),
                behavior: ModalBehavior {
                    close_on_esc: false,
                    close_on_backdrop: false,
                },
                on_close: || Action::RouteClose,
                render_content: &mut render_content,
            },
        );
    }
}
