//! Loading, error and empty panels shown in place of screen content.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::app::Loadable;
use crate::error::ApiError;
use crate::ui::helpers::{centered_rect, spinner};
use crate::ui::theme::{key_style, COLOR_ACCENT, COLOR_DIM, COLOR_ERROR};

pub fn render_loading(frame: &mut Frame, area: Rect, tick: u64, what: &str) {
    let line = Line::from(vec![
        Span::styled(spinner(tick), Style::default().fg(COLOR_ACCENT)),
        Span::raw(format!(" Loading {}...", what)),
    ]);
    let area = centered_rect(area, area.width, 1);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

/// Error message with a retry hint.
pub fn render_error(frame: &mut Frame, area: Rect, error: &ApiError) {
    let lines = vec![
        Line::from(Span::styled(
            "Something went wrong",
            Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(error.user_message()),
        Line::default(),
        Line::from(vec![
            Span::styled("[r]", key_style()),
            Span::styled(" Retry", Style::default().fg(COLOR_DIM)),
        ]),
    ];
    let area = centered_rect(area, area.width, lines.len() as u16);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

pub fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    let area = centered_rect(area, area.width, 1);
    frame.render_widget(
        Paragraph::new(Span::styled(message.to_string(), Style::default().fg(COLOR_DIM)))
            .alignment(Alignment::Center),
        area,
    );
}

/// Draw the spinner or error for an unsettled fetch. Returns the data once
/// loaded, leaving the success rendering to the caller.
pub fn render_loadable<'a, T>(
    frame: &mut Frame,
    area: Rect,
    tick: u64,
    what: &str,
    state: &'a Loadable<T>,
) -> Option<&'a T> {
    match state {
        Loadable::Loaded(data) => Some(data),
        Loadable::Failed(e) => {
            render_error(frame, area, e);
            None
        }
        Loadable::Idle | Loadable::Loading => {
            render_loading(frame, area, tick, what);
            None
        }
    }
}
