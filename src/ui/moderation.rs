//! Staff queue of proposed questions.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::components::{render_empty, render_loadable};
use super::helpers::{format_datetime, label_value, spinner};
use super::theme::{
    difficulty_color, COLOR_BORDER, COLOR_DIM, COLOR_SELECTED_BG, COLOR_SUCCESS, COLOR_WARNING,
};
use crate::app::App;
use crate::markdown::render_markdown;

pub fn render_moderation(frame: &mut Frame, area: Rect, app: &App) {
    let view = &app.moderation;
    let title = if view.busy {
        format!(" Pending questions: {} {} ", view.filter.label(), spinner(app.tick_count))
    } else {
        format!(" Pending questions: {} ", view.filter.label())
    };
    let Some(questions) = render_loadable(
        frame,
        area,
        app.tick_count,
        "pending questions",
        &view.questions,
    ) else {
        return;
    };
    if questions.is_empty() {
        render_empty(frame, area, "Nothing waiting for review");
        return;
    }

    let cols = Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).split(area);
    let items: Vec<ListItem> = questions
        .iter()
        .map(|q| {
            let (state, color) = if q.is_approved {
                ("approved", COLOR_SUCCESS)
            } else {
                ("pending", COLOR_WARNING)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<9}", state), Style::default().fg(color)),
                Span::raw(q.title.clone()),
            ]))
        })
        .collect();
    let mut state = ListState::default().with_selected(Some(view.selected));
    frame.render_stateful_widget(
        List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(COLOR_BORDER))
                    .title(title),
            )
            .highlight_style(Style::default().bg(COLOR_SELECTED_BG)),
        cols[0],
        &mut state,
    );

    let Some(question) = questions.get(view.selected) else {
        return;
    };
    let mut lines = vec![
        Line::from(Span::styled(
            question.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                question.difficulty.label(),
                Style::default().fg(difficulty_color(question.difficulty)),
            ),
            Span::styled(
                format!(
                    "  by {} on {}",
                    question.created_by,
                    format_datetime(question.created_at)
                ),
                Style::default().fg(COLOR_DIM),
            ),
        ]),
    ];
    if !question.tags.is_empty() {
        lines.push(label_value("Tags", question.tags.join(", ")));
    }
    lines.push(Line::default());
    lines.extend(render_markdown(&question.description));
    if !question.constraints.trim().is_empty() {
        lines.push(Line::default());
        lines.push(label_value("Constraints", question.constraints.clone()));
    }
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_BORDER))
                .title(" Details "),
        ),
        cols[1],
    );
}
