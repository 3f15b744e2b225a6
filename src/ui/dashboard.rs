//! Dashboard: stats, progress gauge, upcoming contests.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
    Frame,
};

use super::components::render_loadable;
use super::helpers::{format_datetime, key_hints, label_value};
use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_SUCCESS};
use crate::app::{App, NAV_ITEMS};
use crate::models::DashboardData;

pub fn render_dashboard(frame: &mut Frame, area: Rect, app: &App) {
    let Some(data) = render_loadable(
        frame,
        area,
        app.tick_count,
        "dashboard",
        &app.dashboard.data,
    ) else {
        return;
    };

    let rows = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(8),
        Constraint::Length(3),
        Constraint::Min(3),
    ])
    .split(area);

    let name = app
        .session
        .user()
        .map(|u| u.username.as_str())
        .unwrap_or("coder");
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw("Welcome back, "),
            Span::styled(
                name.to_string(),
                Style::default()
                    .fg(COLOR_ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
        ])),
        rows[0],
    );

    render_stats(frame, rows[1], data);

    let stats = &data.stats;
    frame.render_widget(
        Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(COLOR_BORDER))
                    .title(" Problems solved "),
            )
            .gauge_style(Style::default().fg(COLOR_SUCCESS))
            .ratio(stats.progress_ratio())
            .label(format!("{} / {}", stats.solved_problems, stats.total_problems)),
        rows[2],
    );

    let bottom = Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[3]);
    render_upcoming(frame, bottom[0], data);

    let shortcuts: Vec<Line> = NAV_ITEMS
        .iter()
        .filter(|(_, s)| !s.requires_staff() || app.session.is_staff())
        .map(|(key, screen)| key_hints(&[(&key.to_string(), screen.title())]))
        .collect();
    frame.render_widget(
        Paragraph::new(shortcuts).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_BORDER))
                .title(" Go to "),
        ),
        bottom[1],
    );
}

fn render_stats(frame: &mut Frame, area: Rect, data: &DashboardData) {
    let stats = &data.stats;
    let lines = vec![
        label_value("Total submissions", stats.total_submissions.to_string()),
        label_value("Accepted", stats.accepted_submissions.to_string()),
        label_value("Accuracy", format!("{:.1}%", stats.accuracy)),
        label_value("Problems solved", stats.solved_problems.to_string()),
        label_value("Problems available", stats.total_problems.to_string()),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_BORDER))
                .title(" Your stats "),
        ),
        area,
    );
}

fn render_upcoming(frame: &mut Frame, area: Rect, data: &DashboardData) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(" Upcoming contests ");
    if data.upcoming_contests.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No upcoming contests",
                Style::default().fg(COLOR_DIM),
            ))
            .block(block),
            area,
        );
        return;
    }
    let items: Vec<ListItem> = data
        .upcoming_contests
        .iter()
        .map(|c| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", format_datetime(c.start_time)),
                    Style::default().fg(COLOR_DIM),
                ),
                Span::raw(c.name.clone()),
            ]))
        })
        .collect();
    frame.render_widget(List::new(items).block(block), area);
}
