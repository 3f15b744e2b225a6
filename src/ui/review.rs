//! AI review rendering plus the run/verdict output shared by editor screens.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::components::{render_empty, render_loadable, render_loading};
use super::helpers::truncate_string;
use super::theme::{
    status_color, COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_SELECTED_BG,
    COLOR_SUCCESS,
};
use crate::app::{App, Loadable};
use crate::markdown::{render_markdown, STYLE_HEADING};
use crate::models::{RunResult, Verdict};
use crate::review::ParsedReview;

pub fn run_output_lines(run: &RunResult) -> Vec<Line<'static>> {
    let (label, color) = if run.error {
        ("Error", COLOR_ERROR)
    } else {
        ("Output", COLOR_SUCCESS)
    };
    let mut lines = vec![Line::from(Span::styled(
        label,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))];
    if run.output.is_empty() {
        lines.push(Line::from(Span::styled("No output", Style::default().fg(COLOR_DIM))));
    } else {
        lines.extend(run.output.lines().map(|l| Line::from(l.to_string())));
    }
    lines
}

pub fn verdict_lines(verdict: &Verdict) -> Vec<Line<'static>> {
    let passed = verdict.test_results.iter().filter(|t| t.passed).count();
    let mut header = vec![Span::styled(
        verdict.status.label(),
        Style::default()
            .fg(status_color(verdict.status))
            .add_modifier(Modifier::BOLD),
    )];
    if !verdict.test_results.is_empty() {
        header.push(Span::raw(format!(
            "  {}/{} tests passed",
            passed,
            verdict.test_results.len()
        )));
    }
    let mut lines = vec![Line::from(header)];
    let mut metrics = Vec::new();
    if let Some(runtime) = verdict.runtime {
        metrics.push(format!("Runtime: {:.3}s", runtime));
    }
    if let Some(memory) = verdict.memory {
        metrics.push(format!("Memory: {:.2}MB", memory));
    }
    if !metrics.is_empty() {
        lines.push(Line::from(Span::styled(metrics.join("  "), Style::default().fg(COLOR_DIM))));
    }
    if let Some(failure) = verdict.first_failure() {
        match failure.error.as_deref().filter(|e| !e.trim().is_empty()) {
            Some(error) => lines.push(Line::from(Span::styled(
                truncate_string(error.lines().next().unwrap_or_default(), 120),
                Style::default().fg(COLOR_ERROR),
            ))),
            None => {
                lines.push(Line::from(format!("Input: {}", failure.input.trim())));
                lines.push(Line::from(format!(
                    "Expected {}, got {}",
                    failure.expected_output.trim(),
                    failure.actual_output.trim()
                )));
            }
        }
    }
    lines
}

/// Score, feedback sections and the selectable recommendation list.
pub fn review_lines(review: &ParsedReview, selected: Option<usize>) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some(score) = review.score {
        let color = match score {
            0..=49 => COLOR_ERROR,
            50..=79 => COLOR_ACCENT,
            _ => COLOR_SUCCESS,
        };
        lines.push(Line::from(vec![
            Span::styled("Score ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("{}/100", score), Style::default().fg(color)),
        ]));
        lines.push(Line::default());
    }

    for section in &review.sections {
        if !section.is_preamble() {
            lines.push(Line::from(Span::styled(section.title.clone(), STYLE_HEADING)));
        }
        lines.extend(render_markdown(&section.body));
        lines.push(Line::default());
    }

    let items = review.recommendations.items();
    if !items.is_empty() {
        lines.push(Line::from(Span::styled("Recommendations", STYLE_HEADING)));
        let mut last_kind = None;
        for (i, (kind, item)) in items.into_iter().enumerate() {
            if last_kind != Some(kind) {
                lines.push(Line::from(Span::styled(
                    kind.label(),
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                last_kind = Some(kind);
            }
            let linked = item.problem_id().is_some() || item.external_url().is_some();
            let mut spans = vec![
                Span::raw("  • "),
                Span::styled(
                    item.title.clone(),
                    if linked {
                        Style::default().fg(COLOR_ACCENT)
                    } else {
                        Style::default()
                    },
                ),
            ];
            if let Some(note) = &item.note {
                spans.push(Span::styled(format!(" - {}", note), Style::default().fg(COLOR_DIM)));
            }
            let mut line = Line::from(spans);
            if selected == Some(i) {
                line = line.style(Style::default().bg(COLOR_SELECTED_BG));
            }
            lines.push(line);
        }
    }
    lines
}

pub fn render_review_panel(
    frame: &mut Frame,
    area: Rect,
    review: &ParsedReview,
    selected: Option<usize>,
    scroll: u16,
) {
    frame.render_widget(
        Paragraph::new(review_lines(review, selected))
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(COLOR_BORDER))
                    .title(" AI review "),
            ),
        area,
    );
}

pub fn render_ai_review(frame: &mut Frame, area: Rect, app: &App) {
    let view = &app.review;
    let cols = Layout::horizontal([Constraint::Length(34), Constraint::Min(20)]).split(area);

    let progress_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(" Progress ");
    let progress_area = progress_block.inner(cols[0]);
    frame.render_widget(progress_block, cols[0]);
    if let Some(progress) = render_loadable(
        frame,
        progress_area,
        app.tick_count,
        "progress",
        &view.progress,
    ) {
        let rows = progress.rows();
        if rows.is_empty() {
            render_empty(frame, progress_area, "No progress yet");
        } else {
            let lines: Vec<Line> = rows
                .into_iter()
                .map(|(label, value)| {
                    Line::from(vec![
                        Span::styled(format!("{}: ", label), Style::default().fg(COLOR_DIM)),
                        Span::raw(value),
                    ])
                })
                .collect();
            frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), progress_area);
        }
    }

    match &view.review {
        Loadable::Loaded(review) => {
            render_review_panel(frame, cols[1], review, Some(view.selected), view.scroll)
        }
        Loadable::Loading => render_loading(frame, cols[1], app.tick_count, "AI review"),
        Loadable::Failed(e) => frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(e.user_message(), Style::default().fg(COLOR_ERROR))),
                Line::from(Span::styled("[g] try again", Style::default().fg(COLOR_DIM))),
            ])
            .wrap(Wrap { trim: true }),
            cols[1],
        ),
        Loadable::Idle => render_empty(
            frame,
            cols[1],
            "Press g to generate a review of your recent submissions",
        ),
    }
}
