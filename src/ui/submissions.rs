//! Submission history and the per-submission detail view.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use super::components::{render_empty, render_loadable};
use super::helpers::{format_datetime, label_value};
use super::theme::{
    status_color, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_SELECTED_BG,
    COLOR_SUCCESS,
};
use crate::app::App;
use crate::models::{Submission, TestCaseResult};
use crate::widgets::InputBoxWidget;

fn metric(value: Option<f64>, unit: &str, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.*}{}", precision, v, unit))
}

pub fn render_submissions(frame: &mut Frame, area: Rect, app: &App) {
    let view = &app.submissions;
    let rows = Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).split(area);

    let cols = Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).split(rows[0]);
    frame.render_widget(InputBoxWidget::new(&view.search, " Search ", view.searching), cols[0]);
    let filter = &view.filter;
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("status ", Style::default().fg(COLOR_DIM)),
            Span::raw(filter.status.map_or("all", |s| s.label())),
            Span::styled("  language ", Style::default().fg(COLOR_DIM)),
            Span::raw(filter.language.map_or("all", |l| l.display_name())),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_BORDER))
                .title(" Filters "),
        ),
        cols[1],
    );

    let Some(all) = render_loadable(
        frame,
        rows[1],
        app.tick_count,
        "submissions",
        &view.submissions,
    ) else {
        return;
    };
    let visible = view.visible();
    if visible.is_empty() {
        let message = if all.is_empty() {
            "No submissions yet. Solve a problem to see it here."
        } else {
            "No submissions match the current filters"
        };
        render_empty(frame, rows[1], message);
        return;
    }

    let table_rows: Vec<Row> = visible
        .iter()
        .map(|s| {
            Row::new(vec![
                Span::raw(format!("#{}", s.id)),
                Span::raw(s.problem_title.clone()),
                Span::styled(s.status.label(), Style::default().fg(status_color(s.status))),
                Span::raw(s.language.clone()),
                Span::raw(metric(s.runtime, "s", 3)),
                Span::raw(metric(s.memory, "MB", 2)),
                Span::styled(format_datetime(s.submitted_at), Style::default().fg(COLOR_DIM)),
            ])
        })
        .collect();
    let header = Row::new(vec!["ID", "Problem", "Status", "Language", "Runtime", "Memory", "Submitted"])
        .style(Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD));
    let widths = [
        Constraint::Length(7),
        Constraint::Min(16),
        Constraint::Length(21),
        Constraint::Length(11),
        Constraint::Length(9),
        Constraint::Length(10),
        Constraint::Length(17),
    ];
    let mut state = TableState::default().with_selected(Some(view.selected));
    frame.render_stateful_widget(
        Table::new(table_rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(COLOR_BORDER))
                    .title(format!(" Submissions ({}) ", visible.len())),
            )
            .row_highlight_style(Style::default().bg(COLOR_SELECTED_BG)),
        rows[1],
        &mut state,
    );
}

/// Lines for the per-test breakdown of a graded submission.
pub fn test_result_lines(results: &[TestCaseResult]) -> Vec<Line<'static>> {
    if results.is_empty() {
        return vec![Line::from(Span::styled(
            "No test results available",
            Style::default().fg(COLOR_DIM),
        ))];
    }
    let mut lines = Vec::new();
    for (i, result) in results.iter().enumerate() {
        let (label, color) = if result.passed {
            ("Passed", COLOR_SUCCESS)
        } else {
            ("Failed", COLOR_ERROR)
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("Test Case {} ", i + 1),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(label, Style::default().fg(color)),
        ]));
        lines.push(label_value("Input", result.input.trim().to_string()));
        lines.push(label_value("Expected Output", result.expected_output.trim().to_string()));
        let actual = result.actual_output.trim();
        lines.push(label_value(
            "Your Output",
            if actual.is_empty() { "No output" } else { actual }.to_string(),
        ));
        if result.has_error() {
            lines.push(Line::from(vec![
                Span::styled("Error: ", Style::default().fg(COLOR_ERROR).add_modifier(Modifier::BOLD)),
                Span::styled(
                    result.error.clone().unwrap_or_default(),
                    Style::default().fg(COLOR_ERROR),
                ),
            ]));
        }
        lines.push(Line::default());
    }
    lines
}

fn summary_lines(submission: &Submission) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            submission.problem_title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            submission.status.label(),
            Style::default()
                .fg(status_color(submission.status))
                .add_modifier(Modifier::BOLD),
        )),
        label_value("Language", submission.language.clone()),
        label_value("Runtime", metric(submission.runtime, "s", 3)),
        label_value("Memory", metric(submission.memory, "MB", 2)),
        label_value("Submitted", format_datetime(submission.submitted_at)),
    ]
}

pub fn render_submission_detail(frame: &mut Frame, area: Rect, app: &App) {
    let view = &app.submission;
    let Some(submission) = render_loadable(
        frame,
        area,
        app.tick_count,
        "submission",
        &view.submission,
    ) else {
        return;
    };

    let cols = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area);
    let left = Layout::vertical([Constraint::Length(8), Constraint::Min(3)]).split(cols[0]);

    frame.render_widget(
        Paragraph::new(summary_lines(submission)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_BORDER))
                .title(format!(" Submission #{} ", submission.id)),
        ),
        left[0],
    );

    let code: Vec<Line> = submission
        .code
        .lines()
        .enumerate()
        .map(|(i, l)| {
            Line::from(vec![
                Span::styled(format!("{:>3} ", i + 1), Style::default().fg(COLOR_DIM)),
                Span::raw(l.replace('\t', "    ")),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(code).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_BORDER))
                .title(" Code "),
        ),
        left[1],
    );

    frame.render_widget(
        Paragraph::new(test_result_lines(submission.test_results()))
            .wrap(Wrap { trim: false })
            .scroll((view.scroll, 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(COLOR_BORDER))
                    .title(" Test results "),
            ),
        cols[1],
    );
}
