//! Contest list grouped by status, creation form, and the contest arena.

use chrono::Utc;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

use super::components::{render_dialog_frame, render_empty, render_loadable, DialogFrameConfig};
use super::helpers::{format_datetime, spinner};
use super::layout::LayoutContext;
use super::review::verdict_lines;
use super::theme::{
    contest_status_color, difficulty_color, status_color, COLOR_ACCENT, COLOR_BORDER, COLOR_DIM,
    COLOR_SELECTED_BG, COLOR_WARNING,
};
use crate::app::{App, ContestFormView, Pane};
use crate::filters::group_contests;
use crate::markdown::render_markdown;
use crate::widgets::{EditorWidget, InputBoxWidget};

pub fn render_contests(frame: &mut Frame, area: Rect, app: &App, ctx: &LayoutContext) {
    let view = &app.contests;
    let Some(contests) = render_loadable(frame, area, app.tick_count, "contests", &view.contests)
    else {
        return;
    };
    if contests.is_empty() {
        render_empty(frame, area, "No contests yet");
    } else {
        let now = Utc::now();
        let mut items = Vec::new();
        let mut selected_row = 0;
        let mut index = 0;
        for (status, group) in group_contests(contests, now) {
            items.push(ListItem::new(Line::from(Span::styled(
                format!("{} ({})", status.label(), group.len()),
                Style::default()
                    .fg(contest_status_color(status))
                    .add_modifier(Modifier::BOLD),
            ))));
            for contest in group {
                if index == view.selected {
                    selected_row = items.len();
                }
                index += 1;
                items.push(ListItem::new(Line::from(vec![
                    Span::raw(format!("  {}", contest.name)),
                    Span::styled(
                        format!(
                            "  {} | {} min | {} problems",
                            format_datetime(contest.start_time),
                            contest.duration_minutes(),
                            contest.problem_count
                        ),
                        Style::default().fg(COLOR_DIM),
                    ),
                ])));
            }
        }
        let mut state = ListState::default().with_selected(Some(selected_row));
        frame.render_stateful_widget(
            List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(COLOR_BORDER))
                        .title(" Contests "),
                )
                .highlight_style(Style::default().bg(COLOR_SELECTED_BG)),
            area,
            &mut state,
        );
    }

    if let Some(form) = &view.create {
        render_contest_form(frame, area, ctx, app, form);
    }
}

fn render_contest_form(
    frame: &mut Frame,
    area: Rect,
    ctx: &LayoutContext,
    app: &App,
    form: &ContestFormView,
) {
    let inner = render_dialog_frame(frame, area, ctx, &DialogFrameConfig::new("Create contest", 13));
    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .split(inner);
    let fields = [
        (&form.name, " Name "),
        (&form.start_time, " Start (YYYY-MM-DD HH:MM) "),
        (&form.end_time, " End (YYYY-MM-DD HH:MM) "),
        (&form.problem_ids, " Problem ids (comma separated) "),
    ];
    for (i, (input, title)) in fields.into_iter().enumerate() {
        frame.render_widget(InputBoxWidget::new(input, title, form.focus == i), rows[i]);
    }
    let status = if form.submitting {
        format!("{} Creating...", spinner(app.tick_count))
    } else {
        "[Enter] create  [Esc] cancel".to_string()
    };
    frame.render_widget(
        Paragraph::new(Span::styled(status, Style::default().fg(COLOR_DIM))),
        rows[4],
    );
}

pub fn render_contest_detail(frame: &mut Frame, area: Rect, app: &App, ctx: &LayoutContext) {
    let view = &app.contest;
    let Some(contest) = render_loadable(frame, area, app.tick_count, "contest", &view.contest)
    else {
        return;
    };

    let rows = Layout::vertical([Constraint::Length(3), Constraint::Min(6)]).split(area);

    let status = contest.status_at(Utc::now());
    let timer_style = if view.timer.countdown_secs().is_some() {
        Style::default().fg(COLOR_WARNING)
    } else {
        Style::default().fg(COLOR_ACCENT)
    };
    let header = Line::from(vec![
        Span::styled(contest.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(status.label(), Style::default().fg(contest_status_color(status))),
        Span::styled(
            format!(
                "  {} to {}",
                format_datetime(contest.start_time),
                format_datetime(contest.end_time)
            ),
            Style::default().fg(COLOR_DIM),
        ),
        Span::raw("  "),
        Span::styled(format!("⏱ {}", view.timer.display()), timer_style),
        Span::styled(
            if view.timer.is_running() { "" } else { " (paused)" },
            Style::default().fg(COLOR_DIM),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(header).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_BORDER)),
        ),
        rows[0],
    );

    if contest.problems.is_empty() {
        render_empty(frame, rows[1], "This contest has no problems");
        return;
    }

    let cols = if ctx.should_stack_panels() {
        Layout::vertical([Constraint::Percentage(45), Constraint::Percentage(55)]).split(rows[1])
    } else {
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).split(rows[1])
    };

    let left = Layout::vertical([Constraint::Length(1), Constraint::Min(3), Constraint::Length(7)])
        .split(cols[0]);
    let titles: Vec<Line> = contest
        .problems
        .iter()
        .enumerate()
        .map(|(i, p)| {
            Line::from(Span::styled(
                format!("{}. {}", i + 1, p.title),
                Style::default().fg(difficulty_color(p.difficulty)),
            ))
        })
        .collect();
    frame.render_widget(
        Tabs::new(titles)
            .select(view.selected_problem)
            .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)),
        left[0],
    );

    let statement_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(" Statement ");
    let statement_area = statement_block.inner(left[1]);
    frame.render_widget(statement_block, left[1]);
    if let Some(problem) = render_loadable(
        frame,
        statement_area,
        app.tick_count,
        "problem",
        &view.problem,
    ) {
        frame.render_widget(
            Paragraph::new(render_markdown(&problem.description)).wrap(Wrap { trim: false }),
            statement_area,
        );
    }

    let mut recent = Vec::new();
    if let Some(list) = view.submissions.data() {
        if list.is_empty() {
            recent.push(Line::from(Span::styled(
                "No submissions yet",
                Style::default().fg(COLOR_DIM),
            )));
        }
        for s in list.iter().take(5) {
            recent.push(Line::from(vec![
                Span::raw(format!("{} ", s.problem_title)),
                Span::styled(s.status.label(), Style::default().fg(status_color(s.status))),
            ]));
        }
    }
    frame.render_widget(
        Paragraph::new(recent).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_BORDER))
                .title(" Your submissions "),
        ),
        left[2],
    );

    let right = Layout::vertical([Constraint::Min(6), Constraint::Length(6)]).split(cols[1]);
    frame.render_widget(
        EditorWidget::new(&view.editor, "Solution", view.pane == Pane::Editor),
        right[0],
    );
    let output = if view.submitting {
        vec![Line::from(format!("{} Judging...", spinner(app.tick_count)))]
    } else {
        view.verdict.as_ref().map(verdict_lines).unwrap_or_default()
    };
    frame.render_widget(
        Paragraph::new(output).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_BORDER))
                .title(" Verdict "),
        ),
        right[1],
    );
}
