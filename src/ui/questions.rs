//! Question catalog and the question detail (statement + editor) screen.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::components::{render_dialog_frame, render_empty, render_loadable, DialogFrameConfig};
use super::helpers::{label_value, spinner};
use super::layout::LayoutContext;
use super::review::{render_review_panel, run_output_lines, verdict_lines};
use super::theme::{
    difficulty_color, COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_SELECTED_BG,
};
use crate::app::{App, Pane, QuestionFormView};
use crate::filters::all_tags;
use crate::markdown::render_markdown;
use crate::widgets::{EditorWidget, InputBoxWidget};

pub fn render_questions(frame: &mut Frame, area: Rect, app: &App, ctx: &LayoutContext) {
    let view = &app.questions;
    let rows = Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).split(area);

    render_filter_bar(frame, rows[0], app);

    let Some(problems) = render_loadable(
        frame,
        rows[1],
        app.tick_count,
        "problems",
        &view.problems,
    ) else {
        return;
    };

    let visible = view.visible();
    if visible.is_empty() {
        let message = if problems.is_empty() {
            "No problems yet"
        } else {
            "No problems match the current filters"
        };
        render_empty(frame, rows[1], message);
    } else {
        let items: Vec<ListItem> = visible
            .iter()
            .map(|p| {
                let mut spans = vec![
                    Span::styled(
                        format!("{:<7}", p.difficulty.label()),
                        Style::default().fg(difficulty_color(p.difficulty)),
                    ),
                    Span::raw(format!("#{:<5}", p.id)),
                    Span::styled(p.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                ];
                if !p.tags.is_empty() {
                    spans.push(Span::styled(
                        format!("  [{}]", p.tags.join(", ")),
                        Style::default().fg(COLOR_DIM),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();
        let mut state = ListState::default().with_selected(Some(view.selected));
        frame.render_stateful_widget(
            List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(COLOR_BORDER))
                        .title(format!(" Problems ({}) ", visible.len())),
                )
                .highlight_style(Style::default().bg(COLOR_SELECTED_BG))
                .highlight_symbol("▶ "),
            rows[1],
            &mut state,
        );
    }

    if let Some(cursor) = view.tag_picker {
        render_tag_picker(frame, area, ctx, app, all_tags(problems), cursor);
    }
    if let Some(form) = &view.new_question {
        render_question_form(frame, area, ctx, app, form);
    }
    if let Some(id) = view.confirm_delete {
        let inner = render_dialog_frame(frame, area, ctx, &DialogFrameConfig::new("Delete problem", 2));
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(format!("Delete problem #{}? This cannot be undone.", id)),
                Line::from(Span::styled("[y] delete  [n] cancel", Style::default().fg(COLOR_DIM))),
            ]),
            inner,
        );
    }
}

fn render_filter_bar(frame: &mut Frame, area: Rect, app: &App) {
    let view = &app.questions;
    let cols = Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).split(area);
    frame.render_widget(
        InputBoxWidget::new(&view.search, " Search ", view.searching),
        cols[0],
    );

    let filter = &view.filter;
    let difficulty = filter.difficulty.map_or("all", |d| d.label());
    let tags = if filter.tags.is_empty() {
        "any".to_string()
    } else {
        filter.tags.iter().cloned().collect::<Vec<_>>().join(", ")
    };
    let line = Line::from(vec![
        Span::styled("difficulty ", Style::default().fg(COLOR_DIM)),
        Span::raw(difficulty.to_string()),
        Span::styled("  tags ", Style::default().fg(COLOR_DIM)),
        Span::raw(tags),
        Span::styled("  sort ", Style::default().fg(COLOR_DIM)),
        Span::raw(filter.sort.label()),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_BORDER))
                .title(" Filters "),
        ),
        cols[1],
    );
}

fn render_tag_picker(
    frame: &mut Frame,
    area: Rect,
    ctx: &LayoutContext,
    app: &App,
    tags: Vec<String>,
    cursor: usize,
) {
    let height = (tags.len() as u16).clamp(1, area.height.saturating_sub(6));
    let inner = render_dialog_frame(frame, area, ctx, &DialogFrameConfig::new("Filter by tags", height).max_width(40));
    if tags.is_empty() {
        render_empty(frame, inner, "No tags");
        return;
    }
    let items: Vec<ListItem> = tags
        .iter()
        .map(|tag| {
            let mark = if app.questions.filter.tags.contains(tag) { "[x]" } else { "[ ]" };
            ListItem::new(format!("{} {}", mark, tag))
        })
        .collect();
    let mut state = ListState::default().with_selected(Some(cursor));
    frame.render_stateful_widget(
        List::new(items).highlight_style(Style::default().fg(COLOR_ACCENT)),
        inner,
        &mut state,
    );
}

fn render_question_form(
    frame: &mut Frame,
    area: Rect,
    ctx: &LayoutContext,
    app: &App,
    form: &QuestionFormView,
) {
    let inner = render_dialog_frame(frame, area, ctx, &DialogFrameConfig::new("Propose a question", 16));
    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .split(inner);
    let fields = [
        (&form.title, " Title "),
        (&form.description, " Description "),
        (&form.difficulty, " Difficulty (easy/medium/hard) "),
        (&form.constraints, " Constraints "),
        (&form.tags, " Tags (comma separated) "),
    ];
    for (i, (input, title)) in fields.into_iter().enumerate() {
        frame.render_widget(InputBoxWidget::new(input, title, form.focus == i), rows[i]);
    }
    let status = if form.submitting {
        format!("{} Submitting...", spinner(app.tick_count))
    } else {
        "[Enter] submit for review  [Esc] cancel".to_string()
    };
    frame.render_widget(Paragraph::new(Span::styled(status, Style::default().fg(COLOR_DIM))), rows[5]);
}

// ============================================================================
// Question detail
// ============================================================================

pub fn render_question_detail(frame: &mut Frame, area: Rect, app: &App, ctx: &LayoutContext) {
    let view = &app.question;
    let Some(problem) = render_loadable(frame, area, app.tick_count, "problem", &view.problem) else {
        return;
    };

    let halves = if ctx.should_stack_panels() {
        Layout::vertical([Constraint::Percentage(40), Constraint::Percentage(60)]).split(area)
    } else {
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).split(area)
    };

    // Statement, or the review panel when toggled on.
    if view.show_review {
        if let Some(review) = view.review.data() {
            render_review_panel(frame, halves[0], review, None, 0);
        }
    } else {
        let mut lines = vec![
            Line::from(Span::styled(
                problem.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(
                    problem.difficulty.label(),
                    Style::default().fg(difficulty_color(problem.difficulty)),
                ),
                Span::styled(
                    if problem.tags.is_empty() {
                        String::new()
                    } else {
                        format!("  {}", problem.tags.join(", "))
                    },
                    Style::default().fg(COLOR_DIM),
                ),
            ]),
            Line::default(),
        ];
        lines.extend(render_markdown(&problem.description));
        if !problem.constraints.trim().is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled("Constraints", Style::default().add_modifier(Modifier::BOLD))));
            lines.extend(render_markdown(&problem.constraints));
        }
        for (i, case) in problem.test_cases.iter().enumerate() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                format!("Example {}", i + 1),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(label_value("Input", case.input_data.clone()));
            lines.push(label_value("Output", case.expected_output.clone()));
        }
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .scroll((view.statement_scroll, 0))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(COLOR_BORDER))
                        .title(format!(" #{} ", problem.id)),
                ),
            halves[0],
        );
    }

    let right = Layout::vertical([Constraint::Min(6), Constraint::Length(8)]).split(halves[1]);
    frame.render_widget(
        EditorWidget::new(&view.editor, "Solution", view.pane == Pane::Editor),
        right[0],
    );

    let mut output = Vec::new();
    if view.running || view.submitting {
        let what = if view.running { "Running" } else { "Judging" };
        output.push(Line::from(format!("{} {}...", spinner(app.tick_count), what)));
    } else if view.review.is_loading() {
        output.push(Line::from(format!("{} Reviewing your code...", spinner(app.tick_count))));
    }
    if let Some(verdict) = &view.verdict {
        output.extend(verdict_lines(verdict));
    } else if let Some(run) = &view.output {
        output.extend(run_output_lines(run));
    }
    if let Some(e) = view.review.error() {
        output.push(Line::from(Span::styled(e.user_message(), Style::default().fg(COLOR_ERROR))));
    }
    frame.render_widget(
        Paragraph::new(output).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_BORDER))
                .title(" Output "),
        ),
        right[1],
    );
}
