//! Navbar, footer and the notification overlay drawn around every screen.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::helpers::{key_hints, spinner, truncate_string};
use super::layout::LayoutContext;
use super::theme::{notice_color, COLOR_ACCENT, COLOR_BORDER, COLOR_DIALOG_BG, COLOR_DIM, COLOR_HEADER};
use crate::app::{App, Screen, NAV_ITEMS};

const NOTICE_WIDTH: u16 = 44;

pub fn render_navbar(frame: &mut Frame, area: Rect, app: &App, ctx: &LayoutContext) {
    let mut spans = vec![Span::styled(
        " JudgeFlow ",
        Style::default()
            .fg(COLOR_ACCENT)
            .add_modifier(Modifier::BOLD),
    )];

    if app.session.is_authenticated() {
        let current = app.screen.parent().unwrap_or(app.screen);
        for (key, screen) in NAV_ITEMS {
            if screen.requires_staff() && !app.session.is_staff() {
                continue;
            }
            let style = if screen == current {
                Style::default()
                    .fg(COLOR_HEADER)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(COLOR_DIM)
            };
            let label = if ctx.compact_nav() {
                format!(" {} ", key)
            } else {
                format!(" {} {} ", key, screen.title())
            };
            spans.push(Span::styled(label, style));
        }
    }

    let right = match app.session.user() {
        Some(_) if app.logging_out => format!("{} logging out ", spinner(app.tick_count)),
        Some(user) => {
            let role = if user.is_staff { " (admin)" } else { "" };
            format!("{}{} ", user.username, role)
        }
        None if app.session.is_loading() => format!("{} restoring session ", spinner(app.tick_count)),
        None => String::new(),
    };
    let left_width: usize = spans.iter().map(|s| s.width()).sum();
    let pad = (area.width as usize).saturating_sub(left_width + right.chars().count());
    spans.push(Span::raw(" ".repeat(pad)));
    spans.push(Span::styled(right, Style::default().fg(COLOR_DIM)));

    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(COLOR_BORDER)),
        ),
        area,
    );
}

/// Key hints for the current screen and mode.
pub fn footer_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    use crate::app::Pane;

    let mut hints = match app.screen {
        Screen::Login => vec![("Tab", "next field"), ("Enter", "sign in"), ("^N", "create account")],
        Screen::Signup => vec![
            ("Tab", "next field"),
            ("Space", "accept terms"),
            ("Enter", "sign up"),
            ("Esc", "back to login"),
        ],
        Screen::QuestionDetail(_) | Screen::ContestDetail(_) | Screen::Playground
            if editor_pane(app) != Pane::Commands =>
        {
            vec![("Esc", "leave editor"), ("^R", "run"), ("^S", "submit")]
        }
        Screen::Questions if app.questions.searching => vec![("Enter", "done")],
        Screen::Submissions if app.submissions.searching => vec![("Enter", "done")],
        Screen::Questions => vec![
            ("Enter", "open"),
            ("/", "search"),
            ("d", "difficulty"),
            ("t", "tags"),
            ("s", "sort"),
            ("c", "clear"),
            ("n", "propose"),
        ],
        Screen::QuestionDetail(_) => vec![
            ("e", "edit"),
            ("^R", "run"),
            ("^S", "submit"),
            ("l", "language"),
            ("a", "AI review"),
            ("y", "copy"),
        ],
        Screen::Playground => vec![
            ("e", "edit"),
            ("n", "stdin"),
            ("^R", "run"),
            ("l", "language"),
            ("i", "import"),
            ("x", "export"),
            ("w", "save"),
            ("o", "snippets"),
        ],
        Screen::Submissions => vec![
            ("Enter", "open"),
            ("/", "search"),
            ("s", "status"),
            ("l", "language"),
            ("c", "clear"),
        ],
        Screen::SubmissionDetail(_) => vec![
            ("y", "copy"),
            ("x", "export"),
            ("a", "AI review"),
            ("p", "problem"),
        ],
        Screen::Contests => vec![("Enter", "open"), ("c", "create")],
        Screen::ContestDetail(_) => vec![
            ("[ ]", "problem"),
            ("e", "edit"),
            ("^S", "submit"),
            ("t", "timer"),
            ("m", "countdown"),
            ("T", "reset"),
        ],
        Screen::AiReview => vec![("g", "generate"), ("Enter", "open link"), ("PgUp/PgDn", "scroll")],
        Screen::Moderation => vec![("a", "approve"), ("x", "reject"), ("f", "filter")],
        Screen::Dashboard => vec![],
    };
    if app.screen_failed() {
        hints.insert(0, ("r", "retry"));
    }
    if app.screen.parent().is_some() {
        hints.push(("Esc", "back"));
    }
    if app.session.is_authenticated() {
        hints.push(("L", "logout"));
        hints.push(("q", "quit"));
    }
    hints
}

fn editor_pane(app: &App) -> crate::app::Pane {
    match app.screen {
        Screen::QuestionDetail(_) => app.question.pane,
        Screen::ContestDetail(_) => app.contest.pane,
        Screen::Playground => app.playground.pane,
        _ => crate::app::Pane::Commands,
    }
}

pub fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    frame.render_widget(Paragraph::new(key_hints(&footer_hints(app))), area);
}

/// Stacked toasts in the top-right corner, newest at the bottom.
pub fn render_notifications(frame: &mut Frame, area: Rect, app: &App) {
    let width = NOTICE_WIDTH.min(area.width);
    let text_width = width.saturating_sub(2) as usize;
    let mut y = area.y + 1;

    for notice in app.notifications.iter() {
        let color = notice_color(notice.kind);
        let lines: Vec<Line> = notice
            .message
            .lines()
            .map(|l| Line::from(truncate_string(l, text_width)))
            .collect();
        let height = lines.len() as u16 + 2;
        if y + height > area.bottom() {
            break;
        }
        let rect = Rect {
            x: area.right().saturating_sub(width + 1),
            y,
            width,
            height,
        };
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(color))
                        .title(Span::styled(
                            format!(" {} ", notice.title),
                            Style::default().fg(color).add_modifier(Modifier::BOLD),
                        ))
                        .style(Style::default().bg(COLOR_DIALOG_BG)),
                ),
            rect,
        );
        y += height;
    }
}
