//! Login and signup forms.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::components::{render_dialog_frame, DialogFrameConfig};
use super::helpers::spinner;
use super::layout::LayoutContext;
use super::theme::{COLOR_ACCENT, COLOR_DIM, COLOR_ERROR, COLOR_SUCCESS, COLOR_WARNING};
use crate::app::{App, SignupView};
use crate::validation::{password_strength, strength_label};
use crate::widgets::InputBoxWidget;

pub fn render_login(frame: &mut Frame, area: Rect, app: &App, ctx: &LayoutContext) {
    let view = &app.login;
    let inner = render_dialog_frame(
        frame,
        area,
        ctx,
        &DialogFrameConfig::new("Sign in to JudgeFlow", 10).max_width(56),
    );
    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(inner);

    frame.render_widget(
        InputBoxWidget::new(&view.username, " Username or email ", view.focus == 0),
        rows[0],
    );
    frame.render_widget(
        InputBoxWidget::new(&view.password, " Password ", view.focus == 1),
        rows[1],
    );

    let status = if view.submitting {
        Line::from(vec![
            Span::styled(spinner(app.tick_count), Style::default().fg(COLOR_ACCENT)),
            Span::raw(" Signing in..."),
        ])
    } else {
        Line::from(Span::styled(
            "No account yet? Press Ctrl+N to sign up.",
            Style::default().fg(COLOR_DIM),
        ))
    };
    frame.render_widget(Paragraph::new(status), rows[3]);
}

fn strength_color(strength: u8) -> ratatui::style::Color {
    match strength {
        0..=49 => COLOR_ERROR,
        50..=74 => COLOR_WARNING,
        _ => COLOR_SUCCESS,
    }
}

pub fn render_signup(frame: &mut Frame, area: Rect, app: &App, ctx: &LayoutContext) {
    let view = &app.signup;
    let inner = render_dialog_frame(
        frame,
        area,
        ctx,
        &DialogFrameConfig::new("Create your account", 16).max_width(60),
    );
    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(inner);

    frame.render_widget(
        InputBoxWidget::new(&view.username, " Username ", view.focus == 0),
        rows[0],
    );
    frame.render_widget(
        InputBoxWidget::new(&view.email, " Email ", view.focus == 1),
        rows[1],
    );
    frame.render_widget(
        InputBoxWidget::new(&view.password, " Password ", view.focus == 2),
        rows[2],
    );

    if !view.password.is_empty() {
        let strength = password_strength(view.password.content());
        let filled = (strength / 25) as usize;
        let bar = format!("{}{}", "■".repeat(filled), "□".repeat(4 - filled));
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(bar, Style::default().fg(strength_color(strength))),
                Span::styled(
                    format!(" {}", strength_label(strength)),
                    Style::default().fg(COLOR_DIM),
                ),
            ])),
            rows[3],
        );
    }

    frame.render_widget(
        InputBoxWidget::new(&view.confirm, " Confirm password ", view.focus == 3),
        rows[4],
    );

    let checkbox_focused = view.focus == SignupView::FIELDS - 1;
    let mark = if view.agree_terms { "[x]" } else { "[ ]" };
    let style = if checkbox_focused {
        Style::default()
            .fg(COLOR_ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("{} I agree to the Terms of Service", mark),
            style,
        )),
        rows[5],
    );

    if view.submitting {
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(spinner(app.tick_count), Style::default().fg(COLOR_ACCENT)),
                Span::raw(" Creating account..."),
            ])),
            rows[6],
        );
    }
}
