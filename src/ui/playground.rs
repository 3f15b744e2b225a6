//! Free-form editor with stdin, output, import prompt and saved snippets.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::components::{render_dialog_frame, render_empty, DialogFrameConfig};
use super::helpers::spinner;
use super::layout::LayoutContext;
use super::review::run_output_lines;
use super::theme::{COLOR_BORDER, COLOR_SELECTED_BG};
use crate::app::{App, Pane};
use crate::widgets::{EditorWidget, InputBoxWidget};

pub fn render_playground(frame: &mut Frame, area: Rect, app: &App, ctx: &LayoutContext) {
    let view = &app.playground;
    let cols = if ctx.should_stack_panels() {
        Layout::vertical([Constraint::Percentage(60), Constraint::Percentage(40)]).split(area)
    } else {
        Layout::horizontal([Constraint::Percentage(62), Constraint::Percentage(38)]).split(area)
    };

    frame.render_widget(
        EditorWidget::new(&view.editor, "Playground", view.pane == Pane::Editor),
        cols[0],
    );

    let side = Layout::vertical([Constraint::Percentage(40), Constraint::Percentage(60)]).split(cols[1]);
    frame.render_widget(
        EditorWidget::new(&view.input, "stdin", view.pane == Pane::Input),
        side[0],
    );

    let output = if view.running {
        vec![Line::from(format!("{} Running...", spinner(app.tick_count)))]
    } else {
        view.output.as_ref().map(run_output_lines).unwrap_or_default()
    };
    frame.render_widget(
        Paragraph::new(output).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_BORDER))
                .title(" Output "),
        ),
        side[1],
    );

    if let Some(prompt) = &view.import_prompt {
        let inner = render_dialog_frame(frame, area, ctx, &DialogFrameConfig::new("Import file", 3));
        frame.render_widget(InputBoxWidget::new(prompt, " Path ", true), inner);
    }

    if view.show_snippets {
        let height = (app.snippets.len() as u16).clamp(1, 12);
        let inner = render_dialog_frame(
            frame,
            area,
            ctx,
            &DialogFrameConfig::new("Saved snippets", height),
        );
        if app.snippets.is_empty() {
            render_empty(frame, inner, "No saved snippets. Press w to save one.");
        } else {
            let items: Vec<ListItem> = app
                .snippets
                .iter()
                .map(|s| ListItem::new(format!("{} ({} lines)", s.name, s.code.lines().count())))
                .collect();
            let mut state = ListState::default().with_selected(Some(view.snippet_cursor));
            frame.render_stateful_widget(
                List::new(items).highlight_style(Style::default().bg(COLOR_SELECTED_BG)),
                inner,
                &mut state,
            );
        }
    }
}
