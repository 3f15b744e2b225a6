//! Markdown to styled ratatui lines.
//!
//! Used for problem statements and AI review sections. Supports fenced code
//! blocks, inline code, bold, italic, headings, list items and links.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

pub const STYLE_CODE_BLOCK: Style = Style::new().fg(Color::Gray);

pub const STYLE_INLINE_CODE: Style = Style::new().fg(Color::Cyan);

pub const STYLE_HEADING: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

pub const STYLE_LINK: Style = Style::new()
    .fg(Color::Blue)
    .add_modifier(Modifier::UNDERLINED);

struct LineBuilder {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
}

impl LineBuilder {
    fn flush(&mut self) {
        if !self.spans.is_empty() {
            self.lines.push(Line::from(std::mem::take(&mut self.spans)));
        }
    }

    /// Flush and separate blocks with one blank line.
    fn end_block(&mut self) {
        self.flush();
        if self.lines.last().is_some_and(|l| l.width() > 0) {
            self.lines.push(Line::default());
        }
    }
}

/// Render markdown text. Each source line of a code block becomes one
/// `Line`; prose blocks are separated by a blank line. Never fails: broken
/// markup is rendered as text.
pub fn render_markdown(text: &str) -> Vec<Line<'static>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut out = LineBuilder {
        lines: Vec::new(),
        spans: Vec::new(),
    };
    let mut style_stack: Vec<Style> = vec![Style::default()];
    let mut in_code_block = false;
    let mut list_depth = 0usize;
    // Numbered lists carry their next index; bullets carry None.
    let mut list_numbers: Vec<Option<u64>> = Vec::new();

    let current = |stack: &Vec<Style>| stack.last().copied().unwrap_or_default();

    for event in Parser::new_ext(text, options) {
        match event {
            Event::Start(tag) => match tag {
                Tag::CodeBlock(_) => {
                    out.end_block();
                    in_code_block = true;
                    style_stack.push(STYLE_CODE_BLOCK);
                }
                Tag::Heading { .. } => {
                    out.end_block();
                    style_stack.push(STYLE_HEADING);
                }
                Tag::Strong => style_stack.push(current(&style_stack).add_modifier(Modifier::BOLD)),
                Tag::Emphasis => {
                    style_stack.push(current(&style_stack).add_modifier(Modifier::ITALIC))
                }
                Tag::Strikethrough => {
                    style_stack.push(current(&style_stack).add_modifier(Modifier::CROSSED_OUT))
                }
                Tag::Link { .. } => style_stack.push(current(&style_stack).patch(STYLE_LINK)),
                Tag::List(start) => {
                    if list_depth == 0 {
                        out.end_block();
                    } else {
                        out.flush();
                    }
                    list_depth += 1;
                    list_numbers.push(start);
                }
                Tag::Item => {
                    out.flush();
                    let indent = "  ".repeat(list_depth.saturating_sub(1));
                    let marker = match list_numbers.last_mut() {
                        Some(Some(n)) => {
                            let marker = format!("{}{}. ", indent, n);
                            *n += 1;
                            marker
                        }
                        _ => format!("{}• ", indent),
                    };
                    out.spans.push(Span::raw(marker));
                }
                _ => {}
            },
            Event::End(tag_end) => match tag_end {
                TagEnd::CodeBlock => {
                    out.end_block();
                    in_code_block = false;
                    style_stack.pop();
                }
                TagEnd::Heading(_) => {
                    out.end_block();
                    style_stack.pop();
                }
                TagEnd::Strong | TagEnd::Emphasis | TagEnd::Strikethrough | TagEnd::Link => {
                    style_stack.pop();
                }
                TagEnd::Paragraph => {
                    if list_depth > 0 {
                        out.flush();
                    } else {
                        out.end_block();
                    }
                }
                TagEnd::Item => out.flush(),
                TagEnd::List(_) => {
                    list_depth = list_depth.saturating_sub(1);
                    list_numbers.pop();
                    if list_depth == 0 {
                        out.end_block();
                    }
                }
                _ => {}
            },
            Event::Text(content) => {
                let style = current(&style_stack);
                if in_code_block {
                    let mut parts = content.split('\n').peekable();
                    while let Some(part) = parts.next() {
                        if !part.is_empty() {
                            out.spans.push(Span::styled(format!("  {}", part), style));
                        }
                        // The block's trailing newline must not add an empty line.
                        if parts.peek().is_some() {
                            if out.spans.is_empty() {
                                out.lines.push(Line::default());
                            } else {
                                out.flush();
                            }
                        }
                    }
                } else {
                    out.spans.push(Span::styled(content.to_string(), style));
                }
            }
            Event::Code(code) => out.spans.push(Span::styled(code.to_string(), STYLE_INLINE_CODE)),
            Event::SoftBreak => out.spans.push(Span::raw(" ")),
            Event::HardBreak => out.flush(),
            Event::Rule => {
                out.end_block();
                out.lines.push(Line::styled("─".repeat(20), STYLE_CODE_BLOCK));
            }
            _ => {}
        }
    }
    out.flush();

    while out.lines.last().is_some_and(|l| l.width() == 0) {
        out.lines.pop();
    }
    out.lines
}
