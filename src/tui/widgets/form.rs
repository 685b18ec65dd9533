//! Drawing helpers for the form's inputs: text field, checkbox, button and
//! the error line shown beneath an input.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Presentation state shared by every input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputView<'a> {
    pub label: &'a str,
    pub focused: bool,
    pub disabled: bool,
    pub error: Option<&'a str>,
}

impl InputView<'_> {
    /// Border/accent color: red on error, yellow when focused, gray otherwise.
    pub fn accent(&self) -> Color {
        if self.error.is_some() {
            Color::Red
        } else if self.disabled {
            Color::DarkGray
        } else if self.focused {
            Color::Yellow
        } else {
            Color::Gray
        }
    }

    /// A bordered block titled with the label.
    pub fn block(&self) -> Block<'_> {
        Block::default()
            .title(format!("{} *", self.label))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.accent()))
    }
}

/// Renders a single-line text input in a bordered box.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_text_field(view: InputView<'_>, value: &str, frame: &mut Frame, area: Rect) {
    let mut spans = vec![Span::raw(value.to_string())];
    if view.focused && !view.disabled {
        spans.push(Span::styled(
            "\u{2588}",
            Style::default().add_modifier(Modifier::SLOW_BLINK),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).block(view.block()), area);
}

/// Renders `[x] label` / `[ ] label` on one line.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_checkbox(view: InputView<'_>, checked: bool, frame: &mut Frame, area: Rect) {
    let mark = if checked { "[x]" } else { "[ ]" };
    let mut style = Style::default().fg(view.accent());
    if view.focused && !view.disabled {
        style = style.add_modifier(Modifier::BOLD);
    }
    let line = Line::from(Span::styled(format!("{mark} {} *", view.label), style));
    frame.render_widget(Paragraph::new(line), area);
}

/// Renders the submit button as `< label >`.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_button(label: &str, focused: bool, disabled: bool, frame: &mut Frame, area: Rect) {
    let style = if disabled {
        Style::default().fg(Color::DarkGray)
    } else if focused {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else {
        Style::default().fg(Color::Cyan)
    };
    frame.render_widget(
        Paragraph::new(Span::styled(format!("< {label} >"), style)),
        area,
    );
}

/// Renders a field's error message, if any, in red.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_field_error(error: Option<&str>, frame: &mut Frame, area: Rect) {
    if let Some(err) = error {
        let line = Paragraph::new(Span::styled(
            format!("  {err}"),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(line, area);
    }
}
