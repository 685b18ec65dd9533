//! Status bar widget — one-line backend and submission context.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Data passed to the status bar widget.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBarContext {
    /// Base URL of the backend in use.
    pub api_url: String,
    /// The submission the next save will replace, if any.
    pub submission_id: Option<i64>,
}

/// Renders a one-line status bar.
///
/// Display format (left-aligned, Cyan):
/// - Existing submission: `http://localhost:8080/api  submission #42`
/// - Nothing saved yet:   `http://localhost:8080/api  new submission` (Green)
#[mutants::skip]
pub fn draw_status_bar(ctx: &StatusBarContext, frame: &mut Frame, area: Rect) {
    let cyan = Style::default().fg(Color::Cyan);
    let green = Style::default().fg(Color::Green);

    let mut spans: Vec<Span> = vec![Span::styled(ctx.api_url.clone(), cyan), Span::raw("  ")];
    match ctx.submission_id {
        Some(id) => spans.push(Span::styled(format!("submission #{id}"), cyan)),
        None => spans.push(Span::styled("new submission", green)),
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
