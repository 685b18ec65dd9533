//! Multi-select sector list with a movable cursor.

use std::collections::BTreeSet;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use super::form::InputView;
use crate::model::Sector;

/// Cursor position within the sector list.
///
/// The list can change length after the cursor was placed (sectors arrive
/// after the first draw), so every read clamps against the current length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectorCursor {
    index: usize,
}

impl SectorCursor {
    /// Returns the cursor index clamped to `len`, or `None` for an empty list.
    pub fn index(&self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.index.min(len - 1))
    }

    /// Moves up one row (no wrap).
    pub fn up(&mut self, len: usize) {
        if let Some(i) = self.index(len) {
            self.index = i.saturating_sub(1);
        }
    }

    /// Moves down one row (no wrap).
    pub fn down(&mut self, len: usize) {
        if let Some(i) = self.index(len) {
            self.index = (i + 1).min(len - 1);
        }
    }

    pub fn first(&mut self) {
        self.index = 0;
    }

    pub fn last(&mut self, len: usize) {
        self.index = len.saturating_sub(1);
    }
}

/// Text shown for one sector: selection mark then the indented name.
pub fn sector_row(sector: &Sector, selected: bool) -> String {
    let mark = if selected { "[x]" } else { "[ ]" };
    format!("{mark} {}", sector.display_label())
}

/// Renders the sector list inside the input's bordered block.
///
/// With no sectors a single placeholder line is shown instead.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_sector_list(
    view: InputView<'_>,
    sectors: &[Sector],
    selected: &BTreeSet<i64>,
    cursor: SectorCursor,
    placeholder: &str,
    frame: &mut Frame,
    area: Rect,
) {
    let block = view.block();

    if sectors.is_empty() {
        let paragraph = Paragraph::new(Line::from(placeholder.to_string()))
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = sectors
        .iter()
        .map(|s| ListItem::new(sector_row(s, selected.contains(&s.id))))
        .collect();

    let highlight = if view.focused && !view.disabled {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else {
        Style::default().add_modifier(Modifier::UNDERLINED)
    };
    let list = List::new(items).block(block).highlight_style(highlight);

    let mut state = ListState::default().with_selected(cursor.index(sectors.len()));
    frame.render_stateful_widget(list, area, &mut state);
}
