//! Sector form screen — name, multi-select sectors, terms checkbox, save.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::form::FormController;
use crate::model::Field;
use crate::tui::action::{Action, ScreenState};
use crate::tui::widgets::{
    InputView, SectorCursor, draw_button, draw_checkbox, draw_field_error, draw_sector_list,
    draw_text_field,
};

pub const LOADING_MESSAGE: &str = "Loading sectors and your saved data...";

/// Which control has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Name,
    Sectors,
    Terms,
    Save,
}

impl Focus {
    const ORDER: [Focus; 4] = [Focus::Name, Focus::Sectors, Focus::Terms, Focus::Save];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// Next control, wrapping around.
    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    /// Previous control, wrapping around.
    pub fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// State for the sector form screen.
#[derive(Debug, Clone, Default)]
pub struct SectorFormState {
    controller: FormController,
    focus: Focus,
    cursor: SectorCursor,
}

impl SectorFormState {
    /// Wraps a controller; focus starts on the name field.
    pub fn new(controller: FormController) -> Self {
        Self {
            controller,
            focus: Focus::default(),
            cursor: SectorCursor::default(),
        }
    }

    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut FormController {
        &mut self.controller
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn cursor(&self) -> SectorCursor {
        self.cursor
    }

    /// Id of the sector under the cursor.
    fn sector_under_cursor(&self) -> Option<i64> {
        let sectors = self.controller.sectors();
        self.cursor
            .index(sectors.len())
            .and_then(|i| sectors.get(i))
            .map(|s| s.id)
    }

    fn handle_sectors_key(&mut self, code: KeyCode) {
        let len = self.controller.sectors().len();
        match code {
            KeyCode::Up => self.cursor.up(len),
            KeyCode::Down => self.cursor.down(len),
            KeyCode::Home => self.cursor.first(),
            KeyCode::End => self.cursor.last(len),
            KeyCode::Char(' ') => {
                if let Some(id) = self.sector_under_cursor() {
                    self.controller.toggle_sector(id);
                }
            }
            _ => {}
        }
    }
}

impl ScreenState for SectorFormState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Action::Quit,
            KeyCode::Char('c') if ctrl => return Action::Quit,
            _ => {}
        }

        if self.controller.is_disabled() {
            return Action::None;
        }

        match key.code {
            KeyCode::Char('s') if ctrl => Action::Submit,
            KeyCode::Enter => Action::Submit,
            KeyCode::Tab => {
                self.focus = self.focus.next();
                Action::None
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                Action::None
            }
            code => {
                match (self.focus, code) {
                    (Focus::Name, KeyCode::Char(ch)) if !ctrl => {
                        self.controller.push_name_char(ch);
                    }
                    (Focus::Name, KeyCode::Backspace) => {
                        self.controller.pop_name_char();
                    }
                    (Focus::Sectors, code) => self.handle_sectors_key(code),
                    (Focus::Terms, KeyCode::Char(' ')) => {
                        self.controller.toggle_terms();
                    }
                    _ => {}
                }
                Action::None
            }
        }
    }
}

/// Renders the sector form screen.
#[mutants::skip]
pub fn draw_sector_form(state: &SectorFormState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Sector Form ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let form = state.controller();
    let feedback = form.feedback();
    let general_error = feedback.and_then(|f| f.general_error.as_deref());
    let success = feedback.and_then(|f| f.success.as_ref().map(|s| s.message.as_str()));

    let [general_area, success_area, body_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(inner);

    if let Some(err) = general_error {
        frame.render_widget(
            Paragraph::new(Span::styled(err, Style::default().fg(Color::Red))),
            general_area,
        );
    }
    if let Some(msg) = success {
        frame.render_widget(
            Paragraph::new(Span::styled(msg, Style::default().fg(Color::Green))),
            success_area,
        );
    }

    if form.is_loading() {
        let loading = Paragraph::new(vec![Line::from(""), Line::from(LOADING_MESSAGE)])
            .alignment(Alignment::Center);
        frame.render_widget(loading, body_area);
        return;
    }

    let [
        count_area,
        name_area,
        name_err_area,
        sectors_area,
        sectors_err_area,
        terms_area,
        terms_err_area,
        button_area,
        _spacer,
        footer_area,
    ] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(body_area);

    frame.render_widget(
        Paragraph::new(format!("Number of sectors loaded: {}", form.sectors().len())),
        count_area,
    );

    let disabled = form.is_disabled();
    let view = |label: &'static str, focus: Focus, field: Field| InputView {
        label,
        focused: state.focus() == focus,
        disabled,
        error: feedback.and_then(|f| f.field_error(field)),
    };

    let name_view = view("Name", Focus::Name, Field::Name);
    draw_text_field(name_view, &form.values().name, frame, name_area);
    draw_field_error(name_view.error, frame, name_err_area);

    let placeholder = if general_error.is_some() {
        "Failed to load sectors"
    } else {
        "No sectors available"
    };
    let sectors_view = view("Sectors", Focus::Sectors, Field::SelectedSectors);
    draw_sector_list(
        sectors_view,
        form.sectors(),
        &form.values().selected,
        state.cursor(),
        placeholder,
        frame,
        sectors_area,
    );
    draw_field_error(sectors_view.error, frame, sectors_err_area);

    let terms_view = view("Agree to Terms", Focus::Terms, Field::AgreeToTerms);
    draw_checkbox(terms_view, form.values().agree_to_terms, frame, terms_area);
    draw_field_error(terms_view.error, frame, terms_err_area);

    draw_button(
        form.submit_label(),
        state.focus() == Focus::Save,
        disabled,
        frame,
        button_area,
    );

    let footer = Paragraph::new(Line::from(
        "Tab/Shift+Tab: next/prev  Space: toggle  Enter/Ctrl+S: save  Esc: quit",
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
