use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::layout::{Constraint, Layout};
use ratatui::{Frame, Terminal};
use tokio::runtime::{Builder, Runtime};

use crate::api::SubmissionApi;
use crate::form::{FormController, SavePlan};
use crate::storage::SubmissionStore;

use super::action::{Action, ScreenState};
use super::error::AppError;
use super::screens::{SectorFormState, draw_sector_form};
use super::widgets::{StatusBarContext, draw_status_bar};

/// How long to wait for a key before redrawing, so that expiring messages
/// disappear without input.
const TICK: Duration = Duration::from_millis(250);

/// Where key events come from. The terminal in production, a queue in tests.
pub trait EventSource {
    /// Waits up to `timeout` for an event; `true` if one is ready.
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;

    /// Reads the next event, blocking until one arrives.
    fn read(&mut self) -> io::Result<Event>;
}

/// [`EventSource`] backed by crossterm's global input queue.
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        event::poll(timeout)
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn read(&mut self) -> io::Result<Event> {
        event::read()
    }
}

/// Top-level application state.
///
/// Owns the single-threaded runtime that network calls run on. Work that
/// needs the network is queued by key handling and carried out after the
/// next draw, so the loading indicator and "Saving..." label are visible
/// while a request is in flight.
pub struct App {
    runtime: Runtime,
    api: Box<dyn SubmissionApi>,
    store: SubmissionStore,
    state: SectorFormState,
    api_label: String,
    pending_save: Option<SavePlan>,
    should_quit: bool,
}

impl App {
    /// Creates an `App` that will load its data on the first pass of the
    /// event loop.
    pub fn new(
        api: Box<dyn SubmissionApi>,
        data_dir: impl Into<PathBuf>,
        success_delay: Duration,
        api_label: impl Into<String>,
    ) -> Result<Self, AppError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let store = SubmissionStore::with_path(data_dir)?;
        Ok(Self {
            runtime,
            api,
            store,
            state: SectorFormState::new(FormController::new(success_delay)),
            api_label: api_label.into(),
            pending_save: None,
            should_quit: false,
        })
    }

    /// Main event loop: expire notices → draw → run pending work or read a key.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut events = TerminalEvents;
        while !self.should_quit {
            self.state.controller_mut().tick(Instant::now());
            terminal.draw(|frame| self.draw(frame))?;
            self.step(&mut events)?;
        }
        Ok(())
    }

    /// One pass after a draw: run pending work, or wait briefly for a key.
    ///
    /// Keys that arrive while a load or save blocks this thread were typed
    /// against a disabled form, so they are discarded rather than replayed
    /// once the form is ready again.
    pub fn step(&mut self, events: &mut impl EventSource) -> io::Result<()> {
        if self.process_pending() {
            let mut discarded = 0usize;
            while events.poll(Duration::ZERO)? {
                events.read()?;
                discarded += 1;
            }
            if discarded > 0 {
                tracing::debug!(discarded, "dropped input received while busy");
            }
            return Ok(());
        }
        if events.poll(TICK)?
            && let Event::Key(key) = events.read()?
        {
            self.handle_key(key);
        }
        Ok(())
    }

    /// Renders the form above a one-line status bar.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let [main_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());
        draw_sector_form(&self.state, frame, main_area);
        draw_status_bar(&self.status_context(), frame, status_area);
    }

    fn status_context(&self) -> StatusBarContext {
        StatusBarContext {
            api_url: self.api_label.clone(),
            submission_id: self.state.controller().submission_id(),
        }
    }

    /// Runs the initial load or a queued save to completion.
    ///
    /// Returns `true` if any work was done.
    pub fn process_pending(&mut self) -> bool {
        if self.state.controller().is_loading() {
            self.runtime.block_on(
                self.state
                    .controller_mut()
                    .load(self.api.as_ref(), &self.store),
            );
            return true;
        }

        if let Some(plan) = self.pending_save.take() {
            let result = self
                .runtime
                .block_on(self.api.save_submission(&plan.body, plan.existing_id));
            self.state
                .controller_mut()
                .finish_submit(result, &self.store, Instant::now());
            return true;
        }

        false
    }

    /// Handles a key press; release and repeat events are ignored.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.state.handle_key(key) {
            Action::None => {}
            Action::Submit => {
                self.pending_save = self.state.controller_mut().begin_submit();
            }
            Action::Quit => self.should_quit = true,
        }
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the screen state.
    pub fn state(&self) -> &SectorFormState {
        &self.state
    }

    /// Returns the durable store.
    pub fn store(&self) -> &SubmissionStore {
        &self.store
    }
}
