use std::time::{Duration, Instant};

use futures::future::join;

use super::phase::{Feedback, Phase, SuccessNotice};
use crate::api::{ApiError, SubmissionApi};
use crate::model::{FieldValidationError, FormValues, Sector, Submission, validate};
use crate::storage::SubmissionStore;

pub const FIX_ERRORS_MESSAGE: &str = "Please fix the highlighted errors and try again.";
pub const SAVED_MESSAGE: &str = "Your data has been saved successfully!";
pub const SUBMIT_FALLBACK_MESSAGE: &str = "An unexpected error occurred during submission.";
pub const LOAD_FALLBACK_MESSAGE: &str =
    "Failed to load initial data (sectors or saved submission). Please check your connection.";

/// How long a success message stays visible unless configured otherwise.
pub const DEFAULT_SUCCESS_DELAY: Duration = Duration::from_secs(5);

/// A validated save that is ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavePlan {
    pub body: Submission,
    /// `None` creates a new submission, `Some` replaces that one.
    pub existing_id: Option<i64>,
}

/// Owns all form state and drives the load and submit flows.
#[derive(Debug, Clone)]
pub struct FormController {
    sectors: Vec<Sector>,
    values: FormValues,
    submission_id: Option<i64>,
    phase: Phase,
    success_delay: Duration,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new(DEFAULT_SUCCESS_DELAY)
    }
}

impl FormController {
    /// Creates a controller in [`Phase::Loading`] with empty values.
    pub fn new(success_delay: Duration) -> Self {
        Self {
            sectors: Vec::new(),
            values: FormValues::default(),
            submission_id: None,
            phase: Phase::Loading,
            success_delay,
        }
    }

    /// Fetches sectors and, if an id is remembered, the saved submission.
    ///
    /// Both requests run concurrently. Any failure becomes the general error
    /// and the form still ends up [`Phase::Ready`], possibly without sectors
    /// or prior values. A remembered id stays active even if fetching it
    /// fails, so the next save replaces it.
    pub async fn load(&mut self, api: &dyn SubmissionApi, store: &SubmissionStore) {
        self.phase = Phase::Loading;
        let mut general_error: Option<String> = None;

        let remembered = store.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not read remembered submission id");
            general_error = Some(e.to_string());
            None
        });
        self.submission_id = remembered;

        let submission = async {
            match remembered {
                Some(id) => Some(api.get_submission(id).await),
                None => None,
            }
        };
        let (sectors, submission) = join(api.list_sectors(), submission).await;

        match sectors {
            Ok(sectors) => {
                tracing::info!(count = sectors.len(), "sectors loaded");
                self.sectors = sectors;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load sectors");
                general_error.get_or_insert_with(|| load_message(&e));
            }
        }

        match submission {
            Some(Ok(saved)) => {
                tracing::info!(id = ?remembered, "restored saved submission");
                self.values = FormValues::from_submission(&saved);
            }
            Some(Err(e)) => {
                tracing::warn!(id = ?remembered, error = %e, "failed to load saved submission");
                general_error.get_or_insert_with(|| load_message(&e));
            }
            None => {}
        }

        self.phase = Phase::Ready(Feedback {
            general_error,
            ..Feedback::default()
        });
    }

    /// Validates the current values and, if they pass, enters
    /// [`Phase::Submitting`] and returns what to send.
    ///
    /// Returns `None` without touching the network state when the form is not
    /// ready or validation fails; in the latter case the field errors are
    /// shown.
    pub fn begin_submit(&mut self) -> Option<SavePlan> {
        if !self.phase.is_ready() {
            return None;
        }

        match validate(&self.values) {
            Err(FieldValidationError(field_errors)) => {
                tracing::debug!(count = field_errors.len(), "local validation failed");
                self.phase = Phase::Ready(Feedback {
                    field_errors,
                    general_error: Some(FIX_ERRORS_MESSAGE.into()),
                    success: None,
                });
                None
            }
            Ok(body) => {
                self.phase = Phase::Submitting;
                Some(SavePlan {
                    body,
                    existing_id: self.submission_id,
                })
            }
        }
    }

    /// Applies the outcome of a save and returns to [`Phase::Ready`].
    ///
    /// On success the server's echoed values replace the local ones and the
    /// returned id is remembered in `store`. A failure to remember is logged
    /// but does not turn the save into an error.
    pub fn finish_submit(
        &mut self,
        result: Result<Submission, ApiError>,
        store: &SubmissionStore,
        now: Instant,
    ) {
        let feedback = match result {
            Ok(saved) => {
                let id = saved.id.or(self.submission_id);
                if let Some(id) = id
                    && let Err(e) = store.remember(id)
                {
                    tracing::warn!(id, error = %e, "could not remember submission id");
                }
                self.submission_id = id;
                self.values = FormValues::from_submission(&saved);
                Feedback {
                    success: Some(SuccessNotice {
                        message: SAVED_MESSAGE.into(),
                        expires_at: now.checked_add(self.success_delay),
                    }),
                    ..Feedback::default()
                }
            }
            Err(ApiError::Validation { fields }) => Feedback {
                field_errors: fields,
                general_error: Some(FIX_ERRORS_MESSAGE.into()),
                success: None,
            },
            Err(e) => {
                let message = e.to_string();
                if message.trim().is_empty() {
                    Feedback::general(SUBMIT_FALLBACK_MESSAGE)
                } else {
                    Feedback::general(message)
                }
            }
        };
        self.phase = Phase::Ready(feedback);
    }

    /// Runs a full submit: validate, save through `api`, apply the result.
    pub async fn submit(&mut self, api: &dyn SubmissionApi, store: &SubmissionStore, now: Instant) {
        let Some(plan) = self.begin_submit() else {
            return;
        };
        let result = api.save_submission(&plan.body, plan.existing_id).await;
        self.finish_submit(result, store, now);
    }

    /// Clears the success message once its delay has elapsed.
    ///
    /// Returns `true` if anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Phase::Ready(feedback) = &mut self.phase
            && feedback.success.as_ref().is_some_and(|s| s.is_expired(now))
        {
            feedback.success = None;
            return true;
        }
        false
    }

    // --- Editing; ignored unless ready ---

    pub fn set_name(&mut self, name: impl Into<String>) -> bool {
        self.edit(|values| values.name = name.into())
    }

    pub fn push_name_char(&mut self, ch: char) -> bool {
        self.edit(|values| values.name.push(ch))
    }

    pub fn pop_name_char(&mut self) -> bool {
        self.edit(|values| {
            values.name.pop();
        })
    }

    /// Selects `id` if unselected, otherwise deselects it.
    pub fn toggle_sector(&mut self, id: i64) -> bool {
        self.edit(|values| {
            if !values.selected.remove(&id) {
                values.selected.insert(id);
            }
        })
    }

    pub fn toggle_terms(&mut self) -> bool {
        self.edit(|values| values.agree_to_terms = !values.agree_to_terms)
    }

    fn edit(&mut self, f: impl FnOnce(&mut FormValues)) -> bool {
        if self.is_disabled() {
            return false;
        }
        f(&mut self.values);
        true
    }

    // --- Accessors ---

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Returns the feedback when ready.
    pub fn feedback(&self) -> Option<&Feedback> {
        self.phase.feedback()
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// The id that the next save will replace, if any.
    pub fn submission_id(&self) -> Option<i64> {
        self.submission_id
    }

    /// All controls are disabled while loading or saving.
    pub fn is_disabled(&self) -> bool {
        !self.phase.is_ready()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    pub fn submit_label(&self) -> &'static str {
        match self.phase {
            Phase::Submitting => "Saving...",
            _ => "Save",
        }
    }
}

fn load_message(err: &ApiError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        LOAD_FALLBACK_MESSAGE.into()
    } else {
        message
    }
}
