//! Form state machine: initial load, local validation, and the save flow.

mod controller;
mod phase;

pub use controller::{
    DEFAULT_SUCCESS_DELAY, FIX_ERRORS_MESSAGE, FormController, LOAD_FALLBACK_MESSAGE,
    SAVED_MESSAGE, SUBMIT_FALLBACK_MESSAGE, SavePlan,
};
pub use phase::{Feedback, Phase, SuccessNotice};
