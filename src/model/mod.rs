mod sector;
mod submission;
mod validation;

pub use sector::{Sector, SectorRef};
pub use submission::Submission;
pub use validation::{
    Field, FieldErrors, FieldValidationError, FormValues, NAME_REQUIRED, SECTORS_REQUIRED,
    TERMS_REQUIRED, validate,
};
