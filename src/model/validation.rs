use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use thiserror::Error;

use super::sector::SectorRef;
use super::submission::Submission;

pub const NAME_REQUIRED: &str = "Name is required";
pub const SECTORS_REQUIRED: &str = "At least one sector must be selected";
pub const TERMS_REQUIRED: &str = "You must agree to the terms";

/// An editable input of the sector form, ordered as displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    SelectedSectors,
    AgreeToTerms,
}

impl Field {
    /// All fields in display order.
    pub const ALL: [Field; 3] = [Field::Name, Field::SelectedSectors, Field::AgreeToTerms];

    /// The JSON key used for this field on the wire.
    pub fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::SelectedSectors => "selectedSectors",
            Self::AgreeToTerms => "agreeToTerms",
        }
    }

    /// Looks up a field by its JSON key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Validation messages keyed by field.
///
/// Produced both by local checks and by the backend, so the two sources can
/// be shown the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates errors in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl FromIterator<(Field, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (Field, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Local presence checks failed for one or more fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct FieldValidationError(pub FieldErrors);

/// Current values of the editable inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub name: String,
    pub selected: BTreeSet<i64>,
    pub agree_to_terms: bool,
}

impl FormValues {
    /// Copies the editable values out of a persisted submission.
    pub fn from_submission(submission: &Submission) -> Self {
        Self {
            name: submission.name.clone(),
            selected: submission.sector_ids(),
            agree_to_terms: submission.agree_to_terms,
        }
    }
}

/// Runs all presence checks and builds the request body when they pass.
///
/// Every check is evaluated regardless of earlier failures so all errors are
/// reported at once.
pub fn validate(values: &FormValues) -> Result<Submission, FieldValidationError> {
    let mut errors = FieldErrors::new();
    if values.name.trim().is_empty() {
        errors.insert(Field::Name, NAME_REQUIRED);
    }
    if values.selected.is_empty() {
        errors.insert(Field::SelectedSectors, SECTORS_REQUIRED);
    }
    if !values.agree_to_terms {
        errors.insert(Field::AgreeToTerms, TERMS_REQUIRED);
    }

    if !errors.is_empty() {
        return Err(FieldValidationError(errors));
    }

    Ok(Submission {
        id: None,
        name: values.name.clone(),
        selected_sectors: values.selected.iter().map(|&id| SectorRef { id }).collect(),
        agree_to_terms: values.agree_to_terms,
    })
}
