//! TUI screen implementations.

pub mod sector_form;

pub use sector_form::{Focus, SectorFormState, draw_sector_form};
