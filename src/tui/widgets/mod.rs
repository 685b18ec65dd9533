//! Reusable TUI widgets.

pub mod form;
pub mod sector_list;
pub mod status_bar;

pub use form::{InputView, draw_button, draw_checkbox, draw_field_error, draw_text_field};
pub use sector_list::{SectorCursor, draw_sector_list, sector_row};
pub use status_bar::{StatusBarContext, draw_status_bar};
