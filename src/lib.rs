#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Terminal client for choosing sectors and saving a submission through a
//! REST backend.

pub mod api;
pub mod config;
pub mod form;
pub mod logging;
pub mod model;
pub mod storage;
pub mod tui;
