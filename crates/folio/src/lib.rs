#![forbid(unsafe_code)]

//! Terminal portfolio console.
//!
//! - [`app`]: the model; input routing, page content, assistant panel
//! - [`render`]: crossterm drawing of [`app::Screen`]
//! - [`cli`]: flags and `FOLIO_*` environment overrides
//! - [`logging`]: log file subscriber
//! - [`opener`]: external link launcher

pub mod app;
pub mod cli;
pub mod logging;
pub mod opener;
pub mod render;
