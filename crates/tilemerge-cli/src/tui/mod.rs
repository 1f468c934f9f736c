//! Minimal frame-driven terminal runtime on top of ratatui.

pub use self::{app::App, runner::Tui};

mod app;
mod event;
mod event_loop;
mod runner;
