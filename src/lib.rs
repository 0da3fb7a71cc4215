//! A phone emulator for the terminal: lock screen, home grid, a few utility
//! apps and three mini games (Flappy Bird, Snake and 2048).
//!
//! Game rules live in [`engine`] and know nothing about rendering; the
//! [`games`] adapters wire them to keys and draw them with ratatui.

pub mod app;
pub mod apps;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod games;
pub mod logging;
pub mod tui;
pub mod ui;

pub use error::{Error, Result};
