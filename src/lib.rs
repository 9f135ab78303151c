//! CHIP-8 emulator configurator
//!
//! The configuration schema, its INI persistence and the settings window.

pub mod app;
pub mod config;
pub mod constant;
pub mod ini;
pub mod schema;
pub mod style;
pub mod ui;
