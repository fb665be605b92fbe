//! Shared UI crate for Startnow: life statistics, the PNG snapshot renderer
//! and the studio view used by both launchers.

pub mod config;
pub mod core;
pub mod i18n;
pub mod render;
pub mod share;
pub mod views;

pub use config::StudioConfig;
pub use views::Studio;
