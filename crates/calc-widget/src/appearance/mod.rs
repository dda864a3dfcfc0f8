//! Cosmetic state: colour theme and size preset
//!
//! Both are owned by the widget and read by the front ends. The engine never
//! sees them.

mod size;
mod theme;

pub use size::{SizeClasses, SizeMetrics, SizePreset};
pub use theme::{ButtonColors, Palette, Rgb, Theme};

use thiserror::Error;

/// Errors from parsing appearance names (CLI flags, config files)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppearanceError {
    /// Not `dark` or `light`
    #[error("unknown theme '{0}' (expected dark or light)")]
    UnknownTheme(String),
    /// Not `compact`, `normal` or `large`
    #[error("unknown size '{0}' (expected compact, normal or large)")]
    UnknownSize(String),
}
