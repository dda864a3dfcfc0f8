//! Calculator widget for the terminal and the browser
//!
//! An immediate-execution calculator (no precedence: `2 + 3 × 4` is `20`)
//! with a live expression trail, thousands grouping, dark/light themes,
//! three size presets and an animated particle background.
//!
//! - [`core`]: the expression engine and its pure helpers
//! - [`widget`]: engine + theme + size + particles + tape behind one entry point
//! - [`tui`]: ratatui front end (feature `tui`, default)
//! - [`web`]: mock-DOM page model; `wasm` adds wasm-bindgen bindings
//! - [`driver`]: one scenario suite, run against both front ends
//!
//! # Example
//!
//! ```rust
//! use calc_widget::prelude::*;
//!
//! let mut widget = CalculatorWidget::new();
//! for key in ["1", "2", "3", "4", "+", "6", "Enter"] {
//!     widget.handle_key(key);
//! }
//! assert_eq!(widget.formatted_display(), "1,240");
//! assert_eq!(widget.expression(), "1,234 + 6 =");
//!
//! // Errors show up as a display sentinel, never as a panic
//! let mut engine = ExpressionEngine::new();
//! for command in ["8", "/", "0", "="].iter().filter_map(|k| Command::from_key(k)) {
//!     command.apply(&mut engine);
//! }
//! assert_eq!(engine.formatted_display(), "Error");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod appearance;
pub mod command;
pub mod config;
pub mod core;
pub mod driver;
pub mod keypad;
pub mod particles;
pub mod widget;

#[cfg(feature = "tui")]
pub mod tui;

/// Web front end - always available for testing
/// (the mock DOM runs without a browser)
pub mod web;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::appearance::{SizePreset, Theme};
    pub use crate::command::Command;
    pub use crate::config::{ConfigError, WidgetConfig};
    pub use crate::core::history::{History, HistoryEntry};
    pub use crate::core::{
        BinaryOp, CalcError, CalcResult, Calculation, CalculatorState, DigitToken,
        ExpressionEngine, OperatorKey,
    };
    pub use crate::driver::{CalculatorDriver, HistoryItem, WebDriver};
    pub use crate::keypad::{ButtonKind, Keypad, KeypadButton};
    pub use crate::particles::{Bounds, ParticleField};
    pub use crate::widget::{CalculatorWidget, WidgetAction};

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;

    pub use crate::web::{DomElement, DomEvent, MockDom, WebCalculator};
}
