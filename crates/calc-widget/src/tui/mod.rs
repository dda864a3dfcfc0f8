//! Terminal front end (ratatui + crossterm)

mod app;
mod input;
mod keypad;
mod ui;

pub use app::CalculatorApp;
pub use input::{InputHandler, KeyAction};
pub use keypad::KeypadWidget;
pub use ui::{layout, render, CalculatorUI, UiLayout};

use ratatui::style::Color;

use crate::appearance::Rgb;

/// Converts a palette colour to a terminal colour
#[must_use]
pub fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}
