//! wasm-bindgen entry points
//!
//! The JS host owns the real DOM. It forwards clicks and key names here and
//! reads back display text, the expression trail, the tape and particle
//! positions on every animation frame.

use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::appearance::{SizePreset, Theme};
use crate::command::Command;
use crate::config::WidgetConfig;
use crate::core::Calculation;
use crate::keypad::Keypad;
use crate::particles::Bounds;
use crate::widget::{CalculatorWidget, WidgetAction};

use super::page::{SIZE_TOGGLE_ID, THEME_TOGGLE_ID};

/// Browser calculator
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    widget: CalculatorWidget,
    keypad: Keypad,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Creates a calculator sized to the viewport
    ///
    /// `seed` drives the particle layout; pass `Math.random() * 2**32` for
    /// variety between page loads.
    #[wasm_bindgen(constructor)]
    pub fn new(is_dark_mode: bool, width: f64, height: f64, seed: u32) -> Self {
        console_error_panic_hook::set_once();

        let config = WidgetConfig::default()
            .with_theme(Theme::from_dark_mode(is_dark_mode))
            .with_seed(u64::from(seed));
        Self {
            widget: CalculatorWidget::from_config(&config, Bounds::new(width, height)),
            keypad: Keypad::new(),
        }
    }

    /// Handles a click on an element id; returns true if it did anything
    pub fn click(&mut self, element_id: &str) -> bool {
        let action = match element_id {
            THEME_TOGGLE_ID => WidgetAction::ToggleTheme,
            SIZE_TOGGLE_ID => WidgetAction::CycleSize,
            id => match self.keypad.find_by_id(id) {
                Some(button) => WidgetAction::Calculator(button.command),
                None => return false,
            },
        };
        let calculation = self.widget.handle(action);
        log_failure(calculation.as_ref());
        true
    }

    /// Handles a `KeyboardEvent.key`; returns true if the key was mapped
    ///
    /// The host calls `preventDefault()` when this returns true.
    pub fn key_down(&mut self, key: &str) -> bool {
        let Some(command) = Command::from_key(key) else {
            return false;
        };
        let calculation = self.widget.handle(command.into());
        log_failure(calculation.as_ref());
        true
    }

    /// Formatted main display
    #[wasm_bindgen(getter)]
    pub fn display(&self) -> String {
        self.widget.formatted_display()
    }

    /// Expression trail
    #[wasm_bindgen(getter)]
    pub fn expression(&self) -> String {
        self.widget.expression()
    }

    /// `"dark"` or `"light"`
    #[wasm_bindgen(getter)]
    pub fn theme(&self) -> String {
        self.widget.theme().as_str().to_string()
    }

    /// `"compact"`, `"normal"` or `"large"`
    #[wasm_bindgen(getter)]
    pub fn size(&self) -> String {
        self.widget.size().as_str().to_string()
    }

    /// Applies the host's dark-mode flag
    pub fn set_dark_mode(&mut self, is_dark: bool) {
        self.widget.set_theme(Theme::from_dark_mode(is_dark));
    }

    /// Sets the size preset by name; unknown names are ignored
    pub fn set_size(&mut self, name: &str) -> bool {
        match name.parse::<SizePreset>() {
            Ok(size) => {
                self.widget.set_size(size);
                true
            }
            Err(_) => false,
        }
    }

    /// Engine state as JSON
    pub fn state_json(&self) -> String {
        serde_json::to_string(&self.widget.state()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Tape as JSON
    pub fn history_json(&self) -> String {
        self.widget
            .history()
            .to_json()
            .unwrap_or_else(|_| "[]".to_string())
    }

    /// Tape as text, one `equation = result` line per entry, oldest first
    pub fn history_text(&self) -> String {
        self.widget.history().export_formatted()
    }

    /// Clears the tape
    pub fn clear_history(&mut self) {
        self.widget.clear_history();
    }

    /// Particle positions as JSON
    pub fn particles_json(&self) -> String {
        self.widget
            .particles()
            .to_json()
            .unwrap_or_else(|_| "[]".to_string())
    }

    /// Advances one animation frame
    pub fn tick(&mut self) {
        self.widget.tick();
    }

    /// Viewport resize
    pub fn resize(&mut self, width: f64, height: f64) {
        self.widget.resize(Bounds::new(width, height));
    }

    /// Stops the animation; call when the widget unmounts
    pub fn teardown(&mut self) {
        self.widget.teardown();
    }
}

fn log_failure(calculation: Option<&Calculation>) {
    if let Some(Calculation {
        equation,
        result: Err(e),
    }) = calculation
    {
        console::warn_1(&format!("{} failed: {e}", equation.equation()).into());
    }
}

/// Initialize the module in the browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::log_1(&"calc-widget initialized".into());
}
