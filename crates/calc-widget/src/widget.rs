//! The composed calculator widget
//!
//! Owns the engine plus the cosmetic state (theme, size, particles) and the
//! tape history. Front ends send [`WidgetAction`]s and read state back; they
//! never touch the engine directly.

use tracing::info;

use crate::appearance::{Palette, SizePreset, Theme};
use crate::command::Command;
use crate::config::WidgetConfig;
use crate::core::history::History;
use crate::core::{Calculation, CalculatorState, ExpressionEngine};
use crate::particles::{Bounds, ParticleField};

/// Anything a user can do to the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetAction {
    /// An engine transition
    Calculator(Command),
    /// Flip dark/light
    ToggleTheme,
    /// Advance to the next size preset
    CycleSize,
}

impl From<Command> for WidgetAction {
    fn from(command: Command) -> Self {
        Self::Calculator(command)
    }
}

/// Calculator widget
#[derive(Debug, Clone)]
pub struct CalculatorWidget {
    engine: ExpressionEngine,
    theme: Theme,
    size: SizePreset,
    particles: ParticleField,
    history: History,
}

impl Default for CalculatorWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorWidget {
    /// Creates a widget with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&WidgetConfig::default(), Bounds::default())
    }

    /// Creates a widget from a configuration and the initial drawing area
    ///
    /// A missing particle seed falls back to 0; hosts that want variety pass
    /// one in through the config.
    #[must_use]
    pub fn from_config(config: &WidgetConfig, bounds: Bounds) -> Self {
        let particles = if config.particles.enabled {
            ParticleField::new(
                config.particles.count,
                bounds,
                config.particles.seed.unwrap_or_default(),
            )
        } else {
            ParticleField::disabled()
        };

        Self {
            engine: ExpressionEngine::new(),
            theme: config.theme,
            size: config.size,
            particles,
            history: History::with_capacity(config.history_capacity),
        }
    }

    /// Applies an action
    ///
    /// Returns the calculation when the action was an `equals` that
    /// evaluated. Successful results are appended to the tape.
    pub fn handle(&mut self, action: WidgetAction) -> Option<Calculation> {
        match action {
            WidgetAction::Calculator(command) => {
                let calculation = command.apply(&mut self.engine)?;
                if let Ok(result) = calculation.result {
                    self.history.record(&calculation.equation, result);
                }
                Some(calculation)
            }
            WidgetAction::ToggleTheme => {
                self.set_theme(self.theme.toggle());
                None
            }
            WidgetAction::CycleSize => {
                self.size = self.size.next();
                info!(size = %self.size, "size changed");
                None
            }
        }
    }

    /// Maps a browser-style key name and applies it; unmapped keys are ignored
    pub fn handle_key(&mut self, key: &str) -> Option<Calculation> {
        Command::from_key(key).and_then(|command| self.handle(command.into()))
    }

    /// Sets the theme from outside (the external dark-mode flag)
    pub fn set_theme(&mut self, theme: Theme) {
        if theme != self.theme {
            info!(theme = %theme, "theme changed");
        }
        self.theme = theme;
    }

    /// Sets the size preset from outside
    pub fn set_size(&mut self, size: SizePreset) {
        self.size = size;
    }

    /// Advances the particle animation one frame
    pub fn tick(&mut self) {
        self.particles.tick();
    }

    /// Updates the particle drawing area
    pub fn resize(&mut self, bounds: Bounds) {
        self.particles.resize(bounds);
    }

    /// Stops the particle animation
    pub fn teardown(&mut self) {
        self.particles.halt();
    }

    /// The engine
    #[must_use]
    pub fn engine(&self) -> &ExpressionEngine {
        &self.engine
    }

    /// Engine snapshot
    #[must_use]
    pub fn state(&self) -> CalculatorState {
        self.engine.state()
    }

    /// Display text with thousands grouping
    #[must_use]
    pub fn formatted_display(&self) -> String {
        self.engine.formatted_display()
    }

    /// Expression trail
    #[must_use]
    pub fn expression(&self) -> String {
        self.engine.expression()
    }

    /// Current theme
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Colours of the current theme
    #[must_use]
    pub fn palette(&self) -> &'static Palette {
        self.theme.palette()
    }

    /// Current size preset
    #[must_use]
    pub fn size(&self) -> SizePreset {
        self.size
    }

    /// Particle field
    #[must_use]
    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    /// Tape history
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Clears the tape history (the engine is untouched)
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
