//! Web page model
//!
//! [`WebCalculator`] owns a [`CalculatorWidget`] and the DOM that renders it.
//! Events come in as [`DomEvent`]s; after each one the DOM is re-synced from
//! widget state, so the DOM never holds state of its own.

use tracing::debug;

use super::dom::{DomElement, DomEvent, MockDom};
use crate::appearance::{Palette, SizePreset, Theme};
use crate::config::WidgetConfig;
use crate::core::Calculation;
use crate::keypad::{ButtonKind, Keypad, KeypadButton};
use crate::particles::{Bounds, Particle};
use crate::widget::{CalculatorWidget, WidgetAction};

/// Root container id
pub const ROOT_ID: &str = "calculator";
/// Expression trail id
pub const EXPRESSION_ID: &str = "expression-display";
/// Main display id
pub const DISPLAY_ID: &str = "calculator-display";
/// Theme toggle button id
pub const THEME_TOGGLE_ID: &str = "theme-toggle";
/// Size toggle button id
pub const SIZE_TOGGLE_ID: &str = "size-toggle";
/// Keypad grid id
pub const KEYPAD_ID: &str = "keypad";
/// Particle layer id
pub const PARTICLES_ID: &str = "particles";
/// Tape list id
pub const TAPE_ID: &str = "tape";

/// Default viewport used before the host reports a size
const DEFAULT_VIEWPORT: Bounds = Bounds {
    width: 1280.0,
    height: 720.0,
};

/// Calculator page backed by a mock DOM
#[derive(Debug)]
pub struct WebCalculator {
    widget: CalculatorWidget,
    keypad: Keypad,
    dom: MockDom,
}

impl Default for WebCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl WebCalculator {
    /// Creates a page with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&WidgetConfig::default(), DEFAULT_VIEWPORT)
    }

    /// Creates a page from a configuration and the viewport size
    #[must_use]
    pub fn from_config(config: &WidgetConfig, viewport: Bounds) -> Self {
        let mut page = Self {
            widget: CalculatorWidget::from_config(config, viewport),
            keypad: Keypad::new(),
            dom: MockDom::new(),
        };
        page.build_dom();
        page.sync_dom();
        page
    }

    /// The widget
    #[must_use]
    pub fn widget(&self) -> &CalculatorWidget {
        &self.widget
    }

    /// The DOM
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// The keypad layout
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Text of the main display
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.dom.get_element_text(DISPLAY_ID).unwrap_or_default()
    }

    /// Text of the expression trail
    #[must_use]
    pub fn expression_text(&self) -> &str {
        self.dom.get_element_text(EXPRESSION_ID).unwrap_or_default()
    }

    /// Handles a DOM event and re-syncs the page
    ///
    /// Returns the calculation when the event triggered an evaluation.
    pub fn dispatch(&mut self, event: DomEvent) -> Option<Calculation> {
        self.dom.record_event(event.clone());
        let calculation = match event {
            DomEvent::Click { element_id } => self.click_target(&element_id),
            // Ctrl combinations belong to the browser (copy, reload, ...)
            DomEvent::KeyDown { ctrl: true, .. } => None,
            DomEvent::KeyDown { key, .. } => self.widget.handle_key(&key),
            DomEvent::Resize { width, height } => {
                self.widget
                    .resize(Bounds::new(f64::from(width), f64::from(height)));
                None
            }
        };
        self.sync_dom();
        calculation
    }

    /// Clicks the element with `id`
    pub fn click(&mut self, id: &str) -> Option<Calculation> {
        self.dispatch(DomEvent::click(id))
    }

    /// Presses a key by its `KeyboardEvent.key` name
    pub fn key_down(&mut self, key: &str) -> Option<Calculation> {
        self.dispatch(DomEvent::key_down(key))
    }

    /// Applies the host's dark-mode flag
    pub fn set_dark_mode(&mut self, is_dark: bool) {
        self.widget.set_theme(Theme::from_dark_mode(is_dark));
        self.sync_dom();
    }

    /// Advances the particle animation one frame
    pub fn tick(&mut self) {
        self.widget.tick();
        self.sync_particles();
    }

    /// Stops the animation and removes the particle layer
    pub fn teardown(&mut self) {
        self.widget.teardown();
        self.dom.clear_children(PARTICLES_ID);
    }

    /// Clears the tape
    pub fn clear_history(&mut self) {
        self.widget.clear_history();
        self.sync_dom();
    }

    fn click_target(&mut self, element_id: &str) -> Option<Calculation> {
        let action = match element_id {
            THEME_TOGGLE_ID => WidgetAction::ToggleTheme,
            SIZE_TOGGLE_ID => WidgetAction::CycleSize,
            id => match self.keypad.find_by_id(id) {
                Some(button) => WidgetAction::Calculator(button.command),
                None => {
                    debug!(element_id = id, "click on inert element");
                    return None;
                }
            },
        };
        self.widget.handle(action)
    }

    fn build_dom(&mut self) {
        self.dom
            .register_element(DomElement::new("div").with_id(ROOT_ID));

        let children = [
            DomElement::new("div")
                .with_id(PARTICLES_ID)
                .with_attr("aria-hidden", "true"),
            DomElement::new("button").with_id(THEME_TOGGLE_ID),
            DomElement::new("button").with_id(SIZE_TOGGLE_ID),
            DomElement::new("div")
                .with_id(EXPRESSION_ID)
                .with_attr("role", "textbox")
                .with_attr("aria-label", "Expression Display"),
            DomElement::new("div")
                .with_id(DISPLAY_ID)
                .with_attr("role", "textbox")
                .with_attr("aria-label", "Calculator Display")
                .with_attr("title", "Calculator Display"),
            DomElement::new("div").with_id(KEYPAD_ID),
            DomElement::new("ol").with_id(TAPE_ID),
        ];
        for child in children {
            self.dom.append_child(ROOT_ID, child);
        }

        for button in self.keypad.buttons() {
            let element = DomElement::new("button")
                .with_id(&button.id)
                .with_text(&button.label())
                .with_attr("title", &button.tooltip())
                .with_attr("aria-label", &button.aria_label())
                .with_attr("data-kind", button.kind.as_str());
            self.dom.append_child(KEYPAD_ID, element);
        }
    }

    /// Pushes widget state into the DOM
    fn sync_dom(&mut self) {
        let theme = self.widget.theme();
        let size = self.widget.size();
        let palette = self.widget.palette();
        let classes = size.classes();

        self.dom.set_element_classes(
            ROOT_ID,
            &format!("{} {}", classes.container, theme.as_str()),
        );
        self.dom.set_element_attr(
            ROOT_ID,
            "style",
            &format!("background-color: {}", palette.surface.hex()),
        );

        let formatted = self.widget.formatted_display();
        self.dom.set_element_text(DISPLAY_ID, &formatted);
        self.dom
            .set_element_classes(DISPLAY_ID, classes.display_text);
        self.dom.set_element_attr(
            DISPLAY_ID,
            "style",
            &format!("color: {}", palette.display_text.hex()),
        );

        let expression = self.widget.expression();
        self.dom.set_element_text(EXPRESSION_ID, &expression);
        self.dom
            .set_element_classes(EXPRESSION_ID, classes.expression_text);
        self.dom.set_element_attr(
            EXPRESSION_ID,
            "style",
            &format!("color: {}", palette.expression_text.hex()),
        );

        self.sync_toggles(theme, size);
        self.dom
            .set_element_classes(KEYPAD_ID, &format!("grid grid-cols-4 {}", classes.button_grid));
        for button in self.keypad.buttons() {
            self.dom.set_element_classes(&button.id, &button_classes(button, size));
            self.dom
                .set_element_attr(&button.id, "style", &button_style(button.kind, palette));
        }

        self.sync_tape();
        self.sync_particles();
    }

    fn sync_toggles(&mut self, theme: Theme, size: SizePreset) {
        let icons = size.classes().icons;

        let (icon, label) = if theme.is_dark() {
            ("☀", "Light")
        } else {
            ("☾", "Dark")
        };
        self.dom
            .set_element_text(THEME_TOGGLE_ID, &format!("{icon} {label}"));
        self.dom
            .set_element_attr(THEME_TOGGLE_ID, "title", theme.toggle_tooltip());
        self.dom.set_element_classes(THEME_TOGGLE_ID, icons);

        self.dom
            .set_element_text(SIZE_TOGGLE_ID, &format!("⊞ {}", size.next().name()));
        self.dom
            .set_element_attr(SIZE_TOGGLE_ID, "title", &size.toggle_tooltip());
        self.dom.set_element_classes(SIZE_TOGGLE_ID, icons);
    }

    fn sync_tape(&mut self) {
        self.dom.clear_children(TAPE_ID);
        let entries: Vec<String> = self.widget.history().iter().map(|e| e.display()).collect();
        for (i, entry) in entries.iter().rev().enumerate() {
            let item = DomElement::new("li")
                .with_id(&format!("tape-{i}"))
                .with_text(entry);
            self.dom.append_child(TAPE_ID, item);
        }
    }

    fn sync_particles(&mut self) {
        self.dom.clear_children(PARTICLES_ID);
        if !self.widget.particles().is_running() {
            return;
        }
        let color = self.widget.palette().particle.hex();
        let elements: Vec<DomElement> = self
            .widget
            .particles()
            .particles()
            .iter()
            .map(|p| particle_element(p, &color))
            .collect();
        for element in elements {
            self.dom.append_child(PARTICLES_ID, element);
        }
    }
}

fn button_classes(button: &KeypadButton, size: SizePreset) -> String {
    let mut classes = format!("rounded-full {}", size.classes().button);
    if button.span > 1 {
        classes.push_str(&format!(" col-span-{} justify-start pl-7", button.span));
    }
    classes
}

fn button_style(kind: ButtonKind, palette: &Palette) -> String {
    let colors = kind.colors(palette);
    format!(
        "background-color: {}; color: {}",
        colors.fill.hex(),
        colors.text.hex()
    )
}

fn particle_element(particle: &Particle, color: &str) -> DomElement {
    let style = format!(
        "left: {:.1}px; top: {:.1}px; width: {:.1}px; height: {:.1}px; opacity: {:.2}; background-color: {color}",
        particle.x, particle.y, particle.size, particle.size, particle.opacity
    );
    DomElement::new("span")
        .with_id(&format!("particle-{}", particle.id))
        .with_class("particle")
        .with_attr("style", &style)
}
