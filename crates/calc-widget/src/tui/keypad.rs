//! Keypad rendering and mouse hit-testing

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use super::color;
use crate::appearance::{Palette, SizeMetrics};
use crate::command::Command;
use crate::keypad::{Keypad, KeypadButton};

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
    palette: &'a Palette,
    metrics: SizeMetrics,
    pressed: Option<Command>,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget
    #[must_use]
    pub fn new(keypad: &'a Keypad, palette: &'a Palette, metrics: SizeMetrics) -> Self {
        Self {
            keypad,
            palette,
            metrics,
            pressed: None,
        }
    }

    /// Highlights the button bound to `command`
    #[must_use]
    pub fn pressed(mut self, pressed: Option<Command>) -> Self {
        self.pressed = pressed;
        self
    }

    /// Screen rectangle of a button inside the keypad area
    #[must_use]
    pub fn button_rect(area: Rect, metrics: SizeMetrics, button: &KeypadButton) -> Rect {
        let step_x = metrics.button_width + metrics.gap;
        let step_y = metrics.button_height + metrics.gap;
        let span = button.span as u16;
        Rect {
            x: area.x + button.col as u16 * step_x,
            y: area.y + button.row as u16 * step_y,
            width: metrics.button_width * span + metrics.gap * span.saturating_sub(1),
            height: metrics.button_height,
        }
        .intersection(area)
    }

    /// Returns the command of the button under `(x, y)`
    #[must_use]
    pub fn hit_test(
        keypad: &Keypad,
        area: Rect,
        metrics: SizeMetrics,
        x: u16,
        y: u16,
    ) -> Option<Command> {
        keypad
            .buttons()
            .iter()
            .find(|button| {
                let rect = Self::button_rect(area, metrics, button);
                x >= rect.x && x < rect.right() && y >= rect.y && y < rect.bottom()
            })
            .map(|button| button.command)
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < self.metrics.keypad_width() || area.height < self.metrics.keypad_height()
        {
            return; // Too small to render
        }

        for button in self.keypad.buttons() {
            let rect = Self::button_rect(area, self.metrics, button);
            let colors = button.kind.colors(self.palette);
            let is_pressed = self.pressed == Some(button.command);

            let fill = if is_pressed { colors.hover } else { colors.fill };
            let mut style = Style::default().bg(color(fill)).fg(color(colors.text));
            if is_pressed {
                style = style.add_modifier(Modifier::BOLD);
            }
            buf.set_style(rect, style);

            let label = button.label();
            let label_width = label.chars().count() as u16;
            // The wide zero button keeps its label left-aligned.
            let label_x = if button.span > 1 {
                rect.x + 2
            } else {
                rect.x + rect.width.saturating_sub(label_width) / 2
            };
            let label_y = rect.y + rect.height / 2;
            buf.set_stringn(label_x, label_y, &label, rect.width as usize, style);
        }
    }
}
