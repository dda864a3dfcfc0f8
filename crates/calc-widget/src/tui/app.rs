//! TUI application state

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;

use super::input::{InputHandler, KeyAction};
use super::keypad::KeypadWidget;
use super::ui::layout;
use crate::command::Command;
use crate::keypad::Keypad;
use crate::particles::Bounds;
use crate::widget::{CalculatorWidget, WidgetAction};

/// Frames a pressed button stays highlighted
pub const PRESS_HIGHLIGHT_FRAMES: u8 = 4;

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp {
    widget: CalculatorWidget,
    keypad: Keypad,
    input: InputHandler,
    /// Last pressed command and the frames left to highlight it
    pressed: Option<(Command, u8)>,
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp {
    /// Creates an app around a default widget
    #[must_use]
    pub fn new() -> Self {
        Self::with_widget(CalculatorWidget::new())
    }

    /// Creates an app around an existing widget
    #[must_use]
    pub fn with_widget(widget: CalculatorWidget) -> Self {
        Self {
            widget,
            keypad: Keypad::new(),
            input: InputHandler::new(),
            pressed: None,
            should_quit: false,
        }
    }

    /// The widget
    #[must_use]
    pub fn widget(&self) -> &CalculatorWidget {
        &self.widget
    }

    /// The widget, mutably
    pub fn widget_mut(&mut self) -> &mut CalculatorWidget {
        &mut self.widget
    }

    /// The keypad layout
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Command whose button is currently highlighted
    #[must_use]
    pub fn pressed(&self) -> Option<Command> {
        self.pressed.map(|(command, _)| command)
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag and stops the animation
    pub fn quit(&mut self) {
        self.should_quit = true;
        self.widget.teardown();
    }

    /// Handles a terminal key event
    pub fn handle_key_event(&mut self, event: KeyEvent) {
        let action = self.input.handle_key(event);
        self.apply(action);
    }

    /// Handles a browser-style key name (scripted input)
    pub fn press_key(&mut self, name: &str) {
        if let Some(code) = InputHandler::key_code(name) {
            self.handle_key_event(KeyEvent::from(code));
        }
    }

    /// Applies a key action
    pub fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Calculator(command) => self.press(command),
            KeyAction::ToggleTheme => {
                self.widget.handle(WidgetAction::ToggleTheme);
            }
            KeyAction::CycleSize => {
                self.widget.handle(WidgetAction::CycleSize);
            }
            KeyAction::Quit => self.quit(),
            KeyAction::None => {}
        }
    }

    /// Sends a command to the widget and highlights its button
    pub fn press(&mut self, command: Command) {
        self.widget.handle(command.into());
        self.pressed = Some((command, PRESS_HIGHLIGHT_FRAMES));
    }

    /// Handles a mouse click at `(x, y)` on a screen of size `area`
    ///
    /// Returns true if the click landed on a button or a toggle.
    pub fn click(&mut self, area: Rect, x: u16, y: u16) -> bool {
        let ui = layout(area, self.widget.size());
        let inside = |r: Rect| x >= r.x && x < r.right() && y >= r.y && y < r.bottom();

        if inside(ui.size_toggle) {
            self.apply(KeyAction::CycleSize);
            return true;
        }
        if inside(ui.theme_toggle) {
            self.apply(KeyAction::ToggleTheme);
            return true;
        }

        let metrics = self.widget.size().metrics();
        match KeypadWidget::hit_test(&self.keypad, ui.keypad, metrics, x, y) {
            Some(command) => {
                self.press(command);
                true
            }
            None => false,
        }
    }

    /// Advances one frame: particles move, highlights fade
    pub fn tick(&mut self) {
        self.widget.tick();
        self.pressed = match self.pressed {
            Some((command, frames)) if frames > 1 => Some((command, frames - 1)),
            _ => None,
        };
    }

    /// Resizes the particle area to the terminal
    pub fn resize(&mut self, width: u16, height: u16) {
        self.widget
            .resize(Bounds::new(f64::from(width), f64::from(height)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appearance::{SizePreset, Theme};
    use crate::core::{BinaryOp, DigitToken};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn screen() -> Rect {
        Rect::new(0, 0, 100, 30)
    }

    fn center_of(app: &CalculatorApp, command: Command) -> (u16, u16) {
        let ui = layout(screen(), app.widget().size());
        let button = app.keypad().find_by_command(command).unwrap();
        let rect =
            KeypadWidget::button_rect(ui.keypad, app.widget().size().metrics(), button);
        (rect.x + rect.width / 2, rect.y + rect.height / 2)
    }

    // ===== Constructor tests =====

    #[test]
    fn test_app_new() {
        let app = CalculatorApp::new();
        assert_eq!(app.widget().formatted_display(), "0");
        assert!(app.pressed().is_none());
        assert!(!app.should_quit());
    }

    #[test]
    fn test_app_default() {
        let app = CalculatorApp::default();
        assert_eq!(app.keypad().button_count(), 19);
    }

    // ===== Keyboard tests =====

    #[test]
    fn test_key_events_drive_widget() {
        let mut app = CalculatorApp::new();
        for name in ["5", "0", "+", "2", "Enter"] {
            app.press_key(name);
        }
        assert_eq!(app.widget().formatted_display(), "52");
        assert_eq!(app.widget().expression(), "50 + 2 =");
    }

    #[test]
    fn test_key_press_highlights_button() {
        let mut app = CalculatorApp::new();
        app.press_key("7");
        assert_eq!(
            app.pressed(),
            Some(Command::Digit(DigitToken::new('7').unwrap()))
        );
    }

    #[test]
    fn test_quit_keys() {
        let mut app = CalculatorApp::new();
        app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
        assert!(!app.widget().particles().is_running());
    }

    #[test]
    fn test_toggle_keys() {
        let mut app = CalculatorApp::new();
        app.press_key("t");
        app.press_key("s");
        assert_eq!(app.widget().theme(), Theme::Light);
        assert_eq!(app.widget().size(), SizePreset::Large);
    }

    #[test]
    fn test_unknown_key_name_ignored() {
        let mut app = CalculatorApp::new();
        app.press_key("ArrowLeft");
        assert_eq!(app.widget().formatted_display(), "0");
        assert!(app.pressed().is_none());
    }

    // ===== Mouse tests =====

    #[test]
    fn test_click_buttons() {
        let mut app = CalculatorApp::new();
        let sequence = [
            Command::Digit(DigitToken::new('9').unwrap()),
            BinaryOp::Multiply.into(),
            Command::Digit(DigitToken::new('3').unwrap()),
            Command::Equals,
        ];
        for command in sequence {
            let (x, y) = center_of(&app, command);
            assert!(app.click(screen(), x, y));
        }
        assert_eq!(app.widget().formatted_display(), "27");
    }

    #[test]
    fn test_click_outside_keypad() {
        let mut app = CalculatorApp::new();
        assert!(!app.click(screen(), 0, 0));
        assert!(app.pressed().is_none());
    }

    #[test]
    fn test_click_toggles() {
        let mut app = CalculatorApp::new();
        let ui = layout(screen(), app.widget().size());
        assert!(app.click(screen(), ui.theme_toggle.right() - 1, ui.theme_toggle.y));
        assert_eq!(app.widget().theme(), Theme::Light);

        assert!(app.click(screen(), ui.size_toggle.x, ui.size_toggle.y));
        assert_eq!(app.widget().size(), SizePreset::Large);
    }

    #[test]
    fn test_click_follows_size_change() {
        let mut app = CalculatorApp::new();
        app.apply(KeyAction::CycleSize);
        let (x, y) = center_of(&app, Command::Clear);
        app.press_key("5");
        assert!(app.click(screen(), x, y));
        assert_eq!(app.widget().formatted_display(), "0");
    }

    // ===== Frame tests =====

    #[test]
    fn test_highlight_fades_after_ticks() {
        let mut app = CalculatorApp::new();
        app.press(Command::Equals);
        for _ in 0..PRESS_HIGHLIGHT_FRAMES - 1 {
            app.tick();
            assert_eq!(app.pressed(), Some(Command::Equals));
        }
        app.tick();
        assert!(app.pressed().is_none());
    }

    #[test]
    fn test_resize_updates_particle_bounds() {
        let mut app = CalculatorApp::new();
        app.resize(120, 40);
        assert_eq!(app.widget().particles().bounds(), Bounds::new(120.0, 40.0));
    }
}
