//! Unified calculator driver
//!
//! Scenario checks are written once against [`CalculatorDriver`] and run
//! against every front end: the terminal app (clicks go through mouse
//! hit-testing) and the web page (clicks go through DOM element ids).

use crate::core::format::{format_number, stringify};
use crate::core::history::History;
use crate::core::CalculatorState;

/// Abstract driver for calculator interactions
///
/// # Example
///
/// ```
/// use calc_widget::driver::{verify_scenarios, CalculatorDriver, WebDriver};
///
/// let mut driver = WebDriver::new();
/// driver.press_keys(&["6", "*", "7", "Enter"]);
/// assert_eq!(driver.display(), "42");
///
/// driver.clear();
/// verify_scenarios(&mut driver);
/// ```
pub trait CalculatorDriver {
    /// Presses a key by its `KeyboardEvent.key` name (`"7"`, `"+"`, `"Enter"`)
    fn press_key(&mut self, key: &str);

    /// Clicks a keypad button by element id (`"btn-7"`, `"btn-plus"`)
    ///
    /// Returns false if no such button exists.
    fn click_button(&mut self, id: &str) -> bool;

    /// Formatted main display
    fn display(&self) -> String;

    /// Expression trail
    fn expression(&self) -> String;

    /// Engine state snapshot
    fn state(&self) -> CalculatorState;

    /// Tape entries, newest first
    fn history(&self) -> Vec<HistoryItem>;

    /// Presses keys in order
    fn press_keys(&mut self, keys: &[&str]) {
        for key in keys {
            self.press_key(key);
        }
    }

    /// Clicks buttons in order
    fn click_buttons(&mut self, ids: &[&str]) {
        for id in ids {
            self.click_button(id);
        }
    }

    /// Resets the calculator (the AC button)
    fn clear(&mut self) {
        self.click_button("btn-clear");
    }
}

/// A tape entry as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    /// `"12 + 8"`
    pub equation: String,
    /// `"20"`, thousands-grouped
    pub result: String,
}

fn history_items(history: &History) -> Vec<HistoryItem> {
    let mut items: Vec<HistoryItem> = history
        .iter()
        .map(|entry| HistoryItem {
            equation: entry.equation.clone(),
            result: format_number(&stringify(entry.result)),
        })
        .collect();
    items.reverse();
    items
}

/// TUI driver implementation
#[cfg(feature = "tui")]
pub mod tui_driver {
    use ratatui::layout::Rect;

    use super::{history_items, CalculatorDriver, HistoryItem};
    use crate::core::CalculatorState;
    use crate::tui::{layout, CalculatorApp, KeypadWidget};

    /// Driver for the terminal app; clicks land on button centres
    #[derive(Debug)]
    pub struct TuiDriver {
        app: CalculatorApp,
        screen: Rect,
    }

    impl Default for TuiDriver {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TuiDriver {
        /// Default simulated terminal size
        pub const SCREEN: Rect = Rect {
            x: 0,
            y: 0,
            width: 100,
            height: 30,
        };

        /// Creates a driver around a fresh app
        #[must_use]
        pub fn new() -> Self {
            Self::with_app(CalculatorApp::new())
        }

        /// Creates a driver around an existing app
        #[must_use]
        pub fn with_app(app: CalculatorApp) -> Self {
            Self {
                app,
                screen: Self::SCREEN,
            }
        }

        /// Changes the simulated terminal size
        #[must_use]
        pub fn with_screen(mut self, screen: Rect) -> Self {
            self.screen = screen;
            self
        }

        /// The app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp {
            &self.app
        }

        /// The app, mutably
        pub fn app_mut(&mut self) -> &mut CalculatorApp {
            &mut self.app
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press_key(&mut self, key: &str) {
            self.app.press_key(key);
        }

        fn click_button(&mut self, id: &str) -> bool {
            let size = self.app.widget().size();
            let Some(button) = self.app.keypad().find_by_id(id) else {
                return false;
            };
            let ui = layout(self.screen, size);
            let rect = KeypadWidget::button_rect(ui.keypad, size.metrics(), button);
            if rect.is_empty() {
                return false;
            }
            let (x, y) = (rect.x + rect.width / 2, rect.y + rect.height / 2);
            self.app.click(self.screen, x, y)
        }

        fn display(&self) -> String {
            self.app.widget().formatted_display()
        }

        fn expression(&self) -> String {
            self.app.widget().expression()
        }

        fn state(&self) -> CalculatorState {
            self.app.widget().state()
        }

        fn history(&self) -> Vec<HistoryItem> {
            history_items(self.app.widget().history())
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

/// Web driver implementation
pub mod web_driver {
    use super::{history_items, CalculatorDriver, HistoryItem};
    use crate::core::CalculatorState;
    use crate::web::WebCalculator;

    /// Driver for the web page; reads display text back from the DOM
    #[derive(Debug, Default)]
    pub struct WebDriver {
        page: WebCalculator,
    }

    impl WebDriver {
        /// Creates a driver around a fresh page
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a driver around an existing page
        #[must_use]
        pub fn with_page(page: WebCalculator) -> Self {
            Self { page }
        }

        /// The page
        #[must_use]
        pub fn page(&self) -> &WebCalculator {
            &self.page
        }

        /// The page, mutably
        pub fn page_mut(&mut self) -> &mut WebCalculator {
            &mut self.page
        }
    }

    impl CalculatorDriver for WebDriver {
        fn press_key(&mut self, key: &str) {
            self.page.key_down(key);
        }

        fn click_button(&mut self, id: &str) -> bool {
            if self.page.keypad().find_by_id(id).is_none() {
                return false;
            }
            self.page.click(id);
            true
        }

        fn display(&self) -> String {
            self.page.display_text().to_string()
        }

        fn expression(&self) -> String {
            self.page.expression_text().to_string()
        }

        fn state(&self) -> CalculatorState {
            self.page.widget().state()
        }

        fn history(&self) -> Vec<HistoryItem> {
            history_items(self.page.widget().history())
        }
    }
}

pub use web_driver::WebDriver;

// ===== Unified scenarios =====
// Each check starts from a cleared calculator and leaves it dirty.

/// `50 + 2 =` entered on the keypad
pub fn verify_addition_with_trail<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.click_buttons(&["btn-5", "btn-0"]);
    assert_eq!(driver.display(), "50");

    driver.click_button("btn-plus");
    assert_eq!(driver.state().first_operand.as_deref(), Some("50"));
    assert_eq!(driver.expression(), "50 +");

    driver.click_button("btn-2");
    assert_eq!(driver.display(), "2");

    driver.click_button("btn-equals");
    assert_eq!(driver.display(), "52");
    assert_eq!(driver.expression(), "50 + 2 =");
}

/// Division by zero shows `Error`
pub fn verify_division_by_zero<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.click_buttons(&["btn-8", "btn-divide", "btn-0", "btn-equals"]);
    assert_eq!(driver.display(), "Error");
}

/// `±` flips the sign of the entry (keyboard only: F9)
pub fn verify_negate<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.click_button("btn-1");
    driver.press_key("F9");
    assert_eq!(driver.display(), "-1");
}

/// Deleting from `0` does nothing
pub fn verify_delete_on_zero<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    assert_eq!(driver.display(), "0");
    driver.click_button("btn-delete");
    assert_eq!(driver.display(), "0");
}

/// A second decimal point is ignored
pub fn verify_single_decimal_point<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.click_buttons(&["btn-3", "btn-decimal", "btn-decimal"]);
    assert_eq!(driver.display(), "3.");
}

/// A repeated operator swaps the operator and keeps the operand
pub fn verify_operator_replacement<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys(&["9", "+", "-"]);
    assert_eq!(driver.expression(), "9 -");
    driver.press_keys(&["4", "Enter"]);
    assert_eq!(driver.display(), "5");
}

/// An operator after a pending operation evaluates it first
pub fn verify_chained_operations<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys(&["2", "+", "3", "*"]);
    assert_eq!(driver.display(), "5");
    assert_eq!(driver.expression(), "5 ×");
    driver.press_keys(&["4", "="]);
    assert_eq!(driver.display(), "20");
}

/// A digit after `Error` starts over
pub fn verify_error_recovery<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys(&["1", "/", "0", "Enter"]);
    assert_eq!(driver.display(), "Error");

    driver.press_key("+");
    assert_eq!(driver.display(), "Error");

    driver.press_key("7");
    assert_eq!(driver.display(), "7");
    assert_eq!(driver.expression(), "");
}

/// Thousands separators and percent
pub fn verify_formatting<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys(&["1", "2", "3", "4", "5", "6", "7"]);
    assert_eq!(driver.display(), "1,234,567");

    driver.press_key("%");
    assert_eq!(driver.display(), "12,345.67");

    driver.clear();
    driver.press_keys(&["0", ".", "5"]);
    assert_eq!(driver.display(), "0.5");
}

/// Successful results land on the tape, failures do not
pub fn verify_history<D: CalculatorDriver>(driver: &mut D) {
    let before = driver.history().len();

    driver.clear();
    driver.press_keys(&["5", "0", "0", "*", "3", "Enter"]);
    driver.press_keys(&["1", "/", "0", "Enter"]);

    let history = driver.history();
    assert_eq!(history.len(), before + 1);
    assert_eq!(
        history[0],
        HistoryItem {
            equation: "500 × 3".to_string(),
            result: "1,500".to_string(),
        }
    );
}

/// The five reference scenarios
pub fn verify_scenarios<D: CalculatorDriver>(driver: &mut D) {
    verify_addition_with_trail(driver);
    verify_division_by_zero(driver);
    verify_negate(driver);
    verify_delete_on_zero(driver);
    verify_single_decimal_point(driver);
}

/// Runs every check
pub fn run_full_suite<D: CalculatorDriver>(driver: &mut D) {
    verify_scenarios(driver);
    verify_operator_replacement(driver);
    verify_chained_operations(driver);
    verify_error_recovery(driver);
    verify_formatting(driver);
    verify_history(driver);
}
