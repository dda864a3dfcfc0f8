//! Web front end
//!
//! [`WebCalculator`] models the page against a [`MockDom`] so it runs and
//! tests natively; `BrowserCalculator` is the wasm-bindgen surface the JS
//! host calls.

#[cfg(feature = "wasm")]
mod browser;
mod dom;
mod page;

#[cfg(feature = "wasm")]
pub use browser::BrowserCalculator;
pub use dom::{DomElement, DomEvent, MockDom};
pub use page::{
    WebCalculator, DISPLAY_ID, EXPRESSION_ID, KEYPAD_ID, PARTICLES_ID, ROOT_ID, SIZE_TOGGLE_ID,
    TAPE_ID, THEME_TOGGLE_ID,
};
