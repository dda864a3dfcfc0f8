//! Dark and light colour themes

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::AppearanceError;

/// A 24-bit colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Returns `#RRGGBB`
    #[must_use]
    pub fn hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Fill and text colour of one button kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonColors {
    /// Button fill
    pub fill: Rgb,
    /// Hover/pressed fill
    pub hover: Rgb,
    /// Label colour
    pub text: Rgb,
}

/// Every colour a front end needs for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Page background
    pub background: Rgb,
    /// Calculator body
    pub surface: Rgb,
    /// Main display text
    pub display_text: Rgb,
    /// Expression trail text
    pub expression_text: Rgb,
    /// Digit and decimal point buttons
    pub number: ButtonColors,
    /// `+ - × ÷` plus AC and `=`
    pub operator: ButtonColors,
    /// `%` and DEL
    pub function: ButtonColors,
    /// Particle dots
    pub particle: Rgb,
    /// Tooltip background
    pub tooltip: Rgb,
}

const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);
const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);
const GRAY_100: Rgb = Rgb(0xF3, 0xF4, 0xF6);
const GRAY_200: Rgb = Rgb(0xE5, 0xE7, 0xEB);
const GRAY_300: Rgb = Rgb(0xD1, 0xD5, 0xDB);
const GRAY_400: Rgb = Rgb(0x9C, 0xA3, 0xAF);
const GRAY_500: Rgb = Rgb(0x6B, 0x72, 0x80);
const GRAY_900: Rgb = Rgb(0x11, 0x18, 0x27);
const ORANGE_400: Rgb = Rgb(0xFB, 0x92, 0x3C);
const ORANGE_500: Rgb = Rgb(0xF9, 0x73, 0x16);
const BLUE_400: Rgb = Rgb(0x60, 0xA5, 0xFA);

const DARK: Palette = Palette {
    background: BLACK,
    surface: Rgb(0x0D, 0x0D, 0x0D),
    display_text: WHITE,
    expression_text: GRAY_400,
    number: ButtonColors {
        fill: Rgb(0x33, 0x33, 0x33),
        hover: Rgb(0x73, 0x73, 0x73),
        text: WHITE,
    },
    operator: ButtonColors {
        fill: Rgb(0xFF, 0x9F, 0x0A),
        hover: Rgb(0xFF, 0xB9, 0x4A),
        text: WHITE,
    },
    function: ButtonColors {
        fill: Rgb(0xA5, 0xA5, 0xA5),
        hover: Rgb(0xD4, 0xD4, 0xD2),
        text: BLACK,
    },
    particle: ORANGE_500,
    tooltip: Rgb(0x1A, 0x1F, 0x2C),
};

const LIGHT: Palette = Palette {
    background: GRAY_100,
    surface: WHITE,
    display_text: GRAY_900,
    expression_text: GRAY_500,
    number: ButtonColors {
        fill: GRAY_200,
        hover: GRAY_300,
        text: GRAY_900,
    },
    operator: ButtonColors {
        fill: ORANGE_500,
        hover: ORANGE_400,
        text: WHITE,
    },
    function: ButtonColors {
        fill: GRAY_300,
        hover: GRAY_400,
        text: GRAY_900,
    },
    particle: BLUE_400,
    tooltip: WHITE,
};

/// Colour theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Black background, orange accents
    #[default]
    Dark,
    /// Light grey background, blue particles
    Light,
}

impl Theme {
    /// Maps the external `is_dark_mode` flag to a theme
    #[must_use]
    pub const fn from_dark_mode(is_dark: bool) -> Self {
        if is_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Returns true for the dark theme
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Returns the other theme
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Returns the colour palette
    #[must_use]
    pub const fn palette(self) -> &'static Palette {
        match self {
            Self::Dark => &DARK,
            Self::Light => &LIGHT,
        }
    }

    /// Tooltip of the theme toggle button
    #[must_use]
    pub const fn toggle_tooltip(self) -> &'static str {
        match self {
            Self::Dark => "Switch to light mode",
            Self::Light => "Switch to dark mode",
        }
    }

    /// Lowercase name used in config files and CSS classes
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl FromStr for Theme {
    type Err = AppearanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(AppearanceError::UnknownTheme(s.to_string())),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
