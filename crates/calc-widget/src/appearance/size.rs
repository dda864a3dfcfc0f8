//! Size presets cycled by the size toggle

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::AppearanceError;

/// Terminal layout of one preset, in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeMetrics {
    /// Width of a single-column button
    pub button_width: u16,
    /// Height of a button row
    pub button_height: u16,
    /// Gap between buttons, both directions
    pub gap: u16,
    /// Height of the two-line display area including its border
    pub display_height: u16,
}

impl SizeMetrics {
    /// Width of the 4-column keypad
    #[must_use]
    pub const fn keypad_width(self) -> u16 {
        self.button_width * 4 + self.gap * 3
    }

    /// Height of the 5-row keypad
    #[must_use]
    pub const fn keypad_height(self) -> u16 {
        self.button_height * 5 + self.gap * 4
    }
}

/// CSS classes of one preset for the web front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeClasses {
    /// Calculator body width
    pub container: &'static str,
    /// Display area height
    pub display: &'static str,
    /// Main display font size
    pub display_text: &'static str,
    /// Expression trail font size
    pub expression_text: &'static str,
    /// Button height and font size
    pub button: &'static str,
    /// Grid gap and padding
    pub button_grid: &'static str,
    /// Toggle icon size
    pub icons: &'static str,
}

/// Calculator size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizePreset {
    /// Smallest layout
    Compact,
    /// Default layout
    #[default]
    Normal,
    /// Largest layout
    Large,
}

impl SizePreset {
    /// All presets in cycle order
    pub const ALL: [Self; 3] = [Self::Compact, Self::Normal, Self::Large];

    /// Returns the next preset (compact → normal → large → compact)
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Compact => Self::Normal,
            Self::Normal => Self::Large,
            Self::Large => Self::Compact,
        }
    }

    /// Display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Compact => "Compact",
            Self::Normal => "Normal",
            Self::Large => "Large",
        }
    }

    /// Lowercase name used in config files
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Normal => "normal",
            Self::Large => "large",
        }
    }

    /// Tooltip of the size toggle button
    #[must_use]
    pub fn toggle_tooltip(self) -> String {
        format!("Switch to {} size", self.next().name())
    }

    /// Terminal layout metrics
    #[must_use]
    pub const fn metrics(self) -> SizeMetrics {
        match self {
            Self::Compact => SizeMetrics {
                button_width: 6,
                button_height: 1,
                gap: 0,
                display_height: 4,
            },
            Self::Normal => SizeMetrics {
                button_width: 8,
                button_height: 3,
                gap: 0,
                display_height: 4,
            },
            Self::Large => SizeMetrics {
                button_width: 10,
                button_height: 3,
                gap: 1,
                display_height: 5,
            },
        }
    }

    /// CSS classes
    #[must_use]
    pub const fn classes(self) -> SizeClasses {
        match self {
            Self::Compact => SizeClasses {
                container: "max-w-[280px]",
                display: "h-24",
                display_text: "text-4xl",
                expression_text: "text-lg",
                button: "h-12 text-xl",
                button_grid: "gap-1.5 p-1.5",
                icons: "h-4 w-4",
            },
            Self::Normal => SizeClasses {
                container: "max-w-[320px]",
                display: "h-32",
                display_text: "text-5xl",
                expression_text: "text-xl",
                button: "h-16 text-2xl",
                button_grid: "gap-2 p-2",
                icons: "h-5 w-5",
            },
            Self::Large => SizeClasses {
                container: "max-w-[380px]",
                display: "h-40",
                display_text: "text-6xl",
                expression_text: "text-2xl",
                button: "h-20 text-3xl",
                button_grid: "gap-3 p-3",
                icons: "h-6 w-6",
            },
        }
    }
}

impl FromStr for SizePreset {
    type Err = AppearanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "normal" => Ok(Self::Normal),
            "large" => Ok(Self::Large),
            _ => Err(AppearanceError::UnknownSize(s.to_string())),
        }
    }
}

impl std::fmt::Display for SizePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_normal() {
        assert_eq!(SizePreset::default(), SizePreset::Normal);
    }

    #[test]
    fn test_next_cycles_with_period_three() {
        for size in SizePreset::ALL {
            assert_ne!(size.next(), size);
            assert_eq!(size.next().next().next(), size);
        }
        assert_eq!(SizePreset::Compact.next(), SizePreset::Normal);
        assert_eq!(SizePreset::Normal.next(), SizePreset::Large);
        assert_eq!(SizePreset::Large.next(), SizePreset::Compact);
    }

    #[test]
    fn test_toggle_tooltip_names_next_size() {
        assert_eq!(SizePreset::Normal.toggle_tooltip(), "Switch to Large size");
        assert_eq!(SizePreset::Large.toggle_tooltip(), "Switch to Compact size");
    }

    #[test]
    fn test_metrics_grow_with_size() {
        let widths: Vec<u16> = SizePreset::ALL
            .iter()
            .map(|s| s.metrics().keypad_width())
            .collect();
        assert!(widths.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_keypad_dimensions() {
        let m = SizePreset::Large.metrics();
        assert_eq!(m.keypad_width(), 43);
        assert_eq!(m.keypad_height(), 19);
    }

    #[test]
    fn test_classes() {
        assert_eq!(SizePreset::Compact.classes().container, "max-w-[280px]");
        assert_eq!(SizePreset::Normal.classes().button, "h-16 text-2xl");
        assert_eq!(SizePreset::Large.classes().icons, "h-6 w-6");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("compact".parse::<SizePreset>(), Ok(SizePreset::Compact));
        assert_eq!("Large".parse::<SizePreset>(), Ok(SizePreset::Large));
        assert!("huge".parse::<SizePreset>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&SizePreset::Large).unwrap(),
            "\"large\""
        );
    }
}
