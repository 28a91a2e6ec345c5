use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Theme color palette defining all colors used by the form screen.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub primary: ColorSpec,
    pub banner: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_muted: ColorSpec,

    // Status colors
    pub success: ColorSpec,
    pub error: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,
}

/// Color specification that can be serialized/deserialized.
///
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const fn rgb(r: u8, g: u8, b: u8) -> ColorSpec {
    ColorSpec { r, g, b }
}

impl ColorSpec {
    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::tokyo_night()
    }
}

impl Theme {
    /// Tokyo Night theme.
    ///
    pub fn tokyo_night() -> Self {
        Theme {
            name: "tokyo-night".to_string(),
            primary: rgb(125, 207, 255),       // Blue
            banner: rgb(255, 159, 196),        // Magenta
            text: rgb(169, 177, 214),          // Foreground
            text_muted: rgb(117, 121, 148),    // Comment
            success: rgb(158, 206, 106),       // Green
            error: rgb(247, 118, 142),         // Red
            border_active: rgb(125, 207, 255), // Blue
            border_normal: rgb(117, 121, 148), // Comment
            highlight_bg: rgb(125, 207, 255),  // Blue
            highlight_fg: rgb(26, 27, 38),     // Background
        }
    }

    /// Dracula theme.
    ///
    pub fn dracula() -> Self {
        Theme {
            name: "dracula".to_string(),
            primary: rgb(189, 147, 249),       // Purple
            banner: rgb(255, 121, 198),        // Pink
            text: rgb(248, 248, 242),          // Foreground
            text_muted: rgb(98, 114, 164),     // Comment
            success: rgb(80, 250, 123),        // Green
            error: rgb(255, 85, 85),           // Red
            border_active: rgb(189, 147, 249), // Purple
            border_normal: rgb(98, 114, 164),  // Comment
            highlight_bg: rgb(139, 233, 253),  // Cyan
            highlight_fg: rgb(40, 42, 54),     // Background
        }
    }

    /// Rose Pine Dawn theme.
    ///
    pub fn rose_pine_dawn() -> Self {
        Theme {
            name: "rose-pine-dawn".to_string(),
            primary: rgb(161, 119, 255),       // Purple
            banner: rgb(255, 109, 146),        // Pink
            text: rgb(88, 82, 96),             // Text
            text_muted: rgb(152, 147, 165),    // Muted
            success: rgb(59, 247, 209),        // Green
            error: rgb(180, 99, 122),          // Love
            border_active: rgb(161, 119, 255), // Purple
            border_normal: rgb(152, 147, 165), // Muted
            highlight_bg: rgb(161, 119, 255),  // Purple
            highlight_fg: rgb(250, 244, 237),  // Base
        }
    }

    /// Get a theme by name.
    ///
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "tokyo-night" => Some(Self::tokyo_night()),
            "dracula" => Some(Self::dracula()),
            "rose-pine-dawn" => Some(Self::rose_pine_dawn()),
            _ => None,
        }
    }

    /// Get list of all available theme names.
    ///
    pub fn available_themes() -> Vec<String> {
        vec![
            "tokyo-night".to_string(),
            "dracula".to_string(),
            "rose-pine-dawn".to_string(),
        ]
    }
}
