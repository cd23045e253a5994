use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five mini-games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Counting,
    Addition,
    Subtraction,
    Shapes,
    Patterns,
}

impl Mode {
    /// All modes, in menu order.
    pub const ALL: [Mode; 5] = [
        Mode::Counting,
        Mode::Addition,
        Mode::Subtraction,
        Mode::Shapes,
        Mode::Patterns,
    ];

    /// Stable lowercase name, used as the persisted key for per-mode scores.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Counting => "counting",
            Mode::Addition => "addition",
            Mode::Subtraction => "subtraction",
            Mode::Shapes => "shapes",
            Mode::Patterns => "patterns",
        }
    }

    /// Human-facing menu label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Mode::Counting => "Counting",
            Mode::Addition => "Addition",
            Mode::Subtraction => "Subtraction",
            Mode::Shapes => "Shapes",
            Mode::Patterns => "Patterns",
        }
    }

    /// Emoji shown next to the mode in menus.
    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            Mode::Counting => "🔢",
            Mode::Addition => "➕",
            Mode::Subtraction => "➖",
            Mode::Shapes => "🔷",
            Mode::Patterns => "🎨",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for parsing a `Mode` from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError {
    raw: String,
}

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown game mode: {}", self.raw)
    }
}

impl std::error::Error for ParseModeError {}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "counting" => Ok(Mode::Counting),
            "addition" => Ok(Mode::Addition),
            "subtraction" => Ok(Mode::Subtraction),
            "shapes" => Ok(Mode::Shapes),
            "patterns" => Ok(Mode::Patterns),
            _ => Err(ParseModeError { raw: s.to_owned() }),
        }
    }
}
