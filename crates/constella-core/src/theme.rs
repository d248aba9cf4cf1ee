//! Theme color lookup with fixed fallbacks.

use serde::Deserialize;

use crate::color::{ParseColorError, Rgb};

const DEFAULT_ACCENT: Rgb = Rgb::new(0x25, 0x77, 0xf9);
const DEFAULT_TEXT: Rgb = Rgb::new(0xe2, 0xe8, 0xf0);
const DEFAULT_TEXT_MUTED: Rgb = Rgb::new(0x94, 0xa3, 0xb8);
const DEFAULT_BACKGROUND: Rgb = Rgb::new(0x0f, 0x17, 0x2a);

/// Raw theme strings as they appear in the style context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThemeSpec {
    pub accent: Option<String>,
    pub text: Option<String>,
    pub text_muted: Option<String>,
    /// Color translucent strokes are composited onto.
    pub background: Option<String>,
}

/// Resolved theme colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    pub accent: Rgb,
    pub text: Rgb,
    pub text_muted: Rgb,
    pub background: Rgb,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            accent: DEFAULT_ACCENT,
            text: DEFAULT_TEXT,
            text_muted: DEFAULT_TEXT_MUTED,
            background: DEFAULT_BACKGROUND,
        }
    }
}

/// Outcome of resolving a [`ThemeSpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTheme {
    pub colors: ThemeColors,
    /// Keys whose value was present but unparseable and got replaced.
    pub fallbacks: Vec<(&'static str, ParseColorError)>,
}

impl ThemeSpec {
    /// Resolve every color, substituting the fixed default for missing or
    /// malformed values. Never fails.
    pub fn resolve(&self) -> ResolvedTheme {
        let mut fallbacks = Vec::new();
        let mut pick = |name: &'static str, value: &Option<String>, default: Rgb| {
            match value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                None => default,
                Some(v) => v.parse::<Rgb>().unwrap_or_else(|err| {
                    fallbacks.push((name, err));
                    default
                }),
            }
        };

        let colors = ThemeColors {
            accent: pick("accent", &self.accent, DEFAULT_ACCENT),
            text: pick("text", &self.text, DEFAULT_TEXT),
            text_muted: pick("text_muted", &self.text_muted, DEFAULT_TEXT_MUTED),
            background: pick("background", &self.background, DEFAULT_BACKGROUND),
        };

        ResolvedTheme { colors, fallbacks }
    }
}
