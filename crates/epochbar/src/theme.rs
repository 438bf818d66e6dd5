//! Style configuration for every visual element of a row.

use serde::{Deserialize, Serialize};

pub use crossterm::style::Color;

/// Colors applied when rows are composed.
///
/// Columns read the theme at composition time, so swapping it restyles
/// the next render. Nothing in the render path hard-codes a color. The
/// serde derives let hosts keep themes in TOML files; colors serialize
/// as tokens (`"white"`, `"ansi(245)"`, `"rgb(98,6,224)"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Row label.
    #[serde(with = "color_token")]
    pub description: Color,
    /// In-progress segment of the bar.
    #[serde(with = "color_token")]
    pub bar: Color,
    /// Bar color once the row reaches its total.
    #[serde(with = "color_token")]
    pub bar_finished: Color,
    /// Sweep marker drawn while the total is unknown.
    #[serde(with = "color_token")]
    pub bar_pulse: Color,
    /// Unfilled track behind the bar.
    #[serde(with = "color_token")]
    pub bar_back: Color,
    /// `completed/total` readout.
    #[serde(with = "color_token")]
    pub counts: Color,
    /// Elapsed and remaining time readout.
    #[serde(with = "color_token")]
    pub time: Color,
    /// Units-per-second readout.
    #[serde(with = "color_token")]
    pub speed: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            description: Color::White,
            bar: Color::Rgb {
                r: 0x62,
                g: 0x06,
                b: 0xE0,
            },
            bar_finished: Color::Rgb {
                r: 0x62,
                g: 0x06,
                b: 0xE0,
            },
            bar_pulse: Color::Rgb {
                r: 0x62,
                g: 0x06,
                b: 0xE0,
            },
            bar_back: Color::AnsiValue(237),
            counts: Color::White,
            time: Color::AnsiValue(245),
            speed: Color::AnsiValue(249),
        }
    }
}

/// Symmetric string form for [`Color`] fields, stable across config
/// files. Named colors use snake case; the parameterized forms are
/// `ansi(n)` and `rgb(r,g,b)`.
mod color_token {
    use crossterm::style::Color;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::trivially_copy_pass_by_ref)] // serde `with` passes fields by reference
    pub(super) fn serialize<S: Serializer>(color: &Color, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&to_token(*color))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Color, D::Error> {
        let raw = String::deserialize(de)?;
        parse_token(&raw).ok_or_else(|| D::Error::custom(format!("unknown color token `{raw}`")))
    }

    fn to_token(color: Color) -> String {
        let name = match color {
            Color::Reset => "reset",
            Color::Black => "black",
            Color::DarkGrey => "dark_grey",
            Color::Red => "red",
            Color::DarkRed => "dark_red",
            Color::Green => "green",
            Color::DarkGreen => "dark_green",
            Color::Yellow => "yellow",
            Color::DarkYellow => "dark_yellow",
            Color::Blue => "blue",
            Color::DarkBlue => "dark_blue",
            Color::Magenta => "magenta",
            Color::DarkMagenta => "dark_magenta",
            Color::Cyan => "cyan",
            Color::DarkCyan => "dark_cyan",
            Color::White => "white",
            Color::Grey => "grey",
            Color::Rgb { r, g, b } => return format!("rgb({r},{g},{b})"),
            Color::AnsiValue(n) => return format!("ansi({n})"),
        };
        name.to_string()
    }

    fn parse_token(raw: &str) -> Option<Color> {
        let token = raw.trim().to_ascii_lowercase();
        if let Some(inner) = token.strip_prefix("rgb(").and_then(|s| s.strip_suffix(')')) {
            let mut parts = inner.splitn(3, ',').map(|p| p.trim().parse::<u8>().ok());
            let r = parts.next()??;
            let g = parts.next()??;
            let b = parts.next()??;
            return Some(Color::Rgb { r, g, b });
        }
        if let Some(inner) = token.strip_prefix("ansi(").and_then(|s| s.strip_suffix(')')) {
            return inner.trim().parse().ok().map(Color::AnsiValue);
        }
        let named = match token.as_str() {
            "reset" => Color::Reset,
            "black" => Color::Black,
            "dark_grey" => Color::DarkGrey,
            "red" => Color::Red,
            "dark_red" => Color::DarkRed,
            "green" => Color::Green,
            "dark_green" => Color::DarkGreen,
            "yellow" => Color::Yellow,
            "dark_yellow" => Color::DarkYellow,
            "blue" => Color::Blue,
            "dark_blue" => Color::DarkBlue,
            "magenta" => Color::Magenta,
            "dark_magenta" => Color::DarkMagenta,
            "cyan" => Color::Cyan,
            "dark_cyan" => Color::DarkCyan,
            "white" => Color::White,
            "grey" => Color::Grey,
            _ => return None,
        };
        Some(named)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_spot_checks() {
        let theme = Theme::default();
        assert_eq!(theme.description, Color::White);
        assert_eq!(theme.bar, theme.bar_finished);
        assert_eq!(theme.time, Color::AnsiValue(245));
    }

    #[test]
    fn partial_toml_files_fill_from_defaults() {
        let theme: Theme = toml::from_str("counts = \"red\"\n").unwrap();
        assert_eq!(theme.counts, Color::Red);
        assert_eq!(theme.bar, Theme::default().bar);
    }

    #[test]
    fn toml_roundtrip_preserves_every_field() {
        let theme = Theme {
            speed: Color::Rgb { r: 1, g: 2, b: 3 },
            counts: Color::DarkCyan,
            ..Theme::default()
        };
        let raw = toml::to_string(&theme).unwrap();
        let back: Theme = toml::from_str(&raw).unwrap();
        assert_eq!(back, theme);
    }

    #[test]
    fn color_tokens_accept_mixed_case_and_spaces() {
        let theme: Theme = toml::from_str("bar = \"Rgb(9, 9, 9)\"\ntime = \"ANSI(17)\"\n").unwrap();
        assert_eq!(theme.bar, Color::Rgb { r: 9, g: 9, b: 9 });
        assert_eq!(theme.time, Color::AnsiValue(17));
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        assert!(toml::from_str::<Theme>("bar = \"chartreuse\"\n").is_err());
    }
}
