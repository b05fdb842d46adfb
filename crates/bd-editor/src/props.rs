//! User-entered properties for new blocks and ports.
//!
//! Prompt answers arrive as raw strings. Anything empty or unusable falls
//! back to the configured default without telling the user.

use bd_core::EditorConfig;
use bd_core::model::{Color, PortDirection};

/// Parse the leading integer of a string the way a browser `parseInt` does:
/// leading whitespace and an optional sign, then digits up to the first
/// non-digit. `"120px"` → 120, `"abc"` → None.
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return None;
    }
    // A digit run only fails to parse on overflow.
    Some(sign * digits.parse::<i64>().unwrap_or(i64::MAX))
}

/// A positive dimension from user input, or `default`.
/// Zero and negative values are treated as missing.
fn dimension_or(input: &str, default: f32) -> f32 {
    match parse_int_prefix(input) {
        Some(n) if n > 0 => n as f32,
        _ => default,
    }
}

fn text_or(input: &str, default: &str) -> String {
    if input.is_empty() {
        default.to_string()
    } else {
        input.to_string()
    }
}

/// Properties of a block about to be created.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockProps {
    pub fill: Color,
    pub width: f32,
    pub height: f32,
    pub text: String,
}

impl BlockProps {
    /// Configured defaults.
    pub fn defaults(config: &EditorConfig) -> Self {
        Self {
            fill: config.block_fill,
            width: config.block_width,
            height: config.block_height,
            text: config.block_text.clone(),
        }
    }

    /// Build from raw prompt answers, substituting defaults field by field.
    pub fn from_input(
        color: &str,
        width: &str,
        height: &str,
        text: &str,
        config: &EditorConfig,
    ) -> Self {
        Self {
            fill: Color::parse(color).unwrap_or(config.block_fill),
            width: dimension_or(width, config.block_width),
            height: dimension_or(height, config.block_height),
            text: text_or(text, &config.block_text),
        }
    }
}

/// Properties of a port about to be created.
#[derive(Debug, Clone, PartialEq)]
pub struct PortProps {
    pub direction: PortDirection,
    pub label: String,
    pub size: f32,
}

impl PortProps {
    pub fn defaults(direction: PortDirection, config: &EditorConfig) -> Self {
        Self {
            direction,
            label: direction.default_label().to_string(),
            size: config.port_size,
        }
    }

    pub fn from_input(
        direction: PortDirection,
        label: &str,
        size: &str,
        config: &EditorConfig,
    ) -> Self {
        Self {
            direction,
            label: text_or(label, direction.default_label()),
            size: dimension_or(size, config.port_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_int_prefix_like_a_browser() {
        assert_eq!(parse_int_prefix("120"), Some(120));
        assert_eq!(parse_int_prefix("  42px"), Some(42));
        assert_eq!(parse_int_prefix("-7"), Some(-7));
        assert_eq!(parse_int_prefix("12.9"), Some(12));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("-"), None);
    }

    #[test]
    fn oversized_numbers_saturate() {
        assert_eq!(parse_int_prefix("99999999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_int_prefix("-99999999999999999999999"), Some(-i64::MAX));

        let cfg = EditorConfig::default();
        let props = BlockProps::from_input("", "99999999999999999999999", "", "", &cfg);
        assert_eq!(props.width, i64::MAX as f32);
        assert_eq!(props.height, 60.0);
    }

    #[test]
    fn block_props_fall_back_per_field() {
        let cfg = EditorConfig::default();
        let props = BlockProps::from_input("purple", "wide", "0", "", &cfg);
        assert_eq!(
            props,
            BlockProps {
                fill: Color::rgb8(128, 0, 128),
                width: 100.0,
                height: 60.0,
                text: "Block".to_string(),
            }
        );
    }

    #[test]
    fn block_props_accept_valid_input() {
        let cfg = EditorConfig::default();
        let props = BlockProps::from_input("#FF0000", "200", "80px", "Decoder", &cfg);
        assert_eq!(props.fill, Color::RED);
        assert_eq!(props.width, 200.0);
        assert_eq!(props.height, 80.0);
        assert_eq!(props.text, "Decoder");
    }

    #[test]
    fn unknown_color_uses_default() {
        let cfg = EditorConfig::default();
        let props = BlockProps::from_input("sparkly", "", "", "", &cfg);
        assert_eq!(props, BlockProps::defaults(&cfg));
    }

    #[test]
    fn port_props_defaults_follow_direction() {
        let cfg = EditorConfig::default();
        let input = PortProps::from_input(PortDirection::Input, "", "-3", &cfg);
        assert_eq!(input.label, "Input");
        assert_eq!(input.size, 10.0);

        let output = PortProps::from_input(PortDirection::Output, "clk", "16", &cfg);
        assert_eq!(output.label, "clk");
        assert_eq!(output.size, 16.0);
    }
}
