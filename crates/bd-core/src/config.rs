//! Editor configuration.
//!
//! Every field has a default, so a host may pass a partial JSON object
//! (`{"surface_width": 1024}`) and keep the rest.

use crate::model::{Color, Stroke};
use serde::Deserialize;

/// Tunables for the drawing surface, factories, and interaction feedback.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Logical size of the drawing surface.
    pub surface_width: f32,
    pub surface_height: f32,

    /// Where new blocks are placed.
    pub block_origin: (f32, f32),
    pub block_fill: Color,
    pub block_width: f32,
    pub block_height: f32,
    pub block_text: String,
    pub block_font_size: f32,
    pub block_text_fill: Color,

    pub port_size: f32,
    pub port_font_size: f32,
    pub port_text_fill: Color,

    pub line_stroke: Stroke,
    /// Dash pattern `(on, off)` for a selected line.
    pub line_dash: (f32, f32),

    /// Outline applied to blocks that overlap or contain a dragged block.
    pub highlight: Stroke,

    /// Extra slack (surface units) around thin objects when hit testing.
    pub hit_tolerance: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            surface_width: 800.0,
            surface_height: 600.0,
            block_origin: (100.0, 100.0),
            block_fill: Color::BLUE,
            block_width: 100.0,
            block_height: 60.0,
            block_text: "Block".to_string(),
            block_font_size: 16.0,
            block_text_fill: Color::WHITE,
            port_size: 10.0,
            port_font_size: 12.0,
            port_text_fill: Color::BLACK,
            line_stroke: Stroke::new(Color::BLACK, 2.0),
            line_dash: (5.0, 5.0),
            highlight: Stroke::new(Color::GREEN, 2.0),
            hit_tolerance: 4.0,
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON override on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = EditorConfig::from_json(r#"{"surface_width": 1024, "block_fill": "tomato"}"#)
            .unwrap();
        assert_eq!(cfg.surface_width, 1024.0);
        assert_eq!(cfg.block_fill, Color::rgb8(255, 99, 71));
        assert_eq!(cfg.surface_height, 600.0);
        assert_eq!(cfg.block_text, "Block");
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(EditorConfig::from_json("{}").unwrap(), EditorConfig::default());
    }

    #[test]
    fn bad_color_is_rejected() {
        assert!(EditorConfig::from_json(r#"{"block_fill": "nope"}"#).is_err());
    }
}
