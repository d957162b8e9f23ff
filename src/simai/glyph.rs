//! Slide glyph table

use crate::chart::{Key, SlideShape};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Glyph pair for circle slides, chosen by which half of the ring the slide starts on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalfGlyph {
    pub upper: String,
    pub lower: String,
}

impl HalfGlyph {
    fn new(upper: &str, lower: &str) -> Self {
        Self {
            upper: upper.to_string(),
            lower: lower.to_string(),
        }
    }

    fn pick(&self, key: Key) -> &str {
        if key.is_upper_half() {
            &self.upper
        } else {
            &self.lower
        }
    }
}

/// Slide shape to Simai glyph mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphTable {
    pub straight: String,
    pub v_turn: String,
    pub fan: String,
    pub circle_left: HalfGlyph,
    pub circle_right: HalfGlyph,
    pub curve_left: String,
    pub curve_right: String,
    /// Followed by the resolved inflection point
    pub bend: String,
    pub self_wind_left: String,
    pub self_wind_right: String,
    pub zigzag_s: String,
    pub zigzag_z: String,
}

impl Default for GlyphTable {
    fn default() -> Self {
        Self {
            straight: "-".into(),
            v_turn: "v".into(),
            fan: "w".into(),
            circle_left: HalfGlyph::new("<", ">"),
            circle_right: HalfGlyph::new(">", "<"),
            curve_left: "p".into(),
            curve_right: "q".into(),
            bend: "V".into(),
            self_wind_left: "pp".into(),
            self_wind_right: "qq".into(),
            zigzag_s: "s".into(),
            zigzag_z: "z".into(),
        }
    }
}

impl GlyphTable {
    /// Load overrides from a JSON file; missing entries keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Glyph for a slide starting at `key`
    pub fn glyph(&self, shape: SlideShape, key: Key) -> &str {
        match shape {
            SlideShape::Straight => self.straight.as_str(),
            SlideShape::VTurn => self.v_turn.as_str(),
            SlideShape::Fan => self.fan.as_str(),
            SlideShape::CircleLeft => self.circle_left.pick(key),
            SlideShape::CircleRight => self.circle_right.pick(key),
            SlideShape::CurveLeft => self.curve_left.as_str(),
            SlideShape::CurveRight => self.curve_right.as_str(),
            SlideShape::BendLeft | SlideShape::BendRight => self.bend.as_str(),
            SlideShape::SelfWindLeft => self.self_wind_left.as_str(),
            SlideShape::SelfWindRight => self.self_wind_right.as_str(),
            SlideShape::ZigzagS => self.zigzag_s.as_str(),
            SlideShape::ZigzagZ => self.zigzag_z.as_str(),
        }
    }
}
