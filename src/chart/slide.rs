//! Slide shapes and inflection point resolution

use super::note::Key;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wait length of a slide that starts moving one beat after it appears
pub const DEFAULT_WAIT_LENGTH: u32 = 96;

/// Slide path shape, serialized with its ma2 code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlideShape {
    #[serde(rename = "SI_")]
    Straight,
    #[serde(rename = "SCL")]
    CircleLeft,
    #[serde(rename = "SCR")]
    CircleRight,
    #[serde(rename = "SV_")]
    VTurn,
    #[serde(rename = "SUL")]
    CurveLeft,
    #[serde(rename = "SUR")]
    CurveRight,
    #[serde(rename = "SF_")]
    Fan,
    #[serde(rename = "SLL")]
    BendLeft,
    #[serde(rename = "SLR")]
    BendRight,
    #[serde(rename = "SXL")]
    SelfWindLeft,
    #[serde(rename = "SXR")]
    SelfWindRight,
    #[serde(rename = "SSL")]
    ZigzagS,
    #[serde(rename = "SSR")]
    ZigzagZ,
}

impl SlideShape {
    pub const ALL: [SlideShape; 13] = [
        SlideShape::Straight,
        SlideShape::CircleLeft,
        SlideShape::CircleRight,
        SlideShape::VTurn,
        SlideShape::CurveLeft,
        SlideShape::CurveRight,
        SlideShape::Fan,
        SlideShape::BendLeft,
        SlideShape::BendRight,
        SlideShape::SelfWindLeft,
        SlideShape::SelfWindRight,
        SlideShape::ZigzagS,
        SlideShape::ZigzagZ,
    ];

    /// ma2 note type code
    pub fn code(self) -> &'static str {
        match self {
            SlideShape::Straight => "SI_",
            SlideShape::CircleLeft => "SCL",
            SlideShape::CircleRight => "SCR",
            SlideShape::VTurn => "SV_",
            SlideShape::CurveLeft => "SUL",
            SlideShape::CurveRight => "SUR",
            SlideShape::Fan => "SF_",
            SlideShape::BendLeft => "SLL",
            SlideShape::BendRight => "SLR",
            SlideShape::SelfWindLeft => "SXL",
            SlideShape::SelfWindRight => "SXR",
            SlideShape::ZigzagS => "SSL",
            SlideShape::ZigzagZ => "SSR",
        }
    }

    /// Shape traced by the reflected path
    pub fn mirrored(self) -> Self {
        match self {
            SlideShape::CircleLeft => SlideShape::CircleRight,
            SlideShape::CircleRight => SlideShape::CircleLeft,
            SlideShape::CurveLeft => SlideShape::CurveRight,
            SlideShape::CurveRight => SlideShape::CurveLeft,
            SlideShape::BendLeft => SlideShape::BendRight,
            SlideShape::BendRight => SlideShape::BendLeft,
            SlideShape::SelfWindLeft => SlideShape::SelfWindRight,
            SlideShape::SelfWindRight => SlideShape::SelfWindLeft,
            SlideShape::ZigzagS => SlideShape::ZigzagZ,
            SlideShape::ZigzagZ => SlideShape::ZigzagS,
            symmetric => symmetric,
        }
    }

    /// Shapes whose path bends at a resolved inflection point
    pub fn is_bend(self) -> bool {
        matches!(self, SlideShape::BendLeft | SlideShape::BendRight)
    }
}

impl FromStr for SlideShape {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|shape| shape.code() == s)
            .ok_or_else(|| format!("unknown slide type '{}'", s))
    }
}

impl fmt::Display for SlideShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Slide-specific note fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub shape: SlideShape,
    /// Ring position where the slide ends
    pub end_key: Key,
    /// Ticks between appearance and motion start
    #[serde(default = "default_wait_length")]
    pub wait_length: u32,
    /// Duration of the motion
    pub last_length: u32,
    /// Duration used while chained to the previous slide, `last_length` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_last_length: Option<u32>,
}

fn default_wait_length() -> u32 {
    DEFAULT_WAIT_LENGTH
}

impl Slide {
    pub fn new(shape: SlideShape, end_key: Key, wait_length: u32, last_length: u32) -> Self {
        Self {
            shape,
            end_key,
            wait_length,
            last_length,
            fixed_last_length: None,
        }
    }

    /// Motion length used while chained to the previous slide
    pub fn chained_length(&self) -> u32 {
        self.fixed_last_length.unwrap_or(self.last_length)
    }

    pub fn is_delayed(&self) -> bool {
        self.wait_length != DEFAULT_WAIT_LENGTH
    }
}

/// Wrap a display position into 1..=8
fn wrap_position(position: i8) -> u8 {
    ((position - 1).rem_euclid(Key::COUNT as i8) + 1) as u8
}

/// Resolve the inflection point of a bending slide.
///
/// Returns the 1-based ring position of the bend together with the shape the
/// bend must be drawn with. When the first candidate lands on an endpoint the
/// point moves to the opposite side of the ring and the shape flips; a second
/// collision is an error.
pub fn resolve_inflection(key: Key, end_key: Key, shape: SlideShape) -> Result<(u8, SlideShape)> {
    let step = match shape {
        SlideShape::BendLeft => -2,
        SlideShape::BendRight => 2,
        other => return Err(Error::NotBendingSlide(other.code())),
    };

    let start = key.position();
    let end = end_key.position();
    let collides = |point: u8| point == start || point == end;

    let point = wrap_position(start as i8 + step);
    if !collides(point) {
        return Ok((point, shape));
    }

    let corrected = wrap_position(point as i8 + 4);
    if collides(corrected) {
        return Err(Error::DegenerateInflection {
            key: key.index(),
            end_key: end_key.index(),
            point: corrected,
        });
    }

    Ok((corrected, shape.mirrored()))
}
