//! Note model: ring keys, special states and the closed set of note kinds

use super::slide::{Slide, SlideShape};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ring position, 0-7 internally and 1-8 in Simai notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Key(u8);

impl Key {
    /// Number of positions on the ring
    pub const COUNT: u8 = 8;

    pub fn new(index: u8) -> Result<Self> {
        if index < Self::COUNT {
            Ok(Self(index))
        } else {
            Err(Error::InvalidKey(index.to_string()))
        }
    }

    /// 0-based ring index
    pub fn index(self) -> u8 {
        self.0
    }

    /// 1-based display position
    pub fn position(self) -> u8 {
        self.0 + 1
    }

    /// Move around the ring by `steps` (positive = clockwise)
    pub fn offset(self, steps: i8) -> Self {
        Self((self.0 as i16 + steps as i16).rem_euclid(Self::COUNT as i16) as u8)
    }

    /// Keys 0, 1, 6 and 7 sit on the upper half of the ring
    pub fn is_upper_half(self) -> bool {
        matches!(self.0, 0 | 1 | 6 | 7)
    }
}

impl FromStr for Key {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.as_bytes() {
            [b @ b'0'..=b'7'] => Ok(Self(b - b'0')),
            _ => Err(Error::InvalidKey(s.to_string())),
        }
    }
}

impl TryFrom<String> for Key {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scoring/grouping modifier layered on top of any note kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialState {
    #[default]
    None,
    Break,
    Ex,
    BreakEx,
    /// Slide segment chained onto the previous slide
    ConnectingSlide,
}

impl SpecialState {
    /// Simai suffix appended after the note body
    pub fn suffix(self) -> &'static str {
        match self {
            SpecialState::Break => "b",
            SpecialState::Ex => "x",
            SpecialState::BreakEx => "bx",
            SpecialState::None | SpecialState::ConnectingSlide => "",
        }
    }

    /// ma2 type prefix
    pub fn prefix(self) -> &'static str {
        match self {
            SpecialState::None => "NM",
            SpecialState::Break => "BR",
            SpecialState::Ex => "EX",
            SpecialState::BreakEx => "BX",
            SpecialState::ConnectingSlide => "CN",
        }
    }
}

/// Touch sensor area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TouchArea {
    A,
    B,
    C,
    D,
    E,
}

impl TouchArea {
    pub fn letter(self) -> char {
        match self {
            TouchArea::A => 'A',
            TouchArea::B => 'B',
            TouchArea::C => 'C',
            TouchArea::D => 'D',
            TouchArea::E => 'E',
        }
    }

    /// D and E sensors sit on the boundaries between A sensors
    pub fn is_boundary(self) -> bool {
        matches!(self, TouchArea::D | TouchArea::E)
    }
}

/// Variant-specific note data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NoteKind {
    Tap {
        /// Slide start; its slides follow it in the token stream
        #[serde(default)]
        star: bool,
    },
    Hold {
        last_length: u32,
    },
    Slide(Slide),
    Touch {
        area: TouchArea,
        #[serde(default)]
        firework: bool,
    },
    TouchHold {
        area: TouchArea,
        last_length: u32,
        #[serde(default)]
        firework: bool,
    },
}

/// A single chart event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Measure index
    pub bar: u32,
    /// Offset inside the measure
    pub tick: u32,
    /// Ring position where the note begins
    pub key: Key,
    #[serde(default)]
    pub special: SpecialState,
    /// Local tempo, used when the duration needs an explicit tempo
    #[serde(default)]
    pub bpm: f64,
    /// Local tempo differs from the chart's nominal tempo
    #[serde(default)]
    pub tick_bpm_disagree: bool,
    #[serde(flatten)]
    pub kind: NoteKind,
}

impl Note {
    pub fn new(bar: u32, tick: u32, key: Key, kind: NoteKind) -> Self {
        Self {
            bar,
            tick,
            key,
            special: SpecialState::None,
            bpm: 0.0,
            tick_bpm_disagree: false,
            kind,
        }
    }

    pub fn tap(bar: u32, tick: u32, key: Key) -> Self {
        Self::new(bar, tick, key, NoteKind::Tap { star: false })
    }

    pub fn star(bar: u32, tick: u32, key: Key) -> Self {
        Self::new(bar, tick, key, NoteKind::Tap { star: true })
    }

    pub fn hold(bar: u32, tick: u32, key: Key, last_length: u32) -> Self {
        Self::new(bar, tick, key, NoteKind::Hold { last_length })
    }

    pub fn slide(
        shape: SlideShape,
        bar: u32,
        tick: u32,
        key: Key,
        wait_length: u32,
        last_length: u32,
        end_key: Key,
    ) -> Self {
        Self::new(
            bar,
            tick,
            key,
            NoteKind::Slide(Slide::new(shape, end_key, wait_length, last_length)),
        )
    }

    pub fn touch(bar: u32, tick: u32, key: Key, area: TouchArea) -> Self {
        Self::new(bar, tick, key, NoteKind::Touch { area, firework: false })
    }

    pub fn touch_hold(bar: u32, tick: u32, key: Key, area: TouchArea, last_length: u32) -> Self {
        Self::new(
            bar,
            tick,
            key,
            NoteKind::TouchHold {
                area,
                last_length,
                firework: false,
            },
        )
    }

    pub fn with_special(mut self, special: SpecialState) -> Self {
        self.special = special;
        self
    }

    pub fn with_bpm(mut self, bpm: f64) -> Self {
        self.bpm = bpm;
        self
    }

    pub fn with_tick_bpm_disagree(mut self, disagree: bool) -> Self {
        self.tick_bpm_disagree = disagree;
        self
    }

    /// Set the duration used when this slide is chained to the previous one
    pub fn with_fixed_last_length(mut self, length: u32) -> Self {
        if let NoteKind::Slide(slide) = &mut self.kind {
            slide.fixed_last_length = Some(length);
        }
        self
    }

    /// Only slides can be delayed
    pub fn is_delayed(&self) -> bool {
        match &self.kind {
            NoteKind::Slide(slide) => slide.is_delayed(),
            _ => false,
        }
    }

    pub fn end_key(&self) -> Option<Key> {
        match &self.kind {
            NoteKind::Slide(slide) => Some(slide.end_key),
            _ => None,
        }
    }
}
