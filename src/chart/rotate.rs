//! Cabinet rotation and mirroring

use super::note::{Key, Note, NoteKind, TouchArea};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Ring remapping applied to every note of a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationMethod {
    #[default]
    Identity,
    Clockwise90,
    Clockwise180,
    Counterclockwise90,
    Counterclockwise180,
    UpSideDown,
    LeftToRight,
}

impl RotationMethod {
    /// Reflections reverse the handedness of slide shapes
    pub fn is_reflection(self) -> bool {
        matches!(self, RotationMethod::UpSideDown | RotationMethod::LeftToRight)
    }

    /// Remap a position on the A/B ring
    pub fn apply(self, key: Key) -> Key {
        self.remap(key, 7, 3)
    }

    /// Remap a D/E sensor, whose mirror axes pass through the sensors themselves
    fn apply_boundary(self, key: Key) -> Key {
        self.remap(key, 0, 4)
    }

    fn remap(self, key: Key, horizontal_axis: i8, vertical_axis: i8) -> Key {
        let i = key.index() as i8;
        match self {
            RotationMethod::Identity => key,
            RotationMethod::Clockwise90 => key.offset(2),
            RotationMethod::Clockwise180 | RotationMethod::Counterclockwise180 => key.offset(4),
            RotationMethod::Counterclockwise90 => key.offset(-2),
            RotationMethod::LeftToRight => key.offset(horizontal_axis - 2 * i),
            RotationMethod::UpSideDown => key.offset(vertical_axis - 2 * i),
        }
    }
}

impl FromStr for RotationMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "None" | "Identity" => Ok(RotationMethod::Identity),
            "Clockwise90" => Ok(RotationMethod::Clockwise90),
            "Clockwise180" => Ok(RotationMethod::Clockwise180),
            "Counterclockwise90" => Ok(RotationMethod::Counterclockwise90),
            "Counterclockwise180" => Ok(RotationMethod::Counterclockwise180),
            "UpSideDown" => Ok(RotationMethod::UpSideDown),
            "LeftToRight" => Ok(RotationMethod::LeftToRight),
            other => Err(Error::InvalidRotation(other.to_string())),
        }
    }
}

impl Note {
    /// Copy of this note as seen on a rotated or mirrored cabinet
    pub fn rotated(&self, method: RotationMethod) -> Note {
        let mut note = self.clone();
        match &mut note.kind {
            NoteKind::Tap { .. } | NoteKind::Hold { .. } => {
                note.key = method.apply(note.key);
            }
            NoteKind::Slide(slide) => {
                note.key = method.apply(note.key);
                slide.end_key = method.apply(slide.end_key);
                if method.is_reflection() {
                    slide.shape = slide.shape.mirrored();
                }
            }
            NoteKind::Touch { area, .. } | NoteKind::TouchHold { area, .. } => {
                note.key = match area {
                    TouchArea::C => note.key,
                    a if a.is_boundary() => method.apply_boundary(note.key),
                    _ => method.apply(note.key),
                };
            }
        }
        note
    }
}

/// Track id to rotation directive mapping
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RotationTable {
    directives: HashMap<String, String>,
}

impl RotationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON object of `"track id": "Method"` pairs
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn insert(&mut self, track_id: impl Into<String>, method: impl Into<String>) {
        self.directives.insert(track_id.into(), method.into());
    }

    /// Rotation for a track; unknown tracks are not rotated
    pub fn lookup(&self, track_id: &str) -> Result<RotationMethod> {
        match self.directives.get(track_id) {
            Some(name) => name.parse(),
            None => Ok(RotationMethod::Identity),
        }
    }
}
