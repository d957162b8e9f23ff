//! In-memory chart model
//!
//! Charts arrive here already parsed; this module owns the note variants, the
//! slide geometry and the cabinet rotation applied before encoding.

pub mod note;
pub mod rotate;
pub mod slide;

pub use note::{Key, Note, NoteKind, SpecialState, TouchArea};
pub use rotate::{RotationMethod, RotationTable};
pub use slide::{resolve_inflection, Slide, SlideShape, DEFAULT_WAIT_LENGTH};

use serde::{Deserialize, Serialize};

/// Ordered notes of one difficulty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    /// Notes in appearance order
    pub notes: Vec<Note>,
    /// Chart was made for the DX cabinet
    #[serde(default)]
    pub is_dx: bool,
}

impl Chart {
    pub fn new(notes: Vec<Note>, is_dx: bool) -> Self {
        Self { notes, is_dx }
    }

    pub fn rotated(&self, method: RotationMethod) -> Chart {
        Chart {
            notes: self.notes.iter().map(|n| n.rotated(method)).collect(),
            is_dx: self.is_dx,
        }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
