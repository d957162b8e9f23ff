//! JSON song bundle: metadata plus already parsed charts

use super::metadata::{Difficulty, SongMetadata};
use crate::chart::Chart;
use crate::error::{Error, Result};
use crate::simai::{duration_basis, Tempo};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SongBundle {
    pub metadata: SongMetadata,
    /// Standard charts keyed by difficulty
    pub charts: BTreeMap<Difficulty, Chart>,
    /// Alternate charts for utage compilation
    pub utage: Vec<Chart>,
}

impl SongBundle {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let bundle: Self = serde_json::from_str(text)?;
        bundle.validate()?;
        Ok(bundle)
    }

    /// Reject notes whose duration is written against a missing tempo
    pub fn validate(&self) -> Result<()> {
        let notes = self
            .charts
            .values()
            .chain(&self.utage)
            .flat_map(|chart| &chart.notes);
        for note in notes {
            if let Some((_, Tempo::Explicit(bpm))) = duration_basis(note) {
                if bpm <= 0.0 {
                    return Err(Error::MissingTempo {
                        bar: note.bar,
                        tick: note.tick,
                        bpm,
                    });
                }
            }
        }
        Ok(())
    }
}
