//! Song metadata consumed by the song compiler

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Difficulty slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Basic,
    Advanced,
    Expert,
    Master,
    Remaster,
    Utage,
}

impl Difficulty {
    /// Standard slots in emission order
    pub const STANDARD: [Difficulty; 6] = [
        Difficulty::Easy,
        Difficulty::Basic,
        Difficulty::Advanced,
        Difficulty::Expert,
        Difficulty::Master,
        Difficulty::Remaster,
    ];

    /// `N` in `&lv_N` / `&inote_N`
    pub fn slot(self) -> usize {
        self as usize + 1
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Basic => "Basic",
            Difficulty::Advanced => "Advanced",
            Difficulty::Expert => "Expert",
            Difficulty::Master => "Master",
            Difficulty::Remaster => "Remaster",
            Difficulty::Utage => "Utage",
        }
    }
}

/// Level and credit of one difficulty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyInfo {
    /// Integer precision level, e.g. "13+"
    pub level: Option<String>,
    /// Decimal precision level, e.g. "13.7"
    pub decimal_level: Option<String>,
    /// Chart author credit
    pub maker: Option<String>,
}

impl DifficultyInfo {
    pub fn new(level: &str, maker: &str) -> Self {
        Self {
            level: Some(level.to_string()),
            decimal_level: None,
            maker: Some(maker.to_string()),
        }
    }

    pub fn with_decimal(mut self, decimal: &str) -> Self {
        self.decimal_level = Some(decimal.to_string());
        self
    }

    /// Integer level, if present and non-empty
    pub fn level(&self) -> Option<&str> {
        self.level.as_deref().filter(|l| !l.is_empty())
    }

    /// Decimal level, if present and non-empty
    pub fn decimal_level(&self) -> Option<&str> {
        self.decimal_level.as_deref().filter(|l| !l.is_empty())
    }

    /// Level to print: the decimal level under strict mode when available
    pub fn display_level(&self, strict_decimal: bool) -> Option<&str> {
        let level = self.level()?;
        match self.decimal_level() {
            Some(decimal) if strict_decimal => Some(decimal),
            _ => Some(level),
        }
    }
}

/// Song-wide information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SongMetadata {
    pub name: String,
    pub bpm: String,
    pub composer: String,
    pub genre: String,
    pub music_id: String,
    /// Appended to the title of DX charts, e.g. " [DX]"
    pub dx_suffix: String,
    /// Used to look up rotation directives
    pub track_id: String,
    pub track_version: String,
    /// Song is on the DX cabinet
    pub is_dx: bool,
    pub difficulties: BTreeMap<Difficulty, DifficultyInfo>,
}

impl SongMetadata {
    pub fn difficulty(&self, difficulty: Difficulty) -> Option<&DifficultyInfo> {
        self.difficulties.get(&difficulty)
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty, info: DifficultyInfo) {
        self.difficulties.insert(difficulty, info);
    }

    /// Credit printed in the song-wide `&des` field
    pub fn master_maker(&self) -> &str {
        self.difficulty(Difficulty::Master)
            .and_then(|info| info.maker.as_deref())
            .unwrap_or_default()
    }
}
