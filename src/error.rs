use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid ring key: '{0}' (expected 0-7)")]
    InvalidKey(String),

    #[error("The given rotation method is invalid. Given: {0}")]
    InvalidRotation(String),

    #[error("Inflection point {point} coincides with an endpoint (key {key}, end key {end_key})")]
    DegenerateInflection { key: u8, end_key: u8, point: u8 },

    #[error("Slide shape {0} has no inflection point")]
    NotBendingSlide(&'static str),

    #[error("Note at bar {bar} tick {tick} needs an explicit tempo but has bpm {bpm}")]
    MissingTempo { bar: u32, tick: u32, bpm: f64 },

    #[error("No utage chart supplied for '{0}'")]
    NoUtageCharts(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
