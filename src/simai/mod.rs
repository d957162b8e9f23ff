pub mod duration;
pub mod encoder;
pub mod glyph;

pub use duration::{DurationNotation, SimaiDuration, Tempo, TICKS_PER_BAR};
pub use encoder::{duration_basis, Format, NoteEncoder};
pub use glyph::{GlyphTable, HalfGlyph};
