//! Note and chart encoding

use super::duration::{DurationNotation, SimaiDuration, Tempo};
use super::glyph::GlyphTable;
use crate::chart::{resolve_inflection, Chart, Note, NoteKind, Slide, SpecialState, TouchArea};
use crate::error::Result;
use std::fmt::Write;
use tracing::warn;

/// Output format of the encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Tab separated ma2 fields, one note per line
    Raw,
    /// Simai tokens
    #[default]
    Notation,
}

/// Pick the length and tempo basis of a note's duration annotation.
///
/// Returns `None` for notes without a duration, including zero-length holds
/// and slides.
pub fn duration_basis(note: &Note) -> Option<(u32, Tempo)> {
    let (ticks, explicit) = match &note.kind {
        NoteKind::Slide(slide) => {
            let explicit = note.tick_bpm_disagree || slide.is_delayed();
            if explicit && note.special == SpecialState::ConnectingSlide {
                (slide.chained_length(), true)
            } else {
                (slide.last_length, explicit)
            }
        }
        NoteKind::Hold { last_length } | NoteKind::TouchHold { last_length, .. } => {
            (*last_length, note.tick_bpm_disagree)
        }
        NoteKind::Tap { .. } | NoteKind::Touch { .. } => return None,
    };
    if ticks == 0 {
        return None;
    }
    if !explicit {
        return Some((ticks, Tempo::Nominal));
    }
    if note.bpm <= 0.0 {
        warn!(
            "Note at bar {} tick {} needs an explicit tempo but has bpm {}",
            note.bar, note.tick, note.bpm
        );
    }
    Some((ticks, Tempo::Explicit(note.bpm)))
}

/// Encodes notes and charts with an injected glyph table and duration grammar
#[derive(Debug, Clone)]
pub struct NoteEncoder<D = SimaiDuration> {
    glyphs: GlyphTable,
    durations: D,
}

impl NoteEncoder {
    pub fn new(glyphs: GlyphTable) -> Self {
        Self::with_durations(glyphs, SimaiDuration::default())
    }
}

impl Default for NoteEncoder {
    fn default() -> Self {
        Self::new(GlyphTable::default())
    }
}

impl<D: DurationNotation> NoteEncoder<D> {
    pub fn with_durations(glyphs: GlyphTable, durations: D) -> Self {
        Self { glyphs, durations }
    }

    /// Encode one note
    pub fn encode(&self, note: &Note, format: Format) -> Result<String> {
        match format {
            Format::Raw => Ok(encode_raw(note)),
            Format::Notation => self.encode_notation(note),
        }
    }

    /// Encode a whole chart body: Simai tokens are concatenated, raw lines
    /// are newline terminated
    pub fn compile_chart(&self, chart: &Chart, format: Format) -> Result<String> {
        let mut out = String::new();
        for note in &chart.notes {
            out.push_str(&self.encode(note, format)?);
            if format == Format::Raw {
                out.push('\n');
            }
        }
        Ok(out)
    }

    fn encode_notation(&self, note: &Note) -> Result<String> {
        let mut out = String::new();
        let suffix = note.special.suffix();
        match &note.kind {
            NoteKind::Tap { .. } => {
                let _ = write!(out, "{}{}", note.key.position(), suffix);
            }
            NoteKind::Hold { .. } => {
                let _ = write!(out, "{}{}h", note.key.position(), suffix);
            }
            NoteKind::Slide(slide) => self.encode_slide(note, slide, &mut out)?,
            NoteKind::Touch { area, firework } | NoteKind::TouchHold { area, firework, .. } => {
                out.push(area.letter());
                if *area != TouchArea::C {
                    let _ = write!(out, "{}", note.key.position());
                }
                if *firework {
                    out.push('f');
                }
                out.push_str(suffix);
                if matches!(note.kind, NoteKind::TouchHold { .. }) {
                    out.push('h');
                }
            }
        }

        if let Some((ticks, tempo)) = duration_basis(note) {
            out.push_str(&self.durations.format(ticks, tempo));
        }
        Ok(out)
    }

    fn encode_slide(&self, note: &Note, slide: &Slide, out: &mut String) -> Result<()> {
        out.push_str(self.glyphs.glyph(slide.shape, note.key));
        if slide.shape.is_bend() {
            let (point, _) = resolve_inflection(note.key, slide.end_key, slide.shape)?;
            let _ = write!(out, "{}", point);
        }
        let _ = write!(out, "{}{}", slide.end_key.position(), note.special.suffix());
        Ok(())
    }
}

/// ma2 type code including the special state prefix
fn type_code(note: &Note) -> String {
    let body = match &note.kind {
        NoteKind::Tap { star: false } => "TAP",
        NoteKind::Tap { star: true } => "STR",
        NoteKind::Hold { .. } => "HLD",
        NoteKind::Slide(slide) => slide.shape.code(),
        NoteKind::Touch { .. } => "TTP",
        NoteKind::TouchHold { .. } => "THO",
    };
    format!("{}{}", note.special.prefix(), body)
}

fn encode_raw(note: &Note) -> String {
    let mut out = format!("{}\t{}\t{}\t{}", type_code(note), note.bar, note.tick, note.key);
    match &note.kind {
        NoteKind::Tap { .. } => {}
        NoteKind::Hold { last_length } => {
            let _ = write!(out, "\t{}", last_length);
        }
        NoteKind::Slide(slide) => {
            let _ = write!(
                out,
                "\t{}\t{}\t{}",
                slide.wait_length, slide.last_length, slide.end_key
            );
        }
        NoteKind::Touch { area, firework } => {
            let _ = write!(out, "\t{}\t{}", area.letter(), u8::from(*firework));
        }
        NoteKind::TouchHold {
            area,
            last_length,
            firework,
        } => {
            let _ = write!(
                out,
                "\t{}\t{}\t{}",
                last_length,
                area.letter(),
                u8::from(*firework)
            );
        }
    }
    out
}
