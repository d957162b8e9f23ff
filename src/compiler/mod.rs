//! Simai song compiler - assembles per-difficulty charts into one maidata document

pub mod bundle;
pub mod metadata;

pub use bundle::SongBundle;
pub use metadata::{Difficulty, DifficultyInfo, SongMetadata};

use crate::chart::{Chart, RotationMethod, RotationTable};
use crate::error::{Error, Result};
use crate::simai::{Format, GlyphTable, NoteEncoder};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Name of the compiled document inside the output folder
pub const OUTPUT_FILE: &str = "maidata.txt";

/// Marker for utage titles and levels
pub const UTAGE_MARK: &str = "宴";

/// Tool identification written into every header
pub mod tool {
    pub const CONVERTER: &str = "maichart";
    pub const TOOL: &str = "maichart";
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const MESSAGE: &str = "Converted from ma2 by maichart";
}

/// Song compiler state
pub struct SimaiCompiler {
    /// Prefer decimal levels when the metadata carries them
    pub strict_decimal: bool,
    encoder: NoteEncoder,
    rotations: RotationTable,
    /// Description of every chart emitted so far
    compiled_charts: Vec<String>,
}

impl SimaiCompiler {
    pub fn new(strict_decimal: bool) -> Self {
        Self {
            strict_decimal,
            encoder: NoteEncoder::default(),
            rotations: RotationTable::new(),
            compiled_charts: Vec::new(),
        }
    }

    pub fn with_glyphs(mut self, glyphs: GlyphTable) -> Self {
        self.encoder = NoteEncoder::new(glyphs);
        self
    }

    pub fn with_rotations(mut self, rotations: RotationTable) -> Self {
        self.rotations = rotations;
        self
    }

    /// Charts emitted so far, as `"{title}{suffix} [{difficulty}]"`
    pub fn compiled_charts(&self) -> &[String] {
        &self.compiled_charts
    }

    /// Body of a single chart, without headers
    pub fn compile_chart(&self, chart: &Chart, format: Format) -> Result<String> {
        self.encoder.compile_chart(chart, format)
    }

    /// Compile a bundle in standard or utage mode
    pub fn compile_bundle(&mut self, bundle: &SongBundle, utage: bool) -> Result<String> {
        if utage {
            self.compile_utage(&bundle.metadata, &bundle.utage)
        } else {
            self.compile(&bundle.metadata, &bundle.charts)
        }
    }

    /// Compile the standard difficulties of a song
    pub fn compile(
        &mut self,
        metadata: &SongMetadata,
        charts: &BTreeMap<Difficulty, Chart>,
    ) -> Result<String> {
        let rotation = self.rotation(metadata)?;
        let mut result = self.header(metadata, &format!("{}{}", metadata.name, metadata.dx_suffix));

        let mut present = Vec::new();
        for difficulty in Difficulty::STANDARD {
            let Some(info) = metadata.difficulty(difficulty) else {
                continue;
            };
            let (Some(level), Some(maker)) = (info.display_level(self.strict_decimal), &info.maker)
            else {
                continue;
            };
            let Some(chart) = charts.get(&difficulty) else {
                warn!("{} has a {} level but no chart", metadata.name, difficulty.label());
                continue;
            };

            let slot = difficulty.slot();
            let _ = write!(result, "&lv_{}={}\n&des_{}={}\n\n", slot, level, slot, maker);
            present.push((difficulty, chart));
        }
        info!("Finished writing header of {}", metadata.name);

        let mut compiled = Vec::new();
        for (difficulty, chart) in present {
            let body = self.compile_rotated(chart, rotation)?;
            let _ = write!(result, "&inote_{}=\n{}\n\n", difficulty.slot(), body);

            let suffix = if chart.is_dx { metadata.dx_suffix.as_str() } else { "" };
            compiled.push(format!("{}{} [{}]", metadata.name, suffix, difficulty.label()));
            debug!("Compiled {} ({} notes)", difficulty.label(), chart.len());
        }

        self.compiled_charts.extend(compiled);
        info!("Finished composing.");
        Ok(result)
    }

    /// Compile alternate (utage) charts.
    ///
    /// A single chart lands in slot 7; several charts take slots 2, 3, ...
    pub fn compile_utage(&mut self, metadata: &SongMetadata, charts: &[Chart]) -> Result<String> {
        if charts.is_empty() {
            return Err(Error::NoUtageCharts(metadata.name.clone()));
        }
        let rotation = self.rotation(metadata)?;
        let mut result = self.header(metadata, &format!("{}[{}]", metadata.name, UTAGE_MARK));

        let level = self.utage_level(metadata);
        let first_slot = if charts.len() > 1 { 2 } else { Difficulty::Utage.slot() };
        for slot in first_slot..first_slot + charts.len() {
            let _ = write!(result, "&lv_{}={}\n\n", slot, level);
        }
        info!("Finished writing header of {}", metadata.name);

        let mut compiled = Vec::new();
        for (slot, chart) in (first_slot..).zip(charts) {
            let body = self.compile_rotated(chart, rotation)?;
            let _ = write!(result, "&inote_{}=\n{}\n\n", slot, body);
            compiled.push(format!("{}Utage [{}]", metadata.name, UTAGE_MARK));
            debug!("Compiled utage slot {} ({} notes)", slot, chart.len());
        }

        self.compiled_charts.extend(compiled);
        info!("Finished composing.");
        Ok(result)
    }

    fn rotation(&self, metadata: &SongMetadata) -> Result<RotationMethod> {
        let method = self.rotations.lookup(&metadata.track_id)?;
        if method != RotationMethod::Identity {
            info!("Rotating track {} with {:?}", metadata.track_id, method);
        }
        Ok(method)
    }

    fn compile_rotated(&self, chart: &Chart, rotation: RotationMethod) -> Result<String> {
        if rotation == RotationMethod::Identity {
            self.encoder.compile_chart(chart, Format::Notation)
        } else {
            self.encoder.compile_chart(&chart.rotated(rotation), Format::Notation)
        }
    }

    fn utage_level(&self, metadata: &SongMetadata) -> String {
        let info = metadata.difficulty(Difficulty::Utage);
        if self.strict_decimal {
            if let Some(decimal) = info.and_then(DifficultyInfo::decimal_level) {
                return format!("{}?", decimal);
            }
        }
        match info.and_then(DifficultyInfo::level) {
            Some(level) => format!("{}?", level),
            None => UTAGE_MARK.to_string(),
        }
    }

    fn header(&self, metadata: &SongMetadata, title: &str) -> String {
        let mut header = String::new();
        let _ = writeln!(header, "&title={}", title);
        let _ = writeln!(header, "&wholebpm={}", metadata.bpm);
        let _ = writeln!(header, "&artist={}", metadata.composer);
        let _ = writeln!(header, "&des={}", metadata.master_maker());
        let _ = writeln!(header, "&shortid={}", metadata.music_id);
        let _ = writeln!(header, "&genre={}", metadata.genre);
        let _ = writeln!(header, "&cabinet={}", if metadata.is_dx { "DX" } else { "SD" });
        let _ = writeln!(header, "&version={}", metadata.track_version);
        let _ = writeln!(header, "&ChartConverter={}", tool::CONVERTER);
        let _ = writeln!(header, "&ChartConvertTool={}", tool::TOOL);
        let _ = writeln!(header, "&ChartConvertToolVersion={}", tool::VERSION);
        let _ = writeln!(header, "&smsg={}", tool::MESSAGE);
        header.push('\n');
        header
    }
}

impl Default for SimaiCompiler {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Write a compiled document to `maidata.txt` inside `dir`.
///
/// Without `overwrite` the document is appended to an existing file.
pub fn write_out(document: &str, dir: &Path, overwrite: bool) -> Result<PathBuf> {
    let path = dir.join(OUTPUT_FILE);
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(overwrite)
        .append(!overwrite)
        .open(&path)?;
    writeln!(file, "{}", document)?;
    Ok(path)
}
