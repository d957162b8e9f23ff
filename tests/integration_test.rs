//! Integration tests for Simai compilation
//!
//! These tests load JSON song bundles, compile them and check the maidata output

use maichart::chart::{Chart, Key, Note, RotationTable, SlideShape, SpecialState};
use maichart::compiler::{self, Difficulty, DifficultyInfo, SongBundle, OUTPUT_FILE};
use maichart::simai::Format;
use maichart::{Error, SimaiCompiler};
use tempfile::tempdir;

const BUNDLE: &str = r#"{
    "metadata": {
        "name": "Sample",
        "bpm": "180",
        "composer": "Artist",
        "genre": "POPS",
        "music_id": "834",
        "dx_suffix": " [DX]",
        "track_id": "834",
        "track_version": "21000",
        "is_dx": true,
        "difficulties": {
            "Basic": {"level": "6", "maker": "-"},
            "Expert": {"level": "10", "decimal_level": "10.4", "maker": "expert maker"},
            "Master": {"level": "13", "decimal_level": "13.2", "maker": "master maker"},
            "Utage": {"level": "13"}
        }
    },
    "charts": {
        "Basic": {"is_dx": true, "notes": [
            {"bar": 1, "tick": 0, "key": "0", "type": "tap"},
            {"bar": 1, "tick": 96, "key": "4", "type": "hold", "last_length": 192}
        ]},
        "Expert": {"is_dx": true, "notes": [
            {"bar": 1, "tick": 0, "key": "0", "type": "tap", "star": true},
            {"bar": 1, "tick": 0, "key": "0", "type": "slide", "shape": "SLL",
             "end_key": "4", "last_length": 96}
        ]},
        "Master": {"is_dx": true, "notes": [
            {"bar": 1, "tick": 0, "key": "2", "type": "touch", "area": "E"},
            {"bar": 1, "tick": 48, "key": "6", "type": "tap", "special": "break"}
        ]}
    },
    "utage": [
        {"notes": [{"bar": 0, "tick": 0, "key": "1", "type": "tap"}]},
        {"notes": [{"bar": 0, "tick": 0, "key": "2", "type": "tap"}]}
    ]
}"#;

/// Helper to load the sample bundle
fn bundle() -> SongBundle {
    SongBundle::from_json(BUNDLE).expect("Bundle should parse")
}

/// Helper to compile a bundle with default settings
fn compile(bundle: &SongBundle, strict: bool, utage: bool) -> (String, Vec<String>) {
    let mut compiler = SimaiCompiler::new(strict);
    let doc = compiler
        .compile_bundle(bundle, utage)
        .expect("Compilation failed");
    (doc, compiler.compiled_charts().to_vec())
}

/// Value of the first `&key=` line in a document
fn field<'a>(doc: &'a str, key: &str) -> Option<&'a str> {
    let prefix = format!("&{}=", key);
    doc.lines().find_map(|l| l.strip_prefix(prefix.as_str()))
}

/// Body following an `&inote_N=` marker
fn body(doc: &str, slot: usize) -> Option<String> {
    let marker = format!("&inote_{}=\n", slot);
    let start = doc.find(&marker)? + marker.len();
    Some(doc[start..].lines().next().unwrap_or_default().to_string())
}

// =============================================================================
// Standard compilation
// =============================================================================

#[test]
fn test_standard_document() {
    let (doc, records) = compile(&bundle(), false, false);

    assert_eq!(field(&doc, "title"), Some("Sample [DX]"));
    assert_eq!(field(&doc, "wholebpm"), Some("180"));
    assert_eq!(field(&doc, "artist"), Some("Artist"));
    assert_eq!(field(&doc, "des"), Some("master maker"));
    assert_eq!(field(&doc, "shortid"), Some("834"));
    assert_eq!(field(&doc, "genre"), Some("POPS"));
    assert_eq!(field(&doc, "cabinet"), Some("DX"));
    assert_eq!(field(&doc, "version"), Some("21000"));
    assert!(field(&doc, "ChartConvertToolVersion").is_some());

    assert_eq!(field(&doc, "lv_2"), Some("6"));
    assert_eq!(field(&doc, "des_2"), Some("-"));
    assert_eq!(field(&doc, "lv_4"), Some("10"));
    assert_eq!(field(&doc, "lv_5"), Some("13"));
    assert_eq!(field(&doc, "lv_1"), None);
    assert_eq!(field(&doc, "lv_7"), None);

    assert_eq!(body(&doc, 2).as_deref(), Some("15h[2:1]"));
    assert_eq!(body(&doc, 4).as_deref(), Some("1V75[4:1]"));
    assert_eq!(body(&doc, 5).as_deref(), Some("E37b"));

    assert_eq!(
        records,
        vec![
            "Sample [DX] [Basic]".to_string(),
            "Sample [DX] [Expert]".to_string(),
            "Sample [DX] [Master]".to_string(),
        ]
    );
}

#[test]
fn test_slots_emitted_in_order() {
    let (doc, _) = compile(&bundle(), false, false);
    let markers: Vec<&str> = doc
        .lines()
        .filter(|l| l.starts_with("&lv_") || l.starts_with("&inote_"))
        .collect();
    assert_eq!(
        markers,
        vec!["&lv_2=6", "&lv_4=10", "&lv_5=13", "&inote_2=", "&inote_4=", "&inote_5="]
    );
}

#[test]
fn test_strict_decimal_levels() {
    let (doc, _) = compile(&bundle(), true, false);
    assert_eq!(field(&doc, "lv_2"), Some("6"));
    assert_eq!(field(&doc, "lv_4"), Some("10.4"));
    assert_eq!(field(&doc, "lv_5"), Some("13.2"));
}

#[test]
fn test_level_without_chart_is_skipped() {
    let mut bundle = bundle();
    bundle.charts.remove(&Difficulty::Expert);
    let (doc, records) = compile(&bundle, false, false);
    assert_eq!(field(&doc, "lv_4"), None);
    assert!(body(&doc, 4).is_none());
    assert_eq!(records.len(), 2);
}

// =============================================================================
// Utage compilation
// =============================================================================

#[test]
fn test_utage_multiple_charts() {
    let (doc, records) = compile(&bundle(), false, true);
    assert_eq!(field(&doc, "title"), Some("Sample[宴]"));
    assert_eq!(field(&doc, "lv_2"), Some("13?"));
    assert_eq!(field(&doc, "lv_3"), Some("13?"));
    assert_eq!(body(&doc, 2).as_deref(), Some("2"));
    assert_eq!(body(&doc, 3).as_deref(), Some("3"));
    assert!(body(&doc, 7).is_none());
    assert_eq!(records, vec!["SampleUtage [宴]"; 2]);
}

#[test]
fn test_utage_single_chart() {
    let mut bundle = bundle();
    bundle.utage.truncate(1);
    bundle
        .metadata
        .set_difficulty(Difficulty::Utage, DifficultyInfo::default());
    let (doc, _) = compile(&bundle, false, true);
    assert_eq!(field(&doc, "lv_7"), Some("宴"));
    assert_eq!(body(&doc, 7).as_deref(), Some("2"));
    assert_eq!(field(&doc, "lv_2"), None);
}

// =============================================================================
// Rotation
// =============================================================================

#[test]
fn test_rotation_directive() {
    let mut rotations = RotationTable::new();
    rotations.insert("834", "LeftToRight");
    let mut compiler = SimaiCompiler::new(false).with_rotations(rotations);
    let doc = compiler.compile_bundle(&bundle(), false).unwrap();

    // Keys 0/4 mirror to 7/3
    assert_eq!(body(&doc, 2).as_deref(), Some("84h[2:1]"));
    // BendLeft from 1 to 5 becomes BendRight from 8 to 4
    assert_eq!(body(&doc, 4).as_deref(), Some("8V24[4:1]"));
}

#[test]
fn test_invalid_rotation_directive() {
    let mut rotations = RotationTable::new();
    rotations.insert("834", "Sideways");
    let mut compiler = SimaiCompiler::new(false).with_rotations(rotations);
    let result = compiler.compile_bundle(&bundle(), false);
    assert!(matches!(result, Err(Error::InvalidRotation(_))));
    assert!(compiler.compiled_charts().is_empty());
}

// =============================================================================
// Chart bodies
// =============================================================================

#[test]
fn test_connecting_slide_chain() {
    let key = |i: u8| Key::new(i).unwrap();
    let chart = Chart::new(
        vec![
            Note::star(0, 0, key(0)),
            Note::slide(SlideShape::Straight, 0, 0, key(0), 96, 48, key(4))
                .with_bpm(120.0)
                .with_tick_bpm_disagree(true),
            Note::slide(SlideShape::CircleRight, 0, 48, key(4), 0, 96, key(0))
                .with_bpm(120.0)
                .with_special(SpecialState::ConnectingSlide)
                .with_fixed_last_length(48),
        ],
        false,
    );
    let compiler = SimaiCompiler::default();
    assert_eq!(
        compiler.compile_chart(&chart, Format::Notation).unwrap(),
        "1-5[120#8:1]<1[120#8:1]"
    );

    let raw = compiler.compile_chart(&chart, Format::Raw).unwrap();
    let lines: Vec<&str> = raw.lines().collect();
    assert_eq!(lines[2], "CNSCR\t0\t48\t4\t0\t96\t0");
}

#[test]
fn test_connecting_slide_from_bundle_matches_built() {
    let json = r#"{"utage": [{"notes": [
        {"bar": 0, "tick": 0, "key": "0", "type": "slide", "shape": "SI_", "end_key": "4",
         "wait_length": 48, "last_length": 96, "bpm": 120.0, "special": "connecting_slide"}
    ]}]}"#;
    let loaded = SongBundle::from_json(json).unwrap();

    let key = |i: u8| Key::new(i).unwrap();
    let built = Chart::new(
        vec![Note::slide(SlideShape::Straight, 0, 0, key(0), 48, 96, key(4))
            .with_bpm(120.0)
            .with_special(SpecialState::ConnectingSlide)],
        false,
    );
    assert_eq!(loaded.utage[0], built);

    let compiler = SimaiCompiler::default();
    let from_bundle = compiler.compile_chart(&loaded.utage[0], Format::Notation).unwrap();
    assert_eq!(from_bundle, "-5[120#4:1]");
    assert_eq!(compiler.compile_chart(&built, Format::Notation).unwrap(), from_bundle);
}

// =============================================================================
// Output sink
// =============================================================================

#[test]
fn test_write_out_overwrite_and_append() {
    let dir = tempdir().unwrap();

    let path = compiler::write_out("first", dir.path(), true).unwrap();
    assert_eq!(path, dir.path().join(OUTPUT_FILE));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\n");

    compiler::write_out("second", dir.path(), false).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");

    compiler::write_out("third", dir.path(), true).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "third\n");
}

#[test]
fn test_bundle_file_round_trip() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("song.json");
    std::fs::write(&input, BUNDLE).unwrap();

    let loaded = SongBundle::load(&input).unwrap();
    assert_eq!(loaded, bundle());

    let (doc, _) = compile(&loaded, false, false);
    let path = compiler::write_out(&doc, dir.path(), true).unwrap();
    let written = std::fs::read_to_string(path).unwrap();
    assert!(written.starts_with("&title=Sample [DX]\n"));
}

#[test]
fn test_missing_bundle_file() {
    let dir = tempdir().unwrap();
    let result = SongBundle::load(&dir.path().join("missing.json"));
    assert!(matches!(result, Err(Error::Io(_))));
}
