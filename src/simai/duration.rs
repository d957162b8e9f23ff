//! Duration annotations

/// ma2 resolution: ticks in one bar
pub const TICKS_PER_BAR: u32 = 384;

/// Tempo a duration is measured against
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tempo {
    /// The chart's current tempo
    Nominal,
    /// A tempo written into the annotation
    Explicit(f64),
}

/// Textual grammar for note durations
pub trait DurationNotation {
    fn format(&self, ticks: u32, tempo: Tempo) -> String;
}

/// Simai `[quaver:beats]` / `[bpm#quaver:beats]` notation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimaiDuration {
    pub resolution: u32,
}

impl Default for SimaiDuration {
    fn default() -> Self {
        Self {
            resolution: TICKS_PER_BAR,
        }
    }
}

impl DurationNotation for SimaiDuration {
    fn format(&self, ticks: u32, tempo: Tempo) -> String {
        let divisor = gcd(self.resolution, ticks);
        let quaver = self.resolution / divisor;
        let beats = ticks / divisor;
        match tempo {
            Tempo::Nominal => format!("[{}:{}]", quaver, beats),
            Tempo::Explicit(bpm) => format!("[{}#{}:{}]", bpm, quaver, beats),
        }
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a.max(1)
}
