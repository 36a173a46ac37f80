//! OTP candidate enumeration.
//!
//! Enumerates every fixed-width digit string, drops candidates matching an
//! exclusion predicate, and orders the survivors by numeric value.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rand::seq::SliceRandom;

use crate::error::OtpError;

/// Hard ceiling on candidate width. 10^9 candidates is already multiple
/// GiB of strings; the eager enumerate-then-sort design cannot go wider.
pub const MAX_WIDTH: usize = 9;

/// How candidates are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    /// Fixed width, leading zeros kept.
    Padded,
    /// Minimal decimal rendering.
    Plain,
}

/// Where an excluded digit is not allowed to appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionMode {
    Everywhere,
    AtPositions(Vec<usize>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclusion {
    pub digit: char,
    pub mode: ExclusionMode,
}

#[derive(Debug, Clone)]
pub struct OtpSpec {
    pub width: usize,
    pub exclusion: Option<Exclusion>,
    pub format: NumberFormat,
}

/// Orderings a candidate list can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortPolicy {
    Ascending,
    Descending,
    Shuffled,
}

impl SortPolicy {
    /// Suffix of the output file this ordering is written to.
    pub fn file_suffix(self) -> &'static str {
        match self {
            SortPolicy::Ascending => "sorted",
            SortPolicy::Descending => "reverse",
            SortPolicy::Shuffled => "random",
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            SortPolicy::Ascending => "sorted ascending",
            SortPolicy::Descending => "reverse sorted",
            SortPolicy::Shuffled => "random order",
        }
    }
}

/// Enumerate the full candidate space for `spec` in ascending order.
///
/// Counting through `0..10^width` and zero-padding is exactly the Cartesian
/// product of the digit alphabet over the width.
pub fn enumerate(spec: &OtpSpec) -> Result<Vec<String>, OtpError> {
    if spec.width == 0 || spec.width > MAX_WIDTH {
        return Err(OtpError::WidthOutOfRange {
            got: spec.width,
            max: MAX_WIDTH,
        });
    }
    if let Some(exclusion) = &spec.exclusion {
        if !exclusion.digit.is_ascii_digit() {
            return Err(OtpError::NotADigit(exclusion.digit));
        }
        if let ExclusionMode::AtPositions(positions) = &exclusion.mode {
            if let Some(&pos) = positions.iter().find(|&&p| p >= spec.width) {
                return Err(OtpError::PositionOutOfRange {
                    pos,
                    width: spec.width,
                });
            }
        }
    }

    let total = 10u64.pow(spec.width as u32);
    let mut candidates = Vec::new();
    for n in 0..total {
        let digits = format!("{:0width$}", n, width = spec.width);
        if let Some(exclusion) = &spec.exclusion {
            let excluded = match &exclusion.mode {
                ExclusionMode::Everywhere => digits.contains(exclusion.digit),
                ExclusionMode::AtPositions(positions) => positions
                    .iter()
                    .any(|&p| digits.as_bytes()[p] == exclusion.digit as u8),
            };
            if excluded {
                continue;
            }
        }
        candidates.push(match spec.format {
            NumberFormat::Padded => digits,
            NumberFormat::Plain => n.to_string(),
        });
    }
    Ok(candidates)
}

/// Return a copy of `candidates` in the requested order. The input slice is
/// never reordered, so one enumeration can feed every policy.
pub fn order(candidates: &[String], policy: SortPolicy) -> Vec<String> {
    let mut out = candidates.to_vec();
    match policy {
        SortPolicy::Ascending => out.sort_by_key(|c| numeric(c)),
        SortPolicy::Descending => {
            out.sort_by_key(|c| numeric(c));
            out.reverse();
        }
        SortPolicy::Shuffled => out.shuffle(&mut rand::thread_rng()),
    }
    out
}

// Candidates are digit-only and at most MAX_WIDTH long, so this cannot
// overflow u64; a parse failure would be a bug in enumerate().
fn numeric(candidate: &str) -> u64 {
    candidate.parse().unwrap_or(0)
}

/// Write one candidate per line with a trailing newline.
pub fn write_list(path: &Path, candidates: &[String]) -> Result<(), OtpError> {
    let mut out = BufWriter::new(File::create(path)?);
    for candidate in candidates {
        writeln!(out, "{candidate}")?;
    }
    out.flush()?;
    Ok(())
}
