//! Region identifier parsing.
//!
//! Well-formed region strings look like `"Region 3B"`. Some source files carry
//! the defective `"Region B"` form, which keeps the letter but loses the class
//! digit; callers recover the digit from other evidence (usually the file the
//! feature came from, whose name encodes both parts).

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::types::{ClassError, ClassNum, RegionId, RegionLetter};

static FULL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Region (\d)([A-D])$").expect("valid region pattern"));

static LETTER_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Region ([A-D])$").expect("valid region pattern"));

// Matches the last path component: "Region 3B.geojson", "Region_3B.geojson",
// or the bare stem without extension.
static FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[/\\])Region[ _](\d)([A-D])(?:\.geojson)?$").expect("valid file pattern")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegionFormatError {
    #[error("unrecognized region identifier {0:?}")]
    Unrecognized(String),
    #[error("no region encoded in file name {0:?}")]
    FileName(String),
    #[error(transparent)]
    Class(#[from] ClassError),
}

/// Result of parsing a `region` property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedRegion {
    /// `"Region {digit}{letter}"`
    Full(RegionId),
    /// `"Region {letter}"`: the class digit has to come from elsewhere.
    LetterOnly(RegionLetter),
}

impl ParsedRegion {
    pub fn letter(&self) -> RegionLetter {
        match self {
            ParsedRegion::Full(id) => id.letter,
            ParsedRegion::LetterOnly(letter) => *letter,
        }
    }

    pub fn full(self) -> Option<RegionId> {
        match self {
            ParsedRegion::Full(id) => Some(id),
            ParsedRegion::LetterOnly(_) => None,
        }
    }
}

fn region_from_captures(digit: &str, letter: &str) -> Result<RegionId, RegionFormatError> {
    let class = digit.chars().next()
        .map(ClassNum::from_digit)
        .unwrap_or_else(|| Err(ClassError(digit.to_string())))?;
    let letter = letter.chars().next()
        .and_then(|c| RegionLetter::from_char(c).ok())
        .ok_or_else(|| RegionFormatError::Unrecognized(letter.to_string()))?;
    Ok(RegionId::new(class, letter))
}

/// Parse a `region` property value.
pub fn parse_region(s: &str) -> Result<ParsedRegion, RegionFormatError> {
    let s = s.trim();
    if let Some(caps) = FULL.captures(s) {
        return region_from_captures(&caps[1], &caps[2]).map(ParsedRegion::Full);
    }
    if let Some(caps) = LETTER_ONLY.captures(s) {
        let letter = caps[1].chars().next()
            .and_then(|c| RegionLetter::from_char(c).ok())
            .ok_or_else(|| RegionFormatError::Unrecognized(s.to_string()))?;
        return Ok(ParsedRegion::LetterOnly(letter));
    }
    Err(RegionFormatError::Unrecognized(s.to_string()))
}

/// Extract the region encoded in a source file name or path,
/// e.g. `"data/Region_3B.geojson"` or `"Region 3B.geojson"`.
pub fn parse_region_file(name: &str) -> Result<RegionId, RegionFormatError> {
    let caps = FILE.captures(name.trim())
        .ok_or_else(|| RegionFormatError::FileName(name.to_string()))?;
    region_from_captures(&caps[1], &caps[2])
}

impl FromStr for RegionId {
    type Err = RegionFormatError;

    /// Only the well-formed `"Region {digit}{letter}"` form is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_region(s)?.full().ok_or_else(|| RegionFormatError::Unrecognized(s.to_string()))
    }
}
