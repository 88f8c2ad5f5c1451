use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("class out of range: {0:?} (expected 1-6)")]
pub struct ClassError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("region letter out of range: {0:?} (expected A-D)")]
pub struct LetterError(pub String);

/// Competitive division, 1 through 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassNum(u8);

impl ClassNum {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    pub fn new(n: u8) -> Result<Self, ClassError> {
        if (Self::MIN..=Self::MAX).contains(&n) {
            Ok(Self(n))
        } else {
            Err(ClassError(n.to_string()))
        }
    }

    pub fn from_digit(c: char) -> Result<Self, ClassError> {
        c.to_digit(10)
            .and_then(|d| Self::new(d as u8).ok())
            .ok_or_else(|| ClassError(c.to_string()))
    }

    /// Accepts either the bare digit ("3") or the labelled form ("Class 3").
    pub fn parse(s: &str) -> Result<Self, ClassError> {
        let s = s.trim();
        let digits = s.strip_prefix("Class ").unwrap_or(s);
        let mut chars = digits.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_digit(c),
            _ => Err(ClassError(s.to_string())),
        }
    }

    #[inline] pub fn get(self) -> u8 { self.0 }

    pub fn all() -> impl Iterator<Item = ClassNum> {
        (Self::MIN..=Self::MAX).map(ClassNum)
    }

    /// `class` property value, e.g. "Class 3".
    pub fn label(self) -> String { format!("Class {}", self.0) }

    /// `size` property value, e.g. "3".
    pub fn size(self) -> String { self.0.to_string() }

    /// Identifier used by the class/region tree, e.g. "class3".
    pub fn config_id(self) -> String { format!("class{}", self.0) }
}

impl fmt::Display for ClassNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegionLetter { A, B, C, D }

impl RegionLetter {
    pub const ALL: [RegionLetter; 4] = [RegionLetter::A, RegionLetter::B, RegionLetter::C, RegionLetter::D];

    pub fn from_char(c: char) -> Result<Self, LetterError> {
        match c {
            'A' => Ok(RegionLetter::A),
            'B' => Ok(RegionLetter::B),
            'C' => Ok(RegionLetter::C),
            'D' => Ok(RegionLetter::D),
            other => Err(LetterError(other.to_string())),
        }
    }

    pub fn as_char(self) -> char {
        match self {
            RegionLetter::A => 'A',
            RegionLetter::B => 'B',
            RegionLetter::C => 'C',
            RegionLetter::D => 'D',
        }
    }
}

impl fmt::Display for RegionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A fully qualified region: class digit plus letter, e.g. "Region 3B".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionId {
    pub class: ClassNum,
    pub letter: RegionLetter,
}

impl RegionId {
    pub fn new(class: ClassNum, letter: RegionLetter) -> Self { Self { class, letter } }

    /// All 24 statewide regions, ordered by class then letter.
    pub fn all() -> Vec<RegionId> {
        ClassNum::all()
            .flat_map(|class| RegionLetter::ALL.into_iter().map(move |letter| RegionId { class, letter }))
            .collect()
    }

    /// Short code, e.g. "3B".
    pub fn code(&self) -> String { format!("{}{}", self.class, self.letter) }

    /// Name of the per-region source file, e.g. "Region 3B.geojson".
    pub fn file_name(&self) -> String { format!("{self}.geojson") }

    /// Identifier used by the class/region tree, e.g. "region3B".
    pub fn config_id(&self) -> String { format!("region{}", self.code()) }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Region {}{}", self.class, self.letter)
    }
}
