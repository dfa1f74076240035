//! Option letters.
//!
//! Options are presented as `A`, `B`, `C`, … and answer keys refer to them by
//! letter. [`OptionLetter`] is the only place where a zero-based option index
//! and its letter are converted into each other.

use std::fmt;
use std::str::FromStr;

use crate::error::LetterError;

/// Number of distinct option letters (`A` through `Z`).
pub const MAX_OPTIONS: usize = 26;

/// A validated option letter in `A..=Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionLetter(u8);

impl OptionLetter {
    /// Letter for a zero-based option index (`0 -> A`).
    pub fn from_index(index: usize) -> Result<Self, LetterError> {
        if index < MAX_OPTIONS {
            Ok(Self(b'A' + index as u8))
        } else {
            Err(LetterError::IndexTooLarge(index))
        }
    }

    /// Zero-based option index for this letter (`A -> 0`).
    pub fn index(self) -> usize {
        (self.0 - b'A') as usize
    }

    /// Parse an answer key. Exactly one uppercase ASCII letter is accepted.
    pub fn parse(s: &str) -> Result<Self, LetterError> {
        match s.as_bytes() {
            [b] if b.is_ascii_uppercase() => Ok(Self(*b)),
            _ => Err(LetterError::Invalid(s.to_string())),
        }
    }

    /// Resolve this letter against a list of `len` options.
    pub fn index_within(self, len: usize) -> Option<usize> {
        let idx = self.index();
        (idx < len).then_some(idx)
    }

    pub fn as_char(self) -> char {
        self.0 as char
    }
}

impl fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for OptionLetter {
    type Err = LetterError;

    /// Lenient form for user input: surrounding whitespace and lowercase are
    /// accepted. Answer keys in the bank go through [`OptionLetter::parse`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_letter_mapping_is_bidirectional() {
        for i in 0..MAX_OPTIONS {
            let letter = OptionLetter::from_index(i).unwrap();
            assert_eq!(letter.index(), i);
            assert_eq!(OptionLetter::parse(&letter.to_string()).unwrap(), letter);
        }
        assert_eq!(OptionLetter::from_index(0).unwrap().as_char(), 'A');
        assert_eq!(OptionLetter::from_index(2).unwrap().to_string(), "C");
    }

    #[test]
    fn index_beyond_z_is_rejected() {
        assert_eq!(
            OptionLetter::from_index(26),
            Err(LetterError::IndexTooLarge(26))
        );
    }

    #[test]
    fn strict_parse_rejects_non_letters() {
        for bad in ["", "a", "AB", "1", " A", "Ä"] {
            assert!(OptionLetter::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn lenient_from_str_for_user_input() {
        assert_eq!("b".parse::<OptionLetter>().unwrap().index(), 1);
        assert_eq!(" D \n".parse::<OptionLetter>().unwrap().index(), 3);
        assert!("bb".parse::<OptionLetter>().is_err());
    }

    #[test]
    fn index_within_bounds() {
        let c = OptionLetter::parse("C").unwrap();
        assert_eq!(c.index_within(3), Some(2));
        assert_eq!(c.index_within(2), None);
    }
}
