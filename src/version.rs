use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// SoundBank schema revision, as declared at the start of the BKHD chunk.
///
/// Every version-conditional field in the codec is gated on this value via
/// closed-open ranges.  Known gate boundaries: 72, 88, 112, 113, 115, 118,
/// 120, 125, 128, 132, 134, 135, 140, 145, 150.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FormatVersion(u32);

/// First revision the schemas cover.
pub const MINIMUM_VERSION: u32 = 72;
/// One past the last revision the schemas cover.
pub const MAXIMUM_VERSION: u32 = 156;

impl FormatVersion {
    pub fn new(number: u32) -> Result<Self> {
        if !(MINIMUM_VERSION..MAXIMUM_VERSION).contains(&number) {
            return Err(Error::UnsupportedVersion(number));
        }
        Ok(Self(number))
    }

    pub fn number(self) -> u32 {
        self.0
    }

    /// `version >= min`.
    pub fn at_least(self, min: u32) -> bool {
        self.0 >= min
    }

    /// `min <= version < max`.
    pub fn within(self, min: u32, max: u32) -> bool {
        (min..max).contains(&self.0)
    }
}

impl std::fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_gates_are_closed_open() {
        let v = FormatVersion::new(112).unwrap();
        assert!(v.at_least(112));
        assert!(v.within(112, 113));
        assert!(!v.within(72, 112));
        assert!(!v.at_least(113));
    }

    #[test]
    fn rejects_out_of_window_numbers() {
        assert!(FormatVersion::new(71).is_err());
        assert!(FormatVersion::new(156).is_err());
        assert!(FormatVersion::new(140).is_ok());
    }
}
