//! Tattoo design metadata values.

use serde::{Deserialize, Deserializer, Serialize, de};

/// How complex a design is to tattoo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Complexity {
    #[serde(alias = "low")]
    Low,
    #[default]
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "high")]
    High,
}

/// Errors that can occur when building a [`PainLevel`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PainLevelError {
    #[error("pain level must be between {min} and {max}, got {got}")]
    OutOfRange { min: u8, max: u8, got: i64 },
}

/// Expected pain on a 1-10 scale.
///
/// Deserializes from an integer, a whole float, or a numeric string: edit
/// forms historically stored the raw input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PainLevel(u8);

impl PainLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Create a pain level.
    ///
    /// # Errors
    ///
    /// Returns `PainLevelError::OutOfRange` outside 1-10.
    pub fn new(value: i64) -> Result<Self, PainLevelError> {
        match u8::try_from(value) {
            Ok(v) if (Self::MIN..=Self::MAX).contains(&v) => Ok(Self(v)),
            _ => Err(PainLevelError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                got: value,
            }),
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl<'de> Deserialize<'de> for PainLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Float(f64),
            Text(String),
        }

        let value = match Raw::deserialize(deserializer)? {
            Raw::Int(n) => n,
            #[allow(clippy::cast_possible_truncation)] // fract() == 0 checked, range checked below
            Raw::Float(f) if f.fract() == 0.0 => f as i64,
            Raw::Float(f) => {
                return Err(de::Error::custom(format!(
                    "pain level must be a whole number, got {f}"
                )));
            }
            Raw::Text(s) => s.trim().parse::<i64>().map_err(de::Error::custom)?,
        };

        Self::new(value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_pain_level_range() {
        assert!(PainLevel::new(0).is_err());
        assert_eq!(PainLevel::new(1).unwrap().get(), 1);
        assert_eq!(PainLevel::new(10).unwrap().get(), 10);
        assert!(PainLevel::new(11).is_err());
        assert!(PainLevel::new(-4).is_err());
    }

    #[test]
    fn test_pain_level_accepts_form_text() {
        let level: PainLevel = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(level.get(), 7);
        let level: PainLevel = serde_json::from_str("6.0").unwrap();
        assert_eq!(level.get(), 6);
        assert!(serde_json::from_str::<PainLevel>("6.5").is_err());
        assert!(serde_json::from_str::<PainLevel>("\"12\"").is_err());
    }

    #[test]
    fn test_pain_level_serializes_as_number() {
        assert_eq!(
            serde_json::to_string(&PainLevel::new(3).unwrap()).unwrap(),
            "3"
        );
    }

    #[test]
    fn test_complexity_names() {
        assert_eq!(
            serde_json::to_string(&Complexity::High).unwrap(),
            "\"High\""
        );
        assert_eq!(Complexity::default(), Complexity::Medium);
        let parsed: Complexity = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(parsed, Complexity::Low);
    }
}
