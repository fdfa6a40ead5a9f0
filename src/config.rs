use std::str;

use crate::error::{PixelsortError, Result};

/// The metric pixels are keyed by before sorting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortMode {
    Brightness,
    Hue,
    Saturation,
    Color,
}

impl str::FromStr for SortMode {
    type Err = PixelsortError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "brightness" => Ok(SortMode::Brightness),
            "hue" => Ok(SortMode::Hue),
            "saturation" => Ok(SortMode::Saturation),
            "color" => Ok(SortMode::Color),
            _ => Err(PixelsortError::value("sorting mode", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl str::FromStr for Direction {
    type Err = PixelsortError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ascending" | "asc" => Ok(Direction::Ascending),
            "descending" | "desc" => Ok(Direction::Descending),
            _ => Err(PixelsortError::value("direction", s)),
        }
    }
}

/// Whether scan lines are rows or columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl str::FromStr for Orientation {
    type Err = PixelsortError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "horizontal" => Ok(Orientation::Horizontal),
            "vertical" => Ok(Orientation::Vertical),
            _ => Err(PixelsortError::value("orientation", s)),
        }
    }
}

/// Parameters of a single sort run.
///
/// `strength` (0 to 100) drives both how much of a line passes the threshold
/// and what fraction of every section gets reordered.
#[derive(Clone, Debug, PartialEq)]
pub struct SortConfig {
    pub mode: SortMode,
    pub strength: f64,
    pub direction: Direction,
    pub section_length: usize,
    /// Unsorted pixels left between two sections.
    pub gap_width: usize,
    /// Neighbouring keys closer than this get averaged before thresholding.
    pub noise_threshold: f64,
    pub orientation: Orientation,
    pub chunk_lines: usize,
}

impl Default for SortConfig {
    fn default() -> Self {
        SortConfig {
            mode: SortMode::Brightness,
            strength: 50.0,
            direction: Direction::Ascending,
            section_length: 64,
            gap_width: 0,
            noise_threshold: 0.0,
            orientation: Orientation::Horizontal,
            chunk_lines: 16,
        }
    }
}

impl SortConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.strength.is_finite() || !(0.0..=100.0).contains(&self.strength) {
            return Err(PixelsortError::config(
                "strength",
                format!("{} is not within 0 and 100", self.strength),
            ));
        }
        if self.section_length == 0 {
            return Err(PixelsortError::config("section_length", "must be >= 1"));
        }
        if !self.noise_threshold.is_finite() || self.noise_threshold < 0.0 {
            return Err(PixelsortError::config(
                "noise_threshold",
                format!("{} is not a finite value >= 0", self.noise_threshold),
            ));
        }
        if self.chunk_lines == 0 {
            return Err(PixelsortError::config("chunk_lines", "must be >= 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_is_valid() {
        SortConfig::default().validate().unwrap();
    }

    #[rstest]
    #[case::negative_strength(SortConfig { strength: -1.0, ..SortConfig::default() }, "strength")]
    #[case::strength_above_100(SortConfig { strength: 100.5, ..SortConfig::default() }, "strength")]
    #[case::nan_strength(SortConfig { strength: f64::NAN, ..SortConfig::default() }, "strength")]
    #[case::zero_section(SortConfig { section_length: 0, ..SortConfig::default() }, "section_length")]
    #[case::negative_noise(SortConfig { noise_threshold: -0.5, ..SortConfig::default() }, "noise_threshold")]
    #[case::zero_chunk(SortConfig { chunk_lines: 0, ..SortConfig::default() }, "chunk_lines")]
    fn test_validate_rejects(#[case] config: SortConfig, #[case] expected: &str) {
        match config.validate() {
            Err(PixelsortError::InvalidConfig { parameter, .. }) => assert_eq!(parameter, expected),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_accepts_bounds() {
        let config = SortConfig {
            strength: 0.0,
            section_length: 1,
            gap_width: 0,
            noise_threshold: 0.0,
            chunk_lines: 1,
            ..SortConfig::default()
        };
        config.validate().unwrap();
        SortConfig { strength: 100.0, ..config }.validate().unwrap();
    }

    #[rstest]
    #[case("brightness", SortMode::Brightness)]
    #[case("hue", SortMode::Hue)]
    #[case("saturation", SortMode::Saturation)]
    #[case("color", SortMode::Color)]
    fn test_parse_mode(#[case] input: &str, #[case] expected: SortMode) {
        assert_eq!(input.parse::<SortMode>().unwrap(), expected);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("luminance".parse::<SortMode>().is_err());
        assert!("sideways".parse::<Orientation>().is_err());
        assert_eq!("desc".parse::<Direction>().unwrap(), Direction::Descending);
    }
}
