//! Per-file compression settings and their serialization defaults.
//!
//! Qt's resource compiler accepts four compression algorithms. Two of them
//! take a level with an algorithm-specific range and default:
//!
//! | Algorithm | Level range | Default level |
//! |-----------|-------------|---------------|
//! | `best`    | -           | -             |
//! | `none`    | -           | -             |
//! | `zstd`    | 0-19        | 14            |
//! | `zlib`    | 1-9         | 6             |
//!
//! Every file also has a threshold (default [`DEFAULT_THRESHOLD`]) below
//! which the compressed form is discarded. Values equal to their default
//! are left out of the written manifest, see [`Compression::elided`].

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::{Error, Result};

/// Default compression threshold, in percent.
pub const DEFAULT_THRESHOLD: u32 = 70;

/// Compression algorithm applied by the resource compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompressionAlgorithm {
    /// Let the resource compiler pick the best available algorithm.
    #[default]
    Best,
    /// Store the file uncompressed.
    None,
    /// Zstandard compression.
    Zstd,
    /// zlib (deflate) compression.
    Zlib,
}

impl CompressionAlgorithm {
    /// All algorithms, in the order a user interface would offer them.
    pub const ALL: [CompressionAlgorithm; 4] = [Self::Best, Self::Zstd, Self::Zlib, Self::None];

    /// Returns the name used in the `compress-algo` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Best => "best",
            Self::None => "none",
            Self::Zstd => "zstd",
            Self::Zlib => "zlib",
        }
    }

    /// Returns the level used when none is written.
    pub fn default_level(&self) -> Option<u32> {
        match self {
            Self::Zstd => Some(14),
            Self::Zlib => Some(6),
            Self::Best | Self::None => None,
        }
    }

    /// Returns the accepted levels, or `None` if the algorithm takes no level.
    pub fn level_range(&self) -> Option<RangeInclusive<u32>> {
        match self {
            Self::Zstd => Some(0..=19),
            Self::Zlib => Some(1..=9),
            Self::Best | Self::None => None,
        }
    }

    /// Returns whether a level can be configured for this algorithm.
    pub fn supports_level(&self) -> bool {
        self.level_range().is_some()
    }

    /// Checks a level against this algorithm's range.
    pub fn validate_level(&self, level: u32) -> Result<()> {
        let range = self
            .level_range()
            .ok_or(Error::LevelNotSupported { algorithm: *self })?;
        if range.contains(&level) {
            Ok(())
        } else {
            Err(Error::InvalidCompressionLevel {
                algorithm: *self,
                level,
                min: *range.start(),
                max: *range.end(),
            })
        }
    }
}

impl fmt::Display for CompressionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompressionAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|algo| algo.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownAlgorithm {
                name: s.to_string(),
            })
    }
}

/// The attribute values that survive default elision.
///
/// Each field is `Some` only when the corresponding attribute must be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ElidedCompression {
    /// Value for `compress-algo`.
    pub algorithm: Option<CompressionAlgorithm>,
    /// Value for `compress`.
    pub level: Option<u32>,
    /// Value for `threshold`.
    pub threshold: Option<u32>,
}

/// Compression settings of a single file entry.
///
/// A level is only ever stored for algorithms that take one, and it is always
/// within that algorithm's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compression {
    algorithm: CompressionAlgorithm,
    level: Option<u32>,
    threshold: u32,
}

impl Default for Compression {
    fn default() -> Self {
        Self {
            algorithm: CompressionAlgorithm::Best,
            level: None,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Compression {
    /// Creates settings for the given algorithm with default level and threshold.
    pub fn new(algorithm: CompressionAlgorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    /// Sets an explicit level.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LevelNotSupported`] for `best` and `none`, or
    /// [`Error::InvalidCompressionLevel`] when the level is out of range.
    pub fn with_level(mut self, level: u32) -> Result<Self> {
        self.set_level(Some(level))?;
        Ok(self)
    }

    /// Sets the threshold.
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Returns the algorithm.
    pub fn algorithm(&self) -> CompressionAlgorithm {
        self.algorithm
    }

    /// Returns the explicitly configured level, if any.
    pub fn level(&self) -> Option<u32> {
        self.level
    }

    /// Returns the level the resource compiler will use.
    pub fn effective_level(&self) -> Option<u32> {
        self.level.or_else(|| self.algorithm.default_level())
    }

    /// Returns the threshold in percent.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Switches algorithm, dropping a level the new algorithm would reject.
    pub fn set_algorithm(&mut self, algorithm: CompressionAlgorithm) {
        self.algorithm = algorithm;
        if let Some(level) = self.level {
            if algorithm.validate_level(level).is_err() {
                self.level = None;
            }
        }
    }

    /// Sets or clears the level.
    pub fn set_level(&mut self, level: Option<u32>) -> Result<()> {
        if let Some(level) = level {
            self.algorithm.validate_level(level)?;
        }
        self.level = level;
        Ok(())
    }

    /// Sets the threshold.
    pub fn set_threshold(&mut self, threshold: u32) {
        self.threshold = threshold;
    }

    /// Returns these settings as they read back after a save and reload.
    ///
    /// Levels are materialized to the algorithm default, and `none` keeps
    /// nothing but the algorithm.
    pub fn with_defaults(&self) -> Self {
        match self.algorithm {
            CompressionAlgorithm::None => Self::new(CompressionAlgorithm::None),
            algorithm => Self {
                algorithm,
                level: self.effective_level(),
                threshold: self.threshold,
            },
        }
    }

    /// Computes which attributes must be written.
    ///
    /// `none` is written alone. `best` is the implied algorithm and never
    /// carries a level. `zstd` and `zlib` drop a level equal to their default.
    /// The threshold is dropped when it equals [`DEFAULT_THRESHOLD`].
    pub fn elided(&self) -> ElidedCompression {
        if self.algorithm == CompressionAlgorithm::None {
            return ElidedCompression {
                algorithm: Some(CompressionAlgorithm::None),
                level: None,
                threshold: None,
            };
        }

        let threshold = (self.threshold != DEFAULT_THRESHOLD).then_some(self.threshold);
        let algorithm = (self.algorithm != CompressionAlgorithm::Best).then_some(self.algorithm);
        let level = self
            .level
            .filter(|level| Some(*level) != self.algorithm.default_level());

        ElidedCompression {
            algorithm,
            level,
            threshold,
        }
    }

    /// Returns `true` if nothing needs to be written for these settings.
    pub fn is_default(&self) -> bool {
        self.elided() == ElidedCompression::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_parse_case_insensitive() {
        assert_eq!(
            "zstd".parse::<CompressionAlgorithm>().unwrap(),
            CompressionAlgorithm::Zstd
        );
        assert_eq!(
            "Best".parse::<CompressionAlgorithm>().unwrap(),
            CompressionAlgorithm::Best
        );
        assert_eq!(
            " ZLIB ".parse::<CompressionAlgorithm>().unwrap(),
            CompressionAlgorithm::Zlib
        );
        assert!(matches!(
            "lz4".parse::<CompressionAlgorithm>(),
            Err(Error::UnknownAlgorithm { name }) if name == "lz4"
        ));
    }

    #[test]
    fn test_default_level_table() {
        assert_eq!(CompressionAlgorithm::Zstd.default_level(), Some(14));
        assert_eq!(CompressionAlgorithm::Zlib.default_level(), Some(6));
        assert_eq!(CompressionAlgorithm::Best.default_level(), None);
        assert_eq!(CompressionAlgorithm::None.default_level(), None);
    }

    #[test]
    fn test_level_validation() {
        assert!(CompressionAlgorithm::Zstd.validate_level(0).is_ok());
        assert!(CompressionAlgorithm::Zstd.validate_level(19).is_ok());
        assert!(CompressionAlgorithm::Zstd.validate_level(20).is_err());
        assert!(CompressionAlgorithm::Zlib.validate_level(0).is_err());
        assert!(matches!(
            CompressionAlgorithm::Best.validate_level(5),
            Err(Error::LevelNotSupported { .. })
        ));
    }

    #[test]
    fn test_set_algorithm_drops_invalid_level() {
        let mut c = Compression::new(CompressionAlgorithm::Zstd)
            .with_level(15)
            .unwrap();
        c.set_algorithm(CompressionAlgorithm::Zlib);
        assert_eq!(c.level(), None);
        assert_eq!(c.effective_level(), Some(6));

        let mut c = Compression::new(CompressionAlgorithm::Zlib)
            .with_level(3)
            .unwrap();
        c.set_algorithm(CompressionAlgorithm::Zstd);
        assert_eq!(c.level(), Some(3));
    }

    #[test]
    fn test_elide_zstd_defaults() {
        let c = Compression::new(CompressionAlgorithm::Zstd)
            .with_level(14)
            .unwrap();
        assert_eq!(
            c.elided(),
            ElidedCompression {
                algorithm: Some(CompressionAlgorithm::Zstd),
                level: None,
                threshold: None,
            }
        );
    }

    #[test]
    fn test_elide_none_drops_everything_else() {
        let mut c = Compression::new(CompressionAlgorithm::Zstd)
            .with_level(3)
            .unwrap()
            .with_threshold(10);
        c.set_algorithm(CompressionAlgorithm::None);
        let elided = c.elided();
        assert_eq!(elided.algorithm, Some(CompressionAlgorithm::None));
        assert_eq!(elided.level, None);
        assert_eq!(elided.threshold, None);
    }

    #[test]
    fn test_elide_best_keeps_threshold() {
        let c = Compression::default().with_threshold(50);
        assert_eq!(
            c.elided(),
            ElidedCompression {
                algorithm: None,
                level: None,
                threshold: Some(50),
            }
        );
        assert!(Compression::default().is_default());
    }

    #[test]
    fn test_elide_zlib_non_default_level() {
        let c = Compression::new(CompressionAlgorithm::Zlib)
            .with_level(9)
            .unwrap();
        assert_eq!(c.elided().level, Some(9));
        let c = Compression::new(CompressionAlgorithm::Zlib)
            .with_level(6)
            .unwrap();
        assert_eq!(c.elided().level, None);
    }

    #[test]
    fn test_with_defaults() {
        let c = Compression::new(CompressionAlgorithm::Zstd);
        assert_eq!(c.with_defaults().level(), Some(14));

        let c = Compression::new(CompressionAlgorithm::None).with_threshold(5);
        assert_eq!(c.with_defaults().threshold(), DEFAULT_THRESHOLD);

        let c = Compression::default().with_threshold(90);
        assert_eq!(c.with_defaults(), c);
    }
}
