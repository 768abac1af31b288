//! Threshold configuration for the derived metrics.
//!
//! The derived metrics (`long_method`, `long_parameter_list`,
//! `excessive_comments`) are threshold post-processing over the measured
//! values; the thresholds themselves are external configuration, loaded
//! from a small YAML file or defaulted.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Derived-metric thresholds.
///
/// ```yaml
/// long_method: 10
/// long_parameter_list: 4
/// excessive_comments: 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Thresholds {
    /// A function with more real lines than this is a long method.
    pub long_method: u32,
    /// A function with more parameters than this has a long list.
    pub long_parameter_list: u32,
    /// More comment lines than this flags the file.
    pub excessive_comments: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            long_method: 10,
            long_parameter_list: 4,
            excessive_comments: 10,
        }
    }
}

impl Thresholds {
    /// Load thresholds from a YAML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let thresholds = serde_yaml::from_str(&text)?;
        Ok(thresholds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_published_values() {
        let t = Thresholds::default();
        assert_eq!(t.long_method, 10);
        assert_eq!(t.long_parameter_list, 4);
        assert_eq!(t.excessive_comments, 10);
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let t: Thresholds = serde_yaml::from_str("long_method: 25\n").unwrap();
        assert_eq!(t.long_method, 25);
        assert_eq!(t.long_parameter_list, 4);
    }
}
