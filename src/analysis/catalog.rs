//! Pitch-type display names

use std::collections::{BTreeMap, HashMap};

/// Statcast pitch-type codes and their display names
const STANDARD: &[(&str, &str)] = &[
    ("FF", "Four-Seam Fastball"),
    ("SI", "Sinker"),
    ("FC", "Cutter"),
    ("SL", "Slider"),
    ("ST", "Sweeper"),
    ("SV", "Slurve"),
    ("CU", "Curveball"),
    ("KC", "Knuckle Curve"),
    ("CS", "Slow Curve"),
    ("CH", "Changeup"),
    ("FS", "Split-Finger"),
    ("FO", "Forkball"),
    ("SC", "Screwball"),
    ("KN", "Knuckleball"),
    ("EP", "Eephus"),
    ("FA", "Fastball"),
    ("PO", "Pitchout"),
    ("IN", "Intentional Ball"),
    ("AB", "Automatic Ball"),
    ("UN", "Unknown"),
];

/// Maps pitch-type codes to display names.
///
/// Codes without an entry display as the raw code.
#[derive(Debug, Clone)]
pub struct PitchTypeCatalog {
    names: HashMap<String, String>,
}

impl Default for PitchTypeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl PitchTypeCatalog {
    pub fn standard() -> Self {
        PitchTypeCatalog {
            names: STANDARD
                .iter()
                .map(|(code, name)| (code.to_string(), name.to_string()))
                .collect(),
        }
    }

    /// Add or replace entries
    pub fn with_overrides<'a, I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (code, name) in overrides {
            self.names.insert(code.trim().to_uppercase(), name.clone());
        }
        self
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    /// Display name, falling back to the code itself
    pub fn display_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.get(code).unwrap_or(code)
    }

    /// All entries sorted by code
    pub fn entries(&self) -> BTreeMap<&str, &str> {
        self.names
            .iter()
            .map(|(code, name)| (code.as_str(), name.as_str()))
            .collect()
    }
}
