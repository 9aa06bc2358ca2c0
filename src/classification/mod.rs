//! Region identifiers and classification lookup
//!
//! Region ids follow the naming convention of the upstream cropping
//! step: a clip file is named `<id_poly>_background.<ext>`, where
//! `<id_poly>` may carry a `_<n>` sub-part index when the source
//! polygon was a multi-part geometry split upstream. Classification is
//! keyed by the base id, the part before the first underscore.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::stats::errors::{StatsError, StatsResult};

/// Label pair returned for regions with no classification entry
pub const UNKNOWN_CLASS: &str = "Unknown";

/// Composite identifier of one candidate region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionId {
    id_poly: String,
}

impl RegionId {
    /// Build a region id from a raw polygon identifier
    pub fn new(id_poly: &str) -> Self {
        RegionId { id_poly: id_poly.to_string() }
    }

    /// Derive the region id from a clip file name
    ///
    /// Strips the extension and the `_background` suffix, so both
    /// `0042_3_background.csv` and `0042_3` map to `0042_3`.
    pub fn from_clip_name(name: &str) -> Self {
        let stem = Path::new(name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(name);
        let id_poly = match stem.find("_background") {
            Some(pos) => &stem[..pos],
            None => stem,
        };
        RegionId { id_poly: id_poly.to_string() }
    }

    /// The composite polygon identifier, sub-part index included
    pub fn id_poly(&self) -> &str {
        &self.id_poly
    }

    /// The base id used for classification lookup
    ///
    /// The substring before the first underscore; ids without a
    /// sub-part index are their own base.
    pub fn base_id(&self) -> &str {
        match self.id_poly.find('_') {
            Some(pos) => &self.id_poly[..pos],
            None => &self.id_poly,
        }
    }
}

/// Classification labels for one region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassLabels {
    pub classe: String,
    pub subclasse: String,
}

impl ClassLabels {
    fn unknown() -> Self {
        ClassLabels {
            classe: UNKNOWN_CLASS.to_string(),
            subclasse: UNKNOWN_CLASS.to_string(),
        }
    }
}

/// Read-only lookup from base region id to classification labels
///
/// Loaded once per batch run. Missing keys resolve to the Unknown pair
/// rather than failing, so unlabeled regions still produce records.
#[derive(Debug, Default)]
pub struct ClassLookup {
    entries: HashMap<String, ClassLabels>,
}

impl ClassLookup {
    /// An empty lookup, every query resolves to Unknown
    pub fn empty() -> Self {
        ClassLookup::default()
    }

    /// Load the lookup from a CSV table
    ///
    /// The header row must name `ID_POLY`, `CLASSE` and `SUBCLASSE`
    /// columns; any other columns are ignored.
    ///
    /// # Arguments
    /// * `path` - Path to the classification CSV
    ///
    /// # Returns
    /// The loaded lookup or an error
    pub fn load(path: &str) -> StatsResult<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(StatsError::GenericError(format!(
                    "classification table {} is empty", path
                )))
            }
        };

        let columns = split_row(&header);
        let id_col = find_column(&columns, "ID_POLY", path)?;
        let class_col = find_column(&columns, "CLASSE", path)?;
        let subclass_col = find_column(&columns, "SUBCLASSE", path)?;

        let mut entries = HashMap::new();
        for line in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let fields = split_row(&line);
            let (id, classe, subclasse) = match (
                fields.get(id_col),
                fields.get(class_col),
                fields.get(subclass_col),
            ) {
                (Some(id), Some(c), Some(s)) => (id, c, s),
                _ => {
                    debug!("Skipping short classification row: {}", line);
                    continue;
                }
            };
            entries.insert(
                id.clone(),
                ClassLabels {
                    classe: classe.clone(),
                    subclasse: subclasse.clone(),
                },
            );
        }

        debug!("Loaded {} classification entries from {}", entries.len(), path);
        Ok(ClassLookup { entries })
    }

    /// Look up the labels for a base region id
    ///
    /// # Arguments
    /// * `base_id` - Base region id (before the first underscore)
    ///
    /// # Returns
    /// The labels, or the Unknown pair on a miss
    pub fn get(&self, base_id: &str) -> ClassLabels {
        self.entries
            .get(base_id)
            .cloned()
            .unwrap_or_else(ClassLabels::unknown)
    }

    /// Number of loaded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the lookup holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert one entry, used to build lookups in memory
    pub fn insert(&mut self, base_id: &str, classe: &str, subclasse: &str) {
        self.entries.insert(
            base_id.to_string(),
            ClassLabels {
                classe: classe.to_string(),
                subclasse: subclasse.to_string(),
            },
        );
    }
}

/// Split a CSV row, honoring double-quoted fields
fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current = String::new();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Find a named column in a header row
fn find_column(columns: &[String], name: &str, path: &str) -> StatsResult<usize> {
    columns
        .iter()
        .position(|c| c == name)
        .ok_or_else(|| {
            StatsError::GenericError(format!(
                "classification table {} has no {} column", path, name
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_id_from_clip_name() {
        let region = RegionId::from_clip_name("0042_3_background.csv");
        assert_eq!(region.id_poly(), "0042_3");
        assert_eq!(region.base_id(), "0042");
    }

    #[test]
    fn test_region_id_without_suffix_or_part_index() {
        let region = RegionId::from_clip_name("0042.npy");
        assert_eq!(region.id_poly(), "0042");
        assert_eq!(region.base_id(), "0042");
    }

    #[test]
    fn test_lookup_miss_is_unknown() {
        let lookup = ClassLookup::empty();
        let labels = lookup.get("0042");
        assert_eq!(labels.classe, UNKNOWN_CLASS);
        assert_eq!(labels.subclasse, UNKNOWN_CLASS);
    }

    #[test]
    fn test_split_row_honors_quotes() {
        let fields = split_row("0042,\"Oil, weathered\",Seep");
        assert_eq!(fields, vec!["0042", "Oil, weathered", "Seep"]);
    }

    #[test]
    fn test_insert_and_get() {
        let mut lookup = ClassLookup::empty();
        lookup.insert("7", "Lookalike", "Rain cell");
        let labels = lookup.get("7");
        assert_eq!(labels.classe, "Lookalike");
        assert_eq!(labels.subclasse, "Rain cell");
    }
}
