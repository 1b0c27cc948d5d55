//! Design result store.
//!
//! Holds at most one INITIAL and one ADJUSTED record per technology. A new
//! INITIAL record supersedes everything derived from the previous one.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use ww_process::Technology;

use crate::types::{DesignRecord, ResultKey, Variant};
use crate::{ResultsError, ResultsResult};

const STORE_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesignStore {
    records: BTreeMap<ResultKey, DesignRecord>,
}

#[derive(Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    records: Vec<DesignRecord>,
}

impl DesignStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store location for a case file: `<case dir>/.wwtp/store.json`.
    pub fn path_for_case(case_path: &Path) -> ResultsResult<PathBuf> {
        let case_dir = case_path
            .parent()
            .ok_or_else(|| ResultsError::InvalidPath {
                message: "case path has no parent directory".to_string(),
            })?;
        Ok(case_dir.join(".wwtp").join("store.json"))
    }

    /// Insert a fresh design. Records of other cases and the stale adjusted
    /// record of the same technology are dropped. Returns the replaced
    /// initial record, if any.
    pub fn insert_initial(&mut self, record: DesignRecord) -> ResultsResult<Option<DesignRecord>> {
        if record.variant != Variant::Initial {
            return Err(ResultsError::WrongVariant {
                expected: Variant::Initial,
                found: record.variant,
            });
        }
        self.records.retain(|_, r| r.case_id == record.case_id);
        let tech = record.technology();
        self.records.remove(&ResultKey::adjusted(tech));
        Ok(self.records.insert(ResultKey::initial(tech), record))
    }

    /// Insert an operator re-run. Requires an initial record of the same
    /// case with identical sizing. Returns the replaced adjusted record.
    pub fn insert_adjusted(&mut self, record: DesignRecord) -> ResultsResult<Option<DesignRecord>> {
        if record.variant != Variant::Adjusted {
            return Err(ResultsError::WrongVariant {
                expected: Variant::Adjusted,
                found: record.variant,
            });
        }
        let tech = record.technology();
        let initial = self
            .initial(tech)
            .ok_or(ResultsError::MissingInitial { technology: tech })?;
        if initial.case_id != record.case_id {
            return Err(ResultsError::CaseMismatch {
                expected: initial.case_id.clone(),
                found: record.case_id,
            });
        }
        if initial.sizing != record.sizing {
            return Err(ResultsError::SizingMismatch { technology: tech });
        }
        Ok(self.records.insert(ResultKey::adjusted(tech), record))
    }

    pub fn get(&self, key: &ResultKey) -> Option<&DesignRecord> {
        self.records.get(key)
    }

    pub fn initial(&self, technology: Technology) -> Option<&DesignRecord> {
        self.records.get(&ResultKey::initial(technology))
    }

    pub fn adjusted(&self, technology: Technology) -> Option<&DesignRecord> {
        self.records.get(&ResultKey::adjusted(technology))
    }

    /// Adjusted record if present, else the initial one.
    pub fn latest(&self, technology: Technology) -> Option<&DesignRecord> {
        self.adjusted(technology).or_else(|| self.initial(technology))
    }

    /// Technologies with an initial design, in canonical order.
    pub fn technologies(&self) -> Vec<Technology> {
        self.records
            .keys()
            .filter(|k| k.variant == Variant::Initial)
            .map(|k| k.technology)
            .collect()
    }

    /// Case all stored records belong to.
    pub fn case_id(&self) -> Option<&str> {
        self.records.values().next().map(|r| r.case_id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ResultKey, &DesignRecord)> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn save(&self, path: &Path) -> ResultsResult<()> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        let file = StoreFile {
            version: STORE_VERSION,
            records: self.records.values().cloned().collect(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> ResultsResult<Self> {
        let content = fs::read_to_string(path)?;
        let file: StoreFile = serde_json::from_str(&content)?;
        if file.version > STORE_VERSION {
            return Err(ResultsError::UnsupportedVersion {
                version: file.version,
            });
        }
        let records = file.records.into_iter().map(|r| (r.key(), r)).collect();
        Ok(Self { records })
    }

    /// Load if the file exists, else start empty.
    pub fn load_or_default(path: &Path) -> ResultsResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }
}
