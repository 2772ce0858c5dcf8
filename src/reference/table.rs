use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::QuizError;
use crate::scoring::{AxisSystem, TypeCode};

/// Descriptive metadata for one type code.
///
/// CSV header: `type_code,nickname,description,careers`. Indonesian-language
/// headers (`Tipe MBTI`, `Julukan`, ...) are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TypeDescription {
    #[serde(alias = "Tipe MBTI")]
    pub type_code: String,

    #[serde(alias = "Julukan")]
    pub nickname: String,

    #[serde(rename = "description", alias = "Deskripsi")]
    pub traits: String,

    #[serde(rename = "careers", alias = "Pekerjaan Cocok")]
    pub recommendation: String,
}

/// Read-only type description table, one row per type code.
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    records: Vec<TypeDescription>,
    // Upper-cased code -> position in `records`
    index: HashMap<String, usize>,
}

fn normalise(code: &str) -> String {
    code.trim().to_uppercase()
}

impl TypeTable {
    /// Build a table, rejecting blank and duplicate codes (case-insensitive).
    pub fn from_records(records: Vec<TypeDescription>) -> Result<Self> {
        let mut index = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            let key = normalise(&record.type_code);
            if key.is_empty() {
                bail!("type table row {}: empty type code", i + 1);
            }
            if let Some(first) = index.insert(key.clone(), i) {
                bail!(
                    "type table rows {} and {}: duplicate type code '{}'",
                    first + 1,
                    i + 1,
                    key
                );
            }
        }
        Ok(Self { records, index })
    }

    /// Load the table from a CSV file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open type table at {}", path.display()))?;
        let table = Self::read(file)
            .with_context(|| format!("Invalid type table in {}", path.display()))?;

        tracing::debug!(count = table.len(), path = %path.display(), "loaded type table");

        Ok(table)
    }

    pub fn read<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();
        for (i, result) in rdr.deserialize().enumerate() {
            let record: TypeDescription =
                result.with_context(|| format!("line {}: malformed row", i + 2))?;
            records.push(record);
        }
        Self::from_records(records)
    }

    /// Case-insensitive exact match on the type code.
    pub fn lookup(&self, code: &str) -> Result<&TypeDescription, QuizError> {
        self.index
            .get(&normalise(code))
            .map(|&i| &self.records[i])
            .ok_or_else(|| QuizError::UnknownTypeCode {
                code: code.to_string(),
            })
    }

    /// Codes the axis system can produce that have no row here.
    pub fn missing_codes(&self, system: &AxisSystem) -> Vec<TypeCode> {
        system
            .all_codes()
            .into_iter()
            .filter(|code| !self.index.contains_key(&normalise(&code.to_string())))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDescription> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
