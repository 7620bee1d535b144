//! Commit records and dataset decoding
//!
//! The data endpoint answers with one of two JSON shapes: a plain array of
//! records, or a column table keyed by row index (the shape a dataframe
//! `to_json()` produces). Both decode into the same ordered `Dataset`.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{ChartError, ChartResult};

/// One commit: lines added, lines deleted, and who made it
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CommitRecord {
    pub additions: f64,
    pub deletions: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub author: String,
}

impl CommitRecord {
    pub fn new(additions: f64, deletions: f64, author: impl Into<String>) -> Self {
        Self {
            additions,
            deletions,
            author: author.into(),
        }
    }

    fn validate(&self, index: usize) -> ChartResult<()> {
        for (name, value) in [("additions", self.additions), ("deletions", self.deletions)] {
            if !value.is_finite() {
                return Err(ChartError::InvalidRecord {
                    index,
                    reason: format!("{} is not a finite number", name),
                });
            }
            if value < 0.0 {
                return Err(ChartError::InvalidRecord {
                    index,
                    reason: format!("{} is negative ({})", name, value),
                });
            }
        }
        Ok(())
    }
}

/// Authors without a linked account arrive as `null`
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Column table: `{ "author": {"0": ..}, "additions": {"0": ..}, "deletions": {"0": ..} }`
#[derive(Deserialize, Debug)]
struct ColumnTable {
    /// Absent column means every author is unknown
    #[serde(default)]
    author: Option<BTreeMap<String, Option<String>>>,
    additions: BTreeMap<String, f64>,
    deletions: BTreeMap<String, f64>,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum Payload {
    Records(Vec<CommitRecord>),
    Columns(ColumnTable),
}

/// Ordered commit records, as received from the data source
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    records: Vec<CommitRecord>,
}

impl Dataset {
    pub fn new(records: Vec<CommitRecord>) -> ChartResult<Self> {
        for (index, record) in records.iter().enumerate() {
            record.validate(index)?;
        }
        Ok(Self { records })
    }

    /// Decode a response body in either payload shape
    pub fn from_json(body: &str) -> ChartResult<Self> {
        let payload: Payload = serde_json::from_str(body).map_err(|e| {
            ChartError::Payload(format!(
                "expected a record array or a column table ({})",
                e
            ))
        })?;

        let records = match payload {
            Payload::Records(records) => records,
            Payload::Columns(table) => table.into_records()?,
        };

        log::debug!("decoded {} commit records", records.len());
        Self::new(records)
    }

    pub fn records(&self) -> &[CommitRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CommitRecord> {
        self.records.iter()
    }

    /// Distinct authors in first-seen order
    pub fn authors(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.author.as_str()) {
                seen.push(&record.author);
            }
        }
        seen
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a CommitRecord;
    type IntoIter = std::slice::Iter<'a, CommitRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl ColumnTable {
    fn into_records(mut self) -> ChartResult<Vec<CommitRecord>> {
        // Row keys are stringified integers; BTreeMap order would put "10" before "2".
        let mut rows: Vec<(u64, String)> = Vec::with_capacity(self.additions.len());
        for key in self.additions.keys() {
            let row = key.parse::<u64>().map_err(|_| {
                ChartError::Payload(format!("row index '{}' is not an integer", key))
            })?;
            rows.push((row, key.clone()));
        }
        rows.sort_unstable_by_key(|(row, _)| *row);

        let mut records = Vec::with_capacity(rows.len());
        for (_, key) in rows {
            let additions = self.additions[&key];
            let deletions = self.deletions.remove(&key).ok_or_else(|| {
                ChartError::Payload(format!("row '{}' has no deletions value", key))
            })?;
            let author = match self.author.as_mut() {
                Some(column) => column
                    .remove(&key)
                    .ok_or_else(|| {
                        ChartError::Payload(format!("row '{}' has no author value", key))
                    })?
                    .unwrap_or_default(),
                None => String::new(),
            };
            records.push(CommitRecord {
                additions,
                deletions,
                author,
            });
        }

        if let Some(key) = self.deletions.keys().next() {
            return Err(ChartError::Payload(format!(
                "row '{}' has no additions value",
                key
            )));
        }

        if let Some(key) = self.author.as_ref().and_then(|column| column.keys().next()) {
            return Err(ChartError::Payload(format!(
                "row '{}' has no additions value",
                key
            )));
        }

        Ok(records)
    }
}
