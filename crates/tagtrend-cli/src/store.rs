//! JSON-file stand-in for the bronze/silver/gold table layers.
//!
//! Each gold table is one JSON array under `<root>/gold/<NAME>.json`; silver
//! partitions are serialized [`Table`]s under `<root>/silver/`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tagtrend_engine::Table;

pub const WEEKLY_TRENDS_COUNTRY: &str = "WEEKLY_TRENDS_COUNTRY";
pub const WEEKLY_TRENDS: &str = "WEEKLY_TRENDS";
pub const TEN_WEEKS_TRENDS: &str = "10_WEEKS_TRENDS";
pub const NEW_PREDICTION: &str = "NEW_PREDICTION";
pub const LAST_PREDICTION: &str = "LAST_PREDICTION";
pub const EVALUATIONS: &str = "EVALUATIONS";
pub const TRAINING_MATRIX: &str = "TRAINING_MATRIX";
pub const RUNS: &str = "RUNS";

/// Silver partition holding the most recent refined batch.
pub const LAST_WEEK: &str = "last_week";

#[derive(Debug, Clone)]
pub struct TableStore {
    root: PathBuf,
}

impl TableStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn gold_path(&self, table: &str) -> PathBuf {
        self.root.join("gold").join(format!("{table}.json"))
    }

    fn silver_path(&self, partition: &str) -> PathBuf {
        self.root.join("silver").join(format!("{partition}.json"))
    }

    /// Read a raw bronze table from an arbitrary path.
    pub fn read_bronze(path: &Path) -> anyhow::Result<Table> {
        read_json(path)
    }

    pub fn write_silver(&self, partition: &str, table: &Table) -> anyhow::Result<()> {
        write_json(&self.silver_path(partition), table)
    }

    pub fn read_silver(&self, partition: &str) -> anyhow::Result<Table> {
        read_json(&self.silver_path(partition))
    }

    /// All rows of a gold table; a table that was never written is empty.
    pub fn read_gold<T: DeserializeOwned>(&self, table: &str) -> anyhow::Result<Vec<T>> {
        let path = self.gold_path(table);
        if !path.exists() {
            return Ok(Vec::new());
        }
        read_json(&path)
    }

    /// Append rows to a gold table, creating it if needed.
    pub fn append_gold<T>(&self, table: &str, rows: &[T]) -> anyhow::Result<()>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        let mut existing: Vec<T> = self.read_gold(table)?;
        existing.extend_from_slice(rows);
        self.overwrite_gold(table, &existing)
    }

    /// Append rows to a gold table after dropping the existing rows `stale`
    /// matches, so re-running a step replaces its own rows.
    pub fn replace_gold<T, F>(&self, table: &str, rows: &[T], stale: F) -> anyhow::Result<()>
    where
        T: Serialize + DeserializeOwned + Clone,
        F: Fn(&T) -> bool,
    {
        let mut existing: Vec<T> = self.read_gold(table)?;
        existing.retain(|row| !stale(row));
        existing.extend_from_slice(rows);
        self.overwrite_gold(table, &existing)
    }

    /// Replace the whole content of a gold table.
    pub fn overwrite_gold<T: Serialize + ?Sized>(&self, table: &str, value: &T) -> anyhow::Result<()> {
        write_json(&self.gold_path(table), value)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}
