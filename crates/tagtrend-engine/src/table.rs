//! Minimal in-memory table: ordered column names plus rows of nullable cells.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

/// Wire shape of [`Table`]; checked before it becomes one.
#[derive(Deserialize)]
struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl TryFrom<RawTable> for Table {
    type Error = EngineError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        let table = Table {
            columns: raw.columns,
            rows: raw.rows,
        };
        table.validate()?;
        Ok(table)
    }
}

impl Table {
    /// Create an empty table with the given header.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Schema`] if a column name repeats.
    pub fn new<I, S>(columns: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        for (idx, name) in columns.iter().enumerate() {
            if columns[..idx].contains(name) {
                return Err(EngineError::Schema(format!("duplicate column \"{name}\"")));
            }
        }
        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    /// Append a row of cells in header order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Schema`] if the row width differs from the header.
    pub fn push_row(&mut self, row: Vec<Option<String>>) -> Result<(), EngineError> {
        if row.len() != self.columns.len() {
            return Err(EngineError::Schema(format!(
                "row {} has {} cells, expected {}",
                self.rows.len(),
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Re-check the header and row widths.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Schema`] on duplicate columns or ragged rows.
    pub fn validate(&self) -> Result<(), EngineError> {
        let mut rebuilt = Table::new(self.columns.iter().cloned())?;
        for row in &self.rows {
            rebuilt.push_row(row.clone())?;
        }
        Ok(())
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `name` in the header.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MissingColumn`] if the column does not exist.
    pub fn column_index(&self, name: &str) -> Result<usize, EngineError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| EngineError::MissingColumn(name.to_string()))
    }

    /// All cells of one column, top to bottom.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MissingColumn`] if the column does not exist.
    pub fn column(&self, name: &str) -> Result<Vec<Option<&str>>, EngineError> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| row[idx].as_deref()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    #[test]
    fn rejects_duplicate_columns() {
        let result = Table::new(["country", "country"]);
        assert!(
            matches!(result, Err(EngineError::Schema(ref msg)) if msg.contains("duplicate column")),
            "expected Schema error, got: {result:?}"
        );
    }

    #[test]
    fn rejects_ragged_rows() {
        let mut table = Table::new(["country", "video_tags"]).unwrap();
        let result = table.push_row(cells(&[Some("US")]));
        assert!(matches!(result, Err(EngineError::Schema(_))));
        assert!(table.is_empty());
    }

    #[test]
    fn column_lookup_returns_cells_in_row_order() {
        let mut table = Table::new(["country", "video_tags"]).unwrap();
        table.push_row(cells(&[Some("US"), Some("a, b")])).unwrap();
        table.push_row(cells(&[Some("GB"), None])).unwrap();
        assert_eq!(table.column("video_tags").unwrap(), vec![Some("a, b"), None]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let table = Table::new(["country"]).unwrap();
        let err = table.column("title").unwrap_err();
        assert!(matches!(err, EngineError::MissingColumn(ref c) if c == "title"));
    }

    #[test]
    fn validate_catches_ragged_deserialized_table() {
        let json = r#"{"columns":["a","b"],"rows":[["1","2"],["3"]]}"#;
        let err = serde_json::from_str::<Table>(json).unwrap_err();
        assert!(err.to_string().contains("row 1 has 1 cells, expected 2"), "got: {err}");
    }

    #[test]
    fn deserializing_rejects_duplicate_columns() {
        let json = r#"{"columns":["a","a"],"rows":[]}"#;
        let err = serde_json::from_str::<Table>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate column"), "got: {err}");
    }

    #[test]
    fn well_formed_table_deserializes() {
        let json = r#"{"columns":["country","video_tags"],"rows":[["US",null]]}"#;
        let table: Table = serde_json::from_str(json).unwrap();
        assert_eq!(table.column("video_tags").unwrap(), vec![None]);
    }
}
