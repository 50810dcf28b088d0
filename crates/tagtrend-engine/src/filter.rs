//! Column projection, country allow-list, and null-row removal.

use std::collections::HashSet;

use crate::error::EngineError;
use crate::table::Table;

/// Column holding the country code of each row.
pub const COUNTRY_COLUMN: &str = "country";

/// Project `table` onto `columns`, then keep only complete rows whose country
/// is in `allowed_countries`.
///
/// The output carries exactly `columns`, in that order, and its rows are
/// numbered contiguously from zero.
///
/// # Errors
///
/// Returns [`EngineError::MissingColumn`] if a requested column is absent from
/// the input, or if `columns` does not include [`COUNTRY_COLUMN`].
pub fn filter_rows<C, K>(
    table: &Table,
    columns: &[C],
    allowed_countries: &[K],
) -> Result<Table, EngineError>
where
    C: AsRef<str>,
    K: AsRef<str>,
{
    let indices = columns
        .iter()
        .map(|name| table.column_index(name.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    let country_pos = columns
        .iter()
        .position(|name| name.as_ref() == COUNTRY_COLUMN)
        .ok_or_else(|| EngineError::MissingColumn(COUNTRY_COLUMN.to_string()))?;

    let allowed: HashSet<&str> = allowed_countries.iter().map(AsRef::as_ref).collect();

    let mut filtered = Table::new(columns.iter().map(|c| c.as_ref().to_string()))?;
    let mut dropped_country = 0_usize;
    let mut dropped_null = 0_usize;

    for row in table.rows() {
        let projected: Vec<Option<String>> = indices.iter().map(|&i| row[i].clone()).collect();

        // A null country can never be allowed; count it as a null row.
        match projected[country_pos].as_deref() {
            None => {
                dropped_null += 1;
                continue;
            }
            Some(country) if !allowed.contains(country) => {
                dropped_country += 1;
                continue;
            }
            Some(_) => {}
        }

        if projected.iter().any(Option::is_none) {
            dropped_null += 1;
            continue;
        }

        filtered.push_row(projected)?;
    }

    tracing::debug!(
        input_rows = table.len(),
        kept = filtered.len(),
        dropped_country,
        dropped_null,
        "filtered rows"
    );

    Ok(filtered)
}
