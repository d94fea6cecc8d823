use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Column-oriented table returned by the stats endpoint.
///
/// `column_names[i]` labels `columns[i]`. Extra fields in the body are
/// ignored; the two table fields are all the chart builders consume.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatsPayload {
    pub columns: Vec<Vec<f64>>,
    pub column_names: Vec<String>,
}

/// A decoded payload with a validated name-to-column-index map.
///
/// All shape checks happen once, at construction: the name list and the
/// column list must line up, every column must have the same length, and
/// names must be unique. Lookups after that either succeed by name or
/// report an explicit error — never a silent out-of-range read.
#[derive(Debug, Clone)]
pub struct StatsTable {
    payload: StatsPayload,
    index: HashMap<String, usize>,
}

impl StatsTable {
    /// Decode a raw JSON body into a validated table.
    pub fn from_json(text: &str) -> Result<Self, ChartError> {
        let payload: StatsPayload = serde_json::from_str(text)
            .map_err(|e| ChartError::Decode(format!("payload is not a stats table: {e}")))?;
        Self::new(payload)
    }

    pub fn new(payload: StatsPayload) -> Result<Self, ChartError> {
        if payload.columns.len() != payload.column_names.len() {
            return Err(ChartError::Decode(format!(
                "{} columns but {} column names",
                payload.columns.len(),
                payload.column_names.len()
            )));
        }

        if let Some(first) = payload.columns.first() {
            for (i, col) in payload.columns.iter().enumerate() {
                if col.len() != first.len() {
                    return Err(ChartError::Decode(format!(
                        "column '{}' has {} rows, expected {}",
                        payload.column_names[i],
                        col.len(),
                        first.len()
                    )));
                }
            }
        }

        let mut index = HashMap::with_capacity(payload.column_names.len());
        for (i, name) in payload.column_names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(ChartError::Decode(format!(
                    "duplicate column name '{name}'"
                )));
            }
        }

        Ok(Self { payload, index })
    }

    /// Values of the named column, or `None` when no such column exists.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.index
            .get(name)
            .map(|&i| self.payload.columns[i].as_slice())
    }

    /// Values of the named column; absence is a decode error.
    pub fn require(&self, name: &str) -> Result<&[f64], ChartError> {
        self.column(name)
            .ok_or_else(|| ChartError::Decode(format!("column '{name}' not found")))
    }

    /// Columns whose name starts with `prefix`, in payload order.
    pub fn columns_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a [f64])> + 'a {
        self.payload
            .column_names
            .iter()
            .enumerate()
            .filter(move |(_, name)| name.starts_with(prefix))
            .map(|(i, name)| (name.as_str(), self.payload.columns[i].as_slice()))
    }

    pub fn column_names(&self) -> &[String] {
        &self.payload.column_names
    }

    /// Number of rows shared by every column (0 for an empty table).
    pub fn row_count(&self) -> usize {
        self.payload.columns.first().map_or(0, Vec::len)
    }

    pub fn payload(&self) -> &StatsPayload {
        &self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to build a table from (name, values) pairs
    fn make_table(cols: Vec<(&str, Vec<f64>)>) -> Result<StatsTable, ChartError> {
        let column_names = cols.iter().map(|(n, _)| n.to_string()).collect();
        let columns = cols.into_iter().map(|(_, v)| v).collect();
        StatsTable::new(StatsPayload {
            columns,
            column_names,
        })
    }

    #[test]
    fn test_from_json_basic() {
        let table = StatsTable::from_json(
            r#"{"columns":[[0.0,1.0],[0.4,0.6]],"column_names":["idx","p1"]}"#,
        )
        .unwrap();
        assert_eq!(table.column_names(), &["idx", "p1"]);
        assert_eq!(table.column("p1"), Some(&[0.4, 0.6][..]));
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_from_json_ignores_extra_fields() {
        let table = StatsTable::from_json(
            r#"{"columns":[[1.0]],"column_names":["idx"],"schema_version":3}"#,
        )
        .unwrap();
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_from_json_rejects_non_table_body() {
        let err = StatsTable::from_json("not json at all").unwrap_err();
        assert!(matches!(err, ChartError::Decode(_)));
    }

    #[test]
    fn test_count_mismatch_rejected() {
        let err = StatsTable::new(StatsPayload {
            columns: vec![vec![1.0], vec![2.0]],
            column_names: vec!["idx".to_string()],
        })
        .unwrap_err();
        assert!(err.to_string().contains("column names"));
    }

    #[test]
    fn test_ragged_columns_rejected() {
        let err = make_table(vec![("idx", vec![0.0, 1.0]), ("p1", vec![0.5])]).unwrap_err();
        assert!(err.to_string().contains("rows"));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = make_table(vec![("p1", vec![0.0]), ("p1", vec![1.0])]).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_missing_column_is_error_not_panic() {
        let table = make_table(vec![("p1", vec![0.5])]).unwrap();
        assert!(table.column("idx").is_none());
        let err = table.require("idx").unwrap_err();
        assert!(matches!(err, ChartError::Decode(_)));
        assert!(err.to_string().contains("'idx'"));
    }

    #[test]
    fn test_prefix_scan_preserves_order() {
        let table = make_table(vec![
            ("rc_fare", vec![0.1]),
            ("idx", vec![0.0]),
            ("rc_age", vec![0.2]),
        ])
        .unwrap();
        let names: Vec<&str> = table.columns_with_prefix("rc_").map(|(n, _)| n).collect();
        assert_eq!(names, vec!["rc_fare", "rc_age"]);
    }

    #[test]
    fn test_prefix_scan_empty_when_no_match() {
        let table = make_table(vec![("idx", vec![0.0])]).unwrap();
        assert_eq!(table.columns_with_prefix("rc_").count(), 0);
    }
}
