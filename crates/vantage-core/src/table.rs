//! Document table adapter
//!
//! The host document exposes its tables through a small action-based API:
//! `fetch_table` returns column-major data, `apply_user_actions` applies a
//! batch of schema or record actions. This module defines that contract
//! surface, the column-major to row-major pivot, and an in-memory adapter
//! for tests and headless use.

use std::cell::RefCell;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single cell value in a document table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// Numeric view of the cell, if it holds a finite number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) if f.is_finite() => Some(*f),
            _ => None,
        }
    }

    /// String view of the cell, if it holds text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the cell is null.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

/// Column definition used by `AddTable`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub col_id: String,

    /// Host column type ("Text", "Numeric", "Int", "Bool", "DateTime")
    pub col_type: String,
}

impl ColumnDef {
    pub fn new(col_id: impl Into<String>, col_type: impl Into<String>) -> Self {
        Self {
            col_id: col_id.into(),
            col_type: col_type.into(),
        }
    }
}

/// A schema or record action applied to the host document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UserAction {
    AddTable {
        table_id: String,
        columns: Vec<ColumnDef>,
    },
    AddColumn {
        table_id: String,
        col_id: String,
        col_type: String,
    },
    AddRecord {
        table_id: String,
        fields: BTreeMap<String, CellValue>,
    },
    BulkAddRecord {
        table_id: String,
        records: Vec<BTreeMap<String, CellValue>>,
    },
    UpdateRecord {
        table_id: String,
        row_id: i64,
        fields: BTreeMap<String, CellValue>,
    },
    RemoveRecord {
        table_id: String,
        row_id: i64,
    },
}

/// Per-action return values from `apply_user_actions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionResults {
    /// One entry per submitted action; record adds return the new row id.
    pub ret_values: Vec<serde_json::Value>,
}

/// Column-major table data as returned by the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableData {
    /// Column name to column values; all columns have equal length in
    /// well-formed data, ragged columns are padded with nulls on pivot.
    pub cols: BTreeMap<String, Vec<CellValue>>,
}

/// One row after pivoting to row-major form.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Row id from the `id` column, or the 1-based position if absent
    pub id: i64,

    /// Field values, excluding the `id` column
    pub fields: BTreeMap<String, CellValue>,
}

impl Record {
    /// A field value, or `Null` if the column is missing.
    pub fn field(&self, name: &str) -> &CellValue {
        self.fields.get(name).unwrap_or(&CellValue::Null)
    }
}

impl TableData {
    /// Number of rows (the longest column).
    pub fn row_count(&self) -> usize {
        self.cols.values().map(Vec::len).max().unwrap_or(0)
    }

    /// Column values by name.
    pub fn column(&self, name: &str) -> Option<&[CellValue]> {
        self.cols.get(name).map(Vec::as_slice)
    }

    /// Finite numeric values of a column, skipping everything else.
    pub fn numeric_column(&self, name: &str) -> Vec<f64> {
        self.column(name)
            .map(|col| col.iter().filter_map(CellValue::as_f64).collect())
            .unwrap_or_default()
    }

    /// Pivot to row-major records.
    pub fn rows(&self) -> Vec<Record> {
        let count = self.row_count();
        let ids = self.cols.get("id");

        (0..count)
            .map(|i| {
                let id = ids
                    .and_then(|col| col.get(i))
                    .and_then(|cell| match cell {
                        CellValue::Int(id) => Some(*id),
                        _ => None,
                    })
                    .unwrap_or(i as i64 + 1);

                let fields = self
                    .cols
                    .iter()
                    .filter(|(name, _)| name.as_str() != "id")
                    .map(|(name, col)| {
                        (name.clone(), col.get(i).cloned().unwrap_or(CellValue::Null))
                    })
                    .collect();

                Record { id, fields }
            })
            .collect()
    }
}

/// Errors from the table adapter.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Table not found: {table_id}")]
    TableNotFound { table_id: String },

    #[error("Record not found: {table_id}[{row_id}]")]
    RecordNotFound { table_id: String, row_id: i64 },

    #[error("Table already exists: {table_id}")]
    TableExists { table_id: String },

    #[error("Host rejected actions: {message}")]
    Rejected { message: String },

    #[error("Host unavailable: {message}")]
    Unavailable { message: String },
}

/// Result type alias for table operations.
pub type TableResult<T> = Result<T, TableError>;

/// The trait the host's document API is consumed through.
pub trait TableAdapter {
    /// Fetch a table in column-major form.
    fn fetch_table(&self, table_id: &str) -> TableResult<TableData>;

    /// Apply a batch of actions, returning per-action values.
    fn apply_user_actions(&self, actions: Vec<UserAction>) -> TableResult<ActionResults>;
}

#[derive(Debug, Default)]
struct MemTable {
    rows: BTreeMap<i64, BTreeMap<String, CellValue>>,
    columns: Vec<String>,
    next_id: i64,
}

/// In-memory table adapter for tests and headless operation.
#[derive(Debug, Default)]
pub struct MemoryTableAdapter {
    tables: RefCell<BTreeMap<String, MemTable>>,
}

impl MemoryTableAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a table exists.
    pub fn has_table(&self, table_id: &str) -> bool {
        self.tables.borrow().contains_key(table_id)
    }

    fn add_record(
        table: &mut MemTable,
        fields: BTreeMap<String, CellValue>,
    ) -> i64 {
        table.next_id += 1;
        let row_id = table.next_id;
        for name in fields.keys() {
            if !table.columns.iter().any(|c| c == name) {
                table.columns.push(name.clone());
            }
        }
        table.rows.insert(row_id, fields);
        row_id
    }
}

impl TableAdapter for MemoryTableAdapter {
    fn fetch_table(&self, table_id: &str) -> TableResult<TableData> {
        let tables = self.tables.borrow();
        let table = tables.get(table_id).ok_or_else(|| TableError::TableNotFound {
            table_id: table_id.to_string(),
        })?;

        let mut cols: BTreeMap<String, Vec<CellValue>> = BTreeMap::new();
        cols.insert(
            "id".to_string(),
            table.rows.keys().map(|id| CellValue::Int(*id)).collect(),
        );
        for name in &table.columns {
            let values = table
                .rows
                .values()
                .map(|row| row.get(name).cloned().unwrap_or(CellValue::Null))
                .collect();
            cols.insert(name.clone(), values);
        }

        Ok(TableData { cols })
    }

    fn apply_user_actions(&self, actions: Vec<UserAction>) -> TableResult<ActionResults> {
        let mut tables = self.tables.borrow_mut();
        let mut results = ActionResults::default();

        for action in actions {
            let ret = match action {
                UserAction::AddTable { table_id, columns } => {
                    if tables.contains_key(&table_id) {
                        return Err(TableError::TableExists { table_id });
                    }
                    let table = MemTable {
                        columns: columns.into_iter().map(|c| c.col_id).collect(),
                        ..MemTable::default()
                    };
                    tables.insert(table_id.clone(), table);
                    serde_json::Value::String(table_id)
                }
                UserAction::AddColumn {
                    table_id,
                    col_id,
                    col_type: _,
                } => {
                    let table =
                        tables
                            .get_mut(&table_id)
                            .ok_or_else(|| TableError::TableNotFound {
                                table_id: table_id.clone(),
                            })?;
                    if !table.columns.iter().any(|c| *c == col_id) {
                        table.columns.push(col_id.clone());
                    }
                    serde_json::Value::String(col_id)
                }
                UserAction::AddRecord { table_id, fields } => {
                    let table =
                        tables
                            .get_mut(&table_id)
                            .ok_or_else(|| TableError::TableNotFound {
                                table_id: table_id.clone(),
                            })?;
                    serde_json::Value::from(Self::add_record(table, fields))
                }
                UserAction::BulkAddRecord { table_id, records } => {
                    let table =
                        tables
                            .get_mut(&table_id)
                            .ok_or_else(|| TableError::TableNotFound {
                                table_id: table_id.clone(),
                            })?;
                    let ids: Vec<i64> = records
                        .into_iter()
                        .map(|fields| Self::add_record(table, fields))
                        .collect();
                    serde_json::to_value(ids).unwrap_or(serde_json::Value::Null)
                }
                UserAction::UpdateRecord {
                    table_id,
                    row_id,
                    fields,
                } => {
                    let table =
                        tables
                            .get_mut(&table_id)
                            .ok_or_else(|| TableError::TableNotFound {
                                table_id: table_id.clone(),
                            })?;
                    let row =
                        table
                            .rows
                            .get_mut(&row_id)
                            .ok_or(TableError::RecordNotFound {
                                table_id: table_id.clone(),
                                row_id,
                            })?;
                    for name in fields.keys() {
                        if !table.columns.iter().any(|c| c == name) {
                            table.columns.push(name.clone());
                        }
                    }
                    row.extend(fields);
                    serde_json::Value::Null
                }
                UserAction::RemoveRecord { table_id, row_id } => {
                    let table =
                        tables
                            .get_mut(&table_id)
                            .ok_or_else(|| TableError::TableNotFound {
                                table_id: table_id.clone(),
                            })?;
                    table
                        .rows
                        .remove(&row_id)
                        .ok_or(TableError::RecordNotFound {
                            table_id: table_id.clone(),
                            row_id,
                        })?;
                    serde_json::Value::Null
                }
            };
            results.ret_values.push(ret);
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, CellValue)]) -> BTreeMap<String, CellValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_pivot_row_major() {
        let mut cols = BTreeMap::new();
        cols.insert(
            "id".to_string(),
            vec![CellValue::Int(7), CellValue::Int(9)],
        );
        cols.insert(
            "name".to_string(),
            vec![CellValue::from("Alpha"), CellValue::from("Beta")],
        );
        cols.insert("score".to_string(), vec![CellValue::Float(1.5)]);

        let data = TableData { cols };
        let rows = data.rows();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, 7);
        assert_eq!(rows[0].field("name").as_str(), Some("Alpha"));
        assert_eq!(rows[1].id, 9);
        // Ragged column padded with null
        assert!(rows[1].field("score").is_null());
        // The id column is not duplicated into fields
        assert!(!rows[0].fields.contains_key("id"));
    }

    #[test]
    fn test_pivot_synthesizes_ids() {
        let mut cols = BTreeMap::new();
        cols.insert(
            "name".to_string(),
            vec![CellValue::from("A"), CellValue::from("B")],
        );
        let rows = TableData { cols }.rows();
        assert_eq!(rows[0].id, 1);
        assert_eq!(rows[1].id, 2);
    }

    #[test]
    fn test_numeric_column_skips_non_numbers() {
        let mut cols = BTreeMap::new();
        cols.insert(
            "v".to_string(),
            vec![
                CellValue::Int(1),
                CellValue::Text("x".to_string()),
                CellValue::Float(2.5),
                CellValue::Null,
                CellValue::Float(f64::NAN),
            ],
        );
        let data = TableData { cols };
        assert_eq!(data.numeric_column("v"), vec![1.0, 2.5]);
        assert!(data.numeric_column("missing").is_empty());
    }

    #[test]
    fn test_memory_adapter_crud() {
        let adapter = MemoryTableAdapter::new();

        adapter
            .apply_user_actions(vec![UserAction::AddTable {
                table_id: "Bookmarks".to_string(),
                columns: vec![
                    ColumnDef::new("name", "Text"),
                    ColumnDef::new("zoom", "Numeric"),
                ],
            }])
            .unwrap();

        let results = adapter
            .apply_user_actions(vec![UserAction::AddRecord {
                table_id: "Bookmarks".to_string(),
                fields: fields(&[("name", CellValue::from("Home")), ("zoom", CellValue::Float(12.0))]),
            }])
            .unwrap();
        let row_id = results.ret_values[0].as_i64().unwrap();

        adapter
            .apply_user_actions(vec![UserAction::UpdateRecord {
                table_id: "Bookmarks".to_string(),
                row_id,
                fields: fields(&[("zoom", CellValue::Float(14.0))]),
            }])
            .unwrap();

        let data = adapter.fetch_table("Bookmarks").unwrap();
        let rows = data.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].field("zoom").as_f64(), Some(14.0));

        adapter
            .apply_user_actions(vec![UserAction::RemoveRecord {
                table_id: "Bookmarks".to_string(),
                row_id,
            }])
            .unwrap();
        assert_eq!(adapter.fetch_table("Bookmarks").unwrap().row_count(), 0);
    }

    #[test]
    fn test_memory_adapter_errors() {
        let adapter = MemoryTableAdapter::new();

        assert!(matches!(
            adapter.fetch_table("Missing"),
            Err(TableError::TableNotFound { .. })
        ));

        let err = adapter
            .apply_user_actions(vec![UserAction::RemoveRecord {
                table_id: "Missing".to_string(),
                row_id: 1,
            }])
            .unwrap_err();
        assert!(err.to_string().contains("Missing"));
    }

    #[test]
    fn test_bulk_add_returns_ids() {
        let adapter = MemoryTableAdapter::new();
        adapter
            .apply_user_actions(vec![UserAction::AddTable {
                table_id: "T".to_string(),
                columns: vec![ColumnDef::new("v", "Int")],
            }])
            .unwrap();

        let results = adapter
            .apply_user_actions(vec![UserAction::BulkAddRecord {
                table_id: "T".to_string(),
                records: vec![
                    fields(&[("v", CellValue::Int(1))]),
                    fields(&[("v", CellValue::Int(2))]),
                ],
            }])
            .unwrap();

        let ids: Vec<i64> = serde_json::from_value(results.ret_values[0].clone()).unwrap();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_cell_value_serde_shapes() {
        let json = serde_json::to_value(CellValue::Int(5)).unwrap();
        assert_eq!(json, serde_json::json!(5));

        let back: CellValue = serde_json::from_value(serde_json::json!("hello")).unwrap();
        assert_eq!(back, CellValue::Text("hello".to_string()));
    }
}
