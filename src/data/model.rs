use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use ndarray::{Array2, Axis};

use crate::error::DataError;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a loaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common DataFrame dtypes.
/// Using `BTreeMap` / `BTreeSet` downstream so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64` feature.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the loaded file, before the label column is split off
// ---------------------------------------------------------------------------

/// A loaded table: rows of cells aligned with `column_names`.
#[derive(Debug, Clone)]
pub struct Table {
    /// Column names in file order.
    pub column_names: Vec<String>,
    /// One `Vec<CellValue>` per row, same length as `column_names`.
    pub rows: Vec<Vec<CellValue>>,
    /// For each column the sorted set of unique values.
    pub unique_values: BTreeMap<String, BTreeSet<CellValue>>,
}

impl Table {
    /// Build the unique-value index from the loaded rows.
    pub fn from_rows(column_names: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let mut unique_values: BTreeMap<String, BTreeSet<CellValue>> = BTreeMap::new();

        for row in &rows {
            for (col, val) in column_names.iter().zip(row) {
                unique_values
                    .entry(col.clone())
                    .or_default()
                    .insert(val.clone());
            }
        }
        Table {
            column_names,
            rows,
            unique_values,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index(&self, name: &str) -> Result<usize, DataError> {
        self.column_names
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| DataError::MissingColumn {
                name: name.to_string(),
                available: self.column_names.clone(),
            })
    }

    /// Drop the `target` column from the table and keep it as labels.
    ///
    /// Every remaining column becomes a feature and must hold numbers
    /// (booleans count as 0/1). Labels are rendered as text, so an integer
    /// class column `0/1` yields the labels `"0"` and `"1"`.
    pub fn split_target(&self, target: &str) -> Result<Dataset, DataError> {
        let target_idx = self.column_index(target)?;
        let feature_idx: Vec<usize> = (0..self.column_names.len())
            .filter(|&i| i != target_idx)
            .collect();
        if feature_idx.is_empty() {
            return Err(DataError::NoFeatures {
                target: target.to_string(),
            });
        }

        let mut values = Vec::with_capacity(self.rows.len() * feature_idx.len());
        let mut labels = Vec::with_capacity(self.rows.len());

        for (row_no, row) in self.rows.iter().enumerate() {
            for &col in &feature_idx {
                match row.get(col) {
                    None | Some(CellValue::Null) => {
                        return Err(DataError::MissingValue {
                            column: self.column_names[col].clone(),
                            row: row_no,
                        })
                    }
                    Some(other) => {
                        let v = other.as_f64().ok_or_else(|| DataError::NonNumericFeature {
                            column: self.column_names[col].clone(),
                            row: row_no,
                            value: other.to_string(),
                        })?;
                        values.push(v);
                    }
                }
            }
            match row.get(target_idx) {
                Some(CellValue::Null) | None => {
                    return Err(DataError::MissingValue {
                        column: target.to_string(),
                        row: row_no,
                    })
                }
                Some(label) => labels.push(label.to_string()),
            }
        }

        let features = Array2::from_shape_vec((self.rows.len(), feature_idx.len()), values)
            .map_err(|_| DataError::LengthMismatch {
                rows: self.rows.len(),
                targets: labels.len(),
            })?;

        Dataset::new(
            feature_idx
                .iter()
                .map(|&i| self.column_names[i].clone())
                .collect(),
            features,
            target.to_string(),
            labels,
        )
    }
}

// ---------------------------------------------------------------------------
// Dataset – features and labels ready for an estimator
// ---------------------------------------------------------------------------

/// Numeric feature matrix plus one text label per row.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub feature_names: Vec<String>,
    /// Rows x features.
    pub features: Array2<f64>,
    pub target_name: String,
    pub target: Vec<String>,
}

impl Dataset {
    pub fn new(
        feature_names: Vec<String>,
        features: Array2<f64>,
        target_name: String,
        target: Vec<String>,
    ) -> Result<Self, DataError> {
        if features.nrows() != target.len() {
            return Err(DataError::LengthMismatch {
                rows: features.nrows(),
                targets: target.len(),
            });
        }
        Ok(Dataset {
            feature_names,
            features,
            target_name,
            target,
        })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.target.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// Sorted unique labels.
    pub fn classes(&self) -> Vec<String> {
        let set: BTreeSet<&String> = self.target.iter().collect();
        set.into_iter().cloned().collect()
    }

    /// A new dataset holding only `indices`, in that order.
    pub fn select(&self, indices: &[usize]) -> Result<Dataset, DataError> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.len()) {
            return Err(DataError::RowOutOfRange {
                index: bad,
                len: self.len(),
            });
        }
        Ok(Dataset {
            feature_names: self.feature_names.clone(),
            features: self.features.select(Axis(0), indices),
            target_name: self.target_name.clone(),
            target: indices.iter().map(|&i| self.target[i].clone()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blood_table() -> Table {
        let cols = ["Recency", "Frequency", "Class"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let rows = vec![
            vec![
                CellValue::Integer(2),
                CellValue::Integer(50),
                CellValue::String("donated".into()),
            ],
            vec![
                CellValue::Integer(4),
                CellValue::Float(3.5),
                CellValue::String("not donated".into()),
            ],
            vec![
                CellValue::Integer(9),
                CellValue::Integer(1),
                CellValue::String("not donated".into()),
            ],
        ];
        Table::from_rows(cols, rows)
    }

    #[test]
    fn split_target_separates_label_column() {
        let ds = blood_table().split_target("Class").unwrap();
        assert_eq!(ds.feature_names, vec!["Recency", "Frequency"]);
        assert_eq!(ds.features.nrows(), ds.target.len());
        assert_eq!(ds.features[[1, 1]], 3.5);
        assert_eq!(ds.classes(), vec!["donated", "not donated"]);
    }

    #[test]
    fn split_target_rejects_unknown_column() {
        let err = blood_table().split_target("Label").unwrap_err();
        assert!(matches!(err, DataError::MissingColumn { .. }));
    }

    #[test]
    fn split_target_rejects_text_features() {
        let err = blood_table().split_target("Recency").unwrap_err();
        assert!(matches!(err, DataError::NonNumericFeature { ref column, .. } if column == "Class"));
    }

    #[test]
    fn select_keeps_requested_rows_in_order() {
        let ds = blood_table().split_target("Class").unwrap();
        let sub = ds.select(&[2, 0]).unwrap();
        assert_eq!(sub.target, vec!["not donated", "donated"]);
        assert_eq!(sub.features[[0, 0]], 9.0);
        assert!(ds.select(&[3]).is_err());
    }

    #[test]
    fn cell_values_order_across_types() {
        let mut set = BTreeSet::new();
        set.insert(CellValue::String("a".into()));
        set.insert(CellValue::Integer(1));
        set.insert(CellValue::Null);
        let first = set.iter().next().cloned();
        assert_eq!(first, Some(CellValue::Null));
    }
}
