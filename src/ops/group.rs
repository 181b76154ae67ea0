//! Grouping and per-group aggregation

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::error::Result;
use crate::model::{CellValue, Column, DataFrame};

/// Rows partitioned by equality of values in one or more key columns.
///
/// Groups iterate in the order their keys first appear in the source
/// frame. Rows whose key holds the missing marker form their own group;
/// they are never silently dropped.
pub struct GroupBy<'a> {
    frame: &'a DataFrame,
    keys: Vec<String>,
    groups: IndexMap<Vec<CellValue>, Vec<usize>, FxBuildHasher>,
}

impl DataFrame {
    /// Partition rows by the values of the named key columns
    pub fn groupby(&self, keys: &[&str]) -> Result<GroupBy<'_>> {
        let key_columns: Vec<&Column> =
            keys.iter().map(|&name| self.column(name)).collect::<Result<_>>()?;

        let mut groups: IndexMap<Vec<CellValue>, Vec<usize>, FxBuildHasher> = IndexMap::default();
        for row in 0..self.row_count() {
            let key: Vec<CellValue> = key_columns
                .iter()
                .map(|col| col.values()[row].clone())
                .collect();
            groups.entry(key).or_default().push(row);
        }

        Ok(GroupBy {
            frame: self,
            keys: keys.iter().map(|k| k.to_string()).collect(),
            groups,
        })
    }
}

impl<'a> GroupBy<'a> {
    /// Number of distinct groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate groups in first-appearance order as (key, row positions)
    pub fn iter(&self) -> impl Iterator<Item = (&[CellValue], &[usize])> + '_ {
        self.groups
            .iter()
            .map(|(key, rows)| (key.as_slice(), rows.as_slice()))
    }

    /// Per-group mean of every numeric non-key column, missing cells
    /// excluded from each denominator
    pub fn mean(&self) -> Result<DataFrame> {
        self.aggregate_numeric(|col| {
            Ok(match col.mean()? {
                Some(m) => CellValue::Float(m),
                None => CellValue::Null,
            })
        })
    }

    /// Per-group sum of every numeric non-key column
    pub fn sum(&self) -> Result<DataFrame> {
        self.aggregate_numeric(|col| col.sum())
    }

    /// Group sizes, missing cells included; result column is `"count"`
    pub fn count(&self) -> Result<DataFrame> {
        let mut frame = self.key_frame()?;
        frame.set_column(
            "count",
            self.groups
                .values()
                .map(|rows| CellValue::Int(rows.len() as i64))
                .collect(),
        )?;
        Ok(frame)
    }

    /// Per-group mean of one column, missing cells excluded. Aggregating
    /// a key column emits the result as `"mean"` so the keys survive.
    pub fn column_mean(&self, name: &str) -> Result<DataFrame> {
        let column = self.frame.column(name)?;
        let mut frame = self.key_frame()?;
        let mut means = Vec::with_capacity(self.groups.len());
        for rows in self.groups.values() {
            means.push(match column.take(rows).mean()? {
                Some(m) => CellValue::Float(m),
                None => CellValue::Null,
            });
        }
        frame.set_column(self.result_name(name, "mean"), means)?;
        Ok(frame)
    }

    /// Per-group count of one column's present values (missing excluded).
    /// Aggregating a key column emits the result as `"count"` so the keys
    /// survive.
    pub fn column_count(&self, name: &str) -> Result<DataFrame> {
        let column = self.frame.column(name)?;
        let mut frame = self.key_frame()?;
        frame.set_column(
            self.result_name(name, "count"),
            self.groups
                .values()
                .map(|rows| CellValue::Int(column.take(rows).count_non_null() as i64))
                .collect(),
        )?;
        Ok(frame)
    }

    /// Output column name for a single-column aggregate; a name that
    /// collides with a key column must not overwrite it
    fn result_name<'n>(&self, name: &'n str, fallback: &'n str) -> &'n str {
        if self.keys.iter().any(|k| k == name) {
            fallback
        } else {
            name
        }
    }

    /// One frame row per group carrying the key column values
    fn key_frame(&self) -> Result<DataFrame> {
        let mut columns = Vec::with_capacity(self.keys.len());
        for (pos, name) in self.keys.iter().enumerate() {
            columns.push(Column::new(
                name.clone(),
                self.groups.keys().map(|key| key[pos].clone()).collect(),
            ));
        }
        DataFrame::from_columns(columns)
    }

    fn aggregate_numeric<F>(&self, agg: F) -> Result<DataFrame>
    where
        F: Fn(&Column) -> Result<CellValue>,
    {
        let mut frame = self.key_frame()?;
        for column in self.frame.columns() {
            if self.keys.iter().any(|k| k == column.name()) || !column.kind().is_numeric() {
                continue;
            }
            let mut cells = Vec::with_capacity(self.groups.len());
            for rows in self.groups.values() {
                cells.push(agg(&column.take(rows))?);
            }
            frame.set_column(column.name(), cells)?;
        }
        Ok(frame)
    }
}
