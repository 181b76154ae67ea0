//! The labeled tabular data store

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxBuildHasher;

use crate::error::{FrameError, Result};
use crate::model::column::Column;
use crate::model::mask::Mask;
use crate::model::value::CellValue;

/// Maps a row identifier to its physical position.
///
/// Default is the dense positional index `0..N`. A column may be promoted
/// to serve as the lookup key; its labels need not be unique.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RowIndex {
    #[default]
    Positional,
    Labels {
        name: String,
        labels: Vec<CellValue>,
        lookup: IndexMap<CellValue, Vec<usize>, FxBuildHasher>,
    },
}

impl RowIndex {
    fn from_labels(name: String, labels: Vec<CellValue>) -> Self {
        let mut lookup: IndexMap<CellValue, Vec<usize>, FxBuildHasher> = IndexMap::default();
        for (pos, label) in labels.iter().enumerate() {
            lookup.entry(label.clone()).or_default().push(pos);
        }
        RowIndex::Labels {
            name,
            labels,
            lookup,
        }
    }

    /// The label shown for a physical row position
    pub fn label_at(&self, position: usize) -> CellValue {
        match self {
            RowIndex::Positional => CellValue::Int(position as i64),
            RowIndex::Labels { labels, .. } => labels[position].clone(),
        }
    }

    /// Restrict the index to the given physical positions, in order
    fn take(&self, positions: &[usize]) -> RowIndex {
        match self {
            RowIndex::Positional => RowIndex::Positional,
            RowIndex::Labels { name, labels, .. } => RowIndex::from_labels(
                name.clone(),
                positions.iter().map(|&i| labels[i].clone()).collect(),
            ),
        }
    }
}

/// An ordered sequence of named columns sharing one row count, plus a
/// row index for label-based lookup.
///
/// Transformations produce a new frame; operations suffixed `_in_place`
/// mutate instead, leaving the equal-length invariant intact.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataFrame {
    columns: Vec<Column>,
    index: RowIndex,
}

impl DataFrame {
    /// Build a frame from `(name, values)` pairs, preserving order
    pub fn new(pairs: Vec<(&str, Vec<CellValue>)>) -> Result<Self> {
        Self::from_columns(
            pairs
                .into_iter()
                .map(|(name, values)| Column::new(name, values))
                .collect(),
        )
    }

    /// Build a frame from ready-made columns
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let mut seen: IndexSet<&str> = IndexSet::new();
        for col in &columns {
            if !seen.insert(col.name()) {
                return Err(FrameError::DuplicateColumn {
                    name: col.name().to_string(),
                });
            }
        }
        if let Some(first) = columns.first() {
            for col in &columns[1..] {
                if col.len() != first.len() {
                    return Err(FrameError::LengthMismatch {
                        expected: first.len(),
                        actual: col.len(),
                    });
                }
            }
        }
        Ok(Self {
            columns,
            index: RowIndex::Positional,
        })
    }

    /// Build a frame from a record sequence.
    ///
    /// Column order is the order keys first appear across the records; a
    /// record missing a key contributes the missing marker for that cell.
    pub fn from_records(records: &[Vec<(String, CellValue)>]) -> Result<Self> {
        let mut names: IndexSet<String> = IndexSet::new();
        for record in records {
            for (key, _) in record {
                names.insert(key.clone());
            }
        }

        let mut columns: Vec<Column> = names
            .iter()
            .map(|name| Column::new(name.clone(), Vec::new()))
            .collect();
        for record in records {
            for (idx, name) in names.iter().enumerate() {
                let cell = record
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, v)| v.clone())
                    .unwrap_or(CellValue::Null);
                columns[idx].push(cell);
            }
        }
        Self::from_columns(columns)
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(|c| c.len()).unwrap_or(0)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub(crate) fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    pub fn index(&self) -> &RowIndex {
        &self.index
    }

    pub(crate) fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    /// Single column by name
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| FrameError::ColumnNotFound {
                name: name.to_string(),
            })
    }

    /// The cells of one physical row, in column order
    pub fn row(&self, position: usize) -> Option<Vec<&CellValue>> {
        if position >= self.row_count() {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values()[position]).collect())
    }

    /// New frame with only the requested columns, in the requested order
    pub fn select(&self, names: &[&str]) -> Result<DataFrame> {
        let mut columns = Vec::with_capacity(names.len());
        for &name in names {
            columns.push(self.column(name)?.clone());
        }
        let mut frame = DataFrame::from_columns(columns)?;
        frame.index = self.index.clone();
        Ok(frame)
    }

    /// Append another frame's columns after this frame's, keeping this
    /// frame's row index
    pub fn merge(&self, other: &DataFrame) -> Result<DataFrame> {
        if other.row_count() != self.row_count() {
            return Err(FrameError::LengthMismatch {
                expected: self.row_count(),
                actual: other.row_count(),
            });
        }
        let mut columns = self.columns.clone();
        columns.extend(other.columns.iter().cloned());
        let mut frame = DataFrame::from_columns(columns)?;
        frame.index = self.index.clone();
        Ok(frame)
    }

    /// Rows where the mask is true, order preserved
    pub fn filter(&self, mask: &Mask) -> Result<DataFrame> {
        if mask.len() != self.row_count() {
            return Err(FrameError::LengthMismatch {
                expected: self.row_count(),
                actual: mask.len(),
            });
        }
        Ok(self.take_rows(&mask.selected_positions()))
    }

    /// New frame holding the physical rows at `positions`, in that order.
    /// All columns move together, so the equal-length invariant holds.
    pub(crate) fn take_rows(&self, positions: &[usize]) -> DataFrame {
        DataFrame {
            columns: self.columns.iter().map(|c| c.take(positions)).collect(),
            index: self.index.take(positions),
        }
    }

    pub fn head(&self, n: usize) -> DataFrame {
        let n = n.min(self.row_count());
        self.take_rows(&(0..n).collect::<Vec<_>>())
    }

    pub fn tail(&self, n: usize) -> DataFrame {
        let rows = self.row_count();
        let start = rows.saturating_sub(n);
        self.take_rows(&(start..rows).collect::<Vec<_>>())
    }

    // ---- label-based addressing ----

    /// Physical positions for one row label, in row order.
    ///
    /// Under the positional index a label is its integer position; under a
    /// label index a label may address several rows.
    pub fn lookup_label(&self, label: &CellValue) -> Result<Vec<usize>> {
        match &self.index {
            RowIndex::Positional => match label {
                CellValue::Int(i) if *i >= 0 && (*i as usize) < self.row_count() => {
                    Ok(vec![*i as usize])
                }
                _ => Err(FrameError::LabelNotFound {
                    label: label.to_string(),
                }),
            },
            RowIndex::Labels { lookup, .. } => {
                lookup
                    .get(label)
                    .cloned()
                    .ok_or_else(|| FrameError::LabelNotFound {
                        label: label.to_string(),
                    })
            }
        }
    }

    /// Label-based selection: rows named by `labels`, restricted to `names`
    /// (all columns when `names` is empty)
    pub fn loc(&self, labels: &[CellValue], names: &[&str]) -> Result<DataFrame> {
        let mut positions = Vec::new();
        for label in labels {
            positions.extend(self.lookup_label(label)?);
        }
        self.take_rows(&positions).select_or_all(names)
    }

    /// Label-based selection with a boolean mask over the rows
    pub fn loc_mask(&self, mask: &Mask, names: &[&str]) -> Result<DataFrame> {
        self.filter(mask)?.select_or_all(names)
    }

    fn select_or_all(self, names: &[&str]) -> Result<DataFrame> {
        if names.is_empty() {
            Ok(self)
        } else {
            self.select(names)
        }
    }

    // ---- position-based addressing ----

    /// Resolve a possibly-negative offset against the row count
    pub(crate) fn resolve_position(&self, index: i64) -> Result<usize> {
        let rows = self.row_count() as i64;
        let resolved = if index < 0 { index + rows } else { index };
        if resolved < 0 || resolved >= rows {
            return Err(FrameError::PositionOutOfBounds {
                index,
                rows: self.row_count(),
            });
        }
        Ok(resolved as usize)
    }

    /// One row by integer offset; negative offsets count from the end
    pub fn iloc_row(&self, index: i64) -> Result<Vec<CellValue>> {
        let pos = self.resolve_position(index)?;
        Ok(self
            .columns
            .iter()
            .map(|c| c.values()[pos].clone())
            .collect())
    }

    /// Rows and columns by integer range, start inclusive and end
    /// exclusive; negative bounds count from the end and ranges clamp to
    /// the frame like slices do.
    pub fn iloc(
        &self,
        rows: std::ops::Range<i64>,
        cols: std::ops::Range<i64>,
    ) -> Result<DataFrame> {
        let row_range = clamp_range(rows, self.row_count());
        let col_range = clamp_range(cols, self.column_count());
        let names: Vec<&str> = self.columns[col_range]
            .iter()
            .map(|c| c.name())
            .collect();
        self.take_rows(&row_range.collect::<Vec<_>>()).select(&names)
    }

    // ---- derived columns ----

    /// Pure assignment: a new name appends a column, an existing name
    /// overwrites its values
    pub fn with_column(&self, name: &str, values: Vec<CellValue>) -> Result<DataFrame> {
        let mut frame = self.clone();
        frame.set_column(name, values)?;
        Ok(frame)
    }

    /// In-place assignment variant of [`with_column`](Self::with_column)
    pub fn set_column(&mut self, name: &str, values: Vec<CellValue>) -> Result<()> {
        if !self.columns.is_empty() && values.len() != self.row_count() {
            return Err(FrameError::LengthMismatch {
                expected: self.row_count(),
                actual: values.len(),
            });
        }
        match self.column_position(name) {
            Some(pos) => self.columns[pos] = Column::new(name, values),
            None => self.columns.push(Column::new(name, values)),
        }
        Ok(())
    }

    /// Pure rename via a `old name -> new name` mapping; names not in the
    /// mapping pass through, entries for absent columns are ignored
    pub fn rename(&self, mapping: &[(&str, &str)]) -> Result<DataFrame> {
        let mut frame = self.clone();
        frame.rename_in_place(mapping)?;
        Ok(frame)
    }

    /// In-place rename variant of [`rename`](Self::rename)
    pub fn rename_in_place(&mut self, mapping: &[(&str, &str)]) -> Result<()> {
        let renamed: Vec<String> = self
            .columns
            .iter()
            .map(|col| {
                mapping
                    .iter()
                    .find(|(old, _)| *old == col.name())
                    .map(|(_, new)| new.to_string())
                    .unwrap_or_else(|| col.name().to_string())
            })
            .collect();

        let mut seen: IndexSet<&str> = IndexSet::new();
        for name in &renamed {
            if !seen.insert(name) {
                return Err(FrameError::DuplicateColumn { name: name.clone() });
            }
        }

        for (col, name) in self.columns.iter_mut().zip(renamed) {
            col.set_name(name);
        }
        Ok(())
    }

    // ---- row index ----

    /// Promote a column to serve as the row index; its values become the
    /// row labels and the column leaves the table
    pub fn set_index(&self, name: &str) -> Result<DataFrame> {
        let pos = self
            .column_position(name)
            .ok_or_else(|| FrameError::ColumnNotFound {
                name: name.to_string(),
            })?;
        let mut columns = self.columns.clone();
        let label_col = columns.remove(pos);
        Ok(DataFrame {
            columns,
            index: RowIndex::from_labels(name.to_string(), label_col.values().to_vec()),
        })
    }

    /// Demote the label index back to a leading column and restore the
    /// positional index
    pub fn reset_index(&self) -> Result<DataFrame> {
        match &self.index {
            RowIndex::Positional => Ok(self.clone()),
            RowIndex::Labels { name, labels, .. } => {
                if self.column_position(name).is_some() {
                    return Err(FrameError::DuplicateColumn { name: name.clone() });
                }
                let mut columns = vec![Column::new(name.clone(), labels.clone())];
                columns.extend(self.columns.iter().cloned());
                Ok(DataFrame {
                    columns,
                    index: RowIndex::Positional,
                })
            }
        }
    }
}

fn clamp_range(range: std::ops::Range<i64>, len: usize) -> std::ops::Range<usize> {
    let resolve = |bound: i64| -> usize {
        let b = if bound < 0 { bound + len as i64 } else { bound };
        b.clamp(0, len as i64) as usize
    };
    let start = resolve(range.start);
    let end = resolve(range.end);
    start..end.max(start)
}
