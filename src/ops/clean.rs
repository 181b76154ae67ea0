//! Null handling and cleaning passes

use rustc_hash::FxHashSet;

use crate::error::{FrameError, Result};
use crate::model::{CellValue, Column, DataFrame, Mask};

/// What to do with rows whose value exceeds a bound.
///
/// The two policies are mutually exclusive for one bound: after a clamp
/// pass nothing is left above the threshold, so a following drop pass on
/// the same bound removes nothing. Apply one or the other, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundPolicy {
    /// Overwrite the offending value with the threshold
    Clamp,
    /// Remove the offending row
    DropRows,
}

impl DataFrame {
    /// Drop rows holding the missing marker in any of the targeted
    /// columns (all columns when `subset` is `None`). Survivor order is
    /// preserved.
    pub fn dropna(&self, subset: Option<&[&str]>) -> Result<DataFrame> {
        let mask = self.complete_rows_mask(subset)?;
        self.filter(&mask)
    }

    /// In-place variant of [`dropna`](Self::dropna)
    pub fn dropna_in_place(&mut self, subset: Option<&[&str]>) -> Result<()> {
        *self = self.dropna(subset)?;
        Ok(())
    }

    /// Mask of rows with no missing marker in the targeted columns
    fn complete_rows_mask(&self, subset: Option<&[&str]>) -> Result<Mask> {
        let targets: Vec<&Column> = match subset {
            Some(names) => names
                .iter()
                .map(|&name| self.column(name))
                .collect::<Result<_>>()?,
            None => self.columns().iter().collect(),
        };
        let mut mask = Mask::new(vec![true; self.row_count()]);
        for column in targets {
            mask = mask.and(&column.not_null_mask())?;
        }
        Ok(mask)
    }

    /// Replace missing markers with `value` in one column, or in every
    /// column when `name` is `None`
    pub fn fillna(&self, name: Option<&str>, value: CellValue) -> Result<DataFrame> {
        let mut frame = self.clone();
        frame.fillna_in_place(name, value)?;
        Ok(frame)
    }

    /// In-place variant of [`fillna`](Self::fillna)
    pub fn fillna_in_place(&mut self, name: Option<&str>, value: CellValue) -> Result<()> {
        let targets: Vec<usize> = match name {
            Some(name) => vec![self.column_position(name).ok_or_else(|| {
                FrameError::ColumnNotFound {
                    name: name.to_string(),
                }
            })?],
            None => (0..self.column_count()).collect(),
        };
        for pos in targets {
            let column = &mut self.columns_mut()[pos];
            for row in 0..column.len() {
                if column.values()[row].is_null() {
                    column.set(row, value.clone());
                }
            }
        }
        Ok(())
    }

    /// Replace missing markers in a numeric column with the mean of its
    /// present values. The mean is computed once, before any fill.
    pub fn fillna_mean(&self, name: &str) -> Result<DataFrame> {
        let mut frame = self.clone();
        frame.fillna_mean_in_place(name)?;
        Ok(frame)
    }

    /// In-place variant of [`fillna_mean`](Self::fillna_mean)
    pub fn fillna_mean_in_place(&mut self, name: &str) -> Result<()> {
        let fill = match self.column(name)?.mean()? {
            Some(mean) => CellValue::Float(mean),
            // nothing present to average over, leave markers alone
            None => return Ok(()),
        };
        self.fillna_in_place(Some(name), fill)
    }

    /// Bound a numeric column from above: rows whose value exceeds
    /// `threshold` are clamped to it or dropped, per `policy`
    pub fn bound_above(
        &self,
        name: &str,
        threshold: f64,
        policy: BoundPolicy,
    ) -> Result<DataFrame> {
        let column = self.column(name)?;
        match policy {
            BoundPolicy::Clamp => {
                let clamped = column.map(name, |v| match v.as_f64() {
                    Some(x) if x > threshold => CellValue::Float(threshold),
                    _ => v.clone(),
                });
                let mut frame = self.clone();
                let pos = frame.column_position(name).expect("column exists");
                frame.columns_mut()[pos] = clamped;
                Ok(frame)
            }
            BoundPolicy::DropRows => {
                let over = column.gt(threshold)?;
                self.filter(&over.not())
            }
        }
    }

    /// Mask marking every row that exactly repeats an earlier row
    /// (missing marker equals missing marker)
    pub fn duplicated(&self) -> Mask {
        let mut seen: FxHashSet<Vec<CellValue>> = FxHashSet::default();
        let mut bits = Vec::with_capacity(self.row_count());
        for row in 0..self.row_count() {
            let cells: Vec<CellValue> = self
                .columns()
                .iter()
                .map(|c| c.values()[row].clone())
                .collect();
            bits.push(!seen.insert(cells));
        }
        Mask::new(bits)
    }

    /// Remove all but the first occurrence of each duplicate row
    pub fn drop_duplicates(&self) -> DataFrame {
        let keep = self.duplicated().not();
        self.filter(&keep).expect("mask is row-aligned")
    }

    /// Coerce a text column to a temporal one. Cells that fail to parse
    /// become the missing marker rather than raising, so a dropna pass
    /// can purge them afterwards.
    pub fn to_datetime(&self, name: &str) -> Result<DataFrame> {
        let mut frame = self.clone();
        frame.to_datetime_in_place(name)?;
        Ok(frame)
    }

    /// In-place variant of [`to_datetime`](Self::to_datetime)
    pub fn to_datetime_in_place(&mut self, name: &str) -> Result<()> {
        let pos = self
            .column_position(name)
            .ok_or_else(|| FrameError::ColumnNotFound {
                name: name.to_string(),
            })?;
        let coerced = self.columns()[pos].map(name, |v| match v {
            CellValue::Str(s) => CellValue::parse_temporal(s).unwrap_or(CellValue::Null),
            CellValue::Date(_) | CellValue::DateTime(_) => v.clone(),
            _ => CellValue::Null,
        });
        self.columns_mut()[pos] = coerced;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn with_gaps() -> DataFrame {
        DataFrame::new(vec![
            (
                "a",
                vec![1i64.into(), CellValue::Null, 3i64.into(), 4i64.into()],
            ),
            (
                "b",
                vec!["w".into(), "x".into(), CellValue::Null, "z".into()],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_dropna_all_columns() {
        let frame = with_gaps();
        let clean = frame.dropna(None).unwrap();
        assert_eq!(clean.row_count(), 2);
        assert_eq!(
            clean.column("a").unwrap().values(),
            &[CellValue::Int(1), CellValue::Int(4)]
        );
    }

    #[test]
    fn test_dropna_subset_and_order_invariance() {
        let frame = with_gaps();
        let via_a_then_b = frame
            .dropna(Some(&["a"]))
            .unwrap()
            .dropna(Some(&["b"]))
            .unwrap();
        let via_b_then_a = frame
            .dropna(Some(&["b"]))
            .unwrap()
            .dropna(Some(&["a"]))
            .unwrap();
        assert_eq!(via_a_then_b, via_b_then_a);
        assert!(frame.dropna(Some(&["a"])).unwrap().row_count() <= frame.row_count());
    }

    #[test]
    fn test_dropna_in_place() {
        let mut frame = with_gaps();
        frame.dropna_in_place(None).unwrap();
        assert_eq!(frame.row_count(), 2);
    }

    #[test]
    fn test_fillna_scalar() {
        let frame = with_gaps();
        let filled = frame.fillna(Some("a"), CellValue::Int(0)).unwrap();
        assert_eq!(filled.column("a").unwrap().count_non_null(), 4);
        // other column untouched
        assert_eq!(filled.column("b").unwrap().count_non_null(), 3);

        let all = frame.fillna(None, CellValue::from("?")).unwrap();
        assert_eq!(all.column("b").unwrap().count_non_null(), 4);
    }

    #[test]
    fn test_fillna_mean_fills_exactly_the_missing_cells() {
        let frame = DataFrame::new(vec![(
            "x",
            vec![
                100i64.into(),
                CellValue::Null,
                CellValue::Null,
                CellValue::Null,
                5i64.into(),
                6i64.into(),
                6i64.into(),
                6i64.into(),
                2i64.into(),
                77i64.into(),
            ],
        )])
        .unwrap();
        let filled = frame.fillna_mean("x").unwrap();
        let col = filled.column("x").unwrap();
        assert_eq!(col.len(), 10);
        assert_eq!(col.count_non_null(), 10);
        let expected = 28.857142857142858;
        for pos in [1, 2, 3] {
            assert_eq!(col.values()[pos], CellValue::Float(expected));
        }
        // present cells untouched
        assert_eq!(col.values()[0], CellValue::Int(100));
    }

    #[test]
    fn test_bound_clamp_vs_drop() {
        let frame = DataFrame::new(vec![(
            "fare",
            vec![10i64.into(), 300i64.into(), 25i64.into()],
        )])
        .unwrap();

        let clamped = frame.bound_above("fare", 100.0, BoundPolicy::Clamp).unwrap();
        assert_eq!(clamped.row_count(), 3);
        assert_eq!(
            clamped.column("fare").unwrap().values()[1],
            CellValue::Float(100.0)
        );

        let dropped = frame
            .bound_above("fare", 100.0, BoundPolicy::DropRows)
            .unwrap();
        assert_eq!(dropped.row_count(), 2);

        // clamp-then-drop is the documented user error: the drop pass
        // finds nothing above the bound
        let both = clamped
            .bound_above("fare", 100.0, BoundPolicy::DropRows)
            .unwrap();
        assert_eq!(both.row_count(), 3);
    }

    #[test]
    fn test_duplicated_marks_all_but_first() {
        let frame = DataFrame::new(vec![
            ("a", vec![6i64.into(), 6i64.into()]),
            ("b", vec![1i64.into(), 1i64.into()]),
        ])
        .unwrap();
        let mask = frame.duplicated();
        assert!(!mask.get(0));
        assert!(mask.get(1));
    }

    #[test]
    fn test_duplicated_null_equals_null() {
        let frame = DataFrame::new(vec![(
            "a",
            vec![CellValue::Null, CellValue::Null, 1i64.into()],
        )])
        .unwrap();
        assert_eq!(frame.duplicated().selected_positions(), vec![1]);
    }

    #[test]
    fn test_drop_duplicates_idempotent() {
        let frame = DataFrame::new(vec![
            (
                "a",
                vec![1i64.into(), 1i64.into(), 2i64.into(), 1i64.into()],
            ),
            (
                "b",
                vec!["x".into(), "x".into(), "y".into(), "z".into()],
            ),
        ])
        .unwrap();
        let once = frame.drop_duplicates();
        assert_eq!(once.row_count(), 3);
        let twice = once.drop_duplicates();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_to_datetime_failures_become_missing() {
        let frame = DataFrame::new(vec![(
            "when",
            vec!["2023-05-01".into(), "not a date".into(), CellValue::Null],
        )])
        .unwrap();
        let coerced = frame.to_datetime("when").unwrap();
        let col = coerced.column("when").unwrap();
        assert_eq!(
            col.values()[0],
            CellValue::Date(NaiveDate::from_ymd_opt(2023, 5, 1).unwrap())
        );
        assert!(col.values()[1].is_null());
        assert!(col.values()[2].is_null());

        // the usual follow-up: purge the unparsable rows
        let purged = coerced.dropna(Some(&["when"])).unwrap();
        assert_eq!(purged.row_count(), 1);
    }
}
