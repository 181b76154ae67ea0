//! Named, homogeneously typed value sequences

use std::cmp::Ordering;

use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashSet};

use crate::error::{FrameError, Result};
use crate::model::mask::Mask;
use crate::model::value::{CellType, CellValue};

/// Element-wise arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    fn name(self) -> &'static str {
        match self {
            ArithOp::Add => "add",
            ArithOp::Sub => "subtract",
            ArithOp::Mul => "multiply",
            ArithOp::Div => "divide",
        }
    }

    fn apply_f64(self, a: f64, b: f64) -> f64 {
        match self {
            ArithOp::Add => a + b,
            ArithOp::Sub => a - b,
            ArithOp::Mul => a * b,
            ArithOp::Div => a / b,
        }
    }

    fn checked_apply_i64(self, a: i64, b: i64) -> Option<i64> {
        match self {
            ArithOp::Add => a.checked_add(b),
            ArithOp::Sub => a.checked_sub(b),
            ArithOp::Mul => a.checked_mul(b),
            ArithOp::Div => unreachable!("integer division widens to float"),
        }
    }
}

/// One named, row-count-aligned value sequence within a table.
///
/// The declared kind is the widening of all value kinds present; `Null`
/// cells do not narrow it.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    kind: CellType,
    values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        let kind = values
            .iter()
            .fold(CellType::Null, |acc, v| acc.widen(v.kind()));
        Self {
            name: name.into(),
            kind,
            values,
        }
    }

    /// Build a column from any value type convertible to [`CellValue`]
    pub fn from_values<T: Into<CellValue>>(name: impl Into<String>, values: Vec<T>) -> Self {
        Self::new(name, values.into_iter().map(Into::into).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CellType {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[CellValue] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.values.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CellValue> + '_ {
        self.values.iter()
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(crate) fn push(&mut self, value: CellValue) {
        self.kind = self.kind.widen(value.kind());
        self.values.push(value);
    }

    /// Replace the cell at `index`, re-widening the declared kind
    pub(crate) fn set(&mut self, index: usize, value: CellValue) {
        self.kind = self.kind.widen(value.kind());
        self.values[index] = value;
    }

    /// New column with the same name holding the rows at `positions`
    pub(crate) fn take(&self, positions: &[usize]) -> Column {
        Column::new(
            self.name.clone(),
            positions.iter().map(|&i| self.values[i].clone()).collect(),
        )
    }

    pub fn head(&self, n: usize) -> Column {
        Column::new(self.name.clone(), self.values.iter().take(n).cloned().collect())
    }

    // ---- mask construction ----

    /// Element-wise `==` against a scalar
    pub fn eq_value(&self, value: impl Into<CellValue>) -> Result<Mask> {
        let value = value.into();
        self.check_comparable(&value)?;
        Ok(Mask::new(
            self.values.iter().map(|v| !v.is_null() && *v == value).collect(),
        ))
    }

    /// Element-wise `!=` against a scalar; `Null` cells yield `false`
    pub fn ne_value(&self, value: impl Into<CellValue>) -> Result<Mask> {
        let value = value.into();
        self.check_comparable(&value)?;
        Ok(Mask::new(
            self.values.iter().map(|v| !v.is_null() && *v != value).collect(),
        ))
    }

    /// Element-wise `<` against a scalar
    pub fn lt(&self, value: impl Into<CellValue>) -> Result<Mask> {
        self.cmp_mask(value.into(), &[Ordering::Less])
    }

    /// Element-wise `<=` against a scalar
    pub fn le(&self, value: impl Into<CellValue>) -> Result<Mask> {
        self.cmp_mask(value.into(), &[Ordering::Less, Ordering::Equal])
    }

    /// Element-wise `>` against a scalar
    pub fn gt(&self, value: impl Into<CellValue>) -> Result<Mask> {
        self.cmp_mask(value.into(), &[Ordering::Greater])
    }

    /// Element-wise `>=` against a scalar
    pub fn ge(&self, value: impl Into<CellValue>) -> Result<Mask> {
        self.cmp_mask(value.into(), &[Ordering::Greater, Ordering::Equal])
    }

    fn cmp_mask(&self, value: CellValue, accept: &[Ordering]) -> Result<Mask> {
        self.check_comparable(&value)?;
        Ok(Mask::new(
            self.values
                .iter()
                .map(|v| {
                    v.partial_cmp_value(&value)
                        .map(|ord| accept.contains(&ord))
                        .unwrap_or(false)
                })
                .collect(),
        ))
    }

    fn check_comparable(&self, value: &CellValue) -> Result<()> {
        let vk = value.kind();
        let ck = self.kind;
        let comparable = vk == CellType::Null
            || ck == CellType::Null
            || ck == CellType::Mixed
            || ck == vk
            || (ck.is_numeric() && vk.is_numeric())
            || matches!(
                (ck, vk),
                (CellType::Date, CellType::DateTime) | (CellType::DateTime, CellType::Date)
            );
        if !comparable {
            return Err(FrameError::TypeMismatch {
                operation: "compare",
                kind: ck,
                name: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Per-element membership test against a fixed set of values
    pub fn isin(&self, values: &[CellValue]) -> Mask {
        let set: FxHashSet<&CellValue> = values.iter().collect();
        Mask::new(
            self.values
                .iter()
                .map(|v| !v.is_null() && set.contains(v))
                .collect(),
        )
    }

    /// Mask of cells holding the missing marker
    pub fn is_null_mask(&self) -> Mask {
        Mask::new(self.values.iter().map(|v| v.is_null()).collect())
    }

    /// Mask of cells holding a present value
    pub fn not_null_mask(&self) -> Mask {
        self.is_null_mask().not()
    }

    // ---- element-wise arithmetic ----

    /// Element-wise arithmetic with another column; the result keeps this
    /// column's name. `Null` on either side propagates.
    pub fn arith(&self, op: ArithOp, other: &Column) -> Result<Column> {
        self.check_numeric(op.name())?;
        other.check_numeric(op.name())?;
        if self.len() != other.len() {
            return Err(FrameError::LengthMismatch {
                expected: self.len(),
                actual: other.len(),
            });
        }
        let int_result =
            self.kind == CellType::Int && other.kind == CellType::Int && op != ArithOp::Div;
        let values = self
            .values
            .iter()
            .zip(&other.values)
            .map(|(a, b)| arith_cell(op, a, b, int_result))
            .collect();
        Ok(Column::new(self.name.clone(), values))
    }

    /// Element-wise arithmetic against a scalar
    pub fn arith_scalar(&self, op: ArithOp, value: impl Into<CellValue>) -> Result<Column> {
        let value = value.into();
        self.check_numeric(op.name())?;
        if !value.kind().is_numeric() {
            return Err(FrameError::TypeMismatch {
                operation: op.name(),
                kind: value.kind(),
                name: self.name.clone(),
            });
        }
        let int_result =
            self.kind == CellType::Int && value.kind() == CellType::Int && op != ArithOp::Div;
        let values = self
            .values
            .iter()
            .map(|a| arith_cell(op, a, &value, int_result))
            .collect();
        Ok(Column::new(self.name.clone(), values))
    }

    fn check_numeric(&self, operation: &'static str) -> Result<()> {
        if !self.kind.is_numeric() {
            return Err(FrameError::TypeMismatch {
                operation,
                kind: self.kind,
                name: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Apply a typed function pointwise, producing a new column
    pub fn map<F>(&self, name: impl Into<String>, f: F) -> Column
    where
        F: Fn(&CellValue) -> CellValue,
    {
        Column::new(name, self.values.iter().map(f).collect())
    }

    // ---- scalar aggregates (missing markers excluded) ----

    /// Total number of cells, missing markers included
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Number of cells holding a present value
    pub fn count_non_null(&self) -> usize {
        self.values.iter().filter(|v| !v.is_null()).count()
    }

    /// Non-null values as `f64`, in row order
    pub(crate) fn numeric_values(&self) -> Result<Vec<f64>> {
        self.check_numeric("aggregate")?;
        Ok(self.values.iter().filter_map(|v| v.as_f64()).collect())
    }

    /// Sum over non-null values; integer columns sum to an integer
    pub fn sum(&self) -> Result<CellValue> {
        self.check_numeric("sum")?;
        if self.kind == CellType::Int {
            Ok(CellValue::Int(
                self.values
                    .iter()
                    .filter_map(|v| match v {
                        CellValue::Int(i) => Some(*i),
                        _ => None,
                    })
                    .sum(),
            ))
        } else {
            Ok(CellValue::Float(
                self.values.iter().filter_map(|v| v.as_f64()).sum(),
            ))
        }
    }

    /// Mean over non-null values; `None` when every cell is missing
    pub fn mean(&self) -> Result<Option<f64>> {
        let values = self.numeric_values()?;
        if values.is_empty() {
            return Ok(None);
        }
        Ok(Some(values.iter().sum::<f64>() / values.len() as f64))
    }

    /// Smallest non-null value
    pub fn min(&self) -> Option<&CellValue> {
        self.extreme(Ordering::Less)
    }

    /// Largest non-null value
    pub fn max(&self) -> Option<&CellValue> {
        self.extreme(Ordering::Greater)
    }

    fn extreme(&self, keep: Ordering) -> Option<&CellValue> {
        self.values
            .iter()
            .filter(|v| !v.is_null())
            .reduce(|best, v| match v.partial_cmp_value(best) {
                Some(ord) if ord == keep => v,
                _ => best,
            })
    }

    /// Occurrence count per distinct present value, ordered by descending
    /// count, ties broken by first appearance. Missing markers are
    /// excluded; use [`count_non_null`](Self::count_non_null) against
    /// [`count`](Self::count) to measure them.
    pub fn value_counts(&self) -> Vec<(CellValue, usize)> {
        let mut counts: IndexMap<CellValue, usize, FxBuildHasher> = IndexMap::default();
        for v in self.values.iter().filter(|v| !v.is_null()) {
            *counts.entry(v.clone()).or_insert(0) += 1;
        }
        let mut pairs: Vec<(CellValue, usize)> = counts.into_iter().collect();
        // sort is stable, so equal counts keep first-appearance order
        pairs.sort_by(|a, b| b.1.cmp(&a.1));
        pairs
    }
}

fn arith_cell(op: ArithOp, a: &CellValue, b: &CellValue, int_result: bool) -> CellValue {
    if int_result {
        // a cell that overflows i64 widens to Float instead of panicking
        if let (CellValue::Int(x), CellValue::Int(y)) = (a, b) {
            return match op.checked_apply_i64(*x, *y) {
                Some(i) => CellValue::Int(i),
                None => CellValue::Float(op.apply_f64(*x as f64, *y as f64)),
            };
        }
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => CellValue::Float(op.apply_f64(x, y)),
        _ => CellValue::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ages() -> Column {
        Column::from_values("Age", vec![22i64, 35, 58, 5, 12, 47, 49])
    }

    #[test]
    fn test_ge_mask_selects_expected_rows() {
        let mask = ages().ge(35i64).unwrap();
        assert_eq!(mask.selected_positions(), vec![1, 2, 5, 6]);
    }

    #[test]
    fn test_null_cells_never_match() {
        let col = Column::new(
            "x",
            vec![CellValue::Int(1), CellValue::Null, CellValue::Int(3)],
        );
        assert_eq!(col.gt(0i64).unwrap().selected_positions(), vec![0, 2]);
        assert_eq!(col.ne_value(1i64).unwrap().selected_positions(), vec![2]);
    }

    #[test]
    fn test_isin() {
        let col = Column::from_values("Class", vec![1i64, 1, 2, 2, 2, 2, 3]);
        let mask = col.isin(&[CellValue::Int(1), CellValue::Int(3)]);
        assert_eq!(mask.selected_positions(), vec![0, 1, 6]);
    }

    #[test]
    fn test_compare_type_mismatch() {
        assert!(matches!(
            ages().gt("young"),
            Err(FrameError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_arith_scalar_int_preserved() {
        let col = Column::from_values("Class", vec![1i64, 2, 3]);
        let cost = col.arith_scalar(ArithOp::Mul, 1000i64).unwrap();
        assert_eq!(cost.kind(), CellType::Int);
        assert_eq!(
            cost.values(),
            &[CellValue::Int(1000), CellValue::Int(2000), CellValue::Int(3000)]
        );
    }

    #[test]
    fn test_arith_div_widens_to_float() {
        let a = Column::from_values("a", vec![10i64, 20]);
        let b = Column::from_values("b", vec![2i64, 5]);
        let q = a.arith(ArithOp::Div, &b).unwrap();
        assert_eq!(q.kind(), CellType::Float);
        assert_eq!(q.values(), &[CellValue::Float(5.0), CellValue::Float(4.0)]);
    }

    #[test]
    fn test_arith_overflow_widens_to_float() {
        let col = Column::from_values("big", vec![i64::MAX, 1]);
        let bumped = col.arith_scalar(ArithOp::Add, 1i64).unwrap();
        assert_eq!(
            bumped.values(),
            &[
                CellValue::Float(i64::MAX as f64 + 1.0),
                CellValue::Int(2)
            ]
        );
        assert_eq!(bumped.kind(), CellType::Float);

        let product = col.arith(ArithOp::Mul, &col).unwrap();
        assert_eq!(
            product.values()[0],
            CellValue::Float((i64::MAX as f64) * (i64::MAX as f64))
        );
    }

    #[test]
    fn test_arith_null_propagates() {
        let a = Column::new("a", vec![CellValue::Int(1), CellValue::Null]);
        let sum = a.arith_scalar(ArithOp::Add, 1i64).unwrap();
        assert_eq!(sum.values(), &[CellValue::Int(2), CellValue::Null]);
    }

    #[test]
    fn test_mean_excludes_nulls() {
        let col = Column::new(
            "x",
            vec![
                CellValue::Int(100),
                CellValue::Null,
                CellValue::Null,
                CellValue::Null,
                CellValue::Int(5),
                CellValue::Int(6),
                CellValue::Int(6),
                CellValue::Int(6),
                CellValue::Int(2),
                CellValue::Int(77),
            ],
        );
        let mean = col.mean().unwrap().unwrap();
        assert!((mean - 28.857142857142858).abs() < 1e-12);
        assert_eq!(col.count_non_null(), 7);
        assert_eq!(col.count(), 10);
    }

    #[test]
    fn test_min_max() {
        let col = ages();
        assert_eq!(col.min(), Some(&CellValue::Int(5)));
        assert_eq!(col.max(), Some(&CellValue::Int(58)));
    }

    #[test]
    fn test_value_counts_order() {
        let col = Column::from_values("Class", vec![1i64, 1, 2, 2, 2, 2, 3]);
        let counts = col.value_counts();
        assert_eq!(
            counts,
            vec![
                (CellValue::Int(2), 4),
                (CellValue::Int(1), 2),
                (CellValue::Int(3), 1),
            ]
        );
    }

    #[test]
    fn test_value_counts_excludes_missing() {
        let col = Column::new(
            "Class",
            vec![
                CellValue::Int(1),
                CellValue::Null,
                CellValue::Int(1),
                CellValue::Null,
                CellValue::Null,
            ],
        );
        assert_eq!(col.value_counts(), vec![(CellValue::Int(1), 2)]);
    }

    #[test]
    fn test_map() {
        let col = Column::from_values("Name", vec!["ann", "bo"]);
        let lens = col.map("Name_Len", |v| match v {
            CellValue::Str(s) => CellValue::Int(s.len() as i64),
            _ => CellValue::Null,
        });
        assert_eq!(lens.values(), &[CellValue::Int(3), CellValue::Int(2)]);
        assert_eq!(lens.kind(), CellType::Int);
    }
}
