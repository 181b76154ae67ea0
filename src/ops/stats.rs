//! Describe-style summary statistics

use crate::error::Result;
use crate::model::Column;

/// Summary statistics over one numeric column, missing markers excluded.
///
/// Quartiles use linear interpolation between closest ranks.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Summarize a numeric column; `None` when it holds no present values
pub fn describe(column: &Column) -> Result<Option<Summary>> {
    let values = column.numeric_values()?;
    if values.is_empty() {
        return Ok(None);
    }

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    // sample standard deviation, matching the usual describe output
    let std = if count > 1 {
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
        var.sqrt()
    } else {
        f64::NAN
    };

    let mut sorted = values;
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Ok(Some(Summary {
        count,
        mean,
        std,
        min: sorted[0],
        q25: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q75: quantile(&sorted, 0.75),
        max: sorted[count - 1],
    }))
}

/// Linear-interpolated quantile over a sorted, non-empty slice
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let rank = q * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (rank - lo as f64) * (sorted[hi] - sorted[lo])
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "count  {}", self.count)?;
        writeln!(f, "mean   {}", self.mean)?;
        writeln!(f, "std    {}", self.std)?;
        writeln!(f, "min    {}", self.min)?;
        writeln!(f, "25%    {}", self.q25)?;
        writeln!(f, "50%    {}", self.median)?;
        writeln!(f, "75%    {}", self.q75)?;
        write!(f, "max    {}", self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    #[test]
    fn test_describe_family_ages() {
        let col = Column::from_values("Age", vec![12i64, 5, 49, 47]);
        let summary = describe(&col).unwrap().unwrap();
        assert_eq!(summary.count, 4);
        assert_eq!(summary.mean, 28.25);
        assert_eq!(summary.min, 5.0);
        assert_eq!(summary.max, 49.0);
        assert_eq!(summary.median, 29.5);
        assert_eq!(summary.q25, 10.25);
        assert_eq!(summary.q75, 47.5);
    }

    #[test]
    fn test_describe_skips_missing() {
        let col = Column::new(
            "x",
            vec![CellValue::Int(1), CellValue::Null, CellValue::Int(3)],
        );
        let summary = describe(&col).unwrap().unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.mean, 2.0);
    }

    #[test]
    fn test_describe_all_missing() {
        let col = Column::new("x", vec![CellValue::Null, CellValue::Null]);
        assert_eq!(describe(&col).unwrap(), None);
    }

    #[test]
    fn test_describe_non_numeric() {
        let col = Column::from_values("s", vec!["a", "b"]);
        assert!(describe(&col).is_err());
    }
}
