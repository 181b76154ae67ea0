//! Row-selection masks

use crate::error::{FrameError, Result};

/// A boolean sequence aligned 1:1 with table rows.
///
/// Masks are derived on demand from element-wise comparisons and never
/// persisted; combining two masks is element-wise, not short-circuit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask(Vec<bool>);

impl Mask {
    pub fn new(bits: Vec<bool>) -> Self {
        Mask(bits)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    /// Number of selected rows
    pub fn count_true(&self) -> usize {
        self.0.iter().filter(|&&b| b).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    /// Positions of the selected rows, in row order
    pub fn selected_positions(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| if b { Some(i) } else { None })
            .collect()
    }

    /// Element-wise logical AND
    pub fn and(&self, other: &Mask) -> Result<Mask> {
        self.check_len(other)?;
        Ok(Mask(
            self.0.iter().zip(&other.0).map(|(&a, &b)| a && b).collect(),
        ))
    }

    /// Element-wise logical OR
    pub fn or(&self, other: &Mask) -> Result<Mask> {
        self.check_len(other)?;
        Ok(Mask(
            self.0.iter().zip(&other.0).map(|(&a, &b)| a || b).collect(),
        ))
    }

    /// Element-wise logical NOT
    pub fn not(&self) -> Mask {
        Mask(self.0.iter().map(|&b| !b).collect())
    }

    fn check_len(&self, other: &Mask) -> Result<()> {
        if self.0.len() != other.0.len() {
            return Err(FrameError::LengthMismatch {
                expected: self.0.len(),
                actual: other.0.len(),
            });
        }
        Ok(())
    }
}

impl From<Vec<bool>> for Mask {
    fn from(bits: Vec<bool>) -> Self {
        Mask(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine() {
        let a = Mask::new(vec![true, true, false, false]);
        let b = Mask::new(vec![true, false, true, false]);
        assert_eq!(
            a.and(&b).unwrap(),
            Mask::new(vec![true, false, false, false])
        );
        assert_eq!(a.or(&b).unwrap(), Mask::new(vec![true, true, true, false]));
        assert_eq!(a.not(), Mask::new(vec![false, false, true, true]));
    }

    #[test]
    fn test_combine_length_mismatch() {
        let a = Mask::new(vec![true]);
        let b = Mask::new(vec![true, false]);
        assert!(a.and(&b).is_err());
    }

    #[test]
    fn test_selected_positions() {
        let m = Mask::new(vec![false, true, true, false, true]);
        assert_eq!(m.selected_positions(), vec![1, 2, 4]);
        assert_eq!(m.count_true(), 3);
    }
}
