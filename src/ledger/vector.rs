/*!
 * Resource Vector
 * Fixed-length elementwise arithmetic over resource kinds
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{AddAssign, Index, SubAssign};

/// Ordered, fixed-length sequence of non-negative resource amounts.
///
/// One slot per resource kind. Every vector in a ledger shares the same
/// length, fixed when the ledger is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceVector(Vec<u64>);

impl ResourceVector {
    pub fn new(amounts: Vec<u64>) -> Self {
        Self(amounts)
    }

    /// All-zero vector of the given length
    pub fn zeros(len: usize) -> Self {
        Self(vec![0; len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    /// True when every slot is zero
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&v| v == 0)
    }

    /// Index of the first slot where `self[i] > bound[i]`, if any
    pub fn first_excess(&self, bound: &ResourceVector) -> Option<usize> {
        debug_assert_eq!(self.0.len(), bound.0.len());
        self.0.iter().zip(bound.0.iter()).position(|(a, b)| a > b)
    }

    /// Elementwise `self[i] <= bound[i]` for all slots
    pub fn fits_within(&self, bound: &ResourceVector) -> bool {
        self.first_excess(bound).is_none()
    }
}

impl AddAssign<&ResourceVector> for ResourceVector {
    fn add_assign(&mut self, rhs: &ResourceVector) {
        debug_assert_eq!(self.0.len(), rhs.0.len());
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a += b;
        }
    }
}

impl SubAssign<&ResourceVector> for ResourceVector {
    fn sub_assign(&mut self, rhs: &ResourceVector) {
        debug_assert_eq!(self.0.len(), rhs.0.len());
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            debug_assert!(*a >= *b, "vector subtraction must not underflow");
            *a -= b;
        }
    }
}

impl Index<usize> for ResourceVector {
    type Output = u64;

    fn index(&self, index: usize) -> &u64 {
        &self.0[index]
    }
}

impl From<Vec<u64>> for ResourceVector {
    fn from(amounts: Vec<u64>) -> Self {
        Self(amounts)
    }
}

impl<const N: usize> From<[u64; N]> for ResourceVector {
    fn from(amounts: [u64; N]) -> Self {
        Self(amounts.to_vec())
    }
}

impl FromIterator<u64> for ResourceVector {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for ResourceVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elementwise_add_sub() {
        let mut v = ResourceVector::from([10, 5, 7]);
        v -= &ResourceVector::from([3, 1, 2]);
        assert_eq!(v, ResourceVector::from([7, 4, 5]));

        v += &ResourceVector::from([3, 1, 2]);
        assert_eq!(v, ResourceVector::from([10, 5, 7]));
    }

    #[test]
    fn test_first_excess() {
        let bound = ResourceVector::from([10, 5, 7]);
        assert_eq!(ResourceVector::from([10, 5, 7]).first_excess(&bound), None);
        assert_eq!(ResourceVector::from([0, 6, 0]).first_excess(&bound), Some(1));
        assert_eq!(ResourceVector::from([11, 6, 0]).first_excess(&bound), Some(0));
    }

    #[test]
    fn test_fits_within_is_elementwise() {
        // Smaller total but one slot over must not fit
        let bound = ResourceVector::from([10, 5, 7]);
        assert!(!ResourceVector::from([0, 0, 8]).fits_within(&bound));
        assert!(ResourceVector::zeros(3).fits_within(&bound));
    }

    #[test]
    fn test_is_zero() {
        assert!(ResourceVector::zeros(4).is_zero());
        assert!(!ResourceVector::from([0, 1]).is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(ResourceVector::from([10, 5, 7]).to_string(), "[10, 5, 7]");
        assert_eq!(ResourceVector::zeros(0).to_string(), "[]");
    }
}
