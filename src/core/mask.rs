use std::fmt;
use std::sync::Arc;

use crate::core::error::{Error, Result};

/// Row-aligned boolean vector, packed eight rows per byte.
///
/// A mask has the same length and row order as the table it was produced
/// from. Bits past `len` in the last byte are always zero.
#[derive(Clone, PartialEq, Eq)]
pub struct BooleanMask {
    pub(crate) data: Arc<[u8]>,
    pub(crate) len: usize,
}

impl BooleanMask {
    /// Creates a mask from a slice of booleans
    pub fn new(bools: &[bool]) -> Self {
        let mut data = vec![0u8; bytes_for(bools.len())];
        for (i, &is_set) in bools.iter().enumerate() {
            if is_set {
                data[i / 8] |= 1 << (i % 8);
            }
        }

        Self {
            data: data.into(),
            len: bools.len(),
        }
    }

    /// Creates a mask with every row set to `value`
    pub fn all(len: usize, value: bool) -> Self {
        let fill = if value { 0xFF } else { 0x00 };
        let mut data = vec![fill; bytes_for(len)];
        clear_tail(&mut data, len);

        Self {
            data: data.into(),
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the bit at `index`
    pub fn get(&self, index: usize) -> Result<bool> {
        if index >= self.len {
            return Err(Error::IndexOutOfBounds {
                index,
                size: self.len,
            });
        }
        Ok(self.bit(index))
    }

    #[inline]
    pub(crate) fn bit(&self, index: usize) -> bool {
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Number of rows selected by the mask
    pub fn count_true(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Positions of the selected rows, in ascending order
    pub fn selected_indices(&self) -> Vec<usize> {
        (0..self.len).filter(|&i| self.bit(i)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.bit(i))
    }

    pub fn to_vec(&self) -> Vec<bool> {
        self.iter().collect()
    }

    /// Elementwise AND
    pub fn and(&self, other: &BooleanMask) -> Result<BooleanMask> {
        self.zip_bytes(other, |l, r| l & r)
    }

    /// Elementwise OR
    pub fn or(&self, other: &BooleanMask) -> Result<BooleanMask> {
        self.zip_bytes(other, |l, r| l | r)
    }

    /// Elementwise NOT
    pub fn not(&self) -> BooleanMask {
        let mut data: Vec<u8> = self.data.iter().map(|b| !b).collect();
        clear_tail(&mut data, self.len);

        Self {
            data: data.into(),
            len: self.len,
        }
    }

    fn zip_bytes<F>(&self, other: &BooleanMask, op: F) -> Result<BooleanMask>
    where
        F: Fn(u8, u8) -> u8,
    {
        if self.len != other.len {
            return Err(Error::LengthMismatch {
                expected: self.len,
                actual: other.len,
            });
        }

        let data: Vec<u8> = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&l, &r)| op(l, r))
            .collect();

        Ok(Self {
            data: data.into(),
            len: self.len,
        })
    }
}

impl From<Vec<bool>> for BooleanMask {
    fn from(bools: Vec<bool>) -> Self {
        Self::new(&bools)
    }
}

impl From<&[bool]> for BooleanMask {
    fn from(bools: &[bool]) -> Self {
        Self::new(bools)
    }
}

impl fmt::Debug for BooleanMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

fn bytes_for(len: usize) -> usize {
    (len + 7) / 8
}

fn clear_tail(data: &mut [u8], len: usize) {
    let remaining_bits = len % 8;
    if remaining_bits != 0 {
        if let Some(last) = data.last_mut() {
            *last &= (1u8 << remaining_bits) - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_bits() {
        let bools = vec![true, false, true, true, false, false, false, true, true, false];
        let mask = BooleanMask::new(&bools);
        assert_eq!(mask.len(), 10);
        assert_eq!(mask.to_vec(), bools);
        assert_eq!(mask.count_true(), 5);
        assert_eq!(mask.selected_indices(), vec![0, 2, 3, 7, 8]);
    }

    #[test]
    fn test_all_clears_padding() {
        let mask = BooleanMask::all(11, true);
        assert_eq!(mask.count_true(), 11);
        assert_eq!(mask.not().count_true(), 0);
    }

    #[test]
    fn test_elementwise_ops() {
        let a = BooleanMask::new(&[true, true, false, false]);
        let b = BooleanMask::new(&[true, false, true, false]);
        assert_eq!(a.and(&b).unwrap().to_vec(), vec![true, false, false, false]);
        assert_eq!(a.or(&b).unwrap().to_vec(), vec![true, true, true, false]);
        assert_eq!(a.not().to_vec(), vec![false, false, true, true]);
    }

    #[test]
    fn test_length_mismatch() {
        let a = BooleanMask::all(3, true);
        let b = BooleanMask::all(4, true);
        assert!(matches!(
            a.and(&b),
            Err(Error::LengthMismatch {
                expected: 3,
                actual: 4
            })
        ));
    }

    #[test]
    fn test_get_out_of_bounds() {
        let mask = BooleanMask::all(2, false);
        assert!(!mask.get(1).unwrap());
        assert!(mask.get(2).is_err());
    }
}
