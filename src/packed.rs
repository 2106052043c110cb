//! Bit-packed array of small unsigned integers.
//!
//! [`PackedVector`] stores fixed-width slots inside a single `u64`. Slot `i`
//! occupies bits `[i * g, i * g + g)` where `g` is the group size. Writes are
//! truncated to `g` bits, so a read can never return more than the mask.
//!
//! With `g = 3` the store holds 21 slots of values 0–7, which is how a
//! board encodes one queen row per column.
//!
//! # Examples
//!
//! ```
//! use u_queens::packed::PackedVector;
//!
//! let packed = PackedVector::from_slice(&[5, 0, 7], 3).unwrap();
//! assert_eq!(packed.get(2).unwrap(), 7);
//! assert_eq!(packed.iter(3).collect::<Vec<_>>(), vec![5, 0, 7]);
//! assert_eq!(packed.to_string(), "111_000_101");
//! ```

use std::fmt;
use std::iter::FusedIterator;

use crate::error::{QueensError, Result};

const STORE_BITS: u32 = u64::BITS;
const MAX_GROUP_SIZE: u32 = 32;

/// Fixed-group-size integer array packed into one `u64`.
///
/// Equality and hashing follow the backing bits, so two vectors with the same
/// group size and identical bit patterns are interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackedVector {
    bits: u64,
    group_size: u32,
}

impl PackedVector {
    /// Creates an all-zero vector with `group_size` bits per slot.
    ///
    /// Fails with [`QueensError::InvalidGroupSize`] unless
    /// `1 <= group_size <= 32`.
    pub fn new(group_size: u32) -> Result<Self> {
        if group_size == 0 || group_size > MAX_GROUP_SIZE {
            return Err(QueensError::InvalidGroupSize(group_size));
        }
        Ok(Self {
            bits: 0,
            group_size,
        })
    }

    /// Builds a vector by writing `values[i]` into slot `i`, in order.
    ///
    /// Each value is truncated to the group mask like any other write.
    pub fn from_slice(values: &[u64], group_size: u32) -> Result<Self> {
        let mut packed = Self::new(group_size)?;
        for (index, &value) in values.iter().enumerate() {
            packed.set(index, value)?;
        }
        Ok(packed)
    }

    /// Bits per slot.
    pub fn group_size(&self) -> u32 {
        self.group_size
    }

    /// The largest value a slot can hold: `(1 << g) - 1`.
    pub fn mask(&self) -> u64 {
        (1u64 << self.group_size) - 1
    }

    /// Number of whole slots that fit in the backing store.
    pub fn capacity(&self) -> usize {
        (STORE_BITS / self.group_size) as usize
    }

    /// The raw backing integer.
    pub fn as_u64(&self) -> u64 {
        self.bits
    }

    /// Reads slot `index`.
    pub fn get(&self, index: usize) -> Result<u64> {
        let offset = self.offset(index)?;
        Ok((self.bits >> offset) & self.mask())
    }

    /// Writes `value & mask` into slot `index`, replacing its previous bits.
    pub fn set(&mut self, index: usize, value: u64) -> Result<()> {
        let offset = self.offset(index)?;
        let mask = self.mask();
        self.bits = (self.bits & !(mask << offset)) | ((value & mask) << offset);
        Ok(())
    }

    /// Zeroes slot `index` without touching its neighbours.
    pub fn clear(&mut self, index: usize) -> Result<()> {
        let offset = self.offset(index)?;
        self.bits &= !(self.mask() << offset);
        Ok(())
    }

    /// Iterates slots `0..length`.
    pub fn iter(&self, length: usize) -> Iter {
        self.iter_from(0, length, 1)
    }

    /// Iterates slots in `[start, length)` stepping by `step`.
    ///
    /// `length` is clamped to [`capacity`](Self::capacity). The iterator
    /// holds a copy of the bits, so it never observes later writes and can be
    /// cloned to restart.
    ///
    /// # Panics
    /// Panics if `step` is zero.
    pub fn iter_from(&self, start: usize, length: usize, step: usize) -> Iter {
        assert!(step > 0, "iteration step must be positive");
        Iter {
            packed: *self,
            next: start,
            end: length.min(self.capacity()),
            step,
        }
    }

    /// Wraps raw bits with an already validated group size.
    pub(crate) const fn with_bits(bits: u64, group_size: u32) -> Self {
        Self { bits, group_size }
    }

    /// Reads a slot already known to be in range.
    #[inline]
    pub(crate) fn slot(&self, index: usize) -> u64 {
        debug_assert!(index < self.capacity());
        (self.bits >> (index as u32 * self.group_size)) & self.mask()
    }

    fn offset(&self, index: usize) -> Result<u32> {
        let capacity = self.capacity();
        if index >= capacity {
            return Err(QueensError::IndexOutOfRange { index, capacity });
        }
        Ok(index as u32 * self.group_size)
    }
}

/// Binary digits grouped per slot, most significant group first.
///
/// The digits are left-padded with zeros to a whole number of groups and
/// groups are separated by `_`.
impl fmt::Display for PackedVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let group = self.group_size as usize;
        let digits = format!("{:b}", self.bits);
        let width = digits.len().div_ceil(group) * group;
        let padded = format!("{digits:0>width$}");
        for (i, ch) in padded.chars().enumerate() {
            if i > 0 && i % group == 0 {
                f.write_str("_")?;
            }
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

/// Lazy iterator over decoded slot values.
///
/// Created by [`PackedVector::iter`] and [`PackedVector::iter_from`].
#[derive(Debug, Clone)]
pub struct Iter {
    packed: PackedVector,
    next: usize,
    end: usize,
    step: usize,
}

impl Iterator for Iter {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.next >= self.end {
            return None;
        }
        let value = self.packed.slot(self.next);
        self.next = self.next.saturating_add(self.step);
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.next >= self.end {
            0
        } else {
            (self.end - self.next).div_ceil(self.step)
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter {}

impl FusedIterator for Iter {}
