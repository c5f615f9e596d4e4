use std::cmp::Ordering;
use std::fmt::Debug;

use num_traits::{Float, NumCast, ToPrimitive};

/// One-dimensional hash values of points.
///
/// All hash-based index structures key their buckets with this type. It is
/// wide enough to hold the largest Pyramid-Technique bucket number.
pub type HashKey = i64;

/// Coordinate types supported by the index structures.
///
/// Every point-equality check goes through [`approx_cmp`][Element::approx_cmp],
/// which applies a fixed error tolerance. Raw `<`/`>` ordering is reserved for
/// tree descent, where ties need not be stable.
pub trait Element: Float + Debug + Default + Send + Sync + 'static {
    /// Error tolerance applied to coordinate comparisons.
    const TOLERANCE: Self;

    /// The coordinate's raw bit pattern, widened to 64 bits.
    fn to_key_bits(self) -> u64;

    /// Three-way comparison with tolerance.
    ///
    /// Returns `Equal` if `self` is within [`TOLERANCE`][Element::TOLERANCE]
    /// of `base`, otherwise `Less` or `Greater` by raw ordering.
    #[inline]
    fn approx_cmp(self, base: Self) -> Ordering {
        if (self - base).abs() < Self::TOLERANCE {
            Ordering::Equal
        } else if self < base {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    /// Truncate to a bucket key.
    ///
    /// Values outside the `HashKey` range map to 0. Those are only reachable
    /// for points outside a structure's boundary, whose bucket assignment is
    /// undefined to begin with.
    #[inline]
    fn to_hash_key(self) -> HashKey {
        self.to_i64().unwrap_or(0)
    }

    /// 0.5 in the element type.
    #[inline]
    fn half() -> Self {
        NumCast::from(0.5f64).unwrap()
    }

    /// Cast from any primitive number. Panics if the value is not
    /// representable; the constants and counts this crate converts always are.
    #[inline]
    fn cast<T: ToPrimitive>(value: T) -> Self {
        NumCast::from(value).unwrap()
    }
}

impl Element for f32 {
    const TOLERANCE: Self = 1.0e-7;

    #[inline]
    fn to_key_bits(self) -> u64 {
        self.to_bits() as u64
    }
}

impl Element for f64 {
    const TOLERANCE: Self = 1.0e-7;

    #[inline]
    fn to_key_bits(self) -> u64 {
        self.to_bits()
    }
}
