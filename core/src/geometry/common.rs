//! Common

use num_traits::Num;

/// Dot product trait.
pub trait Dot<V> {
    type Output: Num + Copy;

    /// Returns the dot product.
    ///
    /// * `other` - The other vector.
    fn dot(&self, other: &V) -> Self::Output;
}
