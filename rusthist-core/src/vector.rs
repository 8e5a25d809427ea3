//! Strongly-typed copy-on-write vectors.
//!
//! [`Vector`] owns one [`SharedBuffer`] and is tagged with a zero-sized
//! [`Kind`] that names what the numbers mean. Arithmetic is opted into per
//! kind through the [`Addable`], [`Scalable`] and [`Offsetable`] marker
//! traits, so adding two `BinEdges` or offsetting `Counts` does not compile.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Sub, SubAssign};

use crate::buffer::SharedBuffer;
use crate::error::{Error, Result};

/// Marker for the meaning of the values stored in a [`Vector`].
pub trait Kind: 'static {
    /// Human-readable name used in diagnostics.
    const NAME: &'static str;
}

/// Kinds that support element-wise addition and subtraction.
pub trait Addable: Kind {}

/// Kinds that support multiplication and division by a scalar.
pub trait Scalable: Kind {}

/// Kinds that support adding a scalar to every element.
pub trait Offsetable: Kind {}

/// A copy-on-write sequence of `f64` values of kind `K`.
///
/// Cloning is O(1). Mutation through [`Vector::as_mut_slice`], `IndexMut`
/// or the arithmetic operators copies the data first if it is shared.
pub struct Vector<K: Kind> {
    buffer: SharedBuffer,
    kind: PhantomData<fn() -> K>,
}

impl<K: Kind> Vector<K> {
    /// Creates a vector that owns `values`.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self::from_buffer(SharedBuffer::new(values))
    }

    /// Creates the null sentinel ("data not provided").
    #[must_use]
    pub fn null() -> Self {
        Self::from_buffer(SharedBuffer::null())
    }

    /// Creates a zero-filled vector of length `len`.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self::from_buffer(SharedBuffer::zeros(len))
    }

    /// Creates a vector of length `len` filled with `value`.
    #[must_use]
    pub fn from_elem(len: usize, value: f64) -> Self {
        Self::from_buffer(SharedBuffer::from_elem(len, value))
    }

    /// Creates a vector of length `len` from the first values of `generator`.
    ///
    /// See [`crate::generator`] for linear and logarithmic sequences.
    #[must_use]
    pub fn generate<G>(len: usize, generator: G) -> Self
    where
        G: IntoIterator<Item = f64>,
    {
        generator.into_iter().take(len).collect()
    }

    /// Wraps an existing buffer without copying.
    #[must_use]
    pub fn from_buffer(buffer: SharedBuffer) -> Self {
        Self {
            buffer,
            kind: PhantomData,
        }
    }

    /// Returns the underlying buffer.
    #[inline]
    #[must_use]
    pub fn buffer(&self) -> &SharedBuffer {
        &self.buffer
    }

    /// Unwraps into the underlying buffer without copying.
    #[must_use]
    pub fn into_buffer(self) -> SharedBuffer {
        self.buffer
    }

    /// Returns true unless this is the null sentinel.
    #[inline]
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.buffer.is_present()
    }

    /// Returns the number of values.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if there are no values.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Read-only view of the values.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        self.buffer.as_slice()
    }

    /// Mutable view of the values, copying first if the data is shared.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        self.buffer.make_mut()
    }

    /// Iterates over the values.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.as_slice().iter()
    }

    /// Iterates mutably over the values, copying first if the data is shared.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, f64> {
        self.as_mut_slice().iter_mut()
    }

    /// Returns true if another vector references the same storage.
    #[must_use]
    pub fn is_shared(&self) -> bool {
        self.buffer.is_shared()
    }

    /// Returns true if both vectors reference the same storage.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.buffer.ptr_eq(&other.buffer)
    }

    /// Copies the values into a new `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        self.as_slice().to_vec()
    }

    /// Converts into a `Vec`, copying only if the data is shared.
    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.buffer.into_vec()
    }

    /// Applies `f` to every value in place.
    pub(crate) fn apply(&mut self, f: impl Fn(f64) -> f64) {
        for value in self.as_mut_slice() {
            *value = f(*value);
        }
    }
}

impl<K: Addable> Vector<K> {
    /// Adds `other` element-wise, failing if the lengths differ.
    ///
    /// # Errors
    /// Returns [`Error::SizeMismatch`] if the lengths differ.
    pub fn checked_add_assign(&mut self, other: &Self) -> Result<()> {
        self.zip_apply(other, |a, b| a + b)
    }

    /// Subtracts `other` element-wise, failing if the lengths differ.
    ///
    /// # Errors
    /// Returns [`Error::SizeMismatch`] if the lengths differ.
    pub fn checked_sub_assign(&mut self, other: &Self) -> Result<()> {
        self.zip_apply(other, |a, b| a - b)
    }

    fn zip_apply(&mut self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Result<()> {
        if self.len() != other.len() {
            return Err(Error::size_mismatch(self.len(), other.len()));
        }
        for (a, &b) in self.as_mut_slice().iter_mut().zip(other.as_slice()) {
            *a = f(*a, b);
        }
        Ok(())
    }
}

impl<K: Kind> Clone for Vector<K> {
    fn clone(&self) -> Self {
        Self::from_buffer(self.buffer.clone())
    }
}

impl<K: Kind> Default for Vector<K> {
    fn default() -> Self {
        Self::null()
    }
}

impl<K: Kind> PartialEq for Vector<K> {
    fn eq(&self, other: &Self) -> bool {
        self.buffer == other.buffer
    }
}

impl<K: Kind> fmt::Debug for Vector<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_present() {
            f.debug_tuple(K::NAME).field(&self.as_slice()).finish()
        } else {
            write!(f, "{}(null)", K::NAME)
        }
    }
}

impl<K: Kind> Index<usize> for Vector<K> {
    type Output = f64;

    #[inline]
    fn index(&self, index: usize) -> &f64 {
        &self.as_slice()[index]
    }
}

impl<K: Kind> IndexMut<usize> for Vector<K> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.as_mut_slice()[index]
    }
}

impl<K: Kind> From<Vec<f64>> for Vector<K> {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl<K: Kind> From<&[f64]> for Vector<K> {
    fn from(values: &[f64]) -> Self {
        Self::new(values.to_vec())
    }
}

impl<K: Kind, const N: usize> From<[f64; N]> for Vector<K> {
    fn from(values: [f64; N]) -> Self {
        Self::new(values.to_vec())
    }
}

impl<K: Kind> FromIterator<f64> for Vector<K> {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::from_buffer(iter.into_iter().collect())
    }
}

impl<'a, K: Kind> IntoIterator for &'a Vector<K> {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K: Kind> IntoIterator for &'a mut Vector<K> {
    type Item = &'a mut f64;
    type IntoIter = std::slice::IterMut<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

// Element-wise arithmetic. Length mismatches panic like out-of-bounds
// indexing; use the checked forms to get an error instead.

impl<K: Addable> AddAssign<&Vector<K>> for Vector<K> {
    fn add_assign(&mut self, rhs: &Vector<K>) {
        if let Err(err) = self.checked_add_assign(rhs) {
            panic!("{} addition: {err}", K::NAME);
        }
    }
}

impl<K: Addable> Add<&Vector<K>> for Vector<K> {
    type Output = Vector<K>;

    fn add(mut self, rhs: &Vector<K>) -> Vector<K> {
        self += rhs;
        self
    }
}

impl<K: Addable> SubAssign<&Vector<K>> for Vector<K> {
    fn sub_assign(&mut self, rhs: &Vector<K>) {
        if let Err(err) = self.checked_sub_assign(rhs) {
            panic!("{} subtraction: {err}", K::NAME);
        }
    }
}

impl<K: Addable> Sub<&Vector<K>> for Vector<K> {
    type Output = Vector<K>;

    fn sub(mut self, rhs: &Vector<K>) -> Vector<K> {
        self -= rhs;
        self
    }
}

impl<K: Scalable> MulAssign<f64> for Vector<K> {
    fn mul_assign(&mut self, rhs: f64) {
        self.apply(|value| value * rhs);
    }
}

impl<K: Scalable> Mul<f64> for Vector<K> {
    type Output = Vector<K>;

    fn mul(mut self, rhs: f64) -> Vector<K> {
        self *= rhs;
        self
    }
}

impl<K: Scalable> DivAssign<f64> for Vector<K> {
    fn div_assign(&mut self, rhs: f64) {
        self.apply(|value| value / rhs);
    }
}

impl<K: Scalable> Div<f64> for Vector<K> {
    type Output = Vector<K>;

    fn div(mut self, rhs: f64) -> Vector<K> {
        self /= rhs;
        self
    }
}

impl<K: Offsetable> AddAssign<f64> for Vector<K> {
    fn add_assign(&mut self, rhs: f64) {
        self.apply(|value| value + rhs);
    }
}

impl<K: Offsetable> Add<f64> for Vector<K> {
    type Output = Vector<K>;

    fn add(mut self, rhs: f64) -> Vector<K> {
        self += rhs;
        self
    }
}

impl<K: Offsetable> SubAssign<f64> for Vector<K> {
    fn sub_assign(&mut self, rhs: f64) {
        self.apply(|value| value - rhs);
    }
}

impl<K: Offsetable> Sub<f64> for Vector<K> {
    type Output = Vector<K>;

    fn sub(mut self, rhs: f64) -> Vector<K> {
        self -= rhs;
        self
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::{Kind, SharedBuffer, Vector};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for SharedBuffer {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if self.is_present() {
                serializer.serialize_some(self.as_slice())
            } else {
                serializer.serialize_none()
            }
        }
    }

    impl<'de> Deserialize<'de> for SharedBuffer {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let values = Option::<Vec<f64>>::deserialize(deserializer)?;
            Ok(values.map_or_else(SharedBuffer::null, SharedBuffer::new))
        }
    }

    impl<K: Kind> Serialize for Vector<K> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            self.buffer().serialize(serializer)
        }
    }

    impl<'de, K: Kind> Deserialize<'de> for Vector<K> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            SharedBuffer::deserialize(deserializer).map(Vector::from_buffer)
        }
    }
}
