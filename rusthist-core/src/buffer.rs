//! Reference-counted copy-on-write storage for `f64` sequences.
//!
//! Every container in this crate wraps a [`SharedBuffer`]. Cloning a buffer
//! only bumps an atomic reference count; the data is copied the first time a
//! holder asks for mutable access while other holders still exist.

use std::ops::Index;
use std::sync::Arc;

/// Shared, copy-on-write `f64` storage with a distinguished null state.
///
/// A null buffer means "not provided" and is different from a present buffer
/// of length zero.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    data: Option<Arc<Vec<f64>>>,
}

impl SharedBuffer {
    /// Creates the null sentinel.
    #[must_use]
    pub fn null() -> Self {
        Self { data: None }
    }

    /// Creates a buffer that owns `values`.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            data: Some(Arc::new(values)),
        }
    }

    /// Creates a zero-filled buffer of length `len`.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self::from_elem(len, 0.0)
    }

    /// Creates a buffer of length `len` with every element set to `value`.
    #[must_use]
    pub fn from_elem(len: usize, value: f64) -> Self {
        Self::new(vec![value; len])
    }

    /// Returns true unless this is the null sentinel.
    #[inline]
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.data.is_some()
    }

    /// Returns the number of elements (zero for the null sentinel).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.as_ref().map_or(0, |data| data.len())
    }

    /// Returns true if the buffer holds no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read-only view of the data. The null sentinel reads as an empty slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        match &self.data {
            Some(data) => data.as_slice(),
            None => &[],
        }
    }

    /// Mutable view of the data.
    ///
    /// If the storage is shared with another holder it is copied first, so
    /// after this call `self` is the sole owner of the returned elements.
    pub fn make_mut(&mut self) -> &mut [f64] {
        match &mut self.data {
            Some(data) => Arc::make_mut(data).as_mut_slice(),
            None => &mut [],
        }
    }

    /// Replaces the whole buffer, detaching from any previous sharers.
    pub fn replace(&mut self, values: Vec<f64>) {
        self.data = Some(Arc::new(values));
    }

    /// Returns true if another holder references the same storage.
    #[must_use]
    pub fn is_shared(&self) -> bool {
        self.data
            .as_ref()
            .is_some_and(|data| Arc::strong_count(data) > 1)
    }

    /// Returns true if both buffers reference the same storage.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.data, &other.data) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Converts into an owned vector, copying only if the storage is shared.
    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        match self.data {
            Some(data) => Arc::try_unwrap(data).unwrap_or_else(|shared| (*shared).clone()),
            None => Vec::new(),
        }
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.as_slice().iter()
    }
}

impl PartialEq for SharedBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.is_present() == other.is_present() && self.as_slice() == other.as_slice()
    }
}

impl Index<usize> for SharedBuffer {
    type Output = f64;

    #[inline]
    fn index(&self, index: usize) -> &f64 {
        &self.as_slice()[index]
    }
}

impl From<Vec<f64>> for SharedBuffer {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl From<&[f64]> for SharedBuffer {
    fn from(values: &[f64]) -> Self {
        Self::new(values.to_vec())
    }
}

impl FromIterator<f64> for SharedBuffer {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SharedBuffer {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_is_distinct_from_empty() {
        let null = SharedBuffer::null();
        let empty = SharedBuffer::new(Vec::new());
        assert!(!null.is_present());
        assert!(empty.is_present());
        assert_eq!(null.len(), 0);
        assert_eq!(empty.len(), 0);
        assert_ne!(null, empty);
        assert_eq!(SharedBuffer::default(), null);
    }

    #[test]
    fn test_clone_shares_storage() {
        let a = SharedBuffer::new(vec![1.0, 2.0, 3.0]);
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert!(a.is_shared());
        assert_eq!(b[1], 2.0);
    }

    #[test]
    fn test_replace_detaches_from_sharers() {
        let a = SharedBuffer::new(vec![1.0, 2.0, 3.0]);
        let mut b = a.clone();
        b.replace(vec![7.0]);

        assert!(!a.ptr_eq(&b));
        assert!(!a.is_shared());
        assert_eq!(a.as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(b.as_slice(), &[7.0]);

        let mut null = SharedBuffer::null();
        null.replace(Vec::new());
        assert!(null.is_present());
    }

    #[test]
    fn test_make_mut_detaches_shared_copy() {
        let a = SharedBuffer::new(vec![1.0, 2.0, 3.0]);
        let mut b = a.clone();
        b.make_mut()[0] = 10.0;

        assert!(!a.ptr_eq(&b));
        assert!(!a.is_shared());
        assert!(!b.is_shared());
        assert_eq!(a.as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(b.as_slice(), &[10.0, 2.0, 3.0]);
    }

    #[test]
    fn test_make_mut_unique_does_not_copy() {
        let mut a = SharedBuffer::new(vec![1.0, 2.0]);
        let before = a.as_slice().as_ptr();
        a.make_mut()[1] = 5.0;
        assert_eq!(a.as_slice().as_ptr(), before);
        assert_eq!(a.as_slice(), &[1.0, 5.0]);
    }

    #[test]
    fn test_make_mut_on_null() {
        let mut null = SharedBuffer::null();
        assert!(null.make_mut().is_empty());
        assert!(!null.is_present());
    }

    #[test]
    fn test_into_vec() {
        let a = SharedBuffer::from_elem(3, 2.5);
        let b = a.clone();
        assert_eq!(a.into_vec(), vec![2.5; 3]);
        assert_eq!(b.into_vec(), vec![2.5; 3]);
        assert!(SharedBuffer::null().into_vec().is_empty());
    }

    #[test]
    fn test_shared_across_threads() {
        let a = SharedBuffer::new((0..100).map(f64::from).collect());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let local = a.clone();
                std::thread::spawn(move || local.iter().sum::<f64>())
            })
            .collect();
        for handle in handles {
            assert!((handle.join().unwrap() - 4950.0).abs() < f64::EPSILON);
        }
    }
}
