//! Borrowed, bounds-checked views over contiguous memory
//!
//! A [`MemoryView`] is a `(pointer, length)` pair whose lifetime is tied to the
//! region it aliases. Safe constructors borrow a slice, so the borrow checker
//! keeps the view from outliving (or coexisting with a reallocation of) the
//! allocation. Every element access and every slice operation checks its bounds
//! and reports violations as [`StoreError::OutOfRange`] instead of panicking.

use crate::error::StoreError;
use alloc::format;
use alloc::vec::Vec;
use bytes::Bytes;
use core::fmt;
use core::marker::PhantomData;
use core::ptr::NonNull;

/// Read-only, non-owning view over `len` contiguous elements
pub struct MemoryView<'a, T> {
    ptr: NonNull<T>,
    len: u64,
    _marker: PhantomData<&'a [T]>,
}

// SAFETY: a MemoryView behaves exactly like `&'a [T]`.
unsafe impl<T: Sync> Send for MemoryView<'_, T> {}
unsafe impl<T: Sync> Sync for MemoryView<'_, T> {}

impl<'a, T> MemoryView<'a, T> {
    /// Create a view over an entire slice
    #[inline]
    pub fn new(slice: &'a [T]) -> Self {
        Self {
            ptr: NonNull::from(slice).cast::<T>(),
            len: slice.len() as u64,
            _marker: PhantomData,
        }
    }

    /// Create a view over `length` elements of `slice` starting at `start`
    ///
    /// Fails with [`StoreError::OutOfRange`] when `start > slice.len()` or
    /// `length > slice.len() - start`.
    pub fn with_range(slice: &'a [T], start: u64, length: u64) -> Result<Self, StoreError> {
        Self::new(slice).slice(start, length)
    }

    /// Create a view from a raw pointer and an element count
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `len` consecutive `T`s, properly aligned,
    /// and the memory must neither be mutated nor relocated nor freed for the
    /// whole lifetime `'a`. A null `ptr` is only allowed together with `len == 0`.
    #[inline]
    pub unsafe fn from_raw_parts(ptr: *const T, len: u64) -> Self {
        Self {
            ptr: NonNull::new(ptr as *mut T).unwrap_or(NonNull::dangling()),
            len,
            _marker: PhantomData,
        }
    }

    /// An empty view
    #[inline]
    pub const fn empty() -> Self {
        Self {
            ptr: NonNull::dangling(),
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Number of elements in the view
    #[inline]
    pub const fn len(&self) -> u64 {
        self.len
    }

    /// Returns true if the view holds no elements
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Address of the first element
    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Reference to the element at `index`
    #[inline]
    pub fn get(&self, index: u64) -> Result<&'a T, StoreError> {
        if index >= self.len {
            return Err(StoreError::out_of_range(index, self.len));
        }
        // SAFETY: index < len and the region is valid for `len` reads for 'a.
        Ok(unsafe { &*self.ptr.as_ptr().add(index as usize) })
    }

    /// View over the elements from `start` to the end
    #[inline]
    pub fn slice_from(&self, start: u64) -> Result<Self, StoreError> {
        if start > self.len {
            return Err(StoreError::out_of_range(start, self.len));
        }
        self.slice(start, self.len - start)
    }

    /// View over `length` elements starting at `start`
    pub fn slice(&self, start: u64, length: u64) -> Result<Self, StoreError> {
        if start > self.len || length > self.len - start {
            return Err(StoreError::out_of_range(start.saturating_add(length), self.len));
        }
        // SAFETY: [start, start + length) lies inside this view's region.
        Ok(unsafe { Self::from_raw_parts(self.ptr.as_ptr().add(start as usize), length) })
    }

    /// The viewed elements as a plain slice
    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        // SAFETY: the constructors guarantee `len` valid, aligned elements for 'a.
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.len as usize) }
    }

    /// Iterate the viewed elements by reference
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'a, T> {
        self.as_slice().iter()
    }

    /// Copy every element into `destination`
    ///
    /// Fails with [`StoreError::InvalidArgument`] if the destination is shorter
    /// than this view; nothing is written in that case.
    pub fn copy_to(&self, destination: &mut MemoryViewMut<'_, T>) -> Result<(), StoreError>
    where
        T: Copy,
    {
        if !self.try_copy_to(destination) {
            return Err(StoreError::InvalidArgument(format!(
                "destination too small: {} < {}",
                destination.len(),
                self.len
            )));
        }
        Ok(())
    }

    /// Copy every element into `destination`, returning false if it does not fit
    pub fn try_copy_to(&self, destination: &mut MemoryViewMut<'_, T>) -> bool
    where
        T: Copy,
    {
        if self.len > destination.len() {
            return false;
        }
        let n = self.len as usize;
        destination.as_mut_slice()[..n].copy_from_slice(self.as_slice());
        true
    }

    /// Copy the viewed elements into an owned vector
    ///
    /// An empty view yields `Vec::new()`, which does not allocate.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        if self.len == 0 {
            return Vec::new();
        }
        self.as_slice().to_vec()
    }
}

impl<'a> MemoryView<'a, u8> {
    /// Copy the viewed bytes into a [`Bytes`]
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(self.as_slice())
    }

    /// Interpret the viewed bytes as UTF-8
    pub fn as_str(&self) -> Result<&'a str, core::str::Utf8Error> {
        core::str::from_utf8(self.as_slice())
    }
}

impl<T> Clone for MemoryView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MemoryView<'_, T> {}

impl<T> Default for MemoryView<'_, T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Identity comparison: same address and same length.
///
/// Contents are never compared; use [`MemoryView::as_slice`] for that.
impl<T> PartialEq for MemoryView<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.ptr.as_ptr(), other.ptr.as_ptr()) && self.len == other.len
    }
}

impl<T> Eq for MemoryView<'_, T> {}

impl<T> fmt::Debug for MemoryView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl<T> fmt::Display for MemoryView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemoryView<{}>[{}]", core::any::type_name::<T>(), self.len)
    }
}

impl<'a, T> IntoIterator for MemoryView<'a, T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> From<&'a [T]> for MemoryView<'a, T> {
    fn from(slice: &'a [T]) -> Self {
        Self::new(slice)
    }
}

/// Writable, non-owning view over `len` contiguous elements
///
/// Used as the destination of [`MemoryView::copy_to`].
pub struct MemoryViewMut<'a, T> {
    ptr: NonNull<T>,
    len: u64,
    _marker: PhantomData<&'a mut [T]>,
}

// SAFETY: a MemoryViewMut behaves exactly like `&'a mut [T]`.
unsafe impl<T: Send> Send for MemoryViewMut<'_, T> {}
unsafe impl<T: Sync> Sync for MemoryViewMut<'_, T> {}

impl<'a, T> MemoryViewMut<'a, T> {
    /// Create a writable view over an entire slice
    #[inline]
    pub fn new(slice: &'a mut [T]) -> Self {
        let len = slice.len() as u64;
        Self {
            ptr: NonNull::from(slice).cast::<T>(),
            len,
            _marker: PhantomData,
        }
    }

    /// Create a writable view over `length` elements of `slice` starting at `start`
    pub fn with_range(slice: &'a mut [T], start: u64, length: u64) -> Result<Self, StoreError> {
        let total = slice.len() as u64;
        if start > total || length > total - start {
            return Err(StoreError::out_of_range(start.saturating_add(length), total));
        }
        let (start, end) = (start as usize, (start + length) as usize);
        Ok(Self::new(&mut slice[start..end]))
    }

    /// Number of elements in the view
    #[inline]
    pub const fn len(&self) -> u64 {
        self.len
    }

    /// Returns true if the view holds no elements
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Mutable reference to the element at `index`
    pub fn get_mut(&mut self, index: u64) -> Result<&mut T, StoreError> {
        if index >= self.len {
            return Err(StoreError::out_of_range(index, self.len));
        }
        // SAFETY: index < len and this view holds the only borrow of the region.
        Ok(unsafe { &mut *self.ptr.as_ptr().add(index as usize) })
    }

    /// The viewed elements as a mutable slice
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: built from a `&'a mut [T]` of exactly `len` elements.
        unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len as usize) }
    }

    /// Read-only view over the same elements
    #[inline]
    pub fn as_view(&self) -> MemoryView<'_, T> {
        // SAFETY: the shared borrow of `self` keeps the region unaliased for the result's lifetime.
        unsafe { MemoryView::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<T> fmt::Debug for MemoryViewMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemoryViewMut<{}>[{}]", core::any::type_name::<T>(), self.len)
    }
}

impl<'a, T> From<&'a mut [T]> for MemoryViewMut<'a, T> {
    fn from(slice: &'a mut [T]) -> Self {
        Self::new(slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_range_bounds() {
        let data = [1u8, 2, 3, 4, 5];

        let view = MemoryView::with_range(&data, 1, 3).unwrap();
        assert_eq!(view.as_slice(), &[2, 3, 4]);

        assert!(MemoryView::with_range(&data, 5, 0).unwrap().is_empty());
        assert!(matches!(
            MemoryView::with_range(&data, 6, 0),
            Err(StoreError::OutOfRange { .. })
        ));
        assert!(matches!(
            MemoryView::with_range(&data, 2, 4),
            Err(StoreError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_get_returns_reference_into_region() {
        let data = [10u32, 20, 30];
        let view = MemoryView::new(&data);

        let second = view.get(1).unwrap();
        assert!(core::ptr::eq(second, &data[1]));
        assert_eq!(
            view.get(3),
            Err(StoreError::OutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_slicing() {
        let data = *b"hello world";
        let view = MemoryView::new(&data);

        assert_eq!(view.slice_from(6).unwrap().as_slice(), b"world");
        assert_eq!(view.slice(0, 5).unwrap().as_slice(), b"hello");
        assert!(view.slice_from(11).unwrap().is_empty());
        assert!(view.slice_from(12).is_err());
        assert!(view.slice(6, 6).is_err());
        assert!(view.slice(u64::MAX, 1).is_err());

        // Slices of slices keep addressing the original region
        let inner = view.slice(2, 7).unwrap().slice(1, 3).unwrap();
        assert_eq!(inner.as_slice(), b"lo ");
    }

    #[test]
    fn test_copy_to() {
        let src = [1u8, 2, 3];
        let view = MemoryView::new(&src);

        let mut big = [0u8; 5];
        view.copy_to(&mut MemoryViewMut::new(&mut big)).unwrap();
        assert_eq!(big, [1, 2, 3, 0, 0]);

        let mut small = [9u8; 2];
        let mut dest = MemoryViewMut::new(&mut small);
        assert!(!view.try_copy_to(&mut dest));
        assert!(matches!(
            view.copy_to(&mut dest),
            Err(StoreError::InvalidArgument(_))
        ));
        assert_eq!(small, [9, 9]);
    }

    #[test]
    fn test_to_vec_empty_does_not_allocate() {
        let data = [1u8, 2, 3];
        let empty = MemoryView::new(&data).slice(1, 0).unwrap();
        let owned = empty.to_vec();
        assert!(owned.is_empty());
        assert_eq!(owned.capacity(), 0);

        assert_eq!(MemoryView::new(&data).to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_equality_is_identity() {
        let a = [7u8; 4];
        let b = [7u8; 4];

        let va = MemoryView::new(&a);
        assert_eq!(va, MemoryView::new(&a));
        // Same contents, different memory
        assert_ne!(va, MemoryView::new(&b));
        // Same address, different length
        assert_ne!(va, va.slice(0, 3).unwrap());
    }

    #[test]
    fn test_display() {
        let data = [0u8; 3];
        assert_eq!(MemoryView::new(&data).to_string(), "MemoryView<u8>[3]");
    }

    #[test]
    fn test_mut_view() {
        let mut data = [0u8; 4];
        let mut view = MemoryViewMut::with_range(&mut data, 1, 2).unwrap();
        *view.get_mut(0).unwrap() = 5;
        *view.get_mut(1).unwrap() = 6;
        assert!(view.get_mut(2).is_err());
        assert_eq!(view.as_view().as_slice(), &[5, 6]);
        assert_eq!(data, [0, 5, 6, 0]);

        assert!(MemoryViewMut::with_range(&mut data, 3, 2).is_err());
    }

    #[test]
    fn test_byte_helpers() {
        let data = b"frame".to_vec();
        let view = MemoryView::new(&data);
        assert_eq!(view.as_str().unwrap(), "frame");
        assert_eq!(view.to_bytes(), Bytes::from_static(b"frame"));
        assert_eq!(view.iter().filter(|b| **b == b'e').count(), 1);
    }
}
