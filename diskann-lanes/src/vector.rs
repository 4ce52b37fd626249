/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use std::ops::Index;

use crate::{
    Const, Error, SupportedLaneCount,
    element::Element,
};

/// A vector of exactly `N` lanes of `T`.
///
/// # Layout
///
/// A `Vector<T, N>` is bit-identical to `[T; N]`: it has size `N * size_of::<T>()`, no
/// padding, and lanes appear in memory in order. Unlike the array, its alignment is the
/// full `N * size_of::<T>()`, so a vector whose size matches a hardware register is also
/// aligned like one.
///
/// # Composition
///
/// Every vector with `N > 1` is the concatenation of two `Vector<T, N / 2>`. The halves
/// are available by reference through `lo()`/`hi()`, by value through
/// [`crate::SplitJoin::split`], and two halves become a whole through [`crate::join`].
///
/// # Example
///
/// ```
/// use diskann_lanes::Vector;
///
/// let v = Vector::<u8, 4>::from_array([1, 2, 3, 4]);
/// assert_eq!(v.lo().to_array(), [1, 2]);
/// assert_eq!(v.hi().to_array(), [3, 4]);
/// assert_eq!(std::mem::align_of::<Vector<u8, 4>>(), 4);
/// ```
#[repr(C)]
pub struct Vector<T: Element, const N: usize>
where
    Const<N>: SupportedLaneCount,
{
    lanes: [T; N],
    _align: <Const<N> as SupportedLaneCount>::Align<T>,
}

impl<T: Element, const N: usize> Vector<T, N>
where
    Const<N>: SupportedLaneCount,
{
    /// The number of lanes.
    pub const LANES: usize = N;

    /// Construct a vector from an array of lanes.
    #[inline(always)]
    pub fn from_array(lanes: [T; N]) -> Self {
        Self {
            lanes,
            _align: Default::default(),
        }
    }

    /// Return the lanes as an array.
    #[inline(always)]
    pub fn to_array(self) -> [T; N] {
        self.lanes
    }

    /// Borrow the lanes as an array.
    #[inline(always)]
    pub fn as_array(&self) -> &[T; N] {
        &self.lanes
    }

    /// Construct a vector whose lane `i` is `f(i)`.
    #[inline(always)]
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        Self::from_array(core::array::from_fn(f))
    }

    /// Broadcast `value` to every lane.
    #[doc(alias = "load")]
    #[inline(always)]
    pub fn splat(value: T) -> Self {
        Self::from_array([value; N])
    }

    /// Load `min(count, N)` lanes starting at `ptr` and fill the remaining lanes with zero.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `min(count, N)` values of `T`. It need not be
    /// aligned.
    #[inline(always)]
    pub unsafe fn load(ptr: *const T, count: usize) -> Self {
        let mut lanes = [T::ZERO; N];
        // SAFETY: The caller asserts `ptr` is readable for `min(count, N)` elements and
        // `lanes` holds `N` elements, so the destination is always large enough.
        unsafe {
            std::ptr::copy_nonoverlapping(ptr, lanes.as_mut_ptr(), count.min(N));
        }
        Self::from_array(lanes)
    }

    /// Load the first `min(src.len(), N)` lanes from `src` and zero the rest.
    #[inline(always)]
    pub fn load_first(src: &[T]) -> Self {
        // SAFETY: `src` is valid for `src.len()` reads.
        unsafe { Self::load(src.as_ptr(), src.len()) }
    }

    /// Load all `N` lanes from `src`.
    ///
    /// Returns an error if `src.len() != N`.
    pub fn try_from_slice(src: &[T]) -> Result<Self, Error> {
        let lanes: [T; N] = src.try_into().map_err(|_| Error::LengthMismatch {
            expected: N,
            actual: src.len(),
        })?;
        Ok(Self::from_array(lanes))
    }

    /// Store all `N` lanes into `dst`.
    ///
    /// Returns an error if `dst.len() != N`, in which case `dst` is unmodified.
    pub fn store(self, dst: &mut [T]) -> Result<(), Error> {
        if dst.len() != N {
            return Err(Error::LengthMismatch {
                expected: N,
                actual: dst.len(),
            });
        }
        dst.copy_from_slice(&self.lanes);
        Ok(())
    }

    /// Store the first `min(dst.len(), N)` lanes into `dst`, returning the number written.
    #[inline(always)]
    pub fn store_first(self, dst: &mut [T]) -> usize {
        let count = dst.len().min(N);
        dst[..count].copy_from_slice(&self.lanes[..count]);
        count
    }

    /// View the lanes as raw bytes in memory order.
    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.lanes)
    }

    /// Apply `f` to every lane.
    #[inline(always)]
    pub fn map<U, F>(self, f: F) -> Vector<U, N>
    where
        U: Element,
        F: FnMut(T) -> U,
    {
        Vector::from_array(self.lanes.map(f))
    }
}

impl<T: Element, const N: usize> Clone for Vector<T, N>
where
    Const<N>: SupportedLaneCount,
{
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Element, const N: usize> Copy for Vector<T, N> where Const<N>: SupportedLaneCount {}

impl<T: Element, const N: usize> Default for Vector<T, N>
where
    Const<N>: SupportedLaneCount,
{
    fn default() -> Self {
        Self::splat(T::ZERO)
    }
}

impl<T: Element, const N: usize> PartialEq for Vector<T, N>
where
    Const<N>: SupportedLaneCount,
{
    fn eq(&self, other: &Self) -> bool {
        self.lanes == other.lanes
    }
}

impl<T: Element, const N: usize> std::fmt::Debug for Vector<T, N>
where
    Const<N>: SupportedLaneCount,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Vector<{}, {}>", std::any::type_name::<T>(), N)?;
        f.debug_list().entries(self.lanes.iter()).finish()
    }
}

impl<T: Element, const N: usize> Index<usize> for Vector<T, N>
where
    Const<N>: SupportedLaneCount,
{
    type Output = T;

    #[inline(always)]
    fn index(&self, i: usize) -> &T {
        &self.lanes[i]
    }
}

impl<T: Element, const N: usize> From<[T; N]> for Vector<T, N>
where
    Const<N>: SupportedLaneCount,
{
    fn from(lanes: [T; N]) -> Self {
        Self::from_array(lanes)
    }
}

impl<T: Element, const N: usize> From<Vector<T, N>> for [T; N]
where
    Const<N>: SupportedLaneCount,
{
    fn from(v: Vector<T, N>) -> Self {
        v.to_array()
    }
}

impl<T: Element, const N: usize> TryFrom<&[T]> for Vector<T, N>
where
    Const<N>: SupportedLaneCount,
{
    type Error = Error;

    fn try_from(src: &[T]) -> Result<Self, Error> {
        Self::try_from_slice(src)
    }
}
