/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use crate::{
    Vector, arch,
    element::{Element, Kind},
    engine::reinterpret,
};

/// Split a type into or join from two halves.
///
/// A `Vector<T, N>` splits so the first `N / 2` lanes are in the low half and the last
/// `N / 2` lanes are in the high half.
pub trait SplitJoin {
    /// The type of the halved element.
    type Halved;

    /// Split `self` into two equal halves.
    fn split(self) -> LoHi<Self::Halved>;

    /// Create `self` by joining the two halves.
    fn join(halves: LoHi<Self::Halved>) -> Self;
}

/// Representation of the low and high halves associated with an implementation of
/// [`SplitJoin`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoHi<T> {
    /// The first half of a split entity.
    pub lo: T,
    /// The second half of a split entity.
    pub hi: T,
}

impl<T> LoHi<T> {
    /// Construct a new `LoHi` from the low and high parts.
    pub fn new(lo: T, hi: T) -> Self {
        Self { lo, hi }
    }

    /// Join the `lo` and `hi` portions.
    pub fn join<U>(self) -> U
    where
        U: SplitJoin<Halved = T>,
    {
        U::join(self)
    }

    /// Apply `f` to each member, first `lo` and then `hi`.
    pub fn map<F, R>(self, mut f: F) -> LoHi<R>
    where
        F: FnMut(T) -> R,
    {
        let lo = f(self.lo);
        let hi = f(self.hi);
        LoHi { lo, hi }
    }

    /// Apply `f` to the pairwise members of `self` and `x`, first `lo` and then `hi`.
    pub fn map_with<U, F, R>(self, x: LoHi<U>, mut f: F) -> LoHi<R>
    where
        F: FnMut(T, U) -> R,
    {
        let lo = f(self.lo, x.lo);
        let hi = f(self.hi, x.hi);
        LoHi { lo, hi }
    }
}

/// Concatenate `lo` and `hi` into a vector of twice the width.
///
/// ```
/// use diskann_lanes::{Vector, join};
///
/// let lo = Vector::<i16, 2>::from_array([1, 2]);
/// let hi = Vector::<i16, 2>::from_array([3, 4]);
/// let v: Vector<i16, 4> = join(lo, hi);
/// assert_eq!(v.to_array(), [1, 2, 3, 4]);
/// ```
#[inline(always)]
pub fn join<V: SplitJoin>(lo: V::Halved, hi: V::Halved) -> V {
    V::join(LoHi::new(lo, hi))
}

macro_rules! vector_splitjoin {
    ($N:literal, $H:literal) => {
        impl<T: Element> Vector<T, $N> {
            /// Borrow the low half of the lanes.
            #[inline(always)]
            pub fn lo(&self) -> &Vector<T, $H> {
                // SAFETY: `Vector` is `repr(C)` over `[T; N]` with a zero-sized marker, so
                // the first `N / 2` lanes start at offset zero. The half has a smaller
                // alignment than the whole.
                unsafe { &*(self as *const Self).cast::<Vector<T, $H>>() }
            }

            /// Borrow the high half of the lanes.
            #[inline(always)]
            pub fn hi(&self) -> &Vector<T, $H> {
                // SAFETY: The high half starts `size_of::<Vector<T, N / 2>>()` bytes in,
                // which is a multiple of its alignment and still inside `self`.
                unsafe { &*(self as *const Self).cast::<Vector<T, $H>>().add(1) }
            }
        }

        impl<T: Element> SplitJoin for Vector<T, $N> {
            type Halved = Vector<T, $H>;

            #[inline(always)]
            fn split(self) -> LoHi<Vector<T, $H>> {
                LoHi::new(*self.lo(), *self.hi())
            }

            #[inline(always)]
            fn join(halves: LoHi<Vector<T, $H>>) -> Self {
                // The 16-bit floats are joined through their bit patterns.
                if T::KIND == Kind::Half {
                    let lo: Vector<T::Bits, $H> = reinterpret(halves.lo);
                    let hi: Vector<T::Bits, $H> = reinterpret(halves.hi);
                    reinterpret(arch::join::<T::Bits, $H, $N>(lo, hi))
                } else {
                    arch::join::<T, $H, $N>(halves.lo, halves.hi)
                }
            }
        }
    };
}

macro_rules! array_splitjoin {
    ($N:literal, $H:literal) => {
        impl<T: Copy + Default> SplitJoin for [T; $N] {
            type Halved = [T; $H];

            #[inline(always)]
            fn split(self) -> LoHi<[T; $H]> {
                LoHi {
                    lo: core::array::from_fn(|i| self[i]),
                    hi: core::array::from_fn(|i| self[$H + i]),
                }
            }

            #[inline(always)]
            fn join(halves: LoHi<[T; $H]>) -> Self {
                let mut joined = [T::default(); $N];
                joined[..$H].copy_from_slice(&halves.lo);
                joined[$H..].copy_from_slice(&halves.hi);
                joined
            }
        }

        vector_splitjoin!($N, $H);
    };
}

array_splitjoin!(2, 1);
array_splitjoin!(4, 2);
array_splitjoin!(8, 4);
array_splitjoin!(16, 8);
array_splitjoin!(32, 16);
array_splitjoin!(64, 32);

///////////
// Tests //
///////////
