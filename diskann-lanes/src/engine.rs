/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Width dispatch for the cast engine.
//!
//! An [`Engine`] applies [`Native`] kernels to vectors of one width. Each supported lane
//! count `N` has its own implementation on `Const<N>`, stamped out by `matcher!` because
//! Rust cannot yet name `Vector<T, { N / 2 }>` in generic code. For a kernel whose native
//! instruction converts `L` lanes:
//!
//! * `N == L`: call the instruction directly.
//! * `N < L`: duplicate the vector with `join(v, v)` until it is `L` lanes wide, convert,
//!   and keep the low half.
//! * `N > L`, or no instruction (`L == 0`): convert `lo` and `hi` separately and `join`
//!   the results. At `N == 1` the scalar definition is used.
//!
//! `L` and `N` are both compile-time constants, so every branch below folds away after
//! monomorphization.

use crate::{
    Const, LoHi, SplitJoin, SupportedLaneCount, Vector,
    element::{Element, Float, Integer},
    helpers::retype,
    kernel::Native,
};

/// A family of same-width vectors that kernels can be applied to.
pub trait Engine {
    /// The vector of `T` at this width.
    type V<T: Element>: Copy;

    /// Apply `k` to every lane of `v`.
    fn apply<K: Native>(k: K, v: Self::V<K::From>) -> Self::V<K::To>;

    /// Reinterpret the bits of every lane.
    fn reinterpret<T: Element, U: Element<Bits = T::Bits>>(v: Self::V<T>) -> Self::V<U>;

    /// Force lanes whose `src` is `+∞` or `-∞` to `I::MAX` or `I::MIN`.
    fn clamp_infinity<F: Float, I: Integer>(src: Self::V<F>, dst: Self::V<I>) -> Self::V<I>;
}

#[inline(always)]
fn direct<K: Native, const N: usize>(k: K, v: Vector<K::From, N>) -> Vector<K::To, N>
where
    Const<N>: SupportedLaneCount,
{
    debug_assert_eq!(K::LANES, N);
    // SAFETY: This is only reached when `K::LANES == N`, in which case `K::Src` and
    // `K::Dst` are `Vector<K::From, N>` and `Vector<K::To, N>`.
    unsafe { retype(k.native(retype(v))) }
}

/// Lane-wise reinterpretation between elements of the same width.
#[inline(always)]
pub(crate) fn reinterpret<T, U, const N: usize>(v: Vector<T, N>) -> Vector<U, N>
where
    T: Element,
    U: Element<Bits = T::Bits>,
    Const<N>: SupportedLaneCount,
{
    v.map(bytemuck::cast::<T, U>)
}

#[inline(always)]
pub(crate) fn clamp_infinity<F, I, const N: usize>(
    src: Vector<F, N>,
    dst: Vector<I, N>,
) -> Vector<I, N>
where
    F: Float,
    I: Integer,
    Const<N>: SupportedLaneCount,
{
    Vector::from_fn(|i| {
        let x = src[i];
        if x.is_pos_infinity() {
            I::MAX
        } else if x.is_neg_infinity() {
            I::MIN
        } else {
            dst[i]
        }
    })
}

macro_rules! common {
    () => {
        #[inline(always)]
        fn reinterpret<T: Element, U: Element<Bits = T::Bits>>(v: Self::V<T>) -> Self::V<U> {
            reinterpret(v)
        }

        #[inline(always)]
        fn clamp_infinity<F: Float, I: Integer>(
            src: Self::V<F>,
            dst: Self::V<I>,
        ) -> Self::V<I> {
            clamp_infinity(src, dst)
        }
    };
}

macro_rules! matcher {
    // The narrowest width: convert a lane directly or widen toward the native width.
    ($N:literal, double = $D:literal) => {
        impl Engine for Const<$N> {
            type V<T: Element> = Vector<T, $N>;

            #[inline(always)]
            fn apply<K: Native>(k: K, v: Vector<K::From, $N>) -> Vector<K::To, $N> {
                if K::LANES == $N {
                    direct(k, v)
                } else if K::LANES > $N {
                    let wide: Vector<K::From, $D> = LoHi::new(v, v).join();
                    <Const<$D> as Engine>::apply(k, wide).split().lo
                } else {
                    Vector::from_array([k.scalar(v[0])])
                }
            }

            common!();
        }
    };
    // The widest width: no register is wider, so never duplicate.
    ($N:literal, half = $H:literal) => {
        impl Engine for Const<$N> {
            type V<T: Element> = Vector<T, $N>;

            #[inline(always)]
            fn apply<K: Native>(k: K, v: Vector<K::From, $N>) -> Vector<K::To, $N> {
                if K::LANES == $N {
                    direct(k, v)
                } else {
                    v.split()
                        .map(|x| <Const<$H> as Engine>::apply(k, x))
                        .join()
                }
            }

            common!();
        }
    };
    ($N:literal, half = $H:literal, double = $D:literal) => {
        impl Engine for Const<$N> {
            type V<T: Element> = Vector<T, $N>;

            #[inline(always)]
            fn apply<K: Native>(k: K, v: Vector<K::From, $N>) -> Vector<K::To, $N> {
                if K::LANES == $N {
                    direct(k, v)
                } else if K::LANES > $N {
                    let wide: Vector<K::From, $D> = LoHi::new(v, v).join();
                    <Const<$D> as Engine>::apply(k, wide).split().lo
                } else {
                    v.split()
                        .map(|x| <Const<$H> as Engine>::apply(k, x))
                        .join()
                }
            }

            common!();
        }
    };
}

matcher!(1, double = 2);
matcher!(2, half = 1, double = 4);
matcher!(4, half = 2, double = 8);
matcher!(8, half = 4, double = 16);
matcher!(16, half = 8, double = 32);
matcher!(32, half = 16, double = 64);
matcher!(64, half = 32);
