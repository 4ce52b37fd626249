/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Numeric conversions between vectors of the same lane count.
//!
//! Every pair of element types has a fixed route: a chain of primitive kernels and bit
//! reinterpretations written out in the table at the bottom of this file. The route is
//! generic over the [`Engine`], so the vector types and [`crate::reference::Reference`]
//! share a single definition.
//!
//! # Semantics
//!
//! * Integer to integer conversions match Rust's `as`.
//! * Integer to float conversions round to nearest. `i64 -> f32` and `u64 -> f32` go
//!   through `f64`, and conversions to a 16-bit float go through `f32`.
//! * Float to integer conversions truncate into a pivot integer (`i32`, `i64` or `u64`)
//!   with saturation and NaN mapped to zero, then convert that integer as above. Lanes
//!   that were infinite become the destination's `MAX` or `MIN`.
//! * Saturating conversions clamp to the destination range before any truncation. They
//!   agree with the plain conversion whenever the value is representable.

use half::{bf16, f16};

use crate::{
    Const, SupportedLaneCount, Vector,
    element::{Element, Integer},
    engine::{self, Engine},
    kernel::{Clamp, Kernel, Native, Step},
};

/// A conversion route from `Self` to `U`.
///
/// Implemented for every pair of [`Element`]s.
pub trait Route<U: Element>: Element {
    /// Convert with the semantics of [`SIMDCast`].
    fn cast<W: Engine>(v: W::V<Self>) -> W::V<U>;

    /// Convert with the semantics of [`SIMDSatCast`].
    fn sat_cast<W: Engine>(v: W::V<Self>) -> W::V<U>;
}

/// Perform a numeric cast on each lane.
///
/// This is meant to model Rust's numeric conversion with the "as" operator. See the module
/// documentation for where the two differ.
pub trait SIMDCast<T> {
    /// The vector type of the result.
    type Cast;

    /// Perform the cast.
    fn simd_cast(self) -> Self::Cast;
}

/// Perform a saturating numeric cast on each lane.
///
/// Values outside the range of the destination become its nearest bound.
pub trait SIMDSatCast<T> {
    /// The vector type of the result.
    type Cast;

    /// Perform the cast.
    fn simd_sat_cast(self) -> Self::Cast;
}

/// Reinterpret the bits of each lane as a type of the same width.
pub trait SIMDReinterpret<T> {
    /// The vector type of the result.
    type Cast;

    /// Perform the reinterpretation.
    fn reinterpret_simd(self) -> Self::Cast;
}

macro_rules! cast_impls {
    ($($N:literal),* $(,)?) => {
        $(
            impl<T, U> SIMDCast<U> for Vector<T, $N>
            where
                T: Route<U>,
                U: Element,
            {
                type Cast = Vector<U, $N>;

                #[inline(always)]
                fn simd_cast(self) -> Vector<U, $N> {
                    T::cast::<Const<$N>>(self)
                }
            }

            impl<T, U> SIMDSatCast<U> for Vector<T, $N>
            where
                T: Route<U>,
                U: Element,
            {
                type Cast = Vector<U, $N>;

                #[inline(always)]
                fn simd_sat_cast(self) -> Vector<U, $N> {
                    T::sat_cast::<Const<$N>>(self)
                }
            }
        )*
    };
}

cast_impls!(1, 2, 4, 8, 16, 32, 64);

impl<T, U, const N: usize> SIMDReinterpret<U> for Vector<T, N>
where
    T: Element,
    U: Element<Bits = T::Bits>,
    Const<N>: SupportedLaneCount,
{
    type Cast = Vector<U, N>;

    #[inline(always)]
    fn reinterpret_simd(self) -> Vector<U, N> {
        engine::reinterpret(self)
    }
}

impl<T: Element, const N: usize> Vector<T, N>
where
    Const<N>: SupportedLaneCount,
{
    /// Convert each lane to `U`. See [`SIMDCast`].
    #[inline(always)]
    pub fn cast<U>(self) -> <Self as SIMDCast<U>>::Cast
    where
        Self: SIMDCast<U>,
    {
        self.simd_cast()
    }

    /// Convert each lane to `U`, saturating at the bounds of `U`. See [`SIMDSatCast`].
    #[inline(always)]
    pub fn sat_cast<U>(self) -> <Self as SIMDSatCast<U>>::Cast
    where
        Self: SIMDSatCast<U>,
    {
        self.simd_sat_cast()
    }

    /// Reinterpret each lane as `U`. See [`SIMDReinterpret`].
    #[inline(always)]
    pub fn rcast<U>(self) -> Vector<U, N>
    where
        U: Element<Bits = T::Bits>,
    {
        self.reinterpret_simd()
    }
}

/// Convert each lane of `v` to `U`.
#[inline(always)]
pub fn cast<U, V: SIMDCast<U>>(v: V) -> V::Cast {
    v.simd_cast()
}

/// Convert each lane of `v` to `U`, saturating at the bounds of `U`.
#[inline(always)]
pub fn sat_cast<U, V: SIMDSatCast<U>>(v: V) -> V::Cast {
    v.simd_sat_cast()
}

/// Reinterpret each lane of `v` as `U`.
#[inline(always)]
pub fn rcast<U, V: SIMDReinterpret<U>>(v: V) -> V::Cast {
    v.reinterpret_simd()
}

////////////
// Routes //
////////////

/// Clamp `v` to the values that `U` can represent.
#[inline(always)]
fn saturate<W, T, U>(v: W::V<T>) -> W::V<T>
where
    W: Engine,
    T: Integer,
    U: Integer,
    Clamp<T>: Native + Kernel<From = T, To = T>,
{
    let k = Clamp::<T>::to_range_of::<U>();
    if k.is_identity() { v } else { W::apply(k, v) }
}

// `a -> b` applies the kernel for `Step<b>` on `a`, `a ~ b` reinterprets the bits.
macro_rules! chain {
    ($W:ident, $v:expr; $a:ident) => {
        $v
    };
    ($W:ident, $v:expr; $a:ident -> $b:ident $($rest:tt)*) => {
        chain!($W, $W::apply(<<$a as Step<$b>>::Kernel as Default>::default(), $v); $b $($rest)*)
    };
    ($W:ident, $v:expr; $a:ident ~ $b:ident $($rest:tt)*) => {
        chain!($W, $W::reinterpret::<$a, $b>($v); $b $($rest)*)
    };
}

macro_rules! route {
    (same $T:ident) => {
        impl Route<$T> for $T {
            #[inline(always)]
            fn cast<W: Engine>(v: W::V<$T>) -> W::V<$T> {
                v
            }

            #[inline(always)]
            fn sat_cast<W: Engine>(v: W::V<$T>) -> W::V<$T> {
                v
            }
        }
    };
    // Every value of the source has a nearest value in the destination.
    (plain $from:ident => $to:ident: $($chain:tt)*) => {
        impl Route<$to> for $from {
            #[inline(always)]
            fn cast<W: Engine>(v: W::V<$from>) -> W::V<$to> {
                chain!(W, v; $($chain)*)
            }

            #[inline(always)]
            fn sat_cast<W: Engine>(v: W::V<$from>) -> W::V<$to> {
                Self::cast::<W>(v)
            }
        }
    };
    (int $from:ident => $to:ident: $($chain:tt)*) => {
        impl Route<$to> for $from {
            #[inline(always)]
            fn cast<W: Engine>(v: W::V<$from>) -> W::V<$to> {
                chain!(W, v; $($chain)*)
            }

            #[inline(always)]
            fn sat_cast<W: Engine>(v: W::V<$from>) -> W::V<$to> {
                Self::cast::<W>(saturate::<W, $from, $to>(v))
            }
        }
    };
    // The first chain ends at the pivot integer, which the second chain starts from.
    (float $from:ident => $to:ident: ($($head:tt)*) ($pivot:ident $($tail:tt)*)) => {
        impl Route<$to> for $from {
            #[inline(always)]
            fn cast<W: Engine>(v: W::V<$from>) -> W::V<$to> {
                let pivot = chain!(W, v; $($head)*);
                let converted = chain!(W, pivot; $pivot $($tail)*);
                W::clamp_infinity::<$from, $to>(v, converted)
            }

            #[inline(always)]
            fn sat_cast<W: Engine>(v: W::V<$from>) -> W::V<$to> {
                let pivot = chain!(W, v; $($head)*);
                let pivot = saturate::<W, $pivot, $to>(pivot);
                chain!(W, pivot; $pivot $($tail)*)
            }
        }
    };
}

route!(same i8);
route!(same i16);
route!(same i32);
route!(same i64);
route!(same u8);
route!(same u16);
route!(same u32);
route!(same u64);
route!(same f16);
route!(same bf16);
route!(same f32);
route!(same f64);

// Signed integers.
route!(int i8 => i16: i8 -> i16);
route!(int i8 => i32: i8 -> i16 -> i32);
route!(int i8 => i64: i8 -> i16 -> i32 -> i64);
route!(int i8 => u8: i8 ~ u8);
route!(int i8 => u16: i8 -> i16 ~ u16);
route!(int i8 => u32: i8 -> i16 -> i32 ~ u32);
route!(int i8 => u64: i8 -> i16 -> i32 -> i64 ~ u64);

route!(int i16 => i8: i16 ~ u16 -> u8 ~ i8);
route!(int i16 => i32: i16 -> i32);
route!(int i16 => i64: i16 -> i32 -> i64);
route!(int i16 => u8: i16 ~ u16 -> u8);
route!(int i16 => u16: i16 ~ u16);
route!(int i16 => u32: i16 -> i32 ~ u32);
route!(int i16 => u64: i16 -> i32 -> i64 ~ u64);

route!(int i32 => i8: i32 ~ u32 -> u16 -> u8 ~ i8);
route!(int i32 => i16: i32 ~ u32 -> u16 ~ i16);
route!(int i32 => i64: i32 -> i64);
route!(int i32 => u8: i32 ~ u32 -> u16 -> u8);
route!(int i32 => u16: i32 ~ u32 -> u16);
route!(int i32 => u32: i32 ~ u32);
route!(int i32 => u64: i32 -> i64 ~ u64);

route!(int i64 => i8: i64 ~ u64 -> u32 -> u16 -> u8 ~ i8);
route!(int i64 => i16: i64 ~ u64 -> u32 -> u16 ~ i16);
route!(int i64 => i32: i64 ~ u64 -> u32 ~ i32);
route!(int i64 => u8: i64 ~ u64 -> u32 -> u16 -> u8);
route!(int i64 => u16: i64 ~ u64 -> u32 -> u16);
route!(int i64 => u32: i64 ~ u64 -> u32);
route!(int i64 => u64: i64 ~ u64);

// Unsigned integers.
route!(int u8 => i8: u8 ~ i8);
route!(int u8 => i16: u8 -> u16 ~ i16);
route!(int u8 => i32: u8 -> u16 -> u32 ~ i32);
route!(int u8 => i64: u8 -> u16 -> u32 -> u64 ~ i64);
route!(int u8 => u16: u8 -> u16);
route!(int u8 => u32: u8 -> u16 -> u32);
route!(int u8 => u64: u8 -> u16 -> u32 -> u64);

route!(int u16 => i8: u16 -> u8 ~ i8);
route!(int u16 => i16: u16 ~ i16);
route!(int u16 => i32: u16 -> u32 ~ i32);
route!(int u16 => i64: u16 -> u32 -> u64 ~ i64);
route!(int u16 => u8: u16 -> u8);
route!(int u16 => u32: u16 -> u32);
route!(int u16 => u64: u16 -> u32 -> u64);

route!(int u32 => i8: u32 -> u16 -> u8 ~ i8);
route!(int u32 => i16: u32 -> u16 ~ i16);
route!(int u32 => i32: u32 ~ i32);
route!(int u32 => i64: u32 -> u64 ~ i64);
route!(int u32 => u8: u32 -> u16 -> u8);
route!(int u32 => u16: u32 -> u16);
route!(int u32 => u64: u32 -> u64);

route!(int u64 => i8: u64 -> u32 -> u16 -> u8 ~ i8);
route!(int u64 => i16: u64 -> u32 -> u16 ~ i16);
route!(int u64 => i32: u64 -> u32 ~ i32);
route!(int u64 => i64: u64 ~ i64);
route!(int u64 => u8: u64 -> u32 -> u16 -> u8);
route!(int u64 => u16: u64 -> u32 -> u16);
route!(int u64 => u32: u64 -> u32);

// Integers to floats.
route!(plain i8 => f16: i8 -> i16 -> i32 -> f32 -> f16);
route!(plain i8 => bf16: i8 -> i16 -> i32 -> f32 -> bf16);
route!(plain i8 => f32: i8 -> i16 -> i32 -> f32);
route!(plain i8 => f64: i8 -> i16 -> i32 -> f64);

route!(plain i16 => f16: i16 -> i32 -> f32 -> f16);
route!(plain i16 => bf16: i16 -> i32 -> f32 -> bf16);
route!(plain i16 => f32: i16 -> i32 -> f32);
route!(plain i16 => f64: i16 -> i32 -> f64);

route!(plain i32 => f16: i32 -> f32 -> f16);
route!(plain i32 => bf16: i32 -> f32 -> bf16);
route!(plain i32 => f32: i32 -> f32);
route!(plain i32 => f64: i32 -> f64);

route!(plain i64 => f16: i64 -> f64 -> f32 -> f16);
route!(plain i64 => bf16: i64 -> f64 -> f32 -> bf16);
route!(plain i64 => f32: i64 -> f64 -> f32);
route!(plain i64 => f64: i64 -> f64);

route!(plain u8 => f16: u8 -> u16 -> u32 -> f32 -> f16);
route!(plain u8 => bf16: u8 -> u16 -> u32 -> f32 -> bf16);
route!(plain u8 => f32: u8 -> u16 -> u32 -> f32);
route!(plain u8 => f64: u8 -> u16 -> u32 -> f64);

route!(plain u16 => f16: u16 -> u32 -> f32 -> f16);
route!(plain u16 => bf16: u16 -> u32 -> f32 -> bf16);
route!(plain u16 => f32: u16 -> u32 -> f32);
route!(plain u16 => f64: u16 -> u32 -> f64);

route!(plain u32 => f16: u32 -> f32 -> f16);
route!(plain u32 => bf16: u32 -> f32 -> bf16);
route!(plain u32 => f32: u32 -> f32);
route!(plain u32 => f64: u32 -> f64);

route!(plain u64 => f16: u64 -> f64 -> f32 -> f16);
route!(plain u64 => bf16: u64 -> f64 -> f32 -> bf16);
route!(plain u64 => f32: u64 -> f64 -> f32);
route!(plain u64 => f64: u64 -> f64);

// Floats to floats.
route!(plain f16 => bf16: f16 -> f32 -> bf16);
route!(plain f16 => f32: f16 -> f32);
route!(plain f16 => f64: f16 -> f32 -> f64);

route!(plain bf16 => f16: bf16 -> f32 -> f16);
route!(plain bf16 => f32: bf16 -> f32);
route!(plain bf16 => f64: bf16 -> f32 -> f64);

route!(plain f32 => f16: f32 -> f16);
route!(plain f32 => bf16: f32 -> bf16);
route!(plain f32 => f64: f32 -> f64);

route!(plain f64 => f16: f64 -> f32 -> f16);
route!(plain f64 => bf16: f64 -> f32 -> bf16);
route!(plain f64 => f32: f64 -> f32);

// Floats to integers.
route!(float f32 => i8: (f32 -> i32) (i32 ~ u32 -> u16 -> u8 ~ i8));
route!(float f32 => i16: (f32 -> i32) (i32 ~ u32 -> u16 ~ i16));
route!(float f32 => i32: (f32 -> i32) (i32));
route!(float f32 => i64: (f32 -> f64 -> i64) (i64));
route!(float f32 => u8: (f32 -> i32) (i32 ~ u32 -> u16 -> u8));
route!(float f32 => u16: (f32 -> i32) (i32 ~ u32 -> u16));
route!(float f32 => u32: (f32 -> f64 -> i64) (i64 ~ u64 -> u32));
route!(float f32 => u64: (f32 -> f64 -> u64) (u64));

route!(float f64 => i8: (f64 -> i64) (i64 ~ u64 -> u32 -> u16 -> u8 ~ i8));
route!(float f64 => i16: (f64 -> i64) (i64 ~ u64 -> u32 -> u16 ~ i16));
route!(float f64 => i32: (f64 -> i64) (i64 ~ u64 -> u32 ~ i32));
route!(float f64 => i64: (f64 -> i64) (i64));
route!(float f64 => u8: (f64 -> i64) (i64 ~ u64 -> u32 -> u16 -> u8));
route!(float f64 => u16: (f64 -> i64) (i64 ~ u64 -> u32 -> u16));
route!(float f64 => u32: (f64 -> i64) (i64 ~ u64 -> u32));
route!(float f64 => u64: (f64 -> u64) (u64));

route!(float f16 => i8: (f16 -> f32 -> i32) (i32 ~ u32 -> u16 -> u8 ~ i8));
route!(float f16 => i16: (f16 -> f32 -> i32) (i32 ~ u32 -> u16 ~ i16));
route!(float f16 => i32: (f16 -> f32 -> i32) (i32));
route!(float f16 => i64: (f16 -> f32 -> f64 -> i64) (i64));
route!(float f16 => u8: (f16 -> f32 -> i32) (i32 ~ u32 -> u16 -> u8));
route!(float f16 => u16: (f16 -> f32 -> i32) (i32 ~ u32 -> u16));
route!(float f16 => u32: (f16 -> f32 -> f64 -> i64) (i64 ~ u64 -> u32));
route!(float f16 => u64: (f16 -> f32 -> f64 -> u64) (u64));

route!(float bf16 => i8: (bf16 -> f32 -> i32) (i32 ~ u32 -> u16 -> u8 ~ i8));
route!(float bf16 => i16: (bf16 -> f32 -> i32) (i32 ~ u32 -> u16 ~ i16));
route!(float bf16 => i32: (bf16 -> f32 -> i32) (i32));
route!(float bf16 => i64: (bf16 -> f32 -> f64 -> i64) (i64));
route!(float bf16 => u8: (bf16 -> f32 -> i32) (i32 ~ u32 -> u16 -> u8));
route!(float bf16 => u16: (bf16 -> f32 -> i32) (i32 ~ u32 -> u16));
route!(float bf16 => u32: (bf16 -> f32 -> f64 -> i64) (i64 ~ u64 -> u32));
route!(float bf16 => u64: (bf16 -> f32 -> f64 -> u64) (u64));

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn unsigned_bytes() {
        let mut lanes = [0u8; 16];
        lanes[1] = 255;
        for (i, lane) in lanes.iter_mut().enumerate().skip(2) {
            *lane = i as u8 + 1;
        }
        let v = Vector::<u8, 16>::from_array(lanes);

        let plain = v.cast::<i8>();
        assert_eq!(plain[1], -1);
        assert_eq!(plain[15], 16);

        let saturated = v.sat_cast::<i8>();
        assert_eq!(saturated[1], 127);
        assert_eq!(saturated[15], 16);

        let floats = v.cast::<f32>();
        assert_eq!(floats[1], 255.0);
        assert_eq!(floats[2], 3.0);
    }

    #[test]
    fn signed_extremes() {
        let v = Vector::<i32, 4>::from_array([i32::MIN, i32::MAX, 3, 4]);

        let floats = v.cast::<f32>();
        assert!(floats.to_array().iter().all(|x| x.is_finite()));
        assert_eq!(floats[0], -2147483648.0);

        let unsigned = v.sat_cast::<u32>();
        assert_eq!(unsigned.to_array(), [0, i32::MAX as u32, 3, 4]);
    }

    #[test]
    fn integer_casts_match_as() {
        let v = Vector::<i16, 8>::from_array([-1, 0, 1, 255, 256, i16::MIN, i16::MAX, -300]);
        assert_eq!(v.cast::<u8>().to_array(), v.to_array().map(|x| x as u8));
        assert_eq!(v.cast::<i8>().to_array(), v.to_array().map(|x| x as i8));
        assert_eq!(v.cast::<u64>().to_array(), v.to_array().map(|x| x as u64));
        assert_eq!(v.cast::<i32>().to_array(), v.to_array().map(i32::from));

        let v = Vector::<u64, 4>::from_array([u64::MAX, 1 << 63, 0x1_0000_0001, 7]);
        assert_eq!(v.cast::<i16>().to_array(), v.to_array().map(|x| x as i16));
        assert_eq!(v.cast::<i64>().to_array(), v.to_array().map(|x| x as i64));
    }

    #[test]
    fn saturating_integer_casts_clamp() {
        let v = Vector::<i64, 4>::from_array([i64::MIN, -1, 70000, i64::MAX]);
        assert_eq!(v.sat_cast::<u16>().to_array(), [0, 0, u16::MAX, u16::MAX]);
        assert_eq!(v.sat_cast::<i8>().to_array(), [i8::MIN, -1, i8::MAX, i8::MAX]);
        assert_eq!(v.sat_cast::<u64>().to_array(), [0, 0, 70000, i64::MAX as u64]);

        let v = Vector::<u32, 2>::from_array([u32::MAX, 12]);
        assert_eq!(v.sat_cast::<i32>().to_array(), [i32::MAX, 12]);
        assert_eq!(v.sat_cast::<u64>().to_array(), [u32::MAX as u64, 12]);
    }

    #[test]
    fn saturate_clamps_only_narrower_ranges() {
        use crate::reference::Reference;

        assert_eq!(saturate::<Reference, i32, u8>(-7), 0);
        assert_eq!(saturate::<Reference, i32, u8>(300), 255);
        assert_eq!(saturate::<Reference, i32, i64>(i32::MIN), i32::MIN);
        assert_eq!(saturate::<Reference, u64, i64>(u64::MAX), i64::MAX as u64);

        let v = Vector::<i16, 8>::from_array([-300, -1, 0, 1, 127, 128, i16::MIN, i16::MAX]);
        let clamped = saturate::<Const<8>, i16, i8>(v);
        assert_eq!(clamped.to_array(), [-128, -1, 0, 1, 127, 127, -128, 127]);
    }

    #[test]
    fn float_casts_pivot_then_clamp_infinities() {
        let v = Vector::<f32, 8>::from_array([
            f32::INFINITY,
            f32::NEG_INFINITY,
            f32::NAN,
            -2.9,
            300.0,
            1e20,
            0.5,
            -0.0,
        ]);

        let plain = v.cast::<u8>();
        assert_eq!(plain.to_array(), [u8::MAX, 0, 0, 254, 44, 255, 0, 0]);

        let saturated = v.sat_cast::<u8>();
        assert_eq!(saturated.to_array(), [u8::MAX, 0, 0, 0, 255, 255, 0, 0]);

        let wide = v.cast::<i64>();
        assert_eq!(wide[0], i64::MAX);
        assert_eq!(wide[1], i64::MIN);
        assert_eq!(wide[3], -2);
        assert_eq!(wide[5], i64::MAX);

        let unsigned = v.sat_cast::<u32>();
        assert_eq!(unsigned[4], 300);
        assert_eq!(unsigned[5], u32::MAX);
    }

    #[test]
    fn floats_round_through_f32() {
        let v = Vector::<f64, 4>::from_array([1.0, 65504.0, 1e10, f64::NAN]);
        let h = v.cast::<f16>();
        assert_eq!(h[0], f16::ONE);
        assert_eq!(h[1], f16::MAX);
        assert_eq!(h[2], f16::INFINITY);
        assert!(h[3].is_nan());

        let b = h.cast::<bf16>();
        assert_eq!(b[0], bf16::ONE);
        assert_eq!(b[2], bf16::INFINITY);

        let back = b.cast::<f64>();
        assert_eq!(back[0], 1.0);
        assert_eq!(back[1], 65536.0);
    }

    #[test]
    fn unsigned_to_float_is_exact_when_representable() {
        let v = Vector::<u32, 4>::from_array([u32::MAX, 1 << 31, (1 << 31) - 1, 0]);
        assert_eq!(v.cast::<f64>().to_array(), v.to_array().map(f64::from));

        let v = Vector::<u64, 2>::from_array([u64::MAX, 1 << 63]);
        assert_eq!(v.cast::<f64>().to_array(), v.to_array().map(|x| x as f64));
    }

    /// Values that are not representable in the destination exercise the rounding of
    /// every lane count, including the native widths of the active backend.
    #[test]
    fn unsigned_to_float_rounds_once() {
        fn check<const N: usize>(seed: u64)
        where
            Const<N>: SupportedLaneCount,
            Vector<u32, N>: SIMDCast<f32, Cast = Vector<f32, N>>
                + SIMDCast<f64, Cast = Vector<f64, N>>,
            Vector<u64, N>: SIMDCast<f64, Cast = Vector<f64, N>>,
        {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut words: Vec<u32> = vec![0xc000_0081, 3_403_950_747, 0xffff_ff7f, 0x8000_0081];
            let mut quads: Vec<u64> =
                vec![15_365_004_012_350_829_584, (1 << 63) + 1025, u64::MAX - 1024];
            words.extend((0..4 * N).map(|_| rng.random::<u32>() | 0x8000_0001));
            quads.extend((0..4 * N).map(|_| rng.random::<u64>() | 0x8000_0000_0000_0001));

            for chunk in words.chunks(N) {
                let v = Vector::<u32, N>::load_first(chunk);
                assert_eq!(
                    v.cast::<f32>().to_array().map(f32::to_bits),
                    v.to_array().map(|x| (x as f32).to_bits()),
                    "{v:?}",
                );
                assert_eq!(v.cast::<f64>().to_array(), v.to_array().map(f64::from));
            }
            for chunk in quads.chunks(N) {
                let v = Vector::<u64, N>::load_first(chunk);
                assert_eq!(
                    v.cast::<f64>().to_array().map(f64::to_bits),
                    v.to_array().map(|x| (x as f64).to_bits()),
                    "{v:?}",
                );
            }
        }

        check::<1>(0x5e04_91c2_7ab3_d816);
        check::<2>(0x0b7d_e35a_c169_42f8);
        check::<4>(0xa6c1_28f4_7d0e_953b);
        check::<8>(0x3f92_b06d_e4a1_58c7);
        check::<16>(0xd4e8_7a13_096c_bf25);
        check::<32>(0x62b5_c4f0_a8d3_1e97);
        check::<64>(0x9c17_5e82_f63b_04ad);
    }

    #[test]
    fn reinterpretation_keeps_bits() {
        let v = Vector::<f32, 4>::from_array([1.0, -0.0, f32::INFINITY, 2.5]);
        let bits = v.rcast::<u32>();
        assert_eq!(bits.to_array(), v.to_array().map(f32::to_bits));
        assert_eq!(rcast::<f32, _>(bits), v);

        let h = Vector::<f16, 8>::splat(f16::ONE);
        assert_eq!(h.rcast::<i16>(), Vector::splat(0x3c00));
    }

    #[test]
    fn free_functions_forward() {
        let v = Vector::<i8, 2>::from_array([-128, 5]);
        assert_eq!(cast::<u8, _>(v).to_array(), [128, 5]);
        assert_eq!(sat_cast::<u8, _>(v).to_array(), [0, 5]);
        assert_eq!(cast::<i8, _>(v), v);
    }

    /////////////////////////
    // Reference Agreement //
    /////////////////////////

    use crate::test_utils::test_cast;

    test_cast!(u8 => i8, 16, 0x3a1c_55e0_9d42_7b10);
    test_cast!(u8 => f32, 16, 0x8e27_c1d4_06b9_f3a5);
    test_cast!(u8 => i64, 8, 0x51f0_2e6b_a7c3_d984);

    test_cast!(i8 => i16, 32, 0xc46a_9b03_7e25_18df);
    test_cast!(i8 => u64, 4, 0x2d97_f6a1_4c08_b35e);
    test_cast!(i8 => f64, 16, 0x9b3e_07c5_d2a6_41f8);

    test_cast!(i16 => u8, 16, 0x6f5d_3a28_e1b4_c907);
    test_cast!(i16 => i32, 8, 0x0c82_d69f_5b13_ae74);
    test_cast!(i16 => f32, 64, 0xe7a4_1b6c_83f9_2d50);

    test_cast!(u16 => u32, 16, 0x4458_bc07_f1e3_962a);
    test_cast!(u16 => i8, 32, 0xb1c9_6e2d_0a75_f384);
    test_cast!(u16 => f16, 8, 0x7a30_95db_4ce1_086f);

    test_cast!(i32 => f32, 4, 0x23e8_7f41_b90c_d65a);
    test_cast!(i32 => f64, 8, 0xd0b6_48a9_2f7e_1c35);
    test_cast!(i32 => u32, 4, 0x95f2_0c6e_d3a8_471b);
    test_cast!(i32 => i8, 16, 0x3e71_d9b4_0826_fa5c);
    test_cast!(i32 => i64, 1, 0xf84c_2563_a1de_907b);

    test_cast!(u32 => f32, 8, 0x1b0d_e497_6c3f_a258);
    test_cast!(u32 => f64, 4, 0x6ca9_31f5_e07b_84d2);
    test_cast!(u32 => i16, 8, 0xa257_8e0c_4bd6_13f9);
    test_cast!(u32 => u64, 16, 0x0f64_b3a1_9c57_e82d);

    test_cast!(i64 => u32, 8, 0x87d3_5c2e_f916_0ab4);
    test_cast!(i64 => f64, 2, 0x5a0e_c73b_24f8_d691);
    test_cast!(i64 => f32, 4, 0xcb41_9f06_7d2e_a358);
    test_cast!(i64 => i16, 64, 0x3296_e0d4_b57a_1c8f);

    test_cast!(u64 => f64, 8, 0xe15b_7a39_0cd4_f862);
    test_cast!(u64 => f32, 2, 0x48ce_1f95_a3b0_27d6);
    test_cast!(u64 => u8, 4, 0x9da7_2680_5ef1_c34b);
    test_cast!(u64 => i64, 1, 0x1703_f8b2_c96e_5da4);

    test_cast!(f32 => i32, 16, 0x6e84_a51d_3f29_c07b);
    test_cast!(f32 => u8, 32, 0xb27f_0d63_e8a1_594c);
    test_cast!(f32 => i16, 8, 0x035c_9be7_41d8_6fa2);
    test_cast!(f32 => u32, 8, 0xd9e1_6a40_b73c_25f8);
    test_cast!(f32 => i64, 4, 0x7c46_e2b9_0d15_a83f);
    test_cast!(f32 => u64, 2, 0x2af8_5d17_c9e3_604b);
    test_cast!(f32 => f64, 8, 0xf031_b8c6_2a5d_974e);
    test_cast!(f32 => f16, 16, 0x84b2_7ef9_163a_dc05);
    test_cast!(f32 => bf16, 16, 0x5d6f_03a8_e4c1_b729);

    test_cast!(f64 => f32, 8, 0xa4e9_c250_7b3f_18d6);
    test_cast!(f64 => i64, 8, 0x196d_4fb3_d80a_e572);
    test_cast!(f64 => u64, 4, 0xc8a3_e61f_05b7_2d94);
    test_cast!(f64 => i8, 2, 0x6b25_9d07_f4e8_a13c);
    test_cast!(f64 => u32, 16, 0x30fc_a864_1d5b_e927);
    test_cast!(f64 => f16, 4, 0xe758_14ad_9c26_0bf3);

    test_cast!(f16 => f32, 8, 0x0d1a_76e3_b5c8_4f92);
    test_cast!(f16 => i32, 16, 0x92b4_e85f_603d_c7a1);
    test_cast!(f16 => u8, 1, 0x4f37_c0a9_2e61_db58);
    test_cast!(f16 => bf16, 8, 0xb6e0_3d94_a7f2_108c);

    test_cast!(bf16 => f32, 16, 0x28c5_f1b7_94a0_6e3d);
    test_cast!(bf16 => f64, 4, 0xdf92_5a06_c3e8_b417);
    test_cast!(bf16 => u64, 8, 0x7108_e4cb_5f39_a26d);
    test_cast!(bf16 => f16, 64, 0xa35e_b82f_016c_d994);
}
