/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Scalar element kinds that may populate a [`crate::Vector`].

use std::fmt::Debug;

use half::{bf16, f16};

mod sealed {
    pub trait Sealed {}
}

/// The numeric family of an [`Element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Two's complement signed integers.
    Signed,
    /// Unsigned integers.
    Unsigned,
    /// IEEE `binary32` and `binary64`.
    Float,
    /// The software 16-bit floats [`f16`] and [`bf16`].
    Half,
}

/// A scalar type usable as a lane of a [`crate::Vector`].
///
/// This trait is sealed. The implementations are the eight fixed-width integers, `f32`,
/// `f64`, [`half::f16`] and [`half::bf16`].
pub trait Element:
    sealed::Sealed + bytemuck::Pod + Default + PartialEq + Debug + Send + Sync
{
    /// The numeric family of this type.
    const KIND: Kind;

    /// The number of bits in one lane.
    const BITS: u32;

    /// The smallest finite value.
    const MIN: Self;

    /// The largest finite value.
    const MAX: Self;

    /// The additive identity. Also the value used for zero-filling.
    const ZERO: Self;

    /// The unsigned integer with the same width.
    ///
    /// Two elements can be reinterpreted as one another exactly when their `Bits` agree.
    type Bits: Integer<Bits = Self::Bits>;

    /// Byte-width class used to derive the alignment of vectors of this element.
    type Width: ByteWidth;
}

/// Integral [`Element`]s.
pub trait Integer: Element + Ord {
    /// Losslessly widen to `i128`.
    fn to_i128(self) -> i128;

    /// Keep the low `Self::BITS` bits of `x`.
    fn from_i128_wrapping(x: i128) -> Self;

    /// Return the interval `[lo, hi]`, expressed in `Self`, of values that are also
    /// representable by `U`.
    fn range_of<U: Integer>() -> (Self, Self) {
        let lo = Self::MIN.to_i128().max(U::MIN.to_i128());
        let hi = Self::MAX.to_i128().min(U::MAX.to_i128());
        (Self::from_i128_wrapping(lo), Self::from_i128_wrapping(hi))
    }
}

/// Floating point [`Element`]s.
pub trait Float: Element {
    /// Return `true` if `self` is positive infinity.
    fn is_pos_infinity(self) -> bool;

    /// Return `true` if `self` is negative infinity.
    fn is_neg_infinity(self) -> bool;
}

macro_rules! integer {
    ($T:ty, $kind:ident, $bits:ty, $width:ty) => {
        impl sealed::Sealed for $T {}

        impl Element for $T {
            const KIND: Kind = Kind::$kind;
            const BITS: u32 = <$T>::BITS;
            const MIN: Self = <$T>::MIN;
            const MAX: Self = <$T>::MAX;
            const ZERO: Self = 0;
            type Bits = $bits;
            type Width = $width;
        }

        impl Integer for $T {
            #[inline(always)]
            fn to_i128(self) -> i128 {
                self as i128
            }

            #[inline(always)]
            fn from_i128_wrapping(x: i128) -> Self {
                x as $T
            }
        }
    };
}

integer!(i8, Signed, u8, W1);
integer!(i16, Signed, u16, W2);
integer!(i32, Signed, u32, W4);
integer!(i64, Signed, u64, W8);
integer!(u8, Unsigned, u8, W1);
integer!(u16, Unsigned, u16, W2);
integer!(u32, Unsigned, u32, W4);
integer!(u64, Unsigned, u64, W8);

macro_rules! float {
    ($T:ty, $kind:ident, $bits:ty, $width:ty) => {
        impl sealed::Sealed for $T {}

        impl Element for $T {
            const KIND: Kind = Kind::$kind;
            const BITS: u32 = <$bits>::BITS;
            const MIN: Self = <$T>::MIN;
            const MAX: Self = <$T>::MAX;
            const ZERO: Self = <$T as Zero>::ZERO;
            type Bits = $bits;
            type Width = $width;
        }

        impl Float for $T {
            #[inline(always)]
            fn is_pos_infinity(self) -> bool {
                self == <$T>::INFINITY
            }

            #[inline(always)]
            fn is_neg_infinity(self) -> bool {
                self == <$T>::NEG_INFINITY
            }
        }
    };
}

trait Zero {
    const ZERO: Self;
}

impl Zero for f32 {
    const ZERO: Self = 0.0;
}

impl Zero for f64 {
    const ZERO: Self = 0.0;
}

impl Zero for f16 {
    const ZERO: Self = f16::ZERO;
}

impl Zero for bf16 {
    const ZERO: Self = bf16::ZERO;
}

float!(f32, Float, u32, W4);
float!(f64, Float, u64, W8);
float!(f16, Half, u16, W2);
float!(bf16, Half, u16, W2);

///////////////
// Alignment //
///////////////

macro_rules! align_marker {
    ($($name:ident = $n:literal),* $(,)?) => {
        $(
            #[doc = concat!("Zero-sized marker with an alignment of ", stringify!($n), " bytes.")]
            #[doc(hidden)]
            #[derive(Debug, Default, Clone, Copy)]
            #[repr(align($n))]
            pub struct $name;
        )*
    };
}

align_marker!(
    A1 = 1,
    A2 = 2,
    A4 = 4,
    A8 = 8,
    A16 = 16,
    A32 = 32,
    A64 = 64,
    A128 = 128,
    A256 = 256,
    A512 = 512,
);

/// Requirements on the zero-sized alignment markers.
pub trait Marker: Debug + Default + Copy + Send + Sync + 'static {}

impl<T> Marker for T where T: Debug + Default + Copy + Send + Sync + 'static {}

/// Maps a lane count onto an alignment marker for an element of a fixed byte width.
///
/// The marker for `XN` has alignment `N * size_of::<T>()`.
pub trait ByteWidth: sealed::Sealed {
    type X1: Marker;
    type X2: Marker;
    type X4: Marker;
    type X8: Marker;
    type X16: Marker;
    type X32: Marker;
    type X64: Marker;
}

macro_rules! byte_width {
    ($name:ident, $bytes:literal, [$x1:ident, $x2:ident, $x4:ident, $x8:ident, $x16:ident, $x32:ident, $x64:ident]) => {
        #[doc = concat!("Width class of ", stringify!($bytes), "-byte elements.")]
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl sealed::Sealed for $name {}

        impl ByteWidth for $name {
            type X1 = $x1;
            type X2 = $x2;
            type X4 = $x4;
            type X8 = $x8;
            type X16 = $x16;
            type X32 = $x32;
            type X64 = $x64;
        }
    };
}

byte_width!(W1, 1, [A1, A2, A4, A8, A16, A32, A64]);
byte_width!(W2, 2, [A2, A4, A8, A16, A32, A64, A128]);
byte_width!(W4, 4, [A4, A8, A16, A32, A64, A128, A256]);
byte_width!(W8, 8, [A8, A16, A32, A64, A128, A256, A512]);
