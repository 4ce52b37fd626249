/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! The primitive lane-wise conversions the cast engine is built from.
//!
//! Each kernel has a scalar definition here, which is the ground truth. Backends attach a
//! native implementation by implementing [`Native`] for every kernel, either mapping it to
//! intrinsics for one register shape or declaring it unavailable with `no_native!`.
//! Selecting between the native and the scalar definition for a given vector width is the
//! job of the matcher in `engine.rs`.

use std::marker::PhantomData;

use half::{bf16, f16};

use crate::{
    element::{Element, Integer},
    reference,
};

/// A lane-wise conversion from `From` to `To`.
pub trait Kernel: Copy {
    type From: Element;
    type To: Element;

    /// Convert one lane.
    fn scalar(self, x: Self::From) -> Self::To;
}

/// The active backend's implementation of a [`Kernel`].
///
/// When `LANES` is non-zero, `Src` must be `Vector<Self::From, LANES>` and `Dst` must be
/// `Vector<Self::To, LANES>`, and `native` must agree with [`Kernel::scalar`] on every
/// lane.
pub trait Native: Kernel {
    /// Lanes converted by one call to `native`. Zero if the backend has no instruction.
    const LANES: usize;

    type Src: Copy;
    type Dst: Copy;

    fn native(self, src: Self::Src) -> Self::Dst;
}

/// Declare kernels for which the active backend has no native implementation.
macro_rules! no_native {
    ($($K:ty),* $(,)?) => {
        $(
            impl $crate::kernel::Native for $K {
                const LANES: usize = 0;
                type Src = ();
                type Dst = ();

                #[inline(always)]
                fn native(self, _: ()) {}
            }
        )*
    };
}

/// Map a kernel onto a native implementation converting `$lanes` lanes at once.
///
/// The body usually invokes intrinsics. It is the invoker's responsibility to gate the
/// invocation on the `target_feature`s the intrinsics require, so a missing feature is a
/// compile-time error rather than an illegal instruction.
macro_rules! native {
    ($K:ty, $lanes:literal, fn($k:ident, $x:ident: $Src:ty) -> $Dst:ty $body:block) => {
        impl $crate::kernel::Native for $K {
            const LANES: usize = $lanes;
            type Src = $Src;
            type Dst = $Dst;

            #[inline(always)]
            #[allow(unused_unsafe, unused_variables)]
            fn native(self, $x: $Src) -> $Dst {
                let $k = self;
                $body
            }
        }
    };
}

pub(crate) use native;
pub(crate) use no_native;

/// Every kernel type, for backends that implement none of them natively.
macro_rules! all_kernels {
    ($mac:ident) => {
        $mac!(
            $crate::kernel::Widen<i8, i16>,
            $crate::kernel::Widen<i16, i32>,
            $crate::kernel::Widen<i32, i64>,
            $crate::kernel::Widen<u8, u16>,
            $crate::kernel::Widen<u16, u32>,
            $crate::kernel::Widen<u32, u64>,
            $crate::kernel::Narrow<u16, u8>,
            $crate::kernel::Narrow<u32, u16>,
            $crate::kernel::Narrow<u64, u32>,
            $crate::kernel::Clamp<i8>,
            $crate::kernel::Clamp<i16>,
            $crate::kernel::Clamp<i32>,
            $crate::kernel::Clamp<i64>,
            $crate::kernel::Clamp<u8>,
            $crate::kernel::Clamp<u16>,
            $crate::kernel::Clamp<u32>,
            $crate::kernel::Clamp<u64>,
            $crate::kernel::IntToFloat<i32, f32>,
            $crate::kernel::IntToFloat<i32, f64>,
            $crate::kernel::IntToFloat<i64, f64>,
            $crate::kernel::UnsignedToFloat<u32, f32>,
            $crate::kernel::UnsignedToFloat<u32, f64>,
            $crate::kernel::UnsignedToFloat<u64, f64>,
            $crate::kernel::FloatToInt<f32, i32>,
            $crate::kernel::FloatToInt<f64, i64>,
            $crate::kernel::FloatToInt<f64, u64>,
            $crate::kernel::Promote,
            $crate::kernel::Demote,
            $crate::kernel::HalfToF32<half::f16>,
            $crate::kernel::HalfToF32<half::bf16>,
            $crate::kernel::F32ToHalf<half::f16>,
            $crate::kernel::F32ToHalf<half::bf16>,
        );
    };
}

#[allow(unused_imports)]
pub(crate) use all_kernels;

/// A single hop of a conversion route: the canonical kernel taking `Self` to `To`.
pub trait Step<To: Element>: Element {
    type Kernel: Native<From = Self, To = To> + Default;
}

macro_rules! kernel_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name<T, U>(PhantomData<(T, U)>);
    };
}

kernel_type!(
    /// Sign or zero extension to the integer of twice the width.
    Widen
);

kernel_type!(
    /// Truncation to the unsigned integer of half the width.
    Narrow
);

kernel_type!(
    /// Signed integer to float conversion with round-to-nearest.
    IntToFloat
);

kernel_type!(
    /// Unsigned integer to float conversion with round-to-nearest.
    ///
    /// Backends without an unsigned instruction split each lane into parts that convert
    /// exactly through the signed path, so the recombining add is the only rounding.
    UnsignedToFloat
);

kernel_type!(
    /// Float to integer conversion truncating toward zero. Out-of-range values saturate
    /// and NaN becomes zero.
    FloatToInt
);

macro_rules! step {
    ($kernel:ident, $($from:ty => $to:ty),* $(,)?) => {
        $(
            impl Kernel for $kernel<$from, $to> {
                type From = $from;
                type To = $to;

                #[inline(always)]
                fn scalar(self, x: $from) -> $to {
                    x as $to
                }
            }

            impl Step<$to> for $from {
                type Kernel = $kernel<$from, $to>;
            }
        )*
    };
}

step!(Widen, i8 => i16, i16 => i32, i32 => i64, u8 => u16, u16 => u32, u32 => u64);
step!(Narrow, u16 => u8, u32 => u16, u64 => u32);
step!(IntToFloat, i32 => f32, i32 => f64, i64 => f64);
step!(UnsignedToFloat, u32 => f32, u32 => f64, u64 => f64);
step!(FloatToInt, f32 => i32, f64 => i64, f64 => u64);

/// Round-to-nearest conversion from `f64` to `f32`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Demote;

/// Widening conversion from `f32` to `f64`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Promote;

impl Kernel for Promote {
    type From = f32;
    type To = f64;

    #[inline(always)]
    fn scalar(self, x: f32) -> f64 {
        x as f64
    }
}

impl Step<f64> for f32 {
    type Kernel = Promote;
}

impl Kernel for Demote {
    type From = f64;
    type To = f32;

    #[inline(always)]
    fn scalar(self, x: f64) -> f32 {
        x as f32
    }
}

impl Step<f32> for f64 {
    type Kernel = Demote;
}

/// Exact conversion from a 16-bit float to `f32`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HalfToF32<H>(PhantomData<H>);

/// Round-to-nearest-even conversion from `f32` to a 16-bit float.
#[derive(Debug, Clone, Copy, Default)]
pub struct F32ToHalf<H>(PhantomData<H>);

macro_rules! half_steps {
    ($H:ty, $to_f32:path, $from_f32:path) => {
        impl Kernel for HalfToF32<$H> {
            type From = $H;
            type To = f32;

            #[inline(always)]
            fn scalar(self, x: $H) -> f32 {
                $to_f32(x)
            }
        }

        impl Step<f32> for $H {
            type Kernel = HalfToF32<$H>;
        }

        impl Kernel for F32ToHalf<$H> {
            type From = f32;
            type To = $H;

            #[inline(always)]
            fn scalar(self, x: f32) -> $H {
                $from_f32(x)
            }
        }

        impl Step<$H> for f32 {
            type Kernel = F32ToHalf<$H>;
        }
    };
}

half_steps!(f16, reference::cast_f16_to_f32, reference::cast_f32_to_f16);
half_steps!(bf16, reference::cast_bf16_to_f32, reference::cast_f32_to_bf16);

/// Clamp every lane to `[lo, hi]`.
#[derive(Debug, Clone, Copy)]
pub struct Clamp<T> {
    pub(crate) lo: T,
    pub(crate) hi: T,
}

impl<T: Integer> Clamp<T> {
    /// A clamp to the values of `T` that `U` can also represent.
    pub(crate) fn to_range_of<U: Integer>() -> Self {
        let (lo, hi) = T::range_of::<U>();
        Self { lo, hi }
    }

    /// Return `true` if clamping can never change a value.
    pub(crate) fn is_identity(&self) -> bool {
        self.lo == T::MIN && self.hi == T::MAX
    }
}

impl<T: Integer> Kernel for Clamp<T> {
    type From = T;
    type To = T;

    #[inline(always)]
    fn scalar(self, x: T) -> T {
        x.clamp(self.lo, self.hi)
    }
}
