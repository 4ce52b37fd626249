/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Scalar ground truth for the cast engine.
//!
//! [`Reference`] runs the same conversion routes as the vector types, one lane at a time
//! and using only the scalar definition of every kernel. Every backend must agree with it
//! bit for bit, with the exception of NaN payloads.

use half::{bf16, f16};

use crate::{
    cast::Route,
    element::{Element, Float, Integer},
    engine::Engine,
    kernel::{Kernel, Native},
};

/// An [`Engine`] over single lanes that never uses native instructions.
#[derive(Debug, Clone, Copy)]
pub struct Reference;

impl Engine for Reference {
    type V<T: Element> = T;

    #[inline(always)]
    fn apply<K: Native>(k: K, v: K::From) -> K::To {
        k.scalar(v)
    }

    #[inline(always)]
    fn reinterpret<T: Element, U: Element<Bits = T::Bits>>(v: T) -> U {
        bytemuck::cast(v)
    }

    #[inline(always)]
    fn clamp_infinity<F: Float, I: Integer>(src: F, dst: I) -> I {
        if src.is_pos_infinity() {
            I::MAX
        } else if src.is_neg_infinity() {
            I::MIN
        } else {
            dst
        }
    }
}

/// Convert one lane as [`crate::SIMDCast`] would.
#[inline(always)]
pub fn reference_cast<T, U>(x: T) -> U
where
    T: Route<U>,
    U: Element,
{
    T::cast::<Reference>(x)
}

/// Convert one lane as [`crate::SIMDSatCast`] would.
#[inline(always)]
pub fn reference_sat_cast<T, U>(x: T) -> U
where
    T: Route<U>,
    U: Element,
{
    T::sat_cast::<Reference>(x)
}

/////////////////
// Half floats //
/////////////////

/// Perform a Miri-safe cast from `f16` to `f32`.
///
/// This has the same semantics as `f16::to_f32`, but will not use an intrinsic if running
/// under Miri.
#[inline(always)]
pub fn cast_f16_to_f32(x: f16) -> f32 {
    #[cfg(miri)]
    {
        x.to_f32_const()
    }
    #[cfg(not(miri))]
    {
        x.to_f32()
    }
}

/// Perform a Miri-safe cast from `f32` to `f16`, rounding to nearest even.
///
/// This has the same semantics as `f16::from_f32`, but will not use an intrinsic if
/// running under Miri.
#[inline(always)]
pub fn cast_f32_to_f16(x: f32) -> f16 {
    #[cfg(miri)]
    {
        f16::from_f32_const(x)
    }
    #[cfg(not(miri))]
    {
        f16::from_f32(x)
    }
}

/// Exact conversion from `bf16` to `f32`.
#[inline(always)]
pub fn cast_bf16_to_f32(x: bf16) -> f32 {
    x.to_f32()
}

/// Conversion from `f32` to `bf16`, rounding to nearest even.
#[inline(always)]
pub fn cast_f32_to_bf16(x: f32) -> bf16 {
    bf16::from_f32(x)
}
