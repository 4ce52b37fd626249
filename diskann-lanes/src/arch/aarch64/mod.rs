/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use std::arch::aarch64::*;

use half::{bf16, f16};

use super::{Level, SCALAR};
use crate::{Const, SupportedLaneCount, Vector, element::Element, helpers};

mod kernels;

// The 16-bit floats travel in integer registers. Stable Rust has no `float16x8_t`.
helpers::native_register!(
    i8, 16 => int8x16_t;
    i16, 8 => int16x8_t;
    i32, 4 => int32x4_t;
    i64, 2 => int64x2_t;
    u8, 16 => uint8x16_t;
    u16, 8 => uint16x8_t;
    u32, 4 => uint32x4_t;
    u64, 2 => uint64x2_t;
    f16, 8 => uint16x8_t;
    bf16, 8 => uint16x8_t;
    f32, 4 => float32x4_t;
    f64, 2 => float64x2_t;
);

pub(in crate::arch) const LEVEL: Level = Level::new(1, "aarch64-neon", &[128]);

pub(in crate::arch) fn detect() -> Level {
    if std::arch::is_aarch64_feature_detected!("neon") {
        LEVEL
    } else {
        SCALAR
    }
}

#[inline(always)]
#[allow(unused_unsafe)]
pub(in crate::arch) fn join<T, const H: usize, const N: usize>(
    lo: Vector<T, H>,
    hi: Vector<T, H>,
) -> Option<Vector<T, N>>
where
    T: Element,
    Const<H>: SupportedLaneCount,
    Const<N>: SupportedLaneCount,
{
    if std::mem::size_of::<Vector<T, N>>() != 16 {
        return None;
    }

    // SAFETY: The result is one 128-bit register, so each half is 64 bits. NEON is
    // enabled for this backend.
    unsafe {
        let lo: u64 = helpers::retype(lo);
        let hi: u64 = helpers::retype(hi);
        Some(helpers::retype(vcombine_u64(vcreate_u64(lo), vcreate_u64(hi))))
    }
}
