/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use std::arch::wasm32::*;

use half::{bf16, f16};

use super::Level;
use crate::{Const, SupportedLaneCount, Vector, element::Element, helpers};

mod kernels;

// `simd128` has a single untyped register.
helpers::native_register!(
    i8, 16 => v128;
    i16, 8 => v128;
    i32, 4 => v128;
    i64, 2 => v128;
    u8, 16 => v128;
    u16, 8 => v128;
    u32, 4 => v128;
    u64, 2 => v128;
    f16, 8 => v128;
    bf16, 8 => v128;
    f32, 4 => v128;
    f64, 2 => v128;
);

pub(in crate::arch) const LEVEL: Level = Level::new(1, "wasm32-simd128", &[128]);

// WebAssembly validates the module before it runs, so the compiled features are always
// present.
pub(in crate::arch) fn detect() -> Level {
    LEVEL
}

#[inline(always)]
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

    // SAFETY: The result is one 128-bit register, so each half is 64 bits.
    unsafe {
        let lo: u64 = helpers::retype(lo);
        let hi: u64 = helpers::retype(hi);
        Some(helpers::retype(u64x2(lo, hi)))
    }
}
