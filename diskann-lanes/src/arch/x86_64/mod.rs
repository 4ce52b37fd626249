/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use std::{
    arch::x86_64::*,
    sync::atomic::{AtomicU8, Ordering},
};

use half::{bf16, f16};

use super::Level;
use crate::{Const, SupportedLaneCount, Vector, element::Element, helpers};

mod kernels;

///////////////
// Registers //
///////////////

helpers::native_register!(
    i8, 16 => __m128i;
    i16, 8 => __m128i;
    i32, 4 => __m128i;
    i64, 2 => __m128i;
    u8, 16 => __m128i;
    u16, 8 => __m128i;
    u32, 4 => __m128i;
    u64, 2 => __m128i;
    f16, 8 => __m128i;
    bf16, 8 => __m128i;
    f32, 4 => __m128;
    f64, 2 => __m128d;
);

#[cfg(target_feature = "avx")]
helpers::native_register!(
    i8, 32 => __m256i;
    i16, 16 => __m256i;
    i32, 8 => __m256i;
    i64, 4 => __m256i;
    u8, 32 => __m256i;
    u16, 16 => __m256i;
    u32, 8 => __m256i;
    u64, 4 => __m256i;
    f16, 16 => __m256i;
    bf16, 16 => __m256i;
    f32, 8 => __m256;
    f64, 4 => __m256d;
);

#[cfg(target_feature = "avx512f")]
helpers::native_register!(
    i8, 64 => __m512i;
    i16, 32 => __m512i;
    i32, 16 => __m512i;
    i64, 8 => __m512i;
    u8, 64 => __m512i;
    u16, 32 => __m512i;
    u32, 16 => __m512i;
    u64, 8 => __m512i;
    f16, 32 => __m512i;
    bf16, 32 => __m512i;
    f32, 16 => __m512;
    f64, 8 => __m512d;
);

////////////
// Levels //
////////////

// NOTE: Ranks must be properly nested in ascending order so compatibility checks can be
// done with a `>=` comparison.
const RANK_UNINITIALIZED: u8 = 0;
const RANK_V1: u8 = 1;
const RANK_V2: u8 = 2;
const RANK_V3: u8 = 3;
const RANK_V4: u8 = 4;

cfg_if::cfg_if! {
    if #[cfg(target_feature = "avx512f")] {
        const WIDTHS: &[usize] = &[128, 256, 512];
    } else if #[cfg(target_feature = "avx")] {
        const WIDTHS: &[usize] = &[128, 256];
    } else {
        const WIDTHS: &[usize] = &[128];
    }
}

const fn level(rank: u8, widths: &'static [usize]) -> Level {
    match rank {
        RANK_V4 => Level::new(RANK_V4, "x86-64-v4", widths),
        RANK_V3 => Level::new(RANK_V3, "x86-64-v3", widths),
        RANK_V2 => Level::new(RANK_V2, "x86-64-v2", widths),
        _ => Level::new(RANK_V1, "x86-64", widths),
    }
}

cfg_if::cfg_if! {
    if #[cfg(all(
        target_feature = "avx512f",
        target_feature = "avx512bw",
        target_feature = "avx512dq",
        target_feature = "avx512vl",
    ))] {
        const RANK: u8 = RANK_V4;
    } else if #[cfg(all(
        target_feature = "avx2",
        target_feature = "f16c",
        target_feature = "fma",
    ))] {
        const RANK: u8 = RANK_V3;
    } else if #[cfg(all(target_feature = "sse4.1", target_feature = "sse4.2"))] {
        const RANK: u8 = RANK_V2;
    } else {
        const RANK: u8 = RANK_V1;
    }
}

pub(in crate::arch) const LEVEL: Level = level(RANK, WIDTHS);

// The detected level is cached as its rank in the low nibble and the index of its widest
// register in the high nibble.
static DETECTED: AtomicU8 = AtomicU8::new(RANK_UNINITIALIZED);

const DETECTED_WIDTHS: [&[usize]; 3] = [&[128], &[128, 256], &[128, 256, 512]];

fn detected_rank() -> u8 {
    if is_x86_feature_detected!("avx2")
        && is_x86_feature_detected!("avx")
        && is_x86_feature_detected!("f16c")
        && is_x86_feature_detected!("fma")
    {
        if is_x86_feature_detected!("avx512f")
            && is_x86_feature_detected!("avx512bw")
            && is_x86_feature_detected!("avx512dq")
            && is_x86_feature_detected!("avx512vl")
        {
            RANK_V4
        } else {
            RANK_V3
        }
    } else if is_x86_feature_detected!("sse4.1") && is_x86_feature_detected!("sse4.2") {
        RANK_V2
    } else {
        RANK_V1
    }
}

// Register widths follow `avx` and `avx512f` alone, matching how `WIDTHS` is compiled.
fn detected_widths() -> u8 {
    if is_x86_feature_detected!("avx512f") {
        2
    } else if is_x86_feature_detected!("avx") {
        1
    } else {
        0
    }
}

#[inline(never)]
fn resolve() -> u8 {
    let packed = detected_rank() | (detected_widths() << 4);
    DETECTED.store(packed, Ordering::Relaxed);
    packed
}

pub(in crate::arch) fn detect() -> Level {
    let mut packed = DETECTED.load(Ordering::Relaxed);
    if packed == RANK_UNINITIALIZED {
        packed = resolve();
    }
    let widths = DETECTED_WIDTHS[usize::from(packed >> 4).min(DETECTED_WIDTHS.len() - 1)];
    level(packed & 0x0f, widths)
}

//////////
// Join //
//////////

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
    // SAFETY: Each arm is selected by the size of the result, so every `retype` is
    // between a half (or the whole) and a register of matching size. The intrinsics are
    // gated on the features they require.
    unsafe {
        match std::mem::size_of::<Vector<T, N>>() {
            16 => {
                let lo: i64 = helpers::retype(lo);
                let hi: i64 = helpers::retype(hi);
                Some(helpers::retype(_mm_unpacklo_epi64(
                    _mm_cvtsi64_si128(lo),
                    _mm_cvtsi64_si128(hi),
                )))
            }
            #[cfg(target_feature = "avx")]
            32 => {
                let lo: __m128i = helpers::retype(lo);
                let hi: __m128i = helpers::retype(hi);
                Some(helpers::retype(_mm256_set_m128i(hi, lo)))
            }
            #[cfg(target_feature = "avx512f")]
            64 => {
                let lo: __m256i = helpers::retype(lo);
                let hi: __m256i = helpers::retype(hi);
                Some(helpers::retype(_mm512_inserti64x4::<1>(
                    _mm512_castsi256_si512(lo),
                    hi,
                )))
            }
            _ => None,
        }
    }
}
