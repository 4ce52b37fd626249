/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Native kernels for AArch64 with NEON.

use std::arch::aarch64::*;

use half::{bf16, f16};

use crate::{
    LoHi, SplitJoin, Vector,
    arch::NativeRegister,
    kernel::{
        Clamp, Demote, F32ToHalf, FloatToInt, HalfToF32, IntToFloat, Narrow, Promote,
        UnsignedToFloat, Widen, native, no_native,
    },
};

/// Map a kernel onto a single intrinsic taking and returning one register.
macro_rules! unsafe_map {
    ($K:ty, $lanes:literal, $from:ty => $to:ty, $intrinsic:expr) => {
        native!($K, $lanes, fn(_k, x: Vector<$from, $lanes>) -> Vector<$to, $lanes> {
            // SAFETY: NEON is enabled for this backend.
            Vector::from_vec(unsafe { $intrinsic(x.to_vec()) })
        });
    };
}

///////////
// Widen //
///////////

macro_rules! widen {
    ($from:ty => $to:ty, $lanes:literal, $half:literal, $low:ident, $movl:ident, $movl_high:ident) => {
        native!(Widen<$from, $to>, $lanes, fn(_k, x: Vector<$from, $lanes>) -> Vector<$to, $lanes> {
            let v = x.to_vec();
            // SAFETY: NEON is enabled for this backend.
            let (lo, hi) = unsafe { ($movl($low(v)), $movl_high(v)) };
            LoHi::new(
                Vector::<$to, $half>::from_vec(lo),
                Vector::<$to, $half>::from_vec(hi),
            )
            .join()
        });
    };
}

widen!(i8 => i16, 16, 8, vget_low_s8, vmovl_s8, vmovl_high_s8);
widen!(i16 => i32, 8, 4, vget_low_s16, vmovl_s16, vmovl_high_s16);
widen!(i32 => i64, 4, 2, vget_low_s32, vmovl_s32, vmovl_high_s32);
widen!(u8 => u16, 16, 8, vget_low_u8, vmovl_u8, vmovl_high_u8);
widen!(u16 => u32, 8, 4, vget_low_u16, vmovl_u16, vmovl_high_u16);
widen!(u32 => u64, 4, 2, vget_low_u32, vmovl_u32, vmovl_high_u32);

////////////
// Narrow //
////////////

macro_rules! narrow {
    ($from:ty => $to:ty, $lanes:literal, $movn:ident, $movn_high:ident) => {
        native!(Narrow<$from, $to>, $lanes, fn(_k, x: Vector<$from, $lanes>) -> Vector<$to, $lanes> {
            let LoHi { lo, hi } = x.split();
            // SAFETY: NEON is enabled for this backend.
            Vector::from_vec(unsafe { $movn_high($movn(lo.to_vec()), hi.to_vec()) })
        });
    };
}

narrow!(u16 => u8, 16, vmovn_u16, vmovn_high_u16);
narrow!(u32 => u16, 8, vmovn_u32, vmovn_high_u32);
narrow!(u64 => u32, 4, vmovn_u64, vmovn_high_u64);

///////////
// Clamp //
///////////

macro_rules! clamp {
    ($T:ty, $lanes:literal, $dup:ident, $max:ident, $min:ident) => {
        native!(Clamp<$T>, $lanes, fn(k, x: Vector<$T, $lanes>) -> Vector<$T, $lanes> {
            // SAFETY: NEON is enabled for this backend.
            Vector::from_vec(unsafe { $max($min(x.to_vec(), $dup(k.hi)), $dup(k.lo)) })
        });
    };
}

clamp!(i8, 16, vdupq_n_s8, vmaxq_s8, vminq_s8);
clamp!(i16, 8, vdupq_n_s16, vmaxq_s16, vminq_s16);
clamp!(i32, 4, vdupq_n_s32, vmaxq_s32, vminq_s32);
clamp!(u8, 16, vdupq_n_u8, vmaxq_u8, vminq_u8);
clamp!(u16, 8, vdupq_n_u16, vmaxq_u16, vminq_u16);
clamp!(u32, 4, vdupq_n_u32, vmaxq_u32, vminq_u32);

// There is no 64-bit min or max, so select with a comparison.
macro_rules! clamp_select {
    ($T:ty, $dup:ident, $gt:ident, $bsl:ident) => {
        native!(Clamp<$T>, 2, fn(k, x: Vector<$T, 2>) -> Vector<$T, 2> {
            // SAFETY: NEON is enabled for this backend.
            unsafe {
                let lo = $dup(k.lo);
                let hi = $dup(k.hi);
                let v = x.to_vec();
                let v = $bsl($gt(lo, v), lo, v);
                Vector::from_vec($bsl($gt(v, hi), hi, v))
            }
        });
    };
}

clamp_select!(i64, vdupq_n_s64, vcgtq_s64, vbslq_s64);
clamp_select!(u64, vdupq_n_u64, vcgtq_u64, vbslq_u64);

//////////////////
// Int to Float //
//////////////////

#[inline(always)]
fn low_to_f64(v: int32x4_t) -> float64x2_t {
    // SAFETY: NEON is enabled for this backend.
    unsafe { vcvtq_f64_s64(vmovl_s32(vget_low_s32(v))) }
}

#[inline(always)]
fn high_to_f64(v: int32x4_t) -> float64x2_t {
    // SAFETY: NEON is enabled for this backend.
    unsafe { vcvtq_f64_s64(vmovl_high_s32(v)) }
}

unsafe_map!(IntToFloat<i32, f32>, 4, i32 => f32, vcvtq_f32_s32);
unsafe_map!(IntToFloat<i64, f64>, 2, i64 => f64, vcvtq_f64_s64);

native!(IntToFloat<i32, f64>, 4, fn(_k, x: Vector<i32, 4>) -> Vector<f64, 4> {
    let v = x.to_vec();
    LoHi::new(
        Vector::<f64, 2>::from_vec(low_to_f64(v)),
        Vector::<f64, 2>::from_vec(high_to_f64(v)),
    )
    .join()
});

///////////////////////
// Unsigned to Float //
///////////////////////

unsafe_map!(UnsignedToFloat<u32, f32>, 4, u32 => f32, vcvtq_f32_u32);
unsafe_map!(UnsignedToFloat<u64, f64>, 2, u64 => f64, vcvtq_f64_u64);

// Zero-extend to `u64` first; every `u32` is exact in `f64`.
native!(UnsignedToFloat<u32, f64>, 4, fn(_k, x: Vector<u32, 4>) -> Vector<f64, 4> {
    let v = x.to_vec();
    // SAFETY: NEON is enabled for this backend.
    let (lo, hi) = unsafe {
        (
            vcvtq_f64_u64(vmovl_u32(vget_low_u32(v))),
            vcvtq_f64_u64(vmovl_high_u32(v)),
        )
    };
    LoHi::new(Vector::<f64, 2>::from_vec(lo), Vector::<f64, 2>::from_vec(hi)).join()
});

//////////////////
// Float to Int //
//////////////////

// `FCVTZS` and `FCVTZU` truncate, saturate, and send NaN to zero.
unsafe_map!(FloatToInt<f32, i32>, 4, f32 => i32, vcvtq_s32_f32);
unsafe_map!(FloatToInt<f64, i64>, 2, f64 => i64, vcvtq_s64_f64);
unsafe_map!(FloatToInt<f64, u64>, 2, f64 => u64, vcvtq_u64_f64);

////////////////////
// Float to Float //
////////////////////

native!(Promote, 4, fn(_k, x: Vector<f32, 4>) -> Vector<f64, 4> {
    let v = x.to_vec();
    // SAFETY: NEON is enabled for this backend.
    let (lo, hi) = unsafe { (vcvt_f64_f32(vget_low_f32(v)), vcvt_high_f64_f32(v)) };
    LoHi::new(Vector::<f64, 2>::from_vec(lo), Vector::<f64, 2>::from_vec(hi)).join()
});

native!(Demote, 4, fn(_k, x: Vector<f64, 4>) -> Vector<f32, 4> {
    let LoHi { lo, hi } = x.split();
    // SAFETY: NEON is enabled for this backend.
    Vector::from_vec(unsafe { vcvt_high_f32_f64(vcvt_f32_f64(lo.to_vec()), hi.to_vec()) })
});

/////////////////
// Half floats //
/////////////////

// A `bf16` is the top half of the `f32` with the same value.
native!(HalfToF32<bf16>, 8, fn(_k, x: Vector<bf16, 8>) -> Vector<f32, 8> {
    let v = x.to_vec();
    // SAFETY: NEON is enabled for this backend.
    let (lo, hi) = unsafe {
        (
            vreinterpretq_f32_u32(vshll_n_u16::<16>(vget_low_u16(v))),
            vreinterpretq_f32_u32(vshll_high_n_u16::<16>(v)),
        )
    };
    LoHi::new(Vector::<f32, 4>::from_vec(lo), Vector::<f32, 4>::from_vec(hi)).join()
});

// The `f16` conversion instructions need the unstable `float16x4_t`.
no_native!(HalfToF32<f16>, F32ToHalf<f16>, F32ToHalf<bf16>);
