/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Native kernels for WebAssembly `simd128`.

use std::arch::wasm32::*;

use half::{bf16, f16};

use crate::{
    LoHi, SplitJoin, Vector,
    arch::NativeRegister,
    kernel::{
        Clamp, Demote, F32ToHalf, FloatToInt, HalfToF32, IntToFloat, Narrow, Promote,
        UnsignedToFloat, Widen, native, no_native,
    },
};

fn pair<T, const H: usize, const N: usize>(lo: v128, hi: v128) -> Vector<T, N>
where
    T: crate::element::Element,
    crate::Const<H>: crate::SupportedLaneCount,
    crate::Const<N>: crate::SupportedLaneCount,
    Vector<T, H>: NativeRegister<Register = v128>,
    Vector<T, N>: SplitJoin<Halved = Vector<T, H>>,
{
    LoHi::new(Vector::<T, H>::from_vec(lo), Vector::<T, H>::from_vec(hi)).join()
}

///////////
// Widen //
///////////

macro_rules! widen {
    ($from:ty => $to:ty, $lanes:literal, $half:literal, $low:ident, $high:ident) => {
        native!(Widen<$from, $to>, $lanes, fn(_k, x: Vector<$from, $lanes>) -> Vector<$to, $lanes> {
            let v = x.to_vec();
            pair::<$to, $half, $lanes>($low(v), $high(v))
        });
    };
}

widen!(i8 => i16, 16, 8, i16x8_extend_low_i8x16, i16x8_extend_high_i8x16);
widen!(i16 => i32, 8, 4, i32x4_extend_low_i16x8, i32x4_extend_high_i16x8);
widen!(i32 => i64, 4, 2, i64x2_extend_low_i32x4, i64x2_extend_high_i32x4);
widen!(u8 => u16, 16, 8, u16x8_extend_low_u8x16, u16x8_extend_high_u8x16);
widen!(u16 => u32, 8, 4, u32x4_extend_low_u16x8, u32x4_extend_high_u16x8);
widen!(u32 => u64, 4, 2, u64x2_extend_low_u32x4, u64x2_extend_high_u32x4);

////////////
// Narrow //
////////////

// The narrowing instructions saturate, so the high bits are cleared first.
native!(Narrow<u16, u8>, 16, fn(_k, x: Vector<u16, 16>) -> Vector<u8, 16> {
    let LoHi { lo, hi } = x.split();
    let mask = u16x8_splat(0xff);
    Vector::from_vec(u8x16_narrow_i16x8(
        v128_and(lo.to_vec(), mask),
        v128_and(hi.to_vec(), mask),
    ))
});

native!(Narrow<u32, u16>, 8, fn(_k, x: Vector<u32, 8>) -> Vector<u16, 8> {
    let LoHi { lo, hi } = x.split();
    let mask = u32x4_splat(0xffff);
    Vector::from_vec(u16x8_narrow_i32x4(
        v128_and(lo.to_vec(), mask),
        v128_and(hi.to_vec(), mask),
    ))
});

native!(Narrow<u64, u32>, 4, fn(_k, x: Vector<u64, 4>) -> Vector<u32, 4> {
    let LoHi { lo, hi } = x.split();
    Vector::from_vec(i32x4_shuffle::<0, 2, 4, 6>(lo.to_vec(), hi.to_vec()))
});

///////////
// Clamp //
///////////

macro_rules! clamp {
    ($T:ty, $lanes:literal, $splat:ident, $max:ident, $min:ident) => {
        native!(Clamp<$T>, $lanes, fn(k, x: Vector<$T, $lanes>) -> Vector<$T, $lanes> {
            Vector::from_vec($max($min(x.to_vec(), $splat(k.hi)), $splat(k.lo)))
        });
    };
}

clamp!(i8, 16, i8x16_splat, i8x16_max, i8x16_min);
clamp!(i16, 8, i16x8_splat, i16x8_max, i16x8_min);
clamp!(i32, 4, i32x4_splat, i32x4_max, i32x4_min);
clamp!(u8, 16, u8x16_splat, u8x16_max, u8x16_min);
clamp!(u16, 8, u16x8_splat, u16x8_max, u16x8_min);
clamp!(u32, 4, u32x4_splat, u32x4_max, u32x4_min);

native!(Clamp<i64>, 2, fn(k, x: Vector<i64, 2>) -> Vector<i64, 2> {
    let lo = i64x2_splat(k.lo);
    let hi = i64x2_splat(k.hi);
    let v = x.to_vec();
    let v = v128_bitselect(lo, v, i64x2_gt(lo, v));
    Vector::from_vec(v128_bitselect(hi, v, i64x2_gt(v, hi)))
});

// No unsigned 64-bit comparison.
no_native!(Clamp<u64>);

//////////////////
// Int to Float //
//////////////////

native!(IntToFloat<i32, f32>, 4, fn(_k, x: Vector<i32, 4>) -> Vector<f32, 4> {
    Vector::from_vec(f32x4_convert_i32x4(x.to_vec()))
});

native!(IntToFloat<i32, f64>, 4, fn(_k, x: Vector<i32, 4>) -> Vector<f64, 4> {
    let v = x.to_vec();
    let lo = f64x2_convert_low_i32x4(v);
    let hi = f64x2_convert_low_i32x4(i32x4_shuffle::<2, 3, 2, 3>(v, v));
    pair::<f64, 2, 4>(lo, hi)
});

no_native!(IntToFloat<i64, f64>);

///////////////////////
// Unsigned to Float //
///////////////////////

native!(UnsignedToFloat<u32, f32>, 4, fn(_k, x: Vector<u32, 4>) -> Vector<f32, 4> {
    Vector::from_vec(f32x4_convert_u32x4(x.to_vec()))
});

native!(UnsignedToFloat<u32, f64>, 4, fn(_k, x: Vector<u32, 4>) -> Vector<f64, 4> {
    let v = x.to_vec();
    let lo = f64x2_convert_low_u32x4(v);
    let hi = f64x2_convert_low_u32x4(i32x4_shuffle::<2, 3, 2, 3>(v, v));
    pair::<f64, 2, 4>(lo, hi)
});

no_native!(UnsignedToFloat<u64, f64>);

//////////////////
// Float to Int //
//////////////////

// `trunc_sat` saturates and sends NaN to zero.
native!(FloatToInt<f32, i32>, 4, fn(_k, x: Vector<f32, 4>) -> Vector<i32, 4> {
    Vector::from_vec(i32x4_trunc_sat_f32x4(x.to_vec()))
});

no_native!(FloatToInt<f64, i64>, FloatToInt<f64, u64>);

////////////////////
// Float to Float //
////////////////////

native!(Promote, 4, fn(_k, x: Vector<f32, 4>) -> Vector<f64, 4> {
    let v = x.to_vec();
    let lo = f64x2_promote_low_f32x4(v);
    let hi = f64x2_promote_low_f32x4(i32x4_shuffle::<2, 3, 2, 3>(v, v));
    pair::<f64, 2, 4>(lo, hi)
});

native!(Demote, 4, fn(_k, x: Vector<f64, 4>) -> Vector<f32, 4> {
    let LoHi { lo, hi } = x.split();
    let lo = f32x4_demote_f64x2_zero(lo.to_vec());
    let hi = f32x4_demote_f64x2_zero(hi.to_vec());
    Vector::from_vec(i32x4_shuffle::<0, 1, 4, 5>(lo, hi))
});

/////////////////
// Half floats //
/////////////////

native!(HalfToF32<bf16>, 8, fn(_k, x: Vector<bf16, 8>) -> Vector<f32, 8> {
    let v = x.to_vec();
    let lo = i32x4_shl(u32x4_extend_low_u16x8(v), 16);
    let hi = i32x4_shl(u32x4_extend_high_u16x8(v), 16);
    pair::<f32, 4, 8>(lo, hi)
});

no_native!(HalfToF32<f16>, F32ToHalf<f16>, F32ToHalf<bf16>);
