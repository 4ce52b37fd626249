/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Native kernels for x86-64.
//!
//! Every kernel picks the widest tier the compilation target enables: AVX-512, then
//! AVX2 (or AVX and F16C), then SSE4.1, then the SSE2 baseline. Kernels with no
//! instruction on the selected target fall back to the scalar definition.

// x86 intrinsics
use std::arch::x86_64::*;

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
///
/// SAFETY: It is the invoker's responsibility to gate the invocation on the
/// `target_feature` named by `$requires`. A missing gate fails to compile.
macro_rules! unsafe_map {
    ($K:ty, $lanes:literal, $from:ty => $to:ty, $intrinsic:expr, $requires:tt) => {
        native!($K, $lanes, fn(_k, x: Vector<$from, $lanes>) -> Vector<$to, $lanes> {
            const { assert!(cfg!(target_feature = $requires), concat!("requires ", $requires)) };
            // SAFETY: The invocation is gated on the features of the intrinsic.
            Vector::from_vec(unsafe { $intrinsic(x.to_vec()) })
        });
    };
}

/// Clamp with a lane-wise `max(min(x, hi), lo)`.
///
/// SAFETY: It is the invoker's responsibility to gate the invocation on the
/// `target_feature` named by `$requires`. A missing gate fails to compile.
macro_rules! unsafe_clamp {
    ($T:ty, $lanes:literal, $S:ty, $set1:ident, $max:ident, $min:ident, $requires:tt) => {
        native!(Clamp<$T>, $lanes, fn(k, x: Vector<$T, $lanes>) -> Vector<$T, $lanes> {
            const { assert!(cfg!(target_feature = $requires), concat!("requires ", $requires)) };
            // SAFETY: The invocation is gated on the features of the intrinsics.
            unsafe {
                let lo = $set1(k.lo as $S);
                let hi = $set1(k.hi as $S);
                Vector::from_vec($max($min(x.to_vec(), hi), lo))
            }
        });
    };
}

///////////
// Widen //
///////////

#[inline(always)]
fn sign_epi8(v: __m128i) -> __m128i {
    // SAFETY: SSE2 is part of the x86-64 baseline.
    unsafe { _mm_cmpgt_epi8(_mm_setzero_si128(), v) }
}

#[inline(always)]
fn sign_epi16(v: __m128i) -> __m128i {
    // SAFETY: SSE2 is part of the x86-64 baseline.
    unsafe { _mm_cmpgt_epi16(_mm_setzero_si128(), v) }
}

#[inline(always)]
fn sign_epi32(v: __m128i) -> __m128i {
    // SAFETY: SSE2 is part of the x86-64 baseline.
    unsafe { _mm_cmpgt_epi32(_mm_setzero_si128(), v) }
}

#[inline(always)]
fn zeros(_: __m128i) -> __m128i {
    // SAFETY: SSE2 is part of the x86-64 baseline.
    unsafe { _mm_setzero_si128() }
}

/// Widening by interleaving each lane with its fill (sign bits or zeros).
macro_rules! widen_sse2 {
    ($from:ty => $to:ty, $lanes:literal, $half:literal, $fill:ident, $unpacklo:ident, $unpackhi:ident) => {
        native!(Widen<$from, $to>, $lanes, fn(_k, x: Vector<$from, $lanes>) -> Vector<$to, $lanes> {
            let v = x.to_vec();
            let fill = $fill(v);
            // SAFETY: SSE2 is part of the x86-64 baseline.
            let (lo, hi) = unsafe { ($unpacklo(v, fill), $unpackhi(v, fill)) };
            LoHi::new(
                Vector::<$to, $half>::from_vec(lo),
                Vector::<$to, $half>::from_vec(hi),
            )
            .join()
        });
    };
}

cfg_if::cfg_if! {
    if #[cfg(target_feature = "avx512bw")] {
        unsafe_map!(Widen<i8, i16>, 32, i8 => i16, _mm512_cvtepi8_epi16, "avx512bw");
        unsafe_map!(Widen<u8, u16>, 32, u8 => u16, _mm512_cvtepu8_epi16, "avx512bw");
    } else if #[cfg(target_feature = "avx2")] {
        unsafe_map!(Widen<i8, i16>, 16, i8 => i16, _mm256_cvtepi8_epi16, "avx2");
        unsafe_map!(Widen<u8, u16>, 16, u8 => u16, _mm256_cvtepu8_epi16, "avx2");
    } else {
        widen_sse2!(i8 => i16, 16, 8, sign_epi8, _mm_unpacklo_epi8, _mm_unpackhi_epi8);
        widen_sse2!(u8 => u16, 16, 8, zeros, _mm_unpacklo_epi8, _mm_unpackhi_epi8);
    }
}

cfg_if::cfg_if! {
    if #[cfg(target_feature = "avx512f")] {
        unsafe_map!(Widen<i16, i32>, 16, i16 => i32, _mm512_cvtepi16_epi32, "avx512f");
        unsafe_map!(Widen<u16, u32>, 16, u16 => u32, _mm512_cvtepu16_epi32, "avx512f");
        unsafe_map!(Widen<i32, i64>, 8, i32 => i64, _mm512_cvtepi32_epi64, "avx512f");
        unsafe_map!(Widen<u32, u64>, 8, u32 => u64, _mm512_cvtepu32_epi64, "avx512f");
    } else if #[cfg(target_feature = "avx2")] {
        unsafe_map!(Widen<i16, i32>, 8, i16 => i32, _mm256_cvtepi16_epi32, "avx2");
        unsafe_map!(Widen<u16, u32>, 8, u16 => u32, _mm256_cvtepu16_epi32, "avx2");
        unsafe_map!(Widen<i32, i64>, 4, i32 => i64, _mm256_cvtepi32_epi64, "avx2");
        unsafe_map!(Widen<u32, u64>, 4, u32 => u64, _mm256_cvtepu32_epi64, "avx2");
    } else {
        widen_sse2!(i16 => i32, 8, 4, sign_epi16, _mm_unpacklo_epi16, _mm_unpackhi_epi16);
        widen_sse2!(u16 => u32, 8, 4, zeros, _mm_unpacklo_epi16, _mm_unpackhi_epi16);
        widen_sse2!(i32 => i64, 4, 2, sign_epi32, _mm_unpacklo_epi32, _mm_unpackhi_epi32);
        widen_sse2!(u32 => u64, 4, 2, zeros, _mm_unpacklo_epi32, _mm_unpackhi_epi32);
    }
}

////////////
// Narrow //
////////////

cfg_if::cfg_if! {
    if #[cfg(target_feature = "avx512bw")] {
        unsafe_map!(Narrow<u16, u8>, 32, u16 => u8, _mm512_cvtepi16_epi8, "avx512bw");
    } else {
        native!(Narrow<u16, u8>, 16, fn(_k, x: Vector<u16, 16>) -> Vector<u8, 16> {
            let LoHi { lo, hi } = x.split();
            // SAFETY: SSE2 is part of the x86-64 baseline.
            unsafe {
                // Masking keeps `packus` from saturating.
                let mask = _mm_set1_epi16(0xff);
                let lo = _mm_and_si128(lo.to_vec(), mask);
                let hi = _mm_and_si128(hi.to_vec(), mask);
                Vector::from_vec(_mm_packus_epi16(lo, hi))
            }
        });
    }
}

cfg_if::cfg_if! {
    if #[cfg(target_feature = "avx512f")] {
        unsafe_map!(Narrow<u32, u16>, 16, u32 => u16, _mm512_cvtepi32_epi16, "avx512f");
        unsafe_map!(Narrow<u64, u32>, 8, u64 => u32, _mm512_cvtepi64_epi32, "avx512f");
    } else {
        native!(Narrow<u32, u16>, 8, fn(_k, x: Vector<u32, 8>) -> Vector<u16, 8> {
            let LoHi { lo, hi } = x.split();
            // SAFETY: SSE2 is part of the x86-64 baseline.
            unsafe {
                // Sign-extend the low 16 bits so `packs` never saturates.
                let lo = _mm_srai_epi32::<16>(_mm_slli_epi32::<16>(lo.to_vec()));
                let hi = _mm_srai_epi32::<16>(_mm_slli_epi32::<16>(hi.to_vec()));
                Vector::from_vec(_mm_packs_epi32(lo, hi))
            }
        });

        native!(Narrow<u64, u32>, 4, fn(_k, x: Vector<u64, 4>) -> Vector<u32, 4> {
            let LoHi { lo, hi } = x.split();
            // SAFETY: SSE2 is part of the x86-64 baseline.
            unsafe {
                let lo = _mm_castsi128_ps(lo.to_vec());
                let hi = _mm_castsi128_ps(hi.to_vec());
                Vector::from_vec(_mm_castps_si128(_mm_shuffle_ps::<0b10_00_10_00>(lo, hi)))
            }
        });
    }
}

///////////
// Clamp //
///////////

cfg_if::cfg_if! {
    if #[cfg(target_feature = "avx512bw")] {
        unsafe_clamp!(i8, 64, i8, _mm512_set1_epi8, _mm512_max_epi8, _mm512_min_epi8, "avx512bw");
        unsafe_clamp!(u8, 64, i8, _mm512_set1_epi8, _mm512_max_epu8, _mm512_min_epu8, "avx512bw");
        unsafe_clamp!(i16, 32, i16, _mm512_set1_epi16, _mm512_max_epi16, _mm512_min_epi16, "avx512bw");
        unsafe_clamp!(u16, 32, i16, _mm512_set1_epi16, _mm512_max_epu16, _mm512_min_epu16, "avx512bw");
    } else if #[cfg(target_feature = "avx2")] {
        unsafe_clamp!(i8, 32, i8, _mm256_set1_epi8, _mm256_max_epi8, _mm256_min_epi8, "avx2");
        unsafe_clamp!(u8, 32, i8, _mm256_set1_epi8, _mm256_max_epu8, _mm256_min_epu8, "avx2");
        unsafe_clamp!(i16, 16, i16, _mm256_set1_epi16, _mm256_max_epi16, _mm256_min_epi16, "avx2");
        unsafe_clamp!(u16, 16, i16, _mm256_set1_epi16, _mm256_max_epu16, _mm256_min_epu16, "avx2");
    } else if #[cfg(target_feature = "sse4.1")] {
        unsafe_clamp!(i8, 16, i8, _mm_set1_epi8, _mm_max_epi8, _mm_min_epi8, "sse4.1");
        unsafe_clamp!(u8, 16, i8, _mm_set1_epi8, _mm_max_epu8, _mm_min_epu8, "sse2");
        unsafe_clamp!(i16, 8, i16, _mm_set1_epi16, _mm_max_epi16, _mm_min_epi16, "sse2");
        unsafe_clamp!(u16, 8, i16, _mm_set1_epi16, _mm_max_epu16, _mm_min_epu16, "sse4.1");
    } else {
        unsafe_clamp!(u8, 16, i8, _mm_set1_epi8, _mm_max_epu8, _mm_min_epu8, "sse2");
        unsafe_clamp!(i16, 8, i16, _mm_set1_epi16, _mm_max_epi16, _mm_min_epi16, "sse2");
        no_native!(Clamp<i8>, Clamp<u16>);
    }
}

cfg_if::cfg_if! {
    if #[cfg(target_feature = "avx512f")] {
        unsafe_clamp!(i32, 16, i32, _mm512_set1_epi32, _mm512_max_epi32, _mm512_min_epi32, "avx512f");
        unsafe_clamp!(u32, 16, i32, _mm512_set1_epi32, _mm512_max_epu32, _mm512_min_epu32, "avx512f");
    } else if #[cfg(target_feature = "avx2")] {
        unsafe_clamp!(i32, 8, i32, _mm256_set1_epi32, _mm256_max_epi32, _mm256_min_epi32, "avx2");
        unsafe_clamp!(u32, 8, i32, _mm256_set1_epi32, _mm256_max_epu32, _mm256_min_epu32, "avx2");
    } else if #[cfg(target_feature = "sse4.1")] {
        unsafe_clamp!(i32, 4, i32, _mm_set1_epi32, _mm_max_epi32, _mm_min_epi32, "sse4.1");
        unsafe_clamp!(u32, 4, i32, _mm_set1_epi32, _mm_max_epu32, _mm_min_epu32, "sse4.1");
    } else {
        no_native!(Clamp<i32>, Clamp<u32>);
    }
}

// The 64-bit bounds are broadcast with 64-bit splats.
cfg_if::cfg_if! {
    if #[cfg(target_feature = "avx512f")] {
        unsafe_clamp!(i64, 8, i64, _mm512_set1_epi64, _mm512_max_epi64, _mm512_min_epi64, "avx512f");
        unsafe_clamp!(u64, 8, i64, _mm512_set1_epi64, _mm512_max_epu64, _mm512_min_epu64, "avx512f");
    } else if #[cfg(target_feature = "sse4.2")] {
        native!(Clamp<i64>, 2, fn(k, x: Vector<i64, 2>) -> Vector<i64, 2> {
            // SAFETY: The invocation is gated on SSE4.2, which implies SSE4.1.
            unsafe {
                let lo = _mm_set1_epi64x(k.lo);
                let hi = _mm_set1_epi64x(k.hi);
                let v = x.to_vec();
                let v = _mm_blendv_epi8(v, lo, _mm_cmpgt_epi64(lo, v));
                let v = _mm_blendv_epi8(v, hi, _mm_cmpgt_epi64(v, hi));
                Vector::from_vec(v)
            }
        });
        no_native!(Clamp<u64>);
    } else {
        no_native!(Clamp<i64>, Clamp<u64>);
    }
}

//////////////////
// Int to Float //
//////////////////

cfg_if::cfg_if! {
    if #[cfg(target_feature = "avx512f")] {
        unsafe_map!(IntToFloat<i32, f32>, 16, i32 => f32, _mm512_cvtepi32_ps, "avx512f");
        unsafe_map!(IntToFloat<i32, f64>, 8, i32 => f64, _mm512_cvtepi32_pd, "avx512f");
    } else if #[cfg(target_feature = "avx")] {
        unsafe_map!(IntToFloat<i32, f32>, 8, i32 => f32, _mm256_cvtepi32_ps, "avx");
        unsafe_map!(IntToFloat<i32, f64>, 4, i32 => f64, _mm256_cvtepi32_pd, "avx");
    } else {
        unsafe_map!(IntToFloat<i32, f32>, 4, i32 => f32, _mm_cvtepi32_ps, "sse2");

        native!(IntToFloat<i32, f64>, 4, fn(_k, x: Vector<i32, 4>) -> Vector<f64, 4> {
            let v = x.to_vec();
            // SAFETY: SSE2 is part of the x86-64 baseline.
            let (lo, hi) = unsafe { (_mm_cvtepi32_pd(v), _mm_cvtepi32_pd(_mm_unpackhi_epi64(v, v))) };
            LoHi::new(Vector::<f64, 2>::from_vec(lo), Vector::<f64, 2>::from_vec(hi)).join()
        });
    }
}

cfg_if::cfg_if! {
    if #[cfg(target_feature = "avx512dq")] {
        unsafe_map!(IntToFloat<i64, f64>, 8, i64 => f64, _mm512_cvtepi64_pd, "avx512dq");
    } else {
        no_native!(IntToFloat<i64, f64>);
    }
}

///////////////////////
// Unsigned to Float //
///////////////////////

// Without an unsigned instruction each lane is split into two parts that convert exactly
// through the signed instruction. Only the recombining add rounds.

cfg_if::cfg_if! {
    if #[cfg(target_feature = "avx512f")] {
        unsafe_map!(UnsignedToFloat<u32, f32>, 16, u32 => f32, _mm512_cvtepu32_ps, "avx512f");
        unsafe_map!(UnsignedToFloat<u32, f64>, 8, u32 => f64, _mm512_cvtepu32_pd, "avx512f");
    } else if #[cfg(target_feature = "avx2")] {
        const TWO_POW_16: f32 = 65536.0;

        // `low + high * 2^16` with both halves below 2^16.
        native!(UnsignedToFloat<u32, f32>, 8, fn(_k, x: Vector<u32, 8>) -> Vector<f32, 8> {
            // SAFETY: The invocation is gated on AVX2.
            unsafe {
                let v = x.to_vec();
                let low = _mm256_cvtepi32_ps(_mm256_and_si256(v, _mm256_set1_epi32(0xffff)));
                let high = _mm256_cvtepi32_ps(_mm256_srli_epi32::<16>(v));
                let high = _mm256_mul_ps(high, _mm256_set1_ps(TWO_POW_16));
                Vector::from_vec(_mm256_add_ps(low, high))
            }
        });

        // `low + top * 2^31` is exact in `f64`.
        native!(UnsignedToFloat<u32, f64>, 4, fn(_k, x: Vector<u32, 4>) -> Vector<f64, 4> {
            // SAFETY: The invocation is gated on AVX2.
            unsafe {
                let v = x.to_vec();
                let low = _mm256_cvtepi32_pd(_mm_and_si128(v, _mm_set1_epi32(i32::MAX)));
                let top = _mm256_cvtepi32_pd(_mm_srli_epi32::<31>(v));
                let top = _mm256_mul_pd(top, _mm256_set1_pd(f64::from(TWO_POW_31)));
                Vector::from_vec(_mm256_add_pd(low, top))
            }
        });
    } else {
        const TWO_POW_16: f32 = 65536.0;

        // `low + high * 2^16` with both halves below 2^16.
        native!(UnsignedToFloat<u32, f32>, 4, fn(_k, x: Vector<u32, 4>) -> Vector<f32, 4> {
            // SAFETY: SSE2 is part of the x86-64 baseline.
            unsafe {
                let v = x.to_vec();
                let low = _mm_cvtepi32_ps(_mm_and_si128(v, _mm_set1_epi32(0xffff)));
                let high = _mm_cvtepi32_ps(_mm_srli_epi32::<16>(v));
                let high = _mm_mul_ps(high, _mm_set1_ps(TWO_POW_16));
                Vector::from_vec(_mm_add_ps(low, high))
            }
        });

        no_native!(UnsignedToFloat<u32, f64>);
    }
}

cfg_if::cfg_if! {
    if #[cfg(target_feature = "avx512dq")] {
        unsafe_map!(UnsignedToFloat<u64, f64>, 8, u64 => f64, _mm512_cvtepu64_pd, "avx512dq");
    } else {
        no_native!(UnsignedToFloat<u64, f64>);
    }
}

//////////////////
// Float to Int //
//////////////////

// The truncating instructions return the "integer indefinite" value `MIN` for NaN and
// for out-of-range inputs. Positive overflow is fixed up to `MAX` and NaN to zero.

const TWO_POW_31: f32 = 2147483648.0;

cfg_if::cfg_if! {
    if #[cfg(target_feature = "avx512f")] {
        native!(FloatToInt<f32, i32>, 16, fn(_k, x: Vector<f32, 16>) -> Vector<i32, 16> {
            // SAFETY: The invocation is gated on AVX-512F.
            unsafe {
                let v = x.to_vec();
                let t = _mm512_cvttps_epi32(v);
                let over = _mm512_cmp_ps_mask::<_CMP_GE_OQ>(v, _mm512_set1_ps(TWO_POW_31));
                let t = _mm512_mask_mov_epi32(t, over, _mm512_set1_epi32(i32::MAX));
                let ordered = _mm512_cmp_ps_mask::<_CMP_ORD_Q>(v, v);
                Vector::from_vec(_mm512_maskz_mov_epi32(ordered, t))
            }
        });
    } else if #[cfg(target_feature = "avx2")] {
        native!(FloatToInt<f32, i32>, 8, fn(_k, x: Vector<f32, 8>) -> Vector<i32, 8> {
            // SAFETY: The invocation is gated on AVX2.
            unsafe {
                let v = x.to_vec();
                let t = _mm256_cvttps_epi32(v);
                let over = _mm256_cmp_ps::<_CMP_GE_OQ>(v, _mm256_set1_ps(TWO_POW_31));
                let ordered = _mm256_cmp_ps::<_CMP_ORD_Q>(v, v);
                let t = _mm256_xor_si256(t, _mm256_castps_si256(over));
                Vector::from_vec(_mm256_and_si256(t, _mm256_castps_si256(ordered)))
            }
        });
    } else {
        native!(FloatToInt<f32, i32>, 4, fn(_k, x: Vector<f32, 4>) -> Vector<i32, 4> {
            // SAFETY: SSE2 is part of the x86-64 baseline.
            unsafe {
                let v = x.to_vec();
                let t = _mm_cvttps_epi32(v);
                let over = _mm_cmpge_ps(v, _mm_set1_ps(TWO_POW_31));
                let ordered = _mm_cmpord_ps(v, v);
                let t = _mm_xor_si128(t, _mm_castps_si128(over));
                Vector::from_vec(_mm_and_si128(t, _mm_castps_si128(ordered)))
            }
        });
    }
}

cfg_if::cfg_if! {
    if #[cfg(target_feature = "avx512dq")] {
        const TWO_POW_63: f64 = 9223372036854775808.0;

        native!(FloatToInt<f64, i64>, 8, fn(_k, x: Vector<f64, 8>) -> Vector<i64, 8> {
            // SAFETY: The invocation is gated on AVX-512DQ, which implies AVX-512F.
            unsafe {
                let v = x.to_vec();
                let t = _mm512_cvttpd_epi64(v);
                let over = _mm512_cmp_pd_mask::<_CMP_GE_OQ>(v, _mm512_set1_pd(TWO_POW_63));
                let t = _mm512_mask_mov_epi64(t, over, _mm512_set1_epi64(i64::MAX));
                let ordered = _mm512_cmp_pd_mask::<_CMP_ORD_Q>(v, v);
                Vector::from_vec(_mm512_maskz_mov_epi64(ordered, t))
            }
        });

        native!(FloatToInt<f64, u64>, 8, fn(_k, x: Vector<f64, 8>) -> Vector<u64, 8> {
            // SAFETY: The invocation is gated on AVX-512DQ, which implies AVX-512F.
            unsafe {
                let v = x.to_vec();
                // Overflow already yields `u64::MAX`. Negative inputs and NaN become zero.
                let t = _mm512_cvttpd_epu64(v);
                let non_negative = _mm512_cmp_pd_mask::<_CMP_GE_OQ>(v, _mm512_setzero_pd());
                Vector::from_vec(_mm512_maskz_mov_epi64(non_negative, t))
            }
        });
    } else {
        no_native!(FloatToInt<f64, i64>, FloatToInt<f64, u64>);
    }
}

////////////////////
// Float to Float //
////////////////////

cfg_if::cfg_if! {
    if #[cfg(target_feature = "avx512f")] {
        unsafe_map!(Promote, 8, f32 => f64, _mm512_cvtps_pd, "avx512f");
        unsafe_map!(Demote, 8, f64 => f32, _mm512_cvtpd_ps, "avx512f");
    } else if #[cfg(target_feature = "avx")] {
        unsafe_map!(Promote, 4, f32 => f64, _mm256_cvtps_pd, "avx");
        unsafe_map!(Demote, 4, f64 => f32, _mm256_cvtpd_ps, "avx");
    } else {
        native!(Promote, 4, fn(_k, x: Vector<f32, 4>) -> Vector<f64, 4> {
            let v = x.to_vec();
            // SAFETY: SSE2 is part of the x86-64 baseline.
            let (lo, hi) = unsafe { (_mm_cvtps_pd(v), _mm_cvtps_pd(_mm_movehl_ps(v, v))) };
            LoHi::new(Vector::<f64, 2>::from_vec(lo), Vector::<f64, 2>::from_vec(hi)).join()
        });

        native!(Demote, 4, fn(_k, x: Vector<f64, 4>) -> Vector<f32, 4> {
            let LoHi { lo, hi } = x.split();
            // SAFETY: SSE2 is part of the x86-64 baseline.
            unsafe {
                let lo = _mm_cvtpd_ps(lo.to_vec());
                let hi = _mm_cvtpd_ps(hi.to_vec());
                Vector::from_vec(_mm_movelh_ps(lo, hi))
            }
        });
    }
}

/////////////////
// Half floats //
/////////////////

cfg_if::cfg_if! {
    // Miri does not have built-in support for these intrinsics.
    if #[cfg(all(target_feature = "avx512f", not(miri)))] {
        unsafe_map!(HalfToF32<f16>, 16, f16 => f32, _mm512_cvtph_ps, "avx512f");
        unsafe_map!(
            F32ToHalf<f16>,
            16,
            f32 => f16,
            _mm512_cvtps_ph::<_MM_FROUND_TO_NEAREST_INT>,
            "avx512f"
        );
    } else if #[cfg(all(target_feature = "f16c", not(miri)))] {
        unsafe_map!(HalfToF32<f16>, 8, f16 => f32, _mm256_cvtph_ps, "f16c");
        unsafe_map!(
            F32ToHalf<f16>,
            8,
            f32 => f16,
            _mm256_cvtps_ph::<_MM_FROUND_TO_NEAREST_INT>,
            "f16c"
        );
    } else {
        no_native!(HalfToF32<f16>, F32ToHalf<f16>);
    }
}

// A `bf16` is the top half of the `f32` with the same value.
cfg_if::cfg_if! {
    if #[cfg(target_feature = "avx512f")] {
        native!(HalfToF32<bf16>, 16, fn(_k, x: Vector<bf16, 16>) -> Vector<f32, 16> {
            // SAFETY: The invocation is gated on AVX-512F.
            unsafe {
                let v = _mm512_slli_epi32::<16>(_mm512_cvtepu16_epi32(x.to_vec()));
                Vector::from_vec(_mm512_castsi512_ps(v))
            }
        });
    } else if #[cfg(target_feature = "avx2")] {
        native!(HalfToF32<bf16>, 8, fn(_k, x: Vector<bf16, 8>) -> Vector<f32, 8> {
            // SAFETY: The invocation is gated on AVX2.
            unsafe {
                let v = _mm256_slli_epi32::<16>(_mm256_cvtepu16_epi32(x.to_vec()));
                Vector::from_vec(_mm256_castsi256_ps(v))
            }
        });
    } else {
        native!(HalfToF32<bf16>, 8, fn(_k, x: Vector<bf16, 8>) -> Vector<f32, 8> {
            let v = x.to_vec();
            // SAFETY: SSE2 is part of the x86-64 baseline.
            let (lo, hi) = unsafe {
                let zero = _mm_setzero_si128();
                (
                    _mm_castsi128_ps(_mm_unpacklo_epi16(zero, v)),
                    _mm_castsi128_ps(_mm_unpackhi_epi16(zero, v)),
                )
            };
            LoHi::new(Vector::<f32, 4>::from_vec(lo), Vector::<f32, 4>::from_vec(hi)).join()
        });
    }
}

// Rounding to nearest even on the bit pattern has no single instruction below
// AVX-512 BF16.
no_native!(F32ToHalf<bf16>);
