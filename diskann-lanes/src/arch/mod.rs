/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Backend selection and the mapping between vectors and hardware registers.
//!
//! Exactly one backend is compiled in, chosen from the target's `target_arch` and
//! `target_feature` settings. Enabling the `scalar` feature forces the portable backend,
//! whose kernels are all scalar loops.
//!
//! | Backend   | Selected when                               | Register widths  |
//! |-----------|---------------------------------------------|------------------|
//! | `x86_64`  | `target_arch = "x86_64"`                    | 128, 256 (`avx`), 512 (`avx512f`) |
//! | `aarch64` | `target_arch = "aarch64"` with `neon`       | 128              |
//! | `wasm32`  | `target_arch = "wasm32"` with `simd128`     | 128              |
//! | emulated  | otherwise, or with the `scalar` feature     | none             |
//!
//! Within the x86 backend, individual kernels are further gated on the features they
//! need (SSE4.1, AVX2, F16C, AVX-512 and so on). Nothing here is decided at run time:
//! [`detect`] and [`verify`] only report on the running CPU.

use crate::{Const, SupportedLaneCount, Vector, element::Element};

cfg_if::cfg_if! {
    if #[cfg(feature = "scalar")] {
        mod emulated;
        use emulated as backend;
    } else if #[cfg(target_arch = "x86_64")] {
        mod x86_64;
        use x86_64 as backend;
    } else if #[cfg(all(target_arch = "aarch64", target_feature = "neon"))] {
        mod aarch64;
        use aarch64 as backend;
    } else if #[cfg(all(target_arch = "wasm32", target_feature = "simd128"))] {
        mod wasm32;
        use wasm32 as backend;
    } else {
        mod emulated;
        use emulated as backend;
    }
}

/// Conversion between a vector and the hardware register of the same size.
///
/// Implemented only for vectors that are exactly one register wide on the active
/// backend: 128 bits on every SIMD backend, 256 bits with AVX and 512 bits with AVX-512F.
/// Integer vectors and vectors of 16-bit floats map to integer registers. `f32` and `f64`
/// vectors map to float registers where the backend distinguishes them.
pub trait NativeRegister: Sized {
    /// The register type.
    type Register: Copy;

    /// Move the lanes into a register.
    fn to_vec(self) -> Self::Register;

    /// Move the lanes out of a register.
    fn from_vec(register: Self::Register) -> Self;
}

/// A description of a backend and the instruction set extensions it was compiled for.
///
/// Levels order by rank first and by register widths second, so a CPU supports a build
/// when its detected level compares greater or equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level {
    rank: u8,
    name: &'static str,
    widths: &'static [usize],
}

impl Level {
    pub(crate) const fn new(rank: u8, name: &'static str, widths: &'static [usize]) -> Self {
        Self { rank, name, widths }
    }

    /// A short human readable name such as `"x86-64-v3"`.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The register widths in bits for which [`NativeRegister`] is implemented.
    pub const fn register_widths(&self) -> &'static [usize] {
        self.widths
    }

    /// Return `true` if vectors of `bits` bits live in a single register.
    pub fn is_native_width(&self, bits: usize) -> bool {
        self.widths.contains(&bits)
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

/// The portable backend without SIMD registers.
pub const SCALAR: Level = Level::new(0, "scalar", &[]);

/// Return the [`Level`] the crate was compiled for.
pub const fn current() -> Level {
    backend::LEVEL
}

/// Inspect the running CPU and return the best [`Level`] it supports.
///
/// The result is cached after the first call. On targets without runtime feature
/// detection this is the compiled level.
pub fn detect() -> Level {
    backend::detect()
}

/// Check that the running CPU supports the compiled [`Level`].
///
/// The outcome is logged: at `debug` level on success and at `warn` level if the CPU is
/// missing extensions the binary was compiled to use.
pub fn verify() -> bool {
    let compiled = current();
    let detected = detect();
    if detected >= compiled {
        tracing::debug!(%compiled, %detected, "vector backend supported by this CPU");
        true
    } else {
        tracing::warn!(
            %compiled,
            %detected,
            "vector backend was compiled for extensions this CPU does not report"
        );
        false
    }
}

/// Concatenate two halves, using the backend's combine instruction when the result is
/// exactly one register wide.
#[inline(always)]
pub(crate) fn join<T, const H: usize, const N: usize>(
    lo: Vector<T, H>,
    hi: Vector<T, H>,
) -> Vector<T, N>
where
    T: Element,
    Const<H>: SupportedLaneCount,
    Const<N>: SupportedLaneCount,
{
    assert_eq!(2 * H, N, "join must double the lane count");
    match backend::join(lo, hi) {
        Some(joined) => joined,
        None => structural_join(lo, hi),
    }
}

/// Concatenation by copying lanes.
#[inline(always)]
pub(crate) fn structural_join<T, const H: usize, const N: usize>(
    lo: Vector<T, H>,
    hi: Vector<T, H>,
) -> Vector<T, N>
where
    T: Element,
    Const<H>: SupportedLaneCount,
    Const<N>: SupportedLaneCount,
{
    Vector::from_fn(|i| if i < H { lo[i] } else { hi[i - H] })
}
