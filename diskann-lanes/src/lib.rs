/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! # Lanes - Portable Fixed-Width SIMD Vectors
//!
//! This crate provides [`Vector<T, N>`], a fixed-width vector of `N` lanes of a numeric
//! type `T`, and a numeric cast engine that converts between vectors of any two element
//! types with the same lane count.
//!
//! ## Composition
//!
//! Vectors are defined recursively: every vector with more than one lane is the
//! concatenation of two vectors of half the width. [`SplitJoin`] moves between the two
//! views, and vectors that are exactly one hardware register wide (128, 256 or 512 bits,
//! depending on [`LEVEL`]) also convert to and from that register through
//! [`NativeRegister`].
//!
//! ## Casts
//!
//! * [`SIMDCast`]: numeric conversion modeled on Rust's `as`.
//! * [`SIMDSatCast`]: numeric conversion that saturates at the bounds of the destination.
//! * [`SIMDReinterpret`]: bit reinterpretation between element types of the same width.
//!
//! Each conversion is a chain of primitive kernels (see [`kernel`]). For a given width,
//! a kernel either maps onto a native instruction of the same width, is applied to a
//! duplicated vector when the instruction is wider, or recurses into the two halves when
//! the instruction is narrower or missing. One lane is always converted with the scalar
//! definition, so every pair of element types is supported at every width.
//!
//! ```
//! use diskann_lanes::{SplitJoin, Vector};
//!
//! let v = Vector::<u8, 16>::from_fn(|i| i as u8 * 17);
//! assert_eq!(v.sat_cast::<i8>()[15], 127);
//! assert_eq!(v.cast::<i8>()[15], -1);
//!
//! let f = v.cast::<f32>();
//! assert_eq!(f[15], 255.0);
//! assert_eq!(f.split().lo[1], 17.0);
//! ```
//!
//! ## Backends
//!
//! The backend is fixed at compile time from the target features, see [`arch`]. The
//! `scalar` Cargo feature forces the portable backend. Results are bit-identical on every
//! backend, NaN payloads aside, and are checked in tests against the scalar
//! [`reference`].

mod constant;
pub use constant::{Const, SupportedLaneCount};

pub mod element;
pub use element::{Element, Float, Integer, Kind};

mod error;
pub use error::Error;

mod vector;
pub use vector::Vector;

mod splitjoin;
pub use splitjoin::{LoHi, SplitJoin, join};

pub mod kernel;

pub mod engine;

mod cast;
pub use cast::{Route, SIMDCast, SIMDReinterpret, SIMDSatCast, cast, rcast, sat_cast};

pub mod reference;
pub use reference::{cast_bf16_to_f32, cast_f16_to_f32, cast_f32_to_bf16, cast_f32_to_f16};

/////////////////////////////
// Architecture Resolution //
/////////////////////////////

pub mod arch;
pub use arch::{Level, NativeRegister};

/// The backend level this crate was compiled for.
pub const LEVEL: arch::Level = arch::current();

//////////////
// Internal //
//////////////

pub(crate) mod helpers;

#[cfg(test)]
pub(crate) mod test_utils;

///////////
// Tests //
///////////
