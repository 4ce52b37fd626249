/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! The portable backend. No kernel has a native implementation, so every conversion is
//! decomposed down to single lanes.

use super::{Level, SCALAR};
use crate::{
    Const, SupportedLaneCount, Vector,
    element::Element,
    kernel::{all_kernels, no_native},
};

pub(super) const LEVEL: Level = SCALAR;

pub(super) fn detect() -> Level {
    LEVEL
}

#[inline(always)]
pub(super) fn join<T, const H: usize, const N: usize>(
    _lo: Vector<T, H>,
    _hi: Vector<T, H>,
) -> Option<Vector<T, N>>
where
    T: Element,
    Const<H>: SupportedLaneCount,
    Const<N>: SupportedLaneCount,
{
    None
}

all_kernels!(no_native);
