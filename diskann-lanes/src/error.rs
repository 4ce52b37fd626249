/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use thiserror::Error;

/// Errors raised when moving lanes between a [`crate::Vector`] and memory.
///
/// Conversions between vectors are total and never produce an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("slice has length {actual} but the vector has {expected} lanes")]
    LengthMismatch { expected: usize, actual: usize },
}
