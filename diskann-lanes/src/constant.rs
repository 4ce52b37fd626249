/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use crate::element::{ByteWidth, Element, Marker};

/// Move a const-generic into the type domain to work around issues with the use and
/// compile-time computation involving const-generic parameters.
pub struct Const<const N: usize> {}

mod sealed {
    pub trait Sealed {}
}

/// Lane counts for which a [`crate::Vector`] exists: the powers of two from 1 to 64.
///
/// The associated `Align` picks a zero-sized marker whose alignment is
/// `N * size_of::<T>()`, giving every vector its natural alignment without changing its
/// size.
pub trait SupportedLaneCount: sealed::Sealed {
    /// The number of lanes.
    const LANES: usize;

    /// Alignment marker for a vector of `T`.
    type Align<T: Element>: Marker;
}

macro_rules! supported {
    ($N:literal, $X:ident) => {
        impl sealed::Sealed for Const<$N> {}

        impl SupportedLaneCount for Const<$N> {
            const LANES: usize = $N;
            type Align<T: Element> = <T::Width as ByteWidth>::$X;
        }
    };
}

supported!(1, X1);
supported!(2, X2);
supported!(4, X4);
supported!(8, X8);
supported!(16, X16);
supported!(32, X32);
supported!(64, X64);
