/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use std::fmt::Debug;

use half::{bf16, f16};

pub(crate) mod distribution;
pub(crate) mod driver;

/// Bitwise equality, except that any two NaNs compare equal.
pub(crate) trait ExactEq: Copy {
    fn exact_eq(self, other: Self) -> bool;
}

macro_rules! exact_eq_int {
    ($($T:ty),*) => {
        $(
            impl ExactEq for $T {
                fn exact_eq(self, other: Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

macro_rules! exact_eq_float {
    ($($T:ty),*) => {
        $(
            impl ExactEq for $T {
                fn exact_eq(self, other: Self) -> bool {
                    (self.is_nan() && other.is_nan()) || self.to_bits() == other.to_bits()
                }
            }
        )*
    };
}

exact_eq_int!(i8, i16, i32, i64, u8, u16, u32, u64);
exact_eq_float!(f16, bf16, f32, f64);

/// Test that calling `op` on each input yields the exact same value as that in the
/// corresponding position in `got`.
#[inline(never)]
pub(crate) fn test_unary_op<T, U>(input: &[T], got: &[U], op: &dyn Fn(T) -> U, context: &str)
where
    T: Copy + Debug,
    U: Debug + ExactEq,
{
    let len = input.len();
    assert_eq!(len, got.len());
    for i in 0..len {
        let expected = op(input[i]);
        assert!(
            expected.exact_eq(got[i]),
            "failed for input {:?}. Got {:?}, expected {:?} at index {}. context: {}",
            input[i],
            got[i],
            expected,
            i,
            context
        )
    }
}

/// Check the plain and saturating casts of one width against the scalar reference.
macro_rules! test_cast {
    ($from:ident => $to:ident, $N:literal, $seed:literal) => {
        paste::paste! {
            #[test]
            fn [<cast_ $from x $N _to_ $to>]() {
                use $crate::{
                    Vector,
                    reference::{reference_cast, reference_sat_cast},
                };

                let f = |input: &[$from]| {
                    let v = Vector::<$from, $N>::try_from_slice(input).unwrap();

                    $crate::test_utils::test_unary_op(
                        input,
                        v.cast::<$to>().as_array(),
                        &reference_cast::<$from, $to>,
                        "cast",
                    );
                    $crate::test_utils::test_unary_op(
                        input,
                        v.sat_cast::<$to>().as_array(),
                        &reference_sat_cast::<$from, $to>,
                        "saturating cast",
                    );
                };

                $crate::test_utils::driver::drive_unary(&f, $N, $seed);
            }
        }
    };
}

pub(crate) use test_cast;
