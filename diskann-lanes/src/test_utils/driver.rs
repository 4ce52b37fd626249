/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use half::{bf16, f16};
use rand::{
    Rng, SeedableRng,
    distr::{Distribution, StandardUniform},
    rngs::StdRng,
    seq::SliceRandom,
};

use super::distribution;

pub(crate) trait ScalarDriver: Default + Copy + 'static {
    /// The distribution used for random sampling.
    type Distribution: Distribution<Self>;

    /// A collection of scalar test values.
    ///
    /// The test driver will ensure that every lane sees every test value.
    fn test_values() -> &'static [Self];

    /// Return the test distribution for random testing.
    fn distribution() -> Self::Distribution;
}

impl ScalarDriver for f16 {
    type Distribution = distribution::Finite;

    fn test_values() -> &'static [Self] {
        const VALUES: &[f16] = &[
            f16::from_f32_const(0.0),
            f16::from_f32_const(0.5),
            f16::from_f32_const(1.0),
            f16::from_f32_const(2.9),
            f16::from_f32_const(127.5),
            f16::from_f32_const(255.0),
            f16::from_f32_const(256.0),
            f16::from_f32_const(1000.0),
            f16::from_f32_const(-0.0),
            f16::from_f32_const(-0.5),
            f16::from_f32_const(-1.0),
            f16::from_f32_const(-2.9),
            f16::from_f32_const(-128.5),
            f16::from_f32_const(-1000.0),
            f16::MAX,
            f16::MIN,
            f16::MIN_POSITIVE_SUBNORMAL,
            // exceptional values
            f16::INFINITY,
            f16::NEG_INFINITY,
            f16::NAN,
        ];
        VALUES
    }

    fn distribution() -> Self::Distribution {
        distribution::Finite
    }
}

impl ScalarDriver for bf16 {
    type Distribution = distribution::Finite;

    fn test_values() -> &'static [Self] {
        const VALUES: &[bf16] = &[
            bf16::from_f32_const(0.0),
            bf16::from_f32_const(1.0),
            bf16::from_f32_const(2.5),
            bf16::from_f32_const(128.0),
            bf16::from_f32_const(65536.0),
            bf16::from_f32_const(2147483648.0),
            bf16::from_f32_const(-0.0),
            bf16::from_f32_const(-1.0),
            bf16::from_f32_const(-2.5),
            bf16::from_f32_const(-129.0),
            bf16::from_f32_const(-2147483648.0),
            bf16::MAX,
            bf16::MIN,
            bf16::MIN_POSITIVE_SUBNORMAL,
            // exceptional values
            bf16::INFINITY,
            bf16::NEG_INFINITY,
            bf16::NAN,
        ];
        VALUES
    }

    fn distribution() -> Self::Distribution {
        distribution::Finite
    }
}

impl ScalarDriver for f32 {
    type Distribution = distribution::Finite;

    #[cfg(not(miri))]
    fn test_values() -> &'static [Self] {
        &[
            -0.0,
            -0.5,
            -1.0,
            -2.9,
            -127.5,
            -128.5,
            -32768.0,
            -32769.0,
            0.0,
            0.5,
            1.0,
            2.9,
            127.5,
            255.9,
            256.0,
            65535.0,
            65536.0,
            // Integer boundaries.
            2147483520.0,
            2147483648.0,
            -2147483648.0,
            -2147483904.0,
            4294967040.0,
            4294967296.0,
            9223371487098961920.0,
            9223372036854775808.0,
            -9223372036854775808.0,
            18446744073709551616.0,
            f32::MAX,
            f32::MIN,
            // A few random subnormal numbers.
            -2.64697e-40,
            7.653053e-39,
            1.0481945e-38,
            // exceptional values
            f32::INFINITY,
            f32::NEG_INFINITY,
            f32::NAN,
        ]
    }

    #[cfg(miri)]
    fn test_values() -> &'static [Self] {
        &[
            -0.0,
            -1.0,
            0.0,
            1.0,
            2147483648.0,
            -2.64697e-40,
            // exceptional values
            f32::INFINITY,
            f32::NEG_INFINITY,
            f32::NAN,
        ]
    }

    fn distribution() -> Self::Distribution {
        distribution::Finite
    }
}

impl ScalarDriver for f64 {
    type Distribution = distribution::Finite;

    fn test_values() -> &'static [Self] {
        &[
            -0.0,
            -0.5,
            -1.0,
            -2.9,
            -128.5,
            0.0,
            0.5,
            1.0,
            2.9,
            255.9,
            65536.0,
            // Integer boundaries.
            2147483647.5,
            2147483648.0,
            -2147483649.0,
            4294967295.0,
            4294967296.0,
            9223372036854774784.0,
            9223372036854775808.0,
            -9223372036854775808.0,
            18446744073709549568.0,
            18446744073709551616.0,
            // Rounds when demoted to `f32`.
            16777217.0,
            1e39,
            f64::MAX,
            f64::MIN,
            4.9e-324,
            // exceptional values
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NAN,
        ]
    }

    fn distribution() -> Self::Distribution {
        distribution::Finite
    }
}

macro_rules! unsigned_int_scalar_driver {
    ($T:ident) => {
        impl ScalarDriver for $T {
            type Distribution = StandardUniform;

            #[cfg(not(miri))]
            fn test_values() -> &'static [Self] {
                &[
                     0,  1,  2,  3,  4,  5,  6,  7,  8,  9,
                    10, 11, 12, 13, 14, 15, 16, 17, 18, 19,
                    20, 21, 22, 23, 24, 25, 26, 27, 28, 29,
                    30, 31, 32,
                    $T::MAX / 2, $T::MAX / 2 + 1,
                    $T::MAX, $T::MAX - 1,
                ]
            }
            #[cfg(miri)]
            fn test_values() -> &'static [Self] {
                &[0, 1, 2, $T::MAX / 2 + 1, $T::MAX]
            }
            fn distribution() -> Self::Distribution {
                StandardUniform {}
            }
        }
    };
    ($($T:ident,)+) => {
        $(unsigned_int_scalar_driver!($T);)*
    };
}

unsigned_int_scalar_driver!(u8, u16, u32, u64,);

macro_rules! signed_int_scalar_driver {
    ($T:ident) => {
        impl ScalarDriver for $T {
            type Distribution = StandardUniform;

            #[cfg(not(miri))]
            fn test_values() -> &'static [Self] {
                &[
                    -1, -2, -3, -4, -5, -6, -7, -8, -9,-10,
                     0,  1,  2,  3,  4,  5,  6,  7,  8,  9,
                    10, 11, 12, 13, 14, 15, 16, 17, 18, 19,
                    20, 21, 22, 23, 24, 25, 26, 27, 28, 29,
                    30, 31, 32,
                    $T::MAX / 2, $T::MIN / 2,
                    $T::MAX, $T::MAX - 1, $T::MIN, $T::MIN + 1,
                ]
            }
            #[cfg(miri)]
            fn test_values() -> &'static [Self] {
                &[-1, 0, 1, $T::MAX, $T::MIN]
            }
            fn distribution() -> Self::Distribution {
                StandardUniform {}
            }
        }
    };
    ($($T:ident,)+) => {
        $(signed_int_scalar_driver!($T);)*
    };
}

signed_int_scalar_driver!(i8, i16, i32, i64,);

/// Spread the test values of `T` across `lane_count` lanes.
///
/// Each row holds one permutation of the test values per lane, so every lane sees every
/// test value exactly once across the rows.
#[derive(Debug, Clone)]
struct SIMDDriver<T>
where
    T: ScalarDriver,
{
    values: Vec<Vec<T>>,
}

impl<T> SIMDDriver<T>
where
    T: ScalarDriver,
{
    fn new<R>(lane_count: usize, rng: &mut R) -> Self
    where
        R: Rng,
    {
        let mut test_values = T::test_values().to_vec();

        let mut values: Vec<Vec<T>> = (0..test_values.len())
            .map(|_| vec![T::default(); lane_count])
            .collect();

        for lane in 0..lane_count {
            test_values.shuffle(rng);
            for (dst, src) in std::iter::zip(values.iter_mut(), test_values.iter()) {
                dst[lane] = *src;
            }
        }

        Self { values }
    }

    fn iter(&self) -> impl Iterator<Item = &[T]> {
        self.values.iter().map(|i| i.as_slice())
    }
}

cfg_if::cfg_if! {
    if #[cfg(miri)] {
        const NUM_RANDOM_TRIALS: usize = 0;
    } else {
        const NUM_RANDOM_TRIALS: usize = 2000;
    }
}

pub(crate) type Fn1<T> = dyn Fn(&[T]);

/// Call `f` on every row of test values, then on random inputs, all with `lane_count`
/// lanes.
pub(crate) fn drive_unary<T>(f: &Fn1<T>, lane_count: usize, seed: u64)
where
    T: ScalarDriver,
{
    let mut rng = StdRng::seed_from_u64(seed);
    let driver = SIMDDriver::<T>::new(lane_count, &mut rng);

    for value in driver.iter() {
        f(value)
    }

    let mut arg: Box<[_]> = (0..lane_count).map(|_| T::default()).collect();
    for _ in 0..NUM_RANDOM_TRIALS {
        arg.iter_mut()
            .for_each(|i| *i = T::distribution().sample(&mut rng));
        f(&arg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_lane_sees_every_value() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let driver = SIMDDriver::<i8>::new(16, &mut rng);
        let n = i8::test_values().len();
        assert_eq!(driver.iter().count(), n);
        for lane in 0..16 {
            let mut seen: Vec<i8> = driver.iter().map(|row| row[lane]).collect();
            let mut expected = i8::test_values().to_vec();
            seen.sort_unstable();
            expected.sort_unstable();
            assert_eq!(seen, expected);
        }
    }
}
