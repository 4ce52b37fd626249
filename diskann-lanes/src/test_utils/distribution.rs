/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! A distribution that generates random floating point numbers drawn from the following:
//!
//! - Normal (generating normal values uniformly)
//! - Subnormal
//! - Zero
//!
//! Within each category, positive and negative values are distributed evenly. Since every
//! normal exponent is equally likely, most samples are far outside the range of any
//! integer, which exercises the saturating paths of the float to integer casts.

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};

pub(crate) trait Layout {
    type Bits;

    const SIGN_MASK: Self::Bits;
    const EXPONENT_MASK: Self::Bits;

    // The exponent bits of `1.0`.
    const EXPONENT_ZERO: Self::Bits;
    const MANTISSA_MASK: Self::Bits;
}

impl Layout for half::f16 {
    type Bits = u16;

    const SIGN_MASK: u16 = 0x8000;
    const EXPONENT_MASK: u16 = 0x7C00;
    const EXPONENT_ZERO: u16 = 0x3C00;
    const MANTISSA_MASK: u16 = 0x03FF;
}

impl Layout for half::bf16 {
    type Bits = u16;

    const SIGN_MASK: u16 = 0x8000;
    const EXPONENT_MASK: u16 = 0x7F80;
    const EXPONENT_ZERO: u16 = 0x3F80;
    const MANTISSA_MASK: u16 = 0x007F;
}

impl Layout for f32 {
    type Bits = u32;

    const SIGN_MASK: u32 = 0x8000_0000;
    const EXPONENT_MASK: u32 = 0x7F80_0000;
    const EXPONENT_ZERO: u32 = 0x3F80_0000;
    const MANTISSA_MASK: u32 = 0x007F_FFFF;
}

impl Layout for f64 {
    type Bits = u64;

    const SIGN_MASK: u64 = 0x8000_0000_0000_0000;
    const EXPONENT_MASK: u64 = 0x7FF0_0000_0000_0000;
    const EXPONENT_ZERO: u64 = 0x3FF0_0000_0000_0000;
    const MANTISSA_MASK: u64 = 0x000F_FFFF_FFFF_FFFF;
}

/// A distribution for generating finite floating point numbers.
pub(crate) struct Finite;

macro_rules! finite {
    ($T:ty, $bits:ty) => {
        impl Distribution<$T> for Finite {
            /// Generate floating point numbers spread more-or-less uniformly across the
            /// distribution of floating point numbers.
            ///
            /// For normal values, every normal floating point number is generated with
            /// equal probability. Subnormals and zeros are also yielded with some
            /// regularity. Positive and negative values are equally likely.
            ///
            /// This function does not generate infinities or NaNs.
            fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> $T {
                let mut value: $bits = StandardUniform {}.sample(rng);

                let weight = value % 100;
                let (mask, allow_edge_exponent, allow_zero_mantissa) = if weight < 90 {
                    // Normal: the exponent can be neither all zeros nor all ones.
                    (<$T>::EXPONENT_MASK | <$T>::MANTISSA_MASK, false, true)
                } else if weight < 95 {
                    // Subnormal: the exponent is all zeros and the mantissa is not.
                    (<$T>::MANTISSA_MASK, true, false)
                } else {
                    (0, true, true)
                };

                value &= <$T>::SIGN_MASK | mask;
                let exponent = value & <$T>::EXPONENT_MASK;

                if !allow_edge_exponent && (exponent == 0 || exponent == <$T>::EXPONENT_MASK) {
                    value &= !<$T>::EXPONENT_MASK;
                    value |= <$T>::EXPONENT_ZERO;
                }

                if !allow_zero_mantissa && (value & <$T>::MANTISSA_MASK == 0) {
                    value |= 1;
                }

                <$T>::from_bits(value)
            }
        }
    };
}

finite!(half::f16, u16);
finite!(half::bf16, u16);
finite!(f32, u32);
finite!(f64, u64);

///////////
// Tests //
///////////

#[cfg(not(miri))]
#[cfg(test)]
mod tests {
    use rand::{SeedableRng, distr::Distribution, rngs::StdRng};

    use super::*;

    #[derive(Debug, Default)]
    struct Kinds {
        normal: i64,
        subnormal: i64,
        zero: i64,
    }

    impl Kinds {
        fn sum(&self) -> i64 {
            self.normal + self.subnormal + self.zero
        }
    }

    #[derive(Debug, Default)]
    struct Counts {
        positive: Kinds,
        negative: Kinds,
    }

    trait TestDistribution {
        fn test_distribution(num_trials: usize, seed: u64) -> Counts;
    }

    // Classify through the bit layout, which `f16` and `bf16` share no methods for.
    macro_rules! test_distribution {
        ($T:ty) => {
            impl TestDistribution for $T {
                fn test_distribution(num_trials: usize, seed: u64) -> Counts {
                    let mut counts = Counts::default();
                    let mut rng = StdRng::seed_from_u64(seed);
                    for _ in 0..num_trials {
                        let v: $T = (Finite).sample(&mut rng);
                        let bits = v.to_bits();
                        let exponent = bits & <$T>::EXPONENT_MASK;
                        let mantissa = bits & <$T>::MANTISSA_MASK;

                        assert_ne!(exponent, <$T>::EXPONENT_MASK, "generated {:?}", v);

                        let kinds = if bits & <$T>::SIGN_MASK == 0 {
                            &mut counts.positive
                        } else {
                            &mut counts.negative
                        };
                        if exponent != 0 {
                            kinds.normal += 1;
                        } else if mantissa != 0 {
                            kinds.subnormal += 1;
                        } else {
                            kinds.zero += 1;
                        }
                    }
                    counts
                }
            }
        };
    }

    test_distribution!(half::f16);
    test_distribution!(half::bf16);
    test_distribution!(f32);
    test_distribution!(f64);

    fn test_end_to_end<T>(seed: u64)
    where
        T: TestDistribution,
    {
        let num_trials: i64 = 200_000;
        let margin = num_trials / 200;
        let counts = T::test_distribution(num_trials as usize, seed);

        assert!((counts.positive.sum() - num_trials / 2).abs() < margin, "{counts:?}");
        assert!((counts.negative.sum() - num_trials / 2).abs() < margin, "{counts:?}");

        let normal = counts.positive.normal + counts.negative.normal;
        let subnormal = counts.positive.subnormal + counts.negative.subnormal;
        let zero = counts.positive.zero + counts.negative.zero;

        assert!((normal - num_trials * 90 / 100).abs() < margin, "{counts:?}");
        assert!((subnormal - num_trials * 5 / 100).abs() < margin, "{counts:?}");
        assert!((zero - num_trials * 5 / 100).abs() < margin, "{counts:?}");
    }

    #[test]
    fn finite_f16() {
        test_end_to_end::<half::f16>(0x4b9a_3c1d_77e2_0f51);
    }

    #[test]
    fn finite_bf16() {
        test_end_to_end::<half::bf16>(0x1f2e_3d4c_5b6a_7988);
    }

    #[test]
    fn finite_f32() {
        test_end_to_end::<f32>(0xd1e2_0c73_9a8b_4f65);
    }

    #[test]
    fn finite_f64() {
        test_end_to_end::<f64>(0x0a1b_2c3d_4e5f_6071);
    }
}
