/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

/// Reinterpret the bits of `x` as a `U`.
///
/// This is how vectors move in and out of hardware registers, and how the matcher hands
/// a vector to a native kernel once the lane counts are known to agree.
///
/// # Panics
///
/// Panics if `T` and `U` differ in size. Every call site selects this path from
/// compile-time constants, so the check folds away.
///
/// # Safety
///
/// Every bit pattern of `T` must be a valid `U`. This holds for all pairings of
/// [`crate::Element`]s, arrays and vectors of them, and SIMD register types.
#[inline(always)]
pub(crate) unsafe fn retype<T: Copy, U: Copy>(x: T) -> U {
    assert_eq!(
        std::mem::size_of::<T>(),
        std::mem::size_of::<U>(),
        "retype between types of different sizes"
    );
    // SAFETY: The sizes agree and the caller guarantees the bits of `x` form a valid `U`.
    // `transmute_copy` performs an unaligned read, so alignment differences are fine.
    unsafe { std::mem::transmute_copy(&x) }
}

/// Implement [`crate::arch::NativeRegister`] for vectors whose size matches a register.
macro_rules! native_register {
    ($($T:ty, $N:literal => $R:ty);* $(;)?) => {
        $(
            impl $crate::arch::NativeRegister for $crate::Vector<$T, $N> {
                type Register = $R;

                #[inline(always)]
                fn to_vec(self) -> $R {
                    // SAFETY: Vectors and registers are plain data of the same size.
                    unsafe { $crate::helpers::retype(self) }
                }

                #[inline(always)]
                fn from_vec(register: $R) -> Self {
                    // SAFETY: Vectors and registers are plain data of the same size.
                    unsafe { $crate::helpers::retype(register) }
                }
            }
        )*
    };
}

#[allow(unused_imports)]
pub(crate) use native_register;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retype_preserves_bits() {
        // SAFETY: Integers of the same size.
        let x: [u8; 4] = unsafe { retype(0x0403_0201u32.to_le()) };
        assert_eq!(x, [1, 2, 3, 4]);
    }

    #[test]
    #[should_panic(expected = "retype between types of different sizes")]
    fn retype_checks_sizes() {
        // SAFETY: The size check fires before any bits are read.
        let _: u64 = unsafe { retype(0u32) };
    }
}
