use core::fmt;
use core::hash::Hash;
use core::ops::{BitAnd, Not, Shl, Shr};

/// Integer storage backing a fixed-point shape.
///
/// Implemented for the supported base types (`i8`, `u8`, `i16`, `u16`,
/// `i32`, `u32`) and for `i64`, which serves as the widening fallback for
/// mixed-shape arithmetic and can also back a shape of its own.
///
/// The shift supertraits inherit the primitive semantics: `>>` is an
/// arithmetic shift for signed types and a logical shift for unsigned ones.
/// `to_i64`/`from_i64` reproduce `as`-cast semantics exactly: widening
/// sign-extends signed sources and zero-extends unsigned ones, narrowing
/// keeps the low bits (two's-complement truncation).
pub trait Int:
    Copy
    + Eq
    + Ord
    + Hash
    + fmt::Debug
    + fmt::Binary
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + BitAnd<Output = Self>
    + Not<Output = Self>
{
    /// Storage width in bits.
    const BITS: u32;

    /// Whether the type is signed.
    const SIGNED: bool;

    const ZERO: Self;
    const ONE: Self;
    const MIN: Self;
    const MAX: Self;

    fn wrapping_add(self, rhs: Self) -> Self;
    fn wrapping_sub(self, rhs: Self) -> Self;
    fn wrapping_mul(self, rhs: Self) -> Self;

    /// Wrapping division. Panics on a zero divisor, like the primitive.
    fn wrapping_div(self, rhs: Self) -> Self;

    /// Widens to i64, extending per the signedness of `Self`.
    fn to_i64(self) -> i64;

    /// Narrows from i64, keeping the low `BITS` bits.
    fn from_i64(v: i64) -> Self;
}

macro_rules! int_impl {
    ($($t:ty),*) => {$(
        impl Int for $t {
            const BITS: u32 = <$t>::BITS;
            const SIGNED: bool = <$t>::MIN != 0;

            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;

            #[inline(always)]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$t>::wrapping_add(self, rhs)
            }

            #[inline(always)]
            fn wrapping_sub(self, rhs: Self) -> Self {
                <$t>::wrapping_sub(self, rhs)
            }

            #[inline(always)]
            fn wrapping_mul(self, rhs: Self) -> Self {
                <$t>::wrapping_mul(self, rhs)
            }

            #[inline(always)]
            fn wrapping_div(self, rhs: Self) -> Self {
                <$t>::wrapping_div(self, rhs)
            }

            #[inline(always)]
            fn to_i64(self) -> i64 {
                self as i64
            }

            #[inline(always)]
            fn from_i64(v: i64) -> Self {
                v as $t
            }
        }
    )*};
}

int_impl!(i8, u8, i16, u16, i32, u32, i64);

/// Widening-type selection for binary operations between two base types.
///
/// `Wide` is the intermediate type an operation on `(Self, Rhs)` raw values
/// is computed in, chosen so the full-precision intermediate fits without
/// overflow wherever the storage hierarchy allows. The mapping is a fixed
/// lookup table, total over all supported base-type pairs: a same-width pair
/// of matching signedness widens one step (8→16, 16→32; 32-bit pairs stay at
/// 32 bits as the practical ceiling), and every mismatched or unlisted pair
/// falls back to `i64` as the safe default.
pub trait Widen<Rhs: Int>: Int {
    type Wide: Int;
}

macro_rules! widen_impl {
    ($($lhs:ty, $rhs:ty => $wide:ty),* $(,)?) => {$(
        impl Widen<$rhs> for $lhs {
            type Wide = $wide;
        }
    )*};
}

widen_impl! {
    // Matching signedness, matching width: one step up, ceiling at 32 bits.
    u8,  u8  => u16,
    i8,  i8  => i16,
    u16, u16 => u32,
    i16, i16 => i32,
    u32, u32 => u32,
    i32, i32 => i32,
    i64, i64 => i64,

    // Everything else: 64-bit signed fallback.
    u8,  i8  => i64,
    u8,  u16 => i64,
    u8,  i16 => i64,
    u8,  u32 => i64,
    u8,  i32 => i64,
    u8,  i64 => i64,

    i8,  u8  => i64,
    i8,  u16 => i64,
    i8,  i16 => i64,
    i8,  u32 => i64,
    i8,  i32 => i64,
    i8,  i64 => i64,

    u16, u8  => i64,
    u16, i8  => i64,
    u16, i16 => i64,
    u16, u32 => i64,
    u16, i32 => i64,
    u16, i64 => i64,

    i16, u8  => i64,
    i16, i8  => i64,
    i16, u16 => i64,
    i16, u32 => i64,
    i16, i32 => i64,
    i16, i64 => i64,

    u32, u8  => i64,
    u32, i8  => i64,
    u32, u16 => i64,
    u32, i16 => i64,
    u32, i32 => i64,
    u32, i64 => i64,

    i32, u8  => i64,
    i32, i8  => i64,
    i32, u16 => i64,
    i32, i16 => i64,
    i32, u32 => i64,
    i32, i64 => i64,

    i64, u8  => i64,
    i64, i8  => i64,
    i64, u16 => i64,
    i64, i16 => i64,
    i64, u32 => i64,
    i64, i32 => i64,
}

/// Re-scales a raw value while moving it between storage types.
///
/// `shift` is the fractional-bit delta (target minus source). Scaling up
/// casts into `J` first and then shifts left, so high bits gained by the
/// wider target survive. Scaling down shifts right in `I` first (arithmetic
/// for signed `I`, logical for unsigned) and only then casts, so discarded
/// fraction bits never smear into the narrowed result. The two orderings
/// must never be swapped.
#[inline(always)]
pub(crate) fn convert_raw<I: Int, J: Int>(raw: I, shift: i32) -> J {
    if shift > 0 {
        J::from_i64(raw.to_i64()) << shift as u32
    } else {
        J::from_i64((raw >> (-shift) as u32).to_i64())
    }
}

#[cfg(test)]
mod tests {
    use core::any::type_name;

    use super::*;

    fn wide<T: Widen<U>, U: Int>() -> &'static str {
        type_name::<T::Wide>()
    }

    #[test]
    fn test_widen_matching_pairs() {
        assert_eq!(wide::<u8, u8>(), "u16");
        assert_eq!(wide::<i8, i8>(), "i16");
        assert_eq!(wide::<u16, u16>(), "u32");
        assert_eq!(wide::<i16, i16>(), "i32");
        assert_eq!(wide::<u32, u32>(), "u32");
        assert_eq!(wide::<i32, i32>(), "i32");
    }

    #[test]
    fn test_widen_mismatched_pairs_fall_back_to_i64() {
        assert_eq!(wide::<u8, i8>(), "i64");
        assert_eq!(wide::<i16, u16>(), "i64");
        assert_eq!(wide::<u8, u16>(), "i64");
        assert_eq!(wide::<u32, i32>(), "i64");
        assert_eq!(wide::<i32, u8>(), "i64");
    }

    #[test]
    fn test_signedness_flags() {
        assert!(i8::SIGNED);
        assert!(i16::SIGNED);
        assert!(i32::SIGNED);
        assert!(!u8::SIGNED);
        assert!(!u16::SIGNED);
        assert!(!u32::SIGNED);
    }

    #[test]
    fn test_cast_widening_extends_by_signedness() {
        assert_eq!((-1i8).to_i64(), -1);
        assert_eq!(0xF0u8.to_i64(), 240);
        assert_eq!((-512i16).to_i64(), -512);
        assert_eq!(u32::MAX.to_i64(), 4_294_967_295);
    }

    #[test]
    fn test_cast_narrowing_truncates() {
        assert_eq!(u8::from_i64(0x1FF), 0xFF);
        assert_eq!(i8::from_i64(0x80), -128);
        assert_eq!(u16::from_i64(-1), 0xFFFF);
        assert_eq!(i32::from_i64(0x1_8000_0000), i32::MIN);
    }

    #[test]
    fn test_convert_raw_scale_up() {
        // 4 shifted one fraction bit up doubles the raw value.
        assert_eq!(convert_raw::<u8, u8>(4, 1), 8);
        // Widening first makes room for the scaled value.
        assert_eq!(convert_raw::<u8, i16>(4, 3), 32);
    }

    #[test]
    fn test_convert_raw_zero_shift_is_identity() {
        assert_eq!(convert_raw::<u8, u8>(4, 0), 4);
        assert_eq!(convert_raw::<i16, i16>(-123, 0), -123);
    }

    #[test]
    fn test_convert_raw_scale_down() {
        assert_eq!(convert_raw::<u8, i8>(4, -1), 2);
        // Arithmetic shift preserves the sign while scaling down.
        assert_eq!(convert_raw::<i16, i16>(-512, -8), -2);
        assert_eq!(convert_raw::<i16, i8>(-512, -4), -32);
    }

    #[test]
    fn test_convert_raw_shifts_before_narrowing() {
        // Scaling down after narrowing would read garbage high bits; the
        // shift happens in the source width, so the high bits participate.
        assert_eq!(convert_raw::<u16, u8>(0x0F00, -8), 0x0F);
        // Scaling up after narrowing would lose high bits; the cast happens
        // first, so they survive into the wider target.
        assert_eq!(convert_raw::<u8, u16>(0xFF, 4), 0x0FF0);
    }
}
