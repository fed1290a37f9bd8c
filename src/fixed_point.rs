use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};
use core::str::FromStr;

#[cfg(feature = "serde")]
use core::marker::PhantomData;
#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::bits::Bits;
use crate::int::{convert_raw, Int, Widen};
use crate::FixedPointError;

/// A binary fixed-point number: an integer `raw` of type `T` holding the
/// value `raw / 2^F`.
///
/// `T` fixes the storage width and signedness, `F` the number of low-order
/// fraction bits. A `(T, F)` pair is called the value's *shape*; values of
/// the same shape are the same Rust type. A shape is valid when
/// `1 <= F <= 31` and `F < T::BITS`, which is enforced at compile time on
/// every construction path:
///
/// ```compile_fail
/// // eight fraction bits leave no whole bits in an 8-bit base
/// let x = fixq::FixedPoint::<u8, 8>::from_raw(0);
/// ```
///
/// ```compile_fail
/// // at least one fraction bit is required
/// let x = fixq::FixedPoint::<u8, 0>::from_raw(0);
/// ```
///
/// Arithmetic wraps on overflow (two's-complement truncation) and never
/// branches, traps or saturates; the same applies to narrowing conversions.
///
/// # Example
///
/// ```rust
/// use fixq::FixedPoint;
///
/// let a = FixedPoint::<u8, 3>::from_f64(2.625); // raw 21
/// let b = FixedPoint::<u8, 3>::from_f64(1.625); // raw 13
/// assert_eq!((a + b).to_f64(), 4.25);
/// ```
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct FixedPoint<T: Int, const F: u32> {
    raw: T,
}

// ============================================================================
// Constants
// ============================================================================

impl<T: Int, const F: u32> FixedPoint<T, F> {
    /// Number of fraction bits in this shape.
    pub const FRAC_BITS: u32 = F;

    /// Zero.
    pub const ZERO: Self = Self::from_raw(T::ZERO);

    /// Smallest representable step (raw value 1), equal to the resolution.
    pub const EPSILON: Self = Self::from_raw(T::ONE);

    /// Most negative representable value: `T::MIN / 2^F` for signed bases,
    /// zero for unsigned ones (where it coincides with [`ZERO`](Self::ZERO)).
    pub const MIN: Self = Self::from_raw(T::MIN);

    /// Largest representable value, `T::MAX / 2^F`.
    pub const MAX: Self = Self::from_raw(T::MAX);
}

impl<T: Int, const F: u32> Default for FixedPoint<T, F> {
    #[inline(always)]
    fn default() -> Self {
        Self::ZERO
    }
}

// ============================================================================
// Constructors and Raw Access
// ============================================================================

impl<T: Int, const F: u32> FixedPoint<T, F> {
    const fn check_shape() {
        assert!(F >= 1, "fixed-point shapes need at least one fraction bit");
        assert!(F <= 31, "fraction bit count may not exceed 31");
        assert!(
            F < T::BITS,
            "fraction bits must be strictly fewer than the storage width"
        );
    }

    /// Creates a value directly from its raw encoded storage.
    #[inline(always)]
    pub const fn from_raw(raw: T) -> Self {
        const { Self::check_shape() };
        Self { raw }
    }

    /// Returns the raw encoded storage.
    #[inline(always)]
    pub const fn to_raw(self) -> T {
        self.raw
    }

    /// Encodes an integer: `raw = value * 2^F`.
    ///
    /// The scaled value is computed in 64 bits and then bit-truncated into
    /// `T`, wrapping silently if it does not fit.
    #[inline(always)]
    pub fn from_int(value: i64) -> Self {
        Self::from_raw(T::from_i64(value.wrapping_mul(1i64 << F)))
    }

    /// The value 1.0 (raw `1 << F`).
    #[inline(always)]
    pub fn one() -> Self {
        Self::from_raw(T::ONE << F)
    }
}

// ============================================================================
// Float Conversions
// ============================================================================

impl<T: Int, const F: u32> FixedPoint<T, F> {
    /// Encodes a float: `raw = trunc(value * 2^F)` cast into `T`.
    ///
    /// Truncates toward zero (no rounding) and wraps on overflow of `T`.
    /// NaN encodes as zero; infinities clamp at the 64-bit intermediate
    /// before the final truncation.
    #[inline(always)]
    pub fn from_f64(value: f64) -> Self {
        let scaled = value * (1i64 << F) as f64;
        Self::from_raw(T::from_i64(scaled as i64))
    }

    /// Encodes a float through the f64 path.
    #[inline(always)]
    pub fn from_f32(value: f32) -> Self {
        Self::from_f64(value as f64)
    }

    /// Decodes to `raw / 2^F`.
    ///
    /// Exact for every supported shape: a 32-bit raw value divided by a
    /// power of two always fits an f64 mantissa.
    #[inline(always)]
    pub fn to_f64(self) -> f64 {
        self.raw.to_i64() as f64 / (1i64 << F) as f64
    }

    /// Decodes through the f64 path.
    #[inline(always)]
    pub fn to_f32(self) -> f32 {
        self.to_f64() as f32
    }
}

// ============================================================================
// Shape Conversion
// ============================================================================

impl<T: Int, const F: u32> FixedPoint<T, F> {
    /// Converts into the shape `(U, G)`, re-scaling the raw value by
    /// `G - F` bits.
    ///
    /// Scaling up widens into `U` before shifting left; scaling down shifts
    /// right inside `T` (arithmetic for signed bases) before narrowing.
    /// Narrowing truncates, so converting to a smaller or coarser shape can
    /// lose precision or wrap.
    ///
    /// ```rust
    /// use fixq::FixedPoint;
    ///
    /// let fine = FixedPoint::<i16, 12>::from_f64(1.125); // raw 4608
    /// let coarse: FixedPoint<u8, 4> = fine.convert();
    /// assert_eq!(coarse.to_raw(), 18);
    /// assert_eq!(coarse.to_f64(), 1.125);
    /// ```
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn convert<U: Int, const G: u32>(self) -> FixedPoint<U, G> {
        FixedPoint::from_raw(convert_raw(self.raw, G as i32 - F as i32))
    }
}

// ============================================================================
// Introspection
// ============================================================================

impl<T: Int, const F: u32> FixedPoint<T, F> {
    /// Smallest representable positive increment, `2^-F`.
    #[inline(always)]
    pub fn resolution() -> f64 {
        1.0 / (1i64 << F) as f64
    }

    // Low F bits set. F < T::BITS keeps the mask clear of the sign bit.
    #[inline(always)]
    fn frac_mask() -> T {
        T::from_i64((1i64 << F) - 1)
    }

    /// The full storage bit pattern.
    #[inline(always)]
    pub fn raw_bits(self) -> Bits<T> {
        Bits(self.raw)
    }

    /// The whole-number bits in place, fraction bits zeroed.
    #[inline(always)]
    pub fn whole_bits(self) -> Bits<T> {
        Bits(self.raw & !Self::frac_mask())
    }

    /// The fraction bits in place, whole bits zeroed.
    #[inline(always)]
    pub fn frac_bits(self) -> Bits<T> {
        Bits(self.raw & Self::frac_mask())
    }

    /// Returns `true` if the value is exactly zero.
    #[inline(always)]
    pub fn is_zero(self) -> bool {
        self.raw == T::ZERO
    }

    /// Returns `true` if the value is greater than zero.
    #[inline(always)]
    pub fn is_positive(self) -> bool {
        self.raw > T::ZERO
    }

    /// Returns `true` if the value is less than zero. Always `false` for
    /// unsigned bases.
    #[inline(always)]
    pub fn is_negative(self) -> bool {
        self.raw < T::ZERO
    }
}

// ============================================================================
// Unit Stepping
// ============================================================================

impl<T: Int, const F: u32> FixedPoint<T, F> {
    /// Steps up by one whole unit in place (`raw += 2^F`), wrapping at the
    /// storage boundary.
    #[inline(always)]
    pub fn inc(&mut self) {
        self.raw = self.raw.wrapping_add(T::ONE << F);
    }

    /// Steps down by one whole unit in place (`raw -= 2^F`), wrapping at
    /// the storage boundary.
    #[inline(always)]
    pub fn dec(&mut self) {
        self.raw = self.raw.wrapping_sub(T::ONE << F);
    }
}

// ============================================================================
// Operator Overloading
// ============================================================================

// Binary operators accept any right-hand shape; the result always takes the
// left operand's shape. `a + b` and `b + a` are therefore equal in value
// only up to the precision of each result shape.

impl<T, U, const F: u32, const G: u32> Add<FixedPoint<U, G>> for FixedPoint<T, F>
where
    T: Widen<U>,
    U: Int,
{
    type Output = FixedPoint<T, F>;

    #[inline(always)]
    fn add(self, rhs: FixedPoint<U, G>) -> Self::Output {
        let common = if F > G { F } else { G };
        let lhs: T::Wide = convert_raw(self.raw, (common - F) as i32);
        let rhs: T::Wide = convert_raw(rhs.raw, (common - G) as i32);
        FixedPoint::from_raw(convert_raw(
            lhs.wrapping_add(rhs),
            F as i32 - common as i32,
        ))
    }
}

impl<T, U, const F: u32, const G: u32> Sub<FixedPoint<U, G>> for FixedPoint<T, F>
where
    T: Widen<U>,
    U: Int,
{
    type Output = FixedPoint<T, F>;

    #[inline(always)]
    fn sub(self, rhs: FixedPoint<U, G>) -> Self::Output {
        let common = if F > G { F } else { G };
        let lhs: T::Wide = convert_raw(self.raw, (common - F) as i32);
        let rhs: T::Wide = convert_raw(rhs.raw, (common - G) as i32);
        FixedPoint::from_raw(convert_raw(
            lhs.wrapping_sub(rhs),
            F as i32 - common as i32,
        ))
    }
}

impl<T, U, const F: u32, const G: u32> Mul<FixedPoint<U, G>> for FixedPoint<T, F>
where
    T: Widen<U>,
    U: Int,
{
    type Output = FixedPoint<T, F>;

    #[inline(always)]
    fn mul(self, rhs: FixedPoint<U, G>) -> Self::Output {
        let lhs: T::Wide = convert_raw(self.raw, 0);
        let rhs: T::Wide = convert_raw(rhs.raw, 0);
        // The product carries F + G fraction bits; shifting G of them away
        // lands back on the left shape.
        FixedPoint::from_raw(convert_raw(lhs.wrapping_mul(rhs), -(G as i32)))
    }
}

impl<T, U, const F: u32, const G: u32> Div<FixedPoint<U, G>> for FixedPoint<T, F>
where
    T: Widen<U>,
    U: Int,
{
    type Output = FixedPoint<T, F>;

    /// Fixed-point division. The dividend is pre-scaled by the divisor's
    /// fraction bits in the widened intermediate, so the integer quotient
    /// carries exactly `F` fraction bits.
    ///
    /// # Panics
    ///
    /// Panics on a zero divisor, like the primitive operation.
    #[inline(always)]
    fn div(self, rhs: FixedPoint<U, G>) -> Self::Output {
        let dividend: T::Wide = convert_raw(self.raw, G as i32);
        let divisor: T::Wide = convert_raw(rhs.raw, 0);
        FixedPoint::from_raw(convert_raw(dividend.wrapping_div(divisor), 0))
    }
}

// Compound assignment is same-shape only: matching F means raw values
// combine directly, with no rescale step.

impl<T: Int, const F: u32> AddAssign for FixedPoint<T, F> {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        self.raw = self.raw.wrapping_add(rhs.raw);
    }
}

impl<T: Int, const F: u32> SubAssign for FixedPoint<T, F> {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Self) {
        self.raw = self.raw.wrapping_sub(rhs.raw);
    }
}

impl<T: Widen<T>, const F: u32> MulAssign for FixedPoint<T, F> {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<T: Widen<T>, const F: u32> DivAssign for FixedPoint<T, F> {
    #[inline(always)]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

// ============================================================================
// Comparison
// ============================================================================

// Cross-shape comparison converts the right operand into the left shape
// first, so it inherits that conversion's truncation: three values of
// different shapes need not order transitively, and `a == b` does not imply
// `b == a` across shapes. Same-shape comparison is exact raw comparison.

impl<T: Int, U: Int, const F: u32, const G: u32> PartialEq<FixedPoint<U, G>>
    for FixedPoint<T, F>
{
    #[inline(always)]
    fn eq(&self, other: &FixedPoint<U, G>) -> bool {
        self.raw == other.convert::<T, F>().raw
    }
}

impl<T: Int, const F: u32> Eq for FixedPoint<T, F> {}

impl<T: Int, U: Int, const F: u32, const G: u32> PartialOrd<FixedPoint<U, G>>
    for FixedPoint<T, F>
{
    #[inline(always)]
    fn partial_cmp(&self, other: &FixedPoint<U, G>) -> Option<Ordering> {
        Some(self.raw.cmp(&other.convert::<T, F>().raw))
    }
}

impl<T: Int, const F: u32> Ord for FixedPoint<T, F> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<T: Int, const F: u32> Hash for FixedPoint<T, F> {
    #[inline(always)]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

// ============================================================================
// String Parsing
// ============================================================================

impl<T: Int, const F: u32> FromStr for FixedPoint<T, F> {
    type Err = FixedPointError;

    /// Parses a decimal literal, truncating to the shape's resolution.
    ///
    /// Goes through `f64`, so anything `f64` parses is accepted except
    /// non-finite values, which are rejected along with malformed input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| FixedPointError::InvalidFormat)?;

        if !value.is_finite() {
            return Err(FixedPointError::InvalidFormat);
        }

        Ok(Self::from_f64(value))
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl<T: Int, const F: u32> fmt::Display for FixedPoint<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The f64 decode is exact for every supported shape, so the float
        // formatter prints the exact decimal expansion.
        fmt::Display::fmt(&self.to_f64(), f)
    }
}

impl<T: Int, const F: u32> fmt::Debug for FixedPoint<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            // {:#?} shows the encoding
            f.debug_struct("FixedPoint")
                .field("raw", &self.raw)
                .field("frac_bits", &F)
                .finish()
        } else {
            // {:?} shows the decoded value
            write!(f, "FixedPoint({})", self)
        }
    }
}

// ============================================================================
// Iterator Trait Implementations
// ============================================================================

impl<T: Widen<T>, const F: u32> Sum for FixedPoint<T, F> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl<'a, T: Widen<T>, const F: u32> Sum<&'a FixedPoint<T, F>> for FixedPoint<T, F> {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + *x)
    }
}

impl<T: Widen<T>, const F: u32> Product for FixedPoint<T, F> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::one(), |acc, x| acc * x)
    }
}

impl<'a, T: Widen<T>, const F: u32> Product<&'a FixedPoint<T, F>> for FixedPoint<T, F> {
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::one(), |acc, x| acc * *x)
    }
}

// ============================================================================
// Serde Support
// ============================================================================

#[cfg(feature = "serde")]
impl<T: Int, const F: u32> Serialize for FixedPoint<T, F> {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            // JSON, TOML, etc. - decimal string, no allocation
            serializer.collect_str(self)
        } else {
            // Bincode, MessagePack, etc. - raw value widened to i64 so the
            // wire form does not depend on the storage width
            serializer.serialize_i64(self.raw.to_i64())
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T: Int, const F: u32> Deserialize<'de> for FixedPoint<T, F> {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StrVisitor<T: Int, const F: u32>(PhantomData<FixedPoint<T, F>>);

        impl<T: Int, const F: u32> de::Visitor<'_> for StrVisitor<T, F> {
            type Value = FixedPoint<T, F>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a decimal string")
            }

            fn visit_str<E>(self, v: &str) -> core::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                v.parse().map_err(de::Error::custom)
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(StrVisitor(PhantomData))
        } else {
            let raw = i64::deserialize(deserializer)?;
            Ok(Self::from_raw(T::from_i64(raw)))
        }
    }
}
