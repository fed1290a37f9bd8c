use core::fmt;

use crate::int::Int;

/// A debugging view of a raw storage value as its full-width bit pattern.
///
/// Renders as zero-padded two's-complement binary, one character per storage
/// bit, so an 8-bit value always prints eight digits. Produced by
/// [`FixedPoint::raw_bits`], [`FixedPoint::whole_bits`] and
/// [`FixedPoint::frac_bits`]; never consulted by arithmetic.
///
/// [`FixedPoint::raw_bits`]: crate::FixedPoint::raw_bits
/// [`FixedPoint::whole_bits`]: crate::FixedPoint::whole_bits
/// [`FixedPoint::frac_bits`]: crate::FixedPoint::frac_bits
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Bits<T: Int>(pub(crate) T);

impl<T: Int> Bits<T> {
    /// Returns the masked storage value behind the view.
    #[inline(always)]
    pub fn value(self) -> T {
        self.0
    }
}

impl<T: Int> fmt::Display for Bits<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.0, width = T::BITS as usize)
    }
}

impl<T: Int> fmt::Debug for Bits<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bits({})", self)
    }
}
