//! Generic binary fixed-point arithmetic over small integer storage
//!
//! This library provides one numeric type, [`FixedPoint<T, F>`], which
//! stores the value `raw / 2^F` in a primitive integer `raw: T`:
//!
//! - **`T`**: the base type, any of `u8`/`i8`/`u16`/`i16`/`u32`/`i32`,
//!   fixing the storage width and signedness
//! - **`F`**: the number of low-order fraction bits, `1..=31` and strictly
//!   less than the storage width, checked at compile time
//!
//! Each `(T, F)` pair is a distinct *shape* with its own range and
//! resolution: `(u8, 4)` covers `[0, 16)` in steps of `1/16`, `(i16, 12)`
//! covers `[-8, 8)` in steps of `1/4096`.
//!
//! ## Features
//!
//! - **Pure integer arithmetic**: every operation is shifts, masks and
//!   multiplies; no floating-point in the arithmetic paths
//! - **Wrapping semantics**: overflow truncates two's-complement style,
//!   exactly like the underlying primitive; nothing saturates or traps
//! - **Cross-shape operators**: arithmetic and comparison accept mixed
//!   shapes, widening both sides internally; the result takes the left
//!   operand's shape
//! - **no_std compatible**: depends only on `core`
//! - **Serde support**: decimal strings for human-readable formats, raw
//!   values for binary ones
//!
//! ## Example
//!
//! ```rust
//! use fixq::FixedPoint;
//!
//! // u8 storage, four fraction bits: range [0, 16), resolution 1/16
//! let a = FixedPoint::<u8, 4>::from_f64(1.125);
//! let b = FixedPoint::<i16, 12>::from_f64(-0.125);
//!
//! // mixed shapes widen internally; the result takes the left shape
//! let sum = a + b;
//! assert_eq!(sum.to_f64(), 1.0);
//!
//! // comparison converts the right side into the left shape
//! assert_eq!(a, FixedPoint::<i16, 12>::from_f64(1.125));
//!
//! // the encoding is open for inspection
//! assert_eq!(sum.to_raw(), 16);
//! assert_eq!(sum.raw_bits().to_string(), "00010000");
//! ```

#![no_std]
#![cfg_attr(test, allow(unused_imports))]

#[cfg(test)]
extern crate std;

mod bits;
mod fixed_point;
mod int;

pub use bits::Bits;
pub use fixed_point::FixedPoint;
pub use int::{Int, Widen};

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedPointError {
    #[error("invalid string format")]
    InvalidFormat,
}

pub type Result<T> = core::result::Result<T, FixedPointError>;
