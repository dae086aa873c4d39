//! Finite field arithmetic over packed byte buffers
//!
//! Every field used by the coders has characteristic two, so addition and
//! subtraction are both XOR. Coefficient vectors and symbols are stored packed
//! at the field's bit width, and all bulk operations work directly on those
//! packed buffers.

mod binary;
mod binary16;
mod binary4;
mod binary8;

pub use binary::Binary;
pub use binary16::Binary16;
pub use binary4::Binary4;
pub use binary8::Binary8;

use enum_dispatch::enum_dispatch;

/// Field operations on single elements and on packed buffers
#[enum_dispatch]
pub trait FieldOps {
    /// Number of bits per field element
    fn degree(&self) -> u32;

    /// Largest element value
    fn max_value(&self) -> u32 {
        (1u32 << self.degree()) - 1
    }

    /// Multiply two elements
    fn multiply(&self, a: u32, b: u32) -> u32;

    /// Multiplicative inverse. Panics on zero.
    fn invert(&self, a: u32) -> u32;

    /// Add two elements
    #[inline]
    fn add(&self, a: u32, b: u32) -> u32 {
        a ^ b
    }

    /// Subtract two elements (identical to addition in GF(2^k))
    #[inline]
    fn subtract(&self, a: u32, b: u32) -> u32 {
        a ^ b
    }

    /// Divide `a` by `b`. Panics when `b` is zero.
    fn divide(&self, a: u32, b: u32) -> u32 {
        self.multiply(a, self.invert(b))
    }

    /// Bytes needed to hold `elements` packed elements
    fn elements_to_bytes(&self, elements: usize) -> usize {
        (elements * self.degree() as usize + 7) / 8
    }

    /// Read element `index` from a packed buffer
    fn get_value(&self, data: &[u8], index: usize) -> u32;

    /// Write element `index` into a packed buffer
    fn set_value(&self, data: &mut [u8], index: usize, value: u32);

    /// `dst += scalar * src` over packed buffers of equal length
    fn multiply_add(&self, dst: &mut [u8], src: &[u8], scalar: u32);

    /// `dst *= scalar` over a packed buffer
    fn multiply_assign(&self, dst: &mut [u8], scalar: u32);

    /// `dst += src` over packed buffers of equal length
    #[inline]
    fn add_assign(&self, dst: &mut [u8], src: &[u8]) {
        debug_assert_eq!(dst.len(), src.len());
        for (d, s) in dst.iter_mut().zip(src) {
            *d ^= *s;
        }
    }

    /// `dst -= scalar * src` (same as [`FieldOps::multiply_add`] in GF(2^k))
    #[inline]
    fn multiply_subtract(&self, dst: &mut [u8], src: &[u8], scalar: u32) {
        self.multiply_add(dst, src, scalar);
    }
}

/// Runtime-selected finite field
#[enum_dispatch(FieldOps)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FiniteField {
    /// GF(2)
    Binary,
    /// GF(2^4)
    Binary4,
    /// GF(2^8)
    Binary8,
    /// GF(2^16)
    Binary16,
}

/// Field selection used in coder configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum FieldType {
    /// GF(2), bit-packed
    Binary,
    /// GF(16), two elements per byte
    Binary4,
    /// GF(2^8), one element per byte
    Binary8,
    /// GF(2^16), two bytes per element
    Binary16,
}

impl FieldType {
    /// Instantiate the arithmetic for this field
    pub fn field(self) -> FiniteField {
        match self {
            FieldType::Binary => Binary.into(),
            FieldType::Binary4 => Binary4.into(),
            FieldType::Binary8 => Binary8.into(),
            FieldType::Binary16 => Binary16.into(),
        }
    }

    /// Symbol sizes must be a multiple of this many bytes
    pub fn symbol_granularity(self) -> usize {
        match self {
            FieldType::Binary16 => 2,
            _ => 1,
        }
    }
}

impl From<FieldType> for FiniteField {
    fn from(field_type: FieldType) -> Self {
        field_type.field()
    }
}
