//! Payload framing: header, coding vector representation, symbol bytes
//!
//! ```text
//! systematic:  [0x00][index: u32 BE][symbol]
//! full vector: [0x01][packed coefficients][symbol]
//! seed:        [0x02][rank: u32 BE][seed: u32 BE][symbol]
//! sparse seed: [0x03][rank: u32 BE][density: f32 BE][seed: u32 BE][symbol]
//! ```
//!
//! The marker makes every payload self-describing, so a decoder accepts any
//! representation regardless of how it was configured. Seed representations
//! carry the encoder rank: only the first `rank` coefficients are defined,
//! which lets the peer replay vectors drawn before the block was fully bound.

use bytes::{Buf, BufMut};

const SYSTEMATIC: u8 = 0x00;
const FULL_VECTOR: u8 = 0x01;
const SEED: u8 = 0x02;
const SPARSE_SEED: u8 = 0x03;

/// Size of the representation marker
pub const MARKER_SIZE: usize = 1;
/// Header size of a systematic payload
pub const SYSTEMATIC_HEADER_SIZE: usize = MARKER_SIZE + 4;

/// How the coding vector travels in a coded payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum CodingVectorFormat {
    /// Every coefficient, packed at the field's bit width
    #[default]
    FullVector,
    /// Rank plus a 4-byte seed; the peer regenerates a dense vector
    Seed,
    /// Rank, density as a 4-byte float and a 4-byte seed
    SparseSeed,
}

impl CodingVectorFormat {
    /// Bytes taken by the representation, given the packed vector size
    pub fn vector_size(self, full_vector_size: usize) -> usize {
        match self {
            CodingVectorFormat::FullVector => full_vector_size,
            CodingVectorFormat::Seed => 8,
            CodingVectorFormat::SparseSeed => 12,
        }
    }
}

/// Coding vector as carried by a payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CodingVector<'p> {
    /// Packed coefficients
    Full(&'p [u8]),
    /// Seed of a dense vector
    Seed {
        /// Number of leading coefficients that are defined
        rank: usize,
        /// Generator seed
        seed: u32,
    },
    /// Seed of a density-limited vector
    SparseSeed {
        /// Number of leading coefficients that are defined
        rank: usize,
        /// Probability of a nonzero coefficient
        density: f32,
        /// Generator seed
        seed: u32,
    },
}

/// A parsed or to-be-written payload borrowing its byte ranges
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payload<'p> {
    /// Original symbol sent verbatim
    Systematic {
        /// Index of the symbol in the generation
        index: usize,
        /// Symbol bytes
        symbol: &'p [u8],
    },
    /// Linear combination of original symbols
    Coded {
        /// Coefficients of the combination
        vector: CodingVector<'p>,
        /// Coded symbol bytes
        symbol: &'p [u8],
    },
}

impl<'p> Payload<'p> {
    /// Serialize into `buffer`, returning the bytes written.
    ///
    /// Panics if `buffer` is too small.
    pub fn write(&self, buffer: &mut [u8]) -> usize {
        let capacity = buffer.len();
        let mut out = buffer;
        match *self {
            Payload::Systematic { index, symbol } => {
                out.put_u8(SYSTEMATIC);
                out.put_u32(index as u32);
                out.put_slice(symbol);
            }
            Payload::Coded { vector, symbol } => {
                match vector {
                    CodingVector::Full(coefficients) => {
                        out.put_u8(FULL_VECTOR);
                        out.put_slice(coefficients);
                    }
                    CodingVector::Seed { rank, seed } => {
                        out.put_u8(SEED);
                        out.put_u32(rank as u32);
                        out.put_u32(seed);
                    }
                    CodingVector::SparseSeed {
                        rank,
                        density,
                        seed,
                    } => {
                        out.put_u8(SPARSE_SEED);
                        out.put_u32(rank as u32);
                        out.put_f32(density);
                        out.put_u32(seed);
                    }
                }
                out.put_slice(symbol);
            }
        }
        capacity - out.len()
    }

    /// Parse a payload for a generation with `vector_size`-byte packed
    /// coefficient vectors and `symbol_size`-byte symbols.
    ///
    /// Panics on an unknown marker or a truncated buffer.
    pub fn read(payload: &'p [u8], vector_size: usize, symbol_size: usize) -> Self {
        let mut input = payload;
        let marker = input.get_u8();
        let vector = match marker {
            SYSTEMATIC => {
                let index = input.get_u32() as usize;
                return Payload::Systematic {
                    index,
                    symbol: &input[..symbol_size],
                };
            }
            FULL_VECTOR => {
                let (coefficients, rest) = input.split_at(vector_size);
                input = rest;
                CodingVector::Full(coefficients)
            }
            SEED => {
                let rank = input.get_u32() as usize;
                let seed = input.get_u32();
                CodingVector::Seed { rank, seed }
            }
            SPARSE_SEED => {
                let rank = input.get_u32() as usize;
                let density = input.get_f32();
                let seed = input.get_u32();
                CodingVector::SparseSeed {
                    rank,
                    density,
                    seed,
                }
            }
            other => panic!("unknown payload marker {other:#04x}"),
        };
        Payload::Coded {
            vector,
            symbol: &input[..symbol_size],
        }
    }
}

/// Largest payload an encoder using `format` emits, systematic ones included
pub fn max_payload_size(
    format: CodingVectorFormat,
    full_vector_size: usize,
    symbol_size: usize,
) -> usize {
    let coded = MARKER_SIZE + format.vector_size(full_vector_size);
    coded.max(SYSTEMATIC_HEADER_SIZE) + symbol_size
}
