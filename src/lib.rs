#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![allow(clippy::needless_range_loop)]

pub mod coding;
pub mod field;
pub mod storage;
pub mod utils;

pub use coding::{
    Coder, CodingError, CodingVectorFormat, Decoder, DecoderFactory, Encoder, EncoderFactory,
    PayloadConsumer, PayloadProducer, SymbolStatus,
};
pub use field::{FieldOps, FieldType, FiniteField};
