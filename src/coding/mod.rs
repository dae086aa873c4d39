//! Network coding implementations

/// Coefficient generation strategies
pub mod coeff_generator;
/// Payload framing
pub mod payload;
/// Random Linear Network Coding implementation
pub mod rlnc;
/// Sparse coefficient generation for RLNC
pub mod sparse;
/// Core coding traits and error types
pub mod traits;

pub use coeff_generator::{CoeffGenerator, ConfiguredCoeffGenerator, UniformCoeffGenerator};
pub use payload::{CodingVector, CodingVectorFormat, Payload};
pub use rlnc::{Decoder, DecoderFactory, Encoder, EncoderFactory, SymbolStatus};
pub use sparse::{SparseCoeffGenerator, SparseConfig};
pub use traits::{Coder, CodingError, PayloadConsumer, PayloadProducer};
