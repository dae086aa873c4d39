//! Random Linear Network Coding (RLNC) implementation

mod coding_matrix;
mod decoder;
mod encoder;
mod factory;
mod status;

pub use decoder::Decoder;
pub use encoder::Encoder;
pub use factory::{DecoderFactory, EncoderFactory};
pub use status::SymbolStatus;
