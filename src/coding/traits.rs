use thiserror::Error;

/// Error type for coder configuration
///
/// Live coders never return errors: misuse (unbound storage, out of range
/// indices, undersized buffers) is a precondition violation and panics.
#[derive(Error, Debug, PartialEq)]
pub enum CodingError {
    /// Generation size is zero or too large
    #[error("Invalid parameters provided")]
    InvalidParameters,

    /// Symbol size is zero or not a multiple of the field's element size
    #[error("Invalid symbol size {size} for the selected field")]
    InvalidSymbolSize {
        /// Rejected size in bytes
        size: usize,
    },

    /// Coefficient density outside (0.0, 1.0]
    #[error("Density {0} is outside (0.0, 1.0]")]
    InvalidDensity(f32),
}

/// Dimensions and sizes shared by encoders and decoders
pub trait Coder {
    /// Number of symbols in the generation
    fn symbols(&self) -> usize;

    /// Size of a symbol in bytes
    fn symbol_size(&self) -> usize;

    /// Number of linearly independent symbols held
    fn rank(&self) -> usize;

    /// Size of a packed coefficient vector in bytes
    fn coefficient_vector_size(&self) -> usize;

    /// Largest payload this coder produces or accepts
    fn payload_size(&self) -> usize;

    /// Total bytes covered by the generation
    fn block_size(&self) -> usize {
        self.symbols() * self.symbol_size()
    }
}

/// Coders able to emit payloads
pub trait PayloadProducer: Coder {
    /// Write one payload into `payload` and return the bytes used
    fn produce_payload(&mut self, payload: &mut [u8]) -> usize;
}

/// Coders able to absorb payloads
pub trait PayloadConsumer: Coder {
    /// Consume one payload produced by a matching encoder or recoder
    fn consume_payload(&mut self, payload: &[u8]);

    /// Whether every symbol is available in decoded form
    fn is_complete(&self) -> bool;
}
