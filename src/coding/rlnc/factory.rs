//! Configuration value objects that build encoders and decoders

use crate::coding::payload::CodingVectorFormat;
use crate::coding::rlnc::{Decoder, Encoder};
use crate::coding::sparse::SparseConfig;
use crate::coding::traits::CodingError;
use crate::field::FieldType;

fn validate_generation(
    field: FieldType,
    symbols: usize,
    symbol_size: usize,
) -> Result<(), CodingError> {
    // Systematic payloads carry the index as a u32
    if symbols == 0 || symbols > u32::MAX as usize {
        return Err(CodingError::InvalidParameters);
    }
    if symbol_size == 0 || symbol_size % field.symbol_granularity() != 0 {
        return Err(CodingError::InvalidSymbolSize { size: symbol_size });
    }
    Ok(())
}

/// Encoder configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncoderFactory {
    field: FieldType,
    symbols: usize,
    symbol_size: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    coding_vector_format: CodingVectorFormat,
    #[cfg_attr(feature = "serde", serde(default = "default_systematic"))]
    systematic: bool,
    #[cfg_attr(feature = "serde", serde(default = "default_density"))]
    density: f32,
}

#[cfg(feature = "serde")]
fn default_systematic() -> bool {
    true
}

#[cfg(feature = "serde")]
fn default_density() -> f32 {
    SparseConfig::default().density
}

impl EncoderFactory {
    /// Systematic, dense, full-vector encoder configuration
    pub fn new(field: FieldType, symbols: usize, symbol_size: usize) -> Self {
        Self {
            field,
            symbols,
            symbol_size,
            coding_vector_format: CodingVectorFormat::default(),
            systematic: true,
            density: SparseConfig::default().density,
        }
    }

    /// Select the coding vector representation
    pub fn with_coding_vector_format(mut self, format: CodingVectorFormat) -> Self {
        self.coding_vector_format = format;
        self
    }

    /// Enable or disable the systematic phase
    pub fn with_systematic(mut self, systematic: bool) -> Self {
        self.systematic = systematic;
        self
    }

    /// Set the coefficient density
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    /// Field
    pub fn field(&self) -> FieldType {
        self.field
    }

    /// Number of symbols in a generation
    pub fn symbols(&self) -> usize {
        self.symbols
    }

    /// Symbol size in bytes
    pub fn symbol_size(&self) -> usize {
        self.symbol_size
    }

    /// Coding vector representation
    pub fn coding_vector_format(&self) -> CodingVectorFormat {
        self.coding_vector_format
    }

    /// Whether the systematic phase is enabled
    pub fn is_systematic_on(&self) -> bool {
        self.systematic
    }

    /// Coefficient density
    pub fn density(&self) -> f32 {
        self.density
    }

    /// Check the configuration without building
    pub fn validate(&self) -> Result<(), CodingError> {
        validate_generation(self.field, self.symbols, self.symbol_size)?;
        SparseConfig::new(self.density)?;
        Ok(())
    }

    /// Build a fresh encoder with no bound storage
    pub fn build<'a>(&self) -> Result<Encoder<'a>, CodingError> {
        self.validate()?;
        Ok(Encoder::from_factory(self))
    }
}

/// Decoder configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecoderFactory {
    field: FieldType,
    symbols: usize,
    symbol_size: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    status_updater: bool,
}

impl DecoderFactory {
    /// Decoder configuration with the status updater off
    pub fn new(field: FieldType, symbols: usize, symbol_size: usize) -> Self {
        Self {
            field,
            symbols,
            symbol_size,
            status_updater: false,
        }
    }

    /// Refresh symbol statuses after every consumed payload
    pub fn with_status_updater(mut self, status_updater: bool) -> Self {
        self.status_updater = status_updater;
        self
    }

    /// Field
    pub fn field(&self) -> FieldType {
        self.field
    }

    /// Number of symbols in a generation
    pub fn symbols(&self) -> usize {
        self.symbols
    }

    /// Symbol size in bytes
    pub fn symbol_size(&self) -> usize {
        self.symbol_size
    }

    /// Whether the status updater starts enabled
    pub fn is_status_updater_on(&self) -> bool {
        self.status_updater
    }

    /// Check the configuration without building
    pub fn validate(&self) -> Result<(), CodingError> {
        validate_generation(self.field, self.symbols, self.symbol_size)
    }

    /// Build a fresh decoder with no bound storage
    pub fn build<'a>(&self) -> Result<Decoder<'a>, CodingError> {
        self.validate()?;
        Ok(Decoder::from_factory(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coding::traits::Coder;

    #[test]
    fn test_encoder_factory_validation() {
        assert_eq!(
            EncoderFactory::new(FieldType::Binary8, 0, 10).build().err(),
            Some(CodingError::InvalidParameters)
        );
        assert_eq!(
            EncoderFactory::new(FieldType::Binary8, 4, 0).build().err(),
            Some(CodingError::InvalidSymbolSize { size: 0 })
        );
        assert_eq!(
            EncoderFactory::new(FieldType::Binary16, 4, 3).build().err(),
            Some(CodingError::InvalidSymbolSize { size: 3 })
        );
        assert_eq!(
            EncoderFactory::new(FieldType::Binary8, 4, 8)
                .with_density(0.0)
                .build()
                .err(),
            Some(CodingError::InvalidDensity(0.0))
        );
        assert!(EncoderFactory::new(FieldType::Binary16, 4, 4).build().is_ok());
    }

    #[test]
    fn test_decoder_factory_validation() {
        assert_eq!(
            DecoderFactory::new(FieldType::Binary, 0, 1).build().err(),
            Some(CodingError::InvalidParameters)
        );
        assert_eq!(
            DecoderFactory::new(FieldType::Binary16, 2, 5).validate(),
            Err(CodingError::InvalidSymbolSize { size: 5 })
        );
        let decoder = DecoderFactory::new(FieldType::Binary4, 7, 3)
            .with_status_updater(true)
            .build()
            .unwrap();
        assert!(decoder.is_status_updater_enabled());
        assert_eq!(decoder.coefficient_vector_size(), 4);
    }

    #[test]
    fn test_building_is_side_effect_free() {
        let factory = EncoderFactory::new(FieldType::Binary8, 3, 2)
            .with_coding_vector_format(CodingVectorFormat::SparseSeed)
            .with_density(0.5);
        let snapshot = factory.clone();
        let first = factory.build().unwrap();
        let second = factory.build().unwrap();
        assert_eq!(factory, snapshot);
        assert_eq!(first.density(), 0.5);
        assert_eq!(
            second.coding_vector_format(),
            CodingVectorFormat::SparseSeed
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_factory_serde() {
        let factory: EncoderFactory = serde_json::from_str(
            r#"{"field":"binary16","symbols":8,"symbol_size":64,"coding_vector_format":"seed"}"#,
        )
        .unwrap();
        assert_eq!(
            factory,
            EncoderFactory::new(FieldType::Binary16, 8, 64)
                .with_coding_vector_format(CodingVectorFormat::Seed)
        );

        let decoder = DecoderFactory::new(FieldType::Binary, 16, 1).with_status_updater(true);
        let json = serde_json::to_string(&decoder).unwrap();
        assert_eq!(serde_json::from_str::<DecoderFactory>(&json).unwrap(), decoder);
    }
}
