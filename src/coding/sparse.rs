//! Density-limited coefficient generation for RLNC

use crate::coding::coeff_generator::CoeffGenerator;
use crate::coding::traits::CodingError;
use crate::field::{FieldOps, FiniteField};
use crate::utils::CodingRng;

/// Configuration for sparse coefficient generation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SparseConfig {
    /// Probability that a coefficient is nonzero, in (0.0, 1.0]
    pub density: f32,
}

impl Default for SparseConfig {
    fn default() -> Self {
        Self {
            density: 1.0, // Full density by default
        }
    }
}

impl SparseConfig {
    /// Create a new sparse configuration with specified density
    pub fn new(density: f32) -> Result<Self, CodingError> {
        if !Self::is_valid_density(density) {
            return Err(CodingError::InvalidDensity(density));
        }
        Ok(Self { density })
    }

    /// Whether `density` lies in (0.0, 1.0]
    pub fn is_valid_density(density: f32) -> bool {
        density > 0.0 && density <= 1.0
    }

    /// Whether this configuration degenerates to dense generation
    pub fn is_dense(&self) -> bool {
        self.density >= 1.0
    }
}

/// Sparse coefficient generator for RLNC
///
/// Each coefficient is kept with probability `density` and then drawn
/// uniformly from the nonzero field elements. A vector that comes out all
/// zero gets one random position forced to a nonzero value.
#[derive(Debug, Clone)]
pub struct SparseCoeffGenerator {
    config: SparseConfig,
    rng: CodingRng,
}

impl SparseCoeffGenerator {
    /// Create a new sparse coefficient generator with seed
    pub fn with_seed(config: SparseConfig, seed: u32) -> Self {
        Self {
            config,
            rng: CodingRng::from_seed(seed),
        }
    }
}

impl CoeffGenerator for SparseCoeffGenerator {
    fn fill(
        &mut self,
        field: &FiniteField,
        coefficients: &mut [u8],
        symbols: usize,
        is_defined: &dyn Fn(usize) -> bool,
    ) {
        coefficients.fill(0);
        let max = field.max_value();
        let density = self.config.density as f64;
        let mut any_nonzero = false;

        for index in 0..symbols {
            if !self.rng.bernoulli(density) {
                continue;
            }
            let value = self.rng.nonzero_coefficient(max);
            any_nonzero = true;
            if is_defined(index) {
                field.set_value(coefficients, index, value);
            }
        }

        if !any_nonzero && symbols > 0 {
            let index = self.rng.index(symbols);
            let value = self.rng.nonzero_coefficient(max);
            if is_defined(index) {
                field.set_value(coefficients, index, value);
            }
        }
    }

    fn set_seed(&mut self, seed: u32) {
        self.rng = CodingRng::from_seed(seed);
    }

    fn next_seed(&mut self) -> u32 {
        self.rng.next_seed()
    }

    fn density(&self) -> f32 {
        self.config.density
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;

    fn nonzeros(field: &FiniteField, coefficients: &[u8], symbols: usize) -> usize {
        (0..symbols)
            .filter(|&i| field.get_value(coefficients, i) != 0)
            .count()
    }

    #[test]
    fn test_sparse_config() {
        let config = SparseConfig::new(0.5).unwrap();
        assert_eq!(config.density, 0.5);
        assert!(!config.is_dense());
        assert!(SparseConfig::new(1.0).unwrap().is_dense());
    }

    #[test]
    fn test_sparse_config_bounds() {
        assert_eq!(SparseConfig::new(0.0), Err(CodingError::InvalidDensity(0.0)));
        assert!(SparseConfig::new(1.5).is_err());
        assert!(SparseConfig::new(-0.1).is_err());
        assert!(SparseConfig::new(f32::NAN).is_err());
        assert!(SparseConfig::new(f32::MIN_POSITIVE).is_ok());
    }

    #[test]
    fn test_sparse_generator_full_density_has_no_zeros() {
        let field = FieldType::Binary8.field();
        let mut generator = SparseCoeffGenerator::with_seed(SparseConfig::default(), 3);

        let mut coeffs = vec![0u8; 16];
        generator.fill(&field, &mut coeffs, 16, &|_| true);
        assert_eq!(nonzeros(&field, &coeffs, 16), 16);
    }

    #[test]
    fn test_sparse_generator_never_all_zero() {
        let field = FieldType::Binary.field();
        let config = SparseConfig::new(f32::MIN_POSITIVE).unwrap();
        let mut generator = SparseCoeffGenerator::with_seed(config, 9);

        let mut coeffs = vec![0u8; field.elements_to_bytes(20)];
        for _ in 0..50 {
            generator.fill(&field, &mut coeffs, 20, &|_| true);
            assert_eq!(nonzeros(&field, &coeffs, 20), 1);
        }
    }

    #[test]
    fn test_sparse_generator_density_is_respected_on_average() {
        let field = FieldType::Binary8.field();
        let config = SparseConfig::new(0.25).unwrap();
        let mut generator = SparseCoeffGenerator::with_seed(config, 1234);

        let symbols = 100;
        let rounds = 200;
        let mut coeffs = vec![0u8; symbols];
        let mut total = 0;
        for _ in 0..rounds {
            generator.fill(&field, &mut coeffs, symbols, &|_| true);
            total += nonzeros(&field, &coeffs, symbols);
        }
        let observed = total as f64 / (symbols * rounds) as f64;
        assert!((observed - 0.25).abs() < 0.03, "observed density {observed}");
    }

    #[test]
    fn test_sparse_generator_deterministic() {
        let field = FieldType::Binary4.field();
        let config = SparseConfig::new(0.5).unwrap();
        let mut gen1 = SparseCoeffGenerator::with_seed(config, 42);
        let mut gen2 = SparseCoeffGenerator::with_seed(config, 42);

        let mut coeffs1 = vec![0u8; 5];
        let mut coeffs2 = vec![0u8; 5];
        gen1.fill(&field, &mut coeffs1, 10, &|_| true);
        gen2.fill(&field, &mut coeffs2, 10, &|_| true);

        assert_eq!(coeffs1, coeffs2);
    }
}
