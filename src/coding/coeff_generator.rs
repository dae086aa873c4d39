use crate::coding::sparse::{SparseCoeffGenerator, SparseConfig};
use crate::field::{FieldOps, FiniteField};
use crate::utils::CodingRng;
use enum_dispatch::enum_dispatch;

/// Trait for coefficient generation in RLNC
///
/// Implementations draw the same random values whatever `is_defined`
/// answers; undefined positions are only masked to zero. Two generators with
/// the same seed therefore stay in lockstep across full and partial calls.
#[enum_dispatch]
pub trait CoeffGenerator {
    /// Fill the packed `coefficients` buffer for `symbols` positions,
    /// writing zero wherever `is_defined` is false
    fn fill(
        &mut self,
        field: &FiniteField,
        coefficients: &mut [u8],
        symbols: usize,
        is_defined: &dyn Fn(usize) -> bool,
    );

    /// Set the seed for deterministic coefficient generation
    fn set_seed(&mut self, seed: u32);

    /// Draw a seed from the current stream
    fn next_seed(&mut self) -> u32;

    /// Probability that a generated coefficient is nonzero
    fn density(&self) -> f32;
}

/// Dense generator: every coefficient uniform over the whole field
#[derive(Debug, Clone, Default)]
pub struct UniformCoeffGenerator {
    rng: CodingRng,
}

impl UniformCoeffGenerator {
    /// Create a generator with a specific seed
    pub fn with_seed(seed: u32) -> Self {
        Self {
            rng: CodingRng::from_seed(seed),
        }
    }
}

impl CoeffGenerator for UniformCoeffGenerator {
    fn fill(
        &mut self,
        field: &FiniteField,
        coefficients: &mut [u8],
        symbols: usize,
        is_defined: &dyn Fn(usize) -> bool,
    ) {
        coefficients.fill(0);
        let max = field.max_value();
        for index in 0..symbols {
            let value = self.rng.coefficient(max);
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
        1.0
    }
}

/// Enum for configured coefficient generators.
///
/// This enum allows switching between different coefficient generator implementations.
#[enum_dispatch(CoeffGenerator)]
#[derive(Debug, Clone)]
pub enum ConfiguredCoeffGenerator {
    /// Coefficient generator drawing uniformly over the field.
    UniformCoeffGenerator(UniformCoeffGenerator),
    /// Coefficient generator that produces sparse coefficients.
    SparseCoeffGenerator(SparseCoeffGenerator),
}

impl ConfiguredCoeffGenerator {
    /// Generator for `density`, seeded from entropy
    pub fn for_density(density: f32) -> Self {
        Self::seeded(density, CodingRng::new().next_seed())
    }

    /// Generator for `density` with a specific seed.
    ///
    /// Panics if `density` is outside (0.0, 1.0].
    pub fn seeded(density: f32, seed: u32) -> Self {
        assert!(
            SparseConfig::is_valid_density(density),
            "density must be in (0.0, 1.0], got {density}"
        );
        let config = SparseConfig { density };
        if config.is_dense() {
            UniformCoeffGenerator::with_seed(seed).into()
        } else {
            SparseCoeffGenerator::with_seed(config, seed).into()
        }
    }

    /// Switch to another density, continuing from the current seed stream
    pub fn set_density(&mut self, density: f32) {
        let seed = self.next_seed();
        *self = Self::seeded(density, seed);
    }

    /// Regenerate the vector a peer produced from `seed` at `density` when
    /// only its first `rank` symbols were defined
    pub fn replay(
        field: &FiniteField,
        density: f32,
        seed: u32,
        rank: usize,
        coefficients: &mut [u8],
        symbols: usize,
    ) {
        let mut generator = Self::seeded(density, seed);
        generator.fill(field, coefficients, symbols, &|i| i < rank);
    }
}
