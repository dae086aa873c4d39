use crate::coding::coeff_generator::{CoeffGenerator, ConfiguredCoeffGenerator};
use crate::coding::payload::{max_payload_size, CodingVector, CodingVectorFormat, Payload};
use crate::coding::rlnc::factory::EncoderFactory;
use crate::coding::traits::{Coder, PayloadProducer};
use crate::field::{FieldOps, FiniteField};
use crate::storage::ConstSymbolStorage;
use crate::utils::{StdoutSink, TraceSink, Tracer};
use log::{debug, trace};

/// Random Linear Network Coding Encoder
///
/// Reads the source block from caller-owned buffers. Payloads start as
/// systematic copies of each source symbol (when enabled) and continue as
/// random linear combinations of every bound symbol.
#[derive(Debug)]
pub struct Encoder<'a> {
    field: FiniteField,
    /// Number of source symbols
    symbols: usize,
    /// Size of each symbol in bytes
    symbol_size: usize,
    storage: ConstSymbolStorage<'a>,
    format: CodingVectorFormat,
    systematic: bool,
    /// Next index sent during the systematic phase
    systematic_index: usize,
    generator: ConfiguredCoeffGenerator,
    coefficients: Vec<u8>,
    symbol: Vec<u8>,
    tracer: Tracer,
}

impl<'a> Encoder<'a> {
    pub(crate) fn from_factory(factory: &EncoderFactory) -> Self {
        let field = factory.field().field();
        let symbols = factory.symbols();
        let symbol_size = factory.symbol_size();
        Self {
            field,
            symbols,
            symbol_size,
            storage: ConstSymbolStorage::new(symbols, symbol_size),
            format: factory.coding_vector_format(),
            systematic: factory.is_systematic_on(),
            systematic_index: 0,
            generator: ConfiguredCoeffGenerator::for_density(factory.density()),
            coefficients: vec![0; field.elements_to_bytes(symbols)],
            symbol: vec![0; symbol_size],
            tracer: Tracer::default(),
        }
    }

    /// Field used for coding
    pub fn field(&self) -> FiniteField {
        self.field
    }

    /// Bind source symbol `index`
    pub fn set_symbol_storage(&mut self, data: &'a [u8], index: usize) {
        self.storage.set_symbol(index, data);
    }

    /// Bind the whole source block
    pub fn set_symbols_storage(&mut self, data: &'a [u8]) {
        self.storage.set_symbols(data);
    }

    /// Whether source symbol `index` is bound
    pub fn is_symbol_bound(&self, index: usize) -> bool {
        self.storage.is_bound(index)
    }

    /// Unbind every symbol and restart the systematic phase
    pub fn reset(&mut self) {
        self.storage.clear();
        self.systematic_index = 0;
    }

    /// Representation used for coding vectors in coded payloads
    pub fn coding_vector_format(&self) -> CodingVectorFormat {
        self.format
    }

    /// Select the coding vector representation
    pub fn set_coding_vector_format(&mut self, format: CodingVectorFormat) {
        self.format = format;
    }

    /// Whether systematic payloads are sent first
    pub fn is_systematic_on(&self) -> bool {
        self.systematic
    }

    /// Enable the systematic phase; the cursor is kept
    pub fn set_systematic_on(&mut self) {
        self.systematic = true;
    }

    /// Disable the systematic phase; the cursor is kept
    pub fn set_systematic_off(&mut self) {
        self.systematic = false;
    }

    /// Whether the next payload is systematic
    pub fn in_systematic_phase(&self) -> bool {
        self.systematic
            && self.systematic_index < self.symbols
            && self.storage.is_bound(self.systematic_index)
    }

    /// Probability that a generated coefficient is nonzero
    pub fn density(&self) -> f32 {
        self.generator.density()
    }

    /// Change the coefficient density.
    ///
    /// Panics if `density` is outside (0.0, 1.0].
    pub fn set_density(&mut self, density: f32) {
        self.generator.set_density(density);
    }

    /// Seed the coefficient generator
    pub fn set_seed(&mut self, seed: u32) {
        self.generator.set_seed(seed);
    }

    /// Draw a coefficient vector over all symbols
    pub fn generate(&mut self, coefficients: &mut [u8]) {
        assert_eq!(coefficients.len(), self.coefficients.len());
        self.generator
            .fill(&self.field, coefficients, self.symbols, &|_| true);
    }

    /// Draw a coefficient vector over the bound symbols only
    pub fn generate_partial(&mut self, coefficients: &mut [u8]) {
        assert_eq!(coefficients.len(), self.coefficients.len());
        let storage = &self.storage;
        self.generator
            .fill(&self.field, coefficients, self.symbols, &|i| storage.is_bound(i));
    }

    /// Combine the source symbols with caller-chosen `coefficients` into
    /// `symbol`, returning the bytes written.
    ///
    /// Every symbol with a nonzero coefficient must be bound.
    pub fn produce_symbol(&self, symbol: &mut [u8], coefficients: &[u8]) -> usize {
        assert_eq!(coefficients.len(), self.coefficients.len());
        let out = &mut symbol[..self.symbol_size];
        combine(&self.field, &self.storage, coefficients, out);
        self.symbol_size
    }

    /// Copy source symbol `index` into `symbol`, returning the bytes written
    pub fn produce_systematic_symbol(&self, symbol: &mut [u8], index: usize) -> usize {
        symbol[..self.symbol_size].copy_from_slice(self.storage.symbol(index));
        self.symbol_size
    }

    /// Send payload traces to stdout
    pub fn set_trace_stdout(&mut self) {
        self.tracer.set_sink(Box::new(StdoutSink));
    }

    /// Send payload traces to `callback(zone, text)`
    pub fn set_trace_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&str, &str) + 'static,
    {
        self.tracer.set_sink(Box::new(callback));
    }

    /// Send payload traces to a custom sink
    pub fn set_trace_sink(&mut self, sink: Box<dyn TraceSink>) {
        self.tracer.set_sink(sink);
    }

    /// Stop tracing
    pub fn set_trace_off(&mut self) {
        self.tracer.set_off();
    }

    /// Prefix every trace zone with `prefix`
    pub fn set_zone_prefix(&mut self, prefix: &str) {
        self.tracer.set_zone_prefix(prefix);
    }

    fn produce_systematic_payload(&mut self, payload: &mut [u8]) -> usize {
        let index = self.systematic_index;
        self.systematic_index += 1;
        trace!("systematic payload for symbol {index}");
        self.tracer
            .emit("encoder_state", || format!("systematic symbol {index}"));
        if self.systematic_index == self.symbols {
            debug!("systematic phase complete after {} symbols", self.symbols);
        }
        Payload::Systematic {
            index,
            symbol: self.storage.symbol(index),
        }
        .write(payload)
    }

    fn produce_coded_payload(&mut self, payload: &mut [u8]) -> usize {
        let field = self.field;
        let seeded = match self.format {
            CodingVectorFormat::FullVector => {
                let storage = &self.storage;
                self.generator.fill(
                    &field,
                    &mut self.coefficients,
                    self.symbols,
                    &|i| storage.is_bound(i),
                );
                None
            }
            // A seed only conveys how many leading symbols take part, so
            // these formats combine the contiguous bound prefix
            CodingVectorFormat::Seed => {
                let rank = self.storage.bound_prefix();
                let seed = self.generator.next_seed();
                ConfiguredCoeffGenerator::replay(
                    &field,
                    1.0,
                    seed,
                    rank,
                    &mut self.coefficients,
                    self.symbols,
                );
                Some(CodingVector::Seed { rank, seed })
            }
            CodingVectorFormat::SparseSeed => {
                let rank = self.storage.bound_prefix();
                let density = self.generator.density();
                let seed = self.generator.next_seed();
                ConfiguredCoeffGenerator::replay(
                    &field,
                    density,
                    seed,
                    rank,
                    &mut self.coefficients,
                    self.symbols,
                );
                Some(CodingVector::SparseSeed {
                    rank,
                    density,
                    seed,
                })
            }
        };

        combine(&field, &self.storage, &self.coefficients, &mut self.symbol);
        if self.tracer.enabled() {
            let values: Vec<u32> = (0..self.symbols)
                .map(|i| field.get_value(&self.coefficients, i))
                .collect();
            self.tracer
                .emit("encoder_state", || format!("coded symbol {values:?}"));
        }

        Payload::Coded {
            vector: seeded.unwrap_or(CodingVector::Full(&self.coefficients)),
            symbol: &self.symbol,
        }
        .write(payload)
    }
}

/// `out = sum(coefficients[i] * symbol[i])` over the bound symbols
fn combine(
    field: &FiniteField,
    storage: &ConstSymbolStorage<'_>,
    coefficients: &[u8],
    out: &mut [u8],
) {
    out.fill(0);
    for index in 0..storage.symbols() {
        let coefficient = field.get_value(coefficients, index);
        if coefficient != 0 {
            field.multiply_add(out, storage.symbol(index), coefficient);
        }
    }
}

impl<'a> Coder for Encoder<'a> {
    fn symbols(&self) -> usize {
        self.symbols
    }

    fn symbol_size(&self) -> usize {
        self.symbol_size
    }

    fn rank(&self) -> usize {
        self.storage.bound()
    }

    fn coefficient_vector_size(&self) -> usize {
        self.coefficients.len()
    }

    fn payload_size(&self) -> usize {
        max_payload_size(self.format, self.coefficients.len(), self.symbol_size)
    }
}

impl<'a> PayloadProducer for Encoder<'a> {
    fn produce_payload(&mut self, payload: &mut [u8]) -> usize {
        if self.in_systematic_phase() {
            self.produce_systematic_payload(payload)
        } else {
            self.produce_coded_payload(payload)
        }
    }
}
