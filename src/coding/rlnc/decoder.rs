use crate::coding::coeff_generator::{CoeffGenerator, ConfiguredCoeffGenerator};
use crate::coding::payload::{max_payload_size, CodingVector, CodingVectorFormat, Payload};
use crate::coding::rlnc::coding_matrix::CodingMatrix;
use crate::coding::rlnc::factory::DecoderFactory;
use crate::coding::rlnc::status::{SymbolStatus, SymbolStatusTracker};
use crate::coding::traits::{Coder, PayloadConsumer, PayloadProducer};
use crate::field::{FieldOps, FiniteField};
use crate::storage::MutableSymbolStorage;
use crate::utils::{StdoutSink, TraceSink, Tracer};
use log::{debug, trace};

/// Random Linear Network Coding Decoder
///
/// Decodes in place into caller-owned buffers. The coding matrix is kept in
/// reduced row echelon form after every insertion, so symbols become
/// available as soon as their row collapses, before the generation completes.
/// A decoder can also recode: it emits fresh combinations of the rows it
/// holds without having to finish decoding.
#[derive(Debug)]
pub struct Decoder<'a> {
    field: FiniteField,
    /// Number of source symbols
    symbols: usize,
    /// Size of each symbol in bytes
    symbol_size: usize,
    storage: MutableSymbolStorage<'a>,
    matrix: CodingMatrix,
    status: SymbolStatusTracker,
    status_updater: bool,
    generator: ConfiguredCoeffGenerator,
    coefficients: Vec<u8>,
    symbol: Vec<u8>,
    weights: Vec<u8>,
    tracer: Tracer,
}

impl<'a> Decoder<'a> {
    pub(crate) fn from_factory(factory: &DecoderFactory) -> Self {
        let field = factory.field().field();
        let symbols = factory.symbols();
        let symbol_size = factory.symbol_size();
        let matrix = CodingMatrix::new(field, symbols);
        let vector_size = matrix.vector_size();
        Self {
            field,
            symbols,
            symbol_size,
            storage: MutableSymbolStorage::new(symbols, symbol_size),
            matrix,
            status: SymbolStatusTracker::new(symbols),
            status_updater: factory.is_status_updater_on(),
            generator: ConfiguredCoeffGenerator::for_density(1.0),
            coefficients: vec![0; vector_size],
            symbol: vec![0; symbol_size],
            weights: vec![0; vector_size],
            tracer: Tracer::default(),
        }
    }

    /// Field used for coding
    pub fn field(&self) -> FiniteField {
        self.field
    }

    /// Bind the buffer that receives symbol `index`
    pub fn set_symbol_storage(&mut self, data: &'a mut [u8], index: usize) {
        self.storage.set_symbol(index, data);
    }

    /// Bind one buffer for the whole block
    pub fn set_symbols_storage(&mut self, data: &'a mut [u8]) {
        self.storage.set_symbols(data);
    }

    /// Forget every received row and unbind the storage
    pub fn reset(&mut self) {
        self.storage.clear();
        self.matrix.clear();
        self.status.clear();
    }

    /// Consume a coded symbol with its packed coefficient vector
    pub fn consume_symbol(&mut self, symbol: &[u8], coefficients: &[u8]) {
        assert_eq!(symbol.len(), self.symbol_size, "symbol has the wrong size");
        assert_eq!(
            coefficients.len(),
            self.coefficients.len(),
            "coefficient vector has the wrong size"
        );
        self.coefficients.copy_from_slice(coefficients);
        self.symbol.copy_from_slice(symbol);
        self.consume_coded();
    }

    /// Consume original symbol `index`
    pub fn consume_systematic_symbol(&mut self, symbol: &[u8], index: usize) {
        assert!(index < self.symbols, "symbol index {index} out of range");
        assert_eq!(symbol.len(), self.symbol_size, "symbol has the wrong size");
        self.tracer
            .emit("symbol_index_before_consume_systematic_symbol", || {
                index.to_string()
            });

        if self.matrix.is_pivot(index) {
            trace!("systematic symbol {index} already held, ignoring");
            return;
        }

        let field = self.field;
        self.coefficients.fill(0);
        field.set_value(&mut self.coefficients, index, 1);
        self.symbol.copy_from_slice(symbol);
        self.insert_pivot(index);
    }

    /// Whether at least one symbol is held but not all are decoded
    pub fn is_partially_complete(&self) -> bool {
        self.matrix.rank() > 0 && self.status.decoded() < self.symbols
    }

    /// Status of symbol `index`
    pub fn symbol_status(&self, index: usize) -> SymbolStatus {
        self.status.get(index)
    }

    /// Whether nothing is known about symbol `index`
    pub fn is_symbol_missing(&self, index: usize) -> bool {
        self.status.get(index) == SymbolStatus::Missing
    }

    /// Whether symbol `index` has a pivot row that is not yet reduced
    pub fn is_symbol_partially_decoded(&self, index: usize) -> bool {
        self.status.get(index) == SymbolStatus::PartiallyDecoded
    }

    /// Whether symbol `index` is available verbatim in storage
    pub fn is_symbol_decoded(&self, index: usize) -> bool {
        self.status.get(index) == SymbolStatus::Decoded
    }

    /// Whether a row has its pivot at `index`
    pub fn is_symbol_pivot(&self, index: usize) -> bool {
        self.matrix.is_pivot(index)
    }

    /// Number of symbols without a pivot
    pub fn symbols_missing(&self) -> usize {
        self.status.missing()
    }

    /// Number of pivot rows not yet reduced to a unit vector
    pub fn symbols_partially_decoded(&self) -> usize {
        self.status.partially_decoded()
    }

    /// Number of decoded symbols
    pub fn symbols_decoded(&self) -> usize {
        self.status.decoded()
    }

    /// Check if `coefficients` would increase the rank
    pub fn check_rank_increase(&self, coefficients: &[u8]) -> bool {
        self.matrix.check_rank_increase(coefficients)
    }

    /// Stored row for pivot `index`; all zero when the index has no pivot
    pub fn coefficient_vector(&self, index: usize) -> &[u8] {
        self.matrix.row(index)
    }

    /// Whether statuses are refreshed after every consumed payload
    pub fn is_status_updater_enabled(&self) -> bool {
        self.status_updater
    }

    /// Refresh statuses after every consumed payload
    pub fn set_status_updater_on(&mut self) {
        self.status_updater = true;
    }

    /// Only refresh statuses on demand
    pub fn set_status_updater_off(&mut self) {
        self.status_updater = false;
    }

    /// Promote partially decoded rows that collapsed to a unit vector
    pub fn update_symbol_status(&mut self) {
        for index in 0..self.symbols {
            if self.status.get(index) == SymbolStatus::PartiallyDecoded
                && self.matrix.is_unit_row(index)
            {
                self.status.set(index, SymbolStatus::Decoded);
            }
        }
    }

    /// Seed the recoding coefficient generator
    pub fn set_seed(&mut self, seed: u32) {
        self.generator.set_seed(seed);
    }

    /// Draw a coefficient vector over all symbols
    pub fn generate(&mut self, coefficients: &mut [u8]) {
        assert_eq!(coefficients.len(), self.coefficients.len());
        self.generator
            .fill(&self.field, coefficients, self.symbols, &|_| true);
    }

    /// Draw a coefficient vector over the pivot indices only
    pub fn generate_partial(&mut self, coefficients: &mut [u8]) {
        assert_eq!(coefficients.len(), self.coefficients.len());
        let matrix = &self.matrix;
        self.generator
            .fill(&self.field, coefficients, self.symbols, &|i| matrix.is_pivot(i));
    }

    /// Send state traces to stdout
    pub fn set_trace_stdout(&mut self) {
        self.tracer.set_sink(Box::new(StdoutSink));
    }

    /// Send state traces to `callback(zone, text)`
    pub fn set_trace_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&str, &str) + 'static,
    {
        self.tracer.set_sink(Box::new(callback));
    }

    /// Send state traces to a custom sink
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

    /// Eliminate the row held in the scratch buffers and insert it if it is
    /// innovative
    fn consume_coded(&mut self) {
        if self.tracer.enabled() {
            let field = self.field;
            let coefficients = &self.coefficients;
            let values: Vec<u32> = (0..self.symbols)
                .map(|i| field.get_value(coefficients, i))
                .collect();
            self.tracer
                .emit("symbol_coefficients_before_consume_symbol", || {
                    format!("{values:?}")
                });
        }

        if self.matrix.is_full_rank() {
            trace!("generation already complete, dropping coded symbol");
            return;
        }

        let field = self.field;
        let Self {
            matrix,
            storage,
            coefficients,
            symbol,
            ..
        } = self;
        matrix.reduce(coefficients, |pivot, factor| {
            field.multiply_subtract(symbol, storage.symbol(pivot), factor)
        });

        let Some(column) = matrix.leading_column(coefficients) else {
            trace!("redundant coded symbol discarded at rank {}", matrix.rank());
            return;
        };
        let inverse = field.invert(field.get_value(coefficients, column));
        field.multiply_assign(coefficients, inverse);
        field.multiply_assign(symbol, inverse);
        self.insert_pivot(column);
    }

    /// Install the normalized scratch row as the pivot of `column`
    fn insert_pivot(&mut self, column: usize) {
        let field = self.field;
        let Self {
            matrix,
            storage,
            coefficients,
            symbol,
            ..
        } = self;
        matrix.back_substitute(column, coefficients, |row, factor| {
            field.multiply_subtract(storage.symbol_mut(row), symbol, factor)
        });
        storage.symbol_mut(column).copy_from_slice(symbol);
        matrix.insert(column, coefficients);

        let status = if matrix.is_unit_row(column) {
            SymbolStatus::Decoded
        } else {
            SymbolStatus::PartiallyDecoded
        };
        trace!("new pivot at {column} ({status:?}), rank {}", matrix.rank());
        self.status.set(column, status);

        if self.matrix.is_full_rank() {
            self.status.mark_all_decoded();
            debug!("decoding complete: {} symbols", self.symbols);
        } else if self.status_updater {
            self.update_symbol_status();
        }

        if self.tracer.enabled() {
            let status = &self.status;
            let state = self.matrix.describe(|col| match status.get(col) {
                SymbolStatus::Missing => '?',
                SymbolStatus::PartiallyDecoded => 'P',
                SymbolStatus::Decoded => 'D',
            });
            self.tracer.emit("decoder_state", || state);
        }
    }

    fn recode(&mut self, payload: &mut [u8]) -> usize {
        let field = self.field;
        let Self {
            matrix,
            storage,
            generator,
            coefficients,
            symbol,
            weights,
            ..
        } = self;

        let held = &*matrix;
        generator.fill(&field, weights, held.cols(), &|i| held.is_pivot(i));
        coefficients.fill(0);
        symbol.fill(0);
        for row in 0..held.cols() {
            let weight = field.get_value(weights, row);
            if weight == 0 {
                continue;
            }
            field.multiply_add(coefficients, held.row(row), weight);
            field.multiply_add(symbol, storage.symbol(row), weight);
        }
        trace!("recoded symbol from {} rows", held.rank());

        Payload::Coded {
            vector: CodingVector::Full(coefficients.as_slice()),
            symbol: symbol.as_slice(),
        }
        .write(payload)
    }
}

impl<'a> Coder for Decoder<'a> {
    fn symbols(&self) -> usize {
        self.symbols
    }

    fn symbol_size(&self) -> usize {
        self.symbol_size
    }

    fn rank(&self) -> usize {
        self.matrix.rank()
    }

    fn coefficient_vector_size(&self) -> usize {
        self.coefficients.len()
    }

    fn payload_size(&self) -> usize {
        // Recoded payloads carry a full vector; accepted ones may use any
        // representation, and the sparse seed is the largest seed form
        let vector_size = self.coefficients.len();
        max_payload_size(CodingVectorFormat::FullVector, vector_size, self.symbol_size).max(
            max_payload_size(CodingVectorFormat::SparseSeed, vector_size, self.symbol_size),
        )
    }
}

impl<'a> PayloadProducer for Decoder<'a> {
    /// Recode: a random combination of the held rows, always carrying a full
    /// coefficient vector relative to the original symbols
    fn produce_payload(&mut self, payload: &mut [u8]) -> usize {
        self.recode(payload)
    }
}

impl<'a> PayloadConsumer for Decoder<'a> {
    fn consume_payload(&mut self, payload: &[u8]) {
        let vector_size = self.coefficients.len();
        match Payload::read(payload, vector_size, self.symbol_size) {
            Payload::Systematic { index, symbol } => {
                self.consume_systematic_symbol(symbol, index)
            }
            Payload::Coded { vector, symbol } => {
                let field = self.field;
                match vector {
                    CodingVector::Full(coefficients) => {
                        self.coefficients.copy_from_slice(coefficients)
                    }
                    CodingVector::Seed { rank, seed } => {
                        assert!(rank <= self.symbols, "encoder rank {rank} out of range");
                        ConfiguredCoeffGenerator::replay(
                            &field,
                            1.0,
                            seed,
                            rank,
                            &mut self.coefficients,
                            self.symbols,
                        )
                    }
                    CodingVector::SparseSeed {
                        rank,
                        density,
                        seed,
                    } => {
                        assert!(rank <= self.symbols, "encoder rank {rank} out of range");
                        ConfiguredCoeffGenerator::replay(
                            &field,
                            density,
                            seed,
                            rank,
                            &mut self.coefficients,
                            self.symbols,
                        )
                    }
                }
                self.symbol.copy_from_slice(symbol);
                self.consume_coded();
            }
        }
    }

    fn is_complete(&self) -> bool {
        self.matrix.is_full_rank()
    }
}
