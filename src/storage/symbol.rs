/// Read-only symbols borrowed from the caller, bound one index at a time or
/// all at once
#[derive(Debug, Clone)]
pub struct ConstSymbolStorage<'a> {
    symbol_size: usize,
    symbols: Vec<Option<&'a [u8]>>,
    bound: usize,
}

impl<'a> ConstSymbolStorage<'a> {
    /// Create storage for `symbols` symbols of `symbol_size` bytes, all unbound
    pub fn new(symbols: usize, symbol_size: usize) -> Self {
        Self {
            symbol_size,
            symbols: vec![None; symbols],
            bound: 0,
        }
    }

    /// Number of symbol slots
    pub fn symbols(&self) -> usize {
        self.symbols.len()
    }

    /// Number of bound symbols
    pub fn bound(&self) -> usize {
        self.bound
    }

    /// Whether every slot is bound
    pub fn is_full(&self) -> bool {
        self.bound == self.symbols.len()
    }

    /// Whether slot `index` is bound
    pub fn is_bound(&self, index: usize) -> bool {
        self.symbols[index].is_some()
    }

    /// Length of the leading run of bound slots
    pub fn bound_prefix(&self) -> usize {
        self.symbols
            .iter()
            .position(Option::is_none)
            .unwrap_or(self.symbols.len())
    }

    /// Bind one symbol
    pub fn set_symbol(&mut self, index: usize, data: &'a [u8]) {
        assert!(index < self.symbols.len(), "symbol index {index} out of range");
        assert_eq!(data.len(), self.symbol_size, "symbol has the wrong size");
        if self.symbols[index].replace(data).is_none() {
            self.bound += 1;
        }
    }

    /// Bind a whole block of `symbols * symbol_size` bytes
    pub fn set_symbols(&mut self, data: &'a [u8]) {
        assert_eq!(
            data.len(),
            self.symbols.len() * self.symbol_size,
            "block has the wrong size"
        );
        for (index, symbol) in data.chunks_exact(self.symbol_size).enumerate() {
            self.set_symbol(index, symbol);
        }
    }

    /// Symbol `index`; panics when unbound
    pub fn symbol(&self, index: usize) -> &'a [u8] {
        match self.symbols[index] {
            Some(data) => data,
            None => panic!("symbol {index} has no storage"),
        }
    }

    /// Unbind everything
    pub fn clear(&mut self) {
        self.symbols.fill(None);
        self.bound = 0;
    }
}

/// Writable symbols borrowed from the caller; the decoder decodes in place
#[derive(Debug)]
pub struct MutableSymbolStorage<'a> {
    symbol_size: usize,
    symbols: Vec<Option<&'a mut [u8]>>,
}

impl<'a> MutableSymbolStorage<'a> {
    /// Create storage for `symbols` symbols of `symbol_size` bytes, all unbound
    pub fn new(symbols: usize, symbol_size: usize) -> Self {
        Self {
            symbol_size,
            symbols: (0..symbols).map(|_| None).collect(),
        }
    }

    /// Whether slot `index` is bound
    pub fn is_bound(&self, index: usize) -> bool {
        self.symbols[index].is_some()
    }

    /// Bind one symbol buffer
    pub fn set_symbol(&mut self, index: usize, data: &'a mut [u8]) {
        assert!(index < self.symbols.len(), "symbol index {index} out of range");
        assert_eq!(data.len(), self.symbol_size, "symbol has the wrong size");
        self.symbols[index] = Some(data);
    }

    /// Bind a whole block of `symbols * symbol_size` bytes
    pub fn set_symbols(&mut self, data: &'a mut [u8]) {
        assert_eq!(
            data.len(),
            self.symbols.len() * self.symbol_size,
            "block has the wrong size"
        );
        for (slot, symbol) in self
            .symbols
            .iter_mut()
            .zip(data.chunks_exact_mut(self.symbol_size))
        {
            *slot = Some(symbol);
        }
    }

    /// Symbol `index`; panics when unbound
    pub fn symbol(&self, index: usize) -> &[u8] {
        match &self.symbols[index] {
            Some(data) => &data[..],
            None => panic!("symbol {index} has no storage"),
        }
    }

    /// Mutable symbol `index`; panics when unbound
    pub fn symbol_mut(&mut self, index: usize) -> &mut [u8] {
        match &mut self.symbols[index] {
            Some(data) => &mut data[..],
            None => panic!("symbol {index} has no storage"),
        }
    }

    /// Unbind everything
    pub fn clear(&mut self) {
        for slot in &mut self.symbols {
            *slot = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_const_storage_binding() {
        let block: Vec<u8> = (0..12).collect();
        let mut storage = ConstSymbolStorage::new(3, 4);
        assert_eq!(storage.bound(), 0);

        storage.set_symbol(1, &block[4..8]);
        assert_eq!(storage.bound(), 1);
        assert_eq!(storage.bound_prefix(), 0);
        assert!(storage.is_bound(1));
        assert!(!storage.is_bound(0));

        storage.set_symbol(0, &block[0..4]);
        assert_eq!(storage.bound_prefix(), 2);

        // Rebinding the same index does not count twice
        storage.set_symbol(1, &block[8..12]);
        assert_eq!(storage.bound(), 2);
        assert_eq!(storage.symbol(1), &[8, 9, 10, 11]);

        storage.set_symbols(&block);
        assert!(storage.is_full());
        assert_eq!(storage.bound_prefix(), 3);
        assert_eq!(storage.symbol(2), &[8, 9, 10, 11]);

        storage.clear();
        assert_eq!(storage.bound(), 0);
    }

    #[test]
    #[should_panic]
    fn test_const_storage_unbound_access_panics() {
        let storage = ConstSymbolStorage::new(2, 4);
        storage.symbol(0);
    }

    #[test]
    #[should_panic]
    fn test_const_storage_wrong_size_panics() {
        let data = [0u8; 3];
        let mut storage = ConstSymbolStorage::new(2, 4);
        storage.set_symbol(0, &data);
    }

    #[test]
    fn test_mutable_storage_writes_through() {
        let mut block = vec![0u8; 6];
        {
            let mut storage = MutableSymbolStorage::new(3, 2);
            storage.set_symbols(&mut block);
            storage.symbol_mut(2).copy_from_slice(&[7, 7]);
            assert_eq!(storage.symbol(2), &[7, 7]);
        }
        assert_eq!(block, vec![0, 0, 0, 0, 7, 7]);
    }

    #[test]
    fn test_mutable_storage_per_symbol() {
        let mut first = [0u8; 2];
        let mut second = [0u8; 2];
        {
            let mut storage = MutableSymbolStorage::new(2, 2);
            storage.set_symbol(1, &mut second);
            assert!(!storage.is_bound(0));
            storage.set_symbol(0, &mut first);
            storage.symbol_mut(0)[0] = 1;
            storage.symbol_mut(1)[1] = 2;
        }
        assert_eq!(first, [1, 0]);
        assert_eq!(second, [0, 2]);
    }
}
