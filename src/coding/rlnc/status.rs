//! Per-symbol decoding progress

/// Decoding progress of one source symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SymbolStatus {
    /// No row has its pivot at this index
    Missing,
    /// A pivot row exists but still combines other symbols
    PartiallyDecoded,
    /// The symbol is available verbatim
    Decoded,
}

/// Per-index status plus running counts
#[derive(Debug, Clone)]
pub(crate) struct SymbolStatusTracker {
    status: Vec<SymbolStatus>,
    partially_decoded: usize,
    decoded: usize,
}

impl SymbolStatusTracker {
    pub fn new(symbols: usize) -> Self {
        Self {
            status: vec![SymbolStatus::Missing; symbols],
            partially_decoded: 0,
            decoded: 0,
        }
    }

    #[inline]
    pub fn get(&self, index: usize) -> SymbolStatus {
        self.status[index]
    }

    /// Move `index` forward; a status never regresses
    pub fn set(&mut self, index: usize, status: SymbolStatus) {
        let old = self.status[index];
        debug_assert!(old <= status, "status of {index} regressed");
        if old >= status {
            return;
        }
        match old {
            SymbolStatus::PartiallyDecoded => self.partially_decoded -= 1,
            SymbolStatus::Decoded => self.decoded -= 1,
            SymbolStatus::Missing => {}
        }
        match status {
            SymbolStatus::PartiallyDecoded => self.partially_decoded += 1,
            SymbolStatus::Decoded => self.decoded += 1,
            SymbolStatus::Missing => {}
        }
        self.status[index] = status;
    }

    pub fn mark_all_decoded(&mut self) {
        self.status.fill(SymbolStatus::Decoded);
        self.partially_decoded = 0;
        self.decoded = self.status.len();
    }

    pub fn missing(&self) -> usize {
        self.status.len() - self.partially_decoded - self.decoded
    }

    pub fn partially_decoded(&self) -> usize {
        self.partially_decoded
    }

    pub fn decoded(&self) -> usize {
        self.decoded
    }

    pub fn clear(&mut self) {
        self.status.fill(SymbolStatus::Missing);
        self.partially_decoded = 0;
        self.decoded = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_follow_transitions() {
        let mut tracker = SymbolStatusTracker::new(3);
        assert_eq!(tracker.missing(), 3);

        tracker.set(0, SymbolStatus::PartiallyDecoded);
        tracker.set(1, SymbolStatus::Decoded);
        assert_eq!(
            (tracker.missing(), tracker.partially_decoded(), tracker.decoded()),
            (1, 1, 1)
        );

        tracker.set(0, SymbolStatus::Decoded);
        assert_eq!(tracker.partially_decoded(), 0);
        assert_eq!(tracker.decoded(), 2);
        assert_eq!(tracker.get(0), SymbolStatus::Decoded);

        tracker.mark_all_decoded();
        assert_eq!(tracker.decoded(), 3);
        assert_eq!(tracker.missing(), 0);

        tracker.clear();
        assert_eq!(tracker.missing(), 3);
    }

    #[test]
    fn test_repeated_status_is_counted_once() {
        let mut tracker = SymbolStatusTracker::new(2);
        tracker.set(1, SymbolStatus::PartiallyDecoded);
        tracker.set(1, SymbolStatus::PartiallyDecoded);
        assert_eq!(tracker.partially_decoded(), 1);
    }
}
