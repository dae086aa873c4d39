//! Shallow symbol storage: coders borrow the caller's buffers instead of
//! owning copies

mod symbol;

pub use symbol::{ConstSymbolStorage, MutableSymbolStorage};
