//! Utilities shared by the coders

mod rand;
mod trace;

pub use self::rand::CodingRng;
pub use self::trace::{StdoutSink, TraceSink, Tracer};
