//! Pluggable diagnostic sinks
//!
//! A coder owns a [`Tracer`]. With no sink attached it is inert: messages are
//! never formatted and coding behaviour is identical.

use std::fmt;

/// Receiver of `(zone, text)` diagnostic pairs
pub trait TraceSink {
    /// Handle one message
    fn emit(&mut self, zone: &str, text: &str);
}

impl<F> TraceSink for F
where
    F: FnMut(&str, &str),
{
    fn emit(&mut self, zone: &str, text: &str) {
        self(zone, text)
    }
}

/// Sink printing every message to standard output
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl TraceSink for StdoutSink {
    fn emit(&mut self, zone: &str, text: &str) {
        println!("{zone}:");
        println!("{text}");
    }
}

/// Optional sink plus zone prefix
#[derive(Default)]
pub struct Tracer {
    sink: Option<Box<dyn TraceSink>>,
    zone_prefix: String,
}

impl Tracer {
    /// Whether a sink is attached
    #[inline]
    pub fn enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Attach a sink, replacing any previous one
    pub fn set_sink(&mut self, sink: Box<dyn TraceSink>) {
        self.sink = Some(sink);
    }

    /// Detach the sink
    pub fn set_off(&mut self) {
        self.sink = None;
    }

    /// Prefix prepended to every zone as `prefix.zone`
    pub fn set_zone_prefix(&mut self, prefix: &str) {
        self.zone_prefix = prefix.to_owned();
    }

    /// Emit a message; `text` is only evaluated when a sink is attached
    pub fn emit<T>(&mut self, zone: &str, text: T)
    where
        T: FnOnce() -> String,
    {
        if let Some(sink) = self.sink.as_mut() {
            let text = text();
            if self.zone_prefix.is_empty() {
                sink.emit(zone, &text);
            } else {
                sink.emit(&format!("{}.{}", self.zone_prefix, zone), &text);
            }
        }
    }
}

impl fmt::Debug for Tracer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracer")
            .field("enabled", &self.enabled())
            .field("zone_prefix", &self.zone_prefix)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_disabled_tracer_skips_formatting() {
        let mut tracer = Tracer::default();
        tracer.emit("zone", || panic!("must not be evaluated"));
        assert!(!tracer.enabled());
    }

    #[test]
    fn test_zone_prefix() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink_seen = Rc::clone(&seen);

        let mut tracer = Tracer::default();
        tracer.set_sink(Box::new(move |zone: &str, text: &str| {
            sink_seen.borrow_mut().push(format!("{zone}|{text}"));
        }));
        tracer.emit("decoder_state", || "a".to_string());
        tracer.set_zone_prefix("relay");
        tracer.emit("decoder_state", || "b".to_string());
        tracer.set_off();
        tracer.emit("decoder_state", || "c".to_string());

        assert_eq!(
            *seen.borrow(),
            vec!["decoder_state|a", "relay.decoder_state|b"]
        );
    }
}
