use std::fmt;

use crate::bytes;

/// One MIDI message as delivered by an input device.
///
/// The payload is opaque: it is forwarded as is, never parsed.
/// An `Event` only lives for the duration of one dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Event<'a> {
    /// Backend supplied timestamp, in microseconds.
    pub timestamp: u64,
    pub payload: &'a [u8],
}

impl<'a> Event<'a> {
    pub fn new(timestamp: u64, payload: &'a [u8]) -> Self {
        Self { timestamp, payload }
    }

    pub fn display(&self) -> bytes::Displayable<'a> {
        bytes::Displayable::from(self.payload)
    }
}

impl<'a> fmt::Display for Event<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}µs {}", self.timestamp, self.display())
    }
}
