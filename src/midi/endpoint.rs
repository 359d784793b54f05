use std::{fmt, sync::Arc};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    In,
    Out,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Direction {
    pub fn idx(self) -> usize {
        match self {
            Direction::In => 0,
            Direction::Out => 1,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Direction::In => "Input",
            Direction::Out => "Output",
        }
    }
}

bitflags::bitflags! {
    /// What the device behind an endpoint is able to do.
    pub struct Capabilities: u8 {
        /// The device produces MIDI messages.
        const TRANSMIT = 0b00000001;
        /// The device accepts MIDI messages.
        const RECEIVE  = 0b00000010;
    }
}

/// An addressable MIDI input or output, as listed by the backend.
///
/// Endpoints are created at enumeration time and never change afterwards.
/// The `index` is the position of the endpoint among the endpoints
/// with the same [`Direction`].
#[derive(Clone, Debug, PartialEq)]
pub struct Endpoint {
    index: usize,
    name: Arc<str>,
    direction: Direction,
    caps: Capabilities,
}

impl Endpoint {
    pub fn new(index: usize, name: impl Into<Arc<str>>, direction: Direction) -> Self {
        let caps = match direction {
            Direction::In => Capabilities::TRANSMIT,
            Direction::Out => Capabilities::RECEIVE,
        };

        Self {
            index,
            name: name.into(),
            direction,
            caps,
        }
    }

    #[must_use]
    pub fn with_capabilities(mut self, caps: Capabilities) -> Self {
        self.caps |= caps;
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &Arc<str> {
        &self.name
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn capabilities(&self) -> Capabilities {
        self.caps
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{} ({})", self.direction, self.index, self.name)
    }
}
