use std::sync::atomic::{AtomicBool, Ordering};

use super::Error;
use crate::midi::{Direction, Endpoint};

/// One endpoint and its routing flags.
#[derive(Debug)]
pub struct RoutingEntry {
    endpoint: Endpoint,
    enabled: AtomicBool,
    available: AtomicBool,
}

impl RoutingEntry {
    fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            enabled: AtomicBool::new(false),
            available: AtomicBool::new(false),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Whether the operator wants this endpoint in the routing.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Whether the device could be opened for this session.
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::Acquire)
    }

    /// Whether traffic flows through this endpoint.
    pub fn is_routable(&self) -> bool {
        self.is_enabled() && self.is_available()
    }

    pub(super) fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::Release);
    }
}

/// The known inputs & outputs and their enabled flags.
///
/// Entries are fixed at construction: their order is the fan-out order
/// and only their flags change afterwards. Each flag is an atomic on its own,
/// there is no table-wide lock, so a concurrent reader may see a toggle
/// one dispatch late.
#[derive(Debug)]
pub struct RoutingTable {
    inputs: Box<[RoutingEntry]>,
    outputs: Box<[RoutingEntry]>,
}

impl RoutingTable {
    /// Builds the table with all entries disabled.
    pub fn new(
        inputs: impl IntoIterator<Item = Endpoint>,
        outputs: impl IntoIterator<Item = Endpoint>,
    ) -> Self {
        Self {
            inputs: inputs.into_iter().map(RoutingEntry::new).collect(),
            outputs: outputs.into_iter().map(RoutingEntry::new).collect(),
        }
    }

    fn entries(&self, direction: Direction) -> &[RoutingEntry] {
        match direction {
            Direction::In => &self.inputs,
            Direction::Out => &self.outputs,
        }
    }

    pub fn entry(&self, direction: Direction, index: usize) -> Result<&RoutingEntry, Error> {
        let entries = self.entries(direction);
        entries.get(index).ok_or(Error::InvalidIndex {
            direction,
            index,
            count: entries.len(),
        })
    }

    pub fn inputs(&self) -> impl ExactSizeIterator<Item = &RoutingEntry> {
        self.inputs.iter()
    }

    pub fn outputs(&self) -> impl ExactSizeIterator<Item = &RoutingEntry> {
        self.outputs.iter()
    }

    /// Sets the enabled flag, returning the previous value.
    pub fn enable(&self, direction: Direction, index: usize, on: bool) -> Result<bool, Error> {
        let entry = self.entry(direction, index)?;
        let was = entry.enabled.swap(on, Ordering::AcqRel);

        if was != on {
            log::info!(
                "{} {}",
                entry.endpoint,
                if on { "enabled" } else { "disabled" }
            );
        }

        Ok(was)
    }

    pub fn enable_input(&self, index: usize, on: bool) -> Result<bool, Error> {
        self.enable(Direction::In, index, on)
    }

    pub fn enable_output(&self, index: usize, on: bool) -> Result<bool, Error> {
        self.enable(Direction::Out, index, on)
    }

    pub fn is_input_enabled(&self, index: usize) -> Result<bool, Error> {
        self.entry(Direction::In, index).map(RoutingEntry::is_enabled)
    }

    pub fn is_output_enabled(&self, index: usize) -> Result<bool, Error> {
        self.entry(Direction::Out, index).map(RoutingEntry::is_enabled)
    }
}
