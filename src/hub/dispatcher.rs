use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{Error, Reporter, RoutingEntry, RoutingTable};
use crate::midi::{Device, Direction, Endpoint, Event, OutputDevice};

pub(super) type OutputSlot = Mutex<Box<dyn OutputDevice>>;

/// Locks an output, recovering it if a panicking thread poisoned the lock.
pub(super) fn lock(output: &OutputSlot) -> MutexGuard<'_, Box<dyn OutputDevice>> {
    output.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Outcome of one dispatch.
#[derive(Debug)]
pub enum Dispatch {
    /// The source input is disabled or unknown.
    Dropped,
    Delivered {
        /// Number of outputs which accepted the event.
        outputs: usize,
        /// Already reported emit failures.
        failures: Vec<Error>,
    },
}

impl Dispatch {
    pub fn delivered(&self) -> usize {
        match self {
            Dispatch::Dropped => 0,
            Dispatch::Delivered { outputs, .. } => *outputs,
        }
    }
}

/// Fans events from the inputs out to the enabled outputs.
///
/// The `Dispatcher` is shared by the listeners of all the inputs, which
/// run on their own backend threads. Each output sits behind its own lock,
/// so dispatches from different inputs only contend when they emit
/// to the same output, and an event is never interleaved with another
/// on the same output.
pub struct Dispatcher {
    routing: RoutingTable,
    outputs: Box<[OutputSlot]>,
    reporter: Reporter,
}

impl Dispatcher {
    pub fn new(
        inputs: impl IntoIterator<Item = Endpoint>,
        outputs: Vec<Box<dyn OutputDevice>>,
        reporter: Reporter,
    ) -> Self {
        let routing = RoutingTable::new(
            inputs,
            outputs.iter().map(|output| output.endpoint().clone()),
        );

        Self {
            routing,
            outputs: outputs.into_iter().map(Mutex::new).collect(),
            reporter,
        }
    }

    pub fn routing(&self) -> &RoutingTable {
        &self.routing
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    pub(super) fn outputs(&self) -> impl Iterator<Item = (&RoutingEntry, &OutputSlot)> {
        self.routing.outputs().zip(self.outputs.iter())
    }

    /// Delivers `event` from input `source` to the enabled outputs.
    ///
    /// Outputs are served in routing table order. A failing output is
    /// reported and skipped, it stays enabled for the next event.
    ///
    /// Flags are read once per event: an output disabled while an event
    /// is being dispatched may still receive that event if its flag was
    /// already checked.
    pub fn dispatch(&self, source: usize, event: &Event<'_>) -> Dispatch {
        match self.routing.entry(Direction::In, source) {
            Ok(entry) if entry.is_routable() => {
                log::trace!("{} event {event}", entry.endpoint());
            }
            Ok(_) => return Dispatch::Dropped,
            Err(err) => {
                self.reporter.report(&err);
                return Dispatch::Dropped;
            }
        }

        let mut delivered = 0;
        let mut failures = Vec::new();
        for (entry, output) in self.outputs() {
            if !entry.is_routable() {
                continue;
            }

            let res = lock(output).emit(event);
            match res {
                Ok(()) => delivered += 1,
                Err(err) => {
                    let err = Error::emit(entry.endpoint(), err);
                    self.reporter.report(&err);
                    failures.push(err);
                }
            }
        }

        Dispatch::Delivered {
            outputs: delivered,
            failures,
        }
    }
}
