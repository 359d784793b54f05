//! The routing hub: merges the traffic of the enabled inputs
//! and splits it to the enabled outputs.

use std::sync::Arc;

pub mod dispatcher;
pub use dispatcher::{Dispatch, Dispatcher};

mod error;
pub use error::{Error, Reporter};

pub mod routing;
pub use routing::{RoutingEntry, RoutingTable};

use crate::midi::{Device, Direction, Endpoint, Event, InputDevice, Listener, OutputDevice};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum State {
    /// Devices closed.
    Initialized,
    /// Devices open, listeners active.
    Running,
    ShuttingDown,
    Terminated,
}

pub struct Hub {
    inputs: Vec<Box<dyn InputDevice>>,
    dispatcher: Arc<Dispatcher>,
    state: State,
}

impl Hub {
    /// Builds the hub for the given devices, all of them disabled.
    pub fn initialize(
        inputs: Vec<Box<dyn InputDevice>>,
        outputs: Vec<Box<dyn OutputDevice>>,
    ) -> Self {
        Self::with_reporter(inputs, outputs, Reporter::default())
    }

    pub fn with_reporter(
        inputs: Vec<Box<dyn InputDevice>>,
        outputs: Vec<Box<dyn OutputDevice>>,
        reporter: Reporter,
    ) -> Self {
        let dispatcher = Dispatcher::new(
            inputs.iter().map(|input| input.endpoint().clone()),
            outputs,
            reporter,
        );

        log::debug!(
            "Hub initialized with {} input(s) & {} output(s)",
            dispatcher.routing().inputs().len(),
            dispatcher.routing().outputs().len(),
        );

        Self {
            inputs,
            dispatcher: Arc::new(dispatcher),
            state: State::Initialized,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn routing(&self) -> &RoutingTable {
        self.dispatcher.routing()
    }

    pub fn endpoints(&self, direction: Direction) -> Vec<Endpoint> {
        let endpoint = |entry: &RoutingEntry| entry.endpoint().clone();
        match direction {
            Direction::In => self.routing().inputs().map(endpoint).collect(),
            Direction::Out => self.routing().outputs().map(endpoint).collect(),
        }
    }

    /// Opens all the devices and starts routing.
    ///
    /// A device which fails to open is reported and left out of the routing
    /// for the session, the others are opened regardless.
    /// Returns the reported failures.
    pub fn open_all(&mut self) -> Vec<Error> {
        if self.state != State::Initialized {
            log::warn!("Devices can only be opened once, hub is {:?}", self.state);
            return Vec::new();
        }

        let mut failures = Vec::new();
        let reporter = self.dispatcher.reporter();
        let mut report = |err: Error| {
            reporter.report(&err);
            failures.push(err);
        };

        let entries = self.dispatcher.routing().inputs();
        for (index, (entry, input)) in entries.zip(self.inputs.iter_mut()).enumerate() {
            match input.open() {
                Ok(()) => {
                    input.attach_listener(listener(&self.dispatcher, index));
                    entry.set_available(true);
                }
                Err(err) => report(Error::open(input.endpoint(), err)),
            }
        }

        for (entry, output) in self.dispatcher.outputs() {
            let res = dispatcher::lock(output).open();
            match res {
                Ok(()) => entry.set_available(true),
                Err(err) => report(Error::open(entry.endpoint(), err)),
            }
        }

        self.state = State::Running;
        log::info!("Hub running");

        failures
    }

    /// Closes all the devices.
    ///
    /// Can be called at any time and more than once: devices which are not
    /// open are reported as close failures, nothing else happens.
    /// Returns the reported failures.
    pub fn close_all(&mut self) -> Vec<Error> {
        self.state = State::ShuttingDown;

        let mut failures = Vec::new();
        let reporter = self.dispatcher.reporter();
        let mut report = |err: Error| {
            reporter.report(&err);
            failures.push(err);
        };

        for input in self.inputs.iter_mut() {
            if let Err(err) = input.close() {
                report(Error::close(input.endpoint(), err));
            }
        }

        for (entry, output) in self.dispatcher.outputs() {
            let res = dispatcher::lock(output).close();
            if let Err(err) = res {
                report(Error::close(entry.endpoint(), err));
            }
        }

        self.state = State::Terminated;
        log::info!("Hub terminated");

        failures
    }

    /// Enables or disables the traffic from input `index`.
    ///
    /// Applies from the next event on.
    pub fn set_input_status(&self, index: usize, on: bool) -> Result<(), Error> {
        self.set_status(Direction::In, index, on)
    }

    /// Enables or disables the traffic to output `index`.
    ///
    /// Applies from the next event on.
    pub fn set_output_status(&self, index: usize, on: bool) -> Result<(), Error> {
        self.set_status(Direction::Out, index, on)
    }

    pub fn set_status(&self, direction: Direction, index: usize, on: bool) -> Result<(), Error> {
        self.routing()
            .enable(direction, index, on)
            .map(|_| ())
            .map_err(|err| {
                self.dispatcher.reporter().report(&err);
                err
            })
    }
}

impl Drop for Hub {
    fn drop(&mut self) {
        if self.state == State::Running {
            log::warn!("Hub dropped while running, closing devices");
            self.close_all();
        }
    }
}

/// The listener of input `index`, wired for the lifetime of the device.
///
/// Enabling or disabling the input doesn't rewire it: the dispatcher
/// checks the flags for each event.
fn listener(dispatcher: &Arc<Dispatcher>, index: usize) -> Listener {
    let dispatcher = Arc::clone(dispatcher);
    Arc::new(move |event: &Event<'_>| {
        dispatcher.dispatch(index, event);
    })
}
