//! Recording stub devices.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use super::{Device, Direction, Endpoint, Error, Event, InputDevice, Listener, OutputDevice};

/// Payloads emitted by stub outputs, in emission order.
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<(usize, Vec<u8>)>>>);

impl Journal {
    fn push(&self, output: usize, payload: &[u8]) {
        self.0.lock().unwrap().push((output, payload.to_vec()));
    }

    pub fn entries(&self) -> Vec<(usize, Vec<u8>)> {
        self.0.lock().unwrap().clone()
    }

    pub fn received_by(&self, output: usize) -> Vec<Vec<u8>> {
        self.entries()
            .into_iter()
            .filter(|(idx, _)| *idx == output)
            .map(|(_, payload)| payload)
            .collect()
    }

    /// Indices of the outputs in the order they received something.
    pub fn order(&self) -> Vec<usize> {
        self.entries().into_iter().map(|(idx, _)| idx).collect()
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

/// Simulates traffic on a [`StubInput`].
#[derive(Clone)]
pub struct InputProbe {
    is_open: Arc<AtomicBool>,
    listener: Arc<Mutex<Option<Listener>>>,
}

impl InputProbe {
    /// Fires an event as the device would.
    ///
    /// Returns `false` if the device is closed or has no listener.
    pub fn fire(&self, timestamp: u64, payload: &[u8]) -> bool {
        if !self.is_open.load(Ordering::SeqCst) {
            return false;
        }

        let listener = self.listener.lock().unwrap().clone();
        match listener {
            Some(listener) => {
                listener(&Event::new(timestamp, payload));
                true
            }
            None => false,
        }
    }
}

pub struct StubInput {
    endpoint: Endpoint,
    is_open: Arc<AtomicBool>,
    listener: Arc<Mutex<Option<Listener>>>,
    fail_open: bool,
}

impl StubInput {
    pub fn new(index: usize, name: &str) -> (Self, InputProbe) {
        let is_open = Arc::new(AtomicBool::new(false));
        let listener = Arc::new(Mutex::new(None));
        let probe = InputProbe {
            is_open: is_open.clone(),
            listener: listener.clone(),
        };

        let this = Self {
            endpoint: Endpoint::new(index, name, Direction::In),
            is_open,
            listener,
            fail_open: false,
        };

        (this, probe)
    }

    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }
}

impl Device for StubInput {
    fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn open(&mut self) -> Result<(), Error> {
        if self.fail_open {
            return Err(Error::Connection(self.endpoint.name().clone()));
        }
        if self.is_open.swap(true, Ordering::SeqCst) {
            return Err(Error::AlreadyConnected(self.endpoint.name().clone()));
        }

        Ok(())
    }

    fn close(&mut self) -> Result<(), Error> {
        if !self.is_open.swap(false, Ordering::SeqCst) {
            return Err(Error::NotConnected(self.endpoint.name().clone()));
        }

        Ok(())
    }
}

impl InputDevice for StubInput {
    fn attach_listener(&mut self, listener: Listener) {
        let mut cur = self.listener.lock().unwrap();
        if cur.is_none() {
            *cur = Some(listener);
        }
    }
}

pub struct StubOutput {
    endpoint: Endpoint,
    is_open: bool,
    journal: Journal,
    fail_open: bool,
    fail_emit: bool,
}

impl StubOutput {
    pub fn new(index: usize, name: &str, journal: &Journal) -> Self {
        Self {
            endpoint: Endpoint::new(index, name, Direction::Out),
            is_open: false,
            journal: journal.clone(),
            fail_open: false,
            fail_emit: false,
        }
    }

    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    pub fn failing_emit(mut self) -> Self {
        self.fail_emit = true;
        self
    }
}

impl Device for StubOutput {
    fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn open(&mut self) -> Result<(), Error> {
        if self.fail_open {
            return Err(Error::Connection(self.endpoint.name().clone()));
        }
        if self.is_open {
            return Err(Error::AlreadyConnected(self.endpoint.name().clone()));
        }

        self.is_open = true;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Error> {
        if !self.is_open {
            return Err(Error::NotConnected(self.endpoint.name().clone()));
        }

        self.is_open = false;
        Ok(())
    }
}

impl OutputDevice for StubOutput {
    fn emit(&mut self, event: &Event<'_>) -> Result<(), Error> {
        if !self.is_open {
            return Err(Error::NotConnected(self.endpoint.name().clone()));
        }
        if self.fail_emit {
            return Err(Error::Send(midir::SendError::Other("stub rejected the message")));
        }

        self.journal.push(self.endpoint.index(), event.payload);
        Ok(())
    }
}

pub fn inputs(names: &[&str]) -> (Vec<Box<dyn InputDevice>>, Vec<InputProbe>) {
    names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let (input, probe) = StubInput::new(index, name);
            (Box::new(input) as Box<dyn InputDevice>, probe)
        })
        .unzip()
}

pub fn outputs(names: &[&str], journal: &Journal) -> Vec<Box<dyn OutputDevice>> {
    names
        .iter()
        .enumerate()
        .map(|(index, name)| Box::new(StubOutput::new(index, name, journal)) as Box<dyn OutputDevice>)
        .collect()
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
