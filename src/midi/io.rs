use once_cell::sync::OnceCell;
use std::sync::Arc;

use super::{
    device::{Device, InputDevice, Listener, OutputDevice},
    Endpoint, Error, Event,
};

/// Backend connection state for one port.
///
/// The backend client is created lazily on first open and kept
/// across a close so it can be reused.
enum Connection<IO, C> {
    Connected(C),
    Disconnected(IO),
    None,
}

impl<IO, C> Default for Connection<IO, C> {
    fn default() -> Self {
        Self::None
    }
}

impl<IO, C> Connection<IO, C> {
    fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }
}

fn client_port_name(client_name: &str, endpoint: &Endpoint) -> String {
    format!(
        "{client_name} {} {}",
        endpoint.direction().as_str(),
        endpoint.index()
    )
}

pub struct MidirInput {
    endpoint: Endpoint,
    client_name: Arc<str>,
    port: midir::MidiInputPort,
    conn: Connection<midir::MidiInput, midir::MidiInputConnection<()>>,
    listener: Arc<OnceCell<Listener>>,
}

impl MidirInput {
    pub fn new(client_name: Arc<str>, endpoint: Endpoint, port: midir::MidiInputPort) -> Self {
        Self {
            endpoint,
            client_name,
            port,
            conn: Connection::None,
            listener: Arc::new(OnceCell::new()),
        }
    }
}

impl Device for MidirInput {
    fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn open(&mut self) -> Result<(), Error> {
        if self.conn.is_connected() {
            return Err(Error::AlreadyConnected(self.endpoint.name().clone()));
        }

        let mut midi_input = match std::mem::take(&mut self.conn) {
            Connection::Disconnected(midi_input) => midi_input,
            _ => midir::MidiInput::new(&self.client_name)?,
        };
        // Forward everything, sysex & realtime included.
        midi_input.ignore(midir::Ignore::None);

        // The backend callback is wired once per connection and only
        // forwards to the listener, which can be attached afterwards.
        let listener = Arc::clone(&self.listener);
        let callback = move |timestamp: u64, payload: &[u8], _: &mut ()| {
            if let Some(listener) = listener.get() {
                listener(&Event::new(timestamp, payload));
            }
        };

        let port_name = client_port_name(&self.client_name, &self.endpoint);
        match midi_input.connect(&self.port, &port_name, callback, ()) {
            Ok(conn) => self.conn = Connection::Connected(conn),
            Err(err) => {
                self.conn = Connection::Disconnected(err.into_inner());
                return Err(Error::Connection(self.endpoint.name().clone()));
            }
        }

        log::info!("{} is open", self.endpoint);

        Ok(())
    }

    fn close(&mut self) -> Result<(), Error> {
        match std::mem::take(&mut self.conn) {
            Connection::Connected(conn) => {
                let (midi_input, ()) = conn.close();
                self.conn = Connection::Disconnected(midi_input);
                log::info!("{} closed", self.endpoint);

                Ok(())
            }
            other => {
                self.conn = other;
                Err(Error::NotConnected(self.endpoint.name().clone()))
            }
        }
    }
}

impl InputDevice for MidirInput {
    fn attach_listener(&mut self, listener: Listener) {
        if self.listener.set(listener).is_err() {
            log::warn!("{} already has a listener", self.endpoint);
        }
    }
}

pub struct MidirOutput {
    endpoint: Endpoint,
    client_name: Arc<str>,
    port: midir::MidiOutputPort,
    conn: Connection<midir::MidiOutput, midir::MidiOutputConnection>,
}

impl MidirOutput {
    pub fn new(client_name: Arc<str>, endpoint: Endpoint, port: midir::MidiOutputPort) -> Self {
        Self {
            endpoint,
            client_name,
            port,
            conn: Connection::None,
        }
    }
}

impl Device for MidirOutput {
    fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn open(&mut self) -> Result<(), Error> {
        if self.conn.is_connected() {
            return Err(Error::AlreadyConnected(self.endpoint.name().clone()));
        }

        let midi_output = match std::mem::take(&mut self.conn) {
            Connection::Disconnected(midi_output) => midi_output,
            _ => midir::MidiOutput::new(&self.client_name)?,
        };

        let port_name = client_port_name(&self.client_name, &self.endpoint);
        match midi_output.connect(&self.port, &port_name) {
            Ok(conn) => self.conn = Connection::Connected(conn),
            Err(err) => {
                self.conn = Connection::Disconnected(err.into_inner());
                return Err(Error::Connection(self.endpoint.name().clone()));
            }
        }

        log::info!("{} is open", self.endpoint);

        Ok(())
    }

    fn close(&mut self) -> Result<(), Error> {
        match std::mem::take(&mut self.conn) {
            Connection::Connected(conn) => {
                self.conn = Connection::Disconnected(conn.close());
                log::info!("{} closed", self.endpoint);

                Ok(())
            }
            other => {
                self.conn = other;
                Err(Error::NotConnected(self.endpoint.name().clone()))
            }
        }
    }
}

impl OutputDevice for MidirOutput {
    fn emit(&mut self, event: &Event<'_>) -> Result<(), Error> {
        match self.conn {
            Connection::Connected(ref mut conn) => {
                conn.send(event.payload)?;
                Ok(())
            }
            _ => Err(Error::NotConnected(self.endpoint.name().clone())),
        }
    }
}
