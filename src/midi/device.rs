use std::sync::Arc;

use super::{Endpoint, Error, Event};

/// Callback invoked for each event received by an input device.
///
/// Input devices call their listener from the backend's own thread,
/// so one listener may run concurrently with the listeners of other inputs.
pub type Listener = Arc<dyn Fn(&Event<'_>) + Send + Sync>;

/// A handle on one MIDI endpoint which can be opened & closed.
pub trait Device: Send + 'static {
    fn endpoint(&self) -> &Endpoint;

    fn open(&mut self) -> Result<(), Error>;

    /// Closes the device.
    ///
    /// Closing a device which is not open fails with [`Error::NotConnected`].
    fn close(&mut self) -> Result<(), Error>;
}

pub trait InputDevice: Device {
    /// Attaches the listener which receives the device's events.
    ///
    /// The listener stays attached for the lifetime of the handle:
    /// attempts to attach another one are ignored.
    fn attach_listener(&mut self, listener: Listener);
}

pub trait OutputDevice: Device {
    /// Sends `event` to the device as one unit.
    fn emit(&mut self, event: &Event<'_>) -> Result<(), Error>;
}
