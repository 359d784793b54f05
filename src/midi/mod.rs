pub mod device;
pub use device::{Device, InputDevice, Listener, OutputDevice};

pub mod endpoint;
pub use endpoint::{Capabilities, Direction, Endpoint};

mod error;
pub use error::Error;

pub mod event;
pub use event::Event;

mod io;
pub use io::{MidirInput, MidirOutput};

pub mod port;
pub use port::Devices;

#[cfg(test)]
pub mod test_support;
