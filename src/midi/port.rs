use midir::MidiIO;
use std::sync::Arc;

use super::{
    device::{Device, InputDevice, OutputDevice},
    io::{MidirInput, MidirOutput},
    Capabilities, Direction, Endpoint, Error,
};
use crate::config::{Config, DeviceFilter};

/// The devices found by [`scan`], in backend order.
pub struct Devices {
    pub inputs: Vec<Box<dyn InputDevice>>,
    pub outputs: Vec<Box<dyn OutputDevice>>,
}

impl Devices {
    pub fn names(&self, direction: Direction) -> Vec<Arc<str>> {
        match direction {
            Direction::In => self
                .inputs
                .iter()
                .map(|dev| dev.endpoint().name().clone())
                .collect(),
            Direction::Out => self
                .outputs
                .iter()
                .map(|dev| dev.endpoint().name().clone())
                .collect(),
        }
    }
}

/// Lists the ports of `io`, skipping our own & filtered ports.
fn list_ports<IO: MidiIO>(
    io: &IO,
    client_name: &str,
    filter: &DeviceFilter,
) -> Result<Vec<(Arc<str>, IO::Port)>, Error> {
    let mut ports = Vec::new();
    for port in io.ports().iter() {
        let name = io.port_name(port)?;
        if name.starts_with(client_name) {
            log::trace!("Skipping own port {name}");
            continue;
        }
        if !filter.accepts(&name) {
            log::debug!("Ignoring port {name}");
            continue;
        }

        ports.push((name.into(), port.clone()));
    }

    Ok(ports)
}

/// Builds the endpoints for the given port names.
///
/// Indices follow the order of `names`. An endpoint whose name
/// also shows up in `other_names` can both transmit & receive.
fn endpoints<'a>(
    direction: Direction,
    names: impl IntoIterator<Item = &'a Arc<str>>,
    other_names: &[&Arc<str>],
) -> Vec<Endpoint> {
    names
        .into_iter()
        .enumerate()
        .map(|(index, name)| {
            let endpoint = Endpoint::new(index, name.clone(), direction);
            if other_names.iter().any(|other| *other == name) {
                endpoint.with_capabilities(Capabilities::TRANSMIT | Capabilities::RECEIVE)
            } else {
                endpoint
            }
        })
        .collect()
}

/// Queries the backend for the available MIDI ports.
pub fn scan(config: &Config) -> Result<Devices, Error> {
    let client_name = &config.client_name;

    let temp_in = midir::MidiInput::new(&format!("{client_name} scan In ports"))?;
    let in_ports = list_ports(&temp_in, client_name, &config.filter)?;

    let temp_out = midir::MidiOutput::new(&format!("{client_name} scan Out ports"))?;
    let out_ports = list_ports(&temp_out, client_name, &config.filter)?;

    let in_names: Vec<&Arc<str>> = in_ports.iter().map(|(name, _)| name).collect();
    let out_names: Vec<&Arc<str>> = out_ports.iter().map(|(name, _)| name).collect();

    let inputs = endpoints(Direction::In, in_names.iter().copied(), &out_names)
        .into_iter()
        .zip(in_ports.iter())
        .map(|(endpoint, (_, port))| {
            Box::new(MidirInput::new(client_name.clone(), endpoint, port.clone()))
                as Box<dyn InputDevice>
        })
        .collect();

    let outputs = endpoints(Direction::Out, out_names.iter().copied(), &in_names)
        .into_iter()
        .zip(out_ports.iter())
        .map(|(endpoint, (_, port))| {
            Box::new(MidirOutput::new(client_name.clone(), endpoint, port.clone()))
                as Box<dyn OutputDevice>
        })
        .collect();

    Ok(Devices { inputs, outputs })
}
