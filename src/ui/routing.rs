use eframe::egui;
use std::sync::Arc;

use crate::midi::{Capabilities, Direction, Endpoint};

#[derive(Debug)]
struct Toggle {
    name: Arc<str>,
    hint: &'static str,
    on: bool,
}

impl From<&Endpoint> for Toggle {
    fn from(endpoint: &Endpoint) -> Self {
        let hint = if endpoint
            .capabilities()
            .contains(Capabilities::TRANSMIT | Capabilities::RECEIVE)
        {
            "Sends & receives MIDI"
        } else if endpoint.capabilities().contains(Capabilities::TRANSMIT) {
            "Sends MIDI"
        } else {
            "Receives MIDI"
        };

        Self {
            name: endpoint.name().clone(),
            hint,
            on: false,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Response {
    Toggle {
        direction: Direction,
        index: usize,
        on: bool,
    },
}

/// One checkbox per endpoint, inputs on one side, outputs on the other.
pub struct RoutingPanel {
    toggles: [Vec<Toggle>; 2],
}

impl RoutingPanel {
    /// All endpoints start unticked, like the hub's routing.
    pub fn new(inputs: &[Endpoint], outputs: &[Endpoint]) -> Self {
        RoutingPanel {
            toggles: [
                inputs.iter().map(Toggle::from).collect(),
                outputs.iter().map(Toggle::from).collect(),
            ],
        }
    }

    #[must_use]
    pub fn show(&mut self, direction: Direction, ui: &mut egui::Ui) -> Option<Response> {
        let mut resp = None;

        ui.group(|ui| {
            ui.label(format!("MIDI {}s", direction.as_str()));
            ui.separator();

            let toggles = &mut self.toggles[direction.idx()];
            if toggles.is_empty() {
                ui.label("No devices");
            }

            for (index, toggle) in toggles.iter_mut().enumerate() {
                if ui
                    .checkbox(&mut toggle.on, &*toggle.name)
                    .on_hover_text(toggle.hint)
                    .changed()
                {
                    resp = Some(Response::Toggle {
                        direction,
                        index,
                        on: toggle.on,
                    });
                }
            }
        });

        resp
    }
}
