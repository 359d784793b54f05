use anyhow::Context;
use crossbeam_channel as channel;
use eframe::egui;

use midi_hub::{hub, midi, ui, Config, Hub};

const WIDTH: f32 = 500f32;
const ROW_HEIGHT: f32 = 30f32;
// Column titles & status area.
const HEADER_HEIGHT: f32 = 40f32;

fn setup(config: &Config) -> anyhow::Result<(Hub, channel::Receiver<hub::Error>)> {
    let devices = midi::port::scan(config).context("Couldn't list MIDI ports")?;

    for direction in [midi::Direction::In, midi::Direction::Out] {
        let names = devices.names(direction);
        log::info!("{} MIDI {}(s)", names.len(), direction);
        for name in names {
            log::info!("\t{name}");
        }
    }

    let (err_tx, err_rx) = channel::bounded(config.error_backlog);
    let hub = Hub::with_reporter(devices.inputs, devices.outputs, hub::Reporter::new(err_tx));

    Ok((hub, err_rx))
}

fn main() {
    let config = Config::default();

    env_logger::Builder::new()
        .filter_level(config.log_level)
        .parse_default_env()
        .init();

    match setup(&config) {
        Ok((hub, err_rx)) => {
            let rows = hub
                .routing()
                .inputs()
                .len()
                .max(hub.routing().outputs().len())
                .max(1);
            let options = eframe::NativeOptions {
                initial_window_size: Some(egui::vec2(
                    WIDTH,
                    rows as f32 * ROW_HEIGHT + HEADER_HEIGHT,
                )),
                ..Default::default()
            };

            eframe::run_native(
                &config.client_name,
                options,
                Box::new(move |cc| Box::new(ui::App::new(cc, hub, err_rx))),
            );
        }
        Err(err) => {
            log::error!("Error: {err}");
            for cause in err.chain().skip(1) {
                log::error!("\t{cause}");
            }
        }
    }
}
