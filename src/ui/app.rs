use crossbeam_channel as channel;
use eframe::egui;

use super::{controller, routing, Dispatcher, RoutingPanel};
use crate::{
    hub::{self, Hub},
    midi::Direction,
};

#[derive(Debug, PartialEq)]
pub enum Request {
    SetStatus((Direction, usize, bool)),
    Shutdown,
}

impl From<routing::Response> for Request {
    fn from(resp: routing::Response) -> Self {
        use routing::Response::*;

        match resp {
            Toggle {
                direction,
                index,
                on,
            } => Self::SetStatus((direction, index, on)),
        }
    }
}

pub struct App {
    req_tx: channel::Sender<Request>,
    err_rx: channel::Receiver<hub::Error>,
    routing_panel: RoutingPanel,
    last_err: Option<hub::Error>,
    controller_thread: Option<std::thread::JoinHandle<()>>,
}

impl App {
    pub fn new(
        cc: &eframe::CreationContext,
        hub: Hub,
        err_rx: channel::Receiver<hub::Error>,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let routing_panel = RoutingPanel::new(
            &hub.endpoints(Direction::In),
            &hub.endpoints(Direction::Out),
        );

        let (req_tx, req_rx) = channel::unbounded();
        let controller_thread = controller::Spawner { req_rx, hub }.spawn();

        Self {
            req_tx,
            err_rx,
            routing_panel,
            last_err: None,
            controller_thread: Some(controller_thread),
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("status-area").show(ctx, |ui| {
            self.pop_err();
            if let Some(ref err) = self.last_err {
                ui.add_space(5f32);
                let text = egui::RichText::new(err.to_string())
                    .color(egui::Color32::WHITE)
                    .background_color(egui::Color32::DARK_RED);
                ui.group(|ui| {
                    use egui::Widget;
                    let label = egui::Label::new(text).sense(egui::Sense::click());
                    if label.ui(ui).clicked() {
                        self.clear_last_err();
                    }
                });
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |columns| {
                let resp_in = self.routing_panel.show(Direction::In, &mut columns[0]);
                let resp_out = self.routing_panel.show(Direction::Out, &mut columns[1]);

                Dispatcher::<RoutingPanel>::handle(self, resp_in.or(resp_out));
            });
        });
    }

    fn on_exit(&mut self, _gl: &eframe::glow::Context) {
        log::info!("Exiting...");
        self.shutdown();
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl App {
    /// Stops the controller, which closes all the devices.
    pub fn shutdown(&mut self) {
        if let Some(controller_thread) = self.controller_thread.take() {
            log::info!("Shutting down");
            if let Err(err) = self.req_tx.send(Request::Shutdown) {
                log::error!("App couldn't request shutdown: {}", err);
            }
            let _ = controller_thread.join();
        }
    }

    pub fn send_req(&mut self, req: Request) {
        if let Err(err) = self.req_tx.send(req) {
            log::error!("Couldn't send request to the Hub Controller: {err}");
        }
    }

    pub fn clear_last_err(&mut self) {
        self.last_err = None;
    }

    fn pop_err(&mut self) {
        // Only the most recent error is displayed.
        if let Some(err) = self.err_rx.try_iter().last() {
            self.last_err = Some(err);
        }
    }
}
