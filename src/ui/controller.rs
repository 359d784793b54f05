use crossbeam_channel as channel;
use std::ops::ControlFlow;

use super::app;
use crate::hub::Hub;

pub struct Spawner {
    pub req_rx: channel::Receiver<app::Request>,
    pub hub: Hub,
}

impl Spawner {
    pub fn spawn(self) -> std::thread::JoinHandle<()> {
        std::thread::spawn(move || {
            Controller::run(self.req_rx, self.hub);
        })
    }
}

/// Owns the [`Hub`] & applies the requests from the UI.
///
/// Devices are opened when the controller starts and closed
/// when it stops, whatever the reason.
struct Controller {
    hub: Hub,
}

impl Controller {
    fn run(req_rx: channel::Receiver<app::Request>, hub: Hub) {
        let mut this = Self { hub };

        // Failures are reported to the UI by the hub.
        let _ = this.hub.open_all();

        this.run_loop(req_rx);

        let _ = this.hub.close_all();
    }

    fn handle_request(&mut self, request: app::Request) -> ControlFlow<(), ()> {
        use app::Request::*;

        match request {
            SetStatus((direction, index, on)) => {
                let _ = self.hub.set_status(direction, index, on);
            }
            Shutdown => return ControlFlow::Break(()),
        }

        ControlFlow::Continue(())
    }

    fn run_loop(&mut self, req_rx: channel::Receiver<app::Request>) {
        loop {
            match req_rx.recv() {
                Ok(request) => {
                    if self.handle_request(request).is_break() {
                        break;
                    }
                }
                Err(err) => {
                    log::error!("Error UI request channel: {err}");
                    break;
                }
            }
        }

        log::debug!("Shutting down Hub Controller loop");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        hub::{Error, Reporter},
        midi::{test_support, Direction},
    };

    fn spawn(ins: &[&str], outs: &[&str]) -> (
        channel::Sender<app::Request>,
        channel::Receiver<Error>,
        Vec<test_support::InputProbe>,
        test_support::Journal,
        std::thread::JoinHandle<()>,
    ) {
        test_support::init_logger();

        let (inputs, probes) = test_support::inputs(ins);
        let journal = test_support::Journal::default();
        let outputs = test_support::outputs(outs, &journal);
        let (err_tx, err_rx) = channel::unbounded();
        let (req_tx, req_rx) = channel::unbounded();

        let hub = Hub::with_reporter(inputs, outputs, Reporter::new(err_tx));
        let handle = Spawner { req_rx, hub }.spawn();

        (req_tx, err_rx, probes, journal, handle)
    }

    #[test]
    fn requests_reach_the_hub() {
        let (req_tx, err_rx, probes, journal, handle) = spawn(&["in"], &["out 0", "out 1"]);

        req_tx
            .send(app::Request::SetStatus((Direction::In, 0, true)))
            .unwrap();
        req_tx
            .send(app::Request::SetStatus((Direction::Out, 1, true)))
            .unwrap();
        req_tx
            .send(app::Request::SetStatus((Direction::Out, 5, true)))
            .unwrap();
        req_tx.send(app::Request::Shutdown).unwrap();
        handle.join().unwrap();

        // The controller closed the devices on its way out.
        assert!(!probes[0].fire(0, &[0xf8]));
        assert_eq!(journal.len(), 0);

        let reported: Vec<Error> = err_rx.try_iter().collect();
        assert_eq!(reported.len(), 1);
        assert!(matches!(
            reported[0],
            Error::InvalidIndex {
                direction: Direction::Out,
                index: 5,
                count: 2
            }
        ));
    }

    #[test]
    fn closes_devices_when_the_ui_goes_away() {
        let (req_tx, err_rx, probes, _, handle) = spawn(&["in"], &["out"]);

        drop(req_tx);
        handle.join().unwrap();

        assert!(!probes[0].fire(0, &[0xf8]));
        assert!(err_rx.try_recv().is_err());
    }
}
