use crossbeam_channel as channel;
use std::sync::Arc;

use crate::midi::{self, Direction, Endpoint};

/// Errors reported by the [`Hub`](super::Hub).
///
/// None of them is fatal: a failing device is reported and the
/// others keep being served.
#[derive(Clone, Debug, thiserror::Error)]
pub enum Error {
    #[error("Couldn't open {endpoint}: {source}")]
    DeviceOpen {
        endpoint: Endpoint,
        source: Arc<midi::Error>,
    },

    #[error("Couldn't close {endpoint}: {source}")]
    DeviceClose {
        endpoint: Endpoint,
        source: Arc<midi::Error>,
    },

    #[error("Couldn't emit to {endpoint}: {source}")]
    Emit {
        endpoint: Endpoint,
        source: Arc<midi::Error>,
    },

    #[error("Invalid {direction} index {index}, {count} known")]
    InvalidIndex {
        direction: Direction,
        index: usize,
        count: usize,
    },
}

impl Error {
    pub fn open(endpoint: &Endpoint, err: midi::Error) -> Self {
        Self::DeviceOpen {
            endpoint: endpoint.clone(),
            source: Arc::new(err),
        }
    }

    pub fn close(endpoint: &Endpoint, err: midi::Error) -> Self {
        Self::DeviceClose {
            endpoint: endpoint.clone(),
            source: Arc::new(err),
        }
    }

    pub fn emit(endpoint: &Endpoint, err: midi::Error) -> Self {
        Self::Emit {
            endpoint: endpoint.clone(),
            source: Arc::new(err),
        }
    }

    fn log_level(&self) -> log::Level {
        match self {
            // Expected when closing twice.
            Error::DeviceClose { source, .. }
                if matches!(source.as_ref(), midi::Error::NotConnected(_)) =>
            {
                log::Level::Warn
            }
            _ => log::Level::Error,
        }
    }
}

/// Logs errors and forwards them to the control surface if one listens.
#[derive(Clone, Default)]
pub struct Reporter(Option<channel::Sender<Error>>);

impl Reporter {
    pub fn new(err_tx: channel::Sender<Error>) -> Self {
        Self(Some(err_tx))
    }

    pub fn report(&self, err: &Error) {
        log::log!(err.log_level(), "{err}");

        if let Some(ref err_tx) = self.0 {
            // Full or disconnected: the error is logged anyway.
            let _ = err_tx.try_send(err.clone());
        }
    }
}
