use std::sync::Arc;

/// Software devices which usually don't behave properly when merged.
const IGNORED_DEVICES: [&str; 4] = [
    "Gervill",
    "Microsoft GS Wavetable Synth",
    "Real Time Sequencer",
    "Midi Through",
];

#[derive(Clone, Debug)]
pub struct DeviceFilter {
    pub enabled: bool,
    pub ignored: Vec<Arc<str>>,
}

impl Default for DeviceFilter {
    fn default() -> Self {
        Self {
            enabled: false,
            ignored: IGNORED_DEVICES.iter().map(|name| Arc::from(*name)).collect(),
        }
    }
}

impl DeviceFilter {
    pub fn accepts(&self, name: &str) -> bool {
        !self.enabled
            || !self
                .ignored
                .iter()
                .any(|ignored| name.starts_with(ignored.as_ref()))
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Name of the MIDI client, also used as the window title.
    pub client_name: Arc<str>,
    pub log_level: log::LevelFilter,
    pub filter: DeviceFilter,
    /// Max reported errors pending for the control surface.
    pub error_backlog: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client_name: "midi-hub".into(),
            log_level: log::LevelFilter::Info,
            filter: DeviceFilter::default(),
            error_backlog: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_disabled_accepts_everything() {
        let filter = DeviceFilter::default();
        assert!(filter.accepts("Gervill"));
        assert!(filter.accepts("Keys"));
    }

    #[test]
    fn filter_enabled_rejects_ignored_names() {
        let filter = DeviceFilter {
            enabled: true,
            ..DeviceFilter::default()
        };
        assert!(!filter.accepts("Microsoft GS Wavetable Synth"));
        // ALSA appends the client & port ids to the name
        assert!(!filter.accepts("Midi Through:Midi Through Port-0 14:0"));
        assert!(filter.accepts("Keys"));
    }
}
