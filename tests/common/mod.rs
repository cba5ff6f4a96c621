#![allow(dead_code)]

use std::{
    collections::HashSet,
    io,
    sync::{Arc, Mutex},
};

use prism_config::logger::{Channel, LineSink, SinkOpener};

pub const TEST_CONFIG: &str = "./tests/fixtures/test.yaml";
pub const MALFORMED_BACKEND_CONFIG: &str = "./tests/fixtures/malformed_backend.yaml";

pub type Lines = Arc<Mutex<Vec<(Channel, String)>>>;

/// Keeps every written line in memory. Channels listed in `failing` refuse to open.
#[derive(Default)]
pub struct MemoryOpener {
    pub failing: HashSet<Channel>,
    pub opened: Mutex<Vec<Channel>>,
    pub lines: Lines,
}

impl MemoryOpener {
    pub fn failing(channels: &[Channel]) -> Self {
        Self {
            failing: channels.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn attempts(&self) -> Vec<Channel> {
        self.opened.lock().unwrap().clone()
    }

    pub fn lines(&self) -> Vec<(Channel, String)> {
        self.lines.lock().unwrap().clone()
    }
}

impl SinkOpener for MemoryOpener {
    fn open(&self, channel: Channel) -> io::Result<Box<dyn LineSink>> {
        self.opened.lock().unwrap().push(channel);

        if self.failing.contains(&channel) {
            return Err(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                format!("no syslog for facility {}", channel.facility_code()),
            ));
        }

        Ok(Box::new(MemorySink {
            channel,
            lines: self.lines.clone(),
        }))
    }
}

struct MemorySink {
    channel: Channel,
    lines: Lines,
}

impl LineSink for MemorySink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.lines
            .lock()
            .unwrap()
            .push((self.channel, line.to_string()));
        Ok(())
    }
}
