use std::{
    fmt::{Debug, Display},
    io,
    sync::Mutex,
};

use log::{debug, warn};
use syslog::{Facility, Formatter3164, Logger, LoggerBackend};

use crate::error::LoggerInitError;

/// The three service log channels. Facility codes are a contract with the
/// host syslog daemon and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Channel {
    Access = 16,
    Sync = 17,
    Main = 18,
}

impl Channel {
    /// Channels in the order they are opened.
    pub const ALL: [Channel; 3] = [Channel::Access, Channel::Sync, Channel::Main];

    /// Numeric syslog facility, local0 to local2.
    pub fn facility_code(&self) -> u8 {
        *self as u8
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            Channel::Access => "access",
            Channel::Sync => "",
            Channel::Main => "main",
        }
    }

    fn facility(&self) -> Facility {
        match self {
            Channel::Access => Facility::LOG_LOCAL0,
            Channel::Sync => Facility::LOG_LOCAL1,
            Channel::Main => Facility::LOG_LOCAL2,
        }
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Channel::Access => "access",
            Channel::Sync => "sync",
            Channel::Main => "main",
        };
        write!(f, "{}", name)
    }
}

/// Destination accepting already formatted lines.
pub trait LineSink: Send {
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

/// Opens a sink bound to a channel's facility.
pub trait SinkOpener {
    fn open(&self, channel: Channel) -> io::Result<Box<dyn LineSink>>;
}

/// Local syslog over the unix socket, RFC 3164 framing.
#[derive(Debug, Clone)]
pub struct SyslogOpener {
    process: String,
}

impl SyslogOpener {
    pub fn new(process: impl Into<String>) -> Self {
        Self {
            process: process.into(),
        }
    }
}

impl Default for SyslogOpener {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_NAME"))
    }
}

impl SinkOpener for SyslogOpener {
    fn open(&self, channel: Channel) -> io::Result<Box<dyn LineSink>> {
        let formatter = Formatter3164 {
            facility: channel.facility(),
            hostname: None,
            process: self.process.clone(),
            pid: std::process::id(),
        };

        let logger = syslog::unix(formatter).map_err(|e| io::Error::other(e.to_string()))?;

        Ok(Box::new(SyslogSink { logger }))
    }
}

struct SyslogSink {
    logger: Logger<LoggerBackend, Formatter3164>,
}

impl LineSink for SyslogSink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.logger
            .info(line)
            .map_err(|e| io::Error::other(e.to_string()))
    }
}

/// Line oriented handle for one channel, safe to share between threads.
pub struct ChannelLogger {
    channel: Channel,
    sink: Mutex<Box<dyn LineSink>>,
}

impl ChannelLogger {
    pub fn new(channel: Channel, sink: Box<dyn LineSink>) -> Self {
        Self {
            channel,
            sink: Mutex::new(sink),
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn log(&self, message: impl Display) -> io::Result<()> {
        let prefix = self.channel.prefix();
        let line = if prefix.is_empty() {
            message.to_string()
        } else {
            format!("{} {}", prefix, message)
        };

        let mut sink = self
            .sink
            .lock()
            .map_err(|_| io::Error::other(format!("{} log sink poisoned", self.channel)))?;

        sink.write_line(&line)
    }
}

impl Debug for ChannelLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelLogger")
            .field("channel", &self.channel)
            .finish_non_exhaustive()
    }
}

/// Handles produced by [`setup_loggers`]; a channel that failed to open is `None`.
#[derive(Debug, Default)]
pub struct Loggers {
    pub access: Option<ChannelLogger>,
    pub sync: Option<ChannelLogger>,
    pub main: Option<ChannelLogger>,
}

/// Opens access, sync and main in that order. Every channel is attempted,
/// the error of the last failing one is returned.
pub fn setup_loggers<O: SinkOpener + ?Sized>(
    opener: &O,
) -> (Loggers, Option<LoggerInitError>) {
    let mut loggers = Loggers::default();
    let mut last_error = None;

    for channel in Channel::ALL {
        match opener.open(channel) {
            Ok(sink) => {
                debug!(
                    "opened {} log channel on facility {}",
                    channel,
                    channel.facility_code()
                );

                let handle = Some(ChannelLogger::new(channel, sink));
                match channel {
                    Channel::Access => loggers.access = handle,
                    Channel::Sync => loggers.sync = handle,
                    Channel::Main => loggers.main = handle,
                }
            }
            Err(source) => {
                warn!("could not open {} log channel: {}", channel, source);
                last_error = Some(LoggerInitError { channel, source });
            }
        }
    }

    (loggers, last_error)
}
