//! SCPI-over-LAN instrument transport
//!
//! Talks to a DS1000Z-series oscilloscope on its raw SCPI port:
//! - **Readiness gating** - every command waits for `*OPC?` to answer `1`
//! - **Identification** - `*IDN?` parsing and supported-model checking
//! - **Block transfers** - TMC-framed binary reads (screen captures,
//!   waveform data) reassembled until the announced length arrives
//!
//! Failures are surfaced to the caller; nothing here retries. A scope that
//! stops responding mid-transfer produces [`InstrumentError::ShortTransfer`]
//! rather than a truncated file.

pub mod tmc;

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// TCP port the instrument listens on for SCPI commands.
pub const SCPI_PORT: u16 = 5555;

/// How long to wait for a single response before giving up on it.
const RESPONSE_TIMEOUT: Duration = Duration::from_secs(1);
/// How long to wait for the TCP connection to come up.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// `*OPC?` polls before declaring the instrument unresponsive.
const OPC_MAX_POLLS: usize = 10;
/// Read chunk size for block transfers.
const READ_CHUNK: usize = 8192;

/// Transport and protocol errors.
#[derive(Error, Debug)]
pub enum InstrumentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("timed out connecting to {0}")]
    ConnectTimeout(String),

    #[error("instrument did not answer *OPC? readiness polling")]
    NotReady,

    #[error("instrument rejected the command: {0}")]
    Rejected(String),

    #[error("malformed TMC block header: {0}")]
    BadBlockHeader(String),

    #[error("short transfer: got {got} of {expected} expected bytes")]
    ShortTransfer { got: usize, expected: usize },

    #[error("unexpected identification response: {0}")]
    BadIdentification(String),

    #[error("unparseable response '{response}' to {query}")]
    BadResponse { query: String, response: String },
}

/// A waveform source on the instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Ch1,
    Ch2,
    Ch3,
    Ch4,
    Math,
}

impl Channel {
    /// Every source the scope can display, in scan order.
    pub const ALL: [Channel; 5] =
        [Channel::Ch1, Channel::Ch2, Channel::Ch3, Channel::Ch4, Channel::Math];

    /// SCPI source name, as used in `:WAV:SOUR` and `:<name>:DISP?`.
    #[must_use]
    pub const fn scpi_name(self) -> &'static str {
        match self {
            Channel::Ch1 => "CHAN1",
            Channel::Ch2 => "CHAN2",
            Channel::Ch3 => "CHAN3",
            Channel::Ch4 => "CHAN4",
            Channel::Math => "MATH",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scpi_name())
    }
}

/// Parsed `*IDN?` response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstrumentId {
    pub company: String,
    pub model: String,
    pub serial: String,
    pub firmware: String,
}

impl InstrumentId {
    /// Parse the comma-separated `*IDN?` fields.
    pub fn parse(response: &str) -> Result<Self, InstrumentError> {
        let trimmed = response.trim();
        let fields: Vec<&str> = trimmed.split(',').collect();
        if fields.len() < 2 || fields[0].is_empty() {
            return Err(InstrumentError::BadIdentification(trimmed.to_string()));
        }
        Ok(Self {
            company: fields[0].to_string(),
            model: fields[1].to_string(),
            serial: fields.get(2).unwrap_or(&"").to_string(),
            firmware: fields.get(3).unwrap_or(&"").to_string(),
        })
    }

    /// Whether this is a Rigol DS1000Z-series scope — the screen layout the
    /// bundled region catalog is calibrated for.
    #[must_use]
    pub fn is_ds1000z(&self) -> bool {
        self.company == "RIGOL TECHNOLOGIES"
            && self.model.starts_with("DS1")
            && self.model.ends_with('Z')
    }
}

/// Sequential SCPI client over one TCP connection.
///
/// One command/response is in flight at a time; callers drive captures one
/// after another.
pub struct ScpiClient {
    stream: BufReader<TcpStream>,
    timeout: Duration,
}

impl ScpiClient {
    /// Connect to `host` on the standard SCPI port.
    pub async fn connect(host: &str) -> Result<Self, InstrumentError> {
        Self::connect_to(format!("{host}:{SCPI_PORT}")).await
    }

    /// Connect to an explicit `host:port` address.
    pub async fn connect_to(addr: impl ToSocketAddrs + fmt::Debug) -> Result<Self, InstrumentError> {
        let label = format!("{addr:?}");
        info!(addr = %label, "connecting");
        let stream = timeout(CONNECT_TIMEOUT, TcpStream::connect(addr))
            .await
            .map_err(|_| InstrumentError::ConnectTimeout(label))??;
        stream.set_nodelay(true)?;
        Ok(Self { stream: BufReader::new(stream), timeout: RESPONSE_TIMEOUT })
    }

    /// Send `scpi` once the instrument reports ready, then read one
    /// newline-terminated response.
    ///
    /// Set commands answer with an empty response; queries answer with
    /// their payload.
    pub async fn command(&mut self, scpi: &str) -> Result<Vec<u8>, InstrumentError> {
        self.wait_ready().await?;
        self.send_line(scpi).await?;
        self.read_response().await
    }

    /// [`command`](Self::command), decoded and trimmed.
    pub async fn query(&mut self, scpi: &str) -> Result<String, InstrumentError> {
        let response = self.command(scpi).await?;
        Ok(String::from_utf8_lossy(&response).trim().to_string())
    }

    /// Ask the instrument to identify itself.
    ///
    /// A scope with LAN remote control disabled answers `command error`
    /// instead of an identification string; that is reported as
    /// [`InstrumentError::Rejected`] with the settings path to fix it.
    pub async fn identify(&mut self) -> Result<InstrumentId, InstrumentError> {
        let response = self.query("*IDN?").await?;
        if response == "command error" {
            return Err(InstrumentError::Rejected(
                "LAN remote control is off; enable Utility -> IO Setting -> RemoteIO -> LAN"
                    .to_string(),
            ));
        }
        InstrumentId::parse(&response)
    }

    /// Capture the display as PNG bytes (`:DISP:DATA? ON,OFF,PNG`).
    pub async fn screenshot(&mut self) -> Result<Vec<u8>, InstrumentError> {
        info!("requesting display capture");
        self.wait_ready().await?;
        self.send_line(":DISP:DATA? ON,OFF,PNG").await?;
        self.read_block().await
    }

    /// Which sources are currently displayed on screen.
    pub async fn displayed_channels(&mut self) -> Result<Vec<Channel>, InstrumentError> {
        let mut active = Vec::new();
        for channel in Channel::ALL {
            let response = self.query(&format!(":{}:DISP?", channel.scpi_name())).await?;
            if response == "1" {
                active.push(channel);
            }
        }
        Ok(active)
    }

    /// Put the waveform subsystem in screen-data mode before reading points.
    pub async fn prepare_waveform_read(&mut self) -> Result<(), InstrumentError> {
        self.command(":WAV:MODE NORM").await?;
        self.command(":WAV:STAR 0").await?;
        Ok(())
    }

    /// Read the displayed waveform points of one channel as ASCII values.
    ///
    /// MATH does not accept start/stop range commands; its range is fixed
    /// by the instrument. Everything else is read over points 1..=1200.
    pub async fn waveform_points(&mut self, channel: Channel) -> Result<Vec<String>, InstrumentError> {
        self.command(&format!(":WAV:SOUR {}", channel.scpi_name())).await?;
        self.command(":WAV:FORM ASC").await?;
        if channel != Channel::Math {
            self.command(":WAV:STAR 1").await?;
            self.command(":WAV:STOP 1200").await?;
        }

        info!(%channel, "receiving waveform points");
        self.wait_ready().await?;
        self.send_line(":WAV:DATA?").await?;
        let block = self.read_block().await?;

        let ascii = String::from_utf8_lossy(&block);
        Ok(ascii
            .trim()
            .split(',')
            .map(|point| point.trim().to_string())
            .filter(|point| !point.is_empty())
            .collect())
    }

    /// Acquisition memory depth in samples.
    ///
    /// `AUTO` is resolved the way the scope computes it: horizontal grid
    /// divisions times timebase scale times sample rate.
    pub async fn memory_depth(&mut self) -> Result<u64, InstrumentError> {
        const HORIZONTAL_DIVISIONS: f64 = 12.0;

        let response = self.query(":ACQ:MDEP?").await?;
        if response == "AUTO" {
            let srate = self.query_f64(":ACQ:SRAT?").await?;
            let scale = self.query_f64(":TIM:SCAL?").await?;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            return Ok((HORIZONTAL_DIVISIONS * scale * srate) as u64);
        }
        response.parse().map_err(|_| InstrumentError::BadResponse {
            query: ":ACQ:MDEP?".to_string(),
            response,
        })
    }

    async fn query_f64(&mut self, scpi: &str) -> Result<f64, InstrumentError> {
        let response = self.query(scpi).await?;
        response.parse().map_err(|_| InstrumentError::BadResponse {
            query: scpi.to_string(),
            response,
        })
    }

    /// Poll `*OPC?` until the instrument answers `1`.
    async fn wait_ready(&mut self) -> Result<(), InstrumentError> {
        for _ in 0..OPC_MAX_POLLS {
            self.send_line("*OPC?").await?;
            let response = self.read_response().await?;
            if response.as_slice().trim_ascii() == b"1" {
                return Ok(());
            }
            debug!("instrument busy, polling again");
        }
        Err(InstrumentError::NotReady)
    }

    async fn send_line(&mut self, scpi: &str) -> Result<(), InstrumentError> {
        debug!(scpi, "sending");
        self.stream.write_all(scpi.as_bytes()).await?;
        self.stream.write_all(b"\n").await?;
        self.stream.flush().await?;
        Ok(())
    }

    /// Read one newline-terminated response, returning whatever arrived if
    /// the instrument goes quiet before the terminator.
    async fn read_response(&mut self) -> Result<Vec<u8>, InstrumentError> {
        let mut line = Vec::new();
        match timeout(self.timeout, self.stream.read_until(b'\n', &mut line)).await {
            Ok(Ok(_)) | Err(_) => Ok(line),
            Ok(Err(e)) => Err(e.into()),
        }
    }

    /// Reassemble a TMC-framed binary transfer until the announced byte
    /// count has arrived, then strip the framing.
    async fn read_block(&mut self) -> Result<Vec<u8>, InstrumentError> {
        let mut buffer: Vec<u8> = Vec::new();
        let mut expected: Option<usize> = None;

        loop {
            if expected.is_none() && buffer.len() >= 2 {
                let header = tmc::header_len(&buffer)?;
                if buffer.len() >= header {
                    expected = Some(tmc::total_len(&buffer)?);
                    debug!(total = expected, "block header decoded");
                }
            }
            if let Some(total) = expected {
                if buffer.len() >= total {
                    break;
                }
            }

            let mut chunk = [0u8; READ_CHUNK];
            let read = match timeout(self.timeout, self.stream.read(&mut chunk)).await {
                Ok(Ok(n)) => n,
                Ok(Err(e)) => return Err(e.into()),
                Err(_) => 0,
            };
            if read == 0 {
                let got = buffer.len();
                let expected = expected.unwrap_or(0);
                warn!(got, expected, "transfer stalled before completion");
                return Err(InstrumentError::ShortTransfer { got, expected });
            }
            buffer.extend_from_slice(&chunk[..read]);
        }

        tmc::payload(&buffer).map(<[u8]>::to_vec)
    }
}
