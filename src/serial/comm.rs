// Serial port abstraction with async support
// Wraps the serialport crate with tokio timeouts and exposes the byte-level
// `Transport` the RT73 protocol runs over.

use std::io::{self, Read, Write};
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;

#[derive(Error, Debug)]
pub enum SerialError {
    #[error("Serial port error: {0}")]
    Port(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Port not open")]
    NotOpen,
}

pub type Result<T> = std::result::Result<T, SerialError>;

/// Byte stream to and from the radio
pub trait Transport {
    /// Fill `buf` completely or fail
    async fn read_exact(&mut self, buf: &mut [u8]) -> Result<()>;

    async fn write_all(&mut self, buf: &[u8]) -> Result<()>;
}

/// Serial port configuration
#[derive(Debug, Clone)]
pub struct SerialConfig {
    /// Baud rate; the RT73 talks at 115200
    pub baud_rate: u32,

    pub data_bits: serialport::DataBits,
    pub stop_bits: serialport::StopBits,
    pub parity: serialport::Parity,
    pub flow_control: serialport::FlowControl,

    /// Read/write timeout
    pub timeout: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115_200,
            data_bits: serialport::DataBits::Eight,
            stop_bits: serialport::StopBits::One,
            parity: serialport::Parity::None,
            flow_control: serialport::FlowControl::None,
            timeout: Duration::from_secs(10),
        }
    }
}

impl SerialConfig {
    /// Create a new configuration with specified baud rate
    pub fn new(baud_rate: u32) -> Self {
        Self {
            baud_rate,
            ..Default::default()
        }
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Default device path for the host platform
pub fn default_device() -> &'static str {
    if cfg!(windows) {
        "COM1"
    } else {
        "/dev/ttyUSB0"
    }
}

/// Async serial port wrapper
pub struct SerialPort {
    port: Option<Box<dyn serialport::SerialPort>>,
    config: SerialConfig,
    port_name: String,
}

impl SerialPort {
    /// Open a serial port with the given configuration
    pub fn open(port_name: &str, config: SerialConfig) -> Result<Self> {
        let port = serialport::new(port_name, config.baud_rate)
            .data_bits(config.data_bits)
            .stop_bits(config.stop_bits)
            .parity(config.parity)
            .flow_control(config.flow_control)
            .timeout(config.timeout)
            .open()
            .map_err(|e| SerialError::Port(format!("{}: {}", port_name, e)))?;

        Ok(Self {
            port: Some(port),
            config,
            port_name: port_name.to_string(),
        })
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    pub fn config(&self) -> &SerialConfig {
        &self.config
    }

    /// Flush the output buffer
    pub async fn flush(&mut self) -> Result<()> {
        let port = self.port.as_mut().ok_or(SerialError::NotOpen)?;
        port.flush().map_err(SerialError::Io)
    }

    /// Drop anything the radio sent before the next command
    pub fn clear_all(&mut self) -> Result<()> {
        let port = self.port.as_mut().ok_or(SerialError::NotOpen)?;
        port.clear(serialport::ClearBuffer::All)
            .map_err(|e| SerialError::Port(e.to_string()))
    }

    /// Close the port
    pub fn close(mut self) -> Result<()> {
        self.port.take();
        Ok(())
    }
}

impl Transport for SerialPort {
    async fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let limit = self.config.timeout;
        let port = self.port.as_mut().ok_or(SerialError::NotOpen)?;

        timeout(limit, async {
            let mut total_read = 0;
            while total_read < buf.len() {
                match port.read(&mut buf[total_read..]) {
                    Ok(0) => {
                        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "Port closed"))
                    }
                    Ok(n) => total_read += n,
                    Err(ref e) if e.kind() == io::ErrorKind::TimedOut => {
                        tokio::time::sleep(Duration::from_millis(10)).await;
                        continue;
                    }
                    Err(e) => return Err(e),
                }
            }
            Ok(())
        })
        .await
        .map_err(|_| SerialError::Timeout(limit))?
        .map_err(SerialError::Io)
    }

    async fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        let limit = self.config.timeout;
        let port = self.port.as_mut().ok_or(SerialError::NotOpen)?;

        // serialport writes block the task; a stuck write is cut off by the
        // port's own timeout (set from the same config), not by tokio
        port.write_all(buf).map_err(|e| write_error(e, limit))
    }
}

/// A blocking write that hit the port timeout reads as `Timeout`
fn write_error(err: io::Error, limit: Duration) -> SerialError {
    if err.kind() == io::ErrorKind::TimedOut {
        SerialError::Timeout(limit)
    } else {
        SerialError::Io(err)
    }
}

/// List available serial ports
pub fn list_ports() -> Result<Vec<String>> {
    Ok(serialport::available_ports()
        .map_err(|e| SerialError::Port(e.to_string()))?
        .into_iter()
        .map(|p| p.port_name)
        .collect())
}
