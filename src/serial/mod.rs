// Serial communication with the radio
pub mod comm;
pub mod protocol;

#[cfg(test)]
pub mod mock;

pub use comm::{default_device, list_ports, SerialConfig, SerialError, SerialPort, Transport};
pub use protocol::{BlockProtocol, ProgressCallback, Rt73Protocol, TransferError};
