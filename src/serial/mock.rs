// Mock transport for testing without hardware
// Replies are scripted up front and served in order; writes are captured.

use super::comm::{Result, SerialError, Transport};
use std::collections::VecDeque;
use std::time::Duration;

#[derive(Default)]
pub struct MockTransport {
    /// Data to be read (simulates radio responses)
    read_buffer: VecDeque<u8>,

    /// Everything written (the commands sent to the radio)
    written: Vec<u8>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes the radio will send
    pub fn push_read_data(&mut self, data: &[u8]) {
        self.read_buffer.extend(data.iter().copied());
    }

    pub fn written(&self) -> &[u8] {
        &self.written
    }

    /// Check if a specific command was written
    pub fn was_written(&self, expected: &[u8]) -> bool {
        self.written
            .windows(expected.len())
            .any(|window| window == expected)
    }

    pub fn bytes_available(&self) -> usize {
        self.read_buffer.len()
    }
}

impl Transport for MockTransport {
    async fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        if self.read_buffer.len() < buf.len() {
            // A real port would wait out its timeout; the short reply is lost
            self.read_buffer.clear();
            return Err(SerialError::Timeout(Duration::from_secs(10)));
        }
        let len = buf.len();
        for (slot, byte) in buf.iter_mut().zip(self.read_buffer.drain(..len)) {
            *slot = byte;
        }
        Ok(())
    }

    async fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        self.written.extend_from_slice(buf);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_serial_basic() {
        let mut port = MockTransport::new();
        port.push_read_data(b"Hello");

        let mut buf = [0u8; 5];
        port.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"Hello");

        port.write_all(b"World").await.unwrap();
        assert_eq!(port.written(), b"World");
    }

    #[tokio::test]
    async fn test_mock_short_read_times_out() {
        let mut port = MockTransport::new();
        port.push_read_data(b"Hi");

        let mut buf = [0u8; 5];
        assert!(matches!(
            port.read_exact(&mut buf).await,
            Err(SerialError::Timeout(_))
        ));
        assert_eq!(port.bytes_available(), 0);
    }

    #[tokio::test]
    async fn test_mock_was_written() {
        let mut port = MockTransport::new();
        port.write_all(b"COMMAND123").await.unwrap();

        assert!(port.was_written(b"COMMAND"));
        assert!(port.was_written(b"123"));
        assert!(!port.was_written(b"NOTFOUND"));
    }
}
