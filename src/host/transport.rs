//! Host transports
//!
//! The panel talks to its host through a `HostTransport`. Messages cross as
//! single JSON lines.
//!
//! - `ChannelTransport` - in-process channel pair (tests, embedding)
//! - `StdioTransport` - newline-delimited JSON on stdin/stdout

use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};

use crate::error::HostError;
use super::message::{InboundMessage, OutboundEnvelope};

pub trait HostTransport {
    /// Send one message to the host. Outbound messages carry no origin
    /// restriction; trust is up to the host.
    fn post(&mut self, envelope: &OutboundEnvelope) -> Result<(), HostError>;

    /// Next pending inbound message, if any. Never blocks.
    fn try_recv(&mut self) -> Result<Option<InboundMessage>, HostError>;
}

fn recv_line(receiver: &Receiver<String>) -> Result<Option<InboundMessage>, HostError> {
    match receiver.try_recv() {
        Ok(line) => InboundMessage::from_json(&line).map(Some),
        Err(TryRecvError::Empty) => Ok(None),
        Err(TryRecvError::Disconnected) => Err(HostError::Closed),
    }
}

/// Panel side of an in-process channel pair
pub struct ChannelTransport {
    outgoing: Sender<String>,
    incoming: Receiver<String>,
}

/// Host side of an in-process channel pair
pub struct HostEndpoint {
    to_panel: Sender<String>,
    from_panel: Receiver<String>,
}

impl ChannelTransport {
    /// Create a connected (panel, host) pair
    pub fn pair() -> (ChannelTransport, HostEndpoint) {
        let (to_host, from_panel) = channel();
        let (to_panel, incoming) = channel();
        (
            ChannelTransport { outgoing: to_host, incoming },
            HostEndpoint { to_panel, from_panel },
        )
    }
}

impl HostTransport for ChannelTransport {
    fn post(&mut self, envelope: &OutboundEnvelope) -> Result<(), HostError> {
        let line = envelope.to_json()?;
        self.outgoing.send(line).map_err(|_| HostError::Closed)
    }

    fn try_recv(&mut self) -> Result<Option<InboundMessage>, HostError> {
        recv_line(&self.incoming)
    }
}

impl HostEndpoint {
    /// Push a raw JSON line to the panel
    pub fn send_raw(&self, json: impl Into<String>) -> Result<(), HostError> {
        self.to_panel.send(json.into()).map_err(|_| HostError::Closed)
    }

    pub fn send(&self, message: &InboundMessage) -> Result<(), HostError> {
        self.send_raw(message.to_json()?)
    }

    /// Drain everything the panel has posted so far
    pub fn drain(&self) -> Result<Vec<OutboundEnvelope>, HostError> {
        self.from_panel
            .try_iter()
            .map(|line| OutboundEnvelope::from_json(&line))
            .collect()
    }
}

/// Newline-delimited JSON over the process's stdin/stdout
pub struct StdioTransport {
    incoming: Receiver<String>,
}

impl StdioTransport {
    /// Start the stdin reader thread
    #[cfg(not(target_arch = "wasm32"))]
    pub fn open() -> Self {
        use std::io::BufRead;

        let (sender, incoming) = channel();
        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if line.trim().is_empty() {
                    continue;
                }
                if sender.send(line).is_err() {
                    break;
                }
            }
            log::debug!("host stdin closed");
        });
        Self { incoming }
    }

    /// No stdin on wasm: the channel stays empty
    #[cfg(target_arch = "wasm32")]
    pub fn open() -> Self {
        let (sender, incoming) = channel();
        std::mem::forget(sender);
        Self { incoming }
    }
}

impl HostTransport for StdioTransport {
    fn post(&mut self, envelope: &OutboundEnvelope) -> Result<(), HostError> {
        use std::io::Write;

        let line = envelope.to_json()?;
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        writeln!(out, "{}", line)?;
        out.flush()?;
        Ok(())
    }

    fn try_recv(&mut self) -> Result<Option<InboundMessage>, HostError> {
        recv_line(&self.incoming)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::OutboundMessage;

    #[test]
    fn test_channel_pair_round_trip() {
        let (mut panel, host) = ChannelTransport::pair();
        assert_eq!(panel.try_recv().unwrap(), None);

        host.send(&InboundMessage::Image(vec![7, 7])).unwrap();
        host.send(&InboundMessage::Reset).unwrap();
        assert_eq!(panel.try_recv().unwrap(), Some(InboundMessage::Image(vec![7, 7])));
        assert_eq!(panel.try_recv().unwrap(), Some(InboundMessage::Reset));

        let msg = OutboundMessage::CreateEmptyFrame { name: "Phone".into(), width: 1, height: 2 };
        panel.post(&OutboundEnvelope::new(msg.clone())).unwrap();
        assert_eq!(host.drain().unwrap(), vec![OutboundEnvelope::new(msg)]);
    }

    #[test]
    fn test_closed_host_is_reported() {
        let (mut panel, host) = ChannelTransport::pair();
        drop(host);
        assert!(matches!(panel.try_recv(), Err(HostError::Closed)));
        let msg = OutboundMessage::CreateEmptyFrame { name: "Phone".into(), width: 1, height: 2 };
        assert!(matches!(panel.post(&OutboundEnvelope::new(msg)), Err(HostError::Closed)));
    }
}
