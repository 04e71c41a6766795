//! Host communication
//!
//! - `message` - JSON wire format (`pluginMessage` envelopes)
//! - `transport` - how messages reach the host
//! - `bridge` - inbound texture updates and outbound commands

mod bridge;
mod message;
mod transport;

pub use bridge::{BridgeEvent, HostBridge};
pub use message::{InboundMessage, OutboundEnvelope, OutboundMessage};
pub use transport::{ChannelTransport, HostEndpoint, HostTransport, StdioTransport};
