//! Host bridge
//!
//! Inbound: while subscribed, every poll drains the transport. A falsy
//! payload becomes `BridgeEvent::ResetTexture`; an image payload starts a
//! background decode that later surfaces as `BridgeEvent::TextureDecoded`.
//!
//! Outbound: `create_empty_frame` posts immediately. `save_canvas_image`
//! probes the snapshot's dimensions and encodes it as PNG concurrently, and
//! posts only once both have finished.

use std::sync::Arc;

use image::RgbaImage;
use log::{debug, error, info, warn};

use crate::async_ops::{AsyncOp, AsyncResult};
use crate::config::DecodeOrder;
use crate::error::HostError;
use crate::texture::{decode_image, encode_png, probe_dimensions, CustomImage};
use crate::viewport::CanvasSnapshot;
use super::message::{InboundMessage, OutboundEnvelope, OutboundMessage};
use super::transport::HostTransport;

/// Something the panel has to react to
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeEvent {
    /// Host cleared its selection: show the current device's default screen
    ResetTexture,
    /// A host image finished decoding
    TextureDecoded(CustomImage),
    /// A save-canvas-image command reached the host
    ImageSaved { name: String },
    /// Background work or a send failed; the panel state is unchanged
    Failed(String),
}

/// A background job whose result is kept once it lands
struct Pending<T> {
    op: Option<AsyncOp<T>>,
    result: Option<AsyncResult<T>>,
}

impl<T> Pending<T> {
    fn new(op: AsyncOp<T>) -> Self {
        Self { op: Some(op), result: None }
    }

    fn poll(&mut self) -> bool {
        if self.result.is_none() {
            if let Some(op) = self.op.as_mut() {
                if op.is_complete() {
                    self.result = self.op.take().and_then(AsyncOp::take);
                }
            }
        }
        self.result.is_some()
    }
}

struct PendingDecode {
    seq: u64,
    op: AsyncOp<RgbaImage>,
}

struct PendingSave {
    name: String,
    probe: Pending<(u32, u32)>,
    encode: Pending<Vec<u8>>,
}

pub struct HostBridge {
    transport: Box<dyn HostTransport>,
    subscribed: bool,
    closed: bool,
    decode_order: DecodeOrder,
    max_texture_size: u32,
    /// Bumped for every inbound message, image or reset
    inbound_seq: u64,
    decodes: Vec<PendingDecode>,
    saves: Vec<PendingSave>,
}

impl HostBridge {
    pub fn new(transport: Box<dyn HostTransport>, decode_order: DecodeOrder, max_texture_size: u32) -> Self {
        Self {
            transport,
            subscribed: false,
            closed: false,
            decode_order,
            max_texture_size,
            inbound_seq: 0,
            decodes: Vec::new(),
            saves: Vec::new(),
        }
    }

    /// Start listening for inbound messages. Only one subscription may be
    /// active at a time.
    pub fn subscribe(&mut self) -> Result<(), HostError> {
        if self.subscribed {
            return Err(HostError::AlreadySubscribed);
        }
        self.subscribed = true;
        info!("host subscription installed");
        Ok(())
    }

    /// Stop listening. Decodes already in flight are discarded.
    pub fn unsubscribe(&mut self) -> Result<(), HostError> {
        if !self.subscribed {
            return Err(HostError::NotSubscribed);
        }
        self.subscribed = false;
        self.decodes.clear();
        info!("host subscription removed");
        Ok(())
    }

    /// True while decodes or saves are still running
    pub fn is_busy(&self) -> bool {
        !self.decodes.is_empty() || !self.saves.is_empty()
    }

    /// Drain inbound messages and collect finished background work
    pub fn poll(&mut self) -> Vec<BridgeEvent> {
        let mut events = Vec::new();
        if self.subscribed && !self.closed {
            self.read_inbound(&mut events);
        }
        self.poll_decodes(&mut events);
        self.poll_saves(&mut events);
        events
    }

    fn read_inbound(&mut self, events: &mut Vec<BridgeEvent>) {
        loop {
            match self.transport.try_recv() {
                Ok(Some(InboundMessage::Reset)) => {
                    self.inbound_seq += 1;
                    info!("host: reset texture (#{})", self.inbound_seq);
                    events.push(BridgeEvent::ResetTexture);
                }
                Ok(Some(InboundMessage::Image(bytes))) => {
                    self.inbound_seq += 1;
                    let seq = self.inbound_seq;
                    let max_size = self.max_texture_size;
                    info!("host: image payload #{} ({} bytes), decoding", seq, bytes.len());
                    let op = AsyncOp::spawn(move || decode_image(&bytes, max_size));
                    self.decodes.push(PendingDecode { seq, op });
                }
                Ok(None) => break,
                Err(HostError::Closed) => {
                    warn!("host channel closed, no further inbound messages");
                    self.closed = true;
                    break;
                }
                Err(e) => warn!("ignoring malformed host message: {}", e),
            }
        }
    }

    fn poll_decodes(&mut self, events: &mut Vec<BridgeEvent>) {
        let mut i = 0;
        while i < self.decodes.len() {
            if !self.decodes[i].op.is_complete() {
                i += 1;
                continue;
            }
            let PendingDecode { seq, op } = self.decodes.remove(i);
            // A newer message replaced this one, whatever the outcome
            if self.decode_order == DecodeOrder::Sequenced && seq != self.inbound_seq {
                debug!("dropping stale decode #{} (latest is #{})", seq, self.inbound_seq);
                continue;
            }

            match op.take() {
                Some(Ok(img)) => {
                    let image = CustomImage::new(img);
                    info!("decoded host image #{} as {:?}", seq, image);
                    events.push(BridgeEvent::TextureDecoded(image));
                }
                Some(Err(e)) => {
                    warn!("host image #{} failed to decode: {}", seq, e);
                    events.push(BridgeEvent::Failed(e.to_string()));
                }
                None => {}
            }
        }
    }

    fn poll_saves(&mut self, events: &mut Vec<BridgeEvent>) {
        let mut i = 0;
        while i < self.saves.len() {
            let save = &mut self.saves[i];
            // Poll both so neither waits on the other
            let probed = save.probe.poll();
            let encoded = save.encode.poll();
            if !(probed && encoded) {
                i += 1;
                continue;
            }

            let save = self.saves.remove(i);
            let (Some(dims), Some(blob)) = (save.probe.result, save.encode.result) else {
                continue;
            };
            let outcome = dims.and_then(|dims| blob.map(|blob| (dims, blob)));
            match outcome {
                Ok(((width, height), blob)) => {
                    let message = OutboundMessage::SaveCanvasImage {
                        name: save.name.clone(),
                        width,
                        height,
                        blob,
                    };
                    match self.post(message) {
                        Ok(()) => events.push(BridgeEvent::ImageSaved { name: save.name }),
                        Err(e) => events.push(BridgeEvent::Failed(e.to_string())),
                    }
                }
                Err(e) => {
                    error!("save-canvas-image for '{}' not sent: {}", save.name, e);
                    events.push(BridgeEvent::Failed(e.to_string()));
                }
            }
        }
    }

    fn post(&mut self, message: OutboundMessage) -> Result<(), HostError> {
        let kind = message.kind();
        let result = self.transport.post(&OutboundEnvelope::new(message));
        match &result {
            Ok(()) => info!("sent {}", kind),
            Err(e) => error!("failed to send {}: {}", kind, e),
        }
        result
    }

    /// Ask the host for an empty frame of the given size. Fire-and-forget.
    pub fn create_empty_frame(&mut self, name: &str, width: u32, height: u32) -> Result<(), HostError> {
        self.post(OutboundMessage::CreateEmptyFrame {
            name: name.to_string(),
            width,
            height,
        })
    }

    /// Start baking a captured frame into a save-canvas-image command
    pub fn save_canvas_image(&mut self, name: &str, snapshot: CanvasSnapshot) {
        let CanvasSnapshot { width, height, rgba } = snapshot;
        let rgba = Arc::new(rgba);

        let probe_pixels = Arc::clone(&rgba);
        let probe = AsyncOp::spawn(move || probe_dimensions(width, height, &probe_pixels));
        let encode = AsyncOp::spawn(move || encode_png(width, height, &rgba));

        debug!("save-canvas-image for '{}' started ({}x{})", name, width, height);
        self.saves.push(PendingSave {
            name: name.to_string(),
            probe: Pending::new(probe),
            encode: Pending::new(encode),
        });
    }
}

impl Drop for HostBridge {
    fn drop(&mut self) {
        if self.subscribed {
            let _ = self.unsubscribe();
        }
    }
}
