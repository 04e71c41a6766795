//! Host wire format
//!
//! Every message is a JSON object with a single `pluginMessage` key.
//! Outbound payloads are tagged by `type`; inbound payloads are a raw image
//! (base64 string or byte array) or a falsy value meaning "reset".

use base64::Engine as _;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::HostError;

/// Commands sent to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OutboundMessage {
    CreateEmptyFrame {
        name: String,
        width: u32,
        height: u32,
    },
    SaveCanvasImage {
        name: String,
        width: u32,
        height: u32,
        #[serde(serialize_with = "serialize_base64", deserialize_with = "deserialize_base64")]
        blob: Vec<u8>,
    },
}

impl OutboundMessage {
    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            OutboundMessage::CreateEmptyFrame { .. } => "create-empty-frame",
            OutboundMessage::SaveCanvasImage { .. } => "save-canvas-image",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundEnvelope {
    #[serde(rename = "pluginMessage")]
    pub plugin_message: OutboundMessage,
}

impl OutboundEnvelope {
    pub fn new(message: OutboundMessage) -> Self {
        Self { plugin_message: message }
    }

    pub fn to_json(&self) -> Result<String, HostError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, HostError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// What the host pushed to the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    /// Payload absent or falsy: go back to the device's default texture
    Reset,
    /// Encoded image bytes
    Image(Vec<u8>),
}

#[derive(Deserialize)]
struct RawInbound {
    #[serde(rename = "pluginMessage", default)]
    plugin_message: Value,
}

impl InboundMessage {
    /// Parse one inbound envelope
    pub fn from_json(json: &str) -> Result<Self, HostError> {
        let raw: RawInbound = serde_json::from_str(json)?;
        Self::from_payload(raw.plugin_message)
    }

    fn from_payload(payload: Value) -> Result<Self, HostError> {
        let bytes = match payload {
            Value::Null | Value::Bool(false) => return Ok(InboundMessage::Reset),
            Value::Number(n) if n.as_f64() == Some(0.0) => return Ok(InboundMessage::Reset),
            Value::String(s) => base64::engine::general_purpose::STANDARD
                .decode(s.as_bytes())
                .map_err(serde::de::Error::custom)
                .map_err(HostError::Serialization)?,
            Value::Array(_) => serde_json::from_value::<Vec<u8>>(payload)?,
            other => {
                return Err(HostError::Serialization(serde::de::Error::custom(format!(
                    "unsupported pluginMessage payload: {}",
                    other
                ))))
            }
        };

        if bytes.is_empty() {
            Ok(InboundMessage::Reset)
        } else {
            Ok(InboundMessage::Image(bytes))
        }
    }

    /// Encode as the host would send it
    pub fn to_json(&self) -> Result<String, HostError> {
        let payload = match self {
            InboundMessage::Reset => Value::Null,
            InboundMessage::Image(bytes) => {
                Value::String(base64::engine::general_purpose::STANDARD.encode(bytes))
            }
        };
        Ok(serde_json::to_string(&serde_json::json!({ "pluginMessage": payload }))?)
    }
}

fn serialize_base64<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(bytes))
}

fn deserialize_base64<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let s = String::deserialize(deserializer)?;
    base64::engine::general_purpose::STANDARD
        .decode(s.as_bytes())
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_frame_wire_shape() {
        let envelope = OutboundEnvelope::new(OutboundMessage::CreateEmptyFrame {
            name: "Phone".into(),
            width: 375,
            height: 812,
        });
        let value: Value = serde_json::from_str(&envelope.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "pluginMessage": { "type": "create-empty-frame", "name": "Phone", "width": 375, "height": 812 }
            })
        );
    }

    #[test]
    fn test_save_image_blob_is_base64() {
        let envelope = OutboundEnvelope::new(OutboundMessage::SaveCanvasImage {
            name: "Pixel 5".into(),
            width: 2,
            height: 1,
            blob: vec![0x89, b'P', b'N', b'G'],
        });
        let json = envelope.to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["pluginMessage"]["type"], "save-canvas-image");
        assert_eq!(value["pluginMessage"]["blob"], "iVBORw==");
        assert_eq!(OutboundEnvelope::from_json(&json).unwrap(), envelope);
    }

    #[test]
    fn test_falsy_payloads_mean_reset() {
        for json in [
            r#"{}"#,
            r#"{"pluginMessage":null}"#,
            r#"{"pluginMessage":false}"#,
            r#"{"pluginMessage":0}"#,
            r#"{"pluginMessage":""}"#,
            r#"{"pluginMessage":[]}"#,
        ] {
            assert_eq!(InboundMessage::from_json(json).unwrap(), InboundMessage::Reset, "{}", json);
        }
    }

    #[test]
    fn test_image_payload_forms() {
        assert_eq!(
            InboundMessage::from_json(r#"{"pluginMessage":"AQID"}"#).unwrap(),
            InboundMessage::Image(vec![1, 2, 3])
        );
        assert_eq!(
            InboundMessage::from_json(r#"{"pluginMessage":[1,2,3]}"#).unwrap(),
            InboundMessage::Image(vec![1, 2, 3])
        );
    }

    #[test]
    fn test_malformed_inbound_is_an_error() {
        assert!(InboundMessage::from_json("not json").is_err());
        assert!(InboundMessage::from_json(r#"{"pluginMessage":"***"}"#).is_err());
        assert!(InboundMessage::from_json(r#"{"pluginMessage":{"a":1}}"#).is_err());
    }
}
