//! Error types
//!
//! One enum per concern. Precondition violations (unknown device, bad preset
//! index) are not represented here: they panic at the lookup site.

use thiserror::Error;

/// Failures on the host message channel
#[derive(Error, Debug)]
pub enum HostError {
    #[error("host channel closed")]
    Closed,

    #[error("message serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error on host channel: {0}")]
    Io(#[from] std::io::Error),

    #[error("a host subscription is already installed")]
    AlreadySubscribed,

    #[error("no host subscription installed")]
    NotSubscribed,
}

/// Failures decoding host images or encoding canvas snapshots
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImageError {
    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("failed to encode image: {0}")]
    Encode(String),

    #[error("snapshot buffer does not match {width}x{height}")]
    InvalidSnapshot { width: u32, height: u32 },

    #[error("background task ended without a result")]
    Disconnected,

    #[error("nothing rendered yet")]
    NotRendered,
}

impl From<image::ImageError> for ImageError {
    fn from(e: image::ImageError) -> Self {
        match e {
            image::ImageError::Encoding(_) => ImageError::Encode(e.to_string()),
            _ => ImageError::Decode(e.to_string()),
        }
    }
}

/// Failures loading the panel configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(HostError::AlreadySubscribed.to_string(), "a host subscription is already installed");
        let e = ImageError::InvalidSnapshot { width: 4, height: 2 };
        assert_eq!(e.to_string(), "snapshot buffer does not match 4x2");
    }
}
