//! Inline media and request parts

use serde::{Deserialize, Serialize};

/// MIME type assumed when the provider omits one
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Binary image carried as base64 text.
///
/// The payload is opaque: it is passed through exactly as received and is
/// never decoded or re-encoded here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageArtifact {
    /// MIME type, e.g. `image/png`
    pub mime_type: String,
    /// Base64 payload
    pub data: String,
}

impl ImageArtifact {
    /// Create a new artifact
    #[must_use]
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Render as a `data:` URL
    #[must_use]
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Parse a `data:<mime>;base64,<payload>` URL.
    ///
    /// Returns `None` for anything that is not a base64 data URL.
    #[must_use]
    pub fn from_data_url(url: &str) -> Option<Self> {
        let rest = url.strip_prefix("data:")?;
        let (header, payload) = rest.split_once(',')?;
        let mime = header.strip_suffix(";base64")?;
        if payload.is_empty() {
            return None;
        }
        let mime = if mime.is_empty() { DEFAULT_IMAGE_MIME } else { mime };
        Some(Self::new(mime, payload))
    }
}

/// Output aspect ratio for generated images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    /// 1:1
    #[default]
    #[serde(rename = "1:1")]
    Square,
    /// 4:5
    #[serde(rename = "4:5")]
    Portrait,
    /// 9:16
    #[serde(rename = "9:16")]
    Story,
    /// 16:9
    #[serde(rename = "16:9")]
    Landscape,
}

impl AspectRatio {
    /// All ratios in display order
    pub const ALL: [AspectRatio; 4] = [
        Self::Square,
        Self::Portrait,
        Self::Story,
        Self::Landscape,
    ];

    /// Wire representation (`"16:9"`)
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Portrait => "4:5",
            Self::Story => "9:16",
            Self::Landscape => "16:9",
        }
    }

    /// Parse from the wire representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == s.trim())
    }
}

impl std::str::FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unsupported aspect ratio: {}", s))
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One component of a request or response body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    /// Plain text
    Text(String),
    /// Inline media payload
    InlineData(ImageArtifact),
}

impl Part {
    /// Text content, if this is a text part
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::InlineData(_) => None,
        }
    }

    /// Media payload, if this is an inline data part
    #[must_use]
    pub fn as_media(&self) -> Option<&ImageArtifact> {
        match self {
            Self::InlineData(artifact) => Some(artifact),
            Self::Text(_) => None,
        }
    }
}
