//! Message content items.
//!
//! A message carries an ordered list of content items, each tagged with a
//! `type` discriminator naming exactly one payload:
//!
//! ```json
//! {"type": "text", "text": {"value": "hi", "annotations": []}}
//! {"type": "image_file", "image_file": {"file_id": "file-abc"}}
//! {"type": "image_url", "image_url": {"url": "https://...", "detail": "low"}}
//! {"type": "video_url", "video_url": {"url": "https://...", "fps": 2.0}}
//! {"type": "video", "video": "https://.../clip.mp4"}
//! {"type": "video", "video": ["https://.../1.png", "https://.../2.png"]}
//! ```
//!
//! The `video` payload is not an object: it is a bare string for a single
//! video URL or a bare array of strings for a sequence of frame images.
//!
//! Items of any other `type`, and known types whose payload is absent or
//! `null`, decode as [`MessageContent::Other`] and encode back unchanged.

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// One element of a message's content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    Text { text: MessageText },
    ImageFile { image_file: ImageFile },
    ImageUrl { image_url: ImageUrl },
    VideoUrl { video_url: VideoUrl },
    Video { video: Video },
    /// An item this crate does not model, kept as received (tag included).
    #[serde(untagged)]
    Other(Map<String, Value>),
}

impl MessageContent {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            text: MessageText {
                value: value.into(),
                annotations: Vec::new(),
            },
        }
    }

    pub fn image_file(file_id: impl Into<String>) -> Self {
        Self::ImageFile {
            image_file: ImageFile {
                file_id: file_id.into(),
            },
        }
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        Self::ImageUrl {
            image_url: ImageUrl {
                url: url.into(),
                detail: None,
            },
        }
    }

    pub fn video_url(url: impl Into<String>) -> Self {
        Self::VideoUrl {
            video_url: VideoUrl {
                url: url.into(),
                fps: None,
                detail: None,
            },
        }
    }

    /// A single video referenced by URL
    pub fn video(url: impl Into<String>) -> Self {
        Self::Video {
            video: Video::Url(url.into()),
        }
    }

    /// A video given as a sequence of frame image URLs
    pub fn video_frames<I, S>(frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Video {
            video: Video::Frames(frames.into_iter().map(Into::into).collect()),
        }
    }

    /// The wire discriminator for this item
    #[must_use]
    pub fn content_type(&self) -> &str {
        match self {
            Self::Text { .. } => "text",
            Self::ImageFile { .. } => "image_file",
            Self::ImageUrl { .. } => "image_url",
            Self::VideoUrl { .. } => "video_url",
            Self::Video { .. } => "video",
            Self::Other(raw) => raw.get("type").and_then(Value::as_str).unwrap_or_default(),
        }
    }

    /// The raw item when its type is not modelled
    #[must_use]
    pub fn as_other(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Other(raw) => Some(raw),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&MessageText> {
        match self {
            Self::Text { text } => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_image_file(&self) -> Option<&ImageFile> {
        match self {
            Self::ImageFile { image_file } => Some(image_file),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_image_url(&self) -> Option<&ImageUrl> {
        match self {
            Self::ImageUrl { image_url } => Some(image_url),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_video_url(&self) -> Option<&VideoUrl> {
        match self {
            Self::VideoUrl { video_url } => Some(video_url),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_video(&self) -> Option<&Video> {
        match self {
            Self::Video { video } => Some(video),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for MessageContent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        let tag = match raw.get("type") {
            Some(Value::String(tag)) => tag.clone(),
            Some(other) => {
                return Err(de::Error::custom(format!(
                    "invalid type for content discriminator: {}",
                    json_type_name(other)
                )));
            }
            None => return Err(de::Error::missing_field("type")),
        };
        let payload = match raw.get(&tag) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value.clone()),
        };

        Ok(match (tag.as_str(), payload) {
            // An absent video decodes like `null`: the empty payload.
            ("video", payload) => Self::Video {
                video: payload_as::<_, D::Error>(payload.unwrap_or(Value::Null))?,
            },
            ("text", Some(payload)) => Self::Text {
                text: payload_as::<_, D::Error>(payload)?,
            },
            ("image_file", Some(payload)) => Self::ImageFile {
                image_file: payload_as::<_, D::Error>(payload)?,
            },
            ("image_url", Some(payload)) => Self::ImageUrl {
                image_url: payload_as::<_, D::Error>(payload)?,
            },
            ("video_url", Some(payload)) => Self::VideoUrl {
                video_url: payload_as::<_, D::Error>(payload)?,
            },
            _ => Self::Other(raw),
        })
    }
}

fn payload_as<T, E>(value: Value) -> Result<T, E>
where
    T: DeserializeOwned,
    E: de::Error,
{
    T::deserialize(value).map_err(E::custom)
}

/// Text content with its annotations (citations, file paths, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageText {
    pub value: String,
    /// Kept as raw JSON; the annotation schema is not modelled here.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub annotations: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFile {
    pub file_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ImageUrl {
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoUrl {
    pub url: String,
    /// Sampling rate hint in frames per second
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl VideoUrl {
    #[must_use]
    pub fn with_fps(mut self, fps: f64) -> Self {
        self.fps = Some(fps);
        self
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Video payload: one URL, or a sequence of frame image URLs.
///
/// Encodes as a bare JSON string or a bare JSON array of strings. When both
/// forms are empty it encodes as `null`, which decodes back to an empty
/// `Frames`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Video {
    Url(String),
    Frames(Vec<String>),
}

impl Video {
    /// True when there is neither a URL nor any frame
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Url(url) => url.is_empty(),
            Self::Frames(frames) => frames.is_empty(),
        }
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Url(url) if !url.is_empty() => Some(url.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn frames(&self) -> &[String] {
        match self {
            Self::Frames(frames) => frames.as_slice(),
            Self::Url(_) => &[],
        }
    }
}

impl Default for Video {
    fn default() -> Self {
        Self::Frames(Vec::new())
    }
}

impl Serialize for Video {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Frames(frames) if !frames.is_empty() => frames.serialize(serializer),
            Self::Url(url) if !url.is_empty() => serializer.serialize_str(url),
            _ => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Video {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(url) => Ok(Self::Url(url)),
            // Non-string elements are dropped, not rejected.
            Value::Array(items) => Ok(Self::Frames(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(url) => Some(url),
                        _ => None,
                    })
                    .collect(),
            )),
            Value::Null => Ok(Self::default()),
            other => Err(de::Error::custom(format!(
                "invalid type for video field: {}",
                json_type_name(&other)
            ))),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
