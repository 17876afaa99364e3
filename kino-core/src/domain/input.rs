//! Typed input parameters for generation jobs
//!
//! The job service treats `input_data` as an opaque map. These builders give
//! callers a typed way to produce the fields each kind understands; unset
//! optional fields are left out of the map entirely.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Input map sent as `input_data`
pub type InputData = HashMap<String, serde_json::Value>;

/// Errors raised while building job input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("prompt cannot be empty")]
    EmptyPrompt,

    #[error("duration must be between 1 and {max} seconds, got {got}")]
    InvalidDuration { got: u32, max: u32 },
}

/// Longest clip the video services accept
pub const MAX_VIDEO_DURATION_SECS: u32 = 60;

/// Parameters for a video generation job
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoInput {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    /// Reference image the video should start from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Clip length in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl VideoInput {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn resolution(mut self, resolution: impl Into<String>) -> Self {
        self.resolution = Some(resolution.into());
        self
    }

    pub fn negative_prompt(mut self, negative_prompt: impl Into<String>) -> Self {
        self.negative_prompt = Some(negative_prompt.into());
        self
    }

    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn duration(mut self, seconds: u32) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn aspect_ratio(mut self, aspect_ratio: impl Into<String>) -> Self {
        self.aspect_ratio = Some(aspect_ratio.into());
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the input and converts it into the wire map
    pub fn into_input_data(self) -> Result<InputData, InputError> {
        if self.prompt.trim().is_empty() {
            return Err(InputError::EmptyPrompt);
        }
        if let Some(got) = self.duration {
            if got == 0 || got > MAX_VIDEO_DURATION_SECS {
                return Err(InputError::InvalidDuration {
                    got,
                    max: MAX_VIDEO_DURATION_SECS,
                });
            }
        }
        Ok(to_map(&self))
    }
}

/// Parameters for an image generation job
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageInput {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    /// e.g. "png", "jpeg"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,
    /// Moderation strictness, lower is stricter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_tolerance: Option<u8>,
}

impl ImageInput {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn aspect_ratio(mut self, aspect_ratio: impl Into<String>) -> Self {
        self.aspect_ratio = Some(aspect_ratio.into());
        self
    }

    pub fn output_format(mut self, output_format: impl Into<String>) -> Self {
        self.output_format = Some(output_format.into());
        self
    }

    pub fn safety_tolerance(mut self, level: u8) -> Self {
        self.safety_tolerance = Some(level);
        self
    }

    /// Validates the input and converts it into the wire map
    pub fn into_input_data(self) -> Result<InputData, InputError> {
        if self.prompt.trim().is_empty() {
            return Err(InputError::EmptyPrompt);
        }
        Ok(to_map(&self))
    }
}

fn to_map<T: Serialize>(input: &T) -> InputData {
    match serde_json::to_value(input) {
        Ok(serde_json::Value::Object(map)) => map.into_iter().collect(),
        _ => InputData::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_input_omits_unset_fields() {
        let data = VideoInput::new("A cat playing in a garden")
            .resolution("720p")
            .duration(5)
            .into_input_data()
            .unwrap();

        assert_eq!(data.len(), 3);
        assert_eq!(data["prompt"], "A cat playing in a garden");
        assert_eq!(data["resolution"], "720p");
        assert_eq!(data["duration"], 5);
        assert!(!data.contains_key("negative_prompt"));
    }

    #[test]
    fn test_video_input_rejects_bad_duration() {
        let err = VideoInput::new("waves").duration(0).into_input_data();
        assert_eq!(
            err,
            Err(InputError::InvalidDuration {
                got: 0,
                max: MAX_VIDEO_DURATION_SECS
            })
        );
    }

    #[test]
    fn test_empty_prompt_rejected() {
        assert_eq!(
            ImageInput::new("   ").into_input_data(),
            Err(InputError::EmptyPrompt)
        );
        assert_eq!(
            VideoInput::new("").into_input_data(),
            Err(InputError::EmptyPrompt)
        );
    }

    #[test]
    fn test_image_input_fields() {
        let data = ImageInput::new("a red fox")
            .aspect_ratio("16:9")
            .output_format("png")
            .safety_tolerance(2)
            .into_input_data()
            .unwrap();

        assert_eq!(data["aspect_ratio"], "16:9");
        assert_eq!(data["output_format"], "png");
        assert_eq!(data["safety_tolerance"], 2);
    }
}
