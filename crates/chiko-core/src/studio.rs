//! Photo studio edit tools
//!
//! Each tool turns a selection into the instruction text sent alongside the
//! source image.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Color grading presets for the tone tool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToneFilter {
    /// Teal and orange film look
    #[default]
    Cinematic,
    /// Warm
    Warm,
    /// Cool
    Cool,
    /// Black and white
    BlackWhite,
    /// Neon
    Cyberpunk,
    /// Faded retro
    Vintage,
}

impl ToneFilter {
    /// All filters, in display order
    pub const ALL: [ToneFilter; 6] = [
        Self::Cinematic,
        Self::Warm,
        Self::Cool,
        Self::BlackWhite,
        Self::Cyberpunk,
        Self::Vintage,
    ];

    /// Label used in prompts
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cinematic => "Cinematic",
            Self::Warm => "Warm",
            Self::Cool => "Cool",
            Self::BlackWhite => "B&W",
            Self::Cyberpunk => "Cyberpunk",
            Self::Vintage => "Vintage",
        }
    }
}

impl fmt::Display for ToneFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ToneFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("bw") || s.eq_ignore_ascii_case("mono") {
            return Ok(Self::BlackWhite);
        }
        Self::ALL
            .into_iter()
            .find(|f| f.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown tone filter: {}", s))
    }
}

/// Edit tool selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tool", content = "input", rename_all = "lowercase")]
pub enum EditTool {
    /// Re-grade colors, keep content
    Tone(ToneFilter),
    /// Remove an object and fill the background
    Remove(String),
    /// Swap the subject's clothing
    Outfit(String),
    /// Sharpen, relight, denoise
    Enhance,
}

/// Tool input rejected before any request is made
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditToolError {
    /// `remove` and `outfit` need a description
    #[error("{0} tool needs a description")]
    MissingDescription(&'static str),
}

impl EditTool {
    /// Tool identifier
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Self::Tone(_) => "tone",
            Self::Remove(_) => "remove",
            Self::Outfit(_) => "outfit",
            Self::Enhance => "enhance",
        }
    }

    /// Instruction text for the edit request
    pub fn instruction(&self) -> Result<String, EditToolError> {
        match self {
            Self::Tone(filter) => Ok(format!(
                "Apply a {} color grading/filter to this image. Keep the content exactly the same, \
                 just change the tone/mood. High quality.",
                filter
            )),
            Self::Remove(target) => {
                let target = non_empty(target, "remove")?;
                Ok(format!(
                    "Remove the {} from this image. Fill in the background naturally to match \
                     the surroundings. High quality.",
                    target
                ))
            }
            Self::Outfit(description) => {
                let description = non_empty(description, "outfit")?;
                Ok(format!(
                    "Change the person's clothing in this image to: {}. Keep the face, pose, \
                     and background exactly the same. Photorealistic result.",
                    description
                ))
            }
            Self::Enhance => Ok("Enhance the quality of this image. Increase sharpness, improve \
                                 lighting, and reduce noise. make it look like 4K resolution."
                .to_string()),
        }
    }
}

fn non_empty<'a>(value: &'a str, tool: &'static str) -> Result<&'a str, EditToolError> {
    let value = value.trim();
    if value.is_empty() {
        Err(EditToolError::MissingDescription(tool))
    } else {
        Ok(value)
    }
}
