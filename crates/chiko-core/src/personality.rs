//! Closed configuration sets: chat personalities and image styles
//!
//! Selections are tagged variants resolved at compile time, so an invalid
//! choice can never reach the transport layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Chat persona. Each carries a fixed system instruction sent with every turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Personality {
    /// Casual best friend
    #[default]
    Friendly,
    /// Sharp, polite assistant
    Professional,
    /// Joker
    Funny,
    /// Deep-dive expert
    Expert,
}

impl Personality {
    /// All personalities, in display order
    pub const ALL: [Personality; 4] = [
        Self::Friendly,
        Self::Professional,
        Self::Funny,
        Self::Expert,
    ];

    /// Stable identifier
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Self::Friendly => "friendly",
            Self::Professional => "professional",
            Self::Funny => "funny",
            Self::Expert => "expert",
        }
    }

    /// Display name
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Friendly => "Bestie Abis",
            Self::Professional => "Si Paling Pro",
            Self::Funny => "Si Lawak",
            Self::Expert => "Suhu / Sepuh",
        }
    }

    /// Icon shown next to the name
    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Friendly => "😎",
            Self::Professional => "🧐",
            Self::Funny => "🤣",
            Self::Expert => "🔥",
        }
    }

    /// System instruction sent to the model
    #[must_use]
    pub fn system_instruction(&self) -> &'static str {
        match self {
            Self::Friendly => {
                "Lo itu temen akrab (bestie) user. Ngomong pake Bahasa Indonesia gaul (Lo-Gue) \
                 yang santuy, asik, dan kekinian. Pake istilah kaya 'Bro', 'Sis', 'Guys', 'Sob'. \
                 Jangan kaku, anggep aja lagi nongkrong di kafe."
            }
            Self::Professional => {
                "Lo asisten yang pinter dan solutif. Walaupun pinter, tetep jelasin pake Bahasa \
                 Indonesia yang lugas tapi agak santai dikit biar gak bosenin. Pake 'Saya' atau \
                 'Aku' yang sopan tapi tetep friendly."
            }
            Self::Funny => {
                "Lo seneng banget becanda, receh, dan agak nyeleneh. Jawaban lo harus lucu, \
                 roasting dikit gapapa, pake bahasa gaul tongkrongan. Yang penting user ketawa."
            }
            Self::Expert => {
                "Lo itu Suhu, orang yang udah paham banget alias Sepuh. Jelasin sedetail mungkin, \
                 dalem, dan pake istilah-istilah 'daging'. Bahasa tetep santai tapi berwibawa."
            }
        }
    }

    /// Look up a personality by id (case-insensitive)
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(id))
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon(), self.display_name())
    }
}

impl FromStr for Personality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| format!("unknown personality: {}", s))
    }
}

/// Visual style applied to generated images
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageStyle {
    /// Photographic
    #[default]
    Realistic,
    /// Film still
    Cinematic,
    /// Japanese animation
    Anime,
    /// Neon dystopia
    Cyberpunk,
    /// Painted
    Watercolor,
    /// Retro sprites
    PixelArt,
    /// Rendered 3D scene
    ThreeD,
}

impl ImageStyle {
    /// All styles, in display order
    pub const ALL: [ImageStyle; 7] = [
        Self::Realistic,
        Self::Cinematic,
        Self::Anime,
        Self::Cyberpunk,
        Self::Watercolor,
        Self::PixelArt,
        Self::ThreeD,
    ];

    /// Label used in prompts and menus
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Realistic => "Realistic",
            Self::Cinematic => "Cinematic",
            Self::Anime => "Anime",
            Self::Cyberpunk => "Cyberpunk",
            Self::Watercolor => "Watercolor",
            Self::PixelArt => "Pixel Art",
            Self::ThreeD => "3D Render",
        }
    }
}

impl fmt::Display for ImageStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ImageStyle {
    type Err = String;

    /// Accepts the label or a compact form (`pixel-art`, `3d`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|style| {
                let label: String = style
                    .label()
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .collect::<String>()
                    .to_ascii_lowercase();
                label == wanted || (wanted == "3d" && *style == Self::ThreeD)
            })
            .ok_or_else(|| format!("unknown image style: {}", s))
    }
}
