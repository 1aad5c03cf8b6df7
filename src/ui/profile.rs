use crate::ui::animation::AnimationIntensity;
use serde::{Deserialize, Serialize};

/// One deployment of the club site. The ETERNOTES and NOVA builds share all
/// behaviour and differ only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteProfile {
    pub brand: String,
    pub animation: AnimationIntensity,
}

impl SiteProfile {
    pub fn eternotes() -> Self {
        Self {
            brand: "ETERNOTES".to_string(),
            animation: AnimationIntensity::Full,
        }
    }

    pub fn nova() -> Self {
        Self {
            brand: "NOVA Music Club".to_string(),
            animation: AnimationIntensity::Subtle,
        }
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "eternotes" => Some(Self::eternotes()),
            "nova" => Some(Self::nova()),
            _ => None,
        }
    }
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self::eternotes()
    }
}
