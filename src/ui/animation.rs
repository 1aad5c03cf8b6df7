use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationIntensity {
    #[default]
    Full,
    Subtle,
}

impl AnimationIntensity {
    fn base_particles(self) -> u32 {
        match self {
            Self::Full => 50,
            Self::Subtle => 20,
        }
    }
}

/// What the visitor's device reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceCapability {
    pub reduced_motion: bool,
    pub mobile: bool,
    pub low_power: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnimationProfile {
    pub particle_count: u32,
    pub enable_motion: bool,
}

/// Decorative animation density for a site variant on a given device.
/// A reduced-motion preference always wins.
pub fn animation_profile(
    intensity: AnimationIntensity,
    capability: DeviceCapability,
) -> AnimationProfile {
    if capability.reduced_motion {
        return AnimationProfile {
            particle_count: 0,
            enable_motion: false,
        };
    }

    let mut particle_count = intensity.base_particles();
    if capability.mobile {
        particle_count /= 2;
    }
    if capability.low_power {
        particle_count /= 4;
    }

    AnimationProfile {
        particle_count,
        enable_motion: !capability.low_power,
    }
}
