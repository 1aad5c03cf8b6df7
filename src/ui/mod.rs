pub mod animation;
pub mod profile;

pub use animation::{AnimationIntensity, AnimationProfile, DeviceCapability, animation_profile};
pub use profile::SiteProfile;
