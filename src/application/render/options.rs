pub const DEFAULT_IMAGE_ALT: &str = "Blog image";

/// Tunables for the block renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Accessible description used for images that have no caption.
    pub default_image_alt: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            default_image_alt: DEFAULT_IMAGE_ALT.to_string(),
        }
    }
}

impl From<&crate::config::RenderSettings> for RenderOptions {
    fn from(settings: &crate::config::RenderSettings) -> Self {
        Self {
            default_image_alt: settings.default_image_alt.clone(),
        }
    }
}
