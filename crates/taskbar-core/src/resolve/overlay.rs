use taskbar_model::{ConfigMap, ConfigValue, Platform};

/// Selects the active platform sub-object of a configuration node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformOverlay {
    platform: Platform,
}

impl PlatformOverlay {
    #[inline]
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    #[inline]
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Active overlay of `node`. Overlays that are not mappings are ignored.
    pub fn of<'a>(&self, node: &'a ConfigMap) -> Option<&'a ConfigMap> {
        node.get(self.platform.key()).and_then(ConfigValue::as_map)
    }
}

impl Default for PlatformOverlay {
    fn default() -> Self {
        Self::new(Platform::current())
    }
}
