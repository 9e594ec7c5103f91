use taskbar_model::{ConfigDocument, ConfigMap, ConfigValue, Platform};

use super::overlay::PlatformOverlay;

/// Flattens a task entry with its document defaults and both platform overlays.
///
/// Layers, lowest first:
/// 1. document fields except `tasks`, `version` and the overlay keys;
/// 2. the document's active overlay;
/// 3. the entry's fields except the overlay keys;
/// 4. the entry's active overlay.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigMerger {
    overlay: PlatformOverlay,
}

impl ConfigMerger {
    pub fn new(platform: Platform) -> Self {
        Self {
            overlay: PlatformOverlay::new(platform),
        }
    }

    #[inline]
    pub fn overlay(&self) -> PlatformOverlay {
        self.overlay
    }

    pub fn merge(&self, document: &ConfigDocument, entry: &ConfigMap) -> ConfigMap {
        let root = document.root();
        let mut out = ConfigMap::new();

        let mut document_excluded = ConfigDocument::STRUCTURAL_KEYS.to_vec();
        document_excluded.extend(Platform::OVERLAY_KEYS);

        merge_layer(&mut out, root, &document_excluded);
        if let Some(overlay) = self.overlay.of(root) {
            merge_layer(&mut out, overlay, &[]);
        }
        merge_layer(&mut out, entry, &Platform::OVERLAY_KEYS);
        if let Some(overlay) = self.overlay.of(entry) {
            merge_layer(&mut out, overlay, &[]);
        }
        out
    }
}

/// Overlay `layer` onto `target`, skipping `excluded` top-level keys.
///
/// Mappings merge recursively; every other value, sequences included, replaces the previous one.
pub fn merge_layer(target: &mut ConfigMap, layer: &ConfigMap, excluded: &[&str]) {
    for (key, value) in layer {
        if excluded.contains(&key.as_str()) {
            continue;
        }
        if let (Some(ConfigValue::Map(inner)), ConfigValue::Map(incoming)) =
            (target.get_mut(key), value)
        {
            merge_layer(inner, incoming, &[]);
            continue;
        }
        target.insert(key.clone(), value.clone());
    }
}
