use crate::KeyMapping;

pub const SETTINGS_KEY: &str = "spinwheel_settings";

const DEFAULT_PIXELS_PER_POINT: f32 = 1.0;
const PIXELS_PER_POINT_RANGE: std::ops::RangeInclusive<f32> = 0.5..=4.0;

/// What survives a restart. Entries are not part of it.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PersistState {
    pub pixels_per_point: f32,
    pub theme: String,
    pub key_mapping: KeyMapping,
}

impl Default for PersistState {
    fn default() -> Self {
        Self {
            pixels_per_point: DEFAULT_PIXELS_PER_POINT,
            theme: String::from("light"),
            key_mapping: KeyMapping::default(),
        }
    }
}

impl PersistState {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let mut this: Self = serde_json::from_str(json)?;
        if !PIXELS_PER_POINT_RANGE.contains(&this.pixels_per_point) {
            log::warn!(
                "ignoring stored pixels per point: {}",
                this.pixels_per_point
            );
            this.pixels_per_point = DEFAULT_PIXELS_PER_POINT;
        }
        Ok(this)
    }

    pub fn load(storage: &dyn eframe::Storage) -> Option<Self> {
        let json = storage.get_string(SETTINGS_KEY)?;
        match Self::from_json(&json) {
            Ok(this) => Some(this),
            Err(err) => {
                log::warn!("cannot load stored settings: {err}");
                None
            }
        }
    }

    pub fn save(&self, storage: &mut dyn eframe::Storage) {
        match serde_json::to_string(self) {
            Ok(json) => storage.set_string(SETTINGS_KEY, json),
            Err(err) => log::error!("cannot serialize settings: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use eframe::Storage as _;

    use super::*;

    #[derive(Default)]
    struct MemoryStorage(HashMap<String, String>);

    impl eframe::Storage for MemoryStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.0.insert(key.to_string(), value);
        }

        fn flush(&mut self) {}
    }

    #[test]
    fn missing_fields_use_defaults() {
        let state = PersistState::from_json(r#"{ "theme": "neon" }"#).unwrap();
        assert_eq!(state.theme, "neon");
        assert_eq!(state.pixels_per_point, 1.0);
        assert_eq!(state.key_mapping, KeyMapping::default());
    }

    #[test]
    fn bad_pixels_per_point_is_reset() {
        let state = PersistState::from_json(r#"{ "pixels_per_point": 0.0 }"#).unwrap();
        assert_eq!(state.pixels_per_point, 1.0);
        assert!(PersistState::from_json("[1, 2]").is_err());
    }

    #[test]
    fn storage_round_trip() {
        let mut storage = MemoryStorage::default();
        assert!(PersistState::load(&storage).is_none());

        let state = PersistState {
            pixels_per_point: 1.5,
            theme: String::from("retro"),
            ..PersistState::default()
        };
        state.save(&mut storage);
        assert_eq!(PersistState::load(&storage), Some(state));

        storage.set_string(SETTINGS_KEY, String::from("not json"));
        assert!(PersistState::load(&storage).is_none());
    }
}
