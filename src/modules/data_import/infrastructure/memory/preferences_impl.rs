use dashmap::DashMap;
use std::sync::Arc;

use crate::modules::data_import::application::ports::PreferencesStore;

#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferences {
    values: Arc<DashMap<String, String>>,
}

impl InMemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferencesStore for InMemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).map(|value| value.value().clone())
    }

    fn set(&self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}
