/// Port for small remembered UI preferences (last import mode and so on)
pub trait PreferencesStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);
}
