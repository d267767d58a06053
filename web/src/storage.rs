use gloo::storage::{LocalStorage, Storage};
use qwixx_core::StateStore;

/// Browser `localStorage`, holding raw JSON text under the core's storage keys.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct LocalStore;

impl StateStore for LocalStore {
    type Error = String;

    fn load(&self, key: &str) -> Option<String> {
        match LocalStorage::raw().get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::error!("failed to read {}: {:?}", key, err);
                None
            }
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| format!("{:?}", err))
    }
}
