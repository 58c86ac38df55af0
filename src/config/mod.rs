mod store;
mod validate;

pub use store::SettingsStore;
pub use validate::Validate;
