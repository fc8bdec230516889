//! Configuration access port trait.

/// Sectioned key/value configuration. Values are returned raw; numeric
/// parsing and validation happen in `domain::config_validation`.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
}
