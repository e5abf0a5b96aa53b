//! Configuration access port trait.

/// Section/key access to a configuration source.
///
/// Typed getters return `Ok(None)` for an absent key and `Err(raw)` with the
/// offending text when the key is present but cannot be read as that type.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_number(&self, section: &str, key: &str) -> Result<Option<f64>, String>;
    fn get_flag(&self, section: &str, key: &str) -> Result<Option<bool>, String>;
}
