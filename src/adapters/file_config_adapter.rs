//! INI file configuration adapter.
//!
//! Section and key names are case-insensitive. Values are trimmed before
//! typed parsing; a present value that does not parse is reported back to
//! the caller with its raw text rather than replaced by a default.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    fn typed<T>(
        &self,
        section: &str,
        key: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<Option<T>, String> {
        match self.config.get(section, key) {
            None => Ok(None),
            Some(raw) => parse(raw.trim()).map(Some).ok_or(raw),
        }
    }
}

fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok()
}

fn parse_flag(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_number(&self, section: &str, key: &str) -> Result<Option<f64>, String> {
        self.typed(section, key, parse_number)
    }

    fn get_flag(&self, section: &str, key: &str) -> Result<Option<bool>, String> {
        self.typed(section, key, parse_flag)
    }
}
