//! Line-oriented `key=value` properties parsing.
//!
//! The format is the subset Gradle build scripts read by hand:
//! - blank lines and lines starting with `#` are skipped
//! - every other line is split on the first `=`
//! - key and value are trimmed; lines without `=` are ignored
//! - a repeated key keeps its last value

use std::collections::HashMap;
use std::io::BufRead;

/// Parsed contents of a signing properties file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SigningProperties {
    entries: HashMap<String, String>,
}

impl SigningProperties {
    /// Creates an empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses properties from an in-memory string.
    pub fn parse(content: &str) -> Self {
        Self::from_lines(content.lines())
    }

    /// Parses properties from any sequence of lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut properties = Self::new();
        for line in lines {
            properties.ingest(line.as_ref());
        }
        properties
    }

    /// Parses properties from a buffered reader, one line at a time.
    ///
    /// Stops at the first read error.
    pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut properties = Self::new();
        for line in reader.lines() {
            properties.ingest(&line?);
        }
        Ok(properties)
    }

    fn ingest(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return;
        }

        if let Some((key, value)) = line.split_once('=') {
            self.insert(key.trim(), value.trim());
        }
    }

    /// Inserts a property, replacing any earlier value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Returns the value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SigningProperties {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut properties = Self::new();
        for (key, value) in iter {
            properties.insert(key, value);
        }
        properties
    }
}
