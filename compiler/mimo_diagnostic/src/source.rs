//! Source text registry for snippet capture.

use std::sync::Arc;

use rustc_hash::FxHashMap;

/// Return the 1-based `line` of `source`, without its line terminator.
pub fn line_of(source: &str, line: u32) -> Option<&str> {
    let index = (line as usize).checked_sub(1)?;
    source
        .split('\n')
        .nth(index)
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
}

/// Source texts keyed by file path.
///
/// The interpreter registers every file it lexes here so runtime errors
/// raised later can still quote the offending line.
#[derive(Default, Debug, Clone)]
pub struct SourceMap {
    files: FxHashMap<Arc<str>, Arc<str>>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, file: Arc<str>, source: Arc<str>) {
        self.files.insert(file, source);
    }

    pub fn get(&self, file: &str) -> Option<&str> {
        self.files.get(file).map(AsRef::as_ref)
    }

    /// Fetch a single line of `file`.
    pub fn line(&self, file: &str, line: u32) -> Option<&str> {
        self.get(file).and_then(|source| line_of(source, line))
    }
}

#[cfg(test)]
mod tests;
