use indexmap::IndexMap;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

use crate::escape::escape_value;
use crate::parser::{ParsedEntry, SkippedEntry, parse_vars};
use nest_error::{NestError, Result};

/// Ordered variable store backing an assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VarStore {
    vars: IndexMap<String, String>,
}

impl VarStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from parsed entries. The last value of a repeated key
    /// wins; the key keeps its first position. Skipped entries are returned.
    pub fn from_entries(
        entries: impl IntoIterator<Item = ParsedEntry>,
    ) -> (Self, Vec<SkippedEntry>) {
        let mut store = Self::new();
        let mut skipped = Vec::new();
        for entry in entries {
            match entry {
                ParsedEntry::Var { key, value } => {
                    store.vars.insert(key, value);
                }
                ParsedEntry::Skipped(entry) => skipped.push(entry),
            }
        }
        (store, skipped)
    }

    pub fn parse(text: impl AsRef<[u8]>) -> (Self, Vec<SkippedEntry>) {
        Self::from_entries(parse_vars(text))
    }

    /// Replaces the content with the variables in `path`.
    ///
    /// A missing file leaves the store empty. Malformed entries are dropped
    /// and returned; the rest of the file is still applied.
    pub fn load(&mut self, path: &Path) -> Result<Vec<SkippedEntry>> {
        let content = match fs::read(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                nest_logger::debug(&format!("No var file at {}", path.display()));
                self.vars.clear();
                return Ok(Vec::new());
            }
            Err(e) => return Err(NestError::VarFileRead(path.to_path_buf(), e)),
        };

        let (parsed, skipped) = Self::parse(content);
        for entry in &skipped {
            nest_logger::debug(&format!(
                "Skipping malformed entry in {} ({entry})",
                path.display()
            ));
        }

        *self = parsed;
        Ok(skipped)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let write = || -> io::Result<()> {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                nest_utils::ensure_dir_exists(parent)?;
            }
            fs::write(path, self.to_var_text())
        };

        write().map_err(|e| NestError::VarFileWrite(path.to_path_buf(), e))
    }

    /// Serialized form, one `key = "value";` line per variable.
    #[must_use]
    pub fn to_var_text(&self) -> String {
        self.vars
            .iter()
            .map(|(key, value)| format!("{key} = {};\n", escape_value(value)))
            .collect()
    }

    /// Value of `key`, empty when absent.
    #[must_use]
    pub fn get(&self, key: &str) -> &str {
        self.vars.get(key).map_or("", String::as_str)
    }

    #[must_use]
    pub fn get_opt(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.vars.shift_remove(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SkipReason;

    fn sample() -> VarStore {
        let mut store = VarStore::new();
        store.set("UPP", "/proj/a:/proj/b");
        store.set("OUTPUT", "/tmp/out dir");
        store.set("FLAGS", "-DNAME=\"x\"\t\\n");
        store.set("EMPTY", "");
        store
    }

    #[test]
    fn test_get_absent_is_empty() {
        let store = VarStore::new();
        assert_eq!(store.get("MISSING"), "");
        assert_eq!(store.get_opt("MISSING"), None);
    }

    #[test]
    fn test_set_upserts_in_place() {
        let mut store = sample();
        store.set("UPP", "/other");
        assert_eq!(store.get("UPP"), "/other");
        assert_eq!(store.iter().next(), Some(("UPP", "/other")));
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_last_write_wins() {
        let (store, skipped) = VarStore::parse("A = \"1\";\nB = \"2\";\nA = \"3\";\n");
        assert!(skipped.is_empty());
        assert_eq!(store.get("A"), "3");
        assert_eq!(store.len(), 2);
        assert_eq!(store.iter().map(|(k, _)| k).collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn test_text_round_trip() {
        let store = sample();
        let (parsed, skipped) = VarStore::parse(store.to_var_text());
        assert!(skipped.is_empty());
        assert_eq!(parsed, store);
    }

    #[test]
    fn test_save_load_round_trip() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("cfg").join("default.var");

        let store = sample();
        store.save(&path)?;

        let mut loaded = VarStore::new();
        let skipped = loaded.load(&path)?;
        assert!(skipped.is_empty());
        assert_eq!(loaded, store);
        Ok(())
    }

    #[test]
    fn test_writer_emits_quoted_form() {
        let mut store = VarStore::new();
        store.set("OUTPUT", "/tmp/out");
        assert_eq!(store.to_var_text(), "OUTPUT = \"/tmp/out\";\n");
    }

    #[test]
    fn test_load_missing_file_is_empty() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let mut store = sample();
        let skipped = store.load(&tmp.path().join("nope.var"))?;
        assert!(skipped.is_empty());
        assert!(store.is_empty());
        Ok(())
    }

    #[test]
    fn test_load_keeps_good_entries() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("broken.var");
        fs::write(&path, "UPP = \"/a\";\n= oops;\nOUTPUT = /out;\n")?;

        let mut store = VarStore::new();
        let skipped = store.load(&path)?;
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped.first().map(|s| s.reason), Some(SkipReason::MissingIdentifier));
        assert_eq!(store.get("UPP"), "/a");
        assert_eq!(store.get("OUTPUT"), "/out");
        Ok(())
    }

    #[test]
    fn test_load_directory_is_error() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let mut store = VarStore::new();
        assert!(matches!(
            store.load(tmp.path()),
            Err(NestError::VarFileRead(..))
        ));
        Ok(())
    }

    #[test]
    fn test_remove() {
        let mut store = sample();
        assert_eq!(store.remove("OUTPUT").as_deref(), Some("/tmp/out dir"));
        assert!(!store.contains("OUTPUT"));
        assert_eq!(store.remove("OUTPUT"), None);
    }

    #[test]
    fn test_serializes_as_object() -> std::result::Result<(), serde_json::Error> {
        let mut store = VarStore::new();
        store.set("B", "2");
        store.set("A", "1");
        assert_eq!(serde_json::to_string(&store)?, r#"{"B":"2","A":"1"}"#);
        Ok(())
    }
}
