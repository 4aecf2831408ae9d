//! Registry of dialect resolvers, keyed by dialect name.

use crate::catalog::DialectFile;
use crate::dialect::Dialect;
use crate::error::{Error, Result};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct DialectsLibrary {
    dialects: HashMap<String, Dialect>,
}

impl DialectsLibrary {
    /// Build a resolver per catalog. A later catalog replaces an earlier one
    /// with the same name.
    pub fn new(files: impl IntoIterator<Item = DialectFile>) -> Self {
        let dialects = files
            .into_iter()
            .map(|file| (file.name.clone(), Dialect::new(file)))
            .collect();
        Self { dialects }
    }

    /// Like [`DialectsLibrary::new`], validating every catalog first.
    pub fn try_new(files: impl IntoIterator<Item = DialectFile>) -> Result<Self> {
        let dialects = files
            .into_iter()
            .map(|file| Ok((file.name.clone(), Dialect::try_new(file)?)))
            .collect::<Result<_>>()?;
        Ok(Self { dialects })
    }

    /// Resolver for a dialect name.
    pub fn get(&self, name: &str) -> Result<&Dialect> {
        self.dialects
            .get(name)
            .ok_or_else(|| Error::unknown_dialect(name))
    }

    /// Registered dialect names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.dialects.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dialect> {
        self.dialects.values()
    }

    pub fn len(&self) -> usize {
        self.dialects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dialects.is_empty()
    }
}

impl FromIterator<DialectFile> for DialectsLibrary {
    fn from_iter<T: IntoIterator<Item = DialectFile>>(iter: T) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DialectFunction;

    #[test]
    fn lookup_by_name() {
        let library: DialectsLibrary = [
            DialectFile::new("sqlite", "sql"),
            DialectFile::new("postgres", "sql"),
        ]
        .into_iter()
        .collect();

        assert_eq!(library.len(), 2);
        assert_eq!(library.names(), vec!["postgres", "sqlite"]);
        assert_eq!(library.get("sqlite").map(Dialect::name), Ok("sqlite"));
        assert_eq!(
            library.get("oracle").map(Dialect::name),
            Err(Error::unknown_dialect("oracle"))
        );
    }

    #[test]
    fn later_catalog_replaces_earlier() {
        let library = DialectsLibrary::new([
            DialectFile::new("duckdb", "sql"),
            DialectFile::new("duckdb", "sql")
                .with_scalar(DialectFunction::scalar("abs", "ABS").with_kernel(["i8"], "i8")),
        ]);
        assert_eq!(library.len(), 1);
        let duckdb = library.get("duckdb").expect("duckdb registered");
        assert!(duckdb.function("abs").is_some());
    }

    #[test]
    fn try_new_rejects_invalid_catalogs() {
        let result = DialectsLibrary::try_new([DialectFile::new("sqlite", "sql")
            .with_scalar(DialectFunction::scalar("", "ABS"))]);
        assert!(matches!(result, Err(Error::InvalidCatalog { .. })));
        assert!(DialectsLibrary::default().is_empty());
    }
}
