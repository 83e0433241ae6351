//! Reader for compiled AL application packages.
//!
//! A `.app` package is a zip container; the object metadata this crate
//! indexes lives in a single `SymbolReference.json` entry. Everything else
//! in the archive (media, source, permission sets) is ignored.

use crate::error::{LoadError, Result};
use alscope_api::ObjectType;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

pub const SYMBOL_MANIFEST: &str = "SymbolReference.json";

/// One object declaration inside a package manifest. Unknown manifest
/// fields are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObjectEntry {
    pub id: u32,
    pub name: String,
}

/// The parsed symbol manifest of one package.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SymbolReference {
    pub name: String,
    pub publisher: String,
    pub version: String,
    pub tables: Vec<ObjectEntry>,
    pub pages: Vec<ObjectEntry>,
    pub codeunits: Vec<ObjectEntry>,
    pub reports: Vec<ObjectEntry>,
    pub queries: Vec<ObjectEntry>,
    pub xml_ports: Vec<ObjectEntry>,
    pub enum_types: Vec<ObjectEntry>,
}

impl SymbolReference {
    /// Every declared object with its category, in manifest order.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectType, &ObjectEntry)> {
        [
            (ObjectType::Table, &self.tables),
            (ObjectType::Page, &self.pages),
            (ObjectType::Codeunit, &self.codeunits),
            (ObjectType::Report, &self.reports),
            (ObjectType::Query, &self.queries),
            (ObjectType::XmlPort, &self.xml_ports),
            (ObjectType::Enum, &self.enum_types),
        ]
        .into_iter()
        .flat_map(|(object_type, entries)| entries.iter().map(move |entry| (object_type, entry)))
    }
}

/// Read and parse the symbol manifest out of the package at `path`.
pub fn read_symbol_reference(path: &Path) -> Result<SymbolReference> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)?;
    let mut entry = archive.by_name(SYMBOL_MANIFEST).map_err(|_| {
        LoadError::Package(format!(
            "{} has no {} entry",
            path.display(),
            SYMBOL_MANIFEST
        ))
    })?;

    let mut raw = String::new();
    entry.read_to_string(&mut raw)?;
    // Some compiler versions emit the manifest with a UTF-8 BOM.
    let raw = raw.trim_start_matches('\u{feff}');

    Ok(serde_json::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_package(path: &Path, manifest: &str) {
        let file = File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file(SYMBOL_MANIFEST, options).unwrap();
        zip.write_all(manifest.as_bytes()).unwrap();
        zip.finish().unwrap();
    }

    #[test]
    fn parses_manifest_with_bom() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("base.app");
        write_package(
            &path,
            "\u{feff}{\"Name\":\"Base\",\"Tables\":[{\"Id\":18,\"Name\":\"Customer\"}]}",
        );

        let reference = read_symbol_reference(&path).unwrap();
        assert_eq!(reference.name, "Base");
        let objects: Vec<_> = reference.objects().collect();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].0, ObjectType::Table);
        assert_eq!(objects[0].1.name, "Customer");
    }

    #[test]
    fn missing_manifest_is_a_package_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.app");
        let file = File::create(&path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        zip.start_file("navigation.json", zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.finish().unwrap();

        assert!(matches!(
            read_symbol_reference(&path),
            Err(LoadError::Package(_))
        ));
    }

    #[test]
    fn garbage_bytes_are_a_package_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corrupt.app");
        std::fs::write(&path, b"not a zip at all").unwrap();

        assert!(matches!(
            read_symbol_reference(&path),
            Err(LoadError::Package(_))
        ));
    }
}
