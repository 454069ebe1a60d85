//! Record file saving.
//!
//! This module serializes a [`Collection`] to JSON or XML and writes it
//! atomically, optionally keeping a `.bak` copy of the previous file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, error, info};

use super::format::Format;
use super::loader::parse_collection;
use crate::config::Config;
use crate::document::record::{Collection, Record};
use crate::error::StoreError;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

#[derive(Serialize)]
struct XmlDocumentRef<'a> {
    #[serde(rename = "usuario")]
    records: &'a [Record],
}

/// Saves a collection to `path`, replacing its content.
///
/// The document is serialized, parsed back to make sure it reads as the
/// same collection, and only then written. The write goes to a sibling temp
/// file that is renamed over the target, so a failure never leaves a
/// half-written file behind.
///
/// # Errors
///
/// * [`StoreError::Serialization`] if the collection cannot be expressed in
///   `format` (for example an XML root name that is not a valid element name)
/// * [`StoreError::Permission`] if the destination is not writable
/// * [`StoreError::Io`] for other write, backup or rename failures
///
/// # Examples
///
/// ```no_run
/// use userstore::config::Config;
/// use userstore::document::record::{Collection, Record};
/// use userstore::file::format::Format;
/// use userstore::file::saver::save_collection;
///
/// let users = Collection::new(vec![Record::new(1, "Ana", 30)]);
/// save_collection("out.json", &users, Format::Json, &Config::default()).unwrap();
/// ```
pub fn save_collection<P: AsRef<Path>>(
    path: P,
    collection: &Collection,
    format: Format,
    config: &Config,
) -> Result<(), StoreError> {
    let path = path.as_ref();
    let text = serialize_collection(collection, format, config.indent_size)?;

    let reparsed = parse_collection(&text, format).map_err(|message| {
        StoreError::serialization(format!("generated {} does not parse back: {}", format.label(), message))
    })?;
    if reparsed.records() != collection.records() {
        return Err(StoreError::serialization(format!(
            "generated {} does not reproduce the collection",
            format.label()
        )));
    }

    if config.create_backup && path.exists() {
        create_backup(path)?;
    }

    write_file_atomic(path, text.as_bytes())?;
    debug!(path = %path.display(), records = collection.len(), "saved collection");
    Ok(())
}

/// Saves a collection, logging any failure instead of returning it.
///
/// Returns whether the file was written.
pub fn save_or_report<P: AsRef<Path>>(
    path: P,
    collection: &Collection,
    format: Format,
    config: &Config,
) -> bool {
    let path = path.as_ref();
    match save_collection(path, collection, format, config) {
        Ok(()) => {
            info!(path = %path.display(), "data saved");
            true
        }
        Err(err) => {
            error!(path = %path.display(), "could not save data: {}", err);
            false
        }
    }
}

/// Renders a collection as document text.
pub fn serialize_collection(
    collection: &Collection,
    format: Format,
    indent_size: usize,
) -> Result<String, StoreError> {
    match format {
        Format::Json => serialize_json(collection, indent_size),
        Format::Xml => serialize_xml(collection, indent_size),
    }
}

fn serialize_json(collection: &Collection, indent_size: usize) -> Result<String, StoreError> {
    let indent = " ".repeat(indent_size);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    collection
        .serialize(&mut serializer)
        .map_err(|e| StoreError::serialization(e.to_string()))?;

    let mut text = String::from_utf8(buf).map_err(|e| StoreError::serialization(e.to_string()))?;
    text.push('\n');
    Ok(text)
}

fn serialize_xml(collection: &Collection, indent_size: usize) -> Result<String, StoreError> {
    let mut body = String::new();
    let mut serializer = quick_xml::se::Serializer::with_root(&mut body, Some(collection.root()))
        .map_err(|e| StoreError::serialization(e.to_string()))?;
    serializer.indent(' ', indent_size);

    XmlDocumentRef {
        records: collection.records(),
    }
    .serialize(serializer)
    .map_err(|e| StoreError::serialization(e.to_string()))?;

    Ok(format!("{}\n{}\n", XML_DECLARATION, body))
}

/// Creates a backup of a file by copying it with a .bak extension.
fn create_backup(path: &Path) -> Result<(), StoreError> {
    let backup_path = sibling_path(path, "bak")?;
    fs::copy(path, &backup_path).map_err(|e| StoreError::from_io(&backup_path, e))?;
    Ok(())
}

/// Writes data to a temp file next to `path`, then renames it into place.
pub(crate) fn write_file_atomic(path: &Path, data: &[u8]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| StoreError::from_io(parent, e))?;
        }
    }

    let temp_path = sibling_path(path, "tmp")?;
    fs::write(&temp_path, data).map_err(|e| StoreError::from_io(path, e))?;

    if let Err(err) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(StoreError::from_io(path, err));
    }
    Ok(())
}

/// `dir/name.ext` -> `dir/name.ext.<suffix>`
fn sibling_path(path: &Path, suffix: &str) -> Result<PathBuf, StoreError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| StoreError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "invalid file name"),
        })?;
    Ok(path.with_file_name(format!("{}.{}", name, suffix)))
}
