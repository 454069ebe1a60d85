use std::fs;

use tempfile::tempdir;
use userstore::config::Config;
use userstore::document::record::Record;
use userstore::file::bootstrap::{bootstrap, ensure_destination, BootstrapOutcome};
use userstore::file::format::Format;
use userstore::file::loader::load_collection;

const JSON_TEMPLATE: &str =
    r#"{"usuarios":[{"id":1,"nombre":"Ana","edad":30},{"id":2,"nombre":"Luis","edad":25}]}"#;

const XML_TEMPLATE: &str = "<?xml version='1.0' encoding='utf-8'?>\n<usuarios><usuario><id>1</id><nombre>Ana</nombre><edad>30</edad></usuario></usuarios>";

#[test]
fn test_bootstrap_json_reserializes() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("orig.json");
    let dest = dir.path().join("datos.json");
    fs::write(&source, JSON_TEMPLATE).unwrap();

    bootstrap(&source, &dest, Format::Json, &Config::default()).unwrap();

    let content = fs::read_to_string(&dest).unwrap();
    assert_ne!(content, JSON_TEMPLATE);
    assert!(content.starts_with("{\n    \"usuarios\": ["));
    let users = load_collection(&dest, Format::Json).unwrap();
    assert_eq!(
        users.records(),
        &[Record::new(1, "Ana", 30), Record::new(2, "Luis", 25)]
    );
}

#[test]
fn test_bootstrap_xml_copies_verbatim() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("orig.xml");
    let dest = dir.path().join("out").join("datos.xml");
    fs::write(&source, XML_TEMPLATE).unwrap();

    bootstrap(&source, &dest, Format::Xml, &Config::default()).unwrap();

    assert_eq!(fs::read_to_string(&dest).unwrap(), XML_TEMPLATE);
}

#[test]
fn test_ensure_destination_copies_when_missing() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("orig.json");
    let dest = dir.path().join("datos.json");
    fs::write(&source, JSON_TEMPLATE).unwrap();

    let outcome = ensure_destination(&source, &dest, Format::Json, &Config::default(), false);

    assert_eq!(outcome, BootstrapOutcome::Copied);
    assert_eq!(load_collection(&dest, Format::Json).unwrap().len(), 2);
}

#[test]
fn test_ensure_destination_keeps_valid_file() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("orig.json");
    let dest = dir.path().join("datos.json");
    fs::write(&source, JSON_TEMPLATE).unwrap();
    fs::write(&dest, r#"{"usuarios":[{"id":9,"nombre":"Eva","edad":50}]}"#).unwrap();

    let outcome = ensure_destination(&source, &dest, Format::Json, &Config::default(), false);

    assert_eq!(outcome, BootstrapOutcome::Existing);
    let users = load_collection(&dest, Format::Json).unwrap();
    assert_eq!(users.records(), &[Record::new(9, "Eva", 50)]);
}

#[test]
fn test_ensure_destination_replaces_broken_file() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("orig.xml");
    let dest = dir.path().join("datos.xml");
    fs::write(&source, XML_TEMPLATE).unwrap();
    fs::write(&dest, "<usuarios><usuario>").unwrap();

    let outcome = ensure_destination(&source, &dest, Format::Xml, &Config::default(), false);

    assert_eq!(outcome, BootstrapOutcome::Copied);
    assert_eq!(fs::read_to_string(&dest).unwrap(), XML_TEMPLATE);
}

#[test]
fn test_ensure_destination_force_resets() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("orig.json");
    let dest = dir.path().join("datos.json");
    fs::write(&source, JSON_TEMPLATE).unwrap();
    fs::write(&dest, r#"{"usuarios":[]}"#).unwrap();

    let outcome = ensure_destination(&source, &dest, Format::Json, &Config::default(), true);

    assert_eq!(outcome, BootstrapOutcome::Copied);
    assert_eq!(load_collection(&dest, Format::Json).unwrap().len(), 2);
}

#[test]
fn test_ensure_destination_missing_source_leaves_destination() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("absent.json");
    let dest = dir.path().join("datos.json");
    fs::write(&dest, "not json").unwrap();

    let outcome = ensure_destination(&source, &dest, Format::Json, &Config::default(), false);

    assert_eq!(outcome, BootstrapOutcome::Failed);
    assert_eq!(fs::read_to_string(&dest).unwrap(), "not json");
}

#[test]
fn test_ensure_destination_malformed_json_source() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("orig.json");
    let dest = dir.path().join("datos.json");
    fs::write(&source, r#"{"usuarios": [{"id": 1, "nombre": "Ana"}]}"#).unwrap();

    let outcome = ensure_destination(&source, &dest, Format::Json, &Config::default(), false);

    assert_eq!(outcome, BootstrapOutcome::Failed);
    assert!(!dest.exists());
}
