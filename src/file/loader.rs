//! Record file loading.
//!
//! This module reads a JSON or XML document from disk and turns it into a
//! typed [`Collection`]. Required fields are checked while parsing, so a
//! record without `edad` is reported as a parse error naming the field.

use std::fs;
use std::io;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, error};

use super::format::Format;
use crate::document::record::{Collection, Record};
use crate::error::StoreError;

/// Element holding one record inside the XML root.
const RECORD_ELEMENT: &str = "usuario";

/// Loads and parses a record file.
///
/// # Errors
///
/// * [`StoreError::FileNotFound`] if `path` does not exist
/// * [`StoreError::Permission`] if it cannot be read
/// * [`StoreError::Parse`] if the content is empty, malformed, or a record
///   lacks `id`, `nombre` or `edad`
/// * [`StoreError::Io`] for anything else
///
/// # Examples
///
/// ```no_run
/// use userstore::file::format::Format;
/// use userstore::file::loader::load_collection;
///
/// let users = load_collection("data/datos_usuarios.json", Format::Json).unwrap();
/// println!("{} users", users.len());
/// ```
pub fn load_collection<P: AsRef<Path>>(path: P, format: Format) -> Result<Collection, StoreError> {
    let path = path.as_ref();
    let content = read_text(path)?;
    let collection = parse_collection(&content, format).map_err(|message| StoreError::parse(path, message))?;

    debug!(path = %path.display(), records = collection.len(), "loaded collection");
    Ok(collection)
}

/// Loads a record file, logging any failure instead of returning it.
///
/// Returns `None` when the file is missing, unreadable or malformed.
pub fn load_or_report<P: AsRef<Path>>(path: P, format: Format) -> Option<Collection> {
    let path = path.as_ref();
    match load_collection(path, format) {
        Ok(collection) => Some(collection),
        Err(err) => {
            error!(path = %path.display(), "could not load data: {}", err);
            None
        }
    }
}

/// Parses document text in the given format.
///
/// The error is a human-readable description; callers attach the path.
pub fn parse_collection(content: &str, format: Format) -> Result<Collection, String> {
    if content.trim().is_empty() {
        return Err("the document is empty".to_string());
    }

    match format {
        Format::Json => serde_json::from_str::<Collection>(content).map_err(|e| e.to_string()),
        Format::Xml => parse_xml(content),
    }
}

/// Walks the XML events, collecting every `usuario` child of the root.
///
/// Other children of the root are skipped, as are unknown elements inside a
/// `usuario`. Leaf text is kept exactly as written; only `id` and `edad` are
/// trimmed before being read as integers.
fn parse_xml(content: &str) -> Result<Collection, String> {
    let mut reader = Reader::from_str(content);

    let root = loop {
        match next_event(&mut reader)? {
            Event::Start(e) => break element_name(&e),
            Event::Empty(e) => {
                finish_document(&mut reader)?;
                return Ok(Collection::with_root(element_name(&e)));
            }
            Event::Eof => return Err("the document has no root element".to_string()),
            _ => {}
        }
    };

    let mut records = Vec::new();
    loop {
        match next_event(&mut reader)? {
            Event::Start(e) if e.name().as_ref() == RECORD_ELEMENT.as_bytes() => {
                records.push(read_record(&mut reader)?);
            }
            Event::Start(e) => {
                reader.read_to_end(e.name()).map_err(|err| xml_error(&reader, err))?;
            }
            Event::End(_) => break,
            Event::Eof => return Err(format!("unexpected end of document inside <{}>", root)),
            _ => {}
        }
    }
    finish_document(&mut reader)?;

    let mut collection = Collection::new(records);
    collection.set_root(root);
    Ok(collection)
}

/// Reads the children of a `usuario` element up to its end tag.
fn read_record(reader: &mut Reader<&[u8]>) -> Result<Record, String> {
    let mut id = None;
    let mut name = None;
    let mut age = None;

    loop {
        let (field, text) = match next_event(reader)? {
            Event::Start(e) => {
                let field = element_name(&e);
                let text = read_leaf_text(reader, &field)?;
                (field, text)
            }
            Event::Empty(e) => (element_name(&e), String::new()),
            Event::End(_) => break,
            Event::Eof => return Err(format!("unexpected end of document inside <{}>", RECORD_ELEMENT)),
            _ => continue,
        };

        // First occurrence wins, like an element lookup by name.
        let slot = match field.as_str() {
            "id" => &mut id,
            "nombre" => &mut name,
            "edad" => &mut age,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(text);
        }
    }

    Ok(Record {
        id: parse_int("id", id)?,
        name: name.ok_or_else(|| "missing field `nombre`".to_string())?,
        age: parse_int("edad", age)?,
    })
}

/// Collects the text of a leaf element without trimming it.
fn read_leaf_text(reader: &mut Reader<&[u8]>, field: &str) -> Result<String, String> {
    let mut text = String::new();
    loop {
        match next_event(reader)? {
            Event::Text(t) => text.push_str(&t.unescape().map_err(|err| xml_error(reader, err))?),
            Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c.into_inner())),
            Event::End(_) => return Ok(text),
            Event::Start(e) | Event::Empty(e) => {
                return Err(format!(
                    "unexpected element <{}> inside <{}>",
                    element_name(&e),
                    field
                ))
            }
            Event::Eof => return Err(format!("unexpected end of document inside <{}>", field)),
            _ => {}
        }
    }
}

fn parse_int(field: &str, text: Option<String>) -> Result<i64, String> {
    let text = text.ok_or_else(|| format!("missing field `{}`", field))?;
    text.trim()
        .parse()
        .map_err(|_| format!("invalid value for `{}`: {:?} is not an integer", field, text))
}

/// Consumes whatever follows the root so trailing garbage is still reported.
fn finish_document(reader: &mut Reader<&[u8]>) -> Result<(), String> {
    loop {
        match next_event(reader)? {
            Event::Eof => return Ok(()),
            Event::Start(e) | Event::Empty(e) => {
                return Err(format!(
                    "unexpected element <{}> after the root element",
                    element_name(&e)
                ))
            }
            _ => {}
        }
    }
}

fn next_event<'i>(reader: &mut Reader<&'i [u8]>) -> Result<Event<'i>, String> {
    match reader.read_event() {
        Ok(event) => Ok(event),
        Err(err) => Err(xml_error(reader, err)),
    }
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn xml_error(reader: &Reader<&[u8]>, err: quick_xml::Error) -> String {
    format!("error at position {}: {}", reader.error_position(), err)
}

/// Reads a whole file as UTF-8 text.
pub(crate) fn read_text(path: &Path) -> Result<String, StoreError> {
    fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::InvalidData => StoreError::parse(path, "the file is not valid UTF-8"),
        _ => StoreError::from_io(path, err),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_two_records() {
        let content = r#"{"usuarios":[{"id":1,"nombre":"Ana","edad":30},{"id":2,"nombre":"Luis","edad":25}]}"#;
        let users = parse_collection(content, Format::Json).unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users.records()[0], Record::new(1, "Ana", 30));
        assert_eq!(users.records()[1], Record::new(2, "Luis", 25));
    }

    #[test]
    fn test_parse_json_malformed() {
        let result = parse_collection(r#"{"usuarios": [ {"id": 1,"#, Format::Json);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_json_wrong_type() {
        let result = parse_collection(
            r#"{"usuarios":[{"id":"uno","nombre":"Ana","edad":30}]}"#,
            Format::Json,
        );
        assert!(result.unwrap_err().contains("invalid type"));
    }

    #[test]
    fn test_parse_empty_document() {
        assert_eq!(
            parse_collection("  \n", Format::Xml).unwrap_err(),
            "the document is empty"
        );
        assert!(parse_collection("", Format::Json).is_err());
    }

    #[test]
    fn test_parse_xml_records() {
        let content = r#"<?xml version="1.0" encoding="UTF-8"?>
<usuarios>
    <usuario>
        <id>1</id>
        <nombre>Ana</nombre>
        <edad>30</edad>
    </usuario>
    <usuario>
        <id>2</id>
        <nombre>Luis</nombre>
        <edad>25</edad>
    </usuario>
</usuarios>
"#;
        let users = parse_collection(content, Format::Xml).unwrap();

        assert_eq!(users.root(), "usuarios");
        assert_eq!(
            users.records(),
            &[Record::new(1, "Ana", 30), Record::new(2, "Luis", 25)]
        );
    }

    #[test]
    fn test_parse_xml_keeps_custom_root() {
        let content = "<personas><usuario><id>9</id><nombre>Eva</nombre><edad>50</edad></usuario></personas>";
        let users = parse_collection(content, Format::Xml).unwrap();

        assert_eq!(users.root(), "personas");
        assert_eq!(users.len(), 1);
    }

    #[test]
    fn test_parse_xml_empty_root() {
        let users = parse_collection("<usuarios/>", Format::Xml).unwrap();
        assert!(users.is_empty());
        assert_eq!(users.root(), "usuarios");
    }

    #[test]
    fn test_parse_xml_missing_field() {
        let content = "<usuarios><usuario><id>1</id><nombre>Ana</nombre></usuario></usuarios>";
        let err = parse_collection(content, Format::Xml).unwrap_err();
        assert!(err.contains("edad"), "unexpected error: {}", err);
    }

    #[test]
    fn test_parse_xml_skips_declaration_and_comments() {
        let content = "<?xml version=\"1.0\"?>\n<!-- c -->\n<usuarios><!-- none yet --></usuarios>";
        let users = parse_collection(content, Format::Xml).unwrap();
        assert!(users.is_empty());
        assert_eq!(users.root(), "usuarios");
    }

    #[test]
    fn test_parse_xml_rejects_text() {
        assert!(parse_collection("just some text", Format::Xml).is_err());
    }

    #[test]
    fn test_parse_xml_keeps_leaf_whitespace() {
        let content = "<usuarios><usuario><id> 1 </id><nombre> Ana </nombre><edad>30</edad></usuario></usuarios>";
        let users = parse_collection(content, Format::Xml).unwrap();
        assert_eq!(users.records(), &[Record::new(1, " Ana ", 30)]);
    }

    #[test]
    fn test_parse_xml_skips_interleaved_elements() {
        let content = "<usuarios>\
<usuario><id>1</id><nombre>Ana</nombre><edad>30</edad></usuario>\
<nota>x</nota>\
<usuario><id>2</id><nombre>Luis</nombre><edad>25</edad><extra><a/></extra></usuario>\
</usuarios>";
        let users = parse_collection(content, Format::Xml).unwrap();
        assert_eq!(
            users.records(),
            &[Record::new(1, "Ana", 30), Record::new(2, "Luis", 25)]
        );
    }

    #[test]
    fn test_parse_xml_entities_and_cdata() {
        let content = "<usuarios><usuario><id>1</id><nombre>Ana &amp; <![CDATA[<Luis>]]></nombre><edad>30</edad></usuario></usuarios>";
        let users = parse_collection(content, Format::Xml).unwrap();
        assert_eq!(users.records()[0].name, "Ana & <Luis>");
    }

    #[test]
    fn test_parse_xml_bad_integer() {
        let content = "<usuarios><usuario><id>uno</id><nombre>Ana</nombre><edad>30</edad></usuario></usuarios>";
        let err = parse_collection(content, Format::Xml).unwrap_err();
        assert!(err.contains("`id`"), "unexpected error: {}", err);
    }

    #[test]
    fn test_parse_xml_mismatched_end_tag() {
        let content = "<usuarios><usuario><id>1</id></usuarios>";
        assert!(parse_collection(content, Format::Xml).is_err());
    }
}
