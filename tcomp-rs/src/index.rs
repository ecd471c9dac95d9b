//! Extraction of `<t id>` entries from an XML file.
//!
//! The scan uses quick-xml's streaming API and tracks open elements on
//! its own stack, so mismatched and unclosed tags are reported with the
//! offending file's path.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use rustc_hash::FxHashMap;

use crate::constants::{ENTRY_TAG, ID_ATTR};
use crate::error::{Error, Result};

/// Immutable id → trimmed text mapping built from one input file.
///
/// Entry elements may appear at any depth. The captured text is the
/// content immediately inside the element, up to its first child
/// element. When an id occurs more than once, the last occurrence's
/// text wins; the id itself is counted once.
#[derive(Debug, Clone)]
pub struct FileIndex {
    path: String,
    entries: FxHashMap<String, String>,
}

/// An open element during the scan.
struct Frame {
    name: String,
    capture: Option<Capture>,
}

/// Pending entry text for an open `<t id>` element.
struct Capture {
    id: String,
    text: String,
    /// Set once a child element is seen; text after that point belongs
    /// to the child's tail, not to this entry.
    sealed: bool,
}

impl FileIndex {
    /// Builds an index from an XML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<FileIndex> {
        let display = path.as_ref().display().to_string();
        let file = File::open(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::NotFound(display.clone()),
            _ => Error::Io(e),
        })?;
        let mut reader = Reader::from_reader(BufReader::new(file));
        Self::scan(&mut reader, display)
    }

    /// Builds an index from an XML string.
    pub fn from_xml(xml: &str) -> Result<FileIndex> {
        let mut reader = Reader::from_str(xml);
        Self::scan(&mut reader, "<string>".to_string())
    }

    fn scan<R: BufRead>(reader: &mut Reader<R>, path: String) -> Result<FileIndex> {
        let mut entries = FxHashMap::default();
        let mut stack: Vec<Frame> = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    seal_open_capture(&mut stack);
                    let name = decode_name(e, reader, &path)?;
                    let capture = if name == ENTRY_TAG {
                        entry_id(e, reader, &path)?.map(|id| Capture {
                            id,
                            text: String::new(),
                            sealed: false,
                        })
                    } else {
                        None
                    };
                    stack.push(Frame { name, capture });
                }
                Ok(Event::End(ref e)) => {
                    let name = reader
                        .decoder()
                        .decode(e.name().as_ref())
                        .map_err(|err| parse_error(&path, err.to_string()))?
                        .to_string();
                    let frame = stack.pop().ok_or_else(|| {
                        parse_error(&path, format!("unexpected closing tag </{}>", name))
                    })?;
                    if frame.name != name {
                        return Err(parse_error(
                            &path,
                            format!(
                                "mismatched closing tag </{}>, expected </{}>",
                                name, frame.name
                            ),
                        ));
                    }
                    if let Some(capture) = frame.capture {
                        entries.insert(capture.id, capture.text.trim().to_string());
                    }
                }
                Ok(Event::Empty(ref e)) => {
                    seal_open_capture(&mut stack);
                    let name = decode_name(e, reader, &path)?;
                    if name == ENTRY_TAG {
                        if let Some(id) = entry_id(e, reader, &path)? {
                            entries.insert(id, String::new());
                        }
                    }
                }
                Ok(Event::Text(e)) => {
                    let raw = std::str::from_utf8(e.as_ref())
                        .map_err(|err| parse_error(&path, err.to_string()))?;
                    let text =
                        unescape(raw).map_err(|err| parse_error(&path, err.to_string()))?;
                    if let Some(capture) = open_capture(&mut stack) {
                        capture.text.push_str(&text);
                    }
                }
                Ok(Event::CData(ref e)) => {
                    let text = String::from_utf8_lossy(e.as_ref());
                    if let Some(capture) = open_capture(&mut stack) {
                        capture.text.push_str(&text);
                    }
                }
                Ok(Event::Eof) => {
                    if let Some(frame) = stack.last() {
                        return Err(parse_error(
                            &path,
                            format!("unexpected end of file: <{}> is never closed", frame.name),
                        ));
                    }
                    break;
                }
                Ok(Event::Comment(_))
                | Ok(Event::Decl(_))
                | Ok(Event::PI(_))
                | Ok(Event::DocType(_)) => {}
                Err(e) => return Err(parse_error(&path, e.to_string())),
            }
            buf.clear();
        }

        Ok(FileIndex { path, entries })
    }

    /// Path the index was built from.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Number of distinct ids in the file.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the file contained no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Trimmed text for an id, if present.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    /// Returns true if the id occurs in the file.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Iterator over all ids, in arbitrary order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Builds an index from an XML file.
pub fn index_file<P: AsRef<Path>>(path: P) -> Result<FileIndex> {
    FileIndex::from_file(path)
}

fn parse_error(path: &str, detail: impl Into<String>) -> Error {
    Error::Parse {
        path: path.to_string(),
        detail: detail.into(),
    }
}

fn seal_open_capture(stack: &mut [Frame]) {
    if let Some(capture) = stack.last_mut().and_then(|f| f.capture.as_mut()) {
        capture.sealed = true;
    }
}

fn open_capture(stack: &mut [Frame]) -> Option<&mut Capture> {
    stack
        .last_mut()
        .and_then(|f| f.capture.as_mut())
        .filter(|c| !c.sealed)
}

fn decode_name<R: BufRead>(e: &BytesStart, reader: &Reader<R>, path: &str) -> Result<String> {
    Ok(reader
        .decoder()
        .decode(e.name().as_ref())
        .map_err(|err| parse_error(path, err.to_string()))?
        .to_string())
}

/// Extracts a non-empty id attribute from an entry element.
fn entry_id<R: BufRead>(e: &BytesStart, reader: &Reader<R>, path: &str) -> Result<Option<String>> {
    for attr_result in e.attributes() {
        let attr =
            attr_result.map_err(|err| parse_error(path, format!("attribute error: {}", err)))?;
        let key = reader
            .decoder()
            .decode(attr.key.as_ref())
            .map_err(|err| parse_error(path, err.to_string()))?;
        if key == ID_ATTR {
            let value = attr
                .unescape_value()
                .map_err(|err| parse_error(path, err.to_string()))?;
            if value.is_empty() {
                return Ok(None);
            }
            return Ok(Some(value.to_string()));
        }
    }
    Ok(None)
}
