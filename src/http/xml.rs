use std::fmt::Display;

use indexmap::IndexMap;
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::{
    error::{RequestMapError, Result},
    http::body::{BodyDecoder, BodyFormat},
    value::Value,
};

/// Deepest element nesting accepted, mirroring serde_json's recursion limit.
pub const MAX_XML_DEPTH: usize = 128;

fn xml_err(e: impl Display) -> RequestMapError {
    RequestMapError::BodyDecode {
        format: BodyFormat::Xml,
        message: e.to_string(),
    }
}

/// Decodes an XML document into the root element's fields.
///
/// Attributes and child elements become fields in document order; a repeated
/// child name collects its values into a `Value::List`. Elements without
/// fields become their text.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlBodyDecoder;

struct Element {
    name: String,
    fields: IndexMap<String, Value>,
    text: String,
}

impl Element {
    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut fields = IndexMap::new();
        for attr in start.attributes() {
            let attr = attr.map_err(xml_err)?;
            let key = attr.key.as_ref();
            if key == b"xmlns" || key.starts_with(b"xmlns:") {
                continue;
            }
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr.unescape_value().map_err(xml_err)?.into_owned();
            insert_field(&mut fields, key, Value::Text(value));
        }
        Ok(Self {
            name,
            fields,
            text: String::new(),
        })
    }

    fn into_value(self) -> Value {
        if self.fields.is_empty() {
            Value::Text(self.text)
        } else {
            Value::Map(self.fields)
        }
    }
}

// 同名元素重复出现时合并成列表
fn insert_field(fields: &mut IndexMap<String, Value>, name: String, value: Value) {
    match fields.get_mut(&name) {
        Some(Value::List(items)) => items.push(value),
        Some(existing) => {
            let first = std::mem::take(existing);
            *existing = Value::List(vec![first, value]);
        }
        None => {
            fields.insert(name, value);
        }
    }
}

/// Attaches a finished element to its parent, or returns it as the root.
fn close(stack: &mut [Element], mut element: Element) -> Option<Element> {
    match stack.last_mut() {
        Some(parent) => {
            let name = std::mem::take(&mut element.name);
            insert_field(&mut parent.fields, name, element.into_value());
            None
        }
        None => Some(element),
    }
}

impl BodyDecoder for XmlBodyDecoder {
    fn decode(&self, body: &[u8]) -> Result<Option<IndexMap<String, Value>>> {
        let mut reader = Reader::from_reader(body);
        let mut stack: Vec<Element> = Vec::new();
        let mut root = None;

        loop {
            match reader.read_event().map_err(xml_err)? {
                Event::Start(e) => {
                    if stack.len() >= MAX_XML_DEPTH {
                        return Err(xml_err(format!("nesting deeper than {}", MAX_XML_DEPTH)));
                    }
                    stack.push(Element::open(&e)?);
                }
                Event::Empty(e) => {
                    let element = Element::open(&e)?;
                    root = root.or(close(&mut stack, element));
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| xml_err("unexpected closing tag"))?;
                    root = root.or(close(&mut stack, element));
                }
                Event::Text(t) => {
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&t.unescape().map_err(xml_err)?);
                    }
                }
                Event::CData(c) => {
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(xml_err("unclosed element"));
        }
        let root = root.ok_or_else(|| xml_err("no root element"))?;
        if root.fields.is_empty() && !root.text.trim().is_empty() {
            return Err(RequestMapError::BodyNotObject(BodyFormat::Xml));
        }
        Ok(Some(root.fields))
    }
}
