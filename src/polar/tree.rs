//! Minimal XML element tree for the Polar exercise export.
//!
//! Lookups go by local element name rather than by fixed path, so wrapper
//! elements such as `<calendar-items>` may or may not be present.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::PolarError;

/// One XML element with its attributes, direct text and children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    /// Parse a complete document and return its root element.
    pub fn parse(content: &str) -> Result<Element, PolarError> {
        let mut reader = Reader::from_str(content);
        reader.trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    stack.push(Element::from_start(e)?);
                }
                Ok(Event::Empty(ref e)) => {
                    let element = Element::from_start(e)?;
                    attach(&mut stack, &mut root, element);
                }
                Ok(Event::Text(e)) => {
                    let text = e
                        .unescape()
                        .map_err(|e| PolarError::InvalidXml(format!("Bad text: {}", e)))?;
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&text);
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(current) = stack.last_mut() {
                        current
                            .text
                            .push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
                Ok(Event::End(_)) => {
                    let element = stack.pop().ok_or_else(|| {
                        PolarError::InvalidXml("Unbalanced closing tag".to_string())
                    })?;
                    attach(&mut stack, &mut root, element);
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(PolarError::InvalidXml(format!(
                        "XML parsing error at position {}: {}",
                        reader.buffer_position(),
                        e
                    )));
                }
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(PolarError::InvalidXml(format!(
                "Unclosed element <{}>",
                stack[stack.len() - 1].name
            )));
        }

        root.ok_or_else(|| PolarError::InvalidXml("Document has no root element".to_string()))
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Element, PolarError> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).to_string();
        let mut attributes = Vec::new();

        for attr in start.attributes() {
            let attr = attr.map_err(|e| PolarError::InvalidXml(format!("Bad attribute: {}", e)))?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).to_string();
            let value = attr
                .unescape_value()
                .map_err(|e| PolarError::InvalidXml(format!("Bad attribute value: {}", e)))?;
            attributes.push((key, value.to_string()));
        }

        Ok(Element {
            name,
            attributes,
            ..Default::default()
        })
    }

    /// First direct child with the given local name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Text of the first direct child with the given local name.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(Element::text)
    }

    /// All descendants (excluding self) with the given local name, in document order.
    pub fn descendants<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        let mut pending: Vec<&'a Element> = self.children.iter().rev().collect();
        std::iter::from_fn(move || {
            while let Some(next) = pending.pop() {
                pending.extend(next.children.iter().rev());
                if next.name == name {
                    return Some(next);
                }
            }
            None
        })
    }

    /// First descendant with the given local name.
    pub fn find<'a>(&'a self, name: &'a str) -> Option<&'a Element> {
        self.descendants(name).next()
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self) -> &str {
        self.text.trim()
    }
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}
