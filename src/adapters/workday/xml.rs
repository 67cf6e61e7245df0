//! XML document access
//!
//! The web-services and RAAS endpoints both answer with namespace-qualified
//! XML. This module parses a response body into a lightweight DOM
//! ([`XmlNode`]) and layers the typed accessors the rest of the crate works
//! with on top of it: null-safe scalar extraction, `<ID type="...">`
//! reference lookup, and RAAS `Descriptor` attribute access.
//!
//! Element and attribute names are matched on their local part; the wire
//! format qualifies everything under a single namespace, so prefixes carry
//! no information here.

use crate::domain::{AbacusError, Result};
use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fmt;

/// One XML element: local name, attributes, direct text, children
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlNode {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<XmlNode>,
}

impl XmlNode {
    /// Parse a full document and return its root element
    pub fn parse(input: &str) -> Result<XmlNode> {
        let mut reader = Reader::from_str(input);
        let mut stack: Vec<XmlNode> = Vec::new();
        let mut root: Option<XmlNode> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    stack.push(XmlNode {
                        name: local_name(e.name().as_ref()),
                        attributes: read_attributes(e)?,
                        text: String::new(),
                        children: Vec::new(),
                    });
                }
                Ok(Event::Empty(ref e)) => {
                    let node = XmlNode {
                        name: local_name(e.name().as_ref()),
                        attributes: read_attributes(e)?,
                        text: String::new(),
                        children: Vec::new(),
                    };
                    attach(&mut stack, &mut root, node)?;
                }
                Ok(Event::Text(ref t)) => {
                    if let Some(parent) = stack.last_mut() {
                        let value = t
                            .unescape()
                            .map_err(|e| AbacusError::Xml(e.to_string()))?;
                        parent.text.push_str(&value);
                    }
                }
                Ok(Event::CData(ref c)) => {
                    if let Some(parent) = stack.last_mut() {
                        parent
                            .text
                            .push_str(&String::from_utf8_lossy(c.as_ref()));
                    }
                }
                Ok(Event::End(_)) => {
                    let node = stack
                        .pop()
                        .ok_or_else(|| AbacusError::Xml("unbalanced end tag".to_string()))?;
                    attach(&mut stack, &mut root, node)?;
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(AbacusError::Xml(e.to_string())),
            }
        }

        if !stack.is_empty() {
            return Err(AbacusError::Xml("unclosed element at end of input".to_string()));
        }
        root.ok_or_else(|| AbacusError::Xml("document has no root element".to_string()))
    }

    /// Local name of this element
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Trimmed text content, `None` when empty
    pub fn text(&self) -> Option<&str> {
        let trimmed = self.text.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Attribute value by local name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v.as_str())
    }

    /// First direct child with the given local name
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children with the given local name
    pub fn children(&self, name: &str) -> impl Iterator<Item = &XmlNode> {
        let name = name.to_string();
        self.children.iter().filter(move |c| c.name == name)
    }

    /// First descendant (depth-first) with the given local name
    pub fn descendant(&self, name: &str) -> Option<&XmlNode> {
        for child in &self.children {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.descendant(name) {
                return Some(found);
            }
        }
        None
    }

    /// All descendants (depth-first) with the given local name
    pub fn descendants(&self, name: &str) -> Vec<&XmlNode> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, out: &mut Vec<&'a XmlNode>) {
        for child in &self.children {
            if child.name == name {
                out.push(child);
            }
            child.collect_descendants(name, out);
        }
    }

    // --- typed accessors ---

    /// Text of the first descendant with the given name
    pub fn text_of(&self, name: &str) -> Option<String> {
        self.descendant(name)?.text().map(str::to_string)
    }

    /// Float value of the first descendant with the given name
    pub fn float_of(&self, name: &str) -> Option<f64> {
        self.text_of(name)?.parse().ok()
    }

    /// Integer value of the first descendant with the given name
    pub fn int_of(&self, name: &str) -> Option<i64> {
        self.text_of(name)?.parse().ok()
    }

    /// Boolean value (0/1 on the wire) of the first descendant
    pub fn bool_of(&self, name: &str) -> Option<bool> {
        self.int_of(name).map(|v| v != 0)
    }

    /// Value of the `<ID type="...">` child matching the requested type
    ///
    /// Reference nodes carry their identifiers as repeated `ID` children
    /// discriminated by a `type` attribute.
    pub fn id_of_type(&self, id_type: &str) -> Option<String> {
        self.children("ID")
            .find(|id| id.attr("type") == Some(id_type))
            .and_then(|id| id.text())
            .map(str::to_string)
    }

    /// `id_of_type` on the first descendant with the given name
    pub fn reference_id(&self, reference: &str, id_type: &str) -> Option<String> {
        self.descendant(reference)?.id_of_type(id_type)
    }

    /// `Descriptor` attribute of the first descendant with the given name
    ///
    /// RAAS reports put display names in a namespaced `Descriptor`
    /// attribute rather than in element text.
    pub fn descriptor_of(&self, name: &str) -> Option<String> {
        self.descendant(name)?.attr("Descriptor").map(str::to_string)
    }
}

impl fmt::Display for XmlNode {
    /// Renders the element back to markup, used for failure snapshots
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for (key, value) in &self.attributes {
            write!(f, " {}=\"{}\"", key, escape(value.as_str()))?;
        }
        if self.children.is_empty() && self.text().is_none() {
            return write!(f, "/>");
        }
        write!(f, ">")?;
        if let Some(text) = self.text() {
            write!(f, "{}", escape(text))?;
        }
        for child in &self.children {
            write!(f, "{child}")?;
        }
        write!(f, "</{}>", self.name)
    }
}

fn local_name(qualified: &[u8]) -> String {
    let name = String::from_utf8_lossy(qualified);
    match name.rsplit_once(':') {
        Some((_, local)) => local.to_string(),
        None => name.into_owned(),
    }
}

fn read_attributes(e: &quick_xml::events::BytesStart<'_>) -> Result<Vec<(String, String)>> {
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| AbacusError::Xml(e.to_string()))?;
        let key = local_name(attr.key.as_ref());
        let value = attr
            .unescape_value()
            .map_err(|e| AbacusError::Xml(e.to_string()))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(attributes)
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(node);
            Ok(())
        }
        None => {
            if root.is_some() {
                return Err(AbacusError::Xml(
                    "multiple root elements in document".to_string(),
                ));
            }
            *root = Some(node);
            Ok(())
        }
    }
}
