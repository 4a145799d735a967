//! Arena-backed XML tree for scheme templates
//!
//! Nodes live in a flat vector and refer to their children by [`NodeId`].
//! A parsed [`Template`] is read-only; every generation run works on its own
//! [`TemplateTree`] obtained from [`Template::instantiate`].

use std::collections::VecDeque;
use std::io;
use std::path::Path;

use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute as XmlAttribute;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::{Reader, Writer};

use crate::error::DataLoadError;

/// Index of a node in its tree's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A name/value attribute pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    value: String,
    /// Escaped form written back to the document
    raw: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            name: name.into(),
            raw: escape(value.as_str()).into_owned(),
            value,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        *self = Self::new(std::mem::take(&mut self.name), value);
    }
}

/// An element with its ordered attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<NodeId>,
    /// Written as `<name/>` when it has no children
    pub self_closing: bool,
}

impl Element {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value())
    }

    /// Replace the value of an existing attribute; returns false if absent
    pub fn replace_attribute(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) => {
                attr.set_value(value);
                true
            }
            None => false,
        }
    }
}

/// Node payloads. Non-element content is kept in its escaped source form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
    Declaration(String),
    DocType(String),
    ProcessingInstruction(String),
}

/// Mutable working copy of a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateTree {
    nodes: Vec<Node>,
    /// Document-level nodes in source order (prolog, root element, trailing misc)
    top_level: Vec<NodeId>,
    root: NodeId,
}

impl TemplateTree {
    /// The document element
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id.0] {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[id.0] {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Number of nodes reachable from the document level
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes under the root, root first, level by level
    pub fn breadth_first(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut queue = VecDeque::from([self.root]);
        while let Some(id) = queue.pop_front() {
            order.push(id);
            if let Node::Element(e) = &self.nodes[id.0] {
                queue.extend(e.children.iter().copied());
            }
        }
        order
    }

    /// Serialize back to XML, keeping text and whitespace nodes verbatim
    pub fn to_xml(&self) -> io::Result<String> {
        let mut writer = Writer::new(Vec::new());
        for id in &self.top_level {
            self.write_node(&mut writer, *id)?;
        }
        String::from_utf8(writer.into_inner()).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn write_node(&self, writer: &mut Writer<Vec<u8>>, id: NodeId) -> io::Result<()> {
        let event = match &self.nodes[id.0] {
            Node::Element(element) => return self.write_element(writer, element),
            Node::Text(raw) => Event::Text(BytesText::from_escaped(raw.as_str())),
            Node::CData(text) => Event::CData(BytesCData::new(text.as_str())),
            Node::Comment(raw) => Event::Comment(BytesText::from_escaped(raw.as_str())),
            Node::DocType(raw) => Event::DocType(BytesText::from_escaped(raw.as_str())),
            Node::ProcessingInstruction(raw) => Event::PI(BytesPI::new(raw.as_str())),
            Node::Declaration(raw) => {
                Event::Decl(BytesDecl::from_start(BytesStart::from_content(raw.as_str(), 3)))
            }
        };
        write_event(writer, event)
    }

    fn write_element(&self, writer: &mut Writer<Vec<u8>>, element: &Element) -> io::Result<()> {
        let mut start = BytesStart::new(element.name.as_str());
        for attr in &element.attributes {
            start.push_attribute(XmlAttribute {
                key: QName(attr.name.as_bytes()),
                value: attr.raw.as_bytes().into(),
            });
        }

        if element.self_closing && element.children.is_empty() {
            return write_event(writer, Event::Empty(start));
        }

        write_event(writer, Event::Start(start))?;
        for child in &element.children {
            self.write_node(writer, *child)?;
        }
        write_event(writer, Event::End(BytesEnd::new(element.name.as_str())))
    }
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> io::Result<()> {
    writer
        .write_event(event)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}

/// Read-only parsed template
///
/// The only way to obtain a mutable tree is [`Template::instantiate`], so the
/// parsed template stays pristine across runs.
#[derive(Debug)]
pub struct Template {
    tree: TemplateTree,
}

impl Template {
    /// Load a template from an XML file
    pub fn from_file(path: &Path) -> Result<Self, DataLoadError> {
        let content = DataLoadError::read(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parse XML source; `origin` names the source in errors
    ///
    /// External DTDs are never fetched. Malformed markup is fatal.
    pub fn parse(source: &str, origin: &str) -> Result<Self, DataLoadError> {
        TreeBuilder::new(origin).build(source).map(|tree| Template { tree })
    }

    pub fn tree(&self) -> &TemplateTree {
        &self.tree
    }

    /// Deep copy for a single generation run
    pub fn instantiate(&self) -> TemplateTree {
        self.tree.clone()
    }
}

struct TreeBuilder<'o> {
    origin: &'o str,
    nodes: Vec<Node>,
    top_level: Vec<NodeId>,
    root: Option<NodeId>,
    open: Vec<NodeId>,
}

impl<'o> TreeBuilder<'o> {
    fn new(origin: &'o str) -> Self {
        Self {
            origin,
            nodes: Vec::new(),
            top_level: Vec::new(),
            root: None,
            open: Vec::new(),
        }
    }

    fn build(mut self, source: &str) -> Result<TemplateTree, DataLoadError> {
        let mut reader = Reader::from_str(source);

        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(e) => {
                    return Err(self.error(format!("at byte {}: {}", reader.buffer_position(), e)));
                }
            };

            match event {
                Event::Start(start) => {
                    let element = self.element(&start, false)?;
                    let id = self.push(Node::Element(element))?;
                    self.open.push(id);
                }
                Event::Empty(start) => {
                    let element = self.element(&start, true)?;
                    self.push(Node::Element(element))?;
                }
                Event::End(_) => {
                    self.open.pop();
                }
                Event::Text(text) => {
                    let raw = self.utf8(&text)?;
                    self.push(Node::Text(raw))?;
                }
                Event::CData(text) => {
                    let raw = self.utf8(&text)?;
                    self.push(Node::CData(raw))?;
                }
                Event::Comment(text) => {
                    let raw = self.utf8(&text)?;
                    self.push(Node::Comment(raw))?;
                }
                Event::Decl(decl) => {
                    let raw = self.utf8(&decl)?;
                    self.push(Node::Declaration(raw))?;
                }
                Event::DocType(text) => {
                    let raw = self.utf8(&text)?;
                    self.push(Node::DocType(raw))?;
                }
                Event::PI(pi) => {
                    let raw = self.utf8(&pi)?;
                    self.push(Node::ProcessingInstruction(raw))?;
                }
                Event::Eof => break,
            }
        }

        if let Some(open) = self.open.last() {
            let name = match &self.nodes[open.0] {
                Node::Element(e) => e.name.clone(),
                _ => String::new(),
            };
            return Err(self.error(format!("unclosed element <{}>", name)));
        }

        let root = self.root.ok_or_else(|| self.error("document has no root element"))?;
        Ok(TemplateTree {
            nodes: self.nodes,
            top_level: self.top_level,
            root,
        })
    }

    /// Append a node under the innermost open element, or at document level
    fn push(&mut self, node: Node) -> Result<NodeId, DataLoadError> {
        let id = NodeId(self.nodes.len());
        let is_element = matches!(node, Node::Element(_));
        self.nodes.push(node);

        match self.open.last().copied() {
            Some(parent) => {
                if let Node::Element(e) = &mut self.nodes[parent.0] {
                    e.children.push(id);
                }
            }
            None => {
                if is_element {
                    if self.root.is_some() {
                        return Err(self.error("document has more than one root element"));
                    }
                    self.root = Some(id);
                }
                self.top_level.push(id);
            }
        }
        Ok(id)
    }

    fn element(&self, start: &BytesStart<'_>, self_closing: bool) -> Result<Element, DataLoadError> {
        let name = self.utf8(start.name().as_ref())?;
        let mut attributes = Vec::new();

        for attr in start.attributes() {
            let attr = attr.map_err(|e| self.error(e))?;
            let value = attr.unescape_value().map_err(|e| self.error(e))?.into_owned();
            // Attributes are always written back with double quotes
            let raw = self.utf8(&attr.value)?.replace('"', "&quot;");
            attributes.push(Attribute {
                name: self.utf8(attr.key.as_ref())?,
                value,
                raw,
            });
        }

        Ok(Element {
            name,
            attributes,
            children: Vec::new(),
            self_closing,
        })
    }

    fn utf8(&self, bytes: &[u8]) -> Result<String, DataLoadError> {
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|e| self.error(e))
    }

    fn error(&self, message: impl ToString) -> DataLoadError {
        DataLoadError::xml(self.origin, message)
    }
}
