//! Minimal XML reading for SOAP envelopes.
//!
//! SOAP responses are only ever consumed for a handful of scalar values
//! (`sessionId`, `serverUrl`, `faultstring`, ...). Rather than mapping whole
//! envelopes onto structs, a document is flattened into its text-bearing
//! elements, each addressed by the local names of its ancestors. Namespace
//! prefixes are ignored, so `soapenv:Body` and `s:Body` both read as `Body`.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{Error, ErrorKind, Result};

/// A text-bearing element and the local-name path leading to it (root first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlLeaf {
    pub path: Vec<String>,
    pub text: String,
}

/// A well-formed XML document flattened into its leaves.
#[derive(Debug, Clone)]
pub struct XmlDocument {
    root: String,
    leaves: Vec<XmlLeaf>,
}

impl XmlDocument {
    /// Parse a document. Fails unless the input has exactly one root element
    /// and every element is closed.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut root: Option<String> = None;
        let mut stack: Vec<String> = Vec::new();
        let mut text = String::new();
        let mut leaves = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let name = local_name(e.local_name().as_ref());
                    if stack.is_empty() {
                        if root.is_some() {
                            return Err(malformed("multiple root elements"));
                        }
                        root = Some(name.clone());
                    }
                    stack.push(name);
                    text.clear();
                }
                Ok(Event::Empty(e)) => {
                    let name = local_name(e.local_name().as_ref());
                    if stack.is_empty() {
                        if root.is_some() {
                            return Err(malformed("multiple root elements"));
                        }
                        root = Some(name.clone());
                    }
                    let mut path = stack.clone();
                    path.push(name);
                    leaves.push(XmlLeaf {
                        path,
                        text: String::new(),
                    });
                }
                Ok(Event::Text(t)) => {
                    if stack.is_empty() {
                        return Err(malformed("text outside of the root element"));
                    }
                    let unescaped = t.unescape().map_err(|e| malformed(&e.to_string()))?;
                    text.push_str(&unescaped);
                }
                Ok(Event::CData(c)) => {
                    if stack.is_empty() {
                        return Err(malformed("CDATA outside of the root element"));
                    }
                    text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
                Ok(Event::End(_)) => {
                    if !text.is_empty() {
                        leaves.push(XmlLeaf {
                            path: stack.clone(),
                            text: std::mem::take(&mut text),
                        });
                    }
                    stack.pop();
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(malformed(&e.to_string())),
            }
        }

        if !stack.is_empty() {
            return Err(malformed("unclosed element"));
        }
        let root = root.ok_or_else(|| malformed("no root element"))?;

        Ok(Self { root, leaves })
    }

    /// Local name of the root element.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// All text-bearing elements in document order.
    pub fn leaves(&self) -> &[XmlLeaf] {
        &self.leaves
    }

    /// Text of the first element found at `path`, given relative to the root.
    ///
    /// `text_at(&["Body", "Fault", "faultcode"])` matches
    /// `<Envelope><Body><Fault><faultcode>` whatever the root is called.
    pub fn text_at(&self, path: &[&str]) -> Option<&str> {
        self.leaves
            .iter()
            .find(|leaf| {
                leaf.path.len() == path.len() + 1
                    && leaf.path[1..].iter().zip(path).all(|(a, b)| a == b)
            })
            .map(|leaf| leaf.text.as_str())
    }
}

fn local_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

fn malformed(detail: &str) -> Error {
    Error::new(ErrorKind::Decode(format!("malformed XML: {}", detail)))
}
