//! A minimal element tree over the streaming XML reader.
//!
//! The importer works on whole documents that are small by definition (the
//! import path enforces a size ceiling before parsing), so building a tree
//! and doing tag-table lookups against it keeps the per-recipe parsing code
//! free of pull-parser state. Parse failures return the underlying parser
//! diagnostic as a plain string; the importer wraps it into its own error
//! family.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::xml::tags::TagNames;

/// One parsed element: name, attributes, trimmed text content, children.
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    /// Attribute value under either spelling of `tag`.
    pub fn attr(&self, tag: TagNames) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| tag.matches(key))
            .map(|(_, value)| value.as_str())
    }

    /// Whether a boolean flag attribute is present and true.
    /// Absent attribute means false.
    pub fn has_flag(&self, tag: TagNames) -> bool {
        matches!(self.attr(tag), Some("true") | Some("1"))
    }

    /// First child element matching either spelling of `tag`.
    pub fn child(&self, tag: TagNames) -> Option<&Element> {
        self.children.iter().find(|c| tag.matches(&c.name))
    }

    /// All child elements matching either spelling of `tag`, in document
    /// order.
    pub fn children_named(&self, tag: TagNames) -> impl Iterator<Item = &Element> {
        self.children.iter().filter(move |c| tag.matches(&c.name))
    }

    /// Text content of the first matching child; missing child means empty.
    pub fn child_text(&self, tag: TagNames) -> String {
        self.child(tag).map(|c| c.text.clone()).unwrap_or_default()
    }
}

fn element_from_start(start: &BytesStart) -> Result<Element, String> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| format!("bad attribute in <{}>: {}", name, e))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| format!("bad attribute value in <{}>: {}", name, e))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(Element {
        name,
        attributes,
        text: String::new(),
        children: Vec::new(),
    })
}

fn close_element(
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
    mut element: Element,
) -> Result<(), String> {
    element.text = element.text.trim().to_string();
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    } else if root.is_none() {
        *root = Some(element);
    } else {
        return Err("document has more than one root element".to_string());
    }
    Ok(())
}

/// Parse a document into its root [`Element`].
///
/// # Errors
///
/// Returns the parser diagnostic (with byte position where available) for
/// malformed input, including mismatched or unclosed tags.
pub fn parse_document(xml: &str) -> Result<Element, String> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Err(e) => {
                return Err(format!(
                    "parse error at byte {}: {}",
                    reader.buffer_position(),
                    e
                ))
            }
            Ok(Event::Start(start)) => stack.push(element_from_start(&start)?),
            Ok(Event::Empty(start)) => {
                let element = element_from_start(&start)?;
                close_element(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| "unexpected closing tag".to_string())?;
                close_element(&mut stack, &mut root, element)?;
            }
            Ok(Event::Text(text)) => {
                let unescaped = text
                    .unescape()
                    .map_err(|e| format!("bad text content: {}", e))?;
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&unescaped);
                }
            }
            Ok(Event::CData(cdata)) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&cdata));
                }
            }
            Ok(Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_)) => {}
            Ok(Event::Eof) => break,
        }
    }

    if !stack.is_empty() {
        return Err("unexpected end of document inside an open element".to_string());
    }
    root.ok_or_else(|| "document contains no root element".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::tags;

    #[test]
    fn test_parses_nested_elements_and_attributes() {
        let root = parse_document(
            r#"<recipe id="abc" caravanFriendly="true">
                 <name>Chili</name>
                 <ingredients>
                   <ingredient id="x"><name>bean</name></ingredient>
                   <ingredient id="y"><name>chili</name></ingredient>
                 </ingredients>
               </recipe>"#,
        )
        .unwrap();

        assert_eq!(root.name, "recipe");
        assert_eq!(root.attr(tags::ATTR_ID), Some("abc"));
        assert!(root.has_flag(tags::ATTR_CARAVAN_FRIENDLY));
        assert!(!root.has_flag(tags::ATTR_MENU_FRIENDLY));
        assert_eq!(root.child_text(tags::NAME), "Chili");

        let container = root.child(tags::INGREDIENTS).unwrap();
        assert_eq!(container.children_named(tags::INGREDIENT).count(), 2);
    }

    #[test]
    fn test_accepts_compact_spellings() {
        let root = parse_document(r#"<r id="1"><n>Tea</n><ii><i><n>leaf</n></i></ii></r>"#).unwrap();
        assert!(tags::RECIPE.matches(&root.name));
        assert_eq!(root.child_text(tags::NAME), "Tea");
        let container = root.child(tags::INGREDIENTS).unwrap();
        assert_eq!(container.children_named(tags::INGREDIENT).count(), 1);
    }

    #[test]
    fn test_unescapes_text_and_attributes() {
        let root =
            parse_document(r#"<recipe note="a &amp; b"><name>Salt &amp; Pepper &lt;mix&gt;</name></recipe>"#)
                .unwrap();
        assert_eq!(root.child_text(tags::NAME), "Salt & Pepper <mix>");
        assert_eq!(root.attributes[0].1, "a & b");
    }

    #[test]
    fn test_rejects_malformed_documents() {
        assert!(parse_document("<recipe><name>oops</recipe>").is_err());
        assert!(parse_document("not xml at all").is_err());
        assert!(parse_document("<recipe>").is_err());
    }

    #[test]
    fn test_empty_element_form() {
        let root = parse_document("<recipe><ingredients/></recipe>").unwrap();
        assert!(root.child(tags::INGREDIENTS).unwrap().children.is_empty());
    }
}
