//! Best-effort recovery of node display coordinates from a layout diagram.
//!
//! Coordinates are cosmetic. Any failure here yields `None` and the graph is
//! simply built without positions; no metric depends on this module.

use crate::core::{ModuleId, Position};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;

/// Coordinates recovered for one diagram node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeLayout {
    pub title: String,
    pub x: f64,
    pub y: f64,
}

/// Anything able to turn a diagram artifact into node coordinates.
pub trait LayoutSource: Send + Sync {
    /// Parse `diagram`; `None` on any failure.
    fn resolve(&self, diagram: &[u8]) -> Option<Vec<NodeLayout>>;
}

/// Reads Graphviz-rendered SVG: every `<g class="node">` group carries a
/// `<title>` with the module id and a shape or label whose coordinates are
/// used as the node position.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphvizSvgLayout;

/// Index layout entries by title. Later duplicates are ignored.
pub fn positions_by_title(layout: &[NodeLayout]) -> HashMap<ModuleId, Position> {
    let mut positions = HashMap::with_capacity(layout.len());
    for node in layout {
        positions
            .entry(node.title.clone())
            .or_insert_with(|| Position::new(node.x, node.y));
    }
    positions
}

#[derive(Default)]
struct NodeGroup {
    depth: usize,
    title: String,
    in_title: bool,
    shape_center: Option<(f64, f64)>,
    label_anchor: Option<(f64, f64)>,
}

impl NodeGroup {
    fn finish(self) -> Option<NodeLayout> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return None;
        }
        let (x, y) = self.shape_center.or(self.label_anchor)?;
        Some(NodeLayout { title, x, y })
    }
}

impl LayoutSource for GraphvizSvgLayout {
    fn resolve(&self, diagram: &[u8]) -> Option<Vec<NodeLayout>> {
        let mut reader = Reader::from_reader(diagram);
        let mut buf = Vec::new();
        let mut depth = 0usize;
        let mut saw_svg = false;
        let mut current: Option<NodeGroup> = None;
        let mut nodes = Vec::new();

        loop {
            let event = reader.read_event_into(&mut buf).ok()?;
            match event {
                Event::Start(element) => {
                    depth += 1;
                    saw_svg |= element.name().as_ref() == b"svg";
                    open_element(&element, depth, &mut current, false)?;
                }
                Event::Empty(element) => {
                    saw_svg |= element.name().as_ref() == b"svg";
                    open_element(&element, depth + 1, &mut current, true)?;
                }
                Event::Text(text) => {
                    if let Some(group) = current.as_mut().filter(|g| g.in_title) {
                        group.title.push_str(&text.unescape().ok()?);
                    }
                }
                Event::End(element) => {
                    let name = element.name();
                    if let Some(group) = current.as_mut() {
                        if name.as_ref() == b"title" {
                            group.in_title = false;
                        }
                    }
                    if name.as_ref() == b"g" && current.as_ref().is_some_and(|g| g.depth == depth) {
                        if let Some(node) = current.take().and_then(NodeGroup::finish) {
                            nodes.push(node);
                        }
                    }
                    depth = depth.checked_sub(1)?;
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        // Unclosed elements or a document that is not SVG at all
        if !saw_svg || depth != 0 {
            return None;
        }
        Some(nodes)
    }
}

fn open_element(
    element: &BytesStart<'_>,
    depth: usize,
    current: &mut Option<NodeGroup>,
    self_closing: bool,
) -> Option<()> {
    match element.name().as_ref() {
        b"g" if !self_closing && current.is_none() => {
            let class = attribute(element, b"class")?;
            if class
                .as_deref()
                .is_some_and(|c| c.split_whitespace().any(|part| part == "node"))
            {
                *current = Some(NodeGroup {
                    depth,
                    ..NodeGroup::default()
                });
            }
        }
        b"title" if !self_closing => {
            if let Some(group) = current.as_mut() {
                group.in_title = true;
            }
        }
        b"ellipse" => {
            if let Some(group) = current.as_mut() {
                if group.shape_center.is_none() {
                    group.shape_center = coordinate_pair(element, b"cx", b"cy")?;
                }
            }
        }
        b"text" => {
            if let Some(group) = current.as_mut() {
                if group.label_anchor.is_none() {
                    group.label_anchor = coordinate_pair(element, b"x", b"y")?;
                }
            }
        }
        _ => {}
    }
    Some(())
}

/// Outer `None` means a malformed attribute; inner `None` means absent.
fn attribute(element: &BytesStart<'_>, key: &[u8]) -> Option<Option<String>> {
    for attr in element.attributes() {
        let attr = attr.ok()?;
        if attr.key.as_ref() == key {
            return Some(Some(attr.unescape_value().ok()?.into_owned()));
        }
    }
    Some(None)
}

fn coordinate_pair(element: &BytesStart<'_>, x_key: &[u8], y_key: &[u8]) -> Option<Option<(f64, f64)>> {
    let x = attribute(element, x_key)?;
    let y = attribute(element, y_key)?;
    Some(match (x, y) {
        (Some(x), Some(y)) => match (x.trim().parse::<f64>(), y.trim().parse::<f64>()) {
            (Ok(x), Ok(y)) if x.is_finite() && y.is_finite() => Some((x, y)),
            _ => None,
        },
        _ => None,
    })
}
