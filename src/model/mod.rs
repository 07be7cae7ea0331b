//! Model: identity-keyed element store and read-only query layer
//!
//! A [`Model`] is the complete output graph of one parse call: an id-keyed
//! element map plus an optional root package reference. It is produced
//! wholesale by [`parse_model`](crate::parse_model) and replaced wholesale
//! by the next parse; no mutation API is public, so a returned Model is
//! read-only by construction and safe to share behind a reference.

mod element;

pub use element::{Direction, Element, ElementData, ElementId, ElementKind, PortItem};

use rustc_hash::FxHashMap;

/// The complete output graph of one parse call.
#[derive(Debug, Clone, Default)]
pub struct Model {
    elements: FxHashMap<ElementId, Element>,
    root: Option<ElementId>,
}

impl Model {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, element: Element) {
        self.elements.insert(element.id, element);
    }

    pub(crate) fn push_child(&mut self, parent: ElementId, child: ElementId) {
        if let Some(element) = self.elements.get_mut(&parent) {
            element.children.push(child);
        }
    }

    pub(crate) fn set_root(&mut self, id: ElementId) {
        self.root = Some(id);
    }

    pub(crate) fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    /// Look up an element by id.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Id of the root package, if the source declared one.
    pub fn root(&self) -> Option<ElementId> {
        self.root
    }

    /// Resolved children of an element, in declaration order.
    ///
    /// Child ids that do not resolve in the map are filtered out; an
    /// unresolvable id would indicate a construction bug, not a
    /// legitimate runtime state.
    pub fn children(&self, id: ElementId) -> Vec<&Element> {
        self.get(id)
            .map(|element| {
                element
                    .children
                    .iter()
                    .filter_map(|child| self.get(*child))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Children of the root package, or empty if no root package exists.
    pub fn root_elements(&self) -> Vec<&Element> {
        self.root.map(|root| self.children(root)).unwrap_or_default()
    }

    /// All elements of one kind, in no particular order.
    ///
    /// Linear scan of the whole map on every call; fine at
    /// demonstration scale (tens to low hundreds of elements). Keep a
    /// secondary kind index if models ever grow past that.
    pub fn of_kind(&self, kind: ElementKind) -> impl Iterator<Item = &Element> {
        self.elements.values().filter(move |element| element.kind() == kind)
    }

    /// All part definitions in the model.
    pub fn part_defs(&self) -> Vec<&Element> {
        self.of_kind(ElementKind::PartDef).collect()
    }

    /// All connections in the model.
    pub fn connections(&self) -> Vec<&Element> {
        self.of_kind(ElementKind::Connection).collect()
    }

    /// Iterate over every element, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
