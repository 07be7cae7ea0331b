//! Element graph node types
//!
//! Every parsed construct becomes an [`Element`]: common identity fields
//! plus a tagged [`ElementData`] payload. Relationships are expressed as
//! id references into the owning [`Model`](crate::model::Model) map, never
//! as ownership pointers, so the graph stays arena-shaped.

use indexmap::IndexMap;
use smol_str::SmolStr;

/// Process-unique element identifier
///
/// Allocated sequentially from zero by each parse call and never reused
/// within a Model. Ids are not content-derived: two parses of the same
/// source may assign different ids to structurally identical elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

impl ElementId {
    pub(crate) fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw counter value, for display and debugging.
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Direction of a flow item declared inside a port definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    In,
    Out,
    Inout,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::Inout => "inout",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A flow item declaration inside a port definition body
///
/// Stored textually (`inout item flow : Fluid;` keeps `flow`/`Fluid` as
/// strings); items are not elements and get no ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortItem {
    pub direction: Direction,
    pub name: SmolStr,
    pub item_type: SmolStr,
}

/// Variant-specific payload of an element.
///
/// The `ports`/`parts`/`states`/`transitions` lists are convenience views:
/// always subsets of the element's `children`, preserving declaration
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementData {
    Package,
    ItemDef,
    PortDef {
        items: Vec<PortItem>,
    },
    Port {
        /// Referenced port definition, by name, unresolved
        def_ref: Option<SmolStr>,
    },
    PartDef {
        ports: Vec<ElementId>,
        parts: Vec<ElementId>,
    },
    Part {
        /// Referenced part definition, by name, unresolved
        def_ref: Option<SmolStr>,
        /// Multiplicity literal as written, e.g. `4`
        multiplicity: Option<SmolStr>,
    },
    RequirementDef {
        /// `id = "…";` body statement
        req_id: Option<SmolStr>,
        /// `text = "…";` body statement
        text: Option<SmolStr>,
    },
    StateDef {
        states: Vec<ElementId>,
        transitions: Vec<ElementId>,
    },
    State {
        /// `entry action Name { … }` action name
        entry_action: Option<SmolStr>,
    },
    Transition {
        /// `first X` clause; empty when the clause is absent
        source: SmolStr,
        /// `then X` clause; empty when the clause is absent
        target: SmolStr,
        /// `accept X` clause
        trigger: Option<SmolStr>,
    },
    Connection {
        /// Source endpoint qualified name, verbatim, unresolved
        source: SmolStr,
        target: SmolStr,
    },
    Binding {
        source: SmolStr,
        target: SmolStr,
    },
}

/// The kind of an element: the discriminant of [`ElementData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Package,
    ItemDef,
    PortDef,
    Port,
    PartDef,
    Part,
    RequirementDef,
    StateDef,
    State,
    Transition,
    Connection,
    Binding,
}

impl ElementKind {
    /// Get a display string for this kind (capitalized for UI labels).
    pub fn display(&self) -> &'static str {
        match self {
            Self::Package => "Package",
            Self::ItemDef => "Item def",
            Self::PortDef => "Port def",
            Self::Port => "Port",
            Self::PartDef => "Part def",
            Self::Part => "Part",
            Self::RequirementDef => "Requirement def",
            Self::StateDef => "State def",
            Self::State => "State",
            Self::Transition => "Transition",
            Self::Connection => "Connection",
            Self::Binding => "Binding",
        }
    }

    /// Check if this kind is a definition (a named template, not a usage
    /// or relationship).
    pub fn is_definition(&self) -> bool {
        matches!(
            self,
            Self::ItemDef | Self::PortDef | Self::PartDef | Self::RequirementDef | Self::StateDef
        )
    }
}

/// A node of the semantic graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub id: ElementId,
    /// Declared name; empty for connections and bindings, which the
    /// grammar leaves unnamed (their endpoints identify them)
    pub name: SmolStr,
    /// Owning element; absent only for the root package
    pub parent: Option<ElementId>,
    /// Child element ids in declaration order
    pub children: Vec<ElementId>,
    /// Open-ended annotations for forward compatibility
    pub metadata: IndexMap<SmolStr, SmolStr>,
    pub data: ElementData,
}

impl Element {
    pub(crate) fn new(
        id: ElementId,
        name: SmolStr,
        parent: Option<ElementId>,
        data: ElementData,
    ) -> Self {
        Self {
            id,
            name,
            parent,
            children: Vec::new(),
            metadata: IndexMap::new(),
            data,
        }
    }

    /// The discriminant of this element's payload.
    pub fn kind(&self) -> ElementKind {
        match self.data {
            ElementData::Package => ElementKind::Package,
            ElementData::ItemDef => ElementKind::ItemDef,
            ElementData::PortDef { .. } => ElementKind::PortDef,
            ElementData::Port { .. } => ElementKind::Port,
            ElementData::PartDef { .. } => ElementKind::PartDef,
            ElementData::Part { .. } => ElementKind::Part,
            ElementData::RequirementDef { .. } => ElementKind::RequirementDef,
            ElementData::StateDef { .. } => ElementKind::StateDef,
            ElementData::State { .. } => ElementKind::State,
            ElementData::Transition { .. } => ElementKind::Transition,
            ElementData::Connection { .. } => ElementKind::Connection,
            ElementData::Binding { .. } => ElementKind::Binding,
        }
    }

    /// Child port ids of a part definition (empty for other kinds).
    pub fn ports(&self) -> &[ElementId] {
        match &self.data {
            ElementData::PartDef { ports, .. } => ports,
            _ => &[],
        }
    }

    /// Child part ids of a part definition (empty for other kinds).
    pub fn parts(&self) -> &[ElementId] {
        match &self.data {
            ElementData::PartDef { parts, .. } => parts,
            _ => &[],
        }
    }

    /// Child state ids of a state-machine definition (empty for other kinds).
    pub fn states(&self) -> &[ElementId] {
        match &self.data {
            ElementData::StateDef { states, .. } => states,
            _ => &[],
        }
    }

    /// Child transition ids of a state-machine definition (empty for other
    /// kinds).
    pub fn transitions(&self) -> &[ElementId] {
        match &self.data {
            ElementData::StateDef { transitions, .. } => transitions,
            _ => &[],
        }
    }
}
