//! Dependency graph construction
//!
//! Turns the flat dataset list returned by the lookup server into an
//! adjacency structure: each dataset maps to the set of parent datasets it
//! was derived from.

use std::borrow::Cow;
use std::fmt;

use dtool_graph_core::DatasetRecord;
use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

/// Vertex identifier (dataset UUID)
pub type VertexId = String;

/// Display name given to datasets that are referenced but not in the result
pub const MISSING_DATASET_NAME: &str = "Dataset does not exist in database.";

/// How a vertex came to be in the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexKind {
    /// The dataset the lineage was queried for
    Root,

    /// A dataset present in the server response
    Dependent,

    /// Referenced as a parent, but absent from the server response
    DoesNotExist,
}

impl VertexKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Dependent => "dependent",
            Self::DoesNotExist => "does-not-exist",
        }
    }
}

impl fmt::Display for VertexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dataset in the lineage graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    pub uuid: VertexId,
    pub name: String,
    pub kind: VertexKind,
}

/// A `derived_from` entry that is not a UUID and was left out of the graph
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidReference {
    /// UUID of the dataset carrying the reference
    pub child: VertexId,

    /// Name of that dataset
    pub child_name: String,

    /// The offending value, in string form
    pub value: String,
}

/// Dependency graph of datasets
///
/// Keys keep first-seen order: every dataset of the input list in list
/// order, followed by missing parents in the order they were first
/// referenced. Rendering relies on this order.
#[derive(Debug, Clone, Default)]
pub struct LineageGraph {
    /// Edges: dataset -> datasets it was derived from (parents)
    parents: IndexMap<VertexId, IndexSet<VertexId>>,

    /// One vertex per key in `parents`
    vertices: IndexMap<VertexId, Vertex>,

    /// Parents referenced but absent from the input
    missing: Vec<VertexId>,

    /// References dropped because they were not UUIDs
    invalid: Vec<InvalidReference>,
}

impl LineageGraph {
    /// Number of vertices
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Number of (child, parent) edges
    pub fn edge_count(&self) -> usize {
        self.parents.values().map(IndexSet::len).sum()
    }

    /// The adjacency mapping, in key order
    pub fn adjacency(&self) -> &IndexMap<VertexId, IndexSet<VertexId>> {
        &self.parents
    }

    /// Iterate vertices in key order
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    /// Look up a vertex by UUID
    pub fn vertex(&self, uuid: &str) -> Option<&Vertex> {
        self.vertices.get(uuid)
    }

    /// Position of a vertex in key order
    pub fn index_of(&self, uuid: &str) -> Option<usize> {
        self.parents.get_index_of(uuid)
    }

    /// Immediate parents of a dataset
    pub fn parents(&self, uuid: &str) -> Option<&IndexSet<VertexId>> {
        self.parents.get(uuid)
    }

    /// All (child, parent) pairs, children in key order
    pub fn edges(&self) -> impl Iterator<Item = (&VertexId, &VertexId)> {
        self.parents
            .iter()
            .flat_map(|(child, parents)| parents.iter().map(move |parent| (child, parent)))
    }

    /// Parents that were referenced but not part of the input
    pub fn missing(&self) -> &[VertexId] {
        &self.missing
    }

    /// References that were dropped because they were not valid UUIDs
    pub fn invalid_references(&self) -> &[InvalidReference] {
        &self.invalid
    }

    fn insert_vertex(&mut self, vertex: Vertex) {
        self.parents.entry(vertex.uuid.clone()).or_default();
        self.vertices.insert(vertex.uuid.clone(), vertex);
    }
}

/// Build a lineage graph from a list of dataset records.
///
/// Data problems never fail the build: references that are not UUIDs are
/// dropped with a warning, and parents missing from `records` become
/// [`VertexKind::DoesNotExist`] vertices.
pub fn build_graph(records: &[DatasetRecord], root_uuid: Option<&str>) -> LineageGraph {
    tracing::debug!(
        "Building dependency graph from {} datasets, root = {:?}",
        records.len(),
        root_uuid
    );

    let mut graph = LineageGraph::default();

    for record in records {
        let Some(uuid) = record.uuid.as_deref() else {
            tracing::debug!("Skipping dataset record without uuid");
            continue;
        };

        if graph.vertices.contains_key(uuid) {
            continue;
        }

        tracing::debug!("Add dependency graph vertex '{}'", uuid);
        let kind = if Some(uuid) == root_uuid {
            VertexKind::Root
        } else {
            VertexKind::Dependent
        };

        graph.insert_vertex(Vertex {
            uuid: uuid.to_string(),
            name: record.display_name().to_string(),
            kind,
        });
    }

    for record in records {
        let (Some(uuid), Some(derived_from)) = (record.uuid.as_deref(), &record.derived_from) else {
            continue;
        };

        for parent in derived_from {
            let parent = canonical_string(parent);

            if !is_valid_uuid(&parent) {
                tracing::warn!(
                    "Parent dataset '{}' of child '{}' ({}) is not a valid UUID, ignored",
                    parent,
                    uuid,
                    record.display_name()
                );
                graph.invalid.push(InvalidReference {
                    child: uuid.to_string(),
                    child_name: record.display_name().to_string(),
                    value: parent.into_owned(),
                });
                continue;
            }

            if !graph.vertices.contains_key(parent.as_ref()) {
                tracing::debug!("Add dependency graph vertex of missing dataset '{}'", parent);
                graph.insert_vertex(Vertex {
                    uuid: parent.to_string(),
                    name: MISSING_DATASET_NAME.to_string(),
                    kind: VertexKind::DoesNotExist,
                });
                graph.missing.push(parent.to_string());
            }

            tracing::debug!("Add dependency graph edge from '{}' to parent '{}'", uuid, parent);
            if let Some(parents) = graph.parents.get_mut(uuid) {
                parents.insert(parent.into_owned());
            }
        }
    }

    if !graph.missing.is_empty() {
        tracing::warn!("Datasets {:?} missing in graph", graph.missing);
    }

    tracing::debug!(
        "Done building dependency graph: {} vertices, {} edges",
        graph.len(),
        graph.edge_count()
    );

    graph
}

/// Check whether a `derived_from` entry is a UUID.
///
/// The value is taken in string form (JSON strings by content, anything else
/// by its JSON text) and parsed as a UUID.
pub fn is_valid_identifier(value: &Value) -> bool {
    is_valid_uuid(&canonical_string(value))
}

/// Check whether a string parses as a UUID (hyphenated, simple, braced or URN form)
pub fn is_valid_uuid(value: &str) -> bool {
    uuid::Uuid::parse_str(value).is_ok()
}

fn canonical_string(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}
