use indexmap::{IndexMap, IndexSet};
use crate::schema::is_blacklisted;

/// `consuming_file` imports `symbol` from `source_file`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportEdge {
    pub consuming_file: String,
    pub source_file: String,
    pub symbol: String,
}

impl ImportEdge {
    pub fn new(consuming_file: &str, source_file: &str, symbol: &str) -> ImportEdge {
        ImportEdge {
            consuming_file: consuming_file.to_string(),
            source_file: source_file.to_string(),
            symbol: symbol.to_string(),
        }
    }
}

/// Import graph of one generation run. Registration order is kept so that
/// unchanged schemas always render byte-identical preambles.
#[derive(Debug, Clone, Default)]
pub struct ImportResolver {
    edges: IndexSet<ImportEdge>,
}

impl ImportResolver {
    pub fn new() -> ImportResolver {
        ImportResolver::default()
    }

    pub fn connect<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = ImportEdge>,
    {
        for edge in edges {
            if is_blacklisted(&edge.symbol) {
                continue;
            }
            self.edges.insert(edge);
        }
    }

    pub fn merge(&mut self, other: ImportResolver) {
        self.connect(other.edges);
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Symbols grouped by source file, sources in first-registration order.
    pub fn imports_for(&self, consuming_file: &str) -> Vec<(&str, Vec<&str>)> {
        let mut grouped: IndexMap<&str, Vec<&str>> = IndexMap::new();
        for edge in self.edges.iter().filter(|edge| edge.consuming_file == consuming_file) {
            grouped
                .entry(edge.source_file.as_str())
                .or_default()
                .push(edge.symbol.as_str());
        }
        grouped.into_iter().collect()
    }
}
