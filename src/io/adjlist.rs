//! Adjacency-list and exclusion-list readers.
//!
//! Both formats are line based and whitespace-delimited. Anything after a
//! `#` is a comment; blank lines are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::constraints::{ExclusionSet, RelationshipGraph};
use crate::error::Result;

fn tokens(line: &str) -> std::str::SplitWhitespace<'_> {
    let content = match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    };
    content.split_whitespace()
}

/// Reads a relationship graph: each line names a participant followed by
/// the participants it must never be grouped with.
///
/// ```
/// use u_partition::io::read_adjlist;
///
/// let text = "# org chart\nboss dev1 dev2\ndev1\nsolo  # no reports\n";
/// let graph = read_adjlist(text.as_bytes()).unwrap();
/// assert_eq!(graph.len(), 4);
/// assert_eq!(graph.edges().count(), 2);
/// ```
pub fn read_adjlist<R: BufRead>(reader: R) -> Result<RelationshipGraph> {
    let mut graph = RelationshipGraph::new();
    for line in reader.lines() {
        let line = line?;
        let mut fields = tokens(&line);
        if let Some(node) = fields.next() {
            graph.add_participant(node);
            for neighbor in fields {
                graph.add_edge(node, neighbor);
            }
        }
    }
    Ok(graph)
}

/// Reads an exclusion list. Every identifier on every line is excluded.
pub fn read_exclusions<R: BufRead>(reader: R) -> Result<ExclusionSet> {
    let mut excluded = ExclusionSet::new();
    for line in reader.lines() {
        let line = line?;
        excluded.extend(tokens(&line).map(str::to_owned));
    }
    Ok(excluded)
}

/// Reads a relationship graph from a file.
pub fn load_adjlist(path: impl AsRef<Path>) -> Result<RelationshipGraph> {
    read_adjlist(BufReader::new(File::open(path)?))
}

/// Reads an exclusion list from a file.
pub fn load_exclusions(path: impl AsRef<Path>) -> Result<ExclusionSet> {
    read_exclusions(BufReader::new(File::open(path)?))
}
