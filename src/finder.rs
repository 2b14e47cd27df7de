// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::schema::{RootDocument, SchemaNode};

use indexmap::IndexSet;
use log::debug;

/// Field names from the content root down to a node.
pub type Path = Vec<String>;

/// Find every path under the document's content root that contains `target` as a segment.
///
/// Paths are collected depth first, a node's own path after those of its children. The
/// collection is then reversed and duplicates are dropped, keeping the first occurrence. The
/// first path returned is therefore not necessarily the shallowest match: when the same name
/// appears at several places, the order depends on where the fields are declared.
pub fn find_paths(document: &RootDocument, target: &str) -> Vec<Path> {
    find_paths_in(document.content(), target)
}

/// Same as [`find_paths`], starting from an arbitrary node.
pub fn find_paths_in(node: &SchemaNode, target: &str) -> Vec<Path> {
    let mut collected = traverse(node, &[], target);
    collected.reverse();

    let paths: Vec<Path> = collected
        .into_iter()
        .collect::<IndexSet<Path>>()
        .into_iter()
        .collect();

    debug!("found {} path(s) containing {target:?}", paths.len());
    paths
}

fn traverse(node: &SchemaNode, path: &[String], target: &str) -> Vec<Path> {
    let mut found = match node {
        SchemaNode::Object(properties) => properties
            .iter()
            .flat_map(|(name, child)| {
                let mut child_path = path.to_vec();
                child_path.push(name.clone());
                traverse(child, &child_path, target)
            })
            .collect(),
        // Arrays do not name a field.
        SchemaNode::Array(items) => traverse(items, path, target),
        SchemaNode::Leaf => vec![],
    };

    if path.iter().any(|segment| segment == target) {
        found.push(path.to_vec());
    }
    found
}

/// Every path reachable from the content root, in declaration order, the root excluded.
///
/// Sibling names are unique and array hops add no segment, so no path is listed twice.
pub fn all_paths(document: &RootDocument) -> Vec<Path> {
    fn walk(node: &SchemaNode, path: &mut Path, out: &mut Vec<Path>) {
        match node {
            SchemaNode::Object(properties) => {
                for (name, child) in properties {
                    path.push(name.clone());
                    out.push(path.clone());
                    walk(child, path, out);
                    path.pop();
                }
            }
            SchemaNode::Array(items) => walk(items, path, out),
            SchemaNode::Leaf => (),
        }
    }

    let mut out = vec![];
    walk(document.content(), &mut vec![], &mut out);
    out
}
