//! Path resolution over a backend's native nodes.
//!
//! Reads walk existing sections only and report a miss as `None`. Writes
//! create (or replace non-section nodes with) empty sections for every
//! non-terminal segment, then attach the value under the terminal key.

use crate::backend::Backend;
use crate::Path;

/// Look up the node at `path`, or `None` if any step is missing or walks
/// through a non-section.
pub fn get_node<'tree, B: Backend>(tree: &'tree B, path: &Path) -> Option<&'tree B> {
    let mut cursor = tree;
    for component in path.iter() {
        cursor = cursor.child(component)?;
    }
    Some(cursor)
}

/// Mutable twin of [`get_node`]. Never creates sections.
pub fn get_node_mut<'tree, B: Backend>(tree: &'tree mut B, path: &Path) -> Option<&'tree mut B> {
    let mut cursor = tree;
    for component in path.iter() {
        cursor = cursor.child_mut(component)?;
    }
    Some(cursor)
}

/// Attach `value` at `path`, overwriting whatever was there.
///
/// An empty path replaces the whole tree.
pub fn set_node<B: Backend>(tree: &mut B, path: &Path, value: B) {
    let Some((parent, last)) = path.split_last() else {
        *tree = value;
        return;
    };

    let mut cursor = tree;
    for component in parent.iter() {
        cursor = cursor.child_section_mut(component);
    }
    cursor.insert_child(last, value);
}

/// Detach the node at `path`, returning it if it existed.
pub fn remove_node<B: Backend>(tree: &mut B, path: &Path) -> Option<B> {
    let (parent, last) = path.split_last()?;

    get_node_mut(tree, &parent)?.remove_child(last)
}
