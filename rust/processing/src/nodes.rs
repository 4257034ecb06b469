// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Node extraction.

use stria_model::{Model, Node, Selection};

/// Extract selected nodes as a dense 1-based sequence.
///
/// The result spans `1..=max` over the selected ids; index `i` holds the node
/// with id `i + 1` or `None` where the table has a gap or the selection
/// excludes the id. Length always equals the highest selected id present.
pub fn extract_nodes(model: &Model, selection: &Selection) -> Vec<Option<Node>> {
    let max = model
        .nodes
        .keys()
        .copied()
        .filter(|id| selection.contains(*id))
        .max()
        .unwrap_or(0);

    tracing::debug!(selection = %selection, max_id = max, "extracting nodes");

    (1..=max)
        .map(|id| {
            if selection.contains(id) {
                model.nodes.get(&id).copied()
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stria_model::Node;

    fn sample_model() -> Model {
        let mut model = Model::new();
        model.add_node(Node::new(1, 0.0, 0.0, 0.0));
        model.add_node(Node::new(2, 1.0, 0.0, 0.0));
        model.add_node(Node::new(5, 0.0, 1.0, 0.0));
        model
    }

    #[test]
    fn test_dense_with_gaps() {
        let nodes = extract_nodes(&sample_model(), &Selection::All);
        assert_eq!(nodes.len(), 5);
        assert_eq!(nodes[0].unwrap().id, 1);
        assert_eq!(nodes[1].unwrap().id, 2);
        assert!(nodes[2].is_none());
        assert!(nodes[3].is_none());
        assert_eq!(nodes[4].unwrap().id, 5);
    }

    #[test]
    fn test_selection_filters_and_bounds_length() {
        let nodes = extract_nodes(&sample_model(), &Selection::Ids(vec![2]));
        assert_eq!(nodes.len(), 2);
        assert!(nodes[0].is_none());
        assert_eq!(nodes[1].unwrap().id, 2);
    }

    #[test]
    fn test_empty_table() {
        assert!(extract_nodes(&Model::new(), &Selection::All).is_empty());
    }
}
