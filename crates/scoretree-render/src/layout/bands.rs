use super::FlatTree;

/// Leaves take consecutive slots in pre-order (separated per [`FlatTree::separation`]) and every
/// interior node sits midway between its first and last child.
///
/// Each subtree's breadth interval is exactly the span of its own leaves, so sibling subtrees
/// never overlap.
pub(super) fn breadth_units(flat: &FlatTree<'_>) -> Vec<f64> {
    let mut units = vec![0.0; flat.len()];

    let mut prev_leaf: Option<usize> = None;
    for index in 0..flat.len() {
        if !flat.is_leaf(index) {
            continue;
        }
        units[index] = match prev_leaf {
            None => 0.0,
            Some(prev) => units[prev] + flat.separation(prev, index),
        };
        prev_leaf = Some(index);
    }

    // Children always follow their parent in pre-order.
    for index in (0..flat.len()).rev() {
        let children = &flat.nodes[index].children;
        if let (Some(&first), Some(&last)) = (children.first(), children.last()) {
            units[index] = (units[first] + units[last]) / 2.0;
        }
    }

    units
}
