/// Scene fragments: the node content of a loaded asset.
///
/// A fragment is a list of node templates in asset space. Applying it to a
/// scene with a placement matrix creates one SceneNode per template.

use glam::Mat4;
use super::aabb::AABB;

/// One node of a loaded asset, in asset space
#[derive(Debug, Clone)]
pub struct FragmentNode {
    pub name: String,
    pub local_matrix: Mat4,
    pub bounding_box: AABB,
}

impl FragmentNode {
    pub fn new(name: impl Into<String>, local_matrix: Mat4, bounding_box: AABB) -> Self {
        Self {
            name: name.into(),
            local_matrix,
            bounding_box,
        }
    }
}

/// Node content of a loaded asset
#[derive(Debug, Clone, Default)]
pub struct SceneFragment {
    nodes: Vec<FragmentNode>,
}

impl SceneFragment {
    pub fn new(nodes: Vec<FragmentNode>) -> Self {
        Self { nodes }
    }

    /// Single-node fragment
    pub fn single(name: impl Into<String>, bounding_box: AABB) -> Self {
        Self::new(vec![FragmentNode::new(name, Mat4::IDENTITY, bounding_box)])
    }

    pub fn nodes(&self) -> &[FragmentNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Union of all node bounds in asset space (None for an empty fragment)
    pub fn bounds(&self) -> Option<AABB> {
        self.nodes
            .iter()
            .map(|node| node.bounding_box.transformed(&node.local_matrix))
            .reduce(|a, b| AABB::new(a.min.min(b.min), a.max.max(b.max)))
    }
}
