use serde::{Deserialize, Serialize};

/// A record together with its derived children. The record's wire fields are
/// flattened so the node serializes as the record plus a `children` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode<R> {
    #[serde(flatten)]
    pub record: R,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode<R>>,
}

impl<R> TreeNode<R> {
    /// Number of nodes in this subtree, including self
    pub fn size(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_: &R, _| count += 1);
        count
    }

    /// Pre-order walk over this subtree
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a R, usize)) {
        let mut stack = vec![(self, 0)];
        while let Some((node, depth)) = stack.pop() {
            visit(&node.record, depth);
            stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
        }
    }
}

// Deep chains would otherwise recurse once per level while dropping.
impl<R> Drop for TreeNode<R> {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Tree-select option: `{ value, label, children }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionNode<Id> {
    pub value: Id,
    pub label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OptionNode<Id>>,
}

impl<Id: PartialEq> OptionNode<Id> {
    pub fn contains(&self, value: &Id) -> bool {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if &node.value == value {
                return true;
            }
            stack.extend(node.children.iter());
        }
        false
    }
}

impl<Id> Drop for OptionNode<Id> {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Total node count of a forest
pub fn forest_size<R>(forest: &[TreeNode<R>]) -> usize {
    forest.iter().map(TreeNode::size).sum()
}
