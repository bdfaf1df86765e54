use std::collections::{HashMap, HashSet, VecDeque};

use super::types::{OptionNode, TreeNode};
use super::TreeRecord;
use crate::config::config;
use crate::models::{Menu, MenuId, Permission, PermissionId};

/// Builds forests from flat record lists.
///
/// Pure over its input: nothing is mutated, nothing is cached, and repeated
/// calls over the same slice produce identical output. Malformed data never
/// fails the build:
///
/// - a record whose parent is missing from the input becomes a root;
/// - a child whose id is already on the current ancestor chain is not
///   descended into (cycle cut);
/// - records that only sit on cycles unreachable from any root are emitted
///   after the roots, in input order, each exactly once.
#[derive(Debug, Clone, Copy)]
pub struct TreeBuilder {
    log_anomalies: bool,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self { log_anomalies: config().tree.log_anomalies }
    }
}

impl TreeBuilder {
    pub fn new(log_anomalies: bool) -> Self {
        Self { log_anomalies }
    }

    /// Flat records to a forest of full nodes
    pub fn build<R>(&self, records: &[R]) -> Vec<TreeNode<R>>
    where
        R: TreeRecord + Clone,
    {
        let included = vec![true; records.len()];
        let make = |record: &R, children: Vec<TreeNode<R>>| TreeNode {
            record: record.clone(),
            children,
        };
        self.assemble(records, &included, &make)
    }

    /// Flat records to picker options, dropping `exclude` and everything
    /// descended from it.
    pub fn build_options<R>(&self, records: &[R], exclude: Option<&R::Id>) -> Vec<OptionNode<R::Id>>
    where
        R: TreeRecord,
    {
        let included = match exclude {
            Some(id) => self.exclusion_mask(records, id),
            None => vec![true; records.len()],
        };
        let make = |record: &R, children: Vec<OptionNode<R::Id>>| OptionNode {
            value: record.record_id(),
            label: record.label().to_string(),
            children,
        };
        self.assemble(records, &included, &make)
    }

    /// `false` for every record whose id is `root` or that descends from it.
    /// Walks by parent id over the whole input, so it terminates on cycles.
    fn exclusion_mask<R: TreeRecord>(&self, records: &[R], root: &R::Id) -> Vec<bool> {
        let mut by_parent: HashMap<R::Id, Vec<usize>> = HashMap::new();
        for (i, record) in records.iter().enumerate() {
            if let Some(parent) = record.parent_record_id() {
                by_parent.entry(parent).or_default().push(i);
            }
        }

        let mut included = vec![true; records.len()];
        let mut queue: VecDeque<usize> = records
            .iter()
            .enumerate()
            .filter(|(_, r)| &r.record_id() == root)
            .map(|(i, _)| i)
            .collect();

        // the excluded id may not be in the input; its children still go
        if queue.is_empty() {
            if let Some(children) = by_parent.get(root) {
                queue.extend(children.iter().copied());
            }
        }

        while let Some(i) = queue.pop_front() {
            if !included[i] {
                continue;
            }
            included[i] = false;
            if let Some(children) = by_parent.get(&records[i].record_id()) {
                queue.extend(children.iter().copied().filter(|c| included[*c]));
            }
        }

        included
    }

    fn assemble<R, T>(
        &self,
        records: &[R],
        included: &[bool],
        make: &dyn Fn(&R, Vec<T>) -> T,
    ) -> Vec<T>
    where
        R: TreeRecord,
    {
        let index = SiblingIndex::new(records, included, self.log_anomalies);
        let mut emitted = vec![false; records.len()];
        let mut forest = Vec::with_capacity(index.roots.len());

        for &root in &index.roots {
            if !emitted[root] {
                forest.extend(self.expand(&index, root, &mut emitted, make));
            }
        }

        // whatever is left only hangs off cycles no root reaches
        for i in 0..records.len() {
            if included[i] && !emitted[i] {
                if self.log_anomalies {
                    tracing::warn!(
                        id = ?records[i].record_id(),
                        "record unreachable from any root (cycle); emitting at top level"
                    );
                }
                forest.extend(self.expand(&index, i, &mut emitted, make));
            }
        }

        forest
    }

    /// Depth-first expansion of the subtree at `at` on an explicit stack,
    /// so depth is bounded by memory rather than the thread stack.
    fn expand<R, T>(
        &self,
        index: &SiblingIndex<'_, R>,
        at: usize,
        emitted: &mut [bool],
        make: &dyn Fn(&R, Vec<T>) -> T,
    ) -> Option<T>
    where
        R: TreeRecord,
    {
        let mut ancestors: HashSet<R::Id> = HashSet::new();
        let mut stack = vec![index.open(at, &mut ancestors, emitted)];
        let mut finished = None;

        while let Some(frame) = stack.last_mut() {
            if let Some(&child) = frame.pending.next() {
                let child_id = index.records[child].record_id();
                if ancestors.contains(&child_id) {
                    if self.log_anomalies {
                        tracing::warn!(id = ?child_id, "cycle in parent chain; subtree cut");
                    }
                    continue;
                }
                // duplicate ids can offer the same record twice
                if emitted[child] {
                    continue;
                }
                stack.push(index.open(child, &mut ancestors, emitted));
                continue;
            }

            if let Some(done) = stack.pop() {
                let record = &index.records[done.at];
                ancestors.remove(&record.record_id());
                let node = make(record, done.children);
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => finished = Some(node),
                }
            }
        }

        finished
    }
}

/// One record being expanded: its remaining children and those built so far
struct Frame<'a, T> {
    at: usize,
    pending: std::slice::Iter<'a, usize>,
    children: Vec<T>,
}

/// Parent id to ordered child positions, plus ordered root positions
struct SiblingIndex<'a, R: TreeRecord> {
    records: &'a [R],
    children: HashMap<R::Id, Vec<usize>>,
    roots: Vec<usize>,
}

impl<'a, R: TreeRecord> SiblingIndex<'a, R> {
    fn new(records: &'a [R], included: &[bool], log_anomalies: bool) -> Self {
        let known: HashSet<R::Id> = records
            .iter()
            .zip(included)
            .filter(|(_, inc)| **inc)
            .map(|(r, _)| r.record_id())
            .collect();

        let mut children: HashMap<R::Id, Vec<usize>> = HashMap::new();
        let mut roots = Vec::new();

        for (i, record) in records.iter().enumerate() {
            if !included[i] {
                continue;
            }
            match record.parent_record_id() {
                Some(parent) if known.contains(&parent) => {
                    children.entry(parent).or_default().push(i)
                }
                Some(parent) => {
                    if log_anomalies {
                        tracing::debug!(
                            id = ?record.record_id(),
                            parent = ?parent,
                            "parent not in input; treating as root"
                        );
                    }
                    roots.push(i);
                }
                None => roots.push(i),
            }
        }

        // sort_by_key is stable: equal keys keep input order
        roots.sort_by_key(|&i| records[i].sort_key());
        for group in children.values_mut() {
            group.sort_by_key(|&i| records[i].sort_key());
        }

        Self { records, children, roots }
    }

    fn open<T>(
        &self,
        at: usize,
        ancestors: &mut HashSet<R::Id>,
        emitted: &mut [bool],
    ) -> Frame<'_, T> {
        emitted[at] = true;
        let id = self.records[at].record_id();
        let pending = self.children.get(&id).map(Vec::as_slice).unwrap_or(&[]).iter();
        ancestors.insert(id);
        Frame {
            at,
            pending,
            children: Vec::new(),
        }
    }
}

/// Menu list to navigation forest
pub fn build_tree<R>(records: &[R]) -> Vec<TreeNode<R>>
where
    R: TreeRecord + Clone,
{
    TreeBuilder::default().build(records)
}

/// Parent picker for editing `exclude_id` (or `None` when creating): a menu
/// can never be moved under itself or one of its descendants.
pub fn build_parent_options(
    records: &[Menu],
    exclude_id: Option<MenuId>,
) -> Vec<OptionNode<MenuId>> {
    TreeBuilder::default().build_options(records, exclude_id.as_ref())
}

/// Permission catalogue grouped for display, in catalogue order
pub fn build_permission_tree(permissions: &[Permission]) -> Vec<OptionNode<PermissionId>> {
    TreeBuilder::default().build_options(permissions, None)
}
