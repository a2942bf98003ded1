//! Directory tree derived from file paths.
//!
//! The tree is an arena: nodes live in one `Vec`, ids are indices and parent
//! links are plain ids. Ids follow output order, the root `.` first and every
//! other directory in lexicographic path order, so identical input always
//! yields identical ids.

use std::collections::{BTreeSet, HashMap};

use crate::core::path::{self, ROOT};
use crate::core::ClassifiedFile;

/// Index of a directory in its [`DirectoryTree`].
pub type DirectoryId = usize;

/// Id of the repository root in every tree.
pub const ROOT_ID: DirectoryId = 0;

/// Skeleton of one directory; statistics are attached later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    pub id: DirectoryId,
    pub path: String,
    pub name: String,
    pub parent: Option<DirectoryId>,
    pub depth: usize,
    /// Child directories in path order
    pub children: Vec<DirectoryId>,
    /// Indices into the file list of files located directly in this directory
    pub files: Vec<usize>,
}

impl DirectoryNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DirectoryTree {
    nodes: Vec<DirectoryNode>,
    index: HashMap<String, DirectoryId>,
}

impl DirectoryTree {
    /// Build the skeleton, including every intermediate directory any path implies.
    pub fn build(files: &[ClassifiedFile]) -> Self {
        let mut paths: BTreeSet<&str> = BTreeSet::new();
        for file in files {
            paths.extend(path::ancestors(file.path()).filter(|dir| *dir != ROOT));
        }

        let ordered = std::iter::once(ROOT).chain(paths);
        let mut nodes: Vec<DirectoryNode> = Vec::with_capacity(1 + files.len().min(1024));
        let mut index: HashMap<String, DirectoryId> = HashMap::new();

        for (id, dir) in ordered.enumerate() {
            // Parents sort before their children, so the lookup always hits.
            let parent = (dir != ROOT).then(|| index.get(path::parent(dir)).copied()).flatten();
            if let Some(parent_id) = parent {
                nodes[parent_id].children.push(id);
            }

            nodes.push(DirectoryNode {
                id,
                path: dir.to_string(),
                name: if dir == ROOT {
                    ROOT.to_string()
                } else {
                    path::file_name(dir).to_string()
                },
                parent,
                depth: path::depth(dir),
                children: Vec::new(),
                files: Vec::new(),
            });
            index.insert(dir.to_string(), id);
        }

        for (file_index, file) in files.iter().enumerate() {
            if let Some(&id) = index.get(path::parent(file.path())) {
                nodes[id].files.push(file_index);
            }
        }

        tracing::debug!(directories = nodes.len(), files = files.len(), "Built directory tree");
        Self { nodes, index }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[DirectoryNode] {
        &self.nodes
    }

    pub fn node(&self, id: DirectoryId) -> &DirectoryNode {
        &self.nodes[id]
    }

    pub fn get(&self, dir: &str) -> Option<&DirectoryNode> {
        self.index.get(dir).map(|&id| &self.nodes[id])
    }

    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|node| node.depth).max().unwrap_or(0)
    }

    /// All directory ids, deepest first; ties keep id order.
    pub fn deepest_first(&self) -> Vec<DirectoryId> {
        let mut ids: Vec<DirectoryId> = (0..self.nodes.len()).collect();
        self.sort_deepest_first(&mut ids);
        ids
    }

    fn sort_deepest_first(&self, ids: &mut [DirectoryId]) {
        ids.sort_by(|a, b| {
            self.nodes[*b]
                .depth
                .cmp(&self.nodes[*a].depth)
                .then(a.cmp(b))
        });
    }

    /// Every id in the subtree rooted at `id`, `id` included.
    pub fn subtree(&self, id: DirectoryId) -> Vec<DirectoryId> {
        let mut result = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.nodes[current].children.iter().rev());
        }
        result
    }

    /// One deepest-first id list per top-level directory.
    ///
    /// The partitions are disjoint and together cover every directory but the
    /// root.
    pub fn top_level_partitions(&self) -> Vec<Vec<DirectoryId>> {
        match self.nodes.first() {
            Some(root) => root
                .children
                .iter()
                .map(|&child| {
                    let mut ids = self.subtree(child);
                    self.sort_deepest_first(&mut ids);
                    ids
                })
                .collect(),
            None => Vec::new(),
        }
    }
}
