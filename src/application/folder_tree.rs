// src/application/folder_tree.rs
use crate::domain::Folder;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderNode {
    pub folder: Folder,
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    pub fn id(&self) -> &str {
        &self.folder.id
    }

    /// Pre-order traversal yielding `(depth, folder)`, depth 0 for `self`.
    pub fn walk(&self) -> Vec<(usize, &Folder)> {
        let mut out = Vec::new();
        self.walk_into(0, &mut out);
        out
    }

    fn walk_into<'a>(&'a self, depth: usize, out: &mut Vec<(usize, &'a Folder)>) {
        out.push((depth, &self.folder));
        for child in &self.children {
            child.walk_into(depth + 1, out);
        }
    }
}

/// Pre-order traversal over a whole forest.
pub fn walk_forest(roots: &[FolderNode]) -> Vec<(usize, &Folder)> {
    roots.iter().flat_map(FolderNode::walk).collect()
}

/// Build the folder forest from flat records.
///
/// Roots are folders without parent. Children keep collection order.
/// Folders whose parent does not exist are unreachable and silently left out.
pub fn build_folder_tree(folders: &[Folder]) -> Vec<FolderNode> {
    let mut path = Vec::new();
    folders
        .iter()
        .filter(|f| f.is_root())
        .map(|root| build_node(folders, root, &mut path))
        .collect()
}

// `path` holds the ids of the ancestors being expanded; an id seen twice on
// one path (duplicated ids in stored data) is not expanded again.
fn build_node<'a>(
    folders: &'a [Folder],
    folder: &'a Folder,
    path: &mut Vec<&'a str>,
) -> FolderNode {
    path.push(&folder.id);
    let candidates: Vec<&'a Folder> = folders
        .iter()
        .filter(|f| f.parent_id.as_deref() == Some(folder.id.as_str()))
        .filter(|f| !path.contains(&f.id.as_str()))
        .collect();
    let children = candidates
        .into_iter()
        .map(|child| build_node(folders, child, path))
        .collect();
    path.pop();

    FolderNode {
        folder: folder.clone(),
        children,
    }
}
