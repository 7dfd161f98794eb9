use std::path::{Path, PathBuf};

/// A playable leaf of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Display name (the file name).
    pub name: String,
    pub path: PathBuf,
}

/// A node of the catalog tree.
///
/// Track leaves refer to their record in the flattened index by position,
/// so the tree and the index can never disagree about a track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogNode {
    Directory {
        name: String,
        path: PathBuf,
        children: Vec<CatalogNode>,
    },
    Track(usize),
}

impl CatalogNode {
    #[cfg(test)]
    pub fn is_directory(&self) -> bool {
        matches!(self, CatalogNode::Directory { .. })
    }
}

/// One line of the rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineRow {
    pub depth: usize,
    pub name: String,
    /// Index into the flattened tracks, `None` for directories.
    pub track: Option<usize>,
}

/// The scanned library: a directory tree plus the pre-order list of its tracks.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    root_path: PathBuf,
    root: Option<CatalogNode>,
    tracks: Vec<Track>,
    outline: Vec<OutlineRow>,
}

impl Catalog {
    /// A catalog with no directories and no tracks.
    pub fn empty(root_path: &Path) -> Self {
        Self {
            root_path: root_path.to_path_buf(),
            ..Self::default()
        }
    }

    pub(super) fn from_tree(root_path: &Path, root: CatalogNode, tracks: Vec<Track>) -> Self {
        let mut outline = Vec::new();
        push_outline(&root, 0, &tracks, &mut outline);
        Self {
            root_path: root_path.to_path_buf(),
            root: Some(root),
            tracks,
            outline,
        }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    #[cfg(test)]
    pub fn root(&self) -> Option<&CatalogNode> {
        self.root.as_ref()
    }

    /// Track leaves in pre-order. Directories never appear here.
    pub fn flattened_tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.flattened_tracks().len()
    }

    pub fn is_empty(&self) -> bool {
        self.flattened_tracks().is_empty()
    }

    pub fn track(&self, index: usize) -> Option<&Track> {
        self.flattened_tracks().get(index)
    }

    /// Display name of the track at `index`, or `""` when there is none.
    pub fn track_display_name_at(&self, index: usize) -> &str {
        self.track(index).map(|t| t.name.as_str()).unwrap_or("")
    }

    /// Display names of every track, in flattened order.
    #[cfg(test)]
    pub fn track_names(&self) -> Vec<&str> {
        self.tracks.iter().map(|t| t.name.as_str()).collect()
    }

    /// First track whose display name equals `name`.
    #[cfg(test)]
    pub fn position_of_name(&self, name: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.name == name)
    }

    /// First track whose path equals `path`.
    pub fn position_of_path(&self, path: &Path) -> Option<usize> {
        self.tracks.iter().position(|t| t.path == path)
    }

    /// Renderable rows of the tree, root first.
    pub fn outline(&self) -> &[OutlineRow] {
        &self.outline
    }
}

fn push_outline(node: &CatalogNode, depth: usize, tracks: &[Track], rows: &mut Vec<OutlineRow>) {
    match node {
        CatalogNode::Directory { name, children, .. } => {
            rows.push(OutlineRow {
                depth,
                name: name.clone(),
                track: None,
            });
            for child in children {
                push_outline(child, depth + 1, tracks, rows);
            }
        }
        CatalogNode::Track(index) => rows.push(OutlineRow {
            depth,
            name: tracks[*index].name.clone(),
            track: Some(*index),
        }),
    }
}
