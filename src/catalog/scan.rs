use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::LibrarySettings;

use super::model::{Catalog, CatalogNode, Track};

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn entry_name(entry: &DirEntry) -> String {
    entry.file_name().to_string_lossy().into_owned()
}

/// A directory whose children are still being collected.
struct OpenDir {
    depth: usize,
    name: String,
    path: PathBuf,
    children: Vec<CatalogNode>,
}

impl OpenDir {
    fn into_node(self) -> CatalogNode {
        CatalogNode::Directory {
            name: self.name,
            path: self.path,
            children: self.children,
        }
    }
}

/// Attach the innermost open directory to its parent.
fn close_innermost(stack: &mut Vec<OpenDir>) {
    if stack.len() < 2 {
        return;
    }
    if let Some(dir) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(dir.into_node());
        }
    }
}

impl Catalog {
    /// Scan `root` into a catalog.
    ///
    /// Entries are visited in pre-order with siblings sorted by file name, so
    /// both the tree and the flattened track list are deterministic. An
    /// unreadable root yields an empty catalog; unreadable entries further
    /// down are skipped.
    pub fn build(root: &Path, settings: &LibrarySettings) -> Catalog {
        match fs::metadata(root) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                warn!(root = %root.display(), "catalog root is not a directory");
                return Catalog::empty(root);
            }
            Err(err) => {
                warn!(root = %root.display(), error = %err, "catalog root is unreadable");
                return Catalog::empty(root);
            }
        }

        let mut walker = WalkDir::new(root)
            .follow_links(settings.follow_links)
            .sort_by_file_name();
        if let Some(d) = settings.max_depth {
            walker = walker.max_depth(d);
        }

        let mut stack: Vec<OpenDir> = Vec::new();
        let mut tracks: Vec<Track> = Vec::new();

        for entry in walker
            .into_iter()
            .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    warn!(root = %root.display(), error = %err, "catalog root is unreadable");
                    return Catalog::empty(root);
                }
                Err(err) => {
                    debug!(error = %err, "skipping unreadable catalog entry");
                    continue;
                }
            };

            // Pre-order: everything at this depth or deeper is finished.
            let depth = entry.depth();
            while stack.last().is_some_and(|dir| dir.depth >= depth) && stack.len() > 1 {
                close_innermost(&mut stack);
            }

            if entry.file_type().is_dir() {
                let name = if depth == 0 {
                    root.display().to_string()
                } else {
                    entry_name(&entry)
                };
                stack.push(OpenDir {
                    depth,
                    name,
                    path: entry.path().to_path_buf(),
                    children: Vec::new(),
                });
            } else if is_audio_file(entry.path(), settings) {
                let Some(parent) = stack.last_mut() else {
                    continue;
                };
                parent.children.push(CatalogNode::Track(tracks.len()));
                tracks.push(Track {
                    name: entry_name(&entry),
                    path: entry.path().to_path_buf(),
                });
            }
        }

        while stack.len() > 1 {
            close_innermost(&mut stack);
        }

        let Some(root_dir) = stack.pop() else {
            return Catalog::empty(root);
        };

        info!(
            root = %root.display(),
            tracks = tracks.len(),
            "catalog built"
        );
        Catalog::from_tree(root, root_dir.into_node(), tracks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_audio_file_matches_configured_extensions_case_insensitive() {
        let settings = LibrarySettings::default();
        assert!(is_audio_file(Path::new("/tmp/a.mp3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.MP3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.flac"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.wav"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.ogg"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a.txt"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a"), &settings));
    }

    #[test]
    fn is_audio_file_tolerates_dotted_extensions_in_settings() {
        let settings = LibrarySettings {
            extensions: vec![".Opus".into(), "  ".into()],
            ..LibrarySettings::default()
        };
        assert!(is_audio_file(Path::new("/tmp/a.opus"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a.mp3"), &settings));
    }
}
