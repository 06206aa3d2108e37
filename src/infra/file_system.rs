use crate::core::pattern::matches_pattern;
use crate::domain::models::{ConcatConfig, FileBody, ReadErrorPolicy};
use anyhow::Context;
use glob::Pattern;
use log::{debug, info, warn};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
}

/// The plain files directly inside one directory, sorted by name.
#[derive(Debug, Clone)]
pub struct DirectoryBatch {
    pub dir: PathBuf,
    pub files: Vec<FileEntry>,
}

impl DirectoryBatch {
    fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            files: Vec::new(),
        }
    }

    pub fn matching<'a>(
        &'a self,
        pattern: &'a Pattern,
    ) -> impl Iterator<Item = &'a FileEntry> + 'a {
        self.files
            .iter()
            .filter(move |file| matches_pattern(&file.name, pattern))
    }
}

// Files sort ahead of subdirectories so a directory's own files are yielded
// before the walker descends any further.
fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn is_dir_link(entry: &DirEntry) -> bool {
    entry.path_is_symlink() && entry.path().is_dir()
}

/// Walks `config.root_path` depth-first, handing each visited directory's
/// files to `visit` as one batch. Directories named in the exclusion set are
/// pruned before descent. Entries the walker cannot read are logged and
/// skipped. Returns the number of directories visited.
pub fn walk_directories<F>(config: &ConcatConfig, mut visit: F) -> anyhow::Result<usize>
where
    F: FnMut(&DirectoryBatch) -> anyhow::Result<()>,
{
    info!("Walking directory tree at: {}", config.root_path);
    debug!("Excluded directories: {:?}", config.excluded_dirs);

    let walker = WalkDir::new(&config.root_path)
        .follow_links(false)
        .sort_by(files_first)
        .into_iter()
        .filter_entry(|e| {
            let pruned = e.depth() > 0
                && e.file_type().is_dir()
                && config.is_excluded_dir(&e.file_name().to_string_lossy());
            if pruned {
                debug!("Pruning excluded directory: {}", e.path().display());
            }
            !pruned
        });

    let mut current: Option<DirectoryBatch> = None;
    let mut visited = 0;

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Skipping unreadable path: {}", err);
                continue;
            }
        };

        if entry.file_type().is_dir() {
            if let Some(batch) = current.take() {
                visit(&batch)?;
            }
            debug!("Entering directory: {}", entry.path().display());
            current = Some(DirectoryBatch::new(entry.into_path()));
            visited += 1;
            continue;
        }

        if is_dir_link(&entry) {
            debug!("Not following directory link: {}", entry.path().display());
            continue;
        }

        match current.as_mut() {
            Some(batch) => batch.files.push(FileEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.into_path(),
            }),
            None => warn!("Root is not a directory: {}", entry.path().display()),
        }
    }

    if let Some(batch) = current.take() {
        visit(&batch)?;
    }

    info!("Visited {} directories", visited);
    Ok(visited)
}

/// `path` relative to `root`, with `/` separators on every platform.
pub fn relative_display_path(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.to_string_lossy().replace('\\', "/")
}

/// Reads a matched file and classifies the result. Invalid UTF-8 is never an
/// error; other I/O failures abort or are recorded depending on `policy`.
pub fn read_file_body(path: &Path, policy: ReadErrorPolicy) -> anyhow::Result<FileBody> {
    debug!("Reading file contents: {}", path.display());

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            return match policy {
                ReadErrorPolicy::Abort => {
                    Err(err).with_context(|| format!("Failed to read {}", path.display()))
                }
                ReadErrorPolicy::Skip => {
                    warn!("Skipping unreadable file {}: {}", path.display(), err);
                    Ok(FileBody::Unreadable(err.to_string()))
                }
            };
        }
    };

    match String::from_utf8(bytes) {
        Ok(text) => {
            debug!("Read {} bytes from file", text.len());
            Ok(FileBody::Text(text))
        }
        Err(err) => {
            debug!("{} is not valid UTF-8: {}", path.display(), err.utf8_error());
            Ok(FileBody::Undecodable)
        }
    }
}
