//! Media picker
//!
//! A modal image-library browser over the local filesystem. The picker is
//! launched with fixed options and resolves to either a cancellation or a
//! list of selected assets. While open it owns all keyboard input.

use crossterm::event::{KeyCode, KeyEvent};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// File extensions listed by the picker when restricted to images
const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "heic", "heif", "bmp", "tif", "tiff",
];

#[derive(Debug, Error)]
pub enum PickerError {
    #[error("cannot read directory {path:?}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Which media kinds the picker offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaTypes {
    Images,
    All,
}

/// Options the picker is launched with
#[derive(Debug, Clone, PartialEq)]
pub struct PickerOptions {
    pub media_types: MediaTypes,
    pub allows_editing: bool,
    pub aspect: (u16, u16),
    pub quality: f32,
    pub allows_multiple_selection: bool,
}

impl PickerOptions {
    /// Options used for proof uploads on the Eco-Points screen
    pub fn proof_upload() -> Self {
        Self {
            media_types: MediaTypes::Images,
            allows_editing: true,
            aspect: (4, 3),
            quality: 1.0,
            allows_multiple_selection: false,
        }
    }

    /// One-line description for the picker header
    pub fn summary(&self) -> String {
        let kind = match self.media_types {
            MediaTypes::Images => "Images only",
            MediaTypes::All => "All files",
        };
        let mut parts = vec![kind.to_string()];
        if self.allows_editing {
            parts.push(format!("{}:{} crop", self.aspect.0, self.aspect.1));
        }
        parts.push(format!("quality {:.0}%", self.quality * 100.0));
        if !self.allows_multiple_selection {
            parts.push("single".to_string());
        }
        parts.join(" · ")
    }
}

/// A selected media asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub uri: String,
    pub file_name: String,
    pub file_size: u64,
}

/// Outcome of a picker session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickResult {
    Canceled,
    Picked { assets: Vec<Asset> },
}

impl PickResult {
    /// URI of the first selected asset, if any
    pub fn first_uri(&self) -> Option<&str> {
        match self {
            PickResult::Canceled => None,
            PickResult::Picked { assets } => assets.first().map(|a| a.uri.as_str()),
        }
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, PickResult::Canceled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// A row in the picker listing
#[derive(Debug, Clone)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
    pub size: u64,
}

/// Picker state while the modal is open
#[derive(Debug, Clone)]
pub struct ImagePicker {
    pub options: PickerOptions,
    pub dir: PathBuf,
    pub entries: Vec<Entry>,
    pub selected: usize,
    pub show_hidden: bool,
    pub message: Option<String>,
}

impl ImagePicker {
    /// Open the picker in `start_dir`
    pub fn open(
        start_dir: &Path,
        show_hidden: bool,
        options: PickerOptions,
    ) -> Result<Self, PickerError> {
        let dir = start_dir
            .canonicalize()
            .unwrap_or_else(|_| start_dir.to_path_buf());
        let entries = list_entries(&dir, show_hidden, options.media_types)?;
        debug!(dir = %dir.display(), entries = entries.len(), "picker opened");

        Ok(Self {
            options,
            dir,
            entries,
            selected: 0,
            show_hidden,
            message: None,
        })
    }

    /// Handle a key. Returns `Some` once the picker resolves.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<PickResult> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Some(PickResult::Canceled),
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected < self.entries.len().saturating_sub(1) {
                    self.selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Char('g') | KeyCode::Home => self.selected = 0,
            KeyCode::Char('G') | KeyCode::End => {
                self.selected = self.entries.len().saturating_sub(1);
            }
            KeyCode::Backspace | KeyCode::Char('h') | KeyCode::Left => self.go_up(),
            KeyCode::Char('.') => {
                self.show_hidden = !self.show_hidden;
                let dir = self.dir.clone();
                self.change_dir(dir);
            }
            KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => return self.activate(),
            _ => {}
        }
        None
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.entries.get(self.selected)
    }

    fn activate(&mut self) -> Option<PickResult> {
        let entry = self.selected_entry()?.clone();
        match entry.kind {
            EntryKind::Directory => {
                self.change_dir(entry.path);
                None
            }
            EntryKind::File => Some(PickResult::Picked {
                assets: vec![Asset {
                    uri: file_uri(&entry.path),
                    file_name: entry.name,
                    file_size: entry.size,
                }],
            }),
        }
    }

    fn go_up(&mut self) {
        if let Some(parent) = self.dir.parent().map(Path::to_path_buf) {
            let previous = self.dir.clone();
            self.change_dir(parent);
            // Keep the cursor on the directory we came from
            if let Some(idx) = self.entries.iter().position(|e| e.path == previous) {
                self.selected = idx;
            }
        }
    }

    /// Switch to `dir`, staying put with an inline message on failure
    fn change_dir(&mut self, dir: PathBuf) {
        match list_entries(&dir, self.show_hidden, self.options.media_types) {
            Ok(entries) => {
                self.dir = dir;
                self.entries = entries;
                self.selected = 0;
                self.message = None;
            }
            Err(e) => {
                warn!(error = %e, "picker could not change directory");
                self.message = Some(e.to_string());
            }
        }
    }
}

/// List subdirectories and matching files in `dir`, directories first
pub fn list_entries(
    dir: &Path,
    show_hidden: bool,
    media_types: MediaTypes,
) -> Result<Vec<Entry>, PickerError> {
    let read_err = |source| PickerError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for item in fs::read_dir(dir).map_err(read_err)? {
        let Ok(item) = item else { continue };
        let name = item.file_name().to_string_lossy().into_owned();
        if !show_hidden && name.starts_with('.') {
            continue;
        }

        let path = item.path();
        // Follow symlinks so linked folders behave like folders
        let Ok(meta) = fs::metadata(&path) else { continue };

        if meta.is_dir() {
            entries.push(Entry {
                name,
                path,
                kind: EntryKind::Directory,
                size: 0,
            });
        } else if media_types == MediaTypes::All || is_image(&path) {
            entries.push(Entry {
                name,
                path,
                kind: EntryKind::File,
                size: meta.len(),
            });
        }
    }

    entries.sort_by(|a, b| {
        let a_dir = a.kind == EntryKind::Directory;
        let b_dir = b.kind == EntryKind::Directory;
        b_dir
            .cmp(&a_dir)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });

    Ok(entries)
}

/// Check whether a path has an image extension
pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Build a `file://` URI, percent-encoding characters unsafe in a URL path
pub fn file_uri(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let mut uri = String::from("file://");
    for b in raw.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'/' | b'-' | b'_' | b'.' | b'~' => {
                uri.push(b as char)
            }
            _ => uri.push_str(&format!("%{:02X}", b)),
        }
    }
    uri
}

/// Undo `%XX` escapes, leaving malformed sequences as they are
pub fn percent_decode(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && i + 2 < bytes.len()
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit()
        {
            let hex = |b: u8| (b as char).to_digit(16).unwrap_or(0) as u8;
            out.push((hex(bytes[i + 1]) << 4) | hex(bytes[i + 2]));
            i += 3;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
