use crate::document::{build_document, BuildOptions, PreviewDocument};
use cipherstudio_project::{Project, Theme};
use crc32fast::Hasher;
use std::sync::Arc;

/// CRC32 over everything a preview document depends on.
///
/// Timestamps and editor-only flags (`isOpen`, `isActive`) are left out, so
/// opening a tab or saving does not invalidate the document.
pub fn project_fingerprint(project: &Project) -> u32 {
    let mut hasher = Hasher::new();

    field(&mut hasher, &project.id);
    field(&mut hasher, &project.name);
    for file in &project.files {
        field(&mut hasher, &file.id);
        field(&mut hasher, &file.name);
        field(&mut hasher, file.kind.as_str());
        field(&mut hasher, &file.path);
        field(&mut hasher, &file.content);
    }
    field(&mut hasher, project.active_file_id.as_deref().unwrap_or(""));

    let settings = &project.settings;
    field(
        &mut hasher,
        match settings.theme {
            Theme::Light => "light",
            Theme::Dark => "dark",
        },
    );
    hasher.update(&[settings.autosave as u8]);
    hasher.update(&settings.font_size.to_le_bytes());

    hasher.finalize()
}

// Length prefix keeps ("ab", "c") and ("a", "bc") apart
fn field(hasher: &mut Hasher, value: &str) {
    hasher.update(&(value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub fingerprint: u32,
    pub rebuild_id: u64,
}

impl CacheKey {
    pub fn new(project: &Project, rebuild_id: u64) -> Self {
        Self {
            fingerprint: project_fingerprint(project),
            rebuild_id,
        }
    }
}

/// Remembers the most recently built document
#[derive(Debug, Default)]
pub struct DocumentCache {
    options: BuildOptions,
    last: Option<(CacheKey, Arc<PreviewDocument>)>,
    hits: u64,
    misses: u64,
}

impl DocumentCache {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Return the cached document for this key or build a new one
    pub fn get_or_build(&mut self, project: &Project, rebuild_id: u64) -> Arc<PreviewDocument> {
        let key = CacheKey::new(project, rebuild_id);

        if let Some((cached_key, document)) = &self.last {
            if *cached_key == key {
                self.hits += 1;
                tracing::debug!("Preview document cache hit ({:08x}, {})", key.fingerprint, rebuild_id);
                return Arc::clone(document);
            }
        }

        self.misses += 1;
        let document = Arc::new(build_document(project, rebuild_id, &self.options));
        self.last = Some((key, Arc::clone(&document)));
        document
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}
