//! Glob-based path exclusion.
//!
//! Patterns are matched against the full relative path and against the
//! basename, whichever hits first. `*` and `?` cross directory separators,
//! so `venv/*` covers the whole subtree.

use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::Result;

pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    // binaries
    "*.exe",
    "*.dll",
    "*.so",
    "*.dylib",
    "*.bin",
    "*.o",
    // images
    "*.jpg",
    "*.jpeg",
    "*.png",
    "*.gif",
    "*.bmp",
    "*.ico",
    "*.svg",
    "*.webp",
    // audio and video
    "*.mp3",
    "*.wav",
    "*.ogg",
    "*.mp4",
    "*.avi",
    "*.mkv",
    "*.mov",
    // archives
    "*.zip",
    "*.rar",
    "*.7z",
    "*.tar",
    "*.gz",
    "*.bz2",
    // VCS, IDE and environment directories
    ".git/*",
    ".svn/*",
    ".hg/*",
    ".vscode/*",
    ".idea/*",
    "node_modules/*",
    "venv/*",
    "env/*",
    "__pycache__/*",
    // office documents
    "*.pdf",
    "*.doc",
    "*.docx",
    "*.xls",
    "*.xlsx",
    "*.ppt",
    "*.pptx",
    // fonts
    "*.ttf",
    "*.otf",
    "*.woff",
    "*.woff2",
    "*.eot",
    // databases
    "*.db",
    "*.sqlite",
    "*.sqlite3",
    // python bytecode
    "*.pyc",
    "*.pyo",
    "*.pyd",
    // temporary files
    "*.tmp",
    "*.temp",
    "*.swp",
    "*.swo",
    "*~",
    // gettext catalogs
    "*.mo",
    "*.po",
];

/// An ordered pattern list compiled into a single matcher.
///
/// The list order matters: the verdict reports the first pattern that
/// matched, which is what the combiner prints next to excluded files.
#[derive(Debug)]
pub struct ExcludeList {
    patterns: Vec<String>,
    set: GlobSet,
}

impl ExcludeList {
    pub fn new(patterns: Vec<String>) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            builder.add(Glob::new(pattern)?);
        }
        Ok(Self {
            set: builder.build()?,
            patterns,
        })
    }

    /// The default table plus any user-supplied patterns.
    pub fn build(extra: &[String], use_defaults: bool) -> Result<Self> {
        let mut patterns: Vec<String> = Vec::new();
        if use_defaults {
            patterns.extend(DEFAULT_EXCLUDE_PATTERNS.iter().map(|p| p.to_string()));
        }
        patterns.extend(extra.iter().cloned());
        Self::new(patterns)
    }

    /// Returns the first pattern in list order matching either the
    /// normalized path or its basename, or `None` if the path is clean.
    ///
    /// Separators are normalized to `/` and a leading `./` is stripped
    /// before matching, so `node_modules/*` hits `./node_modules/x`.
    pub fn matched_pattern(&self, path: &Path) -> Option<&str> {
        let lossy = path.to_string_lossy();
        let normalized = lossy.replace(std::path::MAIN_SEPARATOR, "/");
        let normalized = normalized.strip_prefix("./").unwrap_or(&normalized);
        let basename = normalized.rsplit('/').next().unwrap_or(normalized);

        let index = self
            .set
            .matches(normalized)
            .into_iter()
            .chain(self.set.matches(basename))
            .min()?;
        Some(&self.patterns[index])
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        self.matched_pattern(path).is_some()
    }
}

impl Default for ExcludeList {
    fn default() -> Self {
        Self {
            patterns: Vec::new(),
            set: GlobSet::empty(),
        }
    }
}
