//! File aggregation: walk the input paths, filter through the exclusion
//! list, and write every surviving file into one fenced-block artifact.

use std::env;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, error};
use owo_colors::OwoColorize;

use crate::error::Result;
use crate::exclude::ExcludeList;

pub struct CombineConfig {
    pub paths: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub recursive: bool,
    pub excludes: ExcludeList,
    pub verbose: bool,
}

impl Default for CombineConfig {
    fn default() -> Self {
        Self {
            paths: vec![PathBuf::from(".")],
            output: None,
            recursive: false,
            excludes: ExcludeList::default(),
            verbose: false,
        }
    }
}

pub struct CombineSummary {
    pub output: PathBuf,
    pub queued: usize,
    pub processed: Vec<PathBuf>,
    pub excluded: Vec<(PathBuf, String)>,
    pub skipped_dirs: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl CombineSummary {
    pub fn total_found(&self) -> usize {
        self.queued + self.excluded.len() + self.skipped_dirs.len()
    }

    pub fn print(&self, verbose: bool) {
        if verbose {
            println!("\nSummary:");
            println!("Total items found: {}", self.total_found());
            println!("Successfully processed: {}", self.processed.len());
            println!("Excluded: {}", self.excluded.len());
            println!("Skipped directories: {}", self.skipped_dirs.len());
            println!("Failed: {}", self.failed.len());

            if !self.skipped_dirs.is_empty() {
                println!("\nSkipped directories (use -r flag to include):");
                for dir in &self.skipped_dirs {
                    println!("{}", format!("  {}", dir.display()).blue());
                }
            }

            if !self.failed.is_empty() {
                println!("\nFailed files:");
                for (path, reason) in &self.failed {
                    println!("{}", format!("  {}: {}", path.display(), reason).red());
                }
            }
        } else if !self.skipped_dirs.is_empty() {
            println!(
                "{}",
                format!(
                    "Processed: {} files (directories skipped: {}, excluded: {}, failed: {})\nResult: {}",
                    self.processed.len(),
                    self.skipped_dirs.len(),
                    self.excluded.len(),
                    self.failed.len(),
                    self.output.display()
                )
                .green()
            );
        } else {
            println!(
                "{}",
                format!(
                    "Processed: {} files (skipped: {}, failed: {})\nResult: {}",
                    self.processed.len(),
                    self.excluded.len(),
                    self.failed.len(),
                    self.output.display()
                )
                .green()
            );
        }
    }
}

/// Collects, filters and writes the input files, returning the run's
/// accounting. Per-file read failures are recorded and do not abort the
/// run; only an unwritable output is fatal.
pub fn run(config: &CombineConfig, multi: &MultiProgress) -> Result<CombineSummary> {
    let output = output_path(config)?;
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    // Created before traversal so the canonical path exists and the file
    // can be skipped when a scanned directory contains it.
    let file = File::create(&output)?;

    let mut collector = Collector {
        excludes: &config.excludes,
        recursive: config.recursive,
        output_canon: output.canonicalize().ok(),
        files: Vec::new(),
        excluded: Vec::new(),
        skipped_dirs: Vec::new(),
        failed: Vec::new(),
    };
    for path in &config.paths {
        collector.collect_path(path);
    }

    let mut files = collector.files;
    files.sort();
    files.dedup();

    let mut processed = Vec::new();
    let mut failed = collector.failed;

    let progress = multi.add(ProgressBar::new(files.len() as u64));
    progress.set_style(
        ProgressStyle::with_template("[{percent:>3}%] {pos}/{len} {bar:40} ({eta} @ {per_sec})")
            .unwrap(),
    );

    let mut out = BufWriter::new(file);
    for path in &files {
        match fs::read(path) {
            Ok(bytes) => {
                let content = String::from_utf8_lossy(&bytes);
                write!(out, "\n{}\n```{}\n", path.display(), file_extension(path))?;
                out.write_all(content.as_bytes())?;
                write!(out, "\n```\n")?;
                debug!("Processed: {}", path.display());
                processed.push(path.clone());
            }
            Err(e) => {
                error!("Error processing {}: {}", path.display(), e);
                failed.push((path.clone(), e.to_string()));
            }
        }
        progress.inc(1);
    }
    out.flush()?;
    progress.finish_and_clear();

    Ok(CombineSummary {
        output,
        queued: files.len(),
        processed,
        excluded: collector.excluded,
        skipped_dirs: collector.skipped_dirs,
        failed,
    })
}

fn output_path(config: &CombineConfig) -> Result<PathBuf> {
    match &config.output {
        Some(path) => Ok(path.clone()),
        None => {
            let timestamp = Local::now().format("%H%M");
            Ok(env::current_dir()?.join(format!("Combined-{timestamp}.txt")))
        }
    }
}

/// Extension without the dot, `txt` when there is none.
pub fn file_extension(path: &Path) -> &str {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() => ext,
        _ => "txt",
    }
}

struct Collector<'a> {
    excludes: &'a ExcludeList,
    recursive: bool,
    output_canon: Option<PathBuf>,
    files: Vec<PathBuf>,
    excluded: Vec<(PathBuf, String)>,
    skipped_dirs: Vec<PathBuf>,
    failed: Vec<(PathBuf, String)>,
}

impl Collector<'_> {
    fn collect_path(&mut self, path: &Path) {
        if path.is_dir() {
            if self.recursive {
                self.walk_dir(path);
            } else {
                self.list_dir(path);
            }
        } else if path.is_file() {
            self.consider(path.to_path_buf());
        } else {
            debug!("Path not found: {}", path.display());
            self.failed
                .push((path.to_path_buf(), "File not found".to_string()));
        }
    }

    /// Top level only. Child directories are recorded, not entered.
    fn list_dir(&mut self, dir: &Path) {
        let entries = match dir.read_dir() {
            Ok(entries) => entries,
            Err(e) => {
                error!("Error reading {}: {}", dir.display(), e);
                self.failed.push((dir.to_path_buf(), e.to_string()));
                return;
            }
        };
        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(e) => {
                    self.failed.push((dir.to_path_buf(), e.to_string()));
                    continue;
                }
            };
            if self.is_output(&path) {
                continue;
            }
            if path.is_dir() {
                debug!(
                    "Skipped directory: {} (use -r for recursive mode)",
                    path.display()
                );
                self.skipped_dirs.push(path);
            } else {
                self.consider(path);
            }
        }
    }

    fn walk_dir(&mut self, dir: &Path) {
        let entries = match dir.read_dir() {
            Ok(entries) => entries,
            Err(e) => {
                error!("Error reading {}: {}", dir.display(), e);
                self.failed.push((dir.to_path_buf(), e.to_string()));
                return;
            }
        };
        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(e) => {
                    self.failed.push((dir.to_path_buf(), e.to_string()));
                    continue;
                }
            };
            if self.is_output(&path) {
                continue;
            }
            if path.is_dir() {
                // Symlinked directories are listed, not entered.
                if path.is_symlink() {
                    debug!("Skipped symlinked directory: {}", path.display());
                } else {
                    self.walk_dir(&path);
                }
            } else {
                self.consider(path);
            }
        }
    }

    fn consider(&mut self, path: PathBuf) {
        if let Some(pattern) = self.excludes.matched_pattern(&path) {
            debug!("Skipped: {} (matched pattern: {})", path.display(), pattern);
            self.excluded.push((path, pattern.to_string()));
        } else {
            debug!("Queued: {}", path.display());
            self.files.push(path);
        }
    }

    fn is_output(&self, path: &Path) -> bool {
        match &self.output_canon {
            Some(canon) => path.canonicalize().map(|p| p == *canon).unwrap_or(false),
            None => false,
        }
    }
}
