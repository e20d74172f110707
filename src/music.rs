//! ID3 tag operations over a directory of MP3 files.

use std::env;
use std::path::{Path, PathBuf};

use lofty::config::WriteOptions;
use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::tag::Tag;
use log::debug;

use crate::error::Result;

pub struct MusicConfig {
    pub dir: PathBuf,
}

impl MusicConfig {
    /// Resolution order: explicit argument, `MUSIC_DIR`, the platform
    /// music folder, the current directory.
    pub fn resolve(dir: Option<PathBuf>) -> Self {
        let dir = dir
            .or_else(|| env::var_os("MUSIC_DIR").map(PathBuf::from))
            .or_else(dirs::audio_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Self { dir }
    }
}

/// Names of the MP3 files directly in `dir`, sorted.
pub fn mp3_files(dir: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in dir.read_dir()? {
        let entry = entry?;
        if let Some(name) = entry.file_name().to_str() {
            if name.ends_with(".mp3") {
                files.push(name.to_string());
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Sets the album artist tag on every MP3 in the directory.
pub fn set_album_artist(config: &MusicConfig, artist: &str) -> Result<()> {
    for name in mp3_files(&config.dir)? {
        edit_tags(&config.dir.join(&name), |tag| {
            tag.insert_text(ItemKey::AlbumArtist, artist.to_string());
        })?;
        debug!("Album Artist is set to '{artist}' for file '{name}'.");
    }
    Ok(())
}

/// Sets album and year on every MP3 whose name starts with a zero-padded
/// 3-digit number in `[start, end]` inclusive. A missing `end` means just
/// the `start` file. Numbers with no matching file are skipped.
pub fn set_album_and_year(
    config: &MusicConfig,
    album: &str,
    year: u16,
    start: u32,
    end: Option<u32>,
) -> Result<()> {
    let files = mp3_files(&config.dir)?;
    for name in files_in_range(&files, start, end) {
        edit_tags(&config.dir.join(name), |tag| {
            tag.set_album(album.to_string());
            tag.set_year(u32::from(year));
        })?;
        debug!("Set Album to '{album}' and Year to '{year}' for file '{name}'.");
    }
    Ok(())
}

/// Names starting with a zero-padded 3-digit number in `[start, end]`
/// inclusive, in number order. Numbers with no matching name contribute
/// nothing.
fn files_in_range(files: &[String], start: u32, end: Option<u32>) -> Vec<&String> {
    let end = end.unwrap_or(start);
    let mut selected = Vec::new();
    for num in start..=end {
        let file_num = format!("{num:03}");
        for name in files {
            if name.starts_with(&file_num) {
                selected.push(name);
            }
        }
    }
    selected
}

/// Applies `edit` to the file's primary tag (or first tag, or a fresh tag
/// of the primary type when the file carries none) and saves it back.
fn edit_tags(path: &Path, edit: impl FnOnce(&mut Tag)) -> Result<()> {
    let mut tagged_file = Probe::open(path)?.read()?;

    let tag = match tagged_file.primary_tag_mut() {
        Some(primary_tag) => primary_tag,
        None => {
            if let Some(first_tag) = tagged_file.first_tag_mut() {
                first_tag
            } else {
                let tag_type = tagged_file.primary_tag_type();

                debug!("No tags found, creating a new tag of type {tag_type:?}");
                tagged_file.insert_tag(Tag::new(tag_type));

                tagged_file.primary_tag_mut().unwrap()
            }
        }
    };

    edit(tag);
    tag.save_to_path(path, WriteOptions::default())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lofty::tag::TagType;
    use std::fs;
    use tempfile::tempdir;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_mp3_files_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("010_b.mp3"), "").unwrap();
        fs::write(dir.path().join("002_a.mp3"), "").unwrap();
        fs::write(dir.path().join("cover.jpg"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = mp3_files(dir.path()).unwrap();
        assert_eq!(files, vec!["002_a.mp3", "010_b.mp3"]);
    }

    #[test]
    fn test_mp3_files_missing_dir_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(mp3_files(&dir.path().join("nope")).is_err());
    }

    #[test]
    fn test_album_artist_goes_into_the_item_key() {
        let mut tag = Tag::new(TagType::Id3v2);
        tag.insert_text(ItemKey::AlbumArtist, "The Band".to_string());
        assert_eq!(tag.get_string(&ItemKey::AlbumArtist), Some("The Band"));
    }

    #[test]
    fn test_year_is_stored_as_recording_date() {
        let mut tag = Tag::new(TagType::Id3v2);
        tag.set_album("First".to_string());
        tag.set_year(2019);
        assert_eq!(tag.album().as_deref(), Some("First"));
        assert_eq!(tag.get_string(&ItemKey::RecordingDate), Some("2019"));
    }

    #[test]
    fn test_resolve_prefers_explicit_dir() {
        let config = MusicConfig::resolve(Some(PathBuf::from("/tmp/music")));
        assert_eq!(config.dir, PathBuf::from("/tmp/music"));
    }

    #[test]
    fn test_range_selection_is_inclusive() {
        let files = names(&["001_a.mp3", "002_b.mp3", "003_c.mp3", "004_d.mp3"]);
        let selected = files_in_range(&files, 2, Some(3));
        assert_eq!(selected, vec!["002_b.mp3", "003_c.mp3"]);
    }

    #[test]
    fn test_range_without_end_selects_a_single_number() {
        let files = names(&["001_a.mp3", "002_b.mp3", "003_c.mp3"]);
        let selected = files_in_range(&files, 2, None);
        assert_eq!(selected, vec!["002_b.mp3"]);
    }

    #[test]
    fn test_range_skips_numbers_without_a_file() {
        let files = names(&["001_a.mp3", "004_d.mp3"]);
        let selected = files_in_range(&files, 1, Some(4));
        assert_eq!(selected, vec!["001_a.mp3", "004_d.mp3"]);
    }
}
