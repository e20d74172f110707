//! Renumbering of 3-digit filename prefixes.

use std::fs;
use std::path::Path;

use log::debug;
use regex::Regex;

use crate::error::{Error, Result};

/// A single planned rename inside the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shift {
    pub from: String,
    pub to: String,
}

/// First three characters of a file name, the slot where the numeric
/// prefix lives.
pub fn prefix_of(name: &str) -> String {
    name.chars().take(3).collect()
}

/// Resolves a 1-based menu selection into the file it names.
pub fn select_file(files: &[String], choice: usize) -> Result<&String> {
    choice
        .checked_sub(1)
        .and_then(|i| files.get(i))
        .ok_or_else(|| Error::InvalidInput(format!("no file numbered {choice}")))
}

/// Plans the shift: every `NNN_*.mp3` file whose prefix is greater than
/// or equal to the chosen file's prefix moves up by one, except the
/// chosen file itself. `files` is expected sorted; the plan preserves
/// that order, so renames apply in ascending prefix order.
pub fn plan_shifts(files: &[String], chosen: &str) -> Result<Vec<Shift>> {
    let chosen_prefix: u32 = prefix_of(chosen)
        .parse()
        .map_err(|_| Error::InvalidInput(format!("'{chosen}' has no numeric prefix")))?;

    let pattern = Regex::new(r"^(\d{3})_.*\.mp3$").unwrap();
    let mut shifts = Vec::new();
    for name in files {
        let Some(caps) = pattern.captures(name) else {
            continue;
        };
        let Ok(prefix) = caps[1].parse::<u32>() else {
            continue;
        };
        if prefix >= chosen_prefix && name != chosen {
            shifts.push(Shift {
                from: name.clone(),
                to: format!("{:03}{}", prefix + 1, &name[3..]),
            });
        }
    }
    Ok(shifts)
}

/// Applies the plan with plain renames. No collision detection: a rename
/// may overwrite a not-yet-shifted file whose name it targets.
pub fn apply_shifts(dir: &Path, shifts: &[Shift]) -> Result<()> {
    for shift in shifts {
        fs::rename(dir.join(&shift.from), dir.join(&shift.to))?;
        debug!("Renamed: {} -> {}", shift.from, shift.to);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_plan_shifts_files_at_or_above_chosen_prefix() {
        let files = names(&["001_a.mp3", "002_b.mp3", "003_c.mp3", "004_d.mp3"]);
        let shifts = plan_shifts(&files, "002_b.mp3").unwrap();
        assert_eq!(
            shifts,
            vec![
                Shift {
                    from: "003_c.mp3".into(),
                    to: "004_c.mp3".into()
                },
                Shift {
                    from: "004_d.mp3".into(),
                    to: "005_d.mp3".into()
                },
            ]
        );
    }

    #[test]
    fn test_plan_never_touches_the_chosen_file() {
        let files = names(&["002_a.mp3", "002_b.mp3"]);
        let shifts = plan_shifts(&files, "002_a.mp3").unwrap();
        assert_eq!(
            shifts,
            vec![Shift {
                from: "002_b.mp3".into(),
                to: "003_b.mp3".into()
            }]
        );
    }

    #[test]
    fn test_plan_skips_files_without_prefix() {
        let files = names(&["003_c.mp3", "12_short.mp3", "abc_x.mp3", "noprefix.mp3"]);
        let shifts = plan_shifts(&files, "003_c.mp3").unwrap();
        assert!(shifts.is_empty());
    }

    #[test]
    fn test_chosen_without_numeric_prefix_is_an_error() {
        let files = names(&["001_a.mp3"]);
        assert!(plan_shifts(&files, "cover_song.mp3").is_err());
    }

    #[test]
    fn test_prefix_of_takes_first_three_chars() {
        assert_eq!(prefix_of("012_track.mp3"), "012");
        assert_eq!(prefix_of("ab"), "ab");
    }

    #[test]
    fn test_select_file_is_one_based() {
        let files = names(&["001_a.mp3", "002_b.mp3"]);
        assert_eq!(select_file(&files, 1).unwrap(), "001_a.mp3");
        assert_eq!(select_file(&files, 2).unwrap(), "002_b.mp3");
    }

    #[test]
    fn test_select_file_rejects_zero_and_out_of_range() {
        let files = names(&["001_a.mp3", "002_b.mp3"]);
        assert!(select_file(&files, 0).is_err());
        assert!(select_file(&files, 3).is_err());
        assert!(select_file(&[], 1).is_err());
    }

    #[test]
    fn test_apply_shifts_renames_on_disk() {
        let dir = tempdir().unwrap();
        for name in ["001_a.mp3", "002_b.mp3", "003_c.mp3"] {
            fs::write(dir.path().join(name), name).unwrap();
        }
        let files = names(&["001_a.mp3", "002_b.mp3", "003_c.mp3"]);
        let shifts = plan_shifts(&files, "001_a.mp3").unwrap();
        apply_shifts(dir.path(), &shifts).unwrap();

        assert!(dir.path().join("001_a.mp3").exists());
        assert!(dir.path().join("003_b.mp3").exists());
        assert!(dir.path().join("004_c.mp3").exists());
        assert!(!dir.path().join("002_b.mp3").exists());
        assert!(!dir.path().join("003_c.mp3").exists());
    }

    #[test]
    fn test_apply_overwrites_when_consecutive_prefixes_share_a_suffix() {
        let dir = tempdir().unwrap();
        for name in ["001_a.mp3", "003_x.mp3", "004_x.mp3"] {
            fs::write(dir.path().join(name), name).unwrap();
        }
        let files = names(&["001_a.mp3", "003_x.mp3", "004_x.mp3"]);
        let shifts = plan_shifts(&files, "001_a.mp3").unwrap();
        apply_shifts(dir.path(), &shifts).unwrap();

        // 003_x lands on 004_x before 004_x moves away, so the old 004_x
        // content is lost and the overwriting file is shifted again.
        assert_eq!(
            fs::read_to_string(dir.path().join("005_x.mp3")).unwrap(),
            "003_x.mp3"
        );
        assert!(!dir.path().join("003_x.mp3").exists());
        assert!(!dir.path().join("004_x.mp3").exists());
    }

    #[test]
    fn test_apply_fails_when_a_source_is_missing() {
        let dir = tempdir().unwrap();
        let shifts = vec![Shift {
            from: "009_x.mp3".into(),
            to: "010_x.mp3".into(),
        }];
        assert!(apply_shifts(dir.path(), &shifts).is_err());
    }
}
