//! Interactive MP3 tag editor entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use scriptbox::music::{self, MusicConfig};
use scriptbox::renumber;
use scriptbox::{logger, prompt};

/// Command-line arguments for music-manager
#[derive(Parser, Debug)]
#[command(name = "music-manager")]
#[command(about = "Interactive ID3 tag editor and track renumbering tool")]
#[command(version)]
struct Args {
    /// Directory containing the MP3 files (default: MUSIC_DIR or the
    /// platform music folder)
    directory: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    SetAlbumArtist,
    SetAlbumAndYear,
    RenumberFiles,
}

impl Action {
    fn from_choice(choice: &str) -> Option<Self> {
        match choice {
            "1" => Some(Action::SetAlbumArtist),
            "2" => Some(Action::SetAlbumAndYear),
            "3" => Some(Action::RenumberFiles),
            _ => None,
        }
    }
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    logger::init(args.verbose).context("Failed to install logger")?;

    let config = MusicConfig::resolve(args.directory);

    println!("Choose an action:");
    println!("1) Set Album Artist");
    println!("2) Set Album and Year");
    println!("3) Rename Files and Adjust Numbering");
    let choice = prompt::ask("Enter choice: ")?;

    match Action::from_choice(&choice) {
        Some(Action::SetAlbumArtist) => set_album_artist(&config)?,
        Some(Action::SetAlbumAndYear) => set_album_and_year(&config)?,
        Some(Action::RenumberFiles) => renumber_files(&config)?,
        None => println!("Wrong choice. Please select 1, 2, or 3."),
    }
    Ok(())
}

fn set_album_artist(config: &MusicConfig) -> Result<()> {
    let artist = prompt::ask("Enter Album Artist name: ")?;
    music::set_album_artist(config, &artist)?;
    Ok(())
}

fn set_album_and_year(config: &MusicConfig) -> Result<()> {
    let album = prompt::ask("Enter album title: ")?;
    let year: u16 = prompt::ask_parsed("Enter the release year: ")?;
    let start: u32 = prompt::ask_parsed("Enter the starting file number (e.g., 001): ")?;
    let end: Option<u32> =
        prompt::ask_optional("Enter the ending file number (e.g., 014) or press Enter for SINGLE: ")?;
    music::set_album_and_year(config, &album, year, start, end)?;
    Ok(())
}

fn renumber_files(config: &MusicConfig) -> Result<()> {
    let files = music::mp3_files(&config.dir)?;
    for (i, name) in files.iter().enumerate() {
        println!("{}) {}", i + 1, name);
    }

    let choice: usize = prompt::ask_parsed("Enter the file number to keep with its prefix: ")?;
    let chosen = renumber::select_file(&files, choice)?;
    println!(
        "You chose: {} with prefix: {}",
        chosen,
        renumber::prefix_of(chosen)
    );

    let shifts = renumber::plan_shifts(&files, chosen)?;
    renumber::apply_shifts(&config.dir, &shifts)?;
    Ok(())
}
