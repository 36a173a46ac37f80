use std::fs::File;

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use feint_core::synth::{self, ContentMode, FileKind, SizeUnit};

use crate::cli::args::FilegenArgs;
use crate::exit_codes;

pub fn run(args: FilegenArgs) -> anyhow::Result<i32> {
    let theme = ColorfulTheme::default();

    let kind: FileKind = match args.kind {
        Some(choice) => choice.into(),
        None => {
            let labels: Vec<&str> = FileKind::ALL.iter().map(|k| k.extension()).collect();
            let pick = Select::with_theme(&theme)
                .with_prompt("File format")
                .items(&labels)
                .default(0)
                .interact()?;
            FileKind::ALL[pick]
        }
    };

    let unit: SizeUnit = match args.unit {
        Some(choice) => choice.into(),
        None => {
            let pick = Select::with_theme(&theme)
                .with_prompt("Size unit")
                .items(&["bytes", "KB", "MB", "GB"])
                .default(2)
                .interact()?;
            [SizeUnit::Bytes, SizeUnit::Kb, SizeUnit::Mb, SizeUnit::Gb][pick]
        }
    };

    let size_value = match args.size {
        Some(value) => value,
        None => Input::<f64>::with_theme(&theme)
            .with_prompt(format!("File size in {} (e.g. 10 or 0.5)", unit.label()))
            .interact_text()?,
    };

    let mode: ContentMode = match args.content {
        Some(choice) => choice.into(),
        None => {
            let pick = Select::with_theme(&theme)
                .with_prompt("Content type")
                .items(&["random", "zeros", "pattern"])
                .default(0)
                .interact()?;
            [ContentMode::Random, ContentMode::Zeros, ContentMode::Pattern][pick]
        }
    };

    let dir_input = match args.dir.clone() {
        Some(dir) => dir,
        None => Input::<String>::with_theme(&theme)
            .with_prompt("Directory to save into (blank for current)")
            .allow_empty(true)
            .interact_text()?,
    };

    let name = match args.name.clone() {
        Some(name) => name,
        None => Input::<String>::with_theme(&theme)
            .with_prompt("Filename")
            .default(format!("testfile.{}", kind.extension()))
            .interact_text()?,
    };

    // Validate the size before touching the filesystem so an undersized
    // request leaves nothing behind.
    let size_bytes = match synth::resolve_size(size_value, unit)
        .and_then(|bytes| synth::check_size(kind, bytes).map(|()| bytes))
    {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("[!] {e}");
            return Ok(exit_codes::FAILURE);
        }
    };

    let dir = if dir_input.trim().is_empty() {
        std::env::current_dir()?
    } else {
        match synth::resolve_dir(dir_input.trim()) {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("[!] {e}");
                return Ok(exit_codes::FAILURE);
            }
        }
    };

    let path = dir.join(synth::ensure_extension(name.trim(), kind));

    if path.exists() && !args.force {
        let overwrite = Confirm::with_theme(&theme)
            .with_prompt(format!("{} already exists. Overwrite?", path.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            println!("Aborted.");
            return Ok(exit_codes::SUCCESS);
        }
    }

    let mut file = File::create(&path)?;
    synth::fill(&mut file, kind, size_bytes, mode, args.chunk_size)?;
    file.sync_all()?;

    println!("[+] Generated: {} ({} bytes)", path.display(), size_bytes);
    Ok(exit_codes::SUCCESS)
}
