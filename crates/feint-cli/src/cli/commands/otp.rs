use std::fs;

use dialoguer::{theme::ColorfulTheme, Input, Select};

use feint_core::otp::{self, Exclusion, ExclusionMode, NumberFormat, OtpSpec};

use crate::cli::args::{OtpArgs, SortChoice};
use crate::exit_codes;

pub fn run(args: OtpArgs) -> anyhow::Result<i32> {
    let theme = ColorfulTheme::default();

    // Flags win; anything missing is prompted, matching the original
    // interactive flow.
    let width = match args.digits {
        Some(digits) => digits,
        None => Input::<usize>::with_theme(&theme)
            .with_prompt("Number of digits")
            .interact_text()?,
    };

    let exclusion = resolve_exclusion(&theme, &args, width)?;

    let base = match args.base.clone() {
        Some(base) => base,
        None => Input::<String>::with_theme(&theme)
            .with_prompt("Base filename")
            .default("numbers".into())
            .interact_text()?,
    };

    let format: NumberFormat = match args.format {
        Some(choice) => choice.into(),
        None => {
            let pick = Select::with_theme(&theme)
                .with_prompt("Number format")
                .items(&["Fixed width with leading zeros", "Plain integers"])
                .default(0)
                .interact()?;
            if pick == 0 {
                NumberFormat::Padded
            } else {
                NumberFormat::Plain
            }
        }
    };

    let sort = match args.sort {
        Some(choice) => choice,
        None => {
            let pick = Select::with_theme(&theme)
                .with_prompt("Sorting")
                .items(&[
                    "Sorted ascending",
                    "Reverse sorted",
                    "Random order",
                    "All of the above",
                ])
                .default(0)
                .interact()?;
            [
                SortChoice::Ascending,
                SortChoice::Descending,
                SortChoice::Random,
                SortChoice::All,
            ][pick]
        }
    };

    let spec = OtpSpec {
        width,
        exclusion,
        format,
    };
    let candidates = match otp::enumerate(&spec) {
        Ok(candidates) => candidates,
        Err(e) => {
            eprintln!("[!] {e}");
            return Ok(exit_codes::FAILURE);
        }
    };

    fs::create_dir_all(&args.out)?;
    for policy in sort.policies() {
        let path = args.out.join(format!("{}_{}.txt", base, policy.file_suffix()));
        otp::write_list(&path, &otp::order(&candidates, policy))?;
        println!("   → {} ({})", path.display(), policy.describe());
    }

    println!();
    println!("✓ Generated {} candidates", candidates.len());
    Ok(exit_codes::SUCCESS)
}

fn resolve_exclusion(
    theme: &ColorfulTheme,
    args: &OtpArgs,
    width: usize,
) -> anyhow::Result<Option<Exclusion>> {
    // Flag-driven: --exclude alone means everywhere, --positions narrows it.
    if let Some(digit) = args.exclude {
        let mode = match &args.positions {
            Some(positions) => ExclusionMode::AtPositions(positions.clone()),
            None => ExclusionMode::Everywhere,
        };
        return Ok(Some(Exclusion { digit, mode }));
    }
    if args.digits.is_some() {
        // Non-interactive invocation without --exclude: no exclusion.
        return Ok(None);
    }

    let raw = Input::<String>::with_theme(theme)
        .with_prompt("Digit to exclude (leave blank if none)")
        .allow_empty(true)
        .interact_text()?;
    let Some(digit) = raw.trim().chars().next() else {
        return Ok(None);
    };

    let pick = Select::with_theme(theme)
        .with_prompt("Exclude fully or at specific positions?")
        .items(&["Fully", "At specific positions"])
        .default(0)
        .interact()?;
    if pick == 0 {
        return Ok(Some(Exclusion {
            digit,
            mode: ExclusionMode::Everywhere,
        }));
    }

    let raw_positions = Input::<String>::with_theme(theme)
        .with_prompt(format!("Positions (0–{}) separated by commas", width.saturating_sub(1)))
        .interact_text()?;
    let positions = raw_positions
        .split(',')
        .map(|p| p.trim().parse::<usize>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(Exclusion {
        digit,
        mode: ExclusionMode::AtPositions(positions),
    }))
}
