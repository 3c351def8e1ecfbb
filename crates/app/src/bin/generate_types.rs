use std::{path::PathBuf, process::ExitCode};

use clap::Parser;

#[derive(Parser)]
#[command(about = "Export view model types as TypeScript")]
struct Args {
    /// Output file
    #[arg(long, default_value = "shared/types.ts")]
    out: PathBuf,
    /// Fail if the file is out of date instead of writing it
    #[arg(long)]
    check: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    if args.check {
        if app::types::is_current(&args.out)? {
            println!("{} is up to date", args.out.display());
            return Ok(ExitCode::SUCCESS);
        }
        eprintln!(
            "{} is out of date; run generate-types to refresh it",
            args.out.display()
        );
        return Ok(ExitCode::FAILURE);
    }

    app::types::write(&args.out)?;
    println!("wrote {}", args.out.display());
    Ok(ExitCode::SUCCESS)
}
