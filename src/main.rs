use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use release_bump::cli::{run_release, ReleaseArgs};
use release_bump::domain::ReleaseLevel;
use release_bump::ui;

#[derive(clap::Parser)]
#[command(
    name = "release-bump",
    version,
    about = "Bump manifest versions and cut a changelog release"
)]
struct Args {
    #[arg(value_enum, help = "Which version component to increment")]
    level: ReleaseLevel,

    #[arg(long, help = "Write changes to disk (default is a dry run)")]
    execute: bool,

    #[arg(long, help = "Release tag name used for changelog comparison links")]
    tag: String,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, default_value = ".", help = "Directory holding the manifests and changelog")]
    root: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let release_args = ReleaseArgs {
        level: args.level,
        tag: args.tag,
        execute: args.execute,
        root: args.root,
        config_path: args.config,
    };

    if let Err(e) = run_release(&release_args) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}
