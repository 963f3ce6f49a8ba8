use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Parser;

use release_bump::cli::{self, ReleaseArgs};
use release_bump::config;
use release_bump::git::Git2Repository;
use release_bump::ui;

const PROGRAM: &str = "release-bump";

#[derive(clap::Parser)]
#[command(
    name = "release-bump",
    version,
    about = "Bump version strings in README and podspec files, then commit and tag the release"
)]
struct Args {
    /// New version, e.g. 1.4.0
    #[arg(value_name = "NEW_VERSION")]
    versions: Vec<String>,

    #[arg(short, long, help = "Directory holding the target files (default: parent of the tool's directory)")]
    dir: Option<PathBuf>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Derive the version from `git describe --long` instead of an argument")]
    from_tags: bool,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v, -vv)")]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    ui::init_logging(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let Some(version) = cli::select_version_source(&args.versions, args.from_tags) else {
        ui::display_usage(PROGRAM);
        return Ok(());
    };

    let executable = std::env::current_exe().context("Cannot locate the running executable")?;
    let base_dir = cli::resolve_base_dir(args.dir.as_deref(), &executable)?;
    log::debug!("base directory: {}", base_dir.display());

    let config = config::load_config(args.config.as_deref(), &base_dir)
        .context("Error loading config")?;

    let repo = Git2Repository::open(&base_dir)?;

    let release_args = ReleaseArgs {
        base_dir,
        version,
        year: chrono::Local::now().year(),
        dry_run: args.dry_run,
    };

    if release_args.dry_run {
        ui::display_status("Dry run, no files or commits will be written");
    }

    let report = cli::run_release(&release_args, &config, &repo)?;
    ui::display_report(&report);
    Ok(())
}
