use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use log::LevelFilter;

/// Compare variant calls between an inoculum and an animal sample and
/// report the variants whose allele frequency diverged.
#[derive(Parser, Debug)]
#[command(name = "vcf-compare", version, about, long_about = None)]
struct Cli {
    /// Animal sample VCF
    #[arg(long = "animal", value_name = "VCF", value_parser = check_file_exists)]
    animal: PathBuf,

    /// Inoculum sample VCF
    #[arg(long = "inoculum", value_name = "VCF", value_parser = check_file_exists)]
    inoculum: PathBuf,

    /// Destination for the tab-separated report
    #[arg(long = "output_excel", value_name = "FILE", value_parser = check_prefix_path)]
    output_excel: PathBuf,

    /// Destination for the filtered VCF
    #[arg(long = "output_vcf", value_name = "FILE", value_parser = check_prefix_path)]
    output_vcf: PathBuf,

    /// Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbosity: u8,
}

fn check_file_exists(s: &str) -> Result<PathBuf, String> {
    let path = Path::new(s);
    if !path.exists() {
        return Err(format!("File does not exist: {}", path.display()));
    }
    Ok(path.to_path_buf())
}

fn check_prefix_path(s: &str) -> Result<PathBuf, String> {
    let path = Path::new(s);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(format!("Path does not exist: {}", parent.display()));
        }
    }
    Ok(path.to_path_buf())
}

fn init_verbose(cli: &Cli) {
    let filter_level = match cli.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(filter_level)
        .init();
}

fn runner() -> vcf_compare::Result<()> {
    let cli = Cli::parse();
    init_verbose(&cli);
    log::trace!("CLI options set: {cli:?}");
    vcf_compare::run(&cli.animal, &cli.inoculum, &cli.output_excel, &cli.output_vcf)
}

fn main() {
    if let Err(e) = runner() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
