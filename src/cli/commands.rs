use crate::core::concatenator::concatenate_files;
use crate::domain::models::{ConcatConfig, ReadErrorPolicy};
use crate::infra::logger::setup_logger;
use crate::infra::output::print_completion;
use clap::Parser;
use log::{debug, info};

#[derive(Parser)]
#[command(name = "file-concat")]
#[command(
    about = "Concatenate files with specific extensions from a directory.",
    long_about = None
)]
pub struct Cli {
    /// Root directory to start searching from
    pub root_dir: String,

    /// Name of the output file
    pub output_file: String,

    /// Record unreadable files in the report instead of aborting the run
    #[arg(long)]
    pub skip_unreadable: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn to_config(&self) -> ConcatConfig {
        let policy = if self.skip_unreadable {
            ReadErrorPolicy::Skip
        } else {
            ReadErrorPolicy::Abort
        };
        ConcatConfig::new(&self.root_dir, &self.output_file).with_read_error_policy(policy)
    }
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logger(cli.verbose)?;

    info!("Starting concatenation");
    debug!(
        "Command parameters: root_dir={}, output_file={}, skip_unreadable={}",
        cli.root_dir, cli.output_file, cli.skip_unreadable
    );

    let config = cli.to_config();
    let summary = concatenate_files(&config)?;
    debug!("Run summary: {:?}", summary);

    print_completion(&config.output_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["file-concat", "./web", "report.txt"]).unwrap();

        assert_eq!(cli.root_dir, "./web");
        assert_eq!(cli.output_file, "report.txt");
        assert!(!cli.skip_unreadable);
        assert_eq!(cli.verbose, 0);

        let config = cli.to_config();
        assert_eq!(config.root_path, "./web");
        assert_eq!(config.output_path, "report.txt");
        assert_eq!(config.read_error_policy, ReadErrorPolicy::Abort);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "file-concat",
            "-vv",
            "--skip-unreadable",
            "src",
            "out.txt",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.to_config().read_error_policy, ReadErrorPolicy::Skip);
    }

    #[test]
    fn test_cli_requires_both_positionals() {
        assert!(Cli::try_parse_from(["file-concat"]).is_err());
        assert!(Cli::try_parse_from(["file-concat", "./web"]).is_err());
        assert!(Cli::try_parse_from(["file-concat", "a", "b", "c"]).is_err());
    }
}
