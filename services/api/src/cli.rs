use crate::commands::{run_compare, run_demo, run_score, CompareArgs, DemoArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use eska::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Eska Underwriting",
    about = "Score loan applicants and estimate savings against a traditional bank",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score an applicant from form answers or a CSV export
    Score(ScoreArgs),
    /// Compare the cost of a loan at two annual rates
    Compare(CompareArgs),
    /// Score a sample applicant and print a savings quote
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Compare(args) => run_compare(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["eska"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn compare_parses_rates() {
        let cli = Cli::try_parse_from([
            "eska",
            "compare",
            "--principal",
            "1000000",
            "--term",
            "24",
            "--rate-b",
            "0.35",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Compare(args)) => {
                assert_eq!(args.term, 24);
                assert_eq!(args.rate_a, None);
                assert_eq!(args.rate_b, Some(0.35));
            }
            other => panic!("expected compare command, got {other:?}"),
        }
    }
}
