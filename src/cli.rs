use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "run_sql_script",
    version,
    about = "Run an Oracle SQL script whose statements end with a line holding only '/'"
)]
pub struct RunScriptArgs {
    /// SQL script file to execute.
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,
    /// Abort on the first statement error that is not an expected "does not exist".
    #[arg(long, default_value_t = false)]
    pub fail_fast: bool,
    /// Config file (JSON). Defaults to the per-user config location.
    #[arg(long, env = "RETAIL_DW_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Debug logging on stderr.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Parser, Debug)]
#[command(name = "trigger_etl", version, about = "Run the retail ETL stored procedure")]
pub struct TriggerEtlArgs {
    /// Procedure to call instead of the configured one.
    #[arg(long, value_name = "NAME")]
    pub procedure: Option<String>,
    #[arg(long, env = "RETAIL_DW_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Parser, Debug)]
#[command(
    name = "generate_data",
    version,
    about = "Generate synthetic sales transactions as CSV"
)]
pub struct GenerateDataArgs {
    /// Output CSV path.
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,
    /// Number of transactions to generate.
    #[arg(long)]
    pub rows: Option<usize>,
    /// Seed for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long, env = "RETAIL_DW_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// `--help` and `--version` exit 0; every other parse failure is a usage error.
pub fn usage_exit_code(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

/// Parse arguments, printing clap's usage message and returning the exit
/// code on failure.
pub fn parse_args<T, I, S>(args: I) -> Result<T, ExitCode>
where
    T: Parser,
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    T::try_parse_from(args).map_err(|err| {
        let _ = err.print();
        ExitCode::from(usage_exit_code(&err))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_script_is_a_usage_error() {
        let err = RunScriptArgs::try_parse_from(["run_sql_script"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(usage_exit_code(&err), 1);
    }

    #[test]
    fn help_exits_zero() {
        let err = RunScriptArgs::try_parse_from(["run_sql_script", "--help"]).unwrap_err();
        assert_eq!(usage_exit_code(&err), 0);
    }

    #[test]
    fn script_path_and_flags_parse() {
        let args =
            RunScriptArgs::try_parse_from(["run_sql_script", "sql/reset.sql", "--fail-fast", "-v"])
                .unwrap();
        assert_eq!(args.script, PathBuf::from("sql/reset.sql"));
        assert!(args.fail_fast);
        assert!(args.verbose);
    }

    #[test]
    fn generate_options_parse() {
        let args = GenerateDataArgs::try_parse_from([
            "generate_data",
            "--output",
            "out/sales.csv",
            "--rows",
            "10",
            "--seed",
            "3",
        ])
        .unwrap();
        assert_eq!(args.output, Some(PathBuf::from("out/sales.csv")));
        assert_eq!(args.rows, Some(10));
        assert_eq!(args.seed, Some(3));
    }

    #[test]
    fn trigger_procedure_override_parses() {
        let args =
            TriggerEtlArgs::try_parse_from(["trigger_etl", "--procedure", "pkg_etl.reload"]).unwrap();
        assert_eq!(args.procedure.as_deref(), Some("pkg_etl.reload"));
    }
}
