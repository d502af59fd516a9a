use std::io;
use std::process::ExitCode;

use retail_dw_scripts::app::{finish, App};
use retail_dw_scripts::cli::{parse_args, RunScriptArgs};
use retail_dw_scripts::db::{OracleConnector, ScriptOptions};
use retail_dw_scripts::utils::init_logging;

fn main() -> ExitCode {
    let args: RunScriptArgs = match parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(code) => return code,
    };
    init_logging(args.verbose);

    let mut stdout = io::stdout().lock();
    let options = ScriptOptions {
        fail_fast: args.fail_fast,
        ..ScriptOptions::default()
    };
    let result = App::load(args.config.as_deref())
        .map_err(Into::into)
        .and_then(|app| app.run_script(&OracleConnector, &args.script, options, &mut stdout));

    ExitCode::from(finish(result, &mut stdout))
}
