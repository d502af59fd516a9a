use std::io;
use std::process::ExitCode;

use retail_dw_scripts::app::{finish, App};
use retail_dw_scripts::cli::{parse_args, TriggerEtlArgs};
use retail_dw_scripts::db::OracleConnector;
use retail_dw_scripts::utils::init_logging;

fn main() -> ExitCode {
    let args: TriggerEtlArgs = match parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(code) => return code,
    };
    init_logging(args.verbose);

    let mut stdout = io::stdout().lock();
    let result = App::load(args.config.as_deref())
        .map_err(Into::into)
        .and_then(|app| app.trigger_etl(&OracleConnector, args.procedure.as_deref(), &mut stdout));

    ExitCode::from(finish(result, &mut stdout))
}
