use std::io;
use std::process::ExitCode;

use retail_dw_scripts::app::{finish, App};
use retail_dw_scripts::cli::{parse_args, GenerateDataArgs};
use retail_dw_scripts::utils::init_logging;

fn main() -> ExitCode {
    let args: GenerateDataArgs = match parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(code) => return code,
    };
    init_logging(args.verbose);

    let mut stdout = io::stdout().lock();
    let result = match App::load(args.config.as_deref()) {
        Ok(app) => app
            .generate_data(args.output.as_deref(), args.rows, args.seed, &mut stdout)
            .map_err(|err| err.to_string()),
        Err(err) => Err(err.to_string()),
    };

    ExitCode::from(finish(result, &mut stdout))
}
