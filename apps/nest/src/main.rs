use std::process::ExitCode;

fn main() -> ExitCode {
    match nest_cli::run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            nest_logger::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
