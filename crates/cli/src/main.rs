use std::process::ExitCode;

fn main() -> ExitCode {
    stockline_cli::run()
}
