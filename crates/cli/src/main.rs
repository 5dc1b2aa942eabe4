use std::process::ExitCode;

fn main() -> ExitCode {
    ballpark_cli::run()
}
