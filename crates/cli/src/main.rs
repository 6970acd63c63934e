use std::process::ExitCode;

fn main() -> ExitCode {
    homeserv_cli::run()
}
