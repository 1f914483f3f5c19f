use std::process::ExitCode;

fn main() -> ExitCode {
    let Err(err) = qrgen::app::run() else {
        return ExitCode::SUCCESS;
    };
    eprintln!("{err}");
    ExitCode::from(err.exit_code())
}
