use std::process::ExitCode;

fn main() -> ExitCode {
    vdataset::cli::run()
}
