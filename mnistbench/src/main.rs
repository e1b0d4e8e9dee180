use mnistbench::UsageError;
use std::process::ExitCode;

fn main() -> ExitCode {
    match mnistbench::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<UsageError>() {
                Some(usage) => eprintln!("{usage}"),
                None => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
