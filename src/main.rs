// Headless classifier: imports a raw 784-byte sample and prints the scores.
// The drawing front end is the studio:
//   cargo run --bin studio --release
use std::process::ExitCode;

use ferrite_sketch::logging::init_logging;
use ferrite_sketch::{Session, SketchConfig};

fn main() -> ExitCode {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: ferrite-sketch <sample.raw>");
        eprintln!("Classifies a raw 28x28 sample (784 bytes, row-major) with the configured model.");
        return ExitCode::from(2);
    };

    let config = match SketchConfig::load_or_default() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config.log_level);

    let mut session = Session::from_config(&config);
    if let Some(e) = session.model_error() {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }
    if let Err(e) = session.import_file(&path) {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }

    match session.test() {
        Ok(scores) => {
            for (digit, score) in scores.iter() {
                let bar = "#".repeat((score.clamp(0.0, 1.0) * 40.0) as usize);
                println!("{}: {:<40} {:>3}%", digit, bar, (score * 100.0) as i32);
            }
            let (digit, score) = scores.best();
            println!("prediction: {} ({:.1}%)", digit, score * 100.0);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
