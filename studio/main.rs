/// ferrite-sketch Studio
///
/// Browser front end for the digit pipeline: draw on the canvas, convert it to
/// a 28x28 sample, run the classifier and read the scores. Samples can also be
/// imported from raw files or loaded from a sample store.
/// Served by a synchronous tiny_http server.
///
/// Run with:
///   cargo run --bin studio --release
/// Then open the address from `ferrite-sketch.json` (default http://127.0.0.1:7878).

mod state;
mod render;
mod routes;
mod handlers;
mod util;

use std::process::ExitCode;

use tiny_http::Server;
use tracing::{error, info};

use ferrite_sketch::logging::init_logging;
use ferrite_sketch::{DirStore, Session, SketchConfig};

use state::StudioState;

fn main() -> ExitCode {
    let config = match SketchConfig::load_or_default() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config.log_level);

    let mut state = StudioState::new(Session::from_config(&config));
    if let Some(dir) = &config.store_dir {
        match DirStore::open(dir) {
            Ok(store) => state.session.open_store(Box::new(store)),
            Err(e) => state.flash_error(format!("Could not open store: {}", e)),
        }
    }

    let server = match Server::http(config.addr.as_str()) {
        Ok(s) => s,
        Err(e) => {
            error!("could not bind {}: {}", config.addr, e);
            return ExitCode::FAILURE;
        }
    };

    println!("╔══════════════════════════════════════════════╗");
    println!("║          ferrite-sketch Studio               ║");
    println!("╠══════════════════════════════════════════════╣");
    println!("║  Open in your browser:                       ║");
    println!("║  http://{:<37}║", config.addr);
    println!("╠══════════════════════════════════════════════╣");
    println!("║  Draw > Convert > Test                       ║");
    println!("╚══════════════════════════════════════════════╝");
    info!(addr = %config.addr, "studio listening");

    // One request at a time; the session lives on this thread.
    for request in server.incoming_requests() {
        routes::dispatch(request, &mut state);
    }
    ExitCode::SUCCESS
}
