use std::io::Read;

use tiny_http::Request;

use ferrite_sketch::store::MAX_SAMPLE_INDEX;
use ferrite_sketch::DirStore;

use crate::routes::{redirect, HttpResponse};
use crate::state::StudioState;
use crate::util::form::{form_get, parse_form};

fn read_form(request: &mut Request) -> Vec<(String, String)> {
    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);
    parse_form(&body)
}

// ---------------------------------------------------------------------------
// POST /store/open
// ---------------------------------------------------------------------------

pub fn handle_open(request: &mut Request, state: &mut StudioState) -> HttpResponse {
    let pairs = read_form(request);
    let path = form_get(&pairs, "path").unwrap_or("").trim().to_owned();
    if path.is_empty() {
        state.flash_error("Enter the path of a sample store.");
        return redirect("/");
    }

    match DirStore::open(&path) {
        Ok(store) => {
            state.session.open_store(Box::new(store));
            state.flash_success(format!("Opened store {}.", path));
        }
        Err(e) => state.flash_error(format!("Could not open store: {}", e)),
    }
    redirect("/")
}

// ---------------------------------------------------------------------------
// POST /store/load
// ---------------------------------------------------------------------------

pub fn handle_load(request: &mut Request, state: &mut StudioState) -> HttpResponse {
    let pairs = read_form(request);
    let raw = form_get(&pairs, "index").unwrap_or("").trim().to_owned();
    let index: u32 = match raw.parse() {
        Ok(i) if i <= MAX_SAMPLE_INDEX => i,
        Ok(_) => {
            state.flash_error(format!("Sample index {} is past the last key ({}).", raw, MAX_SAMPLE_INDEX));
            return redirect("/");
        }
        Err(_) => {
            state.flash_error(format!("'{}' is not a valid sample index.", raw));
            return redirect("/");
        }
    };

    if let Err(e) = state.session.load_from_store(index) {
        state.flash_error(format!("Load failed: {}", e));
    }
    redirect("/")
}
