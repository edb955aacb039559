use std::io::Cursor;
use tiny_http::{Header, Method, Request, Response, StatusCode};
use tracing::debug;

use crate::state::StudioState;
use crate::handlers;

pub type HttpResponse = Response<Cursor<Vec<u8>>>;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Builds a header from ASCII name and value.
fn header(name: &str, value: &str) -> Header {
    Header::from_bytes(name.as_bytes(), value.as_bytes()).expect("ASCII header")
}

fn bytes_response(status: u16, content_type: &str, body: Vec<u8>) -> HttpResponse {
    let len = body.len();
    Response::new(
        StatusCode(status),
        vec![
            header("Content-Type", content_type),
            header("Cache-Control", "no-store"),
        ],
        Cursor::new(body),
        Some(len),
        None,
    )
}

pub fn html_response(body: String) -> HttpResponse {
    bytes_response(200, "text/html; charset=utf-8", body.into_bytes())
}

pub fn png_response(body: Vec<u8>) -> HttpResponse {
    bytes_response(200, "image/png", body)
}

pub fn download_response(body: Vec<u8>, filename: &str) -> HttpResponse {
    let disposition = format!("attachment; filename=\"{}\"", filename);
    bytes_response(200, "application/octet-stream", body)
        .with_header(header("Content-Disposition", &disposition))
}

pub fn redirect(location: &str) -> HttpResponse {
    Response::new(
        StatusCode(303),
        vec![
            header("Location", location),
            header("Content-Length", "0"),
        ],
        Cursor::new(Vec::new()),
        Some(0),
        None,
    )
}

pub fn no_content() -> HttpResponse {
    Response::new(StatusCode(204), vec![], Cursor::new(Vec::new()), Some(0), None)
}

pub fn bad_request(msg: &str) -> HttpResponse {
    bytes_response(400, "text/plain; charset=utf-8", msg.as_bytes().to_vec())
}

pub fn server_error(msg: &str) -> HttpResponse {
    bytes_response(500, "text/plain; charset=utf-8", msg.as_bytes().to_vec())
}

pub fn not_found() -> HttpResponse {
    bytes_response(404, "text/plain", b"404 Not Found".to_vec())
}

/// Value of a request header, or an empty string.
pub fn header_value(request: &Request, name: &'static str) -> String {
    request.headers().iter()
        .find(|h| h.field.equiv(name))
        .map(|h| h.value.as_str().to_owned())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Answers one request and sends the response back.
pub fn dispatch(mut request: Request, state: &mut StudioState) {
    let response = route(&mut request, state);
    let _ = request.respond(response);
}

/// Picks the handler for a request. Handlers receive `&mut Request` so the
/// caller keeps ownership and responds afterwards.
pub fn route(request: &mut Request, state: &mut StudioState) -> HttpResponse {
    let method = request.method().clone();
    let url    = request.url().to_owned();
    let path   = url.split_once('?').map_or(url.as_str(), |(p, _)| p).to_owned();
    debug!(?method, %path, "request");

    match (method, path.as_str()) {
        (Method::Get,  "/")               => handlers::page::handle_get(state),

        // ── Canvas ───────────────────────────────────────────────────────
        (Method::Get,  "/canvas.png")     => handlers::canvas::handle_png(state),
        (Method::Post, "/canvas/stroke")  => handlers::canvas::handle_stroke(request, state),
        (Method::Post, "/canvas/clear")   => handlers::canvas::handle_clear(state),
        (Method::Post, "/convert")        => handlers::canvas::handle_convert(state),

        // ── Sample ───────────────────────────────────────────────────────
        (Method::Get,  "/sample.png")     => handlers::sample::handle_png(state),
        (Method::Post, "/sample/import")  => handlers::sample::handle_import(request, state),
        (Method::Get,  "/sample/export")  => handlers::sample::handle_export(state),

        // ── Store ────────────────────────────────────────────────────────
        (Method::Post, "/store/open")     => handlers::store::handle_open(request, state),
        (Method::Post, "/store/load")     => handlers::store::handle_load(request, state),

        // ── Inference ────────────────────────────────────────────────────
        (Method::Post, "/test")           => handlers::test::handle_test(state),

        _ => not_found(),
    }
}

#[cfg(test)]
pub mod test_support {
    use tiny_http::{Header, Method, Request, TestRequest};

    use ferrite_sketch::Session;

    use super::HttpResponse;
    use crate::state::{FlashKind, StudioState};

    pub fn studio() -> StudioState {
        StudioState::new(Session::new(196, 7))
    }

    pub fn get(path: &str) -> Request {
        TestRequest::new().with_path(path).into()
    }

    pub fn post_form(path: &str, body: &'static str) -> Request {
        TestRequest::new()
            .with_method(Method::Post)
            .with_path(path)
            .with_header("Content-Type: application/x-www-form-urlencoded".parse::<Header>().unwrap())
            .with_body(body)
            .into()
    }

    pub fn post_upload(path: &str, content_type: &str, body: String) -> Request {
        TestRequest::new()
            .with_method(Method::Post)
            .with_path(path)
            .with_header(format!("Content-Type: {}", content_type).parse::<Header>().unwrap())
            .with_body(Box::leak(body.into_boxed_str()))
            .into()
    }

    pub fn header<'a>(response: &'a HttpResponse, name: &'static str) -> Option<&'a str> {
        response.headers().iter().find(|h| h.field.equiv(name)).map(|h| h.value.as_str())
    }

    /// Asserts a 303 back to the page and returns the flash it left.
    pub fn assert_redirect_home(response: &HttpResponse, state: &mut StudioState) -> Option<(FlashKind, String)> {
        assert_eq!(response.status_code().0, 303);
        assert_eq!(header(response, "Location"), Some("/"));
        state.take_flash().map(|f| (f.kind, f.text))
    }
}
