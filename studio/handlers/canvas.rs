use std::io::Read;

use serde::Deserialize;
use tiny_http::Request;
use tracing::{debug, error};

use ferrite_sketch::Point;

use crate::routes::{bad_request, no_content, png_response, redirect, server_error, HttpResponse};
use crate::state::StudioState;
use crate::util::png::encode_gray_png;

/// Body of `POST /canvas/stroke`: one stroke as press, drags and release.
#[derive(Debug, Deserialize)]
pub struct StrokeBody {
    pub points: Vec<Point>,
}

// ---------------------------------------------------------------------------
// GET /canvas.png
// ---------------------------------------------------------------------------

pub fn handle_png(state: &mut StudioState) -> HttpResponse {
    let canvas = state.session.canvas_mut();
    canvas.take_redraw();
    match encode_gray_png(canvas.bitmap()) {
        Ok(png) => png_response(png),
        Err(e) => {
            error!("canvas encode failed: {}", e);
            server_error("could not encode canvas")
        }
    }
}

// ---------------------------------------------------------------------------
// POST /canvas/stroke
// ---------------------------------------------------------------------------

pub fn handle_stroke(request: &mut Request, state: &mut StudioState) -> HttpResponse {
    let mut body = Vec::new();
    if request.as_reader().read_to_end(&mut body).is_err() {
        return bad_request("could not read request body");
    }
    let stroke: StrokeBody = match serde_json::from_slice(&body) {
        Ok(s) => s,
        Err(e) => return bad_request(&format!("invalid stroke: {}", e)),
    };
    debug!(points = stroke.points.len(), "stroke");
    state.session.canvas_mut().draw_stroke(&stroke.points);
    no_content()
}

// ---------------------------------------------------------------------------
// POST /canvas/clear  and  POST /convert
// ---------------------------------------------------------------------------

pub fn handle_clear(state: &mut StudioState) -> HttpResponse {
    state.session.clear();
    redirect("/")
}

pub fn handle_convert(state: &mut StudioState) -> HttpResponse {
    state.session.convert();
    redirect("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroke_body_parses_point_pairs() {
        let body: StrokeBody = serde_json::from_str(r#"{"points": [[1, 2], [3.5, 4]]}"#).unwrap();
        assert_eq!(body.points, vec![Point::new(1.0, 2.0), Point::new(3.5, 4.0)]);
    }

    #[test]
    fn stroke_body_rejects_garbage() {
        assert!(serde_json::from_str::<StrokeBody>(r#"{"points": [[1]]}"#).is_err());
        assert!(serde_json::from_str::<StrokeBody>("nope").is_err());
    }
}
