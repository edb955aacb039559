use std::io::Read;

use tiny_http::Request;
use tracing::error;

use crate::routes::{download_response, header_value, not_found, png_response, redirect, server_error,
                    HttpResponse};
use crate::state::StudioState;
use crate::util::multipart::{extract_boundary, file_field};
use crate::util::png::encode_gray_png;

/// Form field carrying the uploaded sample file.
const UPLOAD_FIELD: &str = "sample";

// ---------------------------------------------------------------------------
// GET /sample.png
// ---------------------------------------------------------------------------

pub fn handle_png(state: &mut StudioState) -> HttpResponse {
    if state.session.sample().is_none() {
        return not_found();
    }
    match encode_gray_png(state.session.preview().bitmap()) {
        Ok(png) => png_response(png),
        Err(e) => {
            error!("preview encode failed: {}", e);
            server_error("could not encode preview")
        }
    }
}

// ---------------------------------------------------------------------------
// POST /sample/import
// ---------------------------------------------------------------------------

pub fn handle_import(request: &mut Request, state: &mut StudioState) -> HttpResponse {
    let content_type = header_value(request, "Content-Type");
    let Some(boundary) = extract_boundary(&content_type) else {
        state.flash_error("Invalid upload request.");
        return redirect("/");
    };

    let mut body: Vec<u8> = Vec::new();
    if request.as_reader().read_to_end(&mut body).is_err() {
        state.flash_error("Could not read the upload.");
        return redirect("/");
    }

    match file_field(&body, &boundary, UPLOAD_FIELD) {
        Some(bytes) => match state.session.import_bytes(&bytes) {
            Ok(()) => state.flash_success("Sample imported."),
            Err(e) => state.flash_error(format!("Import failed: {}", e)),
        },
        None => state.flash_error("No sample file was uploaded."),
    }
    redirect("/")
}

// ---------------------------------------------------------------------------
// GET /sample/export
// ---------------------------------------------------------------------------

pub fn handle_export(state: &mut StudioState) -> HttpResponse {
    match state.session.sample() {
        Some(sample) => download_response(sample.as_bytes().to_vec(), "sample.raw"),
        None => not_found(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrite_sketch::SAMPLE_LEN;

    use crate::routes::test_support::*;
    use crate::state::FlashKind;

    const MULTIPART: &str = "multipart/form-data; boundary=XYZ";

    fn upload_body(field: &str, payload: &str) -> String {
        format!(
            "--XYZ\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"digit.raw\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n{}\r\n--XYZ--\r\n",
            field, payload
        )
    }

    fn import(state: &mut StudioState, content_type: &str, body: String) -> Option<(FlashKind, String)> {
        let response = handle_import(&mut post_upload("/sample/import", content_type, body), state);
        assert_redirect_home(&response, state)
    }

    #[test]
    fn import_adopts_a_full_size_upload() {
        let mut state = studio();
        let payload = "x".repeat(SAMPLE_LEN);
        let flash = import(&mut state, MULTIPART, upload_body("sample", &payload));
        assert_eq!(flash, Some((FlashKind::Success, "Sample imported.".to_string())));
        assert_eq!(state.session.sample().unwrap().get(27, 27), b'x');
        assert_eq!(handle_png(&mut state).status_code().0, 200);
    }

    #[test]
    fn import_rejects_wrong_size_upload() {
        let mut state = studio();
        let (kind, text) = import(&mut state, MULTIPART, upload_body("sample", "abc")).unwrap();
        assert_eq!(kind, FlashKind::Error);
        assert!(text.starts_with("Import failed:"), "{}", text);
        assert!(text.contains('3'), "{}", text);
        assert!(state.session.sample().is_none());
    }

    #[test]
    fn import_needs_a_multipart_sample_field() {
        let mut state = studio();
        let flash = import(&mut state, "text/plain", upload_body("sample", "abc"));
        assert_eq!(flash, Some((FlashKind::Error, "Invalid upload request.".to_string())));

        let flash = import(&mut state, MULTIPART, upload_body("other", "abc"));
        assert_eq!(flash, Some((FlashKind::Error, "No sample file was uploaded.".to_string())));
    }

    #[test]
    fn preview_and_export_need_a_sample() {
        let mut state = studio();
        assert_eq!(handle_png(&mut state).status_code().0, 404);
        assert_eq!(handle_export(&mut state).status_code().0, 404);
    }
}
