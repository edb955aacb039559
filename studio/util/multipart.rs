//! Minimal multipart/form-data reader, enough for single file uploads.

/// Returns the index of the first occurrence of `needle` in `haystack`.
pub fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Splits `haystack` on every occurrence of `needle`.
fn split_on<'a>(haystack: &'a [u8], needle: &[u8]) -> Vec<&'a [u8]> {
    let mut result = Vec::new();
    let mut rest = haystack;
    while let Some(pos) = find_subsequence(rest, needle) {
        result.push(&rest[..pos]);
        rest = &rest[pos + needle.len()..];
    }
    result.push(rest);
    result
}

/// Extracts the boundary token from a Content-Type header value like
/// `multipart/form-data; boundary=----WebKitFormBoundaryXXX`.
pub fn extract_boundary(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .map(|s| s.trim())
        .find_map(|s| s.strip_prefix("boundary="))
        .map(|b| b.trim_matches('"').to_owned())
        .filter(|b| !b.is_empty())
}

/// Value of `key="..."` inside a Content-Disposition header.
fn disposition_param(headers: &str, key: &str) -> Option<String> {
    let needle = format!("{}=\"", key);
    // `name=` also matches inside `filename=`; require a separator before it.
    let pos = headers
        .match_indices(&needle)
        .map(|(i, _)| i)
        .find(|&i| i == 0 || matches!(headers.as_bytes()[i - 1], b' ' | b';'))?;
    let rest = &headers[pos + needle.len()..];
    let end = rest.find('"')?;
    Some(rest[..end].to_owned())
}

/// Raw bytes of the file uploaded under form field `field`.
///
/// Only the single CRLF that precedes the next boundary is stripped, so binary
/// payloads come back byte-exact.
pub fn file_field(body: &[u8], boundary: &str, field: &str) -> Option<Vec<u8>> {
    let delimiter = format!("--{}", boundary);
    for part in split_on(body, delimiter.as_bytes()) {
        let sep = b"\r\n\r\n";
        let Some(sep_pos) = find_subsequence(part, sep) else {
            continue;
        };
        let headers = String::from_utf8_lossy(&part[..sep_pos]);
        if disposition_param(&headers, "filename").is_none() {
            continue;
        }
        if disposition_param(&headers, "name").as_deref() != Some(field) {
            continue;
        }
        let raw = &part[sep_pos + sep.len()..];
        return Some(raw.strip_suffix(b"\r\n").unwrap_or(raw).to_vec());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(payload: &[u8]) -> Vec<u8> {
        let mut b = Vec::new();
        b.extend_from_slice(b"--XYZ\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n");
        b.extend_from_slice(
            b"--XYZ\r\nContent-Disposition: form-data; name=\"sample\"; filename=\"seven.raw\"\r\n\
              Content-Type: application/octet-stream\r\n\r\n",
        );
        b.extend_from_slice(payload);
        b.extend_from_slice(b"\r\n--XYZ--\r\n");
        b
    }

    #[test]
    fn boundary_from_content_type() {
        assert_eq!(extract_boundary("multipart/form-data; boundary=XYZ").as_deref(), Some("XYZ"));
        assert_eq!(extract_boundary("multipart/form-data; boundary=\"a b\"").as_deref(), Some("a b"));
        assert_eq!(extract_boundary("text/plain"), None);
    }

    #[test]
    fn extracts_binary_file_exactly() {
        let payload: Vec<u8> = (0..784).map(|i| (i % 256) as u8).collect();
        let got = file_field(&body(&payload), "XYZ", "sample").unwrap();
        assert_eq!(got, payload);
    }

    #[test]
    fn ignores_text_fields_and_other_names() {
        assert_eq!(file_field(&body(b"abc"), "XYZ", "note"), None);
        assert_eq!(file_field(&body(b"abc"), "XYZ", "other"), None);
    }
}
