/// Template renderer for the sketch studio.
///
/// The studio has a single page (`studio/assets/studio.html`) with
/// placeholder tokens like `{{TOKEN}}`. The template is embedded at compile
/// time; `render_page` resolves the global tokens and hands the rest to a
/// closure. Tokens nobody filled are blanked.

const TEMPLATE: &str = include_str!("assets/studio.html");

/// Renders the studio page.
///
/// - `canvas_size` is the side of the drawing surface in pixels
/// - `fill` substitutes the section placeholders
pub fn render_page<F>(canvas_size: u32, fill: F) -> String
where
    F: FnOnce(String) -> String,
{
    let mut html = TEMPLATE.to_owned();
    html = html.replace("{{CANVAS_SIZE}}", &canvas_size.to_string());
    html = fill(html);
    blank_remaining(html)
}

/// Replaces any `{{TOKEN}}` left in the page with an empty string.
fn blank_remaining(mut html: String) -> String {
    while let Some(start) = html.find("{{") {
        if let Some(end) = html[start..].find("}}") {
            html.replace_range(start..start + end + 2, "");
        } else {
            break;
        }
    }
    html
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
     .replace('<', "&lt;")
     .replace('>', "&gt;")
     .replace('"', "&quot;")
}
