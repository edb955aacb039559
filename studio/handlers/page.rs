use ferrite_sketch::{Scores, Session};

use crate::render::{html_escape, render_page};
use crate::routes::{html_response, HttpResponse};
use crate::state::{FlashKind, FlashMessage, StudioState};

/// Full width of a 100% bar in the results chart.
const BAR_WIDTH_PX: f32 = 200.0;

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

pub fn handle_get(state: &mut StudioState) -> HttpResponse {
    let flash = state.take_flash();
    html_response(build_page(&state.session, flash.as_ref()))
}

pub fn build_page(session: &Session, flash: Option<&FlashMessage>) -> String {
    let canvas_size = session.canvas().bitmap().width();
    let preview_size = session.preview().bitmap().width();

    let preview_html = if session.sample().is_some() {
        format!(
            r#"<img src="/sample.png" width="{s}" height="{s}" alt="28x28 sample">"#,
            s = preview_size
        )
    } else {
        format!(r#"<div class="empty-preview" style="width:{s}px;height:{s}px"></div>"#, s = preview_size)
    };

    render_page(canvas_size, |tmpl| {
        tmpl
            .replace("{{FLASH}}", &render_flash_html(flash))
            .replace("{{MODEL_NOTICE}}", &render_model_notice(session))
            .replace("{{PREVIEW}}", &preview_html)
            .replace("{{RESULTS}}", &render_results(session.scores(), session.label(), session.class_labels()))
            .replace("{{TEST_DISABLED}}", disabled(session.can_test()))
            .replace("{{LOAD_DISABLED}}", disabled(session.can_load()))
            .replace("{{EXPORT_DISABLED}}", disabled(session.sample().is_some()))
    })
}

fn disabled(enabled: bool) -> &'static str {
    if enabled { "" } else { "disabled" }
}

pub fn render_flash_html(flash: Option<&FlashMessage>) -> String {
    match flash {
        Some(f) => {
            let cls = match f.kind {
                FlashKind::Success => "flash-success",
                FlashKind::Error   => "flash-error",
            };
            format!(r#"<div class="flash {}">{}</div>"#, cls, html_escape(&f.text))
        }
        None => String::new(),
    }
}

fn render_model_notice(session: &Session) -> String {
    match session.model_error() {
        Some(e) => format!(
            r#"<div class="flash flash-error">Model unavailable, inference is disabled: {}</div>"#,
            html_escape(e)
        ),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Results chart
// ---------------------------------------------------------------------------

/// One bar per class, 0 through 9 in order. Classes are shown by the model's
/// own names when it has them.
pub fn render_results(scores: Option<&Scores>, label: Option<i32>, class_labels: Option<&[String]>) -> String {
    let name = |class: usize| match class_labels.and_then(|l| l.get(class)) {
        Some(n) => html_escape(n),
        None => class.to_string(),
    };

    let expected = match label {
        Some(l) => format!(r#"<div class="prediction-sub">expected: {}</div>"#, l),
        None => String::new(),
    };
    let Some(scores) = scores else {
        return format!(
            r#"<div class="result-card"><h2>Result</h2><p class="hint">Not tested yet.</p>{}</div>"#,
            expected
        );
    };

    let (best, best_score) = scores.best();
    let rows: String = scores.iter().map(|(digit, score)| {
        let width = (score.clamp(0.0, 1.0) * BAR_WIDTH_PX) as u32;
        let dim   = if digit != best { " dim" } else { "" };
        format!(
            r#"<tr><td class="digit">{}</td><td><div class="bar-wrap"><div class="bar-fill{}" style="width:{}px"></div></div></td><td class="prob-pct">{}%</td></tr>"#,
            name(digit), dim, width, (score * 100.0) as i32
        )
    }).collect();

    format!(
        r#"<div class="result-card"><h2>Result</h2>
<div class="prediction-hero">{best}</div>
<div class="prediction-sub">Confidence: {conf:.1}%</div>
{expected}
<table class="prob-table"><tbody>{rows}</tbody></table></div>"#,
        best = name(best), conf = best_score * 100.0, expected = expected, rows = rows
    )
}
