//! Milestone calendar endpoint

use std::collections::HashMap;

use axum::{
    Router,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};
use babycal_core::request::{parse_reference_date, parse_toggle, split_categories};
use babycal_core::sanitize::sanitize_name;
use babycal_core::{BabycalResult, OutputFormat, RequestOptions};
use chrono::{Local, NaiveDate};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/calendar", get(get_calendar))
}

/// GET /calendar - Milestones for a birth date as JSON or .ics
///
/// Query: `birth`, `name` (or `title`), `format`, `emoji`, `exclude=a,b`,
/// and `<category>=false` for any known category.
async fn get_calendar(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let today = Local::now().date_naive();
    let options = request_options(&params, &state, today)?;

    let rendered = state.generator.render(&options)?;

    let mut response = (
        [(header::CONTENT_TYPE, rendered.format.content_type())],
        rendered.body,
    )
        .into_response();
    if let Some(filename) = rendered.format.attachment_filename() {
        let disposition = format!("attachment; filename=\"{filename}\"");
        response
            .headers_mut()
            .insert(header::CONTENT_DISPOSITION, disposition.parse()?);
    }

    Ok(response)
}

fn request_options(
    params: &HashMap<String, String>,
    state: &AppState,
    today: NaiveDate,
) -> BabycalResult<RequestOptions> {
    let get = |key: &str| params.get(key).map(String::as_str);

    let format = get("format")
        .filter(|f| !f.trim().is_empty())
        .map(str::parse::<OutputFormat>)
        .transpose()?
        .unwrap_or_default();

    let name = get("name").or_else(|| get("title")).unwrap_or_default();
    let include_glyph = get("emoji").and_then(parse_toggle).unwrap_or(false);

    let toggled_off = state
        .categories
        .iter()
        .filter(|category| get(category.as_str()).and_then(parse_toggle) == Some(false))
        .cloned();

    Ok(RequestOptions::new(parse_reference_date(get("birth"), today))
        .with_name(sanitize_name(name))
        .with_excluded(get("exclude").map(split_categories).into_iter().flatten())
        .with_excluded(toggled_off)
        .with_glyph(include_glyph)
        .with_format(format))
}
