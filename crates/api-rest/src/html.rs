//! HTML rendering for the admin pages.
//!
//! Pages are assembled from plain strings. Every value that came from a user
//! or from the data file goes through [`escape`] first.

use axum::{http::StatusCode, response::Html};
use spots_core::SpotRecord;
use std::fmt::Write;

use crate::admin::{DetailForm, SpotForm};

/// State of the "new spot" page.
#[derive(Debug, Default)]
pub struct SpotPage {
    pub errors: Vec<String>,
    pub prefill: SpotForm,
}

/// State of the "new detail section" page.
#[derive(Debug, Default)]
pub struct DetailPage {
    pub errors: Vec<String>,
    pub submitted: bool,
    pub created: bool,
    pub prefill: DetailForm,
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

/// Percent-encodes a single URL path segment.
pub fn encode_path_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(byte as char);
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    out
}

/// Path of the detail-section form for `spot_id`.
pub fn detail_form_path(spot_id: &str) -> String {
    format!("/admin/spots/{}/details/new", encode_path_segment(spot_id))
}

pub fn spot_page(spots: &[SpotRecord], page: &SpotPage) -> Html<String> {
    let form = &page.prefill;
    let mut body = String::from("<h1>New scenic spot</h1>\n");
    body.push_str(&error_list(&page.errors));

    body.push_str("<form method=\"post\" action=\"/admin/spots/new\">\n");
    body.push_str(&text_input("id", "Id *", &form.id));
    body.push_str(&text_input("name", "Name *", &form.name));
    body.push_str(&text_input("location", "Location", &form.location));
    body.push_str(&textarea("summary", "Summary", &form.summary));
    body.push_str(&text_input("heroImage", "Hero image URL", &form.hero_image));
    body.push_str(&text_input("thumbnail", "Thumbnail URL", &form.thumbnail));
    body.push_str(&text_input("tags", "Tags (comma separated)", &form.tags));
    body.push_str("<button type=\"submit\">Save spot</button>\n</form>\n");

    body.push_str("<h2>Existing spots</h2>\n");
    if spots.is_empty() {
        body.push_str("<p>No spots yet.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for spot in spots {
            let id = spot.id().unwrap_or_default();
            body.push_str("<li>");
            if let Some(thumbnail) = spot.thumbnail().filter(|t| !t.is_empty()) {
                let _ = write!(body, "<img src=\"{}\" alt=\"\" width=\"48\"> ", escape(thumbnail));
            }
            let _ = writeln!(
                body,
                "<a href=\"{}\">{}</a> <small>{}</small> ({} sections)</li>",
                escape(&detail_form_path(id)),
                escape(spot.name().unwrap_or(id)),
                escape(id),
                spot.detail_sections().len()
            );
        }
        body.push_str("</ul>\n");
    }

    layout("New scenic spot", &body)
}

pub fn detail_page(spot: &SpotRecord, page: &DetailPage) -> Html<String> {
    let spot_id = spot.id().unwrap_or_default();
    let spot_name = spot.name().unwrap_or(spot_id);
    let form = &page.prefill;

    let mut body = String::new();
    let _ = writeln!(body, "<h1>Detail sections: {}</h1>", escape(spot_name));
    if page.created {
        let _ = writeln!(
            body,
            "<p class=\"notice\">Spot \"{}\" created. Add its detail sections below.</p>",
            escape(spot_name)
        );
    }
    if page.submitted {
        body.push_str("<p class=\"notice\">Detail section added.</p>\n");
    }
    body.push_str(&error_list(&page.errors));

    let _ = writeln!(
        body,
        "<form method=\"post\" action=\"{}\">",
        escape(&detail_form_path(spot_id))
    );
    body.push_str(&text_input("title", "Title *", &form.title));
    body.push_str(&text_input("emphasis", "Emphasis", &form.emphasis));
    body.push_str(&textarea("paragraphs", "Paragraphs (one per line)", &form.paragraphs));
    body.push_str(&text_input("image", "Image URL *", &form.image));
    body.push_str(&text_input("imageAlt", "Image alt text", &form.image_alt));
    body.push_str("<button type=\"submit\">Add section</button>\n</form>\n");

    let sections = spot.detail_sections();
    let _ = writeln!(body, "<h2>Existing sections ({})</h2>", sections.len());
    if !sections.is_empty() {
        body.push_str("<ol>\n");
        for section in &sections {
            let _ = write!(body, "<li><strong>{}</strong>", escape(&section.title));
            if !section.emphasis.is_empty() {
                let _ = write!(body, " <em>{}</em>", escape(&section.emphasis));
            }
            let _ = writeln!(body, " ({} paragraphs)</li>", section.paragraphs.len());
        }
        body.push_str("</ol>\n");
    }
    body.push_str("<p><a href=\"/admin/spots/new\">Back to spots</a></p>\n");

    layout(&format!("Detail sections: {spot_name}"), &body)
}

pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let body = format!(
        "<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"/admin/spots/new\">Back to spots</a></p>\n",
        status,
        escape(message)
    );
    layout(&status.to_string(), &body)
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        body
    ))
}

fn error_list(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let mut out = String::from("<ul class=\"errors\">\n");
    for error in errors {
        let _ = writeln!(out, "<li>{}</li>", escape(error));
    }
    out.push_str("</ul>\n");
    out
}

fn text_input(name: &str, label: &str, value: &str) -> String {
    format!(
        "<label>{label}<input type=\"text\" name=\"{name}\" value=\"{}\"></label>\n",
        escape(value)
    )
}

fn textarea(name: &str, label: &str, value: &str) -> String {
    format!(
        "<label>{label}<textarea name=\"{name}\">{}</textarea></label>\n",
        escape(value)
    )
}
