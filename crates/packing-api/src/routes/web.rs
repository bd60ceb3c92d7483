//! # Order Form Page
//!
//! Server-rendered HTML for people without an API client.
//!
//! - `GET /` — catalog sizes and an empty order form
//! - `POST /` — form submission (`items=<n>`); renders the result table or an
//!   inline error on the same page
//!
//! Engine and validation failures are shown inline with status 200, as a form
//! page does. Catalog read failures are server errors.

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;

use crate::error::AppError;
use crate::routes::calculate::{solve, CalculateResponse};
use crate::state::AppState;

const INVALID_NUMBER: &str = "Please enter a valid positive number";

/// Submitted order form.
#[derive(Debug, Deserialize)]
pub struct OrderForm {
    #[serde(default)]
    pub items: String,
}

/// Build the page router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(home_page).post(submit_order))
}

async fn home_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let sizes = state.catalog_snapshot().await?;
    Ok(Html(render_page(&sizes, "", None, None)))
}

async fn submit_order(
    State(state): State<AppState>,
    form: Result<Form<OrderForm>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let raw = form.map(|Form(f)| f.items).unwrap_or_default();
    let raw = raw.trim();

    let outcome = match raw.parse::<i64>() {
        Ok(items) if items > 0 => {
            let limit = state.config.limits.max_order;
            if items > limit {
                Err(format!("Orders are limited to {limit} items"))
            } else {
                match solve(&state, items).await {
                    Ok(solution) => Ok(CalculateResponse::from(&solution)),
                    Err(AppError::Internal(msg)) => return Err(AppError::Internal(msg)),
                    Err(err) => Err(err.public_message()),
                }
            }
        }
        _ => Err(INVALID_NUMBER.to_string()),
    };

    // Re-read after the calculation so the page shows the catalog it used.
    let sizes = state.catalog_snapshot().await?;
    let page = match &outcome {
        Ok(result) => render_page(&sizes, raw, Some(result), None),
        Err(message) => render_page(&sizes, raw, None, Some(message)),
    };
    Ok(Html(page))
}

/// Render the full page.
pub fn render_page(
    sizes: &[i64],
    items: &str,
    result: Option<&CalculateResponse>,
    error: Option<&str>,
) -> String {
    let mut html = String::with_capacity(2048);
    html.push_str(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Pack Calculator</title>\n</head>\n<body>\n<h1>Pack Calculator</h1>\n",
    );

    html.push_str("<section id=\"pack-sizes\">\n<h2>Available pack sizes</h2>\n");
    if sizes.is_empty() {
        html.push_str("<p>No pack sizes configured.</p>\n");
    } else {
        html.push_str("<ul>\n");
        for size in sizes {
            html.push_str(&format!("<li>{size}</li>\n"));
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</section>\n");

    html.push_str(&format!(
        "<form method=\"post\" action=\"/\">\n\
         <label for=\"items\">Items ordered</label>\n\
         <input id=\"items\" name=\"items\" type=\"number\" min=\"1\" value=\"{}\" required>\n\
         <button type=\"submit\">Calculate</button>\n</form>\n",
        escape_html(items)
    ));

    if let Some(message) = error {
        html.push_str(&format!(
            "<p class=\"error\">{}</p>\n",
            escape_html(message)
        ));
    }

    if let Some(result) = result {
        html.push_str("<section id=\"result\">\n<h2>Result</h2>\n<table>\n");
        html.push_str("<tr><th>Pack size</th><th>Quantity</th></tr>\n");
        for pack in &result.packs {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td></tr>\n",
                pack.size, pack.quantity
            ));
        }
        html.push_str(&format!(
            "</table>\n<dl>\n\
             <dt>Items ordered</dt><dd>{}</dd>\n\
             <dt>Total items shipped</dt><dd>{}</dd>\n\
             <dt>Total packs</dt><dd>{}</dd>\n\
             <dt>Excess items</dt><dd>{}</dd>\n</dl>\n</section>\n",
            result.items_ordered,
            result.total_items_shipped,
            result.total_packs,
            result.excess_items
        ));
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
