use axum::{
    Json, Router,
    extract::State,
    response::{Html, Redirect},
    routing::get,
};
use serde_json::Value;

use crate::state::AppState;

const DOC_PATH: &str = "/swagger/doc.json";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::permanent("/swagger/index.html") }))
        .route("/doc.json", get(get_document))
        .route("/index.html", get(get_index))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

async fn get_document(State(state): State<AppState>) -> Json<Value> {
    Json(state.document.as_ref().clone())
}

async fn get_index(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui.css" />
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {{
            SwaggerUIBundle({{
                url: '{DOC_PATH}',
                dom_id: '#swagger-ui',
                deepLinking: true,
            }});
        }};
    </script>
</body>
</html>
"#,
        title = escape_html(&state.config.title),
    ))
}
