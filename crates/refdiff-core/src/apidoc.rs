//! Declarative API documentation for the refdiff plugin routes.
//!
//! Routes are registered in a static table and rendered into an OpenAPI 3.0
//! document. Nothing here handles requests.

use serde::Serialize;
use serde_json::{json, Map, Value};

pub const REFDIFF_TAG: &str = "plugins/refdiff";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApiRoute {
    pub method: Method,
    pub path: &'static str,
    pub summary: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    /// Component schema name of the JSON request body.
    pub request_body: Option<&'static str>,
}

pub const ROUTES: &[ApiRoute] = &[ApiRoute {
    method: Method::Post,
    path: "/blueprints/refdiff/blueprint-plan",
    summary: "blueprints plan for refdiff",
    description: "blueprints plan for refdiff",
    tags: &[REFDIFF_TAG],
    request_body: Some("RefdiffBlueprintPlan"),
}];

#[must_use]
pub fn routes() -> &'static [ApiRoute] {
    ROUTES
}

/// Document-level metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiInfo {
    pub title: String,
    pub version: String,
    pub description: String,
    pub base_path: String,
}

impl Default for ApiInfo {
    fn default() -> Self {
        Self {
            title: "refdiff plugin API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "Blueprint plan shapes for comparing pairs of version-control refs"
                .to_string(),
            base_path: "/".to_string(),
        }
    }
}

fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

fn string_tuple(arity: usize, description: &str) -> Value {
    json!({
        "type": "array",
        "description": description,
        "items": { "type": "string" },
        "minItems": arity,
        "maxItems": arity,
    })
}

fn component_schemas() -> Map<String, Value> {
    let mut schemas = Map::new();
    schemas.insert(
        "RefPair".to_string(),
        json!({
            "type": "object",
            "required": ["newRef", "oldRef"],
            "properties": {
                "newRef": { "type": "string", "example": "refs/tags/v0.6.0" },
                "oldRef": { "type": "string", "example": "refs/tags/v0.5.0" },
            },
        }),
    );
    schemas.insert(
        "ComparisonOptions".to_string(),
        json!({
            "type": "object",
            "required": ["repoId"],
            "properties": {
                "repoId": { "type": "string", "example": "github:GithubRepo:1:384111310" },
                "pairs": { "type": "array", "items": schema_ref("RefPair") },
            },
        }),
    );
    schemas.insert(
        "BlueprintPlanEntry".to_string(),
        json!({
            "type": "object",
            "required": ["plugin", "options"],
            "properties": {
                "plugin": { "type": "string", "example": "refdiff" },
                "options": schema_ref("ComparisonOptions"),
            },
        }),
    );
    schemas.insert(
        "RefdiffBlueprintPlan".to_string(),
        json!({
            "type": "array",
            "description": "Stages in execution order; tasks inside a stage run together",
            "items": { "type": "array", "items": schema_ref("BlueprintPlanEntry") },
        }),
    );
    schemas.insert(
        "RefCommitPair".to_string(),
        string_tuple(4, "Resolved comparison, four opaque slots"),
    );
    schemas.insert(
        "RefPairList".to_string(),
        string_tuple(2, "Two refs as a positional array"),
    );
    schemas.insert(
        "RefdiffOptions".to_string(),
        json!({
            "type": "object",
            "required": ["repoId"],
            "properties": {
                "repoId": { "type": "string" },
                "tasks": { "type": "array", "items": { "type": "string" } },
                "pairs": { "type": "array", "items": schema_ref("RefPair") },
                "tagsPattern": { "type": "string" },
                "tagsLimit": { "type": "integer", "minimum": 0 },
                "tagsOrder": { "type": "string" },
                "allPairs": { "type": "array", "items": schema_ref("RefCommitPair") },
                "projectName": { "type": "string" },
            },
        }),
    );
    schemas
}

fn operation(route: &ApiRoute) -> Value {
    let mut op = json!({
        "summary": route.summary,
        "description": route.description,
        "tags": route.tags,
        "responses": { "200": { "description": "OK" } },
    });
    if let Some(body) = route.request_body {
        op["requestBody"] = json!({
            "required": true,
            "content": { "application/json": { "schema": schema_ref(body) } },
        });
    }
    op
}

/// Renders the registered routes as an OpenAPI 3.0 document.
#[must_use]
pub fn openapi_document(info: &ApiInfo) -> Value {
    let mut paths = Map::new();
    for route in routes() {
        let item = paths
            .entry(route.path.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        item[route.method.as_str()] = operation(route);
    }

    let mut tags: Vec<&str> = routes().iter().flat_map(|r| r.tags.iter().copied()).collect();
    tags.sort_unstable();
    tags.dedup();

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": info.title,
            "version": info.version,
            "description": info.description,
        },
        "servers": [{ "url": info.base_path }],
        "tags": tags.iter().map(|t| json!({ "name": t })).collect::<Vec<_>>(),
        "paths": paths,
        "components": { "schemas": component_schemas() },
    })
}
