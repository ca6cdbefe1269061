use anyhow::Result;
use refdiff_core::{openapi_document, ApiInfo};

pub fn run(compact: bool) -> Result<()> {
    let doc = openapi_document(&ApiInfo::default());
    let out = if compact {
        serde_json::to_string(&doc)?
    } else {
        serde_json::to_string_pretty(&doc)?
    };
    println!("{out}");
    Ok(())
}
