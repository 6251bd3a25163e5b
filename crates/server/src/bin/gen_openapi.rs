use server::openapi::ApiDoc;
use utoipa::OpenApi;

/// Print the OpenAPI document as pretty JSON, e.g. `cargo run --bin gen-openapi > openapi.json`.
fn main() -> Result<(), serde_json::Error> {
    let spec = ApiDoc::openapi().to_pretty_json()?;
    println!("{spec}");
    Ok(())
}
