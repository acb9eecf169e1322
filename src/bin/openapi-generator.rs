//! Print the OpenAPI document to stdout, for committing or client generation.

use quiz_rally_back::services::documentation::ApiDoc;
use utoipa::OpenApi;

fn main() {
    let doc = ApiDoc::openapi();
    println!("{}", doc.to_pretty_json().unwrap());
}
