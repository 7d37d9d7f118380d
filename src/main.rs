//! # Resource Expand Demo
//!
//! Serializes a book twice: once as stored (foreign keys only) and once with
//! `author.profile` and `tags` expanded through in-memory interactors.
//!
//! ```bash
//! RUST_LOG=debug cargo run
//! ```

use resource_expand::framework::tracing::setup_tracing;
use resource_expand::interactor::{Arguments, InteractorError, InteractorOutput};
use resource_expand::resource::MetadataConfig;
use resource_expand::schema::{ExpandableNested, Field, Schema, SchemaMeta};
use serde_json::{json, Value};
use tracing::{info, Instrument};

const ROOT: &str = "http://api.example.com/v1/";

async fn fetch_author(args: Arguments) -> Result<InteractorOutput, InteractorError> {
    let id = args.get("id").and_then(Value::as_u64).ok_or("author id must be a number")?;
    Ok(InteractorOutput::direct(json!({
        "id": id,
        "name": "Ursula K. Le Guin",
        "profile": {"author_id": id},
    })))
}

async fn fetch_profile(args: Arguments) -> Result<InteractorOutput, InteractorError> {
    let id = args.get("author_id").cloned().unwrap_or(Value::Null);
    // The profile store hands back a query object that runs on execute.
    Ok(InteractorOutput::deferred(move || async move {
        Ok(json!({"author_id": id, "bio": "Wrote Earthsea."}))
    }))
}

async fn fetch_tags(args: Arguments) -> Result<InteractorOutput, InteractorError> {
    let slugs = args.get("slug").and_then(Value::as_array).cloned().unwrap_or_default();
    let tags = slugs
        .into_iter()
        .map(|slug| json!({"slug": slug, "label": slug.as_str().map(str::to_uppercase)}))
        .collect();
    Ok(InteractorOutput::Direct(Value::Array(tags)))
}

fn book_schema() -> Result<Schema, Box<dyn std::error::Error>> {
    let profile = Schema::new(
        "Profile",
        SchemaMeta::new(MetadataConfig::new().root(ROOT).item("profiles/{author_id}/").primary_key("author_id"))?
            .with_retrieve(fetch_profile, ["author_id"])?,
        vec![Field::value("author_id"), Field::value("bio")],
    );

    let author = Schema::new(
        "Author",
        SchemaMeta::new(MetadataConfig::new().root(ROOT).item("authors/{id}/").list("authors/"))?
            .with_retrieve(fetch_author, [("author_id", "id")])?,
        vec![
            Field::value("id"),
            Field::value("name"),
            ExpandableNested::new("profile", profile).into(),
        ],
    );

    let tag = Schema::new(
        "Tag",
        SchemaMeta::new(MetadataConfig::new().root(ROOT).item("tags/{slug}/").primary_key("slug"))?
            .with_batch(fetch_tags, ["slug"])?,
        vec![Field::value("slug"), Field::value("label")],
    );

    Ok(Schema::new(
        "Book",
        SchemaMeta::new(MetadataConfig::new().root(ROOT).item("books/{id}/").list("books/"))?,
        vec![
            Field::value("id"),
            Field::value("title"),
            ExpandableNested::new("author", author).into(),
            ExpandableNested::new("tags", tag).many().into(),
        ],
    ))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let book = json!({
        "id": 1,
        "title": "A Wizard of Earthsea",
        "author": {"author_id": 7},
        "tags": [{"slug": "fantasy"}, {"slug": "classic"}],
    });

    let mut schema = book_schema()?;
    info!(item = %schema.meta().resource().item().template(), "Schema ready");

    let plain = schema.dump(&book).await?;
    println!("{}", serde_json::to_string_pretty(&plain)?);

    schema.set_expand(["author.profile", "tags"])?;
    let span = tracing::info_span!("expanded_dump");
    let expanded = async { schema.dump(&book).await }.instrument(span).await?;
    println!("{}", serde_json::to_string_pretty(&expanded)?);

    info!("Demo completed successfully");
    Ok(())
}
