use serde::Serialize;
use tokio::io::AsyncReadExt;
use crate::config::SchemaSource;
use crate::error::{Error, Result};
use crate::schema::Schema;
use crate::{schema_introspection, schema_sdl};

pub const INTROSPECTION_QUERY: &str = include_str!("../resources/introspect.gql");

#[derive(Serialize)]
struct GraphQLQuery<'a> {
    query: &'a str,
}

/// POSTs the introspection query and returns the raw response body.
/// The envelope is left for `schema_introspection` to unwrap.
pub async fn fetch_introspection(url: &str) -> Result<Vec<u8>> {
    tracing::info!(url, "fetching introspection schema");
    let response = reqwest::Client::new()
        .post(url)
        .json(&GraphQLQuery { query: INTROSPECTION_QUERY })
        .send()
        .await
        .map_err(|e| Error::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Http {
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        });
    }

    let body = response.bytes().await.map_err(|e| Error::Network(e.to_string()))?;
    tracing::debug!(bytes = body.len(), "received introspection response");
    Ok(body.to_vec())
}

pub async fn read_schema(source: &SchemaSource) -> Result<Schema> {
    let schema = match source {
        SchemaSource::Endpoint { url } => schema_introspection::from_response_body(&fetch_introspection(url).await?)?,
        SchemaSource::IntrospectionFile { path } => {
            tracing::info!(path = %path.display(), "reading introspection schema");
            schema_introspection::from_response_body(&tokio::fs::read(path).await?)?
        }
        SchemaSource::SdlFile { path } => {
            tracing::info!(path = %path.display(), "reading SDL schema");
            schema_sdl::from_sdl_string(&tokio::fs::read_to_string(path).await?)?
        }
        SchemaSource::Stdin => {
            tracing::info!("reading introspection schema from stdin");
            let mut buffer = Vec::new();
            tokio::io::stdin().read_to_end(&mut buffer).await?;
            schema_introspection::from_response_body(&buffer)?
        }
    };
    tracing::info!(types = schema.fields.len(), "parsed schema");
    Ok(schema)
}
