use std::path::{Path, PathBuf};
use futures::future;
use tokio::fs::{self, File};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use crate::code_writer::CodeFileOptions;
use crate::emitter::{Emitter, OperationOutput};
use crate::error::Result;
use crate::imports::ImportResolver;
use crate::operation::OperationKind;
use crate::schema::{Schema, SchemaField, Type};

const EMBEDDED_HASH_PREFIX: &str = "// hash:";
const DEFAULT_ENDPOINT: &str = "/graphql";

/// Output file names, plus the module the generated request functions import
/// `graphqlRequest` from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNames {
    pub index: String,
    pub queries: String,
    pub resources: String,
    pub types: String,
    pub hooks: String,
    pub client: String,
    pub runtime: String,
}

impl Default for ArtifactNames {
    fn default() -> Self {
        ArtifactNames {
            index: "index.ts".to_string(),
            queries: "queries.ts".to_string(),
            resources: "resources.ts".to_string(),
            types: "gpl.d.ts".to_string(),
            hooks: "gpl.ts".to_string(),
            client: "client.ts".to_string(),
            runtime: "./client".to_string(),
        }
    }
}

/// Accumulated per-operation output of one generation pass, before assembly.
#[derive(Debug, Clone, Default)]
pub struct ArtifactParts {
    pub declarations: Vec<String>,
    pub documents: Vec<String>,
    pub requests: Vec<String>,
    pub hooks: Vec<String>,
    pub imports: ImportResolver,
    pub needs_serializers: bool,
}

impl ArtifactParts {
    fn push_operation(&mut self, output: OperationOutput) {
        self.documents.push(output.document);
        self.requests.push(output.request);
        self.hooks.push(output.hook);
        self.imports.merge(output.imports);
        self.needs_serializers |= output.needs_serializers;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub index: String,
    pub queries: String,
    pub resources: String,
    pub types: String,
    pub hooks: String,
}

impl Artifacts {
    pub fn files<'a>(&'a self, names: &'a ArtifactNames) -> [(&'a str, &'a str); 5] {
        [
            (names.index.as_str(), self.index.as_str()),
            (names.queries.as_str(), self.queries.as_str()),
            (names.resources.as_str(), self.resources.as_str()),
            (names.types.as_str(), self.types.as_str()),
            (names.hooks.as_str(), self.hooks.as_str()),
        ]
    }
}

/// Declarations and operations are produced independently: a type needs no
/// operation and an operation needs no declaration.
pub fn generate(schema: &Schema, emitter: &dyn Emitter, names: &ArtifactNames) -> Artifacts {
    let mut parts = ArtifactParts::default();
    parts.declarations.extend(schema.fields.iter().filter_map(|field| emitter.generate_declarations(field)));
    for root in schema.roots() {
        match root {
            SchemaField::Query(root) => add_operations(&mut parts, schema, emitter, OperationKind::Query, root, names),
            SchemaField::Mutation(root) => add_operations(&mut parts, schema, emitter, OperationKind::Mutation, root, names),
            _ => (),
        }
    }
    tracing::debug!(
        declarations = parts.declarations.len(),
        operations = parts.documents.len(),
        imports = parts.imports.len(),
        language = emitter.language(),
        "generated artifacts"
    );
    emitter.assemble(parts, names)
}

fn add_operations(
    parts: &mut ArtifactParts,
    schema: &Schema,
    emitter: &dyn Emitter,
    kind: OperationKind,
    root: &Type,
    names: &ArtifactNames,
) {
    for field in &root.fields {
        parts.push_operation(emitter.generate_operation(schema, kind, field, names));
    }
}

/// The `client.ts` scaffold, pointed at `endpoint` when the schema was fetched from one.
pub fn client_scaffold(endpoint: Option<&str>, options: &CodeFileOptions) -> String {
    include_str!("../resources/client.template")
        .replace("{{endpoint}}", endpoint.unwrap_or(DEFAULT_ENDPOINT))
        .replace('\t', &options.indent)
        .replace('\n', &options.line_break)
}

pub async fn write_files(
    artifacts: &Artifacts,
    names: &ArtifactNames,
    output_directory: &Path,
    client_template: &str,
    line_break: &str,
) -> Result<()> {
    if !fs::try_exists(output_directory).await? {
        fs::create_dir_all(output_directory).await?;
        tracing::info!(directory = %output_directory.display(), "created output directory");
    }

    let client_path = output_directory.join(&names.client);
    if fs::try_exists(&client_path).await? {
        tracing::info!("{} - already exists", names.client);
    } else {
        write_new_file(&client_path, client_template).await?;
        tracing::info!("{} - created", names.client);
    }

    let writes = artifacts.files(names).map(|(file_name, content)| {
        let path = output_directory.join(file_name);
        async move {
            let result = overwrite_on_diff(&path, content, line_break).await?;
            result.log(file_name);
            Ok::<_, crate::error::Error>(())
        }
    });
    future::join_all(writes).await.into_iter().collect()
}

async fn write_new_file(file_path: &PathBuf, content: &str) -> Result<()> {
    let mut file = File::create_new(file_path).await?;
    file.write_all(content.as_bytes()).await?;
    Ok(())
}

async fn overwrite_on_diff(file_path: &PathBuf, new_content: &str, line_break: &str) -> Result<FileWriteResult> {
    let new_content_hash = crc32fast::hash(new_content.as_bytes());

    if fs::try_exists(file_path).await? {
        if read_embedded_hash(file_path).await? == Some(new_content_hash) {
            return Ok(FileWriteResult::NoChange);
        }
        let mut file = File::create(file_path).await?;
        write_all_with_hash(&mut file, new_content, new_content_hash, line_break).await?;
        Ok(FileWriteResult::Overwritten)
    } else {
        let mut file = File::create_new(file_path).await?;
        write_all_with_hash(&mut file, new_content, new_content_hash, line_break).await?;
        Ok(FileWriteResult::Created)
    }
}

async fn read_embedded_hash(path: &PathBuf) -> Result<Option<u32>> {
    let file = File::open(path).await?;
    let mut reader = BufReader::new(file);
    let mut hash_line = String::new();
    reader.read_line(&mut hash_line).await?;

    Ok(hash_line
        .strip_prefix(EMBEDDED_HASH_PREFIX)
        .and_then(|hash| hash.trim_end().parse().ok()))
}

async fn write_all_with_hash(file: &mut File, new_content: &str, hash: u32, line_break: &str) -> Result<()> {
    let content_with_hash = format!("{}{}{}{}", EMBEDDED_HASH_PREFIX, hash, line_break, new_content);
    file.write_all(content_with_hash.as_bytes()).await?;
    file.flush().await?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileWriteResult {
    Overwritten,
    NoChange,
    Created
}

impl FileWriteResult {
    fn log(&self, file_name: &str) {
        match &self {
            FileWriteResult::Created => tracing::info!("{} - created", file_name),
            FileWriteResult::NoChange => tracing::info!("{} - skipped (no change)", file_name),
            FileWriteResult::Overwritten => tracing::info!("{} - overwritten", file_name)
        }
    }
}
