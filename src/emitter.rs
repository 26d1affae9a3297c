use crate::code_generator::{ArtifactNames, ArtifactParts, Artifacts};
use crate::code_writer::CodeFileOptions;
use crate::error::{Error, Result};
use crate::imports::ImportResolver;
use crate::operation::OperationKind;
use crate::schema::{Field, Schema, SchemaField, TypeReference};
use crate::type_mapper::MappedType;
use crate::typescript::TypeScriptEmitter;

/// Rendered pieces of one root field.
#[derive(Debug, Clone, Default)]
pub struct OperationOutput {
    pub document: String,
    pub request: String,
    pub hook: String,
    pub imports: ImportResolver,
    pub needs_serializers: bool,
}

/// A target-language backend.
pub trait Emitter {
    fn language(&self) -> &'static str;

    fn map_type(&self, reference: &TypeReference) -> MappedType;

    fn generate_operation(
        &self,
        schema: &Schema,
        kind: OperationKind,
        field: &Field,
        names: &ArtifactNames,
    ) -> OperationOutput;

    /// Declaration block for an object, input object or enum; `None` for anything else.
    fn generate_declarations(&self, field: &SchemaField) -> Option<String>;

    fn assemble(&self, parts: ArtifactParts, names: &ArtifactNames) -> Artifacts;
}

/// Backends are resolved from this static table; a new language is a new `Emitter`
/// implementation plus an entry here.
pub fn emitter_for(language: &str, options: CodeFileOptions) -> Result<Box<dyn Emitter>> {
    match language.to_ascii_lowercase().as_str() {
        "typescript" | "ts" => Ok(Box::new(TypeScriptEmitter::new(options))),
        _ => Err(Error::UnknownLanguage(language.to_string())),
    }
}
