use std::path::{Path, PathBuf};
use serde::Deserialize;
use crate::code_generator::ArtifactNames;
use crate::code_writer::{default_line_break, CodeFileOptions};
use crate::error::{Error, Result};

pub const DEFAULT_CONFIG_PATH: &str = "graphql-generator.conf.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodegenConfig {
    pub schema: String,
    pub output: OutputConfig,
    pub language: String,
    pub languages: Vec<LanguageConfig>,
    pub runtime: String,
    pub indent: String,
    pub line_break: String,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        CodegenConfig {
            schema: "schema.json".to_string(),
            output: OutputConfig::default(),
            language: "typescript".to_string(),
            languages: Vec::new(),
            runtime: "./client".to_string(),
            indent: "  ".to_string(),
            line_break: default_line_break(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
    pub filenames: Filenames,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            path: "output/gpl".to_string(),
            filenames: Filenames::default(),
        }
    }
}

/// `main` is the hooks module.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Filenames {
    pub index: String,
    pub queries: String,
    pub resources: String,
    pub types: String,
    pub main: String,
    pub client: String,
}

impl Default for Filenames {
    fn default() -> Self {
        let names = ArtifactNames::default();
        Filenames {
            index: names.index,
            queries: names.queries,
            resources: names.resources,
            types: names.types,
            main: names.hooks,
            client: names.client,
        }
    }
}

/// Entry of the `languages` allow-list. Other keys, such as a plugin `entrypoint`,
/// are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LanguageConfig {
    pub name: String,
}

/// Where the schema comes from, decided by the shape of the `schema` setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    Endpoint { url: String },
    Stdin,
    SdlFile { path: PathBuf },
    IntrospectionFile { path: PathBuf },
}

impl SchemaSource {
    pub fn parse(schema: &str) -> SchemaSource {
        if schema.starts_with("http://") || schema.starts_with("https://") {
            return SchemaSource::Endpoint { url: schema.to_string() };
        }
        if schema == "-" {
            return SchemaSource::Stdin;
        }
        let path = PathBuf::from(schema);
        match path.extension().and_then(|extension| extension.to_str()) {
            Some("graphql") | Some("gql") => SchemaSource::SdlFile { path },
            _ => SchemaSource::IntrospectionFile { path },
        }
    }
}

impl CodegenConfig {
    /// Reads the config at `path`, or the default location when none is given.
    /// Only a missing default file falls back to the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<CodegenConfig> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config {
                        path: path.display().to_string(),
                        message: "file does not exist".to_string(),
                    });
                }
                CodegenConfig::read(path)
            }
            None => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    CodegenConfig::read(path)
                } else {
                    tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_PATH);
                    Ok(CodegenConfig::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<CodegenConfig> {
        let content = std::fs::read_to_string(path)?;
        let config = CodegenConfig::from_json_str(&content, &path.display().to_string())?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_json_str(content: &str, path: &str) -> Result<CodegenConfig> {
        if content.trim().is_empty() {
            return Err(Error::Config { path: path.to_string(), message: "config file is empty".to_string() });
        }
        let deserializer = &mut serde_json::Deserializer::from_str(content);
        serde_path_to_error::deserialize(deserializer).map_err(|error| Error::Config {
            path: path.to_string(),
            message: format!("{} at `{}`", error.inner(), error.path()),
        })
    }

    /// An empty `languages` list allows any registered language.
    pub fn validate_language(&self) -> Result<()> {
        if self.languages.is_empty()
            || self.languages.iter().any(|language| language.name.eq_ignore_ascii_case(&self.language))
        {
            Ok(())
        } else {
            Err(Error::LanguageNotConfigured(self.language.clone()))
        }
    }

    pub fn schema_source(&self) -> SchemaSource {
        SchemaSource::parse(&self.schema)
    }

    pub fn output_directory(&self) -> PathBuf {
        PathBuf::from(&self.output.path)
    }

    pub fn artifact_names(&self) -> ArtifactNames {
        let filenames = &self.output.filenames;
        ArtifactNames {
            index: filenames.index.clone(),
            queries: filenames.queries.clone(),
            resources: filenames.resources.clone(),
            types: filenames.types.clone(),
            hooks: filenames.main.clone(),
            client: filenames.client.clone(),
            runtime: self.runtime.clone(),
        }
    }

    pub fn code_file_options(&self) -> CodeFileOptions {
        CodeFileOptions {
            line_break: self.line_break.clone(),
            indent: self.indent.clone(),
        }
    }
}
