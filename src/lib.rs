pub mod code_generator;
pub mod code_writer;
pub mod config;
pub mod emitter;
pub mod error;
pub mod fetch;
pub mod imports;
pub mod operation;
pub mod schema;
pub mod schema_introspection;
pub mod schema_sdl;
pub mod type_mapper;
pub mod typescript;

pub use code_generator::{generate, write_files, ArtifactNames, Artifacts};
pub use config::{CodegenConfig, SchemaSource};
pub use emitter::{emitter_for, Emitter};
pub use error::{Error, Result};
pub use schema::Schema;
