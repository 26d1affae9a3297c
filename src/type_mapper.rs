use crate::schema::{TypeKind, TypeReference};

/// Target-language spellings of the GraphQL primitives.
#[derive(Debug, Clone, Copy)]
pub struct TargetTypes {
    pub string: &'static str,
    pub number: &'static str,
    pub boolean: &'static str,
    pub dynamic: &'static str,
    pub list_suffix: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    pub expression: String,
    pub nullable: bool,
    pub is_enum: bool,
}

pub fn map_type(reference: &TypeReference, targets: &TargetTypes) -> MappedType {
    match reference {
        TypeReference::NonNull(inner) => MappedType { nullable: false, ..map_type(inner, targets) },
        TypeReference::List(inner) => {
            let item = map_type(inner, targets);
            MappedType {
                expression: format!("{}{}", item.expression, targets.list_suffix),
                nullable: true,
                is_enum: item.is_enum,
            }
        }
        TypeReference::Named { kind, name } => {
            let (expression, is_enum) = match kind {
                TypeKind::Scalar => (scalar_to_code(name, targets).to_string(), false),
                TypeKind::Object | TypeKind::InputObject => (name.clone(), false),
                TypeKind::Enum => (name.clone(), true),
                _ => (targets.dynamic.to_string(), false),
            };
            MappedType { expression, nullable: true, is_enum }
        }
    }
}

fn scalar_to_code<'a>(name: &str, targets: &'a TargetTypes) -> &'a str {
    match name {
        "String" | "ID" => targets.string,
        "Int" | "Float" => targets.number,
        "Boolean" => targets.boolean,
        _ => targets.dynamic,
    }
}

/// True when the reference resolves to an object or input object, which need a
/// field selection or structured serialization rather than a plain value.
pub fn is_complex_type(reference: &TypeReference) -> bool {
    matches!(reference.leaf_kind(), TypeKind::Object | TypeKind::InputObject)
}

pub fn list_depth(reference: &TypeReference) -> usize {
    match reference {
        TypeReference::List(inner) => 1 + list_depth(inner),
        TypeReference::NonNull(inner) => list_depth(inner),
        TypeReference::Named { .. } => 0,
    }
}
