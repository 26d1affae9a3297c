use crate::schema::{Field, Schema, TypeReference};
use crate::type_mapper::{is_complex_type, list_depth, map_type, MappedType, TargetTypes};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    pub fn keyword(self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
        }
    }
}

/// How an argument value is spliced into the operation document at request time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentEncoding {
    /// JSON-stringified.
    Scalar,
    /// Inlined as a bare identifier.
    Enum,
    /// Bare identifiers joined inside brackets.
    EnumList,
    /// Flattened field by field. Fields listed in `enum_keys` stay bare, every other
    /// field is JSON-stringified, so objects nested below the first level are not
    /// valid GraphQL literals.
    Object { enum_keys: Vec<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentPlan {
    pub name: String,
    pub type_name: String,
    pub mapped: MappedType,
    pub required: bool,
    pub encoding: ArgumentEncoding,
    pub default_value: Option<String>,
}

impl ArgumentPlan {
    fn references_declaration(&self) -> bool {
        self.mapped.is_enum || matches!(self.encoding, ArgumentEncoding::Object { .. })
    }
}

/// Everything needed to render one root field's document, request function and hook.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub kind: OperationKind,
    pub field_name: String,
    pub operation_name: String,
    pub document_name: String,
    pub request_name: String,
    pub hook_name: String,
    pub return_type: MappedType,
    pub return_type_name: String,
    /// Type whose keys form the caller's field selection. `None` for scalar and enum
    /// results, which take no selection.
    pub selection: Option<String>,
    pub arguments: Vec<ArgumentPlan>,
    pub description: Option<String>,
    pub deprecation: Option<String>,
}

impl Operation {
    pub fn has_arguments(&self) -> bool {
        !self.arguments.is_empty()
    }

    /// True when an argument is rendered through the `serializeEnum`/`serializeInput` helpers.
    pub fn needs_serializers(&self) -> bool {
        self.arguments
            .iter()
            .any(|arg| matches!(arg.encoding, ArgumentEncoding::EnumList | ArgumentEncoding::Object { .. }))
    }

    /// Generated declarations the rendered operation refers to, in signature order.
    pub fn referenced_types(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        if self.selection.is_some() || self.return_type.is_enum {
            names.push(&self.return_type_name);
        }
        for arg in self.arguments.iter().filter(|arg| arg.references_declaration()) {
            if !names.contains(&arg.type_name.as_str()) {
                names.push(&arg.type_name);
            }
        }
        names
    }
}

pub fn plan_operation(schema: &Schema, kind: OperationKind, field: &Field, targets: &TargetTypes) -> Operation {
    let pascal_name = to_pascal_case(&field.name);
    let operation_name = match kind {
        OperationKind::Query => format!("get{}", pascal_name),
        OperationKind::Mutation => field.name.clone(),
    };
    let document_name = match kind {
        OperationKind::Query => format!("{}Query", field.name),
        OperationKind::Mutation => format!("{}Mutation", field.name),
    };
    let selection = if is_complex_type(&field.field_type) {
        Some(field.field_type.name().to_string())
    } else {
        None
    };
    let arguments = field
        .arguments
        .iter()
        .map(|arg| ArgumentPlan {
            name: arg.name.clone(),
            type_name: arg.argument_type.name().to_string(),
            mapped: map_type(&arg.argument_type, targets),
            required: arg.argument_type.is_required(),
            encoding: argument_encoding(schema, &arg.argument_type, targets),
            default_value: arg.default_value.clone(),
        })
        .collect();
    let deprecation = if field.is_deprecated {
        Some(field.deprecation_reason.clone().unwrap_or_default())
    } else {
        None
    };

    Operation {
        kind,
        field_name: field.name.clone(),
        operation_name,
        document_name,
        request_name: format!("request{}", pascal_name),
        hook_name: format!("use{}", pascal_name),
        return_type: map_type(&field.field_type, targets),
        return_type_name: field.field_type.name().to_string(),
        selection,
        arguments,
        description: field.description.clone(),
        deprecation,
    }
}

fn argument_encoding(schema: &Schema, reference: &TypeReference, targets: &TargetTypes) -> ArgumentEncoding {
    if is_complex_type(reference) {
        let enum_keys = schema
            .find_type(reference.name())
            .map(|input| {
                input
                    .fields
                    .iter()
                    .filter(|field| map_type(&field.field_type, targets).is_enum)
                    .map(|field| field.name.clone())
                    .collect()
            })
            .unwrap_or_default();
        return ArgumentEncoding::Object { enum_keys };
    }
    if map_type(reference, targets).is_enum {
        if list_depth(reference) > 0 {
            ArgumentEncoding::EnumList
        } else {
            ArgumentEncoding::Enum
        }
    } else {
        ArgumentEncoding::Scalar
    }
}

pub fn to_pascal_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
