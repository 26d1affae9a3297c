use serde::Deserialize;
use serde_json::Value;
use serde_path_to_error::deserialize;
use crate::error::{Error, Result};
use crate::schema::{Argument, Enum, Field, RootNames, Schema, SchemaField, SchemaFieldKind, Type, TypeKind, TypeReference};

/// The canonical introspection query nests `ofType` seven levels deep.
const MAX_OF_TYPE_DEPTH: usize = 7;

/// Parses an introspection result, either bare (`{"__schema": ...}`) or still inside
/// a GraphQL response envelope (`{"data": {"__schema": ...}}`).
pub fn from_response_body(body: &[u8]) -> Result<Schema> {
    let document: Value = serde_json::from_slice(body)?;
    let schema_value = strip_envelope(document)?;
    let raw: RawSchema = serde_json::from_value(schema_value)?;
    let types = raw.types.ok_or(Error::MissingTypes)?;

    let mut roots = RootNames::default();
    if let Some(query) = raw.query_type {
        roots.query = query.name;
    }
    if let Some(mutation) = raw.mutation_type {
        roots.mutation = mutation.name;
    }
    if let Some(subscription) = raw.subscription_type {
        roots.subscription = subscription.name;
    }

    let mut fields = Vec::with_capacity(types.len());
    for value in types {
        let type_name = value
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("<unnamed>")
            .to_string();
        let raw_type: RawType = deserialize(value)
            .map_err(|error| Error::field_shape(&type_name, error.path().to_string(), error.inner().to_string()))?;
        if let Some(field) = normalize_type(raw_type, &roots)? {
            fields.push(field);
        }
    }
    tracing::debug!(types = fields.len(), "parsed introspection schema");
    Ok(Schema { fields })
}

fn strip_envelope(document: Value) -> Result<Value> {
    let Value::Object(mut object) = document else {
        return Err(Error::MissingSchema);
    };
    if let Some(schema) = object.remove("__schema") {
        return Ok(schema);
    }
    match object.remove("data").filter(|data| !data.is_null()) {
        Some(Value::Object(mut data)) => data.remove("__schema").ok_or(Error::MissingSchema),
        Some(_) => Err(Error::MissingSchema),
        None => match object.get("errors") {
            Some(errors) => Err(Error::GraphQl(error_messages(errors))),
            None => Err(Error::MissingSchema),
        },
    }
}

fn error_messages(errors: &Value) -> String {
    match errors.as_array() {
        Some(errors) => errors
            .iter()
            .map(|error| match error.get("message").and_then(Value::as_str) {
                Some(message) => message.to_string(),
                None => error.to_string(),
            })
            .collect::<Vec<_>>()
            .join("; "),
        None => errors.to_string(),
    }
}

fn normalize_type(raw: RawType, roots: &RootNames) -> Result<Option<SchemaField>> {
    let Some(name) = raw.name else {
        return Err(Error::field_shape("<unnamed>", "name", "named type without a name"));
    };
    let field = match raw.kind {
        TypeKind::Enum => {
            let values = raw
                .enum_values
                .ok_or_else(|| Error::field_shape(&name, "enumValues", "enum without enumValues"))?;
            SchemaField::Enum(Enum {
                name,
                values: values.into_iter().map(|value| value.name).collect(),
                description: raw.description,
            })
        }
        TypeKind::Object | TypeKind::Interface => {
            let fields = raw
                .fields
                .unwrap_or_default()
                .into_iter()
                .map(|field| to_field(&name, field))
                .collect::<Result<Vec<_>>>()?;
            let interfaces = raw
                .interfaces
                .unwrap_or_default()
                .into_iter()
                .filter_map(|interface| interface.name)
                .collect();
            let object = Type { name, fields, description: raw.description, interfaces };
            if raw.kind == TypeKind::Interface {
                SchemaField::Interface(object)
            } else {
                match roots.classify(&object.name) {
                    Some(SchemaFieldKind::Query) => SchemaField::Query(object),
                    Some(SchemaFieldKind::Mutation) => SchemaField::Mutation(object),
                    Some(SchemaFieldKind::Subscription) => SchemaField::Subscription(object),
                    _ => SchemaField::Type(object),
                }
            }
        }
        TypeKind::InputObject => {
            let fields = raw
                .input_fields
                .unwrap_or_default()
                .into_iter()
                .map(|input| {
                    let field_type = to_type_reference(&name, &format!("inputFields.{}.type", input.name), &input.input_type, 0)?;
                    Ok(Field {
                        name: input.name,
                        field_type,
                        arguments: Vec::new(),
                        description: input.description,
                        is_deprecated: false,
                        deprecation_reason: None,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            SchemaField::Input(Type { name, fields, description: raw.description, interfaces: Vec::new() })
        }
        TypeKind::Union => SchemaField::Union {
            name,
            possible_types: raw
                .possible_types
                .unwrap_or_default()
                .into_iter()
                .filter_map(|possible| possible.name)
                .collect(),
            description: raw.description,
        },
        TypeKind::Scalar => SchemaField::Scalar { name, description: raw.description },
        TypeKind::List | TypeKind::NonNull => {
            return Err(Error::field_shape(&name, "kind", "wrapper kind used as a named type"));
        }
        TypeKind::Unknown => {
            tracing::warn!(type_name = %name, "skipping type of unknown kind");
            return Ok(None);
        }
    };
    Ok(Some(field))
}

fn to_field(owner: &str, raw: RawField) -> Result<Field> {
    let field_type = to_type_reference(owner, &format!("fields.{}.type", raw.name), &raw.field_type, 0)?;
    let arguments = raw
        .args
        .into_iter()
        .map(|arg| {
            let location = format!("fields.{}.args.{}.type", raw.name, arg.name);
            Ok(Argument {
                argument_type: to_type_reference(owner, &location, &arg.input_type, 0)?,
                name: arg.name,
                default_value: arg.default_value,
                description: arg.description,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Field {
        name: raw.name,
        field_type,
        arguments,
        description: raw.description,
        is_deprecated: raw.is_deprecated,
        deprecation_reason: raw.deprecation_reason,
    })
}

fn to_type_reference(owner: &str, location: &str, raw: &RawTypeRef, depth: usize) -> Result<TypeReference> {
    if depth > MAX_OF_TYPE_DEPTH {
        return Err(Error::field_shape(owner, location, "type reference nests deeper than introspection allows"));
    }
    match raw.kind {
        TypeKind::NonNull | TypeKind::List => {
            let Some(of_type) = raw.of_type.as_deref() else {
                return Err(Error::field_shape(owner, location, format!("{:?} without ofType", raw.kind)));
            };
            let inner = to_type_reference(owner, location, of_type, depth + 1)?;
            Ok(if raw.kind == TypeKind::NonNull {
                TypeReference::non_null(inner)
            } else {
                TypeReference::list(inner)
            })
        }
        kind => match raw.name.as_deref() {
            Some(name) => Ok(TypeReference::named(kind, name)),
            None => Err(Error::field_shape(owner, location, "named reference without a name")),
        },
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSchema {
    query_type: Option<RawNamed>,
    mutation_type: Option<RawNamed>,
    subscription_type: Option<RawNamed>,
    types: Option<Vec<Value>>,
}

#[derive(Deserialize)]
struct RawNamed {
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawType {
    kind: TypeKind,
    name: Option<String>,
    description: Option<String>,
    fields: Option<Vec<RawField>>,
    input_fields: Option<Vec<RawInputValue>>,
    interfaces: Option<Vec<RawTypeRef>>,
    enum_values: Option<Vec<RawEnumValue>>,
    possible_types: Option<Vec<RawTypeRef>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    name: String,
    description: Option<String>,
    #[serde(default)]
    args: Vec<RawInputValue>,
    #[serde(rename = "type")]
    field_type: RawTypeRef,
    #[serde(default)]
    is_deprecated: bool,
    deprecation_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInputValue {
    name: String,
    description: Option<String>,
    #[serde(rename = "type")]
    input_type: RawTypeRef,
    default_value: Option<String>,
}

#[derive(Deserialize)]
struct RawEnumValue {
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTypeRef {
    kind: TypeKind,
    name: Option<String>,
    of_type: Option<Box<RawTypeRef>>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use super::*;

    fn scalar(name: &str) -> Value {
        json!({ "kind": "SCALAR", "name": name, "ofType": null })
    }

    fn non_null(of_type: Value) -> Value {
        json!({ "kind": "NON_NULL", "name": null, "ofType": of_type })
    }

    fn list(of_type: Value) -> Value {
        json!({ "kind": "LIST", "name": null, "ofType": of_type })
    }

    fn parse(document: Value) -> Result<Schema> {
        from_response_body(document.to_string().as_bytes())
    }

    fn user_schema() -> Value {
        json!({
            "__schema": {
                "queryType": { "name": "Query" },
                "mutationType": null,
                "types": [
                    {
                        "kind": "OBJECT",
                        "name": "Query",
                        "fields": [{
                            "name": "user",
                            "args": [{ "name": "id", "type": non_null(scalar("ID")), "defaultValue": null }],
                            "type": { "kind": "OBJECT", "name": "User", "ofType": null },
                            "isDeprecated": false,
                            "deprecationReason": null
                        }],
                        "interfaces": []
                    },
                    {
                        "kind": "OBJECT",
                        "name": "User",
                        "description": "A registered user",
                        "fields": [
                            { "name": "id", "args": [], "type": non_null(scalar("ID")), "isDeprecated": false },
                            { "name": "scores", "args": [], "type": non_null(list(non_null(scalar("Int")))), "isDeprecated": false },
                            { "name": "nick", "args": [], "type": scalar("String"), "isDeprecated": true, "deprecationReason": "use name" }
                        ],
                        "interfaces": [{ "kind": "INTERFACE", "name": "Node", "ofType": null }]
                    },
                    {
                        "kind": "ENUM",
                        "name": "Role",
                        "enumValues": [{ "name": "ADMIN" }, { "name": "MEMBER" }]
                    },
                    { "kind": "SCALAR", "name": "ID" }
                ],
                "directives": []
            }
        })
    }

    #[test]
    fn parses_bare_schema_document() {
        let schema = parse(user_schema()).unwrap();
        let kinds: Vec<_> = schema.fields.iter().map(SchemaField::kind).collect();
        assert_eq!(kinds, vec![SchemaFieldKind::Query, SchemaFieldKind::Type, SchemaFieldKind::Enum, SchemaFieldKind::Scalar]);

        let user = schema.find_type("User").unwrap();
        assert_eq!(user.description.as_deref(), Some("A registered user"));
        assert_eq!(user.interfaces, vec!["Node".to_string()]);
        assert!(user.fields[2].is_deprecated);
        assert_eq!(user.fields[2].deprecation_reason.as_deref(), Some("use name"));

        let role = schema.find_enum("Role").unwrap();
        assert_eq!(role.values, vec!["ADMIN".to_string(), "MEMBER".to_string()]);
    }

    #[test]
    fn wrapping_mirrors_json_nesting() {
        let schema = parse(user_schema()).unwrap();
        let scores = &schema.find_type("User").unwrap().fields[1].field_type;
        let expected = TypeReference::non_null(TypeReference::list(TypeReference::non_null(
            TypeReference::named(TypeKind::Scalar, "Int"),
        )));
        assert_eq!(scores, &expected);
    }

    #[test]
    fn strips_response_envelope() {
        let enveloped = json!({ "data": user_schema() });
        assert_eq!(parse(enveloped).unwrap(), parse(user_schema()).unwrap());
    }

    #[test]
    fn reports_envelope_errors() {
        let error = parse(json!({ "data": null, "errors": [{ "message": "introspection disabled" }] })).unwrap_err();
        assert!(matches!(error, Error::GraphQl(message) if message == "introspection disabled"));
    }

    #[test]
    fn missing_schema_is_structural() {
        assert!(matches!(parse(json!({ "data": {} })), Err(Error::MissingSchema)));
        assert!(matches!(parse(json!({ "schema": {} })), Err(Error::MissingSchema)));
        assert!(matches!(parse(json!([1, 2])), Err(Error::MissingSchema)));
    }

    #[test]
    fn missing_types_is_structural() {
        assert!(matches!(parse(json!({ "__schema": { "directives": [] } })), Err(Error::MissingTypes)));
    }

    #[test]
    fn malformed_field_names_owning_type() {
        let document = json!({
            "__schema": {
                "types": [{
                    "kind": "OBJECT",
                    "name": "Broken",
                    "fields": [{ "name": 42, "args": [], "type": scalar("String") }]
                }]
            }
        });
        match parse(document).unwrap_err() {
            Error::FieldShape { type_name, path, .. } => {
                assert_eq!(type_name, "Broken");
                assert!(path.starts_with("fields[0]"), "{path}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn wrapper_without_of_type_is_rejected() {
        let document = json!({
            "__schema": {
                "types": [{
                    "kind": "OBJECT",
                    "name": "Broken",
                    "fields": [{ "name": "items", "args": [], "type": { "kind": "LIST", "name": null } }]
                }]
            }
        });
        match parse(document).unwrap_err() {
            Error::FieldShape { type_name, path, .. } => {
                assert_eq!(type_name, "Broken");
                assert_eq!(path, "fields.items.type");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn accepts_seven_wrappers() {
        let mut reference = scalar("Int");
        for _ in 0..7 {
            reference = list(reference);
        }
        let document = json!({
            "__schema": {
                "types": [{
                    "kind": "OBJECT",
                    "name": "Deep",
                    "fields": [{ "name": "grid", "args": [], "type": reference }]
                }]
            }
        });
        let schema = parse(document).unwrap();
        let deep = schema.find_type("Deep").unwrap();
        assert_eq!(crate::type_mapper::list_depth(&deep.fields[0].field_type), 7);
    }

    #[test]
    fn rejects_wrapping_deeper_than_introspection() {
        let mut reference = scalar("Int");
        for _ in 0..8 {
            reference = list(reference);
        }
        let document = json!({
            "__schema": {
                "types": [{
                    "kind": "OBJECT",
                    "name": "Deep",
                    "fields": [{ "name": "grid", "args": [], "type": reference }]
                }]
            }
        });
        assert!(matches!(parse(document), Err(Error::FieldShape { .. })));
    }

    #[test]
    fn renamed_roots_are_classified() {
        let document = json!({
            "__schema": {
                "queryType": { "name": "RootQuery" },
                "mutationType": { "name": "RootMutation" },
                "types": [
                    { "kind": "OBJECT", "name": "RootQuery", "fields": [] },
                    { "kind": "OBJECT", "name": "RootMutation", "fields": [] }
                ]
            }
        });
        let schema = parse(document).unwrap();
        assert_eq!(schema.fields[0].kind(), SchemaFieldKind::Query);
        assert_eq!(schema.fields[1].kind(), SchemaFieldKind::Mutation);
    }

    #[test]
    fn unknown_kinds_are_skipped() {
        let document = json!({
            "__schema": {
                "types": [
                    { "kind": "FUTURE_KIND", "name": "Something" },
                    { "kind": "SCALAR", "name": "Date" }
                ]
            }
        });
        let schema = parse(document).unwrap();
        assert_eq!(schema.fields.len(), 1);
        assert_eq!(schema.fields[0].name(), "Date");
    }
}
