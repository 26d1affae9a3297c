use std::collections::BTreeMap;
use graphql_parser::schema::{parse_schema, Definition, Directive, Document, Type as SdlType, TypeDefinition, Value};
use crate::error::{Error, Result};
use crate::schema::{self, Argument, Enum, Field, RootNames, Schema, SchemaField, Type, TypeKind, TypeReference};

pub fn from_sdl_string(sdl: &str) -> Result<Schema> {
    let document = parse_schema::<String>(sdl).map_err(|error| Error::Sdl(error.to_string()))?;
    from_parser_document(document)
}

fn from_parser_document(document: Document<'_, String>) -> Result<Schema> {
    let mut builder = SchemaBuilder::new();
    for scalar in schema::BUILT_IN_SCALARS {
        builder.kinds.insert(scalar.to_string(), TypeKind::Scalar);
    }
    builder.add_document(document);
    builder.build()
}

struct SchemaBuilder<'a> {
    kinds: BTreeMap<String, TypeKind>,
    definitions: Vec<TypeDefinition<'a, String>>,
    roots: RootNames,
}

impl<'a> SchemaBuilder<'a> {
    fn new() -> SchemaBuilder<'a> {
        SchemaBuilder {
            kinds: BTreeMap::new(),
            definitions: Vec::new(),
            roots: RootNames::default(),
        }
    }

    fn add_document(&mut self, document: Document<'a, String>) {
        for definition in document.definitions {
            match definition {
                Definition::TypeDefinition(definition) => {
                    let (name, kind) = match &definition {
                        TypeDefinition::Scalar(d) => (&d.name, TypeKind::Scalar),
                        TypeDefinition::Object(d) => (&d.name, TypeKind::Object),
                        TypeDefinition::Interface(d) => (&d.name, TypeKind::Interface),
                        TypeDefinition::Union(d) => (&d.name, TypeKind::Union),
                        TypeDefinition::Enum(d) => (&d.name, TypeKind::Enum),
                        TypeDefinition::InputObject(d) => (&d.name, TypeKind::InputObject),
                    };
                    self.kinds.insert(name.clone(), kind);
                    self.definitions.push(definition);
                }
                Definition::SchemaDefinition(definition) => {
                    if let Some(query) = definition.query {
                        self.roots.query = query;
                    }
                    if let Some(mutation) = definition.mutation {
                        self.roots.mutation = mutation;
                    }
                    if let Some(subscription) = definition.subscription {
                        self.roots.subscription = subscription;
                    }
                }
                Definition::TypeExtension(_) => (),
                Definition::DirectiveDefinition(_) => ()
            }
        }
    }

    fn build(self) -> Result<Schema> {
        let mut fields = Vec::with_capacity(self.definitions.len());
        for definition in &self.definitions {
            let field = match definition {
                TypeDefinition::Scalar(d) => SchemaField::Scalar { name: d.name.clone(), description: d.description.clone() },
                TypeDefinition::Object(d) => {
                    let object = Type {
                        name: d.name.clone(),
                        fields: d.fields.iter().map(|field| self.to_field(&d.name, field)).collect::<Result<_>>()?,
                        description: d.description.clone(),
                        interfaces: d.implements_interfaces.clone(),
                    };
                    match self.roots.classify(&d.name) {
                        Some(schema::SchemaFieldKind::Query) => SchemaField::Query(object),
                        Some(schema::SchemaFieldKind::Mutation) => SchemaField::Mutation(object),
                        Some(schema::SchemaFieldKind::Subscription) => SchemaField::Subscription(object),
                        _ => SchemaField::Type(object),
                    }
                }
                TypeDefinition::Interface(d) => SchemaField::Interface(Type {
                    name: d.name.clone(),
                    fields: d.fields.iter().map(|field| self.to_field(&d.name, field)).collect::<Result<_>>()?,
                    description: d.description.clone(),
                    interfaces: d.implements_interfaces.clone(),
                }),
                TypeDefinition::Union(d) => SchemaField::Union {
                    name: d.name.clone(),
                    possible_types: d.types.clone(),
                    description: d.description.clone(),
                },
                TypeDefinition::Enum(d) => SchemaField::Enum(Enum {
                    name: d.name.clone(),
                    values: d.values.iter().map(|value| value.name.clone()).collect(),
                    description: d.description.clone(),
                }),
                TypeDefinition::InputObject(d) => {
                    let fields = d.fields
                        .iter()
                        .map(|input| {
                            Ok(Field {
                                name: input.name.clone(),
                                field_type: self.to_type_reference(&d.name, &input.value_type)?,
                                arguments: Vec::new(),
                                description: input.description.clone(),
                                is_deprecated: false,
                                deprecation_reason: None,
                            })
                        })
                        .collect::<Result<_>>()?;
                    SchemaField::Input(Type { name: d.name.clone(), fields, description: d.description.clone(), interfaces: Vec::new() })
                }
            };
            fields.push(field);
        }
        Ok(Schema { fields })
    }

    fn to_field(&self, owner: &str, field: &graphql_parser::schema::Field<'a, String>) -> Result<Field> {
        let arguments = field.arguments
            .iter()
            .map(|arg| {
                Ok(Argument {
                    name: arg.name.clone(),
                    argument_type: self.to_type_reference(owner, &arg.value_type)?,
                    default_value: arg.default_value.as_ref().map(|value| value.to_string()),
                    description: arg.description.clone(),
                })
            })
            .collect::<Result<_>>()?;
        let deprecation = deprecation_reason(&field.directives);
        Ok(Field {
            name: field.name.clone(),
            field_type: self.to_type_reference(owner, &field.field_type)?,
            arguments,
            description: field.description.clone(),
            is_deprecated: deprecation.is_some(),
            deprecation_reason: deprecation.flatten(),
        })
    }

    fn to_type_reference(&self, owner: &str, field_type: &SdlType<'a, String>) -> Result<TypeReference> {
        match field_type {
            SdlType::NonNullType(inner) => Ok(TypeReference::non_null(self.to_type_reference(owner, inner)?)),
            SdlType::ListType(inner) => Ok(TypeReference::list(self.to_type_reference(owner, inner)?)),
            SdlType::NamedType(name) => match self.kinds.get(name) {
                Some(kind) => Ok(TypeReference::named(*kind, name)),
                None => Err(Error::UnknownType { type_name: owner.to_string(), referenced: name.clone() }),
            },
        }
    }
}

/// `Some(reason)` when `@deprecated` is present; the reason itself is optional.
fn deprecation_reason(directives: &[Directive<'_, String>]) -> Option<Option<String>> {
    directives
        .iter()
        .find(|directive| directive.name == "deprecated")
        .map(|directive| {
            directive.arguments.iter().find_map(|(name, value)| match (name.as_str(), value) {
                ("reason", Value::String(reason)) => Some(reason.clone()),
                _ => None,
            })
        })
}
