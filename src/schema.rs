use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    InputObject,
    Enum,
    List,
    NonNull,
    Interface,
    Union,
    #[serde(other)]
    Unknown,
}

/// A possibly wrapped reference to a named type. Wrapping nests exactly like the
/// `ofType` chain of the introspection document it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeReference {
    NonNull(Box<TypeReference>),
    List(Box<TypeReference>),
    Named { kind: TypeKind, name: String },
}

impl TypeReference {
    pub fn named(kind: TypeKind, name: &str) -> TypeReference {
        TypeReference::Named { kind, name: name.to_string() }
    }

    pub fn non_null(inner: TypeReference) -> TypeReference {
        TypeReference::NonNull(Box::new(inner))
    }

    pub fn list(inner: TypeReference) -> TypeReference {
        TypeReference::List(Box::new(inner))
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            TypeReference::NonNull(_) => TypeKind::NonNull,
            TypeReference::List(_) => TypeKind::List,
            TypeReference::Named { kind, .. } => *kind,
        }
    }

    pub fn of_type(&self) -> Option<&TypeReference> {
        match self {
            TypeReference::NonNull(inner) | TypeReference::List(inner) => Some(inner),
            TypeReference::Named { .. } => None,
        }
    }

    /// The innermost, non-wrapper reference.
    pub fn leaf(&self) -> &TypeReference {
        match self.of_type() {
            Some(inner) => inner.leaf(),
            None => self,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TypeReference::NonNull(inner) | TypeReference::List(inner) => inner.name(),
            TypeReference::Named { name, .. } => name,
        }
    }

    pub fn leaf_kind(&self) -> TypeKind {
        self.leaf().kind()
    }

    pub fn is_required(&self) -> bool {
        matches!(self, TypeReference::NonNull(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: String,
    pub argument_type: TypeReference,
    pub default_value: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub field_type: TypeReference,
    pub arguments: Vec<Argument>,
    pub description: Option<String>,
    pub is_deprecated: bool,
    pub deprecation_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Type {
    pub name: String,
    pub fields: Vec<Field>,
    pub description: Option<String>,
    pub interfaces: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enum {
    pub name: String,
    pub values: Vec<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFieldKind {
    Type,
    Input,
    Enum,
    Query,
    Mutation,
    Subscription,
    Interface,
    Union,
    Scalar,
}

/// One entry per named type of the schema, tagged by what the generator does with it.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaField {
    Type(Type),
    Input(Type),
    Enum(Enum),
    Query(Type),
    Mutation(Type),
    Subscription(Type),
    Interface(Type),
    Union { name: String, possible_types: Vec<String>, description: Option<String> },
    Scalar { name: String, description: Option<String> },
}

impl SchemaField {
    pub fn kind(&self) -> SchemaFieldKind {
        match self {
            SchemaField::Type(_) => SchemaFieldKind::Type,
            SchemaField::Input(_) => SchemaFieldKind::Input,
            SchemaField::Enum(_) => SchemaFieldKind::Enum,
            SchemaField::Query(_) => SchemaFieldKind::Query,
            SchemaField::Mutation(_) => SchemaFieldKind::Mutation,
            SchemaField::Subscription(_) => SchemaFieldKind::Subscription,
            SchemaField::Interface(_) => SchemaFieldKind::Interface,
            SchemaField::Union { .. } => SchemaFieldKind::Union,
            SchemaField::Scalar { .. } => SchemaFieldKind::Scalar,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SchemaField::Type(t)
            | SchemaField::Input(t)
            | SchemaField::Query(t)
            | SchemaField::Mutation(t)
            | SchemaField::Subscription(t)
            | SchemaField::Interface(t) => &t.name,
            SchemaField::Enum(e) => &e.name,
            SchemaField::Union { name, .. } | SchemaField::Scalar { name, .. } => name,
        }
    }
}

/// Names of the operation root types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootNames {
    pub query: String,
    pub mutation: String,
    pub subscription: String,
}

impl Default for RootNames {
    fn default() -> Self {
        RootNames {
            query: "Query".to_string(),
            mutation: "Mutation".to_string(),
            subscription: "Subscription".to_string(),
        }
    }
}

impl RootNames {
    pub fn classify(&self, name: &str) -> Option<SchemaFieldKind> {
        if name == self.query {
            Some(SchemaFieldKind::Query)
        } else if name == self.mutation {
            Some(SchemaFieldKind::Mutation)
        } else if name == self.subscription {
            Some(SchemaFieldKind::Subscription)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub fields: Vec<SchemaField>,
}

impl Schema {
    /// Object or input object type by name.
    pub fn find_type(&self, name: &str) -> Option<&Type> {
        self.fields.iter().find_map(|field| match field {
            SchemaField::Type(t) | SchemaField::Input(t) if t.name == name => Some(t),
            _ => None,
        })
    }

    pub fn find_enum(&self, name: &str) -> Option<&Enum> {
        self.fields.iter().find_map(|field| match field {
            SchemaField::Enum(e) if e.name == name => Some(e),
            _ => None,
        })
    }

    /// The query and mutation roots, in schema order.
    pub fn roots(&self) -> impl Iterator<Item = &SchemaField> {
        self.fields
            .iter()
            .filter(|field| matches!(field, SchemaField::Query(_) | SchemaField::Mutation(_)))
    }
}

pub const BUILT_IN_SCALARS: &[&str] = &["Int", "String", "Float", "Boolean", "ID"];

const BLACKLISTED_TYPES: &[&str] = &["Query", "Mutation", "Subscription"];

/// Root and introspection meta types never get a generated declaration or import.
pub fn is_blacklisted(name: &str) -> bool {
    BLACKLISTED_TYPES.contains(&name) || name.starts_with("__")
}
