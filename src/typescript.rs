//! TypeScript backend: interfaces and enums, document templates, request functions
//! and TanStack Query hooks.

use crate::code_generator::{ArtifactNames, ArtifactParts, Artifacts};
use crate::code_writer::{CodeFile, CodeFileOptions};
use crate::emitter::{Emitter, OperationOutput};
use crate::imports::{ImportEdge, ImportResolver};
use crate::operation::{plan_operation, ArgumentEncoding, ArgumentPlan, Operation, OperationKind};
use crate::schema::{is_blacklisted, Enum, Field, Schema, SchemaField, Type, TypeReference};
use crate::type_mapper::{map_type, MappedType, TargetTypes};

pub const TYPESCRIPT_TYPES: TargetTypes = TargetTypes {
    string: "string",
    number: "number",
    boolean: "boolean",
    dynamic: "any",
    list_suffix: "[]",
};

const REACT_QUERY: &str = "@tanstack/react-query";
const REQUEST_FUNCTION: &str = "graphqlRequest";
const SELECTION_TYPE: &str = "GqlSelection";
const ERROR_TYPE: &str = "globalThis.Error";
const FILL_TEMPLATE: &str = "fillTemplate";

#[derive(Debug, Clone, Default)]
pub struct TypeScriptEmitter {
    options: CodeFileOptions,
}

impl TypeScriptEmitter {
    pub fn new(options: CodeFileOptions) -> TypeScriptEmitter {
        TypeScriptEmitter { options }
    }

    fn interface_block(&self, object: &Type, is_input: bool) -> String {
        let mut file = CodeFile::new(&self.options);
        file.doc_comment(&doc_lines(object.description.as_deref(), None));
        file.begin_indent(&format!("export interface {} {{", object.name));
        for field in &object.fields {
            let mapped = self.map_type(&field.field_type);
            let optional = if is_input && mapped.nullable { "?" } else { "" };
            file.doc_comment(&doc_lines(field.description.as_deref(), deprecation(field)));
            file.line(&format!("{}{}: {};", field.name, optional, type_annotation(&mapped)));
        }
        file.end_indent("}");
        file.build_string()
    }

    fn enum_block(&self, enum_def: &Enum) -> String {
        let mut file = CodeFile::new(&self.options);
        file.doc_comment(&doc_lines(enum_def.description.as_deref(), None));
        file.begin_indent(&format!("export enum {} {{", enum_def.name));
        for value in &enum_def.values {
            file.line(&format!("{} = \"{}\",", value, value));
        }
        file.end_indent("}");
        file.build_string()
    }

    fn document(&self, operation: &Operation) -> String {
        let mut file = CodeFile::new(&self.options);
        file.begin_indent(&format!(
            "export const {} = `{} {} {{",
            operation.document_name,
            operation.kind.keyword(),
            operation.operation_name
        ));
        let call = format!("{}{}", operation.field_name, argument_usage(&operation.arguments));
        if operation.selection.is_some() {
            file.begin_indent(&format!("{} {{", call));
            file.line("{{fields}}");
            file.end_indent("}");
        } else {
            file.line(&call);
        }
        file.end_indent("}`;");
        file.build_string()
    }

    fn request_function(&self, operation: &Operation) -> String {
        let mut file = CodeFile::new(&self.options);
        let mut parameters = Vec::new();
        if let Some(selection) = &operation.selection {
            parameters.push(format!("selection: {}<{}>", SELECTION_TYPE, selection));
        }
        if operation.has_arguments() {
            parameters.push(format!("args: {}", arguments_type(&operation.arguments)));
        }
        let return_type = type_annotation(&operation.return_type);

        file.doc_comment(&doc_lines(operation.description.as_deref(), operation.deprecation.as_deref()));
        file.begin_indent(&format!(
            "export const {} = async ({}): Promise<{}> => {{",
            operation.request_name,
            parameters.join(", "),
            return_type
        ));

        let mut has_checks = false;
        if operation.selection.is_some() {
            file.line("const fields = selectedFields(selection);");
            file.line(&format!(
                "if (!fields) throw new {}('No fields selected for {}.');",
                ERROR_TYPE,
                operation.kind.keyword()
            ));
            has_checks = true;
        }
        for arg in operation.arguments.iter().filter(|arg| arg.required) {
            file.line(&format!(
                "if (args.{0} === undefined || args.{0} === null) throw new {1}('{0} is required.');",
                arg.name,
                ERROR_TYPE
            ));
            has_checks = true;
        }
        if has_checks {
            file.blank_line();
        }

        // Values are encoded up front and the template is filled in a single pass.
        if operation.selection.is_none() && !operation.has_arguments() {
            file.line(&format!("const query = {};", operation.document_name));
        } else {
            file.begin_indent(&format!("const query = {}({}, {{", FILL_TEMPLATE, operation.document_name));
            if operation.selection.is_some() {
                file.line("fields,");
            }
            for arg in &operation.arguments {
                file.line(&format!("'args.{}': {},", arg.name, substitution(arg)));
            }
            file.end_indent("});");
        }
        file.blank_line();
        file.line(&format!(
            "const response = await {}<{{ {}: {} }}>(query);",
            REQUEST_FUNCTION, operation.field_name, return_type
        ));
        file.line(&format!("return response.{};", operation.field_name));
        file.end_indent("};");
        file.build_string()
    }

    fn hook(&self, operation: &Operation) -> String {
        let mut file = CodeFile::new(&self.options);
        let selection_parameter = operation
            .selection
            .as_ref()
            .map(|selection| format!("selection: {}<{}>", SELECTION_TYPE, selection));
        let cache_key = match &operation.selection {
            Some(_) => format!("['{}', selection]", operation.operation_name),
            None => format!("['{}']", operation.operation_name),
        };
        let return_type = type_annotation(&operation.return_type);

        file.doc_comment(&doc_lines(operation.description.as_deref(), operation.deprecation.as_deref()));
        match operation.kind {
            OperationKind::Query => {
                let mut parameters: Vec<String> = selection_parameter.into_iter().collect();
                let mut call_arguments = Vec::new();
                if operation.selection.is_some() {
                    call_arguments.push("selection");
                }
                if operation.has_arguments() {
                    parameters.push(format!("args: {}", arguments_type(&operation.arguments)));
                    call_arguments.push("args");
                }
                file.begin_indent(&format!("export const {} = ({}) => {{", operation.hook_name, parameters.join(", ")));
                file.begin_indent(&format!("return useQuery<{}>({{", return_type));
                file.line(&format!("queryKey: {},", cache_key));
                file.line(&format!(
                    "queryFn: () => {}({}),",
                    operation.request_name,
                    call_arguments.join(", ")
                ));
            }
            OperationKind::Mutation => {
                let parameters: Vec<String> = selection_parameter.into_iter().collect();
                let variables = if operation.has_arguments() {
                    arguments_type(&operation.arguments)
                } else {
                    "void".to_string()
                };
                let mut call_arguments = Vec::new();
                if operation.selection.is_some() {
                    call_arguments.push("selection");
                }
                let mutation_parameter = if operation.has_arguments() {
                    call_arguments.push("args");
                    "args"
                } else {
                    ""
                };
                file.begin_indent(&format!("export const {} = ({}) => {{", operation.hook_name, parameters.join(", ")));
                file.begin_indent(&format!("return useMutation<{}, {}, {}>({{", return_type, ERROR_TYPE, variables));
                file.line(&format!("mutationKey: {},", cache_key));
                file.line(&format!(
                    "mutationFn: ({}) => {}({}),",
                    mutation_parameter,
                    operation.request_name,
                    call_arguments.join(", ")
                ));
            }
        }
        file.end_indent("});");
        file.end_indent("};");
        file.build_string()
    }

    fn operation_imports(&self, operation: &Operation, names: &ArtifactNames) -> ImportResolver {
        let queries = module_specifier(&names.queries);
        let resources = module_specifier(&names.resources);
        let types = module_specifier(&names.types);
        let hook_function = match operation.kind {
            OperationKind::Query => "useQuery",
            OperationKind::Mutation => "useMutation",
        };

        let mut imports = ImportResolver::new();
        imports.connect([
            ImportEdge::new(&names.resources, &queries, &operation.document_name),
            ImportEdge::new(&names.resources, &names.runtime, REQUEST_FUNCTION),
        ]);
        imports.connect(
            operation
                .referenced_types()
                .into_iter()
                .map(|name| ImportEdge::new(&names.resources, &types, name)),
        );
        imports.connect([ImportEdge::new(&names.hooks, &resources, &operation.request_name)]);
        if operation.selection.is_some() {
            imports.connect([ImportEdge::new(&names.hooks, &resources, SELECTION_TYPE)]);
        }
        imports.connect([ImportEdge::new(&names.hooks, REACT_QUERY, hook_function)]);
        imports.connect(
            operation
                .referenced_types()
                .into_iter()
                .map(|name| ImportEdge::new(&names.hooks, &types, name)),
        );
        imports
    }

    fn resources_prelude(&self, needs_serializers: bool) -> String {
        let mut file = CodeFile::new(&self.options);
        file.line(&format!("export type {}<T> = Partial<Record<keyof T, boolean>>;", SELECTION_TYPE));
        file.blank_line();
        file.begin_indent(&format!("const selectedFields = <T>(selection: {}<T>): string => {{", SELECTION_TYPE));
        file.begin_indent("return Object.entries(selection)");
        file.line(".filter(([, include]) => include)");
        file.line(".map(([key]) => key)");
        file.line(".join('\\n');");
        file.deindent();
        file.end_indent("};");
        file.blank_line();
        file.begin_indent(&format!("const {} = (template: string, values: Record<string, string>): string =>", FILL_TEMPLATE));
        file.line(r"template.replace(/\{\{(fields|args\.\w+)\}\}/g, (placeholder, key: string) => values[key] ?? placeholder);");
        file.deindent();
        if needs_serializers {
            file.blank_line();
            file.begin_indent("const serializeEnum = (value: unknown): string => {");
            file.line("if (value === undefined || value === null) return 'null';");
            file.line("return Array.isArray(value) ? `[${value.map(serializeEnum).join(', ')}]` : String(value);");
            file.end_indent("};");
            file.blank_line();
            file.begin_indent("const serializeInput = (value: unknown, enumKeys: string[]): string => {");
            file.line("if (value === undefined || value === null) return 'null';");
            file.begin_indent("if (Array.isArray(value)) {");
            file.line("return `[${value.map((item) => serializeInput(item, enumKeys)).join(', ')}]`;");
            file.end_indent("}");
            file.begin_indent("const entries = Object.entries(value as Record<string, unknown>)");
            file.line(".filter(([, item]) => item !== undefined)");
            file.line(".map(([key, item]) => `${key}: ${enumKeys.includes(key) ? serializeEnum(item) : JSON.stringify(item)}`);");
            file.deindent();
            file.line("return `{ ${entries.join(', ')} }`;");
            file.end_indent("};");
        }
        file.build_string()
    }

    fn index(&self, names: &ArtifactNames) -> String {
        let mut file = CodeFile::new(&self.options);
        for name in [&names.hooks, &names.queries, &names.resources, &names.types] {
            file.line(&format!("export * from '{}';", module_specifier(name)));
        }
        file.build_string()
    }

    fn import_preamble(&self, imports: &ImportResolver, consuming_file: &str) -> Option<String> {
        let grouped = imports.imports_for(consuming_file);
        if grouped.is_empty() {
            return None;
        }
        let mut file = CodeFile::new(&self.options);
        for (source, symbols) in grouped {
            file.line(&format!("import {{ {} }} from '{}';", symbols.join(", "), source));
        }
        Some(file.build_string())
    }

    /// Sections separated by one blank line.
    fn module(&self, sections: Vec<String>) -> String {
        sections
            .into_iter()
            .filter(|section| !section.is_empty())
            .collect::<Vec<_>>()
            .join(&self.options.line_break)
    }
}

impl Emitter for TypeScriptEmitter {
    fn language(&self) -> &'static str {
        "typescript"
    }

    fn map_type(&self, reference: &TypeReference) -> MappedType {
        map_type(reference, &TYPESCRIPT_TYPES)
    }

    fn generate_operation(
        &self,
        schema: &Schema,
        kind: OperationKind,
        field: &Field,
        names: &ArtifactNames,
    ) -> OperationOutput {
        let operation = plan_operation(schema, kind, field, &TYPESCRIPT_TYPES);
        OperationOutput {
            document: self.document(&operation),
            request: self.request_function(&operation),
            hook: self.hook(&operation),
            imports: self.operation_imports(&operation, names),
            needs_serializers: operation.needs_serializers(),
        }
    }

    fn generate_declarations(&self, field: &SchemaField) -> Option<String> {
        match field {
            SchemaField::Type(object) if !is_blacklisted(&object.name) => Some(self.interface_block(object, false)),
            SchemaField::Input(object) if !is_blacklisted(&object.name) => Some(self.interface_block(object, true)),
            SchemaField::Enum(enum_def) if !is_blacklisted(&enum_def.name) => Some(self.enum_block(enum_def)),
            _ => None,
        }
    }

    fn assemble(&self, parts: ArtifactParts, names: &ArtifactNames) -> Artifacts {
        let mut queries = Vec::new();
        queries.extend(self.import_preamble(&parts.imports, &names.queries));
        queries.extend(parts.documents);

        let mut resources = Vec::new();
        resources.extend(self.import_preamble(&parts.imports, &names.resources));
        resources.push(self.resources_prelude(parts.needs_serializers));
        resources.extend(parts.requests);

        let mut hooks = Vec::new();
        hooks.extend(self.import_preamble(&parts.imports, &names.hooks));
        hooks.extend(parts.hooks);

        Artifacts {
            index: self.index(names),
            queries: self.module(queries),
            resources: self.module(resources),
            types: self.module(parts.declarations),
            hooks: self.module(hooks),
        }
    }
}

/// Import specifier of a sibling output file: `gpl.d.ts` becomes `./gpl.d`.
pub fn module_specifier(file_name: &str) -> String {
    let stem = file_name
        .strip_suffix(".tsx")
        .or_else(|| file_name.strip_suffix(".ts"))
        .unwrap_or(file_name);
    format!("./{}", stem)
}

fn type_annotation(mapped: &MappedType) -> String {
    if mapped.nullable {
        format!("{} | null", mapped.expression)
    } else {
        mapped.expression.clone()
    }
}

fn arguments_type(arguments: &[ArgumentPlan]) -> String {
    let members: Vec<String> = arguments
        .iter()
        .map(|arg| {
            let optional = if arg.required { "" } else { "?" };
            format!("{}{}: {}", arg.name, optional, type_annotation(&arg.mapped))
        })
        .collect();
    format!("{{ {} }}", members.join("; "))
}

fn placeholder(name: &str) -> String {
    format!("{{{{args.{}}}}}", name)
}

fn argument_usage(arguments: &[ArgumentPlan]) -> String {
    if arguments.is_empty() {
        return String::new();
    }
    let usages: Vec<String> = arguments
        .iter()
        .map(|arg| format!("{}: {}", arg.name, placeholder(&arg.name)))
        .collect();
    format!("({})", usages.join(", "))
}

/// Expression producing the GraphQL literal for one argument. Absent values fall back
/// to the declared default, or `null`.
fn substitution(arg: &ArgumentPlan) -> String {
    let value = format!("args.{}", arg.name);
    let fallback = js_string(arg.default_value.as_deref().unwrap_or("null"));
    let encoded = match &arg.encoding {
        ArgumentEncoding::Scalar => format!("JSON.stringify({})", value),
        ArgumentEncoding::Enum => format!("String({})", value),
        ArgumentEncoding::EnumList => format!("serializeEnum({})", value),
        ArgumentEncoding::Object { enum_keys } => {
            let keys: Vec<String> = enum_keys.iter().map(|key| js_string(key)).collect();
            format!("serializeInput({}, [{}])", value, keys.join(", "))
        }
    };
    format!("({} == null ? {} : {})", value, fallback, encoded)
}

fn js_string(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n");
    format!("'{}'", escaped)
}

fn deprecation(field: &Field) -> Option<&str> {
    if field.is_deprecated {
        Some(field.deprecation_reason.as_deref().unwrap_or(""))
    } else {
        None
    }
}

fn doc_lines(description: Option<&str>, deprecation: Option<&str>) -> Vec<String> {
    let mut lines: Vec<String> = description
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(|text| text.lines().map(|line| line.trim_end().replace("*/", "*\\/")).collect())
        .unwrap_or_default();
    if let Some(reason) = deprecation {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        let reason = reason.trim().replace("*/", "*\\/");
        if reason.is_empty() {
            lines.push("@deprecated".to_string());
        } else {
            lines.push(format!("@deprecated {}", reason));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Argument, TypeKind};

    fn emitter() -> TypeScriptEmitter {
        TypeScriptEmitter::new(CodeFileOptions { line_break: "\n".to_string(), indent: "  ".to_string() })
    }

    fn field(name: &str, field_type: TypeReference, arguments: Vec<Argument>) -> Field {
        Field {
            name: name.to_string(),
            field_type,
            arguments,
            description: None,
            is_deprecated: false,
            deprecation_reason: None,
        }
    }

    fn argument(name: &str, argument_type: TypeReference) -> Argument {
        Argument { name: name.to_string(), argument_type, default_value: None, description: None }
    }

    fn user_field() -> Field {
        field(
            "user",
            TypeReference::named(TypeKind::Object, "User"),
            vec![argument("id", TypeReference::non_null(TypeReference::named(TypeKind::Scalar, "ID")))],
        )
    }

    fn generate(kind: OperationKind, field: &Field) -> OperationOutput {
        emitter().generate_operation(&Schema::default(), kind, field, &ArtifactNames::default())
    }

    #[test]
    fn renders_interface_with_nullable_fields() {
        let user = SchemaField::Type(Type {
            name: "User".to_string(),
            fields: vec![
                field("id", TypeReference::non_null(TypeReference::named(TypeKind::Scalar, "ID")), vec![]),
                field("name", TypeReference::named(TypeKind::Scalar, "String"), vec![]),
            ],
            description: Some("A registered user".to_string()),
            interfaces: vec![],
        });
        assert_eq!(
            emitter().generate_declarations(&user).unwrap(),
            "/** A registered user */\nexport interface User {\n  id: string;\n  name: string | null;\n}\n"
        );
    }

    #[test]
    fn input_fields_that_are_nullable_become_optional() {
        let input = SchemaField::Input(Type {
            name: "UserFilter".to_string(),
            fields: vec![
                field("name", TypeReference::named(TypeKind::Scalar, "String"), vec![]),
                field("limit", TypeReference::non_null(TypeReference::named(TypeKind::Scalar, "Int")), vec![]),
            ],
            description: None,
            interfaces: vec![],
        });
        assert_eq!(
            emitter().generate_declarations(&input).unwrap(),
            "export interface UserFilter {\n  name?: string | null;\n  limit: number;\n}\n"
        );
    }

    #[test]
    fn renders_enum_and_deprecations() {
        let role = SchemaField::Enum(Enum {
            name: "Role".to_string(),
            values: vec!["ADMIN".to_string(), "MEMBER".to_string()],
            description: None,
        });
        assert_eq!(
            emitter().generate_declarations(&role).unwrap(),
            "export enum Role {\n  ADMIN = \"ADMIN\",\n  MEMBER = \"MEMBER\",\n}\n"
        );

        let mut nick = field("nick", TypeReference::named(TypeKind::Scalar, "String"), vec![]);
        nick.is_deprecated = true;
        nick.deprecation_reason = Some("use name".to_string());
        let user = SchemaField::Type(Type { name: "User".to_string(), fields: vec![nick], description: None, interfaces: vec![] });
        assert!(emitter()
            .generate_declarations(&user)
            .unwrap()
            .contains("  /** @deprecated use name */\n  nick: string | null;\n"));
    }

    #[test]
    fn skips_blacklisted_and_non_declarable_types() {
        let meta = SchemaField::Type(Type { name: "__Type".to_string(), fields: vec![], description: None, interfaces: vec![] });
        let scalar = SchemaField::Scalar { name: "Date".to_string(), description: None };
        assert_eq!(emitter().generate_declarations(&meta), None);
        assert_eq!(emitter().generate_declarations(&scalar), None);
    }

    #[test]
    fn renders_query_document() {
        let output = generate(OperationKind::Query, &user_field());
        assert_eq!(
            output.document,
            "export const userQuery = `query getUser {\n  user(id: {{args.id}}) {\n    {{fields}}\n  }\n}`;\n"
        );
    }

    #[test]
    fn zero_argument_fields_omit_parameters() {
        let me = field("me", TypeReference::named(TypeKind::Object, "User"), vec![]);
        let output = generate(OperationKind::Query, &me);
        assert!(output.document.contains("  me {\n"));
        assert!(output.request.contains("export const requestMe = async (selection: GqlSelection<User>): Promise<User | null> => {"));
        assert!(!output.request.contains("args"));
        assert!(output.hook.contains("export const useMe = (selection: GqlSelection<User>) => {"));
        assert!(output.hook.contains("queryFn: () => requestMe(selection),"));
    }

    #[test]
    fn request_function_checks_selection_and_required_arguments() {
        let output = generate(OperationKind::Query, &user_field());
        assert!(output.request.contains("async (selection: GqlSelection<User>, args: { id: string }): Promise<User | null>"));
        assert!(output.request.contains("if (!fields) throw new globalThis.Error('No fields selected for query.');"));
        assert!(output.request.contains("if (args.id === undefined || args.id === null) throw new globalThis.Error('id is required.');"));
        assert!(output.request.contains(
            "  const query = fillTemplate(userQuery, {\n    fields,\n    'args.id': (args.id == null ? 'null' : JSON.stringify(args.id)),\n  });\n"
        ));
        assert!(output.request.contains("const response = await graphqlRequest<{ user: User | null }>(query);"));
        assert!(output.request.contains("return response.user;"));
    }

    #[test]
    fn query_hook_is_keyed_by_operation_and_selection() {
        let output = generate(OperationKind::Query, &user_field());
        assert_eq!(
            output.hook,
            "export const useUser = (selection: GqlSelection<User>, args: { id: string }) => {\n  return useQuery<User | null>({\n    queryKey: ['getUser', selection],\n    queryFn: () => requestUser(selection, args),\n  });\n};\n"
        );
    }

    #[test]
    fn enum_arguments_are_bare_and_strings_are_stringified() {
        let users = field(
            "users",
            TypeReference::list(TypeReference::named(TypeKind::Object, "User")),
            vec![
                argument("role", TypeReference::named(TypeKind::Enum, "Role")),
                argument("name", TypeReference::named(TypeKind::Scalar, "String")),
            ],
        );
        let output = generate(OperationKind::Query, &users);
        assert!(output.request.contains("'args.role': (args.role == null ? 'null' : String(args.role)),"));
        assert!(output.request.contains("'args.name': (args.name == null ? 'null' : JSON.stringify(args.name)),"));
        assert!(output.request.contains("args: { role?: Role | null; name?: string | null }"));
        assert!(output.request.contains("Promise<User[] | null>"));
    }

    #[test]
    fn placeholders_are_filled_in_one_pass() {
        let find = field(
            "find",
            TypeReference::named(TypeKind::Scalar, "String"),
            vec![
                argument("a", TypeReference::named(TypeKind::Scalar, "String")),
                argument("b", TypeReference::named(TypeKind::Scalar, "String")),
            ],
        );
        let output = generate(OperationKind::Query, &find);
        assert!(output.request.contains(
            "  const query = fillTemplate(findQuery, {\n    'args.a': (args.a == null ? 'null' : JSON.stringify(args.a)),\n    'args.b': (args.b == null ? 'null' : JSON.stringify(args.b)),\n  });\n"
        ));
        assert!(!output.request.contains(".replace("));

        let prelude = emitter().resources_prelude(false);
        assert!(prelude.contains(
            "const fillTemplate = (template: string, values: Record<string, string>): string =>\n  template.replace(/\\{\\{(fields|args\\.\\w+)\\}\\}/g, (placeholder, key: string) => values[key] ?? placeholder);\n"
        ));
        assert!(!prelude.contains("serializeEnum"));
    }

    #[test]
    fn enum_list_arguments_use_serialize_enum() {
        let tagged = field(
            "tagged",
            TypeReference::list(TypeReference::named(TypeKind::Object, "User")),
            vec![argument("roles", TypeReference::list(TypeReference::named(TypeKind::Enum, "Role")))],
        );
        let output = generate(OperationKind::Query, &tagged);
        assert!(output.request.contains("'args.roles': (args.roles == null ? 'null' : serializeEnum(args.roles)),"));
        assert!(output.needs_serializers);
        assert!(emitter().resources_prelude(true).contains(
            "const serializeEnum = (value: unknown): string => {\n  if (value === undefined || value === null) return 'null';\n  return Array.isArray(value) ? `[${value.map(serializeEnum).join(', ')}]` : String(value);\n};\n"
        ));
    }

    #[test]
    fn helper_names_do_not_clash_with_schema_types() {
        let selection = field("selection", TypeReference::named(TypeKind::Object, "Selection"), vec![]);
        let output = generate(OperationKind::Query, &selection);
        assert!(output.request.contains("async (selection: GqlSelection<Selection>): Promise<Selection | null>"));
        assert!(output.request.contains("throw new globalThis.Error('No fields selected for query.');"));

        let fail = field("fail", TypeReference::named(TypeKind::Object, "Error"), vec![]);
        let output = generate(OperationKind::Mutation, &fail);
        assert!(output.hook.contains("return useMutation<Error | null, globalThis.Error, void>({"));
        assert!(!output.request.contains("new Error("));
    }

    #[test]
    fn defaults_replace_null_fallback() {
        let mut limit = argument("limit", TypeReference::named(TypeKind::Scalar, "Int"));
        limit.default_value = Some("10".to_string());
        let users = field("users", TypeReference::list(TypeReference::named(TypeKind::Object, "User")), vec![limit]);
        let output = generate(OperationKind::Query, &users);
        assert!(output.request.contains("(args.limit == null ? '10' : JSON.stringify(args.limit))"));
    }

    #[test]
    fn mutation_hook_takes_arguments_in_mutation_fn() {
        let create = field(
            "createUser",
            TypeReference::non_null(TypeReference::named(TypeKind::Object, "User")),
            vec![argument("input", TypeReference::non_null(TypeReference::named(TypeKind::InputObject, "CreateUserInput")))],
        );
        let output = generate(OperationKind::Mutation, &create);
        assert!(output.document.starts_with("export const createUserMutation = `mutation createUser {"));
        assert!(output.request.contains("No fields selected for mutation."));
        assert!(output.request.contains("serializeInput(args.input, [])"));
        assert!(output.needs_serializers);
        assert_eq!(
            output.hook,
            "export const useCreateUser = (selection: GqlSelection<User>) => {\n  return useMutation<User, globalThis.Error, { input: CreateUserInput }>({\n    mutationKey: ['createUser', selection],\n    mutationFn: (args) => requestCreateUser(selection, args),\n  });\n};\n"
        );
    }

    #[test]
    fn scalar_results_have_no_selection_block() {
        let count = field("count", TypeReference::non_null(TypeReference::named(TypeKind::Scalar, "Int")), vec![]);
        let output = generate(OperationKind::Query, &count);
        assert_eq!(output.document, "export const countQuery = `query getCount {\n  count\n}`;\n");
        assert!(output.request.contains("export const requestCount = async (): Promise<number> => {\n  const query = countQuery;\n"));
        assert!(output.hook.contains("queryKey: ['getCount'],"));
        assert!(output.imports.imports_for("gpl.ts").iter().all(|(source, _)| *source != "./gpl.d"));
    }

    #[test]
    fn registers_cross_file_imports() {
        let output = generate(OperationKind::Query, &user_field());
        assert_eq!(
            output.imports.imports_for("resources.ts"),
            vec![("./queries", vec!["userQuery"]), ("./client", vec!["graphqlRequest"]), ("./gpl.d", vec!["User"])]
        );
        assert_eq!(
            output.imports.imports_for("gpl.ts"),
            vec![("./resources", vec!["requestUser", "GqlSelection"]), ("@tanstack/react-query", vec!["useQuery"]), ("./gpl.d", vec!["User"])]
        );
    }

    #[test]
    fn module_specifiers_strip_extensions() {
        assert_eq!(module_specifier("gpl.d.ts"), "./gpl.d");
        assert_eq!(module_specifier("hooks.tsx"), "./hooks");
        assert_eq!(module_specifier("queries"), "./queries");
    }

    #[test]
    fn js_strings_escape_quotes() {
        assert_eq!(js_string("\"it's\""), "'\"it\\'s\"'");
    }
}
