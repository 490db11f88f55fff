use crate::{
    declaration::{Declaration, RenderOptions},
    error::RestructError,
    field_map::build_field_map,
    flatten::flatten_struct,
    gen_init::{generate_initializer, join_elements},
    literal::{parse_literal, strip_comments},
    mapping::MappingTable,
    parser::parse_schema,
    tokenizer::tokenize,
    verifier::verify_registry,
    view::{parse_view_schema, resolve_view},
};
use restruct_schema::{FieldValueMap, LiteralNode, SchemaRegistry, ViewNode};
use tracing::{debug, warn};

/// Compile a full C header into a verified `SchemaRegistry`.
/// Returns `Err(RestructError)` if parsing or verification fails.
pub fn compile_schema(text: &str) -> Result<SchemaRegistry, RestructError> {
    let tokens = tokenize(&strip_comments(text));
    let registry = parse_schema(&tokens)?;
    verify_registry(&registry)?;
    debug!(structs = registry.len(), "compiled full schema");
    Ok(registry)
}

/// Compile a view header into a verified `SchemaRegistry`.
pub fn compile_view_schema(text: &str) -> Result<SchemaRegistry, RestructError> {
    let registry = parse_view_schema(&strip_comments(text));
    verify_registry(&registry)?;
    debug!(structs = registry.len(), "compiled view schema");
    Ok(registry)
}

/// Everything needed to convert initializers of one full struct into one view
/// struct. Built once; all conversions borrow it immutably.
#[derive(Debug, Clone)]
pub struct Pipeline {
    schema:      SchemaRegistry,
    struct_name: String,
    view_name:   String,
    view:        ViewNode,
    mapping:     MappingTable,
    flat_names:  Vec<String>,
}

impl Pipeline {
    /// Builds a pipeline from already compiled registries.
    pub fn new(
        schema: SchemaRegistry,
        struct_name: &str,
        views: &SchemaRegistry,
        view_name: &str,
        mapping: MappingTable,
    ) -> Result<Self, RestructError> {
        if !schema.contains(struct_name) {
            return Err(RestructError::UnknownType(struct_name.to_owned()));
        }
        let view = resolve_view(views, view_name)?;
        let flat_names = flatten_struct(&schema, struct_name, &mapping);

        debug!(mapping = ?mapping, "mapping table");
        debug!(names = ?flat_names, count = flat_names.len(), "flattened {}", struct_name);
        debug!(view = ?view, leaves = view.leaf_count(), "view tree for {}", view_name);

        Ok(Pipeline {
            schema,
            struct_name: struct_name.to_owned(),
            view_name: view_name.to_owned(),
            view,
            mapping,
            flat_names,
        })
    }

    /// Compiles the header, view header and optional mapping text, then builds
    /// the pipeline.
    pub fn compile(
        header: &str,
        struct_name: &str,
        view_header: &str,
        view_name: &str,
        mapping: Option<&str>,
    ) -> Result<Self, RestructError> {
        let schema = compile_schema(header)?;
        let views = compile_view_schema(view_header)?;
        let mapping = mapping.map(MappingTable::parse).unwrap_or_default();
        Pipeline::new(schema, struct_name, &views, view_name, mapping)
    }

    pub fn schema(&self) -> &SchemaRegistry {
        &self.schema
    }

    pub fn struct_name(&self) -> &str {
        &self.struct_name
    }

    pub fn view_name(&self) -> &str {
        &self.view_name
    }

    pub fn view(&self) -> &ViewNode {
        &self.view
    }

    pub fn mapping(&self) -> &MappingTable {
        &self.mapping
    }

    /// Flat leaf names of the full struct, in initializer order.
    pub fn flat_names(&self) -> &[String] {
        &self.flat_names
    }

    /// Pairs one struct instance's literal with the flattened schema.
    pub fn field_map(&self, literal: &LiteralNode) -> Result<FieldValueMap, RestructError> {
        build_field_map(&self.flat_names, &literal.flatten())
    }

    /// Renders one struct instance in the view layout.
    pub fn render_instance(&self, literal: &LiteralNode) -> Result<String, RestructError> {
        let map = self.field_map(literal)?;
        Ok(generate_initializer(&self.view, &map))
    }

    /// Converts a whole initializer block. A block whose first element is a
    /// list is an array of structs: each element is converted on its own and
    /// elements that do not fit the schema are skipped.
    pub fn render_block(&self, init_block: &str) -> Result<String, RestructError> {
        let literal = parse_literal(init_block);
        let Some(items) = literal.as_list().filter(|_| literal.is_list_of_lists()) else {
            return self.render_instance(&literal);
        };

        let mut elements = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match self.render_instance(item) {
                Ok(text) => elements.push(text),
                Err(err) if err.is_recoverable() => {
                    warn!(index, error = %err, "array element does not match {}, skipping", self.struct_name);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(join_elements(&elements))
    }

    /// Converts one extracted declaration into its view-layout text. The
    /// emitted type defaults to the view type.
    pub fn convert(&self, declaration: &Declaration, options: &RenderOptions) -> Result<String, RestructError> {
        let initializer = self.render_block(&declaration.init_block)?;
        let options = RenderOptions {
            type_name: options.type_name.clone().or_else(|| Some(self.view_name.clone())),
            ..options.clone()
        };
        Ok(declaration.render(&initializer, &options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::extract_declarations;
    use restruct_schema::Field;

    const POINT: &str = "typedef struct {
        int x;
        int y;
    } point;";

    #[test]
    fn test_end_to_end_point() {
        let pipeline = Pipeline::compile(POINT, "point", POINT, "point", None).unwrap();
        let decl = &extract_declarations("point p = {1, 2};", "point")[0];

        let map = pipeline.field_map(&parse_literal(&decl.init_block)).unwrap();
        assert_eq!(map.get("x"), Some("1"));
        assert_eq!(map.get("y"), Some("2"));

        let out = pipeline.convert(decl, &RenderOptions::default()).unwrap();
        assert_eq!(out, "point p = {1, 2};");
    }

    #[test]
    fn test_array_of_one_box() {
        let schema = "typedef struct {
            int v[3];
        } box;";
        let pipeline = Pipeline::compile(schema, "box", schema, "box", None).unwrap();
        assert_eq!(pipeline.flat_names(), ["v_0", "v_1", "v_2"]);

        let decl = &extract_declarations("box b[1] = {{ {1,2,3} }};", "box")[0];
        let out = pipeline.convert(decl, &RenderOptions::default()).unwrap();
        // Struct and member array each keep their braces (DESIGN.md, decision 3).
        assert_eq!(out, "box b[1] = {\n{{1, 2, 3}}\n};");
    }

    #[test]
    fn test_header_comments_are_ignored() {
        let header = "typedef struct {
            int hp; // hit points
            int mp; /* mana; */
        } stats;
        /* spans
           lines */
        typedef struct {
            int a;
        } later;";

        let registry = compile_schema(header).unwrap();
        assert_eq!(
            registry.fields("stats").unwrap(),
            [Field::scalar("hp", "int"), Field::scalar("mp", "int")]
        );
        assert_eq!(registry.get("later").unwrap().line, 9);

        let pipeline = Pipeline::compile(header, "stats", header, "stats", None).unwrap();
        assert_eq!(pipeline.render_block("{1, 2}").unwrap(), "{1, 2}");
    }

    #[test]
    fn test_short_instance_is_rejected() {
        let pipeline = Pipeline::compile(POINT, "point", POINT, "point", None).unwrap();
        let err = pipeline.render_block("{1}").unwrap_err();
        assert!(matches!(err, RestructError::SchemaMismatch { expected: 2, found: 1 }));
    }

    #[test]
    fn test_bad_array_elements_are_skipped() {
        let pipeline = Pipeline::compile(POINT, "point", POINT, "point", None).unwrap();
        let out = pipeline.render_block("{{1, 2}, {3}, {5, 6, 7}}").unwrap();
        assert_eq!(out, "{\n{1, 2},\n{5, 6}\n}");
    }

    #[test]
    fn test_unknown_types_are_errors() {
        let err = Pipeline::compile(POINT, "nope", POINT, "point", None).unwrap_err();
        assert!(matches!(err, RestructError::UnknownType(name) if name == "nope"));

        let err = Pipeline::compile(POINT, "point", POINT, "nope", None).unwrap_err();
        assert!(matches!(err, RestructError::UnknownType(name) if name == "nope"));
    }

    #[test]
    fn test_malformed_header_aborts() {
        let err = Pipeline::compile("typedef struct { int x; }", "point", POINT, "point", None).unwrap_err();
        assert!(matches!(err, RestructError::MalformedSchema { .. }));
    }
}
