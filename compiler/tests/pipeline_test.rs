#![cfg(test)]

use restruct_compiler::{
    compile_schema, compile_view_schema, extract_declarations, literal::parse_literal, ArraySize,
    MappingTable, Pipeline, RenderOptions, RestructError,
};
use restruct_schema::Field;

const FULL: &str = include_str!("fixtures/units_full.h");
const VIEW: &str = include_str!("fixtures/units_view.h");
const MAPPING: &str = include_str!("fixtures/units.map");
const INIT: &str = include_str!("fixtures/units_init.h");

fn pipeline() -> Pipeline {
    Pipeline::compile(FULL, "unit", VIEW, "unitView", Some(MAPPING)).expect("pipeline failed")
}

#[test]
fn test_compile_full_header() {
    let registry = compile_schema(FULL).expect("compile_schema failed");
    assert_eq!(registry.len(), 2);

    let unit = registry.fields("unit").unwrap();
    assert_eq!(unit[0], Field::scalar("id", "unsigned char"));
    assert_eq!(unit[4], Field::array("history", "stats", vec![2]));
    assert_eq!(registry.fields("stats").unwrap()[2], Field::array("resist", "float", vec![2]));
}

#[test]
fn test_compile_view_header() {
    let registry = compile_view_schema(VIEW).expect("compile_view_schema failed");
    assert_eq!(registry.len(), 3);
    assert_eq!(registry.fields("unitView").unwrap().len(), 6);
}

#[test]
fn test_flattened_names_with_mapping() {
    assert_eq!(
        pipeline().flat_names(),
        [
            "id", "mass",
            "core_hp", "base_mp", "base_resist_0", "base_resist_1",
            "extra_hp", "extra_mp", "extra_resist_0", "extra_resist_1",
            "history_0_hp", "history_0_mp", "history_0_resist_0", "history_0_resist_1",
            "history_1_hp", "history_1_mp", "history_1_resist_0", "history_1_resist_1",
        ]
    );
}

#[test]
fn test_flattened_names_without_mapping() {
    let plain = Pipeline::new(
        compile_schema(FULL).unwrap(),
        "unit",
        &compile_view_schema(VIEW).unwrap(),
        "unitView",
        MappingTable::new(),
    )
    .unwrap();
    assert_eq!(plain.flat_names().len(), 18);
    assert_eq!(plain.flat_names()[2], "base_hp");
    assert_eq!(plain.flat_names()[6], "bonus_hp");
}

#[test]
fn test_extract_all_declarations() {
    let declarations = extract_declarations(INIT, "unit");
    let names: Vec<_> = declarations.iter().map(|d| d.var_name.as_str()).collect();
    assert_eq!(names, ["army", "hero", "broken", "empty"]);
    assert_eq!(declarations[0].array_size, Some(ArraySize::Fixed("2".into())));
    assert_eq!(declarations[2].array_size, Some(ArraySize::Unsized));
}

#[test]
fn test_field_map_of_one_instance() {
    let hero = &extract_declarations(INIT, "unit")[1];
    let map = pipeline().field_map(&parse_literal(&hero.init_block)).unwrap();

    assert_eq!(map.get("core_hp"), Some("300"));
    assert_eq!(map.get("extra_resist_1"), Some("4"));
    assert_eq!(map.sequence("history_1_resist").unwrap(), ["23", "24"]);
    assert_eq!(map.get("base_hp"), None);
}

#[test]
fn test_convert_single_instance() {
    let hero = &extract_declarations(INIT, "unit")[1];
    let out = pipeline().convert(hero, &RenderOptions::default()).unwrap();
    assert_eq!(
        out,
        "unitView hero = {3, 300, {0, 70}, {30, 7, {3, 4}}, {{17, 18}, {21, 22}}, 1.0f};"
    );
}

#[test]
fn test_convert_array_instance() {
    let army = &extract_declarations(INIT, "unit")[0];
    let options = RenderOptions {
        trailing_specifier: Some("PROGMEM".into()),
        ..RenderOptions::default()
    };
    let out = pipeline().convert(army, &options).unwrap();
    assert_eq!(
        out,
        "static const unitView army[2] PROGMEM = {\n\
         {1, 100, {0, 50}, {10, 5, {0.3f, 0.4f}}, {{1, 2}, {5, 6}}, 2.5f},\n\
         {2, 200, {0, 60}, {20, 6, {0.7f, 0.8f}}, {{9, 10}, {13, 14}}, 3.0f}\n\
         };"
    );
}

#[test]
fn test_mismatched_array_element_is_skipped() {
    let broken = &extract_declarations(INIT, "unit")[2];
    let out = pipeline().convert(broken, &RenderOptions::default()).unwrap();
    assert_eq!(
        out,
        "const unitView broken[] = {\n{5, 400, {0, 80}, {40, 8, {2, 2}}, {{25, 26}, {29, 30}}, 4.5f}\n};"
    );
}

#[test]
fn test_mismatched_single_instance_is_rejected() {
    let empty = &extract_declarations(INIT, "unit")[3];
    let err = pipeline().convert(empty, &RenderOptions::default()).unwrap_err();
    assert!(
        matches!(err, RestructError::SchemaMismatch { expected: 18, found: 2 }),
        "expected a SchemaMismatch but got {:?}",
        err
    );
}

#[test]
fn test_identity_view_round_trip() {
    let schema = compile_schema(
        "typedef struct { int a; int b[2]; } inner;
         typedef struct { int id; inner one; inner many[2]; int grid[2][2]; } outer;",
    )
    .unwrap();
    // The full registry doubles as the view, so multi-dimensional fields keep
    // every dimension.
    let pipeline = Pipeline::new(schema.clone(), "outer", &schema, "outer", MappingTable::new()).unwrap();

    let literal = "{1, {2, {3, 4}}, {{5, {6, 7}}, {8, {9, 10}}}, {{11, 12}, {13, 14}}}";
    let out = pipeline.render_block(literal).unwrap();
    assert_eq!(out, parse_literal(literal).to_string());
}

#[test]
fn test_view_recognizer_reads_one_field_per_line() {
    let views = compile_view_schema("typedef struct { int a; int b; } packed;").unwrap();
    assert_eq!(views.fields("packed").unwrap(), [Field::scalar("a", "int")]);
}
