//! Property-based tests for builder invariants.
//!
//! Schemas are generated as JSON documents with random field names, types,
//! required flags and enumeration sizes.

use formdata::{FieldSlot, FieldValue, FormData, FormOptions, InputType, ModelSchema};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

#[derive(Debug, Clone)]
struct GenField {
    name: String,
    kind: &'static str,
    required: bool,
    enum_len: usize,
}

fn gen_field() -> impl Strategy<Value = GenField> {
    (
        "[a-z][a-zA-Z]{0,10}",
        prop::sample::select(vec!["string", "number", "boolean", "date"]),
        any::<bool>(),
        0usize..9,
    )
        .prop_map(|(name, kind, required, enum_len)| GenField {
            name,
            kind,
            required,
            enum_len,
        })
}

fn build_schema(fields: &[GenField]) -> ModelSchema {
    let mut map = Map::new();
    for f in fields {
        let mut def = json!({"type": f.kind, "required": f.required});
        if f.kind == "string" && f.enum_len > 0 {
            let values: Vec<String> = (0..f.enum_len).map(|i| format!("v{}", i)).collect();
            def["enum"] = json!(values);
        }
        map.insert(f.name.clone(), def);
    }
    ModelSchema::from_value(json!({"name": "generated", "fields": Value::Object(map)})).unwrap()
}

proptest! {
    #[test]
    fn get_is_idempotent(fields in prop::collection::vec(gen_field(), 1..12)) {
        let schema = build_schema(&fields);
        let mut form = FormData::new();
        form.model(&schema);

        let spec: String = fields
            .iter()
            .map(|f| format!("{}:checkbox", f.name))
            .collect::<Vec<_>>()
            .join(" ");

        let first = form.get(Some(&spec));
        let second = form.get(Some(&spec));
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(form.get(None), form.get(None));
    }

    #[test]
    fn required_is_ordered_subset(fields in prop::collection::vec(gen_field(), 1..12)) {
        let schema = build_schema(&fields);
        let mut form = FormData::new();
        form.model(&schema);

        let expected: Vec<FieldSlot> = form
            .get(None)
            .into_iter()
            .filter(|slot| slot.descriptor().is_some_and(|d| d.required))
            .collect();
        prop_assert_eq!(form.get_required(), expected);
    }

    #[test]
    fn required_flag_mirrors_schema(fields in prop::collection::vec(gen_field(), 1..12)) {
        let schema = build_schema(&fields);
        let mut form = FormData::new();
        form.model(&schema);

        // duplicate generated names collapse to the last definition
        for f in &fields {
            let last = fields.iter().rev().find(|g| g.name == f.name).unwrap();
            prop_assert_eq!(form.descriptor(&f.name).unwrap().required, last.required);
        }
    }

    #[test]
    fn enum_widget_follows_threshold(len in 1usize..12, threshold in 1usize..10) {
        let values: Vec<String> = (0..len).map(|i| format!("v{}", i)).collect();
        let schema = ModelSchema::from_value(json!({
            "fields": {"choice": {"type": "string", "enum": values}}
        })).unwrap();

        let mut form = FormData::with_options(FormOptions::default().with_select_min_items(threshold));
        form.model(&schema);
        let choice = form.descriptor("choice").unwrap();

        let expected = if len < threshold { InputType::Radio } else { InputType::Select };
        prop_assert_eq!(choice.input_type.clone(), Some(expected));
        prop_assert_eq!(choice.options.as_ref().map(Vec::len), Some(len));
    }

    #[test]
    fn value_only_labels_are_title_case(name in "[a-z]{1,8}([A-Z][a-z]{1,8}){0,3}") {
        let mut form = FormData::new();
        form.values([(name.clone(), FieldValue::from("x"))]);
        let label = form.descriptor(&name).unwrap().label.clone();

        prop_assert!(label.starts_with(|c: char| c.is_ascii_uppercase()));
        prop_assert_eq!(label.replace(' ', ""), {
            let mut chars = name.chars();
            let first = chars.next().unwrap().to_ascii_uppercase();
            format!("{}{}", first, chars.as_str())
        });
    }
}
