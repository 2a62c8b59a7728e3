use serde_json::{Map, Value};
use tracing::trace;

use crate::{
    path::{Segment, Spath},
    schema::{FieldKind, FieldSchema, ObjectSchema, SchemaError, SchemaRegistry},
};

use super::{DiffError, Patch, PatchOp, list};

pub(super) fn diff_object(
    original: Option<&Value>,
    modified: Option<&Value>,
    schema: &ObjectSchema,
    registry: &SchemaRegistry,
    path_pos: &mut Spath,
    patch_ops: &mut Patch,
) -> Result<(), DiffError> {
    let original = present(original).map(|v| as_object(v, schema, path_pos)).transpose()?;
    let modified = present(modified).map(|v| as_object(v, schema, path_pos)).transpose()?;

    if original.is_none() && modified.is_none() {
        return Ok(());
    }

    for field in &schema.fields {
        let left = original.and_then(|obj| present(obj.get(&field.name)));
        let right = modified.and_then(|obj| present(obj.get(&field.name)));

        // Member names like "0" or "-" get the segment the pointer parser gives them
        path_pos.push(Segment::from_token(field.name.clone()));
        let result = diff_field(field, schema, left, right, registry, path_pos, patch_ops);
        path_pos.pop();
        result?;
    }

    Ok(())
}

fn diff_field(
    field: &FieldSchema,
    owner: &ObjectSchema,
    original: Option<&Value>,
    modified: Option<&Value>,
    registry: &SchemaRegistry,
    path_pos: &mut Spath,
    patch_ops: &mut Patch,
) -> Result<(), DiffError> {
    trace!(path = %path_pos, kind = ?field.kind, "diffing field");

    match (original, modified) {
        (None, None) => {}
        // A field appearing or disappearing is taken whole, never descended into
        (None, Some(right)) => patch_ops.push(PatchOp::add(path_pos.clone(), right.clone())),
        (Some(_), None) => patch_ops.push(PatchOp::remove(path_pos.clone())),
        (Some(left), Some(right)) => match field.kind {
            FieldKind::ComplexObject => {
                let type_name =
                    field
                        .type_name
                        .as_deref()
                        .ok_or_else(|| SchemaError::MissingTypeReference {
                            type_name: owner.name.clone(),
                            field: field.name.clone(),
                        })?;
                let nested = registry.object(type_name)?;
                diff_object(Some(left), Some(right), nested, registry, path_pos, patch_ops)?;
            }
            FieldKind::OrderedList => {
                let left = as_array(left, path_pos)?;
                let right = as_array(right, path_pos)?;
                list::diff_list(Some(left), Some(right), path_pos, patch_ops);
            }
            FieldKind::Primitive => diff_primitive(left, right, path_pos, patch_ops),
        },
    }

    Ok(())
}

fn diff_primitive(original: &Value, modified: &Value, path_pos: &Spath, patch_ops: &mut Patch) {
    if original == modified {
        return;
    }

    let op = if is_blank(modified) {
        PatchOp::remove(path_pos.clone())
    } else if is_blank(original) {
        PatchOp::add(path_pos.clone(), modified.clone())
    } else {
        PatchOp::replace(path_pos.clone(), modified.clone())
    };
    patch_ops.push(op);
}

// Blank strings count as missing when choosing between add, remove and replace
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn as_object<'a>(
    value: &'a Value,
    schema: &ObjectSchema,
    path_pos: &Spath,
) -> Result<&'a Map<String, Value>, DiffError> {
    let Value::Object(map) = value else {
        return Err(DiffError::shape_mismatch(path_pos, "object", value));
    };

    if let Some(key) = map.keys().find(|key| schema.field(key).is_none()) {
        return Err(DiffError::undeclared_field(path_pos, key));
    }

    Ok(map)
}

fn as_array<'a>(value: &'a Value, path_pos: &Spath) -> Result<&'a [Value], DiffError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| DiffError::shape_mismatch(path_pos, "array", value))
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use serde_json::json;

    use super::*;

    fn path(raw: &str) -> Spath {
        raw.try_into().unwrap()
    }

    // Order { id, note, customer: Customer, lines }, Customer { email, address: Address }
    fn registry() -> SchemaRegistry {
        let mut registry = SchemaRegistry::new();
        registry
            .insert(ObjectSchema::new(
                "Order",
                vec![
                    FieldSchema::primitive("id"),
                    FieldSchema::primitive("note"),
                    FieldSchema::object("customer", "Customer"),
                    FieldSchema::list("lines"),
                ],
            ))
            .unwrap();
        registry
            .insert(ObjectSchema::new(
                "Customer",
                vec![FieldSchema::primitive("email"), FieldSchema::object("address", "Address")],
            ))
            .unwrap();
        registry
            .insert(ObjectSchema::new("Address", vec![FieldSchema::primitive("city")]))
            .unwrap();
        registry
    }

    fn diff(left: &Value, right: &Value) -> Result<Patch, DiffError> {
        let registry = registry();
        let mut patch_ops = Patch::default();
        let mut path_pos = Spath::default();
        diff_object(
            Some(left),
            Some(right),
            registry.object("Order").unwrap(),
            &registry,
            &mut path_pos,
            &mut patch_ops,
        )?;
        check!(path_pos.is_empty());
        Ok(patch_ops)
    }

    #[test]
    fn test_diff_object_equal_values() {
        let doc = json!({"id": 1, "note": "x", "customer": {"email": "a@b"}, "lines": [1, 2]});

        let_assert!(Ok(patch) = diff(&doc, &doc));
        check!(patch.is_empty());
    }

    #[test]
    fn test_diff_object_replaces_changed_primitive() {
        let_assert!(Ok(patch) = diff(&json!({"id": 5}), &json!({"id": 7})));

        check!(patch == Patch::new(vec![PatchOp::replace(path("/id"), json!(7))]));
    }

    #[test]
    fn test_diff_object_null_to_value_is_add() {
        let_assert!(Ok(patch) = diff(&json!({"id": null}), &json!({"id": 5})));

        check!(patch == Patch::new(vec![PatchOp::add(path("/id"), json!(5))]));
    }

    #[test]
    fn test_diff_object_value_to_null_is_remove() {
        let_assert!(Ok(patch) = diff(&json!({"id": 5}), &json!({"id": null})));

        check!(patch == Patch::new(vec![PatchOp::remove(path("/id"))]));
    }

    #[test]
    fn test_diff_object_missing_key_counts_as_null() {
        let_assert!(Ok(patch) = diff(&json!({}), &json!({"id": 5})));
        check!(patch == Patch::new(vec![PatchOp::add(path("/id"), json!(5))]));

        let_assert!(Ok(patch) = diff(&json!({"id": 5}), &json!({})));
        check!(patch == Patch::new(vec![PatchOp::remove(path("/id"))]));
    }

    #[test]
    fn test_diff_object_recurses_into_nested_objects() {
        let left = json!({"customer": {"email": "a@b", "address": {"city": "Oslo"}}});
        let right = json!({"customer": {"email": "a@b", "address": {"city": "Bergen"}}});

        let_assert!(Ok(patch) = diff(&left, &right));

        check!(patch == Patch::new(vec![PatchOp::replace(path("/customer/address/city"), json!("Bergen"))]));
    }

    #[test]
    fn test_diff_object_nested_object_to_null_is_single_remove() {
        let left = json!({"customer": {"email": "a@b", "address": {"city": "Oslo"}}});
        let right = json!({"customer": null});

        let_assert!(Ok(patch) = diff(&left, &right));

        check!(patch == Patch::new(vec![PatchOp::remove(path("/customer"))]));
    }

    #[test]
    fn test_diff_object_new_nested_object_is_added_whole() {
        let right = json!({"customer": {"email": "a@b", "address": {"city": "Oslo"}}});

        let_assert!(Ok(patch) = diff(&json!({}), &right));

        check!(patch == Patch::new(vec![PatchOp::add(path("/customer"), right["customer"].clone())]));
    }

    #[test]
    fn test_diff_object_delegates_lists() {
        let_assert!(Ok(patch) = diff(&json!({"lines": ["a", "b"]}), &json!({"lines": ["b", "a", "c"]})));

        check!(
            patch
                == Patch::new(vec![
                    PatchOp::move_op(path("/lines/1"), path("/lines/0")),
                    PatchOp::add(path("/lines/-"), json!("c")),
                ])
        );
    }

    #[test]
    fn test_diff_object_list_of_objects_matches_by_value() {
        let left = json!({"lines": [{"sku": 1}, {"sku": 2}]});
        let right = json!({"lines": [{"sku": 2}, {"sku": 1}]});

        let_assert!(Ok(patch) = diff(&left, &right));

        check!(patch == Patch::new(vec![PatchOp::move_op(path("/lines/1"), path("/lines/0"))]));
    }

    #[test]
    fn test_diff_object_emits_fields_in_schema_order() {
        let left = json!({"lines": [1], "note": "a", "id": 1});
        let right = json!({"lines": [], "note": "b", "id": 2});

        let_assert!(Ok(patch) = diff(&left, &right));

        check!(
            patch
                == Patch::new(vec![
                    PatchOp::replace(path("/id"), json!(2)),
                    PatchOp::replace(path("/note"), json!("b")),
                    PatchOp::remove(path("/lines/0")),
                ])
        );
    }

    #[test]
    fn test_diff_object_blank_string_to_value_is_add() {
        let_assert!(Ok(patch) = diff(&json!({"note": "   "}), &json!({"note": "hi"})));

        check!(patch == Patch::new(vec![PatchOp::add(path("/note"), json!("hi"))]));
    }

    #[test]
    fn test_diff_object_value_to_blank_string_is_remove() {
        let_assert!(Ok(patch) = diff(&json!({"note": "hi"}), &json!({"note": ""})));

        check!(patch == Patch::new(vec![PatchOp::remove(path("/note"))]));
    }

    #[test]
    fn test_diff_object_blank_to_other_blank_is_remove() {
        let_assert!(Ok(patch) = diff(&json!({"note": ""}), &json!({"note": "\t"})));

        check!(patch == Patch::new(vec![PatchOp::remove(path("/note"))]));
    }

    #[test]
    fn test_diff_object_zero_and_false_are_not_blank() {
        let_assert!(Ok(patch) = diff(&json!({"id": 0}), &json!({"id": false})));

        check!(patch == Patch::new(vec![PatchOp::replace(path("/id"), json!(false))]));
    }

    #[test]
    fn test_diff_object_both_roots_null() {
        let registry = registry();
        let mut patch_ops = Patch::default();

        let result = diff_object(
            Some(&Value::Null),
            None,
            registry.object("Order").unwrap(),
            &registry,
            &mut Spath::default(),
            &mut patch_ops,
        );

        check!(result == Ok(()));
        check!(patch_ops.is_empty());
    }

    #[test]
    fn test_diff_object_rejects_undeclared_member() {
        let result = diff(&json!({"customer": {"email": "a", "phone": 1}}), &json!({"customer": {"email": "b"}}));

        let_assert!(Err(DiffError::UndeclaredField { path, field }) = result);
        check!(path == self::path("/customer"));
        check!(field == "phone");
    }

    #[test]
    fn test_diff_object_rejects_non_object_for_complex_field() {
        let result = diff(&json!({"customer": "nobody"}), &json!({"customer": {"email": "b"}}));

        let_assert!(Err(DiffError::ShapeMismatch { path, expected, actual }) = result);
        check!(path == self::path("/customer"));
        check!(expected == "object");
        check!(actual == "string(\"nobody\")");
    }

    #[test]
    fn test_diff_object_rejects_non_array_for_list_field() {
        let result = diff(&json!({"lines": [1]}), &json!({"lines": {"0": 1}}));

        let_assert!(Err(DiffError::ShapeMismatch { path, expected, .. }) = result);
        check!(path == self::path("/lines"));
        check!(expected == "array");
    }

    #[test]
    fn test_diff_object_index_like_member_names_survive_the_wire() {
        let mut registry = SchemaRegistry::new();
        registry
            .insert(ObjectSchema::new(
                "Odd",
                vec![FieldSchema::primitive("0"), FieldSchema::primitive("-")],
            ))
            .unwrap();
        let left = json!({"0": 1, "-": "a"});
        let right = json!({"0": 2, "-": "b"});
        let mut patch_ops = Patch::default();

        let result = diff_object(
            Some(&left),
            Some(&right),
            registry.object("Odd").unwrap(),
            &registry,
            &mut Spath::default(),
            &mut patch_ops,
        );

        check!(result == Ok(()));
        check!(
            patch_ops
                == Patch::new(vec![
                    PatchOp::replace(path("/0"), json!(2)),
                    PatchOp::replace(path("/-"), json!("b")),
                ])
        );
        let_assert!(Ok(wire) = serde_json::to_value(&patch_ops));
        let_assert!(Ok(parsed) = serde_json::from_value::<Patch>(wire));
        check!(parsed == patch_ops);
        let_assert!(Ok(patched) = crate::patch::apply(&left, &parsed));
        check!(patched == right);
    }

    #[test]
    fn test_diff_object_reports_unregistered_nested_type() {
        let mut registry = SchemaRegistry::new();
        registry
            .insert(ObjectSchema::new("Root", vec![FieldSchema::object("child", "Missing")]))
            .unwrap();

        let result = diff_object(
            Some(&json!({"child": {}})),
            Some(&json!({"child": {}})),
            registry.object("Root").unwrap(),
            &registry,
            &mut Spath::default(),
            &mut Patch::default(),
        );

        check!(result == Err(DiffError::Schema(SchemaError::unknown_type("Missing"))));
    }
}
