//! Integration tests for materializing resource objects from payloads.
//!
//! These tests exercise the public object model without a server: field
//! installation, declared-absent fields, writable upgrades, identity, and
//! invalidation after deletion.

use std::collections::HashSet;
use std::sync::Arc;

use gitea_api::rest::{
    parse_datetime, ApiObject, Descriptor, FieldParseError, FieldParser, FieldTable,
    MutableResource, Resource, ResourceError,
};
use gitea_api::{BaseUrl, GiteaConfig, RestClient};
use serde_json::{json, Map, Value};

fn test_client() -> Arc<RestClient> {
    let config = GiteaConfig::builder()
        .base_url(BaseUrl::new("https://gitea.example.com").unwrap())
        .build()
        .unwrap();
    Arc::new(RestClient::new(&config).unwrap())
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn parse_labels(_client: &Arc<RestClient>, raw: Value) -> Result<Value, FieldParseError> {
    match raw {
        Value::Array(items) => Ok(Value::Array(
            items
                .into_iter()
                .filter_map(|item| item.get("name").cloned())
                .collect(),
        )),
        other => Err(FieldParseError::new(format!("expected labels array, got {other}"))),
    }
}

/// A read-only resource type with two parsers.
enum Release {}

impl Resource for Release {
    type Key = u64;
    const NAME: &'static str = "Release";
    const DESCRIPTOR: Descriptor = Descriptor::new(&[
        FieldParser::new("published_at", parse_datetime),
        FieldParser::new("labels", parse_labels),
    ]);

    fn identity_key(fields: &FieldTable) -> Result<Self::Key, ResourceError> {
        fields.identity("id")
    }
}

/// A mutable resource type with a composite identity and no commit.
enum Branch {}

impl Resource for Branch {
    type Key = (String, String);
    const NAME: &'static str = "Branch";
    const DESCRIPTOR: Descriptor = Descriptor::new(&[FieldParser::new("updated", parse_datetime)])
        .with_patchable(&["updated", "protected", "description"]);

    fn identity_key(fields: &FieldTable) -> Result<Self::Key, ResourceError> {
        Ok((fields.identity("repo")?, fields.identity("name")?))
    }
}

impl MutableResource for Branch {}

// ============================================================================
// Read Pass Tests
// ============================================================================

#[test]
fn test_every_payload_key_becomes_a_field() {
    let release = ApiObject::<Release>::parse_response(
        &test_client(),
        json!({"id": 1, "tag_name": "v1.0.0", "draft": false, "note": null}),
    )
    .unwrap();

    assert_eq!(release.get("tag_name").unwrap(), &json!("v1.0.0"));
    assert_eq!(release.get("draft").unwrap(), &json!(false));
    assert_eq!(release.get("note").unwrap(), &Value::Null);
}

#[test]
fn test_declared_parsers_transform_values() {
    let release = ApiObject::<Release>::parse_response(
        &test_client(),
        json!({
            "id": 1,
            "published_at": "2024-02-01T09:30:00-05:00",
            "labels": [{"name": "stable"}, {"name": "lts"}]
        }),
    )
    .unwrap();

    assert_eq!(release.get("published_at").unwrap(), &json!("2024-02-01T14:30:00Z"));
    assert_eq!(release.get("labels").unwrap(), &json!(["stable", "lts"]));
}

#[test]
fn test_declared_fields_absent_from_payload_read_as_null() {
    let release = ApiObject::<Release>::parse_response(&test_client(), json!({"id": 1})).unwrap();

    assert!(release.has_field("published_at").unwrap());
    assert_eq!(release.get("published_at").unwrap(), &Value::Null);
    assert_eq!(release.get("labels").unwrap(), &Value::Null);
    assert!(!release.has_field("tag_name").unwrap());
}

#[test]
fn test_parser_failure_names_the_field() {
    let result = ApiObject::<Release>::parse_response(
        &test_client(),
        json!({"id": 1, "labels": "stable"}),
    );

    match result {
        Err(ResourceError::FieldParse {
            resource,
            field,
            reason,
        }) => {
            assert_eq!(resource, "Release");
            assert_eq!(field, "labels");
            assert!(reason.contains("expected labels array"));
        }
        other => panic!("expected FieldParse, got {other:?}"),
    }
}

#[test]
fn test_read_only_materialization_installs_no_writable_fields() {
    let table = FieldTable::materialize_read_only(
        &test_client(),
        Branch::NAME,
        &Branch::DESCRIPTOR,
        object(json!({"repo": "hello", "name": "main", "protected": true})),
    )
    .unwrap();

    assert!(!table.is_writable("protected"));
    assert!(!table.contains("description"));
    assert_eq!(table.get("updated"), Some(&Value::Null));
}

// ============================================================================
// Writable Pass Tests
// ============================================================================

#[test]
fn test_patchable_fields_present_in_payload_keep_their_values() {
    let branch = ApiObject::<Branch>::parse_response(
        &test_client(),
        json!({
            "repo": "hello",
            "name": "main",
            "protected": true,
            "updated": "2024-02-01T10:00:00+01:00"
        }),
    )
    .unwrap();

    assert_eq!(branch.get("protected").unwrap(), &json!(true));
    assert_eq!(branch.get("updated").unwrap(), &json!("2024-02-01T09:00:00Z"));
    assert!(!branch.is_dirty());
}

#[test]
fn test_patchable_fields_absent_from_payload_are_writable_null() {
    let mut branch = ApiObject::<Branch>::parse_response(
        &test_client(),
        json!({"repo": "hello", "name": "main"}),
    )
    .unwrap();

    assert_eq!(branch.get("description").unwrap(), &Value::Null);
    branch.set("description", "Release branch").unwrap();
    assert_eq!(
        branch.collect_dirty().unwrap(),
        object(json!({"description": "Release branch"}))
    );
}

#[test]
fn test_duplicate_patchable_declaration_is_schema_conflict() {
    const DESCRIPTOR: Descriptor = Descriptor::EMPTY.with_patchable(&["title", "title"]);

    let result = FieldTable::materialize_writable(
        &test_client(),
        "Broken",
        &DESCRIPTOR,
        object(json!({"title": "x"})),
    );

    assert!(matches!(
        result,
        Err(ResourceError::SchemaConflict { resource: "Broken", field }) if field == "title"
    ));
}

// ============================================================================
// Identity Tests
// ============================================================================

#[test]
fn test_composite_identity() {
    let client = test_client();
    let main = ApiObject::<Branch>::parse_response(
        &client,
        json!({"repo": "hello", "name": "main", "protected": true}),
    )
    .unwrap();
    let same = ApiObject::<Branch>::parse_response(
        &client,
        json!({"repo": "hello", "name": "main", "protected": false}),
    )
    .unwrap();
    let other_repo = ApiObject::<Branch>::parse_response(
        &client,
        json!({"repo": "world", "name": "main"}),
    )
    .unwrap();

    assert_eq!(main, same);
    assert_ne!(main, other_repo);
    assert_eq!(
        main.identity_key().unwrap(),
        ("hello".to_string(), "main".to_string())
    );

    let set: HashSet<ApiObject<Branch>> = [main, same, other_repo].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn test_payload_without_identity_keeps_declared_fields() {
    let branch = ApiObject::<Branch>::parse_response(
        &test_client(),
        json!({"repo": "hello", "protected": true}),
    )
    .unwrap();

    assert_eq!(branch.get("protected").unwrap(), &json!(true));
    assert_eq!(branch.get("updated").unwrap(), &Value::Null);
    assert_eq!(branch.get("description").unwrap(), &Value::Null);
    assert!(matches!(
        branch.identity_key(),
        Err(ResourceError::IdentityContractMissing {
            resource: "Branch",
            field: "name"
        })
    ));
}

#[test]
#[should_panic(expected = "Branch identity field 'name' is missing")]
fn test_set_membership_without_identity_fails_fast() {
    let branch = ApiObject::<Branch>::parse_response(
        &test_client(),
        json!({"repo": "hello"}),
    )
    .unwrap();

    let mut set = HashSet::new();
    set.insert(branch);
}

#[test]
fn test_display_uses_identity() {
    let branch = ApiObject::<Branch>::parse_response(
        &test_client(),
        json!({"repo": "hello", "name": "main"}),
    )
    .unwrap();

    assert_eq!(branch.to_string(), r#"Branch (("hello", "main"))"#);
}

// ============================================================================
// Deletion Tests
// ============================================================================

#[test]
fn test_every_access_fails_after_deletion() {
    let mut branch = ApiObject::<Branch>::parse_response(
        &test_client(),
        json!({"repo": "hello", "name": "main"}),
    )
    .unwrap();
    branch.set("protected", true).unwrap();

    branch.mark_deleted();

    for result in [
        branch.get("name").map(|_| ()),
        branch.get("protected").map(|_| ()),
        branch.has_field("name").map(|_| ()),
        branch.to_payload().map(|_| ()),
        branch.collect_dirty().map(|_| ()),
        branch.set("description", "late"),
    ] {
        assert!(matches!(
            result,
            Err(ResourceError::ObjectInvalidated { resource: "Branch" })
        ));
    }
}

#[tokio::test]
async fn test_commit_without_implementation_keeps_changes() {
    let mut branch = ApiObject::<Branch>::parse_response(
        &test_client(),
        json!({"repo": "hello", "name": "main"}),
    )
    .unwrap();
    branch.set("protected", true).unwrap();

    let result = branch.commit().await;

    assert!(matches!(
        result,
        Err(ResourceError::CommitNotImplemented { resource: "Branch" })
    ));
    assert_eq!(branch.dirty_fields().collect::<Vec<_>>(), vec!["protected"]);
}

#[test]
fn test_objects_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiObject<Release>>();
    assert_send_sync::<ApiObject<Branch>>();
}
