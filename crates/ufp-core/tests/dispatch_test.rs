#![allow(clippy::unwrap_used)]
// Integration tests for model-key dispatch against recorded sample data.

mod common;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::{Value, json};
use strum::IntoEnumIterator;
use url::Url;

use ufp_core::model::{Camera, LockStatus, PermissionNode};
use ufp_core::{
    DecodeError, Dispatcher, EntityKind, ModelRegistry, ModelType, ProtectClient, ProtectModel,
    SessionConfig, construct, construct_as, resolve_type,
};

use common::{expected_count, record, sample};

// ── Helpers ─────────────────────────────────────────────────────────

fn client() -> ProtectClient {
    ProtectClient::new(SessionConfig {
        url: Url::parse("https://192.168.1.1").unwrap(),
        username: "admin".into(),
        password: SecretString::from("secret".to_owned()),
        verify_ssl: false,
    })
}

fn bootstrap_list(key: &str) -> Vec<Value> {
    sample("bootstrap")[key].as_array().unwrap().clone()
}

// ── Type resolution ─────────────────────────────────────────────────

#[test]
fn every_model_tag_resolves_to_its_registered_kind() {
    let registry = ModelRegistry::global();
    for model in ModelType::iter() {
        let rec = record(json!({ "modelkey": model.as_wire() }));
        let kind = resolve_type(&rec).unwrap();
        assert_eq!(Some(kind), registry.lookup(model));
    }
}

#[test]
fn current_key_spelling_resolves() {
    let rec = record(json!({ "modelKey": "userLocation" }));
    assert_eq!(resolve_type(&rec).unwrap(), EntityKind::UserLocation);
}

#[test]
fn legacy_key_takes_priority_over_current_key() {
    let rec = record(json!({ "modelkey": "sensor", "modelKey": "camera" }));
    assert_eq!(resolve_type(&rec).unwrap(), EntityKind::Sensor);
}

#[test]
fn missing_model_key() {
    let rec = record(json!({ "id": "abc123", "name": "Front Door" }));
    assert!(matches!(
        resolve_type(&rec),
        Err(DecodeError::MissingModelKey)
    ));
    assert!(matches!(
        construct(rec, None, None),
        Err(DecodeError::MissingModelKey)
    ));
}

#[test]
fn missing_model_key_even_with_pre_resolved_kind() {
    let rec = record(json!({ "id": "abc123" }));
    assert!(matches!(
        construct(rec.clone(), None, Some(EntityKind::Camera)),
        Err(DecodeError::MissingModelKey)
    ));
    assert!(matches!(
        construct_as::<Camera>(rec, None),
        Err(DecodeError::MissingModelKey)
    ));
}

#[test]
fn unknown_literal_is_invalid_model_key() {
    let rec = record(json!({ "modelkey": "not_a_real_type" }));
    let err = resolve_type(&rec).unwrap_err();
    assert!(
        matches!(err, DecodeError::InvalidModelKey { ref value } if value == "not_a_real_type"),
        "unexpected error: {err:?}"
    );
    assert_eq!(err.to_string(), "Invalid model key: not_a_real_type");
}

#[test]
fn tag_matching_is_case_sensitive() {
    let rec = record(json!({ "modelKey": "Camera" }));
    assert!(matches!(
        resolve_type(&rec),
        Err(DecodeError::InvalidModelKey { .. })
    ));
}

#[test]
fn resolution_is_repeatable_and_leaves_record_untouched() {
    let rec = record(json!({ "modelKey": "liveview", "id": "lv1", "name": "All" }));
    let before = rec.clone();
    let dispatcher = Dispatcher::default();

    let first = dispatcher.resolve_type(&rec).unwrap();
    let second = dispatcher.resolve_type(&rec).unwrap();
    assert_eq!(first, second);
    assert_eq!(rec, before);
}

// ── Construction ────────────────────────────────────────────────────

#[test]
fn camera_record_constructs_camera() {
    let rec = record(json!({
        "modelkey": "camera",
        "id": "abc123",
        "name": "Porch",
        "state": "CONNECTED",
        "isRecording": true
    }));

    let ProtectModel::Camera(camera) = construct(rec, None, None).unwrap() else {
        panic!("expected a camera");
    };
    assert_eq!(camera.base.id, "abc123");
    assert_eq!(camera.base.name.as_deref(), Some("Porch"));
    assert!(camera.is_recording);
}

#[test]
fn pre_resolved_kind_skips_resolution() {
    // The tag is only checked for presence when the kind is supplied.
    let rec = record(json!({ "modelKey": "not_a_real_type", "id": "s1" }));
    let model = construct(rec, None, Some(EntityKind::Sensor)).unwrap();
    assert_eq!(model.kind(), EntityKind::Sensor);
    assert_eq!(model.id(), Some("s1"));
}

#[test]
fn entity_errors_propagate_unchanged() {
    let rec = record(json!({ "modelKey": "event", "id": "evt1", "type": "motion" }));
    let err = construct(rec, None, None).unwrap_err();
    let DecodeError::Field { kind, source } = err else {
        panic!("expected field error, got {err:?}");
    };
    assert_eq!(kind, EntityKind::Event);
    assert!(source.to_string().contains("start"), "{source}");
}

#[test]
fn session_handle_is_threaded_into_entities() {
    let api = client();
    let rec = record(sample("bootstrap")["users"][0].clone());

    let model = construct(rec, Some(api.clone()), None).unwrap();
    assert!(model.api().unwrap().same_session(&api));

    let ProtectModel::User(user) = model else {
        panic!("expected a user");
    };
    let account = user.cloud_account.as_ref().unwrap();
    assert!(account.api().unwrap().same_session(&api));
    assert!(user.location.as_ref().unwrap().api().unwrap().same_session(&api));
}

#[test]
fn construct_as_builds_the_requested_type() {
    let api = client();
    let rec = record(json!({ "modelKey": "camera", "id": "cam9", "name": "Garage" }));

    let camera = construct_as::<Camera>(rec, Some(api.clone())).unwrap();
    assert_eq!(camera.base.id, "cam9");
    assert_eq!(camera.base.name.as_deref(), Some("Garage"));
    assert!(camera.api().unwrap().same_session(&api));
}

#[test]
fn construction_without_session_leaves_api_empty() {
    let rec = record(bootstrap_list("lights").remove(0));
    let model = construct(rec, None, None).unwrap();
    assert!(model.api().is_none());
}

// ── Sample bootstrap ────────────────────────────────────────────────

#[test]
fn bootstrap_lists_construct_expected_kinds() {
    let cases = [
        ("cameras", "camera", EntityKind::Camera),
        ("users", "user", EntityKind::User),
        ("groups", "group", EntityKind::Group),
        ("liveviews", "liveview", EntityKind::Liveview),
        ("viewers", "viewer", EntityKind::Viewer),
        ("lights", "light", EntityKind::Light),
        ("bridges", "bridge", EntityKind::Bridge),
        ("sensors", "sensor", EntityKind::Sensor),
        ("doorlocks", "doorlock", EntityKind::Doorlock),
    ];

    let dispatcher = Dispatcher::default();
    for (list, count_key, kind) in cases {
        let items = bootstrap_list(list);
        assert_eq!(items.len(), expected_count(count_key), "{list}");
        for item in items {
            let model = dispatcher.construct_value(item, None).unwrap();
            assert_eq!(model.kind(), kind, "{list}");
            assert!(model.id().is_some());
        }
    }
}

#[test]
fn bootstrap_nvr_constructs() {
    let nvr = sample("bootstrap")["nvr"].clone();
    let ProtectModel::Nvr(nvr) = Dispatcher::default().construct_value(nvr, None).unwrap() else {
        panic!("expected nvr");
    };
    let constants = common::constants();
    assert_eq!(nvr.name.as_deref(), constants["server_name"].as_str());
    assert_eq!(nvr.version.as_deref(), constants["server_version"].as_str());
    assert_eq!(nvr.mac.unwrap().as_str(), "a1:b2:c3:d4:e5:f6");
}

#[test]
fn sample_events_construct() {
    let events: Vec<ProtectModel> = sample("raw_events")
        .as_array()
        .unwrap()
        .iter()
        .cloned()
        .map(|v| Dispatcher::default().construct_value(v, None).unwrap())
        .collect();
    assert_eq!(events.len(), 3);

    let ongoing: Vec<&str> = events
        .iter()
        .filter_map(|m| match m {
            ProtectModel::Event(e) if e.is_ongoing() => Some(e.id.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(ongoing, vec!["61b3f5c7033ea703e7000481"]);
}

#[test]
fn owner_permissions_parse() {
    let rec = record(sample("bootstrap")["users"][0].clone());
    let ProtectModel::User(user) = construct(rec, None, None).unwrap() else {
        panic!("expected a user");
    };
    assert!(user.can(ModelType::Camera, PermissionNode::DeleteMedia, Some("any")));
    assert!(user.can(ModelType::Nvr, PermissionNode::Read, None));
    assert!(!user.can(ModelType::Nvr, PermissionNode::Write, None));
    // `user:read,write:$` covers the user's own record only.
    assert!(user.can(ModelType::User, PermissionNode::Write, Some(&user.id)));
    assert!(!user.can(ModelType::User, PermissionNode::Write, Some("61b3f5c7033ea703e7000499")));
    assert!(!user.can(ModelType::User, PermissionNode::Write, None));
    assert_eq!(user.group_ids, vec!["61b3f5c7033ea703e7000401".to_owned()]);
}

#[test]
fn doorlock_status_from_bootstrap() {
    let rec = record(bootstrap_list("doorlocks").remove(0));
    let ProtectModel::Doorlock(lock) = construct(rec, None, None).unwrap() else {
        panic!("expected a doorlock");
    };
    assert_eq!(lock.lock_status, LockStatus::Closed);
    assert_eq!(lock.camera.as_deref(), Some("61b3f5c7033ea703e7000424"));
}

#[test]
fn constructed_model_serializes_with_model_key() {
    let rec = record(bootstrap_list("sensors").remove(0));
    let value = serde_json::to_value(construct(rec, None, None).unwrap()).unwrap();
    assert_eq!(value["modelKey"], json!("sensor"));
    assert_eq!(value["mac"], json!("aa:bb:cc:dd:ee:60"));
    assert_eq!(value["batteryStatus"]["percentage"], json!(85));
}

#[test]
fn registry_is_shared_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| {
            std::thread::spawn(|| {
                let rec = record(json!({ "modelKey": "bridge" }));
                resolve_type(&rec).unwrap()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), EntityKind::Bridge);
    }
}
