//! End-to-end tests over an on-disk store.

use serde_json::json;
use std::path::Path;
use ztp_tools::service::{JSON_CONTENT_TYPE, Upload};
use ztp_tools::store::status::{CLIENT_KEY, TIME_KEY};
use ztp_tools::{
    Collection, DocumentStore, JsonFileStore, ShapeError, StatusLog, ZtpError, ZtpService,
    error_body,
};

fn file_service(dir: &Path) -> ZtpService<JsonFileStore> {
    ZtpService::new(JsonFileStore::new(dir.join("data.json")))
}

#[test]
fn test_fresh_store_serves_single_empty_entry() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let service = file_service(dir.path());

    assert_eq!(service.read_document().unwrap().body, b"[{}]");
    assert_eq!(service.export_csv().unwrap().body, b"\"\"\n\"\"\n");
}

#[test]
fn test_document_lifecycle() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let service = file_service(dir.path());

    let body = br#"[{"image":"base.bin"},{"stack":{"1":"FOC1"},"hostname":"sw1"}]"#;
    service.write_document(JSON_CONTENT_TYPE, body).unwrap();
    assert_eq!(service.read_document().unwrap().body, body.to_vec());

    let csv = service.export_csv().unwrap();
    assert_eq!(
        String::from_utf8(csv.body.clone()).unwrap(),
        "image;stack/1;hostname\nbase.bin;;\n;FOC1;sw1\n"
    );

    let edited = Upload {
        filename: "edited.csv".to_string(),
        bytes: b"image;stack/1;hostname\nbase2.bin;;\n;FOC1;sw1-renamed\n".to_vec(),
    };
    service.import_csv(Some(&edited)).unwrap();
    assert_eq!(
        service.store().load().unwrap().to_json(),
        json!([
            {"image": "base2.bin"},
            {"stack": {"1": "FOC1"}, "hostname": "sw1-renamed"}
        ])
    );
}

#[test]
fn test_rejected_writes_are_all_or_nothing() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let service = file_service(dir.path());
    service
        .write_document(JSON_CONTENT_TYPE, br#"[{"stack":{"1":"FOC1"}}]"#)
        .unwrap();
    let before = std::fs::read(service.store().path()).unwrap();

    let rejected: [&[u8]; 4] = [
        br#"[{"a":1},{"b":2}]"#,
        br#"[{"stack":{"1":"FOC1"},"subst":"x"}]"#,
        br#"{"stack":{}}"#,
        b"not json",
    ];
    for body in rejected {
        assert!(service.write_document(JSON_CONTENT_TYPE, body).is_err());
        assert_eq!(std::fs::read(service.store().path()).unwrap(), before);
    }

    let upload = Upload {
        filename: "two-defaults.csv".to_string(),
        bytes: b"image\na.bin\nb.bin\n".to_vec(),
    };
    let err = service.import_csv(Some(&upload)).unwrap_err();
    assert_eq!(err.shape(), Some(&ShapeError::TooManyDefaults));
    assert_eq!(std::fs::read(service.store().path()).unwrap(), before);

    // Only the target file remains, no temp files left behind
    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec!["data.json"]);
}

#[test]
fn test_corrupt_document_is_reported() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("data.json");
    std::fs::write(&path, "[{\"stack\": ").unwrap();

    let service = file_service(dir.path());
    let err = service.read_document().unwrap_err();
    assert!(matches!(err, ZtpError::CorruptDocument { .. }));

    std::fs::write(&path, r#"[{"a": 1}, {"b": 2}]"#).unwrap();
    let err = service.export_csv().unwrap_err();
    assert_eq!(
        error_body(&err),
        r#""Maximum of one object without stack key is allowed""#
    );

    // A valid write repairs the file
    service.write_document(JSON_CONTENT_TYPE, b"[{}]").unwrap();
    assert_eq!(service.store().load().unwrap(), Collection::empty_document());
}

#[test]
fn test_persisted_document_uses_configured_indent() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let store = JsonFileStore::new(dir.path().join("data.json")).with_indent(2);
    store.save_json(&json!([{"stack": {"1": "FOC1"}}])).unwrap();

    let text = std::fs::read_to_string(store.path()).unwrap();
    insta::assert_snapshot!(text, @r#"
    [
      {
        "stack": {
          "1": "FOC1"
        }
      }
    ]
    "#);
}

#[test]
fn test_status_log_records_client_and_time() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let log = StatusLog::open(dir.path().join("status.json"));

    log.append(json!({"serial": "FOC1", "state": "upgraded"}), "10.0.0.7")
        .unwrap();
    let entries = log.entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["serial"], "FOC1");
    assert_eq!(entries[0][CLIENT_KEY], "10.0.0.7");
    assert!(entries[0][TIME_KEY].as_str().is_some_and(|t| !t.is_empty()));

    log.reset().unwrap();
    assert_eq!(std::fs::read_to_string(log.path()).unwrap(), "[]");
}
