//! End-to-end editing flows: webview message in, document text out.

use pretty_assertions::assert_eq;
use serde_json::json;
use vsix_manifest_editor::{
    file_picker_result, HostMessage, ManifestFile, ManifestSession, SessionAction, WebviewMessage,
};

const MANIFEST: &str = r#"{
    "name": "my-ext",
    "version": "0.0.1",
    "publisher": "acme",
    "engines": {
        "vscode": "^1.85.0"
    },
    "preview": true
}
"#;

fn message(value: serde_json::Value) -> WebviewMessage {
    serde_json::from_value(value).expect("valid webview message")
}

fn replaced(action: SessionAction) -> String {
    match action {
        SessionAction::ReplaceDocument(text) => text,
        other => panic!("expected document replacement, got {:?}", other),
    }
}

#[test]
fn form_edit_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = ManifestFile::new(dir.path().join("package.json"));
    file.replace(MANIFEST).unwrap();

    let mut session = ManifestSession::default();
    let text = file.read().unwrap();
    let ready = session.handle(WebviewMessage::Ready, &text);
    let SessionAction::Post(HostMessage::Update { validation, .. }) = ready else {
        panic!("expected update");
    };
    assert!(validation.valid, "errors: {:?}", validation.errors);

    let edit = message(json!({
        "type": "updateManifest",
        "updates": { "displayName": "My Extension" },
        "remove": ["preview"]
    }));
    let new_text = replaced(session.handle(edit, &text));
    file.replace(&new_text).unwrap();

    let expected = r#"{
    "name": "my-ext",
    "version": "0.0.1",
    "publisher": "acme",
    "engines": {
        "vscode": "^1.85.0"
    },
    "displayName": "My Extension"
}
"#;
    assert_eq!(file.read().unwrap(), expected);
}

#[test]
fn picked_icon_becomes_field_update() {
    let dir = tempfile::tempdir().unwrap();
    let file = ManifestFile::new(dir.path().join("package.json"));
    file.replace(MANIFEST).unwrap();

    let mut session = ManifestSession::default();
    let text = file.read().unwrap();
    session.on_text_changed(&text);

    let picked = dir.path().join("images").join("icon.png");
    let HostMessage::FilePickerResult { field, path } =
        file_picker_result("icon", file.base_dir(), &picked)
    else {
        panic!("expected file picker result");
    };
    assert_eq!(path, "./images/icon.png");

    let edit = message(json!({ "type": "updateManifest", "updates": { field: path } }));
    let new_text = replaced(session.handle(edit, &text));
    assert!(new_text.contains("\n    \"icon\": \"./images/icon.png\"\n"));
}

#[test]
fn raw_edit_then_refresh_reports_parse_error() {
    let mut session = ManifestSession::default();
    session.on_text_changed(MANIFEST);

    let broken = "{\n    \"name\": \"my-ext\",\n";
    let edit = message(json!({ "type": "edit", "content": broken }));
    let text = replaced(session.handle(edit, MANIFEST));

    match session.on_text_changed(&text) {
        HostMessage::ParseError { line, .. } => assert!(line.is_some()),
        other => panic!("expected parse error, got {:?}", other),
    }

    let init = session.handle(WebviewMessage::InitializeAsExtension, &text);
    assert!(matches!(init, SessionAction::ShowError(ref m) if m.starts_with("Cannot initialize: ")));
}

#[test]
fn host_messages_serialize_for_webview() {
    let mut session = ManifestSession::default();
    let msg = session.on_text_changed(MANIFEST);
    let value = serde_json::to_value(&msg).unwrap();

    assert_eq!(value["type"], "update");
    assert_eq!(value["content"], MANIFEST);
    assert_eq!(value["manifest"]["name"], "my-ext");
    assert_eq!(value["detection"]["isExtension"], true);
    assert_eq!(value["validation"]["valid"], true);
}
