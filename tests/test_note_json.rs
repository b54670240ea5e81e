use anyhow::Result;
use notekeep::domain::{Folder, Note, Template};

fn sample_note() -> Note {
    Note {
        id: "1712345678901".to_string(),
        title: "Test title".to_string(),
        content: "Test content".to_string(),
        tags: vec!["tag1".to_string(), "tag2".to_string()],
        folder_id: Some("f1".to_string()),
        created_at: 1712345678901,
        updated_at: 1712345679000,
    }
}

#[test]
fn given_note_when_serializing_to_json_then_uses_camel_case_fields() -> Result<()> {
    // Arrange
    let note = sample_note();

    // Act
    let json = serde_json::to_string_pretty(&note)?;

    // Assert
    assert!(json.contains(r#""id": "1712345678901""#));
    assert!(json.contains(r#""folderId": "f1""#));
    assert!(json.contains(r#""createdAt": 1712345678901"#));
    assert!(json.contains(r#""updatedAt": 1712345679000"#));
    assert!(json.contains(r#""tags": ["#));
    assert!(!json.contains("folder_id"));
    Ok(())
}

#[test]
fn given_note_without_folder_when_serializing_then_folder_id_is_null() -> Result<()> {
    let note = Note {
        folder_id: None,
        ..sample_note()
    };

    let json = serde_json::to_string(&note)?;

    assert!(json.contains(r#""folderId":null"#));
    Ok(())
}

#[test]
fn given_browser_snapshot_when_deserializing_then_reads_all_fields() -> Result<()> {
    // Arrange: the layout written by the browser version of the app
    let raw = r#"[{"id":"1","title":"T","content":"C","tags":["a"],"folderId":null,"createdAt":1,"updatedAt":2}]"#;

    // Act
    let notes: Vec<Note> = serde_json::from_str(raw)?;

    // Assert
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].tags, vec!["a".to_string()]);
    assert_eq!(notes[0].folder_id, None);
    assert_eq!(notes[0].updated_at, 2);
    Ok(())
}

#[test]
fn given_folder_and_template_when_serializing_then_match_stored_layout() -> Result<()> {
    let folder = Folder {
        id: "f2".to_string(),
        name: "Child".to_string(),
        parent_id: Some("f1".to_string()),
    };
    let template = Template {
        id: "t1".to_string(),
        name: "Daily".to_string(),
        content: "- [ ]".to_string(),
    };

    let folder_json = serde_json::to_string(&folder)?;
    let template_json = serde_json::to_string(&template)?;

    assert_eq!(folder_json, r#"{"id":"f2","name":"Child","parentId":"f1"}"#);
    assert_eq!(template_json, r#"{"id":"t1","name":"Daily","content":"- [ ]"}"#);
    Ok(())
}
