use std::fs;
use std::path::Path;

use notebook_cleaner_lib::{
    clean_document, clean_notebook,
    cleaner::rules::WIDGET_VIEW_MIME,
    core::{
        errors::AppError,
        types::{CleanOptions, ColabAction},
    },
    notebook::io,
};
use serde_json::{json, Value};
use tempfile::TempDir;

fn colab_notebook() -> Value {
    json!({
        "nbformat": 4,
        "nbformat_minor": 0,
        "metadata": {
            "colab": {"base_uri": "https://localhost:8080/", "name": "Chroma_vectordb.ipynb", "provenance": []},
            "kernelspec": {"name": "python3", "display_name": "Python 3"},
            "language_info": {"name": "python"},
            "widgets": {"application/vnd.jupyter.widget-state+json": {"abc": {}}}
        },
        "cells": [
            {
                "cell_type": "code",
                "metadata": {"colab": {"base_uri": "https://localhost:8080/"}, "id": "c1"},
                "source": ["import chromadb"],
                "outputs": [
                    {"output_type": "display_data", "data": {WIDGET_VIEW_MIME: {"model_id": "m1"}}, "metadata": {}},
                    {
                        "output_type": "display_data",
                        "data": {"text/plain": "Batches: 100%", WIDGET_VIEW_MIME: {"model_id": "m2"}},
                        "metadata": {}
                    },
                    {"output_type": "stream", "name": "stdout", "text": ["caf\u{e9}\n"]}
                ]
            },
            {
                "cell_type": "markdown",
                "metadata": {"widgets": {}},
                "source": ["# Vector search \u{1f50d}"]
            }
        ]
    })
}

fn write_fixture(dir: &Path, name: &str, value: &Value) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string(value).expect("serialize")).expect("write fixture");
    path
}

#[test]
fn cleans_in_place_and_writes_backup() {
    let dir = TempDir::new().expect("tempdir");
    let original = colab_notebook();
    let path = write_fixture(dir.path(), "Chroma_vectordb.ipynb", &original);

    let options = CleanOptions::new(&path).expect("options");
    let report = clean_notebook(&options).expect("clean should succeed");

    let cleaned = io::load_notebook(&path).expect("reload cleaned");
    assert_eq!(
        cleaned["metadata"],
        json!({
            "colab": {"name": "Chroma_vectordb.ipynb"},
            "kernelspec": {"name": "python3", "display_name": "Python 3"},
            "language_info": {"name": "python"}
        })
    );
    assert_eq!(cleaned["cells"][0]["metadata"], json!({"id": "c1"}));
    assert_eq!(cleaned["cells"][1]["metadata"], json!({}));
    assert_eq!(
        cleaned["cells"][0]["outputs"],
        json!([
            {"output_type": "display_data", "data": {"text/plain": "Batches: 100%"}, "metadata": {}},
            {"output_type": "stream", "name": "stdout", "text": ["caf\u{e9}\n"]}
        ])
    );

    let backup_path = dir.path().join("Chroma_vectordb.ipynb.backup");
    assert_eq!(report.backup_path.as_deref(), Some(backup_path.as_path()));
    let backup = io::load_notebook(&backup_path).expect("reload backup");
    assert_eq!(backup, original);

    assert_eq!(report.global_keys_removed, vec!["widgets".to_string()]);
    assert_eq!(report.colab_action, ColabAction::Reduced);
    assert_eq!(
        report.flagged_keys,
        vec!["kernelspec".to_string(), "language_info".to_string()]
    );
    assert_eq!(report.cell_metadata_keys_removed, 2);
    assert_eq!(report.widget_views_removed, 2);
    assert_eq!(report.outputs_dropped, 1);
    assert!(!report.dry_run);
}

#[test]
fn written_notebook_matches_in_memory_cleaning() {
    let dir = TempDir::new().expect("tempdir");
    let original = colab_notebook();
    let path = write_fixture(dir.path(), "nb.ipynb", &original);

    let mut expected = original.clone();
    clean_document(&mut expected);

    clean_notebook(&CleanOptions::new(&path).expect("options")).expect("clean");

    let cleaned = io::load_notebook(&path).expect("reload");
    assert_eq!(cleaned, expected);
}

#[test]
fn output_file_keeps_unicode_and_backup_escapes_it() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_fixture(dir.path(), "nb.ipynb", &colab_notebook());

    clean_notebook(&CleanOptions::new(&path).expect("options")).expect("clean");

    let cleaned_text = fs::read_to_string(&path).expect("read cleaned");
    assert!(cleaned_text.contains("caf\u{e9}"));
    assert!(cleaned_text.contains('\u{1f50d}'));
    assert!(cleaned_text.starts_with("{\n  \"nbformat\": 4,"));

    let backup_text = fs::read_to_string(dir.path().join("nb.ipynb.backup")).expect("read backup");
    assert!(backup_text.is_ascii());
    assert!(backup_text.contains("caf\\u00e9"));
    assert!(backup_text.contains("\\ud83d\\udd0d"));
}

#[test]
fn missing_notebook_fails_without_writing() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("absent.ipynb");

    let err = clean_notebook(&CleanOptions::new(&path).expect("options"))
        .expect_err("missing notebook should fail");

    match err {
        AppError::NotFound(message) => assert!(message.contains("absent.ipynb")),
        other => panic!("expected AppError::NotFound, got {other:?}"),
    }
    let entries = fs::read_dir(dir.path()).expect("read dir").count();
    assert_eq!(entries, 0);
}

#[test]
fn malformed_notebook_fails_before_backup() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("broken.ipynb");
    fs::write(&path, "not json").expect("write fixture");

    let err = clean_notebook(&CleanOptions::new(&path).expect("options"))
        .expect_err("malformed notebook should fail");

    assert_eq!(err.code(), "INVALID_JSON");
    assert!(!dir.path().join("broken.ipynb.backup").exists());
    assert_eq!(fs::read_to_string(&path).expect("read"), "not json");
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().expect("tempdir");
    let original = colab_notebook();
    let path = write_fixture(dir.path(), "nb.ipynb", &original);
    let before = fs::read_to_string(&path).expect("read");

    let options = CleanOptions::new(&path).expect("options").dry_run(true);
    let report = clean_notebook(&options).expect("dry run");

    assert!(report.dry_run);
    assert!(report.backup_path.is_none());
    assert_eq!(report.widget_views_removed, 2);
    assert_eq!(fs::read_to_string(&path).expect("read"), before);
    assert!(!dir.path().join("nb.ipynb.backup").exists());
}

#[test]
fn clean_notebook_still_writes_backup_when_nothing_changes() {
    let dir = TempDir::new().expect("tempdir");
    let original = json!({"metadata": {"kernelspec": {"name": "python3"}}, "cells": []});
    let path = write_fixture(dir.path(), "plain.ipynb", &original);

    let report = clean_notebook(&CleanOptions::new(&path).expect("options")).expect("clean");

    assert!(report.is_noop());
    assert_eq!(io::load_notebook(&path).expect("reload"), original);
    assert!(dir.path().join("plain.ipynb.backup").exists());
}

#[test]
fn report_serializes_in_camel_case() {
    let mut notebook = json!({"metadata": {"widgets": {}}});
    let report = clean_document(&mut notebook);

    let value = serde_json::to_value(&report).expect("serialize report");
    assert_eq!(value["globalKeysRemoved"], json!(["widgets"]));
    assert_eq!(value["colabAction"], json!("absent"));
    assert_eq!(value["outputsDropped"], json!(0));
}

#[test]
fn large_integers_in_untouched_output_survive_exactly() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("big.ipynb");
    fs::write(
        &path,
        r#"{"cells":[{"outputs":[{"data":{"application/json":{"id":123456789012345678901234567890,"ratio":0.10}}}]}]}"#,
    )
    .expect("write fixture");

    clean_notebook(&CleanOptions::new(&path).expect("options")).expect("clean");

    let cleaned = fs::read_to_string(&path).expect("read cleaned");
    assert!(cleaned.contains("\"id\": 123456789012345678901234567890"));
    assert!(cleaned.contains("\"ratio\": 0.10"));
    let backup = fs::read_to_string(dir.path().join("big.ipynb.backup")).expect("read backup");
    assert!(backup.contains("\"id\": 123456789012345678901234567890"));
}
