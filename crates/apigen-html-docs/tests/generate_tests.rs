use std::fs;
use std::sync::Arc;

use apigen_core::{GenerationOptions, Generator, parse};
use apigen_html_docs::HtmlDocsProfile;
use indexmap::IndexMap;

const PETSTORE: &str = include_str!("../../apigen-core/tests/fixtures/petstore.json");
const STUDENT: &str = include_str!("../../apigen-core/tests/fixtures/student.yaml");

fn generator(spec: &str, out: &std::path::Path, options: GenerationOptions) -> Generator {
    Generator::configure(
        parse::from_json(spec).unwrap(),
        Some(Arc::new(HtmlDocsProfile)),
        Some(out.to_path_buf()),
        options,
    )
    .unwrap()
}

#[test]
fn petstore_index_html_is_the_only_file() {
    let tmp = tempfile::tempdir().unwrap();
    let manifest = generator(PETSTORE, tmp.path(), GenerationOptions::default())
        .generate()
        .unwrap();

    assert_eq!(manifest.paths().collect::<Vec<_>>(), vec!["index.html"]);
    let index = tmp.path().join("index.html");
    assert!(index.is_file());
    assert_eq!(index.extension().and_then(|e| e.to_str()), Some("html"));

    let html = fs::read_to_string(index).unwrap();
    assert!(html.contains("<title>Swagger Petstore</title>"));
    assert!(html.contains("id=\"getPetById\""));
    assert!(html.contains("<span class=\"method\">DELETE</span>"));
    assert!(html.contains("id=\"model-Pet\""));
}

#[test]
fn text_from_the_document_is_escaped() {
    let tmp = tempfile::tempdir().unwrap();
    let mut properties = IndexMap::new();
    properties.insert("appName".to_string(), serde_json::json!("Pets <beta> & co"));
    generator(
        PETSTORE,
        tmp.path(),
        GenerationOptions {
            properties,
            ..GenerationOptions::default()
        },
    )
    .generate()
    .unwrap();

    let html = fs::read_to_string(tmp.path().join("index.html")).unwrap();
    assert!(html.contains("<h1>Pets &lt;beta&gt; &amp; co</h1>"));
    assert!(!html.contains("<beta>"));
}

#[test]
fn student_alternates_are_documented() {
    let tmp = tempfile::tempdir().unwrap();
    Generator::configure(
        parse::from_yaml(STUDENT).unwrap(),
        Some(Arc::new(HtmlDocsProfile)),
        Some(tmp.path().to_path_buf()),
        GenerationOptions::default(),
    )
    .unwrap()
    .generate()
    .unwrap();

    let html = fs::read_to_string(tmp.path().join("index.html")).unwrap();
    for id in ["getStudents", "saveStudent", "updateStudent"] {
        assert!(html.contains(&format!("id=\"{id}\"")), "{id} missing");
    }
}
