use std::path::Path;

use apigen_core::ParseError;
use apigen_core::ir::HttpMethod;
use apigen_core::parse;

const PETSTORE: &str = include_str!("fixtures/petstore.json");
const STUDENT: &str = include_str!("fixtures/student.yaml");

#[test]
fn parse_petstore_json() {
    let spec = parse::from_json(PETSTORE).expect("should parse petstore.json");
    assert_eq!(spec.swagger, "2.0");
    assert_eq!(spec.info.title, "Swagger Petstore");
    assert_eq!(spec.info.version, "1.0.0");
    assert_eq!(spec.host.as_deref(), Some("petstore.swagger.io"));
    assert_eq!(spec.base_path.as_deref(), Some("/v2"));
    assert_eq!(spec.paths.len(), 14);
    assert_eq!(spec.operation_count(), 20);

    let names: Vec<_> = spec.definitions.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["Order", "User", "Category", "Tag", "Pet"]);
}

#[test]
fn parse_student_yaml() {
    let spec = parse::from_yaml(STUDENT).expect("should parse student.yaml");
    assert_eq!(spec.paths.len(), 1);

    let item = &spec.paths["/students"];
    let methods: Vec<_> = item.operations.iter().map(|(m, _)| *m).collect();
    assert_eq!(methods, vec![HttpMethod::Get, HttpMethod::Post, HttpMethod::Put]);
    assert_eq!(
        item.operation(HttpMethod::Post)
            .and_then(|op| op.operation_id.as_deref()),
        Some("saveStudent")
    );

    let names: Vec<_> = spec.definitions.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec!["Student", "HttpResponse", "StudentUpdateCommand", "StudentSaveCommand"]
    );
}

#[test]
fn parse_keeps_unmodelled_keys() {
    let spec = parse::from_json(PETSTORE).unwrap();
    assert!(spec.extra.contains_key("externalDocs"));
    assert_eq!(spec.security_definitions.len(), 2);
    assert_eq!(
        spec.info.terms_of_service.as_deref(),
        Some("http://swagger.io/terms/")
    );
}

#[test]
fn parse_reserialize_is_stable() {
    let spec = parse::from_json(PETSTORE).unwrap();
    let json = serde_json::to_string(&spec).unwrap();
    let again = parse::from_json(&json).unwrap();
    assert_eq!(spec, again);
}

#[test]
fn parse_rejects_openapi_3() {
    let yaml = r#"
swagger: "3.0.0"
info:
  title: Test
  version: "1"
paths: {}
"#;
    match parse::from_yaml(yaml) {
        Err(ParseError::UnsupportedVersion(v)) => assert_eq!(v, "3.0.0"),
        other => panic!("expected UnsupportedVersion, got {other:?}"),
    }
}

#[test]
fn parse_from_path_picks_format_by_extension() {
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let json = parse::from_path(&fixtures.join("petstore.json")).unwrap();
    let yaml = parse::from_path(&fixtures.join("student.yaml")).unwrap();
    assert_eq!(json.info.title, "Swagger Petstore");
    assert_eq!(yaml.info.title, "Student API");

    assert!(matches!(
        parse::from_path(&fixtures.join("missing.yaml")),
        Err(ParseError::Read { .. })
    ));
}
