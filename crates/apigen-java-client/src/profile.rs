use apigen_core::ir::TypeRef;
use apigen_core::{OutputCategory, TargetProfile};
use indexmap::IndexMap;
use log::debug;
use minijinja::Environment;
use serde_json::{Value, json};

use crate::type_mapper::{escape_javadoc, java_enum_constant, java_ident, type_ref_to_java};

const DEFAULT_INVOKER_PACKAGE: &str = "io.swagger.client";

/// Java client: one class per model, one `*Api` class per operation group,
/// plus `ApiClient`, Maven and Gradle builds.
pub struct JavaClientProfile;

impl TargetProfile for JavaClientProfile {
    fn id(&self) -> &'static str {
        "language-client"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["java", "java-client"]
    }

    fn description(&self) -> &'static str {
        "Java client library with model and api classes, Maven and Gradle builds"
    }

    fn categories(&self) -> Vec<OutputCategory> {
        vec![
            OutputCategory::per_model(
                "src/main/java/{{ modelPackagePath }}/{{ model.name.pascal_case }}.java",
                "model.java.j2",
            ),
            OutputCategory::per_operation_group(
                "src/main/java/{{ apiPackagePath }}/{{ group.name.pascal_case }}Api.java",
                "api.java.j2",
            ),
            OutputCategory::supporting(
                "src/main/java/{{ invokerPackagePath }}/ApiClient.java",
                "ApiClient.java.j2",
            ),
            OutputCategory::supporting(
                "src/main/java/{{ invokerPackagePath }}/ApiException.java",
                "ApiException.java.j2",
            ),
            OutputCategory::supporting("pom.xml", "pom.xml.j2"),
            OutputCategory::supporting("build.gradle", "build.gradle.j2"),
            OutputCategory::supporting("README.md", "README.md.j2"),
        ]
    }

    fn templates(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("model.java.j2", include_str!("../templates/model.java.j2")),
            ("api.java.j2", include_str!("../templates/api.java.j2")),
            ("ApiClient.java.j2", include_str!("../templates/ApiClient.java.j2")),
            ("ApiException.java.j2", include_str!("../templates/ApiException.java.j2")),
            ("pom.xml.j2", include_str!("../templates/pom.xml.j2")),
            ("build.gradle.j2", include_str!("../templates/build.gradle.j2")),
            ("README.md.j2", include_str!("../templates/README.md.j2")),
        ]
    }

    /// Package names default from `invokerPackage`; each package also gets a
    /// `...Path` property with `/` separators for output paths.
    fn properties(&self, overrides: &IndexMap<String, Value>) -> IndexMap<String, Value> {
        let mut props: IndexMap<String, Value> = IndexMap::new();
        props.insert("invokerPackage".to_string(), json!(DEFAULT_INVOKER_PACKAGE));
        props.insert("groupId".to_string(), json!("io.swagger"));
        props.insert("artifactId".to_string(), json!("swagger-java-client"));
        props.insert("artifactVersion".to_string(), json!("1.0.0"));
        for (key, value) in overrides {
            props.insert(key.clone(), value.clone());
        }

        let invoker = props
            .get("invokerPackage")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_INVOKER_PACKAGE)
            .to_string();
        for (key, suffix) in [("modelPackage", "model"), ("apiPackage", "api")] {
            if !props.contains_key(key) {
                props.insert(key.to_string(), json!(format!("{invoker}.{suffix}")));
            }
        }
        for key in ["invokerPackage", "modelPackage", "apiPackage"] {
            let path = props
                .get(key)
                .and_then(Value::as_str)
                .map(|pkg| pkg.replace('.', "/"))
                .unwrap_or_default();
            props.insert(format!("{key}Path"), json!(path));
        }
        debug!(
            "Java packages: invoker {}, model {}, api {}",
            props["invokerPackage"], props["modelPackage"], props["apiPackage"]
        );
        props
    }

    fn map_type(&self, ty: &TypeRef) -> String {
        type_ref_to_java(ty)
    }

    fn configure_environment(&self, env: &mut Environment<'static>) {
        env.add_filter("java_ident", java_ident);
        env.add_filter("java_enum_constant", java_enum_constant);
        env.add_filter("escape_javadoc", escape_javadoc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_packages() {
        let props = JavaClientProfile.properties(&IndexMap::new());
        assert_eq!(props["invokerPackage"], "io.swagger.client");
        assert_eq!(props["modelPackage"], "io.swagger.client.model");
        assert_eq!(props["apiPackagePath"], "io/swagger/client/api");
    }

    #[test]
    fn test_invoker_package_override_moves_subpackages() {
        let mut overrides = IndexMap::new();
        overrides.insert("invokerPackage".to_string(), json!("com.acme.students"));
        let props = JavaClientProfile.properties(&overrides);
        assert_eq!(props["modelPackage"], "com.acme.students.model");
        assert_eq!(props["modelPackagePath"], "com/acme/students/model");
        assert_eq!(props["artifactId"], "swagger-java-client");
    }

    #[test]
    fn test_explicit_model_package_wins() {
        let mut overrides = IndexMap::new();
        overrides.insert("modelPackage".to_string(), json!("com.acme.dto"));
        let props = JavaClientProfile.properties(&overrides);
        assert_eq!(props["modelPackagePath"], "com/acme/dto");
        assert_eq!(props["apiPackage"], "io.swagger.client.api");
    }

    #[test]
    fn test_every_category_template_is_embedded() {
        let names: Vec<_> = JavaClientProfile.templates().iter().map(|(n, _)| *n).collect();
        for category in JavaClientProfile.categories() {
            assert!(names.contains(&category.template.as_str()), "{}", category.template);
        }
    }
}
