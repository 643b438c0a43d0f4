use apigen_core::{OutputCategory, TargetProfile};
use indexmap::IndexMap;
use log::debug;
use serde_json::{Value, json};

/// A single self-contained `index.html` describing every operation and model.
/// The template is auto-escaped because of its `.html.j2` name.
pub struct HtmlDocsProfile;

impl TargetProfile for HtmlDocsProfile {
    fn id(&self) -> &'static str {
        "doc-site"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["html", "html-docs"]
    }

    fn description(&self) -> &'static str {
        "Static single-page HTML API reference"
    }

    fn categories(&self) -> Vec<OutputCategory> {
        vec![OutputCategory::supporting("index.html", "index.html.j2")]
    }

    fn templates(&self) -> Vec<(&'static str, &'static str)> {
        vec![("index.html.j2", include_str!("../templates/index.html.j2"))]
    }

    fn properties(&self, overrides: &IndexMap<String, Value>) -> IndexMap<String, Value> {
        let mut props = IndexMap::new();
        props.insert("appName".to_string(), json!(""));
        props.insert("infoEmail".to_string(), json!(""));
        props.insert("licenseInfo".to_string(), json!(""));
        for (key, value) in overrides {
            props.insert(key.clone(), value.clone());
        }
        if props.get("appName").and_then(Value::as_str).is_some_and(|s| !s.is_empty()) {
            debug!("Documentation titled {}", props["appName"]);
        }
        props
    }
}
