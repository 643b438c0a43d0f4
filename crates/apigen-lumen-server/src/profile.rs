use apigen_core::ir::TypeRef;
use apigen_core::{OutputCategory, TargetProfile};
use indexmap::IndexMap;
use log::debug;
use minijinja::Environment;
use serde_json::{Value, json};

use crate::type_mapper::{php_var, type_ref_to_php};

/// Lumen server stub under `lib/`: one controller per operation group, a
/// route for every operation, and the composer project around them.
pub struct LumenServerProfile;

impl TargetProfile for LumenServerProfile {
    fn id(&self) -> &'static str {
        "framework-server"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["lumen", "lumen-server"]
    }

    fn description(&self) -> &'static str {
        "PHP Lumen server stub with controllers and routes"
    }

    fn categories(&self) -> Vec<OutputCategory> {
        vec![
            OutputCategory::per_operation_group(
                "{{ srcBasePath }}/app/Http/Controllers/{{ group.name.pascal_case }}Api.php",
                "api.php.j2",
            ),
            OutputCategory::supporting(
                "{{ srcBasePath }}/app/Http/Controllers/Controller.php",
                "Controller.php.j2",
            ),
            OutputCategory::supporting("{{ srcBasePath }}/app/Http/routes.php", "routes.php.j2"),
            OutputCategory::supporting("{{ srcBasePath }}/bootstrap/app.php", "app.php.j2"),
            OutputCategory::supporting("{{ srcBasePath }}/public/index.php", "index.php.j2"),
            OutputCategory::supporting("{{ srcBasePath }}/composer.json", "composer.json.j2"),
            OutputCategory::supporting("{{ srcBasePath }}/readme.md", "readme.md.j2"),
        ]
    }

    fn templates(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("api.php.j2", include_str!("../templates/api.php.j2")),
            ("Controller.php.j2", include_str!("../templates/Controller.php.j2")),
            ("routes.php.j2", include_str!("../templates/routes.php.j2")),
            ("app.php.j2", include_str!("../templates/app.php.j2")),
            ("index.php.j2", include_str!("../templates/index.php.j2")),
            ("composer.json.j2", include_str!("../templates/composer.json.j2")),
            ("readme.md.j2", include_str!("../templates/readme.md.j2")),
        ]
    }

    fn properties(&self, overrides: &IndexMap<String, Value>) -> IndexMap<String, Value> {
        let mut props: IndexMap<String, Value> = IndexMap::new();
        props.insert("srcBasePath".to_string(), json!("lib"));
        props.insert("composerVendorName".to_string(), json!("swagger"));
        props.insert("composerProjectName".to_string(), json!("lumen-server"));
        props.insert("lumenVersion".to_string(), json!("5.2.*"));
        for (key, value) in overrides {
            props.insert(key.clone(), value.clone());
        }
        debug!(
            "Lumen {} project under {}",
            props["lumenVersion"], props["srcBasePath"]
        );
        props
    }

    fn map_type(&self, ty: &TypeRef) -> String {
        type_ref_to_php(ty)
    }

    fn configure_environment(&self, env: &mut Environment<'static>) {
        env.add_filter("php_var", php_var);
    }
}
