use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use log::debug;

use apigen_core::config::{self, ApigenConfig, CONFIG_FILE_NAME, GroupBy, OverwritePolicy};
use apigen_core::ir::CodegenModel;
use apigen_core::ir::grouping::group_operations;
use apigen_core::parse;
use apigen_core::{GenerationOptions, Generator, ProfileRegistry, WriteOutcome};
use apigen_html_docs::HtmlDocsProfile;
use apigen_java_client::JavaClientProfile;
use apigen_lumen_server::LumenServerProfile;
use apigen_spec_echo::{SpecEchoProfile, SpecEchoYamlProfile};

#[derive(Parser)]
#[command(name = "apigen", about = "Swagger 2.0 code generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate code from a Swagger spec
    Generate {
        /// Path to the Swagger spec file (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target profile, e.g. language-client or doc-site
        #[arg(short, long)]
        profile: Option<String>,

        /// Directory of templates replacing built-ins with the same name
        #[arg(short, long)]
        template_dir: Option<PathBuf>,

        /// Leave files that already exist untouched
        #[arg(long)]
        skip_existing: bool,

        /// How operations are grouped into per-group files
        #[arg(long)]
        group_by: Option<GroupByArg>,

        /// Template property as key=value, may be repeated
        #[arg(short = 'D', long = "property", value_parser = parse_property)]
        properties: Vec<(String, String)>,
    },

    /// Validate a Swagger spec
    Validate {
        /// Path to the Swagger spec file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Inspect the collated operation model of a Swagger spec
    Inspect {
        /// Path to the Swagger spec file
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,

        /// Grouping to report, defaults to the config's `group_by`
        #[arg(long)]
        group_by: Option<GroupByArg>,
    },

    /// List the available target profiles
    Profiles,

    /// Initialize a new apigen configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum GroupByArg {
    Tag,
    Route,
    Operation,
}

impl From<GroupByArg> for GroupBy {
    fn from(arg: GroupByArg) -> Self {
        match arg {
            GroupByArg::Tag => GroupBy::Tag,
            GroupByArg::Route => GroupBy::Route,
            GroupByArg::Operation => GroupBy::Operation,
        }
    }
}

fn parse_property(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got `{raw}`")),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            profile,
            template_dir,
            skip_existing,
            group_by,
            properties,
        } => {
            let mut cfg = try_load_config()?.unwrap_or_default();
            if let Some(output) = output {
                cfg.output = output.to_string_lossy().into_owned();
            }
            if let Some(profile) = profile {
                cfg.profile = profile;
            }
            if template_dir.is_some() {
                cfg.template_dir = template_dir;
            }
            if skip_existing {
                cfg.overwrite = OverwritePolicy::SkipExisting;
            }
            if let Some(group_by) = group_by {
                cfg.group_by = group_by.into();
            }
            for (key, value) in properties {
                cfg.properties.insert(key, serde_json::Value::String(value));
            }
            let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
            cmd_generate(&input, &cfg)
        }

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect {
            input,
            format,
            group_by,
        } => {
            let group_by = match group_by {
                Some(arg) => arg.into(),
                None => try_load_config()?.unwrap_or_default().group_by,
            };
            cmd_inspect(input, format, group_by)
        }

        Commands::Profiles => {
            for profile in builtin_profiles().profiles() {
                let aliases = profile.aliases().join(", ");
                if aliases.is_empty() {
                    println!("{:<18} {}", profile.id(), profile.description());
                } else {
                    println!("{:<18} {} (aliases: {aliases})", profile.id(), profile.description());
                }
            }
            Ok(())
        }

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "apigen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Every profile shipped with the CLI.
fn builtin_profiles() -> ProfileRegistry {
    let mut registry = ProfileRegistry::new();
    registry
        .register(JavaClientProfile)
        .register(LumenServerProfile)
        .register(HtmlDocsProfile)
        .register(SpecEchoProfile)
        .register(SpecEchoYamlProfile);
    registry
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<ApigenConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    Ok(config::load_config(&config_path)?)
}

fn cmd_generate(input: &Path, cfg: &ApigenConfig) -> Result<()> {
    let spec = parse::from_path(input)?;
    let profile = builtin_profiles().resolve(&cfg.profile)?;
    debug!("Resolved profile {:?}", profile);

    eprintln!("Generating {} → {}", profile.id(), cfg.output);
    let generator = Generator::configure(
        spec,
        Some(profile),
        Some(PathBuf::from(&cfg.output)),
        GenerationOptions::from(cfg),
    )?;
    let manifest = generator
        .generate()
        .with_context(|| format!("generation from {} failed", input.display()))?;

    for entry in manifest.entries() {
        match entry.outcome {
            WriteOutcome::Written => eprintln!("  wrote {}", entry.path),
            WriteOutcome::Skipped => eprintln!("  kept  {}", entry.path),
        }
    }
    eprintln!(
        "Generated {} files in {} ({} kept)",
        manifest.written().count(),
        generator.output_dir().display(),
        manifest.skipped().count()
    );
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let parsed = parse::from_path(&input)?;

    eprintln!("Valid Swagger {} spec: {}", parsed.swagger, parsed.info.title);
    eprintln!("  Version: {}", parsed.info.version);
    eprintln!("  Paths: {}", parsed.paths.len());
    eprintln!("  Definitions: {}", parsed.definitions.len());

    // Also check that every reference resolves
    let model = codegen_model(parsed)?;
    let operations: usize = model.operations.values().map(|op| op.operation_count()).sum();
    eprintln!("  Operations: {operations}");
    eprintln!("  Models: {}", model.models.len());

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat, group_by: GroupBy) -> Result<()> {
    let model = codegen_model(parse::from_path(&input)?)?;
    let summary = build_inspect_summary(&model, group_by);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

/// Build the model without writing anything; the profile only matters for output.
fn codegen_model(spec: parse::spec::SpecDocument) -> Result<CodegenModel> {
    let generator = Generator::configure(
        spec,
        Some(builtin_profiles().resolve("spec-echo")?),
        Some(PathBuf::from(".")),
        GenerationOptions::default(),
    )?;
    Ok(generator.build_codegen_model()?)
}

fn build_inspect_summary(model: &CodegenModel, group_by: GroupBy) -> serde_json::Value {
    let operations: Vec<serde_json::Value> = model
        .operations
        .values()
        .map(|op| {
            serde_json::json!({
                "path": op.path,
                "name": op.name.camel_case,
                "methods": op.methods().iter().map(|m| m.as_str()).collect::<Vec<_>>(),
                "alternates": op
                    .alternates
                    .iter()
                    .map(|a| serde_json::json!({
                        "method": a.method.as_str(),
                        "name": a.declared_name().camel_case,
                    }))
                    .collect::<Vec<_>>(),
                "tags": op.primary.tags,
            })
        })
        .collect();

    let models: Vec<serde_json::Value> = model
        .models
        .values()
        .map(|m| {
            serde_json::json!({
                "name": m.name.pascal_case,
                "kind": if m.is_enum() { "enum" } else { "object" },
                "fields": m.fields.len(),
            })
        })
        .collect();

    let groups: Vec<String> = group_operations(&model.operations, group_by)
        .into_iter()
        .map(|g| g.name.original)
        .collect();

    serde_json::json!({
        "info": {
            "title": model.info.title,
            "version": model.info.version,
            "base_url": model.info.base_url(),
        },
        "operations": operations,
        "models": models,
        "groups": groups,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const STUDENT: &str = include_str!("../../apigen-core/tests/fixtures/student.yaml");

    #[test]
    fn test_parse_property() {
        assert_eq!(
            parse_property("invokerPackage=com.acme").unwrap(),
            ("invokerPackage".to_string(), "com.acme".to_string())
        );
        assert_eq!(parse_property("empty=").unwrap().1, "");
        assert!(parse_property("novalue").is_err());
        assert!(parse_property("=x").is_err());
    }

    #[test]
    fn test_builtin_selectors_resolve() {
        let registry = builtin_profiles();
        for selector in ["language-client", "framework-server", "doc-site", "spec-echo", "java"] {
            assert!(registry.resolve(selector).is_ok(), "{selector}");
        }
        assert!(registry.resolve("cobol-client").is_err());
    }

    #[test]
    fn test_inspect_summary_lists_alternates() {
        let model = codegen_model(parse::from_yaml(STUDENT).unwrap()).unwrap();
        let summary = build_inspect_summary(&model, GroupBy::Tag);
        assert_eq!(summary["operations"][0]["path"], "/students");
        assert_eq!(
            summary["operations"][0]["methods"],
            serde_json::json!(["GET", "POST", "PUT"])
        );
        assert_eq!(summary["groups"], serde_json::json!(["student"]));
    }

    #[test]
    fn test_inspect_alternates_carry_method_and_declared_name() {
        let yaml = STUDENT.replace("      operationId: saveStudent\n", "");
        let model = codegen_model(parse::from_yaml(&yaml).unwrap()).unwrap();
        let summary = build_inspect_summary(&model, GroupBy::Route);
        assert_eq!(
            summary["operations"][0]["alternates"],
            serde_json::json!([
                {"method": "POST", "name": "studentsPost"},
                {"method": "PUT", "name": "updateStudent"},
            ])
        );
        assert_eq!(summary["groups"], serde_json::json!(["students"]));
    }
}
