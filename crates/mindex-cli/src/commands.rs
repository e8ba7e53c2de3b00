use anyhow::{anyhow, Context};
use colored::Colorize;
use mindex_codec::{EncodedRecord, RecordCompactor, RecordExpander};
use mindex_record::Record;
use mindex_resource::{PathResourceHandler, WritableResourceHandler};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::*;
use crate::config::CliConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = effective_config(&cli)?;
    let handler = PathResourceHandler::new(&config.base_dir);
    debug!(base_dir = %config.base_dir.display(), "resolved resource base");
    match cli.command {
        Command::Compact(args) => cmd_compact(&handler, &config, args),
        Command::Expand(args) => cmd_expand(&handler, &config, args),
        Command::ShowConfig => cmd_show_config(&config),
    }
}

/// Defaults, then the config file, then command-line flags.
fn effective_config(cli: &Cli) -> anyhow::Result<CliConfig> {
    let mut config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    if let Some(base_dir) = &cli.base_dir {
        config.base_dir = base_dir.clone();
    }
    config.pretty |= cli.pretty;
    Ok(config)
}

fn cmd_compact(
    handler: &dyn WritableResourceHandler,
    config: &CliConfig,
    args: CompactArgs,
) -> anyhow::Result<()> {
    let mut compactor_config = config.compactor_config();
    compactor_config.validate_identity |= args.strict;

    let records: Vec<Record> = read_json(handler, &args.input)?;
    let encoded = compact_all(&RecordCompactor::with_config(compactor_config), &records)?;
    info!(count = encoded.len(), input = %args.input, "compacted records");
    emit(handler, args.output.as_deref(), &encoded, config.pretty)
}

fn cmd_expand(
    handler: &dyn WritableResourceHandler,
    config: &CliConfig,
    args: ExpandArgs,
) -> anyhow::Result<()> {
    let encoded: Vec<EncodedRecord> = read_json(handler, &args.input)?;
    let records = expand_all(&encoded)?;
    info!(count = records.len(), input = %args.input, "expanded records");
    emit(handler, args.output.as_deref(), &records, config.pretty)
}

fn cmd_show_config(config: &CliConfig) -> anyhow::Result<()> {
    println!("{}", "Effective configuration".bold());
    print!("{}", config.to_toml()?);
    Ok(())
}

pub(crate) fn compact_all(
    compactor: &RecordCompactor,
    records: &[Record],
) -> anyhow::Result<Vec<EncodedRecord>> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            compactor
                .compact(record)
                .with_context(|| format!("compacting record #{i}"))
        })
        .collect()
}

pub(crate) fn expand_all(encoded: &[EncodedRecord]) -> anyhow::Result<Vec<Record>> {
    encoded
        .iter()
        .enumerate()
        .map(|(i, map)| RecordExpander::expand(map).with_context(|| format!("expanding record #{i}")))
        .collect()
}

fn read_json<T: DeserializeOwned>(
    handler: &dyn WritableResourceHandler,
    name: &str,
) -> anyhow::Result<T> {
    let data = handler
        .locate(name)?
        .read_bytes()?
        .ok_or_else(|| anyhow!("resource not found: {name}"))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing {name}"))
}

/// Write `items` as JSON to the named resource, or to stdout without one.
fn emit<T: Serialize>(
    handler: &dyn WritableResourceHandler,
    output: Option<&str>,
    items: &[T],
    pretty: bool,
) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(items)?
    } else {
        serde_json::to_string(items)?
    };
    match output {
        Some(name) => {
            handler.locate_writable(name)?.write_bytes(json.as_bytes())?;
            println!("{} Wrote {} records to {}", "✓".green().bold(), items.len(), name.bold());
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindex_resource::InMemoryResourceHandler;

    const RECORDS: &str = r#"[
        {"type": "DESCRIPTOR", "fields": {"repositoryId": "central"}},
        {"type": "ALL_GROUPS", "fields": {"allGroups": ["org.foo", "org.bar"]}},
        {"type": "ARTIFACT_REMOVE", "fields": {
            "groupId": "g", "artifactId": "a", "version": "1.0", "recordModified": 1000}},
        {"type": "ARTIFACT_ADD", "fields": {
            "groupId": "g", "artifactId": "a", "version": "1.0",
            "classifier": "sources", "fileExtension": "jar", "packaging": "jar",
            "fileModified": 2000, "fileSize": 500,
            "hasSources": true, "hasJavadoc": false, "hasSignature": false}}
    ]"#;

    fn config() -> CliConfig {
        CliConfig::default()
    }

    #[test]
    fn compact_writes_encoded_records() {
        let handler = InMemoryResourceHandler::new();
        handler.insert("records.json", RECORDS);
        let args = CompactArgs {
            input: "records.json".into(),
            output: Some("chunk.json".into()),
            strict: false,
        };
        cmd_compact(&handler, &config(), args).unwrap();

        let written: Vec<EncodedRecord> =
            serde_json::from_slice(&handler.get("chunk.json").unwrap()).unwrap();
        assert_eq!(written.len(), 4);
        assert_eq!(written[0]["IDXINFO"], "1.0|central");
        assert_eq!(written[1]["allGroupsList"], "org.foo|org.bar");
        assert_eq!(written[2]["del"], "g|a|1.0|");
        assert_eq!(written[2]["m"], "1000");
        assert_eq!(written[3]["u"], "g|a|1.0|sources|jar");
        assert_eq!(written[3]["i"], "jar|2000|500|1|0|0|jar");
    }

    #[test]
    fn expand_reverses_compact() {
        let handler = InMemoryResourceHandler::new();
        handler.insert("records.json", RECORDS);
        cmd_compact(
            &handler,
            &config(),
            CompactArgs { input: "records.json".into(), output: Some("chunk.json".into()), strict: false },
        )
        .unwrap();
        cmd_expand(
            &handler,
            &config(),
            ExpandArgs { input: "chunk.json".into(), output: Some("back.json".into()) },
        )
        .unwrap();

        let original: Vec<Record> = serde_json::from_str(RECORDS).unwrap();
        let restored: Vec<Record> =
            serde_json::from_slice(&handler.get("back.json").unwrap()).unwrap();
        assert_eq!(restored.len(), original.len());
        for (before, after) in original.iter().zip(&restored) {
            assert_eq!(before.record_type(), after.record_type());
            for (name, value) in before.fields() {
                assert_eq!(after.fields().get(name), Some(value), "field {name}");
            }
        }
    }

    #[test]
    fn strict_mode_reports_record_index() {
        let handler = InMemoryResourceHandler::new();
        handler.insert(
            "records.json",
            r#"[{"type": "DESCRIPTOR"}, {"type": "ARTIFACT_ADD", "fields": {"groupId": "g"}}]"#,
        );
        let strict = CliConfig { strict_identity: true, ..CliConfig::default() };
        let args = CompactArgs { input: "records.json".into(), output: Some("out".into()), strict: false };
        let err = cmd_compact(&handler, &strict, args).unwrap_err();
        assert!(format!("{err:#}").contains("record #1"));
        assert!(handler.get("out").is_none());
    }

    #[test]
    fn missing_input_is_reported() {
        let handler = InMemoryResourceHandler::new();
        let args = ExpandArgs { input: "absent.json".into(), output: None };
        let err = cmd_expand(&handler, &config(), args).unwrap_err();
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn unrecognized_encoded_record_fails() {
        let handler = InMemoryResourceHandler::new();
        handler.insert("chunk.json", r#"[{"x": "y"}]"#);
        let args = ExpandArgs { input: "chunk.json".into(), output: None };
        let err = cmd_expand(&handler, &config(), args).unwrap_err();
        assert!(format!("{err:#}").contains("unrecognized"));
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mindex.toml");
        std::fs::write(&path, "base_dir = \"/from/file\"\n").unwrap();
        let cli = <Cli as clap::Parser>::try_parse_from([
            "mindex".to_string(),
            "--config".to_string(),
            path.display().to_string(),
            "compact".to_string(),
            "in.json".to_string(),
            "--pretty".to_string(),
        ])
        .unwrap();
        let config = effective_config(&cli).unwrap();
        assert_eq!(config.base_dir, std::path::PathBuf::from("/from/file"));
        assert!(!config.strict_identity);
        assert!(config.pretty);
    }

    #[test]
    fn path_handler_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("records.json"), RECORDS).unwrap();
        let handler = PathResourceHandler::new(dir.path());
        let args = CompactArgs { input: "records.json".into(), output: Some("out/chunk.json".into()), strict: true };
        cmd_compact(&handler, &config(), args).unwrap();
        assert!(dir.path().join("out/chunk.json").is_file());
    }
}
