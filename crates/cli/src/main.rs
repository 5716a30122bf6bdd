use anyhow::{bail, Context};
use api_shared::ListSpotsRes;
use clap::{Parser, Subcommand};
use serde_json::Value;
use spots_core::{
    config::data_file_from_env_value, constants::DATA_FILE_ENV, CoreConfig, DetailSection,
    SpotRecord, SpotStore,
};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "spots")]
#[command(about = "Scenic spots data file CLI")]
struct Cli {
    /// Path of the spots JSON document (defaults to $SPOTS_DATA_FILE, then data/spots.json)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all spots
    List {
        /// Print the API list response as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one spot as JSON
    Show {
        /// Spot id (case-insensitive)
        spot_id: String,
    },
    /// Delete a spot
    Delete {
        /// Spot id (case-insensitive)
        spot_id: String,
    },
    /// Upsert spots from a JSON file holding one object or an array of objects
    Import {
        /// JSON file to read
        file: PathBuf,
    },
    /// Append a detail section to a spot
    AddSection {
        /// Spot id (case-insensitive)
        spot_id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        image: String,
        #[arg(long, default_value = "")]
        emphasis: String,
        /// Paragraph text; repeat for several paragraphs
        #[arg(long = "paragraph")]
        paragraphs: Vec<String>,
        #[arg(long, default_value = "")]
        image_alt: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("spots_core=warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let data_file = resolve_data_file(cli.data_file, std::env::var(DATA_FILE_ENV).ok());
    let store = SpotStore::new(Arc::new(CoreConfig::new(data_file)?));

    match cli.command {
        Some(command) => run(&store, command, &mut std::io::stdout().lock()),
        None => {
            println!("Use 'spots --help' for commands");
            Ok(())
        }
    }
}

/// `--data-file` wins over the environment, which wins over the default.
fn resolve_data_file(flag: Option<PathBuf>, env_value: Option<String>) -> PathBuf {
    flag.unwrap_or_else(|| data_file_from_env_value(env_value))
}

fn run(store: &SpotStore, command: Commands, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Commands::List { json } => {
            let spots = store.list_spots()?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&ListSpotsRes::new(spots))?)?;
            } else if spots.is_empty() {
                writeln!(out, "No spots found.")?;
            } else {
                for spot in &spots {
                    writeln!(
                        out,
                        "ID: {}, Name: {}, Sections: {}",
                        spot.id().unwrap_or_default(),
                        spot.name().unwrap_or_default(),
                        spot.detail_sections().len()
                    )?;
                }
            }
        }
        Commands::Show { spot_id } => match store.get_spot(&spot_id)? {
            Some(spot) => writeln!(out, "{}", serde_json::to_string_pretty(&spot)?)?,
            None => bail!("Spot '{}' not found", spot_id),
        },
        Commands::Delete { spot_id } => {
            if store.delete_spot(&spot_id)? {
                writeln!(out, "Deleted spot: {}", spot_id)?;
            } else {
                bail!("Spot '{}' not found", spot_id);
            }
        }
        Commands::Import { file } => {
            let contents = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let value: Value = serde_json::from_str(&contents)
                .with_context(|| format!("{} is not valid JSON", file.display()))?;

            let records = records_from_value(value)?;
            let count = records.len();
            for record in records {
                let stored = store.upsert_spot(record)?;
                writeln!(out, "Upserted spot: {}", stored.id().unwrap_or_default())?;
            }
            writeln!(out, "Imported {} spot(s) into {}", count, store.data_file().display())?;
        }
        Commands::AddSection {
            spot_id,
            title,
            image,
            emphasis,
            paragraphs,
            image_alt,
        } => {
            let section = DetailSection {
                title,
                emphasis,
                paragraphs,
                image,
                image_alt,
                ..Default::default()
            };
            let section = store.append_detail_section(&spot_id, section)?;
            writeln!(out, "Added section '{}' to spot: {}", section.title, spot_id)?;
        }
    }

    Ok(())
}

/// Accepts either a single spot object or an array of them.
fn records_from_value(value: Value) -> anyhow::Result<Vec<SpotRecord>> {
    let items = match value {
        Value::Array(items) => items,
        single => vec![single],
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            SpotRecord::try_from(item).with_context(|| format!("entry {index} is not a spot"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn store_in(temp: &TempDir) -> SpotStore {
        let cfg = CoreConfig::new(temp.path().join("spots.json")).unwrap();
        SpotStore::new(Arc::new(cfg))
    }

    fn run_args(store: &SpotStore, args: &[&str]) -> anyhow::Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("spots").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        if let Some(command) = cli.command {
            run(store, command, &mut out)?;
        }
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn data_file_flag_overrides_environment() {
        let cli = Cli::try_parse_from(["spots", "list", "--data-file", "/tmp/other.json"]).unwrap();
        assert_eq!(
            resolve_data_file(cli.data_file, Some("env.json".into())),
            PathBuf::from("/tmp/other.json")
        );
        assert_eq!(resolve_data_file(None, Some("env.json".into())), PathBuf::from("env.json"));
        assert_eq!(resolve_data_file(None, None), data_file_from_env_value(None));
    }

    #[test]
    fn import_add_section_and_delete() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        let import = temp.path().join("import.json");
        std::fs::write(
            &import,
            json!([{ "id": "lake-1", "name": "Lake" }, { "id": "peak", "name": "Peak" }]).to_string(),
        )
        .unwrap();

        let output = run_args(&store, &["import", import.to_str().unwrap()]).unwrap();
        assert!(output.contains("Imported 2 spot(s)"));
        assert_eq!(store.list_spots().unwrap().len(), 2);

        run_args(
            &store,
            &[
                "add-section", "LAKE-1", "--title", "Shore", "--image", "/img/shore.jpg",
                "--paragraph", "One.", "--paragraph", "Two.",
            ],
        )
        .unwrap();
        let sections = store.get_spot("lake-1").unwrap().unwrap().detail_sections();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].paragraphs, vec!["One.", "Two."]);

        let listing = run_args(&store, &["list"]).unwrap();
        assert!(listing.contains("ID: lake-1, Name: Lake, Sections: 1"));

        run_args(&store, &["delete", "peak"]).unwrap();
        assert!(store.get_spot("peak").unwrap().is_none());
        let err = run_args(&store, &["delete", "peak"]).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn add_section_to_missing_spot_fails() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        let err = run_args(&store, &["add-section", "nope", "--title", "T", "--image", "i.jpg"])
            .unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn single_object_imports_as_one_record() {
        let records = records_from_value(json!({ "id": "a", "name": "A" })).unwrap();
        assert_eq!(records, vec![SpotRecord::new("a", "A")]);
    }

    #[test]
    fn array_entries_must_be_objects() {
        let err = records_from_value(json!([{ "id": "a" }, "b"])).unwrap_err();
        assert!(err.to_string().contains("entry 1"));
    }
}
