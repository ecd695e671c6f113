//! triplemap CLI: convert between JSON records and RDF files

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use triplemap::rdf::{NamespaceManager, RdfFormat, RdfParser, RdfSerializer};
use triplemap::{Graph, Mapper, MappingConfig, Schema};

#[derive(Parser)]
#[command(name = "triplemap", version, about = "Map JSON records to and from RDF triples")]
struct Cli {
    /// Mapping configuration (YAML)
    #[arg(long, global = true, env = "TRIPLEMAP_CONFIG")]
    config: Option<PathBuf>,

    /// RDF format; inferred from the file extension when omitted
    #[arg(long, global = true)]
    format: Option<FormatArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum FormatArg {
    Turtle,
    Ntriples,
}

impl From<FormatArg> for RdfFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Turtle => RdfFormat::Turtle,
            FormatArg::Ntriples => RdfFormat::NTriples,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Decode an RDF file into JSON attribute mappings
    Decode {
        /// RDF input file
        #[arg(long)]
        input: PathBuf,

        /// Schema (YAML) selecting and naming fields
        #[arg(long)]
        schema: Option<PathBuf>,

        /// Decode only this subject
        #[arg(long)]
        id: Option<String>,

        /// Shorten IRIs in the output to prefixed names
        #[arg(long)]
        compact: bool,

        /// Extra prefix for --compact, as NAME=IRI
        #[arg(long = "prefix", value_parser = parse_prefix)]
        prefixes: Vec<(String, String)>,
    },
    /// Encode one JSON record, or an array of records, as RDF
    Encode {
        /// Schema (YAML)
        #[arg(long)]
        schema: PathBuf,

        /// JSON input file
        #[arg(long)]
        input: PathBuf,
    },
    /// Print every statement about one subject
    Subgraph {
        /// RDF input file
        #[arg(long)]
        input: PathBuf,

        /// Subject identifier
        #[arg(long)]
        id: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "triplemap=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => MappingConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => MappingConfig::default(),
    };
    let mapper = Mapper::new(config);

    match &cli.command {
        Commands::Decode {
            input,
            schema,
            id,
            compact,
            prefixes,
        } => {
            let graph = read_graph(input, cli.format)?;
            let schema = schema.as_deref().map(load_schema).transpose()?;
            let mut mappings = mapper.to_builtin(&graph, id.as_deref(), schema.as_ref())?;
            if *compact {
                let mut namespaces = NamespaceManager::new();
                for (prefix, iri) in prefixes {
                    namespaces.add_prefix(prefix.as_str(), iri.as_str());
                }
                mappings = mappings
                    .into_iter()
                    .map(|mapping| compact_mapping(&namespaces, mapping))
                    .collect();
            }
            println!("{}", serde_json::to_string_pretty(&mappings)?);
        }
        Commands::Encode { schema, input } => {
            let schema = load_schema(schema)?;
            let text = std::fs::read_to_string(input)
                .with_context(|| format!("reading {}", input.display()))?;
            let records = match serde_json::from_str::<Value>(&text)? {
                Value::Array(items) => items,
                record @ Value::Object(_) => vec![record],
                _ => bail!("{} must hold a JSON object or an array of objects", input.display()),
            };

            let mut graph = Graph::new();
            for (i, record) in records.iter().enumerate() {
                let Some(record) = record.as_object() else {
                    bail!("record {} is not a JSON object", i);
                };
                let encoded = mapper
                    .encode(record, Some(&schema), None)
                    .with_context(|| format!("encoding record {}", i))?;
                graph.merge(&encoded);
            }
            print!("{}", RdfSerializer::serialize_graph(&graph, output_format(cli.format))?);
        }
        Commands::Subgraph { input, id } => {
            let graph = read_graph(input, cli.format)?;
            let sub = mapper.sub_graph(&graph, id)?;
            print!("{}", RdfSerializer::serialize_graph(&sub, output_format(cli.format))?);
        }
    }
    Ok(())
}

fn read_graph(path: &Path, format: Option<FormatArg>) -> Result<Graph> {
    let format = match format {
        Some(format) => format.into(),
        None => RdfFormat::from_extension(path)
            .with_context(|| format!("cannot tell the RDF format of {}; pass --format", path.display()))?,
    };
    RdfParser::parse_file(path, format).with_context(|| format!("parsing {}", path.display()))
}

fn output_format(format: Option<FormatArg>) -> RdfFormat {
    format.map(RdfFormat::from).unwrap_or(RdfFormat::Turtle)
}

fn load_schema(path: &Path) -> Result<Schema> {
    Schema::from_yaml_path(path).with_context(|| format!("loading schema {}", path.display()))
}

fn parse_prefix(arg: &str) -> Result<(String, String)> {
    match arg.split_once('=') {
        Some((prefix, iri)) if !prefix.is_empty() && !iri.is_empty() => {
            Ok((prefix.to_string(), iri.to_string()))
        }
        _ => bail!("expected NAME=IRI, got {:?}", arg),
    }
}

/// Prefixed names for keys and IRI-valued strings of a decoded mapping
fn compact_mapping(namespaces: &NamespaceManager, mapping: Map<String, Value>) -> Map<String, Value> {
    mapping
        .into_iter()
        .map(|(key, value)| {
            let key = namespaces.compact(&key).unwrap_or(key);
            (key, compact_value(namespaces, value))
        })
        .collect()
}

fn compact_value(namespaces: &NamespaceManager, value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(namespaces.compact(&s).unwrap_or(s)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| compact_value(namespaces, item))
                .collect(),
        ),
        other => other,
    }
}
