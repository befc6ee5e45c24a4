//! brainrefresh-router
//!
//! Command-line host for the brainrefresh client route table: list the
//! routes, resolve paths the way the browser app would, build paths for
//! named routes, and validate route configuration files.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌───────────────────────────────────────────────┐
//!                      │                 ROUTE TABLE                   │
//!   path / location    │  ┌──────────┐    ┌──────────┐    ┌─────────┐  │
//!   ───────────────────┼─▶│ location │───▶│ routing  │───▶│  views  │  │
//!                      │  │  split   │    │  table   │    │ (eager/ │  │
//!                      │  └──────────┘    └────▲─────┘    │  lazy)  │  │
//!                      │                       │          └────┬────┘  │
//!   RouteMatch         │                  ┌────┴─────┐         │       │
//!   ◀──────────────────┼──────────────────│  config  │   chunk loader  │
//!                      │                  │ TOML/def │   (dist/assets) │
//!                      │                  └──────────┘                 │
//!                      └───────────────────────────────────────────────┘
//! ```

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use brainrefresh_router::config::{load_config, RouterConfig};
use brainrefresh_router::observability::logging::init_logging;
use brainrefresh_router::routing::{Params, RouteMatch, RouteTable};
use brainrefresh_router::views::ChunkDirLoader;

#[derive(Parser)]
#[command(name = "brainrefresh-router")]
#[command(about = "Inspect and exercise the brainrefresh client route table", long_about = None)]
struct Cli {
    /// Route configuration file (TOML). Uses the built-in table when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter, overrides the configured level.
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List routes in match order
    Routes,
    /// Resolve paths (query strings and fragments are ignored)
    Resolve {
        #[arg(required = true)]
        paths: Vec<String>,

        /// Also materialize each matched view
        #[arg(long)]
        load: bool,
    },
    /// Build the path for a named route
    Reverse {
        name: String,

        /// Parameters as KEY=VALUE
        #[arg(value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// Validate the configuration
    Check,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, Box<dyn Error>> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };

    init_logging(&config.observability, cli.log_level.as_deref())?;

    tracing::info!(
        routes = config.routes.len(),
        base = %config.base,
        strict_trailing_slash = config.strict_trailing_slash,
        chunk_dir = %config.views.chunk_dir,
        "Configuration loaded"
    );

    let loader = Arc::new(ChunkDirLoader::new(&config.views.chunk_dir));
    let table = RouteTable::from_config(&config, loader)?;

    match cli.command {
        Commands::Routes => {
            print_json(&list_routes(&table))?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Resolve { paths, load } => resolve(&table, &paths, load).await,
        Commands::Reverse { name, params } => {
            let params: Params = params.into_iter().collect();
            println!("{}", table.reverse(&name, &params)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check => {
            print_json(&json!({
                "valid": true,
                "routes": table.len(),
                "base": table.base(),
                "lazy_routes": table.routes().iter().filter(|r| r.view().is_lazy()).count(),
            }))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn list_routes(table: &RouteTable) -> Value {
    table
        .routes()
        .iter()
        .map(|route| {
            json!({
                "name": route.name(),
                "path": route.pattern().template(),
                "component": route.view().component(),
                "lazy": route.view().is_lazy(),
            })
        })
        .collect()
}

async fn resolve(
    table: &RouteTable,
    paths: &[String],
    load: bool,
) -> Result<ExitCode, Box<dyn Error>> {
    let mut code = ExitCode::SUCCESS;
    let mut results = Vec::with_capacity(paths.len());

    for path in paths {
        match table.resolve_location(path) {
            Ok(route_match) => {
                let (entry, ok) = describe_match(path, &route_match, load).await;
                if !ok {
                    code = ExitCode::FAILURE;
                }
                results.push(entry);
            }
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Navigation failed");
                results.push(json!({ "path": path, "error": e.to_string() }));
                code = ExitCode::FAILURE;
            }
        }
    }

    print_json(&Value::Array(results))?;
    Ok(code)
}

async fn describe_match(path: &str, route_match: &RouteMatch, load: bool) -> (Value, bool) {
    let view = route_match.view();
    let mut entry = json!({
        "path": path,
        "name": route_match.name(),
        "params": route_match.params(),
        "view": {
            "component": view.component(),
            "lazy": view.is_lazy(),
        },
    });

    if !load {
        return (entry, true);
    }

    match route_match.resolve_view().await {
        Ok(loaded) => {
            entry["view"]["source_bytes"] = json!(loaded.source().map_or(0, str::len));
            (entry, true)
        }
        Err(e) => {
            tracing::warn!(route = route_match.name(), error = %e, "View failed to load");
            entry["view"]["error"] = json!(e.to_string());
            (entry, false)
        }
    }
}

fn print_json(value: &Value) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_param(arg: &str) -> Result<(String, String), String> {
    arg.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", arg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param() {
        assert_eq!(
            parse_param("uuid=abc-123"),
            Ok(("uuid".to_string(), "abc-123".to_string()))
        );
        assert_eq!(
            parse_param("q=a=b"),
            Ok(("q".to_string(), "a=b".to_string()))
        );
        assert!(parse_param("uuid").is_err());
    }

    #[test]
    fn test_cli_parses_reverse() {
        let cli = Cli::try_parse_from(["brainrefresh-router", "reverse", "tag", "slug=rust"]).unwrap();
        match cli.command {
            Commands::Reverse { name, params } => {
                assert_eq!(name, "tag");
                assert_eq!(params, vec![("slug".to_string(), "rust".to_string())]);
            }
            _ => panic!("expected reverse"),
        }
    }

    #[test]
    fn test_list_routes_default_table() {
        let config = RouterConfig::default();
        let table = RouteTable::from_config(&config, Arc::new(ChunkDirLoader::new("unused"))).unwrap();
        let routes = list_routes(&table);
        assert_eq!(routes[1]["name"], "about");
        assert_eq!(routes[1]["lazy"], true);
        assert_eq!(routes[2]["path"], "/questions/:uuid/");
    }
}
