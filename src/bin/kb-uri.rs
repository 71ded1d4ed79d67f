use clap::{Parser, Subcommand};
use std::sync::Arc;

use killboard_core::uri::{Origin, Param, StaticKey, UriContext, UriSettings};

#[derive(Parser)]
#[command(name = "kb-uri")]
#[command(about = "Parse and build killboard URIs offline", long_about = None)]
struct Cli {
    /// Board URL used as host root.
    #[arg(long, default_value = "http://localhost")]
    host: String,

    /// Session key appended to built URIs.
    #[arg(long, default_value = "0")]
    key: String,

    /// Use path-info URIs.
    #[arg(long)]
    path: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the parameters a request resolves to, as JSON
    Parse {
        #[arg(long)]
        path_info: Option<String>,
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Build a URI from name[=value] parameters; prefix a name with '/' to
    /// make it positional (e.g. /a=kill_detail /45 unlimited)
    Build {
        params: Vec<String>,
        /// Page the link is built from when no `a` parameter is given.
        #[arg(long, default_value = "home")]
        current: String,
    },
}

fn parse_param(spec: &str) -> Param {
    let (positional, spec) = match spec.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, spec),
    };
    match spec.split_once('=') {
        Some((name, value)) => Param::new(name, value, positional),
        None => Param::flag(spec, positional),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = UriSettings {
        path_style: cli.path,
        script: "index.php".to_string(),
        hosts: Arc::new(Some(cli.host.clone())),
        keys: Arc::new(StaticKey::new(cli.key.clone())),
    };
    let origin = Origin::new("http", "localhost", "/index.php");

    match cli.command {
        Commands::Parse { path_info, query } => {
            match UriContext::from_request(&settings, origin, path_info.as_deref(), &query) {
                Ok(ctx) => println!("{}", serde_json::to_string_pretty(ctx.args())?),
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(2);
                }
            }
        }
        Commands::Build { params, current } => {
            let query = format!("a={}", current);
            let ctx = UriContext::from_request(&settings, origin, None, &query)?;
            let params: Vec<Param> = params.iter().map(|p| parse_param(p)).collect();
            println!("{}", ctx.build(params));
        }
    }

    Ok(())
}
