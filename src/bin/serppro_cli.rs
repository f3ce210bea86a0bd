//! serppro-cli: run SerpPro operations from the command line.
//!
//! Usage:
//!   serppro-cli <operation> [--param value]...   Run one operation, print JSON
//!   serppro-cli operations                        List operations and parameters
//!
//! The API key comes from SERPPRO_API_KEY (or `api_key` in --config).

use anyhow::{bail, Context};
use serppro_client::{Operation, OperationParams, SerpProClientBuilder};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        print_usage();
        std::process::exit(1);
    };

    let outcome = match command.as_str() {
        "operations" | "list" => {
            cmd_operations();
            Ok(())
        }
        "version" | "--version" | "-V" => {
            println!("serppro-cli {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => cmd_run(other, &args[1..]).await,
    };

    if let Err(e) = outcome {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"serppro-cli: SerpPro API command line client

USAGE:
    serppro-cli <OPERATION> [--param value]... [OPTIONS]
    serppro-cli operations

OPTIONS:
    --config <path>       YAML client configuration
    --base-url <url>      Override the API base URL
    --no-verify-ssl       Accept any TLS certificate

ENVIRONMENT:
    SERPPRO_API_KEY       API key
    SERPPRO_BASE_URL      API base URL
    RUST_LOG              Log filter (default: warn)"#
    );
}

fn cmd_operations() {
    for op in Operation::ALL {
        let required = op.required_params();
        let params: Vec<String> = op
            .accepted_params()
            .iter()
            .map(|p| {
                if required.contains(p) {
                    format!("--{p} <required>")
                } else {
                    format!("[--{p}]")
                }
            })
            .collect();
        println!("{:<20} {}", op.name(), params.join(" "));
    }
}

struct Invocation {
    config: Option<String>,
    base_url: Option<String>,
    verify_ssl: bool,
    params: OperationParams,
}

fn parse_args(args: &[String]) -> anyhow::Result<Invocation> {
    let mut inv = Invocation {
        config: None,
        base_url: None,
        verify_ssl: true,
        params: OperationParams::new(),
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if !arg.starts_with("--") {
            bail!("unexpected argument '{arg}', parameters are passed as --name value");
        }
        if arg == "--no-verify-ssl" {
            inv.verify_ssl = false;
            continue;
        }
        let Some(value) = iter.next() else {
            bail!("missing value for {arg}");
        };
        match arg.as_str() {
            "--config" => inv.config = Some(value.clone()),
            "--base-url" => inv.base_url = Some(value.clone()),
            _ => inv.params.insert(arg, value.as_str()),
        }
    }
    Ok(inv)
}

async fn cmd_run(name: &str, args: &[String]) -> anyhow::Result<()> {
    let operation: Operation = name
        .parse()
        .with_context(|| format!("unknown command '{name}', try `serppro-cli operations`"))?;
    let inv = parse_args(args)?;

    let mut builder = match inv.config {
        Some(ref path) => SerpProClientBuilder::from_yaml_file(path)?,
        None => SerpProClientBuilder::from_env()?,
    };
    if let Some(url) = inv.base_url {
        builder = builder.base_url(url);
    }
    if !inv.verify_ssl {
        builder = builder.verify_ssl(false);
    }
    let client = builder.build()?;

    let response = client.execute_params(operation, &inv.params).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
