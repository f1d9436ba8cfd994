use clap::{Args, Parser, Subcommand};
use ruleset_test::builder::build_requests;
use ruleset_test::client::{RuleSetTestClient, SubmitOutcome};
use ruleset_test::document::{assemble_generated_document, assemble_test_document, to_pretty_json};
use ruleset_test::input::{RequestInput, parse_document};
use serde_json::Value;
use std::error::Error;
use std::io;
use tracing_subscriber::EnvFilter;

mod config;

use config::SubmitConfig;

const INPUT_HELP: &str = "\
The input is a JSON array read from standard input. Each element represents a
request whose name/value pairs are either request-level properties or custom
player properties. The request properties that can be set from the input are:

  appVersion      - default '1.0.0'
  bundleId        - default 'com.example.mygame'
  locale          - default 'EN-US'
  location        - default {\"latitude\": 0, \"longitude\": 0}
  maxPlayers      - no default
  minPlayers      - no default
  platform        - default 'IOS'
  secondsInQueue  - default 0

Other names are assumed to be custom player properties.

An element can also be an array of objects representing a request with invited
players, where each object is one player's properties. The first object
represents the requesting player and accepts the request-level properties.

See https://developer.apple.com/documentation/appstoreconnectapi/test_a_rule_set.";

#[derive(Parser)]
#[command(
    name = "matchtest",
    about = "Build and submit Game Center matchmaking rule set tests"
)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Build the request/player/team document and print it
    #[command(after_help = INPUT_HELP)]
    Generate(GenerateArgs),
    /// Build the rule set test document, submit it and print the results
    #[command(after_help = INPUT_HELP)]
    Submit(SubmitArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Echo the input document before the output
    #[arg(short, long)]
    debug: bool,
}

#[derive(Args)]
struct SubmitArgs {
    /// API JWT authentication token (default: ASC_API_TOKEN environment variable)
    #[arg(short, long)]
    auth: Option<String>,

    /// Rule set id to test against (default: RULESET_ID environment variable)
    #[arg(short = 'i', long)]
    rulesetid: Option<String>,

    /// Test API url
    #[arg(short, long)]
    url: Option<String>,

    /// Echo the input, request and response documents
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        CliCommand::Generate(args) => generate(args),
        CliCommand::Submit(args) => submit(args),
    }
}

/// Reads and validates the stdin document, keeping the raw value around
/// for the debug echo.
fn read_input() -> Result<(Value, Vec<RequestInput>), Box<dyn Error>> {
    let raw: Value = serde_json::from_reader(io::stdin().lock())?;
    let requests = parse_document(raw.clone())?;

    Ok((raw, requests))
}

fn generate(args: GenerateArgs) -> Result<(), Box<dyn Error>> {
    let (raw, requests) = read_input()?;
    let built = build_requests(&requests);
    let output = assemble_generated_document(&built);

    if args.debug {
        println!("### Input");
        println!("{}", to_pretty_json(&raw)?);
        println!("### Output");
    }

    println!("{}", to_pretty_json(&output)?);

    Ok(())
}

fn submit(args: SubmitArgs) -> Result<(), Box<dyn Error>> {
    let config = SubmitConfig::resolve(args.auth, args.rulesetid, args.url)?;
    let (raw, requests) = read_input()?;
    let built = build_requests(&requests);
    let content = assemble_test_document(&built, config.ruleset_id.as_deref());

    if args.debug {
        println!("### Input");
        println!("{}", to_pretty_json(&raw)?);
        println!("### POST {}", config.url);
        println!("### Content");
        println!("{}", to_pretty_json(&content)?);
    }

    let client = RuleSetTestClient::new(config.url);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let payload = runtime.block_on(client.submit(config.auth.as_deref(), &content))?;

    if args.debug {
        println!("### Response");
        println!("{}", to_pretty_json(&payload)?);
        println!("### Output");
    }

    // A remote-reported error document is regular output, not a failure.
    match SubmitOutcome::from_payload(payload)? {
        SubmitOutcome::Errors(error_document) => println!("{}", to_pretty_json(&error_document)?),
        SubmitOutcome::Results(results) => println!("{}", to_pretty_json(&results)?),
    }

    Ok(())
}
