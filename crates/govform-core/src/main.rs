//! `govform` command-line front end

use anyhow::{bail, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use govform_core::{FormService, GovformConfig, SubmitRequest};
use govform_store::{SubmissionFilter, SubmissionStatus};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("govform")
        .version(govform_core::VERSION)
        .about("Government form assistant: templates, auto-fill profile and submissions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Directory holding profiles.json and submissions.json"),
        )
        .subcommand(
            Command::new("forms")
                .about("List built-in forms, or describe one form")
                .arg(
                    Arg::new("type")
                        .long("type")
                        .help("Form identifier, e.g. W-4"),
                ),
        )
        .subcommand(
            Command::new("profile")
                .about("Show or update the auto-fill profile")
                .subcommand_required(true)
                .subcommand(Command::new("show").about("Print the stored profile"))
                .subcommand(
                    Command::new("set")
                        .about("Merge KEY=VALUE pairs into the profile")
                        .arg(
                            Arg::new("pairs")
                                .required(true)
                                .action(ArgAction::Append)
                                .help("Values are parsed as JSON, otherwise kept as text"),
                        ),
                ),
        )
        .subcommand(
            Command::new("submissions")
                .about("Inspect stored submissions")
                .subcommand_required(true)
                .subcommand(
                    Command::new("list")
                        .about("List submissions, newest first")
                        .arg(Arg::new("form-type").long("form-type"))
                        .arg(
                            Arg::new("status")
                                .long("status")
                                .value_parser(STATUSES),
                        ),
                )
                .subcommand(
                    Command::new("get")
                        .about("Print one submission")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("submit")
                .about("Create or update a submission")
                .arg(Arg::new("form-type").long("form-type").required(true))
                .arg(
                    Arg::new("data")
                        .long("data")
                        .required(true)
                        .help("Answers as a JSON object"),
                )
                .arg(
                    Arg::new("status")
                        .long("status")
                        .default_value("draft")
                        .value_parser(STATUSES),
                )
                .arg(Arg::new("id").long("id").help("Existing submission to overwrite")),
        )
        .subcommand(
            Command::new("suggest")
                .about("Ask the AI assist for a field value")
                .arg(Arg::new("form-type").long("form-type").required(true))
                .arg(Arg::new("field").long("field").required(true))
                .arg(Arg::new("context").long("context").default_value("")),
        )
}

const STATUSES: [&str; 2] = ["draft", "complete"];

fn status_arg(args: &ArgMatches) -> anyhow::Result<Option<SubmissionStatus>> {
    args.get_one::<String>("status")
        .map(|s| s.parse::<SubmissionStatus>())
        .transpose()
        .context("invalid --status")
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();

    match run(&matches).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Command failed");
            eprintln!("Internal error");
            ExitCode::FAILURE
        }
    }
}

async fn run(matches: &ArgMatches) -> anyhow::Result<ExitCode> {
    let mut config = GovformConfig::from_env();
    if let Some(dir) = matches.get_one::<PathBuf>("data-dir") {
        config = config.with_data_dir(dir);
    }
    let service = FormService::from_config(&config)?;

    match matches.subcommand() {
        Some(("forms", args)) => match args.get_one::<String>("type") {
            None => print_json(&service.list_forms()),
            Some(form_type) => match service.get_form(form_type).await? {
                Some(lookup) => print_json(&lookup),
                None => not_found("Form not found"),
            },
        },
        Some(("profile", args)) => match args.subcommand() {
            Some(("show", _)) => print_json(&service.get_profile().await),
            Some(("set", set)) => {
                let mut partial = Map::new();
                for pair in set.get_many::<String>("pairs").into_iter().flatten() {
                    let (key, value) = parse_pair(pair)?;
                    partial.insert(key, value);
                }
                print_json(&service.save_profile(partial).await?)
            }
            _ => bail!("unknown profile command"),
        },
        Some(("submissions", args)) => match args.subcommand() {
            Some(("list", list)) => {
                let mut filter = SubmissionFilter::new();
                if let Some(form_type) = list.get_one::<String>("form-type") {
                    filter = filter.form_type(form_type);
                }
                if let Some(status) = status_arg(list)? {
                    filter = filter.status(status);
                }
                print_json(&service.list_submissions(&filter).await)
            }
            Some(("get", get)) => {
                let id = get.get_one::<String>("id").context("missing id")?;
                match service.get_submission(id).await {
                    Some(submission) => print_json(&submission),
                    None => not_found("Submission not found"),
                }
            }
            _ => bail!("unknown submissions command"),
        },
        Some(("submit", args)) => {
            let raw = args.get_one::<String>("data").context("missing data")?;
            let data: Map<String, Value> =
                serde_json::from_str(raw).context("--data must be a JSON object")?;
            let status = status_arg(args)?.unwrap_or_default();

            let request = SubmitRequest {
                id: args.get_one::<String>("id").cloned(),
                form_type: args.get_one::<String>("form-type").cloned().unwrap_or_default(),
                data: Some(data),
                status,
            };

            let outcome = match service.submit(request).await {
                Ok(outcome) => outcome,
                Err(e) if e.is_client_error() => {
                    print_json(&json!({"error": e.to_string()}))?;
                    return Ok(ExitCode::from(2));
                }
                Err(e) => return Err(e.into()),
            };

            print_json(&outcome.to_json())?;
            Ok(if outcome.is_saved() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Some(("suggest", args)) => {
            let form_type = args.get_one::<String>("form-type").context("missing form type")?;
            let field = args.get_one::<String>("field").context("missing field")?;
            let context = args.get_one::<String>("context").map_or("", String::as_str);

            match service.suggest_field_value(form_type, field, context).await? {
                Some(suggestion) => print_json(&json!({"suggestion": suggestion})),
                None => {
                    print_json(&json!({"error": "AI features not enabled"}))?;
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        _ => bail!("unknown command"),
    }
}

/// Split `KEY=VALUE`, reading the value as JSON when it parses
fn parse_pair(pair: &str) -> anyhow::Result<(String, Value)> {
    let Some((key, raw)) = pair.split_once('=') else {
        bail!("expected KEY=VALUE, got '{pair}'");
    };
    if key.is_empty() {
        bail!("empty key in '{pair}'");
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(ExitCode::SUCCESS)
}

fn not_found(message: &str) -> anyhow::Result<ExitCode> {
    print_json(&json!({"error": message}))?;
    Ok(ExitCode::FAILURE)
}
