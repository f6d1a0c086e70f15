// SPDX-License-Identifier: PMPL-1.0-or-later

//! mayday: assemble and dispatch problem reports from installer environments
//!
//! Thin front end over the library: resolve host identity, build a problem
//! record from flags, and hand it to the console backend for the selected
//! UI mode.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use colored::*;
use mayday::dispatch::{self, ConsoleReporter, InlineScreen, Ui};
use mayday::identity::Resolver;
use mayday::record::{self, hash, RecordFormat};
use mayday::types::keys;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mayday")]
#[command(version = "0.2.0")]
#[command(about = "Problem-report assembly and dispatch for installer environments")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved host identity
    Identity,

    /// Assemble an unhandled-exception record and print or save it
    Assemble {
        #[command(flatten)]
        signature: SignatureArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: RecordFormat,

        /// Write the record to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Assemble an alert-signature record and print or save it
    Alert {
        /// Component the alert fires for
        #[arg(long)]
        component: String,

        /// Marker name used for server-side grouping
        #[arg(long)]
        hashmarkername: String,

        /// One-line summary (the record's reason)
        #[arg(long)]
        summary: String,

        /// Full alert signature text
        #[arg(long)]
        signature: String,

        /// Deduplication hash; computed from the signature when omitted
        #[arg(long)]
        duphash: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: RecordFormat,
    },

    /// Assemble a record and dispatch it to the reporting backend
    Report {
        #[command(flatten)]
        signature: SignatureArgs,

        /// UI mode the dispatch decision is based on
        #[arg(short, long, value_enum, default_value = "text")]
        ui: UiArg,
    },
}

#[derive(clap::Args)]
struct SignatureArgs {
    /// Component the crash happened in
    #[arg(long)]
    component: String,

    /// Marker name used for server-side grouping
    #[arg(long)]
    hashmarkername: String,

    /// Deduplication hash; computed from the description when omitted
    #[arg(long)]
    duphash: Option<String>,

    /// One-line crash reason
    #[arg(long)]
    reason: String,

    /// Full crash description
    #[arg(long)]
    description: String,

    /// Traceback file to attach under its base name
    #[arg(long, value_name = "PATH")]
    exception_file: PathBuf,

    /// Extra record fields as KEY=VALUE
    #[arg(long = "field", value_name = "KEY=VALUE")]
    fields: Vec<String>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum UiArg {
    Text,
    Window,
    Other,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Identity => {
            let identity = Resolver::new().resolve();
            let shown = |v: &str| {
                if v.is_empty() {
                    "<unknown>".dimmed().to_string()
                } else {
                    v.to_string()
                }
            };
            println!("Product: {}", shown(&identity.product));
            println!("Version: {}", shown(&identity.version));
            match identity.os_release() {
                Some(os_release) => println!("Release: {}", os_release),
                None => println!("Release: {}", "<not composable>".dimmed()),
            }
        }

        Commands::Assemble {
            signature,
            format,
            output,
        } => {
            let record = assemble(signature)?;
            let text = format.serialize(&record)?;
            if let Some(output_path) = output {
                std::fs::write(&output_path, text)?;
                println!("Record saved to: {}", output_path.display());
            } else {
                println!("{}", text);
            }
        }

        Commands::Alert {
            component,
            hashmarkername,
            summary,
            signature,
            duphash,
            format,
        } => {
            let duphash = duphash.unwrap_or_else(|| hash::duphash(&component, &signature));
            let record =
                record::alert_signature(&component, &hashmarkername, &duphash, &summary, &signature);
            println!("{}", format.serialize(&record)?);
        }

        Commands::Report { signature, ui } => {
            let record = assemble(signature)?;
            let mut reporter = ConsoleReporter::new();

            let outcome = match ui {
                UiArg::Text => dispatch::report(&record, Ui::Text, &mut reporter)?,
                UiArg::Window => {
                    // The CLI runs on the plain shell screen; there is no
                    // full-screen state to save around the backend call.
                    let mut screen = InlineScreen::new();
                    dispatch::report(&record, Ui::Window(&mut screen), &mut reporter)?
                }
                UiArg::Other => dispatch::report(&record, Ui::Other, &mut reporter)?,
            };

            println!("Outcome: {:?}", outcome);
        }
    }

    Ok(())
}

fn assemble(args: SignatureArgs) -> Result<mayday::ProblemRecord> {
    let description = args.description;
    let duphash = args
        .duphash
        .unwrap_or_else(|| hash::duphash(&args.component, &description));

    let mut fields = vec![
        (keys::COMPONENT.to_string(), args.component),
        (keys::HASHMARKERNAME.to_string(), args.hashmarkername),
        (keys::DUPHASH.to_string(), duphash),
        (keys::REASON.to_string(), args.reason),
        (keys::DESCRIPTION.to_string(), description),
        (
            keys::EXCEPTION_FILE.to_string(),
            args.exception_file.display().to_string(),
        ),
    ];
    for raw in &args.fields {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| anyhow!("invalid field {:?}, expected KEY=VALUE", raw))?;
        fields.push((key.to_string(), value.to_string()));
    }

    let record =
        record::unhandled_exception_signature(&fields, &Resolver::new(), &mut std::io::stderr())?;
    Ok(record)
}
