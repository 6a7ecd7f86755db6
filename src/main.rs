// receipt-generation-service/src/main.rs

mod config;
mod directory;
mod error;
mod generator;
mod google;
mod models;
mod search;
mod substitution;

use chrono::{Local, NaiveDate};
use dialoguer::{Confirm, Input, Select};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::directory::{Directory, DirectoryCache, SheetsDirectorySource, COL_TAX_CODE};
use crate::error::{ReceiptError, Result};
use crate::generator::DocumentGenerator;
use crate::google::{DocsClient, DriveClient, SheetsClient};
use crate::models::{ContributionKind, DocumentRequest};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Print to stderr BEFORE logging initialization to catch early failures
    eprintln!("Starting receipt-generation-service...");

    // Load configuration
    let config = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("FATAL: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.service.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
        .init();

    info!(
        service = %config.service.name,
        version = env!("CARGO_PKG_VERSION"),
        "Starting receipt generation service"
    );

    if let Err(e) = run(&config).await {
        error!(error = %e, kind = e.kind(), "Fatal error");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(config: &Config) -> Result<()> {
    let token = config.google.access_token.clone();
    let sheets = SheetsClient::new(config.google.sheets_base_url.clone(), token.clone());
    let drive = DriveClient::new(config.google.drive_base_url.clone(), token.clone());
    let docs = DocsClient::new(config.google.docs_base_url.clone(), token);

    let source = SheetsDirectorySource::new(
        sheets,
        config.directory.spreadsheet_id.clone(),
        &config.directory.sheet_name,
    );
    let generator = DocumentGenerator::new(drive, docs, &config.templates, &config.drive);

    // One fetch per process; restart (or a future refresh action) to see
    // upstream edits.
    let mut cache = DirectoryCache::new();
    let directory = cache.get_or_load(&source).await?;
    if directory.is_empty() {
        return Err(ReceiptError::DirectoryEmpty);
    }

    println!("Receipt / declaration generator");
    println!("{} contacts loaded.", directory.len());

    loop {
        let Some(contact_index) = prompt_contact(directory)? else {
            break;
        };
        let contact = directory.get(contact_index).ok_or_else(|| {
            ReceiptError::InvalidInput(format!("no contact at row {contact_index}"))
        })?;

        let request = prompt_request()?;

        println!("Generating document...");
        match generator.generate(contact, &request).await {
            Ok(link) => println!("Document created: {}", link.url),
            Err(e) => {
                error!(error = %e, kind = e.kind(), "Generation failed");
                println!("Generation failed: {}", e);
            }
        }

        let again = Confirm::new()
            .with_prompt("Generate another document?")
            .default(true)
            .interact()?;
        if !again {
            break;
        }
    }

    Ok(())
}

/// Search-and-select loop. Returns the chosen contact's row index, or
/// `None` when the user submits an empty query to quit.
fn prompt_contact(directory: &Directory) -> Result<Option<usize>> {
    loop {
        let query: String = Input::new()
            .with_prompt("Search by name or email (empty to quit)")
            .allow_empty(true)
            .interact_text()?;

        let query = query.trim().to_string();
        if query.is_empty() {
            return Ok(None);
        }

        let matches = search::search(directory, &query);
        if matches.is_empty() {
            println!("No contact matches \"{}\". Try another search.", query);
            continue;
        }

        // Show the tax code next to the name so duplicate names are
        // distinguishable; selection resolves by row, not by name.
        let items: Vec<String> = matches
            .iter()
            .map(|c| {
                let tax_code = c.get_or_empty(COL_TAX_CODE);
                if tax_code.is_empty() {
                    c.name().to_string()
                } else {
                    format!("{} ({})", c.name(), tax_code)
                }
            })
            .collect();

        let selected = Select::new()
            .with_prompt("Select the contact")
            .items(&items)
            .default(0)
            .interact()?;

        return Ok(Some(matches[selected].index()));
    }
}

/// Collect the form fields for one generation.
fn prompt_request() -> Result<DocumentRequest> {
    let labels: Vec<&str> = ContributionKind::ALL.iter().map(|k| k.label()).collect();
    let kind_index = Select::new()
        .with_prompt("Document type")
        .items(&labels)
        .default(0)
        .interact()?;
    let kind = ContributionKind::ALL[kind_index];

    let amount: f64 = Input::new()
        .with_prompt("Amount (EUR)")
        .validate_with(|value: &f64| {
            if *value >= 0.0 {
                Ok(())
            } else {
                Err("amount must be non-negative")
            }
        })
        .interact_text()?;

    let location: String = Input::new()
        .with_prompt("Event location")
        .allow_empty(true)
        .interact_text()?;

    let event: String = Input::new()
        .with_prompt("Event (optional)")
        .allow_empty(true)
        .interact_text()?;

    let receipt_number: String = Input::new()
        .with_prompt("Receipt/invoice number")
        .allow_empty(true)
        .interact_text()?;

    let today = Local::now().date_naive();
    let event_date: NaiveDate = Input::new()
        .with_prompt("Event date (YYYY-MM-DD)")
        .default(today)
        .interact_text()?;
    let receipt_date: NaiveDate = Input::new()
        .with_prompt("Receipt date (YYYY-MM-DD)")
        .default(today)
        .interact_text()?;

    let event = event.trim();
    Ok(DocumentRequest {
        kind,
        amount,
        location,
        event: if event.is_empty() {
            None
        } else {
            Some(event.to_string())
        },
        receipt_number,
        event_date,
        receipt_date,
    })
}
