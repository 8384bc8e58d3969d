//! # EmployeeChain Client Entry Point
//!
//! Plain-text command-line front end over [`RecordService`].
//!
//! ## Usage
//!
//! ```text
//! empchain-client stats
//! empchain-client list [page] [keyword] [all|pending|approved|rejected]
//! empchain-client pending
//! empchain-client mine
//! empchain-client show <id>
//! empchain-client submit <full-name> <age> <position> <department> <file>
//! empchain-client review <id> <approve|reject>
//! ```
//!
//! Connection settings come from the environment (see
//! `empchain_common::config`): `EMPCHAIN_LEDGER_URL`,
//! `EMPCHAIN_GATEWAY_URL`, `EMPCHAIN_ACCOUNT`, optional
//! `EMPCHAIN_TIMEOUT_MS`.

use std::env;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::info;

use empchain_client::{HttpFileStore, HttpLedgerClient, RecordService};
use empchain_common::config::ClientConfig;
use empchain_common::query::{RecordQuery, StatusFilter};
use empchain_common::record::{EmployeeRecord, RecordStatus};
use empchain_common::validation::DraftSubmission;

const USAGE: &str = "usage: empchain-client <stats|list|pending|mine|show|submit|review> [args]";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else {
        bail!(USAGE);
    };

    let config = ClientConfig::from_env().context("loading configuration")?;
    let ledger = Arc::new(
        HttpLedgerClient::new(&config.ledger_url, config.timeout_ms)
            .context("building ledger client")?,
    );
    let files = Arc::new(
        HttpFileStore::new(&config.gateway_url, config.timeout_ms)
            .context("building file store client")?,
    );

    info!(ledger = %config.ledger_url, account = %config.account, "connecting");
    let service = RecordService::connect(ledger, files, config.account.clone())
        .await
        .context("connecting to the ledger")?;

    match command.as_str() {
        "stats" => {
            let stats = service.get_stats();
            println!("total    {}", stats.total);
            println!("pending  {}", stats.pending);
            println!("approved {}", stats.approved);
            println!("rejected {}", stats.rejected);
        }
        "list" => {
            let page = match args.get(1) {
                Some(raw) => raw.parse().context("page must be a number")?,
                None => 1,
            };
            let keyword = args.get(2).cloned().unwrap_or_default();
            let filter = parse_filter(args.get(3).map(String::as_str))?;
            let result = service.get_page(&RecordQuery {
                filter,
                keyword,
                page,
            });
            println!(
                "page {}/{} ({} matching)",
                result.current_page, result.total_pages, result.total_matches
            );
            for record in &result.records {
                print_record_line(record);
            }
        }
        "pending" => {
            for record in service.pending_records() {
                print_record_line(&record);
            }
        }
        "mine" => {
            for record in service.my_records() {
                print_record_line(&record);
            }
        }
        "show" => {
            let id: u64 = args
                .get(1)
                .context("usage: show <id>")?
                .parse()
                .context("id must be a number")?;
            match service.record(id) {
                Some(record) => print_record_detail(&record),
                None => bail!("record {id} not found in the current snapshot"),
            }
        }
        "submit" => {
            let [full_name, age, position, department, file] = match args.get(1..6) {
                Some(rest) => [&rest[0], &rest[1], &rest[2], &rest[3], &rest[4]],
                None => bail!("usage: submit <full-name> <age> <position> <department> <file>"),
            };
            let bytes = std::fs::read(file).with_context(|| format!("reading {file}"))?;

            let mut draft = DraftSubmission::new();
            draft.set_full_name(full_name.as_str());
            draft.set_age(age.as_str());
            draft.set_position(position.as_str());
            draft.set_department(department.as_str());
            draft.attach_document(bytes, file.as_str());

            match service.submit(&mut draft).await {
                Ok(id) => println!("submitted as record {id}, awaiting review"),
                Err(empchain_client::SubmitError::ValidationFailed(report)) => {
                    for (field, error) in report.errors() {
                        eprintln!("{field}: {error}");
                    }
                    bail!("submission failed validation");
                }
                Err(e) => return Err(e.into()),
            }
        }
        "review" => {
            let id: u64 = args
                .get(1)
                .context("usage: review <id> <approve|reject>")?
                .parse()
                .context("id must be a number")?;
            let approve = match args.get(2).map(String::as_str) {
                Some("approve") => true,
                Some("reject") => false,
                _ => bail!("usage: review <id> <approve|reject>"),
            };
            service.review(id, approve).await?;
            println!(
                "record {id} {}",
                if approve { "approved" } else { "rejected" }
            );
        }
        other => bail!("unknown command {other}\n{USAGE}"),
    }

    Ok(())
}

fn parse_filter(raw: Option<&str>) -> Result<StatusFilter> {
    Ok(match raw {
        None | Some("all") => StatusFilter::All,
        Some("pending") => StatusFilter::Only(RecordStatus::Pending),
        Some("approved") => StatusFilter::Only(RecordStatus::Approved),
        Some("rejected") => StatusFilter::Only(RecordStatus::Rejected),
        Some(other) => bail!("unknown status filter {other}"),
    })
}

fn print_record_line(record: &EmployeeRecord) {
    println!(
        "#{:<5} {:<9} {:<24} {:<18} {}",
        record.id, record.status, record.full_name, record.department, record.submitter
    );
}

fn print_record_detail(record: &EmployeeRecord) {
    println!("id         {}", record.id);
    println!("name       {}", record.full_name);
    println!("age        {}", record.age);
    println!("position   {}", record.position);
    println!("department {}", record.department);
    println!("document   {}", record.document_ref);
    println!("status     {}", record.status);
    println!("submitter  {}", record.submitter);
    if record.reviewer.is_unset() {
        println!("reviewer   (not reviewed)");
    } else {
        println!("reviewer   {}", record.reviewer);
    }
}
