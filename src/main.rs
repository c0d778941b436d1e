use callops::assign;
use callops::backfill::{self, BackfillOptions};
use callops::config::Config;
use callops::console;
use callops::console_types::{ManualCallRequest, OrderRequest, OrganizationRequest};
use callops::consts;
use callops::dispatch;
use callops::error::AppError;
use callops::types::AppState;
use callops::utils::normalize_phone;

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::prelude::*;

#[derive(Debug, Parser)]
#[command(
    name = "callops",
    about = "Operations toolkit for the outbound voice-calling stack"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Place an outbound call through the voice vendor, using the agent bound
    /// to the sender
    Call {
        /// Recipient phone number, E.164
        #[arg(long)]
        to: String,
        /// Sender phone number; the configured default when omitted
        #[arg(long)]
        from: Option<String>,
        /// Contact name passed to the agent as call context
        #[arg(long)]
        contact: Option<String>,
    },
    /// Place a call through the dev console's manual-call endpoint
    ManualCall {
        #[arg(long)]
        to: String,
        #[arg(long)]
        from: Option<String>,
        #[arg(long, default_value = consts::DEFAULT_CALL_TYPE)]
        call_type: String,
        #[arg(long)]
        contact: Option<String>,
    },
    /// Fill missing sender_phone/bolna_agent_id columns with the configured
    /// defaults
    Backfill {
        /// Role filter for the scan
        #[arg(long, default_value = "admin")]
        role: String,
        /// Report what would change without updating anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Bind a sender phone and agent to one user row
    Assign {
        /// User row id (uuid)
        #[arg(long)]
        user: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        agent: String,
    },
    /// Show an agent's configuration from the dev console
    Agent {
        /// Agent id; the configured default agent when omitted
        agent_id: Option<String>,
    },
    /// Create an organization through the dev console
    Org {
        #[arg(long)]
        name: String,
        #[arg(long)]
        org_type: String,
        #[arg(long, default_value = "active")]
        status: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Create a payment order through the dev console
    Order {
        /// Amount in paise; passed through unscaled
        #[arg(long)]
        amount: u64,
        #[arg(long, default_value = "INR")]
        currency: String,
        #[arg(long)]
        phone: String,
    },
    /// Run the dev-console smoke sequence: login, organization create, agent
    /// details
    Smoke {
        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let subscriber = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_file(true)
                .with_line_number(true),
        )
        .with(tracing_subscriber::filter::Targets::new().with_targets([
            ("hyper", tracing_subscriber::filter::LevelFilter::OFF),
            ("callops", tracing_subscriber::filter::LevelFilter::DEBUG),
        ]));
    tracing::subscriber::set_global_default(subscriber).unwrap();

    let cli = Cli::parse();
    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error=%e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<(), AppError> {
    let config = Config::from_env()?;
    let state = AppState::new(config)?;

    match command {
        Command::Call { to, from, contact } => run_call(&state, &to, from, contact).await,
        Command::ManualCall {
            to,
            from,
            call_type,
            contact,
        } => run_manual_call(&state, &to, from, call_type, contact).await,
        Command::Backfill { role, dry_run } => run_backfill(&state, role, dry_run).await,
        Command::Assign { user, phone, agent } => run_assign(&state, &user, &phone, &agent).await,
        Command::Agent { agent_id } => run_agent(&state, agent_id).await,
        Command::Org {
            name,
            org_type,
            status,
            email,
            phone,
            address,
            description,
        } => run_org(&state, name, org_type, status, email, phone, address, description).await,
        Command::Order {
            amount,
            currency,
            phone,
        } => run_order(&state, amount, currency, &phone).await,
        Command::Smoke { json } => run_smoke(&state, json).await,
    }
}

async fn run_call(
    state: &AppState,
    to: &str,
    from: Option<String>,
    contact: Option<String>,
) -> Result<(), AppError> {
    let requested = from.unwrap_or_else(|| state.config.fallback.sender_phone.clone());
    let outcome = dispatch::place_call(state, to, &requested, contact.as_deref()).await?;
    println!("call placed: sid={} status={}", outcome.call_id, outcome.status);
    println!(
        "sender used: {} (agent {})",
        outcome.sender_phone, outcome.agent_id
    );
    if outcome.fell_back {
        println!(
            "note: {requested} has no agent binding, defaulted to {}",
            outcome.sender_phone
        );
    }
    Ok(())
}

async fn run_manual_call(
    state: &AppState,
    to: &str,
    from: Option<String>,
    call_type: String,
    contact: Option<String>,
) -> Result<(), AppError> {
    let recipient = normalize_phone(to)?;
    let requested =
        normalize_phone(&from.unwrap_or_else(|| state.config.fallback.sender_phone.clone()))?;

    let session = console::login(state).await?;
    let request = ManualCallRequest {
        recipient_phone: recipient,
        sender_phone: requested.clone(),
        call_type,
        contact_name: contact,
    };
    let placed = console::manual_call(state, &session, &request).await?;
    println!(
        "call placed: sid={} status={}",
        placed.call_sid,
        placed.status.as_deref().unwrap_or("unknown")
    );
    if placed.sender_phone != requested {
        println!(
            "note: console fell back from {requested} to {}",
            placed.sender_phone
        );
    }
    Ok(())
}

async fn run_backfill(state: &AppState, role: String, dry_run: bool) -> Result<(), AppError> {
    let options = BackfillOptions { role, dry_run };
    let summary = backfill::run(state, &options).await?;

    for row in &summary.rows {
        match (&row.error, row.filled.is_empty()) {
            (Some(err), _) => println!("{} <{}>: FAILED: {err}", row.user_id, row.email),
            (None, true) => println!("{} <{}>: ok", row.user_id, row.email),
            (None, false) if dry_run => println!(
                "{} <{}>: would fill {}",
                row.user_id,
                row.email,
                row.filled.join(", ")
            ),
            (None, false) => println!(
                "{} <{}>: filled {}",
                row.user_id,
                row.email,
                row.filled.join(", ")
            ),
        }
    }
    println!(
        "backfill: scanned={} updated={} skipped={} failed={}",
        summary.scanned, summary.updated, summary.skipped, summary.failed
    );

    if summary.failed > 0 {
        return Err(AppError::PartialFailure {
            failed: summary.failed,
            total: summary.scanned,
        });
    }
    Ok(())
}

async fn run_assign(
    state: &AppState,
    user: &str,
    phone: &str,
    agent: &str,
) -> Result<(), AppError> {
    let outcome = assign::run(state, user, phone, agent).await?;
    println!(
        "assigned {} -> agent {} for user {}",
        outcome.sender_phone, outcome.agent_id, outcome.user_id
    );
    Ok(())
}

async fn run_agent(state: &AppState, agent_id: Option<String>) -> Result<(), AppError> {
    let agent_id = agent_id.unwrap_or_else(|| state.config.fallback.agent_id.clone());
    let session = console::login(state).await?;
    let profile = console::agent_details(state, &session, &agent_id).await?;

    let pretty = serde_json::to_string_pretty(&profile).map_err(|e| AppError::Decode {
        context: "agent details",
        detail: e.to_string(),
    })?;
    println!("{pretty}");
    if let Some(name) = profile.display_name() {
        println!("agent: {name}");
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn run_org(
    state: &AppState,
    name: String,
    org_type: String,
    status: String,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    description: Option<String>,
) -> Result<(), AppError> {
    let mut request = OrganizationRequest::new(name, org_type, status).with_contact(email, phone);
    request.address = address;
    request.description = description;

    let session = console::login(state).await?;
    let created = console::create_organization(state, &session, &request).await?;
    let pretty =
        serde_json::to_string_pretty(&created.organization).map_err(|e| AppError::Decode {
            context: "organization create",
            detail: e.to_string(),
        })?;
    println!("organization created:");
    println!("{pretty}");
    Ok(())
}

async fn run_order(
    state: &AppState,
    amount: u64,
    currency: String,
    phone: &str,
) -> Result<(), AppError> {
    let phone = normalize_phone(phone)?;
    let session = console::login(state).await?;
    let request = OrderRequest {
        amount,
        currency,
        phone_number: phone,
    };
    let order = console::create_order(state, &session, &request).await?;
    println!(
        "order created: id={} amount={} paise",
        order.order_id, order.amount
    );
    Ok(())
}

async fn run_smoke(state: &AppState, json: bool) -> Result<(), AppError> {
    let report = console::run_smoke(state).await;
    if json {
        let rendered = serde_json::to_string_pretty(&report).map_err(|e| AppError::Decode {
            context: "smoke report",
            detail: e.to_string(),
        })?;
        println!("{rendered}");
    } else {
        for check in &report.checks {
            println!(
                "{:<20} {:>4} {:>6}ms  {}",
                check.name, check.status, check.elapsed_ms, check.message
            );
        }
    }

    let failed = report.failed();
    if failed > 0 {
        return Err(AppError::PartialFailure {
            failed,
            total: report.checks.len(),
        });
    }
    if !json {
        println!("smoke: {} checks passed", report.checks.len());
    }
    Ok(())
}
