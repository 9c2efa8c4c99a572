use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crm_core::{BroadcastDraft, CrmError, CrmSession, HttpCrmApi, LeadDraft, LeadStore};
use shared::{
    domain::{Segment, Stage},
    protocol::MESSAGE_SOFT_LIMIT,
};
use tokio::io::{stdin, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;

mod commands;
mod config;
mod render;

use commands::{parse_command, Command, HELP};
use config::load_settings;

#[derive(Parser, Debug)]
#[command(about = "Lead pipeline session for Telegram sales leads")]
struct Args {
    /// Settings file; defaults to ./leadpilot.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    lead_endpoint: Option<String>,
    #[arg(long)]
    broadcast_endpoint: Option<String>,
    /// Start from the sample pipeline instead of an empty one.
    #[arg(long)]
    demo: bool,
}

struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    fn new() -> Self {
        Self {
            lines: BufReader::new(stdin()).lines(),
        }
    }

    /// `None` once stdin is closed.
    async fn ask(&mut self, label: &str) -> Result<Option<String>> {
        println!("{label}");
        self.lines.next_line().await.context("failed to read stdin")
    }

    async fn ask_or_default(&mut self, label: &str) -> Result<String> {
        Ok(self.ask(label).await?.unwrap_or_default())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(v) = args.lead_endpoint {
        settings.lead_endpoint = v;
    }
    if let Some(v) = args.broadcast_endpoint {
        settings.broadcast_endpoint = v;
    }
    settings.seed_demo |= args.demo;

    let api = HttpCrmApi::new(&settings.lead_endpoint, &settings.broadcast_endpoint)?;
    let store = if settings.seed_demo {
        LeadStore::demo()
    } else {
        LeadStore::new()
    };
    info!(
        lead_endpoint = %api.lead_endpoint(),
        broadcast_endpoint = %api.broadcast_endpoint(),
        leads = store.len(),
        "session started"
    );

    let mut session = CrmSession::new(api, store);
    let mut prompt = Prompt::new();
    println!("{HELP}");

    while let Some(line) = prompt.ask("> ").await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match command {
            Command::Board => print!("{}", render::render_board(session.store())),
            Command::Stats => print!("{}", render::render_stats(&session.store().aggregate())),
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
            Command::Move { lead_id, direction } => {
                // Unknown ids and boundary moves are silent no-ops.
                if let Ok(lead) = session.move_stage(lead_id, direction) {
                    println!("#{} {} -> {}", lead.id, lead.name, lead.stage.label());
                }
            }
            Command::Add => {
                let draft = read_lead_draft(&mut prompt).await?;
                match session.submit_lead(&draft).await {
                    Ok(lead) => println!("ok: lead #{} added to {}", lead.id, lead.stage.label()),
                    Err(err) => report_failure("could not add the lead", &err),
                }
            }
            Command::Broadcast => {
                println!(
                    "recipients: {}",
                    render::render_segments(&session.store().segment_counts())
                );
                let draft = read_broadcast_draft(&mut prompt).await?;
                match session.submit_broadcast(&draft).await {
                    Ok(outcome) => println!(
                        "ok: broadcast created, will be sent to {} recipients",
                        outcome.recipients
                    ),
                    Err(err) => report_failure("could not create the broadcast", &err),
                }
            }
        }
    }

    Ok(())
}

fn report_failure(action: &str, err: &CrmError) {
    match err {
        CrmError::Validation(reason) => println!("error: {reason}"),
        other => println!("error: {action} ({other})"),
    }
}

async fn read_lead_draft(prompt: &mut Prompt) -> Result<LeadDraft> {
    let name = prompt.ask_or_default("name *").await?;
    let username = prompt.ask_or_default("telegram username").await?;
    let telegram_id = prompt.ask_or_default("telegram id").await?;
    let stage_raw = prompt
        .ask_or_default("stage [new|contact|deal|payment|done] (default new)")
        .await?;
    let stage = if stage_raw.trim().is_empty() {
        Stage::default()
    } else {
        match stage_raw.parse::<Stage>() {
            Ok(stage) => stage,
            Err(err) => {
                println!("{err}; using 'new'");
                Stage::default()
            }
        }
    };
    let value = prompt.ask_or_default("deal value").await?;
    let notes = prompt.ask_or_default("notes").await?;

    Ok(LeadDraft {
        name,
        username,
        telegram_id,
        stage,
        value,
        notes,
    })
}

async fn read_broadcast_draft(prompt: &mut Prompt) -> Result<BroadcastDraft> {
    let name = prompt.ask_or_default("broadcast name *").await?;
    let segment_raw = prompt
        .ask_or_default("segment [all|new|contact|deal|payment] (default all)")
        .await?;
    let target_segment = if segment_raw.trim().is_empty() {
        Segment::default()
    } else {
        match segment_raw.parse::<Segment>() {
            Ok(segment) => segment,
            Err(err) => {
                println!("{err}; using 'all'");
                Segment::default()
            }
        }
    };
    let message = prompt.ask_or_default("message *").await?;

    let draft = BroadcastDraft {
        name,
        message,
        target_segment,
    };
    let note = if draft.exceeds_soft_limit() {
        " (over the Telegram limit)"
    } else {
        ""
    };
    println!("characters: {} / {MESSAGE_SOFT_LIMIT}{note}", draft.message_len());
    Ok(draft)
}
