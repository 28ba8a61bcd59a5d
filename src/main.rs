use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use valet_core::config::{self, AlertBackend, Config};
use valet_core::traits::{AlertSink, Clock, SpeechSink, SystemClock};
use valet_notify::{CommandSpeech, ConsoleAlert, DesktopAlert};
use valet_reminders::dispatch::{DedupGate, Dispatcher};
use valet_reminders::scheduler::Scheduler;
use valet_reminders::service::{format_due, ReminderService};
use valet_reminders::store::ReminderStore;
use valet_reminders::watcher::Watcher;

#[derive(Parser)]
#[command(
    name = "valet",
    version,
    about = "Valet — personal desktop assistant"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the reminder engine in the foreground.
    Start,
    /// Add a reminder from natural language.
    Add {
        /// The request, e.g. "remind me every day at 8am to take my medicine".
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// List upcoming reminders.
    List {
        /// Maximum number to show.
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Show reminders that are due right now.
    Due,
    /// Cancel a reminder by id.
    Cancel {
        /// The reminder id (shown by `valet list`).
        id: String,
    },
    /// Show engine status and storage info.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cfg = config::load(&cli.config)?;
    let store = Arc::new(ReminderStore::open(config::shellexpand(
        &cfg.reminders.storage_path,
    )));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let service = ReminderService::new(store.clone(), clock.clone());

    match cli.command {
        Commands::Start => run_engine(&cfg, store, clock).await?,
        Commands::Add { text } => {
            if text.is_empty() {
                anyhow::bail!("no text provided. Usage: valet add <text>");
            }
            match service.add_from_text(&text.join(" "))? {
                Some(reminder) => {
                    println!("{}", ReminderService::confirmation(&reminder));
                    println!("  id: {}", reminder.id);
                }
                None => println!(
                    "I couldn't find anything to remind you about in that. \
                     Could you rephrase it?"
                ),
            }
        }
        Commands::List { limit } => {
            let upcoming = service.upcoming(limit);
            if upcoming.is_empty() {
                println!("No upcoming reminders.");
            } else {
                println!("Upcoming reminders:");
                for (i, r) in upcoming.iter().enumerate() {
                    let recur = r
                        .recurring_interval
                        .map(|iv| format!(" ({})", iv.describe()))
                        .unwrap_or_default();
                    println!(
                        "{:>3}. [{}] {} — {}{recur}",
                        i + 1,
                        r.id,
                        r.text,
                        format_due(r.due_time)
                    );
                }
            }
        }
        Commands::Due => {
            let due = service.due_now();
            if due.is_empty() {
                println!("Nothing is due right now.");
            } else {
                println!("Due now:");
                for r in &due {
                    println!("  [{}] {} — was due {}", r.id, r.text, format_due(r.due_time));
                }
            }
        }
        Commands::Cancel { id } => {
            if service.cancel(&id)? {
                println!("Cancelled reminder {id}.");
            } else {
                println!("No reminder with id {id}.");
            }
        }
        Commands::Status => {
            let (pending, completed) = store.counts();
            println!("Valet — Status\n");
            println!("Config:    {}", cli.config);
            println!("Storage:   {}", store.path().display());
            println!("Pending:   {pending}");
            println!("Completed: {completed}");
            println!(
                "Scheduler: poll every {}s, {}s backoff on failure",
                cfg.reminders.poll_interval_secs, cfg.reminders.error_backoff_secs
            );
            println!(
                "Watcher:   {}",
                if cfg.watcher.enabled {
                    format!("enabled, poll every {}s", cfg.watcher.poll_interval_secs)
                } else {
                    "disabled".to_string()
                }
            );
            println!(
                "Alerts:    {:?} visual, speech {}",
                cfg.alerts.visual,
                if cfg.alerts.speech_enabled {
                    "on"
                } else {
                    "off"
                }
            );
        }
    }

    Ok(())
}

/// Build the sinks and both loops, then run until ctrl-c.
async fn run_engine(
    cfg: &Config,
    store: Arc<ReminderStore>,
    clock: Arc<dyn Clock>,
) -> anyhow::Result<()> {
    let alert = build_alert_sink(cfg);
    let speech = build_speech_sink(cfg);
    let gate = Arc::new(DedupGate::new(cfg.reminders.dedup_window_secs));
    let dispatcher = Arc::new(Dispatcher::new(alert.clone(), speech, gate.clone()));

    let scheduler = Scheduler::new(
        store.clone(),
        dispatcher,
        clock.clone(),
        Duration::from_secs(cfg.reminders.poll_interval_secs),
        Duration::from_secs(cfg.reminders.error_backoff_secs),
    );
    scheduler.start().await;

    let watcher = if cfg.watcher.enabled {
        let watcher = Watcher::new(
            store,
            alert,
            gate,
            clock,
            Duration::from_secs(cfg.watcher.poll_interval_secs),
        );
        watcher.start().await;
        Some(watcher)
    } else {
        None
    };

    println!("{} is running. Press Ctrl-C to stop.", cfg.valet.name);
    tokio::signal::ctrl_c().await?;
    info!("Received shutdown signal");

    if let Some(watcher) = &watcher {
        watcher.stop().await;
    }
    scheduler.stop().await;
    Ok(())
}

fn build_alert_sink(cfg: &Config) -> Arc<dyn AlertSink> {
    match cfg.alerts.visual {
        AlertBackend::Console => Arc::new(ConsoleAlert),
        AlertBackend::Desktop => Arc::new(DesktopAlert::new(cfg.alerts.notify_command.clone())),
    }
}

fn build_speech_sink(cfg: &Config) -> Option<Arc<dyn SpeechSink>> {
    if !cfg.alerts.speech_enabled {
        return None;
    }
    Some(Arc::new(CommandSpeech::new(
        cfg.alerts.speech_command.clone(),
    )))
}
