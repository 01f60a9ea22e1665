use chrono::NaiveTime;
use clap::Parser;
use pm_core::{DirectiveKey, Error, MasterDirectives, Notifier, Result};
use pm_cycle::{init_logging, run_scheduled, CycleManager, HumanDuration, Schedule};
use pm_notify::{LogNotifier, SmtpConfig, SmtpNotifier, GMAIL_SMTP_HOST, SUBMISSION_PORT};
use pm_storage::{create_storage, StorageKind};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Daily research article generator", long_about = None)]
pub struct Cli {
    /// API key for the Gemini model service
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Sender address, also the SMTP login
    #[arg(long, env = "YOUR_EMAIL_ADDRESS")]
    email_address: Option<String>,
    /// App-specific password for the sender account
    #[arg(long, env = "YOUR_EMAIL_PASSWORD", hide_env_values = true)]
    email_password: Option<String>,
    #[arg(long, env = "RECIPIENT_EMAIL")]
    recipient: Option<String>,
    #[arg(long, env = "OUTPUT_FOLDER", default_value = "articles")]
    output_folder: PathBuf,
    #[arg(long, env = "MASTER_PROMPT_PATH", default_value = "prof_mackson_prompt.json")]
    master_prompt: PathBuf,
    #[arg(long, env = "MODEL_NAME", default_value = pm_inference::DEFAULT_MODEL_NAME)]
    model_name: String,
    #[arg(long, env = "MODEL_URL", default_value = pm_inference::DEFAULT_MODEL_URL)]
    model_url: String,
    #[arg(long, env = "SMTP_HOST", default_value = GMAIL_SMTP_HOST)]
    smtp_host: String,
    #[arg(long, env = "SMTP_PORT", default_value_t = SUBMISSION_PORT)]
    smtp_port: u16,
    /// Where articles go: file (default) or memory for a dry run that also skips email
    #[arg(long, env = "STORAGE", default_value = "file", value_parser = parse_storage)]
    storage: StorageKind,
    /// Email a short notice when a cycle fails
    #[arg(long, env = "NOTIFY_ON_FAILURE")]
    notify_on_failure: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the research cycle once, or on a schedule
    Run(RunArgs),
    /// Check which directives the master prompt provides
    Directives,
}

#[derive(clap::Args, Debug, Default)]
struct RunArgs {
    /// Run every day at this local time (HH:MM), forever
    #[arg(long, value_parser = parse_time, conflicts_with = "interval")]
    at: Option<NaiveTime>,
    /// Run now and then after every interval (e.g. 1d, 6h, 1h30m), forever
    #[arg(long)]
    interval: Option<HumanDuration>,
}

impl RunArgs {
    fn schedule(&self) -> Schedule {
        match (self.at, self.interval) {
            (Some(at), _) => Schedule::DailyAt(at),
            (None, Some(interval)) => Schedule::Every(interval.0),
            (None, None) => Schedule::Once,
        }
    }
}

fn parse_time(s: &str) -> std::result::Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| format!("Invalid time of day: {} (expected HH:MM)", s))
}

fn parse_storage(s: &str) -> std::result::Result<StorageKind, String> {
    s.parse::<StorageKind>().map_err(|e| e.to_string())
}

fn required(value: &Option<String>, name: &str) -> Result<String> {
    value
        .clone()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::Config(format!("{} is required", name)))
}

impl Cli {
    fn smtp_config(&self) -> Result<SmtpConfig> {
        Ok(SmtpConfig {
            host: self.smtp_host.clone(),
            port: self.smtp_port,
            sender: required(&self.email_address, "YOUR_EMAIL_ADDRESS")?,
            password: required(&self.email_password, "YOUR_EMAIL_PASSWORD")?,
            recipient: required(&self.recipient, "RECIPIENT_EMAIL")?,
        })
    }

    /// A dry run only logs the email, so it needs no SMTP settings.
    fn notifier(&self) -> Result<Arc<dyn Notifier>> {
        match self.storage {
            StorageKind::Memory => Ok(Arc::new(LogNotifier)),
            StorageKind::File => Ok(Arc::new(SmtpNotifier::new(self.smtp_config()?)?)),
        }
    }

    fn inference_config(&self) -> pm_inference::Config {
        pm_inference::Config {
            api_key: self.api_key.clone(),
            model_name: Some(self.model_name.clone()),
            model_url: Some(self.model_url.clone()),
        }
    }
}

fn list_directives(directives: &MasterDirectives) -> Result<()> {
    println!("Directives in master prompt:");
    for key in DirectiveKey::ALL {
        let mark = if directives.command(key).is_ok() { "✅" } else { "❌" };
        println!("  {} {}", mark, key);
    }
    let missing = directives.missing();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::MissingDirective(
            missing.iter().map(|k| k.as_str()).collect::<Vec<_>>().join(", "),
        ))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let logger = init_logging().with_prefix("[mackson]");
    let cli = Cli::parse();

    let directives = Arc::new(MasterDirectives::load(&cli.master_prompt).await?);
    info!("📜 Loaded master prompt from {}", cli.master_prompt.display());

    let schedule = match &cli.command {
        Some(Commands::Directives) => return list_directives(&directives),
        Some(Commands::Run(args)) => args.schedule(),
        None => Schedule::Once,
    };

    for key in directives.missing() {
        logger.warn(&format!("⚠️ Master prompt has no command for {}", key));
    }

    let model = pm_inference::create_model(cli.inference_config())?;
    info!("🧠 Inference model initialized (using {} {})", model.name(), cli.model_name);

    let storage = create_storage(cli.storage, &cli.output_folder);
    info!("💾 Storage initialized ({:?} at {})", cli.storage, cli.output_folder.display());

    let notifier = cli.notifier()?;
    match cli.storage {
        StorageKind::Memory => info!("📮 Notifier ready (dry run, emails are only logged)"),
        StorageKind::File => info!("📮 Notifier ready ({}:{})", cli.smtp_host, cli.smtp_port),
    }

    let manager = CycleManager::new(directives, model, storage, notifier)
        .with_failure_alerts(cli.notify_on_failure);

    logger.info(&format!("🗓️ Schedule: {:?}", schedule));

    let manager = &manager;
    run_scheduled(schedule, shutdown_signal(), move || async move {
        manager.run_and_log().await;
    })
    .await;

    Ok(())
}
