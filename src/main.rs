use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};

use precis::banner::{BannerInfo, SessionStats, print_banner, print_session_summary};
use precis::commands::{CommandRegistry, CommandResult, SessionInfo, StateChange, append_line};
use precis::config::{Config, Settings};
use precis::consts::{DEFAULT_BASE_URL, default_db_path};
use precis::form::{Form, Phase, SettleOutcome, view};
use precis::logging;
use precis::prompts::SummaryFormat;
use precis::provider::openai::OpenAiProvider;
use precis::spinner::Spinner;
use precis::summarizer::Summarizer;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// 3-5 sentence paragraph
    Prose,
    /// Dash-prefixed bullet list
    Bullets,
}

impl From<Format> for SummaryFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Prose => SummaryFormat::Prose,
            Format::Bullets => SummaryFormat::Bullets,
        }
    }
}

#[derive(Parser)]
#[command(name = "precis", version, about = "Paste it long, read it short.")]
struct Cli {
    /// Model identifier on the endpoint
    #[arg(long)]
    model: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Summary format
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// SQLite database for preferences (use :memory: for ephemeral)
    #[arg(short, long)]
    db: Option<String>,

    /// Remember --format and --model for future sessions
    #[arg(long, default_value_t = false)]
    save: bool,

    /// Summarize this text and exit (non-interactive)
    #[arg(short, long, conflicts_with = "file")]
    run: Option<String>,

    /// Summarize a file and exit; `-` reads stdin
    #[arg(long)]
    file: Option<PathBuf>,

    /// Debug logging for precis (PRECIS_LOG overrides)
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let db_path = resolve_db_path(cli.db.as_deref())?;
    let config = Config::open(&db_path)?;

    let mut settings = Settings {
        base_url: cli.base_url.clone(),
        ..Settings::from_env()
    };
    let cli_format = cli.format.map(SummaryFormat::from);
    config.apply(&mut settings, cli_format, cli.model.clone())?;

    if cli.save {
        if let Some(format) = cli_format {
            config.set_format(format)?;
        }
        if let Some(model) = &cli.model {
            config.set_model(model)?;
        }
    }
    tracing::debug!(?settings, db = %db_path, "settings resolved");

    let provider = Arc::new(OpenAiProvider::new(&settings));
    let mut form = Form::new(Summarizer::new(provider, settings.format));

    // Single task mode
    if let Some(text) = one_shot_input(&cli).await? {
        return run_once(&mut form, text).await;
    }

    let store_label = if db_path == ":memory:" {
        "ephemeral"
    } else {
        db_path.as_str()
    };
    let auth_status = settings.auth_status();
    print_banner(&BannerInfo {
        endpoint: settings.host(),
        model: &settings.model,
        format: settings.format.as_str(),
        auth_status: &auth_status,
        store: store_label,
    });

    let session = Session {
        settings: &settings,
        auth_status: &auth_status,
        config: &config,
        store: store_label,
    };
    let stats = repl(&mut form, &session).await?;
    print_session_summary(stats);
    Ok(())
}

/// `--db` if given, else `~/.precis/precis.db` (created on demand), else
/// an in-memory database when there is no home directory.
fn resolve_db_path(flag: Option<&str>) -> anyhow::Result<String> {
    if let Some(path) = flag {
        return Ok(path.to_string());
    }
    let Some(path) = default_db_path() else {
        tracing::warn!("no home directory, preferences will not be saved");
        return Ok(":memory:".to_string());
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    Ok(path.to_string_lossy().into_owned())
}

async fn one_shot_input(cli: &Cli) -> anyhow::Result<Option<String>> {
    if let Some(text) = &cli.run {
        return Ok(Some(text.clone()));
    }
    let Some(path) = &cli.file else {
        return Ok(None);
    };
    if path.as_os_str() == "-" {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("failed to read stdin")?;
        return Ok(Some(text));
    }
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(Some(text))
}

async fn run_once(form: &mut Form, text: String) -> anyhow::Result<()> {
    form.update_input(text);
    if !form.state().can_submit() {
        bail!("nothing to summarize: input is empty");
    }

    let spinner = Spinner::start(&format!("summarizing {}", view::counter(form.state())));
    form.summarize_and_wait().await;
    spinner.stop().await;

    match form.state().phase() {
        Phase::Succeeded(summary) => {
            println!("{summary}");
            Ok(())
        }
        Phase::Failed(message) => bail!("{message}"),
        Phase::Idle | Phase::Busy(_) => bail!("summary request did not settle"),
    }
}

/// Read-only session context for commands.
struct Session<'a> {
    settings: &'a Settings,
    auth_status: &'a str,
    config: &'a Config,
    store: &'a str,
}

async fn repl(form: &mut Form, session: &Session<'_>) -> anyhow::Result<SessionStats> {
    let registry = CommandRegistry::new();
    let mut stats = SessionStats::default();
    let mut spinner: Option<Spinner> = None;

    // Async stdin so Ctrl+C and settlements are caught at the prompt too
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    let mut show_prompt = true;

    loop {
        if show_prompt {
            print!("\n[{}] > ", view::status_line(form.state()));
            io::stdout().flush()?;
        }
        show_prompt = true;

        tokio::select! {
            outcome = form.next_settlement(), if form.state().is_busy() => {
                if let Some(spinner) = spinner.take() {
                    spinner.stop().await;
                }
                let Some(outcome) = outcome else { continue };
                stats.record(outcome);
                match outcome {
                    SettleOutcome::Succeeded | SettleOutcome::Failed => {
                        if let Some(result) = view::result(form.state()) {
                            println!("\n{result}");
                        }
                    }
                    SettleOutcome::Discarded => println!("\n  (late result discarded)"),
                    SettleOutcome::Stale => {}
                }
            }
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        // Ctrl+D (EOF)
                        println!();
                        break;
                    }
                    Err(e) => {
                        eprintln!("input error: {e}");
                        break;
                    }
                };

                let result = {
                    let info = SessionInfo {
                        form: form.state(),
                        format: form.format(),
                        model: form.model(),
                        endpoint: session.settings.host(),
                        auth_status: session.auth_status,
                        store: session.store,
                    };
                    registry.dispatch(&line, &info).await
                };

                match result {
                    CommandResult::NotACommand => {
                        show_prompt = false;
                        if form.state().is_busy() {
                            println!("  ✗ input is locked while summarizing");
                            continue;
                        }
                        if let Some(next) = append_line(form.state().input(), &line) {
                            form.update_input(next);
                        }
                    }
                    CommandResult::Handled => {}
                    CommandResult::Summarize => {
                        if form.summarize() {
                            let label = format!("summarizing {}", view::counter(form.state()));
                            spinner = Some(Spinner::start(&label));
                            show_prompt = false;
                        }
                    }
                    CommandResult::Clear => {
                        form.clear();
                        println!("  cleared");
                    }
                    CommandResult::StateChanged(StateChange::Format(format)) => {
                        form.set_format(format);
                        if let Err(e) = session.config.set_format(format) {
                            tracing::warn!(error = %e, "failed to save format preference");
                        }
                        println!("  format set to {format} (saved for next time)");
                    }
                    CommandResult::Quit => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                // Ctrl+C while busy abandons the result, not the REPL
                if form.state().is_busy() {
                    form.clear();
                    println!("\n  abandoned, the result will be discarded when it arrives");
                } else {
                    println!();
                    break;
                }
            }
        }
    }

    if let Some(spinner) = spinner.take() {
        spinner.stop().await;
    }
    Ok(stats)
}
