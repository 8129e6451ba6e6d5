//! Binary entry point for anxietyflow.
//!
//! This binary provides the CLI interface for the anxiety journal.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow unnecessary_wraps for consistent command function signatures
#![allow(clippy::unnecessary_wraps)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]

use anxietyflow::calendar::CalendarClient;
use anxietyflow::chat::{
    AnthropicProvider, ChatProvider, ChatSession, OllamaProvider, OpenAiProvider,
    RuleBasedProvider,
};
use anxietyflow::config::{ChatBackend, ChatConfig, FlowConfig};
use anxietyflow::export::{self, DataExport};
use anxietyflow::metrics::PeriodWindow;
use anxietyflow::models::{EntryKind, EntryPayload, ExposureResult, Priority};
use anxietyflow::services::{
    AnticipationRequest, EpisodeRequest, IdeaRequest, JournalService, OutcomeRequest,
    SuccessRequest, VoiceNoteRequest,
};
use anxietyflow::storage::{AuthRecord, JournalStore};
use anxietyflow::{observability, Entry};
use chrono::{Datelike, Utc};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// AnxietyFlow - a personal anxiety and panic self-tracking journal.
#[derive(Parser)]
#[command(name = "anxietyflow")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Override the data directory.
    #[arg(long, global = true, env = "ANXIETYFLOW_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Log a crisis episode.
    Episode {
        /// Where/when the crisis happened.
        #[arg(short, long)]
        situation: String,

        /// Anxiety intensity before restructuring (0-10).
        #[arg(long)]
        before: u8,

        /// Anxiety intensity after restructuring (0-10).
        #[arg(long)]
        after: u8,

        /// Trigger tags (comma-separated).
        #[arg(short, long)]
        triggers: Option<String>,

        /// Free-text extra trigger.
        #[arg(long)]
        other_trigger: Option<String>,

        /// Detected cognitive distortion.
        #[arg(short, long, default_value = "")]
        distortion: String,

        /// More realistic alternative thought.
        #[arg(short, long, default_value = "")]
        alternative: String,

        /// Physical symptom tags (comma-separated).
        #[arg(long)]
        symptoms: Option<String>,

        /// Duration in minutes.
        #[arg(long)]
        duration: Option<u32>,
    },

    /// Log an idea or belief to work on.
    Idea {
        /// Short title.
        #[arg(short, long)]
        title: String,

        /// The idea or belief text.
        #[arg(short, long)]
        body: String,

        /// Tags (comma-separated).
        #[arg(long, default_value = "")]
        tags: String,

        /// Suggested cognitive distortion.
        #[arg(short, long)]
        distortion: Option<String>,

        /// Priority: low, medium or high.
        #[arg(short, long, default_value = "medium")]
        priority: String,
    },

    /// Log an anticipatory worry.
    Anticipation {
        /// The feared future event.
        #[arg(short, long)]
        event: String,

        /// Predicted symptom probability before restructuring (0-100).
        #[arg(long)]
        prob_before: u8,

        /// Predicted symptom probability after restructuring (0-100).
        #[arg(long)]
        prob_after: u8,

        /// Imagined catastrophe severity (0-10).
        #[arg(long, default_value = "5")]
        severity: u8,

        /// Detected cognitive distortion.
        #[arg(short, long, default_value = "")]
        distortion: String,

        /// More realistic alternative thought.
        #[arg(short, long, default_value = "")]
        alternative: String,

        /// The feared symptom actually occurred (records an outcome).
        #[arg(long)]
        occurred: Option<bool>,

        /// Real intensity experienced (0-10), with --occurred.
        #[arg(long, default_value = "0")]
        real_intensity: u8,

        /// Outcome comment, with --occurred.
        #[arg(long, default_value = "")]
        comment: String,
    },

    /// Log a completed exposure.
    Success {
        /// The exposure situation that was completed.
        #[arg(short, long)]
        situation: String,

        /// Duration in minutes.
        #[arg(short, long)]
        minutes: u32,

        /// Coping skill tags (comma-separated).
        #[arg(long)]
        skills: Option<String>,

        /// Result: no-symptoms, managed-anxiety or partial.
        #[arg(short, long, default_value = "no_symptoms")]
        result: String,

        /// What was learned.
        #[arg(short, long, default_value = "")]
        learning: String,

        /// Confidence after the exposure (0-10).
        #[arg(long, default_value = "5")]
        confidence: u8,
    },

    /// Log a voice note (metadata only).
    VoiceNote {
        /// Note title.
        #[arg(short, long)]
        title: String,

        /// Short description of the recording.
        #[arg(short, long, default_value = "")]
        description: String,

        /// Recording size in bytes (duration is approximated from it).
        #[arg(long, default_value = "0")]
        bytes: u64,

        /// Media type tag.
        #[arg(long, default_value = "audio/wav")]
        media_type: String,
    },

    /// Show the most recent entries.
    Recent {
        /// Number of entries to show.
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// List entries of one kind.
    List {
        /// Entry kind: episode, idea, anticipation, success or voice-note.
        kind: String,

        /// Keep only the last N matches.
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show the metrics dashboard.
    Dashboard {
        /// Reporting period: 30d or month.
        #[arg(short, long, default_value = "30d")]
        period: String,
    },

    /// Show the classified month calendar.
    Calendar {
        /// Month to show as YYYY-MM (default: current month).
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Talk to the assistant.
    Chat {
        /// Message to send. Without it, starts an interactive session.
        message: Option<String>,

        /// Provider: rules, openai, anthropic or ollama.
        #[arg(short, long)]
        provider: Option<String>,
    },

    /// Export a progress report or the raw data.
    Export {
        /// What to export.
        #[command(subcommand)]
        what: ExportTarget,
    },

    /// Import a previously exported data dump, replacing all entries.
    Import {
        /// Path to the dump file.
        file: PathBuf,
    },

    /// Show or change settings.
    Settings {
        /// Show current settings.
        #[arg(long)]
        show: bool,

        /// Set a value as KEY=VALUE (auto_save, voice_notes, daily_reminder,
        /// event_notifications).
        #[arg(long)]
        set: Option<String>,
    },

    /// Show upcoming calendar events.
    Agenda {
        /// Store a calendar access token and mark the account connected.
        #[arg(long)]
        set_token: Option<String>,
    },

    /// Delete all journal data.
    Wipe {
        /// Confirm the wipe.
        #[arg(long)]
        force: bool,
    },

    /// Show status.
    Status,

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

/// What to export.
#[derive(Subcommand)]
enum ExportTarget {
    /// Spanish progress report over the chosen period.
    Report {
        /// Reporting period: 30d or month.
        #[arg(short, long, default_value = "30d")]
        period: String,

        /// Output directory.
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Raw JSON dump of entries and settings.
    Data {
        /// Output directory.
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
}

/// Main entry point.
fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    observability::init(cli.verbose);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };
    let config = match cli.data_dir {
        Some(dir) => config.with_data_dir(dir),
        None => config,
    };

    match run_command(cli.command, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(command: Commands, config: FlowConfig) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Episode {
            situation,
            before,
            after,
            triggers,
            other_trigger,
            distortion,
            alternative,
            symptoms,
            duration,
        } => cmd_episode(
            &config,
            EpisodeRequest {
                situation,
                intensity_before: before,
                triggers: split_list(triggers),
                other_trigger,
                distortion,
                alternative_thought: alternative,
                intensity_after: after,
                symptoms: split_list(symptoms),
                duration_minutes: duration,
            },
        ),

        Commands::Idea {
            title,
            body,
            tags,
            distortion,
            priority,
        } => cmd_idea(&config, title, body, tags, distortion, priority),

        Commands::Anticipation {
            event,
            prob_before,
            prob_after,
            severity,
            distortion,
            alternative,
            occurred,
            real_intensity,
            comment,
        } => cmd_anticipation(
            &config,
            AnticipationRequest {
                future_event: event,
                symptom_probability_before: prob_before,
                catastrophe_severity: severity,
                distortion,
                alternative_thought: alternative,
                symptom_probability_after: prob_after,
                outcome: occurred.map(|symptom_occurred| OutcomeRequest {
                    symptom_occurred,
                    real_intensity,
                    comment,
                }),
            },
        ),

        Commands::Success {
            situation,
            minutes,
            skills,
            result,
            learning,
            confidence,
        } => cmd_success(&config, situation, minutes, skills, result, learning, confidence),

        Commands::VoiceNote {
            title,
            description,
            bytes,
            media_type,
        } => cmd_voice_note(&config, title, description, bytes, media_type),

        Commands::Recent { limit } => cmd_recent(&config, limit),

        Commands::List { kind, limit } => cmd_list(&config, &kind, limit),

        Commands::Dashboard { period } => cmd_dashboard(&config, &period),

        Commands::Calendar { month } => cmd_calendar(&config, month),

        Commands::Chat { message, provider } => cmd_chat(&config, message, provider),

        Commands::Export { what } => match what {
            ExportTarget::Report { period, output } => cmd_export_report(&config, &period, &output),
            ExportTarget::Data { output } => cmd_export_data(&config, &output),
        },

        Commands::Import { file } => cmd_import(&config, &file),

        Commands::Settings { show, set } => cmd_settings(&config, show, set),

        Commands::Agenda { set_token } => cmd_agenda(&config, set_token),

        Commands::Wipe { force } => cmd_wipe(&config, force),

        Commands::Status => cmd_status(&config),

        Commands::Completions { shell } => cmd_completions(shell),
    }
}

/// Loads configuration.
fn load_config(path: Option<&str>) -> Result<FlowConfig, Box<dyn std::error::Error>> {
    if let Some(config_path) = path {
        return FlowConfig::load_from_file(std::path::Path::new(config_path))
            .map_err(std::convert::Into::into);
    }

    Ok(FlowConfig::load_default())
}

/// Opens the journal service over the configured data directory.
fn open_service(config: &FlowConfig) -> Result<JournalService, Box<dyn std::error::Error>> {
    let store = JournalStore::open(&config.data_dir)?;
    Ok(JournalService::new(store))
}

/// Splits an optional comma-separated flag value.
fn split_list(raw: Option<String>) -> Vec<String> {
    raw.map(|t| anxietyflow::models::split_tags(&t))
        .unwrap_or_default()
}

/// Prints append warnings without failing the command.
fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("Warning: {warning}");
    }
}

/// One-line display of an entry.
fn entry_line(entry: &Entry) -> String {
    let when = entry.timestamp.format("%Y-%m-%d %H:%M");
    let what = match &entry.payload {
        EntryPayload::Episode(e) => {
            format!("{} ({} -> {})", e.situation, e.intensity_before, e.intensity_after)
        },
        EntryPayload::Idea(i) => i.title.clone(),
        EntryPayload::Anticipation(a) => {
            let state = if a.is_completed() { "completada" } else { "pendiente" };
            format!("{} ({state})", a.future_event)
        },
        EntryPayload::Success(s) => format!("{} ({} min)", s.situation, s.duration_minutes),
        EntryPayload::VoiceNote(v) => format!("{} (~{}s)", v.title, v.approx_duration_secs),
    };
    format!("{when}  {:<13} {what}", entry.kind().as_str())
}

/// Episode command.
fn cmd_episode(
    config: &FlowConfig,
    request: EpisodeRequest,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut service = open_service(config)?;
    let result = service.log_episode(request)?;
    print_warnings(&result.warnings);
    println!("Episode logged: {}", result.entry.id);
    Ok(())
}

/// Idea command.
fn cmd_idea(
    config: &FlowConfig,
    title: String,
    body: String,
    tags: String,
    distortion: Option<String>,
    priority: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let priority = Priority::parse(&priority)
        .ok_or_else(|| format!("unknown priority: {priority} (use low, medium or high)"))?;

    let mut service = open_service(config)?;
    let result = service.log_idea(IdeaRequest {
        title,
        body,
        tags,
        suggested_distortion: distortion,
        priority,
    })?;
    print_warnings(&result.warnings);
    println!("Idea logged: {}", result.entry.id);
    Ok(())
}

/// Anticipation command.
fn cmd_anticipation(
    config: &FlowConfig,
    request: AnticipationRequest,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut service = open_service(config)?;
    let result = service.log_anticipation(request)?;
    print_warnings(&result.warnings);
    println!("Anticipation logged: {}", result.entry.id);
    Ok(())
}

/// Success command.
fn cmd_success(
    config: &FlowConfig,
    situation: String,
    minutes: u32,
    skills: Option<String>,
    result: String,
    learning: String,
    confidence: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = ExposureResult::parse(&result).ok_or_else(|| {
        format!("unknown result: {result} (use no-symptoms, managed-anxiety or partial)")
    })?;

    let mut service = open_service(config)?;
    let appended = service.log_success(SuccessRequest {
        situation,
        duration_minutes: minutes,
        skills: split_list(skills),
        result,
        learning,
        confidence_after: confidence,
    })?;
    print_warnings(&appended.warnings);
    println!("Success logged: {}", appended.entry.id);
    Ok(())
}

/// Voice-note command.
fn cmd_voice_note(
    config: &FlowConfig,
    title: String,
    description: String,
    bytes: u64,
    media_type: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut service = open_service(config)?;
    let result = service.log_voice_note(VoiceNoteRequest {
        title,
        description,
        recording_bytes: bytes,
        media_type,
    })?;
    print_warnings(&result.warnings);
    println!("Voice note logged: {}", result.entry.id);
    Ok(())
}

/// Recent command.
fn cmd_recent(config: &FlowConfig, limit: usize) -> Result<(), Box<dyn std::error::Error>> {
    let service = open_service(config)?;
    let entries = service.store().recent(limit);

    if entries.is_empty() {
        println!("No entries yet.");
        return Ok(());
    }
    for entry in entries {
        println!("{}", entry_line(entry));
    }
    Ok(())
}

/// List command.
fn cmd_list(
    config: &FlowConfig,
    kind: &str,
    limit: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let kind = EntryKind::parse(kind).ok_or_else(|| format!("unknown entry kind: {kind}"))?;

    let service = open_service(config)?;
    let entries = service.store().entries_by_kind(kind, limit);

    if entries.is_empty() {
        println!("No {kind} entries.");
        return Ok(());
    }
    for entry in entries {
        println!("{}", entry_line(entry));
    }
    Ok(())
}

/// Dashboard command.
fn cmd_dashboard(config: &FlowConfig, period: &str) -> Result<(), Box<dyn std::error::Error>> {
    let window =
        PeriodWindow::parse(period).ok_or_else(|| format!("unknown period: {period} (use 30d or month)"))?;

    let service = open_service(config)?;
    let dashboard = service.dashboard(window, Utc::now());
    let m = &dashboard.summary;

    println!("Dashboard ({})", dashboard.window);
    println!("==================");
    println!();
    println!("Índice de Resiliencia: {}/100", m.resilience_index);
    println!("Tendencia: {}", dashboard.trend.label());
    println!();
    println!("Episodios registrados: {}", m.episode_count);
    println!("Intensidad media: {:.1}/10", m.avg_intensity);
    println!("Reducción media: {}%", m.avg_reduction);
    println!("Exposiciones realizadas: {}", m.exposure_count);
    println!("Tasa de éxito: {}%", m.success_rate);
    println!("Anticipaciones refutadas: {}%", m.refuted_rate);
    Ok(())
}

/// Calendar command.
fn cmd_calendar(
    config: &FlowConfig,
    month: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (year, month) = match month {
        Some(raw) => parse_year_month(&raw)?,
        None => {
            let now = Utc::now();
            (now.year(), now.month())
        },
    };

    let service = open_service(config)?;
    let days = service.month_view(year, month)?;

    println!("Calendario {year}-{month:02}");
    for day in days {
        let Some(class) = day.class else { continue };
        let mut badges = String::new();
        if day.entry_count > 1 {
            badges.push_str(&format!("  x{}", day.entry_count));
        }
        if day.exposure_minutes > 0 {
            badges.push_str(&format!("  {} min exposición", day.exposure_minutes));
        }
        println!("{}  {}{badges}", day.date, class);
    }
    Ok(())
}

/// Parses a `YYYY-MM` month flag.
fn parse_year_month(raw: &str) -> Result<(i32, u32), Box<dyn std::error::Error>> {
    let parts: Vec<&str> = raw.splitn(2, '-').collect();
    if parts.len() == 2 {
        if let (Ok(year), Ok(month)) = (parts[0].parse::<i32>(), parts[1].parse::<u32>()) {
            if (1..=12).contains(&month) {
                return Ok((year, month));
            }
        }
    }
    Err(format!("invalid month: {raw} (expected YYYY-MM)").into())
}

/// Builds the chat provider selected by flag or config.
fn build_chat_provider(chat: &ChatConfig, backend: ChatBackend) -> Box<dyn ChatProvider> {
    let http = chat.http_config();
    match backend {
        ChatBackend::Rules => Box::new(RuleBasedProvider::new()),
        ChatBackend::OpenAi => {
            let mut provider = OpenAiProvider::new(http);
            if let Some(ref api_key) = chat.api_key {
                provider = provider.with_api_key(api_key);
            }
            if let Some(ref model) = chat.model {
                provider = provider.with_model(model);
            }
            if let Some(ref base_url) = chat.base_url {
                provider = provider.with_endpoint(base_url);
            }
            Box::new(provider)
        },
        ChatBackend::Anthropic => {
            let mut provider = AnthropicProvider::new(http);
            if let Some(ref api_key) = chat.api_key {
                provider = provider.with_api_key(api_key);
            }
            if let Some(ref model) = chat.model {
                provider = provider.with_model(model);
            }
            if let Some(ref base_url) = chat.base_url {
                provider = provider.with_endpoint(base_url);
            }
            Box::new(provider)
        },
        ChatBackend::Ollama => {
            let mut provider = OllamaProvider::new(http);
            if let Some(ref model) = chat.model {
                provider = provider.with_model(model);
            }
            if let Some(ref base_url) = chat.base_url {
                provider = provider.with_endpoint(base_url);
            }
            Box::new(provider)
        },
    }
}

/// Chat command.
fn cmd_chat(
    config: &FlowConfig,
    message: Option<String>,
    provider: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let backend = provider.map_or(config.chat.provider, |p| ChatBackend::parse(&p));
    let mut session = ChatSession::new(build_chat_provider(&config.chat, backend));

    if let Some(message) = message {
        print_reply(&session.send(&message));
        return Ok(());
    }

    println!(
        "Asistente ({}). Escribe tu mensaje; línea vacía o Ctrl-D para salir.",
        session.provider_name()
    );
    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        print_reply(&session.send(line));
    }
    Ok(())
}

/// Prints an assistant reply with its suggestions.
fn print_reply(reply: &anxietyflow::chat::ProviderReply) {
    println!("{}", reply.text);
    if !reply.suggestions.is_empty() {
        println!();
        println!("Sugerencias:");
        for suggestion in &reply.suggestions {
            println!("  - {suggestion}");
        }
    }
}

/// Export-report command.
fn cmd_export_report(
    config: &FlowConfig,
    period: &str,
    output: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let window =
        PeriodWindow::parse(period).ok_or_else(|| format!("unknown period: {period} (use 30d or month)"))?;

    let service = open_service(config)?;
    let dashboard = service.dashboard(window, Utc::now());
    let path = export::write_report(output, &dashboard.summary, Utc::now())?;
    println!("Report written to {}", path.display());
    Ok(())
}

/// Export-data command.
fn cmd_export_data(
    config: &FlowConfig,
    output: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let service = open_service(config)?;
    let dump = DataExport::new(
        service.store().entries().to_vec(),
        service.store().settings().clone(),
        Utc::now(),
    );
    let path = export::write_data(output, &dump)?;
    println!("Data written to {} ({} entries)", path.display(), dump.entries.len());
    Ok(())
}

/// Import command.
fn cmd_import(
    config: &FlowConfig,
    file: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let dump = export::read_data(file)?;
    let count = dump.entries.len();

    let mut service = open_service(config)?;
    service.store_mut().replace_entries(dump.entries)?;
    service.store_mut().update_settings(dump.settings)?;
    println!("Imported {count} entries from {}", file.display());
    Ok(())
}

/// Settings command.
fn cmd_settings(
    config: &FlowConfig,
    show: bool,
    set: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut service = open_service(config)?;

    if let Some(assignment) = set {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| format!("expected KEY=VALUE, got: {assignment}"))?;
        let value: bool = value
            .parse()
            .map_err(|_| format!("expected true or false, got: {value}"))?;

        let mut settings = service.store().settings().clone();
        match key {
            "auto_save" => settings.auto_save = value,
            "voice_notes" => settings.voice_notes = value,
            "daily_reminder" => settings.daily_reminder = value,
            "event_notifications" => settings.event_notifications = value,
            other => return Err(format!("unknown setting: {other}").into()),
        }
        service.store_mut().update_settings(settings)?;
        println!("Set {key} = {value}");
        return Ok(());
    }

    if show {
        let settings = service.store().settings();
        println!("auto_save = {}", settings.auto_save);
        println!("voice_notes = {}", settings.voice_notes);
        println!("daily_reminder = {}", settings.daily_reminder);
        println!("event_notifications = {}", settings.event_notifications);
    } else {
        println!("Use --show to display settings");
        println!("Use --set KEY=VALUE to change one");
    }
    Ok(())
}

/// Agenda command.
fn cmd_agenda(
    config: &FlowConfig,
    set_token: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut service = open_service(config)?;

    if let Some(token) = set_token {
        service.store_mut().update_auth(AuthRecord {
            authenticated: true,
            access_token: Some(token),
        })?;
        println!("Calendar token stored.");
        return Ok(());
    }

    let client = CalendarClient::new();
    let events = client.upcoming_events(service.store().auth(), Utc::now());

    if events.is_empty() {
        println!("No upcoming events (or calendar not connected).");
        return Ok(());
    }
    for event in events {
        let when = event.start.map_or_else(
            || event.start_date.clone().unwrap_or_default(),
            |start| start.format("%Y-%m-%d %H:%M").to_string(),
        );
        println!("{when}  {}", event.summary);
    }
    Ok(())
}

/// Wipe command.
fn cmd_wipe(config: &FlowConfig, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !force {
        println!("This deletes all entries and resets settings.");
        println!("Run again with --force to confirm.");
        return Ok(());
    }

    let mut service = open_service(config)?;
    service.store_mut().wipe()?;
    println!("All data wiped.");
    Ok(())
}

/// Status command.
fn cmd_status(config: &FlowConfig) -> Result<(), Box<dyn std::error::Error>> {
    let service = open_service(config)?;
    let store = service.store();

    println!("AnxietyFlow Status");
    println!("==================");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!("Data Directory: {}", store.data_dir().display());
    println!("Entries: {}", store.entries().len());
    for kind in EntryKind::all() {
        let count = store.entries_by_kind(*kind, None).len();
        if count > 0 {
            println!("  {kind}: {count}");
        }
    }
    let calendar = if store.auth().authenticated {
        "Connected"
    } else {
        "Not connected"
    };
    println!("Calendar: {calendar}");
    println!("Chat provider: {}", config.chat.provider.as_str());
    Ok(())
}

/// Completions command.
fn cmd_completions(shell: Shell) -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
    Ok(())
}
