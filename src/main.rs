// Habu Assistant - cleanroom chat assistant
// Main entry point

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::style::Stylize;

use habu_assistant::chat::{extract_query_context, ChatService};
use habu_assistant::cli::{format_health, format_reply, format_suggestions, suggestions_for, Repl};
use habu_assistant::client::ApiClient;
use habu_assistant::config::{load_config, load_config_from, Config};
use habu_assistant::conversation::{
    load_or_default, ConversationSession, DebouncedWriter, FileStateStore, StateStore,
};
use habu_assistant::health::{HealthMonitor, HttpProbe, StatusIndicators};
use habu_assistant::modes::{ChatMode, UserPreferences};
use habu_assistant::prompts::{
    ContextualPromptService, ConversationState, Page, PromptDatabase, TemplateContext,
};
use habu_assistant::support::{format_support_response, parse_intent, CustomerSize, SupportQuery};

#[derive(Parser)]
#[command(
    name = "habu-assistant",
    version,
    about = "Cleanroom chat assistant with contextual suggestions"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: ~/.habu-assistant/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat (default)
    Chat {
        /// Starting mode: support or technical
        #[arg(long)]
        mode: Option<ChatMode>,
        /// Answer locally without calling the API
        #[arg(long)]
        offline: bool,
    },
    /// Print suggested questions for a conversation state
    Suggest {
        /// Page tag or route (home, cleanrooms, api_explorer, ...)
        #[arg(long, default_value = "home")]
        page: String,
        /// Messages exchanged so far
        #[arg(long, default_value_t = 0)]
        length: usize,
        /// Templates available (all ready)
        #[arg(long)]
        templates: Option<u32>,
        #[arg(long)]
        viewed_templates: bool,
        #[arg(long)]
        submitted: bool,
        #[arg(long)]
        active: bool,
        #[arg(long)]
        completed: bool,
        #[arg(long)]
        viewed_results: bool,
    },
    /// Customer-support feasibility assessment
    Assess {
        #[arg(required = true)]
        question: Vec<String>,
        #[arg(long)]
        industry: Option<String>,
        /// small, medium, large or enterprise
        #[arg(long)]
        size: Option<CustomerSize>,
    },
    /// Technical-expert answer
    Tech {
        #[arg(required = true)]
        question: Vec<String>,
    },
    /// Check service health
    Health {
        /// Keep polling until Ctrl-C
        #[arg(long)]
        watch: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    let log_level = if cli.debug || config.features.debug_logging {
        "habu_assistant=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    if let Err(e) = run(cli.command, config).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(command: Option<Commands>, config: Config) -> Result<()> {
    let command = command.unwrap_or(Commands::Chat {
        mode: None,
        offline: false,
    });

    match command {
        Commands::Chat { mode, offline } => chat(config, mode, offline).await,
        Commands::Suggest {
            page,
            length,
            templates,
            viewed_templates,
            submitted,
            active,
            completed,
            viewed_results,
        } => {
            let engine = prompt_engine(&config)?;
            let state = ConversationState {
                has_viewed_templates: viewed_templates,
                has_submitted_query: submitted,
                has_active_query: active,
                has_completed_query: completed,
                has_viewed_results: viewed_results,
                available_templates: templates.unwrap_or(0),
                ready_templates: templates.unwrap_or(0),
                conversation_length: length,
                ..ConversationState::new().on_page(Page::from_path(&page))
            };
            let template_ctx = templates.map(|n| TemplateContext {
                total_templates: n,
                ready_templates: n,
                ..TemplateContext::empty()
            });

            let suggestions = suggestions_for(
                &engine,
                &state,
                template_ctx.as_ref(),
                config.chat.default_mode,
                config.prompts.max_prompts,
            );
            println!("{}", format_suggestions(&suggestions));
            Ok(())
        }
        Commands::Assess {
            question,
            industry,
            size,
        } => {
            let service = ChatService::offline();
            let question = question.join(" ");
            let intent = parse_intent(&question, service.support().library());
            let ctx = extract_query_context(&question);

            let mut query = SupportQuery::new(question.as_str())
                .with_size(size.unwrap_or(ctx.customer_size))
                .with_technical_level(UserPreferences::default().technical_level());
            if let Some(industry) = industry.as_deref().or(ctx.industry).or(intent.industry) {
                query = query.with_industry(industry);
            }

            let response = service.support().generate_response(&query);
            println!("{}", format_support_response(&response, &intent));
            Ok(())
        }
        Commands::Tech { question } => {
            let service = ChatService::offline();
            let reply = service.process_locally(
                &question.join(" "),
                ChatMode::TechnicalExpert,
                &UserPreferences::default(),
                &[],
            );
            println!("{}", format_reply(&reply));
            Ok(())
        }
        Commands::Health { watch } => health(config, watch).await,
    }
}

fn prompt_engine(config: &Config) -> Result<ContextualPromptService> {
    let database = match &config.prompts.table_path {
        Some(path) => PromptDatabase::load_from_file(path)?,
        None => PromptDatabase::builtin(),
    };
    Ok(ContextualPromptService::new(database))
}

fn health_monitor(config: &Config) -> Result<HealthMonitor> {
    let probe = HttpProbe::new(config.api.health_timeout())?;
    Ok(HealthMonitor::new(Arc::new(probe), config.health_services())
        .with_interval(config.health.poll_interval()))
}

async fn chat(config: Config, mode: Option<ChatMode>, offline: bool) -> Result<()> {
    let client = if offline || config.chat.offline {
        None
    } else {
        Some(ApiClient::new(&config.api.base_url, config.api.chat_timeout())?)
    };
    let service = ChatService::new(client);
    let prompts = prompt_engine(&config)?;
    let monitor = health_monitor(&config)?;

    let state_dir = if config.persistence.enabled {
        config.state_dir()
    } else {
        None
    };
    let session = match state_dir {
        Some(dir) => {
            let store: Arc<dyn StateStore> = Arc::new(FileStateStore::in_dir(&dir));
            let initial = load_or_default(store.as_ref());
            let writer = DebouncedWriter::spawn(
                store,
                config.persistence.debounce(),
                config.persistence.max_history,
            );
            ConversationSession::new(initial).with_writer(writer)
        }
        None => ConversationSession::new(Default::default()),
    };

    let repl = Repl::new(config, service, prompts, session, monitor, mode);
    repl.run().await
}

async fn health(config: Config, watch: bool) -> Result<()> {
    let monitor = health_monitor(&config)?;
    let client = ApiClient::new(&config.api.base_url, config.api.health_timeout())?;

    loop {
        let snapshot = monitor.check_now().await;
        let report = client.health().await.ok();
        let indicators = StatusIndicators::from_report(report.as_ref());
        println!("{}", format_health(&snapshot, Some(&indicators)));

        if !watch {
            return Ok(());
        }

        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for Ctrl-C")?;
                return Ok(());
            }
            _ = tokio::time::sleep(config.health.poll_interval()) => println!(),
        }
    }
}
