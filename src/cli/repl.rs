// Interactive REPL

use anyhow::{Context, Result};
use crossterm::{style::Stylize, terminal};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

use crate::chat::{AssistantReply, ChatService};
use crate::client::{render_panel, ClientError, RecoveryState};
use crate::config::Config;
use crate::conversation::{ConversationSession, Role};
use crate::health::{HealthMonitor, StatusIndicators};
use crate::modes::{welcome_message, ChatMode, ChatModeState, UserPreferences};
use crate::prompts::{ContextualPromptService, TemplateContext};

use super::commands::{
    format_health, format_help, format_partners, format_reply, format_suggestions,
    format_templates, suggestions_for, Command, Suggestion,
};

/// File (under the state directory) holding the mode state
const MODE_STATE_FILE: &str = "habu-chat-mode.json";

/// Get current terminal width, or default to 80 if not a TTY
fn terminal_width() -> usize {
    terminal::size().map(|(w, _)| w as usize).unwrap_or(80)
}

/// Load the persisted mode state. `None` when nothing usable is stored.
pub fn load_mode_state(dir: &Path) -> Option<ChatModeState> {
    let path = dir.join(MODE_STATE_FILE);
    if !path.exists() {
        return None;
    }

    let loaded = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))
        .and_then(|raw| serde_json::from_str::<ChatModeState>(&raw).context("Failed to parse chat mode state"));

    match loaded {
        Ok(state) => {
            tracing::info!(
                "Loaded chat mode state ({} messages)",
                state.conversation_history.len()
            );
            Some(state)
        }
        Err(e) => {
            tracing::warn!("Failed to load persisted chat mode state: {:#}", e);
            None
        }
    }
}

/// Save the mode state, keeping only the recent history
pub fn save_mode_state(dir: &Path, state: &ChatModeState) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create state directory {}", dir.display()))?;
    let path = dir.join(MODE_STATE_FILE);
    let json = serde_json::to_string_pretty(&state.persisted())
        .context("Failed to serialize chat mode state")?;
    std::fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

pub struct Repl {
    config: Config,
    chat: ChatService,
    prompts: ContextualPromptService,
    session: ConversationSession,
    modes: ChatModeState,
    recovery: RecoveryState,
    monitor: HealthMonitor,
    /// Suggestions last shown, addressed by `/N`
    suggestions: Vec<Suggestion>,
    /// Message whose request failed, resent by `/retry`
    pending: Option<String>,
    state_dir: Option<PathBuf>,
    is_interactive: bool,
}

impl Repl {
    pub fn new(
        config: Config,
        chat: ChatService,
        prompts: ContextualPromptService,
        session: ConversationSession,
        monitor: HealthMonitor,
        mode: Option<ChatMode>,
    ) -> Self {
        let state_dir = if config.persistence.enabled {
            config.state_dir()
        } else {
            None
        };

        let mut modes = state_dir
            .as_deref()
            .and_then(load_mode_state)
            .unwrap_or_else(|| {
                ChatModeState::new(UserPreferences {
                    default_mode: config.chat.default_mode,
                    ..UserPreferences::default()
                })
            });
        if let Some(mode) = mode {
            modes.switch_mode(mode);
        }

        Self {
            config,
            chat,
            prompts,
            session,
            modes,
            recovery: RecoveryState::new(),
            monitor,
            suggestions: Vec::new(),
            pending: None,
            state_dir,
            is_interactive: io::stdout().is_terminal(),
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let cancel = CancellationToken::new();
        let poller = self.monitor.spawn(cancel.clone());

        if self.is_interactive {
            println!("Habu Assistant v{}", env!("CARGO_PKG_VERSION"));
            if self.chat.is_online() {
                println!(
                    "Connected to {} ✓",
                    self.chat.client().map(|c| c.base_url()).unwrap_or_default()
                );
            } else {
                println!("Offline: answering locally");
            }
            println!();
            println!("{}", welcome_message(self.modes.current_mode));
            println!();
            self.show_suggestions();
            println!();
            println!("Type /help for commands.");
        } else {
            eprintln!("# Habu Assistant - non-interactive mode");
        }

        let mut editor = DefaultEditor::new().context("Failed to initialize line editor")?;

        loop {
            if self.is_interactive {
                println!();
                self.print_status_line();
                self.print_separator();
            }

            let line = match editor.readline("> ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e).context("Failed to read input"),
            };
            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            let _ = editor.add_history_entry(input);

            match Command::parse(input) {
                Some(Command::Quit) => {
                    if self.is_interactive {
                        println!("Goodbye!");
                    }
                    break;
                }
                Some(command) => self.handle_command(command).await,
                None => self.submit(input.to_string()).await,
            }
        }

        cancel.cancel();
        if let Err(e) = poller.await {
            tracing::warn!("Health monitor task failed: {}", e);
        }

        if let Some(dir) = &self.state_dir {
            if let Err(e) = save_mode_state(dir, &self.modes) {
                tracing::warn!("Failed to save chat mode state: {:#}", e);
            }
        }
        self.session.close().await
    }

    async fn handle_command(&mut self, command: Command) {
        match command {
            Command::Help => println!("{}", format_help()),
            Command::Quit => {}
            Command::Mode(None) => {
                let config = self.modes.current_config();
                println!("{} Current mode: {}", config.icon, config.name);
            }
            Command::Mode(Some(mode)) => {
                self.modes.switch_mode(mode);
                println!("{}", welcome_message(mode));
                println!();
                self.show_suggestions();
            }
            Command::Page(None) => println!("Current page: {}", self.session.current_page()),
            Command::Page(Some(page)) => {
                self.session.set_current_page(page);
                println!("Page: {}", page);
                self.show_suggestions();
            }
            Command::Suggest => self.show_suggestions(),
            Command::Templates => self.load_templates().await,
            Command::Partners => self.list_partners().await,
            Command::Health => self.show_health().await,
            Command::Reset => {
                self.session.reset();
                let mode = self.modes.current_mode;
                self.modes = ChatModeState::new(self.modes.preferences.clone());
                self.modes.switch_mode(mode);
                self.recovery.dismiss();
                self.pending = None;
                println!("Conversation reset.");
                println!();
                println!("{}", welcome_message(mode));
                println!();
                self.show_suggestions();
            }
            Command::Retry => self.retry().await,
            Command::Dismiss => {
                self.recovery.dismiss();
                self.pending = None;
                println!("Dismissed.");
            }
            Command::Demo => {
                if self.recovery.is_demo_mode() {
                    self.recovery.exit_demo();
                    println!("🎬 Demo mode off");
                } else {
                    self.recovery.switch_to_demo();
                    println!("🎬 Demo mode on: answering locally");
                    if let Some(message) = self.pending.take() {
                        self.answer(message).await;
                    }
                }
            }
            Command::Pick(n) => match self.suggestions.get(n - 1).cloned() {
                Some(suggestion) => {
                    println!("> {}", suggestion.query);
                    self.submit(suggestion.query).await;
                }
                None => eprintln!("No suggestion #{} (try /suggest)", n),
            },
            Command::Unknown(input) => {
                eprintln!("Unknown command: {}. Type /help for commands.", input)
            }
        }
    }

    async fn submit(&mut self, message: String) {
        self.session.add_message(Role::User, message.as_str());
        self.modes.add_message(Role::User, message.as_str(), None);
        self.answer(message).await;
    }

    async fn retry(&mut self) {
        let Some(message) = self.pending.clone() else {
            println!("Nothing to retry.");
            return;
        };
        if !self.recovery.begin_retry() {
            println!("Retries exhausted. Use /demo or /dismiss.");
            return;
        }
        self.answer(message).await;
    }

    async fn answer(&mut self, message: String) {
        let result = if self.recovery.is_demo_mode() || !self.chat.is_online() {
            Ok(self.chat.process_locally(
                &message,
                self.modes.current_mode,
                &self.modes.preferences,
                &self.modes.conversation_history,
            ))
        } else {
            self.send_remote(&message).await
        };

        match result {
            Ok(reply) => {
                if self.recovery.is_retrying() {
                    self.recovery.retry_succeeded();
                }
                self.pending = None;
                self.record_reply(&reply);
                println!();
                println!("{}", format_reply(&reply));
                println!();
                self.show_suggestions();
            }
            Err(err) => {
                if self.recovery.is_retrying() {
                    self.recovery.retry_failed(&err);
                } else {
                    self.recovery.handle_error(&err);
                }
                self.pending = Some(message);
                if let Some(record) = self.recovery.current() {
                    eprintln!();
                    eprintln!("{}", render_panel(record));
                }
            }
        }
    }

    /// Forward to the API; Ctrl-C abandons the request
    async fn send_remote(&self, message: &str) -> Result<AssistantReply, ClientError> {
        let cancel = CancellationToken::new();
        let interrupt = cancel.clone();
        let watcher = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                interrupt.cancel();
            }
        });

        if self.is_interactive {
            println!("{}", "Thinking...".dark_grey());
        }
        let result = self
            .chat
            .send(
                message,
                self.modes.current_mode,
                &self.modes.preferences,
                &self.modes.conversation_history,
                &cancel,
            )
            .await;
        watcher.abort();
        result
    }

    fn record_reply(&mut self, reply: &AssistantReply) {
        self.session.add_message(Role::Assistant, reply.content.as_str());
        self.modes.add_message(
            Role::Assistant,
            reply.content.as_str(),
            Some(reply.metadata.clone()),
        );
    }

    async fn load_templates(&mut self) {
        let Some(client) = self.chat.client() else {
            println!("Templates are only available when connected to the API.");
            return;
        };

        match client.enhanced_templates().await {
            Ok(listing) => {
                let ctx = TemplateContext::from_templates(&listing.templates);
                println!("{}", format_templates(&listing, &ctx));
                self.session.update_template_context(ctx);
                println!();
                self.show_suggestions();
            }
            Err(err) => eprintln!("{} {}", err.kind().icon(), err),
        }
    }

    async fn list_partners(&self) {
        let Some(client) = self.chat.client() else {
            println!("Partners are only available when connected to the API.");
            return;
        };

        match client.list_partners().await {
            Ok(listing) => println!("{}", format_partners(&listing)),
            Err(err) => eprintln!("{} {}", err.kind().icon(), err),
        }
    }

    async fn show_health(&self) {
        let snapshot = self.monitor.check_now().await;
        let indicators = match self.chat.client() {
            Some(client) => {
                let report = client.health().await.ok();
                Some(StatusIndicators::from_report(report.as_ref()))
            }
            None => None,
        };
        println!("{}", format_health(&snapshot, indicators.as_ref()));
    }

    fn show_suggestions(&mut self) {
        self.suggestions = suggestions_for(
            &self.prompts,
            self.session.conversation_state(),
            self.session.template_context(),
            self.modes.current_mode,
            self.config.prompts.max_prompts,
        );
        println!("{}", format_suggestions(&self.suggestions));
    }

    /// Print separator line that adapts to terminal width
    fn print_separator(&self) {
        println!("{}", "─".repeat(terminal_width()));
    }

    fn print_status_line(&self) {
        let config = self.modes.current_config();
        let connection = if self.recovery.is_demo_mode() {
            "demo"
        } else if self.chat.is_online() {
            "online"
        } else {
            "offline"
        };
        let status = format!(
            "{} {} | Page: {} | Messages: {} | API: {}",
            config.icon,
            config.name,
            self.session.current_page(),
            self.session.conversation_state().conversation_length,
            connection
        );
        println!("{}", status.dark_grey());
    }
}
