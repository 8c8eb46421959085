//! tiny entrypoint.
use anyhow::Result;
use clap::Parser;
use core_actions::{Dispatcher, HELP_MESSAGE, open_file};
use core_config::{Config, ConfigContext, load_from};
use core_events::InputEvent;
use core_model::{BAR_ROWS, EditorModel, Layout};
use core_render::build_frame;
use core_state::EditorState;
use core_terminal::{CrosstermBackend, TerminalBackend, enter_guard};
use core_text::Buffer;
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Instant;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE: &str = "tiny.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "tiny", version, about = "A small terminal text editor")]
struct Args {
    /// File to open. A missing file is created on the first save.
    pub path: Option<PathBuf>,
    /// Configuration file (TOML). Defaults apply when omitted.
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

struct AppStartup {
    backend: CrosstermBackend,
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self {
            backend: CrosstermBackend::new(),
            log_guard: None,
        }
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        if tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .with_ansi(false)
            .try_init()
            .is_ok()
        {
            self.log_guard = Some(guard);
        }
        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                core_terminal::restore_terminal();
                default_panic(info);
            }));
        });
    }
}

/// Build the session for `path` with the configured tab stop and message
/// timeout applied.
fn load_model(path: Option<&Path>, config: &Config) -> Result<EditorModel> {
    let mut state = match path {
        Some(path) => {
            let mut state = EditorState::new(open_file(path)?);
            state.bind_file(path);
            state
        }
        None => EditorState::new(Buffer::new()),
    };
    state.buffer_mut().set_tab_stop(config.tab_stop());
    state.set_message_ttl(config.message_timeout());
    state.set_status(HELP_MESSAGE);
    Ok(EditorModel::new(state))
}

fn run_loop(
    model: &mut EditorModel,
    dispatcher: &mut Dispatcher,
    config: &mut Config,
    mut layout: Layout,
) -> Result<()> {
    loop {
        model.scroll(&layout, usize::from(config.effective_vertical_margin));
        let frame = build_frame(model, &layout, Instant::now());
        core_render::emit(&frame)?;
        match core_input::read_input()? {
            InputEvent::Key(key) => {
                if dispatcher.handle_key(model, &key, &layout).quit {
                    info!(target: "runtime", "quit");
                    return Ok(());
                }
            }
            InputEvent::Resize(cols, rows) => {
                layout = Layout::new(cols, rows);
                if let Some(margin) =
                    config.recompute_with_context(ConfigContext::new(cols, rows, BAR_ROWS))
                {
                    debug!(target: "runtime", margin, "vertical margin changed on resize");
                }
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut startup = AppStartup::new();
    startup.configure_logging()?;
    AppStartup::install_panic_hook();
    info!(target: "runtime", "startup");

    let mut config = load_from(args.config.as_deref())?;
    let mut model = load_model(args.path.as_deref(), &config)?;
    let mut dispatcher = Dispatcher::new(config.quit_times());

    startup.backend.set_title("tiny")?;
    let mut guard = enter_guard(&mut startup.backend)?;
    let (cols, rows) = guard.backend().size()?;
    let layout = Layout::new(cols, rows);
    config.apply_context(ConfigContext::new(cols, rows, BAR_ROWS));
    info!(
        target: "runtime",
        cols,
        rows,
        path = ?args.path,
        config = ?config.source,
        margin = config.effective_vertical_margin,
        "bootstrap_complete"
    );

    let result = run_loop(&mut model, &mut dispatcher, &mut config, layout);
    guard.release()?;
    if let Err(e) = &result {
        tracing::error!(target: "runtime", error = %e, "run_loop_failed");
    }
    info!(target: "runtime", "shutdown");
    result
}
