use std::io::Read as _;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use vkb_core::{KeyboardController, KeyboardState, SessionConfig, SessionResult};
use vkb_runtime::program::{FrameInfo, Frontend, Program, ProgramConfig};
use vkb_runtime::script::ScriptSource;
use vkb_runtime::snapshot::render_text;

use crate::error::{CliError, Result};
use crate::layout::{load_layout, resolve_image};

/// Opening marker of the result line.
pub const RESULT_START: &str = "[VKStart]";
/// Closing marker of the result line.
pub const RESULT_END: &str = "[VKEnd]";

#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "vkb",
    about = "Virtual keyboard for gamepad-only devices; prints the entered text",
    version
)]
pub struct Cli {
    /// Initial text; the caret starts at its end.
    #[arg(short = 't', long = "text", default_value = "")]
    pub text: String,

    /// Mask the text as it is typed.
    #[arg(short = 'p', long)]
    pub password: bool,

    /// Background image. Relative paths resolve under the device resources.
    #[arg(short = 'i', long)]
    pub image: Option<PathBuf>,

    /// Prompt shown above the keyboard.
    #[arg(short = 'm', long)]
    pub message: Option<String>,

    /// TOML key layout replacing the built-in one.
    #[arg(long)]
    pub layout: Option<PathBuf>,

    /// Action script to replay; reads stdin when omitted or `-`.
    #[arg(short = 's', long)]
    pub script: Option<PathBuf>,

    /// Run frames in real time instead of back to back.
    #[arg(long)]
    pub paced: bool,

    /// Frame interval in milliseconds when paced.
    #[arg(long, value_name = "MS")]
    pub frame_ms: Option<u64>,

    /// Cancel the session after this many frames.
    #[arg(long, value_name = "N")]
    pub max_frames: Option<u64>,

    /// Ticks a typed character stays readable in password mode.
    #[arg(long, value_name = "TICKS")]
    pub reveal_ticks: Option<u64>,

    /// Disable wraparound at the grid edges.
    #[arg(long)]
    pub no_wrap: bool,

    /// Print the final keyboard state to stderr.
    #[arg(long)]
    pub dump: bool,

    /// Debug logging unless `VKB_LOG`/`RUST_LOG` say otherwise.
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub result: SessionResult,
    pub frames: u64,
    /// Text rendering of the last frame, with `--dump`.
    pub dump: Option<String>,
}

impl Outcome {
    /// The stdout line for a non-empty commit.
    ///
    /// Cancellation and empty commits are errors with exit status 1.
    pub fn result_line(&self) -> Result<String> {
        match &self.result {
            SessionResult::Committed(text) if !text.is_empty() => {
                Ok(format!("{RESULT_START}{text}{RESULT_END}\n"))
            }
            SessionResult::Committed(_) => {
                tracing::warn!("no input text provided");
                Err(CliError::exit(1, "no input text provided"))
            }
            SessionResult::Cancelled | SessionResult::Pending => {
                Err(CliError::exit(1, "input cancelled"))
            }
        }
    }
}

/// Keeps the text rendering of the most recent frame.
#[derive(Debug, Default)]
struct DumpFrontend {
    last: Option<String>,
}

impl Frontend<KeyboardController> for DumpFrontend {
    fn render(&mut self, info: FrameInfo, state: KeyboardState<'_>) {
        if info.dirty || self.last.is_none() {
            self.last = Some(render_text(&state, true));
        }
    }
}

pub fn run_from_env() -> Result<Outcome> {
    let cli = Cli::parse();
    crate::logging::init(cli.verbose);
    run(cli)
}

/// Read the script named by `cli` (or stdin) and run the session.
pub fn run(cli: Cli) -> Result<Outcome> {
    let script = match &cli.script {
        Some(path) if path.as_os_str() != "-" => {
            std::fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.clone(),
                source,
            })?
        }
        _ => {
            let mut script = String::new();
            std::io::stdin().read_to_string(&mut script)?;
            script
        }
    };
    run_script(&cli, &script)
}

/// Run a session fed by `script`.
pub fn run_script(cli: &Cli, script: &str) -> Result<Outcome> {
    if let Some(image) = &cli.image {
        tracing::info!(image = %resolve_image(image).display(), "background image ignored by the text host");
    }

    let config = session_config(cli)?;
    let source = ScriptSource::parse(script)?;
    let mut program = Program::new(KeyboardController::new(config), source, program_config(cli));

    let (result, dump) = if cli.dump {
        let mut frontend = DumpFrontend::default();
        let result = program.run_with(&mut frontend)?;
        let dump = frontend
            .last
            .unwrap_or_else(|| render_text(&program.dialog().state(), true));
        (result, Some(dump))
    } else {
        (program.run()?, None)
    };

    tracing::debug!(frames = program.frames(), ?result, "session ended");
    Ok(Outcome {
        result,
        frames: program.frames(),
        dump,
    })
}

fn session_config(cli: &Cli) -> Result<SessionConfig> {
    let mut config = SessionConfig::from_env()
        .with_initial_text(cli.text.clone())
        .confidential(cli.password);
    if let Some(message) = &cli.message {
        config = config.with_message(message.clone());
    }
    if let Some(ticks) = cli.reveal_ticks {
        config = config.with_reveal_window(ticks);
    }
    if cli.no_wrap {
        config = config.with_wrap(false, false);
    }
    if let Some(path) = &cli.layout {
        config = config.with_grid(load_layout(path)?);
    }
    Ok(config)
}

fn program_config(cli: &Cli) -> ProgramConfig {
    let mut config = if cli.paced {
        ProgramConfig::default()
    } else {
        ProgramConfig::headless()
    }
    .with_env_overrides();
    if let Some(ms) = cli.frame_ms.filter(|ms| *ms > 0) {
        config = config.with_frame_interval(Duration::from_millis(ms));
    }
    if let Some(frames) = cli.max_frames {
        config = config.with_max_frames(frames);
    }
    config
}
