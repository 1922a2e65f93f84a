use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use dirnav::app::{DEFAULT_PAGE_SIZE, DirectoryPrompt};
use dirnav::config::{Config, PromptConfig};
use dirnav::event::EventHandler;
use dirnav::listing::LocalFs;
use dirnav::logging;
use dirnav::prompt::Prompt;
use dirnav::ui::terminal::CrosstermRenderer;
use dirnav::ui::theme::Palette;

#[derive(Parser)]
#[command(name = "dirnav", version, about = "Pick a directory inside a base directory")]
struct Cli {
    #[arg(help = "Base directory the picker cannot leave")]
    base: Option<PathBuf>,

    #[arg(long, help = "Directory to start in (default: the base directory)")]
    start: Option<PathBuf>,

    #[arg(long, help = "Directory used to resolve relative paths")]
    cwd: Option<PathBuf>,

    #[arg(short, long, help = "Number of visible choices")]
    page_size: Option<usize>,

    #[arg(short, long, help = "Question shown above the list")]
    message: Option<String>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Print the answer as JSON")]
    json: bool,

    #[arg(long, help = "Log file (default: in the user cache directory)")]
    log_file: Option<PathBuf>,
}

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            1
        }
    };
    process::exit(code);
}

/// Exit code 0 when a directory was chosen, 1 when cancelled.
fn run() -> Result<i32> {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Ignoring config file {}: {err}", Config::config_path().display());
            Config::default()
        }
    };

    let log_path = cli.log_file.clone().unwrap_or_else(logging::default_log_path);
    if let Err(err) = logging::init(&log_path, &config.log_level) {
        eprintln!("Logging disabled: {err:#}");
    }

    let theme_name = cli.theme.as_deref().unwrap_or(&config.theme);
    let theme = Palette::load(theme_name).unwrap_or_else(|| {
        tracing::warn!(theme = theme_name, "unknown theme, using default");
        Palette::default()
    });

    let prompt_config = PromptConfig {
        base_path: cli.base,
        cwd: cli.cwd,
        start_path: cli.start,
        page_size: cli.page_size.or(Some(config.page_size)),
    };
    let prompt = DirectoryPrompt::new(&prompt_config, LocalFs, Box::new(theme))?
        .with_message(cli.message.unwrap_or(config.message.clone()))
        .with_damping(config.damping());

    // Question, location, window, footer, error and search lines.
    let height = prompt_config.page_size_or(DEFAULT_PAGE_SIZE) + 6;
    let height = u16::try_from(height).unwrap_or(u16::MAX);

    let mut renderer = CrosstermRenderer::new(height)?;
    let mut events = EventHandler::new(Duration::from_millis(250));
    let result = prompt.run(&mut events, &mut renderer);
    renderer.restore()?;

    let Some(selection) = result? else {
        return Ok(1);
    };

    let mut stdout = io::stdout();
    if cli.json {
        serde_json::to_writer(&mut stdout, &selection)?;
    } else {
        // No trailing newline, for `cd "$(dirnav .)"`.
        write!(stdout, "{}", selection.path)?;
    }
    stdout.flush()?;
    Ok(0)
}
