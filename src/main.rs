use clap::Parser;
use instant_suggest::core::config::load_candidates;
use instant_suggest::terminal::{KeyCode, KeyModifiers, PointerEvent, Terminal, TerminalEvent};
use instant_suggest::{
    Autocomplete, AutocompleteConfig, AutocompleteEvent, Candidate, ConfigError, Drawable,
    HostEffect, InteractionResult, Interactive, ListViewport, LookupResponse, PendingLookup,
    RenderContext, SuggestionSource,
};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "instant-suggest", about = "Instant suggestions over a candidate file")]
struct Args {
    /// YAML or JSON array of candidate records.
    #[arg(long)]
    candidates: PathBuf,

    /// Widget configuration (YAML or JSON).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Label attribute; overrides the configuration file.
    #[arg(long)]
    attribute: Option<String>,

    /// Serve candidates from a simulated slow lookup instead of a static list.
    #[arg(long)]
    lookup_delay_ms: Option<u64>,

    /// Initial text.
    #[arg(long, default_value = "")]
    value: String,

    /// Candidate rows shown at once.
    #[arg(long, default_value_t = 8)]
    max_rows: usize,

    /// Write logs here; logging is off otherwise.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Error, Debug)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

enum Outcome {
    Committed,
    Dismissed,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), AppError> {
    init_logging(args.log_file.as_deref())?;

    let mut config = match &args.config {
        Some(path) => AutocompleteConfig::read(path)?,
        None => AutocompleteConfig::new("label"),
    };
    if let Some(attribute) = &args.attribute {
        config.suggestion_attribute = attribute.clone();
    }
    config.validate()?;

    let candidates = load_candidates(&args.candidates)?;
    tracing::info!(count = candidates.len(), "candidates loaded");
    let source = match args.lookup_delay_ms {
        Some(delay_ms) => slow_lookup(candidates, Duration::from_millis(delay_ms)),
        None => SuggestionSource::list(candidates),
    };

    let mut widget = Autocomplete::new(config, source, args.value.as_str())?.with_label("Search");
    let mut terminal = Terminal::new()?;
    terminal.enter_raw_mode()?;

    let result = event_loop(&mut terminal, &mut widget, args.max_rows);

    terminal.clear_block()?;
    terminal.show_cursor()?;
    terminal.exit_raw_mode()?;

    match (result?, widget.chosen()) {
        (Outcome::Committed, Some(candidate)) => {
            println!("{}", serde_json::to_string_pretty(candidate.as_json())?);
        }
        (Outcome::Committed, None) => println!("{}", widget.text()),
        (Outcome::Dismissed, _) => {}
    }
    Ok(())
}

fn init_logging(log_file: Option<&std::path::Path>) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();
    Ok(())
}

/// A lookup that answers from `candidates` on a worker thread after `delay`.
fn slow_lookup(candidates: Vec<Candidate>, delay: Duration) -> SuggestionSource {
    SuggestionSource::lookup(move |text: &str| {
        let candidates = candidates.clone();
        let text = text.to_string();
        LookupResponse::Pending(PendingLookup::spawn(move || {
            std::thread::sleep(delay);
            tracing::debug!(%text, "slow lookup answered");
            Ok(candidates)
        }))
    })
}

struct Session {
    viewport: ListViewport,
    outcome: Option<Outcome>,
    render_requested: bool,
}

impl Session {
    fn apply(&mut self, result: InteractionResult, widget: &Autocomplete) {
        self.render_requested |= result.request_render;
        for event in result.events {
            tracing::debug!(?event, "widget event");
            if event == AutocompleteEvent::Enter {
                self.outcome = Some(Outcome::Committed);
            }
        }
        for effect in result.effects {
            match effect {
                HostEffect::ScrollIntoView { index, align_top } => {
                    self.viewport
                        .scroll_into_view(index, align_top, widget.visible().len());
                }
                HostEffect::Blur => self.outcome = Some(Outcome::Dismissed),
            }
        }
        self.viewport.clamp(widget.visible().len());
    }
}

fn event_loop(
    terminal: &mut Terminal,
    widget: &mut Autocomplete,
    max_rows: usize,
) -> Result<Outcome, AppError> {
    let mut session = Session {
        viewport: ListViewport::new(Some(max_rows)),
        outcome: None,
        render_requested: true,
    };

    loop {
        if terminal.poll(widget.poll_timeout(Duration::from_millis(100)))? {
            match terminal.read_event()? {
                Some(TerminalEvent::Key(key)) => {
                    if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
                        return Ok(Outcome::Dismissed);
                    }
                    let result = widget.on_key(key);
                    session.apply(result, widget);
                }
                Some(TerminalEvent::Pointer(pointer)) => {
                    let result = on_pointer(terminal, widget, &session.viewport, pointer)?;
                    session.apply(result, widget);
                }
                Some(TerminalEvent::Resize(_)) => session.render_requested = true,
                None => {}
            }
        }

        let result = widget.on_tick(Instant::now());
        session.apply(result, widget);

        if let Some(outcome) = session.outcome.take() {
            return Ok(outcome);
        }

        if session.render_requested {
            let ctx = RenderContext::new(terminal.size()).with_viewport(session.viewport);
            let output = widget.draw(&ctx);
            terminal.render_block(&output.lines, output.cursor)?;
            session.render_requested = false;
        }
    }
}

fn on_pointer(
    terminal: &Terminal,
    widget: &mut Autocomplete,
    viewport: &ListViewport,
    pointer: PointerEvent,
) -> io::Result<InteractionResult> {
    let origin = terminal.block_origin_row()?;
    if pointer.row == origin {
        return Ok(widget.on_click_input(pointer));
    }

    let list_top = origin + 1 + u16::from(widget.is_loading());
    if widget.shows_list() && pointer.row >= list_top {
        let (start, end) = viewport.visible_range(widget.visible().len());
        let index = start + usize::from(pointer.row - list_top);
        if index < end {
            return Ok(widget.select_index(index));
        }
    }
    Ok(widget.on_click_outside())
}
