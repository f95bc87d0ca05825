mod input;

use crossterm::event::{
    self, DisableFocusChange, EnableFocusChange, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use input::{translate_event, HostInput};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use trex_runner::audio::{AudioSink, TerminalBell};
use trex_runner::build_info;
use trex_runner::core::constants::{
    Dimensions, MS_PER_FRAME, RESIZE_DEBOUNCE_MS, VISIBILITY_DEBOUNCE_MS,
};
use trex_runner::core::{Clock, Debouncer, MonotonicClock, Runner, RunnerConfig, RunnerEvent};
use trex_runner::ui::event_log::EventLog;
use trex_runner::ui::{draw_ui, runner_scene::logical_width_for};

/// Input poll timeout while nothing is animating.
const IDLE_POLL_MS: u64 = 50;

struct Options {
    config_path: Option<PathBuf>,
    seed: Option<u64>,
    device_pixel_ratio: f64,
    muted: bool,
}

fn print_help() {
    println!("T-Rex Runner - endless runner for the terminal\n");
    println!("Usage: trex-runner [options]\n");
    println!("Options:");
    println!("  --config <path>  Load tuning from a JSON file");
    println!("  --seed <n>       Seed obstacle and cloud generation");
    println!("  --dpr <ratio>    Draw from the sprite sheets for this pixel ratio");
    println!("  --mute           Start without sound");
    println!("  --version        Show version information");
    println!("  --help           Show this help message");
    println!("\nControls: Space/Up jump, Down drop, Enter restart, q quit");
}

fn usage_error(message: &str) -> ! {
    eprintln!("{}", message);
    eprintln!("Run 'trex-runner --help' for usage.");
    std::process::exit(1);
}

fn parse_args(args: &[String]) -> Options {
    let mut options = Options {
        config_path: None,
        seed: None,
        device_pixel_ratio: 1.0,
        muted: false,
    };

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--config" => match iter.next() {
                Some(path) => options.config_path = Some(PathBuf::from(path)),
                None => usage_error("--config needs a path"),
            },
            "--seed" => match iter.next().map(|s| s.parse::<u64>()) {
                Some(Ok(seed)) => options.seed = Some(seed),
                _ => usage_error("--seed needs a non-negative integer"),
            },
            "--dpr" => match iter.next().map(|s| s.parse::<f64>()) {
                Some(Ok(ratio)) if ratio.is_finite() && ratio > 0.0 => {
                    options.device_pixel_ratio = ratio
                }
                _ => usage_error("--dpr needs a positive number"),
            },
            "--mute" => options.muted = true,
            other => usage_error(&format!("Unknown option: {}", other)),
        }
    }
    options
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    let config = match &options.config_path {
        Some(path) => RunnerConfig::load(path).unwrap_or_else(|e| {
            eprintln!("Could not load config {}: {}", path.display(), e);
            std::process::exit(1);
        }),
        None => RunnerConfig::default(),
    };

    let (cols, _rows) = terminal::size()?;
    let dimensions = Dimensions::with_width(logical_width_for(cols));
    let rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut runner = Runner::with_rng(config, dimensions, rng);

    let mut log = EventLog::default();
    // The cell grid is the backing store, always at ratio 1
    if let Some(scale) = runner.set_device_pixel_ratio(options.device_pixel_ratio, 1.0) {
        log.add_entry(format!("HiDPI sprites, canvas scaled {}x", scale), false);
    }

    let mut bell = TerminalBell::new(io::stdout());
    bell.muted = options.muted;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableFocusChange)?;
    let reports_release = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if reports_release {
        stdout.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut runner, &mut bell, &mut log, reports_release);

    // Restore terminal even when the loop failed
    if reports_release {
        terminal.backend_mut().execute(PopKeyboardEnhancementFlags)?;
    }
    terminal.backend_mut().execute(DisableFocusChange)?;
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run<W: io::Write>(
    terminal: &mut Terminal<CrosstermBackend<W>>,
    runner: &mut Runner<StdRng>,
    bell: &mut TerminalBell<io::Stdout>,
    log: &mut EventLog,
    reports_release: bool,
) -> io::Result<()> {
    let clock = MonotonicClock::new();
    let mut resize = Debouncer::new(RESIZE_DEBOUNCE_MS);
    let mut focus = Debouncer::new(VISIBILITY_DEBOUNCE_MS);

    loop {
        let now = clock.now_ms();
        if let Some(width) = resize.poll(now) {
            runner.adjust_dimensions(width);
        }
        if let Some(visible) = focus.poll(now) {
            runner.set_visibility(visible, now);
        }
        runner.frame(now);
        dispatch_events(runner, bell, log);

        terminal.draw(|frame| draw_ui(frame, runner, log))?;

        let timeout = if runner.has_pending_frame() {
            Duration::from_secs_f64(MS_PER_FRAME / 1000.0)
        } else {
            Duration::from_millis(IDLE_POLL_MS)
        };
        if !event::poll(timeout)? {
            continue;
        }

        let terminal_event = event::read()?;
        let now = clock.now_ms();
        if let event::Event::Resize(cols, _) = terminal_event {
            resize.notify(now, logical_width_for(cols));
        }
        for host_input in translate_event(&terminal_event, reports_release) {
            match host_input {
                HostInput::Quit => return Ok(()),
                HostInput::Runner(input) => runner.handle_input(input, now),
                HostInput::Visibility(visible) => focus.notify(now, visible),
            }
        }
        dispatch_events(runner, bell, log);
    }
}

/// Route runner notifications to the bell and the event log.
fn dispatch_events(
    runner: &mut Runner<StdRng>,
    audio: &mut TerminalBell<io::Stdout>,
    log: &mut EventLog,
) {
    for event in runner.drain_events() {
        match event {
            RunnerEvent::Sound(sound) => audio.play_sound(sound),
            RunnerEvent::LoadSounds => audio.load(),
            other => log.record(&other),
        }
    }
}
