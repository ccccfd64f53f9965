//! Typing Demo: replays an animation in the terminal.
//!
//! Plays the bundled showcase (a small Node.js script being typed, with an
//! autocomplete, a typo flagged as an error and its fix), or the JSON
//! animation given as the first argument. An optional second argument
//! scales the delays (`0.5` plays twice as fast).
//!
//! Press 'q' or Escape to quit. Set `RUST_LOG=muses=debug` to log each
//! segment to stderr.

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::{cursor, execute, terminal};
use muses::{
    Animation, Delays, PlaybackEvent, Player, SequencerConfig, SnapshotSink, SyntaxTreeTokenizer, TerminalPresenter,
};
use std::io::{self, Write};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const SHOWCASE: &str = include_str!("showcase.json");

fn load(args: &[String]) -> Result<(Animation, f64), Box<dyn std::error::Error>> {
    let animation = match args.get(1) {
        Some(path) => Animation::from_json(&std::fs::read_to_string(path)?)?,
        None => Animation::from_json(SHOWCASE)?,
    };
    let speed = args.get(2).map(|s| s.parse::<f64>()).transpose()?.unwrap_or(1.0);
    Ok((animation, speed))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();

    let args: Vec<String> = std::env::args().collect();
    let (animation, speed) = load(&args)?;
    let tokenizer = SyntaxTreeTokenizer::javascript()?;
    let config = SequencerConfig::default().with_delays(Delays::default().scaled(speed));

    let (width, height) = terminal::size()?;
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let player = Player::spawn(animation.segments, config, tokenizer);
    let outcome = run(&player, TerminalPresenter::new(io::stdout(), width, height));

    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    match outcome? {
        Some(PlaybackEvent::Finished(report)) => {
            println!("{}", report.state.buffer.text());
            println!();
            println!(
                "{} snapshots in {:.1}s",
                report.snapshots_emitted,
                report.elapsed.as_secs_f64()
            );
        }
        Some(PlaybackEvent::Stopped(err)) => println!("Stopped: {err}"),
        Some(PlaybackEvent::Panicked(message)) => println!("Playback crashed: {message}"),
        _ => println!("Quit."),
    }
    stdout.flush()?;
    player.join();
    Ok(())
}

/// Draw the newest snapshot until playback ends or the user quits.
fn run<W: Write>(player: &Player, mut presenter: TerminalPresenter<W>) -> io::Result<Option<PlaybackEvent>> {
    loop {
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                        player.cancel();
                        return Ok(None);
                    }
                }
                Event::Resize(width, height) => presenter.resize(width, height),
                _ => {}
            }
        }

        let (snapshot, terminal) = player.latest();
        if let Some(snapshot) = snapshot {
            presenter.on_snapshot(&snapshot);
        }
        if terminal.is_some() {
            // Leave the final frame up for a moment.
            std::thread::sleep(Duration::from_millis(1500));
            return Ok(terminal);
        }
    }
}
