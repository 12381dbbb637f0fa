// Airmap CLI
// Inspect the layer tables and run key scripts through the engine

use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;

use airmap_core::engine::Engine;
use airmap_core::event::KeyEvent;
use airmap_core::key::key_from_name;
use airmap_core::keycode::{td, Hand, Keycode};
use airmap_core::keymap::{self, Keymap};
use airmap_core::layout::{LayerId, Position, LAYER_COUNT, LAYOUT_75_ANSI};
use airmap_core::settings::{default_settings_content, Settings};
use airmap_core::tap_dance::TapDanceId;

/// Air75 V2 personal keymap: layer inspector and event simulator
#[derive(Parser, Debug)]
#[command(name = "airmap")]
#[command(version)]
#[command(about = "Air75 V2 keymap inspector and simulator", long_about = None)]
struct Args {
    /// Settings file (default: ~/.config/airmap/settings.toml)
    #[arg(short, long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Print a layer table (or all of them without a value)
    #[arg(short, long, value_name = "LAYER")]
    layer: Option<Option<u8>>,

    /// Run a key script through the engine ("-" reads stdin)
    #[arg(long, value_name = "FILE")]
    simulate: Option<PathBuf>,

    /// Validate the settings file and exit
    #[arg(long)]
    check_settings: bool,

    /// Print the default settings file and exit
    #[arg(long)]
    print_default_settings: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

const LAYER_NAMES: [&str; LAYER_COUNT] = [
    "base", "symbols", "accents", "nav", "qwerty", "plain", "system",
];

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "warn" }),
    )
    .init();

    if args.print_default_settings {
        print!("{}", default_settings_content());
        return Ok(());
    }

    let settings = load_settings(&args)?;

    if args.check_settings {
        println!("Settings are valid");
        return Ok(());
    }

    if let Some(layer) = args.layer {
        print_layers(layer)?;
        return Ok(());
    }

    if let Some(path) = args.simulate {
        return simulate(&settings, &path);
    }

    // Nothing asked for: show the base layer
    print_layers(Some(0))
}

fn load_settings(args: &Args) -> Result<Settings> {
    match &args.settings {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("loading settings from {}", path.display())),
        None => Settings::load_default().context("loading default settings"),
    }
}

fn print_layers(which: Option<u8>) -> Result<()> {
    let keymap = Keymap::new();
    let layers: Vec<u8> = match which {
        Some(n) => {
            if n as usize >= LAYER_COUNT {
                bail!("layer {} out of range (0-{})", n, LAYER_COUNT - 1);
            }
            vec![n]
        }
        None => (0..LAYER_COUNT as u8).collect(),
    };

    for n in layers {
        let layer = LayerId(n);
        println!("layer {} ({})", n, LAYER_NAMES[n as usize]);
        let mut row = 0;
        let mut line: Vec<String> = Vec::new();
        for pos in LAYOUT_75_ANSI {
            if pos.row != row {
                println!("  {}", line.join(" "));
                line.clear();
                row = pos.row;
            }
            line.push(format!("{}", keymap.keycode_at(layer, pos)));
        }
        println!("  {}", line.join(" "));
        println!();
    }
    Ok(())
}

fn simulate(settings: &Settings, path: &PathBuf) -> Result<()> {
    let script = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading script from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading script from {}", path.display()))?
    };

    let mut engine = Engine::new(settings);
    let keymap = *engine.keymap();

    for (lineno, raw) in script.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut parts = line.split_whitespace();
        let verb = parts.next().unwrap();
        let operand = parts.next();

        let emits = match verb {
            "press" | "release" | "tap" => {
                let target = operand
                    .ok_or_else(|| anyhow!("line {}: {} needs a key", lineno + 1, verb))?;
                let pos = find_position(&keymap, target)
                    .ok_or_else(|| anyhow!("line {}: unknown key '{}'", lineno + 1, target))?;
                match verb {
                    "press" => engine.process(KeyEvent::press(pos)),
                    "release" => engine.process(KeyEvent::release(pos)),
                    _ => {
                        let mut out = engine.process(KeyEvent::press(pos));
                        out.extend(engine.process(KeyEvent::release(pos)));
                        out
                    }
                }
            }
            "wait" => {
                let ms: u64 = operand
                    .ok_or_else(|| anyhow!("line {}: wait needs milliseconds", lineno + 1))?
                    .parse()
                    .with_context(|| format!("line {}: bad duration", lineno + 1))?;
                std::thread::sleep(Duration::from_millis(ms));
                engine.poll()
            }
            "poll" => engine.poll(),
            other => bail!("line {}: unknown verb '{}'", lineno + 1, other),
        };

        println!("{}", line);
        for emit in emits {
            println!("  -> {}", emit);
        }
    }

    Ok(())
}

/// Resolve a script token to a matrix position.
///
/// Accepts `row:col`, a key name looked up on the base layer, or one of
/// the tap-hold spellings (caps, lshift, rshift).
fn find_position(keymap: &Keymap, token: &str) -> Option<Position> {
    if let Some((row, col)) = token.split_once(':') {
        let row = row.parse().ok()?;
        let col = col.parse().ok()?;
        return Some(Position::new(row, col));
    }

    match token.to_ascii_lowercase().as_str() {
        "caps" => return keymap.position_of(keymap::BASE, td(TapDanceId::CapsWord)),
        "lshift" => return keymap.position_of(keymap::BASE, Keycode::SpaceCadet(Hand::Left)),
        "rshift" => return keymap.position_of(keymap::BASE, Keycode::SpaceCadet(Hand::Right)),
        _ => {}
    }

    let key = key_from_name(token)?;
    // Plain entries first, then tap-hold entries carrying the key
    keymap
        .position_of(keymap::BASE, Keycode::Key(key))
        .or_else(|| {
            for pos in LAYOUT_75_ANSI {
                if keymap.keycode_at(keymap::BASE, pos).tap_key() == Some(key) {
                    return Some(pos);
                }
            }
            None
        })
}
