use std::{fs, path::PathBuf, process};

use anyhow::{Context, Result, bail};

use cityscape_shuffle::{
    config::SettingsStore,
    headless::{HeadlessBackend, TextureId},
    hooks::{MOD_DESCRIPTION, MOD_NAME, ShuffleMod},
    logging,
    material::RenderBackend,
    types::SlideshowManifest,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

const SIMULATE_USAGE: &str = "cityscape-shuffle simulate <slideshow.json> [loads]";
const SETTINGS_USAGE: &str = "cityscape-shuffle settings [dir] [debug-on|debug-off]";

const DEFAULT_LOADS: usize = 10;

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);

    match args.next().as_deref() {
        Some("simulate") => {
            let path = args.next().context(SIMULATE_USAGE)?;
            let loads = match args.next() {
                Some(n) => n
                    .parse()
                    .with_context(|| format!("Invalid load count '{n}'\n{SIMULATE_USAGE}"))?,
                None => DEFAULT_LOADS,
            };
            simulate(&path, loads)
        }
        Some("settings") => settings(parse_settings_args(args)?),
        _ => bail!(
            "{MOD_NAME}\n{MOD_DESCRIPTION}\n\nUsage:\n  {SIMULATE_USAGE}\n  {SETTINGS_USAGE}"
        ),
    }
}

/// Drive the hooks through `loads` loading screens against a headless backend.
fn simulate(path: &str, loads: usize) -> Result<()> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    let manifest: SlideshowManifest =
        serde_json::from_str(&json).with_context(|| format!("Failed to parse {path}"))?;

    let store = SettingsStore::open();
    logging::init(store.settings().enable_debug_logging);

    let mut backend = HeadlessBackend::new();
    let raw: Vec<Option<TextureId>> = manifest
        .images
        .iter()
        .map(|image| image.as_ref().map(|image| backend.load_texture(image)))
        .collect();
    let template = backend.create_material("Loading Image", None);

    let mut shuffle_mod = ShuffleMod::new(backend);
    shuffle_mod.enable(store);

    let hooks = shuffle_mod.hooks().context("Mod did not enable")?;
    hooks.on_background_panel_awake(Some(raw));
    let count = hooks.background_count();

    for load in 1..=loads {
        let shown = hooks.on_set_image(Some(&template)).unwrap_or(template);
        let backend = hooks.provider().backend();
        let label = backend
            .main_texture(shown)
            .map(|texture| backend.describe_texture(&texture))
            .unwrap_or_else(|| "<original loading image>".into());
        println!("Load {load}: {label}");
        hooks.on_disable();
    }

    shuffle_mod.disable();
    eprintln!(
        "{}: simulated {loads} loading screens over {count} backgrounds from {path}",
        shuffle_mod.name()
    );

    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
struct SettingsArgs {
    dir: Option<PathBuf>,
    debug_logging: Option<bool>,
}

/// `[dir] [debug-on|debug-off]`, in that order.
fn parse_settings_args(args: impl IntoIterator<Item = String>) -> Result<SettingsArgs> {
    let mut parsed = SettingsArgs::default();
    for arg in args {
        match arg.as_str() {
            "debug-on" => parsed.debug_logging = Some(true),
            "debug-off" => parsed.debug_logging = Some(false),
            dir if parsed.dir.is_none() && parsed.debug_logging.is_none() => {
                parsed.dir = Some(PathBuf::from(dir))
            }
            other => bail!("Unexpected settings argument '{other}'\n{SETTINGS_USAGE}"),
        }
    }
    Ok(parsed)
}

fn settings(args: SettingsArgs) -> Result<()> {
    let mut store = SettingsStore::open_dir(args.dir.as_deref());
    logging::init(store.settings().enable_debug_logging);

    if let Some(enabled) = args.debug_logging {
        store.set_debug_logging(enabled)?;
    }

    println!("{}", store.path().display());
    println!("{}", serde_json::to_string_pretty(store.settings())?);
    Ok(())
}
