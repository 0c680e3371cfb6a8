use std::collections::HashSet;

use cityscape_shuffle::{
    config::SettingsStore,
    headless::{HeadlessBackend, MaterialId, TextureId},
    hooks::{LoadingScreen, ShuffleMod},
    types::{Color, NamedColor, SlideshowImage},
};
use rand::{SeedableRng, rngs::StdRng};
use test_log::test;

fn load(backend: &mut HeadlessBackend, names: &[&str]) -> Vec<Option<TextureId>> {
    names
        .iter()
        .map(|name| {
            Some(backend.load_texture(&SlideshowImage {
                name: (*name).into(),
                width: 1920,
                height: 1080,
            }))
        })
        .collect()
}

fn shown(m: &mut ShuffleMod<HeadlessBackend, StdRng>, template: MaterialId) -> TextureId {
    let hooks = m.hooks().unwrap();
    let material = hooks.on_set_image(Some(&template)).unwrap();
    hooks.provider().backend().main_texture(material).unwrap()
}

#[test]
fn dlc_toggle_between_sessions() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut backend = HeadlessBackend::new();
    let base = load(&mut backend, &["A", "B", "C"]);
    let dlc = load(&mut backend, &["D"]);
    let template = backend.create_material("Loading Image", None);

    let screen = LoadingScreen::with_rng(backend, StdRng::seed_from_u64(99));
    let mut m = ShuffleMod::with_loading_screen(screen);
    m.enable(SettingsStore::open_in(dir.path(), &dir.path().join("legacy.json")));

    // Before the main menu has been seen there is nothing to shuffle.
    let emergency = {
        let hooks = m.hooks().unwrap();
        let first = hooks.on_set_image(Some(&template)).unwrap();
        assert_eq!(hooks.on_set_image(Some(&template)), Some(first));
        hooks.on_disable();
        first
    };

    m.hooks().unwrap().on_background_panel_awake(Some(base.clone()));
    let cycle: Vec<_> = (0..3).map(|_| shown(&mut m, template)).collect();
    assert_eq!(cycle.iter().collect::<HashSet<_>>().len(), 3);
    assert_eq!(shown(&mut m, template), cycle[0]);
    m.hooks().unwrap().on_disable();

    let mut with_dlc = base;
    with_dlc.extend(dlc);
    m.hooks().unwrap().on_background_panel_awake(Some(with_dlc.clone()));
    let next: HashSet<_> = (0..4).map(|_| shown(&mut m, template)).collect();
    let expected: HashSet<_> = with_dlc.into_iter().flatten().collect();
    assert_eq!(next, expected);

    let last = m.hooks().unwrap().on_set_image(Some(&template)).unwrap();
    assert_ne!(last, emergency);

    m.disable();
    let backend = m.loading_screen().provider().backend();
    assert_eq!(backend.live_materials(), 1);
    assert_eq!(backend.live_textures(), 4);
    Ok(())
}

#[test]
fn fallback_color_comes_from_settings() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let cfg = dir.path().join("cfg");
    std::fs::create_dir_all(&cfg)?;
    std::fs::write(
        cfg.join("CityscapeShuffle.json"),
        r#"{"enable_debug_logging": true, "fallback_color": "magenta"}"#,
    )?;

    let mut backend = HeadlessBackend::new();
    let template = backend.create_material("Background", None);
    let mut m = ShuffleMod::with_loading_screen(LoadingScreen::with_rng(
        backend,
        StdRng::seed_from_u64(0),
    ));
    m.enable(SettingsStore::open_in(&cfg, &dir.path().join("legacy.json")));
    assert!(m.settings().unwrap().settings().enable_debug_logging);

    let hooks = m.hooks().unwrap();
    let material = hooks.on_set_image(Some(&template)).unwrap();
    let backend = hooks.provider().backend();
    let texture = backend.main_texture(material).unwrap();
    assert_eq!(
        backend.texture(texture).unwrap().fill,
        Some(Color::Named(NamedColor::Magenta))
    );
    Ok(())
}
