//! Hooks — the points where the host calls into the mod.
//!
//! The host notifies us when its main-menu slideshow is ready, when a loading
//! screen is about to show a material, and when the loading screen goes away.
//! `ShuffleMod` wraps these behind the mod's enable/disable lifecycle.

use log::{debug, info, warn};
use rand::{Rng, rngs::ThreadRng};

use crate::config::SettingsStore;
use crate::logging;
use crate::material::{BackgroundProvider, RenderBackend};
use crate::pool::BackgroundPool;
use crate::shuffle::ShuffleEngine;
use crate::types::LOG_TAG;

pub const MOD_NAME: &str = "Cityscape Shuffle (Randomized Loading Screen Backgrounds)";
pub const MOD_DESCRIPTION: &str = "Replaces repetitive loading backgrounds with images from the \
    main-menu slideshow, showing each one before any repeats. Includes all DLC images.";

/// Material names that mark a loading-screen background. Anything else
/// (intro logos and the like) is left untouched.
const LOADING_MATERIAL_MARKERS: [&str; 2] = ["Loading Image", "Background"];

pub fn is_loading_background(material_name: &str) -> bool {
    LOADING_MATERIAL_MARKERS
        .iter()
        .any(|marker| material_name.contains(marker))
}

type Provider<B, R> = BackgroundProvider<BackgroundPool<<B as RenderBackend>::Texture>, B, R>;

#[derive(Debug)]
pub struct LoadingScreen<B: RenderBackend, R = ThreadRng> {
    provider: Provider<B, R>,
}

impl<B: RenderBackend> LoadingScreen<B> {
    pub fn new(backend: B) -> Self {
        Self::with_rng(backend, rand::rng())
    }
}

impl<B: RenderBackend, R: Rng> LoadingScreen<B, R> {
    pub fn with_rng(backend: B, rng: R) -> Self {
        let engine = ShuffleEngine::with_rng(BackgroundPool::new(), rng);
        Self {
            provider: BackgroundProvider::with_engine(engine, backend),
        }
    }

    /// The main-menu slideshow finished initializing; `raw` is its image
    /// list, or `None` if the list could not be read. Starts a new session.
    pub fn on_background_panel_awake<I>(&mut self, raw: Option<I>)
    where
        I: IntoIterator<Item = Option<B::Texture>>,
    {
        debug!("{LOG_TAG} Background panel awake");
        let engine = self.provider.engine_mut();
        engine.supplier_mut().capture(raw);
        engine.reset();

        let backend = self.provider.backend();
        self.provider
            .engine()
            .supplier()
            .log_samples(|texture| backend.describe_texture(texture));
    }

    /// The loading screen is about to display `material`.
    ///
    /// Returns the replacement to display instead, or `None` to let the
    /// original through.
    pub fn on_set_image(&mut self, material: Option<&B::Material>) -> Option<B::Material> {
        let material = material?;
        let name = self
            .provider
            .backend()
            .material_name(material)
            .unwrap_or_default();

        if !is_loading_background(&name) {
            debug!("{LOG_TAG} Skipping non-loading-screen material '{name}'");
            return None;
        }

        debug!("{LOG_TAG} Replacing loading material '{name}'");
        Some(self.provider.produce_material(material))
    }

    /// The loading screen closed; release everything it used.
    pub fn on_disable(&mut self) {
        self.provider.cleanup();
    }

    pub fn background_count(&self) -> usize {
        self.provider.engine().supplier().len()
    }

    pub fn provider(&self) -> &Provider<B, R> {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut Provider<B, R> {
        &mut self.provider
    }
}

/// The mod as the host sees it: enabled, disabled, and its hook target.
#[derive(Debug)]
pub struct ShuffleMod<B: RenderBackend, R = ThreadRng> {
    loading_screen: LoadingScreen<B, R>,
    settings: Option<SettingsStore>,
    patched: bool,
}

impl<B: RenderBackend> ShuffleMod<B> {
    pub fn new(backend: B) -> Self {
        Self::with_loading_screen(LoadingScreen::new(backend))
    }
}

impl<B: RenderBackend, R: Rng> ShuffleMod<B, R> {
    pub fn with_loading_screen(loading_screen: LoadingScreen<B, R>) -> Self {
        Self {
            loading_screen,
            settings: None,
            patched: false,
        }
    }

    pub fn name(&self) -> &'static str {
        MOD_NAME
    }

    /// Apply `store`'s settings and start intercepting the host.
    pub fn enable(&mut self, store: SettingsStore) {
        let settings = store.settings();
        logging::set_debug_logging(settings.enable_debug_logging);
        self.loading_screen
            .provider_mut()
            .set_fallback_color(settings.fallback_color);
        info!("{LOG_TAG} Enabled with settings from {}", store.path().display());

        self.settings = Some(store);
        self.patched = true;
    }

    /// Stop intercepting and release anything still held.
    pub fn disable(&mut self) {
        if !self.patched {
            warn!("{LOG_TAG} Disable requested but the mod is not enabled");
            return;
        }
        self.loading_screen.on_disable();
        self.patched = false;
        info!("{LOG_TAG} Disabled");
    }

    pub fn is_enabled(&self) -> bool {
        self.patched
    }

    /// Hook target while enabled; `None` means the host runs unpatched.
    pub fn hooks(&mut self) -> Option<&mut LoadingScreen<B, R>> {
        self.patched.then_some(&mut self.loading_screen)
    }

    pub fn loading_screen(&self) -> &LoadingScreen<B, R> {
        &self.loading_screen
    }

    pub fn settings(&self) -> Option<&SettingsStore> {
        self.settings.as_ref()
    }
}
