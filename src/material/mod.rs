//! Material — wraps drawn backgrounds into loading-screen materials.
//!
//! Every drawn image is bound to a fresh clone of the host's loading material.
//! Those clones live until the loading screen closes, at which point the whole
//! batch is released. When the pool has nothing to offer, a single solid-color
//! emergency material stands in so the problem is visible on screen.

use std::fmt;

use log::{debug, info, warn};
use rand::{Rng, rngs::ThreadRng};

use crate::pool::PoolSupplier;
use crate::shuffle::ShuffleEngine;
use crate::types::{Color, LOG_TAG};

/// Edge length of the emergency texture.
const FALLBACK_TEXTURE_SIZE: u32 = 1;

/// Host-side resource operations the provider needs.
///
/// Handles are opaque and cheap to clone; the backend owns what they refer to.
pub trait RenderBackend {
    type Texture: Clone + fmt::Debug;
    type Material: Clone + fmt::Debug;

    /// Clone `template` with `main_texture` bound as its primary surface.
    fn instantiate_material(
        &mut self,
        template: &Self::Material,
        main_texture: Self::Texture,
    ) -> Self::Material;

    fn create_solid_texture(&mut self, width: u32, height: u32, color: Color) -> Self::Texture;

    fn destroy_material(&mut self, material: Self::Material);

    fn destroy_texture(&mut self, texture: Self::Texture);

    fn material_name(&self, material: &Self::Material) -> Option<String>;

    fn describe_texture(&self, texture: &Self::Texture) -> String;
}

#[derive(Debug)]
struct EmergencyMaterial<M, T> {
    material: M,
    texture: T,
}

/// Hands out background materials for loading screens and tracks them for
/// batch release.
#[derive(Debug)]
pub struct BackgroundProvider<S, B: RenderBackend, R = ThreadRng> {
    engine: ShuffleEngine<S, R>,
    backend: B,
    session_materials: Vec<B::Material>,
    emergency: Option<EmergencyMaterial<B::Material, B::Texture>>,
    fallback_color: Color,
}

impl<S, B> BackgroundProvider<S, B>
where
    S: PoolSupplier<Image = B::Texture>,
    B: RenderBackend,
{
    pub fn new(supplier: S, backend: B) -> Self {
        Self::with_engine(ShuffleEngine::new(supplier), backend)
    }
}

impl<S, B, R> BackgroundProvider<S, B, R>
where
    S: PoolSupplier<Image = B::Texture>,
    B: RenderBackend,
    R: Rng,
{
    pub fn with_engine(engine: ShuffleEngine<S, R>, backend: B) -> Self {
        Self {
            engine,
            backend,
            session_materials: Vec::new(),
            emergency: None,
            fallback_color: Color::default(),
        }
    }

    pub fn set_fallback_color(&mut self, color: Color) {
        self.fallback_color = color;
    }

    /// Produce a material for the next loading screen.
    ///
    /// With a populated pool this is a new tracked clone of `template` bound to
    /// the next shuffled image. Otherwise it is the shared emergency material,
    /// created on first need and reused until `cleanup`.
    pub fn produce_material(&mut self, template: &B::Material) -> B::Material {
        if let Some(image) = self.engine.next_image() {
            debug!(
                "{LOG_TAG} Creating material with background {}",
                self.backend.describe_texture(&image)
            );
            let material = self.backend.instantiate_material(template, image);
            self.session_materials.push(material.clone());
            return material;
        }

        warn!("{LOG_TAG} No background available; using emergency fallback color");
        if let Some(emergency) = &self.emergency {
            return emergency.material.clone();
        }

        debug!("{LOG_TAG} Creating emergency fallback material");
        let texture = self.backend.create_solid_texture(
            FALLBACK_TEXTURE_SIZE,
            FALLBACK_TEXTURE_SIZE,
            self.fallback_color,
        );
        let material = self.backend.instantiate_material(template, texture.clone());
        self.emergency = Some(EmergencyMaterial {
            material: material.clone(),
            texture,
        });
        material
    }

    /// Release every material produced this session.
    ///
    /// Pool images bound to session materials belong to the host and are left
    /// alone; the emergency texture is ours and goes with its material.
    pub fn cleanup(&mut self) {
        let released = self.session_materials.len();
        for material in self.session_materials.drain(..) {
            self.backend.destroy_material(material);
        }

        if let Some(EmergencyMaterial { material, texture }) = self.emergency.take() {
            self.backend.destroy_material(material);
            self.backend.destroy_texture(texture);
            debug!("{LOG_TAG} Emergency material cleaned up");
        }

        info!("{LOG_TAG} Released {released} loading screen materials");
    }

    pub fn session_material_count(&self) -> usize {
        self.session_materials.len()
    }

    pub fn has_emergency_material(&self) -> bool {
        self.emergency.is_some()
    }

    pub fn engine(&self) -> &ShuffleEngine<S, R> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ShuffleEngine<S, R> {
        &mut self.engine
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
