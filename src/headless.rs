//! Headless render backend.
//!
//! Keeps textures and materials as plain records behind integer handles so the
//! provider can run without a graphics host. Destroyed handles disappear from
//! the tables, which makes leaks easy to spot.

use std::collections::BTreeMap;

use log::warn;

use crate::material::RenderBackend;
use crate::types::{Color, LOG_TAG, SlideshowImage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextureId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MaterialId(u32);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureInfo {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Set for synthetic solid-color textures.
    pub fill: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialInfo {
    pub name: String,
    pub main_texture: Option<TextureId>,
}

#[derive(Debug, Default)]
pub struct HeadlessBackend {
    next_id: u32,
    textures: BTreeMap<TextureId, TextureInfo>,
    materials: BTreeMap<MaterialId, MaterialInfo>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a slideshow image as a host-owned texture.
    pub fn load_texture(&mut self, image: &SlideshowImage) -> TextureId {
        let id = TextureId(self.bump());
        self.textures.insert(
            id,
            TextureInfo {
                name: image.name.clone(),
                width: image.width,
                height: image.height,
                fill: None,
            },
        );
        id
    }

    pub fn create_material(&mut self, name: &str, main_texture: Option<TextureId>) -> MaterialId {
        let id = MaterialId(self.bump());
        self.materials.insert(
            id,
            MaterialInfo {
                name: name.to_string(),
                main_texture,
            },
        );
        id
    }

    pub fn texture(&self, id: TextureId) -> Option<&TextureInfo> {
        self.textures.get(&id)
    }

    pub fn material(&self, id: MaterialId) -> Option<&MaterialInfo> {
        self.materials.get(&id)
    }

    pub fn main_texture(&self, id: MaterialId) -> Option<TextureId> {
        self.materials.get(&id).and_then(|m| m.main_texture)
    }

    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    pub fn live_materials(&self) -> usize {
        self.materials.len()
    }

    fn bump(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl RenderBackend for HeadlessBackend {
    type Texture = TextureId;
    type Material = MaterialId;

    fn instantiate_material(&mut self, template: &MaterialId, main_texture: TextureId) -> MaterialId {
        let name = self
            .materials
            .get(template)
            .map(|m| m.name.clone())
            .unwrap_or_default();
        self.create_material(&name, Some(main_texture))
    }

    fn create_solid_texture(&mut self, width: u32, height: u32, color: Color) -> TextureId {
        let id = TextureId(self.bump());
        self.textures.insert(
            id,
            TextureInfo {
                name: "CityscapeShuffle Fallback".to_string(),
                width,
                height,
                fill: Some(color),
            },
        );
        id
    }

    fn destroy_material(&mut self, material: MaterialId) {
        if self.materials.remove(&material).is_none() {
            warn!("{LOG_TAG} Material {material:?} was already destroyed");
        }
    }

    fn destroy_texture(&mut self, texture: TextureId) {
        if self.textures.remove(&texture).is_none() {
            warn!("{LOG_TAG} Texture {texture:?} was already destroyed");
        }
    }

    fn material_name(&self, material: &MaterialId) -> Option<String> {
        self.materials.get(material).map(|m| m.name.clone())
    }

    fn describe_texture(&self, texture: &TextureId) -> String {
        match self.textures.get(texture) {
            Some(TextureInfo {
                name,
                width,
                height,
                fill: Some(color),
            }) => {
                let (r, g, b) = color.to_rgb();
                format!("{name} ({width}x{height}, #{r:02x}{g:02x}{b:02x})")
            }
            Some(t) => format!("{} ({}x{})", t.name, t.width, t.height),
            None => format!("<destroyed {texture:?}>"),
        }
    }
}
