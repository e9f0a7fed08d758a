use std::path::PathBuf;

use anyhow::Result;

use pongbox_engine::core::{App, AppControl, FrameCtx};
use pongbox_engine::input::KeyEvent;
use pongbox_engine::render::{MeshRenderer, TextureId, TextureImage};
use pongbox_engine::window::RuntimeCtx;

use crate::controls;
use crate::renderer::{FrameRenderer, SceneObjects, SceneTextures};
use crate::scene::{SceneState, CLEAR_COLOR};
use crate::sim::SimulationState;

pub const WALL_TEXTURE_FILE: &str = "stone.jpeg";
pub const PADDLE_TEXTURE_FILE: &str = "stone_brick.jpeg";

/// Game state plus the GPU-side renderer it draws with.
pub struct PongApp {
    scene: SceneState,
    sim: SimulationState,

    mesh_renderer: MeshRenderer,
    frame_renderer: FrameRenderer,
    objects: SceneObjects,
    textures: SceneTextures,

    texture_dir: PathBuf,
}

impl PongApp {
    /// Registers every mesh and texture; images are requested in `on_start`.
    pub fn new(texture_dir: impl Into<PathBuf>) -> Result<Self> {
        let scene = SceneState::default();
        scene.camera.validate()?;

        let mut mesh_renderer = MeshRenderer::new().with_clear_color(CLEAR_COLOR);
        let objects = SceneObjects::register(&mut mesh_renderer);
        let textures = SceneTextures::register(&mut mesh_renderer);

        Ok(Self {
            scene,
            sim: SimulationState::default(),
            mesh_renderer,
            frame_renderer: FrameRenderer::new(),
            objects,
            textures,
            texture_dir: texture_dir.into(),
        })
    }

    fn texture_path(&self, file: &str) -> PathBuf {
        self.texture_dir.join(file)
    }
}

impl App for PongApp {
    fn on_start(&mut self, runtime: &mut RuntimeCtx) {
        runtime.load_texture(self.textures.walls, self.texture_path(WALL_TEXTURE_FILE));
        runtime.load_texture(self.textures.paddles, self.texture_path(PADDLE_TEXTURE_FILE));
    }

    fn on_key(&mut self, event: &KeyEvent) -> AppControl {
        if event.is_press() {
            log::debug!("key {} (code {})", event.key, event.code);
        }
        if let Some(direction) = controls::handle_key(&mut self.sim.player_paddle, event) {
            log::trace!("paddle steered {direction:?}");
        }
        AppControl::Continue
    }

    fn on_texture_loaded(&mut self, id: TextureId, image: TextureImage) {
        log::info!("image for {} loaded", self.textures.name(id));
        self.mesh_renderer.set_texture_image(id, image);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.scene.advance_rotation(ctx.time.elapsed_ms());

        let recorder = self.mesh_renderer.begin_frame(ctx.aspect_ratio());
        self.frame_renderer.render_frame(
            &self.scene,
            &mut self.sim,
            &self.objects,
            &self.textures,
            recorder,
        );

        let mesh_renderer = &mut self.mesh_renderer;
        ctx.render(|rctx, target| mesh_renderer.render(rctx, target))
    }
}
