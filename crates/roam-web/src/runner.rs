use roam_engine::{
    Game, GameConfig, EngineContext, RenderContext,
    InputEvent, InputQueue, RenderBuffer,
    FixedTimestep, ProtocolLayout, FrameHeader,
    AssetManifest, SpriteRegistry, Camera2D, DialogueBox,
};
use roam_engine::bridge::protocol::{write_header, HEADER_FLOATS};
use roam_engine::systems::animation::tick_animations;
use roam_engine::systems::depth::apply_depth_sort;
use roam_engine::systems::render::build_render_buffer;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]` (see `export_game!`), because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    frame: u32,
    header: [f32; HEADER_FLOATS],
    /// Flat buffer of sound event IDs, one float each.
    sound_buffer: Vec<f32>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);

        Self {
            ctx: EngineContext::from_config(&config),
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            sound_buffer: Vec::with_capacity(config.max_sounds),
            game,
            input: InputQueue::new(),
            timestep,
            layout,
            config,
            initialized: false,
            frame: 0,
            header: [0.0; HEADER_FLOATS],
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.build_frame();
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: fixed-step simulation, then rebuild the frame data.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        let step_dt = self.timestep.dt();
        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.game.update(&mut self.ctx, &self.input);
            // Each event is seen by exactly one update.
            self.input.clear();

            tick_animations(&mut self.ctx.scene, step_dt);
            self.ctx.tweens.tick(step_dt, &mut self.ctx.scene);
            self.ctx.camera.tick(step_dt);
            #[cfg(feature = "physics")]
            self.ctx.step_physics();
            self.ctx.dialogue.tick(step_dt);
            apply_depth_sort(&mut self.ctx.scene);
        }

        self.build_frame();
    }

    /// Parse and validate an asset manifest and hand it to the game.
    /// On error the game keeps its current assets.
    pub fn load_manifest(&mut self, json: &str) {
        let registry = AssetManifest::from_json(json)
            .and_then(|manifest| SpriteRegistry::from_manifest(&manifest));
        match registry {
            Ok(registry) => {
                self.game.load_assets(&mut self.ctx, registry);
                self.build_frame();
                log::info!("asset manifest loaded");
            }
            Err(err) => log::error!("asset manifest rejected: {}", err),
        }
    }

    /// The canvas changed size (in CSS pixels).
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        self.ctx.camera.resize(
            viewport_width,
            viewport_height,
            self.config.world_width,
            self.config.world_height,
        );
    }

    fn build_frame(&mut self) {
        self.render_buffer.clear();
        {
            let mut render_ctx = RenderContext {
                render_buffer: &mut self.render_buffer,
                camera: &self.ctx.camera,
            };
            self.game.render(&mut render_ctx);
        }
        build_render_buffer(self.ctx.scene.iter(), &mut self.render_buffer);

        self.sound_buffer.clear();
        self.sound_buffer
            .extend(self.ctx.sounds.iter().take(self.config.max_sounds).map(|s| s.0 as f32));

        self.frame = self.frame.wrapping_add(1);
        let frame = FrameHeader {
            frame: self.frame,
            instance_count: self.render_buffer.instance_count(),
            instance_overflow: self.render_buffer.overflow(),
            sound_count: self.sound_buffer.len() as u32,
            event_count: self.ctx.events.len() as u32,
            world_size: glam::Vec2::new(self.ctx.camera.width, self.ctx.camera.height),
            camera_center: self.ctx.camera.center(),
            dialogue_open: self.ctx.dialogue.is_open(),
            background: self.config.background,
        };
        write_header(&self.layout, &frame, &mut self.header);
    }

    // ---- State accessors ----

    pub fn camera(&self) -> &Camera2D {
        &self.ctx.camera
    }

    pub fn dialogue(&self) -> &DialogueBox {
        &self.ctx.dialogue
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    // ---- Pointer accessors for zero-copy reads ----

    pub fn header(&self) -> &[f32; HEADER_FLOATS] {
        &self.header
    }

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn sound_events_ptr(&self) -> *const f32 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len().min(self.config.max_events) as u32
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }

    pub fn camera_x(&self) -> f32 {
        self.ctx.camera.center().x
    }

    pub fn camera_y(&self) -> f32 {
        self.ctx.camera.center().y
    }

    // ---- Capacity accessors (read by the page via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use roam_engine::bridge::protocol::{HEADER_FRAME_COUNTER, HEADER_INSTANCE_COUNT, HEADER_SOUND_COUNT};
    use roam_engine::{AtlasId, Entity, EntityId, SoundEvent, SpriteComponent};

    /// Spawns one sprite, counts updates, beeps on every key press.
    #[derive(Default)]
    struct Probe {
        updates: u32,
        keys_seen: u32,
        assets_loaded: bool,
    }

    impl Game for Probe {
        fn init(&mut self, ctx: &mut EngineContext) {
            let id = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(id)
                    .with_pos(Vec2::new(10.0, 20.0))
                    .with_sprite(SpriteComponent::cell(AtlasId(0), 1, 2))
                    .with_depth_offset(0.0),
            );
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
            self.updates += 1;
            for event in input.iter() {
                if let InputEvent::KeyDown { .. } = event {
                    self.keys_seen += 1;
                    ctx.emit_sound(SoundEvent(3));
                }
            }
            if let Some(e) = ctx.scene.get_mut(EntityId(1)) {
                e.pos.y += 1.0;
            }
        }

        fn load_assets(&mut self, _ctx: &mut EngineContext, _registry: SpriteRegistry) {
            self.assets_loaded = true;
        }
    }

    fn runner() -> GameRunner<Probe> {
        let mut runner = GameRunner::new(Probe::default());
        runner.init();
        runner
    }

    #[test]
    fn tick_runs_fixed_steps() {
        let mut runner = runner();
        runner.tick(1.0 / 60.0 + 0.0001);
        assert_eq!(runner.game().updates, 1);
        runner.tick(0.001);
        assert_eq!(runner.game().updates, 1);
        runner.tick(2.0 / 60.0);
        assert_eq!(runner.game().updates, 3);
    }

    #[test]
    fn input_is_seen_once_even_with_several_steps() {
        let mut runner = runner();
        runner.push_input(InputEvent::KeyDown { key_code: 32 });
        runner.tick(3.0 / 60.0 + 0.0001);
        assert_eq!(runner.game().keys_seen, 1);
        assert_eq!(runner.sound_events_len(), 1);
    }

    #[test]
    fn depth_sort_follows_movement() {
        let mut runner = runner();
        runner.tick(1.0 / 60.0 + 0.0001);
        let entity = runner.context().scene.get(EntityId(1)).unwrap();
        assert_eq!(entity.z, entity.pos.y);
        assert_eq!(entity.pos.y, 21.0);
    }

    #[test]
    fn header_tracks_frame_data() {
        let mut runner = runner();
        runner.push_input(InputEvent::KeyDown { key_code: 32 });
        runner.tick(1.0 / 60.0 + 0.0001);
        let header = runner.header();
        assert_eq!(header[HEADER_INSTANCE_COUNT], 1.0);
        assert_eq!(header[HEADER_SOUND_COUNT], 1.0);
        // init built frame 1, the tick built frame 2.
        assert_eq!(header[HEADER_FRAME_COUNTER], 2.0);
    }

    #[test]
    fn bad_manifest_is_ignored() {
        let mut runner = runner();
        runner.load_manifest("{ nope");
        assert!(!runner.game().assets_loaded);
        runner.load_manifest(r#"{ "atlases": [] }"#);
        assert!(runner.game().assets_loaded);
    }

    #[test]
    fn tick_before_init_does_nothing() {
        let mut runner = GameRunner::new(Probe::default());
        runner.tick(1.0);
        assert_eq!(runner.game().updates, 0);
    }
}
