use crate::core::scene::Scene;
use crate::api::types::{EntityId, SoundEvent, GameEvent};
use crate::assets::registry::SpriteRegistry;
use crate::extensions::tween::TweenState;
use crate::input::queue::InputQueue;
use crate::renderer::camera::Camera2D;
use crate::renderer::instance::RenderBuffer;
use crate::systems::dialogue::DialogueBox;
#[cfg(feature = "physics")]
use crate::core::physics::{PhysicsWorld, BodyDesc, ColliderMaterial};
#[cfg(feature = "physics")]
use crate::components::entity::Entity;
#[cfg(feature = "physics")]
use glam::Vec2;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Visible world width in game units (default: 1280).
    pub world_width: f32,
    /// Visible world height in game units (default: 720).
    pub world_height: f32,
    /// Maximum number of render instances (default: 1024).
    pub max_instances: usize,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Clear colour the page paints behind the world, as 0xRRGGBB.
    pub background: u32,
    /// Gravity vector for physics simulation. Default: zero (top-down).
    #[cfg(feature = "physics")]
    pub gravity: glam::Vec2,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 1280.0,
            world_height: 720.0,
            max_instances: 1024,
            max_sounds: 32,
            max_events: 32,
            background: 0x000000,
            #[cfg(feature = "physics")]
            gravity: glam::Vec2::ZERO,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Build the room: lay out the level, replace spawn markers, set up the camera.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The game loop tick. Read input, move the player, drive the dialogue box.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// A new asset manifest arrived from the page and passed validation.
    /// Games that draw from sheets rebuild their sprites here.
    fn load_assets(&mut self, _ctx: &mut EngineContext, _registry: SpriteRegistry) {}

    /// Optional read-only render pass, run before entities are appended.
    /// Background tilemaps push their instances here.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub camera: Camera2D,
    pub tweens: TweenState,
    pub dialogue: DialogueBox,
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
    next_id: u32,
    #[cfg(feature = "physics")]
    pub physics: PhysicsWorld,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    /// Create an EngineContext sized and configured from a `GameConfig`.
    pub fn from_config(config: &GameConfig) -> Self {
        #[cfg(feature = "physics")]
        let mut physics = PhysicsWorld::new(config.gravity);
        #[cfg(feature = "physics")]
        physics.set_dt(config.fixed_dt);

        Self {
            scene: Scene::new(),
            camera: Camera2D::new(config.world_width, config.world_height),
            tweens: TweenState::new(),
            dialogue: DialogueBox::default(),
            sounds: Vec::new(),
            events: Vec::new(),
            next_id: 1,
            #[cfg(feature = "physics")]
            physics,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a sound event to be forwarded to the page.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a game event to be forwarded to the page.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (sounds and events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }

    /// Despawn an entity, cleaning up its tweens and physics body.
    pub fn despawn(&mut self, id: EntityId) {
        self.tweens.remove_entity(id);
        #[cfg(feature = "physics")]
        if let Some(entity) = self.scene.despawn(id) {
            if let Some(body) = &entity.body {
                self.physics.remove_body(body);
            }
        }
        #[cfg(not(feature = "physics"))]
        self.scene.despawn(id);
    }

    /// Despawn every entity and drop all tweens; the dialogue box closes.
    pub fn clear_world(&mut self) {
        let ids: Vec<EntityId> = self.scene.iter().map(|e| e.id).collect();
        for id in ids {
            self.despawn(id);
        }
        self.tweens.clear();
        self.dialogue.close();
    }

    // -- Physics convenience methods --

    /// Spawn an entity with a physics body. Returns the EntityId.
    /// The body is created at the entity's position.
    #[cfg(feature = "physics")]
    pub fn spawn_with_body(
        &mut self,
        entity: Entity,
        desc: BodyDesc,
        material: ColliderMaterial,
    ) -> EntityId {
        let id = entity.id;
        let desc = desc.with_position(entity.pos);
        let body = self.physics.create_body(id, &desc, material);
        let entity = entity.with_body(body);
        self.scene.spawn(entity);
        id
    }

    /// Set the linear velocity of an entity's physics body.
    #[cfg(feature = "physics")]
    pub fn set_velocity(&mut self, id: EntityId, vel: Vec2) {
        if let Some(entity) = self.scene.get(id) {
            if let Some(body) = &entity.body {
                self.physics.set_velocity(body, vel);
            }
        }
    }

    /// Get the linear velocity of an entity's physics body.
    #[cfg(feature = "physics")]
    pub fn velocity(&self, id: EntityId) -> Vec2 {
        self.scene
            .get(id)
            .and_then(|e| e.body.as_ref())
            .map(|body| self.physics.velocity(body))
            .unwrap_or(Vec2::ZERO)
    }

    /// Step the physics simulation and sync positions back to entities.
    /// Called automatically by the game runner after `Game::update()`.
    #[cfg(feature = "physics")]
    pub fn step_physics(&mut self) {
        self.physics.step();

        for entity in self.scene.iter_mut() {
            if let Some(body) = &entity.body {
                entity.pos = self.physics.body_position(body);
            }
        }
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context for the game's custom render pass.
pub struct RenderContext<'a> {
    pub render_buffer: &'a mut RenderBuffer,
    pub camera: &'a Camera2D,
}
