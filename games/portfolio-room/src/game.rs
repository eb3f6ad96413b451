//! Portfolio room: walk around, inspect things, follow the links.

use glam::Vec2;
use roam_engine::{
    keys, nearest_interactable, require_marker, Easing, EngineContext, Entity, EntityId, Game,
    GameConfig, GameEvent, InputQueue, KeyTracker, LevelError, PointerTracker, RenderContext,
    RenderLayer, SoundEvent, SpriteRegistry, TilemapComponent, Tween, TweenId, AssetManifest,
};

use crate::config::{
    BACKGROUND, CAMERA_FOLLOW_SECS, EVENT_OPEN_LINK, HINT_FADE_SECS, HINT_OFFSET,
    INTERACT_RADIUS, POINTER_DEADZONE, SOUND_DIALOGUE, TILE, TYPEWRITER_SECS_PER_CHAR,
};
use crate::content::{DEFAULT_MANIFEST, LINKS};
use crate::player::{Player, Steering};
use crate::room::{build_room, PLAYER_MARKER};

const HINT_TAG: &str = "hint";

pub struct PortfolioRoom {
    registry: SpriteRegistry,
    tilemap: Option<TilemapComponent>,
    player: Option<Player>,
    pointer: PointerTracker,
    keys: KeyTracker,
    /// Interactable the hint points at; frozen while a dialogue is open.
    target: Option<EntityId>,
    hint: Option<EntityId>,
    hint_fade: Option<TweenId>,
}

impl PortfolioRoom {
    pub fn new() -> Self {
        let registry = AssetManifest::from_json(DEFAULT_MANIFEST)
            .and_then(|manifest| SpriteRegistry::from_manifest(&manifest))
            .unwrap_or_else(|err| {
                log::error!("built-in manifest rejected: {}", err);
                SpriteRegistry::new()
            });

        Self {
            registry,
            tilemap: None,
            player: None,
            pointer: PointerTracker::new(),
            keys: KeyTracker::new(),
            target: None,
            hint: None,
            hint_fade: None,
        }
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    fn build(&mut self, ctx: &mut EngineContext) -> Result<(), LevelError> {
        let built = build_room(ctx, &self.registry)?;
        ctx.camera.set_bounds(built.bounds.0, built.bounds.1);

        let spawns = require_marker(&mut ctx.scene, PLAYER_MARKER)?;
        if spawns.len() > 1 {
            log::warn!("room has {} player markers, using the first", spawns.len());
        }
        let player = Player::spawn(ctx, &self.registry, spawns[0]);
        ctx.camera.look_at(spawns[0]);

        if ctx.scene.marker_count() > 0 {
            log::warn!("{} markers left without an entity", ctx.scene.marker_count());
        }

        let hint_id = ctx.next_id();
        let mut hint = Entity::new(hint_id)
            .with_tag(HINT_TAG)
            .with_scale(Vec2::splat(TILE))
            .with_layer(RenderLayer::Overhead);
        hint.active = false;
        if let Some(sprite) = self.registry.get(HINT_TAG) {
            hint = hint.with_sprite(sprite.clone());
        }
        ctx.scene.spawn(hint);

        ctx.dialogue.set_secs_per_char(TYPEWRITER_SECS_PER_CHAR);

        log::info!(
            "room built: {} entities, {} wall runs",
            ctx.scene.len(),
            built.walls.len()
        );
        self.tilemap = Some(built.tilemap);
        self.player = Some(player);
        self.hint = Some(hint_id);
        Ok(())
    }

    fn rebuild(&mut self, ctx: &mut EngineContext) {
        ctx.clear_world();
        self.tilemap = None;
        self.player = None;
        self.target = None;
        self.hint = None;
        self.hint_fade = None;
        if let Err(err) = self.build(ctx) {
            log::error!("room: {}", err);
        }
    }

    /// Space, E or Enter; or a tap on the target or on an open dialogue.
    fn confirm(&mut self, ctx: &mut EngineContext) {
        if ctx.dialogue.is_typing() {
            ctx.dialogue.skip();
            return;
        }

        if ctx.dialogue.is_open() {
            if let Some(index) = ctx.dialogue.link().and_then(|link| LINKS.iter().position(|l| *l == link)) {
                ctx.emit_event(GameEvent::new(EVENT_OPEN_LINK, index as f32, 0.0, 0.0));
            }
            ctx.dialogue.close();
            return;
        }

        let Some(interactable) = self
            .target
            .and_then(|id| ctx.scene.get(id))
            .and_then(|e| e.interactable.clone())
        else {
            return;
        };
        log::debug!("inspecting {}", interactable.name);
        ctx.dialogue.open(interactable.dialogue, interactable.link);
        ctx.emit_sound(SoundEvent(SOUND_DIALOGUE));
    }

    fn steering(&self, ctx: &EngineContext, player_pos: Vec2) -> Steering {
        if ctx.dialogue.is_open() {
            return Steering::Still;
        }
        if self.pointer.is_held() {
            let delta = ctx.camera.screen_to_world(self.pointer.screen()) - player_pos;
            return if delta.length() > POINTER_DEADZONE {
                Steering::Pointer(delta.normalize())
            } else {
                Steering::Still
            };
        }
        Steering::Keys(self.keys.arrow_axis())
    }

    /// Keep the hint over the target, fading it in when the target changes.
    fn update_hint(&mut self, ctx: &mut EngineContext, previous: Option<EntityId>) {
        let Some(hint) = self.hint else {
            return;
        };
        let anchor = self.target.and_then(|id| ctx.scene.get(id)).map(|e| e.pos);
        let show = anchor.is_some() && !ctx.dialogue.is_open();

        if self.target != previous {
            if let Some(fade) = self.hint_fade.take() {
                ctx.tweens.remove(fade);
            }
            if anchor.is_some() {
                self.hint_fade = Some(ctx.tweens.add(hint, Tween::fade_in(HINT_FADE_SECS, Easing::QuadOut)));
            }
        }

        if let Some(entity) = ctx.scene.get_mut(hint) {
            entity.active = show;
            if let Some(pos) = anchor {
                entity.pos = pos - Vec2::new(0.0, HINT_OFFSET);
            }
        }
    }
}

impl Default for PortfolioRoom {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for PortfolioRoom {
    fn config(&self) -> GameConfig {
        GameConfig {
            background: BACKGROUND,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        if let Err(err) = self.build(ctx) {
            log::error!("room: {}", err);
        }
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let mut confirm = false;
        let mut cancel = false;
        let mut tap = None;

        for event in input.iter() {
            if self.pointer.handle(event) {
                tap = Some(ctx.camera.screen_to_world(self.pointer.screen()));
            }
            match self.keys.handle(event) {
                Some(keys::SPACE | keys::E | keys::ENTER) => confirm = true,
                Some(keys::ESCAPE) => cancel = true,
                _ => {}
            }
        }

        let Some(player_pos) = self.player.as_ref().and_then(|p| p.position(ctx)) else {
            return;
        };

        if cancel {
            ctx.dialogue.close();
        }

        let previous = self.target;
        if !ctx.dialogue.is_open() {
            self.target = nearest_interactable(&ctx.scene, player_pos, INTERACT_RADIUS).map(|n| n.id);
        }

        if let Some(at) = tap {
            let on_target = self
                .target
                .and_then(|id| ctx.scene.get(id))
                .is_some_and(|e| e.pos.distance(at) < TILE / 2.0);
            confirm |= ctx.dialogue.is_open() || on_target;
        }
        if confirm {
            self.confirm(ctx);
        }

        let steering = self.steering(ctx, player_pos);
        if let Some(player) = self.player.as_mut() {
            player.steer(ctx, steering);
        }

        self.update_hint(ctx, previous);
        ctx.camera.follow(player_pos, CAMERA_FOLLOW_SECS, Easing::Linear);
    }

    fn load_assets(&mut self, ctx: &mut EngineContext, registry: SpriteRegistry) {
        self.registry = registry;
        self.rebuild(ctx);
    }

    fn render(&self, ctx: &mut RenderContext) {
        let Some(tilemap) = &self.tilemap else {
            return;
        };
        let mut tiles = Vec::with_capacity(tilemap.tile_count());
        tilemap.push_visible_instances(ctx.camera, &mut tiles);
        ctx.render_buffer.extend(tiles);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roam_engine::{InputEvent, RenderBuffer};
    use crate::config::{PLAYER_SPEED, SCALE};

    fn started() -> (PortfolioRoom, EngineContext) {
        let mut game = PortfolioRoom::new();
        let mut ctx = EngineContext::from_config(&game.config());
        game.init(&mut ctx);
        (game, ctx)
    }

    fn press(key_code: u32) -> InputQueue {
        let mut input = InputQueue::new();
        input.push(InputEvent::KeyDown { key_code });
        input.push(InputEvent::KeyUp { key_code });
        input
    }

    fn player_id(game: &PortfolioRoom) -> EntityId {
        game.player().unwrap().id
    }

    /// Put the player one cell below the first entity tagged `tag`.
    fn stand_below(game: &PortfolioRoom, ctx: &mut EngineContext, tag: &str) -> EntityId {
        let target = ctx.scene.find_by_tag(tag).unwrap();
        let (target_id, pos) = (target.id, target.pos + Vec2::new(0.0, TILE));
        let id = player_id(game);
        let body = ctx.scene.get(id).unwrap().body.unwrap();
        ctx.physics.set_position(&body, pos);
        ctx.scene.get_mut(id).unwrap().pos = pos;
        target_id
    }

    #[test]
    fn init_builds_the_room() {
        let (game, ctx) = started();
        assert!(game.player().is_some());
        assert_eq!(ctx.scene.marker_count(), 0);
        assert!(ctx.scene.find_by_tag("cat").is_some());
        assert!(ctx.scene.find_by_tag(HINT_TAG).is_some_and(|h| !h.active));
        assert_eq!(game.config().background, BACKGROUND);
        assert!((ctx.dialogue.secs_per_char() - TYPEWRITER_SECS_PER_CHAR).abs() < 1e-6);
    }

    #[test]
    fn arrow_keys_walk_the_player() {
        let (mut game, mut ctx) = started();
        let start = ctx.scene.get(player_id(&game)).unwrap().pos;

        let mut input = InputQueue::new();
        input.push(InputEvent::KeyDown { key_code: keys::RIGHT });
        game.update(&mut ctx, &input);
        let empty = InputQueue::new();
        for _ in 0..30 {
            ctx.step_physics();
            game.update(&mut ctx, &empty);
        }

        let pos = ctx.scene.get(player_id(&game)).unwrap().pos;
        assert!(pos.x > start.x + PLAYER_SPEED * 0.4, "x={}", pos.x);
        assert!((pos.y - start.y).abs() < 1.0);
    }

    #[test]
    fn walls_hold_the_player_in() {
        let (mut game, mut ctx) = started();
        let mut input = InputQueue::new();
        input.push(InputEvent::KeyDown { key_code: keys::DOWN });
        game.update(&mut ctx, &input);
        let empty = InputQueue::new();
        for _ in 0..300 {
            ctx.step_physics();
            game.update(&mut ctx, &empty);
        }

        // Bottom wall row starts at y = 8 * TILE.
        let pos = ctx.scene.get(player_id(&game)).unwrap().pos;
        assert!(pos.y < 8.0 * TILE, "y={}", pos.y);
        assert!(pos.y > 7.0 * TILE - SCALE * 10.0);
    }

    #[test]
    fn confirm_near_the_cat_opens_its_dialogue() {
        let (mut game, mut ctx) = started();
        let cat = stand_below(&game, &mut ctx, "cat");
        game.update(&mut ctx, &InputQueue::new());
        assert_eq!(game.target(), Some(cat));
        assert!(ctx.scene.find_by_tag(HINT_TAG).unwrap().active);

        game.update(&mut ctx, &press(keys::SPACE));
        assert!(ctx.dialogue.is_open());
        assert!(ctx.dialogue.full_text().starts_with("The cat"));
        assert_eq!(ctx.sounds, vec![SoundEvent(SOUND_DIALOGUE)]);
        assert!(!ctx.scene.find_by_tag(HINT_TAG).unwrap().active);
    }

    #[test]
    fn confirm_skips_typing_then_closes() {
        let (mut game, mut ctx) = started();
        stand_below(&game, &mut ctx, "table");
        game.update(&mut ctx, &press(keys::E));
        assert!(ctx.dialogue.is_typing());

        game.update(&mut ctx, &press(keys::E));
        assert!(ctx.dialogue.is_open());
        assert!(!ctx.dialogue.is_typing());

        game.update(&mut ctx, &press(keys::ENTER));
        assert!(!ctx.dialogue.is_open());
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn finished_orb_dialogue_reports_its_link() {
        let (mut game, mut ctx) = started();
        stand_below(&game, &mut ctx, "x orb");
        game.update(&mut ctx, &press(keys::SPACE));
        ctx.dialogue.skip();
        ctx.clear_frame_data();

        game.update(&mut ctx, &press(keys::SPACE));
        assert!(!ctx.dialogue.is_open());
        assert_eq!(ctx.events, vec![GameEvent::new(EVENT_OPEN_LINK, 2.0, 0.0, 0.0)]);
    }

    #[test]
    fn escape_closes_and_player_stands_still_while_reading() {
        let (mut game, mut ctx) = started();
        stand_below(&game, &mut ctx, "pc");
        game.update(&mut ctx, &press(keys::SPACE));

        let mut input = InputQueue::new();
        input.push(InputEvent::KeyDown { key_code: keys::LEFT });
        game.update(&mut ctx, &input);
        assert_eq!(ctx.velocity(player_id(&game)), Vec2::ZERO);

        game.update(&mut ctx, &press(keys::ESCAPE));
        assert!(!ctx.dialogue.is_open());
        assert!(ctx.velocity(player_id(&game)).x < 0.0);
    }

    #[test]
    fn tapping_the_target_confirms() {
        let (mut game, mut ctx) = started();
        let cat = stand_below(&game, &mut ctx, "cat");
        game.update(&mut ctx, &InputQueue::new());

        let screen = ctx.scene.get(cat).unwrap().pos - ctx.camera.view_rect().0;
        let mut input = InputQueue::new();
        input.push(InputEvent::PointerDown { x: screen.x, y: screen.y });
        input.push(InputEvent::PointerUp { x: screen.x, y: screen.y });
        game.update(&mut ctx, &input);
        assert!(ctx.dialogue.is_open());
    }

    #[test]
    fn held_pointer_steers_until_blur() {
        let (mut game, mut ctx) = started();
        let id = player_id(&game);
        let player_screen = ctx.scene.get(id).unwrap().pos - ctx.camera.view_rect().0;
        let right = player_screen + Vec2::new(200.0, 0.0);

        let mut input = InputQueue::new();
        input.push(InputEvent::PointerDown { x: right.x, y: right.y });
        game.update(&mut ctx, &input);
        assert!(ctx.velocity(id).x > 0.0, "v={:?}", ctx.velocity(id));
        assert!(ctx.velocity(id).y.abs() < 1e-3);

        // Still held, but inside the deadzone around the player.
        let mut input = InputQueue::new();
        input.push(InputEvent::PointerMove { x: player_screen.x, y: player_screen.y });
        game.update(&mut ctx, &input);
        assert_eq!(ctx.velocity(id), Vec2::ZERO);

        let mut input = InputQueue::new();
        input.push(InputEvent::PointerMove { x: right.x, y: right.y });
        game.update(&mut ctx, &input);
        assert!(ctx.velocity(id).x > 0.0);

        let mut input = InputQueue::new();
        input.push(InputEvent::Blur);
        game.update(&mut ctx, &input);
        assert_eq!(ctx.velocity(id), Vec2::ZERO);
    }

    #[test]
    fn nothing_in_reach_means_no_target() {
        let (mut game, mut ctx) = started();
        game.update(&mut ctx, &press(keys::SPACE));
        assert_eq!(game.target(), None);
        assert!(!ctx.dialogue.is_open());
    }

    #[test]
    fn loading_assets_rebuilds_the_room() {
        let (mut game, mut ctx) = started();
        let before = ctx.scene.len();
        let registry = SpriteRegistry::from_manifest(&AssetManifest::from_json(DEFAULT_MANIFEST).unwrap()).unwrap();

        game.load_assets(&mut ctx, registry);
        assert_eq!(ctx.scene.len(), before);
        assert_eq!(ctx.scene.find_all_by_tag(crate::player::PLAYER_TAG).len(), 1);
        assert_eq!(ctx.physics.body_count(), ctx.scene.iter().filter(|e| e.body.is_some()).count());
    }

    #[test]
    fn render_pushes_visible_tiles() {
        let (game, ctx) = started();
        let mut buffer = RenderBuffer::with_capacity(1024);
        let mut render_ctx = RenderContext { render_buffer: &mut buffer, camera: &ctx.camera };
        game.render(&mut render_ctx);
        assert!(!buffer.instances.is_empty());
        assert!(buffer.instances.iter().all(|i| i.size == TILE));
    }
}
