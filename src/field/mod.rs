//! The particle field: owns every star and advances its motion each frame.
//!
//! Simulation state lives in the [`StarField`] resource so the kinematics
//! can be exercised without a running app; thin systems mirror particle
//! state onto sprite transforms afterwards. Stars drift linearly with a
//! small circular perturbation, twinkle within fixed opacity bounds, and
//! wrap toroidally just outside the visible viewport.

mod particle;

pub use particle::{StarMode, StarParticle};

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::constants::motion;
use crate::post::Post;
use crate::store::PostSet;
use crate::surface::{GlowTexture, layers};
use crate::theme::FieldTheme;

use particle::rand_range;

/// Visible world half-extents of the field, origin at the window center.
#[derive(Clone, Copy, Debug)]
pub struct FieldBounds {
    pub half: Vec2,
}

impl FieldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            half: Vec2::new(width, height) * 0.5,
        }
    }
}

/// Rebuild every star from the working post set, in its order.
#[derive(Message)]
pub struct RebuildFieldEvent;

/// Add one star for a newly persisted post.
#[derive(Message)]
pub struct SpawnStarEvent {
    pub post: Post,
}

/// Marker for star sprite entities.
#[derive(Component)]
pub struct StarSprite;

/// The set of active stars and their kinematics.
#[derive(Resource)]
pub struct StarField {
    particles: Vec<StarParticle>,
    bounds: FieldBounds,
}

impl StarField {
    pub fn new(bounds: FieldBounds) -> Self {
        Self {
            particles: Vec::new(),
            bounds,
        }
    }

    pub fn bounds(&self) -> FieldBounds {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: FieldBounds) {
        self.bounds = bounds;
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[StarParticle] {
        &self.particles
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut StarParticle> {
        self.particles.get_mut(index)
    }

    /// Create a particle for `post`. A supplied position puts the star
    /// back where it was saved; otherwise it lands uniformly within the
    /// viewport padded by [`motion::SPAWN_PAD`] on each side.
    pub fn spawn(
        &mut self,
        entity: Entity,
        post: Post,
        initial_position: Option<Vec2>,
        theme: &FieldTheme,
    ) {
        let pad = motion::SPAWN_PAD;
        let position = initial_position.unwrap_or_else(|| {
            Vec2::new(
                rand_range(-self.bounds.half.x - pad, self.bounds.half.x + pad),
                rand_range(-self.bounds.half.y - pad, self.bounds.half.y + pad),
            )
        });

        let mut velocity = Vec2::new(
            rand_range(-theme.max_velocity.x, theme.max_velocity.x),
            rand_range(-theme.max_velocity.y, theme.max_velocity.y),
        );
        // A component of exactly zero would leave the star visibly stuck
        // on that axis.
        if velocity.x == 0.0 {
            velocity.x = motion::VELOCITY_X_FALLBACK;
        }
        if velocity.y == 0.0 {
            velocity.y = motion::VELOCITY_Y_FALLBACK;
        }

        let base_alpha = rand_range(theme.base_alpha.0, theme.base_alpha.1);
        self.particles.push(StarParticle {
            entity,
            post,
            position,
            velocity,
            wobble: rand_range(0.0, std::f32::consts::TAU),
            wobble_rate: rand_range(theme.wobble_rate.0, theme.wobble_rate.1),
            base_scale: rand_range(theme.scale.0, theme.scale.1),
            base_alpha,
            alpha: base_alpha,
            mode: StarMode::Resting,
        });
    }

    /// Remove every particle, returning the sprite entities to despawn.
    pub fn clear(&mut self) -> Vec<Entity> {
        self.particles.drain(..).map(|p| p.entity).collect()
    }

    /// Advance every particle by `dt` seconds. Particles do not interact,
    /// so order is irrelevant.
    pub fn advance(&mut self, dt: f32) {
        let limit = self.bounds.half + Vec2::splat(motion::WRAP_PAD);
        for p in &mut self.particles {
            p.wobble += p.wobble_rate * dt;
            p.position.x += p.velocity.x * dt + p.wobble.cos() * motion::WOBBLE_DRIFT * dt;
            p.position.y += p.velocity.y * dt + p.wobble.sin() * motion::WOBBLE_DRIFT * dt;

            p.alpha = (p.base_alpha + motion::TWINKLE_DEPTH * (p.wobble * motion::TWINKLE_RATE).sin())
                .clamp(motion::ALPHA_MIN, motion::ALPHA_MAX);

            // Wrap, not bounce: velocity is preserved and re-entry happens
            // outside the visible area.
            if p.position.x < -limit.x {
                p.position.x = limit.x;
            } else if p.position.x > limit.x {
                p.position.x = -limit.x;
            }
            if p.position.y < -limit.y {
                p.position.y = limit.y;
            } else if p.position.y > limit.y {
                p.position.y = -limit.y;
            }
        }
    }

    /// Topmost star under `point`, if any. Later spawns draw above
    /// earlier ones, so the scan runs newest-first.
    pub fn hit_test(&self, point: Vec2, theme: &FieldTheme) -> Option<usize> {
        self.particles
            .iter()
            .enumerate()
            .rev()
            .find(|(_, p)| {
                let radius = theme.glow_size as f32 * 0.5 * p.render_scale(theme);
                p.position.distance_squared(point) <= radius * radius
            })
            .map(|(index, _)| index)
    }

    /// Uniform point inside the visible (unpadded) viewport. New posts
    /// record this as their persisted position.
    pub fn random_interior_point(&self) -> Vec2 {
        Vec2::new(
            rand_range(-self.bounds.half.x, self.bounds.half.x),
            rand_range(-self.bounds.half.y, self.bounds.half.y),
        )
    }
}

pub struct FieldPlugin;

impl Plugin for FieldPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<RebuildFieldEvent>()
            .add_message::<SpawnStarEvent>()
            .add_systems(Startup, init_field)
            .add_systems(
                Update,
                (handle_rebuild, handle_spawn, advance_field, sync_star_sprites).chain(),
            );
    }
}

fn init_field(mut commands: Commands, windows: Query<&Window, With<PrimaryWindow>>) {
    let bounds = windows
        .single()
        .map(|window| FieldBounds::new(window.width(), window.height()))
        .unwrap_or_else(|_| FieldBounds::new(1280.0, 720.0));
    commands.insert_resource(StarField::new(bounds));
}

/// Spawn a sprite entity and register its particle with the field.
fn spawn_star(
    commands: &mut Commands,
    field: &mut StarField,
    theme: &FieldTheme,
    glow: &GlowTexture,
    post: Post,
    initial_position: Option<Vec2>,
) {
    let entity = commands
        .spawn((
            StarSprite,
            Sprite {
                image: glow.0.clone(),
                color: theme.star_tint,
                ..default()
            },
            Transform::from_translation(Vec3::new(0.0, 0.0, layers::STARS)),
        ))
        .id();
    field.spawn(entity, post, initial_position, theme);
}

fn handle_rebuild(
    mut events: MessageReader<RebuildFieldEvent>,
    mut commands: Commands,
    mut field: ResMut<StarField>,
    posts: Res<PostSet>,
    theme: Res<FieldTheme>,
    glow: Res<GlowTexture>,
) {
    if events.read().next().is_none() {
        return;
    }
    events.clear();

    for entity in field.clear() {
        commands.entity(entity).try_despawn();
    }
    for post in &posts.0 {
        spawn_star(
            &mut commands,
            &mut field,
            &theme,
            &glow,
            post.clone(),
            post.position,
        );
    }
    info!("Field rebuilt: {} stars", field.len());
}

fn handle_spawn(
    mut events: MessageReader<SpawnStarEvent>,
    mut commands: Commands,
    mut field: ResMut<StarField>,
    theme: Res<FieldTheme>,
    glow: Res<GlowTexture>,
) {
    for event in events.read() {
        spawn_star(
            &mut commands,
            &mut field,
            &theme,
            &glow,
            event.post.clone(),
            event.post.position,
        );
        info!("Star added: {} ({} total)", event.post.title, field.len());
    }
}

fn advance_field(time: Res<Time>, mut field: ResMut<StarField>) {
    field.advance(time.delta_secs());
}

/// Mirror particle state onto the sprite entities. Later spawns sit a
/// hair above earlier ones, matching the hit-test's topmost rule.
fn sync_star_sprites(
    field: Res<StarField>,
    theme: Res<FieldTheme>,
    mut sprites: Query<(&mut Transform, &mut Sprite), With<StarSprite>>,
) {
    for (index, p) in field.particles().iter().enumerate() {
        if let Ok((mut transform, mut sprite)) = sprites.get_mut(p.entity) {
            transform.translation = p.position.extend(layers::STARS + index as f32 * 1e-3);
            transform.scale = Vec3::splat(p.render_scale(&theme));
            sprite.color = p.tint(&theme).with_alpha(p.alpha);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_post(n: usize) -> Post {
        Post {
            id: format!("post-{n}"),
            title: format!("Star {n}"),
            text: "A short line about this star.".to_string(),
            image: None,
            position: None,
            created_at: Utc::now(),
        }
    }

    fn test_field() -> (StarField, FieldTheme) {
        (
            StarField::new(FieldBounds::new(1280.0, 720.0)),
            FieldTheme::hosted(),
        )
    }

    #[test]
    fn spawn_without_position_stays_in_padded_bounds() {
        fastrand::seed(7);
        let (mut field, theme) = test_field();
        for n in 0..200 {
            field.spawn(Entity::PLACEHOLDER, make_post(n), None, &theme);
        }
        let limit = field.bounds().half + Vec2::splat(motion::SPAWN_PAD);
        for p in field.particles() {
            assert!(p.position.x.abs() <= limit.x, "x out of bounds: {}", p.position.x);
            assert!(p.position.y.abs() <= limit.y, "y out of bounds: {}", p.position.y);
        }
    }

    #[test]
    fn spawn_velocity_components_are_never_zero() {
        fastrand::seed(11);
        let (mut field, theme) = test_field();
        for n in 0..500 {
            field.spawn(Entity::PLACEHOLDER, make_post(n), None, &theme);
        }
        for p in field.particles() {
            assert_ne!(p.velocity.x, 0.0);
            assert_ne!(p.velocity.y, 0.0);
        }
    }

    #[test]
    fn spawn_uses_explicit_position() {
        let (mut field, theme) = test_field();
        let saved = Vec2::new(42.5, -17.0);
        field.spawn(Entity::PLACEHOLDER, make_post(0), Some(saved), &theme);
        assert_eq!(field.particles()[0].position, saved);
    }

    #[test]
    fn rebuild_spawns_one_particle_per_post_in_order() {
        let (mut field, theme) = test_field();
        field.spawn(Entity::PLACEHOLDER, make_post(99), None, &theme);
        let entities = field.clear();
        assert_eq!(entities.len(), 1);
        assert!(field.is_empty());

        for n in 0..5 {
            field.spawn(Entity::PLACEHOLDER, make_post(n), None, &theme);
        }
        let ids: Vec<_> = field.particles().iter().map(|p| p.post.id.as_str()).collect();
        assert_eq!(ids, ["post-0", "post-1", "post-2", "post-3", "post-4"]);
    }

    #[test]
    fn advance_keeps_positions_within_wrap_bounds() {
        fastrand::seed(23);
        let (mut field, theme) = test_field();
        for n in 0..100 {
            field.spawn(Entity::PLACEHOLDER, make_post(n), None, &theme);
        }
        let limit = field.bounds().half + Vec2::splat(motion::WRAP_PAD);
        for dt in [0.0, 0.016, 0.25, 1.0, 10.0, 60.0] {
            field.advance(dt);
            for p in field.particles() {
                assert!(p.position.x.abs() <= limit.x, "dt {dt}: x {}", p.position.x);
                assert!(p.position.y.abs() <= limit.y, "dt {dt}: y {}", p.position.y);
            }
        }
    }

    #[test]
    fn advance_clamps_alpha_to_twinkle_bounds() {
        fastrand::seed(31);
        let (mut field, theme) = test_field();
        for n in 0..100 {
            field.spawn(Entity::PLACEHOLDER, make_post(n), None, &theme);
        }
        for _ in 0..600 {
            field.advance(0.016);
            for p in field.particles() {
                assert!(p.alpha >= motion::ALPHA_MIN && p.alpha <= motion::ALPHA_MAX);
            }
        }
    }

    #[test]
    fn advance_with_zero_dt_leaves_positions_unchanged() {
        fastrand::seed(5);
        let (mut field, theme) = test_field();
        field.spawn(Entity::PLACEHOLDER, make_post(0), None, &theme);
        let before = field.particles()[0].position;
        field.advance(0.0);
        assert_eq!(field.particles()[0].position, before);
    }

    #[test]
    fn wrap_teleports_to_opposite_edge_and_keeps_velocity() {
        let (mut field, theme) = test_field();
        field.spawn(Entity::PLACEHOLDER, make_post(0), Some(Vec2::ZERO), &theme);
        let limit = field.bounds().half + Vec2::splat(motion::WRAP_PAD);
        {
            let p = field.get_mut(0).unwrap();
            p.position = Vec2::new(limit.x - 0.5, 0.0);
            p.velocity = Vec2::new(1000.0, 0.0);
            p.wobble_rate = 0.0;
        }
        field.advance(1.0);
        let p = &field.particles()[0];
        assert_eq!(p.position.x, -limit.x);
        assert_eq!(p.velocity, Vec2::new(1000.0, 0.0));
    }

    #[test]
    fn hover_mode_scales_and_restores() {
        let (mut field, theme) = test_field();
        field.spawn(Entity::PLACEHOLDER, make_post(0), Some(Vec2::ZERO), &theme);
        let base = field.particles()[0].base_scale;

        field.get_mut(0).unwrap().mode = StarMode::Hovered;
        let p = &field.particles()[0];
        assert_eq!(p.render_scale(&theme), base * theme.hover_scale);
        assert_eq!(p.tint(&theme), theme.highlight_tint);

        field.get_mut(0).unwrap().mode = StarMode::Resting;
        let p = &field.particles()[0];
        assert_eq!(p.render_scale(&theme), base);
        assert_eq!(p.tint(&theme), theme.star_tint);
    }

    #[test]
    fn hit_test_prefers_the_topmost_star() {
        let (mut field, theme) = test_field();
        field.spawn(Entity::PLACEHOLDER, make_post(0), Some(Vec2::ZERO), &theme);
        field.spawn(Entity::PLACEHOLDER, make_post(1), Some(Vec2::ZERO), &theme);
        assert_eq!(field.hit_test(Vec2::ZERO, &theme), Some(1));

        let far = field.bounds().half + Vec2::splat(motion::WRAP_PAD);
        assert_eq!(field.hit_test(far, &theme), None);
    }
}
