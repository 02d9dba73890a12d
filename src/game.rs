//! SoL game state: suns, asteroids, mirrors, forges and the Solarium
//! economy. The renderer consumes this as read-only collaborator state —
//! light source positions, influence circles and the point-in-shadow
//! predicate all originate here.

use macroquad::prelude::*;
use ::rand::Rng;

use crate::anim::{AnimStore, GlowAnim, StructureId};
use crate::config;
use crate::outline::InfluenceCircle;
use crate::shadow::LightSource;

/// The three playable factions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Faction {
    Radiant,
    Aurum,
    Solari,
}

impl Faction {
    pub const ALL: [Self; 3] = [Self::Radiant, Self::Aurum, Self::Solari];

    pub fn label(self) -> &'static str {
        match self {
            Self::Radiant => "Radiant",
            Self::Aurum => "Aurum",
            Self::Solari => "Solari",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Radiant => Color::new(0.55, 0.80, 1.0, 1.0),
            Self::Aurum => Color::new(1.0, 0.83, 0.35, 1.0),
            Self::Solari => Color::new(1.0, 0.55, 0.35, 1.0),
        }
    }
}

/// Light source. `binary` switches the scene into the split full-light /
/// full-dark mode that disables ordinary shadow computation.
#[derive(Clone, Debug)]
pub struct Sun {
    pub pos: Vec2,
    pub intensity: f32,
    pub radius: f32,
    pub binary: bool,
}

impl Sun {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            intensity: 1.0,
            radius: config::SUN_RADIUS,
            binary: false,
        }
    }
}

/// Drifting opaque body. Asteroids are the occluder set behind the
/// point-in-shadow predicate and are drawn with silhouette shadows.
#[derive(Clone, Debug)]
pub struct Asteroid {
    pub pos: Vec2,
    pub radius: f32,
    pub velocity: Vec2,
    pub rotation: f32,
    pub spin: f32,
}

#[derive(Clone, Debug)]
pub struct SolarMirror {
    pub pos: Vec2,
    pub health: f32,
    pub efficiency: f32,
    pub glow: Option<StructureId>,
}

impl SolarMirror {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            health: config::MIRROR_HEALTH,
            efficiency: 1.0,
            glow: None,
        }
    }

    /// Solarium produced over `dt` seconds of uninterrupted light.
    pub fn generate_solarium(&self, dt: f32) -> f32 {
        config::MIRROR_GENERATION_RATE * self.efficiency * dt
    }
}

#[derive(Clone, Debug)]
pub struct StellarForge {
    pub pos: Vec2,
    pub health: f32,
    pub is_receiving_light: bool,
    pub unit_queue: Vec<String>,
    pub glow: Option<StructureId>,
}

impl StellarForge {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            health: config::FORGE_HEALTH,
            is_receiving_light: false,
            unit_queue: Vec::new(),
            glow: None,
        }
    }

    pub fn can_produce_units(&self) -> bool {
        self.is_receiving_light && self.health > 0.0
    }

    /// Queue a unit if the forge is lit and the player can afford it.
    pub fn produce_unit(&mut self, unit_type: &str, cost: f32, player_solarium: f32) -> bool {
        if !self.can_produce_units() || player_solarium < cost {
            return false;
        }
        self.unit_queue.push(unit_type.to_string());
        true
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub name: String,
    pub faction: Faction,
    pub solarium: f32,
    pub forge: Option<StellarForge>,
    pub mirrors: Vec<SolarMirror>,
}

impl Player {
    pub fn new(name: &str, faction: Faction) -> Self {
        Self {
            name: name.to_string(),
            faction,
            solarium: config::STARTING_SOLARIUM,
            forge: None,
            mirrors: Vec::new(),
        }
    }

    pub fn is_defeated(&self) -> bool {
        match &self.forge {
            Some(forge) => forge.health <= 0.0,
            None => true,
        }
    }

    pub fn add_solarium(&mut self, amount: f32) {
        self.solarium += amount;
    }

    pub fn spend_solarium(&mut self, amount: f32) -> bool {
        if self.solarium >= amount {
            self.solarium -= amount;
            true
        } else {
            false
        }
    }
}

const SEGMENT_EPSILON: f32 = 1e-5;

/// Closest point on segment [a, b] to p.
pub fn closest_point_on_segment(a: Vec2, b: Vec2, p: Vec2) -> Vec2 {
    let ab = b - a;
    let ab_len_sq = ab.length_squared();
    if ab_len_sq <= SEGMENT_EPSILON {
        return a;
    }
    let t = ((p - a).dot(ab) / ab_len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Does any asteroid block the open segment from `from` to `to`?
pub fn segment_blocked(from: Vec2, to: Vec2, asteroids: &[Asteroid]) -> bool {
    for asteroid in asteroids {
        let cp = closest_point_on_segment(from, to, asteroid.pos);
        if cp.distance_squared(asteroid.pos) < asteroid.radius * asteroid.radius {
            return true;
        }
    }
    false
}

/// The externally-supplied occlusion predicate the shadow renderer consumes:
/// a point is in shadow when no sun has a clear line to it. With no suns at
/// all there is no light, so everything is in shadow.
pub fn point_in_shadow(pos: Vec2, suns: &[Sun], asteroids: &[Asteroid]) -> bool {
    suns.iter()
        .all(|sun| segment_blocked(pos, sun.pos, asteroids))
}

pub struct GameState {
    pub players: Vec<Player>,
    pub suns: Vec<Sun>,
    pub asteroids: Vec<Asteroid>,
    pub glow: AnimStore<GlowAnim>,
    pub game_time: f32,
    pub is_running: bool,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            suns: Vec::new(),
            asteroids: Vec::new(),
            glow: AnimStore::new(32),
            game_time: 0.0,
            is_running: false,
        }
    }

    /// Give a player their starting forge and mirrors, registering glow
    /// slots for each structure.
    pub fn initialize_player(
        &mut self,
        mut player: Player,
        forge_pos: Vec2,
        mirror_positions: &[Vec2],
    ) {
        let mut forge = StellarForge::new(forge_pos);
        forge.glow = Some(self.glow.insert(GlowAnim::default()));
        player.forge = Some(forge);

        for &pos in mirror_positions {
            let mut mirror = SolarMirror::new(pos);
            mirror.glow = Some(self.glow.insert(GlowAnim::default()));
            player.mirrors.push(mirror);
        }

        self.players.push(player);
    }

    pub fn spawn_asteroids(&mut self, count: usize, rng: &mut impl Rng) {
        for _ in 0..count {
            let pos = vec2(
                rng.gen_range(-config::WORLD_HALF_WIDTH..config::WORLD_HALF_WIDTH),
                rng.gen_range(-config::WORLD_HALF_HEIGHT..config::WORLD_HALF_HEIGHT),
            );
            // Keep the spawn lane clear of the central sun.
            if pos.length() < config::SUN_RADIUS * 2.0 {
                continue;
            }
            let heading = rng.gen_range(0.0..std::f32::consts::TAU);
            self.asteroids.push(Asteroid {
                pos,
                radius: rng.gen_range(config::ASTEROID_MIN_RADIUS..config::ASTEROID_MAX_RADIUS),
                velocity: Vec2::from_angle(heading) * config::ASTEROID_DRIFT_SPEED,
                rotation: rng.gen_range(0.0..std::f32::consts::TAU),
                spin: rng.gen_range(-0.4..0.4),
            });
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.game_time += dt;

        for asteroid in &mut self.asteroids {
            asteroid.pos += asteroid.velocity * dt;
            asteroid.rotation += asteroid.spin * dt;
            if asteroid.pos.x.abs() > config::WORLD_HALF_WIDTH {
                asteroid.pos.x = -asteroid.pos.x.signum() * config::WORLD_HALF_WIDTH;
            }
            if asteroid.pos.y.abs() > config::WORLD_HALF_HEIGHT {
                asteroid.pos.y = -asteroid.pos.y.signum() * config::WORLD_HALF_HEIGHT;
            }
        }

        let suns = self.suns.clone();
        let asteroids = std::mem::take(&mut self.asteroids);

        for player in &mut self.players {
            if player.is_defeated() {
                continue;
            }

            let forge_pos = player.forge.as_ref().map(|f| f.pos);

            // A mirror feeds the forge when it sees a sun and the forge.
            let mut income = 0.0;
            let mut any_feed = false;
            for mirror in &player.mirrors {
                let sees_light = suns
                    .iter()
                    .any(|sun| !segment_blocked(mirror.pos, sun.pos, &asteroids));
                let sees_forge = forge_pos
                    .map(|fp| !segment_blocked(mirror.pos, fp, &asteroids))
                    .unwrap_or(false);
                if sees_light && sees_forge {
                    income += mirror.generate_solarium(dt);
                    any_feed = true;
                }
            }

            if let Some(forge) = player.forge.as_mut() {
                forge.is_receiving_light = any_feed;
            }
            player.add_solarium(income);
        }

        self.asteroids = asteroids;
        self.prune_destroyed_mirrors();
    }

    /// Drop dead mirrors and their glow slots in the same step, so no
    /// animation state outlives its structure.
    fn prune_destroyed_mirrors(&mut self) {
        for player in &mut self.players {
            let glow = &mut self.glow;
            player.mirrors.retain(|mirror| {
                if mirror.health > 0.0 {
                    return true;
                }
                if let Some(id) = mirror.glow {
                    glow.remove(id);
                }
                false
            });
        }
    }

    /// Index of the sole surviving player, if the game is decided.
    pub fn check_victory(&self) -> Option<usize> {
        let mut active = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_defeated());
        match (active.next(), active.next()) {
            (Some((idx, _)), None) => Some(idx),
            _ => None,
        }
    }

    /// Per-frame zone-of-effect circles for the boundary tracer.
    pub fn influence_circles(&self) -> Vec<InfluenceCircle> {
        let mut circles = Vec::new();
        for player in &self.players {
            if let Some(forge) = &player.forge {
                if forge.health > 0.0 {
                    circles.push(InfluenceCircle::new(forge.pos, config::FORGE_INFLUENCE_RADIUS));
                }
            }
            for mirror in &player.mirrors {
                circles.push(InfluenceCircle::new(mirror.pos, config::MIRROR_INFLUENCE_RADIUS));
            }
        }
        circles
    }

    /// Suns as the renderer's light set.
    pub fn light_sources(&self) -> Vec<LightSource> {
        self.suns
            .iter()
            .map(|sun| LightSource {
                pos: sun.pos,
                binary: sun.binary,
            })
            .collect()
    }

    pub fn binary_light_active(&self) -> bool {
        self.suns.iter().any(|s| s.binary)
    }
}

/// Standard two-player setup: one sun at the origin, players mirrored at
/// +-500 with two mirrors each.
pub fn create_standard_game(roster: &[(&str, Faction)]) -> GameState {
    let mut game = GameState::new();
    game.suns.push(Sun::new(Vec2::ZERO));

    let starting_positions: [(Vec2, [Vec2; 2]); 2] = [
        (vec2(-500.0, 0.0), [vec2(-450.0, 0.0), vec2(-400.0, 0.0)]),
        (vec2(500.0, 0.0), [vec2(450.0, 0.0), vec2(400.0, 0.0)]),
    ];

    for (i, (name, faction)) in roster.iter().enumerate() {
        let Some((forge_pos, mirror_positions)) = starting_positions.get(i) else {
            break;
        };
        let player = Player::new(name, *faction);
        game.initialize_player(player, *forge_pos, mirror_positions);
    }

    game.is_running = true;
    game
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asteroid_at(x: f32, y: f32, radius: f32) -> Asteroid {
        Asteroid {
            pos: vec2(x, y),
            radius,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            spin: 0.0,
        }
    }

    #[test]
    fn three_factions_exist() {
        assert_eq!(Faction::ALL.len(), 3);
        assert_eq!(Faction::Radiant.label(), "Radiant");
        assert_eq!(Faction::Aurum.label(), "Aurum");
        assert_eq!(Faction::Solari.label(), "Solari");
    }

    #[test]
    fn mirror_generates_at_base_rate() {
        let mirror = SolarMirror::new(vec2(100.0, 100.0));
        assert_eq!(mirror.health, 100.0);
        assert_eq!(mirror.efficiency, 1.0);
        assert!((mirror.generate_solarium(1.0) - 10.0).abs() < 1e-6);
    }

    #[test]
    fn mirror_efficiency_scales_generation() {
        let mut mirror = SolarMirror::new(vec2(100.0, 100.0));
        mirror.efficiency = 0.5;
        assert!((mirror.generate_solarium(1.0) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn forge_needs_light_to_produce() {
        let mut forge = StellarForge::new(Vec2::ZERO);
        assert_eq!(forge.health, 1000.0);
        assert!(!forge.is_receiving_light);
        assert!(!forge.can_produce_units());
        assert!(!forge.produce_unit("scout", 50.0, 1000.0));

        forge.is_receiving_light = true;
        assert!(forge.can_produce_units());
        assert!(forge.produce_unit("scout", 50.0, 1000.0));
        assert_eq!(forge.unit_queue.len(), 1);
    }

    #[test]
    fn production_requires_solarium() {
        let mut forge = StellarForge::new(Vec2::ZERO);
        forge.is_receiving_light = true;
        assert!(!forge.produce_unit("heavy", 100.0, 10.0));
        assert!(forge.unit_queue.is_empty());
    }

    #[test]
    fn solarium_spend_refuses_overdraw() {
        let mut player = Player::new("Test", Faction::Radiant);
        assert_eq!(player.solarium, 100.0);
        player.add_solarium(50.0);
        assert_eq!(player.solarium, 150.0);

        assert!(player.spend_solarium(50.0));
        assert_eq!(player.solarium, 100.0);
        assert!(!player.spend_solarium(200.0));
        assert_eq!(player.solarium, 100.0);
    }

    #[test]
    fn player_defeated_without_living_forge() {
        let mut player = Player::new("Test", Faction::Radiant);
        assert!(player.is_defeated());

        player.forge = Some(StellarForge::new(Vec2::ZERO));
        assert!(!player.is_defeated());

        player.forge.as_mut().unwrap().health = 0.0;
        assert!(player.is_defeated());
    }

    #[test]
    fn standard_game_setup() {
        let game = create_standard_game(&[
            ("Commander Nova", Faction::Radiant),
            ("Admiral Gold", Faction::Aurum),
        ]);
        assert!(game.is_running);
        assert_eq!(game.players.len(), 2);
        assert_eq!(game.suns.len(), 1);
        for player in &game.players {
            assert!(player.forge.is_some());
            assert_eq!(player.mirrors.len(), 2);
        }
    }

    #[test]
    fn update_accrues_time_and_mirror_income() {
        let mut game = create_standard_game(&[("P1", Faction::Radiant)]);
        let before = game.players[0].solarium;

        for _ in 0..10 {
            game.update(0.1);
        }

        assert!((game.game_time - 1.0).abs() < 1e-5);
        // Two mirrors with clear lines at 10/s each over one second.
        let earned = game.players[0].solarium - before;
        assert!((earned - 20.0).abs() < 0.01, "earned {earned}");
        assert!(game.players[0].forge.as_ref().unwrap().is_receiving_light);
    }

    #[test]
    fn occluded_mirror_earns_nothing() {
        let mut game = create_standard_game(&[("P1", Faction::Radiant)]);
        // A wall of rock between both mirrors and the sun.
        game.asteroids.push(asteroid_at(-200.0, 0.0, 120.0));
        let before = game.players[0].solarium;
        game.update(1.0);
        assert_eq!(game.players[0].solarium, before);
        assert!(!game.players[0].forge.as_ref().unwrap().is_receiving_light);
    }

    #[test]
    fn victory_goes_to_sole_survivor() {
        let mut game = create_standard_game(&[
            ("P1", Faction::Radiant),
            ("P2", Faction::Aurum),
        ]);
        assert_eq!(game.check_victory(), None);

        game.players[1].forge.as_mut().unwrap().health = 0.0;
        assert_eq!(game.check_victory(), Some(0));
    }

    #[test]
    fn segment_blocked_detects_interposed_asteroid() {
        let rocks = [asteroid_at(50.0, 0.0, 10.0)];
        assert!(segment_blocked(vec2(0.0, 0.0), vec2(100.0, 0.0), &rocks));
        assert!(!segment_blocked(vec2(0.0, 50.0), vec2(100.0, 50.0), &rocks));
    }

    #[test]
    fn point_in_shadow_follows_occlusion() {
        let suns = [Sun::new(Vec2::ZERO)];
        let rocks = [asteroid_at(50.0, 0.0, 10.0)];
        assert!(point_in_shadow(vec2(100.0, 0.0), &suns, &rocks));
        assert!(!point_in_shadow(vec2(0.0, 100.0), &suns, &rocks));
        // No suns at all means no light anywhere.
        assert!(point_in_shadow(vec2(0.0, 0.0), &[], &rocks));
    }

    #[test]
    fn dead_mirrors_lose_their_glow_slots() {
        let mut game = create_standard_game(&[("P1", Faction::Radiant)]);
        let glow_id = game.players[0].mirrors[0].glow.unwrap();
        game.players[0].mirrors[0].health = 0.0;
        game.update(0.1);
        assert_eq!(game.players[0].mirrors.len(), 1);
        assert!(game.glow.get(glow_id).is_none());
    }

    #[test]
    fn zero_length_segment_is_guarded() {
        let p = vec2(10.0, 10.0);
        assert_eq!(closest_point_on_segment(p, p, vec2(0.0, 0.0)), p);
    }
}
