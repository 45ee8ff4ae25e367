//! Scripted agent session
//!
//! Plays the part of the client: holds keys, moves the pointer, triggers the
//! wave gesture and feeds one [`MoveRequest`] per tick to the resolver.

use serde::Serialize;
use std::f32::consts::FRAC_PI_2;
use std::time::Duration;
use tracing::{debug, info};
use walkabout_core::input::{MovementKey, MovementKeys};
use walkabout_core::{AgentSnapshot, LookState, MoveRequest};
use walkabout_physics::{
    Agent, IndexStats, MovementResolver, Octants, Partition, SpatialIndex, TickReport, Triangle,
    WalkaboutConfig,
};

/// What the scripted client does during a phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Stand still
    Wait,
    /// Hold the given keys
    Walk(&'static [MovementKey]),
    /// Move the pointer horizontally by this many units every tick
    Turn(f32),
    /// Start the wave gesture, then stand still
    Wave,
}

/// An action held for a number of ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phase {
    pub action: Action,
    pub ticks: u32,
}

impl Phase {
    pub fn new(action: Action, ticks: u32) -> Self {
        Self { action, ticks }
    }
}

/// Counters gathered over a session, plus where the agent ended up
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub ticks: u64,
    pub contacts: u64,
    pub grounded_ticks: u64,
    pub respawns: u64,
    pub agent: AgentSnapshot,
}

/// Settle, wave, walk to the fence, turn a quarter and walk again
pub fn scripted_walk(config: &WalkaboutConfig, walk_ticks: u32) -> Vec<Phase> {
    const TURN_TICKS: u32 = 30;

    let mut script = vec![
        Phase::new(Action::Wait, 100),
        Phase::new(Action::Wave, config.movement.wave_ticks),
        Phase::new(Action::Walk(&[MovementKey::Forward]), walk_ticks),
    ];

    let sensitivity = config.movement.look_sensitivity;
    if sensitivity > 0.0 {
        let per_tick = FRAC_PI_2 / TURN_TICKS as f32 / sensitivity;
        script.push(Phase::new(Action::Turn(per_tick), TURN_TICKS));
    }

    script.push(Phase::new(
        Action::Walk(&[MovementKey::Forward, MovementKey::Left]),
        walk_ticks,
    ));
    script.push(Phase::new(Action::Wait, 20));
    script
}

/// One agent in one world
pub struct Session<P: Partition = Octants> {
    config: WalkaboutConfig,
    resolver: MovementResolver,
    index: Option<SpatialIndex<P>>,
    agent: Agent,
    keys: MovementKeys,
    look: LookState,
    summary: SessionSummary,
}

impl<P: Partition> Session<P> {
    /// Spawn the agent; the world is not loaded yet
    pub fn new(config: WalkaboutConfig) -> Self {
        let agent = Agent::spawn(&config.agent, &config.spawn);
        let look = LookState::new(agent.yaw, agent.pitch, config.movement.look_sensitivity);
        let summary = SessionSummary {
            ticks: 0,
            contacts: 0,
            grounded_ticks: 0,
            respawns: 0,
            agent: agent.snapshot(),
        };

        Self {
            resolver: MovementResolver::from_config(&config),
            config,
            index: None,
            agent,
            keys: MovementKeys::new(),
            look,
            summary,
        }
    }

    /// Index the world mesh; movement is collision-checked from the next tick
    pub fn load_world(&mut self, triangles: Vec<Triangle>) -> IndexStats {
        let index = SpatialIndex::<P>::from_triangles(self.config.index.params(), triangles);
        let stats = index.stats();
        self.index = Some(index);
        stats
    }

    pub fn is_loaded(&self) -> bool {
        self.index.is_some()
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    /// Resolve one tick with the currently held input
    pub fn tick(&mut self) -> TickReport {
        let request = MoveRequest::from_keys(&self.keys, &self.look, self.config.movement.speed);
        let report = self
            .resolver
            .tick(self.index.as_ref(), &mut self.agent, &request);

        if report.respawned {
            self.look.reset(self.agent.yaw, self.agent.pitch);
            self.summary.respawns += 1;
        }
        if report.contact.is_some() {
            self.summary.contacts += 1;
        }
        if report.grounded {
            self.summary.grounded_ticks += 1;
        }
        self.summary.ticks += 1;
        self.summary.agent = report.snapshot;
        report
    }

    /// Run one phase, sleeping `pace` between ticks if given
    pub fn run_phase(&mut self, phase: &Phase, pace: Option<Duration>) {
        debug!(action = ?phase.action, ticks = phase.ticks, "Phase started");

        self.keys.clear();
        match phase.action {
            Action::Walk(keys) => {
                for &key in keys {
                    self.keys.press(key);
                }
            }
            Action::Wave => self.agent.wave(self.config.movement.wave_ticks),
            Action::Wait | Action::Turn(_) => {}
        }

        for _ in 0..phase.ticks {
            if let Action::Turn(dx) = phase.action {
                self.look.apply_pointer_delta(dx, 0.0);
            }
            self.tick();
            if let Some(pace) = pace {
                std::thread::sleep(pace);
            }
        }

        info!(
            position = %self.agent.position,
            yaw = self.agent.yaw,
            animation = %self.agent.animation,
            "Phase finished"
        );
    }

    pub fn run(&mut self, script: &[Phase], pace: Option<Duration>) {
        for phase in script {
            self.run_phase(phase, pace);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{self, FENCE};
    use walkabout_core::Animation;
    use walkabout_physics::Quadrants;

    fn testbed_config() -> WalkaboutConfig {
        WalkaboutConfig::load(concat!(env!("CARGO_MANIFEST_DIR"), "/config/walkabout.toml"))
            .unwrap()
    }

    #[test]
    fn test_shipped_config_loads() {
        let config = testbed_config();
        assert_eq!(config.movement.speed, 0.02);
        assert_eq!(config.spawn.position.y, 3.0);
    }

    #[test]
    fn test_moves_freely_before_world_loads() {
        let mut session = Session::<Octants>::new(testbed_config());
        session.run_phase(&Phase::new(Action::Walk(&[MovementKey::Forward]), 10), None);

        assert!(!session.is_loaded());
        let agent = session.agent();
        assert_eq!(agent.position.y, 3.0);
        assert!((agent.position.z - 0.2).abs() < 1e-5);
        assert_eq!(agent.animation, Animation::Walk);
    }

    #[test]
    fn test_wave_then_idle() {
        let config = testbed_config();
        let wave_ticks = config.movement.wave_ticks;
        let mut session = Session::<Octants>::new(config);
        session.load_world(world::build_world().unwrap());

        session.run_phase(&Phase::new(Action::Wave, 10), None);
        assert_eq!(session.agent().animation, Animation::Wave);

        session.run_phase(&Phase::new(Action::Wait, wave_ticks), None);
        assert_eq!(session.agent().animation, Animation::Idle);
    }

    #[test]
    fn test_turn_follows_pointer() {
        let config = testbed_config();
        let script = scripted_walk(&config, 0);
        let turn = script
            .iter()
            .find(|phase| matches!(phase.action, Action::Turn(_)))
            .copied()
            .unwrap();

        let mut session = Session::<Octants>::new(config);
        session.run_phase(&turn, None);
        assert!((session.agent().yaw - FRAC_PI_2).abs() < 1e-3);
    }

    fn check_scripted_walk_stays_inside_fence<P: Partition>() {
        let config = testbed_config();
        let script = scripted_walk(&config, 1000);
        let mut session = Session::<P>::new(config);
        let stats = session.load_world(world::build_world().unwrap());
        assert!(stats.nodes > 1);

        session.run(&script, None);

        let summary = session.summary();
        let position = summary.agent.position;
        assert!(position.x.abs() < FENCE && position.z.abs() < FENCE, "escaped to {position}");
        assert!(summary.contacts > 0, "never reached the fence");
        assert_eq!(summary.respawns, 0);
        assert!(session.tick().grounded);
    }

    #[test]
    fn test_scripted_walk_stays_inside_fence_octree() {
        check_scripted_walk_stays_inside_fence::<Octants>();
    }

    #[test]
    fn test_scripted_walk_stays_inside_fence_quadtree() {
        check_scripted_walk_stays_inside_fence::<Quadrants>();
    }

    #[test]
    fn test_summary_serializes() {
        let session = Session::<Octants>::new(WalkaboutConfig::default());
        let json = serde_json::to_value(session.summary()).unwrap();
        assert_eq!(json["ticks"], 0);
        assert_eq!(json["agent"]["animation"], "idle");
    }
}
