//! Per-tick movement resolution against the static world
//!
//! Each tick turns a [`MoveRequest`] into a validated agent position:
//!
//! 1. The local displacement is rotated to world space by yaw only.
//! 2. A wall probe of twice the displacement runs from the current position.
//!    On contact the agent stops half its width short of the contact point.
//! 3. A ground probe runs down through each footprint corner. On contact the
//!    agent stands on it, otherwise it drops by the gravity step.
//! 4. Falling below the fall limit, or ending up at a non-finite position,
//!    puts the agent back at its spawn pose.
//!
//! Without a built index the displacement is applied as is.

use glam::{Quat, Vec3};
use std::collections::HashSet;
use tracing::{debug, trace};
use walkabout_core::{AgentSnapshot, MoveRequest};

use crate::agent::Agent;
use crate::config::{ContactPolicy, MovementConfig, SpawnConfig, WalkaboutConfig};
use crate::intersect::{segment_triangle, SegmentHit};
use crate::spatial::{Partition, SpatialIndex};

/// Outcome of one resolved tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Published agent state after the tick
    pub snapshot: AgentSnapshot,
    /// Wall contact that stopped the horizontal move
    pub contact: Option<Vec3>,
    /// Whether the ground probe found a surface
    pub grounded: bool,
    /// Whether the agent fell out of the world and was respawned
    pub respawned: bool,
}

/// Stateless movement integrator shared by every agent in a session
#[derive(Debug, Clone)]
pub struct MovementResolver {
    movement: MovementConfig,
    spawn: SpawnConfig,
}

impl MovementResolver {
    pub fn new(movement: MovementConfig, spawn: SpawnConfig) -> Self {
        Self { movement, spawn }
    }

    pub fn from_config(config: &WalkaboutConfig) -> Self {
        Self::new(config.movement, config.spawn)
    }

    pub fn movement(&self) -> &MovementConfig {
        &self.movement
    }

    /// Resolve one tick of movement for `agent`
    ///
    /// `index` is `None` until the world mesh has been loaded.
    pub fn tick<P: Partition>(
        &self,
        index: Option<&SpatialIndex<P>>,
        agent: &mut Agent,
        request: &MoveRequest,
    ) -> TickReport {
        agent.yaw = request.yaw;
        agent.pitch = request.pitch;

        let local = request.local_displacement;
        let rotation = Quat::from_rotation_y(request.yaw);
        let displacement = rotation * local;
        let walking = local.x != 0.0 || local.z != 0.0;

        let mut contact = None;
        let mut grounded = false;

        match index {
            Some(index) => {
                let planar = Vec3::new(local.x, 0.0, local.z).normalize_or_zero();
                let clearance = rotation * (planar * agent.half_width);

                let moved = if displacement == Vec3::ZERO {
                    agent.position
                } else {
                    contact = self
                        .probe(
                            index,
                            agent.position + displacement,
                            agent.position,
                            displacement * 2.0,
                        )
                        .map(|hit| hit.point);
                    match contact {
                        Some(point) => point - clearance,
                        None => agent.position + displacement,
                    }
                };

                agent.position = match self.ground(index, agent, moved) {
                    Some(ground_y) => {
                        grounded = true;
                        Vec3::new(moved.x, ground_y + agent.half_height, moved.z)
                    }
                    None => moved - Vec3::Y * self.movement.gravity_step,
                };
            }
            None => {
                debug!("No world index yet, applying movement unconstrained");
                agent.position += displacement;
            }
        }

        agent.update_animation(walking);

        let respawned =
            !agent.position.is_finite() || agent.position.y < self.movement.fall_limit;
        if respawned {
            debug!(
                position = ?agent.position,
                fall_limit = self.movement.fall_limit,
                "Agent left the world, respawning"
            );
            agent.respawn(&self.spawn);
        }

        trace!(
            position = ?agent.position,
            ?contact,
            grounded,
            animation = %agent.animation,
            "Tick resolved"
        );

        TickReport {
            snapshot: agent.snapshot(),
            contact,
            grounded,
            respawned,
        }
    }

    /// Height of the ground under the footprint at `position`, if any
    fn ground<P: Partition>(&self, index: &SpatialIndex<P>, agent: &Agent, position: Vec3) -> Option<f32> {
        let step = self.movement.gravity_step;
        let hw = agent.half_width;
        let feet = position.y - agent.half_height;
        let down = Vec3::new(0.0, -2.0 * step, 0.0);

        let mut best: Option<SegmentHit> = None;
        for (dx, dz) in [(-hw, -hw), (hw, -hw), (-hw, hw), (hw, hw)] {
            let foot = Vec3::new(position.x + dx, feet, position.z + dz);
            let Some(hit) = self.probe(index, foot, foot + Vec3::Y * step, down) else {
                continue;
            };
            match self.movement.contact_policy {
                ContactPolicy::FirstHit => return Some(hit.point.y),
                ContactPolicy::Nearest => {
                    if best.map_or(true, |b| hit.fraction < b.fraction) {
                        best = Some(hit);
                    }
                }
            }
        }
        best.map(|hit| hit.point.y)
    }

    /// Test the segment `[origin, origin + displacement]` against the
    /// triangles indexed near `near`
    fn probe<P: Partition>(
        &self,
        index: &SpatialIndex<P>,
        near: Vec3,
        origin: Vec3,
        displacement: Vec3,
    ) -> Option<SegmentHit> {
        let mut seen = HashSet::new();
        let mut best: Option<SegmentHit> = None;

        for id in index.query_ids(near) {
            if !seen.insert(id) {
                continue;
            }
            let Some(hit) = segment_triangle(origin, displacement, index.triangle(id)) else {
                continue;
            };
            match self.movement.contact_policy {
                ContactPolicy::FirstHit => return Some(hit),
                ContactPolicy::Nearest => {
                    if best.map_or(true, |b| hit.fraction < b.fraction) {
                        best = Some(hit);
                    }
                }
            }
        }
        best
    }
}
