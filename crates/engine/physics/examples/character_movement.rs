use walkabout_core::input::{MovementKey, MovementKeys};
use walkabout_core::{LookState, MoveRequest};
use walkabout_physics::glam::Vec3;
use walkabout_physics::{Agent, MovementResolver, Octree, Triangle, WalkaboutConfig};

fn main() {
    println!("Character Movement Example");
    println!("==========================\n");

    let config = WalkaboutConfig::default();
    let speed = 0.02;

    // Ground plane at y = 0 and a wall across +Z at z = 2
    println!("Building world...");
    let world = [
        Triangle::new(
            Vec3::new(-10.0, 0.0, -10.0),
            Vec3::new(-10.0, 0.0, 10.0),
            Vec3::new(10.0, 0.0, -10.0),
        ),
        Triangle::new(
            Vec3::new(10.0, 0.0, 10.0),
            Vec3::new(10.0, 0.0, -10.0),
            Vec3::new(-10.0, 0.0, 10.0),
        ),
        Triangle::new(
            Vec3::new(-10.0, -1.0, 2.0),
            Vec3::new(10.0, -1.0, 2.0),
            Vec3::new(0.0, 5.0, 2.0),
        ),
    ];
    let index = Octree::from_triangles(config.index.params(), world);
    println!("Index: {:?}\n", index.stats());

    let resolver = MovementResolver::from_config(&config);
    let mut agent = Agent::spawn(&config.agent, &config.spawn);
    let mut keys = MovementKeys::new();
    let look = LookState::new(0.0, 0.0, config.movement.look_sensitivity);

    println!("Initial position: {}", agent.position);

    // Phase 1: Fall to ground
    println!("\nPhase 1: Falling to ground");
    for i in 0..80 {
        let report = resolver.tick(Some(&index), &mut agent, &MoveRequest::look(0.0, 0.0));
        if i % 20 == 0 {
            println!(
                "  tick {:3}: pos={:.3}, grounded={}",
                i, agent.position, report.grounded
            );
        }
    }

    // Phase 2: Walk forward into the wall
    println!("\nPhase 2: Walking forward");
    keys.press(MovementKey::Forward);
    for i in 0..150 {
        let request = MoveRequest::from_keys(&keys, &look, speed);
        let report = resolver.tick(Some(&index), &mut agent, &request);
        if i % 25 == 0 || (report.contact.is_some() && i % 5 == 0) {
            println!(
                "  tick {:3}: pos={:.3}, contact={:?}, animation={}",
                i, agent.position, report.contact, report.snapshot.animation
            );
        }
    }

    // Final state
    keys.clear();
    let request = MoveRequest::from_keys(&keys, &look, speed);
    let report = resolver.tick(Some(&index), &mut agent, &request);
    println!("\n=== Final State ===");
    println!("Position: {:.3}", agent.position);
    println!("Grounded: {}", report.grounded);
    println!("Animation: {}", report.snapshot.animation);

    // Verify expectations
    assert!(agent.position.z < 2.0, "agent passed through the wall");
    assert!(report.grounded, "agent should be standing on the ground");
    println!("\nAll checks passed");
}
