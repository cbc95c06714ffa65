use drive_sim::collision::standard_arena;
use drive_sim::input::InputSnapshot;
use drive_sim::kinematics::COUPE;
use drive_sim::sim::Simulation;

use tokio::time::{Duration, interval};
use tracing_subscriber::EnvFilter;

/// Keyboardless stand-in for the input collaborator: ignition on the
/// first frame, full throttle once the engine has had time to warm up,
/// then a lazy left sweep every few seconds.
fn scripted_input(frame: u64) -> InputSnapshot {
    InputSnapshot {
        toggle_engine: frame == 1,
        forward: frame > 130,
        turn_left: frame > 400 && frame % 600 < 150,
        ..InputSnapshot::default()
    }
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("🚗 Starting drive-sim demo loop...");

    let boundaries = standard_arena().expect("stock arena geometry is valid");
    let mut sim = Simulation::new(COUPE, boundaries);

    // Fixed timestep: ~60 Hz, standing in for the renderer's frame callback.
    let mut ticker = interval(Duration::from_millis(16));
    let mut frame: u64 = 0;

    loop {
        ticker.tick().await;
        frame += 1;

        let input = scripted_input(frame);
        let snapshot = sim.tick(&input, 16.0);

        // Publish to the presentation sink; stdout plays that role here.
        if frame % 30 == 0 {
            println!("{}", serde_json::to_string(&snapshot).unwrap());
        }
    }
}
