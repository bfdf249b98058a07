//! Complete workflow demonstration for rust_voronoi_rooms
//!
//! Run with `RUST_LOG=debug cargo run --example drone_tour` to see the
//! pipeline stages and the distance matrix.

use rust_voronoi_rooms::mesh::FALLBACK_COLOR;
use rust_voronoi_rooms::*;

/// Milliseconds per frame of the simulated animation timer
const FRAME_MS: f64 = 40.0;

/// Simulation time units per millisecond
const TIME_SCALE: f64 = 1.0 / 25.0;

fn main() -> Result<()> {
    env_logger::init();

    println!("=== rust_voronoi_rooms Drone Tour ===\n");

    // Step 1: Describe the scene
    println!("Step 1: Describing scene...");
    let window = Window::new(DVec2::ZERO, DVec2::new(800.0, 600.0))?;
    let rooms = [
        ("Alpha", DVec2::new(120.0, 100.0), "#e74c3c"),
        ("Bravo", DVec2::new(420.0, 80.0), "#2ecc71"),
        ("Charlie", DVec2::new(700.0, 150.0), "#3498db"),
        ("Delta", DVec2::new(250.0, 350.0), "#f1c40f"),
        ("Echo", DVec2::new(560.0, 400.0), "#9b59b6"),
        ("Foxtrot", DVec2::new(100.0, 520.0), "#e67e22"),
        ("Golf", DVec2::new(720.0, 540.0), "not a color"),
    ];

    let mut description = SceneDescription::new(window);
    for (name, position, hex) in rooms {
        let color = parse_hex_color(hex).unwrap_or(FALLBACK_COLOR);
        description = description.with_server(name, position, color);
    }
    description = description
        .with_drone("D1", DVec2::new(130.0, 110.0), "Golf")
        .with_drone("D2", DVec2::new(700.0, 500.0), "Alpha")
        .with_drone("D3", DVec2::new(400.0, 300.0), "Nowhere");
    println!(
        "  {} servers, {} drones",
        description.servers.len(),
        description.drones.len()
    );

    // Step 2: Build the scene
    println!("\nStep 2: Building scene...");
    let config = NavigationConfigBuilder::new()
        .min_distance(5.0)?
        .slow_down_distance(30.0)?
        .build()?;
    let mut scene = Scene::build(&description, config)?;
    for server in scene.servers() {
        println!(
            "  {:<8} area {:>9.1}  doors {}",
            server.name,
            server.area.area(),
            server.link_count()
        );
    }

    // Step 3: Routes
    println!("\nStep 3: Routes from Alpha:");
    for server in scene.servers() {
        match scene.path(0, server.id) {
            Some(hops) => {
                let names: Vec<&str> = hops
                    .iter()
                    .filter_map(|&id| scene.server(id).map(|s| s.name.as_str()))
                    .collect();
                println!(
                    "  -> {:<8} {:>7.1}  via {}",
                    server.name,
                    scene.route(0, server.id)?.distance,
                    names.join(" > ")
                );
            }
            None => println!("  -> {:<8} unreachable", server.name),
        }
    }

    // Step 4: Fly
    println!("\nStep 4: Flying...");
    let dt = FRAME_MS * TIME_SCALE;
    for frame in 0..2000 {
        scene.tick(dt);
        if frame % 250 == 0 {
            for drone in scene.drones() {
                let pose = drone.pose();
                let room = drone
                    .connected_to
                    .and_then(|id| scene.server(id))
                    .map_or("-", |s| s.name.as_str());
                println!(
                    "  frame {:>4} {} at ({:>6.1}, {:>6.1}) heading {:>6.1} in {:<8} {:?}",
                    frame,
                    drone.name,
                    pose.position.x,
                    pose.position.y,
                    pose.azimut,
                    room,
                    drone.state()
                );
            }
        }
        if scene.drones().iter().filter(|d| d.target.is_some()).all(|d| d.is_idle()) {
            println!("  all drones arrived after {} frames", frame + 1);
            break;
        }
    }

    // Step 5: Generate mesh
    println!("\nStep 5: Generating mesh...");
    let mesh = generate_mesh(&scene);
    println!("  Vertices: {}", mesh.vertex_count());
    println!("  Triangles: {}", mesh.triangle_count());
    println!("  Door segments: {}", link_segments(&scene).len());

    println!("\n=== Demo Complete ===");
    Ok(())
}
