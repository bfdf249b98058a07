//! End-to-end scenarios over whole scenes

use rust_voronoi_rooms::*;

const EPS: f64 = 1e-6;

fn window(width: f64, height: f64) -> Window {
    Window::new(DVec2::ZERO, DVec2::new(width, height)).unwrap()
}

/// Servers (0,0), (10,0), (5,10) in a 20x20 window
fn three_rooms() -> SceneDescription {
    SceneDescription::new(window(20.0, 20.0))
        .with_server("A", DVec2::new(0.0, 0.0), [1.0, 0.0, 0.0, 1.0])
        .with_server("B", DVec2::new(10.0, 0.0), [0.0, 1.0, 0.0, 1.0])
        .with_server("C", DVec2::new(5.0, 10.0), [0.0, 0.0, 1.0, 1.0])
}

/// Slightly irregular 3x2 grid of rooms in a 60x40 window
fn grid_rooms() -> SceneDescription {
    let positions = [
        (10.0, 10.0),
        (30.0, 11.0),
        (50.0, 9.0),
        (11.0, 30.0),
        (29.0, 31.0),
        (50.0, 29.0),
    ];
    let mut description = SceneDescription::new(window(60.0, 40.0));
    for (i, &(x, y)) in positions.iter().enumerate() {
        description = description.with_server(format!("R{}", i), DVec2::new(x, y), [0.5; 4]);
    }
    description
}

fn tight_config() -> NavigationConfig {
    NavigationConfigBuilder::new()
        .min_distance(1.0)
        .unwrap()
        .slow_down_distance(4.0)
        .unwrap()
        .cruise_speed(1.0)
        .unwrap()
        .acceleration(0.5)
        .unwrap()
        .max_speed(2.0)
        .unwrap()
        .build()
        .unwrap()
}

fn random_scenes() -> Vec<Scene> {
    (1..=5)
        .map(|seed| {
            let description = SceneDescription::random(seed, 12, 4, window(800.0, 600.0));
            Scene::build(&description, NavigationConfig::default()).unwrap()
        })
        .collect()
}

#[test]
fn test_three_room_cells() {
    let scene = Scene::build(&three_rooms(), NavigationConfig::default()).unwrap();
    let areas: Vec<f64> = scene.servers().iter().map(|s| s.area.area()).collect();

    assert!((areas[0] - 25.0).abs() < EPS);
    assert!((areas[1] - 112.5).abs() < EPS);
    assert!((areas[2] - 262.5).abs() < EPS);

    let has = |id: usize, p: DVec2| {
        let cell = &scene.servers()[id].area;
        cell.vertices().iter().any(|v| v.distance(p) < EPS)
    };
    // circumcenter shared by all three rooms
    for id in 0..3 {
        assert!(has(id, DVec2::new(5.0, 3.75)));
    }
    assert!(has(0, DVec2::new(5.0, 0.0)) && has(1, DVec2::new(5.0, 0.0)));
    assert!(has(0, DVec2::new(0.0, 6.25)) && has(2, DVec2::new(0.0, 6.25)));
    assert!(has(1, DVec2::new(20.0, 11.25)) && has(2, DVec2::new(20.0, 11.25)));
}

#[test]
fn test_three_room_links_and_routes() {
    let scene = Scene::build(&three_rooms(), NavigationConfig::default()).unwrap();
    assert_eq!(scene.links().len(), 3);

    let weight = |a: usize, b: usize| {
        scene
            .links()
            .iter()
            .find(|l| l.connects(a, b))
            .map(|l| l.distance)
            .unwrap()
    };
    let ab = 2.0 * DVec2::new(5.0, 1.875).length();
    let ac = 125.0_f64.sqrt();
    assert!((weight(0, 1) - ab).abs() < EPS);
    assert!((weight(0, 2) - ac).abs() < EPS);
    assert!((weight(1, 2) - 250.0_f64.sqrt()).abs() < EPS);

    let matrix = scene.distance_matrix();
    assert!((matrix.get(0, 2).unwrap() - ac).abs() < EPS);
    let direct = scene.route(0, 2).unwrap().link.unwrap();
    assert!(scene.links()[direct].connects(0, 2));
}

#[test]
fn test_cells_stay_in_window() {
    for scene in random_scenes() {
        let window = *scene.window();
        for server in scene.servers() {
            for v in server.area.vertices() {
                assert!(window.contains(*v), "{:?} outside the window", v);
            }
        }
    }
}

#[test]
fn test_links_are_symmetric_and_unique() {
    for scene in random_scenes() {
        let links = scene.links();
        for (i, link) in links.iter().enumerate() {
            assert_ne!(link.node1, link.node2);
            assert!(scene.servers()[link.node1].links.contains(&link.id));
            assert!(scene.servers()[link.node2].links.contains(&link.id));
            for other in &links[i + 1..] {
                assert!(!other.connects(link.node1, link.node2));
            }
        }
        for server in scene.servers() {
            for &id in &server.links {
                assert!(links[id].other(server.id).is_some());
            }
        }
    }
}

#[test]
fn test_distance_matrix_properties() {
    for scene in random_scenes() {
        let matrix = scene.distance_matrix();
        let n = scene.server_count();
        for i in 0..n {
            assert_eq!(matrix.get(i, i), Some(0.0));
            for j in 0..n {
                let dij = matrix.get(i, j).unwrap();
                let dji = matrix.get(j, i).unwrap();
                if dij.is_finite() {
                    assert!((dij - dji).abs() < 1e-9);
                } else {
                    assert!(!dji.is_finite());
                }
                for k in 0..n {
                    let dik = matrix.get(i, k).unwrap();
                    let dkj = matrix.get(k, j).unwrap();
                    assert!(dij <= dik + dkj + 1e-9);
                }
            }
        }
    }
}

#[test]
fn test_first_hops_lead_to_target() {
    for scene in random_scenes() {
        let n = scene.server_count();
        for i in 0..n {
            for j in 0..n {
                let reachable = scene.distance_matrix().is_reachable(i, j);
                match scene.path(i, j) {
                    Some(hops) => {
                        assert!(reachable);
                        assert_eq!(hops.first(), Some(&i));
                        assert_eq!(hops.last(), Some(&j));
                        assert!(hops.len() <= n);
                    }
                    None => assert!(!reachable),
                }
            }
        }
    }
}

#[test]
fn test_drone_reaches_target_across_rooms() {
    let description = grid_rooms().with_drone("D", DVec2::new(8.0, 12.0), "R5");
    let mut scene = Scene::build(&description, tight_config()).unwrap();
    assert_eq!(scene.drones()[0].connected_to, Some(0));

    let mut visited = vec![0];
    for _ in 0..3000 {
        scene.tick(1.0);
        if let Some(room) = scene.drones()[0].connected_to {
            if visited.last() != Some(&room) {
                visited.push(room);
            }
        }
        if scene.drones()[0].is_idle() {
            break;
        }
    }

    let drone = &scene.drones()[0];
    assert!(drone.is_idle());
    assert_eq!(drone.connected_to, Some(5));
    assert!(drone.position.distance(scene.servers()[5].position) < 1.0);
    assert!(visited.len() >= 3);
}

#[test]
fn test_arrived_drone_stays_put() {
    let description = three_rooms().with_drone("D", DVec2::new(6.0, 11.0), "C");
    let mut scene = Scene::build(&description, tight_config()).unwrap();

    for _ in 0..200 {
        scene.tick(1.0);
    }
    let drone = &scene.drones()[0];
    assert_eq!(drone.state(), NavState::Idle);
    assert_eq!(drone.speed, DVec2::ZERO);

    let pose = drone.pose();
    scene.tick(1.0);
    assert_eq!(scene.drones()[0].pose(), pose);
}

#[test]
fn test_unknown_target_drone_never_leaves_room() {
    let description = three_rooms().with_drone("D", DVec2::new(8.0, 15.0), "Mars");
    let mut scene = Scene::build(&description, NavigationConfig::default()).unwrap();
    assert_eq!(scene.drones()[0].target, None);

    for _ in 0..500 {
        scene.tick(1.0);
        assert_eq!(scene.drones()[0].connected_to, Some(2));
    }
    assert!(!scene.drones()[0].is_idle());
}

#[test]
fn test_zero_dt_tick_changes_nothing() {
    let description = grid_rooms()
        .with_drone("D1", DVec2::new(8.0, 12.0), "R5")
        .with_drone("D2", DVec2::new(45.0, 35.0), "R0");
    let mut scene = Scene::build(&description, tight_config()).unwrap();
    for _ in 0..10 {
        scene.tick(1.0);
    }

    let before: Vec<(DVec2, DVec2, NavState)> = scene
        .drones()
        .iter()
        .map(|d| (d.position, d.speed, d.state()))
        .collect();
    scene.tick(0.0);
    scene.tick(0.0);
    let after: Vec<(DVec2, DVec2, NavState)> = scene
        .drones()
        .iter()
        .map(|d| (d.position, d.speed, d.state()))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn test_reload_replaces_everything() {
    let description = three_rooms().with_drone("D", DVec2::new(1.0, 1.0), "C");
    let mut scene = Scene::build(&description, NavigationConfig::default()).unwrap();
    scene.tick(1.0);

    scene.reload(&grid_rooms()).unwrap();
    assert_eq!(scene.server_count(), 6);
    assert!(scene.drones().is_empty());
    assert_eq!(scene.distance_matrix().len(), 6);
    assert!(scene.server_by_name("A").is_none());
    assert!(scene.server_by_name("R3").is_some());
}

#[test]
fn test_single_server_scene() {
    let description = SceneDescription::new(window(20.0, 20.0))
        .with_server("Solo", DVec2::new(4.0, 4.0), [1.0; 4])
        .with_drone("D", DVec2::new(15.0, 15.0), "Solo");
    let mut scene = Scene::build(&description, tight_config()).unwrap();

    assert!(scene.links().is_empty());
    assert!((scene.servers()[0].area.area() - 400.0).abs() < EPS);
    assert_eq!(scene.route(0, 0).unwrap(), Route { link: None, distance: 0.0 });

    for _ in 0..500 {
        scene.tick(1.0);
    }
    assert!(scene.drones()[0].is_idle());
}

#[test]
fn test_mesh_matches_scene() {
    let scene = Scene::build(&grid_rooms(), NavigationConfig::default()).unwrap();
    let mesh = generate_mesh(&scene);

    let triangles: usize = scene.servers().iter().map(|s| s.area.triangles().len()).sum();
    assert_eq!(mesh.triangle_count(), triangles);
    assert_eq!(link_segments(&scene).len(), scene.links().len());
}
