use routemap::RoomCategory::{Boss, Monster, Rest, Treasure};
use routemap::{ChaChaSource, MapConfig, build_connections, build_map, generate_run};

#[test]
fn default_run_has_fixed_skeleton() {
    for seed in [1_u64, 7, 42, 1_024, 999_999] {
        let mut rng = ChaChaSource::seed_from_u64(seed);
        let map = build_map(15, &mut rng);
        let connections = build_connections(&map, &mut rng);

        assert_eq!(map.len(), 15);
        assert_eq!(connections.len(), 14);
        assert_eq!(map.layer(0), Some(&[Monster][..]));
        assert!(map.layer(7).expect("layer 8").iter().all(|room| *room == Treasure));
        assert_eq!(map.layer(13), Some(&[Rest, Rest, Rest][..]));
        assert_eq!(map.layer(14), Some(&[Boss][..]));
    }
}

#[test]
fn boss_is_reachable_from_every_rest_node_that_has_an_edge() {
    let run = generate_run(77, &MapConfig::default()).expect("default config is valid");
    let into_boss = run.connections.boundary(13).expect("rest/boss boundary");
    assert!(!into_boss.is_empty(), "the single boss node always gets an incoming edge");
    assert!(into_boss.iter().all(|edge| edge.to == 0));
}

#[test]
fn navigation_walk_reaches_the_last_layer() {
    // Follow the first offered choice from the entrance, the way the selection screen does.
    for seed in 0..50_u64 {
        let run = generate_run(seed, &MapConfig::default()).expect("default config is valid");
        let mut index = 0;
        let mut depth = 0;
        while let Some(&next) = run.connections.targets_from(depth, index).first() {
            assert!(run.map.node(depth + 1, next).is_some());
            index = next;
            depth += 1;
        }
        assert!(depth > 0, "seed {seed}: the entrance should link somewhere");
        if depth == 14 {
            assert_eq!(run.map.node(depth, index), Some(Boss));
        }
    }
}

#[test]
fn shorter_runs_keep_absolute_forced_layers() {
    let map = build_map(10, &mut ChaChaSource::seed_from_u64(5));
    assert_eq!(map.len(), 10);
    assert_eq!(map.layer(0), Some(&[Monster][..]));
    assert!(map.layer(7).expect("layer 8").iter().all(|room| *room == Treasure));
    assert!(map.layers().iter().flatten().all(|room| *room != Boss));
}

#[test]
fn longer_runs_do_not_rescale_forced_layers() {
    let mut rng = ChaChaSource::seed_from_u64(9);
    let map = build_map(20, &mut rng);
    let connections = build_connections(&map, &mut rng);

    assert_eq!(map.len(), 20);
    assert_eq!(connections.len(), 19);
    assert_eq!(map.layer(13), Some(&[Rest, Rest, Rest][..]));
    assert_eq!(map.layer(14), Some(&[Boss][..]));
    for layer in map.layers().iter().skip(15) {
        assert!((2..=4).contains(&layer.len()));
        assert!(!layer.contains(&Rest) && !layer.contains(&Boss));
    }
}

#[test]
fn run_serializes_for_callers() {
    let run = generate_run(3, &MapConfig::default()).expect("default config is valid");
    let json = serde_json::to_string(&run).expect("run should serialize");
    let restored: routemap::GeneratedRun =
        serde_json::from_str(&json).expect("run should deserialize");
    assert_eq!(restored, run);
}
