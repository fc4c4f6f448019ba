use dv_routing::{RouteEntry, RoutingEngine, TopologyCatalog, TopologyError, UpdatePolicy};

#[test]
fn three_router_triangle() {
    let matrix = vec![vec![0, 1, 4], vec![1, 0, 2], vec![4, 2, 0]];
    let mut engine = RoutingEngine::build(&matrix).unwrap();

    let table = engine.table(0).unwrap();
    assert_eq!(table.len(), 3);
    assert_eq!(table.get(0), Some(&RouteEntry::local()));
    assert_eq!(table.get(1), Some(&RouteEntry::via(1, 1)));
    assert_eq!(table.get(2), Some(&RouteEntry::via(4, 2)));

    engine.relax();
    assert_eq!(engine.route(0, 2), Some(&RouteEntry::via(3, 1)));
}

#[test]
fn two_isolated_routers() {
    let mut engine = RoutingEngine::build(&[vec![0, 0], vec![0, 0]]).unwrap();
    for _ in 0..5 {
        engine.relax();
    }

    for router in 0..2 {
        let table = engine.table(router).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(router), Some(&RouteEntry::local()));
    }
}

#[test]
fn rebuilding_discards_previous_tables() {
    let mut first = RoutingEngine::build(&[vec![0, 1, 4], vec![1, 0, 2], vec![4, 2, 0]]).unwrap();
    first.relax();

    let second = RoutingEngine::build(&[vec![0, 0], vec![0, 0]]).unwrap();
    assert_eq!(second.tables().len(), 2);
    assert_eq!(second.route(0, 1), None);
    assert_eq!(second.route(0, 2), None);
    assert!(second.table(2).is_none());
    assert_eq!(second.rounds(), 0);
}

/// In-place rounds let a router use updates made earlier in the same round;
/// snapshot rounds only see the previous round. Both end at the same tables.
#[test]
fn update_policies_differ_mid_run_but_agree_at_fixed_point() {
    // A line 0 - 1 - 2 - 3, visited in id order.
    let line = vec![
        vec![0, 1, 0, 0],
        vec![1, 0, 1, 0],
        vec![0, 1, 0, 1],
        vec![0, 0, 1, 0],
    ];
    let mut in_place = RoutingEngine::with_policy(&line, UpdatePolicy::InPlace).unwrap();
    let mut snapshot = RoutingEngine::with_policy(&line, UpdatePolicy::Snapshot).unwrap();

    in_place.relax();
    snapshot.relax();

    // Router 3 learns of router 0 through router 2, which learned it from
    // router 1 earlier in the same in-place round.
    assert_eq!(in_place.route(3, 0), Some(&RouteEntry::via(3, 2)));
    assert_eq!(snapshot.route(3, 0), None);

    in_place.converge(4);
    snapshot.converge(4);
    assert_eq!(in_place.tables(), snapshot.tables());
}

#[test]
fn malformed_matrices_are_rejected() {
    assert!(matches!(
        RoutingEngine::build(&[vec![0, 1, 1], vec![1, 0, 1]]),
        Err(TopologyError::NotSquare { .. })
    ));
    assert!(matches!(
        RoutingEngine::build(&[vec![0, 3], vec![-3, 0]]),
        Err(TopologyError::NegativeCost { row: 1, col: 0, cost: -3 })
    ));
}

#[test]
fn builtin_catalog_topologies_converge() {
    let catalog = TopologyCatalog::builtin();
    for name in catalog.names() {
        let matrix = catalog.get(name).unwrap();
        let mut engine = RoutingEngine::build(matrix).unwrap();
        let outcome = engine.converge(matrix.len().max(1));

        assert!(outcome.converged, "{name}");
        assert!(engine.discrepancies().is_empty(), "{name}");
    }
}

#[test]
fn link_costs_beyond_32_bits_build_and_route() {
    let matrix = vec![vec![0, 5_000_000_000], vec![5_000_000_000, 0]];
    let mut engine = RoutingEngine::build(&matrix).unwrap();
    engine.relax();

    assert_eq!(engine.route(0, 1), Some(&RouteEntry::via(5_000_000_000, 1)));
    assert_eq!(engine.route(1, 0), Some(&RouteEntry::via(5_000_000_000, 0)));
    assert!(engine.discrepancies().is_empty());
}

#[test]
fn tables_render_as_json_mapping() {
    let engine = RoutingEngine::build(&[vec![0, 2], vec![2, 0]]).unwrap();
    let json = serde_json::to_value(engine.tables()).unwrap();

    assert_eq!(json[0]["1"]["cost"], 2);
    assert_eq!(json[0]["1"]["next_hop"], 1);
    assert!(json[1]["1"]["next_hop"].is_null());
}
