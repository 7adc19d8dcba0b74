//! Unit tests for wf-route.

#[cfg(test)]
mod helpers {
    use wf_core::{NodeId, NodeIdx};
    use wf_graph::SpatialGraph;

    pub fn idx(g: &SpatialGraph, id: u64) -> NodeIdx {
        g.node_index(NodeId(id)).unwrap()
    }

    pub fn path_of(g: &SpatialGraph, ids: &[u64]) -> Vec<NodeIdx> {
        ids.iter().map(|&id| idx(g, id)).collect()
    }

    pub fn ids(g: &SpatialGraph, nodes: &[NodeIdx]) -> Vec<u64> {
        nodes.iter().map(|&n| g.node_id(n).0).collect()
    }
}

// ── Frontier ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod frontier {
    use wf_core::NodeIdx;

    use crate::Frontier;

    fn n(i: u32) -> NodeIdx {
        NodeIdx(i)
    }

    #[test]
    fn pops_in_priority_order() {
        let mut f = Frontier::new(6);
        for (i, p) in [(0, 5.0), (1, 1.0), (2, 4.0), (3, 2.0), (4, 3.0)] {
            f.push(n(i), p);
        }
        assert_eq!(f.len(), 5);
        let order: Vec<u32> = std::iter::from_fn(|| f.pop_min()).map(|(node, _)| node.0).collect();
        assert_eq!(order, vec![1, 3, 4, 2, 0]);
        assert!(f.is_empty());
        assert!(f.pop_min().is_none());
    }

    #[test]
    fn equal_priorities_pop_in_insertion_order() {
        let mut f = Frontier::new(4);
        f.push(n(3), 1.0);
        f.push(n(0), 1.0);
        f.push(n(2), 1.0);
        assert_eq!(f.pop_min(), Some((n(3), 1.0)));
        assert_eq!(f.pop_min(), Some((n(0), 1.0)));
        assert_eq!(f.pop_min(), Some((n(2), 1.0)));
    }

    #[test]
    fn decrease_key_reorders() {
        let mut f = Frontier::new(3);
        f.push(n(0), 10.0);
        f.push(n(1), 20.0);
        f.push(n(2), 30.0);
        assert!(f.decrease_key(n(2), 5.0));
        assert_eq!(f.priority(n(2)), Some(5.0));
        assert_eq!(f.pop_min(), Some((n(2), 5.0)));
    }

    #[test]
    fn decrease_key_ignores_increase_and_absent() {
        let mut f = Frontier::new(3);
        f.push(n(0), 10.0);
        assert!(!f.decrease_key(n(0), 11.0));
        assert!(!f.decrease_key(n(1), 1.0));
        assert_eq!(f.priority(n(0)), Some(10.0));
        assert_eq!(f.priority(n(1)), None);
    }

    #[test]
    fn push_existing_only_lowers() {
        let mut f = Frontier::new(2);
        f.push(n(0), 3.0);
        f.push(n(0), 7.0);
        assert_eq!(f.len(), 1);
        assert_eq!(f.priority(n(0)), Some(3.0));
        f.push(n(0), 1.0);
        assert_eq!(f.priority(n(0)), Some(1.0));
    }

    #[test]
    fn popped_node_can_be_requeued() {
        let mut f = Frontier::new(2);
        f.push(n(1), 2.0);
        assert_eq!(f.pop_min(), Some((n(1), 2.0)));
        assert!(!f.contains(n(1)));
        f.push(n(1), 9.0);
        assert!(f.contains(n(1)));
        assert_eq!(f.pop_min(), Some((n(1), 9.0)));
    }
}

// ── Path finding ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod finder {
    use wf_core::{GeoPoint, NodeId};
    use wf_graph::{GraphError, SpatialGraph, SpatialGraphBuilder, fixtures::tiny_graph};

    use super::helpers::{idx, ids};
    use crate::{AStar, Dijkstra, PathFinder, RouteError, route};

    fn route_ids(g: &SpatialGraph, from: (f64, f64), to: (f64, f64)) -> Vec<u64> {
        let path = route(g, &AStar, GeoPoint::new(from.0, from.1), GeoPoint::new(to.0, to.1)).unwrap();
        ids(g, path.nodes())
    }

    #[test]
    fn tiny_graph_known_routes() {
        let g = tiny_graph().unwrap();
        assert_eq!(route_ids(&g, (37.84, -122.27), (37.88, -122.23)), vec![22, 46, 66]);
        assert_eq!(route_ids(&g, (37.84, -122.27), (37.83, -122.28)), vec![22, 11]);
        assert_eq!(route_ids(&g, (37.83, -122.25), (37.88, -122.25)), vec![41, 63, 66, 46]);
        assert_eq!(route_ids(&g, (37.88, -122.23), (37.87, -122.24)), vec![66, 63, 55]);
    }

    #[test]
    fn nearby_points_snap_before_routing() {
        let g = tiny_graph().unwrap();
        // Slightly off 22 and 66.
        assert_eq!(route_ids(&g, (37.841, -122.271), (37.879, -122.231)), vec![22, 46, 66]);
    }

    #[test]
    fn same_point_is_single_node() {
        let g = tiny_graph().unwrap();
        let p = GeoPoint::new(37.85, -122.24);
        let path = route(&g, &AStar, p, p).unwrap();
        assert_eq!(ids(&g, path.nodes()), vec![63]);
        assert_eq!(path.cost_m(), 0.0);
    }

    #[test]
    fn same_point_outside_region_snaps() {
        let g = tiny_graph().unwrap();
        let p = GeoPoint::new(38.5, -121.0);
        let path = route(&g, &AStar, p, p).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path.nodes()[0], g.nearest_node(p).unwrap());
    }

    #[test]
    fn cost_is_sum_of_edge_lengths() {
        let g = tiny_graph().unwrap();
        let path = AStar.shortest_path(&g, idx(&g, 41), idx(&g, 46));
        let sum: f64 = path
            .nodes()
            .windows(2)
            .map(|w| g.edge_length_m(g.edge_between(w[0], w[1]).unwrap()))
            .sum();
        assert!((path.cost_m() - sum).abs() < 1e-9);
        assert!((path.cost_m() - 7595.73).abs() < 1.0, "cost {}", path.cost_m());
    }

    #[test]
    fn node_ids_match_external_ids() {
        let g = tiny_graph().unwrap();
        let path = AStar.shortest_path(&g, idx(&g, 22), idx(&g, 11));
        assert_eq!(path.node_ids(&g), vec![NodeId(22), NodeId(11)]);
    }

    #[test]
    fn disconnected_components_give_empty_path() {
        let mut b = SpatialGraphBuilder::new();
        b.add_node(NodeId(1), GeoPoint::new(37.80, -122.30), None).unwrap();
        b.add_node(NodeId(2), GeoPoint::new(37.80, -122.29), None).unwrap();
        b.add_node(NodeId(3), GeoPoint::new(37.90, -122.20), None).unwrap();
        b.add_node(NodeId(4), GeoPoint::new(37.90, -122.19), None).unwrap();
        b.add_edge(NodeId(1), NodeId(2), None).unwrap();
        b.add_edge(NodeId(3), NodeId(4), None).unwrap();
        let g = b.build();

        let path = route(&g, &AStar, GeoPoint::new(37.80, -122.30), GeoPoint::new(37.90, -122.19)).unwrap();
        assert!(path.is_empty());
        assert_eq!(path.cost_m(), 0.0);
        assert!(Dijkstra.shortest_path(&g, idx(&g, 2), idx(&g, 3)).is_empty());
    }

    #[test]
    fn empty_graph_is_an_error() {
        let g = SpatialGraph::empty();
        let p = GeoPoint::new(37.85, -122.25);
        assert!(matches!(
            route(&g, &AStar, p, p),
            Err(RouteError::Graph(GraphError::NoConnectedNodes))
        ));
    }

    #[test]
    fn takes_cheaper_of_parallel_routes() {
        // 1 ── 2 ── 4 is shorter than the detour 1 ── 3 ── 4.
        let mut b = SpatialGraphBuilder::new();
        b.add_node(NodeId(1), GeoPoint::new(37.850, -122.260), None).unwrap();
        b.add_node(NodeId(2), GeoPoint::new(37.851, -122.255), None).unwrap();
        b.add_node(NodeId(3), GeoPoint::new(37.870, -122.255), None).unwrap();
        b.add_node(NodeId(4), GeoPoint::new(37.850, -122.250), None).unwrap();
        b.add_way(None, &[NodeId(1), NodeId(3), NodeId(4)]).unwrap();
        b.add_way(None, &[NodeId(1), NodeId(2), NodeId(4)]).unwrap();
        let g = b.build();

        let path = AStar.shortest_path(&g, idx(&g, 1), idx(&g, 4));
        assert_eq!(ids(&g, path.nodes()), vec![1, 2, 4]);
    }

    #[test]
    fn finder_is_object_safe_and_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AStar>();
        let finders: Vec<Box<dyn PathFinder>> = vec![Box::new(AStar), Box::new(Dijkstra)];
        let g = tiny_graph().unwrap();
        for f in &finders {
            let path = f.shortest_path(&g, idx(&g, 66), idx(&g, 55));
            assert_eq!(ids(&g, path.nodes()), vec![66, 63, 55]);
        }
    }
}

// ── Optimality on random graphs ───────────────────────────────────────────────

#[cfg(test)]
mod optimality {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use wf_core::{GeoPoint, NodeId, NodeIdx};
    use wf_graph::{SpatialGraph, SpatialGraphBuilder};

    use crate::{AStar, Dijkstra, PathFinder};

    fn random_graph(rng: &mut SmallRng, nodes: u64, edge_p: f64) -> SpatialGraph {
        let mut b = SpatialGraphBuilder::new();
        for id in 0..nodes {
            let pos = GeoPoint::new(
                37.82 + rng.gen_range(0.0..0.07),
                -122.30 + rng.gen_range(0.0..0.09),
            );
            b.add_node(NodeId(id), pos, None).unwrap();
        }
        for a in 0..nodes {
            for c in (a + 1)..nodes {
                if rng.gen_bool(edge_p) {
                    b.add_edge(NodeId(a), NodeId(c), None).unwrap();
                }
            }
        }
        b.build()
    }

    /// Cheapest simple path by brute-force DFS.
    fn exhaustive(g: &SpatialGraph, from: NodeIdx, to: NodeIdx) -> Option<f64> {
        fn dfs(g: &SpatialGraph, at: NodeIdx, to: NodeIdx, seen: &mut Vec<bool>, cost: f64, best: &mut Option<f64>) {
            if at == to {
                if best.is_none_or(|b| cost < b) {
                    *best = Some(cost);
                }
                return;
            }
            for nb in g.neighbors(at) {
                if !seen[nb.node.index()] {
                    seen[nb.node.index()] = true;
                    dfs(g, nb.node, to, seen, cost + nb.length_m, best);
                    seen[nb.node.index()] = false;
                }
            }
        }
        let mut seen = vec![false; g.node_count()];
        seen[from.index()] = true;
        let mut best = None;
        dfs(g, from, to, &mut seen, 0.0, &mut best);
        best
    }

    #[test]
    fn astar_matches_exhaustive_search() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        for _ in 0..40 {
            let g = random_graph(&mut rng, 8, 0.35);
            for from in 0..g.node_count() as u32 {
                for to in 0..g.node_count() as u32 {
                    let (from, to) = (NodeIdx(from), NodeIdx(to));
                    let astar = AStar.shortest_path(&g, from, to);
                    let dijkstra = Dijkstra.shortest_path(&g, from, to);
                    match exhaustive(&g, from, to) {
                        None => {
                            assert!(astar.is_empty());
                            assert!(dijkstra.is_empty());
                        }
                        Some(best) => {
                            assert!((astar.cost_m() - best).abs() < 1e-6, "A* {} vs {}", astar.cost_m(), best);
                            assert!((dijkstra.cost_m() - best).abs() < 1e-6);
                            assert_eq!(astar.nodes().first(), Some(&from));
                            assert_eq!(astar.nodes().last(), Some(&to));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn paths_have_no_repeated_nodes() {
        let mut rng = SmallRng::seed_from_u64(7);
        let g = random_graph(&mut rng, 30, 0.15);
        for to in 1..g.node_count() as u32 {
            let path = AStar.shortest_path(&g, NodeIdx(0), NodeIdx(to));
            let mut seen = path.nodes().to_vec();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), path.len());
        }
    }
}

// ── Directions ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod directions {
    use wf_core::{GeoPoint, NodeId};
    use wf_graph::fixtures::tiny_graph;
    use wf_graph::{SpatialGraph, SpatialGraphBuilder};

    use super::helpers::path_of;
    use crate::{
        Direction, DirectionsBuilder, NavigationStep, RouteError, TurnThresholds, numbered_lines,
    };

    fn step_summary(steps: &[NavigationStep]) -> Vec<(Direction, Option<&str>)> {
        steps.iter().map(|s| (s.direction, s.street.as_deref())).collect()
    }

    /// Graph with nodes `1..` at the given `(lat, lon)` and edges
    /// `i -> i + 1` named by `streets[i - 1]`.
    fn chain(points: &[(f64, f64)], streets: &[&str]) -> SpatialGraph {
        let mut b = SpatialGraphBuilder::new();
        for (i, &(lat, lon)) in points.iter().enumerate() {
            b.add_node(NodeId(i as u64 + 1), GeoPoint::new(lat, lon), None).unwrap();
        }
        for (i, street) in streets.iter().enumerate() {
            b.add_edge(NodeId(i as u64 + 1), NodeId(i as u64 + 2), Some(street)).unwrap();
        }
        b.build()
    }

    #[test]
    fn classify_bands() {
        let t = TurnThresholds::default();
        assert_eq!(t.classify(0.0), Direction::Straight);
        assert_eq!(t.classify(14.9), Direction::Straight);
        assert_eq!(t.classify(-14.9), Direction::Straight);
        assert_eq!(t.classify(20.0), Direction::SlightRight);
        assert_eq!(t.classify(-20.0), Direction::SlightLeft);
        assert_eq!(t.classify(45.0), Direction::Right);
        assert_eq!(t.classify(-45.0), Direction::Left);
        assert_eq!(t.classify(120.0), Direction::SharpRight);
        assert_eq!(t.classify(-120.0), Direction::SharpLeft);
    }

    #[test]
    fn classify_wraps_around() {
        let t = TurnThresholds::default();
        assert_eq!(t.classify(350.0), Direction::Straight);
        assert_eq!(t.classify(-350.0), Direction::Straight);
        assert_eq!(t.classify(-190.0), Direction::SharpRight);
        assert_eq!(t.classify(180.0), Direction::SharpRight);
        assert_eq!(t.classify(-180.0), Direction::SharpRight);
    }

    #[test]
    fn straight_run_on_one_street_merges() {
        let g = tiny_graph().unwrap();
        let steps = DirectionsBuilder::default().build(&g, &path_of(&g, &[41, 63, 66, 46])).unwrap();
        assert_eq!(
            step_summary(&steps),
            vec![
                (Direction::Start, Some("Shattuck Avenue")),
                (Direction::SharpLeft, Some("Hearst Avenue")),
                (Direction::Arrive, None),
            ]
        );
        assert!((steps[0].distance_m - 5840.41).abs() < 1.0, "{}", steps[0].distance_m);
        assert!((steps[1].distance_m - 1755.32).abs() < 1.0, "{}", steps[1].distance_m);
        assert_eq!(steps[2].distance_m, 0.0);
    }

    #[test]
    fn turns_on_tiny_graph() {
        let g = tiny_graph().unwrap();
        let b = DirectionsBuilder::default();

        let steps = b.build(&g, &path_of(&g, &[22, 46, 66])).unwrap();
        assert_eq!(
            step_summary(&steps),
            vec![
                (Direction::Start, Some("Euclid Avenue")),
                (Direction::Right, Some("Hearst Avenue")),
                (Direction::Arrive, None),
            ]
        );
        assert!((steps[0].distance_m - 4781.81).abs() < 1.0);

        let steps = b.build(&g, &path_of(&g, &[66, 63, 55])).unwrap();
        assert_eq!(
            step_summary(&steps),
            vec![
                (Direction::Start, Some("Shattuck Avenue")),
                (Direction::SharpRight, Some("Bancroft Way")),
                (Direction::Arrive, None),
            ]
        );
        assert!((steps[1].distance_m - 2223.90).abs() < 1.0);

        let steps = b.build(&g, &path_of(&g, &[11, 22, 46])).unwrap();
        assert_eq!(
            step_summary(&steps),
            vec![
                (Direction::Start, Some("Cedar Street")),
                (Direction::SlightLeft, Some("Euclid Avenue")),
                (Direction::Arrive, None),
            ]
        );
    }

    #[test]
    fn tighter_thresholds_split_straight_runs() {
        let g = tiny_graph().unwrap();
        let strict = DirectionsBuilder::new(TurnThresholds { straight_deg: 5.0, ..TurnThresholds::default() });
        let steps = strict.build(&g, &path_of(&g, &[41, 63, 66])).unwrap();
        assert_eq!(
            step_summary(&steps),
            vec![
                (Direction::Start, Some("Shattuck Avenue")),
                (Direction::SlightLeft, Some("Shattuck Avenue")),
                (Direction::Arrive, None),
            ]
        );
    }

    #[test]
    fn street_change_without_turn_starts_new_step() {
        let g = chain(&[(0.0, 0.0), (0.0, 0.01), (0.0, 0.02), (0.0, 0.03)], &["A St", "B St", "B St"]);
        let steps = DirectionsBuilder::default().build(&g, &path_of(&g, &[1, 2, 3, 4])).unwrap();
        assert_eq!(
            step_summary(&steps),
            vec![
                (Direction::Start, Some("A St")),
                (Direction::Straight, Some("B St")),
                (Direction::Arrive, None),
            ]
        );
        let one_block = GeoPoint::new(0.0, 0.0).distance_m(GeoPoint::new(0.0, 0.01));
        assert!((steps[0].distance_m - one_block).abs() < 1e-6);
        assert!((steps[1].distance_m - 2.0 * one_block).abs() < 1e-6);
    }

    #[test]
    fn zero_length_edge_keeps_heading() {
        // Nodes 2 and 3 share a position.
        let g = chain(&[(0.0, 0.0), (0.0, 0.01), (0.0, 0.01), (0.0, 0.02)], &["A St", "A St", "A St"]);
        let steps = DirectionsBuilder::default().build(&g, &path_of(&g, &[1, 2, 3, 4])).unwrap();
        assert_eq!(
            step_summary(&steps),
            vec![(Direction::Start, Some("A St")), (Direction::Arrive, None)]
        );
        let two_blocks = GeoPoint::new(0.0, 0.0).distance_m(GeoPoint::new(0.0, 0.02));
        assert!((steps[0].distance_m - two_blocks).abs() < 1e-6);
    }

    #[test]
    fn turn_after_zero_length_edge_uses_last_real_heading() {
        // East along A St, a zero-length joint, then north on B St.
        let g = chain(&[(0.0, 0.0), (0.0, 0.01), (0.0, 0.01), (0.01, 0.01)], &["A St", "A St", "B St"]);
        let steps = DirectionsBuilder::default().build(&g, &path_of(&g, &[1, 2, 3, 4])).unwrap();
        assert_eq!(
            step_summary(&steps),
            vec![
                (Direction::Start, Some("A St")),
                (Direction::Left, Some("B St")),
                (Direction::Arrive, None),
            ]
        );

        // A path that opens on a zero-length edge takes its first heading
        // from the next real edge.
        let g = chain(&[(0.0, 0.0), (0.0, 0.0), (0.0, 0.01)], &["A St", "A St"]);
        let steps = DirectionsBuilder::default().build(&g, &path_of(&g, &[1, 2, 3])).unwrap();
        assert_eq!(
            step_summary(&steps),
            vec![(Direction::Start, Some("A St")), (Direction::Arrive, None)]
        );
    }

    #[test]
    fn short_paths() {
        let g = tiny_graph().unwrap();
        let b = DirectionsBuilder::default();
        assert!(b.build(&g, &[]).unwrap().is_empty());
        let steps = b.build(&g, &path_of(&g, &[63])).unwrap();
        assert_eq!(steps, vec![NavigationStep::arrive()]);
    }

    #[test]
    fn gap_in_path_is_an_error() {
        let g = tiny_graph().unwrap();
        let err = DirectionsBuilder::default().build(&g, &path_of(&g, &[11, 66])).unwrap_err();
        assert!(matches!(err, RouteError::NotAdjacent(NodeId(11), NodeId(66))));
    }

    #[test]
    fn display_in_miles() {
        let step = NavigationStep {
            direction:  Direction::Left,
            distance_m: 193.12128,
            street:     Some("Shattuck Avenue".into()),
        };
        assert_eq!(step.to_string(), "Turn left on Shattuck Avenue and continue for 0.120 miles.");

        let unnamed = NavigationStep { direction: Direction::Start, distance_m: 0.0, street: None };
        assert_eq!(unnamed.to_string(), "Start on unknown road and continue for 0.000 miles.");
        assert_eq!(NavigationStep::arrive().to_string(), "You have arrived at your destination.");
    }

    #[test]
    fn numbered_text() {
        let steps = vec![
            NavigationStep { direction: Direction::Start, distance_m: 1609.344, street: Some("Cedar Street".into()) },
            NavigationStep::arrive(),
        ];
        assert_eq!(
            numbered_lines(&steps),
            vec![
                "1. Start on Cedar Street and continue for 1.000 miles.".to_owned(),
                "2. You have arrived at your destination.".to_owned(),
            ]
        );
    }
}
