use super::*;
use crate::state::Space;

fn corridor() -> FloorplanState {
    let mut fp = FloorplanState::default();
    let a = fp.push_space("A".into(), "Classroom".into(), 0.1, 0.1);
    let b = fp.push_space("B".into(), "Classroom".into(), 0.5, 0.1);
    let c = fp.push_space("C".into(), "Classroom".into(), 0.9, 0.1);
    let d = fp.push_space("D".into(), "Stairwell".into(), 0.5, 0.5);
    fp.push_hallway("AB".into(), &a, &b);
    fp.push_hallway("BC".into(), &b, &c);
    fp.push_hallway("AD".into(), &a, &d);
    fp.push_hallway("DC".into(), &d, &c);
    fp
}

#[test]
fn prefers_straight_corridor() {
    let fp = corridor();
    let route = shortest_path(&fp, 1, 3).unwrap();
    assert_eq!(route.space_ids, vec![1, 2, 3]);
    assert_eq!(route.hallway_ids, vec![1, 2]);
}

#[test]
fn hallways_are_undirected() {
    let fp = corridor();
    let route = shortest_path(&fp, 3, 1).unwrap();
    assert_eq!(route.space_ids, vec![3, 2, 1]);
    assert_eq!(route.hallway_ids, vec![2, 1]);
}

#[test]
fn detours_when_corridor_is_cut() {
    let mut fp = corridor();
    fp.hallways.retain(|h| h.id != 2);
    let route = shortest_path(&fp, 1, 3).unwrap();
    assert_eq!(route.space_ids, vec![1, 4, 3]);
    assert_eq!(route.hallway_ids, vec![3, 4]);
}

#[test]
fn same_start_and_end() {
    let fp = corridor();
    let route = shortest_path(&fp, 2, 2).unwrap();
    assert_eq!(route.space_ids, vec![2]);
    assert!(route.hallway_ids.is_empty());
}

#[test]
fn unknown_space_is_reported() {
    let fp = corridor();
    assert_eq!(shortest_path(&fp, 1, 99), Err(RouteError::SpaceNotFound(99)));
    assert_eq!(shortest_path(&fp, 77, 1), Err(RouteError::SpaceNotFound(77)));
}

#[test]
fn disconnected_space_has_no_route() {
    let mut fp = corridor();
    let island = fp.push_space("Island".into(), "Office".into(), 0.9, 0.9);
    assert_eq!(shortest_path(&fp, 1, island.id), Err(RouteError::NoRoute { from: 1, to: island.id }));
}

#[test]
fn dangling_hallways_are_skipped() {
    let mut fp = corridor();
    // Remove B without cascading: hallways 1 and 2 now dangle.
    fp.spaces.retain(|s| s.id != 2);
    let route = shortest_path(&fp, 1, 3).unwrap();
    assert_eq!(route.hallway_ids, vec![3, 4]);
}

#[test]
fn edge_weight_uses_space_positions() {
    let mut fp = FloorplanState::default();
    let a = fp.push_space("A".into(), "Classroom".into(), 0.0, 0.0);
    let far = fp.push_space("Far".into(), "Classroom".into(), 1.0, 0.0);
    let mid = fp.push_space("Mid".into(), "Intersection".into(), 0.5, 0.4);
    fp.push_hallway("a-mid".into(), &a, &mid);
    fp.push_hallway("mid-far".into(), &mid, &far);
    fp.push_hallway("direct".into(), &a, &far);
    // Direct is 1.0; via Mid is about 1.28.
    assert_eq!(shortest_path(&fp, a.id, far.id).unwrap().hallway_ids, vec![3]);
}

#[test]
fn graph_reused_across_searches() {
    let fp = corridor();
    let graph = Graph::build(&fp);
    assert!(graph.contains(4));
    assert!(!graph.contains(5));
    assert_eq!(graph.shortest_path(1, 2).unwrap().hallway_ids, vec![1]);
    assert_eq!(graph.shortest_path(4, 2).unwrap().space_ids.first(), Some(&4));
}

#[test]
fn multi_hop_path_is_contiguous() {
    let mut fp = FloorplanState::default();
    let ids: Vec<Space> =
        (0..6).map(|i| fp.push_space(format!("S{i}"), "Classroom".into(), f64::from(i) * 0.1, 0.5)).collect();
    for pair in ids.windows(2) {
        fp.push_hallway(format!("{}-{}", pair[0].name, pair[1].name), &pair[0], &pair[1]);
    }
    let route = shortest_path(&fp, ids[0].id, ids[5].id).unwrap();
    assert_eq!(route.space_ids.len(), 6);
    assert_eq!(route.hallway_ids, vec![1, 2, 3, 4, 5]);
}
