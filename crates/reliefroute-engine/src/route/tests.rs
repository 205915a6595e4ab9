//! Tests for the nearest-neighbor route optimizer.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use reliefroute_test::{assert_close, demo_areas};

use super::*;

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[test]
fn test_nearest_neighbor_order() {
    let route = optimize_route(p(0.0, 0.0), &[p(10.0, 10.0), p(1.0, 1.0), p(5.0, 5.0)]);

    assert_eq!(
        route.stops(),
        &[p(0.0, 0.0), p(1.0, 1.0), p(5.0, 5.0), p(10.0, 10.0)]
    );
    assert_eq!(route.depot(), p(0.0, 0.0));
    assert_eq!(route.stop_count(), 4);
    assert_close(route.total_distance(), 200f64.sqrt());
}

#[test]
fn test_empty_points_yields_depot_only() {
    let route = optimize_route(p(2.0, 3.0), &[]);
    assert_eq!(route.stops(), &[p(2.0, 3.0)]);
    assert!(route.deliveries().is_empty());
    assert_eq!(route.legs().count(), 0);
    assert_eq!(route.total_distance(), 0.0);
}

#[test]
fn test_ties_keep_input_order() {
    let points = [p(-1.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)];
    let route = optimize_route(p(0.0, 0.0), &points);
    assert_eq!(route.deliveries()[0], p(-1.0, 0.0));

    let mirrored = [p(1.0, 0.0), p(-1.0, 0.0)];
    let route = optimize_route(p(0.0, 0.0), &mirrored);
    assert_eq!(route.deliveries(), &[p(1.0, 0.0), p(-1.0, 0.0)]);
}

#[test]
fn test_duplicate_points_are_all_visited() {
    let points = [p(3.0, 3.0), p(1.0, 1.0), p(3.0, 3.0)];
    let route = optimize_route(p(0.0, 0.0), &points);
    assert_eq!(
        route.deliveries(),
        &[p(1.0, 1.0), p(3.0, 3.0), p(3.0, 3.0)]
    );
}

#[test]
fn test_route_is_greedy_permutation() {
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    let optimizer = RouteOptimizer::new();

    for _ in 0..200 {
        let count = rng.random_range(0..12);
        let points: Vec<Point> = (0..count)
            .map(|_| p(rng.random_range(-50.0..50.0), rng.random_range(-50.0..50.0)))
            .collect();
        let start = p(rng.random_range(-50.0..50.0), rng.random_range(-50.0..50.0));

        let order = optimizer.visiting_order(start, &points);
        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..count).collect::<Vec<_>>());

        let route = optimizer.optimize_route(start, &points);
        assert_eq!(route.stop_count(), points.len() + 1);
        assert_eq!(route.depot(), start);

        // Each step goes to a closest remaining point.
        let mut remaining: Vec<Point> = points.clone();
        let mut current = start;
        for &next in route.deliveries() {
            let best = remaining
                .iter()
                .map(|q| current.distance_to(q))
                .fold(f64::INFINITY, f64::min);
            assert_eq!(current.distance_to(&next), best);
            let pos = remaining.iter().position(|q| *q == next).unwrap();
            remaining.remove(pos);
            current = next;
        }
        assert!(remaining.is_empty());
    }
}

#[test]
fn test_custom_meter() {
    #[derive(Debug)]
    struct HorizontalMeter;

    impl DistanceMeter for HorizontalMeter {
        fn distance(&self, from: &Point, to: &Point) -> f64 {
            (from.x - to.x).abs()
        }
    }

    let optimizer = RouteOptimizer::with_meter(HorizontalMeter);
    let route = optimizer.optimize_route(p(0.0, 0.0), &[p(2.0, 0.0), p(1.0, 100.0)]);
    assert_eq!(route.deliveries(), &[p(1.0, 100.0), p(2.0, 0.0)]);
}

#[test]
fn test_sequence_demo_areas() {
    let areas = demo_areas();
    let order = RouteOptimizer::new().sequence_areas(Point::ORIGIN, &areas);
    let ids: Vec<&str> = order.iter().map(AreaId::as_str).collect();
    assert_eq!(ids, ["area1", "area2", "area3"]);
}

#[test]
fn test_legs_follow_stops() {
    let route = optimize_route(p(0.0, 0.0), &[p(0.0, 3.0), p(4.0, 3.0)]);
    let legs: Vec<_> = route.legs().collect();
    assert_eq!(
        legs,
        vec![(p(0.0, 0.0), p(0.0, 3.0)), (p(0.0, 3.0), p(4.0, 3.0))]
    );
    assert_close(route.total_distance(), 7.0);
}

#[test]
fn test_route_areas_agrees_with_separate_passes() {
    let mut areas = demo_areas();
    areas.reverse();
    let optimizer = RouteOptimizer::new();
    let locations: Vec<Point> = areas.iter().map(Area::location).collect();

    let (route, ids) = optimizer.route_areas(Point::ORIGIN, &areas);

    assert_eq!(route, optimizer.optimize_route(Point::ORIGIN, &locations));
    assert_eq!(ids, optimizer.sequence_areas(Point::ORIGIN, &areas));
    let ids: Vec<&str> = ids.iter().map(AreaId::as_str).collect();
    assert_eq!(ids, ["area1", "area2", "area3"]);
    for (stop, id) in route.deliveries().iter().zip(&ids) {
        let area = areas.iter().find(|a| a.id().as_str() == *id).unwrap();
        assert_eq!(*stop, area.location());
    }
}

#[test]
fn test_route_areas_empty() {
    let (route, ids) = RouteOptimizer::new().route_areas(p(1.0, 1.0), &[]);
    assert_eq!(route.stops(), &[p(1.0, 1.0)]);
    assert!(ids.is_empty());
}
