//! Unit tests for ped-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, NodeId, ObstacleId};

    #[test]
    fn index_cast() {
        assert_eq!(AgentId(42).index(), 42);
        assert_eq!(NodeId(7).index(), 7);
    }

    #[test]
    fn ordering() {
        assert!(AgentId(0) < AgentId(1));
        assert!(NodeId(100) > NodeId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(ObstacleId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{GeoPoint, LocalFrame, Vec2};
    use approx::assert_relative_eq;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(40.7128, -74.0060);
        assert!(p.distance_m(p) < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = GeoPoint::new(40.7128, -74.0060);
        let b = GeoPoint::new(40.7306, -73.9866);
        assert_relative_eq!(a.distance_m(b), b.distance_m(a), epsilon = 1e-9);
    }

    #[test]
    fn one_degree_latitude() {
        // ~1 degree of latitude ≈ 111 km
        let a = GeoPoint::new(40.0, -74.0);
        let b = GeoPoint::new(41.0, -74.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 500.0, "got {d}");
    }

    #[test]
    fn local_roundtrip() {
        let origin = GeoPoint::new(40.7128, -74.0060);
        let frame = LocalFrame::new(origin);
        let p = GeoPoint::new(40.7150, -74.0100);
        let back = frame.from_local(frame.to_local(p));
        assert_relative_eq!(back.lat, p.lat, epsilon = 1e-10);
        assert_relative_eq!(back.lon, p.lon, epsilon = 1e-10);
    }

    #[test]
    fn local_offset_is_metric() {
        // 100 m due north should come back as ~100 m of haversine distance.
        let origin = GeoPoint::new(40.7128, -74.0060);
        let frame = LocalFrame::new(origin);
        let north = frame.from_local(Vec2::new(0.0, 100.0));
        let d = origin.distance_m(north);
        assert!((d - 100.0).abs() < 1.0, "got {d}");
    }

    #[test]
    fn local_origin_maps_to_zero() {
        let origin = GeoPoint::new(40.7128, -74.0060);
        let frame = LocalFrame::new(origin);
        assert_eq!(frame.to_local(origin), Vec2::ZERO);
    }
}

#[cfg(test)]
mod vec2 {
    use crate::Vec2;
    use approx::assert_relative_eq;

    #[test]
    fn normalize_unit_length() {
        let v = Vec2::new(3.0, 4.0).normalized();
        assert_relative_eq!(v.length(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(v.x, 0.6, epsilon = 1e-12);
    }

    #[test]
    fn normalize_zero_stays_zero() {
        assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);
    }

    #[test]
    fn limit_clamps_long_vectors() {
        let v = Vec2::new(3.0, 4.0).limit(2.5);
        assert_relative_eq!(v.length(), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn limit_passes_short_vectors() {
        let v = Vec2::new(1.0, 0.0);
        assert_eq!(v.limit(2.0), v);
    }

    #[test]
    fn perp_is_orthogonal() {
        let v = Vec2::new(2.0, 1.0);
        assert_relative_eq!(v.dot(v.perp()), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn arithmetic() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, -1.0);
        assert_eq!(a + b, Vec2::new(4.0, 1.0));
        assert_eq!(a - b, Vec2::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(-a, Vec2::new(-1.0, -2.0));
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a: f64 = r1.gen_range(0.0..1.0);
            let b: f64 = r2.gen_range(0.0..1.0);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_seeds_differ() {
        let mut r1 = SimRng::new(1);
        let mut r2 = SimRng::new(2);
        let a: u64 = r1.gen_range(0..u64::MAX);
        let b: u64 = r2.gen_range(0..u64::MAX);
        assert_ne!(a, b);
    }

    #[test]
    fn gen_range_in_bounds() {
        let mut rng = SimRng::new(0);
        for _ in 0..1000 {
            let v: f64 = rng.gen_range(80.0..134.0);
            assert!((80.0..134.0).contains(&v));
        }
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }
}

#[cfg(test)]
mod mode {
    use crate::TravelMode;

    #[test]
    fn transit_split() {
        assert!(TravelMode::Bus.is_transit());
        assert!(TravelMode::Rail.is_transit());
        assert!(!TravelMode::Walking.is_transit());
    }

    #[test]
    fn display() {
        assert_eq!(TravelMode::Bus.to_string(), "bus");
        assert_eq!(TravelMode::Walking.to_string(), "walking");
    }
}
