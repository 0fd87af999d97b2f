//! Unit tests for aq-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ArcId, EdgeId, NodeId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(NodeId(0) < NodeId(1));
        assert!(EdgeId(100) > EdgeId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
        assert_eq!(ArcId::INVALID.0, u32::MAX);
        assert!(!ArcId::default().is_valid());
        assert!(ArcId(0).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;
    use crate::geo::bearing_delta;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(51.5074, -0.1278);
        assert!(p.distance_m(p) < 0.01);
    }

    #[test]
    fn one_degree_latitude() {
        let a = GeoPoint::new(51.0, -0.1);
        let b = GeoPoint::new(52.0, -0.1);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 500.0, "got {d}");
    }

    #[test]
    fn cardinal_bearings() {
        let o = GeoPoint::new(0.0, 0.0);
        assert!((o.bearing_deg(GeoPoint::new(1.0, 0.0)) - 0.0).abs() < 1e-9);
        assert!((o.bearing_deg(GeoPoint::new(0.0, 1.0)) - 90.0).abs() < 1e-9);
        assert!((o.bearing_deg(GeoPoint::new(-1.0, 0.0)) - 180.0).abs() < 1e-9);
        assert!((o.bearing_deg(GeoPoint::new(0.0, -1.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn delta_wraps_into_half_open_range() {
        assert_eq!(bearing_delta(0.0, 95.0), 95.0);
        assert_eq!(bearing_delta(350.0, 10.0), 20.0);
        assert_eq!(bearing_delta(10.0, 350.0), -20.0);
        // Exactly opposite resolves to +180, never -180.
        assert_eq!(bearing_delta(0.0, 180.0), 180.0);
        assert_eq!(bearing_delta(180.0, 0.0), 180.0);
    }
}

#[cfg(test)]
mod criterion {
    use crate::{CoreError, Criterion, Weights};

    #[test]
    fn pure_vectors() {
        assert_eq!(Weights::SHORTEST, Weights::new(1.0, 0.0, 0.0).unwrap());
        assert_eq!(Weights::FASTEST.time(), 1.0);
        assert_eq!(Weights::CLEANEST.aqi(), 1.0);
        assert_eq!(Weights::CLEANEST.distance(), 0.0);
    }

    #[test]
    fn fixed_matches_new() {
        assert_eq!(Weights::fixed(0.2, 0.3, 0.5), Weights::new(0.2, 0.3, 0.5).unwrap());
        assert_eq!(Weights::default(), Weights::fixed(1.0, 1.0, 1.0));
    }

    #[test]
    #[should_panic(expected = "finite and non-negative")]
    fn fixed_rejects_negative() {
        let _ = Weights::fixed(-1.0, 0.0, 0.0);
    }

    #[test]
    fn rejects_negative_and_nan() {
        assert!(matches!(Weights::new(-0.1, 0.0, 0.0), Err(CoreError::InvalidWeights(_))));
        assert!(matches!(Weights::new(0.0, f64::NAN, 0.0), Err(CoreError::InvalidWeights(_))));
        assert!(matches!(Weights::new(0.0, 0.0, f64::INFINITY), Err(CoreError::InvalidWeights(_))));
        assert!(Weights::new(0.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn shares_sum_to_one() {
        let w = Weights::new(2.0, 1.0, 1.0).unwrap();
        let [d, t, a] = w.shares().unwrap();
        assert_eq!(d, 0.5);
        assert_eq!(t, 0.25);
        assert_eq!(a, 0.25);
        assert!(Weights::new(0.0, 0.0, 0.0).unwrap().shares().is_none());
    }

    #[test]
    fn display() {
        assert_eq!(Criterion::Aqi.to_string(), "aqi");
        assert_eq!(Weights::SHORTEST.to_string(), "(d=1.00, t=0.00, aqi=0.00)");
    }
}

#[cfg(test)]
mod tick {
    use crate::{FeedConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        assert_eq!(Tick::ZERO.next(), Tick(1));
        assert_eq!(Tick(3).to_string(), "T3");
    }

    #[test]
    fn default_config_is_valid() {
        let cfg = FeedConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.interval().as_secs(), 5);
    }

    #[test]
    fn rejects_inverted_clamp() {
        let cfg = FeedConfig { aqi_floor: 300.0, aqi_ceiling: 200.0, ..FeedConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = FeedConfig { interval_ms: 0, ..FeedConfig::default() };
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::FeedRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = FeedRng::new(12345);
        let mut r2 = FeedRng::new(12345);
        for _ in 0..100 {
            assert_eq!(r1.centered(), r2.centered());
        }
    }

    #[test]
    fn centered_in_bounds() {
        let mut rng = FeedRng::new(0);
        for _ in 0..1000 {
            let v = rng.centered();
            assert!((-0.5..0.5).contains(&v));
        }
    }
}
