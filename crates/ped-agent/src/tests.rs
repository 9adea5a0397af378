//! Unit tests for ped-agent.

#[cfg(test)]
mod helpers {
    use crate::{AgentFactory, PedSimConfig};

    pub fn factory(seed: u64) -> AgentFactory {
        AgentFactory::new(&PedSimConfig::with_max_agents(100), seed)
    }
}

#[cfg(test)]
mod agent_type {
    use ped_net::AccessNeed;

    use crate::AgentType;

    #[test]
    fn access_needs() {
        assert_eq!(AgentType::Wheelchair.access_need(), AccessNeed::Full);
        assert_eq!(AgentType::MobilityAid.access_need(), AccessNeed::Limited);
        assert_eq!(AgentType::Normal.access_need(), AccessNeed::Any);
        assert_eq!(AgentType::Child.access_need(), AccessNeed::Any);
    }

    #[test]
    fn avoidance_radius_ordering() {
        // Wheelchair largest, child smallest.
        let radii = [
            AgentType::Wheelchair.avoidance_radius_m(),
            AgentType::MobilityAid.avoidance_radius_m(),
            AgentType::Elderly.avoidance_radius_m(),
            AgentType::Normal.avoidance_radius_m(),
            AgentType::Child.avoidance_radius_m(),
        ];
        assert!(radii.windows(2).all(|w| w[0] > w[1]), "{radii:?}");
    }

    #[test]
    fn sensitivity_bands_are_valid() {
        for t in [
            AgentType::Normal,
            AgentType::Wheelchair,
            AgentType::MobilityAid,
            AgentType::Elderly,
            AgentType::Child,
        ] {
            let (lo, hi) = t.sensitivity_band();
            assert!(0.0 <= lo && lo < hi && hi <= 1.0, "{t}: ({lo}, {hi})");
        }
    }
}

#[cfg(test)]
mod weather {
    use approx::assert_relative_eq;

    use crate::{MIN_SPEED_FACTOR, WeatherConditions};

    #[test]
    fn clear_weather_is_free() {
        let w = WeatherConditions::default();
        assert_relative_eq!(w.speed_factor(1.0), 1.0);
        assert_relative_eq!(w.speed_factor(0.0), 1.0);
    }

    #[test]
    fn insensitive_agents_ignore_weather() {
        let w = WeatherConditions {
            temperature_c: -10.0,
            precipitation: 1.0,
            wind_speed_mps: 25.0,
            visibility: 0.1,
            ..Default::default()
        };
        assert_relative_eq!(w.speed_factor(0.0), 1.0);
    }

    #[test]
    fn floor_holds_in_the_worst_storm() {
        let w = WeatherConditions {
            temperature_c: -30.0,
            precipitation: 1.0,
            wind_speed_mps: 40.0,
            visibility: 0.0,
            ..Default::default()
        };
        assert_relative_eq!(w.speed_factor(1.0), MIN_SPEED_FACTOR);
    }

    #[test]
    fn factor_never_below_floor() {
        // Sweep a grid of severities; the floor must always hold.
        for temp in [-20.0, 0.0, 35.0] {
            for precip in [0.0, 0.5, 1.0] {
                for wind in [0.0, 15.0, 30.0] {
                    for vis in [0.0, 0.5, 1.0] {
                        let w = WeatherConditions {
                            temperature_c: temp,
                            precipitation: precip,
                            wind_speed_mps: wind,
                            visibility: vis,
                            ..Default::default()
                        };
                        let f = w.speed_factor(1.0);
                        assert!((MIN_SPEED_FACTOR..=1.0).contains(&f), "factor {f}");
                    }
                }
            }
        }
    }

    #[test]
    fn more_sensitive_is_slower() {
        let w = WeatherConditions {
            precipitation: 0.8,
            ..Default::default()
        };
        assert!(w.speed_factor(0.9) < w.speed_factor(0.2));
    }
}

#[cfg(test)]
mod factory {
    use ped_core::GeoPoint;

    use crate::{AgentFactory, AgentType, PedSimConfig, WeatherConditions};

    fn od() -> (GeoPoint, GeoPoint) {
        (GeoPoint::new(40.70, -74.00), GeoPoint::new(40.71, -74.01))
    }

    #[test]
    fn ids_increment() {
        let mut f = super::helpers::factory(1);
        let (o, d) = od();
        let a = f.create_agent(o, d, None);
        let b = f.create_agent(o, d, None);
        assert_eq!(b.id.0, a.id.0 + 1);
    }

    #[test]
    fn initial_state() {
        let mut f = super::helpers::factory(1);
        let (o, d) = od();
        let a = f.create_agent(o, d, Some(AgentType::Normal));
        assert_eq!(a.pos, o);
        assert_eq!(a.route, vec![o, d]);
        assert_eq!(a.path_index, 0);
        assert!(!a.at_destination);
        assert!(a.walking_speed_m_min <= a.max_speed_m_min);
    }

    #[test]
    fn base_speed_within_draw_range() {
        let mut f = super::helpers::factory(7);
        let (o, d) = od();
        for _ in 0..200 {
            let a = f.create_agent(o, d, Some(AgentType::Normal));
            // Normal type, clear weather: max == base draw, walking == max.
            assert!((80.0..134.0).contains(&a.max_speed_m_min), "{}", a.max_speed_m_min);
            assert_eq!(a.walking_speed_m_min, a.max_speed_m_min);
        }
    }

    #[test]
    fn accessibility_factor_slows_wheelchair_users() {
        let mut f = super::helpers::factory(7);
        let (o, d) = od();
        for _ in 0..100 {
            let a = f.create_agent(o, d, Some(AgentType::Wheelchair));
            // 0.70 × [80, 134) = [56, 93.8)
            assert!(a.max_speed_m_min < 134.0 * 0.70 + 1e-9);
            assert!(a.max_speed_m_min >= 80.0 * 0.70);
        }
    }

    #[test]
    fn type_distribution_roughly_matches() {
        let mut f = super::helpers::factory(42);
        let (o, d) = od();
        let mut normal = 0usize;
        let mut wheelchair = 0usize;
        let n = 2_000;
        for _ in 0..n {
            match f.create_agent(o, d, None).agent_type {
                AgentType::Normal => normal += 1,
                AgentType::Wheelchair => wheelchair += 1,
                _ => {}
            }
        }
        let normal_share = normal as f64 / n as f64;
        let wheelchair_share = wheelchair as f64 / n as f64;
        assert!((0.70..0.80).contains(&normal_share), "normal {normal_share}");
        assert!((0.02..0.09).contains(&wheelchair_share), "wheelchair {wheelchair_share}");
    }

    #[test]
    fn sensitivity_within_type_band() {
        let mut f = super::helpers::factory(11);
        let (o, d) = od();
        for _ in 0..100 {
            let a = f.create_agent(o, d, Some(AgentType::Wheelchair));
            let (lo, hi) = AgentType::Wheelchair.sensitivity_band();
            assert!((lo..hi).contains(&a.weather_sensitivity));
        }
    }

    #[test]
    fn weather_slows_creation_speed() {
        let config = PedSimConfig {
            weather: WeatherConditions {
                precipitation: 1.0,
                ..Default::default()
            },
            ..PedSimConfig::with_max_agents(10)
        };
        let mut f = AgentFactory::new(&config, 3);
        let (o, d) = od();
        let a = f.create_agent(o, d, Some(AgentType::Elderly));
        assert!(a.walking_speed_m_min < a.max_speed_m_min);
        // Floor property, phrased against the unmodified ceiling.
        assert!(a.walking_speed_m_min >= 0.3 * a.max_speed_m_min);
    }

    #[test]
    fn deterministic_given_seed() {
        let (o, d) = od();
        let mut f1 = super::helpers::factory(99);
        let mut f2 = super::helpers::factory(99);
        for _ in 0..50 {
            let a = f1.create_agent(o, d, None);
            let b = f2.create_agent(o, d, None);
            assert_eq!(a.agent_type, b.agent_type);
            assert_eq!(a.max_speed_m_min, b.max_speed_m_min);
            assert_eq!(a.weather_sensitivity, b.weather_sensitivity);
        }
    }

    #[test]
    fn rush_hour_cuts_speeds_twenty_percent() {
        let (o, d) = od();
        let mut calm = super::helpers::factory(5);
        let mut rush = super::helpers::factory(5);
        let a = calm.create_batch(&[(o, d)], false);
        let b = rush.create_batch(&[(o, d)], true);
        assert_eq!(a.len(), 1);
        assert!((b[0].walking_speed_m_min - 0.8 * a[0].walking_speed_m_min).abs() < 1e-9);
        assert!((b[0].max_speed_m_min - 0.8 * a[0].max_speed_m_min).abs() < 1e-9);
    }
}

#[cfg(test)]
mod trips {
    use ped_core::GeoPoint;

    #[test]
    fn origins_within_radius() {
        let mut f = super::helpers::factory(8);
        let stop = GeoPoint::new(40.7128, -74.0060);
        let trips = f.stop_centric_trips(stop, 50, 500.0);
        assert_eq!(trips.len(), 50);
        for (origin, _) in &trips {
            // Small tolerance for the projection round-trip.
            assert!(stop.distance_m(*origin) <= 505.0);
        }
    }

    #[test]
    fn most_destinations_are_the_stop() {
        let mut f = super::helpers::factory(21);
        let stop = GeoPoint::new(40.7128, -74.0060);
        let trips = f.stop_centric_trips(stop, 400, 800.0);
        let at_stop = trips.iter().filter(|(_, d)| *d == stop).count();
        let share = at_stop as f64 / trips.len() as f64;
        assert!((0.6..0.8).contains(&share), "share {share}");
    }
}

#[cfg(test)]
mod integrate {
    use approx::assert_relative_eq;
    use ped_core::{GeoPoint, Vec2};

    use crate::AgentType;

    #[test]
    fn euler_step_moves_by_velocity() {
        let mut f = super::helpers::factory(2);
        let o = GeoPoint::new(40.70, -74.00);
        let d = GeoPoint::new(40.71, -74.00);
        let mut a = f.create_agent(o, d, Some(AgentType::Normal));
        a.vel = Vec2::new(0.0, 1.5); // due north, 1.5 m/s
        f.integrate(&mut a, 2.0);
        let moved = o.distance_m(a.pos);
        assert_relative_eq!(moved, 3.0, epsilon = 0.05);
        assert_relative_eq!(a.updated_at_secs, 2.0);
        // Heading north: longitude unchanged.
        assert_relative_eq!(a.pos.lon, o.lon, epsilon = 1e-12);
    }

    #[test]
    fn zero_velocity_stays_put() {
        let mut f = super::helpers::factory(2);
        let o = GeoPoint::new(40.70, -74.00);
        let mut a = f.create_agent(o, o, Some(AgentType::Normal));
        f.integrate(&mut a, 1.0);
        assert_eq!(a.pos, o);
    }
}
