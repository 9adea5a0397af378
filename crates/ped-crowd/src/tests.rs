//! Unit tests for ped-crowd.

#[cfg(test)]
mod helpers {
    use ped_agent::{AgentFactory, AgentType, PedSimConfig, PedestrianAgent};
    use ped_core::GeoPoint;

    /// Agent at `pos` walking toward a point well north of it.
    pub fn agent_at(factory: &mut AgentFactory, pos: GeoPoint) -> PedestrianAgent {
        let dest = GeoPoint::new(pos.lat + 0.01, pos.lon);
        factory.create_agent(pos, dest, Some(AgentType::Normal))
    }

    pub fn factory() -> AgentFactory {
        AgentFactory::new(&PedSimConfig::with_max_agents(100), 17)
    }
}

#[cfg(test)]
mod flocking {
    use ped_agent::CrowdParams;
    use ped_core::{GeoPoint, Vec2};

    use crate::CrowdModel;

    #[test]
    fn no_neighbors_no_force() {
        let mut f = super::helpers::factory();
        let a = super::helpers::agent_at(&mut f, GeoPoint::new(40.70, -74.00));
        let model = CrowdModel::new(CrowdParams::default());
        assert_eq!(model.flocking_force(&a, &[a.clone()]), Vec2::ZERO);
    }

    #[test]
    fn separation_pushes_apart() {
        let mut f = super::helpers::factory();
        let a = super::helpers::agent_at(&mut f, GeoPoint::new(40.70, -74.00));
        // ~1.1 m due north of `a`, inside the 2 m separation radius.
        let b = super::helpers::agent_at(&mut f, GeoPoint::new(40.70001, -74.00));
        let model = CrowdModel::new(CrowdParams::default());
        let force = model.flocking_force(&a, &[a.clone(), b]);
        // Neighbour is north; net push must have a southward component.
        assert!(force.y < 0.0, "{force}");
    }

    #[test]
    fn alignment_matches_neighbor_heading() {
        let mut f = super::helpers::factory();
        let a = super::helpers::agent_at(&mut f, GeoPoint::new(40.70, -74.00));
        // ~3.3 m away: outside separation, inside alignment radius.
        let mut b = super::helpers::agent_at(&mut f, GeoPoint::new(40.70003, -74.00));
        b.vel = Vec2::new(1.0, 0.0); // heading east
        let model = CrowdModel::new(CrowdParams::default());
        let force = model.flocking_force(&a, &[a.clone(), b]);
        // `a` is stationary; steering toward an eastbound mean velocity
        // must point east, and cohesion only adds a north/south component.
        assert!(force.x > 0.0, "{force}");
    }

    #[test]
    fn cohesion_pulls_toward_group() {
        let mut f = super::helpers::factory();
        let a = super::helpers::agent_at(&mut f, GeoPoint::new(40.70, -74.00));
        // ~6.6 m north: only the cohesion radius sees this neighbour.
        let b = super::helpers::agent_at(&mut f, GeoPoint::new(40.70006, -74.00));
        let model = CrowdModel::new(CrowdParams::default());
        let force = model.flocking_force(&a, &[a.clone(), b]);
        assert!(force.y > 0.0, "{force}");
    }

    #[test]
    fn force_is_clamped() {
        let mut f = super::helpers::factory();
        let a = super::helpers::agent_at(&mut f, GeoPoint::new(40.70, -74.00));
        let mut crowd = vec![a.clone()];
        for i in 1..20 {
            let offset = 1e-5 * i as f64;
            crowd.push(super::helpers::agent_at(
                &mut f,
                GeoPoint::new(40.70 + offset, -74.00),
            ));
        }
        let params = CrowdParams::default();
        let model = CrowdModel::new(params);
        let force = model.flocking_force(&a, &crowd);
        assert!(force.length() <= params.max_force + 1e-9);
    }
}

#[cfg(test)]
mod goal {
    use ped_agent::CrowdParams;
    use ped_core::{GeoPoint, Vec2};

    use crate::CrowdModel;

    #[test]
    fn seeks_current_waypoint() {
        let mut f = super::helpers::factory();
        let mut a = super::helpers::agent_at(&mut f, GeoPoint::new(40.70, -74.00));
        let model = CrowdModel::new(CrowdParams::default());
        let force = model.goal_force(&mut a);
        // First waypoint is the origin itself: within the arrival radius,
        // so the index advances and the force aims at the destination north.
        assert_eq!(a.path_index, 1);
        assert!(force.y > 0.0, "{force}");
        assert!(!a.at_destination);
    }

    #[test]
    fn path_index_is_monotone() {
        let mut f = super::helpers::factory();
        let mut a = super::helpers::agent_at(&mut f, GeoPoint::new(40.70, -74.00));
        let model = CrowdModel::new(CrowdParams::default());
        let mut last = a.path_index;
        for _ in 0..5 {
            model.goal_force(&mut a);
            assert!(a.path_index >= last);
            last = a.path_index;
        }
    }

    #[test]
    fn arrival_is_sticky() {
        let mut f = super::helpers::factory();
        let pos = GeoPoint::new(40.70, -74.00);
        let mut a = f.create_agent(pos, pos, Some(ped_agent::AgentType::Normal));
        let model = CrowdModel::new(CrowdParams::default());

        // Route is [pos, pos]; both waypoints are within the radius.
        assert_eq!(model.goal_force(&mut a), Vec2::ZERO);
        // One call may be needed per waypoint.
        model.goal_force(&mut a);
        assert!(a.at_destination);

        // Teleport far away: arrival must not be reconsidered.
        a.pos = GeoPoint::new(40.80, -74.00);
        assert_eq!(model.goal_force(&mut a), Vec2::ZERO);
        assert!(a.at_destination);
    }

    #[test]
    fn empty_route_terminates() {
        let mut f = super::helpers::factory();
        let mut a = super::helpers::agent_at(&mut f, GeoPoint::new(40.70, -74.00));
        a.route.clear();
        a.path_index = 0;
        let model = CrowdModel::new(CrowdParams::default());
        assert_eq!(model.goal_force(&mut a), Vec2::ZERO);
        assert!(a.at_destination);
    }
}

#[cfg(test)]
mod metrics {
    use approx::assert_relative_eq;
    use ped_core::{GeoPoint, Vec2};

    use crate::{CrowdMetrics, crowd_metrics};

    #[test]
    fn empty_region_is_all_zero() {
        let center = GeoPoint::new(40.70, -74.00);
        assert_eq!(crowd_metrics(&[], center, 50.0), CrowdMetrics::default());
    }

    #[test]
    fn counts_only_agents_inside() {
        let mut f = super::helpers::factory();
        let center = GeoPoint::new(40.70, -74.00);
        let near = super::helpers::agent_at(&mut f, GeoPoint::new(40.70001, -74.00));
        let far = super::helpers::agent_at(&mut f, GeoPoint::new(40.71, -74.00));
        let m = crowd_metrics(&[near, far], center, 50.0);
        let area = std::f64::consts::PI * 50.0 * 50.0;
        assert_relative_eq!(m.density, 1.0 / area, epsilon = 1e-12);
    }

    #[test]
    fn stationary_crowd_is_congested() {
        let mut f = super::helpers::factory();
        let center = GeoPoint::new(40.70, -74.00);
        let agents: Vec<_> = (0..5)
            .map(|i| {
                super::helpers::agent_at(&mut f, GeoPoint::new(40.70 + 1e-6 * i as f64, -74.00))
            })
            .collect();
        // Zero velocity everywhere: the speed term pins congestion at 1.
        let m = crowd_metrics(&agents, center, 20.0);
        assert_relative_eq!(m.average_speed_m_min, 0.0);
        assert_relative_eq!(m.congestion, 1.0);
        assert_relative_eq!(m.flow_rate_per_min, 0.0);
    }

    #[test]
    fn free_flow_is_uncongested() {
        let mut f = super::helpers::factory();
        let center = GeoPoint::new(40.70, -74.00);
        let mut a = super::helpers::agent_at(&mut f, center);
        a.vel = Vec2::new(0.0, 80.0 / 60.0); // 80 m/min, free flow
        let m = crowd_metrics(&[a], center, 50.0);
        assert_relative_eq!(m.average_speed_m_min, 80.0, epsilon = 1e-9);
        // Density term is tiny, speed term is zero.
        assert!(m.congestion < 0.01, "{}", m.congestion);
    }

    #[test]
    fn flow_is_density_times_speed() {
        let mut f = super::helpers::factory();
        let center = GeoPoint::new(40.70, -74.00);
        let mut a = super::helpers::agent_at(&mut f, center);
        a.vel = Vec2::new(1.0, 0.0);
        let m = crowd_metrics(&[a], center, 30.0);
        assert_relative_eq!(m.flow_rate_per_min, m.density * 60.0, epsilon = 1e-12);
    }
}
