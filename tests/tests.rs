use orbitsim::simulation::catalog::{self, CATALOG_LEN};
use orbitsim::simulation::diagnostics::{energies, speeds, total_angular_momentum, PeriodTracker};
use orbitsim::simulation::units::{
    normalize_mass, to_physical_units, to_simulation_length, UnitScale,
};
use orbitsim::{
    pair_force, pairwise_forces, verlet_integrator, AccelSet, AnchorHalfKick, Body, NVec2,
    NewtonianGravity, Parameters, PhysicalSystem, SimulationSystem, System,
};

/// Two bodies on the x-axis, `dist` apart, both at rest
pub fn two_body_system(dist: f64, m1: f64, m2: f64) -> System {
    System::new(vec![
        Body::new("a", m1, [0.0, 0.0], [0.0, 0.0]),
        Body::new("b", m2, [dist, 0.0], [0.0, 0.0]),
    ])
}

/// Equal-mass circular binary around the origin, separation 1, G = 1
pub fn circular_binary() -> System {
    let v = 0.5_f64.sqrt();
    System::new(vec![
        Body::new("a", 1.0, [-0.5, 0.0], [0.0, -v]),
        Body::new("b", 1.0, [0.5, 0.0], [0.0, v]),
    ])
}

/// Serial gravity in simulation units
pub fn gravity_set() -> AccelSet {
    AccelSet::new().with(NewtonianGravity::simulation_units(false))
}

fn rel_close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * a.abs().max(b.abs())
}

fn mechanical(bodies: &[Body]) -> f64 {
    let (k, p) = energies(bodies, 1.0, false);
    k + p
}

// ==================================================================================
// Catalog tests
// ==================================================================================

#[test]
fn catalog_has_forty_distinct_bodies() {
    let bodies = catalog::solar_system();
    assert_eq!(bodies.len(), CATALOG_LEN);
    assert_eq!(CATALOG_LEN, 40);

    assert_eq!(bodies[0].name, "Sun");
    assert_eq!(bodies[3].name, "Earth");
    assert_eq!(bodies[4].name, "Moon");
    assert_eq!(bodies[6].name, "Jupiter");
    assert_eq!(bodies[7].name, "Io");
    assert_eq!(bodies[10].name, "Callisto");
    assert_eq!(bodies[15].name, "Synthetic1");
    assert_eq!(bodies[39].name, "Synthetic25");

    for b in &bodies {
        assert!(b.m > 0.0, "{} has non-positive mass", b.name);
    }
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            assert_ne!(bodies[i].x, bodies[j].x, "{} and {} coincide", bodies[i].name, bodies[j].name);
        }
    }
}

#[test]
fn catalog_sun_starts_at_rest_at_origin() {
    let sun = &catalog::solar_system()[0];
    assert_eq!(sun.x, NVec2::zeros());
    assert_eq!(sun.v, NVec2::zeros());
}

// ==================================================================================
// Unit rescaling tests
// ==================================================================================

#[test]
fn rescale_round_trip_reproduces_catalog() {
    let scale = UnitScale::solar();
    let original = catalog::solar_system();
    let mut bodies = original.clone();

    to_simulation_length(&mut bodies, &scale);
    normalize_mass(&mut bodies, &scale);
    to_physical_units(&mut bodies, &scale);

    for (a, b) in original.iter().zip(bodies.iter()) {
        assert!(rel_close(a.m, b.m, 1e-9), "{} mass", a.name);
        for k in 0..2 {
            assert!(rel_close(a.x[k], b.x[k], 1e-9), "{} position", a.name);
            assert!(rel_close(a.v[k], b.v[k], 1e-9), "{} velocity", a.name);
        }
    }
}

#[test]
fn typed_round_trip_is_stable_under_repetition() {
    let scale = UnitScale::solar();
    let original = catalog::solar_system();
    let mut phys = PhysicalSystem::new(System::new(original.clone()));

    for _ in 0..100 {
        phys = phys.into_simulation(&scale).into_physical(&scale);
    }

    for (a, b) in original.iter().zip(phys.bodies().iter()) {
        assert!(rel_close(a.m, b.m, 1e-9));
        assert!((a.x - b.x).norm() <= 1e-9 * a.x.norm());
        assert!((a.v - b.v).norm() <= 1e-9 * a.v.norm());
    }
}

#[test]
fn rescaled_earth_is_about_one_au_and_one_speed_unit() {
    let scale = UnitScale::solar();
    let sim = PhysicalSystem::new(System::new(catalog::solar_system())).into_simulation(&scale);
    let earth = &sim.bodies()[3];

    assert!((earth.x.x - 1.0).abs() < 1e-12);
    assert!((earth.m - 5.97237e24 / 1.989e30).abs() < 1e-18);
    // circular speed at 1 AU around one solar mass is 1 when G = 1
    assert!((earth.v.y - 1.0).abs() < 1e-2, "got {}", earth.v.y);
}

#[test]
fn one_year_is_about_two_pi_simulation_units() {
    let scale = UnitScale::solar();
    let year = scale.years_to_sim(1.0);
    assert!(rel_close(year, 2.0 * std::f64::consts::PI, 1e-3), "got {year}");
    assert!(rel_close(scale.sim_to_years(year), 1.0, 1e-12));
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn pair_force_obeys_third_law_exactly() {
    let a = Body::new("a", 0.3, [0.1, -2.7], [0.0, 0.0]);
    let b = Body::new("b", 1.7e-4, [3.3, 0.9], [0.0, 0.0]);

    let f_ab = pair_force(&a, &b, 1.0);
    let f_ba = pair_force(&b, &a, 1.0);
    assert_eq!(f_ab, -f_ba);

    for parallel in [false, true] {
        let forces = pairwise_forces(&[a.clone(), b.clone()], 1.0, parallel);
        assert_eq!(forces[0], -forces[1]);
        assert_eq!(forces[0], f_ab);
    }
}

#[test]
fn gravity_matches_two_body_closed_form() {
    let sys = two_body_system(2.0, 2.0, 3.0);
    let acc = gravity_set().compute_accelerations(&sys);

    // a0 = m2 / d^2 toward body 1, a1 = m1 / d^2 toward body 0
    assert!((acc[0].x - 0.75).abs() < 1e-12);
    assert!((acc[1].x + 0.5).abs() < 1e-12);
    assert_eq!(acc[0].y, 0.0);
    assert_eq!(acc[1].y, 0.0);

    let net = acc[0] * sys.bodies[0].m + acc[1] * sys.bodies[1].m;
    assert!(net.norm() < 1e-12, "Net momentum not zero: {:?}", net);
}

#[test]
fn gravity_inverse_square_law() {
    let acc_r = gravity_set().compute_accelerations(&two_body_system(1.0, 1.0, 1.0));
    let acc_2r = gravity_set().compute_accelerations(&two_body_system(2.0, 1.0, 1.0));

    let ratio = acc_r[0].norm() / acc_2r[0].norm();
    assert!((ratio - 4.0).abs() < 1e-12, "Expected 4x, got {}", ratio);
}

#[test]
fn gravity_parallel_matches_serial_on_catalog() {
    let scale = UnitScale::solar();
    let sim = PhysicalSystem::new(System::new(catalog::solar_system())).into_simulation(&scale);

    let serial = gravity_set().compute_accelerations(sim.as_system());
    let parallel = AccelSet::new()
        .with(NewtonianGravity::simulation_units(true))
        .compute_accelerations(sim.as_system());

    for (s, p) in serial.iter().zip(parallel.iter()) {
        assert!((s - p).norm() <= 1e-12 * s.norm().max(1e-300));
    }
}

#[test]
fn accel_set_sums_terms() {
    let sys = two_body_system(1.0, 1.0, 1.0);
    let single = gravity_set().compute_accelerations(&sys);
    let double = AccelSet::new()
        .with(NewtonianGravity::simulation_units(false))
        .with(NewtonianGravity::simulation_units(false))
        .compute_accelerations(&sys);

    assert_eq!(double[0], single[0] * 2.0);
    assert_eq!(double[1], single[1] * 2.0);
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn verlet_two_bodies_at_rest_fall_toward_each_other() {
    let mut sim = SimulationSystem::new(two_body_system(1.0, 1.0, 1.0));
    let forces = gravity_set();
    let params = Parameters::new(0.01, 1.0);

    verlet_integrator(&mut sim, &forces, &params);
    assert!(sim.bodies()[0].x.x > 0.0);
    assert!(sim.bodies()[1].x.x < 1.0);

    for _ in 0..50 {
        verlet_integrator(&mut sim, &forces, &params);
        assert_eq!(sim.bodies()[0].x.y, 0.0);
        assert_eq!(sim.bodies()[1].x.y, 0.0);
        assert_eq!(sim.bodies()[0].v.y, 0.0);
    }
    assert!((sim.time() - 0.51).abs() < 1e-12);
}

#[test]
fn verlet_conserves_energy_for_star_and_planet() {
    let v = 1.001_f64.sqrt();
    let mut sim = SimulationSystem::new(System::new(vec![
        Body::new("star", 1.0, [0.0, 0.0], [0.0, -1.0e-3 * v]),
        Body::new("planet", 1.0e-3, [1.0, 0.0], [0.0, v]),
    ]));
    let forces = gravity_set();
    let params = Parameters::new(1.0e-3, f64::INFINITY).with_anchor(AnchorHalfKick::Include);

    let e0 = mechanical(sim.bodies());
    for _ in 0..1000 {
        verlet_integrator(&mut sim, &forces, &params);
    }
    let e1 = mechanical(sim.bodies());

    assert!(((e1 - e0) / e0).abs() < 1e-2, "E0 = {e0}, E1000 = {e1}");
}

#[test]
fn verlet_energy_stays_bounded_over_many_orbits() {
    let mut sim = SimulationSystem::new(circular_binary());
    let forces = gravity_set();
    let params = Parameters::new(1.0e-2, f64::INFINITY).with_anchor(AnchorHalfKick::Include);

    let e0 = mechanical(sim.bodies());
    let mut worst: f64 = 0.0;
    // orbital period of the binary is 2 pi / sqrt(2) ~ 4.44, so ~22 orbits
    for _ in 0..10_000 {
        verlet_integrator(&mut sim, &forces, &params);
        worst = worst.max(((mechanical(sim.bodies()) - e0) / e0).abs());
    }
    assert!(worst < 1e-3, "max relative drift {worst}");
}

#[test]
fn verlet_conserves_angular_momentum_of_circular_binary() {
    let mut sim = SimulationSystem::new(circular_binary());
    let forces = gravity_set();
    let params = Parameters::new(1.0e-3, f64::INFINITY).with_anchor(AnchorHalfKick::Include);

    let l0 = total_angular_momentum(sim.bodies(), false);
    assert!((l0 - 0.5_f64.sqrt()).abs() < 1e-12);

    for _ in 0..2000 {
        verlet_integrator(&mut sim, &forces, &params);
        let l = total_angular_momentum(sim.bodies(), false);
        assert!(rel_close(l, l0, 1e-4), "L drifted from {l0} to {l}");
    }
}

#[test]
fn anchor_skip_keeps_only_second_half_kick() {
    let mut sys = two_body_system(1.0, 1.0, 1.0);
    sys.bodies[0].v = NVec2::new(0.0, 0.3);
    let mut sim = SimulationSystem::new(sys);
    let forces = gravity_set();
    let params = Parameters::new(0.01, 1.0).with_anchor(AnchorHalfKick::Skip);
    assert_eq!(Parameters::new(0.01, 1.0).anchor, AnchorHalfKick::Skip);

    verlet_integrator(&mut sim, &forces, &params);
    let a_new = forces.compute_accelerations(sim.as_system());

    // the initial velocity and first half kick of body 0 are dropped
    assert_eq!(sim.bodies()[0].v, 0.5 * 0.01 * a_new[0]);
    // but its position update still used the full initial velocity
    assert!((sim.bodies()[0].x.y - 0.003).abs() < 1e-15);
}

#[test]
fn anchor_include_kicks_body_zero_like_the_rest() {
    let mut sys = two_body_system(1.0, 1.0, 1.0);
    sys.bodies[0].v = NVec2::new(0.0, 0.3);
    let forces = gravity_set();
    let a_old = forces.compute_accelerations(&sys);
    let mut sim = SimulationSystem::new(sys);
    let dt = 0.01;
    let params = Parameters::new(dt, 1.0).with_anchor(AnchorHalfKick::Include);

    verlet_integrator(&mut sim, &forces, &params);
    let a_new = forces.compute_accelerations(sim.as_system());

    let expected = NVec2::new(0.0, 0.3) + 0.5 * dt * a_old[0] + 0.5 * dt * a_new[0];
    assert!((sim.bodies()[0].v - expected).norm() < 1e-15);
    // body 1 is treated identically under both policies
    let expected_1 = 0.5 * dt * a_old[1] + 0.5 * dt * a_new[1];
    assert!((sim.bodies()[1].v - expected_1).norm() < 1e-15);
}

#[test]
fn verlet_with_no_bodies_is_a_no_op() {
    let mut sim = SimulationSystem::new(System::new(Vec::new()));
    verlet_integrator(&mut sim, &gravity_set(), &Parameters::new(0.1, 1.0));
    assert_eq!(sim.time(), 0.0);
}

// ==================================================================================
// Diagnostics tests
// ==================================================================================

#[test]
fn speeds_are_velocity_norms() {
    let bodies = vec![
        Body::new("a", 1.0, [0.0, 0.0], [3.0, 4.0]),
        Body::new("b", 1.0, [1.0, 0.0], [0.0, -2.0]),
    ];
    assert_eq!(speeds(&bodies), vec![5.0, 2.0]);
}

#[test]
fn energies_match_hand_computation() {
    let bodies = vec![
        Body::new("a", 2.0, [0.0, 0.0], [3.0, 4.0]),
        Body::new("b", 3.0, [0.0, 2.0], [1.0, 0.0]),
        Body::new("c", 1.0, [2.0, 0.0], [0.0, 0.0]),
    ];
    let g = 0.5;
    for parallel in [false, true] {
        let (k, p) = energies(&bodies, g, parallel);
        assert!((k - (0.5 * 2.0 * 25.0 + 0.5 * 3.0 * 1.0)).abs() < 1e-12);
        let expected = -g * (2.0 * 3.0 / 2.0 + 2.0 * 1.0 / 2.0 + 3.0 * 1.0 / 8.0_f64.sqrt());
        assert!((p - expected).abs() < 1e-12);
    }
}

#[test]
fn angular_momentum_is_scalar_magnitude_sum() {
    let bodies = vec![
        Body::new("a", 2.0, [3.0, 4.0], [0.0, 1.0]),
        // radial motion still contributes, unlike |r x v|
        Body::new("b", 1.0, [1.0, 0.0], [2.0, 0.0]),
    ];
    assert!((total_angular_momentum(&bodies, false) - (2.0 * 5.0 * 1.0 + 1.0 * 1.0 * 2.0)).abs() < 1e-12);
    assert!((total_angular_momentum(&bodies, true) - 12.0).abs() < 1e-12);
}

#[test]
fn measure_uses_physical_g() {
    let phys = PhysicalSystem::new(System::new(vec![
        Body::new("a", 1.0e24, [0.0, 0.0], [0.0, 0.0]),
        Body::new("b", 1.0e20, [1.0e8, 0.0], [0.0, 1.0e3]),
    ]));
    let g = 6.67430e-11;
    let m = phys.measure(g, true);

    assert!(rel_close(m.kinetic, 0.5 * 1.0e20 * 1.0e6, 1e-12));
    assert!(rel_close(m.potential, -g * 1.0e44 / 1.0e8, 1e-12));
    assert!(rel_close(m.mechanical(), m.kinetic + m.potential, 1e-15));
    assert!(rel_close(m.angular_momentum, 1.0e20 * 1.0e8 * 1.0e3, 1e-12));
}

#[test]
fn period_is_twice_first_negative_time_and_frozen() {
    let dt = 0.25;
    let mut tracker = PeriodTracker::new(2);
    let mut bodies = vec![
        Body::new("crosses", 1.0, [1.0, 0.0], [0.0, 1.0]),
        Body::new("stays", 1.0, [2.0, 1.0], [0.0, 1.0]),
    ];

    for k in 0..12 {
        bodies[0].x.y = match k {
            0 => 0.0,
            3 => -0.1,
            6..=8 => -0.5,
            _ => 0.1,
        };
        tracker.detect(&bodies, k as f64 * dt);
        if k < 3 {
            assert_eq!(tracker.periods()[0], 0.0);
        }
    }

    assert_eq!(tracker.periods()[0], 2.0 * (3.0 * dt));
    assert_eq!(tracker.periods()[1], 0.0);
}

#[test]
fn period_detected_at_time_zero_stays_zero_until_next_negative() {
    let mut tracker = PeriodTracker::new(1);
    let bodies = vec![Body::new("below", 1.0, [1.0, -1.0], [0.0, 1.0])];

    tracker.detect(&bodies, 0.0);
    assert_eq!(tracker.periods()[0], 0.0);
    tracker.detect(&bodies, 0.5);
    assert_eq!(tracker.periods()[0], 1.0);
    tracker.detect(&bodies, 1.0);
    assert_eq!(tracker.into_periods(), vec![1.0]);
}
