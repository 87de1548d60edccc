//! Built-in initial conditions, SI units
//!
//! The Sun at rest at the origin, the eight planets and Pluto on the positive
//! x-axis moving toward +y, the Moon beside the Earth, the four Galilean moons
//! on circular orbits around Jupiter, and 25 synthetic outer bodies.

use std::f64::consts::PI;

use crate::simulation::states::Body;
use crate::simulation::units::{AU, G_SI, SOLAR_MASS};

const JUPITER_MASS: f64 = 1.8982e27;
const JUPITER_ORBIT: f64 = 5.2 * AU;
const JUPITER_SPEED: f64 = 13070.0;

/// (name, mass kg, orbital radius AU, speed m/s)
const PLANETS: [(&str, f64, f64, f64); 9] = [
    ("Mercury", 3.3011e23, 0.39, 47400.0),
    ("Venus", 4.8675e24, 0.72, 35020.0),
    ("Earth", 5.97237e24, 1.0, 29780.0),
    ("Mars", 6.4171e23, 1.52, 24070.0),
    ("Jupiter", JUPITER_MASS, 5.2, JUPITER_SPEED),
    ("Saturn", 5.6834e26, 9.58, 9680.0),
    ("Uranus", 8.6810e25, 19.22, 6800.0),
    ("Neptune", 1.02413e26, 30.05, 5430.0),
    ("Pluto", 1.30900e22, 39.48, 4748.0),
];

/// (name, mass kg, distance from Jupiter m, phase angle rad)
const GALILEAN_MOONS: [(&str, f64, f64, f64); 4] = [
    ("Io", 8.9319e22, 421_700_000.0, 0.0),
    ("Europa", 4.7998e22, 671_100_000.0, PI / 2.0),
    ("Ganymede", 1.4819e23, 1_070_400_000.0, PI),
    ("Callisto", 1.0759e23, 1_882_700_000.0, 3.0 * PI / 2.0),
];

/// (mass kg, orbital radius AU, speed m/s)
const SYNTHETIC: [(f64, f64, f64); 25] = [
    (2.5e24, 45.0, 4000.0),
    (3.0e24, 50.0, 3500.0),
    (1.5e24, 55.0, 3000.0),
    (2.0e24, 60.0, 2500.0),
    (1.8e24, 65.0, 2000.0),
    (2.2e24, 70.0, 1500.0),
    (1.9e24, 75.0, 1000.0),
    (2.1e24, 80.0, 900.0),
    (2.3e24, 85.0, 800.0),
    (2.4e24, 90.0, 700.0),
    (2.6e24, 95.0, 600.0),
    (2.7e24, 100.0, 500.0),
    (2.8e24, 105.0, 400.0),
    (2.9e24, 110.0, 300.0),
    (3.1e24, 115.0, 200.0),
    (3.2e24, 120.0, 100.0),
    (3.3e24, 125.0, 50.0),
    (3.4e24, 130.0, 25.0),
    (3.5e24, 135.0, 10.0),
    (3.6e24, 140.0, 5.0),
    (3.7e24, 145.0, 2.0),
    (3.8e24, 150.0, 1.0),
    (3.9e24, 155.0, 0.5),
    (4.0e24, 160.0, 0.2),
    (4.1e24, 165.0, 0.1),
];

const MOON_MASS: f64 = 7.34767309e22;
const MOON_DISTANCE: f64 = 384_400_000.0;
const MOON_SPEED: f64 = 1022.0;

/// Number of bodies in [`solar_system`]
pub const CATALOG_LEN: usize = 1 + PLANETS.len() + 1 + GALILEAN_MOONS.len() + SYNTHETIC.len();

fn on_x_axis(name: &str, m: f64, r_au: f64, speed: f64) -> Body {
    Body::new(name, m, [r_au * AU, 0.0], [0.0, speed])
}

/// A Galilean moon on a circular orbit around Jupiter, offset by Jupiter's
/// own position and velocity.
fn galilean_moon(name: &str, m: f64, r: f64, phase: f64) -> Body {
    let v_circ = (G_SI * JUPITER_MASS / r).sqrt();
    Body::new(
        name,
        m,
        [JUPITER_ORBIT + r * phase.cos(), r * phase.sin()],
        [-v_circ * phase.sin(), v_circ * phase.cos() + JUPITER_SPEED],
    )
}

/// The default body set, index 0 is the Sun.
pub fn solar_system() -> Vec<Body> {
    let mut bodies = Vec::with_capacity(CATALOG_LEN);
    bodies.push(Body::new("Sun", SOLAR_MASS, [0.0, 0.0], [0.0, 0.0]));

    for &(name, m, r, speed) in &PLANETS {
        bodies.push(on_x_axis(name, m, r, speed));
        match name {
            // the Moon follows the Earth, the Galilean moons follow Jupiter
            "Earth" => bodies.push(Body::new(
                "Moon",
                MOON_MASS,
                [AU + MOON_DISTANCE, 0.0],
                [0.0, speed + MOON_SPEED],
            )),
            "Jupiter" => {
                for &(moon, m, r, phase) in &GALILEAN_MOONS {
                    bodies.push(galilean_moon(moon, m, r, phase));
                }
            }
            _ => {}
        }
    }

    for (i, &(m, r, speed)) in SYNTHETIC.iter().enumerate() {
        bodies.push(on_x_axis(&format!("Synthetic{}", i + 1), m, r, speed));
    }

    bodies
}
