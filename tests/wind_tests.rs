use approx::assert_relative_eq;
use proptest::prelude::*;
use tearcloth::params::WindParams;
use tearcloth::{ClothConfig, Mesh, Vec2, WindConfig, WindField};

proptest! {
    #[test]
    fn zero_angle_wind_never_pushes_left(
        x in -5000.0f64..5000.0,
        y in -5000.0f64..5000.0,
        time in 0.0f64..10_000.0,
        strength in 0.0f64..100.0,
        speed in 0.0f64..100.0,
    ) {
        let params = WindParams { enabled: true, angle: 0.0, strength, speed };
        let field = WindField::from_params(&params, &WindConfig::new());
        let force = field.force_at(Vec2::new(x, y), time);
        prop_assert!(force.x >= 0.0);
        prop_assert!(force.y.abs() <= 1e-9);
    }

    #[test]
    fn magnitude_stays_within_twice_strength(
        x in -5000.0f64..5000.0,
        y in -5000.0f64..5000.0,
        time in 0.0f64..10_000.0,
        strength in 0.0f64..1200.0,
    ) {
        let field = WindField::new(1.0, strength, 4.0, 0.002);
        let m = field.magnitude_at(Vec2::new(x, y), time);
        prop_assert!(m >= 0.0);
        prop_assert!(m <= 2.0 * strength + 1e-9);
    }
}

#[test]
fn slider_values_are_scaled() {
    let params = WindParams { enabled: true, angle: 0.0, strength: 20.0, speed: 20.0 };
    let field = WindField::from_params(&params, &WindConfig::new());
    assert_relative_eq!(field.strength, 240.0, epsilon = 1e-9);
    assert_relative_eq!(field.speed, 4.0, epsilon = 1e-6);
    assert_relative_eq!(field.phase_scale, 0.002, epsilon = 1e-9);
}

#[test]
fn wind_only_reaches_free_particles() {
    let mut mesh = Mesh::generate(35.0, None, Vec2::new(1000.0, 800.0), &ClothConfig::new())
        .unwrap();
    let field = WindField::new(0.0f64, 10.0, 1.0, 0.002);
    let pushed = field.apply(&mut mesh, 0.5);
    assert_eq!(pushed, mesh.particle_count() - mesh.cols());

    for p in mesh.particles() {
        if p.pinned {
            assert_eq!(p.acceleration, Vec2::zero());
        } else {
            assert!(p.acceleration.x >= 0.0);
        }
    }
}
