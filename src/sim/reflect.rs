//! Reflection math

use glam::Vec3;

/// Reflect a direction off a surface with unit normal `normal`
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect(v: Vec3, normal: Vec3) -> Vec3 {
    v - 2.0 * v.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reflect_head_on() {
        // Moving +X, hits a wall facing -X
        let reflected = reflect(Vec3::X, Vec3::NEG_X);
        assert_eq!(reflected, Vec3::NEG_X);
    }

    #[test]
    fn test_reflect_oblique() {
        // 45° onto a floor bounces back up at 45°
        let v = Vec3::new(1.0, -1.0, 0.0).normalize();
        let reflected = reflect(v, Vec3::Y);
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((reflected - expected).length() < 1e-6);
    }

    #[test]
    fn test_reflect_parallel_to_surface_is_unchanged() {
        let v = Vec3::new(0.0, 0.0, 3.0);
        assert_eq!(reflect(v, Vec3::X), v);
    }

    #[test]
    fn test_reflect_preserves_length() {
        let v = Vec3::new(0.3, -2.0, 1.5);
        let n = Vec3::new(1.0, 2.0, -0.5).normalize();
        assert!((reflect(v, n).length() - v.length()).abs() < 1e-5);
    }

    fn unit_vector() -> impl Strategy<Value = Vec3> {
        (-1.0f32..1.0, -1.0f32..1.0, -1.0f32..1.0)
            .prop_filter("needs a usable length", |(x, y, z)| {
                Vec3::new(*x, *y, *z).length_squared() > 0.01
            })
            .prop_map(|(x, y, z)| Vec3::new(x, y, z).normalize())
    }

    proptest! {
        #[test]
        fn reflecting_twice_returns_original(
            n in unit_vector(),
            x in -100.0f32..100.0,
            y in -100.0f32..100.0,
            z in -100.0f32..100.0,
        ) {
            let v = Vec3::new(x, y, z);
            let back = reflect(reflect(v, n), n);
            let tolerance = 1e-4 * v.length().max(1.0);
            prop_assert!((back - v).length() <= tolerance, "{v} -> {back}");
        }
    }
}
