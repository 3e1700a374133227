use bevy::math::{Vec2, Vec3};

pub type Real = f32;

pub type Vector = Vec3;
pub type Point2 = Vec2;

#[inline(always)]
pub fn zero_vector() -> Vector {
    Vec3::ZERO
}

/// Exact zero check inverse (prevents NaN from division by zero)
#[inline(always)]
pub fn inv_exact(e: Real) -> Real {
    if e == 0.0 { 0.0 } else { 1.0 / e }
}

/// Unit normal of the plane spanned by `a` and `b`, or zero when they are parallel.
#[inline(always)]
pub fn unit_cross(a: Vector, b: Vector) -> Vector {
    a.cross(b).normalize_or_zero()
}

#[inline]
fn hash_lattice(x: i32, y: i32) -> Real {
    let mut h = (x as u32).wrapping_mul(0x8da6_b343) ^ (y as u32).wrapping_mul(0xd816_3841);
    h ^= h >> 13;
    h = h.wrapping_mul(0x5bd1_e995);
    h ^= h >> 15;
    (h & 0x00ff_ffff) as Real / 0x00ff_ffff as Real
}

#[inline(always)]
fn smoothstep(t: Real) -> Real {
    t * t * (3.0 - 2.0 * t)
}

/// Smooth 2D value noise in `[0, 1]`.
///
/// Continuous in both arguments, so sampling it along a time curve gives a
/// gust signal without jumps.
pub fn value_noise(x: Real, y: Real) -> Real {
    let x0 = x.floor();
    let y0 = y.floor();
    let (ix, iy) = (x0 as i32, y0 as i32);
    let tx = smoothstep(x - x0);
    let ty = smoothstep(y - y0);

    let bottom = hash_lattice(ix, iy) + (hash_lattice(ix + 1, iy) - hash_lattice(ix, iy)) * tx;
    let top = hash_lattice(ix, iy + 1)
        + (hash_lattice(ix + 1, iy + 1) - hash_lattice(ix, iy + 1)) * tx;
    bottom + (top - bottom) * ty
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inv_exact_guards_zero() {
        assert_eq!(inv_exact(0.0), 0.0);
        assert_eq!(inv_exact(4.0), 0.25);
    }

    #[test]
    fn value_noise_stays_in_unit_range() {
        for step in 0..500 {
            let t = step as Real * 0.037;
            let n = value_noise(3.0 * t, t);
            assert!((0.0..=1.0).contains(&n), "noise {} out of range at t={}", n, t);
        }
    }

    #[test]
    fn value_noise_is_continuous() {
        let a = value_noise(1.2345, 0.5);
        let b = value_noise(1.2346, 0.5);
        assert!((a - b).abs() < 1e-3);
    }

    #[test]
    fn unit_cross_of_parallel_vectors_is_zero() {
        assert_eq!(unit_cross(Vec3::X, Vec3::X * 2.0), Vec3::ZERO);
        assert_eq!(unit_cross(Vec3::X, Vec3::Y), Vec3::Z);
    }
}
