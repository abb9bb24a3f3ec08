//! Closed-form point distributions for particle fields and instanced meshes.
//!
//! Every generator produces exactly `count` points in one pass.

use std::f64::consts::TAU;

use rand::Rng;

use crate::foundation::core::Vec3;

/// Uniformly distributed points on a sphere surface.
///
/// Uses the cylindrical projection: z uniform in `[-1, 1]` and azimuth
/// uniform in `[0, 2π)` give a uniform density on the sphere.
pub fn sphere_surface<R: Rng>(rng: &mut R, count: usize, radius: f64) -> Vec<Vec3> {
    (0..count)
        .map(|_| unit_sphere_point(rng) * radius)
        .collect()
}

/// Uniformly distributed points inside a ball.
pub fn sphere_volume<R: Rng>(rng: &mut R, count: usize, radius: f64) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            let r = radius * rng.random::<f64>().cbrt();
            unit_sphere_point(rng) * r
        })
        .collect()
}

fn unit_sphere_point<R: Rng>(rng: &mut R) -> Vec3 {
    let z: f64 = rng.random_range(-1.0..=1.0);
    let phi: f64 = rng.random_range(0.0..TAU);
    let rxy = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(rxy * phi.cos(), rxy * phi.sin(), z)
}

/// Lattice of `cols × rows × layers` points centered on the origin.
pub fn grid(cols: usize, rows: usize, layers: usize, spacing: f64) -> Vec<Vec3> {
    let center = |n: usize, i: usize| (i as f64 - (n.saturating_sub(1)) as f64 / 2.0) * spacing;
    let mut out = Vec::with_capacity(cols * rows * layers);
    for z in 0..layers {
        for y in 0..rows {
            for x in 0..cols {
                out.push(Vec3::new(
                    center(cols, x),
                    center(rows, y),
                    center(layers, z),
                ));
            }
        }
    }
    out
}

/// `count` points evenly spaced on a circle in the XY plane.
pub fn ring(count: usize, radius: f64) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let a = TAU * i as f64 / count as f64;
            Vec3::new(radius * a.cos(), radius * a.sin(), 0.0)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/points.rs"]
mod tests;
