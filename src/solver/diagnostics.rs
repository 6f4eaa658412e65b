use crate::field::{idx, Field};

/// Discrete divergence at interior cell `(j, i)`, same stencil and scale as
/// the projection step: `-0.5/N * (dvx/dx + dvy/dy)`.
#[inline]
fn cell_divergence(vx: &Field, vy: &Field, j: usize, i: usize) -> f32 {
    let n = vx.rows();
    -0.5 / n as f32
        * (vx[idx(j, i + 1, n)] - vx[idx(j, i - 1, n)] + vy[idx(j + 1, i, n)] - vy[idx(j - 1, i, n)])
}

fn interior_divergence<'a>(vx: &'a Field, vy: &'a Field) -> impl Iterator<Item = f32> + 'a {
    assert!(vx.is_square() && vx.is_shape_equal(vy), "divergence: shape mismatch");
    let n = vx.rows();
    (1..n.saturating_sub(1))
        .flat_map(move |j| (1..n - 1).map(move |i| (j, i)))
        .map(move |(j, i)| cell_divergence(vx, vy, j, i).abs())
}

/// Sum of |divergence| over interior cells.
pub fn total_divergence(vx: &Field, vy: &Field) -> f32 {
    interior_divergence(vx, vy).sum()
}

/// Largest |divergence| over interior cells.
pub fn max_divergence(vx: &Field, vy: &Field) -> f32 {
    interior_divergence(vx, vy).fold(0.0, f32::max)
}

/// Sum of density over interior cells.
pub fn total_density(d: &Field) -> f32 {
    let n = d.rows();
    let mut sum = 0.0;
    for j in 1..n.saturating_sub(1) {
        for i in 1..(n - 1) {
            sum += d[idx(j, i, n)];
        }
    }
    sum
}

/// Volume-averaged kinetic energy over interior cells: KE = 0.5 * <vx² + vy²>.
pub fn kinetic_energy(vx: &Field, vy: &Field) -> f32 {
    let n = vx.rows();
    let mut sum = 0.0;
    let mut count = 0usize;
    for j in 1..n.saturating_sub(1) {
        for i in 1..(n - 1) {
            let ii = idx(j, i, n);
            sum += vx[ii] * vx[ii] + vy[ii] * vy[ii];
            count += 1;
        }
    }
    if count > 0 { 0.5 * sum / count as f32 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    const N: usize = 10;

    #[test]
    fn test_divergence_zero_for_uniform_flow() {
        let mut vx = Field::new(N, N).unwrap();
        let mut vy = Field::new(N, N).unwrap();
        vx.fill(3.0);
        vy.fill(-1.0);
        assert_eq!(total_divergence(&vx, &vy), 0.0);
        assert_eq!(max_divergence(&vx, &vy), 0.0);
    }

    #[test]
    fn test_divergence_of_point_impulse() {
        // vx impulse at (5,5): cells (5,4) and (5,6) see |0.5/N * 100| each.
        let mut vx = Field::new(N, N).unwrap();
        let vy = Field::new(N, N).unwrap();
        *vx.at_mut(5, 5) = 100.0;
        let expected = 0.5 / N as f32 * 100.0;
        assert!((max_divergence(&vx, &vy) - expected).abs() < 1e-5);
        assert!((total_divergence(&vx, &vy) - 2.0 * expected).abs() < 1e-5);
    }

    #[test]
    fn test_total_density_skips_border() {
        let mut d = Field::new(N, N).unwrap();
        d.fill(1.0);
        assert_eq!(total_density(&d), ((N - 2) * (N - 2)) as f32);
    }

    #[test]
    fn test_kinetic_energy_zero() {
        let vx = Field::new(N, N).unwrap();
        let vy = Field::new(N, N).unwrap();
        assert_eq!(kinetic_energy(&vx, &vy), 0.0);
    }

    #[test]
    fn test_kinetic_energy_uniform_flow() {
        let mut vx = Field::new(N, N).unwrap();
        let vy = Field::new(N, N).unwrap();
        vx.fill(1.0);
        let ke = kinetic_energy(&vx, &vy);
        assert!((ke - 0.5).abs() < 1e-6, "KE should be 0.5, got {}", ke);
    }
}
