use crate::field::{idx, Field};
use super::boundary::{set_bnd, FieldType};

/// Panics unless `x` is a non-empty square field and every other field
/// has the same shape.
fn assert_square_compatible(op: &str, x: &Field, others: &[&Field]) {
    assert!(
        !x.is_empty() && x.is_square(),
        "{op}: expected a non-empty square field, got {}x{}",
        x.rows(),
        x.cols()
    );
    for other in others {
        assert!(
            x.is_shape_equal(other),
            "{op}: shape mismatch {}x{} vs {}x{}",
            x.rows(),
            x.cols(),
            other.rows(),
            other.cols()
        );
    }
}

/// Gauss-Seidel iterative linear solver.
/// Solves: x[j,i] = (x0[j,i] + a * (neighbors)) / c
///
/// Updates happen in place, so each cell sees neighbours already relaxed
/// earlier in the same sweep. Boundaries are re-imposed after every sweep.
pub fn lin_solve(field_type: FieldType, x: &mut Field, x0: &Field, a: f32, c: f32, iter: usize) {
    assert_square_compatible("lin_solve", x, &[x0]);
    let n = x.rows();
    let c_inv = 1.0 / c;
    for _ in 0..iter {
        for j in 1..(n - 1) {
            for i in 1..(n - 1) {
                let neighbors = x[idx(j, i - 1, n)]
                    + x[idx(j, i + 1, n)]
                    + x[idx(j - 1, i, n)]
                    + x[idx(j + 1, i, n)];
                x[idx(j, i, n)] = (x0[idx(j, i, n)] + a * neighbors) * c_inv;
            }
        }
        set_bnd(field_type, x);
    }
}

/// Implicit diffusion step: spreads `x0` over time into `x`.
/// a = dt * diff * (N-2)^2, c = 1 + 4a
///
/// `x` is the destination (its previous contents only seed the solver),
/// `x0` is read-only.
pub fn diffuse(field_type: FieldType, x: &mut Field, x0: &Field, diff: f32, dt: f32, iter: usize) {
    assert_square_compatible("diffuse", x, &[x0]);
    let n2 = (x.rows() - 2) as f32;
    let a = dt * diff * n2 * n2;
    let c = 1.0 + 4.0 * a;
    lin_solve(field_type, x, x0, a, c, iter);
}

/// Semi-Lagrangian advection: traces each cell backwards through the
/// velocity field and resamples `d0` bilinearly at the departure point.
pub fn advect(field_type: FieldType, d: &mut Field, d0: &Field, vx: &Field, vy: &Field, dt: f32) {
    assert_square_compatible("advect", d, &[d0, vx, vy]);
    let n = d.rows();
    let dt0 = dt * (n - 2) as f32;
    let n_f = n as f32;

    for j in 1..(n - 1) {
        for i in 1..(n - 1) {
            let ii = idx(j, i, n);
            // Trace backwards, clamped so the stencil stays on the grid
            let x = (i as f32 - dt0 * vx[ii]).clamp(0.5, n_f + 0.5);
            let y = (j as f32 - dt0 * vy[ii]).clamp(0.5, n_f + 0.5);

            let i0 = x.floor();
            let j0 = y.floor();
            let s1 = x - i0;
            let s0 = 1.0 - s1;
            let t1 = y - j0;
            let t0 = 1.0 - t1;

            let (i0, j0) = (i0 as i32, j0 as i32);
            let (i1, j1) = (i0 + 1, j0 + 1);
            d[ii] = s0 * (t0 * d0.at(j0, i0) + t1 * d0.at(j1, i0))
                + s1 * (t0 * d0.at(j0, i1) + t1 * d0.at(j1, i1));
        }
    }
    set_bnd(field_type, d);
}

/// Pressure projection: enforces incompressibility (divergence-free velocity field).
///
/// `p` and `div` are scratch; their contents on entry are ignored.
pub fn project(vx: &mut Field, vy: &mut Field, p: &mut Field, div: &mut Field, iter: usize) {
    assert_square_compatible("project", vx, &[vy, p, div]);
    let n = vx.rows();
    let n_f = n as f32;
    let h = 1.0 / n_f;

    // Calculate divergence
    for j in 1..(n - 1) {
        for i in 1..(n - 1) {
            div[idx(j, i, n)] = -0.5
                * h
                * (vx[idx(j, i + 1, n)] - vx[idx(j, i - 1, n)]
                    + vy[idx(j + 1, i, n)] - vy[idx(j - 1, i, n)]);
            p[idx(j, i, n)] = 0.0;
        }
    }
    set_bnd(FieldType::Scalar, div);
    set_bnd(FieldType::Scalar, p);

    // Solve for pressure
    lin_solve(FieldType::Scalar, p, div, 1.0, 4.0, iter);

    // Subtract pressure gradient from velocity
    for j in 1..(n - 1) {
        for i in 1..(n - 1) {
            vx[idx(j, i, n)] -= 0.5 * n_f * (p[idx(j, i + 1, n)] - p[idx(j, i - 1, n)]);
            vy[idx(j, i, n)] -= 0.5 * n_f * (p[idx(j + 1, i, n)] - p[idx(j - 1, i, n)]);
        }
    }
    set_bnd(FieldType::Vx, vx);
    set_bnd(FieldType::Vy, vy);
}
