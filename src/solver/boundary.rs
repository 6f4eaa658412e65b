use crate::field::{idx, Field};

/// Physical role of a field, selects the wall condition in [`set_bnd`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Scalar,
    Vx,
    Vy,
}

/// Closed-box boundary conditions on the 1-cell outer ring.
///   - `FieldType::Scalar`: zero-gradient (copy interior neighbour) on all walls
///   - `FieldType::Vx`: negated on left/right walls, copied on top/bottom
///   - `FieldType::Vy`: negated on top/bottom walls, copied on left/right
///
/// Corners take the average of their two edge neighbours, after the edges.
pub fn set_bnd(field_type: FieldType, x: &mut Field) {
    assert!(
        !x.is_empty() && x.is_square(),
        "boundary needs a non-empty square field, got {}x{}",
        x.rows(),
        x.cols()
    );
    let n = x.rows();
    let sx = if field_type == FieldType::Vx { -1.0 } else { 1.0 };
    let sy = if field_type == FieldType::Vy { -1.0 } else { 1.0 };

    // Left/Right walls
    for j in 1..(n - 1) {
        x[idx(j, 0, n)] = sx * x[idx(j, 1, n)];
        x[idx(j, n - 1, n)] = sx * x[idx(j, n - 2, n)];
    }

    // Top/Bottom walls
    for i in 1..(n - 1) {
        x[idx(0, i, n)] = sy * x[idx(1, i, n)];
        x[idx(n - 1, i, n)] = sy * x[idx(n - 2, i, n)];
    }

    x[idx(0, 0, n)] = 0.5 * (x[idx(0, 1, n)] + x[idx(1, 0, n)]);
    x[idx(n - 1, 0, n)] = 0.5 * (x[idx(n - 1, 1, n)] + x[idx(n - 2, 0, n)]);
    x[idx(0, n - 1, n)] = 0.5 * (x[idx(0, n - 2, n)] + x[idx(1, n - 1, n)]);
    x[idx(n - 1, n - 1, n)] = 0.5 * (x[idx(n - 1, n - 2, n)] + x[idx(n - 2, n - 1, n)]);
}
