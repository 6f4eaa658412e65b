use crate::error::{SimError, SimResult};
use crate::field::Field;

/// Smallest supported grid side length.
pub const MIN_GRID: usize = 10;

/// The six square fields of one simulation, allocated once.
///
/// `vx0`, `vy0` and `density0` are scratch: every tick overwrites them, so
/// their contents between ticks carry no meaning.
#[derive(Clone, Debug)]
pub struct SimState {
    pub n: usize,
    pub vx: Field,
    pub vy: Field,
    pub vx0: Field,
    pub vy0: Field,
    pub density: Field,
    pub density0: Field,
}

impl SimState {
    pub fn new(n: usize) -> SimResult<Self> {
        if n < MIN_GRID {
            return Err(SimError::GridTooSmall { size: n, min: MIN_GRID });
        }
        Ok(Self {
            n,
            vx: Field::new(n, n)?,
            vy: Field::new(n, n)?,
            vx0: Field::new(n, n)?,
            vy0: Field::new(n, n)?,
            density: Field::new(n, n)?,
            density0: Field::new(n, n)?,
        })
    }

    /// All six fields, for whole-state checks.
    pub fn fields(&self) -> [&Field; 6] {
        [&self.vx, &self.vy, &self.vx0, &self.vy0, &self.density, &self.density0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_allocates_square_zeroed_fields() {
        let s = SimState::new(12).unwrap();
        for f in s.fields() {
            assert_eq!(f.rows(), 12);
            assert_eq!(f.cols(), 12);
            assert!(f.as_slice().iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn test_new_rejects_small_grid() {
        assert!(matches!(
            SimState::new(9),
            Err(SimError::GridTooSmall { size: 9, min: 10 })
        ));
        assert!(SimState::new(MIN_GRID).is_ok());
    }
}
