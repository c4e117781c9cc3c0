use std::fmt;

// ---------------------------------------------------------------------------
// Episode termination
// ---------------------------------------------------------------------------

/// World axis, used to report which bound was crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Why an episode ended. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Elapsed time reached the configured runtime.
    TimeLimit,
    /// Position left the flight volume along `axis`.
    OutOfBounds { axis: Axis },
    /// Reached the ground plane; velocities were zeroed.
    GroundContact,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::TimeLimit => write!(f, "time limit"),
            Termination::OutOfBounds { axis } => write!(f, "out of bounds ({axis:?})"),
            Termination::GroundContact => write!(f, "ground contact"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_indices_match_vector_layout() {
        let idx: Vec<usize> = Axis::ALL.iter().map(|a| a.index()).collect();
        assert_eq!(idx, vec![0, 1, 2]);
    }

    #[test]
    fn termination_display() {
        assert_eq!(Termination::GroundContact.to_string(), "ground contact");
        assert_eq!(
            Termination::OutOfBounds { axis: Axis::Y }.to_string(),
            "out of bounds (Y)"
        );
    }
}
