pub mod stats;
pub mod workout;

pub use stats::{WorkoutStats, WorkoutTotals};
pub use workout::{Workout, WorkoutInput};
