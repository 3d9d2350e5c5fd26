use crate::models::{WorkoutStats, WorkoutTotals};

/// Turns raw totals into the public statistics, averaging per workout.
/// An empty collection yields all zeros.
pub fn summarize(totals: WorkoutTotals) -> WorkoutStats {
    WorkoutStats {
        total_workouts: totals.count,
        total_duration: totals.total_duration,
        total_calories: totals.total_calories,
        avg_duration: rounded_average(totals.total_duration, totals.count),
        avg_calories: rounded_average(totals.total_calories, totals.count),
    }
}

/// Integer mean rounded half up (37.5 -> 38).
pub fn rounded_average(total: i64, count: i64) -> i64 {
    if count <= 0 {
        return 0;
    }

    (2 * total + count).div_euclid(2 * count)
}
