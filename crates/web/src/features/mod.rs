pub mod workouts;
