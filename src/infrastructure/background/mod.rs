//! Background work infrastructure module

mod task_tracker;

pub use task_tracker::TaskTrackerDispatcher;
