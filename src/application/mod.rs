pub mod blob;
pub mod dashboard;
pub mod planner;
pub mod schedule_store;
pub mod task_store;
pub mod timer_service;

mod task_store_tests;

#[cfg(test)]
pub(crate) mod test_support;
