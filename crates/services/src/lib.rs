#![forbid(unsafe_code)]

pub mod course_state_service;
pub mod error;
pub mod observer;

pub use course_state_service::{CourseStateService, StateChange};
pub use error::CourseStateError;
pub use observer::ProgressObserver;
