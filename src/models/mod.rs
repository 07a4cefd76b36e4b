pub mod coordinates;
pub mod course;

pub use coordinates::Coordinates;
pub use course::{CourseCandidate, CourseResponse, LoopCourseRequest, TravelMode};
