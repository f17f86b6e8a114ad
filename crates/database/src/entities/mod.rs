pub mod course;
pub mod degree;
pub mod degree_course;
pub mod degree_course_objective;
pub mod evaluation;
pub mod instructor;
pub mod objective;
pub mod section;
pub mod semester;

// Plural aliases, matching the table names
pub use course as courses;
pub use degree as degrees;
pub use degree_course as degree_courses;
pub use degree_course_objective as degree_course_objectives;
pub use evaluation as evaluations;
pub use instructor as instructors;
pub use objective as objectives;
pub use section as sections;
pub use semester as semesters;
