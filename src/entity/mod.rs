//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod announcements;
pub mod assignment_submissions;
pub mod assignments;
pub mod attribute_values;
pub mod course_materials;
pub mod course_prerequisites;
pub mod courses;
pub mod departments;
pub mod enrollments;
pub mod files;
pub mod grades;
pub mod instructors;
pub mod messages;
pub mod offered_courses;
pub mod profile_changes;
pub mod questions;
pub mod quizzes;
pub mod room_reservations;
pub mod rooms;
pub mod sections;
pub mod semesters;
pub mod student_answers;
pub mod students;
pub mod system_settings;
pub mod users;
