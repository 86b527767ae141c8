pub mod accounts;

pub mod admin;

pub mod announcements;

pub mod course;

pub mod files;

pub mod instructors;

pub mod message;

pub mod parent;

pub mod profile;

pub mod rooms;

pub mod student;

pub mod system;

pub use accounts::configure_account_routes;
pub use admin::configure_admin_routes;
pub use announcements::configure_announcement_routes;
pub use course::configure_course_routes;
pub use files::configure_file_routes;
pub use instructors::configure_instructor_routes;
pub use message::configure_message_routes;
pub use parent::configure_parent_routes;
pub use profile::configure_profile_routes;
pub use rooms::configure_room_routes;
pub use student::configure_student_routes;
pub use system::configure_system_routes;
