//! Dashboard views

pub mod admin;
pub mod attendance;
pub mod home;
pub mod student;
pub mod teacher;

pub use admin::render_admin_view;
pub use attendance::render_attendance_view;
pub use home::render_home_view;
pub use student::render_student_view;
pub use teacher::render_teacher_view;
