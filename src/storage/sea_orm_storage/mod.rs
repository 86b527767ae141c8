//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod announcements;
mod assignments;
mod attributes;
mod catalog;
mod enrollments;
mod files;
mod grades;
mod materials;
mod messages;
mod profile_changes;
mod quizzes;
mod rooms;
mod system_settings;
mod users;

use crate::config::AppConfig;
use crate::errors::{LmsError, Result};
use crate::models::PaginationInfo;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait, PaginatorTrait, Select};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| LmsError::database_operation(format!("Database migration failed: {e}")))?;

        info!("SeaORM storage initialized, database: {}", db_url);

        Ok(Self { db })
    }

    /// 基于已有连接创建存储并执行迁移（测试使用内存 SQLite）
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| LmsError::database_operation(format!("Database migration failed: {e}")))?;
        Ok(Self { db })
    }

    /// 分页查询，page 从 1 开始
    pub(crate) async fn fetch_page<E>(
        &self,
        select: Select<E>,
        page: u64,
        size: u64,
    ) -> Result<(Vec<E::Model>, PaginationInfo)>
    where
        E: EntityTrait,
        E::Model: Sync + 'static,
    {
        let size = size.max(1);
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to count rows: {e}")))?;
        let items = paginator
            .fetch_page(page.max(1) - 1)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to fetch page: {e}")))?;

        Ok((items, PaginationInfo::new(page.max(1), size, total)))
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| LmsError::database_config(format!("Invalid SQLite URL: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| LmsError::database_connection(format!("SQLite connection failed: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt).await.map_err(|e| {
            LmsError::database_connection(format!("Unable to connect to database: {e}"))
        })
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(LmsError::database_config(format!(
                "Cannot infer database type from URL: {url}. Supported: sqlite://, postgres://, mysql:// or a .db/.sqlite file path"
            )))
        }
    }
}

// Storage trait 实现
use std::collections::{HashMap, HashSet};

use crate::models::{
    PaginatedResponse,
    announcements::Announcement,
    assignments::{
        entities::{Assignment, Submission},
        requests::{CreateAssignmentRequest, UpdateAssignmentRequest},
    },
    attributes::{Attribute, AttributeValue, EntityType},
    catalog::{
        entities::{Course, Department, OfferedCourse, Prerequisite, Section, Semester},
        requests::{
            CourseListQuery, CreateCourseRequest, CreateDepartmentRequest,
            CreateOfferedCourseRequest, CreateSectionRequest, CreateSemesterRequest,
            OfferedCourseListQuery, UpdateCourseRequest, UpdateDepartmentRequest,
            UpdateOfferedCourseRequest,
        },
        responses::{CourseListResponse, OfferedCourseListResponse},
    },
    enrollments::{
        entities::{Enrollment, EnrollmentAction, EnrollmentStatus},
        responses::RosterEntry,
    },
    files::entities::File,
    grades::{
        entities::{Grade, LetterGrade},
        responses::TranscriptEntry,
    },
    materials::{CreateMaterialRequest, Material},
    messages::entities::Message,
    profile::entities::{ProfileChange, ProfileChangeStatus, ProfileField},
    quizzes::{
        entities::{NewAnswer, Question, Quiz, StudentAnswer},
        requests::{AddQuestionRequest, CreateQuizRequest},
    },
    rooms::{
        entities::{Reservation, ReservationOutcome, ReservationStatus, Room, TimeRange},
        requests::{CreateRoomRequest, ReservationListQuery, UpdateRoomRequest},
    },
    system::entities::SystemSetting,
    users::{
        entities::{Instructor, Student, User, UserStatus},
        requests::{ApprovalProfile, NewUser, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: NewUser) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn set_user_status(
        &self,
        id: i64,
        expected: UserStatus,
        status: UserStatus,
    ) -> Result<User> {
        self.set_user_status_impl(id, expected, status).await
    }

    async fn approve_account(
        &self,
        user_id: i64,
        approver_id: i64,
        profile: ApprovalProfile,
    ) -> Result<User> {
        self.approve_account_impl(user_id, approver_id, profile).await
    }

    async fn student_number_exists(&self, student_number: &str) -> Result<bool> {
        self.student_number_exists_impl(student_number).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>> {
        self.get_student_by_user_id_impl(user_id).await
    }

    async fn get_instructor_by_id(&self, id: i64) -> Result<Option<Instructor>> {
        self.get_instructor_by_id_impl(id).await
    }

    async fn get_instructor_by_user_id(&self, user_id: i64) -> Result<Option<Instructor>> {
        self.get_instructor_by_user_id_impl(user_id).await
    }

    async fn list_students_by_parent(&self, parent_user_id: i64) -> Result<Vec<Student>> {
        self.list_students_by_parent_impl(parent_user_id).await
    }

    async fn list_students_by_advisor(&self, instructor_id: i64) -> Result<Vec<Student>> {
        self.list_students_by_advisor_impl(instructor_id).await
    }

    async fn set_student_advisor(
        &self,
        student_id: i64,
        instructor_id: i64,
    ) -> Result<Option<Student>> {
        self.set_student_advisor_impl(student_id, instructor_id).await
    }

    async fn set_student_parent(
        &self,
        student_id: i64,
        parent_user_id: i64,
    ) -> Result<Option<Student>> {
        self.set_student_parent_impl(student_id, parent_user_id).await
    }

    // 资料变更模块
    async fn create_profile_change(
        &self,
        user_id: i64,
        field: ProfileField,
        old_value: Option<String>,
        new_value: String,
    ) -> Result<ProfileChange> {
        self.create_profile_change_impl(user_id, field, old_value, new_value).await
    }

    async fn get_profile_change(&self, id: i64) -> Result<Option<ProfileChange>> {
        self.get_profile_change_impl(id).await
    }

    async fn has_pending_profile_change(&self, user_id: i64, field: ProfileField) -> Result<bool> {
        self.has_pending_profile_change_impl(user_id, field).await
    }

    async fn list_profile_changes(
        &self,
        user_id: Option<i64>,
        status: Option<ProfileChangeStatus>,
        page: u64,
        size: u64,
    ) -> Result<PaginatedResponse<ProfileChange>> {
        self.list_profile_changes_impl(user_id, status, page, size).await
    }

    async fn review_profile_change(
        &self,
        id: i64,
        approve: bool,
        reviewer_id: i64,
    ) -> Result<ProfileChange> {
        self.review_profile_change_impl(id, approve, reviewer_id).await
    }

    // 院系与学期模块
    async fn create_department(&self, req: CreateDepartmentRequest) -> Result<Department> {
        self.create_department_impl(req).await
    }

    async fn get_department(&self, id: i64) -> Result<Option<Department>> {
        self.get_department_impl(id).await
    }

    async fn get_department_by_code(&self, code: &str) -> Result<Option<Department>> {
        self.get_department_by_code_impl(code).await
    }

    async fn list_departments(&self) -> Result<Vec<Department>> {
        self.list_departments_impl().await
    }

    async fn update_department(
        &self,
        id: i64,
        req: UpdateDepartmentRequest,
    ) -> Result<Option<Department>> {
        self.update_department_impl(id, req).await
    }

    async fn delete_department(&self, id: i64) -> Result<bool> {
        self.delete_department_impl(id).await
    }

    async fn count_courses_in_department(&self, department_id: i64) -> Result<u64> {
        self.count_courses_in_department_impl(department_id).await
    }

    async fn create_semester(&self, req: CreateSemesterRequest) -> Result<Semester> {
        self.create_semester_impl(req).await
    }

    async fn get_semester(&self, id: i64) -> Result<Option<Semester>> {
        self.get_semester_impl(id).await
    }

    async fn list_semesters(&self) -> Result<Vec<Semester>> {
        self.list_semesters_impl().await
    }

    async fn activate_semester(&self, id: i64) -> Result<Option<Semester>> {
        self.activate_semester_impl(id).await
    }

    // 课程与先修模块
    async fn create_course(&self, req: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(req).await
    }

    async fn get_course(&self, id: i64) -> Result<Option<Course>> {
        self.get_course_impl(id).await
    }

    async fn get_course_by_code(&self, code: &str) -> Result<Option<Course>> {
        self.get_course_by_code_impl(code).await
    }

    async fn get_courses_by_ids(&self, ids: &[i64]) -> Result<Vec<Course>> {
        self.get_courses_by_ids_impl(ids).await
    }

    async fn list_courses(&self, query: CourseListQuery) -> Result<CourseListResponse> {
        self.list_courses_impl(query).await
    }

    async fn update_course(&self, id: i64, req: UpdateCourseRequest) -> Result<Option<Course>> {
        self.update_course_impl(id, req).await
    }

    async fn delete_course(&self, id: i64) -> Result<bool> {
        self.delete_course_impl(id).await
    }

    async fn count_offerings_of_course(&self, course_id: i64) -> Result<u64> {
        self.count_offerings_of_course_impl(course_id).await
    }

    async fn list_prerequisite_edges(&self) -> Result<Vec<Prerequisite>> {
        self.list_prerequisite_edges_impl().await
    }

    async fn list_prerequisites(&self, course_id: i64) -> Result<Vec<Course>> {
        self.list_prerequisites_impl(course_id).await
    }

    async fn add_prerequisite(&self, course_id: i64, prerequisite_id: i64) -> Result<Prerequisite> {
        self.add_prerequisite_impl(course_id, prerequisite_id).await
    }

    async fn remove_prerequisite(&self, course_id: i64, prerequisite_id: i64) -> Result<bool> {
        self.remove_prerequisite_impl(course_id, prerequisite_id).await
    }

    // 开课与分组模块
    async fn create_offered_course(
        &self,
        req: CreateOfferedCourseRequest,
    ) -> Result<OfferedCourse> {
        self.create_offered_course_impl(req).await
    }

    async fn get_offered_course(&self, id: i64) -> Result<Option<OfferedCourse>> {
        self.get_offered_course_impl(id).await
    }

    async fn find_offered_course(
        &self,
        course_id: i64,
        semester_id: i64,
    ) -> Result<Option<OfferedCourse>> {
        self.find_offered_course_impl(course_id, semester_id).await
    }

    async fn list_offered_courses(
        &self,
        query: OfferedCourseListQuery,
    ) -> Result<OfferedCourseListResponse> {
        self.list_offered_courses_impl(query).await
    }

    async fn list_offered_courses_by_ids(&self, ids: &[i64]) -> Result<Vec<OfferedCourse>> {
        self.list_offered_courses_by_ids_impl(ids).await
    }

    async fn list_offered_courses_by_instructor(
        &self,
        instructor_id: i64,
    ) -> Result<Vec<OfferedCourse>> {
        self.list_offered_courses_by_instructor_impl(instructor_id).await
    }

    async fn update_offered_course(
        &self,
        id: i64,
        req: UpdateOfferedCourseRequest,
    ) -> Result<Option<OfferedCourse>> {
        self.update_offered_course_impl(id, req).await
    }

    async fn delete_offered_course(&self, id: i64) -> Result<bool> {
        self.delete_offered_course_impl(id).await
    }

    async fn create_section(
        &self,
        offered_course_id: i64,
        req: CreateSectionRequest,
    ) -> Result<Section> {
        self.create_section_impl(offered_course_id, req).await
    }

    async fn get_section(&self, id: i64) -> Result<Option<Section>> {
        self.get_section_impl(id).await
    }

    async fn list_sections(&self, offered_course_id: i64) -> Result<Vec<Section>> {
        self.list_sections_impl(offered_course_id).await
    }

    async fn delete_section(&self, id: i64) -> Result<bool> {
        self.delete_section_impl(id).await
    }

    // 选课模块
    async fn create_enrollment(
        &self,
        student_id: i64,
        offered_course_id: i64,
        section_id: Option<i64>,
    ) -> Result<Enrollment> {
        self.create_enrollment_impl(student_id, offered_course_id, section_id).await
    }

    async fn get_enrollment(&self, id: i64) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(id).await
    }

    async fn find_active_enrollment(
        &self,
        student_id: i64,
        offered_course_id: i64,
    ) -> Result<Option<Enrollment>> {
        self.find_active_enrollment_impl(student_id, offered_course_id).await
    }

    async fn list_student_enrollments(
        &self,
        student_id: i64,
        semester_id: Option<i64>,
        page: u64,
        size: u64,
    ) -> Result<PaginatedResponse<Enrollment>> {
        self.list_student_enrollments_impl(student_id, semester_id, page, size).await
    }

    async fn list_enrollments_by_student(
        &self,
        student_id: i64,
        status: Option<EnrollmentStatus>,
    ) -> Result<Vec<Enrollment>> {
        self.list_enrollments_by_student_impl(student_id, status).await
    }

    async fn active_credits_in_semester(&self, student_id: i64, semester_id: i64) -> Result<i64> {
        self.active_credits_in_semester_impl(student_id, semester_id).await
    }

    async fn passed_course_ids(&self, student_id: i64) -> Result<HashSet<i64>> {
        self.passed_course_ids_impl(student_id).await
    }

    async fn list_enrollments_awaiting_review(
        &self,
        student_ids: &[i64],
    ) -> Result<Vec<Enrollment>> {
        self.list_enrollments_awaiting_review_impl(student_ids).await
    }

    async fn list_roster(&self, offered_course_id: i64) -> Result<Vec<RosterEntry>> {
        self.list_roster_impl(offered_course_id).await
    }

    async fn transition_enrollment(
        &self,
        id: i64,
        action: EnrollmentAction,
        actor_id: i64,
        note: Option<(String, AttributeValue)>,
    ) -> Result<Enrollment> {
        self.transition_enrollment_impl(id, action, actor_id, note).await
    }

    // 成绩模块
    async fn upsert_grade(
        &self,
        enrollment_id: i64,
        total_score: f64,
        letter: LetterGrade,
        graded_by: i64,
    ) -> Result<Grade> {
        self.upsert_grade_impl(enrollment_id, total_score, letter, graded_by).await
    }

    async fn get_grade_by_enrollment(&self, enrollment_id: i64) -> Result<Option<Grade>> {
        self.get_grade_by_enrollment_impl(enrollment_id).await
    }

    async fn list_transcript(&self, student_id: i64) -> Result<Vec<TranscriptEntry>> {
        self.list_transcript_impl(student_id).await
    }

    // 作业模块
    async fn create_assignment(
        &self,
        offered_course_id: i64,
        req: CreateAssignmentRequest,
        created_by: i64,
    ) -> Result<Assignment> {
        self.create_assignment_impl(offered_course_id, req, created_by).await
    }

    async fn get_assignment(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_impl(id).await
    }

    async fn list_assignments(&self, offered_course_id: i64) -> Result<Vec<Assignment>> {
        self.list_assignments_impl(offered_course_id).await
    }

    async fn update_assignment(
        &self,
        id: i64,
        req: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(id, req).await
    }

    async fn delete_assignment(&self, id: i64) -> Result<bool> {
        self.delete_assignment_impl(id).await
    }

    async fn get_submission(&self, id: i64) -> Result<Option<Submission>> {
        self.get_submission_impl(id).await
    }

    async fn find_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        self.find_submission_impl(assignment_id, student_id).await
    }

    async fn upsert_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: Option<String>,
        file_token: Option<String>,
        is_late: bool,
    ) -> Result<Submission> {
        self.upsert_submission_impl(assignment_id, student_id, content, file_token, is_late).await
    }

    async fn list_submissions(&self, assignment_id: i64) -> Result<Vec<Submission>> {
        self.list_submissions_impl(assignment_id).await
    }

    async fn grade_submission(
        &self,
        id: i64,
        score: f64,
        feedback: Option<String>,
        graded_by: i64,
    ) -> Result<Option<Submission>> {
        self.grade_submission_impl(id, score, feedback, graded_by).await
    }

    // 测验模块
    async fn create_quiz(
        &self,
        offered_course_id: i64,
        req: CreateQuizRequest,
        created_by: i64,
    ) -> Result<Quiz> {
        self.create_quiz_impl(offered_course_id, req, created_by).await
    }

    async fn get_quiz(&self, id: i64) -> Result<Option<Quiz>> {
        self.get_quiz_impl(id).await
    }

    async fn list_quizzes(&self, offered_course_id: i64) -> Result<Vec<Quiz>> {
        self.list_quizzes_impl(offered_course_id).await
    }

    async fn add_question(&self, quiz_id: i64, req: AddQuestionRequest) -> Result<Question> {
        self.add_question_impl(quiz_id, req).await
    }

    async fn get_question(&self, id: i64) -> Result<Option<Question>> {
        self.get_question_impl(id).await
    }

    async fn list_questions(&self, quiz_id: i64) -> Result<Vec<Question>> {
        self.list_questions_impl(quiz_id).await
    }

    async fn delete_question(&self, id: i64) -> Result<bool> {
        self.delete_question_impl(id).await
    }

    async fn has_submitted_quiz(&self, quiz_id: i64, student_id: i64) -> Result<bool> {
        self.has_submitted_quiz_impl(quiz_id, student_id).await
    }

    async fn save_answers(
        &self,
        quiz_id: i64,
        student_id: i64,
        answers: Vec<NewAnswer>,
    ) -> Result<Vec<StudentAnswer>> {
        self.save_answers_impl(quiz_id, student_id, answers).await
    }

    async fn list_student_answers(
        &self,
        quiz_id: i64,
        student_id: i64,
    ) -> Result<Vec<StudentAnswer>> {
        self.list_student_answers_impl(quiz_id, student_id).await
    }

    async fn list_quiz_answers(&self, quiz_id: i64) -> Result<Vec<StudentAnswer>> {
        self.list_quiz_answers_impl(quiz_id).await
    }

    async fn get_answer(&self, id: i64) -> Result<Option<StudentAnswer>> {
        self.get_answer_impl(id).await
    }

    async fn grade_answer(
        &self,
        id: i64,
        points: f64,
        graded_by: i64,
    ) -> Result<Option<StudentAnswer>> {
        self.grade_answer_impl(id, points, graded_by).await
    }

    // 文件与资料模块
    async fn upload_file(
        &self,
        download_token: &str,
        original_name: &str,
        stored_name: &str,
        file_size: i64,
        file_type: &str,
        user_id: i64,
    ) -> Result<File> {
        self.upload_file_impl(
            download_token,
            original_name,
            stored_name,
            file_size,
            file_type,
            user_id,
        )
        .await
    }

    async fn get_file_by_token(&self, token: &str) -> Result<Option<File>> {
        self.get_file_by_token_impl(token).await
    }

    async fn create_material(
        &self,
        offered_course_id: i64,
        req: CreateMaterialRequest,
        uploaded_by: i64,
    ) -> Result<Material> {
        self.create_material_impl(offered_course_id, req, uploaded_by).await
    }

    async fn get_material(&self, id: i64) -> Result<Option<Material>> {
        self.get_material_impl(id).await
    }

    async fn list_materials(&self, offered_course_id: i64) -> Result<Vec<Material>> {
        self.list_materials_impl(offered_course_id).await
    }

    async fn delete_material(&self, id: i64) -> Result<bool> {
        self.delete_material_impl(id).await
    }

    // 站内信模块
    async fn create_message(
        &self,
        sender_id: i64,
        recipient_id: i64,
        subject: String,
        body: String,
    ) -> Result<Message> {
        self.create_message_impl(sender_id, recipient_id, subject, body).await
    }

    async fn get_message(&self, id: i64) -> Result<Option<Message>> {
        self.get_message_impl(id).await
    }

    async fn list_inbox(
        &self,
        user_id: i64,
        unread_only: bool,
        page: u64,
        size: u64,
    ) -> Result<PaginatedResponse<Message>> {
        self.list_inbox_impl(user_id, unread_only, page, size).await
    }

    async fn list_sent(
        &self,
        user_id: i64,
        page: u64,
        size: u64,
    ) -> Result<PaginatedResponse<Message>> {
        self.list_sent_impl(user_id, page, size).await
    }

    async fn mark_message_read(&self, id: i64) -> Result<Option<Message>> {
        self.mark_message_read_impl(id).await
    }

    async fn count_unread_messages(&self, user_id: i64) -> Result<u64> {
        self.count_unread_messages_impl(user_id).await
    }

    async fn delete_message(&self, id: i64) -> Result<bool> {
        self.delete_message_impl(id).await
    }

    // 公告模块
    async fn create_announcement(
        &self,
        author_id: i64,
        title: String,
        body: String,
    ) -> Result<Announcement> {
        self.create_announcement_impl(author_id, title, body).await
    }

    async fn get_announcement(&self, id: i64) -> Result<Option<Announcement>> {
        self.get_announcement_impl(id).await
    }

    async fn list_announcements(&self) -> Result<Vec<Announcement>> {
        self.list_announcements_impl().await
    }

    async fn delete_announcement(&self, id: i64) -> Result<bool> {
        self.delete_announcement_impl(id).await
    }

    // 教室模块
    async fn create_room(&self, req: CreateRoomRequest) -> Result<Room> {
        self.create_room_impl(req).await
    }

    async fn get_room(&self, id: i64) -> Result<Option<Room>> {
        self.get_room_impl(id).await
    }

    async fn get_room_by_name(&self, name: &str) -> Result<Option<Room>> {
        self.get_room_by_name_impl(name).await
    }

    async fn list_rooms(&self, page: u64, size: u64) -> Result<PaginatedResponse<Room>> {
        self.list_rooms_impl(page, size).await
    }

    async fn list_rooms_with_capacity(&self, min_capacity: Option<i32>) -> Result<Vec<Room>> {
        self.list_rooms_with_capacity_impl(min_capacity).await
    }

    async fn update_room(&self, id: i64, req: UpdateRoomRequest) -> Result<Option<Room>> {
        self.update_room_impl(id, req).await
    }

    async fn delete_room(&self, id: i64) -> Result<bool> {
        self.delete_room_impl(id).await
    }

    // 预约模块
    async fn create_reservation(
        &self,
        room_id: i64,
        requested_by: i64,
        range: TimeRange,
        purpose: String,
    ) -> Result<ReservationOutcome> {
        self.create_reservation_impl(room_id, requested_by, range, purpose).await
    }

    async fn get_reservation(&self, id: i64) -> Result<Option<Reservation>> {
        self.get_reservation_impl(id).await
    }

    async fn list_reservations(
        &self,
        query: ReservationListQuery,
    ) -> Result<PaginatedResponse<Reservation>> {
        self.list_reservations_impl(query).await
    }

    async fn list_approved_overlapping(&self, range: TimeRange) -> Result<Vec<Reservation>> {
        self.list_approved_overlapping_impl(range).await
    }

    async fn approve_reservation(&self, id: i64, reviewer_id: i64) -> Result<ReservationOutcome> {
        self.approve_reservation_impl(id, reviewer_id).await
    }

    async fn close_reservation(
        &self,
        id: i64,
        status: ReservationStatus,
        actor_id: i64,
    ) -> Result<Reservation> {
        self.close_reservation_impl(id, status, actor_id).await
    }

    // EAV 属性模块
    async fn set_attribute(
        &self,
        entity_type: EntityType,
        entity_id: i64,
        name: &str,
        value: AttributeValue,
    ) -> Result<Attribute> {
        self.set_attribute_impl(entity_type, entity_id, name, value).await
    }

    async fn get_attribute(
        &self,
        entity_type: EntityType,
        entity_id: i64,
        name: &str,
    ) -> Result<Option<Attribute>> {
        self.get_attribute_impl(entity_type, entity_id, name).await
    }

    async fn list_attributes(
        &self,
        entity_type: EntityType,
        entity_id: i64,
    ) -> Result<Vec<Attribute>> {
        self.list_attributes_impl(entity_type, entity_id).await
    }

    async fn list_attributes_for(
        &self,
        entity_type: EntityType,
        entity_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Attribute>>> {
        self.list_attributes_for_impl(entity_type, entity_ids).await
    }

    async fn delete_attribute(
        &self,
        entity_type: EntityType,
        entity_id: i64,
        name: &str,
    ) -> Result<bool> {
        self.delete_attribute_impl(entity_type, entity_id, name).await
    }

    async fn delete_attributes_by_prefix(
        &self,
        entity_type: EntityType,
        entity_id: i64,
        prefix: &str,
    ) -> Result<u64> {
        self.delete_attributes_by_prefix_impl(entity_type, entity_id, prefix).await
    }

    async fn delete_all_attributes(&self, entity_type: EntityType, entity_id: i64) -> Result<u64> {
        self.delete_all_attributes_impl(entity_type, entity_id).await
    }

    async fn replace_attributes_with_prefix(
        &self,
        entity_type: EntityType,
        entity_id: i64,
        prefix: &str,
        values: Vec<(String, AttributeValue)>,
    ) -> Result<Vec<Attribute>> {
        self.replace_attributes_with_prefix_impl(entity_type, entity_id, prefix, values).await
    }

    // 系统设置模块
    async fn list_all_settings(&self) -> Result<Vec<SystemSetting>> {
        self.list_all_settings_impl().await
    }

    async fn get_setting_by_key(&self, key: &str) -> Result<Option<SystemSetting>> {
        self.get_setting_by_key_impl(key).await
    }

    async fn update_setting(&self, key: &str, value: &str, user_id: i64) -> Result<SystemSetting> {
        self.update_setting_impl(key, value, user_id).await
    }
}
