use std::collections::{HashMap, HashSet};
use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户与账号
    // 创建用户
    async fn create_user(&self, user: NewUser) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新账号状态（驳回/停用/恢复）
    async fn set_user_status(
        &self,
        id: i64,
        expected: UserStatus,
        status: UserStatus,
    ) -> Result<User>;
    // 审核通过账号并创建档案（事务）
    async fn approve_account(
        &self,
        user_id: i64,
        approver_id: i64,
        profile: ApprovalProfile,
    ) -> Result<User>;
    // 学号是否已存在
    async fn student_number_exists(&self, student_number: &str) -> Result<bool>;

    /// 学生与教师档案
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>>;
    async fn get_instructor_by_id(&self, id: i64) -> Result<Option<Instructor>>;
    async fn get_instructor_by_user_id(&self, user_id: i64) -> Result<Option<Instructor>>;
    // 家长关联的学生
    async fn list_students_by_parent(&self, parent_user_id: i64) -> Result<Vec<Student>>;
    // 导师名下的学生
    async fn list_students_by_advisor(&self, instructor_id: i64) -> Result<Vec<Student>>;
    async fn set_student_advisor(
        &self,
        student_id: i64,
        instructor_id: i64,
    ) -> Result<Option<Student>>;
    async fn set_student_parent(
        &self,
        student_id: i64,
        parent_user_id: i64,
    ) -> Result<Option<Student>>;

    /// 资料修改申请
    async fn create_profile_change(
        &self,
        user_id: i64,
        field: ProfileField,
        old_value: Option<String>,
        new_value: String,
    ) -> Result<ProfileChange>;
    async fn get_profile_change(&self, id: i64) -> Result<Option<ProfileChange>>;
    async fn has_pending_profile_change(&self, user_id: i64, field: ProfileField)
    -> Result<bool>;
    async fn list_profile_changes(
        &self,
        user_id: Option<i64>,
        status: Option<ProfileChangeStatus>,
        page: u64,
        size: u64,
    ) -> Result<PaginatedResponse<ProfileChange>>;
    // 审核资料修改，通过时在同一事务中写回用户
    async fn review_profile_change(
        &self,
        id: i64,
        approve: bool,
        reviewer_id: i64,
    ) -> Result<ProfileChange>;

    /// 院系
    async fn create_department(&self, req: CreateDepartmentRequest) -> Result<Department>;
    async fn get_department(&self, id: i64) -> Result<Option<Department>>;
    async fn get_department_by_code(&self, code: &str) -> Result<Option<Department>>;
    async fn list_departments(&self) -> Result<Vec<Department>>;
    async fn update_department(
        &self,
        id: i64,
        req: UpdateDepartmentRequest,
    ) -> Result<Option<Department>>;
    async fn delete_department(&self, id: i64) -> Result<bool>;
    async fn count_courses_in_department(&self, department_id: i64) -> Result<u64>;

    /// 学期
    async fn create_semester(&self, req: CreateSemesterRequest) -> Result<Semester>;
    async fn get_semester(&self, id: i64) -> Result<Option<Semester>>;
    async fn list_semesters(&self) -> Result<Vec<Semester>>;
    // 激活学期，同时取消其他学期的激活状态
    async fn activate_semester(&self, id: i64) -> Result<Option<Semester>>;

    /// 课程
    async fn create_course(&self, req: CreateCourseRequest) -> Result<Course>;
    async fn get_course(&self, id: i64) -> Result<Option<Course>>;
    async fn get_course_by_code(&self, code: &str) -> Result<Option<Course>>;
    async fn get_courses_by_ids(&self, ids: &[i64]) -> Result<Vec<Course>>;
    async fn list_courses(&self, query: CourseListQuery) -> Result<CourseListResponse>;
    async fn update_course(&self, id: i64, req: UpdateCourseRequest) -> Result<Option<Course>>;
    async fn delete_course(&self, id: i64) -> Result<bool>;
    async fn count_offerings_of_course(&self, course_id: i64) -> Result<u64>;

    /// 先修关系
    async fn list_prerequisite_edges(&self) -> Result<Vec<Prerequisite>>;
    async fn list_prerequisites(&self, course_id: i64) -> Result<Vec<Course>>;
    async fn add_prerequisite(&self, course_id: i64, prerequisite_id: i64)
    -> Result<Prerequisite>;
    async fn remove_prerequisite(&self, course_id: i64, prerequisite_id: i64) -> Result<bool>;

    /// 开课
    async fn create_offered_course(&self, req: CreateOfferedCourseRequest)
    -> Result<OfferedCourse>;
    async fn get_offered_course(&self, id: i64) -> Result<Option<OfferedCourse>>;
    async fn find_offered_course(
        &self,
        course_id: i64,
        semester_id: i64,
    ) -> Result<Option<OfferedCourse>>;
    async fn list_offered_courses(
        &self,
        query: OfferedCourseListQuery,
    ) -> Result<OfferedCourseListResponse>;
    async fn list_offered_courses_by_ids(&self, ids: &[i64]) -> Result<Vec<OfferedCourse>>;
    async fn list_offered_courses_by_instructor(
        &self,
        instructor_id: i64,
    ) -> Result<Vec<OfferedCourse>>;
    async fn update_offered_course(
        &self,
        id: i64,
        req: UpdateOfferedCourseRequest,
    ) -> Result<Option<OfferedCourse>>;
    async fn delete_offered_course(&self, id: i64) -> Result<bool>;

    /// 教学班
    async fn create_section(&self, offered_course_id: i64, req: CreateSectionRequest)
    -> Result<Section>;
    async fn get_section(&self, id: i64) -> Result<Option<Section>>;
    async fn list_sections(&self, offered_course_id: i64) -> Result<Vec<Section>>;
    async fn delete_section(&self, id: i64) -> Result<bool>;

    /// 选课
    async fn create_enrollment(
        &self,
        student_id: i64,
        offered_course_id: i64,
        section_id: Option<i64>,
    ) -> Result<Enrollment>;
    async fn get_enrollment(&self, id: i64) -> Result<Option<Enrollment>>;
    // 学生在某开课中未结束的选课
    async fn find_active_enrollment(
        &self,
        student_id: i64,
        offered_course_id: i64,
    ) -> Result<Option<Enrollment>>;
    async fn list_student_enrollments(
        &self,
        student_id: i64,
        semester_id: Option<i64>,
        page: u64,
        size: u64,
    ) -> Result<PaginatedResponse<Enrollment>>;
    async fn list_enrollments_by_student(
        &self,
        student_id: i64,
        status: Option<EnrollmentStatus>,
    ) -> Result<Vec<Enrollment>>;
    // 某学期内占用学分的选课学分总和
    async fn active_credits_in_semester(&self, student_id: i64, semester_id: i64) -> Result<i64>;
    // 已获得及格成绩的课程
    async fn passed_course_ids(&self, student_id: i64) -> Result<HashSet<i64>>;
    // 等待导师处理的选课/退课申请
    async fn list_enrollments_awaiting_review(&self, student_ids: &[i64])
    -> Result<Vec<Enrollment>>;
    async fn list_roster(&self, offered_course_id: i64) -> Result<Vec<RosterEntry>>;
    // 执行状态转换，名额与附带的备注属性在同一事务中写入
    async fn transition_enrollment(
        &self,
        id: i64,
        action: EnrollmentAction,
        actor_id: i64,
        note: Option<(String, AttributeValue)>,
    ) -> Result<Enrollment>;

    /// 成绩
    async fn upsert_grade(
        &self,
        enrollment_id: i64,
        total_score: f64,
        letter: LetterGrade,
        graded_by: i64,
    ) -> Result<Grade>;
    async fn get_grade_by_enrollment(&self, enrollment_id: i64) -> Result<Option<Grade>>;
    async fn list_transcript(&self, student_id: i64) -> Result<Vec<TranscriptEntry>>;

    /// 作业
    async fn create_assignment(
        &self,
        offered_course_id: i64,
        req: CreateAssignmentRequest,
        created_by: i64,
    ) -> Result<Assignment>;
    async fn get_assignment(&self, id: i64) -> Result<Option<Assignment>>;
    async fn list_assignments(&self, offered_course_id: i64) -> Result<Vec<Assignment>>;
    async fn update_assignment(
        &self,
        id: i64,
        req: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    async fn delete_assignment(&self, id: i64) -> Result<bool>;
    async fn get_submission(&self, id: i64) -> Result<Option<Submission>>;
    async fn find_submission(&self, assignment_id: i64, student_id: i64)
    -> Result<Option<Submission>>;
    // 提交或覆盖未评分的提交
    async fn upsert_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: Option<String>,
        file_token: Option<String>,
        is_late: bool,
    ) -> Result<Submission>;
    async fn list_submissions(&self, assignment_id: i64) -> Result<Vec<Submission>>;
    async fn grade_submission(
        &self,
        id: i64,
        score: f64,
        feedback: Option<String>,
        graded_by: i64,
    ) -> Result<Option<Submission>>;

    /// 测验
    async fn create_quiz(
        &self,
        offered_course_id: i64,
        req: CreateQuizRequest,
        created_by: i64,
    ) -> Result<Quiz>;
    async fn get_quiz(&self, id: i64) -> Result<Option<Quiz>>;
    async fn list_quizzes(&self, offered_course_id: i64) -> Result<Vec<Quiz>>;
    async fn add_question(&self, quiz_id: i64, req: AddQuestionRequest) -> Result<Question>;
    async fn get_question(&self, id: i64) -> Result<Option<Question>>;
    async fn list_questions(&self, quiz_id: i64) -> Result<Vec<Question>>;
    async fn delete_question(&self, id: i64) -> Result<bool>;
    async fn has_submitted_quiz(&self, quiz_id: i64, student_id: i64) -> Result<bool>;
    // 一次性写入整份答卷
    async fn save_answers(
        &self,
        quiz_id: i64,
        student_id: i64,
        answers: Vec<NewAnswer>,
    ) -> Result<Vec<StudentAnswer>>;
    async fn list_student_answers(&self, quiz_id: i64, student_id: i64)
    -> Result<Vec<StudentAnswer>>;
    async fn list_quiz_answers(&self, quiz_id: i64) -> Result<Vec<StudentAnswer>>;
    async fn get_answer(&self, id: i64) -> Result<Option<StudentAnswer>>;
    async fn grade_answer(
        &self,
        id: i64,
        points: f64,
        graded_by: i64,
    ) -> Result<Option<StudentAnswer>>;

    /// 文件管理方法
    // 上传文件
    async fn upload_file(
        &self,
        download_token: &str,
        original_name: &str,
        stored_name: &str,
        file_size: i64,
        file_type: &str,
        user_id: i64,
    ) -> Result<File>;
    // 通过唯一 token 获取文件信息
    async fn get_file_by_token(&self, token: &str) -> Result<Option<File>>;

    /// 课程资料
    async fn create_material(
        &self,
        offered_course_id: i64,
        req: CreateMaterialRequest,
        uploaded_by: i64,
    ) -> Result<Material>;
    async fn get_material(&self, id: i64) -> Result<Option<Material>>;
    async fn list_materials(&self, offered_course_id: i64) -> Result<Vec<Material>>;
    async fn delete_material(&self, id: i64) -> Result<bool>;

    /// 站内信
    async fn create_message(
        &self,
        sender_id: i64,
        recipient_id: i64,
        subject: String,
        body: String,
    ) -> Result<Message>;
    async fn get_message(&self, id: i64) -> Result<Option<Message>>;
    async fn list_inbox(
        &self,
        user_id: i64,
        unread_only: bool,
        page: u64,
        size: u64,
    ) -> Result<PaginatedResponse<Message>>;
    async fn list_sent(
        &self,
        user_id: i64,
        page: u64,
        size: u64,
    ) -> Result<PaginatedResponse<Message>>;
    async fn mark_message_read(&self, id: i64) -> Result<Option<Message>>;
    async fn count_unread_messages(&self, user_id: i64) -> Result<u64>;
    async fn delete_message(&self, id: i64) -> Result<bool>;

    /// 公告（可见范围由 EAV 属性补全）
    async fn create_announcement(
        &self,
        author_id: i64,
        title: String,
        body: String,
    ) -> Result<Announcement>;
    async fn get_announcement(&self, id: i64) -> Result<Option<Announcement>>;
    async fn list_announcements(&self) -> Result<Vec<Announcement>>;
    async fn delete_announcement(&self, id: i64) -> Result<bool>;

    /// 教室
    async fn create_room(&self, req: CreateRoomRequest) -> Result<Room>;
    async fn get_room(&self, id: i64) -> Result<Option<Room>>;
    async fn get_room_by_name(&self, name: &str) -> Result<Option<Room>>;
    async fn list_rooms(&self, page: u64, size: u64) -> Result<PaginatedResponse<Room>>;
    async fn list_rooms_with_capacity(&self, min_capacity: Option<i32>) -> Result<Vec<Room>>;
    async fn update_room(&self, id: i64, req: UpdateRoomRequest) -> Result<Option<Room>>;
    async fn delete_room(&self, id: i64) -> Result<bool>;

    /// 教室预约
    // 与已批准预约冲突时不写入
    async fn create_reservation(
        &self,
        room_id: i64,
        requested_by: i64,
        range: TimeRange,
        purpose: String,
    ) -> Result<ReservationOutcome>;
    async fn get_reservation(&self, id: i64) -> Result<Option<Reservation>>;
    async fn list_reservations(
        &self,
        query: ReservationListQuery,
    ) -> Result<PaginatedResponse<Reservation>>;
    // 与区间重叠的已批准预约（所有教室）
    async fn list_approved_overlapping(&self, range: TimeRange) -> Result<Vec<Reservation>>;
    // 审批通过，事务内重新检测冲突
    async fn approve_reservation(&self, id: i64, reviewer_id: i64) -> Result<ReservationOutcome>;
    // 驳回或取消
    async fn close_reservation(
        &self,
        id: i64,
        status: ReservationStatus,
        actor_id: i64,
    ) -> Result<Reservation>;

    /// EAV 属性
    async fn set_attribute(
        &self,
        entity_type: EntityType,
        entity_id: i64,
        name: &str,
        value: AttributeValue,
    ) -> Result<Attribute>;
    async fn get_attribute(
        &self,
        entity_type: EntityType,
        entity_id: i64,
        name: &str,
    ) -> Result<Option<Attribute>>;
    async fn list_attributes(&self, entity_type: EntityType, entity_id: i64)
    -> Result<Vec<Attribute>>;
    async fn list_attributes_for(
        &self,
        entity_type: EntityType,
        entity_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Attribute>>>;
    async fn delete_attribute(
        &self,
        entity_type: EntityType,
        entity_id: i64,
        name: &str,
    ) -> Result<bool>;
    async fn delete_attributes_by_prefix(
        &self,
        entity_type: EntityType,
        entity_id: i64,
        prefix: &str,
    ) -> Result<u64>;
    async fn delete_all_attributes(&self, entity_type: EntityType, entity_id: i64) -> Result<u64>;
    // 在同一事务中替换某前缀下的全部属性
    async fn replace_attributes_with_prefix(
        &self,
        entity_type: EntityType,
        entity_id: i64,
        prefix: &str,
        values: Vec<(String, AttributeValue)>,
    ) -> Result<Vec<Attribute>>;

    /// 系统设置
    async fn list_all_settings(&self) -> Result<Vec<SystemSetting>>;
    async fn get_setting_by_key(&self, key: &str) -> Result<Option<SystemSetting>>;
    async fn update_setting(&self, key: &str, value: &str, user_id: i64) -> Result<SystemSetting>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
