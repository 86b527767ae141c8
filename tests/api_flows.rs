//! 端到端流程：内存 SQLite + 完整路由

use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use chrono::{Duration, Utc};
use sea_orm::{ConnectOptions, Database};
use serde_json::{Value, json};

use campus_lms::models::attributes::{AttributeValue, EntityType};
use campus_lms::models::catalog::entities::OfferedCourse;
use campus_lms::models::catalog::requests::{
    CreateCourseRequest, CreateDepartmentRequest, CreateOfferedCourseRequest, CreateSemesterRequest,
};
use campus_lms::models::enrollments::entities::{Enrollment, EnrollmentAction, EnrollmentStatus};
use campus_lms::models::grades::entities::LetterGrade;
use campus_lms::models::users::entities::{User, UserRole, UserStatus};
use campus_lms::models::users::requests::{ApprovalProfile, NewUser};
use campus_lms::routes;
use campus_lms::storage::Storage;
use campus_lms::storage::sea_orm_storage::SeaOrmStorage;

macro_rules! lms_app {
    ($storage:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($storage.clone()))
                .configure(routes::configure_system_routes)
                .configure(routes::configure_account_routes)
                .configure(routes::configure_profile_routes)
                .configure(routes::configure_admin_routes)
                .configure(routes::configure_course_routes)
                .configure(routes::configure_student_routes)
                .configure(routes::configure_instructor_routes)
                .configure(routes::configure_message_routes)
                .configure(routes::configure_announcement_routes)
                .configure(routes::configure_room_routes),
        )
        .await
    };
}

async fn memory_storage() -> Arc<dyn Storage> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("connect in-memory sqlite");
    Arc::new(
        SeaOrmStorage::from_connection(db)
            .await
            .expect("run migrations"),
    )
}

fn new_user(username: &str, role: UserRole, status: UserStatus) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: format!("{username}@campus.edu"),
        full_name: format!("Test {username}"),
        phone: None,
        role,
        status,
        department_id: None,
    }
}

async fn seed_admin(storage: &Arc<dyn Storage>) -> User {
    storage
        .create_user(new_user("registrar", UserRole::Admin, UserStatus::Active))
        .await
        .expect("create admin")
}

/// 注册并审核通过，返回已激活的用户
async fn seed_member(
    storage: &Arc<dyn Storage>,
    admin: &User,
    username: &str,
    profile: ApprovalProfile,
) -> User {
    let role = match profile {
        ApprovalProfile::Student { .. } => UserRole::Student,
        ApprovalProfile::Instructor { .. } => UserRole::Instructor,
        ApprovalProfile::None => UserRole::Parent,
    };
    let user = storage
        .create_user(new_user(username, role, UserStatus::Pending))
        .await
        .expect("create member");
    storage
        .approve_account(user.id, admin.id, profile)
        .await
        .expect("approve member")
}

fn student_profile(number: &str) -> ApprovalProfile {
    ApprovalProfile::Student {
        student_number: number.to_string(),
        department_id: None,
        advisor_id: None,
        enrollment_year: 2026,
    }
}

fn instructor_profile() -> ApprovalProfile {
    ApprovalProfile::Instructor {
        department_id: None,
        title: Some("Lecturer".to_string()),
    }
}

fn as_user(req: test::TestRequest, user: &User) -> test::TestRequest {
    req.insert_header(("X-User-Id", user.id.to_string()))
}

fn post_as(uri: &str, user: &User, body: Value) -> test::TestRequest {
    as_user(test::TestRequest::post().uri(uri), user).set_json(body)
}

fn data_id(body: &Value) -> i64 {
    body["data"]["id"].as_i64().expect("response carries data.id")
}

/// 院系与学期，返回 (department_id, semester_id)
async fn seed_term(storage: &Arc<dyn Storage>) -> (i64, i64) {
    let department = storage
        .create_department(CreateDepartmentRequest {
            code: "CS".to_string(),
            name: "Computer Science".to_string(),
            description: None,
        })
        .await
        .expect("create department");
    let semester = storage
        .create_semester(CreateSemesterRequest {
            name: "Fall 2026".to_string(),
            start_date: chrono::NaiveDate::from_ymd_opt(2026, 9, 1).expect("date"),
            end_date: chrono::NaiveDate::from_ymd_opt(2026, 12, 20).expect("date"),
        })
        .await
        .expect("create semester");
    (department.id, semester.id)
}

async fn seed_offering(
    storage: &Arc<dyn Storage>,
    (department_id, semester_id): (i64, i64),
    teacher: &User,
    code: &str,
    credits: i32,
    capacity: i32,
) -> OfferedCourse {
    let instructor = storage
        .get_instructor_by_user_id(teacher.id)
        .await
        .unwrap()
        .expect("instructor profile");
    let course = storage
        .create_course(CreateCourseRequest {
            code: code.to_string(),
            title: format!("{code} lectures"),
            description: None,
            credits,
            department_id,
        })
        .await
        .expect("create course");
    storage
        .create_offered_course(CreateOfferedCourseRequest {
            course_id: course.id,
            semester_id,
            instructor_id: instructor.id,
            capacity,
        })
        .await
        .expect("create offering")
}

/// 跳过申请流程，直接得到一条已批准的选课
async fn approved_enrollment(
    storage: &Arc<dyn Storage>,
    admin: &User,
    student: &User,
    offering: &OfferedCourse,
) -> Enrollment {
    let profile = storage
        .get_student_by_user_id(student.id)
        .await
        .unwrap()
        .expect("student profile");
    let enrollment = storage
        .create_enrollment(profile.id, offering.id, None)
        .await
        .expect("create enrollment");
    storage
        .transition_enrollment(enrollment.id, EnrollmentAction::Approve, admin.id, None)
        .await
        .expect("approve enrollment")
}

async fn enrolled_count(storage: &Arc<dyn Storage>, offering_id: i64) -> i32 {
    storage
        .get_offered_course(offering_id)
        .await
        .unwrap()
        .expect("offering exists")
        .enrolled_count
}

async fn attribute_names(
    storage: &Arc<dyn Storage>,
    entity_type: EntityType,
    id: i64,
) -> Vec<String> {
    let mut names: Vec<String> = storage
        .list_attributes(entity_type, id)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();
    names.sort();
    names
}

#[actix_web::test]
async fn test_health_is_public() {
    let storage = memory_storage().await;
    let app = lms_app!(storage);

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_approval_activates_registered_account() {
    let storage = memory_storage().await;
    let admin = seed_admin(&storage).await;
    let app = lms_app!(storage);

    let req = test::TestRequest::post()
        .uri("/api/accounts/register")
        .set_json(json!({
            "username": "newstudent",
            "email": "newstudent@campus.edu",
            "full_name": "New Student",
            "role": "student"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let user_id = body["data"]["user"]["id"].as_i64().expect("user id");
    let registered = storage.get_user_by_id(user_id).await.unwrap().unwrap();
    assert_eq!(registered.status, UserStatus::Pending);

    // 待审核账号无法通过身份校验
    let req = as_user(test::TestRequest::get().uri("/api/profile"), &registered).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // 只有管理员可以审核
    let other = seed_member(&storage, &admin, "someparent", ApprovalProfile::None).await;
    let req = as_user(
        test::TestRequest::post().uri(&format!("/api/admin/accounts/{user_id}/approve")),
        &other,
    )
    .set_json(json!({}))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = as_user(
        test::TestRequest::post().uri(&format!("/api/admin/accounts/{user_id}/approve")),
        &admin,
    )
    .set_json(json!({}))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let approved = storage.get_user_by_id(user_id).await.unwrap().unwrap();
    assert_eq!(approved.status, UserStatus::Active);
    assert!(storage.get_student_by_user_id(user_id).await.unwrap().is_some());

    let req = as_user(test::TestRequest::get().uri("/api/profile"), &approved).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // 重复审核是非法的状态迁移
    let req = as_user(
        test::TestRequest::post().uri(&format!("/api/admin/accounts/{user_id}/approve")),
        &admin,
    )
    .set_json(json!({}))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_drop_requires_approved_enrollment() {
    let storage = memory_storage().await;
    let admin = seed_admin(&storage).await;
    let teacher = seed_member(&storage, &admin, "tturing", instructor_profile()).await;
    let student = seed_member(&storage, &admin, "alovelace", student_profile("S2026001")).await;
    let instructor = storage
        .get_instructor_by_user_id(teacher.id)
        .await
        .unwrap()
        .expect("instructor profile");
    let app = lms_app!(storage);

    let post = |uri: &str, body: Value, user: &User| {
        as_user(test::TestRequest::post().uri(uri), user)
            .set_json(body)
            .to_request()
    };

    let resp = test::call_service(
        &app,
        post("/api/admin/departments", json!({"code": "cs", "name": "Computer Science"}), &admin),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let department: Value = test::read_body_json(resp).await;
    assert_eq!(department["data"]["code"], "CS");

    let resp = test::call_service(
        &app,
        post(
            "/api/admin/semesters",
            json!({"name": "Fall 2026", "start_date": "2026-09-01", "end_date": "2026-12-20"}),
            &admin,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let semester_id = data_id(&test::read_body_json(resp).await);

    let resp = test::call_service(
        &app,
        post(
            "/api/admin/courses",
            json!({
                "code": "cs101",
                "title": "Programming Fundamentals",
                "credits": 3,
                "department_id": data_id(&department)
            }),
            &admin,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let course_id = data_id(&test::read_body_json(resp).await);

    let resp = test::call_service(
        &app,
        post(
            "/api/admin/offered-courses",
            json!({
                "course_id": course_id,
                "semester_id": semester_id,
                "instructor_id": instructor.id,
                "capacity": 30
            }),
            &admin,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let offered_id = data_id(&test::read_body_json(resp).await);

    let resp = test::call_service(
        &app,
        post("/api/student/enrollments", json!({"offered_course_id": offered_id}), &student),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let enrollment_id = data_id(&test::read_body_json(resp).await);

    // 同一门课不能重复申请
    let resp = test::call_service(
        &app,
        post("/api/student/enrollments", json!({"offered_course_id": offered_id}), &student),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // 尚未审批的选课不能退
    let resp = test::call_service(
        &app,
        post(
            &format!("/api/student/enrollments/{enrollment_id}/drop"),
            json!({"reason": "schedule clash"}),
            &student,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // 教师不能走学生路由
    let resp = test::call_service(
        &app,
        post(
            &format!("/api/student/enrollments/{enrollment_id}/drop"),
            json!({}),
            &teacher,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_overlapping_reservation_reports_conflicts() {
    let storage = memory_storage().await;
    let admin = seed_admin(&storage).await;
    let teacher = seed_member(&storage, &admin, "ghopper", instructor_profile()).await;
    let student = seed_member(&storage, &admin, "kjohnson", student_profile("S2026002")).await;
    let app = lms_app!(storage);

    // 非管理员不能建教室
    let req = as_user(test::TestRequest::post().uri("/api/rooms"), &teacher)
        .set_json(json!({"name": "B-101", "capacity": 40}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = as_user(test::TestRequest::post().uri("/api/rooms"), &admin)
        .set_json(json!({"name": "B-101", "building": "Bell Hall", "capacity": 40}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let room_id = data_id(&test::read_body_json(resp).await);

    let start = Utc::now() + Duration::days(2);
    let req = as_user(
        test::TestRequest::post().uri(&format!("/api/rooms/{room_id}/reservations")),
        &teacher,
    )
    .set_json(json!({
        "start_at": start,
        "end_at": start + Duration::hours(2),
        "purpose": "Office hours"
    }))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let first_id = data_id(&test::read_body_json(resp).await);

    let req = as_user(
        test::TestRequest::post().uri(&format!("/api/rooms/reservations/{first_id}/approve")),
        &admin,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = as_user(
        test::TestRequest::post().uri(&format!("/api/rooms/{room_id}/reservations")),
        &student,
    )
    .set_json(json!({
        "start_at": start + Duration::hours(1),
        "end_at": start + Duration::hours(3),
        "purpose": "Study group"
    }))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["conflicts"], 1);
    assert_eq!(body["data"]["conflicting_ids"], json!([first_id]));

    // 首尾相接不算重叠
    let req = as_user(
        test::TestRequest::post().uri(&format!("/api/rooms/{room_id}/reservations")),
        &student,
    )
    .set_json(json!({
        "start_at": start + Duration::hours(2),
        "end_at": start + Duration::hours(3),
        "purpose": "Study group"
    }))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn test_prerequisite_cycle_is_rejected() {
    let storage = memory_storage().await;
    let admin = seed_admin(&storage).await;
    let app = lms_app!(storage);

    let req = as_user(test::TestRequest::post().uri("/api/admin/departments"), &admin)
        .set_json(json!({"code": "MATH", "name": "Mathematics"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let department_id = data_id(&test::read_body_json(resp).await);

    let mut course_ids = Vec::new();
    for code in ["MATH101", "MATH201", "MATH301"] {
        let req = as_user(test::TestRequest::post().uri("/api/admin/courses"), &admin)
            .set_json(json!({
                "code": code,
                "title": format!("{code} course"),
                "credits": 4,
                "department_id": department_id
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        course_ids.push(data_id(&test::read_body_json(resp).await));
    }
    let (calc1, calc2, calc3) = (course_ids[0], course_ids[1], course_ids[2]);

    let add = |course: i64, prerequisite: i64| {
        as_user(
            test::TestRequest::post().uri(&format!("/api/admin/courses/{course}/prerequisites")),
            &admin,
        )
        .set_json(json!({"prerequisite_id": prerequisite}))
        .to_request()
    };

    assert_eq!(test::call_service(&app, add(calc2, calc1)).await.status(), StatusCode::CREATED);
    assert_eq!(test::call_service(&app, add(calc3, calc2)).await.status(), StatusCode::CREATED);
    assert_eq!(test::call_service(&app, add(calc1, calc3)).await.status(), StatusCode::CONFLICT);
    assert_eq!(test::call_service(&app, add(calc1, calc1)).await.status(), StatusCode::BAD_REQUEST);
    assert_eq!(test::call_service(&app, add(calc3, calc2)).await.status(), StatusCode::CONFLICT);

    // 目录查询无需身份
    let req = test::TestRequest::get()
        .uri(&format!("/api/course/courses/{calc3}/prerequisites"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn test_seat_count_follows_enrollment_transitions() {
    let storage = memory_storage().await;
    let admin = seed_admin(&storage).await;
    let teacher = seed_member(&storage, &admin, "bliskov", instructor_profile()).await;
    let first = seed_member(&storage, &admin, "mhamilton", student_profile("S2026010")).await;
    let second = seed_member(&storage, &admin, "dknuth", student_profile("S2026011")).await;
    let term = seed_term(&storage).await;
    let offering = seed_offering(&storage, term, &teacher, "CS201", 3, 1).await;
    let app = lms_app!(storage);

    let enroll = |student: &User| {
        post_as(
            "/api/student/enrollments",
            student,
            json!({"offered_course_id": offering.id}),
        )
        .to_request()
    };
    let resp = test::call_service(&app, enroll(&first)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let first_id = data_id(&test::read_body_json(resp).await);
    // 待审申请不占名额
    let resp = test::call_service(&app, enroll(&second)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let second_id = data_id(&test::read_body_json(resp).await);
    assert_eq!(enrolled_count(&storage, offering.id).await, 0);

    let review = |id: i64, verdict: &str, body: Value| {
        let uri = format!("/api/instructors/advising/requests/{id}/{verdict}");
        post_as(&uri, &admin, body).to_request()
    };

    let resp = test::call_service(
        &app,
        review(first_id, "approve", json!({"note": "Welcome aboard"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(enrolled_count(&storage, offering.id).await, 1);

    // 名额已满，审批被拒且申请保持待审
    let resp = test::call_service(&app, review(second_id, "approve", json!({}))).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let pending = storage.get_enrollment(second_id).await.unwrap().unwrap();
    assert_eq!(pending.status, EnrollmentStatus::Pending);
    assert_eq!(enrolled_count(&storage, offering.id).await, 1);

    let resp = test::call_service(&app, review(second_id, "reject", json!({}))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    // 已拒绝的申请不能再处理
    let resp = test::call_service(&app, review(second_id, "reject", json!({}))).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let resp = test::call_service(&app, review(second_id, "approve", json!({}))).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = test::call_service(
        &app,
        post_as(
            &format!("/api/student/enrollments/{first_id}/drop"),
            &first,
            json!({"reason": "Schedule clash"}),
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    // 退课待审期间仍占名额
    assert_eq!(enrolled_count(&storage, offering.id).await, 1);

    let resp = test::call_service(&app, review(first_id, "approve", json!({}))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let dropped = storage.get_enrollment(first_id).await.unwrap().unwrap();
    assert_eq!(dropped.status, EnrollmentStatus::Dropped);
    assert_eq!(enrolled_count(&storage, offering.id).await, 0);

    assert_eq!(
        attribute_names(&storage, EntityType::Enrollment, first_id).await,
        vec!["drop_reason".to_string(), "review_note".to_string()]
    );
}

#[actix_web::test]
async fn test_semester_credit_limit_counts_pending_requests() {
    let storage = memory_storage().await;
    let admin = seed_admin(&storage).await;
    let teacher = seed_member(&storage, &admin, "eckerr", instructor_profile()).await;
    let student = seed_member(&storage, &admin, "rgrace", student_profile("S2026012")).await;
    let term = seed_term(&storage).await;
    let heavy_a = seed_offering(&storage, term, &teacher, "CS301", 10, 30).await;
    let heavy_b = seed_offering(&storage, term, &teacher, "CS302", 10, 30).await;
    let light = seed_offering(&storage, term, &teacher, "CS303", 5, 30).await;
    let app = lms_app!(storage);

    for offering in [&heavy_a, &heavy_b] {
        let body = json!({"offered_course_id": offering.id});
        let req = post_as("/api/student/enrollments", &student, body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    // 20 + 5 超过默认的 21 学分
    let body = json!({"offered_course_id": light.id});
    let req = post_as("/api/student/enrollments", &student, body).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["message"].as_str().unwrap_or_default().contains("limit is 21"));
}

#[actix_web::test]
async fn test_reservation_approval_rechecks_conflicts() {
    let storage = memory_storage().await;
    let admin = seed_admin(&storage).await;
    let teacher = seed_member(&storage, &admin, "fallen", instructor_profile()).await;
    let student = seed_member(&storage, &admin, "jsammet", student_profile("S2026013")).await;
    let app = lms_app!(storage);

    let resp = test::call_service(
        &app,
        post_as("/api/rooms", &admin, json!({"name": "C-204", "capacity": 20})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let room_id = data_id(&test::read_body_json(resp).await);

    // 两条重叠的待审预约都能提交
    let start = Utc::now() + Duration::days(3);
    let mut pending = Vec::new();
    for (user, offset) in [(&teacher, 0), (&student, 1)] {
        let req = post_as(
            &format!("/api/rooms/{room_id}/reservations"),
            user,
            json!({
                "start_at": start + Duration::hours(offset),
                "end_at": start + Duration::hours(offset + 2),
                "purpose": "Review session"
            }),
        );
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        pending.push(data_id(&test::read_body_json(resp).await));
    }
    let (teacher_booking, student_booking) = (pending[0], pending[1]);

    let action = |id: i64, verb: &str, user: &User| {
        as_user(
            test::TestRequest::post().uri(&format!("/api/rooms/reservations/{id}/{verb}")),
            user,
        )
        .to_request()
    };

    let resp = test::call_service(&app, action(teacher_booking, "approve", &admin)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, action(student_booking, "approve", &admin)).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["conflicting_ids"], json!([teacher_booking]));

    // 已批准的预约只能取消，不能拒绝
    let resp = test::call_service(&app, action(teacher_booking, "reject", &admin)).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let resp = test::call_service(&app, action(teacher_booking, "cancel", &student)).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let resp = test::call_service(&app, action(teacher_booking, "cancel", &teacher)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = test::call_service(&app, action(teacher_booking, "cancel", &teacher)).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // 冲突解除后可以批准
    let resp = test::call_service(&app, action(student_booking, "approve", &admin)).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_finalized_grade_stores_letter_and_points() {
    let storage = memory_storage().await;
    let admin = seed_admin(&storage).await;
    let teacher = seed_member(&storage, &admin, "ldeutsch", instructor_profile()).await;
    let outsider = seed_member(&storage, &admin, "wkahan", instructor_profile()).await;
    let student = seed_member(&storage, &admin, "nwirth", student_profile("S2026014")).await;
    let term = seed_term(&storage).await;
    let offering = seed_offering(&storage, term, &teacher, "CS401", 4, 30).await;
    let enrollment = approved_enrollment(&storage, &admin, &student, &offering).await;
    let app = lms_app!(storage);

    let put = |uri: String, user: &User, body: Value| {
        as_user(test::TestRequest::put().uri(&uri), user)
            .set_json(body)
            .to_request()
    };
    let components_uri = format!(
        "/api/instructors/offered-courses/{}/grade-components",
        offering.id
    );
    let scores_uri = format!("/api/instructors/enrollments/{}/scores", enrollment.id);
    let grade_uri = format!("/api/instructors/enrollments/{}/grade", enrollment.id);

    let resp = test::call_service(
        &app,
        put(
            components_uri.clone(),
            &teacher,
            json!({"components": [
                {"name": "midterm", "weight": 40},
                {"name": "final", "weight": 50}
            ]}),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(
        &app,
        put(
            components_uri,
            &teacher,
            json!({"components": [
                {"name": "midterm", "weight": 40},
                {"name": "final", "weight": 60}
            ]}),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    for (component, score) in [("midterm", 80.0), ("final", 90.0)] {
        let resp = test::call_service(
            &app,
            put(scores_uri.clone(), &teacher, json!({"component": component, "score": score})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
    let resp = test::call_service(
        &app,
        put(scores_uri, &teacher, json!({"component": "project", "score": 70})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 非授课教师不能定成绩
    let req = post_as(&grade_uri, &outsider, json!({})).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = post_as(&grade_uri, &teacher, json!({})).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["letter"], "B");
    assert_eq!(body["data"]["grade_points"], 3.0);

    let grade = storage
        .get_grade_by_enrollment(enrollment.id)
        .await
        .unwrap()
        .expect("grade row written");
    assert!((grade.total_score - 86.0).abs() < 1e-9);
    assert_eq!(grade.letter, LetterGrade::B);
    assert_eq!(grade.grade_points, 3.0);
    assert_eq!(grade.graded_by, teacher.id);
}

#[actix_web::test]
async fn test_quiz_accepts_a_single_non_empty_submission() {
    let storage = memory_storage().await;
    let admin = seed_admin(&storage).await;
    let teacher = seed_member(&storage, &admin, "fcorbato", instructor_profile()).await;
    let student = seed_member(&storage, &admin, "bkernighan", student_profile("S2026015")).await;
    let stranger = seed_member(&storage, &admin, "dritchie", student_profile("S2026016")).await;
    let term = seed_term(&storage).await;
    let offering = seed_offering(&storage, term, &teacher, "CS110", 3, 30).await;
    approved_enrollment(&storage, &admin, &student, &offering).await;
    let app = lms_app!(storage);

    let now = Utc::now();
    let resp = test::call_service(
        &app,
        post_as(
            &format!("/api/instructors/offered-courses/{}/quizzes", offering.id),
            &teacher,
            json!({
                "title": "Week 1 check",
                "opens_at": now - Duration::hours(1),
                "closes_at": now + Duration::days(1)
            }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let quiz_id = data_id(&test::read_body_json(resp).await);

    let resp = test::call_service(
        &app,
        post_as(
            &format!("/api/instructors/quizzes/{quiz_id}/questions"),
            &teacher,
            json!({
                "kind": "true_false",
                "prompt": "A byte has eight bits.",
                "correct_answer": "true",
                "points": 5
            }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let question_id = data_id(&test::read_body_json(resp).await);

    let answers_uri = format!("/api/student/quizzes/{quiz_id}/answers");
    let answer_sheet = json!({"answers": [{"question_id": question_id, "answer": "True"}]});
    let submit = |user: &User, body: Value| post_as(&answers_uri, user, body).to_request();

    // 空答卷不算一次提交
    let resp = test::call_service(&app, submit(&student, json!({"answers": []}))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(&app, submit(&stranger, answer_sheet.clone())).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = test::call_service(&app, submit(&student, answer_sheet.clone())).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["awarded"], 5.0);

    let resp = test::call_service(&app, submit(&student, answer_sheet)).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let resp = test::call_service(&app, submit(&student, json!({"answers": []}))).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_message_permissions_follow_roles() {
    let storage = memory_storage().await;
    let admin = seed_admin(&storage).await;
    let teacher = seed_member(&storage, &admin, "jmccarthy", instructor_profile()).await;
    let student = seed_member(&storage, &admin, "sgoldwasser", student_profile("S2026017")).await;
    let classmate = seed_member(&storage, &admin, "smicali", student_profile("S2026018")).await;
    let parent = seed_member(&storage, &admin, "pgoldwasser", ApprovalProfile::None).await;
    let app = lms_app!(storage);

    let send = |from: &User, to: &User| {
        post_as(
            "/api/message/send",
            from,
            json!({
                "recipient_id": to.id,
                "subject": "Office hours",
                "body": "Can we meet on Friday?"
            }),
        )
        .to_request()
    };

    let resp = test::call_service(&app, send(&student, &classmate)).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    // 未关联的家长与学生之间不能互发
    let resp = test::call_service(&app, send(&parent, &student)).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let resp = test::call_service(&app, send(&student, &teacher)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let resp = test::call_service(&app, send(&teacher, &student)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = as_user(test::TestRequest::get().uri("/api/message/unread-count"), &student)
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["unread"], 1);

    let req = as_user(test::TestRequest::get().uri("/api/message/inbox"), &classmate).to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn test_course_announcement_reaches_enrolled_students_only() {
    let storage = memory_storage().await;
    let admin = seed_admin(&storage).await;
    let teacher = seed_member(&storage, &admin, "bstroustrup", instructor_profile()).await;
    let other_teacher = seed_member(&storage, &admin, "jgosling", instructor_profile()).await;
    let enrolled = seed_member(&storage, &admin, "gvrossum", student_profile("S2026019")).await;
    let outsider = seed_member(&storage, &admin, "ymatsumoto", student_profile("S2026020")).await;
    let term = seed_term(&storage).await;
    let offering = seed_offering(&storage, term, &teacher, "CS220", 3, 30).await;
    approved_enrollment(&storage, &admin, &enrolled, &offering).await;
    let app = lms_app!(storage);

    let notice = json!({
        "title": "Lab moved",
        "body": "Thursday's lab meets in C-204.",
        "offered_course_id": offering.id
    });
    let resp = test::call_service(
        &app,
        post_as("/api/instructors/announcements", &other_teacher, notice.clone()).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let resp = test::call_service(
        &app,
        post_as("/api/instructors/announcements", &teacher, notice).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let visible = |user: &User| {
        as_user(test::TestRequest::get().uri("/api/announcements"), user).to_request()
    };
    for (user, expected) in [(&enrolled, 1), (&outsider, 0), (&teacher, 1), (&admin, 1)] {
        let resp = test::call_service(&app, visible(user)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["data"]["items"].as_array().map(Vec::len),
            Some(expected),
            "announcements visible to {}",
            user.username
        );
    }
}

#[actix_web::test]
async fn test_deleting_owners_releases_seats_and_attributes() {
    let storage = memory_storage().await;
    let admin = seed_admin(&storage).await;
    let teacher = seed_member(&storage, &admin, "aperlis", instructor_profile()).await;
    let student = seed_member(&storage, &admin, "cshannon", student_profile("S2026021")).await;
    let term = seed_term(&storage).await;
    let kept = seed_offering(&storage, term, &teacher, "CS230", 3, 30).await;
    let retired = seed_offering(&storage, term, &teacher, "CS231", 3, 30).await;

    let enrollment = approved_enrollment(&storage, &admin, &student, &kept).await;
    storage
        .set_attribute(
            EntityType::Enrollment,
            enrollment.id,
            "score.midterm",
            AttributeValue::Decimal(75.0),
        )
        .await
        .expect("record score");
    let other = seed_member(&storage, &admin, "jvneumann", student_profile("S2026022")).await;
    let retired_enrollment = approved_enrollment(&storage, &admin, &other, &retired).await;
    storage
        .set_attribute(
            EntityType::OfferedCourse,
            retired.id,
            "component.final",
            AttributeValue::Decimal(100.0),
        )
        .await
        .expect("configure component");
    assert_eq!(enrolled_count(&storage, kept.id).await, 1);
    let app = lms_app!(storage);

    let req = as_user(
        test::TestRequest::delete().uri(&format!("/api/admin/users/{}", student.id)),
        &admin,
    )
    .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    assert_eq!(enrolled_count(&storage, kept.id).await, 0);
    assert!(storage.get_enrollment(enrollment.id).await.unwrap().is_none());
    assert!(attribute_names(&storage, EntityType::Enrollment, enrollment.id).await.is_empty());

    let req = as_user(
        test::TestRequest::delete().uri(&format!("/api/admin/offered-courses/{}", retired.id)),
        &admin,
    )
    .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    assert!(attribute_names(&storage, EntityType::OfferedCourse, retired.id).await.is_empty());
    assert!(
        attribute_names(&storage, EntityType::Enrollment, retired_enrollment.id)
            .await
            .is_empty()
    );
}
