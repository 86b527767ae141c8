//! 运行期配置改写后的行为
//!
//! 动态配置是进程级的，单独成一个测试二进制，且只有一个顺序执行的用例。

use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use chrono::{Duration, Utc};
use sea_orm::{ConnectOptions, Database};
use serde_json::{Value, json};

use campus_lms::models::catalog::requests::{
    CreateCourseRequest, CreateDepartmentRequest, CreateOfferedCourseRequest, CreateSemesterRequest,
};
use campus_lms::models::users::entities::{User, UserRole, UserStatus};
use campus_lms::models::users::requests::{ApprovalProfile, NewUser};
use campus_lms::routes;
use campus_lms::storage::Storage;
use campus_lms::storage::sea_orm_storage::SeaOrmStorage;

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

async fn seed_user(
    storage: &Arc<dyn Storage>,
    username: &str,
    role: UserRole,
    status: UserStatus,
) -> User {
    storage
        .create_user(NewUser {
            username: username.to_string(),
            email: format!("{username}@campus.edu"),
            full_name: format!("Test {username}"),
            phone: None,
            role,
            status,
            department_id: None,
        })
        .await
        .expect("create user")
}

fn as_user(req: test::TestRequest, user: &User) -> test::TestRequest {
    req.insert_header(("X-User-Id", user.id.to_string()))
}

#[actix_web::test]
async fn test_runtime_settings_change_request_handling() {
    let storage = memory_storage().await;
    let admin = seed_user(&storage, "registrar", UserRole::Admin, UserStatus::Active).await;
    let pending_teacher =
        seed_user(&storage, "aturing", UserRole::Instructor, UserStatus::Pending).await;
    let teacher = storage
        .approve_account(
            pending_teacher.id,
            admin.id,
            ApprovalProfile::Instructor {
                department_id: None,
                title: None,
            },
        )
        .await
        .expect("approve instructor");
    let pending_student =
        seed_user(&storage, "ehopper", UserRole::Student, UserStatus::Pending).await;
    let student = storage
        .approve_account(
            pending_student.id,
            admin.id,
            ApprovalProfile::Student {
                student_number: "S2026100".to_string(),
                department_id: None,
                advisor_id: None,
                enrollment_year: 2026,
            },
        )
        .await
        .expect("approve student");

    let department = storage
        .create_department(CreateDepartmentRequest {
            code: "EE".to_string(),
            name: "Electrical Engineering".to_string(),
            description: None,
        })
        .await
        .expect("create department");
    let semester = storage
        .create_semester(CreateSemesterRequest {
            name: "Spring 2027".to_string(),
            start_date: chrono::NaiveDate::from_ymd_opt(2027, 2, 1).expect("date"),
            end_date: chrono::NaiveDate::from_ymd_opt(2027, 6, 15).expect("date"),
        })
        .await
        .expect("create semester");
    let course = storage
        .create_course(CreateCourseRequest {
            code: "EE101".to_string(),
            title: "Circuits".to_string(),
            description: None,
            credits: 4,
            department_id: department.id,
        })
        .await
        .expect("create course");
    let instructor = storage
        .get_instructor_by_user_id(teacher.id)
        .await
        .unwrap()
        .expect("instructor profile");
    let offering = storage
        .create_offered_course(CreateOfferedCourseRequest {
            course_id: course.id,
            semester_id: semester.id,
            instructor_id: instructor.id,
            capacity: 30,
        })
        .await
        .expect("create offering");

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(storage.clone()))
            .configure(routes::configure_admin_routes)
            .configure(routes::configure_student_routes)
            .configure(routes::configure_room_routes),
    )
    .await;

    let setting = |key: &str, value: Value| {
        as_user(
            test::TestRequest::put().uri(&format!("/api/admin/settings/{key}")),
            &admin,
        )
        .set_json(json!({ "value": value }))
        .to_request()
    };

    // 每个整数配置都有上下限，越界值不会进入缓存
    for (key, value) in [
        ("reservation.max_hours", json!(i64::MAX)),
        ("reservation.max_hours", json!(0)),
        ("enrollment.max_credits", json!(61)),
        ("upload.max_size", json!(-1)),
    ] {
        let resp = test::call_service(&app, setting(key, value.clone())).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{key} = {value}");
    }

    let req = as_user(test::TestRequest::post().uri("/api/rooms"), &admin)
        .set_json(json!({"name": "E-110", "capacity": 60}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let room_id = body["data"]["id"].as_i64().expect("room id");

    let start = Utc::now() + Duration::days(5);
    let reserve = |offset: i64, hours: i64| {
        as_user(
            test::TestRequest::post().uri(&format!("/api/rooms/{room_id}/reservations")),
            &teacher,
        )
        .set_json(json!({
            "start_at": start + Duration::days(offset),
            "end_at": start + Duration::days(offset) + Duration::hours(hours),
            "purpose": "Lab session"
        }))
        .to_request()
    };

    // 被拒绝的越界值没有改变默认的 8 小时上限
    let resp = test::call_service(&app, reserve(0, 3)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = test::call_service(&app, setting("reservation.max_hours", json!(2))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = test::call_service(&app, reserve(1, 3)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let resp = test::call_service(&app, reserve(1, 2)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = test::call_service(&app, setting("reservation.max_hours", json!(8760))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = test::call_service(&app, reserve(2, 24)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let enroll = || {
        as_user(test::TestRequest::post().uri("/api/student/enrollments"), &student)
            .set_json(json!({"offered_course_id": offering.id}))
            .to_request()
    };

    let resp = test::call_service(&app, setting("enrollment.open", json!(false))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = test::call_service(&app, enroll()).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert!(
        body["message"]
            .as_str()
            .unwrap_or_default()
            .contains("closed")
    );

    // 学分上限调低后，4 学分的课超限
    let resp = test::call_service(&app, setting("enrollment.open", json!(true))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = test::call_service(&app, setting("enrollment.max_credits", json!(3))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = test::call_service(&app, enroll()).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = test::call_service(&app, setting("enrollment.max_credits", json!(21))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = test::call_service(&app, enroll()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}
