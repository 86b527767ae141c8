use super::SeaOrmStorage;
use crate::entity::course_prerequisites::{
    ActiveModel as PrerequisiteActiveModel, Column as PrerequisiteColumn,
    Entity as CoursePrerequisites,
};
use crate::entity::courses::{
    ActiveModel as CourseActiveModel, Column as CourseColumn, Entity as Courses,
};
use crate::entity::departments::{
    ActiveModel as DepartmentActiveModel, Column as DepartmentColumn, Entity as Departments,
};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::offered_courses::{
    ActiveModel as OfferedActiveModel, Column as OfferedColumn, Entity as OfferedCourses,
};
use crate::entity::sections::{
    ActiveModel as SectionActiveModel, Column as SectionColumn, Entity as Sections,
};
use crate::entity::semesters::{
    ActiveModel as SemesterActiveModel, Column as SemesterColumn, Entity as Semesters,
};
use crate::errors::{LmsError, Result};
use crate::models::attributes::EntityType;
use crate::models::catalog::{
    entities::{Course, Department, OfferedCourse, Prerequisite, Section, Semester},
    requests::{
        CourseListQuery, CreateCourseRequest, CreateDepartmentRequest, CreateOfferedCourseRequest,
        CreateSectionRequest, CreateSemesterRequest, OfferedCourseListQuery, UpdateCourseRequest,
        UpdateDepartmentRequest, UpdateOfferedCourseRequest,
    },
    responses::{CourseListResponse, OfferedCourseListResponse},
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait, sea_query::Expr,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

impl SeaOrmStorage {
    // ----- 院系 -----

    pub async fn create_department_impl(&self, req: CreateDepartmentRequest) -> Result<Department> {
        let model = DepartmentActiveModel {
            code: Set(req.code),
            name: Set(req.name),
            description: Set(req.description),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            LmsError::database_operation(format!("Failed to create department: {e}"))
        })?;

        Ok(result.into_department())
    }

    pub async fn get_department_impl(&self, id: i64) -> Result<Option<Department>> {
        let result = Departments::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_department()))
    }

    pub async fn get_department_by_code_impl(&self, code: &str) -> Result<Option<Department>> {
        let result = Departments::find()
            .filter(DepartmentColumn::Code.eq(code))
            .one(&self.db)
            .await?;
        Ok(result.map(|m| m.into_department()))
    }

    pub async fn list_departments_impl(&self) -> Result<Vec<Department>> {
        let result = Departments::find()
            .order_by_asc(DepartmentColumn::Code)
            .all(&self.db)
            .await
            .map_err(|e| {
                LmsError::database_operation(format!("Failed to list departments: {e}"))
            })?;
        Ok(result.into_iter().map(|m| m.into_department()).collect())
    }

    pub async fn update_department_impl(
        &self,
        id: i64,
        req: UpdateDepartmentRequest,
    ) -> Result<Option<Department>> {
        let Some(existing) = Departments::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model: DepartmentActiveModel = existing.into();
        if let Some(name) = req.name {
            model.name = Set(name);
        }
        if let Some(description) = req.description {
            model.description = Set(Some(description));
        }

        let updated = model.update(&self.db).await.map_err(|e| {
            LmsError::database_operation(format!("Failed to update department: {e}"))
        })?;
        Ok(Some(updated.into_department()))
    }

    pub async fn delete_department_impl(&self, id: i64) -> Result<bool> {
        let result = Departments::delete_by_id(id).exec(&self.db).await.map_err(|e| {
            LmsError::database_operation(format!("Failed to delete department: {e}"))
        })?;
        Ok(result.rows_affected > 0)
    }

    pub async fn count_courses_in_department_impl(&self, department_id: i64) -> Result<u64> {
        let count = Courses::find()
            .filter(CourseColumn::DepartmentId.eq(department_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    // ----- 学期 -----

    pub async fn create_semester_impl(&self, req: CreateSemesterRequest) -> Result<Semester> {
        let model = SemesterActiveModel {
            name: Set(req.name),
            start_date: Set(req.start_date.format(DATE_FORMAT).to_string()),
            end_date: Set(req.end_date.format(DATE_FORMAT).to_string()),
            is_active: Set(false),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            LmsError::database_operation(format!("Failed to create semester: {e}"))
        })?;

        Ok(result.into_semester())
    }

    pub async fn get_semester_impl(&self, id: i64) -> Result<Option<Semester>> {
        let result = Semesters::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_semester()))
    }

    pub async fn list_semesters_impl(&self) -> Result<Vec<Semester>> {
        let result = Semesters::find()
            .order_by_desc(SemesterColumn::StartDate)
            .all(&self.db)
            .await?;
        Ok(result.into_iter().map(|m| m.into_semester()).collect())
    }

    /// 同一时间只有一个激活学期
    pub async fn activate_semester_impl(&self, id: i64) -> Result<Option<Semester>> {
        let txn = self.db.begin().await?;

        let Some(existing) = Semesters::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        Semesters::update_many()
            .col_expr(SemesterColumn::IsActive, Expr::value(false))
            .filter(SemesterColumn::IsActive.eq(true))
            .exec(&txn)
            .await?;

        let mut model: SemesterActiveModel = existing.into();
        model.is_active = Set(true);
        let updated = model.update(&txn).await?;

        txn.commit().await?;
        Ok(Some(updated.into_semester()))
    }

    // ----- 课程 -----

    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();
        let model = CourseActiveModel {
            code: Set(req.code),
            title: Set(req.title),
            description: Set(req.description),
            credits: Set(req.credits),
            department_id: Set(req.department_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to create course: {e}")))?;

        Ok(result.into_course())
    }

    pub async fn get_course_impl(&self, id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_course()))
    }

    pub async fn get_course_by_code_impl(&self, code: &str) -> Result<Option<Course>> {
        let result = Courses::find()
            .filter(CourseColumn::Code.eq(code))
            .one(&self.db)
            .await?;
        Ok(result.map(|m| m.into_course()))
    }

    pub async fn get_courses_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Course>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let result = Courses::find()
            .filter(CourseColumn::Id.is_in(ids.iter().copied()))
            .order_by_asc(CourseColumn::Code)
            .all(&self.db)
            .await?;
        Ok(result.into_iter().map(|m| m.into_course()).collect())
    }

    pub async fn list_courses_impl(&self, query: CourseListQuery) -> Result<CourseListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Courses::find();

        if let Some(department_id) = query.department_id {
            select = select.filter(CourseColumn::DepartmentId.eq(department_id));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = contains_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(CourseColumn::Code.like(pattern.clone()))
                    .add(CourseColumn::Title.like(pattern)),
            );
        }

        let select = select.order_by_asc(CourseColumn::Code);
        let (items, pagination) = self.fetch_page(select, page, size).await?;

        Ok(CourseListResponse {
            items: items.into_iter().map(|m| m.into_course()).collect(),
            pagination,
        })
    }

    pub async fn update_course_impl(
        &self,
        id: i64,
        req: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        let Some(existing) = Courses::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model: CourseActiveModel = existing.into();
        if let Some(title) = req.title {
            model.title = Set(title);
        }
        if let Some(description) = req.description {
            model.description = Set(Some(description));
        }
        if let Some(credits) = req.credits {
            model.credits = Set(credits);
        }
        if let Some(department_id) = req.department_id {
            model.department_id = Set(department_id);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to update course: {e}")))?;
        Ok(Some(updated.into_course()))
    }

    pub async fn delete_course_impl(&self, id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to delete course: {e}")))?;
        Ok(result.rows_affected > 0)
    }

    pub async fn count_offerings_of_course_impl(&self, course_id: i64) -> Result<u64> {
        let count = OfferedCourses::find()
            .filter(OfferedColumn::CourseId.eq(course_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    // ----- 先修关系 -----

    pub async fn list_prerequisite_edges_impl(&self) -> Result<Vec<Prerequisite>> {
        let result = CoursePrerequisites::find().all(&self.db).await?;
        Ok(result.into_iter().map(|m| m.into_prerequisite()).collect())
    }

    pub async fn list_prerequisites_impl(&self, course_id: i64) -> Result<Vec<Course>> {
        let edges = CoursePrerequisites::find()
            .filter(PrerequisiteColumn::CourseId.eq(course_id))
            .all(&self.db)
            .await?;
        let ids: Vec<i64> = edges.into_iter().map(|e| e.prerequisite_id).collect();
        self.get_courses_by_ids_impl(&ids).await
    }

    pub async fn add_prerequisite_impl(
        &self,
        course_id: i64,
        prerequisite_id: i64,
    ) -> Result<Prerequisite> {
        let model = PrerequisiteActiveModel {
            course_id: Set(course_id),
            prerequisite_id: Set(prerequisite_id),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            LmsError::database_operation(format!("Failed to add prerequisite: {e}"))
        })?;
        Ok(result.into_prerequisite())
    }

    pub async fn remove_prerequisite_impl(
        &self,
        course_id: i64,
        prerequisite_id: i64,
    ) -> Result<bool> {
        let result = CoursePrerequisites::delete_many()
            .filter(PrerequisiteColumn::CourseId.eq(course_id))
            .filter(PrerequisiteColumn::PrerequisiteId.eq(prerequisite_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    // ----- 开课 -----

    pub async fn create_offered_course_impl(
        &self,
        req: CreateOfferedCourseRequest,
    ) -> Result<OfferedCourse> {
        let now = chrono::Utc::now().timestamp();
        let model = OfferedActiveModel {
            course_id: Set(req.course_id),
            semester_id: Set(req.semester_id),
            instructor_id: Set(req.instructor_id),
            capacity: Set(req.capacity),
            enrolled_count: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            LmsError::database_operation(format!("Failed to create offered course: {e}"))
        })?;
        Ok(result.into_offered_course())
    }

    pub async fn get_offered_course_impl(&self, id: i64) -> Result<Option<OfferedCourse>> {
        let result = OfferedCourses::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_offered_course()))
    }

    pub async fn find_offered_course_impl(
        &self,
        course_id: i64,
        semester_id: i64,
    ) -> Result<Option<OfferedCourse>> {
        let result = OfferedCourses::find()
            .filter(OfferedColumn::CourseId.eq(course_id))
            .filter(OfferedColumn::SemesterId.eq(semester_id))
            .one(&self.db)
            .await?;
        Ok(result.map(|m| m.into_offered_course()))
    }

    pub async fn list_offered_courses_impl(
        &self,
        query: OfferedCourseListQuery,
    ) -> Result<OfferedCourseListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = OfferedCourses::find();
        if let Some(semester_id) = query.semester_id {
            select = select.filter(OfferedColumn::SemesterId.eq(semester_id));
        }
        if let Some(course_id) = query.course_id {
            select = select.filter(OfferedColumn::CourseId.eq(course_id));
        }
        if let Some(instructor_id) = query.instructor_id {
            select = select.filter(OfferedColumn::InstructorId.eq(instructor_id));
        }
        let select = select.order_by_desc(OfferedColumn::Id);

        let (items, pagination) = self.fetch_page(select, page, size).await?;
        Ok(OfferedCourseListResponse {
            items: items.into_iter().map(|m| m.into_offered_course()).collect(),
            pagination,
        })
    }

    pub async fn list_offered_courses_by_ids_impl(
        &self,
        ids: &[i64],
    ) -> Result<Vec<OfferedCourse>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let result = OfferedCourses::find()
            .filter(OfferedColumn::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?;
        Ok(result.into_iter().map(|m| m.into_offered_course()).collect())
    }

    pub async fn list_offered_courses_by_instructor_impl(
        &self,
        instructor_id: i64,
    ) -> Result<Vec<OfferedCourse>> {
        let result = OfferedCourses::find()
            .filter(OfferedColumn::InstructorId.eq(instructor_id))
            .order_by_desc(OfferedColumn::SemesterId)
            .all(&self.db)
            .await?;
        Ok(result.into_iter().map(|m| m.into_offered_course()).collect())
    }

    pub async fn update_offered_course_impl(
        &self,
        id: i64,
        req: UpdateOfferedCourseRequest,
    ) -> Result<Option<OfferedCourse>> {
        let Some(existing) = OfferedCourses::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model: OfferedActiveModel = existing.into();
        if let Some(instructor_id) = req.instructor_id {
            model.instructor_id = Set(instructor_id);
        }
        if let Some(capacity) = req.capacity {
            model.capacity = Set(capacity);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model.update(&self.db).await.map_err(|e| {
            LmsError::database_operation(format!("Failed to update offered course: {e}"))
        })?;
        Ok(Some(updated.into_offered_course()))
    }

    /// 连同选课记录、成绩权重等属性一起删除
    pub async fn delete_offered_course_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;

        let enrollments = Enrollments::find()
            .filter(EnrollmentColumn::OfferedCourseId.eq(id))
            .all(&txn)
            .await?;
        Self::release_enrollments(&txn, enrollments).await?;
        Self::delete_attributes_of(&txn, EntityType::OfferedCourse, &[id]).await?;

        let result = OfferedCourses::delete_by_id(id).exec(&txn).await.map_err(|e| {
            LmsError::database_operation(format!("Failed to delete offered course: {e}"))
        })?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }

    // ----- 教学班 -----

    pub async fn create_section_impl(
        &self,
        offered_course_id: i64,
        req: CreateSectionRequest,
    ) -> Result<Section> {
        let model = SectionActiveModel {
            offered_course_id: Set(offered_course_id),
            section_number: Set(req.section_number),
            instructor_id: Set(req.instructor_id),
            room_id: Set(req.room_id),
            schedule: Set(req.schedule),
            capacity: Set(req.capacity),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to create section: {e}")))?;
        Ok(result.into_section())
    }

    pub async fn get_section_impl(&self, id: i64) -> Result<Option<Section>> {
        let result = Sections::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_section()))
    }

    pub async fn list_sections_impl(&self, offered_course_id: i64) -> Result<Vec<Section>> {
        let result = Sections::find()
            .filter(SectionColumn::OfferedCourseId.eq(offered_course_id))
            .order_by_asc(SectionColumn::SectionNumber)
            .all(&self.db)
            .await?;
        Ok(result.into_iter().map(|m| m.into_section()).collect())
    }

    pub async fn delete_section_impl(&self, id: i64) -> Result<bool> {
        let result = Sections::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
