use super::SeaOrmStorage;
use crate::entity::announcements::{Column as AnnouncementColumn, Entity as Announcements};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::instructors::{
    ActiveModel as InstructorActiveModel, Column as InstructorColumn, Entity as Instructors,
};
use crate::entity::students::{
    ActiveModel as StudentActiveModel, Column as StudentColumn, Entity as Students,
};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{LmsError, Result};
use crate::models::{
    PaginationInfo,
    attributes::EntityType,
    users::{
        entities::{Instructor, Student, User, UserStatus},
        requests::{ApprovalProfile, NewUser, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: NewUser) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            full_name: Set(req.full_name),
            phone: Set(req.phone),
            role: Set(req.role.to_string()),
            status: Set(req.status.to_string()),
            department_id: Set(req.department_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to create user: {e}")))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to query user: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to query user: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to query user: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 分页列出用户
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Users::find();

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = contains_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Username.like(pattern.clone()))
                    .add(Column::Email.like(pattern.clone()))
                    .add(Column::FullName.like(pattern)),
            );
        }

        // 角色筛选
        if let Some(ref role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        // 状态筛选
        if let Some(ref status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select.order_by_desc(Column::CreatedAt).order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to count users: {e}")))?;

        let users = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to list users: {e}")))?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 统计用户数量
    pub async fn count_users_impl(&self) -> Result<u64> {
        let count = Users::find()
            .count(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to count users: {e}")))?;

        Ok(count)
    }

    /// 删除用户，外键级联之前先释放其选课名额并清理相关属性
    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;

        if let Some(student) = Students::find()
            .filter(StudentColumn::UserId.eq(id))
            .one(&txn)
            .await?
        {
            let enrollments = Enrollments::find()
                .filter(EnrollmentColumn::StudentId.eq(student.id))
                .all(&txn)
                .await?;
            Self::release_enrollments(&txn, enrollments).await?;
        }

        let announcement_ids: Vec<i64> = Announcements::find()
            .filter(AnnouncementColumn::AuthorId.eq(id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|a| a.id)
            .collect();
        Self::delete_attributes_of(&txn, EntityType::Announcement, &announcement_ids).await?;

        let result = Users::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to delete user: {e}")))?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }

    /// 按预期状态更新账号状态，状态不符时返回 InvalidState
    pub async fn set_user_status_impl(
        &self,
        id: i64,
        expected: UserStatus,
        status: UserStatus,
    ) -> Result<User> {
        let txn = self.db.begin().await?;

        let existing = Users::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| LmsError::not_found(format!("User {id} not found")))?;

        if existing.status != expected.to_string() {
            return Err(LmsError::invalid_state(format!(
                "Account is '{}', expected '{expected}'",
                existing.status
            )));
        }

        let mut model: ActiveModel = existing.into();
        model.status = Set(status.to_string());
        model.updated_at = Set(chrono::Utc::now().timestamp());
        let updated = model.update(&txn).await?;

        txn.commit().await?;
        Ok(updated.into_user())
    }

    /// 审核通过账号，并在同一事务中写入学生或教师档案
    pub async fn approve_account_impl(
        &self,
        user_id: i64,
        approver_id: i64,
        profile: ApprovalProfile,
    ) -> Result<User> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        let existing = Users::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| LmsError::not_found(format!("User {user_id} not found")))?;

        if existing.status != UserStatus::Pending.to_string() {
            return Err(LmsError::invalid_state(format!(
                "Only pending accounts can be approved, account is '{}'",
                existing.status
            )));
        }

        let mut model: ActiveModel = existing.into();
        model.status = Set(UserStatus::Active.to_string());
        model.approved_at = Set(Some(now));
        model.approved_by = Set(Some(approver_id));
        model.updated_at = Set(now);

        match profile {
            ApprovalProfile::Student {
                student_number,
                department_id,
                advisor_id,
                enrollment_year,
            } => {
                model.department_id = Set(department_id);
                StudentActiveModel {
                    user_id: Set(user_id),
                    student_number: Set(student_number),
                    department_id: Set(department_id),
                    advisor_id: Set(advisor_id),
                    parent_user_id: Set(None),
                    enrollment_year: Set(enrollment_year),
                    created_at: Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
            }
            ApprovalProfile::Instructor {
                department_id,
                title,
            } => {
                model.department_id = Set(department_id);
                InstructorActiveModel {
                    user_id: Set(user_id),
                    department_id: Set(department_id),
                    title: Set(title),
                    office: Set(None),
                    created_at: Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
            }
            ApprovalProfile::None => {}
        }

        let updated = model.update(&txn).await?;
        txn.commit().await?;

        Ok(updated.into_user())
    }

    pub async fn student_number_exists_impl(&self, student_number: &str) -> Result<bool> {
        let count = Students::find()
            .filter(StudentColumn::StudentNumber.eq(student_number))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to query student: {e}")))?;
        Ok(result.map(|m| m.into_student()))
    }

    pub async fn get_student_by_user_id_impl(&self, user_id: i64) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(StudentColumn::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to query student: {e}")))?;
        Ok(result.map(|m| m.into_student()))
    }

    pub async fn get_instructor_by_id_impl(&self, id: i64) -> Result<Option<Instructor>> {
        let result = Instructors::find_by_id(id).one(&self.db).await.map_err(|e| {
            LmsError::database_operation(format!("Failed to query instructor: {e}"))
        })?;
        Ok(result.map(|m| m.into_instructor()))
    }

    pub async fn get_instructor_by_user_id_impl(
        &self,
        user_id: i64,
    ) -> Result<Option<Instructor>> {
        let result = Instructors::find()
            .filter(InstructorColumn::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                LmsError::database_operation(format!("Failed to query instructor: {e}"))
            })?;
        Ok(result.map(|m| m.into_instructor()))
    }

    pub async fn list_students_by_parent_impl(&self, parent_user_id: i64) -> Result<Vec<Student>> {
        let result = Students::find()
            .filter(StudentColumn::ParentUserId.eq(parent_user_id))
            .order_by_asc(StudentColumn::Id)
            .all(&self.db)
            .await?;
        Ok(result.into_iter().map(|m| m.into_student()).collect())
    }

    pub async fn list_students_by_advisor_impl(&self, instructor_id: i64) -> Result<Vec<Student>> {
        let result = Students::find()
            .filter(StudentColumn::AdvisorId.eq(instructor_id))
            .order_by_asc(StudentColumn::Id)
            .all(&self.db)
            .await?;
        Ok(result.into_iter().map(|m| m.into_student()).collect())
    }

    pub async fn set_student_advisor_impl(
        &self,
        student_id: i64,
        instructor_id: i64,
    ) -> Result<Option<Student>> {
        let Some(existing) = Students::find_by_id(student_id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut model: StudentActiveModel = existing.into();
        model.advisor_id = Set(Some(instructor_id));
        let updated = model.update(&self.db).await.map_err(|e| {
            LmsError::database_operation(format!("Failed to assign advisor: {e}"))
        })?;
        Ok(Some(updated.into_student()))
    }

    pub async fn set_student_parent_impl(
        &self,
        student_id: i64,
        parent_user_id: i64,
    ) -> Result<Option<Student>> {
        let Some(existing) = Students::find_by_id(student_id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut model: StudentActiveModel = existing.into();
        model.parent_user_id = Set(Some(parent_user_id));
        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to link parent: {e}")))?;
        Ok(Some(updated.into_student()))
    }
}
