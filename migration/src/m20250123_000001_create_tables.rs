use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Username).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::FullName).string().not_null())
                    .col(ColumnDef::new(Users::Phone).string().null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(ColumnDef::new(Users::DepartmentId).big_integer().null())
                    .col(ColumnDef::new(Users::ApprovedAt).big_integer().null())
                    .col(ColumnDef::new(Users::ApprovedBy).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建院系表
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Departments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Departments::Code).string().not_null().unique_key())
                    .col(ColumnDef::new(Departments::Name).string().not_null())
                    .col(ColumnDef::new(Departments::Description).text().null())
                    .col(ColumnDef::new(Departments::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建学生档案表
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::UserId).big_integer().not_null().unique_key())
                    .col(ColumnDef::new(Students::StudentNumber).string().not_null().unique_key())
                    .col(ColumnDef::new(Students::DepartmentId).big_integer().null())
                    .col(ColumnDef::new(Students::AdvisorId).big_integer().null())
                    .col(ColumnDef::new(Students::ParentUserId).big_integer().null())
                    .col(ColumnDef::new(Students::EnrollmentYear).integer().not_null())
                    .col(ColumnDef::new(Students::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建教师档案表
        manager
            .create_table(
                Table::create()
                    .table(Instructors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Instructors::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Instructors::UserId).big_integer().not_null().unique_key())
                    .col(ColumnDef::new(Instructors::DepartmentId).big_integer().null())
                    .col(ColumnDef::new(Instructors::Title).string().null())
                    .col(ColumnDef::new(Instructors::Office).string().null())
                    .col(ColumnDef::new(Instructors::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Instructors::Table, Instructors::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建资料修改申请表
        manager
            .create_table(
                Table::create()
                    .table(ProfileChanges::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProfileChanges::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProfileChanges::UserId).big_integer().not_null())
                    .col(ColumnDef::new(ProfileChanges::Field).string().not_null())
                    .col(ColumnDef::new(ProfileChanges::OldValue).text().null())
                    .col(ColumnDef::new(ProfileChanges::NewValue).text().not_null())
                    .col(ColumnDef::new(ProfileChanges::Status).string().not_null())
                    .col(ColumnDef::new(ProfileChanges::RequestedAt).big_integer().not_null())
                    .col(ColumnDef::new(ProfileChanges::ReviewedAt).big_integer().null())
                    .col(ColumnDef::new(ProfileChanges::ReviewedBy).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProfileChanges::Table, ProfileChanges::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学期表
        manager
            .create_table(
                Table::create()
                    .table(Semesters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Semesters::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Semesters::Name).string().not_null())
                    .col(ColumnDef::new(Semesters::StartDate).string().not_null())
                    .col(ColumnDef::new(Semesters::EndDate).string().not_null())
                    .col(ColumnDef::new(Semesters::IsActive).boolean().not_null())
                    .col(ColumnDef::new(Semesters::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建课程表
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::Code).string().not_null().unique_key())
                    .col(ColumnDef::new(Courses::Title).string().not_null())
                    .col(ColumnDef::new(Courses::Description).text().null())
                    .col(ColumnDef::new(Courses::Credits).integer().not_null())
                    .col(ColumnDef::new(Courses::DepartmentId).big_integer().not_null())
                    .col(ColumnDef::new(Courses::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Courses::Table, Courses::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建先修课程表
        manager
            .create_table(
                Table::create()
                    .table(CoursePrerequisites::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CoursePrerequisites::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CoursePrerequisites::CourseId).big_integer().not_null())
                    .col(
                        ColumnDef::new(CoursePrerequisites::PrerequisiteId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CoursePrerequisites::Table, CoursePrerequisites::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CoursePrerequisites::Table, CoursePrerequisites::PrerequisiteId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建开课表
        manager
            .create_table(
                Table::create()
                    .table(OfferedCourses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OfferedCourses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OfferedCourses::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(OfferedCourses::SemesterId).big_integer().not_null())
                    .col(ColumnDef::new(OfferedCourses::InstructorId).big_integer().not_null())
                    .col(ColumnDef::new(OfferedCourses::Capacity).integer().not_null())
                    .col(ColumnDef::new(OfferedCourses::EnrolledCount).integer().not_null())
                    .col(ColumnDef::new(OfferedCourses::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(OfferedCourses::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(OfferedCourses::Table, OfferedCourses::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(OfferedCourses::Table, OfferedCourses::SemesterId)
                            .to(Semesters::Table, Semesters::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建教学班表
        manager
            .create_table(
                Table::create()
                    .table(Sections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sections::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sections::OfferedCourseId).big_integer().not_null())
                    .col(ColumnDef::new(Sections::SectionNumber).string().not_null())
                    .col(ColumnDef::new(Sections::InstructorId).big_integer().null())
                    .col(ColumnDef::new(Sections::RoomId).big_integer().null())
                    .col(ColumnDef::new(Sections::Schedule).string().null())
                    .col(ColumnDef::new(Sections::Capacity).integer().not_null())
                    .col(ColumnDef::new(Sections::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Sections::Table, Sections::OfferedCourseId)
                            .to(OfferedCourses::Table, OfferedCourses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建选课表
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enrollments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Enrollments::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Enrollments::OfferedCourseId).big_integer().not_null())
                    .col(ColumnDef::new(Enrollments::SectionId).big_integer().null())
                    .col(ColumnDef::new(Enrollments::Status).string().not_null())
                    .col(ColumnDef::new(Enrollments::RequestedAt).big_integer().not_null())
                    .col(ColumnDef::new(Enrollments::UpdatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Enrollments::ReviewedBy).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Enrollments::Table, Enrollments::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Enrollments::Table, Enrollments::OfferedCourseId)
                            .to(OfferedCourses::Table, OfferedCourses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建成绩表
        manager
            .create_table(
                Table::create()
                    .table(Grades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Grades::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Grades::EnrollmentId).big_integer().not_null().unique_key())
                    .col(ColumnDef::new(Grades::TotalScore).double().not_null())
                    .col(ColumnDef::new(Grades::Letter).string().not_null())
                    .col(ColumnDef::new(Grades::GradePoints).double().not_null())
                    .col(ColumnDef::new(Grades::GradedBy).big_integer().not_null())
                    .col(ColumnDef::new(Grades::FinalizedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::EnrollmentId)
                            .to(Enrollments::Table, Enrollments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建文件表
        manager
            .create_table(
                Table::create()
                    .table(Files::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Files::DownloadToken)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Files::OriginalName).string().not_null())
                    .col(ColumnDef::new(Files::StoredName).string().not_null())
                    .col(ColumnDef::new(Files::FileSize).big_integer().not_null())
                    .col(ColumnDef::new(Files::FileType).string().not_null())
                    .col(ColumnDef::new(Files::UploadedBy).big_integer().not_null())
                    .col(ColumnDef::new(Files::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Files::Table, Files::UploadedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建作业表
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assignments::OfferedCourseId).big_integer().not_null())
                    .col(ColumnDef::new(Assignments::Title).string().not_null())
                    .col(ColumnDef::new(Assignments::Description).text().null())
                    .col(ColumnDef::new(Assignments::DueAt).big_integer().not_null())
                    .col(ColumnDef::new(Assignments::MaxPoints).double().not_null())
                    .col(ColumnDef::new(Assignments::AttachmentToken).string().null())
                    .col(ColumnDef::new(Assignments::CreatedBy).big_integer().not_null())
                    .col(ColumnDef::new(Assignments::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Assignments::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::OfferedCourseId)
                            .to(OfferedCourses::Table, OfferedCourses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建作业提交表
        manager
            .create_table(
                Table::create()
                    .table(AssignmentSubmissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssignmentSubmissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AssignmentSubmissions::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(AssignmentSubmissions::Content).text().null())
                    .col(ColumnDef::new(AssignmentSubmissions::FileToken).string().null())
                    .col(
                        ColumnDef::new(AssignmentSubmissions::SubmittedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AssignmentSubmissions::IsLate).boolean().not_null())
                    .col(ColumnDef::new(AssignmentSubmissions::Score).double().null())
                    .col(ColumnDef::new(AssignmentSubmissions::Feedback).text().null())
                    .col(ColumnDef::new(AssignmentSubmissions::GradedAt).big_integer().null())
                    .col(ColumnDef::new(AssignmentSubmissions::GradedBy).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(AssignmentSubmissions::Table, AssignmentSubmissions::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AssignmentSubmissions::Table, AssignmentSubmissions::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建测验表
        manager
            .create_table(
                Table::create()
                    .table(Quizzes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Quizzes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Quizzes::OfferedCourseId).big_integer().not_null())
                    .col(ColumnDef::new(Quizzes::Title).string().not_null())
                    .col(ColumnDef::new(Quizzes::Description).text().null())
                    .col(ColumnDef::new(Quizzes::OpensAt).big_integer().not_null())
                    .col(ColumnDef::new(Quizzes::ClosesAt).big_integer().not_null())
                    .col(ColumnDef::new(Quizzes::TimeLimitMinutes).integer().null())
                    .col(ColumnDef::new(Quizzes::CreatedBy).big_integer().not_null())
                    .col(ColumnDef::new(Quizzes::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Quizzes::Table, Quizzes::OfferedCourseId)
                            .to(OfferedCourses::Table, OfferedCourses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建题目表
        manager
            .create_table(
                Table::create()
                    .table(Questions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Questions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Questions::QuizId).big_integer().not_null())
                    .col(ColumnDef::new(Questions::Kind).string().not_null())
                    .col(ColumnDef::new(Questions::Prompt).text().not_null())
                    .col(ColumnDef::new(Questions::Options).text().not_null())
                    .col(ColumnDef::new(Questions::CorrectAnswer).text().null())
                    .col(ColumnDef::new(Questions::Points).double().not_null())
                    .col(ColumnDef::new(Questions::Position).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Questions::Table, Questions::QuizId)
                            .to(Quizzes::Table, Quizzes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学生答案表
        manager
            .create_table(
                Table::create()
                    .table(StudentAnswers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentAnswers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StudentAnswers::QuizId).big_integer().not_null())
                    .col(ColumnDef::new(StudentAnswers::QuestionId).big_integer().not_null())
                    .col(ColumnDef::new(StudentAnswers::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(StudentAnswers::Answer).text().not_null())
                    .col(ColumnDef::new(StudentAnswers::IsCorrect).boolean().null())
                    .col(ColumnDef::new(StudentAnswers::PointsAwarded).double().null())
                    .col(ColumnDef::new(StudentAnswers::SubmittedAt).big_integer().not_null())
                    .col(ColumnDef::new(StudentAnswers::GradedBy).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentAnswers::Table, StudentAnswers::QuestionId)
                            .to(Questions::Table, Questions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentAnswers::Table, StudentAnswers::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建课程资料表
        manager
            .create_table(
                Table::create()
                    .table(CourseMaterials::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseMaterials::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseMaterials::OfferedCourseId).big_integer().not_null())
                    .col(ColumnDef::new(CourseMaterials::Title).string().not_null())
                    .col(ColumnDef::new(CourseMaterials::Description).text().null())
                    .col(ColumnDef::new(CourseMaterials::FileToken).string().not_null())
                    .col(ColumnDef::new(CourseMaterials::UploadedBy).big_integer().not_null())
                    .col(ColumnDef::new(CourseMaterials::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseMaterials::Table, CourseMaterials::OfferedCourseId)
                            .to(OfferedCourses::Table, OfferedCourses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建站内信表
        manager
            .create_table(
                Table::create()
                    .table(Messages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Messages::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Messages::SenderId).big_integer().not_null())
                    .col(ColumnDef::new(Messages::RecipientId).big_integer().not_null())
                    .col(ColumnDef::new(Messages::Subject).string().not_null())
                    .col(ColumnDef::new(Messages::Body).text().not_null())
                    .col(ColumnDef::new(Messages::SentAt).big_integer().not_null())
                    .col(ColumnDef::new(Messages::ReadAt).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Messages::Table, Messages::SenderId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Messages::Table, Messages::RecipientId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建公告表
        manager
            .create_table(
                Table::create()
                    .table(Announcements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Announcements::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Announcements::AuthorId).big_integer().not_null())
                    .col(ColumnDef::new(Announcements::Title).string().not_null())
                    .col(ColumnDef::new(Announcements::Body).text().not_null())
                    .col(ColumnDef::new(Announcements::PublishedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Announcements::Table, Announcements::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建教室表
        manager
            .create_table(
                Table::create()
                    .table(Rooms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rooms::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rooms::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Rooms::Building).string().null())
                    .col(ColumnDef::new(Rooms::Capacity).integer().not_null())
                    .col(ColumnDef::new(Rooms::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Rooms::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建教室预约表
        manager
            .create_table(
                Table::create()
                    .table(RoomReservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoomReservations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RoomReservations::RoomId).big_integer().not_null())
                    .col(ColumnDef::new(RoomReservations::RequestedBy).big_integer().not_null())
                    .col(ColumnDef::new(RoomReservations::StartAt).big_integer().not_null())
                    .col(ColumnDef::new(RoomReservations::EndAt).big_integer().not_null())
                    .col(ColumnDef::new(RoomReservations::Purpose).text().not_null())
                    .col(ColumnDef::new(RoomReservations::Status).string().not_null())
                    .col(ColumnDef::new(RoomReservations::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(RoomReservations::ReviewedAt).big_integer().null())
                    .col(ColumnDef::new(RoomReservations::ReviewedBy).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(RoomReservations::Table, RoomReservations::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(RoomReservations::Table, RoomReservations::RequestedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建EAV 属性表
        manager
            .create_table(
                Table::create()
                    .table(AttributeValues::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AttributeValues::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AttributeValues::EntityType).string().not_null())
                    .col(ColumnDef::new(AttributeValues::EntityId).big_integer().not_null())
                    .col(ColumnDef::new(AttributeValues::Name).string().not_null())
                    .col(ColumnDef::new(AttributeValues::ValueType).string().not_null())
                    .col(ColumnDef::new(AttributeValues::Value).text().not_null())
                    .col(ColumnDef::new(AttributeValues::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_course_prerequisites_pair")
                    .table(CoursePrerequisites::Table)
                    .col(CoursePrerequisites::CourseId)
                    .col(CoursePrerequisites::PrerequisiteId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_offered_courses_course_semester")
                    .table(OfferedCourses::Table)
                    .col(OfferedCourses::CourseId)
                    .col(OfferedCourses::SemesterId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_sections_offering_number")
                    .table(Sections::Table)
                    .col(Sections::OfferedCourseId)
                    .col(Sections::SectionNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_enrollments_student")
                    .table(Enrollments::Table)
                    .col(Enrollments::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_enrollments_offered_course")
                    .table(Enrollments::Table)
                    .col(Enrollments::OfferedCourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_submissions_assignment_student")
                    .table(AssignmentSubmissions::Table)
                    .col(AssignmentSubmissions::AssignmentId)
                    .col(AssignmentSubmissions::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_answers_question_student")
                    .table(StudentAnswers::Table)
                    .col(StudentAnswers::QuestionId)
                    .col(StudentAnswers::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_messages_recipient")
                    .table(Messages::Table)
                    .col(Messages::RecipientId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_messages_sender")
                    .table(Messages::Table)
                    .col(Messages::SenderId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_room_reservations_room_start")
                    .table(RoomReservations::Table)
                    .col(RoomReservations::RoomId)
                    .col(RoomReservations::StartAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attribute_values_key")
                    .table(AttributeValues::Table)
                    .col(AttributeValues::EntityType)
                    .col(AttributeValues::EntityId)
                    .col(AttributeValues::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attribute_values_name")
                    .table(AttributeValues::Table)
                    .col(AttributeValues::EntityType)
                    .col(AttributeValues::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AttributeValues::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RoomReservations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rooms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Announcements::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Messages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseMaterials::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentAnswers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Questions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Quizzes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AssignmentSubmissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Files::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Grades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sections::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OfferedCourses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CoursePrerequisites::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Semesters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProfileChanges::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Instructors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    FullName,
    Phone,
    Role,
    Status,
    DepartmentId,
    ApprovedAt,
    ApprovedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Departments {
    Table,
    Id,
    Code,
    Name,
    Description,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
    UserId,
    StudentNumber,
    DepartmentId,
    AdvisorId,
    ParentUserId,
    EnrollmentYear,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Instructors {
    Table,
    Id,
    UserId,
    DepartmentId,
    Title,
    Office,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ProfileChanges {
    Table,
    Id,
    UserId,
    Field,
    OldValue,
    NewValue,
    Status,
    RequestedAt,
    ReviewedAt,
    ReviewedBy,
}

#[derive(DeriveIden)]
enum Semesters {
    Table,
    Id,
    Name,
    StartDate,
    EndDate,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Courses {
    Table,
    Id,
    Code,
    Title,
    Description,
    Credits,
    DepartmentId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CoursePrerequisites {
    Table,
    Id,
    CourseId,
    PrerequisiteId,
}

#[derive(DeriveIden)]
enum OfferedCourses {
    Table,
    Id,
    CourseId,
    SemesterId,
    InstructorId,
    Capacity,
    EnrolledCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Sections {
    Table,
    Id,
    OfferedCourseId,
    SectionNumber,
    InstructorId,
    RoomId,
    Schedule,
    Capacity,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Enrollments {
    Table,
    Id,
    StudentId,
    OfferedCourseId,
    SectionId,
    Status,
    RequestedAt,
    UpdatedAt,
    ReviewedBy,
}

#[derive(DeriveIden)]
enum Grades {
    Table,
    Id,
    EnrollmentId,
    TotalScore,
    Letter,
    GradePoints,
    GradedBy,
    FinalizedAt,
}

#[derive(DeriveIden)]
enum Files {
    Table,
    DownloadToken,
    OriginalName,
    StoredName,
    FileSize,
    FileType,
    UploadedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Assignments {
    Table,
    Id,
    OfferedCourseId,
    Title,
    Description,
    DueAt,
    MaxPoints,
    AttachmentToken,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AssignmentSubmissions {
    Table,
    Id,
    AssignmentId,
    StudentId,
    Content,
    FileToken,
    SubmittedAt,
    IsLate,
    Score,
    Feedback,
    GradedAt,
    GradedBy,
}

#[derive(DeriveIden)]
enum Quizzes {
    Table,
    Id,
    OfferedCourseId,
    Title,
    Description,
    OpensAt,
    ClosesAt,
    TimeLimitMinutes,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Questions {
    Table,
    Id,
    QuizId,
    Kind,
    Prompt,
    Options,
    CorrectAnswer,
    Points,
    Position,
}

#[derive(DeriveIden)]
enum StudentAnswers {
    Table,
    Id,
    QuizId,
    QuestionId,
    StudentId,
    Answer,
    IsCorrect,
    PointsAwarded,
    SubmittedAt,
    GradedBy,
}

#[derive(DeriveIden)]
enum CourseMaterials {
    Table,
    Id,
    OfferedCourseId,
    Title,
    Description,
    FileToken,
    UploadedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Messages {
    Table,
    Id,
    SenderId,
    RecipientId,
    Subject,
    Body,
    SentAt,
    ReadAt,
}

#[derive(DeriveIden)]
enum Announcements {
    Table,
    Id,
    AuthorId,
    Title,
    Body,
    PublishedAt,
}

#[derive(DeriveIden)]
enum Rooms {
    Table,
    Id,
    Name,
    Building,
    Capacity,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum RoomReservations {
    Table,
    Id,
    RoomId,
    RequestedBy,
    StartAt,
    EndAt,
    Purpose,
    Status,
    CreatedAt,
    ReviewedAt,
    ReviewedBy,
}

#[derive(DeriveIden)]
enum AttributeValues {
    Table,
    Id,
    EntityType,
    EntityId,
    Name,
    ValueType,
    Value,
    UpdatedAt,
}
