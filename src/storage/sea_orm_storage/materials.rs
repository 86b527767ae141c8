use super::SeaOrmStorage;
use crate::entity::course_materials::{ActiveModel, Column, Entity as CourseMaterials};
use crate::errors::{LmsError, Result};
use crate::models::materials::{CreateMaterialRequest, Material};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_material_impl(
        &self,
        offered_course_id: i64,
        req: CreateMaterialRequest,
        uploaded_by: i64,
    ) -> Result<Material> {
        let model = ActiveModel {
            offered_course_id: Set(offered_course_id),
            title: Set(req.title),
            description: Set(req.description),
            file_token: Set(req.file_token),
            uploaded_by: Set(uploaded_by),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to add material: {e}")))?;
        Ok(result.into_material())
    }

    pub async fn get_material_impl(&self, id: i64) -> Result<Option<Material>> {
        let result = CourseMaterials::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_material()))
    }

    pub async fn list_materials_impl(&self, offered_course_id: i64) -> Result<Vec<Material>> {
        let result = CourseMaterials::find()
            .filter(Column::OfferedCourseId.eq(offered_course_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await?;
        Ok(result.into_iter().map(|m| m.into_material()).collect())
    }

    pub async fn delete_material_impl(&self, id: i64) -> Result<bool> {
        let result = CourseMaterials::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
