//! PostgreSQL repository implementations

use async_trait::async_trait;
use common::TenantId;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use config::DatabaseConfig;

use crate::domain::entities::{
    CustomScale, Material, PageScale, Rfq, RfqLine, ScaleZone, TakeoffItem, TakeoffItemFilter,
    WbsCategory,
};
use crate::domain::repositories::{
    DrawingRef, DrawingRepository, MaterialRepository, ProjectRef, ProjectRepository,
    RfqRepository, ScaleRepository, TakeoffRepository, WbsRepository,
};
use crate::domain::value_objects::{
    CustomScaleId, DrawingId, MaterialId, ProjectId, RfqId, RfqNumber, ScaleZoneId,
    TakeoffItemId, WbsCategoryId,
};
use crate::error::ServiceResult;

use super::converters::*;
use super::rows::*;

/// 按配置建立连接池（宿主在装配仓储前调用）
pub async fn connect(config: &DatabaseConfig) -> ServiceResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(config.url.expose_secret())
        .await?;
    Ok(pool)
}

// ============================================================================
// ScaleRepository 实现
// ============================================================================

pub struct PostgresScaleRepository {
    pool: PgPool,
}

impl PostgresScaleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScaleRepository for PostgresScaleRepository {
    async fn save_custom_scale(&self, scale: &CustomScale) -> ServiceResult<()> {
        sqlx::query(
            r#"
            INSERT INTO custom_scales (
                id, project_id, name, pixels_per_unit, unit,
                created_at, created_by, updated_at, updated_by
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(scale.id().0)
        .bind(scale.project_id().0)
        .bind(scale.name())
        .bind(scale.pixels_per_unit())
        .bind(scale.unit())
        .bind(scale.audit_info().created_at)
        .bind(scale.audit_info().created_by.map(|u| u.0))
        .bind(scale.audit_info().updated_at)
        .bind(scale.audit_info().updated_by.map(|u| u.0))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_custom_scale(
        &self,
        id: &CustomScaleId,
    ) -> ServiceResult<Option<CustomScale>> {
        let row = sqlx::query_as::<_, CustomScaleRow>(
            r#"
            SELECT id, project_id, name, pixels_per_unit, unit,
                   created_at, created_by, updated_at, updated_by
            FROM custom_scales
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(custom_scale_from_row))
    }

    async fn list_custom_scales(
        &self,
        project_id: &ProjectId,
    ) -> ServiceResult<Vec<CustomScale>> {
        let rows = sqlx::query_as::<_, CustomScaleRow>(
            r#"
            SELECT id, project_id, name, pixels_per_unit, unit,
                   created_at, created_by, updated_at, updated_by
            FROM custom_scales
            WHERE project_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(project_id.0)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(custom_scale_from_row).collect())
    }

    async fn delete_custom_scale(&self, id: &CustomScaleId) -> ServiceResult<()> {
        sqlx::query("DELETE FROM custom_scales WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn upsert_page_scale(&self, page_scale: &PageScale) -> ServiceResult<()> {
        sqlx::query(
            r#"
            INSERT INTO page_scales (
                id, drawing_id, page_number, scale_kind, scale_id, scale_name,
                pixels_per_unit, created_at, created_by, updated_at, updated_by
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (drawing_id, page_number) DO UPDATE SET
                scale_kind = EXCLUDED.scale_kind,
                scale_id = EXCLUDED.scale_id,
                scale_name = EXCLUDED.scale_name,
                pixels_per_unit = EXCLUDED.pixels_per_unit,
                updated_at = EXCLUDED.updated_at,
                updated_by = EXCLUDED.updated_by
            "#,
        )
        .bind(page_scale.id().0)
        .bind(page_scale.drawing_id().0)
        .bind(page_scale.page_number())
        .bind(page_scale.scale().kind_str())
        .bind(page_scale.scale().id_string())
        .bind(page_scale.scale_name())
        .bind(page_scale.pixels_per_unit())
        .bind(page_scale.audit_info().created_at)
        .bind(page_scale.audit_info().created_by.map(|u| u.0))
        .bind(page_scale.audit_info().updated_at)
        .bind(page_scale.audit_info().updated_by.map(|u| u.0))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_page_scale(
        &self,
        drawing_id: &DrawingId,
        page_number: i32,
    ) -> ServiceResult<Option<PageScale>> {
        let row = sqlx::query_as::<_, PageScaleRow>(
            r#"
            SELECT id, drawing_id, page_number, scale_kind, scale_id, scale_name,
                   pixels_per_unit, created_at, created_by, updated_at, updated_by
            FROM page_scales
            WHERE drawing_id = $1 AND page_number = $2
            "#,
        )
        .bind(drawing_id.0)
        .bind(page_number)
        .fetch_optional(&self.pool)
        .await?;

        row.map(page_scale_from_row).transpose()
    }

    async fn save_scale_zone(&self, zone: &ScaleZone) -> ServiceResult<()> {
        sqlx::query(
            r#"
            INSERT INTO scale_zones (
                id, drawing_id, page_number, name, x, y, width, height,
                scale_kind, scale_id, scale_name, pixels_per_unit,
                created_at, created_by, updated_at, updated_by
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(zone.id().0)
        .bind(zone.drawing_id().0)
        .bind(zone.page_number())
        .bind(zone.name())
        .bind(zone.rect().x)
        .bind(zone.rect().y)
        .bind(zone.rect().width)
        .bind(zone.rect().height)
        .bind(zone.scale().kind_str())
        .bind(zone.scale().id_string())
        .bind(zone.scale_name())
        .bind(zone.pixels_per_unit())
        .bind(zone.audit_info().created_at)
        .bind(zone.audit_info().created_by.map(|u| u.0))
        .bind(zone.audit_info().updated_at)
        .bind(zone.audit_info().updated_by.map(|u| u.0))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_scale_zone(&self, zone: &ScaleZone) -> ServiceResult<()> {
        sqlx::query(
            r#"
            UPDATE scale_zones SET
                name = $1,
                x = $2,
                y = $3,
                width = $4,
                height = $5,
                scale_kind = $6,
                scale_id = $7,
                scale_name = $8,
                pixels_per_unit = $9,
                updated_at = $10,
                updated_by = $11
            WHERE id = $12
            "#,
        )
        .bind(zone.name())
        .bind(zone.rect().x)
        .bind(zone.rect().y)
        .bind(zone.rect().width)
        .bind(zone.rect().height)
        .bind(zone.scale().kind_str())
        .bind(zone.scale().id_string())
        .bind(zone.scale_name())
        .bind(zone.pixels_per_unit())
        .bind(zone.audit_info().updated_at)
        .bind(zone.audit_info().updated_by.map(|u| u.0))
        .bind(zone.id().0)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_scale_zone(&self, id: &ScaleZoneId) -> ServiceResult<Option<ScaleZone>> {
        let row = sqlx::query_as::<_, ScaleZoneRow>(
            r#"
            SELECT id, drawing_id, page_number, name, x, y, width, height,
                   scale_kind, scale_id, scale_name, pixels_per_unit,
                   created_at, created_by, updated_at, updated_by
            FROM scale_zones
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.map(scale_zone_from_row).transpose()
    }

    async fn list_scale_zones(
        &self,
        drawing_id: &DrawingId,
        page_number: i32,
    ) -> ServiceResult<Vec<ScaleZone>> {
        let rows = sqlx::query_as::<_, ScaleZoneRow>(
            r#"
            SELECT id, drawing_id, page_number, name, x, y, width, height,
                   scale_kind, scale_id, scale_name, pixels_per_unit,
                   created_at, created_by, updated_at, updated_by
            FROM scale_zones
            WHERE drawing_id = $1 AND page_number = $2
            ORDER BY created_at
            "#,
        )
        .bind(drawing_id.0)
        .bind(page_number)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(scale_zone_from_row).collect()
    }

    async fn delete_scale_zone(&self, id: &ScaleZoneId) -> ServiceResult<()> {
        sqlx::query("DELETE FROM scale_zones WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// WbsRepository 实现
// ============================================================================

pub struct PostgresWbsRepository {
    pool: PgPool,
}

impl PostgresWbsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WbsRepository for PostgresWbsRepository {
    async fn save(&self, category: &WbsCategory) -> ServiceResult<()> {
        sqlx::query(
            r#"
            INSERT INTO wbs_categories (
                id, project_id, parent_id, name, sort_order,
                created_at, created_by, updated_at, updated_by
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(category.id().0)
        .bind(category.project_id().0)
        .bind(category.parent_id().map(|p| p.0))
        .bind(category.name())
        .bind(category.sort_order())
        .bind(category.audit_info().created_at)
        .bind(category.audit_info().created_by.map(|u| u.0))
        .bind(category.audit_info().updated_at)
        .bind(category.audit_info().updated_by.map(|u| u.0))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, category: &WbsCategory) -> ServiceResult<()> {
        sqlx::query(
            r#"
            UPDATE wbs_categories SET
                name = $1,
                sort_order = $2,
                updated_at = $3,
                updated_by = $4
            WHERE id = $5
            "#,
        )
        .bind(category.name())
        .bind(category.sort_order())
        .bind(category.audit_info().updated_at)
        .bind(category.audit_info().updated_by.map(|u| u.0))
        .bind(category.id().0)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &WbsCategoryId) -> ServiceResult<Option<WbsCategory>> {
        let row = sqlx::query_as::<_, WbsCategoryRow>(
            r#"
            SELECT id, project_id, parent_id, name, sort_order,
                   created_at, created_by, updated_at, updated_by
            FROM wbs_categories
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(wbs_category_from_row))
    }

    async fn list_by_project(
        &self,
        project_id: &ProjectId,
    ) -> ServiceResult<Vec<WbsCategory>> {
        let rows = sqlx::query_as::<_, WbsCategoryRow>(
            r#"
            SELECT id, project_id, parent_id, name, sort_order,
                   created_at, created_by, updated_at, updated_by
            FROM wbs_categories
            WHERE project_id = $1
            ORDER BY sort_order, name
            "#,
        )
        .bind(project_id.0)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(wbs_category_from_row).collect())
    }

    async fn count_by_project(&self, project_id: &ProjectId) -> ServiceResult<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM wbs_categories WHERE project_id = $1")
                .bind(project_id.0)
                .fetch_one(&self.pool)
                .await?;

        Ok(count as u64)
    }

    async fn has_children(&self, id: &WbsCategoryId) -> ServiceResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM wbs_categories WHERE parent_id = $1)",
        )
        .bind(id.0)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn delete(&self, id: &WbsCategoryId) -> ServiceResult<()> {
        sqlx::query("DELETE FROM wbs_categories WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// TakeoffRepository 实现
// ============================================================================

pub struct PostgresTakeoffRepository {
    pool: PgPool,
}

impl PostgresTakeoffRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TakeoffRepository for PostgresTakeoffRepository {
    async fn save(&self, item: &TakeoffItem) -> ServiceResult<()> {
        sqlx::query(
            r#"
            INSERT INTO takeoff_items (
                id, drawing_id, page_number, material_id, wbs_category_id,
                quantity, multiplier, measurement_kind, note,
                created_at, created_by, updated_at, updated_by
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(item.id().0)
        .bind(item.drawing_id().0)
        .bind(item.page_number())
        .bind(item.material_id().0)
        .bind(item.wbs_category_id().map(|c| c.0))
        .bind(item.quantity())
        .bind(item.multiplier())
        .bind(item.kind().as_str())
        .bind(item.note())
        .bind(item.audit_info().created_at)
        .bind(item.audit_info().created_by.map(|u| u.0))
        .bind(item.audit_info().updated_at)
        .bind(item.audit_info().updated_by.map(|u| u.0))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, item: &TakeoffItem) -> ServiceResult<()> {
        sqlx::query(
            r#"
            UPDATE takeoff_items SET
                wbs_category_id = $1,
                quantity = $2,
                multiplier = $3,
                note = $4,
                updated_at = $5,
                updated_by = $6
            WHERE id = $7
            "#,
        )
        .bind(item.wbs_category_id().map(|c| c.0))
        .bind(item.quantity())
        .bind(item.multiplier())
        .bind(item.note())
        .bind(item.audit_info().updated_at)
        .bind(item.audit_info().updated_by.map(|u| u.0))
        .bind(item.id().0)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &TakeoffItemId) -> ServiceResult<Option<TakeoffItem>> {
        let row = sqlx::query_as::<_, TakeoffItemRow>(
            r#"
            SELECT id, drawing_id, page_number, material_id, wbs_category_id,
                   quantity, multiplier, measurement_kind, note,
                   created_at, created_by, updated_at, updated_by
            FROM takeoff_items
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.map(takeoff_item_from_row).transpose()
    }

    async fn find_many(&self, ids: &[TakeoffItemId]) -> ServiceResult<Vec<TakeoffItem>> {
        let ids: Vec<Uuid> = ids.iter().map(|id| id.0).collect();
        let rows = sqlx::query_as::<_, TakeoffItemRow>(
            r#"
            SELECT id, drawing_id, page_number, material_id, wbs_category_id,
                   quantity, multiplier, measurement_kind, note,
                   created_at, created_by, updated_at, updated_by
            FROM takeoff_items
            WHERE id = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(takeoff_item_from_row).collect()
    }

    async fn list_by_drawing(
        &self,
        drawing_id: &DrawingId,
        filter: &TakeoffItemFilter,
    ) -> ServiceResult<Vec<TakeoffItem>> {
        let rows = sqlx::query_as::<_, TakeoffItemRow>(
            r#"
            SELECT id, drawing_id, page_number, material_id, wbs_category_id,
                   quantity, multiplier, measurement_kind, note,
                   created_at, created_by, updated_at, updated_by
            FROM takeoff_items
            WHERE drawing_id = $1
              AND ($2::int IS NULL OR page_number = $2)
              AND ($3::uuid IS NULL OR wbs_category_id = $3)
            ORDER BY page_number, created_at
            "#,
        )
        .bind(drawing_id.0)
        .bind(filter.page_number)
        .bind(filter.wbs_category_id.map(|c| c.0))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(takeoff_item_from_row).collect()
    }

    async fn list_by_project(
        &self,
        project_id: &ProjectId,
    ) -> ServiceResult<Vec<TakeoffItem>> {
        let rows = sqlx::query_as::<_, TakeoffItemRow>(
            r#"
            SELECT ti.id, ti.drawing_id, ti.page_number, ti.material_id, ti.wbs_category_id,
                   ti.quantity, ti.multiplier, ti.measurement_kind, ti.note,
                   ti.created_at, ti.created_by, ti.updated_at, ti.updated_by
            FROM takeoff_items ti
            JOIN drawings d ON ti.drawing_id = d.id
            WHERE d.project_id = $1
            ORDER BY ti.page_number, ti.created_at
            "#,
        )
        .bind(project_id.0)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(takeoff_item_from_row).collect()
    }

    async fn count_by_category(&self, category_id: &WbsCategoryId) -> ServiceResult<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM takeoff_items WHERE wbs_category_id = $1")
                .bind(category_id.0)
                .fetch_one(&self.pool)
                .await?;

        Ok(count as u64)
    }

    async fn bulk_reassign_category(
        &self,
        item_ids: &[TakeoffItemId],
        category_id: Option<&WbsCategoryId>,
    ) -> ServiceResult<u64> {
        let ids: Vec<Uuid> = item_ids.iter().map(|id| id.0).collect();

        // 单条语句整批改写，天然原子
        let result = sqlx::query(
            r#"
            UPDATE takeoff_items SET
                wbs_category_id = $1,
                updated_at = NOW()
            WHERE id = ANY($2)
            "#,
        )
        .bind(category_id.map(|c| c.0))
        .bind(&ids)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: &TakeoffItemId) -> ServiceResult<()> {
        sqlx::query("DELETE FROM takeoff_items WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// RfqRepository 实现
// ============================================================================

pub struct PostgresRfqRepository {
    pool: PgPool,
}

impl PostgresRfqRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RfqRepository for PostgresRfqRepository {
    async fn save(&self, rfq: &Rfq) -> ServiceResult<()> {
        sqlx::query(
            r#"
            INSERT INTO rfqs (
                id, project_id, rfq_number, supplier_name, supplier_email,
                supplier_phone, note, status, sent_at,
                created_at, created_by, updated_at, updated_by
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(rfq.id().0)
        .bind(rfq.project_id().0)
        .bind(rfq.rfq_number().as_str())
        .bind(rfq.supplier_name())
        .bind(rfq.supplier_email())
        .bind(rfq.supplier_phone())
        .bind(rfq.note())
        .bind(rfq.status().as_str())
        .bind(rfq.sent_at())
        .bind(rfq.audit_info().created_at)
        .bind(rfq.audit_info().created_by.map(|u| u.0))
        .bind(rfq.audit_info().updated_at)
        .bind(rfq.audit_info().updated_by.map(|u| u.0))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, rfq: &Rfq) -> ServiceResult<()> {
        sqlx::query(
            r#"
            UPDATE rfqs SET
                supplier_name = $1,
                supplier_email = $2,
                supplier_phone = $3,
                note = $4,
                status = $5,
                sent_at = $6,
                updated_at = $7,
                updated_by = $8
            WHERE id = $9
            "#,
        )
        .bind(rfq.supplier_name())
        .bind(rfq.supplier_email())
        .bind(rfq.supplier_phone())
        .bind(rfq.note())
        .bind(rfq.status().as_str())
        .bind(rfq.sent_at())
        .bind(rfq.audit_info().updated_at)
        .bind(rfq.audit_info().updated_by.map(|u| u.0))
        .bind(rfq.id().0)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &RfqId) -> ServiceResult<Option<Rfq>> {
        let row = sqlx::query_as::<_, RfqRow>(
            r#"
            SELECT id, project_id, rfq_number, supplier_name, supplier_email,
                   supplier_phone, note, status, sent_at,
                   created_at, created_by, updated_at, updated_by
            FROM rfqs
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.map(rfq_from_row).transpose()
    }

    async fn exists_by_number(
        &self,
        project_id: &ProjectId,
        rfq_number: &RfqNumber,
    ) -> ServiceResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM rfqs WHERE project_id = $1 AND rfq_number = $2)",
        )
        .bind(project_id.0)
        .bind(rfq_number.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn list_by_project(&self, project_id: &ProjectId) -> ServiceResult<Vec<Rfq>> {
        let rows = sqlx::query_as::<_, RfqRow>(
            r#"
            SELECT id, project_id, rfq_number, supplier_name, supplier_email,
                   supplier_phone, note, status, sent_at,
                   created_at, created_by, updated_at, updated_by
            FROM rfqs
            WHERE project_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(project_id.0)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(rfq_from_row).collect()
    }

    async fn save_line(&self, line: &RfqLine) -> ServiceResult<()> {
        sqlx::query(
            r#"
            INSERT INTO rfq_lines (id, rfq_id, material_id, quantity, unit, note)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(line.id().0)
        .bind(line.rfq_id().0)
        .bind(line.material_id().0)
        .bind(line.quantity())
        .bind(line.unit())
        .bind(line.note())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_lines(&self, rfq_id: &RfqId) -> ServiceResult<Vec<RfqLine>> {
        let rows = sqlx::query_as::<_, RfqLineRow>(
            r#"
            SELECT id, rfq_id, material_id, quantity, unit, note
            FROM rfq_lines
            WHERE rfq_id = $1
            ORDER BY id
            "#,
        )
        .bind(rfq_id.0)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(rfq_line_from_row).collect())
    }
}

// ============================================================================
// 协作方只读仓储实现
// ============================================================================

pub struct PostgresMaterialRepository {
    pool: PgPool,
}

impl PostgresMaterialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MaterialRepository for PostgresMaterialRepository {
    async fn find_by_id(&self, id: &MaterialId) -> ServiceResult<Option<Material>> {
        let row = sqlx::query_as::<_, MaterialRow>(
            r#"
            SELECT id, company_id, part_number, category, description, size,
                   unit, list_price_cents, currency, labor_units, is_active
            FROM company_materials
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(material_from_row))
    }

    async fn find_many(&self, ids: &[MaterialId]) -> ServiceResult<Vec<Material>> {
        let ids: Vec<Uuid> = ids.iter().map(|id| id.0).collect();
        let rows = sqlx::query_as::<_, MaterialRow>(
            r#"
            SELECT id, company_id, part_number, category, description, size,
                   unit, list_price_cents, currency, labor_units, is_active
            FROM company_materials
            WHERE id = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(material_from_row).collect())
    }

    async fn list_by_tenant(
        &self,
        tenant_id: &TenantId,
        category: Option<&str>,
        active_only: bool,
    ) -> ServiceResult<Vec<Material>> {
        let rows = sqlx::query_as::<_, MaterialRow>(
            r#"
            SELECT id, company_id, part_number, category, description, size,
                   unit, list_price_cents, currency, labor_units, is_active
            FROM company_materials
            WHERE company_id = $1
              AND ($2::text IS NULL OR category = $2)
              AND (NOT $3 OR is_active)
            ORDER BY category, size, description
            "#,
        )
        .bind(tenant_id.0)
        .bind(category)
        .bind(active_only)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(material_from_row).collect())
    }
}

pub struct PostgresDrawingRepository {
    pool: PgPool,
}

impl PostgresDrawingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DrawingRepository for PostgresDrawingRepository {
    async fn find_by_id(&self, id: &DrawingId) -> ServiceResult<Option<DrawingRef>> {
        let row = sqlx::query_as::<_, DrawingRow>(
            "SELECT id, project_id, name, page_count FROM drawings WHERE id = $1",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(drawing_from_row))
    }
}

pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn find_by_id(&self, id: &ProjectId) -> ServiceResult<Option<ProjectRef>> {
        let row = sqlx::query_as::<_, ProjectRow>(
            "SELECT id, company_id, name FROM projects WHERE id = $1",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(project_from_row))
    }
}
