//! 数据库行结构

use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
pub struct CustomScaleRow {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub pixels_per_unit: f64,
    pub unit: String,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct PageScaleRow {
    pub id: Uuid,
    pub drawing_id: Uuid,
    pub page_number: i32,
    pub scale_kind: String,
    pub scale_id: String,
    pub scale_name: String,
    pub pixels_per_unit: f64,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct ScaleZoneRow {
    pub id: Uuid,
    pub drawing_id: Uuid,
    pub page_number: i32,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub scale_kind: String,
    pub scale_id: String,
    pub scale_name: String,
    pub pixels_per_unit: f64,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct WbsCategoryRow {
    pub id: Uuid,
    pub project_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct TakeoffItemRow {
    pub id: Uuid,
    pub drawing_id: Uuid,
    pub page_number: i32,
    pub material_id: Uuid,
    pub wbs_category_id: Option<Uuid>,
    pub quantity: f64,
    pub multiplier: f64,
    pub measurement_kind: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct RfqRow {
    pub id: Uuid,
    pub project_id: Uuid,
    pub rfq_number: String,
    pub supplier_name: Option<String>,
    pub supplier_email: Option<String>,
    pub supplier_phone: Option<String>,
    pub note: Option<String>,
    pub status: String,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct RfqLineRow {
    pub id: Uuid,
    pub rfq_id: Uuid,
    pub material_id: Uuid,
    pub quantity: f64,
    pub unit: String,
    pub note: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct MaterialRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub part_number: String,
    pub category: String,
    pub description: String,
    pub size: Option<String>,
    pub unit: String,
    pub list_price_cents: i64,
    pub currency: String,
    pub labor_units: f64,
    pub is_active: bool,
}

#[derive(Debug, sqlx::FromRow)]
pub struct DrawingRow {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub page_count: i32,
}

#[derive(Debug, sqlx::FromRow)]
pub struct ProjectRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
}
