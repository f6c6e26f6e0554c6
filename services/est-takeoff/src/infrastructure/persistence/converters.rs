//! 数据库行到领域实体的转换

use chrono::{DateTime, Utc};
use common::{AuditInfo, TenantId, UserId};
use domain_core::{Currency, Money};
use uuid::Uuid;

use crate::domain::entities::{
    CustomScale, Material, PageScale, Rfq, RfqLine, ScaleZone, TakeoffItem, WbsCategory,
};
use crate::domain::repositories::{DrawingRef, ProjectRef};
use crate::domain::value_objects::{
    CustomScaleId, DrawingId, MaterialId, PageScaleId, ProjectId, RfqId, RfqLineId, RfqNumber,
    ScaleRef, ScaleZoneId, TakeoffItemId, WbsCategoryId, ZoneRect,
};
use crate::error::{ServiceError, ServiceResult};

use super::rows::*;

fn audit_from(
    created_at: DateTime<Utc>,
    created_by: Option<Uuid>,
    updated_at: DateTime<Utc>,
    updated_by: Option<Uuid>,
) -> AuditInfo {
    AuditInfo {
        created_at,
        created_by: created_by.map(UserId::from_uuid),
        updated_at,
        updated_by: updated_by.map(UserId::from_uuid),
    }
}

pub fn custom_scale_from_row(row: CustomScaleRow) -> CustomScale {
    CustomScale::from_parts(
        CustomScaleId::from_uuid(row.id),
        ProjectId::from_uuid(row.project_id),
        row.name,
        row.pixels_per_unit,
        row.unit,
        audit_from(row.created_at, row.created_by, row.updated_at, row.updated_by),
    )
}

pub fn page_scale_from_row(row: PageScaleRow) -> ServiceResult<PageScale> {
    let scale = ScaleRef::from_parts(&row.scale_kind, &row.scale_id)?;
    Ok(PageScale::from_parts(
        PageScaleId::from_uuid(row.id),
        DrawingId::from_uuid(row.drawing_id),
        row.page_number,
        scale,
        row.scale_name,
        row.pixels_per_unit,
        audit_from(row.created_at, row.created_by, row.updated_at, row.updated_by),
    ))
}

pub fn scale_zone_from_row(row: ScaleZoneRow) -> ServiceResult<ScaleZone> {
    let scale = ScaleRef::from_parts(&row.scale_kind, &row.scale_id)?;
    Ok(ScaleZone::from_parts(
        ScaleZoneId::from_uuid(row.id),
        DrawingId::from_uuid(row.drawing_id),
        row.page_number,
        row.name,
        ZoneRect::new(row.x, row.y, row.width, row.height),
        scale,
        row.scale_name,
        row.pixels_per_unit,
        audit_from(row.created_at, row.created_by, row.updated_at, row.updated_by),
    ))
}

pub fn wbs_category_from_row(row: WbsCategoryRow) -> WbsCategory {
    WbsCategory::from_parts(
        WbsCategoryId::from_uuid(row.id),
        ProjectId::from_uuid(row.project_id),
        row.parent_id.map(WbsCategoryId::from_uuid),
        row.name,
        row.sort_order,
        audit_from(row.created_at, row.created_by, row.updated_at, row.updated_by),
    )
}

pub fn takeoff_item_from_row(row: TakeoffItemRow) -> ServiceResult<TakeoffItem> {
    let kind = row.measurement_kind.parse()?;
    Ok(TakeoffItem::from_parts(
        TakeoffItemId::from_uuid(row.id),
        DrawingId::from_uuid(row.drawing_id),
        row.page_number,
        MaterialId::from_uuid(row.material_id),
        row.wbs_category_id.map(WbsCategoryId::from_uuid),
        row.quantity,
        row.multiplier,
        kind,
        row.note,
        audit_from(row.created_at, row.created_by, row.updated_at, row.updated_by),
    ))
}

pub fn rfq_from_row(row: RfqRow) -> ServiceResult<Rfq> {
    let rfq_number = RfqNumber::new(row.rfq_number)
        .map_err(|e| ServiceError::Validation(e.to_string()))?;
    let status = row.status.parse()?;
    Ok(Rfq::from_parts(
        RfqId::from_uuid(row.id),
        ProjectId::from_uuid(row.project_id),
        rfq_number,
        row.supplier_name,
        row.supplier_email,
        row.supplier_phone,
        row.note,
        status,
        row.sent_at,
        audit_from(row.created_at, row.created_by, row.updated_at, row.updated_by),
    ))
}

pub fn rfq_line_from_row(row: RfqLineRow) -> RfqLine {
    RfqLine::from_parts(
        RfqLineId::from_uuid(row.id),
        RfqId::from_uuid(row.rfq_id),
        MaterialId::from_uuid(row.material_id),
        row.quantity,
        row.unit,
        row.note,
    )
}

pub fn material_from_row(row: MaterialRow) -> Material {
    Material::from_parts(
        MaterialId::from_uuid(row.id),
        TenantId::from_uuid(row.company_id),
        row.part_number,
        row.category,
        row.description,
        row.size,
        row.unit,
        Money::new(row.list_price_cents, Currency::new(&row.currency)),
        row.labor_units,
        row.is_active,
    )
}

pub fn drawing_from_row(row: DrawingRow) -> DrawingRef {
    DrawingRef {
        id: DrawingId::from_uuid(row.id),
        project_id: ProjectId::from_uuid(row.project_id),
        name: row.name,
        page_count: row.page_count,
    }
}

pub fn project_from_row(row: ProjectRow) -> ProjectRef {
    ProjectRef {
        id: ProjectId::from_uuid(row.id),
        tenant_id: TenantId::from_uuid(row.company_id),
        name: row.name,
    }
}
