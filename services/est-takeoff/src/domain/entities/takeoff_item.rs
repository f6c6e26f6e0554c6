//! 工程量条目实体

use common::AuditInfo;
use domain_core::{AggregateRoot, Entity, Money};
use serde::{Deserialize, Serialize};

use crate::domain::enums::MeasurementKind;
use crate::domain::value_objects::{DrawingId, MaterialId, TakeoffItemId, WbsCategoryId};
use crate::error::{ServiceError, ServiceResult};

/// 工程量条目
///
/// 一条带价的量：材料 + 数量 + 系数 + 可选 WBS 分类。
/// 材料与图纸页一经创建不可变更；数量、系数、分类、备注可编辑
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TakeoffItem {
    /// 条目 ID
    id: TakeoffItemId,
    /// 所属图纸 ID（创建后不可变）
    drawing_id: DrawingId,
    /// 页码（创建后不可变）
    page_number: i32,
    /// 材料 ID（创建后不可变）
    material_id: MaterialId,
    /// WBS 分类 ID（None 归入未分类桶）
    wbs_category_id: Option<WbsCategoryId>,
    /// 数量（长度测量可为小数，计数为整数）
    quantity: f64,
    /// 系数（损耗/加价，默认 1.0；不作用于人工）
    multiplier: f64,
    /// 测量方式
    kind: MeasurementKind,
    /// 备注
    note: Option<String>,
    /// 审计信息
    audit_info: AuditInfo,
}

/// 工程量条目部分更新
///
/// 外层 None 表示不修改；wbs_category_id / note 的内层
/// None 表示清除原值
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TakeoffItemPatch {
    pub quantity: Option<f64>,
    pub multiplier: Option<f64>,
    pub wbs_category_id: Option<Option<WbsCategoryId>>,
    pub note: Option<Option<String>>,
}

impl TakeoffItemPatch {
    /// 整体校验后才允许逐字段写入
    pub fn validate(&self) -> ServiceResult<()> {
        if let Some(quantity) = self.quantity {
            validate_quantity(quantity)?;
        }
        if let Some(multiplier) = self.multiplier {
            validate_multiplier(multiplier)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.quantity.is_none()
            && self.multiplier.is_none()
            && self.wbs_category_id.is_none()
            && self.note.is_none()
    }
}

/// 工程量条目筛选
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TakeoffItemFilter {
    /// 按页码筛选
    pub page_number: Option<i32>,
    /// 按 WBS 分类筛选
    pub wbs_category_id: Option<WbsCategoryId>,
}

fn validate_quantity(quantity: f64) -> ServiceResult<()> {
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(ServiceError::InvalidQuantity(format!(
            "数量必须为非负数: {}",
            quantity
        )));
    }
    Ok(())
}

fn validate_multiplier(multiplier: f64) -> ServiceResult<()> {
    if !multiplier.is_finite() || multiplier < 0.0 {
        return Err(ServiceError::InvalidQuantity(format!(
            "系数必须为非负数: {}",
            multiplier
        )));
    }
    Ok(())
}

impl TakeoffItem {
    /// 创建工程量条目
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        drawing_id: DrawingId,
        page_number: i32,
        material_id: MaterialId,
        wbs_category_id: Option<WbsCategoryId>,
        quantity: f64,
        multiplier: f64,
        kind: MeasurementKind,
        note: Option<String>,
    ) -> ServiceResult<Self> {
        if page_number < 1 {
            return Err(ServiceError::Validation(format!(
                "页码必须从 1 开始: {}",
                page_number
            )));
        }
        validate_quantity(quantity)?;
        validate_multiplier(multiplier)?;

        Ok(Self {
            id: TakeoffItemId::new(),
            drawing_id,
            page_number,
            material_id,
            wbs_category_id,
            quantity,
            multiplier,
            kind,
            note,
            audit_info: AuditInfo::default(),
        })
    }

    /// 从各部分构建（用于从数据库加载）
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: TakeoffItemId,
        drawing_id: DrawingId,
        page_number: i32,
        material_id: MaterialId,
        wbs_category_id: Option<WbsCategoryId>,
        quantity: f64,
        multiplier: f64,
        kind: MeasurementKind,
        note: Option<String>,
        audit_info: AuditInfo,
    ) -> Self {
        Self {
            id,
            drawing_id,
            page_number,
            material_id,
            wbs_category_id,
            quantity,
            multiplier,
            kind,
            note,
            audit_info,
        }
    }

    pub fn id(&self) -> &TakeoffItemId {
        &self.id
    }

    pub fn drawing_id(&self) -> &DrawingId {
        &self.drawing_id
    }

    pub fn page_number(&self) -> i32 {
        self.page_number
    }

    pub fn material_id(&self) -> &MaterialId {
        &self.material_id
    }

    pub fn wbs_category_id(&self) -> Option<&WbsCategoryId> {
        self.wbs_category_id.as_ref()
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn kind(&self) -> MeasurementKind {
        self.kind
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    // ========== 计价 ==========

    /// 延伸价 = 数量 x 系数 x 单价，四舍五入到分
    pub fn extended_price(&self, unit_list_price: &Money) -> Money {
        unit_list_price.mul_f64(self.quantity * self.multiplier)
    }

    /// 延伸人工 = 数量 x 人工系数（系数不作用于人工）
    pub fn extended_labor(&self, labor_units: f64) -> f64 {
        self.quantity * labor_units
    }

    // ========== 更新 ==========

    /// 应用部分更新（先整体校验，再逐字段写入）
    pub fn apply(&mut self, patch: &TakeoffItemPatch) -> ServiceResult<()> {
        patch.validate()?;

        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(multiplier) = patch.multiplier {
            self.multiplier = multiplier;
        }
        if let Some(wbs_category_id) = &patch.wbs_category_id {
            self.wbs_category_id = *wbs_category_id;
        }
        if let Some(note) = &patch.note {
            self.note = note.clone();
        }
        self.audit_info.update(None);
        Ok(())
    }

    /// 重新归类（批量调整 WBS 时使用）
    pub fn reassign_category(&mut self, wbs_category_id: Option<WbsCategoryId>) {
        self.wbs_category_id = wbs_category_id;
        self.audit_info.update(None);
    }
}

impl Entity for TakeoffItem {
    type Id = TakeoffItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for TakeoffItem {
    fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    fn audit_info_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit_info
    }
}
