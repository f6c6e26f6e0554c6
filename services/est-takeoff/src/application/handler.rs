//! Business logic handler

use std::collections::HashMap;
use std::sync::Arc;

use common::TenantId;
use config::TakeoffConfig;
use domain_core::AggregateRoot;
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::entities::{
    CustomScale, Material, PageScale, Rfq, RfqLine, ScaleZone, TakeoffItem, WbsCategory,
};
use crate::domain::repositories::{
    DrawingRef, DrawingRepository, MaterialRepository, ProjectRef, ProjectRepository,
    RfqRepository, ScaleRepository, TakeoffRepository, WbsRepository,
};
use crate::domain::services::calibration::{self, Calibration};
use crate::domain::services::catalog::{self, StandardScale};
use crate::domain::services::rollup::{self, RollupLine};
use crate::domain::services::scale_resolver::{self, ResolvedScale};
use crate::domain::services::wbs_tree;
use crate::domain::value_objects::{
    CustomScaleId, DrawingId, MaterialId, ProjectId, RfqId, RfqLineId, ScaleRef, ScaleZoneId,
    TakeoffItemId, WbsCategoryId,
};
use crate::domain::views::{RfqLineView, RfqWithLines, TakeoffLine, WbsNode};
use crate::error::{ServiceError, ServiceResult};

use super::commands::*;
use super::queries::*;

/// 标定结果（可选地带上已持久化的自定义比例尺）
#[derive(Debug, Clone, Serialize)]
pub struct CalibrationOutcome {
    pub calibration: Calibration,
    pub custom_scale_id: Option<CustomScaleId>,
}

/// 长度测量换算结果
#[derive(Debug, Clone, Serialize)]
pub struct MeasuredLength {
    pub pixel_length: f64,
    pub pixels_per_unit: f64,
    pub real_length: f64,
    pub scale_name: String,
}

pub struct ServiceHandler {
    scale_repo: Arc<dyn ScaleRepository>,
    wbs_repo: Arc<dyn WbsRepository>,
    takeoff_repo: Arc<dyn TakeoffRepository>,
    rfq_repo: Arc<dyn RfqRepository>,
    material_repo: Arc<dyn MaterialRepository>,
    drawing_repo: Arc<dyn DrawingRepository>,
    project_repo: Arc<dyn ProjectRepository>,
    config: TakeoffConfig,
}

impl ServiceHandler {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        scale_repo: Arc<dyn ScaleRepository>,
        wbs_repo: Arc<dyn WbsRepository>,
        takeoff_repo: Arc<dyn TakeoffRepository>,
        rfq_repo: Arc<dyn RfqRepository>,
        material_repo: Arc<dyn MaterialRepository>,
        drawing_repo: Arc<dyn DrawingRepository>,
        project_repo: Arc<dyn ProjectRepository>,
        config: TakeoffConfig,
    ) -> Self {
        Self {
            scale_repo,
            wbs_repo,
            takeoff_repo,
            rfq_repo,
            material_repo,
            drawing_repo,
            project_repo,
            config,
        }
    }

    // ========== 租户隔离 ==========

    /// 解析项目并校验归属
    async fn resolve_project(
        &self,
        project_id: &ProjectId,
        tenant_id: &TenantId,
    ) -> ServiceResult<ProjectRef> {
        let project = self
            .project_repo
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("项目不存在".to_string()))?;

        if project.tenant_id != *tenant_id {
            return Err(ServiceError::ScopeViolation(
                "项目不属于当前公司".to_string(),
            ));
        }
        Ok(project)
    }

    /// 解析图纸及其所属项目并校验归属
    async fn resolve_drawing(
        &self,
        drawing_id: &DrawingId,
        tenant_id: &TenantId,
    ) -> ServiceResult<(DrawingRef, ProjectRef)> {
        let drawing = self
            .drawing_repo
            .find_by_id(drawing_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("图纸不存在".to_string()))?;

        let project = self.resolve_project(&drawing.project_id, tenant_id).await?;
        Ok((drawing, project))
    }

    fn check_page(drawing: &DrawingRef, page_number: i32) -> ServiceResult<()> {
        if page_number < 1 || page_number > drawing.page_count {
            return Err(ServiceError::Validation(format!(
                "页码超出图纸范围: {} (共 {} 页)",
                page_number, drawing.page_count
            )));
        }
        Ok(())
    }

    /// 解析比例尺引用为 (显示名, 像素比)
    ///
    /// 自定义比例尺必须属于图纸所在项目
    async fn resolve_scale_ref(
        &self,
        scale: &ScaleRef,
        project_id: &ProjectId,
    ) -> ServiceResult<(String, f64)> {
        match scale {
            ScaleRef::Standard(id) => {
                let standard = catalog::find_standard_scale(id).ok_or_else(|| {
                    ServiceError::Validation(format!("标准比例尺不存在: {}", id))
                })?;
                Ok((standard.name.to_string(), standard.pixels_per_unit))
            }
            ScaleRef::Custom(id) => {
                let custom = self
                    .scale_repo
                    .find_custom_scale(id)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::NotFound("自定义比例尺不存在".to_string())
                    })?;
                if custom.project_id() != project_id {
                    return Err(ServiceError::ScopeViolation(
                        "自定义比例尺属于其他项目".to_string(),
                    ));
                }
                Ok((custom.name().to_string(), custom.pixels_per_unit()))
            }
        }
    }

    // ========== 比例尺 ==========

    /// 标准比例尺列表
    pub fn list_standard_scales(&self, query: ListStandardScalesQuery) -> Vec<StandardScale> {
        catalog::standard_scales(query.family)
            .into_iter()
            .copied()
            .collect()
    }

    /// 创建自定义比例尺
    pub async fn create_custom_scale(
        &self,
        cmd: CreateCustomScaleCommand,
    ) -> ServiceResult<CustomScaleId> {
        info!(
            "Creating custom scale '{}' for project: {}",
            cmd.name, cmd.project_id
        );

        cmd.validate()?;
        self.resolve_project(&cmd.project_id, &cmd.tenant_id).await?;

        let unit = cmd
            .unit
            .unwrap_or_else(|| self.config.default_unit.clone());
        let mut scale = CustomScale::new(cmd.project_id, cmd.name, cmd.pixels_per_unit, unit)?;
        scale.audit_info_mut().created_by = Some(cmd.user_id);

        let scale_id = *scale.id();
        self.scale_repo.save_custom_scale(&scale).await?;

        info!("Custom scale created successfully: {}", scale_id);
        Ok(scale_id)
    }

    /// 项目自定义比例尺列表
    pub async fn list_custom_scales(
        &self,
        query: ListCustomScalesQuery,
    ) -> ServiceResult<Vec<CustomScale>> {
        self.resolve_project(&query.project_id, &query.tenant_id)
            .await?;
        self.scale_repo.list_custom_scales(&query.project_id).await
    }

    /// 删除自定义比例尺
    pub async fn delete_custom_scale(
        &self,
        cmd: DeleteCustomScaleCommand,
    ) -> ServiceResult<()> {
        info!("Deleting custom scale: {}", cmd.scale_id);

        let scale = self
            .scale_repo
            .find_custom_scale(&cmd.scale_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("自定义比例尺不存在".to_string()))?;
        self.resolve_project(scale.project_id(), &cmd.tenant_id)
            .await?;

        self.scale_repo.delete_custom_scale(&cmd.scale_id).await?;

        info!("Custom scale deleted successfully: {}", cmd.scale_id);
        Ok(())
    }

    /// 设置页面默认比例尺（upsert）
    pub async fn set_page_scale(&self, cmd: SetPageScaleCommand) -> ServiceResult<PageScale> {
        info!(
            "Setting page scale for drawing: {} page: {}",
            cmd.drawing_id, cmd.page_number
        );

        cmd.validate()?;
        let (drawing, project) = self.resolve_drawing(&cmd.drawing_id, &cmd.tenant_id).await?;
        Self::check_page(&drawing, cmd.page_number)?;

        let (scale_name, pixels_per_unit) =
            self.resolve_scale_ref(&cmd.scale, &project.id).await?;

        let mut page_scale = PageScale::new(
            cmd.drawing_id,
            cmd.page_number,
            cmd.scale,
            scale_name,
            pixels_per_unit,
        )?;
        page_scale.audit_info_mut().created_by = Some(cmd.user_id);

        self.scale_repo.upsert_page_scale(&page_scale).await?;

        info!("Page scale set successfully");
        Ok(page_scale)
    }

    /// 页面默认比例尺
    pub async fn get_page_scale(
        &self,
        query: GetPageScaleQuery,
    ) -> ServiceResult<Option<PageScale>> {
        self.resolve_drawing(&query.drawing_id, &query.tenant_id)
            .await?;
        self.scale_repo
            .find_page_scale(&query.drawing_id, query.page_number)
            .await
    }

    /// 创建比例尺区域
    pub async fn create_scale_zone(
        &self,
        cmd: CreateScaleZoneCommand,
    ) -> ServiceResult<ScaleZoneId> {
        info!(
            "Creating scale zone '{}' for drawing: {} page: {}",
            cmd.name, cmd.drawing_id, cmd.page_number
        );

        cmd.validate()?;
        let (drawing, project) = self.resolve_drawing(&cmd.drawing_id, &cmd.tenant_id).await?;
        Self::check_page(&drawing, cmd.page_number)?;

        let (scale_name, pixels_per_unit) =
            self.resolve_scale_ref(&cmd.scale, &project.id).await?;

        let mut zone = ScaleZone::new(
            cmd.drawing_id,
            cmd.page_number,
            cmd.name,
            cmd.rect,
            cmd.scale,
            scale_name,
            pixels_per_unit,
        )?;
        zone.audit_info_mut().created_by = Some(cmd.user_id);

        let zone_id = *zone.id();
        self.scale_repo.save_scale_zone(&zone).await?;

        info!("Scale zone created successfully: {}", zone_id);
        Ok(zone_id)
    }

    /// 页面比例尺区域列表
    pub async fn list_scale_zones(
        &self,
        query: ListScaleZonesQuery,
    ) -> ServiceResult<Vec<ScaleZone>> {
        self.resolve_drawing(&query.drawing_id, &query.tenant_id)
            .await?;
        self.scale_repo
            .list_scale_zones(&query.drawing_id, query.page_number)
            .await
    }

    /// 更新比例尺区域
    pub async fn update_scale_zone(&self, cmd: UpdateScaleZoneCommand) -> ServiceResult<()> {
        info!("Updating scale zone: {}", cmd.zone_id);

        cmd.validate()?;

        let mut zone = self
            .scale_repo
            .find_scale_zone(&cmd.zone_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("比例尺区域不存在".to_string()))?;
        let (_, project) = self.resolve_drawing(zone.drawing_id(), &cmd.tenant_id).await?;

        if let Some(name) = cmd.name {
            zone.update_name(name);
        }
        if let Some(rect) = cmd.rect {
            zone.update_rect(rect)?;
        }
        if let Some(scale) = cmd.scale {
            let (scale_name, pixels_per_unit) =
                self.resolve_scale_ref(&scale, &project.id).await?;
            zone.update_scale(scale, scale_name, pixels_per_unit)?;
        }
        zone.audit_info_mut().updated_by = Some(cmd.user_id);

        self.scale_repo.update_scale_zone(&zone).await?;

        info!("Scale zone updated successfully: {}", cmd.zone_id);
        Ok(())
    }

    /// 删除比例尺区域
    pub async fn delete_scale_zone(&self, cmd: DeleteScaleZoneCommand) -> ServiceResult<()> {
        info!("Deleting scale zone: {}", cmd.zone_id);

        let zone = self
            .scale_repo
            .find_scale_zone(&cmd.zone_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("比例尺区域不存在".to_string()))?;
        self.resolve_drawing(zone.drawing_id(), &cmd.tenant_id).await?;

        self.scale_repo.delete_scale_zone(&cmd.zone_id).await?;

        info!("Scale zone deleted successfully: {}", cmd.zone_id);
        Ok(())
    }

    /// 由参考测量标定比例尺
    ///
    /// 提供名称时把结果持久化为项目自定义比例尺，否则纯计算
    pub async fn calibrate(&self, cmd: CalibrateScaleCommand) -> ServiceResult<CalibrationOutcome> {
        info!(
            "Calibrating scale for drawing: {} ({} px / {} units)",
            cmd.drawing_id, cmd.pixel_distance, cmd.real_distance
        );

        cmd.validate()?;
        let (_, project) = self.resolve_drawing(&cmd.drawing_id, &cmd.tenant_id).await?;

        let unit = cmd
            .unit
            .unwrap_or_else(|| self.config.default_unit.clone());
        let calibration = calibration::calibrate(cmd.pixel_distance, cmd.real_distance, unit)?;

        let custom_scale_id = match cmd.persist_as {
            Some(name) => {
                let mut scale = CustomScale::new(
                    project.id,
                    name,
                    calibration.pixels_per_unit,
                    calibration.unit.clone(),
                )?;
                scale.audit_info_mut().created_by = Some(cmd.user_id);
                let scale_id = *scale.id();
                self.scale_repo.save_custom_scale(&scale).await?;
                info!("Calibration persisted as custom scale: {}", scale_id);
                Some(scale_id)
            }
            None => None,
        };

        Ok(CalibrationOutcome {
            calibration,
            custom_scale_id,
        })
    }

    /// 解析页面某点的适用比例尺
    pub async fn resolve_scale(&self, query: ResolveScaleQuery) -> ServiceResult<ResolvedScale> {
        let (drawing, _) = self
            .resolve_drawing(&query.drawing_id, &query.tenant_id)
            .await?;
        Self::check_page(&drawing, query.page_number)?;

        let page_scale = self
            .scale_repo
            .find_page_scale(&query.drawing_id, query.page_number)
            .await?;
        let zones = self
            .scale_repo
            .list_scale_zones(&query.drawing_id, query.page_number)
            .await?;

        scale_resolver::resolve(page_scale.as_ref(), &zones, query.point.as_ref())
    }

    /// 像素长度换算为真实长度（在线段中点处解析比例尺）
    pub async fn convert_measurement(
        &self,
        query: ConvertMeasurementQuery,
    ) -> ServiceResult<MeasuredLength> {
        let midpoint = query.start.midpoint(&query.end);
        let resolved = self
            .resolve_scale(ResolveScaleQuery {
                tenant_id: query.tenant_id,
                drawing_id: query.drawing_id,
                page_number: query.page_number,
                point: Some(midpoint),
            })
            .await?;

        let pixel_length = query.start.distance_to(&query.end);
        Ok(MeasuredLength {
            pixel_length,
            pixels_per_unit: resolved.pixels_per_unit,
            real_length: calibration::pixels_to_real(pixel_length, resolved.pixels_per_unit),
            scale_name: resolved.scale_name,
        })
    }

    // ========== WBS 分类 ==========

    /// 创建 WBS 分类
    pub async fn create_wbs_category(
        &self,
        cmd: CreateWbsCategoryCommand,
    ) -> ServiceResult<WbsCategoryId> {
        info!(
            "Creating WBS category '{}' for project: {}",
            cmd.name, cmd.project_id
        );

        cmd.validate()?;
        self.resolve_project(&cmd.project_id, &cmd.tenant_id).await?;

        let categories = self.wbs_repo.list_by_project(&cmd.project_id).await?;
        let sort_order = cmd.sort_order.unwrap_or_else(|| {
            wbs_tree::next_sort_order(&categories, cmd.parent_id.as_ref())
        });

        let mut category = match cmd.parent_id {
            Some(parent_id) => {
                let parent = self
                    .wbs_repo
                    .find_by_id(&parent_id)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::InvalidParent("父分类不存在".to_string())
                    })?;
                WbsCategory::new_child(cmd.project_id, cmd.name, sort_order, &parent)?
            }
            None => WbsCategory::new_root(cmd.project_id, cmd.name, sort_order),
        };
        category.audit_info_mut().created_by = Some(cmd.user_id);

        let category_id = *category.id();
        self.wbs_repo.save(&category).await?;

        info!("WBS category created successfully: {}", category_id);
        Ok(category_id)
    }

    /// 更新 WBS 分类
    pub async fn update_wbs_category(
        &self,
        cmd: UpdateWbsCategoryCommand,
    ) -> ServiceResult<()> {
        info!("Updating WBS category: {}", cmd.category_id);

        cmd.validate()?;
        let mut category = self.resolve_category(&cmd.category_id, &cmd.tenant_id).await?;

        if let Some(name) = cmd.name {
            category.update_name(name);
        }
        if let Some(sort_order) = cmd.sort_order {
            category.update_sort_order(sort_order);
        }
        category.audit_info_mut().updated_by = Some(cmd.user_id);

        self.wbs_repo.update(&category).await?;

        info!("WBS category updated successfully: {}", cmd.category_id);
        Ok(())
    }

    /// 删除 WBS 分类
    ///
    /// 阻断式策略：有条目引用报 CategoryInUse，有子分类报
    /// CategoryHasChildren，二者都会保持数据原样
    pub async fn delete_wbs_category(
        &self,
        cmd: DeleteWbsCategoryCommand,
    ) -> ServiceResult<()> {
        info!("Deleting WBS category: {}", cmd.category_id);

        let category = self.resolve_category(&cmd.category_id, &cmd.tenant_id).await?;

        let referencing_items = self
            .takeoff_repo
            .count_by_category(&cmd.category_id)
            .await?;
        if referencing_items > 0 {
            warn!(
                "WBS category {} still referenced by {} items",
                cmd.category_id, referencing_items
            );
            return Err(ServiceError::CategoryInUse(format!(
                "分类 {} 仍被 {} 个条目引用",
                category.name(),
                referencing_items
            )));
        }

        if self.wbs_repo.has_children(&cmd.category_id).await? {
            return Err(ServiceError::CategoryHasChildren(format!(
                "分类 {} 还有子分类，请先删除子分类",
                category.name()
            )));
        }

        self.wbs_repo.delete(&cmd.category_id).await?;

        info!("WBS category deleted successfully: {}", cmd.category_id);
        Ok(())
    }

    /// 预置默认 WBS 分类（项目已有分类时跳过）
    pub async fn seed_wbs_categories(
        &self,
        cmd: SeedWbsCategoriesCommand,
    ) -> ServiceResult<u64> {
        info!("Seeding WBS categories for project: {}", cmd.project_id);

        self.resolve_project(&cmd.project_id, &cmd.tenant_id).await?;

        let existing = self.wbs_repo.count_by_project(&cmd.project_id).await?;
        if existing > 0 {
            info!(
                "Project {} already has {} categories, skipping seed",
                cmd.project_id, existing
            );
            return Ok(0);
        }

        let mut created = 0;
        for (position, name) in self.config.wbs_seed_categories.iter().enumerate() {
            let mut category =
                WbsCategory::new_root(cmd.project_id, name.clone(), position as i32 + 1);
            category.audit_info_mut().created_by = Some(cmd.user_id);
            self.wbs_repo.save(&category).await?;
            created += 1;
        }

        info!("Seeded {} WBS categories", created);
        Ok(created)
    }

    /// 项目分类平面列表（按排序、名称）
    pub async fn list_wbs_categories(
        &self,
        query: ListWbsCategoriesQuery,
    ) -> ServiceResult<Vec<WbsCategory>> {
        self.resolve_project(&query.project_id, &query.tenant_id)
            .await?;

        let mut categories = self.wbs_repo.list_by_project(&query.project_id).await?;
        categories.sort_by(|a, b| {
            a.sort_order()
                .cmp(&b.sort_order())
                .then_with(|| a.name().cmp(b.name()))
        });
        Ok(categories)
    }

    /// 项目分类树
    pub async fn get_wbs_tree(&self, query: GetWbsTreeQuery) -> ServiceResult<Vec<WbsNode>> {
        self.resolve_project(&query.project_id, &query.tenant_id)
            .await?;

        let categories = self.wbs_repo.list_by_project(&query.project_id).await?;
        Ok(wbs_tree::build_tree(&categories))
    }

    /// 分类完整路径串
    pub async fn get_wbs_path(&self, query: GetWbsPathQuery) -> ServiceResult<String> {
        let category = self.resolve_category(&query.category_id, &query.tenant_id).await?;
        let categories = self.wbs_repo.list_by_project(category.project_id()).await?;
        wbs_tree::path_string(&categories, &query.category_id)
    }

    /// 批量改写条目的 WBS 分类
    ///
    /// 整批先校验后写入：任一条目缺失或越权，一条不改
    pub async fn bulk_reassign_wbs(&self, cmd: BulkReassignWbsCommand) -> ServiceResult<u64> {
        info!(
            "Bulk reassigning {} items to category: {:?}",
            cmd.item_ids.len(),
            cmd.wbs_category_id
        );

        cmd.validate()?;

        let target_project = match &cmd.wbs_category_id {
            Some(category_id) => {
                let category = self.resolve_category(category_id, &cmd.tenant_id).await?;
                Some(*category.project_id())
            }
            None => None,
        };

        let mut item_ids = cmd.item_ids.clone();
        item_ids.sort_by_key(|id| id.0);
        item_ids.dedup();

        let items = self.takeoff_repo.find_many(&item_ids).await?;
        if items.len() != item_ids.len() {
            return Err(ServiceError::NotFound(
                "部分条目不存在，批量调整未执行".to_string(),
            ));
        }

        // 每个条目都要通过租户与项目校验，整批才允许写入
        let mut project_cache: HashMap<uuid::Uuid, ProjectId> = HashMap::new();
        for item in &items {
            let project_id = match project_cache.get(&item.drawing_id().0) {
                Some(project_id) => *project_id,
                None => {
                    let (drawing, project) =
                        self.resolve_drawing(item.drawing_id(), &cmd.tenant_id).await?;
                    project_cache.insert(drawing.id.0, project.id);
                    project.id
                }
            };
            if let Some(target_project) = &target_project {
                if project_id != *target_project {
                    return Err(ServiceError::InvalidParent(
                        "目标分类与条目不属于同一项目".to_string(),
                    ));
                }
            }
        }

        let updated = self
            .takeoff_repo
            .bulk_reassign_category(&item_ids, cmd.wbs_category_id.as_ref())
            .await?;

        info!("Bulk reassigned {} items", updated);
        Ok(updated)
    }

    /// 解析分类并校验归属
    async fn resolve_category(
        &self,
        category_id: &WbsCategoryId,
        tenant_id: &TenantId,
    ) -> ServiceResult<WbsCategory> {
        let category = self
            .wbs_repo
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("WBS 分类不存在".to_string()))?;
        self.resolve_project(category.project_id(), tenant_id).await?;
        Ok(category)
    }

    // ========== 工程量台账 ==========

    /// 创建工程量条目
    pub async fn create_takeoff_item(
        &self,
        cmd: CreateTakeoffItemCommand,
    ) -> ServiceResult<TakeoffItemId> {
        info!(
            "Creating takeoff item for drawing: {} page: {} material: {}",
            cmd.drawing_id, cmd.page_number, cmd.material_id
        );

        cmd.validate()?;
        let (drawing, project) = self.resolve_drawing(&cmd.drawing_id, &cmd.tenant_id).await?;
        Self::check_page(&drawing, cmd.page_number)?;

        let material = self
            .material_repo
            .find_by_id(&cmd.material_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("材料不存在".to_string()))?;
        if material.tenant_id() != &project.tenant_id {
            return Err(ServiceError::InvalidMaterial(
                "材料不属于项目所在公司".to_string(),
            ));
        }
        if !material.is_active() {
            return Err(ServiceError::InvalidMaterial(format!(
                "材料 {} 已停用",
                material.part_number()
            )));
        }

        if let Some(category_id) = &cmd.wbs_category_id {
            let category = self.resolve_category(category_id, &cmd.tenant_id).await?;
            if category.project_id() != &project.id {
                return Err(ServiceError::InvalidParent(
                    "WBS 分类与图纸不属于同一项目".to_string(),
                ));
            }
        }

        let mut item = TakeoffItem::new(
            cmd.drawing_id,
            cmd.page_number,
            cmd.material_id,
            cmd.wbs_category_id,
            cmd.quantity,
            cmd.multiplier.unwrap_or(1.0),
            cmd.kind,
            cmd.note,
        )?;
        item.audit_info_mut().created_by = Some(cmd.user_id);

        let item_id = *item.id();
        self.takeoff_repo.save(&item).await?;

        info!("Takeoff item created successfully: {}", item_id);
        Ok(item_id)
    }

    /// 更新工程量条目（部分更新，先整体校验）
    pub async fn update_takeoff_item(
        &self,
        cmd: UpdateTakeoffItemCommand,
    ) -> ServiceResult<()> {
        info!("Updating takeoff item: {}", cmd.item_id);

        cmd.validate()?;

        let mut item = self
            .takeoff_repo
            .find_by_id(&cmd.item_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("工程量条目不存在".to_string()))?;
        let (_, project) = self.resolve_drawing(item.drawing_id(), &cmd.tenant_id).await?;

        if let Some(Some(category_id)) = &cmd.patch.wbs_category_id {
            let category = self.resolve_category(category_id, &cmd.tenant_id).await?;
            if category.project_id() != &project.id {
                return Err(ServiceError::InvalidParent(
                    "WBS 分类与图纸不属于同一项目".to_string(),
                ));
            }
        }

        item.apply(&cmd.patch)?;
        item.audit_info_mut().updated_by = Some(cmd.user_id);

        self.takeoff_repo.update(&item).await?;

        info!("Takeoff item updated successfully: {}", cmd.item_id);
        Ok(())
    }

    /// 删除工程量条目
    pub async fn delete_takeoff_item(
        &self,
        cmd: DeleteTakeoffItemCommand,
    ) -> ServiceResult<()> {
        info!("Deleting takeoff item: {}", cmd.item_id);

        let item = self
            .takeoff_repo
            .find_by_id(&cmd.item_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("工程量条目不存在".to_string()))?;
        self.resolve_drawing(item.drawing_id(), &cmd.tenant_id).await?;

        self.takeoff_repo.delete(&cmd.item_id).await?;

        info!("Takeoff item deleted successfully: {}", cmd.item_id);
        Ok(())
    }

    /// 图纸台账列表（带材料列与 WBS 名称的显示行）
    pub async fn list_takeoff_items(
        &self,
        query: ListTakeoffItemsQuery,
    ) -> ServiceResult<Vec<TakeoffLine>> {
        let (_, project) = self
            .resolve_drawing(&query.drawing_id, &query.tenant_id)
            .await?;

        let items = self
            .takeoff_repo
            .list_by_drawing(&query.drawing_id, &query.filter)
            .await?;
        let materials = self.load_materials(&items).await?;
        let categories = self.wbs_repo.list_by_project(&project.id).await?;
        let category_names: HashMap<&WbsCategoryId, &str> = categories
            .iter()
            .map(|c| (c.id(), c.name()))
            .collect();
        let category_orders: HashMap<&WbsCategoryId, i32> = categories
            .iter()
            .map(|c| (c.id(), c.sort_order()))
            .collect();

        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            let material = materials.get(item.material_id()).ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "台账条目引用的材料不存在: {}",
                    item.material_id()
                ))
            })?;
            let wbs_name = item
                .wbs_category_id()
                .and_then(|id| category_names.get(id))
                .map(|name| name.to_string());
            lines.push(TakeoffLine::assemble(item, material, wbs_name));
        }

        // 页码、WBS 排序、材料类别、描述
        lines.sort_by(|a, b| {
            let a_order = a
                .item
                .wbs_category_id()
                .and_then(|id| category_orders.get(id).copied());
            let b_order = b
                .item
                .wbs_category_id()
                .and_then(|id| category_orders.get(id).copied());
            a.item
                .page_number()
                .cmp(&b.item.page_number())
                .then_with(|| a_order.cmp(&b_order))
                .then_with(|| a.material_category.cmp(&b.material_category))
                .then_with(|| a.description.cmp(&b.description))
        });

        Ok(lines)
    }

    /// 单图纸汇总
    pub async fn get_drawing_rollup(
        &self,
        query: GetDrawingRollupQuery,
    ) -> ServiceResult<Vec<RollupLine>> {
        info!("Rolling up drawing: {}", query.drawing_id);

        let (_, project) = self
            .resolve_drawing(&query.drawing_id, &query.tenant_id)
            .await?;

        let items = self
            .takeoff_repo
            .list_by_drawing(&query.drawing_id, &Default::default())
            .await?;
        self.rollup_items(&items, &project.id).await
    }

    /// 整项目汇总（跨图纸）
    pub async fn get_project_rollup(
        &self,
        query: GetProjectRollupQuery,
    ) -> ServiceResult<Vec<RollupLine>> {
        info!("Rolling up project: {}", query.project_id);

        self.resolve_project(&query.project_id, &query.tenant_id)
            .await?;

        let items = self.takeoff_repo.list_by_project(&query.project_id).await?;
        self.rollup_items(&items, &query.project_id).await
    }

    async fn rollup_items(
        &self,
        items: &[TakeoffItem],
        project_id: &ProjectId,
    ) -> ServiceResult<Vec<RollupLine>> {
        let materials = self.load_materials(items).await?;
        let categories = self.wbs_repo.list_by_project(project_id).await?;
        rollup::rollup(items, &materials, &categories)
    }

    async fn load_materials(
        &self,
        items: &[TakeoffItem],
    ) -> ServiceResult<HashMap<MaterialId, Material>> {
        let mut ids: Vec<MaterialId> = items.iter().map(|i| *i.material_id()).collect();
        ids.sort_by_key(|id| id.0);
        ids.dedup();

        let materials = self.material_repo.find_many(&ids).await?;
        Ok(materials.into_iter().map(|m| (*m.id(), m)).collect())
    }

    /// 公司材料目录列表（只读转发）
    pub async fn list_materials(&self, query: ListMaterialsQuery) -> ServiceResult<Vec<Material>> {
        self.material_repo
            .list_by_tenant(
                &query.tenant_id,
                query.category.as_deref(),
                query.active_only,
            )
            .await
    }

    // ========== 询价单 ==========

    /// 创建询价单（连同初始行集）
    pub async fn create_rfq(&self, cmd: CreateRfqCommand) -> ServiceResult<RfqId> {
        info!(
            "Creating RFQ '{}' for project: {}",
            cmd.rfq_number, cmd.project_id
        );

        let rfq_number = cmd.validate()?;
        self.resolve_project(&cmd.project_id, &cmd.tenant_id).await?;

        let exists = self
            .rfq_repo
            .exists_by_number(&cmd.project_id, &rfq_number)
            .await?;
        if exists {
            return Err(ServiceError::DuplicateRfqNumber(format!(
                "询价单编号 {} 已存在",
                rfq_number
            )));
        }

        let mut rfq = Rfq::new(cmd.project_id, rfq_number)
            .with_supplier(cmd.supplier_name, cmd.supplier_email, cmd.supplier_phone)
            .with_note(cmd.note);
        rfq.audit_info_mut().created_by = Some(cmd.user_id);

        let rfq_id = *rfq.id();
        self.rfq_repo.save(&rfq).await?;

        // 行是组装时的快照，不对照台账校验
        for line in cmd.lines {
            let line = RfqLine::new(rfq_id, line.material_id, line.quantity, line.unit, line.note)?;
            self.rfq_repo.save_line(&line).await?;
        }

        info!("RFQ created successfully: {}", rfq_id);
        Ok(rfq_id)
    }

    /// 项目询价单列表（新的在前）
    pub async fn list_rfqs(&self, query: ListRfqsQuery) -> ServiceResult<Vec<Rfq>> {
        self.resolve_project(&query.project_id, &query.tenant_id)
            .await?;
        self.rfq_repo.list_by_project(&query.project_id).await
    }

    /// 询价单详情（连同行与材料列）
    pub async fn get_rfq(&self, query: GetRfqQuery) -> ServiceResult<RfqWithLines> {
        let rfq = self.resolve_rfq(&query.rfq_id, &query.tenant_id).await?;

        let lines = self.rfq_repo.list_lines(&query.rfq_id).await?;
        let mut ids: Vec<MaterialId> = lines.iter().map(|l| *l.material_id()).collect();
        ids.sort_by_key(|id| id.0);
        ids.dedup();
        let materials: HashMap<MaterialId, Material> = self
            .material_repo
            .find_many(&ids)
            .await?
            .into_iter()
            .map(|m| (*m.id(), m))
            .collect();

        let lines = lines
            .into_iter()
            .map(|line| {
                let material = materials.get(line.material_id());
                RfqLineView::assemble(line, material)
            })
            .collect();

        Ok(RfqWithLines { rfq, lines })
    }

    /// 追加询价单行
    pub async fn add_rfq_line(&self, cmd: AddRfqLineCommand) -> ServiceResult<RfqLineId> {
        info!("Adding line to RFQ: {}", cmd.rfq_id);

        cmd.validate()?;
        self.resolve_rfq(&cmd.rfq_id, &cmd.tenant_id).await?;

        let line = RfqLine::new(
            cmd.rfq_id,
            cmd.line.material_id,
            cmd.line.quantity,
            cmd.line.unit,
            cmd.line.note,
        )?;
        let line_id = *line.id();
        self.rfq_repo.save_line(&line).await?;

        info!("RFQ line added successfully: {}", line_id);
        Ok(line_id)
    }

    /// 设置询价单状态
    pub async fn set_rfq_status(&self, cmd: SetRfqStatusCommand) -> ServiceResult<()> {
        info!("Setting RFQ {} status to {}", cmd.rfq_id, cmd.status);

        let mut rfq = self.resolve_rfq(&cmd.rfq_id, &cmd.tenant_id).await?;
        rfq.set_status(cmd.status)?;
        rfq.audit_info_mut().updated_by = Some(cmd.user_id);

        self.rfq_repo.update(&rfq).await?;

        info!("RFQ status updated successfully: {}", cmd.rfq_id);
        Ok(())
    }

    /// 解析询价单并校验归属
    async fn resolve_rfq(
        &self,
        rfq_id: &RfqId,
        tenant_id: &TenantId,
    ) -> ServiceResult<Rfq> {
        let rfq = self
            .rfq_repo
            .find_by_id(rfq_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("询价单不存在".to_string()))?;
        self.resolve_project(rfq.project_id(), tenant_id).await?;
        Ok(rfq)
    }
}
