//! In-memory adapter
//!
//! 用 RwLock + HashMap 实现全部仓储端口。集成测试与
//! 嵌入式宿主共用；协作方数据（项目/图纸/材料）由
//! insert_* 注入

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use common::TenantId;
use uuid::Uuid;

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

#[derive(Default)]
struct StoreInner {
    projects: HashMap<Uuid, ProjectRef>,
    drawings: HashMap<Uuid, DrawingRef>,
    materials: HashMap<Uuid, Material>,
    custom_scales: HashMap<Uuid, CustomScale>,
    page_scales: HashMap<(Uuid, i32), PageScale>,
    scale_zones: HashMap<Uuid, ScaleZone>,
    wbs_categories: HashMap<Uuid, WbsCategory>,
    takeoff_items: HashMap<Uuid, TakeoffItem>,
    rfqs: HashMap<Uuid, Rfq>,
    rfq_lines: Vec<RfqLine>,
}

/// 内存存储
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    // ========== 协作方数据注入 ==========

    pub fn insert_project(&self, project: ProjectRef) {
        self.write().projects.insert(project.id.0, project);
    }

    pub fn insert_drawing(&self, drawing: DrawingRef) {
        self.write().drawings.insert(drawing.id.0, drawing);
    }

    pub fn insert_material(&self, material: Material) {
        self.write().materials.insert(material.id().0, material);
    }
}

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn find_by_id(&self, id: &ProjectId) -> ServiceResult<Option<ProjectRef>> {
        Ok(self.read().projects.get(&id.0).cloned())
    }
}

#[async_trait]
impl DrawingRepository for InMemoryStore {
    async fn find_by_id(&self, id: &DrawingId) -> ServiceResult<Option<DrawingRef>> {
        Ok(self.read().drawings.get(&id.0).cloned())
    }
}

#[async_trait]
impl MaterialRepository for InMemoryStore {
    async fn find_by_id(&self, id: &MaterialId) -> ServiceResult<Option<Material>> {
        Ok(self.read().materials.get(&id.0).cloned())
    }

    async fn find_many(&self, ids: &[MaterialId]) -> ServiceResult<Vec<Material>> {
        let store = self.read();
        Ok(ids
            .iter()
            .filter_map(|id| store.materials.get(&id.0).cloned())
            .collect())
    }

    async fn list_by_tenant(
        &self,
        tenant_id: &TenantId,
        category: Option<&str>,
        active_only: bool,
    ) -> ServiceResult<Vec<Material>> {
        let store = self.read();
        let mut materials: Vec<Material> = store
            .materials
            .values()
            .filter(|m| m.tenant_id() == tenant_id)
            .filter(|m| !active_only || m.is_active())
            .filter(|m| category.is_none_or(|c| m.category() == c))
            .cloned()
            .collect();
        materials.sort_by(|a, b| {
            a.category()
                .cmp(b.category())
                .then_with(|| a.description().cmp(b.description()))
        });
        Ok(materials)
    }
}

#[async_trait]
impl ScaleRepository for InMemoryStore {
    async fn save_custom_scale(&self, scale: &CustomScale) -> ServiceResult<()> {
        self.write().custom_scales.insert(scale.id().0, scale.clone());
        Ok(())
    }

    async fn find_custom_scale(
        &self,
        id: &CustomScaleId,
    ) -> ServiceResult<Option<CustomScale>> {
        Ok(self.read().custom_scales.get(&id.0).cloned())
    }

    async fn list_custom_scales(
        &self,
        project_id: &ProjectId,
    ) -> ServiceResult<Vec<CustomScale>> {
        let store = self.read();
        let mut scales: Vec<CustomScale> = store
            .custom_scales
            .values()
            .filter(|s| s.project_id() == project_id)
            .cloned()
            .collect();
        scales.sort_by_key(|s| s.audit_info().created_at);
        Ok(scales)
    }

    async fn delete_custom_scale(&self, id: &CustomScaleId) -> ServiceResult<()> {
        self.write().custom_scales.remove(&id.0);
        Ok(())
    }

    async fn upsert_page_scale(&self, page_scale: &PageScale) -> ServiceResult<()> {
        let key = (page_scale.drawing_id().0, page_scale.page_number());
        self.write().page_scales.insert(key, page_scale.clone());
        Ok(())
    }

    async fn find_page_scale(
        &self,
        drawing_id: &DrawingId,
        page_number: i32,
    ) -> ServiceResult<Option<PageScale>> {
        Ok(self
            .read()
            .page_scales
            .get(&(drawing_id.0, page_number))
            .cloned())
    }

    async fn save_scale_zone(&self, zone: &ScaleZone) -> ServiceResult<()> {
        self.write().scale_zones.insert(zone.id().0, zone.clone());
        Ok(())
    }

    async fn update_scale_zone(&self, zone: &ScaleZone) -> ServiceResult<()> {
        self.write().scale_zones.insert(zone.id().0, zone.clone());
        Ok(())
    }

    async fn find_scale_zone(&self, id: &ScaleZoneId) -> ServiceResult<Option<ScaleZone>> {
        Ok(self.read().scale_zones.get(&id.0).cloned())
    }

    async fn list_scale_zones(
        &self,
        drawing_id: &DrawingId,
        page_number: i32,
    ) -> ServiceResult<Vec<ScaleZone>> {
        let store = self.read();
        let mut zones: Vec<ScaleZone> = store
            .scale_zones
            .values()
            .filter(|z| z.drawing_id() == drawing_id && z.page_number() == page_number)
            .cloned()
            .collect();
        zones.sort_by_key(|z| z.audit_info().created_at);
        Ok(zones)
    }

    async fn delete_scale_zone(&self, id: &ScaleZoneId) -> ServiceResult<()> {
        self.write().scale_zones.remove(&id.0);
        Ok(())
    }
}

#[async_trait]
impl WbsRepository for InMemoryStore {
    async fn save(&self, category: &WbsCategory) -> ServiceResult<()> {
        self.write()
            .wbs_categories
            .insert(category.id().0, category.clone());
        Ok(())
    }

    async fn update(&self, category: &WbsCategory) -> ServiceResult<()> {
        self.write()
            .wbs_categories
            .insert(category.id().0, category.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &WbsCategoryId) -> ServiceResult<Option<WbsCategory>> {
        Ok(self.read().wbs_categories.get(&id.0).cloned())
    }

    async fn list_by_project(
        &self,
        project_id: &ProjectId,
    ) -> ServiceResult<Vec<WbsCategory>> {
        let store = self.read();
        let mut categories: Vec<WbsCategory> = store
            .wbs_categories
            .values()
            .filter(|c| c.project_id() == project_id)
            .cloned()
            .collect();
        categories.sort_by_key(|c| c.audit_info().created_at);
        Ok(categories)
    }

    async fn count_by_project(&self, project_id: &ProjectId) -> ServiceResult<u64> {
        let store = self.read();
        Ok(store
            .wbs_categories
            .values()
            .filter(|c| c.project_id() == project_id)
            .count() as u64)
    }

    async fn has_children(&self, id: &WbsCategoryId) -> ServiceResult<bool> {
        let store = self.read();
        Ok(store
            .wbs_categories
            .values()
            .any(|c| c.parent_id() == Some(id)))
    }

    async fn delete(&self, id: &WbsCategoryId) -> ServiceResult<()> {
        self.write().wbs_categories.remove(&id.0);
        Ok(())
    }
}

#[async_trait]
impl TakeoffRepository for InMemoryStore {
    async fn save(&self, item: &TakeoffItem) -> ServiceResult<()> {
        self.write().takeoff_items.insert(item.id().0, item.clone());
        Ok(())
    }

    async fn update(&self, item: &TakeoffItem) -> ServiceResult<()> {
        self.write().takeoff_items.insert(item.id().0, item.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &TakeoffItemId) -> ServiceResult<Option<TakeoffItem>> {
        Ok(self.read().takeoff_items.get(&id.0).cloned())
    }

    async fn find_many(&self, ids: &[TakeoffItemId]) -> ServiceResult<Vec<TakeoffItem>> {
        let store = self.read();
        Ok(ids
            .iter()
            .filter_map(|id| store.takeoff_items.get(&id.0).cloned())
            .collect())
    }

    async fn list_by_drawing(
        &self,
        drawing_id: &DrawingId,
        filter: &TakeoffItemFilter,
    ) -> ServiceResult<Vec<TakeoffItem>> {
        let store = self.read();
        let mut items: Vec<TakeoffItem> = store
            .takeoff_items
            .values()
            .filter(|i| i.drawing_id() == drawing_id)
            .filter(|i| filter.page_number.is_none_or(|p| i.page_number() == p))
            .filter(|i| {
                filter
                    .wbs_category_id
                    .is_none_or(|c| i.wbs_category_id() == Some(&c))
            })
            .cloned()
            .collect();
        items.sort_by_key(|i| (i.page_number(), i.audit_info().created_at));
        Ok(items)
    }

    async fn list_by_project(
        &self,
        project_id: &ProjectId,
    ) -> ServiceResult<Vec<TakeoffItem>> {
        let store = self.read();
        let mut items: Vec<TakeoffItem> = store
            .takeoff_items
            .values()
            .filter(|i| {
                store
                    .drawings
                    .get(&i.drawing_id().0)
                    .is_some_and(|d| d.project_id == *project_id)
            })
            .cloned()
            .collect();
        items.sort_by_key(|i| (i.page_number(), i.audit_info().created_at));
        Ok(items)
    }

    async fn count_by_category(&self, category_id: &WbsCategoryId) -> ServiceResult<u64> {
        let store = self.read();
        Ok(store
            .takeoff_items
            .values()
            .filter(|i| i.wbs_category_id() == Some(category_id))
            .count() as u64)
    }

    async fn bulk_reassign_category(
        &self,
        item_ids: &[TakeoffItemId],
        category_id: Option<&WbsCategoryId>,
    ) -> ServiceResult<u64> {
        let mut store = self.write();

        // 单写锁之内先验后改，保持整批原子
        if item_ids.iter().any(|id| !store.takeoff_items.contains_key(&id.0)) {
            return Ok(0);
        }

        let mut updated = 0;
        for id in item_ids {
            if let Some(item) = store.takeoff_items.get_mut(&id.0) {
                item.reassign_category(category_id.copied());
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn delete(&self, id: &TakeoffItemId) -> ServiceResult<()> {
        self.write().takeoff_items.remove(&id.0);
        Ok(())
    }
}

#[async_trait]
impl RfqRepository for InMemoryStore {
    async fn save(&self, rfq: &Rfq) -> ServiceResult<()> {
        self.write().rfqs.insert(rfq.id().0, rfq.clone());
        Ok(())
    }

    async fn update(&self, rfq: &Rfq) -> ServiceResult<()> {
        self.write().rfqs.insert(rfq.id().0, rfq.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &RfqId) -> ServiceResult<Option<Rfq>> {
        Ok(self.read().rfqs.get(&id.0).cloned())
    }

    async fn exists_by_number(
        &self,
        project_id: &ProjectId,
        rfq_number: &RfqNumber,
    ) -> ServiceResult<bool> {
        let store = self.read();
        Ok(store
            .rfqs
            .values()
            .any(|r| r.project_id() == project_id && r.rfq_number() == rfq_number))
    }

    async fn list_by_project(&self, project_id: &ProjectId) -> ServiceResult<Vec<Rfq>> {
        let store = self.read();
        let mut rfqs: Vec<Rfq> = store
            .rfqs
            .values()
            .filter(|r| r.project_id() == project_id)
            .cloned()
            .collect();
        // 新的在前
        rfqs.sort_by(|a, b| b.audit_info().created_at.cmp(&a.audit_info().created_at));
        Ok(rfqs)
    }

    async fn save_line(&self, line: &RfqLine) -> ServiceResult<()> {
        self.write().rfq_lines.push(line.clone());
        Ok(())
    }

    async fn list_lines(&self, rfq_id: &RfqId) -> ServiceResult<Vec<RfqLine>> {
        let store = self.read();
        Ok(store
            .rfq_lines
            .iter()
            .filter(|l| l.rfq_id() == rfq_id)
            .cloned()
            .collect())
    }
}
