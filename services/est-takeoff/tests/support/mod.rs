//! 集成测试公共夹具
//!
//! 内存适配器上装配 ServiceHandler，预置两家公司、
//! 各自项目/图纸与一份小材料目录

#![allow(dead_code)]

use std::sync::Arc;

use common::{TenantId, UserId};
use config::TakeoffConfig;
use domain_core::{Currency, Money};
use est_takeoff::application::ServiceHandler;
use est_takeoff::domain::entities::Material;
use est_takeoff::domain::repositories::{DrawingRef, ProjectRef};
use est_takeoff::domain::value_objects::{DrawingId, MaterialId, ProjectId};
use est_takeoff::infrastructure::persistence::memory::InMemoryStore;

pub struct TestContext {
    pub handler: ServiceHandler,
    pub store: Arc<InMemoryStore>,
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub project_id: ProjectId,
    pub drawing_id: DrawingId,
    /// 2" PVC 管，$3.25 / 0.10 人工，LF
    pub pipe2: MaterialId,
    /// 3" PVC 管，$6.85 / 0.14 人工，LF
    pub pipe3: MaterialId,
    /// 2" 弯头，$2.85 / 0.17 人工，EA
    pub elbow2: MaterialId,
    /// 已停用材料
    pub inactive: MaterialId,
    pub other_tenant_id: TenantId,
    pub other_project_id: ProjectId,
    pub other_drawing_id: DrawingId,
    /// 另一家公司的材料
    pub foreign_material: MaterialId,
}

fn material(
    tenant_id: TenantId,
    part_number: &str,
    category: &str,
    description: &str,
    size: &str,
    unit: &str,
    price_cents: i64,
    labor_units: f64,
    is_active: bool,
) -> Material {
    Material::from_parts(
        MaterialId::new(),
        tenant_id,
        part_number.to_string(),
        category.to_string(),
        description.to_string(),
        Some(size.to_string()),
        unit.to_string(),
        Money::new(price_cents, Currency::usd()),
        labor_units,
        is_active,
    )
}

pub fn setup() -> TestContext {
    let store = Arc::new(InMemoryStore::new());

    let tenant_id = TenantId::new();
    let project_id = ProjectId::new();
    let drawing_id = DrawingId::new();
    store.insert_project(ProjectRef {
        id: project_id,
        tenant_id,
        name: "Riverside Clinic".to_string(),
    });
    store.insert_drawing(DrawingRef {
        id: drawing_id,
        project_id,
        name: "P-101 Underground Plumbing".to_string(),
        page_count: 3,
    });

    let other_tenant_id = TenantId::new();
    let other_project_id = ProjectId::new();
    let other_drawing_id = DrawingId::new();
    store.insert_project(ProjectRef {
        id: other_project_id,
        tenant_id: other_tenant_id,
        name: "Harbor Lofts".to_string(),
    });
    store.insert_drawing(DrawingRef {
        id: other_drawing_id,
        project_id: other_project_id,
        name: "P-201".to_string(),
        page_count: 1,
    });

    let pipe2 = material(
        tenant_id,
        "PVC04020",
        "PVC Sch 40 Pipe",
        "2\" Sch 40 PVC Plain End Pipe",
        "2\"",
        "LF",
        325,
        0.10,
        true,
    );
    let pipe3 = material(
        tenant_id,
        "PVC04030",
        "PVC Sch 40 Pipe",
        "3\" Sch 40 PVC Plain End Pipe",
        "3\"",
        "LF",
        685,
        0.14,
        true,
    );
    let elbow2 = material(
        tenant_id,
        "PVC00404",
        "PVC DWV Fittings",
        "2\" PVC DWV 90 Elbow",
        "2\"",
        "EA",
        285,
        0.17,
        true,
    );
    let inactive = material(
        tenant_id,
        "PVC04080",
        "PVC Sch 40 Pipe",
        "8\" Sch 40 PVC Plain End Pipe",
        "8\"",
        "LF",
        3275,
        0.25,
        false,
    );
    let foreign_material = material(
        other_tenant_id,
        "CU01020",
        "Copper Pipe",
        "2\" Type L Copper Pipe",
        "2\"",
        "LF",
        1250,
        0.12,
        true,
    );

    let pipe2_id = *pipe2.id();
    let pipe3_id = *pipe3.id();
    let elbow2_id = *elbow2.id();
    let inactive_id = *inactive.id();
    let foreign_id = *foreign_material.id();
    store.insert_material(pipe2);
    store.insert_material(pipe3);
    store.insert_material(elbow2);
    store.insert_material(inactive);
    store.insert_material(foreign_material);

    let handler = ServiceHandler::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        TakeoffConfig::default(),
    );

    TestContext {
        handler,
        store,
        tenant_id,
        user_id: UserId::new(),
        project_id,
        drawing_id,
        pipe2: pipe2_id,
        pipe3: pipe3_id,
        elbow2: elbow2_id,
        inactive: inactive_id,
        other_tenant_id,
        other_project_id,
        other_drawing_id,
        foreign_material: foreign_id,
    }
}
