//! 工程量台账与汇总集成测试

mod support;

use domain_core::Money;
use est_takeoff::application::commands::*;
use est_takeoff::application::queries::*;
use est_takeoff::domain::entities::TakeoffItemPatch;
use est_takeoff::domain::enums::MeasurementKind;
use est_takeoff::domain::value_objects::{
    DrawingId, MaterialId, TakeoffItemId, WbsCategoryId,
};
use est_takeoff::error::ServiceError;

use support::{TestContext, setup};

async fn add_item(
    ctx: &TestContext,
    drawing_id: DrawingId,
    material_id: MaterialId,
    wbs_category_id: Option<WbsCategoryId>,
    quantity: f64,
    multiplier: Option<f64>,
    kind: MeasurementKind,
) -> TakeoffItemId {
    ctx.handler
        .create_takeoff_item(CreateTakeoffItemCommand {
            tenant_id: ctx.tenant_id,
            user_id: ctx.user_id,
            drawing_id,
            page_number: 1,
            material_id,
            wbs_category_id,
            quantity,
            multiplier,
            kind,
            note: None,
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn negative_quantity_rejected() {
    let ctx = setup();

    let result = ctx
        .handler
        .create_takeoff_item(CreateTakeoffItemCommand {
            tenant_id: ctx.tenant_id,
            user_id: ctx.user_id,
            drawing_id: ctx.drawing_id,
            page_number: 1,
            material_id: ctx.pipe2,
            wbs_category_id: None,
            quantity: -5.0,
            multiplier: None,
            kind: MeasurementKind::Length,
            note: None,
        })
        .await;
    assert!(matches!(result, Err(ServiceError::InvalidQuantity(_))));
}

#[tokio::test]
async fn inactive_material_rejected() {
    let ctx = setup();

    let result = ctx
        .handler
        .create_takeoff_item(CreateTakeoffItemCommand {
            tenant_id: ctx.tenant_id,
            user_id: ctx.user_id,
            drawing_id: ctx.drawing_id,
            page_number: 1,
            material_id: ctx.inactive,
            wbs_category_id: None,
            quantity: 5.0,
            multiplier: None,
            kind: MeasurementKind::Length,
            note: None,
        })
        .await;
    assert!(matches!(result, Err(ServiceError::InvalidMaterial(_))));
}

#[tokio::test]
async fn cross_company_material_rejected() {
    let ctx = setup();

    let result = ctx
        .handler
        .create_takeoff_item(CreateTakeoffItemCommand {
            tenant_id: ctx.tenant_id,
            user_id: ctx.user_id,
            drawing_id: ctx.drawing_id,
            page_number: 1,
            material_id: ctx.foreign_material,
            wbs_category_id: None,
            quantity: 5.0,
            multiplier: None,
            kind: MeasurementKind::Length,
            note: None,
        })
        .await;
    assert!(matches!(result, Err(ServiceError::InvalidMaterial(_))));
}

#[tokio::test]
async fn drawing_rollup_sums_quantity_price_labor() {
    let ctx = setup();

    // 单价 $3.25 / 人工 0.10：数量 10 + 5，系数 1.0
    add_item(&ctx, ctx.drawing_id, ctx.pipe2, None, 10.0, None, MeasurementKind::Length).await;
    add_item(&ctx, ctx.drawing_id, ctx.pipe2, None, 5.0, None, MeasurementKind::Length).await;

    let rollup = ctx
        .handler
        .get_drawing_rollup(GetDrawingRollupQuery {
            tenant_id: ctx.tenant_id,
            drawing_id: ctx.drawing_id,
        })
        .await
        .unwrap();
    assert_eq!(rollup.len(), 1);
    let line = &rollup[0];
    assert_eq!(line.total_quantity, 15.0);
    assert_eq!(line.total_price, Money::usd(4875)); // $48.75
    assert!((line.total_labor - 1.5).abs() < 1e-9);
    assert_eq!(line.part_number, "PVC04020");
    assert_eq!(line.wbs_path, "Uncategorized");
}

#[tokio::test]
async fn multiplier_scales_price_but_not_labor() {
    let ctx = setup();

    add_item(
        &ctx,
        ctx.drawing_id,
        ctx.pipe2,
        None,
        10.0,
        Some(1.5),
        MeasurementKind::Length,
    )
    .await;

    let rollup = ctx
        .handler
        .get_drawing_rollup(GetDrawingRollupQuery {
            tenant_id: ctx.tenant_id,
            drawing_id: ctx.drawing_id,
        })
        .await
        .unwrap();
    let line = &rollup[0];
    assert_eq!(line.total_quantity, 15.0);
    assert_eq!(line.total_price, Money::usd(4875));
    // 系数不作用于人工
    assert!((line.total_labor - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn project_rollup_spans_drawings_and_orders_by_wbs() {
    let ctx = setup();

    let water = ctx
        .handler
        .create_wbs_category(CreateWbsCategoryCommand {
            tenant_id: ctx.tenant_id,
            user_id: ctx.user_id,
            project_id: ctx.project_id,
            name: "UG Water".to_string(),
            parent_id: None,
            sort_order: Some(1),
        })
        .await
        .unwrap();
    let storm = ctx
        .handler
        .create_wbs_category(CreateWbsCategoryCommand {
            tenant_id: ctx.tenant_id,
            user_id: ctx.user_id,
            project_id: ctx.project_id,
            name: "UG Storm".to_string(),
            parent_id: None,
            sort_order: Some(2),
        })
        .await
        .unwrap();

    // 同项目第二张图纸
    let second_drawing = DrawingId::new();
    ctx.store
        .insert_drawing(est_takeoff::domain::repositories::DrawingRef {
            id: second_drawing,
            project_id: ctx.project_id,
            name: "P-102".to_string(),
            page_count: 2,
        });

    add_item(&ctx, ctx.drawing_id, ctx.pipe2, Some(water), 10.0, None, MeasurementKind::Length)
        .await;
    add_item(&ctx, second_drawing, ctx.pipe2, Some(water), 5.0, None, MeasurementKind::Length)
        .await;
    add_item(&ctx, second_drawing, ctx.elbow2, Some(storm), 4.0, None, MeasurementKind::Count)
        .await;

    let rollup = ctx
        .handler
        .get_project_rollup(GetProjectRollupQuery {
            tenant_id: ctx.tenant_id,
            project_id: ctx.project_id,
        })
        .await
        .unwrap();

    assert_eq!(rollup.len(), 2);
    // 两张图纸的同组量合并
    assert_eq!(rollup[0].wbs_path, "UG Water");
    assert_eq!(rollup[0].total_quantity, 15.0);
    assert_eq!(rollup[0].total_price, Money::usd(4875));
    assert_eq!(rollup[1].wbs_path, "UG Storm");
    assert_eq!(rollup[1].total_quantity, 4.0);
    assert_eq!(rollup[1].total_price, Money::usd(1140)); // 4 x $2.85
}

#[tokio::test]
async fn rollup_additivity_is_insertion_order_independent() {
    let ctx = setup();

    let quantities = [3.0, 7.0, 2.5, 1.5];
    let mut expected_price = Money::usd(0);
    for quantity in quantities {
        add_item(
            &ctx,
            ctx.drawing_id,
            ctx.pipe3,
            None,
            quantity,
            None,
            MeasurementKind::Length,
        )
        .await;
        expected_price = expected_price + Money::usd(685).mul_f64(quantity);
    }

    let rollup = ctx
        .handler
        .get_project_rollup(GetProjectRollupQuery {
            tenant_id: ctx.tenant_id,
            project_id: ctx.project_id,
        })
        .await
        .unwrap();
    assert_eq!(rollup.len(), 1);
    assert_eq!(rollup[0].total_quantity, 14.0);
    // 组合计恰等于各条目延伸价之和（逐条取整到分）
    assert_eq!(rollup[0].total_price, expected_price);
}

#[tokio::test]
async fn update_immediately_affects_rollup() {
    let ctx = setup();

    let item_id = add_item(
        &ctx,
        ctx.drawing_id,
        ctx.pipe2,
        None,
        10.0,
        None,
        MeasurementKind::Length,
    )
    .await;

    ctx.handler
        .update_takeoff_item(UpdateTakeoffItemCommand {
            tenant_id: ctx.tenant_id,
            user_id: ctx.user_id,
            item_id,
            patch: TakeoffItemPatch {
                quantity: Some(20.0),
                ..Default::default()
            },
        })
        .await
        .unwrap();

    let rollup = ctx
        .handler
        .get_drawing_rollup(GetDrawingRollupQuery {
            tenant_id: ctx.tenant_id,
            drawing_id: ctx.drawing_id,
        })
        .await
        .unwrap();
    assert_eq!(rollup[0].total_quantity, 20.0);
    assert_eq!(rollup[0].total_price, Money::usd(6500));
}

#[tokio::test]
async fn list_filters_by_page_and_category() {
    let ctx = setup();

    let water = ctx
        .handler
        .create_wbs_category(CreateWbsCategoryCommand {
            tenant_id: ctx.tenant_id,
            user_id: ctx.user_id,
            project_id: ctx.project_id,
            name: "UG Water".to_string(),
            parent_id: None,
            sort_order: None,
        })
        .await
        .unwrap();

    add_item(&ctx, ctx.drawing_id, ctx.pipe2, Some(water), 10.0, None, MeasurementKind::Length)
        .await;
    ctx.handler
        .create_takeoff_item(CreateTakeoffItemCommand {
            tenant_id: ctx.tenant_id,
            user_id: ctx.user_id,
            drawing_id: ctx.drawing_id,
            page_number: 2,
            material_id: ctx.elbow2,
            wbs_category_id: None,
            quantity: 6.0,
            multiplier: None,
            kind: MeasurementKind::Count,
            note: Some("风雨排水口".to_string()),
        })
        .await
        .unwrap();

    let page_two = ctx
        .handler
        .list_takeoff_items(ListTakeoffItemsQuery {
            tenant_id: ctx.tenant_id,
            drawing_id: ctx.drawing_id,
            filter: est_takeoff::domain::entities::TakeoffItemFilter {
                page_number: Some(2),
                wbs_category_id: None,
            },
        })
        .await
        .unwrap();
    assert_eq!(page_two.len(), 1);
    assert_eq!(page_two[0].part_number, "PVC00404");
    assert_eq!(page_two[0].extended_price, Money::usd(1710)); // 6 x $2.85
    assert!((page_two[0].extended_labor - 1.02).abs() < 1e-9);

    let by_category = ctx
        .handler
        .list_takeoff_items(ListTakeoffItemsQuery {
            tenant_id: ctx.tenant_id,
            drawing_id: ctx.drawing_id,
            filter: est_takeoff::domain::entities::TakeoffItemFilter {
                page_number: None,
                wbs_category_id: Some(water),
            },
        })
        .await
        .unwrap();
    assert_eq!(by_category.len(), 1);
    assert_eq!(by_category[0].wbs_name.as_deref(), Some("UG Water"));
}

#[tokio::test]
async fn uncategorized_bucket_stays_separate_from_real_category() {
    let ctx = setup();

    // 真实分类恰好叫 "Uncategorized"
    let decoy = ctx
        .handler
        .create_wbs_category(CreateWbsCategoryCommand {
            tenant_id: ctx.tenant_id,
            user_id: ctx.user_id,
            project_id: ctx.project_id,
            name: "Uncategorized".to_string(),
            parent_id: None,
            sort_order: None,
        })
        .await
        .unwrap();

    add_item(&ctx, ctx.drawing_id, ctx.pipe2, Some(decoy), 10.0, None, MeasurementKind::Length)
        .await;
    add_item(&ctx, ctx.drawing_id, ctx.pipe2, None, 5.0, None, MeasurementKind::Length).await;

    let rollup = ctx
        .handler
        .get_drawing_rollup(GetDrawingRollupQuery {
            tenant_id: ctx.tenant_id,
            drawing_id: ctx.drawing_id,
        })
        .await
        .unwrap();
    assert_eq!(rollup.len(), 2);
    assert!(rollup[0].wbs_category_id.is_none());
    assert_eq!(rollup[0].total_quantity, 5.0);
    assert_eq!(rollup[1].wbs_category_id, Some(decoy));
    assert_eq!(rollup[1].total_quantity, 10.0);
}

#[tokio::test]
async fn delete_item_removes_it_from_rollup() {
    let ctx = setup();

    let item_id = add_item(
        &ctx,
        ctx.drawing_id,
        ctx.pipe2,
        None,
        10.0,
        None,
        MeasurementKind::Length,
    )
    .await;

    ctx.handler
        .delete_takeoff_item(DeleteTakeoffItemCommand {
            tenant_id: ctx.tenant_id,
            user_id: ctx.user_id,
            item_id,
        })
        .await
        .unwrap();

    let rollup = ctx
        .handler
        .get_drawing_rollup(GetDrawingRollupQuery {
            tenant_id: ctx.tenant_id,
            drawing_id: ctx.drawing_id,
        })
        .await
        .unwrap();
    assert!(rollup.is_empty());
}

#[tokio::test]
async fn material_catalog_listing_filters() {
    let ctx = setup();

    let active = ctx
        .handler
        .list_materials(ListMaterialsQuery {
            tenant_id: ctx.tenant_id,
            category: None,
            active_only: true,
        })
        .await
        .unwrap();
    assert_eq!(active.len(), 3);
    assert!(active.iter().all(|m| m.is_active()));

    let fittings = ctx
        .handler
        .list_materials(ListMaterialsQuery {
            tenant_id: ctx.tenant_id,
            category: Some("PVC DWV Fittings".to_string()),
            active_only: false,
        })
        .await
        .unwrap();
    assert_eq!(fittings.len(), 1);
    assert_eq!(fittings[0].part_number(), "PVC00404");
}
