//! WBS 分类流程集成测试

mod support;

use est_takeoff::application::commands::*;
use est_takeoff::application::queries::*;
use est_takeoff::domain::enums::MeasurementKind;
use est_takeoff::domain::value_objects::WbsCategoryId;
use est_takeoff::error::ServiceError;

use support::{TestContext, setup};

async fn create_category(
    ctx: &TestContext,
    name: &str,
    parent_id: Option<WbsCategoryId>,
) -> WbsCategoryId {
    ctx.handler
        .create_wbs_category(CreateWbsCategoryCommand {
            tenant_id: ctx.tenant_id,
            user_id: ctx.user_id,
            project_id: ctx.project_id,
            name: name.to_string(),
            parent_id,
            sort_order: None,
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn sort_order_defaults_to_max_plus_one() {
    let ctx = setup();

    create_category(&ctx, "Base Bid", None).await;
    create_category(&ctx, "Alternates", None).await;

    let categories = ctx
        .handler
        .list_wbs_categories(ListWbsCategoriesQuery {
            tenant_id: ctx.tenant_id,
            project_id: ctx.project_id,
        })
        .await
        .unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].name(), "Base Bid");
    assert_eq!(categories[0].sort_order(), 1);
    assert_eq!(categories[1].name(), "Alternates");
    assert_eq!(categories[1].sort_order(), 2);
}

#[tokio::test]
async fn tree_nests_children_under_parent() {
    let ctx = setup();

    let base = create_category(&ctx, "Base Bid", None).await;
    let water = create_category(&ctx, "UG Water", Some(base)).await;
    create_category(&ctx, "Service Lines", Some(water)).await;
    create_category(&ctx, "UG Sanitary", Some(base)).await;

    let tree = ctx
        .handler
        .get_wbs_tree(GetWbsTreeQuery {
            tenant_id: ctx.tenant_id,
            project_id: ctx.project_id,
        })
        .await
        .unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].name, "Base Bid");
    assert_eq!(tree[0].children.len(), 2);
    assert_eq!(tree[0].children[0].name, "UG Water");
    assert_eq!(tree[0].children[0].children[0].name, "Service Lines");
    assert_eq!(tree[0].children[1].name, "UG Sanitary");
}

#[tokio::test]
async fn path_renders_root_to_leaf() {
    let ctx = setup();

    let base = create_category(&ctx, "Base Bid", None).await;
    let water = create_category(&ctx, "UG Water", Some(base)).await;
    let service = create_category(&ctx, "Service Lines", Some(water)).await;

    let path = ctx
        .handler
        .get_wbs_path(GetWbsPathQuery {
            tenant_id: ctx.tenant_id,
            category_id: service,
        })
        .await
        .unwrap();
    assert_eq!(path, "Base Bid > UG Water > Service Lines");
}

#[tokio::test]
async fn parent_from_other_project_rejected() {
    let ctx = setup();

    let foreign_parent = ctx
        .handler
        .create_wbs_category(CreateWbsCategoryCommand {
            tenant_id: ctx.other_tenant_id,
            user_id: ctx.user_id,
            project_id: ctx.other_project_id,
            name: "Foreign Root".to_string(),
            parent_id: None,
            sort_order: None,
        })
        .await
        .unwrap();

    let result = ctx
        .handler
        .create_wbs_category(CreateWbsCategoryCommand {
            tenant_id: ctx.tenant_id,
            user_id: ctx.user_id,
            project_id: ctx.project_id,
            name: "Orphan".to_string(),
            parent_id: Some(foreign_parent),
            sort_order: None,
        })
        .await;
    assert!(matches!(result, Err(ServiceError::InvalidParent(_))));
}

#[tokio::test]
async fn delete_leaf_succeeds() {
    let ctx = setup();

    let category_id = create_category(&ctx, "Temporary", None).await;
    ctx.handler
        .delete_wbs_category(DeleteWbsCategoryCommand {
            tenant_id: ctx.tenant_id,
            user_id: ctx.user_id,
            category_id,
        })
        .await
        .unwrap();

    let categories = ctx
        .handler
        .list_wbs_categories(ListWbsCategoriesQuery {
            tenant_id: ctx.tenant_id,
            project_id: ctx.project_id,
        })
        .await
        .unwrap();
    assert!(categories.is_empty());
}

#[tokio::test]
async fn delete_with_children_blocked() {
    let ctx = setup();

    let base = create_category(&ctx, "Base Bid", None).await;
    create_category(&ctx, "UG Water", Some(base)).await;

    let result = ctx
        .handler
        .delete_wbs_category(DeleteWbsCategoryCommand {
            tenant_id: ctx.tenant_id,
            user_id: ctx.user_id,
            category_id: base,
        })
        .await;
    assert!(matches!(result, Err(ServiceError::CategoryHasChildren(_))));

    // 节点仍在
    let categories = ctx
        .handler
        .list_wbs_categories(ListWbsCategoriesQuery {
            tenant_id: ctx.tenant_id,
            project_id: ctx.project_id,
        })
        .await
        .unwrap();
    assert_eq!(categories.len(), 2);
}

#[tokio::test]
async fn delete_with_items_blocked_and_nothing_changes() {
    let ctx = setup();

    let category_id = create_category(&ctx, "UG Water", None).await;
    let item_id = ctx
        .handler
        .create_takeoff_item(CreateTakeoffItemCommand {
            tenant_id: ctx.tenant_id,
            user_id: ctx.user_id,
            drawing_id: ctx.drawing_id,
            page_number: 1,
            material_id: ctx.pipe2,
            wbs_category_id: Some(category_id),
            quantity: 10.0,
            multiplier: None,
            kind: MeasurementKind::Length,
            note: None,
        })
        .await
        .unwrap();

    let result = ctx
        .handler
        .delete_wbs_category(DeleteWbsCategoryCommand {
            tenant_id: ctx.tenant_id,
            user_id: ctx.user_id,
            category_id,
        })
        .await;
    assert!(matches!(result, Err(ServiceError::CategoryInUse(_))));

    // 分类与条目都原样保留
    let categories = ctx
        .handler
        .list_wbs_categories(ListWbsCategoriesQuery {
            tenant_id: ctx.tenant_id,
            project_id: ctx.project_id,
        })
        .await
        .unwrap();
    assert_eq!(categories.len(), 1);

    let lines = ctx
        .handler
        .list_takeoff_items(ListTakeoffItemsQuery {
            tenant_id: ctx.tenant_id,
            drawing_id: ctx.drawing_id,
            filter: Default::default(),
        })
        .await
        .unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(*lines[0].item.id(), item_id);
    assert_eq!(lines[0].item.wbs_category_id(), Some(&category_id));
}

#[tokio::test]
async fn seed_installs_defaults_once() {
    let ctx = setup();

    let created = ctx
        .handler
        .seed_wbs_categories(SeedWbsCategoriesCommand {
            tenant_id: ctx.tenant_id,
            user_id: ctx.user_id,
            project_id: ctx.project_id,
        })
        .await
        .unwrap();
    assert_eq!(created, 6);

    // 幂等：已有分类时不再预置
    let again = ctx
        .handler
        .seed_wbs_categories(SeedWbsCategoriesCommand {
            tenant_id: ctx.tenant_id,
            user_id: ctx.user_id,
            project_id: ctx.project_id,
        })
        .await
        .unwrap();
    assert_eq!(again, 0);

    let categories = ctx
        .handler
        .list_wbs_categories(ListWbsCategoriesQuery {
            tenant_id: ctx.tenant_id,
            project_id: ctx.project_id,
        })
        .await
        .unwrap();
    assert_eq!(categories.len(), 6);
    assert_eq!(categories[0].name(), "Base Bid");
}

#[tokio::test]
async fn update_category_fields() {
    let ctx = setup();

    let category_id = create_category(&ctx, "UG Watr", None).await;
    ctx.handler
        .update_wbs_category(UpdateWbsCategoryCommand {
            tenant_id: ctx.tenant_id,
            user_id: ctx.user_id,
            category_id,
            name: Some("UG Water".to_string()),
            sort_order: Some(5),
        })
        .await
        .unwrap();

    let categories = ctx
        .handler
        .list_wbs_categories(ListWbsCategoriesQuery {
            tenant_id: ctx.tenant_id,
            project_id: ctx.project_id,
        })
        .await
        .unwrap();
    assert_eq!(categories[0].name(), "UG Water");
    assert_eq!(categories[0].sort_order(), 5);
}

#[tokio::test]
async fn bulk_reassign_moves_all_items() {
    let ctx = setup();

    let water = create_category(&ctx, "UG Water", None).await;
    let storm = create_category(&ctx, "UG Storm", None).await;

    let mut item_ids = Vec::new();
    for _ in 0..3 {
        let item_id = ctx
            .handler
            .create_takeoff_item(CreateTakeoffItemCommand {
                tenant_id: ctx.tenant_id,
                user_id: ctx.user_id,
                drawing_id: ctx.drawing_id,
                page_number: 1,
                material_id: ctx.pipe2,
                wbs_category_id: Some(water),
                quantity: 10.0,
                multiplier: None,
                kind: MeasurementKind::Length,
                note: None,
            })
            .await
            .unwrap();
        item_ids.push(item_id);
    }

    let updated = ctx
        .handler
        .bulk_reassign_wbs(BulkReassignWbsCommand {
            tenant_id: ctx.tenant_id,
            user_id: ctx.user_id,
            item_ids: item_ids.clone(),
            wbs_category_id: Some(storm),
        })
        .await
        .unwrap();
    assert_eq!(updated, 3);

    let lines = ctx
        .handler
        .list_takeoff_items(ListTakeoffItemsQuery {
            tenant_id: ctx.tenant_id,
            drawing_id: ctx.drawing_id,
            filter: Default::default(),
        })
        .await
        .unwrap();
    assert!(
        lines
            .iter()
            .all(|l| l.item.wbs_category_id() == Some(&storm))
    );
}

#[tokio::test]
async fn bulk_reassign_is_atomic_on_bad_id() {
    let ctx = setup();

    let water = create_category(&ctx, "UG Water", None).await;
    let storm = create_category(&ctx, "UG Storm", None).await;

    let item_id = ctx
        .handler
        .create_takeoff_item(CreateTakeoffItemCommand {
            tenant_id: ctx.tenant_id,
            user_id: ctx.user_id,
            drawing_id: ctx.drawing_id,
            page_number: 1,
            material_id: ctx.pipe2,
            wbs_category_id: Some(water),
            quantity: 10.0,
            multiplier: None,
            kind: MeasurementKind::Length,
            note: None,
        })
        .await
        .unwrap();

    let result = ctx
        .handler
        .bulk_reassign_wbs(BulkReassignWbsCommand {
            tenant_id: ctx.tenant_id,
            user_id: ctx.user_id,
            item_ids: vec![item_id, est_takeoff::domain::value_objects::TakeoffItemId::new()],
            wbs_category_id: Some(storm),
        })
        .await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));

    // 整批回绝，存在的条目也不动
    let lines = ctx
        .handler
        .list_takeoff_items(ListTakeoffItemsQuery {
            tenant_id: ctx.tenant_id,
            drawing_id: ctx.drawing_id,
            filter: Default::default(),
        })
        .await
        .unwrap();
    assert_eq!(lines[0].item.wbs_category_id(), Some(&water));
}

#[tokio::test]
async fn bulk_reassign_to_uncategorized() {
    let ctx = setup();

    let water = create_category(&ctx, "UG Water", None).await;
    let item_id = ctx
        .handler
        .create_takeoff_item(CreateTakeoffItemCommand {
            tenant_id: ctx.tenant_id,
            user_id: ctx.user_id,
            drawing_id: ctx.drawing_id,
            page_number: 1,
            material_id: ctx.pipe2,
            wbs_category_id: Some(water),
            quantity: 10.0,
            multiplier: None,
            kind: MeasurementKind::Length,
            note: None,
        })
        .await
        .unwrap();

    ctx.handler
        .bulk_reassign_wbs(BulkReassignWbsCommand {
            tenant_id: ctx.tenant_id,
            user_id: ctx.user_id,
            item_ids: vec![item_id],
            wbs_category_id: None,
        })
        .await
        .unwrap();

    let lines = ctx
        .handler
        .list_takeoff_items(ListTakeoffItemsQuery {
            tenant_id: ctx.tenant_id,
            drawing_id: ctx.drawing_id,
            filter: Default::default(),
        })
        .await
        .unwrap();
    assert!(lines[0].item.wbs_category_id().is_none());

    // 清空分类后原分类即可删除
    ctx.handler
        .delete_wbs_category(DeleteWbsCategoryCommand {
            tenant_id: ctx.tenant_id,
            user_id: ctx.user_id,
            category_id: water,
        })
        .await
        .unwrap();
}
