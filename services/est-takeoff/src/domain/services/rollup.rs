//! 工程量汇总
//!
//! 台账条目按 (WBS 分类 x 材料) 分组求和。每次调用现算，
//! 不维护物化视图——项目级台账只有几百到几千行

use std::collections::{BTreeMap, HashMap};

use domain_core::Money;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::{Material, TakeoffItem, WbsCategory};
use crate::domain::services::wbs_tree::{self, UNCATEGORIZED};
use crate::domain::value_objects::{MaterialId, WbsCategoryId};
use crate::error::{ServiceError, ServiceResult};

/// 汇总行
#[derive(Debug, Clone, Serialize)]
pub struct RollupLine {
    /// 分组的 WBS 分类（None 为未分类桶）
    pub wbs_category_id: Option<WbsCategoryId>,
    /// 渲染好的 WBS 路径（未分类桶为哨兵显示名）
    pub wbs_path: String,
    pub material_id: MaterialId,
    pub part_number: String,
    pub description: String,
    pub size: Option<String>,
    pub unit: String,
    pub unit_list_price: Money,
    pub labor_units: f64,
    /// sum(数量 x 系数)
    pub total_quantity: f64,
    /// sum(数量 x 系数 x 单价)，逐条取整到分后精确累加
    pub total_price: Money,
    /// sum(数量 x 人工系数)
    pub total_labor: f64,
}

/// 分组排序键
///
/// WBS 按根到节点的 (sort_order, name) 链排序（祖先在前），
/// 未分类桶排最前；再按材料类别、描述。键里带上 ID，
/// 链恰好同名同序的两个分类也不会并组
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct GroupKey {
    wbs_chain: Option<(Vec<(i32, String)>, Uuid)>,
    material_category: String,
    description: String,
    part_number: String,
    material_id: Uuid,
}

struct GroupAcc {
    wbs_category_id: Option<WbsCategoryId>,
    wbs_path: String,
    material_id: MaterialId,
    total_quantity: f64,
    total_price: Money,
    total_labor: f64,
}

/// 汇总一组台账条目
///
/// 输出顺序稳定且确定：同一数据集不论插入顺序，
/// 重复调用返回相同的分组序列
pub fn rollup(
    items: &[TakeoffItem],
    materials: &HashMap<MaterialId, Material>,
    categories: &[WbsCategory],
) -> ServiceResult<Vec<RollupLine>> {
    // 每个被引用分类的 (排序链, 路径串) 只算一次
    let mut chains: HashMap<WbsCategoryId, (Vec<(i32, String)>, String)> = HashMap::new();
    let by_id: HashMap<&WbsCategoryId, &WbsCategory> =
        categories.iter().map(|c| (c.id(), c)).collect();

    let mut groups: BTreeMap<GroupKey, GroupAcc> = BTreeMap::new();

    for item in items {
        let material = materials.get(item.material_id()).ok_or_else(|| {
            ServiceError::NotFound(format!(
                "台账条目引用的材料不存在: {}",
                item.material_id()
            ))
        })?;

        let wbs = match item.wbs_category_id() {
            Some(category_id) => {
                if !chains.contains_key(category_id) {
                    let names = wbs_tree::path_names(categories, category_id)?;
                    let chain = chain_for(&by_id, category_id);
                    chains.insert(*category_id, (chain, names.join(" > ")));
                }
                let (chain, path) = &chains[category_id];
                Some((*category_id, chain.clone(), path.clone()))
            }
            None => None,
        };

        let key = GroupKey {
            wbs_chain: wbs.as_ref().map(|(id, chain, _)| (chain.clone(), id.0)),
            material_category: material.category().to_string(),
            description: material.description().to_string(),
            part_number: material.part_number().to_string(),
            material_id: item.material_id().0,
        };

        let entry = groups.entry(key).or_insert_with(|| GroupAcc {
            wbs_category_id: wbs.as_ref().map(|(id, _, _)| *id),
            wbs_path: wbs
                .as_ref()
                .map(|(_, _, path)| path.clone())
                .unwrap_or_else(|| UNCATEGORIZED.to_string()),
            material_id: *item.material_id(),
            total_quantity: 0.0,
            total_price: Money::zero(material.unit_list_price().currency.clone()),
            total_labor: 0.0,
        });

        entry.total_quantity += item.quantity() * item.multiplier();
        entry.total_price =
            entry.total_price.clone() + item.extended_price(material.unit_list_price());
        entry.total_labor += item.extended_labor(material.labor_units());
    }

    let lines = groups
        .into_values()
        .map(|acc| {
            let material = &materials[&acc.material_id];
            RollupLine {
                wbs_category_id: acc.wbs_category_id,
                wbs_path: acc.wbs_path,
                material_id: acc.material_id,
                part_number: material.part_number().to_string(),
                description: material.description().to_string(),
                size: material.size().map(|s| s.to_string()),
                unit: material.unit().to_string(),
                unit_list_price: material.unit_list_price().clone(),
                labor_units: material.labor_units(),
                total_quantity: acc.total_quantity,
                total_price: acc.total_price,
                total_labor: acc.total_labor,
            }
        })
        .collect();

    Ok(lines)
}

/// 根到节点的 (sort_order, name) 链
///
/// path_names 已对同一分类做过存在性与环校验，这里只管拼链
fn chain_for(
    by_id: &HashMap<&WbsCategoryId, &WbsCategory>,
    category_id: &WbsCategoryId,
) -> Vec<(i32, String)> {
    let mut chain = Vec::new();
    let mut current = by_id.get(category_id).copied();
    while let Some(category) = current {
        chain.push((category.sort_order(), category.name().to_string()));
        current = category.parent_id().and_then(|pid| by_id.get(pid).copied());
        if chain.len() > by_id.len() {
            break;
        }
    }
    chain.reverse();
    chain
}
