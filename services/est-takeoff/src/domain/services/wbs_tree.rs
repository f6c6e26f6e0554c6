//! WBS 树计算
//!
//! 路径与树装配都用显式栈/队列实现，层级再深也不会打爆调用栈，
//! 顺带让环检测有处可挂

use std::collections::{HashMap, HashSet, VecDeque};

use crate::domain::entities::WbsCategory;
use crate::domain::value_objects::WbsCategoryId;
use crate::domain::views::WbsNode;
use crate::error::{ServiceError, ServiceResult};

/// 未分类桶的显示名
///
/// 仅作展示哨兵；分组键用 Option<WbsCategoryId>，
/// 不会与恰好叫这个名字的真实分类合并
pub const UNCATEGORIZED: &str = "Uncategorized";

/// 计算新节点的同级排序：现有最大值 + 1，保持插入顺序
pub fn next_sort_order(
    categories: &[WbsCategory],
    parent_id: Option<&WbsCategoryId>,
) -> i32 {
    categories
        .iter()
        .filter(|c| c.parent_id() == parent_id)
        .map(|c| c.sort_order())
        .max()
        .map_or(1, |max| max + 1)
}

/// 从根到目标节点的名称链
///
/// 沿父引用迭代上行；已访问集合兜底环，悬空父引用按根截断
pub fn path_names(
    categories: &[WbsCategory],
    category_id: &WbsCategoryId,
) -> ServiceResult<Vec<String>> {
    let by_id: HashMap<&WbsCategoryId, &WbsCategory> =
        categories.iter().map(|c| (c.id(), c)).collect();

    let mut current = *by_id
        .get(category_id)
        .ok_or_else(|| ServiceError::NotFound(format!("WBS 分类不存在: {}", category_id)))?;

    let mut names = Vec::new();
    let mut visited: HashSet<WbsCategoryId> = HashSet::new();

    loop {
        if !visited.insert(*current.id()) {
            return Err(ServiceError::Validation(format!(
                "WBS 层级存在环: {}",
                category_id
            )));
        }
        names.push(current.name().to_string());

        match current.parent_id().and_then(|pid| by_id.get(pid).copied()) {
            Some(parent) => current = parent,
            None => break,
        }
    }

    names.reverse();
    Ok(names)
}

/// 渲染用路径字符串，如 "UG Water > Service Lines"
pub fn path_string(
    categories: &[WbsCategory],
    category_id: &WbsCategoryId,
) -> ServiceResult<String> {
    Ok(path_names(categories, category_id)?.join(" > "))
}

/// 平面节点集装配成嵌套树
///
/// 兄弟按 (sort_order, name) 排序。广度优先定序后自底向上
/// 挂接，整体 O(n)；环上的节点不可达根，装配时直接丢弃
pub fn build_tree(categories: &[WbsCategory]) -> Vec<WbsNode> {
    let known: HashSet<&WbsCategoryId> = categories.iter().map(|c| c.id()).collect();

    // 子节点索引；父引用悬空的节点按根对待
    let mut children_index: HashMap<Option<WbsCategoryId>, Vec<&WbsCategory>> = HashMap::new();
    for category in categories {
        let key = category
            .parent_id()
            .filter(|pid| known.contains(pid))
            .copied();
        children_index.entry(key).or_default().push(category);
    }
    for siblings in children_index.values_mut() {
        siblings.sort_by(|a, b| {
            a.sort_order()
                .cmp(&b.sort_order())
                .then_with(|| a.name().cmp(b.name()))
        });
    }

    // 广度优先定序，根在前
    let mut order: Vec<&WbsCategory> = Vec::with_capacity(categories.len());
    let mut queue: VecDeque<&WbsCategory> = children_index
        .get(&None)
        .map(|roots| roots.iter().copied().collect())
        .unwrap_or_default();
    while let Some(category) = queue.pop_front() {
        order.push(category);
        if let Some(children) = children_index.get(&Some(*category.id())) {
            queue.extend(children.iter().copied());
        }
    }

    // 自底向上挂接：子节点在序中必然晚于父节点
    let mut nodes: HashMap<WbsCategoryId, WbsNode> = order
        .iter()
        .map(|c| {
            (
                *c.id(),
                WbsNode::leaf(*c.id(), c.name(), c.sort_order()),
            )
        })
        .collect();

    let mut roots: Vec<WbsNode> = Vec::new();
    for category in order.iter().rev() {
        let node = match nodes.remove(category.id()) {
            Some(node) => node,
            None => continue,
        };
        let parent_key = category.parent_id().filter(|pid| known.contains(pid));
        match parent_key.and_then(|pid| nodes.get_mut(pid)) {
            Some(parent) => parent.children.push(node),
            None => roots.push(node),
        }
    }

    // 逆序挂接把兄弟顺序翻了过来，整树再翻一次
    roots.reverse();
    let mut stack: Vec<&mut WbsNode> = roots.iter_mut().collect();
    while let Some(node) = stack.pop() {
        node.children.reverse();
        stack.extend(node.children.iter_mut());
    }

    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ProjectId;

    fn fixture() -> (ProjectId, Vec<WbsCategory>) {
        let project_id = ProjectId::new();
        let base = WbsCategory::new_root(project_id, "Base Bid", 1);
        let water = WbsCategory::new_child(project_id, "UG Water", 1, &base).unwrap();
        let sanitary = WbsCategory::new_child(project_id, "UG Sanitary", 2, &base).unwrap();
        let service = WbsCategory::new_child(project_id, "Service Lines", 1, &water).unwrap();
        let alternates = WbsCategory::new_root(project_id, "Alternates", 2);
        (
            project_id,
            vec![base, water, sanitary, service, alternates],
        )
    }

    #[test]
    fn test_next_sort_order() {
        let (_, categories) = fixture();
        assert_eq!(next_sort_order(&categories, None), 3);

        let base_id = *categories[0].id();
        assert_eq!(next_sort_order(&categories, Some(&base_id)), 3);

        let fresh = WbsCategoryId::new();
        assert_eq!(next_sort_order(&categories, Some(&fresh)), 1);
    }

    #[test]
    fn test_path() {
        let (_, categories) = fixture();
        let service_id = *categories[3].id();
        let names = path_names(&categories, &service_id).unwrap();
        assert_eq!(names, vec!["Base Bid", "UG Water", "Service Lines"]);
        assert_eq!(
            path_string(&categories, &service_id).unwrap(),
            "Base Bid > UG Water > Service Lines"
        );
    }

    #[test]
    fn test_path_length_equals_depth() {
        let (_, categories) = fixture();
        // 根深度 0 -> 路径长 1
        let root_id = *categories[0].id();
        assert_eq!(path_names(&categories, &root_id).unwrap().len(), 1);
        let leaf_id = *categories[3].id();
        assert_eq!(path_names(&categories, &leaf_id).unwrap().len(), 3);
    }

    #[test]
    fn test_path_unknown_category() {
        let (_, categories) = fixture();
        let result = path_names(&categories, &WbsCategoryId::new());
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn test_build_tree_shape_and_order() {
        let (_, categories) = fixture();
        let tree = build_tree(&categories);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].name, "Base Bid");
        assert_eq!(tree[1].name, "Alternates");

        let base = &tree[0];
        assert_eq!(base.children.len(), 2);
        assert_eq!(base.children[0].name, "UG Water");
        assert_eq!(base.children[1].name, "UG Sanitary");
        assert_eq!(base.children[0].children[0].name, "Service Lines");
        assert_eq!(base.count(), 4);
    }

    #[test]
    fn test_sibling_ties_break_by_name() {
        let project_id = ProjectId::new();
        let b = WbsCategory::new_root(project_id, "Bravo", 1);
        let a = WbsCategory::new_root(project_id, "Alpha", 1);
        let tree = build_tree(&[b, a]);
        assert_eq!(tree[0].name, "Alpha");
        assert_eq!(tree[1].name, "Bravo");
    }

    #[test]
    fn test_cycle_detected() {
        let project_id = ProjectId::new();
        let root = WbsCategory::new_root(project_id, "A", 1);
        let child = WbsCategory::new_child(project_id, "B", 1, &root).unwrap();
        // 人为构造环：A 的父指向 B
        let looped = WbsCategory::from_parts(
            *root.id(),
            project_id,
            Some(*child.id()),
            root.name().to_string(),
            1,
            root.audit_info().clone(),
        );
        let categories = vec![looped, child];
        let target = *categories[0].id();
        let result = path_names(&categories, &target);
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }
}
