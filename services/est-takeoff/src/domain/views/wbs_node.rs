//! WBS 树形视图

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::WbsCategoryId;

/// WBS 树节点（嵌套结构，供界面消费）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WbsNode {
    pub id: WbsCategoryId,
    pub name: String,
    pub sort_order: i32,
    pub children: Vec<WbsNode>,
}

impl WbsNode {
    pub fn leaf(id: WbsCategoryId, name: impl Into<String>, sort_order: i32) -> Self {
        Self {
            id,
            name: name.into(),
            sort_order,
            children: Vec::new(),
        }
    }

    /// 以本节点为根的节点总数
    pub fn count(&self) -> usize {
        let mut total = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            total += 1;
            stack.extend(node.children.iter());
        }
        total
    }
}
