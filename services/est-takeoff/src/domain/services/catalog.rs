//! 标准比例尺固定表

use serde::Serialize;

use crate::domain::enums::ScaleFamily;

/// 标准比例尺条目（固定表，随版本发布，不落库）
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StandardScale {
    /// 稳定字符串 ID
    pub id: &'static str,
    /// 显示名称
    pub name: &'static str,
    /// 每真实单位对应的像素数
    pub pixels_per_unit: f64,
    /// 比例尺类别
    pub family: ScaleFamily,
}

/// 常用建筑/工程/公制比例尺
pub const STANDARD_SCALES: &[StandardScale] = &[
    // 建筑比例尺（英制）
    StandardScale { id: "arch_3_32", name: "3/32\" = 1'-0\"", pixels_per_unit: 128.0, family: ScaleFamily::Architectural },
    StandardScale { id: "arch_1_8", name: "1/8\" = 1'-0\"", pixels_per_unit: 96.0, family: ScaleFamily::Architectural },
    StandardScale { id: "arch_3_16", name: "3/16\" = 1'-0\"", pixels_per_unit: 64.0, family: ScaleFamily::Architectural },
    StandardScale { id: "arch_1_4", name: "1/4\" = 1'-0\"", pixels_per_unit: 48.0, family: ScaleFamily::Architectural },
    StandardScale { id: "arch_3_8", name: "3/8\" = 1'-0\"", pixels_per_unit: 32.0, family: ScaleFamily::Architectural },
    StandardScale { id: "arch_1_2", name: "1/2\" = 1'-0\"", pixels_per_unit: 24.0, family: ScaleFamily::Architectural },
    StandardScale { id: "arch_3_4", name: "3/4\" = 1'-0\"", pixels_per_unit: 16.0, family: ScaleFamily::Architectural },
    StandardScale { id: "arch_1", name: "1\" = 1'-0\"", pixels_per_unit: 12.0, family: ScaleFamily::Architectural },
    StandardScale { id: "arch_1_5", name: "1-1/2\" = 1'-0\"", pixels_per_unit: 8.0, family: ScaleFamily::Architectural },
    StandardScale { id: "arch_3", name: "3\" = 1'-0\"", pixels_per_unit: 4.0, family: ScaleFamily::Architectural },
    // 工程比例尺（英制）
    StandardScale { id: "eng_10", name: "1\" = 10'", pixels_per_unit: 120.0, family: ScaleFamily::Engineering },
    StandardScale { id: "eng_20", name: "1\" = 20'", pixels_per_unit: 240.0, family: ScaleFamily::Engineering },
    StandardScale { id: "eng_30", name: "1\" = 30'", pixels_per_unit: 360.0, family: ScaleFamily::Engineering },
    StandardScale { id: "eng_40", name: "1\" = 40'", pixels_per_unit: 480.0, family: ScaleFamily::Engineering },
    StandardScale { id: "eng_50", name: "1\" = 50'", pixels_per_unit: 600.0, family: ScaleFamily::Engineering },
    StandardScale { id: "eng_60", name: "1\" = 60'", pixels_per_unit: 720.0, family: ScaleFamily::Engineering },
    StandardScale { id: "eng_100", name: "1\" = 100'", pixels_per_unit: 1200.0, family: ScaleFamily::Engineering },
    // 公制比例尺
    StandardScale { id: "metric_1_100", name: "1:100", pixels_per_unit: 100.0, family: ScaleFamily::Metric },
    StandardScale { id: "metric_1_50", name: "1:50", pixels_per_unit: 50.0, family: ScaleFamily::Metric },
    StandardScale { id: "metric_1_20", name: "1:20", pixels_per_unit: 20.0, family: ScaleFamily::Metric },
    StandardScale { id: "metric_1_10", name: "1:10", pixels_per_unit: 10.0, family: ScaleFamily::Metric },
    StandardScale { id: "metric_1_5", name: "1:5", pixels_per_unit: 5.0, family: ScaleFamily::Metric },
];

/// 按 ID 查找标准比例尺
pub fn find_standard_scale(id: &str) -> Option<&'static StandardScale> {
    STANDARD_SCALES.iter().find(|s| s.id == id)
}

/// 按类别列出标准比例尺
pub fn standard_scales(family: Option<ScaleFamily>) -> Vec<&'static StandardScale> {
    STANDARD_SCALES
        .iter()
        .filter(|s| family.is_none_or(|f| s.family == f))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_standard_scale() {
        let scale = find_standard_scale("arch_1_4").unwrap();
        assert_eq!(scale.pixels_per_unit, 48.0);
        assert_eq!(scale.family, ScaleFamily::Architectural);
        assert!(find_standard_scale("arch_9_9").is_none());
    }

    #[test]
    fn test_ids_unique() {
        let mut ids: Vec<_> = STANDARD_SCALES.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), STANDARD_SCALES.len());
    }

    #[test]
    fn test_family_filter() {
        let metric = standard_scales(Some(ScaleFamily::Metric));
        assert_eq!(metric.len(), 5);
        assert!(metric.iter().all(|s| s.family == ScaleFamily::Metric));
        assert_eq!(standard_scales(None).len(), STANDARD_SCALES.len());
    }
}
