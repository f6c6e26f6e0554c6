//! 比例尺解析
//!
//! 对页面上任一点确定适用的像素比。
//! 优先级：命中点的区域 > 页面默认值 > 未定义（报错，
//! 下游绝不允许退回某个隐含换算系数）

use serde::Serialize;
use std::cmp::Ordering;

use crate::domain::entities::{PageScale, ScaleZone};
use crate::domain::value_objects::{PagePoint, ScaleZoneId};
use crate::error::{ServiceError, ServiceResult};

/// 解析结果来源
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "zone_id", rename_all = "snake_case")]
pub enum ScaleSource {
    /// 命中某个比例尺区域
    Zone(ScaleZoneId),
    /// 页面默认比例尺
    Page,
}

/// 解析出的比例尺
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedScale {
    pub pixels_per_unit: f64,
    pub scale_name: String,
    pub source: ScaleSource,
}

/// 对加载好的页面状态做纯解析
///
/// 多区域重叠命中同一点时取面积最小者；
/// 面积相同取最近创建者（v7 ID 时间有序，作最终决胜）
pub fn resolve(
    page_scale: Option<&PageScale>,
    zones: &[ScaleZone],
    point: Option<&PagePoint>,
) -> ServiceResult<ResolvedScale> {
    if let Some(point) = point {
        if let Some(zone) = winning_zone(zones, point) {
            return Ok(ResolvedScale {
                pixels_per_unit: zone.pixels_per_unit(),
                scale_name: zone.scale_name().to_string(),
                source: ScaleSource::Zone(*zone.id()),
            });
        }
    }

    if let Some(page_scale) = page_scale {
        return Ok(ResolvedScale {
            pixels_per_unit: page_scale.pixels_per_unit(),
            scale_name: page_scale.scale_name().to_string(),
            source: ScaleSource::Page,
        });
    }

    Err(ServiceError::ScaleUndefined(
        "页面未设置比例尺，且没有区域覆盖测量点".to_string(),
    ))
}

fn winning_zone<'a>(zones: &'a [ScaleZone], point: &PagePoint) -> Option<&'a ScaleZone> {
    zones
        .iter()
        .filter(|zone| zone.contains(point))
        .min_by(|a, b| {
            a.area()
                .partial_cmp(&b.area())
                .unwrap_or(Ordering::Equal)
                // 面积并列时最近创建者胜出
                .then_with(|| b.audit_info().created_at.cmp(&a.audit_info().created_at))
                .then_with(|| b.id().0.cmp(&a.id().0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{DrawingId, ScaleRef, ZoneRect};

    fn zone(rect: ZoneRect, pixels_per_unit: f64, name: &str) -> ScaleZone {
        ScaleZone::new(
            DrawingId::new(),
            1,
            name,
            rect,
            ScaleRef::standard("arch_1_4"),
            name,
            pixels_per_unit,
        )
        .unwrap()
    }

    fn page_default(pixels_per_unit: f64) -> PageScale {
        PageScale::new(
            DrawingId::new(),
            1,
            ScaleRef::standard("arch_1_8"),
            "1/8\" = 1'-0\"",
            pixels_per_unit,
        )
        .unwrap()
    }

    #[test]
    fn test_zone_beats_page_default() {
        let page = page_default(96.0);
        let zones = vec![zone(ZoneRect::new(0.0, 0.0, 100.0, 100.0), 48.0, "detail")];

        let resolved = resolve(
            Some(&page),
            &zones,
            Some(&PagePoint::new(50.0, 50.0)),
        )
        .unwrap();
        assert_eq!(resolved.pixels_per_unit, 48.0);
        assert!(matches!(resolved.source, ScaleSource::Zone(_)));
    }

    #[test]
    fn test_point_outside_zone_falls_back() {
        let page = page_default(96.0);
        let zones = vec![zone(ZoneRect::new(0.0, 0.0, 100.0, 100.0), 48.0, "detail")];

        let resolved = resolve(
            Some(&page),
            &zones,
            Some(&PagePoint::new(200.0, 200.0)),
        )
        .unwrap();
        assert_eq!(resolved.pixels_per_unit, 96.0);
        assert_eq!(resolved.source, ScaleSource::Page);
    }

    #[test]
    fn test_smallest_zone_wins() {
        let big = zone(ZoneRect::new(0.0, 0.0, 400.0, 400.0), 96.0, "plan");
        let small = zone(ZoneRect::new(0.0, 0.0, 100.0, 100.0), 24.0, "detail");
        let zones = vec![big, small];

        let resolved = resolve(None, &zones, Some(&PagePoint::new(50.0, 50.0))).unwrap();
        assert_eq!(resolved.pixels_per_unit, 24.0);
    }

    #[test]
    fn test_equal_area_newest_wins() {
        let rect = ZoneRect::new(0.0, 0.0, 100.0, 100.0);
        let older = zone(rect, 48.0, "older");
        let newer = zone(rect, 24.0, "newer");
        // 插入顺序与创建顺序相反，确保靠时间而非位置决胜
        let zones = vec![newer.clone(), older];

        let resolved = resolve(None, &zones, Some(&PagePoint::new(50.0, 50.0))).unwrap();
        assert_eq!(resolved.source, ScaleSource::Zone(*newer.id()));
    }

    #[test]
    fn test_no_scale_is_an_error() {
        let result = resolve(None, &[], Some(&PagePoint::new(1.0, 1.0)));
        assert!(matches!(result, Err(ServiceError::ScaleUndefined(_))));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let page = page_default(96.0);
        let zones = vec![zone(ZoneRect::new(0.0, 0.0, 100.0, 100.0), 48.0, "detail")];
        let point = PagePoint::new(50.0, 50.0);

        let first = resolve(Some(&page), &zones, Some(&point)).unwrap();
        let second = resolve(Some(&page), &zones, Some(&point)).unwrap();
        assert_eq!(first.pixels_per_unit, second.pixels_per_unit);
        assert_eq!(first.scale_name, second.scale_name);
        assert_eq!(first.source, second.source);
    }
}
