//! 比例尺标定

use serde::Serialize;

use crate::error::{ServiceError, ServiceResult};

/// 标定结果
#[derive(Debug, Clone, Serialize)]
pub struct Calibration {
    /// 每真实单位对应的像素数
    pub pixels_per_unit: f64,
    /// 倒数比（显示用，"1 像素 = N 单位"）
    pub scale_ratio: f64,
    /// 真实单位标签
    pub unit: String,
}

/// 由参考测量推导像素比
///
/// pixels_per_unit = 像素距离 / 真实距离。
/// 纯函数，持久化为自定义比例尺由调用方决定
pub fn calibrate(
    pixel_distance: f64,
    real_distance: f64,
    unit: impl Into<String>,
) -> ServiceResult<Calibration> {
    if !pixel_distance.is_finite() || pixel_distance <= 0.0 {
        return Err(ServiceError::InvalidCalibration(format!(
            "像素距离必须为正数: {}",
            pixel_distance
        )));
    }
    if !real_distance.is_finite() || real_distance <= 0.0 {
        return Err(ServiceError::InvalidCalibration(format!(
            "真实距离必须为正数: {}",
            real_distance
        )));
    }

    Ok(Calibration {
        pixels_per_unit: pixel_distance / real_distance,
        scale_ratio: real_distance / pixel_distance,
        unit: unit.into(),
    })
}

/// 像素长度换算为真实长度
pub fn pixels_to_real(pixel_length: f64, pixels_per_unit: f64) -> f64 {
    pixel_length / pixels_per_unit
}
