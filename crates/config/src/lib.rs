//! plano-config - 配置加载库

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;
use thiserror::Error;

use secrecy::Secret;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: Secret<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    // 根据环境自动调整连接池大小
    // 开发环境: 10, 生产环境: 50
    match std::env::var("APP_ENV").as_deref() {
        Ok("production") => 50,
        _ => 10,
    }
}

/// 工程量计算配置
#[derive(Debug, Clone, Deserialize)]
pub struct TakeoffConfig {
    /// 默认计量单位（标定未指定单位时使用）
    #[serde(default = "default_unit")]
    pub default_unit: String,
    /// 新建项目时预置的顶层 WBS 分类
    #[serde(default = "default_wbs_seed")]
    pub wbs_seed_categories: Vec<String>,
}

fn default_unit() -> String {
    "feet".to_string()
}

fn default_wbs_seed() -> Vec<String> {
    [
        "Base Bid",
        "UG Water",
        "UG Sanitary",
        "UG Storm",
        "AG Water",
        "AG Sanitary",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for TakeoffConfig {
    fn default() -> Self {
        Self {
            default_unit: default_unit(),
            wbs_seed_categories: default_wbs_seed(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app_name: String,
    pub app_env: String,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub takeoff: TakeoffConfig,
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config: Self = Figment::new()
            .merge(Toml::file(format!("{}/default.toml", config_dir)))
            .merge(Toml::file(format!("{}/{}.toml", config_dir, env)))
            .merge(Env::prefixed("").split("_"))
            .extract()?;

        Ok(config)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// 是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }
}

#[cfg(test)]
mod tests;
