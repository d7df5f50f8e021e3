// src/main.rs
mod config;
mod drivers;
mod engine;
mod types;
use anyhow::{Context, Result};
use log::info;
use config::AppConfig;

const DEMO_TICKS: usize = 600;
const SWITCH_EVERY: usize = 100;

// 入口函数: 可选参数为 JSON 配置文件路径
fn main() -> Result<()> {
    env_logger::init();
    let conf = match std::env::args().nth(1) {
        Some(path) => AppConfig::from_file(&path)
            .with_context(|| format!("failed to load configuration from {path}"))?,
        None => {
            info!("no config file given, using built-in activity classes");
            AppConfig::default()
        }
    };
    engine::run(&conf, DEMO_TICKS, SWITCH_EVERY).context("predictor failed to start")
}
