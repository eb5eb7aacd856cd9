//! `rfp config` / `rfp device`: opaque passthrough to the backend's
//! antenna-configuration and device-status endpoints. The payloads are not
//! interpreted here.

use anyhow::{bail, Context, Result};
use rfp_api::{HttpPortalApi, PortalApi};
use rfp_config::ClientConfig;
use serde_json::{Map, Value};

pub async fn run_config_get(cfg: ClientConfig) -> Result<()> {
    let api = HttpPortalApi::new(cfg.base_url.clone());
    let value = api
        .get_device_config()
        .await
        .context("fetch device configuration")?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

pub async fn run_config_set(cfg: ClientConfig, entries: Vec<String>) -> Result<()> {
    let mut payload = Map::new();
    for entry in &entries {
        let Some((key, raw)) = entry.split_once('=') else {
            bail!("invalid entry '{entry}'. expected key=value");
        };
        // JSON scalars pass through typed (true, 30); anything else is a string.
        let value = serde_json::from_str::<Value>(raw)
            .unwrap_or_else(|_| Value::String(raw.to_string()));
        payload.insert(key.trim().to_string(), value);
    }

    let api = HttpPortalApi::new(cfg.base_url.clone());
    let response = api
        .set_device_config(Value::Object(payload))
        .await
        .context("save device configuration")?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

pub async fn run_device_info(cfg: ClientConfig) -> Result<()> {
    let api = HttpPortalApi::new(cfg.base_url.clone());
    let value = api.device_info().await.context("fetch device info")?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

pub async fn run_device_refresh(cfg: ClientConfig) -> Result<()> {
    let api = HttpPortalApi::new(cfg.base_url.clone());
    let value = api
        .device_refresh()
        .await
        .context("request device refresh")?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
