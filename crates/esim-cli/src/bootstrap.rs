//! Composition root: builds the gateway over a simulated device.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use esim_core::{EsimGateway, GatewaySettings};
use esim_host::HostBridge;
use tracing::debug;

use crate::error::CliError;
use crate::profile::{DeviceProfile, SimulatedDevice};

/// Inputs resolved from flags and environment.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub profile: Option<PathBuf>,
    pub settings: Option<PathBuf>,
    pub json: bool,
}

/// Everything a handler needs.
pub struct CliContext {
    bridge: HostBridge,
    device: Arc<SimulatedDevice>,
    json: bool,
}

impl CliContext {
    pub const fn bridge(&self) -> &HostBridge {
        &self.bridge
    }

    pub const fn gateway(&self) -> &EsimGateway {
        self.bridge.gateway()
    }

    pub fn device(&self) -> &SimulatedDevice {
        &self.device
    }

    pub const fn json(&self) -> bool {
        self.json
    }
}

pub fn bootstrap(config: &CliConfig) -> Result<CliContext, CliError> {
    let profile = match &config.profile {
        Some(path) => DeviceProfile::load(path)?,
        None => DeviceProfile::default(),
    };
    let settings = match &config.settings {
        Some(path) => load_settings(path)?,
        None => GatewaySettings::default(),
    };
    debug!(api_level = profile.api_level, ?settings, "bootstrapping simulated device");

    let (device, platform) = SimulatedDevice::new(profile).into_platform();
    let gateway = EsimGateway::new(platform, settings)?;
    Ok(CliContext {
        bridge: HostBridge::new(gateway),
        device,
        json: config.json,
    })
}

fn load_settings(path: &Path) -> Result<GatewaySettings, CliError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
    serde_json::from_str(&raw)
        .map_err(|e| CliError::Config(format!("invalid settings {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_defaults_without_files() {
        let ctx = bootstrap(&CliConfig::default()).unwrap();
        assert_eq!(ctx.device().profile(), &DeviceProfile::default());
        assert!(ctx.gateway().settings().copy_to_clipboard);
    }

    #[test]
    fn test_settings_file_is_applied() {
        let settings = write_temp(r#"{"clipboardLabel": "Code", "copyToClipboard": false}"#);
        let ctx = bootstrap(&CliConfig {
            settings: Some(settings.path().to_path_buf()),
            ..CliConfig::default()
        })
        .unwrap();
        assert_eq!(ctx.gateway().settings().clipboard_label, "Code");
        assert!(!ctx.gateway().settings().copy_to_clipboard);
    }

    #[test]
    fn test_invalid_settings_are_configuration_errors() {
        let settings = write_temp(r#"{"launchOrder": []}"#);
        let result = bootstrap(&CliConfig {
            settings: Some(settings.path().to_path_buf()),
            ..CliConfig::default()
        });
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
