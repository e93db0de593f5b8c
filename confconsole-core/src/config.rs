//! Appliance console configuration
//!
//! Stored as TOML; every key is optional:
//!
//! ```toml
//! networking = true            # show "Networking" in the Advanced menu
//! copy_paste = false           # leave the mouse to the terminal for copy/paste
//! default_nic = "eth0"         # interface whose address the usage screen shows
//! publicip_cmd = "ec2metadata --public-ipv4"
//! appliance_name = "TurnKey GNU/Linux"
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

fn default_true() -> bool {
    true
}

fn default_appliance_name() -> String {
    "Appliance".to_string()
}

/// Console configuration file contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleConf {
    #[serde(default = "default_true")]
    pub networking: bool,

    #[serde(default)]
    pub copy_paste: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_nic: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publicip_cmd: Option<String>,

    #[serde(default = "default_appliance_name")]
    pub appliance_name: String,
}

impl Default for ConsoleConf {
    fn default() -> Self {
        Self {
            networking: true,
            copy_paste: false,
            default_nic: None,
            publicip_cmd: None,
            appliance_name: default_appliance_name(),
        }
    }
}

impl ConsoleConf {
    pub fn from_toml_str(text: &str) -> CoreResult<Self> {
        toml::from_str(text).map_err(|e| CoreError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> CoreResult<String> {
        toml::to_string(self).map_err(|e| CoreError::Config(e.to_string()))
    }
}

/// Substitute `$ipaddr` / `${ipaddr}` in the usage screen template
pub fn render_services_template(template: &str, ipaddr: &str) -> String {
    template
        .replace("${ipaddr}", ipaddr)
        .replace("$ipaddr", ipaddr)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let conf = ConsoleConf::from_toml_str("").unwrap();
        assert_eq!(conf, ConsoleConf::default());
        assert!(conf.networking);
    }

    #[test]
    fn parses_all_keys() {
        let conf = ConsoleConf::from_toml_str(
            r#"
networking = false
copy_paste = true
default_nic = "eth1"
publicip_cmd = "curl -s https://ifconfig.me"
appliance_name = "TurnKey GNU/Linux"
"#,
        )
        .unwrap();

        assert!(!conf.networking);
        assert!(conf.copy_paste);
        assert_eq!(conf.default_nic.as_deref(), Some("eth1"));
        assert_eq!(conf.appliance_name, "TurnKey GNU/Linux");
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = ConsoleConf::from_toml_str("networking = maybe").unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn serialization_round_trips() {
        let conf = ConsoleConf {
            default_nic: Some("br0".into()),
            ..ConsoleConf::default()
        };
        let text = conf.to_toml_string().unwrap();
        assert_eq!(ConsoleConf::from_toml_str(&text).unwrap(), conf);
    }

    #[test]
    fn template_substitution() {
        let text = render_services_template("Web: https://$ipaddr/\nSSH: ${ipaddr}:22", "10.0.0.5");
        assert_eq!(text, "Web: https://10.0.0.5/\nSSH: 10.0.0.5:22");
    }
}
