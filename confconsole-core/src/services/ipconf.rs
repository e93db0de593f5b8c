//! Static IP form: prefill and validation

use std::collections::HashSet;
use std::net::Ipv4Addr;

use crate::error::CoreResult;
use crate::traits::FormField;
use crate::types::{InterfaceConfig, IpRange, StaticIpConfig};

/// Widest dotted-quad an input accepts
pub const FIELD_MAX_LEN: usize = 15;

/// Fields before the nameserver list
const FIXED_FIELDS: [&str; 3] = ["IP Address", "Netmask", "Default Gateway"];
const NAMESERVER_LABEL: &str = "Name Server";
const MIN_NAMESERVER_FIELDS: usize = 2;

/// Result of checking the static IP form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// Every field is blank: unconfigure the interface
    Clear,
    Valid(StaticIpConfig),
    /// Messages to show the operator, in check order
    Invalid(Vec<String>),
}

/// Check a static IP submission.
///
/// Address, netmask and nameservers are checked together; the gateway is
/// only looked at once those are clean.
pub fn validate<S: AsRef<str>>(
    address: &str,
    netmask: &str,
    gateway: &str,
    nameservers: &[S],
) -> Validation {
    let address = address.trim();
    let netmask = netmask.trim();
    let gateway = gateway.trim();
    let nameservers: Vec<&str> = nameservers
        .iter()
        .map(|ns| ns.as_ref().trim())
        .filter(|ns| !ns.is_empty())
        .collect();

    if address.is_empty() && netmask.is_empty() && gateway.is_empty() && nameservers.is_empty() {
        return Validation::Clear;
    }

    let mut errors = Vec::new();
    let address_ip = required_ip(
        address,
        "No IP address provided",
        "Invalid IP address",
        &mut errors,
    );
    let netmask_ip = required_ip(netmask, "No netmask provided", "Invalid netmask", &mut errors);

    let mut nameserver_ips = Vec::with_capacity(nameservers.len());
    for ns in &nameservers {
        match parse_ip(ns) {
            Some(ip) => nameserver_ips.push(ip),
            None => errors.push(format!("Invalid nameserver: {ns}")),
        }
    }
    let unique: HashSet<&str> = nameservers.iter().copied().collect();
    if unique.len() != nameservers.len() {
        errors.push("Duplicate nameservers specified".to_string());
    }

    let (Some(address_ip), Some(netmask_ip), true) = (address_ip, netmask_ip, errors.is_empty())
    else {
        return Validation::Invalid(errors);
    };

    let gateway_ip = if gateway.is_empty() {
        None
    } else {
        let Some(gateway_ip) = parse_ip(gateway) else {
            return Validation::Invalid(vec![format!("Invalid gateway: {gateway}")]);
        };
        let range = IpRange::new(address_ip, netmask_ip);
        if !range.contains(gateway_ip) {
            return Validation::Invalid(vec![format!(
                "Gateway ({gateway}) not in IP range ({range})"
            )]);
        }
        Some(gateway_ip)
    };

    Validation::Valid(StaticIpConfig {
        address: address_ip,
        netmask: netmask_ip,
        gateway: gateway_ip,
        nameservers: nameserver_ips,
    })
}

/// Validate form values laid out as [`form_fields`] produces them
pub fn validate_form(values: &[String]) -> Validation {
    let field = |i: usize| values.get(i).map_or("", String::as_str);
    let nameservers = values.get(FIXED_FIELDS.len()..).unwrap_or_default();
    validate(field(0), field(1), field(2), nameservers)
}

/// Initial form values from the interface's live configuration.
///
/// Returns the values and the warnings to show before the form; read
/// failures leave the affected fields blank.
pub fn prefill(current: CoreResult<InterfaceConfig>) -> (Vec<String>, Vec<String>) {
    let mut warnings = Vec::new();
    let config = current.unwrap_or_else(|e| {
        warnings.push(format!("unable to read current configuration: {e}"));
        InterfaceConfig::default()
    });

    if config.address.is_none() {
        warnings.push("failed to ascertain current address!".to_string());
    }
    if config.netmask.is_none() {
        warnings.push("failed to ascertain current netmask!".to_string());
    }
    if !warnings.is_empty() {
        warnings.push("\nWill leave relevant fields blank".to_string());
    }

    let mut values = vec![
        config.address.unwrap_or_default(),
        config.netmask.unwrap_or_default(),
        config.gateway.unwrap_or_default(),
    ];
    values.extend(config.nameservers);

    let min_len = FIXED_FIELDS.len() + MIN_NAMESERVER_FIELDS;
    if values.len() < min_len {
        values.resize(min_len, String::new());
    }
    if values.last().is_some_and(|v| !v.is_empty()) {
        values.push(String::new());
    }
    (values, warnings)
}

/// Form inputs for the given values, one nameserver input per extra value
pub fn form_fields(values: &[String]) -> Vec<FormField> {
    let min_len = FIXED_FIELDS.len() + MIN_NAMESERVER_FIELDS;
    (0..values.len().max(min_len))
        .map(|i| {
            let label = FIXED_FIELDS.get(i).copied().unwrap_or(NAMESERVER_LABEL);
            let value = values.get(i).cloned().unwrap_or_default();
            FormField::new(label, value, FIELD_MAX_LEN)
        })
        .collect()
}

fn required_ip(
    value: &str,
    missing: &str,
    illegal: &str,
    errors: &mut Vec<String>,
) -> Option<Ipv4Addr> {
    if value.is_empty() {
        errors.push(missing.to_string());
        return None;
    }
    let ip = parse_ip(value);
    if ip.is_none() {
        errors.push(format!("{illegal}: {value}"));
    }
    ip
}

fn parse_ip(value: &str) -> Option<Ipv4Addr> {
    value.parse().ok()
}
