//! Build script for sunmeter-config
//!
//! Validates device.toml at compile time and embeds it into the crate, so
//! the firmware always carries a configuration that loads.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[allow(dead_code)]
#[path = "src/config/rules.rs"]
mod rules;

/// Environment variable overriding the device.toml location
const CONFIG_ENV: &str = "SUNMETER_DEVICE_CONFIG";

const REQUIRED_KEYS: [&str; 5] = [
    "wifi_ssid",
    "wifi_password",
    "data_host",
    "installed_watt_peak",
    "data_test_mode",
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/config/rules.rs");
    println!("cargo:rerun-if-env-changed={}", CONFIG_ENV);

    let config_path = env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("device.toml"));
    println!("cargo:rerun-if-changed={}", config_path.display());

    let content = read_config(&config_path);
    validate_config(&content);

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    fs::write(out_dir.join("device.toml"), content).expect("failed to write device.toml");
}

fn read_config(path: &Path) -> String {
    if !path.exists() {
        fail(&[
            &format!("ERROR: {} not found!", path.display()),
            "",
            "The device needs a configuration file. Create device.toml next",
            "to sunmeter-config/Cargo.toml or point SUNMETER_DEVICE_CONFIG",
            "at one.",
        ]);
    }

    fs::read_to_string(path).unwrap_or_else(|e| {
        fail(&[
            &format!("ERROR: Failed to read {}", path.display()),
            "",
            &format!("Error: {}", e),
        ])
    })
}

/// Validate device.toml syntax, keys and value ranges
///
/// The `toml` crate accepts more than the on-device parser, so lines using
/// unsupported forms are rejected first.
fn validate_config(content: &str) {
    check_subset(content);

    let config: toml::Table = match toml::from_str(content) {
        Ok(table) => table,
        Err(e) => {
            let msg = e.to_string();
            let mut lines = vec!["ERROR: Invalid TOML syntax in device.toml", ""];
            lines.extend(msg.lines());
            fail(&lines);
        }
    };

    let mut errors: Vec<String> = Vec::new();

    if config.contains_key("data_test_mode") && config.contains_key("data_test") {
        errors.push("Both `data_test_mode` and `data_test` are set".into());
    }

    for key in REQUIRED_KEYS {
        if !config.contains_key(key) && !(key == "data_test_mode" && config.contains_key("data_test")) {
            errors.push(format!("Missing required key `{}`", key));
        }
    }

    for (key, value) in &config {
        match key.as_str() {
            "wifi_ssid" => match value.as_str() {
                Some("") => errors.push("`wifi_ssid` must not be empty".into()),
                Some(s) if s.len() > rules::MAX_SSID_LEN => errors.push(format!(
                    "`wifi_ssid` is longer than {} bytes",
                    rules::MAX_SSID_LEN
                )),
                Some(_) => {}
                None => errors.push("`wifi_ssid` must be a string".into()),
            },
            // Never echo the password itself
            "wifi_password" => match value.as_str() {
                Some(s) if !rules::is_valid_password(s) => errors.push(
                    "`wifi_password` must be empty, 8-63 bytes or a 64 digit hex PSK".into(),
                ),
                Some(_) => {}
                None => errors.push("`wifi_password` must be a string".into()),
            },
            "data_host" => match value.as_str() {
                Some(s) if !rules::is_valid_host(s) => {
                    errors.push(format!("`data_host` `{}` is not a valid host", s))
                }
                Some(_) => {}
                None => errors.push("`data_host` must be a string".into()),
            },
            "data_port" => match value.as_integer() {
                Some(p) if (1..=65535).contains(&p) => {}
                Some(p) => errors.push(format!("`data_port` {} is outside 1-65535", p)),
                None => errors.push("`data_port` must be an integer".into()),
            },
            "installed_watt_peak" => match value.as_integer() {
                Some(w) if w > 0 && w <= i64::from(u32::MAX) => {}
                Some(w) => errors.push(format!("`installed_watt_peak` {} must be positive", w)),
                None => errors.push("`installed_watt_peak` must be an integer".into()),
            },
            "data_test_mode" | "data_test" => {
                if value.as_bool().is_none() {
                    errors.push(format!("`{}` must be true or false", key));
                }
            }
            other => errors.push(format!("Unknown key `{}`", other)),
        }
    }

    if !errors.is_empty() {
        let mut lines: Vec<&str> = vec!["ERROR: Invalid device.toml", ""];
        lines.extend(errors.iter().map(String::as_str));
        fail(&lines);
    }

    println!("cargo:warning=device.toml validated successfully");
}

/// Reject TOML the on-device parser does not understand
fn check_subset(content: &str) {
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(problem) = rules::unsupported_toml_line(line) {
            fail(&[
                "ERROR: Unsupported TOML in device.toml",
                "",
                &format!("Line {}: {}", index + 1, problem),
                "",
                "Only root level `key = value` pairs with bare keys, single",
                "line strings, integers and booleans are supported.",
            ]);
        }
    }
}

/// Abort the build with a boxed message
fn fail(lines: &[&str]) -> ! {
    let mut msg = String::from("\n╔══════════════════════════════════════════════════════════════════╗\n");
    for line in lines {
        let truncated = if line.chars().count() > 64 {
            format!("{}...", line.chars().take(61).collect::<String>())
        } else {
            line.to_string()
        };
        msg.push_str(&format!("║  {:<64}║\n", truncated));
    }
    msg.push_str("╚══════════════════════════════════════════════════════════════════╝\n");
    panic!("{}", msg);
}
