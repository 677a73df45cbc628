use std::env;
use std::fs;
use std::path::Path;

use advisor_core::config::{resolve_config_path, AppConfig, LoadOptions};
use toml::Value;

use crate::commands::CommandResult;

struct Field {
    key_path: &'static str,
    env_keys: &'static [&'static str],
    value: String,
    overridden: bool,
}

pub fn run(options: LoadOptions) -> CommandResult {
    let config_path = resolve_config_path(options.config_path.as_deref());
    let overrides = options.overrides.clone();

    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult {
                exit_code: 2,
                output: format!("config validation failed: {error}"),
            };
        }
    };

    let config_file_doc = load_config_file_doc(config_path.as_deref());

    let fields = [
        Field {
            key_path: "filter.enabled",
            env_keys: &["ADVISOR_FILTER_ENABLED"],
            value: config.filter.enabled.to_string(),
            overridden: overrides.smart_filter_enabled.is_some(),
        },
        Field {
            key_path: "catalog.path",
            env_keys: &["ADVISOR_CATALOG_PATH"],
            value: config.catalog.path.display().to_string(),
            overridden: overrides.catalog_path.is_some(),
        },
        Field {
            key_path: "llm.api_key",
            env_keys: &["ADVISOR_LLM_API_KEY"],
            value: if config.llm.api_key.is_some() { "<redacted>" } else { "<unset>" }.to_string(),
            overridden: false,
        },
        Field {
            key_path: "llm.base_url",
            env_keys: &["ADVISOR_LLM_BASE_URL"],
            value: config.llm.base_url.clone(),
            overridden: false,
        },
        Field {
            key_path: "llm.model",
            env_keys: &["ADVISOR_LLM_MODEL"],
            value: config.llm.model.clone(),
            overridden: overrides.llm_model.is_some(),
        },
        Field {
            key_path: "llm.timeout_secs",
            env_keys: &["ADVISOR_LLM_TIMEOUT_SECS"],
            value: config.llm.timeout_secs.to_string(),
            overridden: false,
        },
        Field {
            key_path: "llm.temperature",
            env_keys: &["ADVISOR_LLM_TEMPERATURE"],
            value: config.llm.temperature.to_string(),
            overridden: false,
        },
        Field {
            key_path: "llm.top_k",
            env_keys: &["ADVISOR_LLM_TOP_K"],
            value: config.llm.top_k.to_string(),
            overridden: false,
        },
        Field {
            key_path: "llm.top_p",
            env_keys: &["ADVISOR_LLM_TOP_P"],
            value: config.llm.top_p.to_string(),
            overridden: false,
        },
        Field {
            key_path: "llm.max_output_tokens",
            env_keys: &["ADVISOR_LLM_MAX_OUTPUT_TOKENS"],
            value: config.llm.max_output_tokens.to_string(),
            overridden: false,
        },
        Field {
            key_path: "logging.level",
            env_keys: &["ADVISOR_LOGGING_LEVEL", "ADVISOR_LOG_LEVEL"],
            value: config.logging.level.clone(),
            overridden: overrides.log_level.is_some(),
        },
        Field {
            key_path: "logging.format",
            env_keys: &["ADVISOR_LOGGING_FORMAT", "ADVISOR_LOG_FORMAT"],
            value: config.logging.format.to_string(),
            overridden: false,
        },
    ];

    let mut lines =
        vec!["effective config (source precedence: flag > env > file > default):".to_string()];
    lines.extend(fields.iter().map(|field| {
        let source = if field.overridden {
            "flag".to_string()
        } else {
            field_source(field, config_file_doc.as_ref(), config_path.as_deref())
        };
        format!("- {} = {} (source: {source})", field.key_path, field.value)
    }));

    CommandResult { exit_code: 0, output: lines.join("\n") }
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let raw = fs::read_to_string(path?).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(field: &Field, config_file_doc: Option<&Value>, config_path: Option<&Path>) -> String {
    if let Some(env_key) = field.env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if config_file_doc.is_some_and(|doc| contains_path(doc, field.key_path)) {
        let file_path = config_path
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "config file".to_string());
        return format!("file ({file_path})");
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}
