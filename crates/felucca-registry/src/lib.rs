use serde_json::Value;
use std::time::Duration;

use felucca_constants::{COMPATIBILITY_KEYWORD, MAX_ATTEMPTS, USER_AGENT};
use felucca_error::{FeluccaError, Result};

/// Decides whether an index package ships Cairo contracts.
pub trait CompatibilityCheck {
    fn is_compatible(&self, package: &str) -> Result<bool>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    pub keywords: Vec<String>,
}

impl PackageInfo {
    #[must_use]
    pub fn from_json(json: &Value) -> Self {
        let info = json.get("info");
        let field = |key: &str| {
            info.and_then(|i| i.get(key))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        Self {
            name: field("name"),
            version: field("version"),
            keywords: parse_keywords(info.and_then(|i| i.get("keywords"))),
        }
    }

    #[must_use]
    pub fn is_felucca_package(&self) -> bool {
        self.keywords
            .iter()
            .any(|k| k.eq_ignore_ascii_case(COMPATIBILITY_KEYWORD))
    }
}

// The index reports keywords as one comma/space separated string, but some
// mirrors return a list.
fn parse_keywords(value: Option<&Value>) -> Vec<String> {
    let split = |s: &str| {
        s.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>()
    };

    match value {
        Some(Value::String(s)) => split(s),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .flat_map(split)
            .collect(),
        _ => Vec::new(),
    }
}

pub async fn fetch_package_info_async(
    client: &reqwest::Client,
    index_url: &str,
    name: &str,
) -> Result<PackageInfo> {
    let encoded_name = urlencoding::encode(name);
    let url = format!("{}/{encoded_name}/json", index_url.trim_end_matches('/'));

    let mut attempts = 0;

    loop {
        attempts += 1;

        let resp = match client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                if attempts < MAX_ATTEMPTS && (e.is_connect() || e.is_timeout()) {
                    tokio::time::sleep(Duration::from_millis(500 * u64::from(attempts))).await;
                    continue;
                }
                return Err(FeluccaError::Fetch(name.to_string(), e.to_string()));
            }
        };

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FeluccaError::NotFound(name.to_string()));
        }
        if !status.is_success() {
            if attempts < MAX_ATTEMPTS
                && (status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error())
            {
                tokio::time::sleep(Duration::from_millis(1000 * u64::from(attempts))).await;
                continue;
            }
            return Err(FeluccaError::Fetch(
                name.to_string(),
                format!("HTTP {status} from {url}"),
            ));
        }

        let json: Value = resp
            .json()
            .await
            .map_err(|e| FeluccaError::Fetch(name.to_string(), format!("invalid JSON: {e}")))?;

        return Ok(PackageInfo::from_json(&json));
    }
}

pub fn fetch_package_info(index_url: &str, name: &str, timeout: Duration) -> Result<PackageInfo> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| FeluccaError::Fetch(name.to_string(), format!("runtime: {e}")))?;
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| FeluccaError::Fetch(name.to_string(), e.to_string()))?;
    rt.block_on(fetch_package_info_async(&client, index_url, name))
}

/// Compatibility check backed by the package index JSON API.
#[derive(Clone, Debug)]
pub struct PypiRegistry {
    index_url: String,
    timeout: Duration,
}

impl PypiRegistry {
    #[must_use]
    pub fn new(index_url: &str, timeout: Duration) -> Self {
        Self {
            index_url: index_url.to_string(),
            timeout,
        }
    }
}

impl CompatibilityCheck for PypiRegistry {
    fn is_compatible(&self, package: &str) -> Result<bool> {
        felucca_logger::status(&format!("Checking {package} on the package index"));
        let info = fetch_package_info(&self.index_url, package, self.timeout)?;
        Ok(info.is_felucca_package())
    }
}
