use crate::attributes::Attributes;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// OTLP severity numbers, named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SeverityLevel {
    #[default]
    #[serde(alias = "UNSPECIFIED")]
    Unspecified,
    #[serde(alias = "TRACE")]
    Trace,
    Trace2,
    Trace3,
    Trace4,
    #[serde(alias = "DEBUG")]
    Debug,
    Debug2,
    Debug3,
    Debug4,
    #[serde(alias = "INFO")]
    Info,
    Info2,
    Info3,
    Info4,
    #[serde(alias = "WARN")]
    Warn,
    Warn2,
    Warn3,
    Warn4,
    #[serde(alias = "ERROR")]
    Error,
    Error2,
    Error3,
    Error4,
    #[serde(alias = "FATAL")]
    Fatal,
    Fatal2,
    Fatal3,
    Fatal4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeverityCategory {
    Unspecified,
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl SeverityLevel {
    pub fn category(&self) -> SeverityCategory {
        use SeverityLevel::*;
        match self {
            Unspecified => SeverityCategory::Unspecified,
            Trace | Trace2 | Trace3 | Trace4 => SeverityCategory::Trace,
            Debug | Debug2 | Debug3 | Debug4 => SeverityCategory::Debug,
            Info | Info2 | Info3 | Info4 => SeverityCategory::Info,
            Warn | Warn2 | Warn3 | Warn4 => SeverityCategory::Warn,
            Error | Error2 | Error3 | Error4 => SeverityCategory::Error,
            Fatal | Fatal2 | Fatal3 | Fatal4 => SeverityCategory::Fatal,
        }
    }
}

impl SeverityCategory {
    pub const SELECTABLE: [SeverityCategory; 6] = [
        SeverityCategory::Trace,
        SeverityCategory::Debug,
        SeverityCategory::Info,
        SeverityCategory::Warn,
        SeverityCategory::Error,
        SeverityCategory::Fatal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityCategory::Unspecified => "UNSPECIFIED",
            SeverityCategory::Trace => "TRACE",
            SeverityCategory::Debug => "DEBUG",
            SeverityCategory::Info => "INFO",
            SeverityCategory::Warn => "WARN",
            SeverityCategory::Error => "ERROR",
            SeverityCategory::Fatal => "FATAL",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SeverityCategory::Error | SeverityCategory::Fatal)
    }
}

impl Display for SeverityCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SeverityCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TRACE" => Ok(Self::Trace),
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARN" | "WARNING" => Ok(Self::Warn),
            "ERROR" => Ok(Self::Error),
            "FATAL" => Ok(Self::Fatal),
            "UNSPECIFIED" => Ok(Self::Unspecified),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Log {
    pub time_unix_nano: i64,
    #[serde(default)]
    pub severity_level: SeverityLevel,
    #[serde(default)]
    pub severity_text: Option<String>,
    pub body: String,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub trace_id: Option<String>,
    #[serde(default)]
    pub span_id: Option<String>,
    #[serde(default)]
    pub service_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LogFilters {
    pub service: Option<String>,
    pub level: Option<SeverityCategory>,
    pub limit: Option<usize>,
}

impl LogFilters {
    pub fn to_query_parameters(&self) -> Vec<(&'static str, String)> {
        let mut parameters = Vec::with_capacity(3);
        if let Some(service) = self.service.as_ref().filter(|s| !s.is_empty()) {
            parameters.push(("service", service.clone()));
        }
        if let Some(level) = self.level {
            parameters.push(("level", level.as_str().to_string()));
        }
        if let Some(limit) = self.limit {
            parameters.push(("limit", limit.to_string()));
        }
        parameters
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn numbered_levels_collapse_into_categories() {
        assert_eq!(SeverityLevel::Warn3.category(), SeverityCategory::Warn);
        assert_eq!(SeverityLevel::Fatal4.category(), SeverityCategory::Fatal);
        assert_eq!(SeverityLevel::Unspecified.category(), SeverityCategory::Unspecified);
        assert!(SeverityLevel::Error2.category().is_error());
        assert!(!SeverityLevel::Info.category().is_error());
    }

    #[test]
    fn parses_log_with_upper_case_level() {
        let raw = r#"{"time_unix_nano": 5, "severity_level": "ERROR", "body": "failed", "attributes": {}}"#;
        let log: Log = serde_json::from_str(raw).unwrap();
        assert_eq!(log.severity_level, SeverityLevel::Error);
        assert_eq!(log.service_name, None);
    }

    #[test]
    fn log_filters_skip_empty_values() {
        let filters = LogFilters {
            service: Some(String::new()),
            level: Some(SeverityCategory::Warn),
            limit: Some(50),
        };
        assert_eq!(
            filters.to_query_parameters(),
            vec![("level", "WARN".to_string()), ("limit", "50".to_string())]
        );
        assert_eq!("warning".parse::<SeverityCategory>(), Ok(SeverityCategory::Warn));
        assert!("loud".parse::<SeverityCategory>().is_err());
    }
}
