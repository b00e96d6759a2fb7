use serde::{Deserialize, Serialize};

/// Filters of the trace list. Durations are milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TraceFilters {
    pub service: Option<String>,
    pub min_duration: Option<f64>,
    pub max_duration: Option<f64>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl TraceFilters {
    pub fn to_query_parameters(&self) -> Vec<(&'static str, String)> {
        let mut parameters = Vec::with_capacity(5);
        if let Some(service) = self.service.as_ref().filter(|s| !s.is_empty()) {
            parameters.push(("service", service.clone()));
        }
        if let Some(min_duration) = self.min_duration {
            parameters.push(("min_duration", min_duration.to_string()));
        }
        if let Some(max_duration) = self.max_duration {
            parameters.push(("max_duration", max_duration.to_string()));
        }
        if let Some(limit) = self.limit {
            parameters.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset.filter(|offset| *offset > 0) {
            parameters.push(("offset", offset.to_string()));
        }
        parameters
    }

    /// Parses a duration text box, blank or garbage meaning "no filter".
    pub fn parse_duration_input(input: &str) -> Option<f64> {
        input
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|ms| ms.is_finite() && *ms >= 0.)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn only_set_filters_become_query_parameters() {
        let filters = TraceFilters {
            service: Some("checkout".to_string()),
            min_duration: Some(12.5),
            max_duration: None,
            limit: Some(25),
            offset: Some(0),
        };
        assert_eq!(
            filters.to_query_parameters(),
            vec![
                ("service", "checkout".to_string()),
                ("min_duration", "12.5".to_string()),
                ("limit", "25".to_string()),
            ]
        );
        assert!(TraceFilters::default().to_query_parameters().is_empty());
    }

    #[test]
    fn duration_input_parsing() {
        assert_eq!(TraceFilters::parse_duration_input(" 100 "), Some(100.));
        assert_eq!(TraceFilters::parse_duration_input(""), None);
        assert_eq!(TraceFilters::parse_duration_input("-3"), None);
        assert_eq!(TraceFilters::parse_duration_input("fast"), None);
    }
}
