use serde::{Deserialize, Serialize};

/// An embedded analytics report shown next to the metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPanel {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl ReportPanel {
    fn unconfigured(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            url: None,
        }
    }

    pub fn defaults() -> Vec<Self> {
        vec![
            Self::unconfigured(
                "Case Volume Analysis",
                "Case volumes over time, trends and peak periods",
            ),
            Self::unconfigured(
                "Priority Distribution",
                "Cases by priority level, with critical cases highlighted",
            ),
            Self::unconfigured(
                "Resolution Time Metrics",
                "Average resolution times, SLA performance and response efficiency",
            ),
            Self::unconfigured(
                "Customer Satisfaction",
                "Satisfaction ratings, feedback trends and service quality",
            ),
            Self::unconfigured(
                "Department Performance",
                "Performance compared across departments",
            ),
            Self::unconfigured(
                "Category Breakdown",
                "Cases by category, to spot common issues",
            ),
        ]
    }

    /// The embed URL, when one is set and non-blank.
    pub fn embed_url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|url| !url.is_empty())
    }

    pub fn is_configured(&self) -> bool {
        self.embed_url().is_some()
    }
}
