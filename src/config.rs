use crate::amount::AmountParsing;
use crate::color::{category_color, color_from_palette};
use crate::error::{DashboardMetricsError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AggregationOptions {
    #[serde(default)]
    #[schemars(description = "How amount text is turned into numbers. Defaults to Exact.")]
    pub amount_parsing: AmountParsing,

    #[serde(default)]
    #[schemars(
        description = "Optional replacement for the built-in category palette. Each entry must be a '#RRGGBB' color."
    )]
    pub palette: Option<Vec<String>>,
}

impl AggregationOptions {
    pub fn truncating() -> Self {
        Self {
            amount_parsing: AmountParsing::Truncate,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        let Some(palette) = &self.palette else {
            return Ok(());
        };

        if palette.is_empty() {
            return Err(DashboardMetricsError::InvalidConfig(
                "palette must contain at least one color".to_string(),
            ));
        }

        for color in palette {
            if !is_hex_color(color) {
                return Err(DashboardMetricsError::InvalidConfig(format!(
                    "palette entry '{}' is not a #RRGGBB color",
                    color
                )));
            }
        }

        Ok(())
    }

    pub fn color_for(&self, category: &str) -> Option<String> {
        match &self.palette {
            Some(palette) => color_from_palette(category, palette),
            None => Some(category_color(category)),
        }
    }
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}
