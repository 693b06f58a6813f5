//! The business details a strategy is generated from.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// One input of the request, as presented to the user.
#[derive(Debug)]
pub struct Field {
    pub key: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
}

/// All request fields, in form order.
pub const FIELDS: [Field; 10] = [
    Field {
        key: "company_name",
        label: "Company Name",
        placeholder: "Artisan Coffee Roasters",
    },
    Field {
        key: "website_url",
        label: "Website URL",
        placeholder: "https://www.artisancoffee.com",
    },
    Field {
        key: "industry",
        label: "Industry & Focus",
        placeholder: "Specialty coffee, e-commerce",
    },
    Field {
        key: "target_markets",
        label: "Target Geographic Markets",
        placeholder: "USA, Canada, UK",
    },
    Field {
        key: "products_services",
        label: "Primary Products/Services",
        placeholder: "Single-origin coffee beans, subscriptions",
    },
    Field {
        key: "business_goals",
        label: "Main Business Goals",
        placeholder: "Increase online sales by 20%",
    },
    Field {
        key: "target_audience",
        label: "Target Audience / Personas",
        placeholder: "Coffee connoisseurs, home baristas",
    },
    Field {
        key: "current_seo_performance",
        label: "Current SEO Performance",
        placeholder: "Ranking for some brand terms, low non-brand traffic",
    },
    Field {
        key: "competitors",
        label: "Competitor Websites",
        placeholder: "bluebottlecoffee.com, intelligentsia.com",
    },
    Field {
        key: "content_strategy",
        label: "Current Content Strategy",
        placeholder: "Weekly blog posts about brewing methods",
    },
];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StrategyRequest {
    pub company_name: String,
    pub website_url: String,
    pub industry: String,
    pub target_markets: String,
    pub products_services: String,
    pub business_goals: String,
    pub target_audience: String,
    pub current_seo_performance: String,
    pub competitors: String,
    pub content_strategy: String,
}

impl StrategyRequest {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Request(e.to_string()))
    }

    /// Field values in the order of [`FIELDS`].
    pub fn values(&self) -> [&str; 10] {
        [
            self.company_name.as_str(),
            self.website_url.as_str(),
            self.industry.as_str(),
            self.target_markets.as_str(),
            self.products_services.as_str(),
            self.business_goals.as_str(),
            self.target_audience.as_str(),
            self.current_seo_performance.as_str(),
            self.competitors.as_str(),
            self.content_strategy.as_str(),
        ]
    }

    /// Every field is required.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&'static str> = FIELDS
            .iter()
            .zip(self.values())
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field.label)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingFields(missing))
        }
    }
}

/// An empty request file with one commented entry per field.
pub fn template() -> String {
    let mut out = String::from("# SEO strategy request. Every field is required.\n");
    for field in &FIELDS {
        out.push_str(&format!(
            "\n# {} (e.g. {})\n{} = \"\"\n",
            field.label, field.placeholder, field.key
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> StrategyRequest {
        StrategyRequest {
            company_name: "Artisan Coffee Roasters".to_string(),
            website_url: "https://www.artisancoffee.com".to_string(),
            industry: "Specialty coffee".to_string(),
            target_markets: "USA".to_string(),
            products_services: "Beans".to_string(),
            business_goals: "Grow sales".to_string(),
            target_audience: "Home baristas".to_string(),
            current_seo_performance: "Brand terms only".to_string(),
            competitors: "bluebottlecoffee.com".to_string(),
            content_strategy: "Weekly posts".to_string(),
        }
    }

    #[test]
    fn complete_request_is_valid() {
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn missing_fields_are_listed_in_form_order() {
        let request = StrategyRequest {
            website_url: "  ".to_string(),
            competitors: String::new(),
            ..complete()
        };
        match request.validate() {
            Err(Error::MissingFields(labels)) => {
                assert_eq!(labels, vec!["Website URL", "Competitor Websites"]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn loads_from_toml() {
        let request = StrategyRequest::from_toml(
            "company_name = \"Acme\"\ncompetitors = \"\"\"\nfoo.com\nbar.com\"\"\"\n",
        )
        .unwrap();
        assert_eq!(request.company_name, "Acme");
        assert_eq!(request.competitors, "foo.com\nbar.com");
        assert!(request.industry.is_empty());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.toml");
        fs::write(&path, "company_name = \"Acme\"\n").unwrap();
        assert_eq!(StrategyRequest::load(&path).unwrap().company_name, "Acme");
        assert!(matches!(
            StrategyRequest::load(&dir.path().join("nope.toml")),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            StrategyRequest::from_toml("compnay_name = \"typo\""),
            Err(Error::Request(_))
        ));
    }

    #[test]
    fn template_parses_and_lists_every_field() {
        let template = template();
        for field in &FIELDS {
            assert!(template.contains(field.label));
        }
        let request = StrategyRequest::from_toml(&template).unwrap();
        match request.validate() {
            Err(Error::MissingFields(labels)) => assert_eq!(labels.len(), FIELDS.len()),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
