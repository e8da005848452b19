use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;

/// Branding parameters rendered on the public careers page. Media fields
/// are plain string references; no upload pipeline exists behind them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Brand {
    pub primary_color: String,
    pub secondary_color: String,
    pub logo: Option<String>,
    pub banner: Option<String>,
    pub culture_video: Option<String>,
    pub subtitle: String,
}

impl Default for Brand {
    fn default() -> Self {
        Brand {
            primary_color: "#3B82F6".to_string(),
            secondary_color: "#1E40AF".to_string(),
            logo: None,
            banner: None,
            culture_video: None,
            subtitle: "Join our team and help shape the future".to_string(),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct CompanyRow {
    pub id: Uuid,
    pub account_id: Uuid,
    pub slug: String,
    pub name: String,
    pub brand: Json<Brand>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ContentSectionRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub section_type: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub position: i32,
}

/// API-facing profile: the company row plus its sections in ascending
/// position order. The `published` flag is presentational metadata and
/// does not gate the public lookup path.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyProfile {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub brand: Brand,
    pub published: bool,
    pub content_sections: Vec<ContentSectionRow>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CompanyProfile {
    pub fn from_parts(company: CompanyRow, content_sections: Vec<ContentSectionRow>) -> Self {
        CompanyProfile {
            id: company.id,
            slug: company.slug,
            name: company.name,
            brand: company.brand.0,
            published: company.published,
            content_sections,
            created_at: company.created_at,
            updated_at: company.updated_at,
        }
    }
}

/// Closed set of content section categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionType {
    About,
    Life,
    Benefits,
    Values,
    Custom,
}

impl SectionType {
    pub const ALL: &'static [&'static str] = &["about", "life", "benefits", "values", "custom"];

    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value {
            "about" => Ok(SectionType::About),
            "life" => Ok(SectionType::Life),
            "benefits" => Ok(SectionType::Benefits),
            "values" => Ok(SectionType::Values),
            "custom" => Ok(SectionType::Custom),
            other => Err(AppError::Validation(format!(
                "invalid section type '{other}', expected one of: {}",
                Self::ALL.join(", ")
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::About => "about",
            SectionType::Life => "life",
            SectionType::Benefits => "benefits",
            SectionType::Values => "values",
            SectionType::Custom => "custom",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_type_round_trips_all_variants() {
        for name in SectionType::ALL {
            let parsed = SectionType::parse(name).unwrap();
            assert_eq!(parsed.as_str(), *name);
        }
    }

    #[test]
    fn test_section_type_rejects_unknown_and_cased_input() {
        assert!(matches!(
            SectionType::parse("perks"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            SectionType::parse("About"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_brand_defaults_match_seed_values() {
        let brand = Brand::default();
        assert_eq!(brand.primary_color, "#3B82F6");
        assert_eq!(brand.secondary_color, "#1E40AF");
        assert!(brand.logo.is_none());
        assert_eq!(brand.subtitle, "Join our team and help shape the future");
    }

    #[test]
    fn test_brand_deserializes_from_empty_object() {
        let brand: Brand = serde_json::from_str("{}").unwrap();
        assert_eq!(brand.primary_color, "#3B82F6");
    }
}
