use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
    Ca,
}

impl Language {
    /// Unknown codes resolve to Spanish.
    pub fn from_code(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Self::En,
            "ca" => Self::Ca,
            _ => Self::Es,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::En => "en",
            Self::Ca => "ca",
        }
    }

    pub fn default_timeline(self) -> &'static str {
        match self {
            Self::Es => "A determinar según disponibilidad",
            Self::En => "Timeline to be determined based on availability",
            Self::Ca => "A determinar segons disponibilitat",
        }
    }

    pub fn default_payment_terms(self) -> &'static str {
        match self {
            Self::Es => "50% al inicio, 50% a la entrega",
            Self::En => "50% upfront, 50% on delivery",
            Self::Ca => "50% a l'inici, 50% a l'entrega",
        }
    }
}

impl From<String> for Language {
    fn from(value: String) -> Self {
        Self::from_code(&value)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum Tone {
    Formal,
    #[default]
    Professional,
    Friendly,
    Technical,
    Concise,
    Detailed,
}

impl Tone {
    /// Unknown names resolve to the professional tone.
    pub fn from_name(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "formal" => Self::Formal,
            "friendly" => Self::Friendly,
            "technical" => Self::Technical,
            "concise" => Self::Concise,
            "detailed" => Self::Detailed,
            _ => Self::Professional,
        }
    }
}

impl From<String> for Tone {
    fn from(value: String) -> Self {
        Self::from_name(&value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TechnicalDepth(pub u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepthBand {
    Minimal,
    Balanced,
    Detailed,
}

impl TechnicalDepth {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn band(self) -> DepthBand {
        match self.0 {
            0..=3 => DepthBand::Minimal,
            4..=6 => DepthBand::Balanced,
            _ => DepthBand::Detailed,
        }
    }

    pub fn is_in_range(self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.0)
    }
}

impl Default for TechnicalDepth {
    fn default() -> Self {
        Self(5)
    }
}

/// A priced service as supplied by the caller. All monetary output is
/// derived from these values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceInput {
    pub name: String,
    pub description: String,
    pub estimated_hours: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub hourly_rate: Decimal,
}

impl ServiceInput {
    /// `None` when the line total does not fit in a `Decimal`.
    pub fn amount(&self) -> Option<Decimal> {
        Decimal::from(self.estimated_hours).checked_mul(self.hourly_rate)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub client_name: String,
    pub project_name: String,
    #[serde(default)]
    pub project_description: Option<String>,
    pub services: Vec<ServiceInput>,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default)]
    pub technical_depth: TechnicalDepth,
    #[serde(default)]
    pub custom_instructions: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuoteTotals {
    pub total_hours: u64,
    pub total_amount: Decimal,
}

impl QuoteTotals {
    pub fn of(services: &[ServiceInput]) -> Option<Self> {
        services.iter().try_fold(
            Self { total_hours: 0, total_amount: Decimal::ZERO },
            |totals, service| {
                Some(Self {
                    total_hours: totals
                        .total_hours
                        .checked_add(u64::from(service.estimated_hours))?,
                    total_amount: totals.total_amount.checked_add(service.amount()?)?,
                })
            },
        )
    }
}

impl QuoteRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.client_name.trim().is_empty() {
            return Err(DomainError::InvalidRequest("client_name must not be blank".to_string()));
        }
        if self.project_name.trim().is_empty() {
            return Err(DomainError::InvalidRequest("project_name must not be blank".to_string()));
        }
        if self.services.is_empty() {
            return Err(DomainError::InvalidRequest(
                "services must contain at least one entry".to_string(),
            ));
        }
        for (index, service) in self.services.iter().enumerate() {
            if service.estimated_hours < 1 {
                return Err(DomainError::InvalidRequest(format!(
                    "services[{index}].estimated_hours must be at least 1"
                )));
            }
            if service.hourly_rate < Decimal::ZERO {
                return Err(DomainError::InvalidRequest(format!(
                    "services[{index}].hourly_rate must not be negative"
                )));
            }
            if service.amount().is_none() {
                return Err(DomainError::InvalidRequest(format!(
                    "services[{index}] amount exceeds the supported range"
                )));
            }
        }
        if self.totals().is_none() {
            return Err(DomainError::InvalidRequest(
                "total amount exceeds the supported range".to_string(),
            ));
        }
        if !self.technical_depth.is_in_range() {
            return Err(DomainError::InvalidRequest(format!(
                "technical_depth must be in range {}..={}",
                TechnicalDepth::MIN,
                TechnicalDepth::MAX
            )));
        }
        Ok(())
    }

    pub fn totals(&self) -> Option<QuoteTotals> {
        QuoteTotals::of(&self.services)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteService {
    pub name: String,
    pub description: String,
    pub hours: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub hourly_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl QuoteService {
    /// Builds an output line whose numbers come only from `input`.
    pub fn from_input(input: &ServiceInput, description: String) -> Option<Self> {
        Some(Self {
            name: input.name.clone(),
            description,
            hours: input.estimated_hours,
            hourly_rate: input.hourly_rate,
            amount: input.amount()?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteContent {
    pub introduction: String,
    pub services: Vec<QuoteService>,
    pub timeline: String,
    pub payment_terms: String,
    pub conclusion: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub success: bool,
    pub content: Option<QuoteContent>,
    pub error: Option<String>,
    pub raw_response: Option<String>,
}

impl QuoteResponse {
    pub fn generated(content: QuoteContent, raw_response: String) -> Self {
        Self { success: true, content: Some(content), error: None, raw_response: Some(raw_response) }
    }

    pub fn failed(error: impl Into<String>, raw_response: Option<String>) -> Self {
        Self { success: false, content: None, error: Some(error.into()), raw_response }
    }
}
