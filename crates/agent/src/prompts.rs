//! System and user instructions for quote generation.
//!
//! Everything here is pure: the same request always yields byte-identical
//! prompts, and unknown tones or languages have already collapsed to their
//! defaults by the time they reach these functions.

use anclora_core::{DepthBand, Language, QuoteRequest, QuoteTotals, ServiceInput, TechnicalDepth, Tone};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

impl PromptPair {
    pub fn for_request(request: &QuoteRequest) -> Self {
        Self {
            system: build_system_prompt(request.language, request.tone, request.technical_depth),
            user: build_user_prompt(
                &request.client_name,
                &request.project_name,
                request.project_description.as_deref(),
                &request.services,
                request.custom_instructions.as_deref(),
            ),
        }
    }
}

fn language_directive(language: Language) -> &'static str {
    match language {
        Language::Es => "Responde ÚNICAMENTE en español. Todo el contenido debe estar en español.",
        Language::En => "Respond ONLY in English. All content must be in English.",
        Language::Ca => "Respon ÚNICAMENT en català. Tot el contingut ha d'estar en català.",
    }
}

fn tone_directive(tone: Tone) -> &'static str {
    match tone {
        Tone::Formal => "Use formal language, avoid contractions, maintain professional distance",
        Tone::Professional => {
            "Use professional but approachable language, balance formality with warmth"
        }
        Tone::Friendly => "Use warm, approachable language while maintaining professionalism",
        Tone::Technical => {
            "Include technical details and terminology appropriate for tech-savvy clients"
        }
        Tone::Concise => "Be brief and to the point, focus on essential information",
        Tone::Detailed => "Provide comprehensive explanations and thorough descriptions",
    }
}

fn depth_directive(depth: TechnicalDepth) -> &'static str {
    match depth.band() {
        DepthBand::Minimal => {
            "Keep technical details minimal. Focus on business outcomes and benefits."
        }
        DepthBand::Balanced => {
            "Balance technical details with business value. Include some methodology mentions."
        }
        DepthBand::Detailed => {
            "Include detailed technical specifications, methodologies, and implementation details."
        }
    }
}

const RESPONSE_SHAPE: &str = r#"{
    "introduction": "A compelling introduction paragraph that addresses the client's needs",
    "services": [
        {
            "name": "Service name",
            "description": "Detailed description of what this service includes",
            "hours": <number of hours>,
            "hourly_rate": <rate per hour>,
            "amount": <total amount for this service>
        }
    ],
    "timeline": "Estimated timeline for project completion",
    "payment_terms": "Payment terms and conditions",
    "conclusion": "A professional closing statement"
}"#;

pub fn build_system_prompt(language: Language, tone: Tone, technical_depth: TechnicalDepth) -> String {
    format!(
        "You are an expert business consultant specializing in creating professional quotes and \
proposals for technology consulting services.

Your task is to generate a professional quote/proposal content based on the provided project and \
service information.

{language}

TONE: {tone}

TECHNICAL DEPTH: {depth}

You must respond with a valid JSON object with the following structure:
{RESPONSE_SHAPE}

IMPORTANT:
- The services array MUST contain exactly the same services provided in the input, with the same hours and rates
- Calculate the amount for each service as hours * hourly_rate
- The introduction should be personalized for the client and project
- The timeline should be realistic based on the total hours
- Payment terms should be professional (e.g., 50% upfront, 50% on completion)
- Keep the conclusion brief but compelling

Respond ONLY with the JSON object, no additional text or markdown formatting.",
        language = language_directive(language),
        tone = tone_directive(tone),
        depth = depth_directive(technical_depth),
    )
}

pub fn build_user_prompt(
    client_name: &str,
    project_name: &str,
    project_description: Option<&str>,
    services: &[ServiceInput],
    custom_instructions: Option<&str>,
) -> String {
    let mut lines = vec![
        "Generate a professional quote for the following:".to_string(),
        String::new(),
        format!("CLIENT: {client_name}"),
        format!("PROJECT: {project_name}"),
    ];
    if let Some(description) = project_description.filter(|text| !text.trim().is_empty()) {
        lines.push(format!("DESCRIPTION: {description}"));
    }

    lines.push(String::new());
    lines.push("SERVICES TO INCLUDE:".to_string());
    lines.extend(services.iter().map(|service| {
        format!(
            "- {}: {} ({} hours at {}€/hour)",
            service.name,
            service.description,
            service.estimated_hours,
            service.hourly_rate.normalize()
        )
    }));

    // Omitted when the sum overflows, which validated requests never do.
    if let Some(totals) = QuoteTotals::of(services) {
        lines.push(String::new());
        lines.push("TOTALS:".to_string());
        lines.push(format!("- Total Hours: {}", totals.total_hours));
        lines.push(format!("- Total Amount: {}€ (before tax)", totals.total_amount.normalize()));
    }

    if let Some(instructions) = custom_instructions.filter(|text| !text.trim().is_empty()) {
        lines.push(String::new());
        lines.push(format!("ADDITIONAL INSTRUCTIONS: {instructions}"));
    }

    lines.push(String::new());
    lines.push("Generate the quote content now as a JSON object.".to_string());
    lines.join("\n")
}
