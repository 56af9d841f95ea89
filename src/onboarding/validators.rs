//! Per-step validators and extractors — pure functions over response text.
//!
//! Validators return `Err` with the user-facing message (Portuguese, like
//! the step prompts). Extractors produce the partial data mapping merged
//! into the collected-data container.

use std::sync::LazyLock;

use chrono_tz::Tz;
use regex::Regex;

use super::steps::OnboardingStep;

/// Region/City timezone token, e.g. `America/Sao_Paulo`.
static TIMEZONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(America|Europe|Asia|Africa|Pacific|Australia)/[A-Za-z_]+")
        .expect("timezone pattern is valid")
});

/// Run the validator for a step, if it declares one.
pub fn validate_step(step: OnboardingStep, response: &str) -> Result<(), String> {
    match step {
        OnboardingStep::Name => validate_name(response),
        OnboardingStep::Goals => validate_goals(response),
        OnboardingStep::Preferences => validate_preferences(response),
        OnboardingStep::Welcome | OnboardingStep::Conclusion => Ok(()),
    }
}

/// Run the extractor for a step, if it declares one.
pub fn extract_step(step: OnboardingStep, response: &str) -> Option<serde_json::Value> {
    match step {
        OnboardingStep::Name => Some(serde_json::json!({ "name": extract_name(response) })),
        OnboardingStep::Goals => Some(serde_json::json!({ "goals": extract_goals(response) })),
        OnboardingStep::Preferences => {
            let prefs = extract_preferences(response);
            Some(serde_json::to_value(prefs).unwrap_or_default())
        }
        OnboardingStep::Welcome | OnboardingStep::Conclusion => None,
    }
}

pub fn validate_name(name: &str) -> Result<(), String> {
    let stripped = name.trim();
    if stripped.is_empty() {
        return Err("Por favor, me diga seu nome.".to_string());
    }
    if stripped.chars().count() < 2 {
        return Err("O nome deve ter pelo menos 2 caracteres.".to_string());
    }
    if stripped.chars().count() > 100 {
        return Err("O nome deve ter no máximo 100 caracteres.".to_string());
    }
    Ok(())
}

pub fn extract_name(text: &str) -> String {
    text.trim().to_string()
}

pub fn validate_goals(goals_text: &str) -> Result<(), String> {
    let stripped = goals_text.trim();
    if stripped.is_empty() {
        return Err("Por favor, me conte pelo menos um objetivo.".to_string());
    }
    if stripped.chars().count() < 5 {
        return Err("Descreva seus objetivos com um pouco mais de detalhe.".to_string());
    }
    Ok(())
}

/// Split goals on the first matching separator: comma, then the conjunction
/// " e ", then newline. No separator means the whole input is one goal.
/// Separators are never combined.
pub fn extract_goals(text: &str) -> Vec<String> {
    let normalized = text.trim();

    let parts: Vec<String> = if normalized.contains(',') {
        normalized.split(',').map(str::trim).filter(|g| !g.is_empty()).map(String::from).collect()
    } else if normalized.contains(" e ") {
        normalized
            .split(" e ")
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(String::from)
            .collect()
    } else if normalized.contains('\n') {
        normalized
            .split('\n')
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(String::from)
            .collect()
    } else {
        vec![normalized.to_string()]
    };

    parts
}

/// Extracted preferences: timezone and language.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExtractedPreferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    pub language: String,
}

pub fn validate_preferences(prefs_text: &str) -> Result<(), String> {
    if prefs_text.trim().is_empty() {
        return Err("Por favor, informe seu fuso horário.".to_string());
    }

    let prefs = extract_preferences(prefs_text);
    let Some(timezone) = prefs.timezone else {
        return Err(
            "Não consegui identificar o fuso horário. Use o formato: America/Sao_Paulo"
                .to_string(),
        );
    };

    if timezone.parse::<Tz>().is_err() {
        return Err(format!(
            "Fuso horário '{}' não reconhecido. Use o formato: America/Sao_Paulo",
            timezone
        ));
    }

    Ok(())
}

/// Pull a timezone token (explicit Region/City pattern or known city alias)
/// and a language out of free text. Language defaults to pt-BR unless an
/// English cue is present.
pub fn extract_preferences(text: &str) -> ExtractedPreferences {
    let lower = text.to_lowercase();

    let timezone = if let Some(m) = TIMEZONE_PATTERN.find(text) {
        Some(m.as_str().to_string())
    } else if lower.contains("são paulo")
        || lower.contains("sao paulo")
        || lower.contains("brasilia")
        || lower.contains("brasília")
    {
        Some("America/Sao_Paulo".to_string())
    } else if lower.contains("utc") {
        Some("UTC".to_string())
    } else {
        None
    };

    let language = if lower.contains("en") || lower.contains("english") || lower.contains("inglês")
    {
        "en".to_string()
    } else {
        "pt-BR".to_string()
    };

    ExtractedPreferences { timezone, language }
}
