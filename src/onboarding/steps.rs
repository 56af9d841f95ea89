//! Onboarding step definitions — prompts, sequencing, and progress.

use serde::{Deserialize, Serialize};

/// The onboarding steps, in conversation order.
///
/// The sequence is total and linear: every step except `Conclusion` has
/// exactly one successor; advancing past `Conclusion` completes onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Welcome,
    Name,
    Goals,
    Preferences,
    Conclusion,
}

/// Full step sequence, for iteration and tests.
pub const STEP_SEQUENCE: [OnboardingStep; 5] = [
    OnboardingStep::Welcome,
    OnboardingStep::Name,
    OnboardingStep::Goals,
    OnboardingStep::Preferences,
    OnboardingStep::Conclusion,
];

impl OnboardingStep {
    /// The prompt shown to the user when this step is reached.
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Welcome => {
                "Olá! Sou o Virtus, seu assistente pessoal de produtividade e bem-estar. \
                 Vou te ajudar a organizar sua vida, definir objetivos e manter o foco no \
                 que importa. Antes de começarmos, preciso te conhecer um pouco melhor. \
                 Vamos lá?"
            }
            Self::Name => "Para começar, como você gostaria de ser chamado(a)?",
            Self::Goals => {
                "Prazer em te conhecer! Me conta: quais são seus principais objetivos \
                 atualmente? Pode ser na carreira, saúde, relacionamentos, ou qualquer \
                 área da sua vida."
            }
            Self::Preferences => {
                "Ótimo! Agora preciso saber algumas preferências para te ajudar melhor. \
                 Qual é seu fuso horário? (ex: America/Sao_Paulo)"
            }
            Self::Conclusion => {
                "Perfeito! Seu perfil está configurado. Estou pronto para te ajudar a \
                 alcançar seus objetivos. Vamos começar seu primeiro planejamento?"
            }
        }
    }

    /// Whether responses to this step are validated before advancing.
    pub fn requires_validation(&self) -> bool {
        matches!(self, Self::Name | Self::Goals | Self::Preferences)
    }

    /// Whether this step extracts structured data from the response.
    pub fn extracts_data(&self) -> bool {
        matches!(self, Self::Name | Self::Goals | Self::Preferences)
    }

    /// Key under which extracted data lands in the collected-data map.
    pub fn data_key(&self) -> Option<&'static str> {
        match self {
            Self::Name => Some("name"),
            Self::Goals => Some("goals"),
            Self::Preferences => Some("preferences"),
            Self::Welcome | Self::Conclusion => None,
        }
    }

    /// The next step in the sequence, or `None` after `Conclusion`.
    pub fn next(&self) -> Option<OnboardingStep> {
        match self {
            Self::Welcome => Some(Self::Name),
            Self::Name => Some(Self::Goals),
            Self::Goals => Some(Self::Preferences),
            Self::Preferences => Some(Self::Conclusion),
            Self::Conclusion => None,
        }
    }

    /// Static progress percentage for this step. A completed session is 100.
    pub fn progress_percent(&self) -> u8 {
        match self {
            Self::Welcome => 0,
            Self::Name => 20,
            Self::Goals => 40,
            Self::Preferences => 60,
            Self::Conclusion => 80,
        }
    }

    /// Parse a persisted step name.
    pub fn parse(s: &str) -> Option<OnboardingStep> {
        match s {
            "welcome" => Some(Self::Welcome),
            "name" => Some(Self::Name),
            "goals" => Some(Self::Goals),
            "preferences" => Some(Self::Preferences),
            "conclusion" => Some(Self::Conclusion),
            _ => None,
        }
    }
}

impl std::fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Welcome => "welcome",
            Self::Name => "name",
            Self::Goals => "goals",
            Self::Preferences => "preferences",
            Self::Conclusion => "conclusion",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_walks_whole_sequence() {
        let mut current = OnboardingStep::Welcome;
        let mut visited = vec![current];
        while let Some(next) = current.next() {
            visited.push(next);
            current = next;
        }
        assert_eq!(visited, STEP_SEQUENCE);
        assert!(OnboardingStep::Conclusion.next().is_none());
    }

    #[test]
    fn every_step_but_conclusion_has_successor() {
        for step in STEP_SEQUENCE {
            if step == OnboardingStep::Conclusion {
                assert!(step.next().is_none());
            } else {
                assert!(step.next().is_some(), "{step} should have a successor");
            }
        }
    }

    #[test]
    fn extracting_steps_declare_a_data_key() {
        for step in STEP_SEQUENCE {
            assert_eq!(step.extracts_data(), step.data_key().is_some());
        }
    }

    #[test]
    fn progress_is_monotonic() {
        let percents: Vec<u8> = STEP_SEQUENCE.iter().map(|s| s.progress_percent()).collect();
        assert_eq!(percents, vec![0, 20, 40, 60, 80]);
    }

    #[test]
    fn display_matches_serde_and_parse() {
        for step in STEP_SEQUENCE {
            let display = format!("{step}");
            let json = serde_json::to_string(&step).unwrap();
            assert_eq!(format!("\"{display}\""), json);
            assert_eq!(OnboardingStep::parse(&display), Some(step));
        }
        assert!(OnboardingStep::parse("bogus").is_none());
    }
}
