use serde::{Deserialize, Serialize};

/// Lower bound of the published score range.
pub const MIN_SCORE: u16 = 300;
/// Upper bound of the published score range.
pub const MAX_SCORE: u16 = 850;
/// Starting point before any factor is applied.
pub const BASE_SCORE: i32 = 500;

/// Sanitized applicant attributes consumed by the score engine.
///
/// Built fresh for each evaluation, usually through
/// [`ProfileSubmission::to_profile`](super::intake::ProfileSubmission::to_profile).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub monthly_income: f64,
    pub total_monthly_debts: f64,
    pub seniority_years: u32,
    pub seniority_months: u32,
    /// Falls back to thirty years before the reference year when absent.
    pub birth_year: Option<i32>,
    pub education_level: EducationLevel,
    pub owns_home: bool,
    pub has_credit_card: bool,
    pub has_debts: bool,
}

impl ApplicantProfile {
    pub fn job_months(&self) -> u32 {
        self.seniority_years
            .saturating_mul(12)
            .saturating_add(self.seniority_months)
    }

    pub fn has_credit_history(&self) -> bool {
        self.has_credit_card || self.has_debts
    }

    /// Debt-to-income as a percentage; zero when there is no income to divide by.
    pub fn debt_to_income(&self) -> f64 {
        if self.monthly_income > 0.0 {
            self.total_monthly_debts / self.monthly_income * 100.0
        } else {
            0.0
        }
    }
}

impl Default for ApplicantProfile {
    fn default() -> Self {
        Self {
            monthly_income: 0.0,
            total_monthly_debts: 0.0,
            seniority_years: 0,
            seniority_months: 0,
            birth_year: None,
            education_level: EducationLevel::Other(String::new()),
            owns_home: false,
            has_credit_card: false,
            has_debts: false,
        }
    }
}

/// Highest completed education level as offered by the profile form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EducationLevel {
    Secundaria,
    TecnicaTerciaria,
    Universitaria,
    Postgrado,
    /// Anything the form does not offer, including an empty answer.
    Other(String),
}

impl EducationLevel {
    /// Exact, case-sensitive match against the form labels.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Secundaria" => Self::Secundaria,
            "Técnica/Terciaria" => Self::TecnicaTerciaria,
            "Universitaria" => Self::Universitaria,
            "Postgrado" => Self::Postgrado,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Secundaria => "Secundaria",
            Self::TecnicaTerciaria => "Técnica/Terciaria",
            Self::Universitaria => "Universitaria",
            Self::Postgrado => "Postgrado",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for EducationLevel {
    fn from(value: String) -> Self {
        Self::from_label(&value)
    }
}

impl From<EducationLevel> for String {
    fn from(value: EducationLevel) -> Self {
        value.label().to_string()
    }
}

/// Factors that contribute to the score, in evaluation order.
///
/// Serialized through [`ScoreFactor::label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum ScoreFactor {
    MonthlyIncome,
    DebtToIncome,
    JobStability,
    Age,
    Education,
    HomeOwnership,
    MissingCreditHistory,
}

impl ScoreFactor {
    pub const ALL: [ScoreFactor; 7] = [
        ScoreFactor::MonthlyIncome,
        ScoreFactor::DebtToIncome,
        ScoreFactor::JobStability,
        ScoreFactor::Age,
        ScoreFactor::Education,
        ScoreFactor::HomeOwnership,
        ScoreFactor::MissingCreditHistory,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ScoreFactor::MonthlyIncome => "Ingresos mensuales",
            ScoreFactor::DebtToIncome => "Ratio deuda/ingreso",
            ScoreFactor::JobStability => "Estabilidad laboral",
            ScoreFactor::Age => "Edad",
            ScoreFactor::Education => "Nivel educativo",
            ScoreFactor::HomeOwnership => "Vivienda propia",
            ScoreFactor::MissingCreditHistory => "Sin historial crediticio largo",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|factor| factor.label() == label)
    }
}

impl From<ScoreFactor> for &'static str {
    fn from(value: ScoreFactor) -> Self {
        value.label()
    }
}

impl TryFrom<String> for ScoreFactor {
    type Error = UnknownLabel;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_label(&value).ok_or(UnknownLabel(value))
    }
}

/// Discrete contribution to a score, kept for display and audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: i16,
    pub detail: String,
}

/// Risk band derived from the clamped score.
///
/// Serialized through [`ScoreCategory::label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum ScoreCategory {
    HighRisk,
    Fair,
    Good,
    VeryGood,
    Excellent,
}

impl ScoreCategory {
    pub const ALL: [ScoreCategory; 5] = [
        ScoreCategory::HighRisk,
        ScoreCategory::Fair,
        ScoreCategory::Good,
        ScoreCategory::VeryGood,
        ScoreCategory::Excellent,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ScoreCategory::HighRisk => "Riesgo Alto",
            ScoreCategory::Fair => "Regular",
            ScoreCategory::Good => "Bueno",
            ScoreCategory::VeryGood => "Muy Bueno",
            ScoreCategory::Excellent => "Excelente",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.label() == label)
    }
}

impl From<ScoreCategory> for &'static str {
    fn from(value: ScoreCategory) -> Self {
        value.label()
    }
}

impl TryFrom<String> for ScoreCategory {
    type Error = UnknownLabel;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_label(&value).ok_or(UnknownLabel(value))
    }
}

/// A display label that names no known factor or category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown label '{0}'")]
pub struct UnknownLabel(pub String);

/// Engine output: clamped score, its category, and the ordered breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u16,
    pub category: ScoreCategory,
    pub breakdown: Vec<ScoreComponent>,
}

impl ScoreResult {
    /// Sum of every recorded contribution, before clamping.
    pub fn raw_total(&self) -> i32 {
        BASE_SCORE
            + self
                .breakdown
                .iter()
                .map(|component| i32::from(component.points))
                .sum::<i32>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_serde() {
        for category in ScoreCategory::ALL {
            let value = serde_json::to_value(category).expect("serializes");
            assert_eq!(value, category.label());
            let back: ScoreCategory = serde_json::from_value(value).expect("deserializes");
            assert_eq!(back, category);
        }
        for factor in ScoreFactor::ALL {
            let back: ScoreFactor =
                serde_json::from_value(serde_json::to_value(factor).expect("serializes"))
                    .expect("deserializes");
            assert_eq!(back, factor);
        }
    }

    #[test]
    fn unknown_labels_are_rejected() {
        assert!(serde_json::from_str::<ScoreCategory>("\"Excellent\"").is_err());
        assert_eq!(ScoreFactor::from_label("Edad"), Some(ScoreFactor::Age));
        assert_eq!(ScoreFactor::from_label("edad"), None);
    }
}
