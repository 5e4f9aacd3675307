use std::io::Read;

use serde::{Deserialize, Deserializer, Serialize};

use super::domain::{ApplicantProfile, EducationLevel, ScoreResult};

/// Affirmative answer used by the yes/no selects of the profile form.
pub const AFFIRMATIVE: &str = "Sí";
/// Housing type that counts as home ownership.
pub const OWNED_HOUSING: &str = "Propia";

/// Profile form values as the backend's `/users/me/profile` endpoint expects them.
///
/// Every answer travels as an optional string; `score` and `score_category`
/// are filled locally once the engine has run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSubmission {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub dob_day: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub dob_month: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub dob_year: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub work_situation: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub employer: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub seniority_years: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub seniority_months: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub monthly_income: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub has_debts: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub total_debts: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub has_credit_card: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub housing_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub education_level: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub profession: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub document_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub document_number: Option<String>,
    #[serde(default)]
    pub score: Option<u16>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub score_category: Option<String>,
}

impl ProfileSubmission {
    /// Coerce the raw answers into a profile the engine can score.
    ///
    /// Numbers are read the way the form reads them: leading digits win,
    /// anything unparseable counts as zero, and a zero or missing birth year
    /// falls back to the engine default.
    pub fn to_profile(&self) -> ApplicantProfile {
        ApplicantProfile {
            monthly_income: lenient_amount(self.monthly_income.as_deref()),
            total_monthly_debts: lenient_amount(self.total_debts.as_deref()),
            seniority_years: lenient_count(self.seniority_years.as_deref()),
            seniority_months: lenient_count(self.seniority_months.as_deref()),
            birth_year: self
                .dob_year
                .as_deref()
                .and_then(leading_integer)
                .filter(|year| *year != 0)
                .and_then(|year| i32::try_from(year).ok()),
            education_level: EducationLevel::from_label(
                self.education_level.as_deref().unwrap_or_default(),
            ),
            owns_home: self.housing_type.as_deref() == Some(OWNED_HOUSING),
            has_credit_card: self.has_credit_card.as_deref() == Some(AFFIRMATIVE),
            has_debts: self.has_debts.as_deref() == Some(AFFIRMATIVE),
        }
    }

    /// Attach the locally computed score so the payload can be published.
    pub fn with_score(mut self, result: &ScoreResult) -> Self {
        self.score = Some(result.score);
        self.score_category = Some(result.category.label().to_string());
        self
    }
}

/// Read a batch of submissions from a CSV export using the payload column names.
pub fn load_submissions<R: Read>(reader: R) -> Result<Vec<ProfileSubmission>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<ProfileSubmission>()
        .collect::<Result<Vec<_>, _>>()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Non-negative, finite amount; anything else is zero.
fn lenient_amount(raw: Option<&str>) -> f64 {
    raw.and_then(leading_decimal)
        .filter(|value| value.is_finite() && *value > 0.0)
        .unwrap_or(0.0)
}

fn lenient_count(raw: Option<&str>) -> u32 {
    raw.and_then(leading_integer)
        .map(|value| value.clamp(0, i64::from(u32::MAX)) as u32)
        .unwrap_or(0)
}

/// Longest leading prefix that reads as a signed integer, e.g. `"2.9"` -> 2.
pub(crate) fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['-', '+']));
    let digits = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();

    if digits == 0 {
        return None;
    }

    let prefix = &trimmed[..sign_len + digits];
    match prefix.parse::<i64>() {
        Ok(value) => Some(value),
        // Too many digits for i64: saturate in the direction of the sign.
        Err(_) if prefix.starts_with('-') => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

/// Longest leading prefix that reads as a decimal, e.g. `"1500abc"` -> 1500.0
/// and `"1e3"` -> 1000.0.
pub(crate) fn leading_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = usize::from(trimmed.starts_with(['-', '+']));
    let mut digits = 0;
    let mut seen_point = false;

    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => digits += 1,
            b'.' if !seen_point => seen_point = true,
            _ => break,
        }
        end += 1;
    }

    if digits == 0 {
        return None;
    }

    // An exponent only counts when at least one digit follows it.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut cursor = end + 1;
        if matches!(bytes.get(cursor), Some(b'-' | b'+')) {
            cursor += 1;
        }
        let exponent_digits = bytes[cursor.min(bytes.len())..]
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count();
        if exponent_digits > 0 {
            end = cursor + exponent_digits;
        }
    }

    let mut prefix = &trimmed[..end];
    if let Some(stripped) = prefix.strip_suffix('.') {
        prefix = stripped;
    }
    prefix.parse::<f64>().ok()
}
