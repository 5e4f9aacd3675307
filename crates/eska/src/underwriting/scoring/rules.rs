use super::domain::{ApplicantProfile, EducationLevel, ScoreComponent, ScoreFactor, BASE_SCORE};

/// One row of a rule table: the first row whose predicate holds awards its points.
pub(crate) struct Rule<T> {
    pub applies: fn(&T) -> bool,
    pub points: i16,
}

const fn rule<T>(applies: fn(&T) -> bool, points: i16) -> Rule<T> {
    Rule { applies, points }
}

pub(crate) const INCOME_RULES: &[Rule<f64>] = &[
    rule(|income| *income < 500.0, 0),
    rule(|income| *income < 1000.0, 50),
    rule(|income| *income < 2000.0, 100),
    rule(|income| *income < 5000.0, 150),
    rule(|_| true, 200),
];

pub(crate) const DEBT_TO_INCOME_RULES: &[Rule<f64>] = &[
    rule(|dti| *dti > 60.0, -100),
    rule(|dti| *dti >= 40.0, -50),
    rule(|dti| *dti >= 20.0, 50),
    rule(|_| true, 100),
];

pub(crate) const JOB_STABILITY_RULES: &[Rule<u32>] = &[
    rule(|months| *months < 6, 20),
    rule(|months| *months < 12, 50),
    rule(|months| *months < 24, 80),
    rule(|_| true, 100),
];

pub(crate) const AGE_RULES: &[Rule<i32>] = &[
    rule(|age| (18..=25).contains(age), 30),
    rule(|age| (26..=35).contains(age), 50),
    rule(|age| (36..=50).contains(age), 60),
    rule(|_| true, 40),
];

pub(crate) const EDUCATION_RULES: &[Rule<EducationLevel>] = &[
    rule(|level| *level == EducationLevel::Secundaria, 20),
    rule(|level| *level == EducationLevel::TecnicaTerciaria, 40),
    rule(|level| *level == EducationLevel::Universitaria, 60),
    rule(|level| *level == EducationLevel::Postgrado, 80),
    rule(|_| true, 20),
];

pub(crate) const HOME_OWNERSHIP_POINTS: i16 = 50;
pub(crate) const MISSING_CREDIT_HISTORY_POINTS: i16 = -110;

/// Every table ends in a catch-all row, so a miss only happens on a malformed table.
pub(crate) fn points_for<T>(rules: &[Rule<T>], value: &T) -> i16 {
    rules
        .iter()
        .find(|rule| (rule.applies)(value))
        .map(|rule| rule.points)
        .unwrap_or(0)
}

/// Evaluate every factor in order, returning the breakdown and the unclamped total.
pub(crate) fn score_profile(
    profile: &ApplicantProfile,
    reference_year: i32,
) -> (Vec<ScoreComponent>, i32) {
    let mut components = Vec::with_capacity(7);

    let income = profile.monthly_income;
    components.push(ScoreComponent {
        factor: ScoreFactor::MonthlyIncome,
        points: points_for(INCOME_RULES, &income),
        detail: format!("${income}"),
    });

    let dti = profile.debt_to_income();
    components.push(ScoreComponent {
        factor: ScoreFactor::DebtToIncome,
        points: points_for(DEBT_TO_INCOME_RULES, &dti),
        detail: format!("{dti:.1}% DTI"),
    });

    let job_months = profile.job_months();
    components.push(ScoreComponent {
        factor: ScoreFactor::JobStability,
        points: points_for(JOB_STABILITY_RULES, &job_months),
        detail: format!("{job_months} meses en trabajo actual"),
    });

    let birth_year = profile
        .birth_year
        .unwrap_or_else(|| reference_year.saturating_sub(30));
    let age = reference_year.saturating_sub(birth_year);
    components.push(ScoreComponent {
        factor: ScoreFactor::Age,
        points: points_for(AGE_RULES, &age),
        detail: format!("{age} años"),
    });

    components.push(ScoreComponent {
        factor: ScoreFactor::Education,
        points: points_for(EDUCATION_RULES, &profile.education_level),
        detail: profile.education_level.label().to_string(),
    });

    components.push(ScoreComponent {
        factor: ScoreFactor::HomeOwnership,
        points: if profile.owns_home {
            HOME_OWNERSHIP_POINTS
        } else {
            0
        },
        detail: if profile.owns_home { "Sí" } else { "No" }.to_string(),
    });

    // Only the penalty is recorded; an applicant with history gets no entry.
    if !profile.has_credit_history() {
        components.push(ScoreComponent {
            factor: ScoreFactor::MissingCreditHistory,
            points: MISSING_CREDIT_HISTORY_POINTS,
            detail: "Se mejorará con tu primer préstamo".to_string(),
        });
    }

    let total = BASE_SCORE
        + components
            .iter()
            .map(|component| i32::from(component.points))
            .sum::<i32>();

    (components, total)
}
