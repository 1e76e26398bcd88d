use crate::domain::model::{GradeBadge, GradeTier, UNGRADED};

/// Leading integer of a grade string, the way a lenient number parser reads it
/// (`"9.5"` -> 9, `" 8"` -> 8, `"abc"` -> None).
fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Badge label and colour tier for a PSA grade.
///
/// Grades 7 and below share one tier with anything that is not a number.
pub fn classify_grade(psa_grade: &str) -> GradeBadge {
    if psa_grade == UNGRADED {
        return GradeBadge {
            label: UNGRADED.to_string(),
            tier: GradeTier::Ungraded,
        };
    }

    let tier = match leading_integer(psa_grade) {
        Some(10) => GradeTier::Ten,
        Some(9) => GradeTier::Nine,
        Some(8) => GradeTier::Eight,
        _ => GradeTier::SevenOrBelow,
    };

    GradeBadge {
        label: format!("PSA {}", psa_grade),
        tier,
    }
}
