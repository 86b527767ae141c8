use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::attributes::AttributeMap;

/// 权重总和允许的误差
pub const WEIGHT_TOLERANCE: f64 = 0.01;

/// EAV 属性前缀
pub const COMPONENT_PREFIX: &str = "component.";
pub const SCORE_PREFIX: &str = "score.";

// 成绩组成项（如 midterm 30%）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeComponent {
    pub name: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "grade.ts")]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    pub fn from_total(total: f64) -> Self {
        if total >= 90.0 {
            LetterGrade::A
        } else if total >= 80.0 {
            LetterGrade::B
        } else if total >= 70.0 {
            LetterGrade::C
        } else if total >= 60.0 {
            LetterGrade::D
        } else {
            LetterGrade::F
        }
    }

    pub fn grade_points(&self) -> f64 {
        match self {
            LetterGrade::A => 4.0,
            LetterGrade::B => 3.0,
            LetterGrade::C => 2.0,
            LetterGrade::D => 1.0,
            LetterGrade::F => 0.0,
        }
    }

    pub fn is_passing(&self) -> bool {
        *self != LetterGrade::F
    }
}

impl std::fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LetterGrade::A => "A",
            LetterGrade::B => "B",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for LetterGrade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(LetterGrade::A),
            "B" => Ok(LetterGrade::B),
            "C" => Ok(LetterGrade::C),
            "D" => Ok(LetterGrade::D),
            "F" => Ok(LetterGrade::F),
            _ => Err(format!("Invalid letter grade: {s}")),
        }
    }
}

/// 校验成绩组成：名称非空且唯一，权重为正且总和为 100
pub fn validate_components(components: &[GradeComponent]) -> Result<(), String> {
    if components.is_empty() {
        return Err("At least one grade component is required".to_string());
    }

    let mut seen = std::collections::HashSet::new();
    for c in components {
        if c.name.is_empty()
            || !c
                .name
                .chars()
                .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_')
        {
            return Err(format!(
                "Invalid component name '{}': use lowercase letters, digits and underscores",
                c.name
            ));
        }
        if !seen.insert(c.name.as_str()) {
            return Err(format!("Duplicate component name '{}'", c.name));
        }
        if !(c.weight > 0.0 && c.weight <= 100.0) {
            return Err(format!(
                "Weight of '{}' must be in (0, 100], got {}",
                c.name, c.weight
            ));
        }
    }

    let sum: f64 = components.iter().map(|c| c.weight).sum();
    if (sum - 100.0).abs() > WEIGHT_TOLERANCE {
        return Err(format!("Component weights must sum to 100, got {sum}"));
    }
    Ok(())
}

/// 加权总分，缺失的分数按 0 计
pub fn weighted_total(components: &[GradeComponent], scores: &HashMap<String, f64>) -> f64 {
    let total: f64 = components
        .iter()
        .map(|c| scores.get(&c.name).copied().unwrap_or(0.0) * c.weight / 100.0)
        .sum();
    (total * 100.0).round() / 100.0
}

/// 按学分加权的 GPA
pub fn credit_weighted_gpa<I>(entries: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, i32)>,
{
    let mut points = 0.0_f64;
    let mut credits = 0_i64;
    for (grade_points, course_credits) in entries {
        points += grade_points * course_credits as f64;
        credits += course_credits as i64;
    }
    if credits == 0 {
        None
    } else {
        Some((points / credits as f64 * 100.0).round() / 100.0)
    }
}

/// 从开课属性中取出成绩组成，按名称排序
pub fn components_from_attributes(attrs: &AttributeMap) -> Vec<GradeComponent> {
    let mut components: Vec<GradeComponent> = attrs
        .iter()
        .filter_map(|(key, value)| {
            let name = key.strip_prefix(COMPONENT_PREFIX)?;
            Some(GradeComponent {
                name: name.to_string(),
                weight: value.as_f64()?,
            })
        })
        .collect();
    components.sort_by(|a, b| a.name.cmp(&b.name));
    components
}

/// 从选课属性中取出各组成项分数
pub fn scores_from_attributes(attrs: &AttributeMap) -> HashMap<String, f64> {
    attrs
        .iter()
        .filter_map(|(key, value)| {
            let name = key.strip_prefix(SCORE_PREFIX)?;
            Some((name.to_string(), value.as_f64()?))
        })
        .collect()
}

// 最终成绩
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct Grade {
    pub id: i64,
    pub enrollment_id: i64,
    pub total_score: f64,
    pub letter: LetterGrade,
    pub grade_points: f64,
    pub graded_by: i64,
    pub finalized_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comps(items: &[(&str, f64)]) -> Vec<GradeComponent> {
        items
            .iter()
            .map(|(n, w)| GradeComponent {
                name: n.to_string(),
                weight: *w,
            })
            .collect()
    }

    #[test]
    fn test_letter_thresholds() {
        assert_eq!(LetterGrade::from_total(90.0), LetterGrade::A);
        assert_eq!(LetterGrade::from_total(89.99), LetterGrade::B);
        assert_eq!(LetterGrade::from_total(70.0), LetterGrade::C);
        assert_eq!(LetterGrade::from_total(60.0), LetterGrade::D);
        assert_eq!(LetterGrade::from_total(59.9), LetterGrade::F);
        assert_eq!(LetterGrade::B.grade_points(), 3.0);
        assert!(!LetterGrade::F.is_passing());
    }

    #[test]
    fn test_validate_components() {
        assert!(validate_components(&comps(&[("midterm", 40.0), ("final", 60.0)])).is_ok());
        assert!(validate_components(&comps(&[("midterm", 33.33), ("final", 66.67)])).is_ok());
        assert!(validate_components(&comps(&[("midterm", 40.0), ("final", 50.0)])).is_err());
        assert!(validate_components(&comps(&[("a", 50.0), ("a", 50.0)])).is_err());
        assert!(validate_components(&comps(&[("Final", 100.0)])).is_err());
        assert!(validate_components(&comps(&[("x", 0.0), ("y", 100.0)])).is_err());
        assert!(validate_components(&[]).is_err());
    }

    #[test]
    fn test_weighted_total_missing_scores_count_zero() {
        let components = comps(&[("midterm", 40.0), ("final", 60.0)]);
        let mut scores = HashMap::new();
        scores.insert("midterm".to_string(), 80.0);
        assert_eq!(weighted_total(&components, &scores), 32.0);

        scores.insert("final".to_string(), 95.0);
        assert_eq!(weighted_total(&components, &scores), 89.0);
    }

    #[test]
    fn test_components_and_scores_from_attributes() {
        use crate::models::attributes::AttributeValue;

        let mut attrs = AttributeMap::new();
        attrs.insert("component.final".into(), AttributeValue::Decimal(60.0));
        attrs.insert("component.midterm".into(), AttributeValue::Decimal(40.0));
        attrs.insert("score.midterm".into(), AttributeValue::Decimal(75.5));
        attrs.insert("review_note".into(), AttributeValue::Text("ok".into()));

        let components = components_from_attributes(&attrs);
        assert_eq!(components, comps(&[("final", 60.0), ("midterm", 40.0)]));

        let scores = scores_from_attributes(&attrs);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores["midterm"], 75.5);
    }

    #[test]
    fn test_credit_weighted_gpa() {
        assert_eq!(credit_weighted_gpa(vec![(4.0, 3), (2.0, 1)]), Some(3.5));
        assert_eq!(credit_weighted_gpa(Vec::<(f64, i32)>::new()), None);
    }
}
