use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "quiz.ts")]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
}

impl std::fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionKind::MultipleChoice => write!(f, "multiple_choice"),
            QuestionKind::TrueFalse => write!(f, "true_false"),
            QuestionKind::ShortAnswer => write!(f, "short_answer"),
        }
    }
}

impl std::str::FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multiple_choice" => Ok(QuestionKind::MultipleChoice),
            "true_false" => Ok(QuestionKind::TrueFalse),
            "short_answer" => Ok(QuestionKind::ShortAnswer),
            _ => Err(format!("Invalid question kind: {s}")),
        }
    }
}

// 测验
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "quiz.ts")]
pub struct Quiz {
    pub id: i64,
    pub offered_course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub opens_at: chrono::DateTime<chrono::Utc>,
    pub closes_at: chrono::DateTime<chrono::Utc>,
    pub time_limit_minutes: Option<i32>,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Quiz {
    /// 作答窗口为 [opens_at, closes_at)
    pub fn is_open_at(&self, at: chrono::DateTime<chrono::Utc>) -> bool {
        self.opens_at <= at && at < self.closes_at
    }
}

// 题目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "quiz.ts")]
pub struct Question {
    pub id: i64,
    pub quiz_id: i64,
    pub kind: QuestionKind,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: Option<String>,
    pub points: f64,
    pub position: i32,
}

impl Question {
    /// 自动判分，返回 (是否正确, 得分)；无参考答案的简答题返回 None 等待人工评分
    pub fn auto_grade(&self, answer: &str) -> Option<(bool, f64)> {
        let expected = self.correct_answer.as_deref()?;
        let correct = match self.kind {
            QuestionKind::MultipleChoice => answer.trim() == expected.trim(),
            QuestionKind::TrueFalse | QuestionKind::ShortAnswer => {
                answer.trim().eq_ignore_ascii_case(expected.trim())
            }
        };
        Some((correct, if correct { self.points } else { 0.0 }))
    }

    /// 学生视图：隐藏参考答案
    pub fn without_answer(mut self) -> Self {
        self.correct_answer = None;
        self
    }
}

/// 校验题目定义
pub fn validate_question(
    kind: QuestionKind,
    options: &[String],
    correct_answer: Option<&str>,
    points: f64,
) -> Result<(), String> {
    if !(points > 0.0) {
        return Err("Question points must be greater than 0".to_string());
    }

    match kind {
        QuestionKind::MultipleChoice => {
            let distinct: std::collections::HashSet<&str> =
                options.iter().map(|o| o.trim()).collect();
            if options.len() < 2 || distinct.len() != options.len() {
                return Err("Multiple choice questions need at least 2 distinct options".into());
            }
            match correct_answer {
                Some(answer) if distinct.contains(answer.trim()) => Ok(()),
                _ => Err("Correct answer must be one of the options".into()),
            }
        }
        QuestionKind::TrueFalse => match correct_answer.map(|a| a.trim().to_ascii_lowercase()) {
            Some(a) if a == "true" || a == "false" => Ok(()),
            _ => Err("True/false questions need a correct answer of 'true' or 'false'".into()),
        },
        QuestionKind::ShortAnswer => Ok(()),
    }
}

// 学生答案
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "quiz.ts")]
pub struct StudentAnswer {
    pub id: i64,
    pub quiz_id: i64,
    pub question_id: i64,
    pub student_id: i64,
    pub answer: String,
    /// None 表示待人工评分
    pub is_correct: Option<bool>,
    pub points_awarded: Option<f64>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub graded_by: Option<i64>,
}

/// 写入前的答案
#[derive(Debug, Clone)]
pub struct NewAnswer {
    pub question_id: i64,
    pub answer: String,
    pub is_correct: Option<bool>,
    pub points_awarded: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(kind: QuestionKind, correct: Option<&str>) -> Question {
        Question {
            id: 1,
            quiz_id: 1,
            kind,
            prompt: "?".into(),
            options: vec!["a".into(), "b".into()],
            correct_answer: correct.map(String::from),
            points: 5.0,
            position: 1,
        }
    }

    #[test]
    fn test_auto_grade_multiple_choice() {
        let q = question(QuestionKind::MultipleChoice, Some("b"));
        assert_eq!(q.auto_grade("b"), Some((true, 5.0)));
        assert_eq!(q.auto_grade(" b "), Some((true, 5.0)));
        assert_eq!(q.auto_grade("a"), Some((false, 0.0)));
    }

    #[test]
    fn test_auto_grade_case_insensitive_text() {
        let tf = question(QuestionKind::TrueFalse, Some("true"));
        assert_eq!(tf.auto_grade("TRUE"), Some((true, 5.0)));

        let short = question(QuestionKind::ShortAnswer, Some("Ownership"));
        assert_eq!(short.auto_grade("  ownership "), Some((true, 5.0)));

        let open = question(QuestionKind::ShortAnswer, None);
        assert_eq!(open.auto_grade("anything"), None);
    }

    #[test]
    fn test_validate_question() {
        let opts = vec!["x".to_string(), "y".to_string()];
        assert!(validate_question(QuestionKind::MultipleChoice, &opts, Some("x"), 1.0).is_ok());
        assert!(validate_question(QuestionKind::MultipleChoice, &opts, Some("z"), 1.0).is_err());
        assert!(
            validate_question(
                QuestionKind::MultipleChoice,
                &["x".to_string(), "x".to_string()],
                Some("x"),
                1.0
            )
            .is_err()
        );
        assert!(validate_question(QuestionKind::TrueFalse, &[], Some("False"), 1.0).is_ok());
        assert!(validate_question(QuestionKind::TrueFalse, &[], Some("yes"), 1.0).is_err());
        assert!(validate_question(QuestionKind::ShortAnswer, &[], None, 1.0).is_ok());
        assert!(validate_question(QuestionKind::ShortAnswer, &[], None, 0.0).is_err());
    }

    #[test]
    fn test_quiz_window_is_half_open() {
        let now = chrono::Utc::now();
        let quiz = Quiz {
            id: 1,
            offered_course_id: 1,
            title: "Q".into(),
            description: None,
            opens_at: now,
            closes_at: now + chrono::Duration::minutes(30),
            time_limit_minutes: None,
            created_by: 1,
            created_at: now,
        };
        assert!(quiz.is_open_at(now));
        assert!(!quiz.is_open_at(quiz.closes_at));
    }
}
