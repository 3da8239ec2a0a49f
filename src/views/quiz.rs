//! Quiz summary. Questions are listed but not answered or scored.

use crate::model::Quiz;
use crate::render::escape_html;

pub fn render_quiz(quiz: &Quiz, product_name: Option<&str>) -> String {
    let name = product_name.filter(|n| !n.is_empty());
    let mut html = format!(
        "<div id=\"quiz\"><p class=\"eyebrow\">{} Knowledge Check</p><h1>Quiz</h1>",
        escape_html(name.unwrap_or("Product"))
    );
    let product = escape_html(name.unwrap_or("this product"));

    if quiz.questions.is_empty() {
        html.push_str(&format!(
            "<p class=\"text-muted-foreground\">No quiz questions available for {product} yet.</p>"
        ));
    } else {
        let count = quiz.questions.len();
        let plural = if count == 1 { "" } else { "s" };
        html.push_str(&format!(
            "<div class=\"quiz-intro\">\
             <p class=\"lead\">Test your understanding of the prescribing information for {product}.</p>\
             <p>This quiz contains <strong>{count} question{plural}</strong>. \
             You need to score at least <strong>{}%</strong> to pass.</p>\
             <div class=\"quiz-placeholder\">\
             <p class=\"text-muted-foreground\">Quiz functionality coming soon. Questions will cover:</p><ul>",
            quiz.pass_pct
        ));
        for (i, question) in quiz.questions.iter().enumerate() {
            html.push_str(&format!(
                "<li class=\"text-muted-foreground\">Question {}: {}</li>",
                i + 1,
                question.kind.label()
            ));
        }
        html.push_str("</ul></div></div>");
    }

    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuestionKind, QuizQuestion};

    fn question(id: &str, kind: QuestionKind) -> QuizQuestion {
        QuizQuestion {
            id: id.into(),
            kind,
            prompt: "?".into(),
            choices: vec![],
            answer: vec![],
            explanation: None,
        }
    }

    #[test]
    fn test_summary() {
        let quiz = Quiz {
            pass_pct: 80.0,
            questions: vec![
                question("q1", QuestionKind::Single),
                question("q2", QuestionKind::Multiple),
                question("q3", QuestionKind::Boolean),
            ],
        };
        let html = render_quiz(&quiz, Some("Navsunli"));
        assert!(html.contains("Navsunli Knowledge Check"));
        assert!(html.contains("<strong>3 questions</strong>"));
        assert!(html.contains("You need to score at least <strong>80%</strong> to pass."));
        assert!(html.contains("Question 1: Single choice"));
        assert!(html.contains("Question 2: Multiple choice"));
        assert!(html.contains("Question 3: True/False"));
    }

    #[test]
    fn test_singular_and_empty() {
        let quiz = Quiz {
            pass_pct: 50.0,
            questions: vec![question("q1", QuestionKind::Boolean)],
        };
        assert!(render_quiz(&quiz, None).contains("<strong>1 question</strong>"));

        let half = Quiz {
            pass_pct: 80.5,
            ..quiz
        };
        assert!(render_quiz(&half, None).contains("at least <strong>80.5%</strong>"));

        let html = render_quiz(&Quiz::default(), None);
        assert!(html.contains("Product Knowledge Check"));
        assert!(html.contains("No quiz questions available for this product yet."));
    }
}
