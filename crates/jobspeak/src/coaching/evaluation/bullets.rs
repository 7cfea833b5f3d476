use super::config::RubricConfig;
use super::rules::AnswerSignals;
use super::RubricScores;

pub(crate) fn feedback_bullets(
    scores: &RubricScores,
    signals: &AnswerSignals,
    config: &RubricConfig,
) -> Vec<String> {
    let mut bullets: Vec<&str> = Vec::new();

    if scores.clarity < 15 {
        if signals.word_count < config.ideal_words.0 {
            bullets.push("Provide more detail in your answer (aim for 50-200 words)");
        } else if signals.word_count > config.ideal_words.1 {
            bullets.push("Keep your answer more concise and focused");
        } else if signals.filler_count > 2 {
            bullets.push("Cut filler words like \"um\" and \"basically\" so your point lands");
        }
    } else if scores.clarity >= 20 {
        bullets.push("Clear and well-articulated response");
    }

    if scores.structure < 15 {
        bullets.push("Use the STAR format: Situation, Task, Action, Result");
    } else if scores.structure >= 20 {
        bullets.push("Well-structured answer with clear flow");
    }

    if scores.metrics < 10 {
        bullets.push("Include specific numbers, percentages, or measurable outcomes");
    } else if scores.metrics >= 15 {
        bullets.push("Good use of quantifiable results and metrics");
    }

    if scores.relevance < 15 {
        bullets.push("Make sure to directly address the question asked");
    } else if scores.relevance >= 20 {
        bullets.push("Answer directly addresses the question");
    }

    if bullets.is_empty() {
        bullets.push("Solid answer overall");
    }

    bullets.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(word_count: usize, filler_count: usize) -> AnswerSignals {
        AnswerSignals {
            word_count,
            sentence_count: 2,
            filler_count,
            star_components: 0,
            has_digits: false,
        }
    }

    #[test]
    fn weak_answers_get_corrective_bullets() {
        let scores = RubricScores {
            clarity: 8,
            structure: 0,
            metrics: 0,
            relevance: 15,
        };
        let bullets = feedback_bullets(&scores, &signals(6, 0), &RubricConfig::default());
        assert_eq!(
            bullets,
            vec![
                "Provide more detail in your answer (aim for 50-200 words)",
                "Use the STAR format: Situation, Task, Action, Result",
                "Include specific numbers, percentages, or measurable outcomes",
            ]
        );
    }

    #[test]
    fn middling_answers_get_encouragement() {
        let scores = RubricScores {
            clarity: 18,
            structure: 15,
            metrics: 10,
            relevance: 15,
        };
        let bullets = feedback_bullets(&scores, &signals(80, 0), &RubricConfig::default());
        assert_eq!(bullets, vec!["Solid answer overall"]);
    }
}
