//! Trivia questions for /quiz
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::{bail, Result};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use serde::Deserialize;

pub const LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

#[derive(Debug, Clone, Deserialize)]
pub struct Trivia {
    pub question: String,
    pub choices: Vec<String>,
    /// Index into `choices` of the right answer
    pub answer: usize,
}

impl Trivia {
    pub fn validate(&self) -> Result<()> {
        if self.choices.len() != LETTERS.len() {
            bail!(
                "trivia question '{}' has {} choices, expected {}",
                self.question,
                self.choices.len(),
                LETTERS.len()
            );
        }
        if self.answer >= self.choices.len() {
            bail!("trivia question '{}' has answer out of range", self.question);
        }
        Ok(())
    }
}

/// A question with its choices in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRound {
    pub question: String,
    pub choices: Vec<String>,
    /// Button index holding the right answer
    pub correct: usize,
}

impl QuizRound {
    /// Shuffle a question's choices
    pub fn shuffled<R: Rng + ?Sized>(trivia: &Trivia, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..trivia.choices.len()).collect();
        order.shuffle(rng);

        let correct = order
            .iter()
            .position(|&index| index == trivia.answer)
            .unwrap_or(0);
        let choices = order
            .iter()
            .map(|&index| trivia.choices[index].clone())
            .collect();

        Self {
            question: trivia.question.clone(),
            choices,
            correct,
        }
    }

    /// Message body: bold question followed by one line per lettered choice
    pub fn render(&self) -> String {
        let lines: Vec<String> = self
            .choices
            .iter()
            .zip(LETTERS)
            .map(|(choice, letter)| {
                format!(
                    ":regional_indicator_{}: {choice}",
                    letter.to_ascii_lowercase()
                )
            })
            .collect();
        format!("**{}**\n\n>>> {}", self.question, lines.join("\n"))
    }
}

/// Pick a random question, if there are any
pub fn pick<'a, R: Rng + ?Sized>(questions: &'a [Trivia], rng: &mut R) -> Option<&'a Trivia> {
    questions.choose(rng)
}

/// Followup text after an answer button is pressed
pub fn verdict(correct: usize, chosen: usize) -> String {
    let letter = LETTERS.get(correct).copied().unwrap_or('?');
    let answer = format!("The answer was **{letter}**.");
    if correct == chosen {
        format!("Correct! {answer}")
    } else {
        format!("Incorrect! {answer} Better luck next time.")
    }
}
