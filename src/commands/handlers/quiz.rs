//! Quiz command handler
//!
//! Handles: quiz
//!
//! Posts a random trivia question with four lettered answer buttons. The
//! right button index travels in every button's custom id, so answering needs
//! nothing but the click itself.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use serde_json::Value;
use serenity::builder::{CreateApplicationCommand, CreateComponents};
use serenity::model::application::component::ButtonStyle;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::error::{into_message, CommandError};
use crate::commands::handler::{ComponentRoute, SlashCommandHandler};
use crate::commands::slash;
use crate::core::embeds::component_rows;
use crate::features::trivia::{pick, verdict, QuizRound, Trivia, LETTERS};
use crate::interactions::custom_id::{ComponentState, CustomId, CustomIdError};
use crate::interactions::model::{CommandData, ComponentData, Interaction};
use crate::interactions::{InteractionResponse, ReplyData};

pub const ANSWER_KEY: &str = "answer";

const ROUTES: [ComponentRoute; 1] = [ComponentRoute::invoker(ANSWER_KEY)];

/// Component type of a button inside an action row
const BUTTON: u64 = 2;

// Discord button styles
const SECONDARY: u64 = 2;
const SUCCESS: u64 = 3;
const DANGER: u64 = 4;

/// State carried by an answer button: `answer:<correct>:<chosen>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizAction {
    pub correct: usize,
    pub chosen: usize,
}

impl ComponentState for QuizAction {
    fn to_custom_id(&self) -> CustomId {
        CustomId::new(ANSWER_KEY).arg(self.correct).arg(self.chosen)
    }

    fn from_custom_id(id: &CustomId) -> Result<Self, CustomIdError> {
        if id.key != ANSWER_KEY {
            return Err(CustomIdError::UnknownKey(id.key.clone()));
        }
        Ok(Self {
            correct: id.number(0)?,
            chosen: id.number(1)?,
        })
    }
}

pub struct QuizHandler;

fn new_round(questions: &[Trivia]) -> Option<QuizRound> {
    let mut rng = rand::rng();
    pick(questions, &mut rng).map(|trivia| QuizRound::shuffled(trivia, &mut rng))
}

fn render_round(round: &QuizRound) -> Result<ReplyData, CommandError> {
    let mut ids = Vec::with_capacity(LETTERS.len());
    for chosen in 0..LETTERS.len() {
        let action = QuizAction {
            correct: round.correct,
            chosen,
        };
        let id = action
            .encode()
            .map_err(|e| CommandError::Unavailable(format!("Couldn't build the quiz: {e}")))?;
        ids.push(id);
    }

    let mut components = CreateComponents::default();
    components.create_action_row(|row| {
        for (letter, id) in LETTERS.iter().zip(&ids) {
            row.create_button(|button| {
                button
                    .style(ButtonStyle::Primary)
                    .label(letter)
                    .custom_id(id)
            });
        }
        row
    });

    Ok(ReplyData::new()
        .content(round.render())
        .components(component_rows(components)))
}

/// Disable every button of the first row and colour it by the outcome
fn reveal(mut rows: Vec<Value>, action: QuizAction) -> Vec<Value> {
    let buttons = rows
        .first_mut()
        .and_then(|row| row.get_mut("components"))
        .and_then(Value::as_array_mut);

    if let Some(buttons) = buttons {
        for (index, button) in buttons.iter_mut().enumerate() {
            if button.get("type").and_then(Value::as_u64) != Some(BUTTON) {
                continue;
            }
            let style = if index == action.correct {
                SUCCESS
            } else if index == action.chosen {
                DANGER
            } else {
                SECONDARY
            };
            button["disabled"] = Value::Bool(true);
            button["style"] = Value::from(style);
        }
    }
    rows
}

#[async_trait]
impl SlashCommandHandler for QuizHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["quiz"]
    }

    fn declarations(&self) -> Vec<CreateApplicationCommand> {
        slash::quiz::create_commands()
    }

    fn component_routes(&self) -> &'static [ComponentRoute] {
        &ROUTES
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        _interaction: &Interaction,
        _command: &CommandData,
    ) -> Result<InteractionResponse> {
        let result = new_round(&ctx.data.trivia)
            .ok_or_else(|| CommandError::Unavailable("No quiz questions are loaded.".into()))
            .and_then(|round| render_round(&round));
        Ok(into_message(result))
    }

    async fn handle_component(
        &self,
        ctx: Arc<CommandContext>,
        interaction: &Interaction,
        _component: &ComponentData,
        id: &CustomId,
    ) -> Result<InteractionResponse> {
        let action = QuizAction::from_custom_id(id).context("malformed quiz answer id")?;
        let rows = interaction
            .message
            .as_ref()
            .map(|message| message.components.clone())
            .unwrap_or_default();

        info!(
            "Quiz answered by {}: chose {} of correct {}",
            interaction.invoker_id().unwrap_or("unknown"),
            action.chosen,
            action.correct
        );
        ctx.followups.send(
            &interaction.token,
            ReplyData::new()
                .content(verdict(action.correct, action.chosen))
                .ephemeral(),
        );

        Ok(InteractionResponse::update(
            ReplyData::new().components(reveal(rows, action)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{
        command_data, command_interaction, component_data, component_interaction, context,
        context_with, FakeRemote, INVOKER,
    };
    use serde_json::json;

    fn quiz_rows() -> Value {
        json!([{
            "type": 1,
            "components": [
                { "type": 2, "style": 1, "label": "A", "custom_id": "answer:2:0" },
                { "type": 2, "style": 1, "label": "B", "custom_id": "answer:2:1" },
                { "type": 2, "style": 1, "label": "C", "custom_id": "answer:2:2" },
                { "type": 2, "style": 1, "label": "D", "custom_id": "answer:2:3" }
            ]
        }])
    }

    #[test]
    fn test_quiz_action_ids() {
        let action = QuizAction {
            correct: 2,
            chosen: 0,
        };
        assert_eq!(action.encode().unwrap(), "answer:2:0");
        assert_eq!(
            QuizAction::from_custom_id(&CustomId::decode("answer:2:0")).unwrap(),
            action
        );
        assert!(QuizAction::from_custom_id(&CustomId::decode("answer:2")).is_err());
        assert!(QuizAction::from_custom_id(&CustomId::decode("answer:x:1")).is_err());
    }

    #[tokio::test]
    async fn test_quiz_posts_question_with_buttons() {
        let interaction = command_interaction("quiz", json!([]));
        let json = QuizHandler
            .handle(context(), &interaction, command_data(&interaction))
            .await
            .unwrap()
            .to_json();

        let content = json["data"]["content"].as_str().unwrap();
        assert!(content.starts_with("**Which tower pops lead?**"));

        let buttons = json["data"]["components"][0]["components"].as_array().unwrap();
        assert_eq!(buttons.len(), 4);
        let labels: Vec<&str> = buttons.iter().map(|b| b["label"].as_str().unwrap()).collect();
        assert_eq!(labels, vec!["A", "B", "C", "D"]);

        // every button agrees on where the right answer is
        let ids: Vec<QuizAction> = buttons
            .iter()
            .map(|b| {
                QuizAction::from_custom_id(&CustomId::decode(b["custom_id"].as_str().unwrap()))
                    .unwrap()
            })
            .collect();
        let correct = ids[0].correct;
        assert!(ids.iter().all(|id| id.correct == correct));
        assert!(content.contains(&format!(
            ":regional_indicator_{}: Bomb Shooter",
            LETTERS[correct].to_ascii_lowercase()
        )));
    }

    #[tokio::test]
    async fn test_wrong_answer_reveals_and_follows_up() {
        let (ctx, followups) = context_with(FakeRemote::default());
        let interaction = component_interaction("quiz", INVOKER, "answer:2:0", &[], quiz_rows());
        let json = QuizHandler
            .handle_component(
                ctx,
                &interaction,
                component_data(&interaction),
                &CustomId::decode("answer:2:0"),
            )
            .await
            .unwrap()
            .to_json();

        assert_eq!(json["type"], 7);
        let buttons = json["data"]["components"][0]["components"].as_array().unwrap();
        let styles: Vec<u64> = buttons.iter().map(|b| b["style"].as_u64().unwrap()).collect();
        assert_eq!(styles, vec![4, 2, 3, 2]);
        assert!(buttons.iter().all(|b| b["disabled"] == true));

        let sent = followups.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "component-token");
        assert_eq!(
            sent[0].1["content"],
            "Incorrect! The answer was **C**. Better luck next time."
        );
        assert_eq!(sent[0].1["flags"], 64);
    }

    #[tokio::test]
    async fn test_right_answer() {
        let (ctx, followups) = context_with(FakeRemote::default());
        let interaction = component_interaction("quiz", INVOKER, "answer:2:2", &[], quiz_rows());
        let json = QuizHandler
            .handle_component(
                ctx,
                &interaction,
                component_data(&interaction),
                &CustomId::decode("answer:2:2"),
            )
            .await
            .unwrap()
            .to_json();

        let buttons = json["data"]["components"][0]["components"].as_array().unwrap();
        let styles: Vec<u64> = buttons.iter().map(|b| b["style"].as_u64().unwrap()).collect();
        assert_eq!(styles, vec![2, 2, 3, 2]);
        assert_eq!(followups.sent()[0].1["content"], "Correct! The answer was **C**.");
    }
}
