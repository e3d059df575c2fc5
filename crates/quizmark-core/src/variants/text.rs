//! Free text exercises

use tracing::debug;

use crate::classify::{ExerciseKind, TextKind, BASE_CLASS};
use crate::error::Result;
use crate::exercise::{ExerciseContext, ExerciseVariant};
use crate::ident::IdAssigner;

/// Adds a text input or text area to the exercise form
#[derive(Debug, Clone)]
pub struct TextExercise {
    ids: IdAssigner,
}

impl TextExercise {
    pub fn new() -> Self {
        Self {
            ids: IdAssigner::new(BASE_CLASS),
        }
    }
}

impl Default for TextExercise {
    fn default() -> Self {
        Self::new()
    }
}

impl ExerciseVariant for TextExercise {
    fn name(&self) -> &'static str {
        "text"
    }

    fn matches(&self, kind: ExerciseKind) -> bool {
        matches!(kind, ExerciseKind::Text(_))
    }

    fn id_assigner(&mut self) -> &mut IdAssigner {
        &mut self.ids
    }

    fn build_widget(&mut self, ctx: &mut ExerciseContext<'_, '_>) -> Result<String> {
        let ExerciseKind::Text(text_kind) = ctx.kind else {
            return Ok(String::new());
        };
        let captions = ctx.run.captions;

        let input = match text_kind {
            TextKind::Short => format!(
                concat!(
                    r#"<input type="text" value="" name="data" class="quiz-text-input" "#,
                    r#"placeholder="{}" autocomplete="off"/>"#,
                ),
                captions.answer_placeholder
            ),
            TextKind::Long => text_area(captions.detailed_answer_placeholder),
            TextKind::Plain => text_area(captions.answer_placeholder),
        };

        debug!("Created {:?} text exercise form for {}", text_kind, ctx.id);
        Ok(format!(
            concat!(
                r#"<div class="quiz-text-container">{input}</div>"#,
                r#"<button class="quiz-submit-button" type="submit">{submit}</button>"#,
            ),
            input = input,
            submit = captions.submit,
        ))
    }
}

fn text_area(placeholder: &str) -> String {
    format!(
        concat!(
            r#"<textarea name="data" class="quiz-text-input" "#,
            r#"placeholder="{placeholder}" rows="4"></textarea>"#,
        ),
        placeholder = placeholder,
    )
}
