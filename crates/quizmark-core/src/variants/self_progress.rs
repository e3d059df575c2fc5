//! "Mark as done" exercises

use crate::classify::{ExerciseKind, BASE_CLASS};
use crate::error::Result;
use crate::exercise::{ExerciseContext, ExerciseVariant};
use crate::ident::IdAssigner;

/// Value submitted by a self-progress form
pub const DONE_VALUE: &str = "done";

/// Adds a single completion button to the exercise form
#[derive(Debug, Clone)]
pub struct SelfProgressExercise {
    ids: IdAssigner,
}

impl SelfProgressExercise {
    pub fn new() -> Self {
        Self {
            ids: IdAssigner::new(BASE_CLASS),
        }
    }
}

impl Default for SelfProgressExercise {
    fn default() -> Self {
        Self::new()
    }
}

impl ExerciseVariant for SelfProgressExercise {
    fn name(&self) -> &'static str {
        "self-progress"
    }

    fn matches(&self, kind: ExerciseKind) -> bool {
        kind == ExerciseKind::SelfProgress
    }

    fn id_assigner(&mut self) -> &mut IdAssigner {
        &mut self.ids
    }

    fn build_widget(&mut self, ctx: &mut ExerciseContext<'_, '_>) -> Result<String> {
        Ok(format!(
            concat!(
                r#"<div class="quiz-self-progress">"#,
                r#"<input type="hidden" name="data" value="{done}" />"#,
                r#"<button class="quiz-submit-button" type="submit">{caption}</button></div>"#,
            ),
            done = DONE_VALUE,
            caption = ctx.run.captions.mark_as_done,
        ))
    }
}
