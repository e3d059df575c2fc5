//! Built-in exercise variants
//!
//! Variants run in the order returned by [`builtin`], each over the whole
//! document.

mod choice;
mod self_progress;
mod text;

pub use choice::{ChoiceExercise, ANSWER_INDEX_ATTR};
pub use self_progress::{SelfProgressExercise, DONE_VALUE};
pub use text::TextExercise;

use crate::exercise::ExerciseVariant;

/// Fresh instances of the built-in variants, in processing order
pub fn builtin() -> Vec<Box<dyn ExerciseVariant>> {
    vec![
        Box::new(ChoiceExercise::new()),
        Box::new(TextExercise::new()),
        Box::new(SelfProgressExercise::new()),
    ]
}
