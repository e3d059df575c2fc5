//! Multiple choice exercises

use quizmark_tree::html::{escape_text, serialize_node};
use quizmark_tree::{NodeId, Tree};
use tracing::{error, warn};

use crate::answer::{choice_items, display_text, find_choice_list, AnswerExtractor};
use crate::classify::{ExerciseKind, BASE_CLASS};
use crate::diagnostics::{CHOICE_SKIPPED, NO_CHOICES, NO_CORRECT_ANSWER};
use crate::error::Result;
use crate::exercise::{ExerciseContext, ExerciseVariant};
use crate::ident::IdAssigner;

/// Attribute on the exercise node holding the correct choice index
pub const ANSWER_INDEX_ATTR: &str = "data-answer-idx";

/// Rewrites a bullet list into selectable alternatives
#[derive(Debug, Clone)]
pub struct ChoiceExercise {
    ids: IdAssigner,
}

impl ChoiceExercise {
    pub fn new() -> Self {
        Self {
            ids: IdAssigner::new(BASE_CLASS),
        }
    }
}

impl Default for ChoiceExercise {
    fn default() -> Self {
        Self::new()
    }
}

impl ExerciseVariant for ChoiceExercise {
    fn name(&self) -> &'static str {
        "choice"
    }

    fn matches(&self, kind: ExerciseKind) -> bool {
        kind == ExerciseKind::Choice
    }

    fn id_assigner(&mut self) -> &mut IdAssigner {
        &mut self.ids
    }

    fn build_widget(&mut self, ctx: &mut ExerciseContext<'_, '_>) -> Result<String> {
        let items = match find_choice_list(ctx.run.tree, ctx.form) {
            Some(list) => {
                let items = choice_items(ctx.run.tree, list);
                ctx.run.tree.detach(list)?;
                items
            }
            None => Vec::new(),
        };

        if items.is_empty() {
            warn!("No choices found in exercise {}", ctx.id);
            ctx.warn(NO_CHOICES, "no choices found");
            ctx.run.tree.set_attr(ctx.node, ANSWER_INDEX_ATTR, "-1");
            return Ok(String::new());
        }

        let mut alternatives = String::new();
        let mut rendered = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match render_alternative(ctx.run.tree, index, item) {
                Ok(label) => {
                    alternatives.push_str(&label);
                    rendered.push((index, item));
                }
                Err(err) => {
                    error!("Error processing choice {} of {}: {}", index, ctx.id, err);
                    ctx.warn(CHOICE_SKIPPED, format!("choice {index} skipped: {err}"));
                }
            }
        }

        let answer = AnswerExtractor::new(ctx.run.store).extract(ctx.run.tree, rendered);
        let answer_idx = match answer {
            Some(index) => index.to_string(),
            None => {
                warn!("No correct answer found for exercise {}", ctx.id);
                ctx.warn(NO_CORRECT_ANSWER, "no correct answer marked");
                "-1".to_string()
            }
        };
        ctx.run.tree.set_attr(ctx.node, ANSWER_INDEX_ATTR, answer_idx);

        Ok(format!(
            concat!(
                r#"<div class="quiz-alternative-set">{alternatives}</div>"#,
                r#"<button class="quiz-submit-button" type="submit">{submit}</button>"#,
            ),
            alternatives = alternatives,
            submit = ctx.run.captions.submit,
        ))
    }
}

/// Markup of one selectable alternative
fn render_alternative(tree: &Tree, index: usize, item: NodeId) -> Result<String> {
    let text = display_text(tree.text(item).unwrap_or_default());
    let mut content = escape_text(text).into_owned();
    for child in tree.children(item) {
        if !tree.is_tag(*child, "label") {
            content.push_str(&serialize_node(tree, *child)?);
        }
    }

    Ok(format!(
        concat!(
            r#"<label class="quiz-alternative" data-alt-index="{index}">"#,
            r#"<div class="content"><input type="hidden" name="data" value="" />"#,
            r#"<span class="choice-text">{content}</span></div></label>"#,
        ),
        index = index,
        content = content,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizmark_tree::html::parse_fragment;

    #[test]
    fn test_render_alternative_keeps_nested_markup() {
        let tree = parse_fragment(
            r#"<ul><li>[X] See <code>x &lt; y</code> here<label>drop</label></li></ul>"#,
        )
        .unwrap();
        let list = tree.children(tree.root())[0];
        let item = tree.children(list)[0];

        let label = render_alternative(&tree, 3, item).unwrap();

        assert!(label.contains(r#"data-alt-index="3""#));
        assert!(label.contains(r#"<input type="hidden" name="data" value="" />"#));
        assert!(label.contains(concat!(
            r#"<span class="choice-text">"#,
            r#"See<code>x &lt; y</code> here</span>"#,
        )));
        assert!(!label.contains("drop"));
    }

    #[test]
    fn test_render_alternative_rejects_broken_markup() {
        let mut tree = Tree::fragment();
        let root = tree.root();
        let item = tree.append_element(root, "li").unwrap();
        tree.append_element(item, "bad tag").unwrap();

        assert!(render_alternative(&tree, 0, item).is_err());
    }

    #[test]
    fn test_matches_only_choice() {
        let variant = ChoiceExercise::new();
        assert!(variant.matches(ExerciseKind::Choice));
        assert!(!variant.matches(ExerciseKind::SelfProgress));
    }
}
