//! Shared transformation skeleton
//!
//! Every variant is rewritten the same way:
//!
//! 1. assign the id and add the variant's presentation class;
//! 2. append a `form.quiz-form` and move the exercise body into it,
//!    leaving the title paragraph and any answer block in place;
//! 3. append a `div.form-elements` to the form holding the variant's widget
//!    markup as a raw store placeholder;
//! 4. move the answer block (source or synthesized) to the end of the
//!    exercise.
//!
//! Variants plug into steps 1, 3 and 4 through [`ExerciseVariant`].

use quizmark_tree::{NodeId, RawStore, Tree};
use tracing::debug;

use crate::classify::ExerciseKind;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::Result;
use crate::i18n::Captions;
use crate::ident::{IdAssigner, IssuedIds};

/// Class of the generated submission form
pub const FORM_CLASS: &str = "quiz-form";
/// Class of the widget container inside the form
pub const FORM_ELEMENTS_CLASS: &str = "form-elements";
/// Class of admonition title paragraphs
pub const TITLE_CLASS: &str = "admonition-title";
/// Classes added to answer blocks
pub const ANSWER_CLASSES: [&str; 2] = ["quiz-answer", "no-indent"];

/// State shared by every exercise of one processing run
pub struct RunState<'a> {
    /// Tree being rewritten
    pub tree: &'a mut Tree,
    /// Store receiving widget markup
    pub store: &'a mut RawStore,
    /// Captions for the configured locale
    pub captions: Captions,
    /// Ids issued so far
    pub issued: IssuedIds,
    /// Collected diagnostics
    pub diagnostics: Diagnostics,
}

impl<'a> RunState<'a> {
    /// Start a run over a tree
    pub fn new(tree: &'a mut Tree, store: &'a mut RawStore, captions: Captions) -> Self {
        Self {
            tree,
            store,
            captions,
            issued: IssuedIds::new(),
            diagnostics: Diagnostics::new(),
        }
    }
}

/// One exercise being rewritten, as seen by a variant
pub struct ExerciseContext<'r, 'a> {
    /// The run this exercise belongs to
    pub run: &'r mut RunState<'a>,
    /// The exercise node
    pub node: NodeId,
    /// The generated submission form
    pub form: NodeId,
    /// Assigned id
    pub id: String,
    /// Classified kind
    pub kind: ExerciseKind,
}

impl ExerciseContext<'_, '_> {
    /// Record a warning about this exercise
    pub fn warn(&mut self, code: &str, message: impl Into<String>) {
        self.run.diagnostics.push(
            Diagnostic::warning(message)
                .with_code(code)
                .with_exercise(self.id.as_str()),
        );
    }
}

/// Variant-specific hooks of the transformation skeleton
pub trait ExerciseVariant {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Whether this variant handles exercises of the given kind
    fn matches(&self, kind: ExerciseKind) -> bool;

    /// Counter used for default ids
    fn id_assigner(&mut self) -> &mut IdAssigner;

    /// Widget markup placed in the form's `form-elements` container
    ///
    /// Runs after the body was moved into the form, so the variant can
    /// inspect and rearrange it through `ctx.form`.
    fn build_widget(&mut self, ctx: &mut ExerciseContext<'_, '_>) -> Result<String>;

    /// Answer block content for exercises whose source has none
    fn synthesize_answer(&self, _ctx: &ExerciseContext<'_, '_>) -> Option<String> {
        None
    }
}

/// Rewrite one exercise node
///
/// Returns the assigned id. On error the node may be partially rewritten.
pub fn transform_exercise(
    variant: &mut dyn ExerciseVariant,
    run: &mut RunState<'_>,
    node: NodeId,
    kind: ExerciseKind,
) -> Result<String> {
    let id = variant
        .id_assigner()
        .assign(run.tree, node, &mut run.issued)?;

    let mut classes = run.tree.class_list(node);
    classes.push_unique(kind.extra_class());
    run.tree.set_class_list(node, &classes);

    let form = run.tree.append_element(node, "form")?;
    run.tree.set_attr(form, "class", FORM_CLASS);

    let answer = find_answer_block(run.tree, node);
    if let Some(answer) = answer {
        relabel_answer(run.tree, answer, run.captions.answer);
    }
    relocate_content(run.tree, node, form, answer)?;

    let form_elements = run.tree.append_element(form, "div")?;
    run.tree.set_attr(form_elements, "class", FORM_ELEMENTS_CLASS);

    let mut ctx = ExerciseContext {
        run,
        node,
        form,
        id,
        kind,
    };
    let widget = variant.build_widget(&mut ctx)?;
    let key = ctx.run.store.store(widget);
    ctx.run.tree.set_text(form_elements, key);

    match answer {
        Some(answer) => {
            ctx.run.tree.append_child(node, answer)?;
            add_answer_classes(ctx.run.tree, answer);
        }
        None => {
            if let Some(content) = variant
                .synthesize_answer(&ctx)
                .filter(|content| !content.is_empty())
            {
                let block = ctx.run.tree.append_element(node, "div")?;
                ctx.run.tree.set_attr(block, "class", "admonition");
                add_answer_classes(ctx.run.tree, block);
                let key = ctx.run.store.store(content);
                ctx.run.tree.set_text(block, key);
            }
        }
    }

    debug!("Processed exercise: {}", ctx.id);
    Ok(ctx.id)
}

/// The admonition title paragraph among the direct children
pub fn find_title(tree: &Tree, node: NodeId) -> Option<NodeId> {
    tree.find_child(node, |t, id| t.is_tag(id, "p") && t.has_class(id, TITLE_CLASS))
}

/// The first nested `div.admonition.answer`, at any depth
pub fn find_answer_block(tree: &Tree, node: NodeId) -> Option<NodeId> {
    tree.find_descendant(node, |t, id| {
        if !t.is_tag(id, "div") {
            return false;
        }
        let classes = t.class_list(id);
        classes.contains("admonition") && classes.contains("answer")
    })
}

fn relabel_answer(tree: &mut Tree, answer: NodeId, caption: &str) {
    if let Some(title) = find_title(tree, answer) {
        tree.set_text(title, caption);
    }
}

/// Move every child except the title, the answer block and the form into
/// the form, keeping their order
pub fn relocate_content(
    tree: &mut Tree,
    node: NodeId,
    form: NodeId,
    answer: Option<NodeId>,
) -> Result<()> {
    let title = find_title(tree, node);
    let content: Vec<NodeId> = tree
        .children(node)
        .iter()
        .copied()
        .filter(|child| Some(*child) != title && Some(*child) != answer && *child != form)
        .collect();

    for child in content {
        tree.append_child(form, child)?;
    }
    Ok(())
}

fn add_answer_classes(tree: &mut Tree, block: NodeId) {
    let mut classes = tree.class_list(block);
    for class in ANSWER_CLASSES {
        classes.push_unique(class);
    }
    tree.set_class_list(block, &classes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizmark_tree::html::parse_fragment;

    #[test]
    fn test_relocate_keeps_order_and_skips_title_and_answer() {
        let mut tree = parse_fragment(concat!(
            r#"<div class="admonition exercise"><p class="admonition-title">Q</p><p>A</p><p>B</p>"#,
            r#"<div class="admonition answer"><p class="admonition-title">S</p></div></div>"#,
        ))
        .unwrap();
        let node = tree.children(tree.root())[0];
        let children = tree.children(node).to_vec();
        let (title, a, b, answer) = (children[0], children[1], children[2], children[3]);
        let form = tree.append_element(node, "form").unwrap();

        relocate_content(&mut tree, node, form, Some(answer)).unwrap();

        assert_eq!(tree.children(form), &[a, b]);
        assert_eq!(tree.children(node), &[title, answer, form]);
    }

    #[test]
    fn test_find_answer_block_requires_both_tokens() {
        let tree = parse_fragment(concat!(
            r#"<div class="exercise"><div class="answer"></div>"#,
            r#"<div class="admonition answer extra"></div></div>"#,
        ))
        .unwrap();
        let node = tree.children(tree.root())[0];
        let found = find_answer_block(&tree, node).unwrap();
        assert_eq!(tree.get_attr(found, "class"), Some("admonition answer extra"));
    }

    #[test]
    fn test_find_title_only_looks_at_direct_children() {
        let tree = parse_fragment(
            r#"<div class="exercise"><div><p class="admonition-title">nested</p></div></div>"#,
        )
        .unwrap();
        let node = tree.children(tree.root())[0];
        assert!(find_title(&tree, node).is_none());
    }
}
