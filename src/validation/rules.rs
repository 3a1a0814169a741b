//! Rule Groups
//!
//! Each rule group checks one sentence at a time and appends a
//! [`Violation`] per problem found. Groups are independent of each other.

use crate::parser::{Sentence, Word, EMPTY_FIELD};
use crate::tagset::Tagset;

use super::cycle::find_cycle;
use super::engine::{Category, ValidateOptions, Violation};

const PUNCT: &str = "PUNCT";
const ROOT_LABEL: &str = "root";
const ADVMOD_EMPH: &str = "advmod:emph";

/// Everything a rule can see while checking one sentence
pub struct RuleContext<'a> {
    pub tagset: &'a Tagset,
    pub sentence: &'a Sentence,
    pub sentence_index: usize,
}

impl RuleContext<'_> {
    fn violation(&self, category: Category, message: String) -> Violation {
        Violation::new(
            category,
            self.sentence_index,
            &self.sentence.sent_id,
            message,
        )
    }

    fn word_violation(&self, category: Category, word: &Word, message: String) -> Violation {
        self.violation(category, message).with_word(word)
    }
}

/// Option that has to be on for a rule group to run
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gate {
    Always,
    CheckXpos,
    CheckFeats,
}

impl Gate {
    pub fn is_enabled(&self, options: &ValidateOptions) -> bool {
        match self {
            Gate::Always => true,
            Gate::CheckXpos => options.check_xpos,
            Gate::CheckFeats => options.check_feats,
        }
    }
}

pub type RuleCheck = fn(&RuleContext<'_>, &mut Vec<Violation>);

/// A rule group and the option gating it
pub struct RuleGroup {
    pub category: Category,
    pub gate: Gate,
    pub check: RuleCheck,
}

/// All rule groups, in the order they run
pub const RULES: &[RuleGroup] = &[
    RuleGroup {
        category: Category::UnknownUpos,
        gate: Gate::Always,
        check: check_unknown_upos,
    },
    RuleGroup {
        category: Category::NoRoot,
        gate: Gate::Always,
        check: check_no_root,
    },
    RuleGroup {
        category: Category::SpaceInWord,
        gate: Gate::Always,
        check: check_space_in_word,
    },
    RuleGroup {
        category: Category::PunctLabeledNonPunct,
        gate: Gate::Always,
        check: check_punct_labeled_non_punct,
    },
    RuleGroup {
        category: Category::NonPunctLabeledPunct,
        gate: Gate::Always,
        check: check_non_punct_labeled_punct,
    },
    RuleGroup {
        category: Category::UnexpectedSpaceAfterNo,
        gate: Gate::Always,
        check: check_unexpected_space_after_no,
    },
    RuleGroup {
        category: Category::NoHead,
        gate: Gate::Always,
        check: check_no_head,
    },
    RuleGroup {
        category: Category::UnlabeledArc,
        gate: Gate::Always,
        check: check_unlabeled_arc,
    },
    RuleGroup {
        category: Category::PunctRoot,
        gate: Gate::Always,
        check: check_punct_root,
    },
    RuleGroup {
        category: Category::MultipleRoots,
        gate: Gate::Always,
        check: check_multiple_roots,
    },
    RuleGroup {
        category: Category::Cycle,
        gate: Gate::Always,
        check: check_cycle,
    },
    RuleGroup {
        category: Category::XposError,
        gate: Gate::CheckXpos,
        check: check_xpos,
    },
    RuleGroup {
        category: Category::BlankFeats,
        gate: Gate::Always,
        check: check_blank_feats,
    },
    RuleGroup {
        category: Category::FeatureError,
        gate: Gate::CheckFeats,
        check: check_feats,
    },
    RuleGroup {
        category: Category::WordSpecificPos,
        gate: Gate::Always,
        check: check_word_specific_pos,
    },
    RuleGroup {
        category: Category::UnexpectedStructure,
        gate: Gate::Always,
        check: check_structure,
    },
    RuleGroup {
        category: Category::AdvmodEmph,
        gate: Gate::Always,
        check: check_advmod_emph,
    },
];

/// `word 3 |text| (line 12)`
fn describe(word: &Word) -> String {
    match word.line_number {
        Some(line) => format!("word {} |{}| (line {})", word.id, word.text, line),
        None => format!("word {} |{}|", word.id, word.text),
    }
}

fn tag(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(EMPTY_FIELD)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn check_unknown_upos(ctx: &RuleContext<'_>, out: &mut Vec<Violation>) {
    for word in &ctx.sentence.words {
        let known = word
            .upos
            .as_deref()
            .is_some_and(|upos| ctx.tagset.is_known_upos(upos));
        if !known {
            out.push(ctx.word_violation(
                Category::UnknownUpos,
                word,
                format!("{} had an unknown upos |{}|", describe(word), tag(&word.upos)),
            ));
        }
    }
}

fn check_no_root(ctx: &RuleContext<'_>, out: &mut Vec<Violation>) {
    if !ctx.sentence.words.iter().any(Word::is_root) {
        out.push(ctx.violation(Category::NoRoot, "has no root".to_string()));
    }
}

fn check_space_in_word(ctx: &RuleContext<'_>, out: &mut Vec<Violation>) {
    for word in &ctx.sentence.words {
        if word.text.contains(' ') {
            out.push(
                ctx.word_violation(
                    Category::SpaceInWord,
                    word,
                    format!("{} has a space in it", describe(word)),
                )
                .with_details(vec![
                    "Original sentence text was:".to_string(),
                    ctx.sentence.text.clone(),
                ]),
            );
        }
    }
}

fn check_punct_labeled_non_punct(ctx: &RuleContext<'_>, out: &mut Vec<Violation>) {
    for word in &ctx.sentence.words {
        if ctx.tagset.is_punctuation(&word.text) && !word.is_upos(PUNCT) {
            out.push(ctx.word_violation(
                Category::PunctLabeledNonPunct,
                word,
                format!("{} is a punct word labeled {}", describe(word), tag(&word.upos)),
            ));
        }
    }
}

fn check_non_punct_labeled_punct(ctx: &RuleContext<'_>, out: &mut Vec<Violation>) {
    for word in &ctx.sentence.words {
        if word.is_upos(PUNCT) && !ctx.tagset.is_punctuation(&word.text) {
            out.push(ctx.word_violation(
                Category::NonPunctLabeledPunct,
                word,
                format!("{} is a non-punct word labeled {}", describe(word), PUNCT),
            ));
        }
    }
}

fn check_unexpected_space_after_no(ctx: &RuleContext<'_>, out: &mut Vec<Violation>) {
    let words = &ctx.sentence.words;
    for (idx, pair) in words.windows(2).enumerate() {
        let (word, next) = (&pair[0], &pair[1]);
        if !ctx.sentence.no_space_after(idx) {
            continue;
        }
        if !word.is_upos(PUNCT) && !next.is_upos(PUNCT) {
            out.push(ctx.word_violation(
                Category::UnexpectedSpaceAfterNo,
                word,
                format!(
                    "{} has SpaceAfter=No before non-punct word |{}|",
                    describe(word),
                    next.text
                ),
            ));
        }
    }
}

fn check_no_head(ctx: &RuleContext<'_>, out: &mut Vec<Violation>) {
    for word in &ctx.sentence.words {
        if word.head.is_none() {
            out.push(ctx.word_violation(
                Category::NoHead,
                word,
                format!("{} has no head", describe(word)),
            ));
        }
    }
}

fn check_unlabeled_arc(ctx: &RuleContext<'_>, out: &mut Vec<Violation>) {
    for word in &ctx.sentence.words {
        if non_empty(&word.deprel).is_none() {
            out.push(ctx.word_violation(
                Category::UnlabeledArc,
                word,
                format!("{} has no deprel", describe(word)),
            ));
        }
    }
}

fn check_punct_root(ctx: &RuleContext<'_>, out: &mut Vec<Violation>) {
    let Some(last) = ctx.sentence.words.last() else {
        return;
    };
    if last.is_upos(PUNCT) && last.is_root() {
        out.push(ctx.word_violation(
            Category::PunctRoot,
            last,
            format!("final punct {} is the root", describe(last)),
        ));
    }
}

fn check_multiple_roots(ctx: &RuleContext<'_>, out: &mut Vec<Violation>) {
    let roots: Vec<&Word> = ctx.sentence.words.iter().filter(|w| w.is_root()).collect();
    if roots.len() > 1 {
        let listed: Vec<String> = roots
            .iter()
            .map(|w| format!("|{}| {} ({})", w.text, tag(&w.upos), w.id))
            .collect();
        out.push(ctx.violation(
            Category::MultipleRoots,
            format!("has {} roots: {}", roots.len(), listed.join(", ")),
        ));
    }
}

fn check_cycle(ctx: &RuleContext<'_>, out: &mut Vec<Violation>) {
    let Some(cycle) = find_cycle(ctx.sentence) else {
        return;
    };

    let node_text = |id: usize| -> String {
        if id == 0 {
            "ROOT".to_string()
        } else {
            ctx.sentence
                .word(id)
                .map(|w| w.text.clone())
                .unwrap_or_else(|| "?".to_string())
        }
    };
    let details = cycle
        .iter()
        .map(|edge| {
            format!(
                "{} {} {} {} {}",
                edge.head,
                node_text(edge.head),
                edge.dependent,
                node_text(edge.dependent),
                edge.deprel
            )
        })
        .collect();

    out.push(
        ctx.violation(
            Category::Cycle,
            format!("has a cycle of length {}", cycle.len()),
        )
        .with_details(details),
    );
}

fn check_xpos(ctx: &RuleContext<'_>, out: &mut Vec<Violation>) {
    for word in &ctx.sentence.words {
        let (Some(upos), Some(xpos)) = (non_empty(&word.upos), non_empty(&word.xpos)) else {
            continue;
        };
        match ctx.tagset.allowed_xpos(upos) {
            Some(allowed) => {
                if !allowed.iter().any(|x| x == xpos) {
                    out.push(ctx.word_violation(
                        Category::XposError,
                        word,
                        format!(
                            "{} had xpos {} which is not allowed for upos {}",
                            describe(word),
                            xpos,
                            upos
                        ),
                    ));
                }
            }
            None => {
                out.push(ctx.word_violation(
                    Category::XposError,
                    word,
                    format!(
                        "{} had unknown upos |{}| with xpos |{}|",
                        describe(word),
                        upos,
                        xpos
                    ),
                ));
            }
        }
    }
}

fn check_blank_feats(ctx: &RuleContext<'_>, out: &mut Vec<Violation>) {
    for word in &ctx.sentence.words {
        if word.feats.as_deref() == Some("") {
            out.push(ctx.word_violation(
                Category::BlankFeats,
                word,
                format!("{} had blank features", describe(word)),
            ));
        }
    }
}

fn check_feats(ctx: &RuleContext<'_>, out: &mut Vec<Violation>) {
    for word in &ctx.sentence.words {
        let Some(upos) = non_empty(&word.upos) else {
            continue;
        };

        let Some(allowed) = ctx.tagset.allowed_feats(upos) else {
            out.push(ctx.word_violation(
                Category::FeatureError,
                word,
                format!("{} had an unexpected upos {} with features", describe(word), upos),
            ));
            continue;
        };

        let features = word.feature_list();
        if features.is_empty() {
            if ctx.tagset.requires_features(upos) {
                out.push(ctx.word_violation(
                    Category::FeatureError,
                    word,
                    format!(
                        "{} had blank features, which is not allowed for upos {}",
                        describe(word),
                        upos
                    ),
                ));
            }
            continue;
        }

        for feat in &features {
            if !allowed.contains(*feat) {
                out.push(ctx.word_violation(
                    Category::FeatureError,
                    word,
                    format!(
                        "{} had an unexpected feature {} for upos {}",
                        describe(word),
                        feat,
                        upos
                    ),
                ));
            }
        }

        check_feature_refinements(ctx, word, upos, &features, out);
    }
}

/// Cross-field constraints between features and other columns
fn check_feature_refinements(
    ctx: &RuleContext<'_>,
    word: &Word,
    upos: &str,
    features: &[&str],
    out: &mut Vec<Violation>,
) {
    let value_of = |key: &str| {
        features
            .iter()
            .filter_map(|feat| feat.split_once('='))
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    };
    let refinements = &ctx.tagset.refinements;

    if upos == "ADP" && !refinements.case_marking_xpos.is_empty() {
        if let Some(case) = value_of("Case") {
            let xpos_ok = word
                .xpos
                .as_deref()
                .is_some_and(|xpos| refinements.case_marking_xpos.iter().any(|x| x == xpos));
            if !xpos_ok {
                out.push(ctx.word_violation(
                    Category::FeatureError,
                    word,
                    format!(
                        "{} had Case={} but an xpos {} which is not allowed to have Case",
                        describe(word),
                        case,
                        tag(&word.xpos)
                    ),
                ));
            }
        }
    }

    if upos == "VERB" {
        if let Some(required) = refinements.infinitive_aspect.as_deref() {
            let aspect = value_of("Aspect");
            if value_of("VerbForm") == Some("Inf") && aspect != Some(required) {
                out.push(ctx.word_violation(
                    Category::FeatureError,
                    word,
                    format!(
                        "{} had VerbForm=Inf but an Aspect={}",
                        describe(word),
                        aspect.unwrap_or(EMPTY_FIELD)
                    ),
                ));
            }
        }
    }
}

fn check_word_specific_pos(ctx: &RuleContext<'_>, out: &mut Vec<Violation>) {
    for word in &ctx.sentence.words {
        let Some(allowed) = ctx.tagset.enforced_pos(&word.text) else {
            continue;
        };
        let ok = word
            .upos
            .as_deref()
            .is_some_and(|upos| allowed.iter().any(|a| a == upos));
        if !ok {
            out.push(ctx.word_violation(
                Category::WordSpecificPos,
                word,
                format!(
                    "{} has a POS of {}, which is not in [{}]",
                    describe(word),
                    tag(&word.upos),
                    allowed.join(", ")
                ),
            ));
        }
    }
}

fn check_structure(ctx: &RuleContext<'_>, out: &mut Vec<Violation>) {
    for word in &ctx.sentence.words {
        let Some(allowed) = ctx.tagset.allowed_structures(&word.text) else {
            continue;
        };
        let (upos, deprel) = (tag(&word.upos), tag(&word.deprel));
        if !allowed.iter().any(|(u, d)| u == upos && d == deprel) {
            let listed: Vec<String> = allowed.iter().map(|(u, d)| format!("{}/{}", u, d)).collect();
            out.push(ctx.word_violation(
                Category::UnexpectedStructure,
                word,
                format!(
                    "{} has a POS of {} and deprel of {}, expected one of {}",
                    describe(word),
                    upos,
                    deprel,
                    listed.join(", ")
                ),
            ));
        }
    }
}

fn check_advmod_emph(ctx: &RuleContext<'_>, out: &mut Vec<Violation>) {
    for (idx, word) in ctx.sentence.words.iter().enumerate() {
        if word.deprel.as_deref() != Some(ADVMOD_EMPH) {
            continue;
        }

        let message = if idx == 0 {
            Some(format!(
                "{} had an advmod:emph at the start of the sentence",
                describe(word)
            ))
        } else if !word.is_upos("PART") {
            Some(format!(
                "{} had an advmod:emph with a UPOS of {}",
                describe(word),
                tag(&word.upos)
            ))
        } else {
            match word.head {
                Some(head)
                    if head > word.id
                        && !ctx.tagset.is_advmod_emph_exception(&ctx.sentence.text) =>
                {
                    Some(format!(
                        "{} had an advmod:emph pointing later in the tree, to {}",
                        describe(word),
                        head
                    ))
                }
                _ => None,
            }
        };

        if let Some(message) = message {
            out.push(ctx.word_violation(Category::AdvmodEmph, word, message));
        }
    }
}
