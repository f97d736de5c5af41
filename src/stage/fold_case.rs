//! stage/case_fold.rs – **Zero-copy, locale-accurate case folding**
//! * Turkish "İ → i / I → ı"
//! * German "ß → ss" (multi-char expansion)
//! * Dutch "IJ → ij" (two-char peek-ahead)
//! * Fast ASCII path (optional)
//! * CharMapper path **only when every mapping is 1→1 and no peek-ahead**
//! * Fully compliant with the white-paper §5.1, §5.2, §3.3

use crate::{
    context::Context,
    lang::LangEntry,
    stage::{CharMapper, FusedIterator, Stage, StageError},
};
use std::borrow::Cow;
use std::sync::Arc;

/// Public stage – zero-sized, stateless.
pub struct FoldCase;

impl Stage for FoldCase {
    fn name(&self) -> &'static str {
        "case_fold"
    }
    #[inline(always)]
    fn needs_apply(&self, text: &str, ctx: &Context) -> Result<bool, StageError> {
        if text.chars().any(|c| ctx.lang_entry.needs_case_fold(c)) {
            return Ok(true);
        }
        if ctx.lang_entry.requires_peek_ahead() {
            let mut chars = text.chars().peekable();
            while let Some(c) = chars.next() {
                if ctx
                    .lang_entry
                    .peek_ahead_fold(c, chars.peek().copied())
                    .is_some()
                {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Result<Cow<'a, str>, StageError> {
        let fold_map = ctx.lang_entry.fold_map();

        // ═══════════════════════════════════════════════════════════════
        // Fast path: No language-specific rules → Unicode lowercase only
        // ═══════════════════════════════════════════════════════════════
        // Fast path: no language rules
        if fold_map.is_empty() {
            #[cfg(feature = "ascii-fast")]
            if text.is_ascii() {
                let mut owned = text.into_owned();
                owned.make_ascii_lowercase();
                return Ok(Cow::Owned(owned));
            }
            return Ok(Cow::Owned(
                text.chars().flat_map(|c| c.to_lowercase()).collect(),
            ));
        }

        // ═══════════════════════════════════════════════════════════════
        // Context-sensitive path: Dutch IJ, or future multi-char sequences
        // ═══════════════════════════════════════════════════════════════
        if ctx.lang_entry.requires_peek_ahead() {
            return apply_with_peek_ahead(text, ctx);
        }

        // ═══════════════════════════════════════════════════════════════
        // Standard path: Language-specific folding without peek-ahead
        // ═══════════════════════════════════════════════════════════════
        let (foldable_count, extra_bytes) = ctx.lang_entry.count_foldable_bytes(&text);
        if foldable_count == 0 {
            return Ok(text); // Zero-copy
        }

        let capacity = text.len() + extra_bytes;
        let mut out = String::with_capacity(capacity);
        for c in text.chars() {
            if let Some(m) = fold_map.iter().find(|m| m.from == c) {
                out.push_str(m.to);
            } else {
                out.extend(c.to_lowercase());
            }
        }
        Ok(Cow::Owned(out))
    }

    #[inline]
    fn as_char_mapper(&self, ctx: &Context) -> Option<&dyn CharMapper> {
        // Use lang.rs helpers instead of manual checks
        if ctx.lang_entry.has_one_to_one_folds() && !ctx.lang_entry.requires_peek_ahead() {
            Some(self)
        } else {
            None
        }
    }

    #[inline]
    fn into_dyn_char_mapper(self: Arc<Self>, ctx: &Context) -> Option<Arc<dyn CharMapper>> {
        if ctx.lang_entry.has_one_to_one_folds() && !ctx.lang_entry.requires_peek_ahead() {
            Some(self)
        } else {
            None
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Peek-ahead implementation for Dutch IJ and similar sequences
// ═══════════════════════════════════════════════════════════════════════════
fn apply_with_peek_ahead<'a>(
    text: Cow<'a, str>,
    ctx: &Context,
) -> Result<Cow<'a, str>, StageError> {
    let fold_map = ctx.lang_entry.fold_map();
    let (foldable_count, extra_bytes) = ctx.lang_entry.count_foldable_bytes(&text); // Reuse helper
    let mut out = String::with_capacity(
        text.len()
            + extra_bytes
            + if ctx.lang_entry.requires_peek_ahead() {
                foldable_count
            } else {
                0
            },
    ); // Rough peek adjustment
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if let Some(target) = ctx.lang_entry.peek_ahead_fold(c, chars.peek().copied()) {
            chars.next();
            out.push_str(target);
            continue;
        }
        if let Some(m) = fold_map.iter().find(|m| m.from == c) {
            out.push_str(m.to);
        } else {
            out.extend(c.to_lowercase());
        }
    }
    Ok(Cow::Owned(out))
}

// ═══════════════════════════════════════════════════════════════════════════
// CharMapper implementation (zero-copy path)
// ═══════════════════════════════════════════════════════════════════════════
impl CharMapper for FoldCase {
    #[inline(always)]
    fn map(&self, c: char, ctx: &Context) -> Option<char> {
        // Use lang.rs helper for 1→1 folding
        ctx.lang_entry.fold_char(c)
    }

    fn bind<'a>(&self, text: &'a str, ctx: &Context) -> Box<dyn FusedIterator<Item = char> + 'a> {
        let fold_map = ctx.lang_entry.fold_map();

        // Fast path: no language-specific rules
        if fold_map.is_empty() {
            #[cfg(feature = "ascii-fast")]
            if text.is_ascii() {
                return Box::new(AsciiFoldCaseIter {
                    bytes: text.as_bytes(),
                });
            }
            return Box::new(text.chars().flat_map(|c| c.to_lowercase()));
        }

        // Language-specific 1→1 iterator
        Box::new(FoldCaseIter {
            chars: text.chars(),
            lang: ctx.lang_entry,
        })
    }
}

// ────── ASCII FAST PATH ITERATOR ──────
#[cfg(feature = "ascii-fast")]
struct AsciiFoldCaseIter<'a> {
    bytes: &'a [u8],
}

#[cfg(feature = "ascii-fast")]
impl<'a> Iterator for AsciiFoldCaseIter<'a> {
    type Item = char;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        let (&b, rest) = self.bytes.split_first()?;
        self.bytes = rest;
        Some(if b.is_ascii_uppercase() {
            b.to_ascii_lowercase() as char
        } else {
            b as char
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.bytes.len(), Some(self.bytes.len()))
    }
}

#[cfg(feature = "ascii-fast")]
impl<'a> FusedIterator for AsciiFoldCaseIter<'a> {}

struct FoldCaseIter<'a> {
    chars: std::str::Chars<'a>,
    lang: LangEntry,
}

impl<'a> Iterator for FoldCaseIter<'a> {
    type Item = char;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        let c = self.chars.next()?;
        // Use lang.rs helper for 1→1 folding
        self.lang.fold_char(c)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chars.size_hint()
    }
}

impl<'a> FusedIterator for FoldCaseIter<'a> {}
