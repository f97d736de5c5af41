//! stage/replace_fullwidth.rs
//! Convert full-width Latin, digits, and punctuation → half-width ASCII equivalents
//! Essential for CJK ↔ Latin search equivalence (e.g. "ＡＢＣ" → "ABC")
//! Zero-copy when no full-width chars present
//! CharMapper path: pure 1→1 mapping

use crate::{
    context::Context,
    stage::{CharMapper, Stage, StageError},
    unicode::{fullwidth_to_halfwidth, is_fullwidth},
};
use std::borrow::Cow;
use std::iter::FusedIterator;
use std::sync::Arc;

pub struct ReplaceFullwidth;

impl Stage for ReplaceFullwidth {
    fn name(&self) -> &'static str {
        "replace_fullwidth"
    }

    #[inline(always)]
    fn needs_apply(&self, text: &str, _ctx: &Context) -> Result<bool, StageError> {
        Ok(text.chars().any(is_fullwidth))
    }

    fn apply<'a>(&self, text: Cow<'a, str>, _ctx: &Context) -> Result<Cow<'a, str>, StageError> {
        if !self.needs_apply(&text, _ctx)? {
            return Ok(text);
        }
        Ok(Cow::Owned(
            text.chars().map(fullwidth_to_halfwidth).collect(),
        ))
    }

    #[inline]
    fn as_char_mapper(&self, _ctx: &Context) -> Option<&dyn CharMapper> {
        Some(self)
    }

    #[inline]
    fn into_dyn_char_mapper(self: Arc<Self>, _ctx: &Context) -> Option<Arc<dyn CharMapper>> {
        Some(self)
    }
}

impl CharMapper for ReplaceFullwidth {
    #[inline(always)]
    fn map(&self, c: char, _ctx: &Context) -> Option<char> {
        let converted = fullwidth_to_halfwidth(c);
        if converted == c {
            Some(c)
        } else {
            Some(converted)
        }
    }

    fn bind<'a>(&self, text: &'a str, _ctx: &Context) -> Box<dyn FusedIterator<Item = char> + 'a> {
        Box::new(text.chars().map(fullwidth_to_halfwidth))
    }
}
