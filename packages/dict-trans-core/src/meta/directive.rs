//! Per-field translation directive.

/// Declarative translation settings attached to one field.
///
/// Empty strings are treated the same as absent values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TranslationDirective {
    /// Dictionary the field's codes belong to
    pub dict_code: Option<&'static str>,
    /// Separator between codes in a multi-valued raw value
    pub split_symbol: Option<&'static str>,
    /// Separator placed between resolved meanings
    pub join_symbol: Option<&'static str>,
    /// Field receiving the raw code before translation
    pub before_copy_to: Option<&'static str>,
    /// Field receiving the meaning after translation
    pub over_copy_to: Option<&'static str>,
}

fn non_empty(value: Option<&'static str>) -> Option<&'static str> {
    value.filter(|s| !s.is_empty())
}

impl TranslationDirective {
    /// Directive resolving through `dict_code` and overwriting the field.
    pub const fn new(dict_code: &'static str) -> Self {
        Self {
            dict_code: Some(dict_code),
            split_symbol: None,
            join_symbol: None,
            before_copy_to: None,
            over_copy_to: None,
        }
    }

    /// Sets the split and join symbols for multi-valued codes.
    pub const fn with_split(mut self, split: &'static str, join: &'static str) -> Self {
        self.split_symbol = Some(split);
        self.join_symbol = Some(join);
        self
    }

    /// Sets the redirection targets.
    pub const fn with_redirect(
        mut self,
        before_copy_to: Option<&'static str>,
        over_copy_to: Option<&'static str>,
    ) -> Self {
        self.before_copy_to = before_copy_to;
        self.over_copy_to = over_copy_to;
        self
    }

    /// Declared dictionary name.
    pub fn dict_code(&self) -> Option<&'static str> {
        non_empty(self.dict_code)
    }

    /// Split symbol for multi-valued codes.
    pub fn split_symbol(&self) -> Option<&'static str> {
        non_empty(self.split_symbol)
    }

    /// Join symbol; falls back to the split symbol when unset.
    pub fn join_symbol(&self) -> &'static str {
        non_empty(self.join_symbol)
            .or_else(|| self.split_symbol())
            .unwrap_or("")
    }

    /// Redirection targets, or `None` when the field is overwritten in place.
    ///
    /// An unset side defaults to `field` itself.
    pub fn redirect_targets(&self, field: &'static str) -> Option<(&'static str, &'static str)> {
        let before = non_empty(self.before_copy_to);
        let over = non_empty(self.over_copy_to);
        if before.is_none() && over.is_none() {
            return None;
        }
        Some((before.unwrap_or(field), over.unwrap_or(field)))
    }
}
