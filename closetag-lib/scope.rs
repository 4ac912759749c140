//! Markup-scope gate.
//!
//! Before any decision the engine asks the host how the caret position is
//! classified. Each grammar family gets a [`ScopePolicy`]; anything the
//! policy rejects (script bodies, JSX closing tags, Vue `<script>` blocks)
//! is left untouched.

use crate::{
  host::ScopeQuery,
  position::Position,
};

pub const JSX_GRAMMARS: &[&str] = &["source.jsx", "source.tsx"];
pub const TEMPLATE_GRAMMARS: &[&str] = &["text.html.vue"];

/// Scope that marks markup blocks inside template files.
pub const TEMPLATE_TAG_BLOCK_SCOPE: &str = "meta.tag.block.any.html";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopePolicy {
  /// Only inside a JSX opening element.
  Jsx,
  /// Only inside a template tag block.
  Template,
  /// Everywhere.
  Markup,
}

impl ScopePolicy {
  pub fn for_grammar(scope_name: &str) -> Self {
    if JSX_GRAMMARS.contains(&scope_name) {
      Self::Jsx
    } else if TEMPLATE_GRAMMARS.contains(&scope_name) {
      Self::Template
    } else {
      Self::Markup
    }
  }

  /// `scopes` are ordered outermost first.
  pub fn permits<S: AsRef<str>>(&self, scopes: &[S]) -> bool {
    match self {
      Self::Jsx => {
        for scope in scopes.iter().rev().map(AsRef::as_ref) {
          if scope.contains("jsx_closing_element") || scope.contains("jsx_self_closing_element") {
            return false;
          }
          if scope.contains("jsx_opening_element") {
            return true;
          }
        }
        false
      },
      Self::Template => {
        scopes
          .iter()
          .any(|scope| scope.as_ref() == TEMPLATE_TAG_BLOCK_SCOPE)
      },
      Self::Markup => true,
    }
  }
}

/// True if auto-closing may act at `pos`.
pub fn is_within_markup<Q: ScopeQuery + ?Sized>(query: &Q, pos: Position) -> bool {
  let policy = ScopePolicy::for_grammar(query.grammar_scope_name());
  if policy == ScopePolicy::Markup {
    return true;
  }

  let scopes = query.scopes_at(pos);
  let permitted = policy.permits(&scopes);
  tracing::trace!("scope gate {:?} over {:?}: {}", policy, scopes, permitted);
  permitted
}
