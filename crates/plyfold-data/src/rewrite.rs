//! Move-notation symbol rewriting
//!
//! Algebraic notation packs game events into punctuation (`x` capture,
//! `+` check, `#` mate, `=` promotion, and the `-` of castling). Treating
//! those characters as part of an opaque categorical token is fine, but
//! downstream analytics want to ask "did this game contain a check?", so
//! the symbols are rewritten into plain word tokens before the columns are
//! made categorical.
//!
//! The substitution order is fixed and the replacement words contain none
//! of the later symbols, so the rewrite is order-stable.

/// Symbol substitutions applied to move tokens, in this order.
pub const REWRITES: [(char, &str); 5] = [
    ('+', "check"),
    ('-', "castle"),
    ('=', "promote"),
    ('x', "takes"),
    ('#', "mate"),
];

/// Rewrites one move token.
///
/// # Examples
///
/// ```
/// use plyfold_data::rewrite::rewrite_token;
///
/// assert_eq!(rewrite_token("Qxf7#"), "Qtakesf7mate");
/// assert_eq!(rewrite_token("O-O"), "OcastleO");
/// assert_eq!(rewrite_token("e4"), "e4");
/// ```
#[must_use]
pub fn rewrite_token(token: &str) -> String {
    let mut rewritten = token.to_owned();
    for (symbol, word) in REWRITES {
        if rewritten.contains(symbol) {
            rewritten = rewritten.replace(symbol, word);
        }
    }
    rewritten
}
