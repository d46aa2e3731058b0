//! The primitive palette called by expression trees.
//!
//! All primitives are pure and total. They never fail for data-shape reasons:
//! empty sequences, absent tokens and empty strings all have a defined result.
//! The constants at the bottom of this module are the neutral terminals a tree
//! can reference without computing anything.

pub mod builder;
pub mod extract;
pub mod lexicon;
pub mod predicates;
pub mod sequence;
pub mod text;

pub use builder::{make_name_obj, set_confidence};
pub use extract::{
    extract_family_str, extract_given_str, extract_middle_str, extract_particles_list,
    extract_salutation_str, extract_suffix_list, extract_title_list,
};
pub use predicates::{
    get_gender_from_name, get_gender_from_salutation, has_hyphen, has_period, is_all_caps,
    is_capitalized, is_common_family_name, is_common_given_name, is_initial, is_particle,
    is_roman_numeral, is_salutation, is_short, is_suffix, is_title, token_length,
};
pub use sequence::{
    count_type, drop_first, drop_last, filter_by_type, get_first_token, get_last_token,
    get_remainder_tokens, get_tokens_after_comma, get_tokens_before_comma, index_of_type,
    len_tokens, remove_type, slice_tokens,
};
pub use text::{
    add, get_first_string, get_last_string, has_comma, identity_token_type, if_bool_string,
    if_bool_tokenlist, mul, split_on_comma, sub, to_lower, trim,
};

pub use crate::lexer::tokenize;

use crate::name::NameRecord;
use crate::token::Token;

pub const EMPTY_STR: &str = "";
pub const TRUE: bool = true;
pub const FALSE: bool = false;

pub fn empty_str_list() -> Vec<String> {
    Vec::new()
}

pub fn empty_tok_list() -> Vec<Token> {
    Vec::new()
}

pub fn empty_name_obj() -> NameRecord {
    NameRecord::empty("")
}

/// Empty `PUNCT` token at `[0, 0)` without an index.
pub fn empty_token() -> Token {
    Token::placeholder()
}
