// Test fixtures with known vocabularies and documents
// WHY: Rewrites are random, so fixtures pair inputs with the groups outputs must come from

#![allow(dead_code)]

/// Two-group table from the basic lookup scenario
pub const ANIMALS_TABLE: &str = "cat,feline\ndog,canine\n";

/// Single-group table used for the no-match scenario
pub const CAT_TABLE: &str = "cat,feline\n";

/// Larger table: overlapping groups, a blank line, a trailing comma and no final newline
pub const THESAURUS_TABLE: &str = "big,large,huge\n\
quick,fast,rapid,swift\n\
\n\
happy,glad,joyful,\n\
large,vast,immense\n\
walk,stroll,amble\n\
the,the\n\
dog,hound,canine";

/// Document with mixed delimiters, blank lines and repeated words
pub const STORY_TEXT: &str = "the quick dog saw a big cat\n\
and the happy dog went for a walk\n\
\n\
large  fields were vast\n";

/// Document whose last word has no trailing delimiter
pub const UNTERMINATED_TEXT: &str = "the big dog";

/// Build a document of `lines` lines cycling through the thesaurus words
pub fn generate_document(lines: usize) -> String {
    let words = ["quick", "dog", "walk", "big", "sky", "happy", "the", "stone", "vast"];
    let mut result = String::new();
    for i in 0..lines {
        for j in 0..8 {
            if j > 0 {
                result.push(' ');
            }
            result.push_str(words[(i * 3 + j) % words.len()]);
        }
        result.push('\n');
    }
    result
}
