//! PGN reading: tag pairs and the SAN token list of the movetext.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PgnError {
    /// 1-based line number of the offending tag line
    #[error("malformed tag pair on line {line}: {text}")]
    MalformedTag { line: usize, text: String },

    #[error("comment opened with '{{' is never closed")]
    UnterminatedComment,

    #[error("variation opened with '(' is never closed")]
    UnterminatedVariation,
}

/// A single game: tag pairs in file order and its mainline SAN tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pgn {
    pub tags: Vec<(String, String)>,
    pub moves: Vec<String>,
}

impl Pgn {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Split a PGN game into its tag section and movetext tokens.
/// Tag lines are only recognised before the first movetext line.
pub fn parse_pgn(text: &str) -> Result<Pgn, PgnError> {
    let mut pgn = Pgn::default();
    let mut movetext = String::new();
    let mut in_header = true;

    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.starts_with('%') {
            continue;
        }
        if in_header {
            if line.is_empty() {
                continue;
            }
            if line.starts_with('[') {
                pgn.tags.push(parse_tag(line).ok_or_else(|| PgnError::MalformedTag {
                    line: i + 1,
                    text: line.to_string(),
                })?);
                continue;
            }
            in_header = false;
        }
        movetext.push_str(raw);
        movetext.push('\n');
    }

    pgn.moves = tokenize_movetext(&movetext)?;
    Ok(pgn)
}

/// `[Key "Value"]` with `\"` and `\\` escapes inside the value
fn parse_tag(line: &str) -> Option<(String, String)> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?.trim();
    let (key, rest) = inner.split_once(char::is_whitespace)?;
    let quoted = rest.trim().strip_prefix('"')?.strip_suffix('"')?;
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }

    let mut value = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            value.push(chars.next()?);
        } else {
            value.push(c);
        }
    }
    Some((key.to_string(), value))
}

/// Ordered SAN tokens of a movetext section. Comments, clock annotations,
/// variations, NAGs, move numbers and the result marker are discarded.
pub fn tokenize_movetext(movetext: &str) -> Result<Vec<String>, PgnError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = movetext.chars();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                flush_token(&mut current, &mut tokens);
                if !chars.by_ref().any(|c| c == '}') {
                    return Err(PgnError::UnterminatedComment);
                }
            }
            ';' => {
                flush_token(&mut current, &mut tokens);
                for c in chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
            }
            '(' => {
                flush_token(&mut current, &mut tokens);
                skip_variation(&mut chars)?;
            }
            c if c.is_whitespace() || c == ')' => flush_token(&mut current, &mut tokens),
            c => current.push(c),
        }
    }
    flush_token(&mut current, &mut tokens);
    Ok(tokens)
}

// Called just after an opening '('; consumes through the matching ')'.
fn skip_variation(chars: &mut std::str::Chars<'_>) -> Result<(), PgnError> {
    let mut depth = 1usize;
    while let Some(c) = chars.next() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            '{' => {
                if !chars.any(|c| c == '}') {
                    return Err(PgnError::UnterminatedComment);
                }
            }
            _ => {}
        }
    }
    Err(PgnError::UnterminatedVariation)
}

fn is_result(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn flush_token(current: &mut String, tokens: &mut Vec<String>) {
    if current.is_empty() {
        return;
    }
    let token = std::mem::take(current);
    if is_result(&token) || token.starts_with('$') {
        return;
    }

    // "12." "12..." or "1.e4"
    let san = match token.find(|c: char| !c.is_ascii_digit()) {
        Some(pos) if pos > 0 && token[pos..].starts_with('.') => {
            token[pos..].trim_start_matches('.')
        }
        Some(_) => token.as_str(),
        None => return,
    };
    if !san.is_empty() {
        tokens.push(san.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[Event "Casual Game"]
[White "Anderssen, Adolf"]
[Black "Kieseritzky, Lionel"]
[Annotator "\"Unknown\""]
[Result "1-0"]

1. e4 {[%clk 0:05:00]} e5 2. f4 $1 exf4 3... Bc4 (3. Nf3 g5 (3... d6) 4. h4) Qh4+
; king hunt begins
4.Kf1 b5?! 1-0
"#;

    #[test]
    fn splits_tags_and_moves() {
        let pgn = parse_pgn(SAMPLE).unwrap();
        assert_eq!(pgn.tags.len(), 5);
        assert_eq!(pgn.tag("White"), Some("Anderssen, Adolf"));
        assert_eq!(pgn.tag("Annotator"), Some("\"Unknown\""));
        assert_eq!(pgn.tag("Round"), None);
        assert_eq!(pgn.moves, vec!["e4", "e5", "f4", "exf4", "Bc4", "Qh4+", "Kf1", "b5?!"]);
    }

    #[test]
    fn movetext_only_input() {
        let pgn = parse_pgn("1. d4 d5 2. c4 *").unwrap();
        assert!(pgn.tags.is_empty());
        assert_eq!(pgn.moves, vec!["d4", "d5", "c4"]);
    }

    #[test]
    fn castling_tokens_survive_move_number_stripping() {
        let moves = tokenize_movetext("10. O-O 0-0-0 11.O-O-O 0-1").unwrap();
        assert_eq!(moves, vec!["O-O", "0-0-0", "O-O-O"]);
    }

    #[test]
    fn malformed_input_is_reported() {
        assert_eq!(
            parse_pgn("[Event Casual]\n1. e4"),
            Err(PgnError::MalformedTag {
                line: 1,
                text: "[Event Casual]".to_string()
            })
        );
        assert_eq!(tokenize_movetext("1. e4 { open"), Err(PgnError::UnterminatedComment));
        assert_eq!(tokenize_movetext("1. e4 (1. d4"), Err(PgnError::UnterminatedVariation));
    }
}
