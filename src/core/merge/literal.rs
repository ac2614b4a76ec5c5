/// Decode a quoted string literal as written in source code.
///
/// Accepts `'...'`, `"..."` and backtick literals without substitutions.
/// Returns `None` for anything that is not exactly one literal, such as an
/// identifier, a concatenation or a template with `${...}`.
pub fn parse_literal(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let mut chars = raw.chars();
    let quote = chars.next().filter(|c| matches!(c, '\'' | '"' | '`'))?;

    let mut value = String::new();
    let mut closed = false;
    while let Some(c) = chars.next() {
        if closed {
            // Text after the closing quote: not a single literal.
            return None;
        }
        match c {
            '\\' => decode_escape(&mut chars, &mut value)?,
            '$' if quote == '`' && chars.clone().next() == Some('{') => return None,
            c if c == quote => closed = true,
            c => value.push(c),
        }
    }

    closed.then_some(value)
}

fn decode_escape(chars: &mut std::str::Chars<'_>, value: &mut String) -> Option<()> {
    match chars.next()? {
        'n' => value.push('\n'),
        'r' => value.push('\r'),
        't' => value.push('\t'),
        'b' => value.push('\u{8}'),
        'f' => value.push('\u{c}'),
        'v' => value.push('\u{b}'),
        '0' => value.push('\0'),
        'x' => {
            let hex: String = chars.by_ref().take(2).collect();
            value.push(char::from_u32(u32::from_str_radix(&hex, 16).ok()?)?);
        }
        'u' => value.push(decode_unicode_escape(chars)?),
        // Line continuation.
        '\r' => {
            if chars.clone().next() == Some('\n') {
                chars.next();
            }
        }
        '\n' => {}
        other => value.push(other),
    }
    Some(())
}

/// Decode the code unit after `\u`, pairing a high surrogate with a
/// following `\uXXXX` low surrogate. Unpaired surrogates become U+FFFD.
fn decode_unicode_escape(chars: &mut std::str::Chars<'_>) -> Option<char> {
    let code = read_code_unit(chars)?;
    if !(0xD800..=0xDFFF).contains(&code) {
        return char::from_u32(code);
    }
    if code <= 0xDBFF {
        let mut lookahead = chars.clone();
        if lookahead.next() == Some('\\')
            && lookahead.next() == Some('u')
            && let Some(low) = read_code_unit(&mut lookahead)
            && (0xDC00..=0xDFFF).contains(&low)
        {
            *chars = lookahead;
            return char::from_u32(0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00));
        }
    }
    Some(char::REPLACEMENT_CHARACTER)
}

fn read_code_unit(chars: &mut std::str::Chars<'_>) -> Option<u32> {
    if chars.clone().next() == Some('{') {
        chars.next();
        let hex: String = chars.by_ref().take_while(|c| *c != '}').collect();
        u32::from_str_radix(&hex, 16).ok()
    } else {
        let hex: String = chars.by_ref().take(4).collect();
        if hex.len() != 4 {
            return None;
        }
        u32::from_str_radix(&hex, 16).ok()
    }
}
