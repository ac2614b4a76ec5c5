use schemars::JsonSchema;
use serde::Serialize;

use super::pattern::{CompiledPattern, PatternTable};
use super::record::{CallSite, ExtractionRecord};

/// A construct that was still open when the input ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum OpenConstruct {
    String,
    BlockComment,
    Group,
    ArgumentList,
}

impl std::fmt::Display for OpenConstruct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpenConstruct::String => write!(f, "string literal"),
            OpenConstruct::BlockComment => write!(f, "block comment"),
            OpenConstruct::Group => write!(f, "bracket"),
            OpenConstruct::ArgumentList => write!(f, "argument list"),
        }
    }
}

/// Position of the opening token of an unterminated construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Unterminated {
    pub construct: OpenConstruct,
    pub line: usize,
    pub column: usize,
}

/// Everything found in one source text.
#[derive(Debug, Default)]
pub struct ScanOutput {
    pub records: Vec<ExtractionRecord>,
    /// The innermost construct left open at end of input, if any.
    pub unterminated: Option<Unterminated>,
}

/// Scan `code` for calls to the functions in `patterns`.
///
/// Calls inside string literals and comments are ignored. Malformed calls
/// never stop the scan; they come back as records with `error` set.
pub fn scan_source(code: &str, file: &str, patterns: &PatternTable) -> ScanOutput {
    let mut scanner = Scanner::new(code, file, patterns);
    scanner.run();
    ScanOutput {
        records: scanner.records,
        unterminated: scanner.unterminated,
    }
}

/// The rules in effect for one nested sub-scan.
#[derive(Debug, Clone, Copy)]
struct Rules {
    /// Text that ends this sub-scan. It is left unconsumed for the owner.
    closers: &'static [&'static str],
    /// Whether pattern calls are recognized.
    extract: bool,
    /// End the sub-scan after the next line break (line comments).
    new_line_closer: bool,
    /// Treat the content as opaque text: no strings, comments or brackets.
    skip_comment_delimiters: bool,
}

impl Rules {
    const TOP: Rules = Rules {
        closers: &[],
        extract: true,
        new_line_closer: false,
        skip_comment_delimiters: false,
    };

    const BLOCK_COMMENT: Rules = Rules {
        closers: &["*/"],
        extract: false,
        new_line_closer: false,
        skip_comment_delimiters: true,
    };

    const LINE_COMMENT: Rules = Rules {
        closers: &[],
        extract: false,
        new_line_closer: true,
        skip_comment_delimiters: true,
    };

    const ARGUMENT: Rules = Rules {
        closers: &[",", ")"],
        extract: false,
        new_line_closer: false,
        skip_comment_delimiters: false,
    };

    fn string(quote: char) -> Rules {
        let closers: &'static [&'static str] = match quote {
            '\'' => &["'"],
            '"' => &["\""],
            _ => &["`"],
        };
        Rules {
            closers,
            extract: false,
            new_line_closer: false,
            skip_comment_delimiters: true,
        }
    }

    fn group(close: char, extract: bool) -> Rules {
        let closers: &'static [&'static str] = match close {
            ')' => &[")"],
            ']' => &["]"],
            _ => &["}"],
        };
        Rules {
            closers,
            extract,
            new_line_closer: false,
            skip_comment_delimiters: false,
        }
    }
}

/// Why a sub-scan returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    Closer,
    LineEnd,
    End,
}

/// What to do once a sub-scan stops.
enum Owner<'a> {
    Top,
    LineComment,
    /// A delimited construct whose closer still has to be consumed.
    Construct {
        construct: OpenConstruct,
        closer_len: usize,
        line: usize,
        column: usize,
    },
    /// One argument of a call being extracted.
    Argument(Box<PendingCall<'a>>),
}

/// A matched call whose argument list is still being read.
struct PendingCall<'a> {
    pattern: &'a CompiledPattern,
    start: usize,
    line: usize,
    column: usize,
    params_start: usize,
    params_end: usize,
    arg_start: usize,
    all_params: Vec<String>,
}

/// One open sub-scan. Nesting lives on the heap in `Scanner::frames`, so
/// deeply nested input cannot exhaust the call stack.
struct Frame<'a> {
    rules: Rules,
    owner: Owner<'a>,
}

impl<'a> Frame<'a> {
    fn new(rules: Rules, owner: Owner<'a>) -> Self {
        Self { rules, owner }
    }
}

/// Result of scanning forward within the innermost frame.
enum Step<'a> {
    Open(Frame<'a>),
    Stop(Stop),
}

struct Scanner<'a> {
    code: &'a str,
    file: &'a str,
    patterns: &'a PatternTable,
    /// Byte offset of the next character.
    pos: usize,
    /// 1-based line number of `pos`.
    line: usize,
    /// 1-based column of `pos`, in characters.
    column: usize,
    frames: Vec<Frame<'a>>,
    records: Vec<ExtractionRecord>,
    unterminated: Option<Unterminated>,
}

impl<'a> Scanner<'a> {
    fn new(code: &'a str, file: &'a str, patterns: &'a PatternTable) -> Self {
        Self {
            code,
            file,
            patterns,
            pos: 0,
            line: 1,
            column: 1,
            frames: Vec::new(),
            records: Vec::new(),
            unterminated: None,
        }
    }

    fn run(&mut self) {
        self.frames.push(Frame::new(Rules::TOP, Owner::Top));
        while let Some(rules) = self.frames.last().map(|frame| frame.rules) {
            match self.step(rules) {
                Step::Open(frame) => self.frames.push(frame),
                Step::Stop(stop) => {
                    if let Some(frame) = self.frames.pop() {
                        self.close(frame.owner, stop);
                    }
                }
            }
        }
    }

    /// Scan until the innermost frame stops or a nested construct opens.
    fn step(&mut self, rules: Rules) -> Step<'a> {
        while let Some(c) = self.peek() {
            if c == '\n' || c == '\r' {
                self.consume_newline();
                if rules.new_line_closer {
                    return Step::Stop(Stop::LineEnd);
                }
                continue;
            }

            let rest = self.rest();
            if rules.closers.iter().any(|closer| rest.starts_with(closer)) {
                return Step::Stop(Stop::Closer);
            }

            if c == '\\' {
                self.bump();
                match self.peek() {
                    Some('\n' | '\r') => self.consume_newline(),
                    Some(_) => self.bump(),
                    None => {}
                }
                continue;
            }

            if rules.skip_comment_delimiters {
                self.bump();
                continue;
            }

            match c {
                '\'' | '"' | '`' => {
                    return Step::Open(self.open_construct(
                        1,
                        1,
                        Rules::string(c),
                        OpenConstruct::String,
                    ));
                }
                '/' if rest.starts_with("/*") => {
                    return Step::Open(self.open_construct(
                        2,
                        2,
                        Rules::BLOCK_COMMENT,
                        OpenConstruct::BlockComment,
                    ));
                }
                '/' if rest.starts_with("//") => {
                    self.advance_bytes(2);
                    return Step::Open(Frame::new(Rules::LINE_COMMENT, Owner::LineComment));
                }
                '(' | '[' | '{' => {
                    let close = match c {
                        '(' => ')',
                        '[' => ']',
                        _ => '}',
                    };
                    return Step::Open(self.open_construct(
                        1,
                        1,
                        Rules::group(close, rules.extract),
                        OpenConstruct::Group,
                    ));
                }
                _ if rules.extract && self.patterns.may_start_with(c) => {
                    if let Some(frame) = self.try_extract() {
                        return Step::Open(frame);
                    }
                    self.bump();
                }
                _ => self.bump(),
            }
        }
        Step::Stop(Stop::End)
    }

    /// Consume an opening delimiter and build the frame for its content.
    fn open_construct(
        &mut self,
        opener_len: usize,
        closer_len: usize,
        rules: Rules,
        construct: OpenConstruct,
    ) -> Frame<'a> {
        let (line, column) = self.location();
        self.advance_bytes(opener_len);
        Frame::new(
            rules,
            Owner::Construct {
                construct,
                closer_len,
                line,
                column,
            },
        )
    }

    /// Finish a frame that just stopped.
    fn close(&mut self, owner: Owner<'a>, stop: Stop) {
        match owner {
            Owner::Top | Owner::LineComment => {}
            Owner::Construct {
                construct,
                closer_len,
                line,
                column,
            } => match stop {
                Stop::Closer => self.advance_bytes(closer_len),
                Stop::End => self.mark_unterminated(construct, line, column),
                Stop::LineEnd => {}
            },
            Owner::Argument(call) => self.close_argument(call, stop),
        }
    }

    fn mark_unterminated(&mut self, construct: OpenConstruct, line: usize, column: usize) {
        if self.unterminated.is_none() {
            self.unterminated = Some(Unterminated {
                construct,
                line,
                column,
            });
        }
    }

    /// Match a pattern at the current position and open its first argument.
    fn try_extract(&mut self) -> Option<Frame<'a>> {
        if self.preceded_by_identifier() {
            return None;
        }
        let patterns = self.patterns;
        let (pattern, matched_len) = patterns.match_at(self.rest())?;

        let start = self.pos;
        let (line, column) = self.location();
        // The match may span a line break between the name and the paren.
        self.advance_to(start + matched_len);

        let call = PendingCall {
            pattern,
            start,
            line,
            column,
            params_start: self.pos,
            params_end: self.pos,
            arg_start: self.pos,
            all_params: Vec::new(),
        };
        Some(Frame::new(Rules::ARGUMENT, Owner::Argument(Box::new(call))))
    }

    /// Store the argument that just ended, then open the next one or record the call.
    fn close_argument(&mut self, mut call: Box<PendingCall<'a>>, stop: Stop) {
        let code = self.code;
        call.all_params.push(code[call.arg_start..self.pos].trim().to_string());
        call.params_end = self.pos;

        if stop != Stop::Closer {
            self.mark_unterminated(OpenConstruct::ArgumentList, call.line, call.column);
        } else {
            let at_comma = self.rest().starts_with(',');
            self.bump();
            if at_comma {
                call.arg_start = self.pos;
                self.frames.push(Frame::new(Rules::ARGUMENT, Owner::Argument(call)));
                return;
            }
        }
        self.record_call(*call);
    }

    fn record_call(&mut self, mut call: PendingCall<'a>) {
        if call.all_params.last().is_some_and(|p| p.is_empty()) {
            call.all_params.pop();
        }

        let code = self.code;
        let record = ExtractionRecord::from_call(
            call.pattern,
            CallSite {
                file: self.file,
                line: call.line,
                column: call.column,
                all_params: call.all_params,
                snippet: &code[call.start..self.pos],
                params_snippet: &code[call.params_start..call.params_end],
            },
        );
        self.records.push(record);
    }

    fn preceded_by_identifier(&self) -> bool {
        self.code[..self.pos]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
    }

    fn rest(&self) -> &'a str {
        &self.code[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
            self.column += 1;
        }
    }

    /// Advance over ASCII delimiters that contain no line breaks.
    fn advance_bytes(&mut self, len: usize) {
        let target = (self.pos + len).min(self.code.len());
        self.column += target - self.pos;
        self.pos = target;
    }

    fn advance_to(&mut self, target: usize) {
        while self.pos < target {
            match self.peek() {
                Some('\n' | '\r') => self.consume_newline(),
                Some(_) => self.bump(),
                None => break,
            }
        }
    }

    /// Consume `\n`, `\r`, `\r\n` or `\n\r` as a single line break.
    fn consume_newline(&mut self) {
        let first = self.peek();
        self.bump();
        if matches!(
            (first, self.peek()),
            (Some('\r'), Some('\n')) | (Some('\n'), Some('\r'))
        ) {
            self.bump();
        }
        self.line += 1;
        self.column = 1;
    }

    /// 1-based line and column of the current position.
    fn location(&self) -> (usize, usize) {
        (self.line, self.column)
    }
}
