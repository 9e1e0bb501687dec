//! Token stream over a component source, backed by the html5ever tokenizer.
//!
//! html5ever pushes tokens into a sink; the sink here records them so the
//! compiler can pull them one at a time. Raw-text switching mirrors what a
//! tree builder would request, so a `<style>` body arrives as one text token.

use tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token as RawToken, TokenSink, TokenSinkResult, Tokenizer,
    TokenizerOpts, TokenizerResult,
};
use std::collections::VecDeque;

/// One attribute of a start or self-closing tag, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    StartTag { name: String, attrs: Vec<Attr> },
    EndTag { name: String },
    SelfClosingTag { name: String, attrs: Vec<Attr> },
    Text(String),
    Comment,
    Doctype,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: u64,
}

/// Elements that never have content or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

pub fn is_void_element(tag_name: &str) -> bool {
    VOID_ELEMENTS.contains(&tag_name)
}

fn raw_kind_for(tag_name: &str) -> Option<RawKind> {
    match tag_name {
        "style" | "xmp" | "iframe" | "noembed" | "noframes" => Some(RawKind::Rawtext),
        "title" | "textarea" => Some(RawKind::Rcdata),
        "script" => Some(RawKind::ScriptData),
        _ => None,
    }
}

#[derive(Default)]
struct Recorder {
    tokens: VecDeque<Token>,
    text: String,
    text_line: u64,
}

impl Recorder {
    fn push_text(&mut self, s: &str, line: u64) {
        if self.text.is_empty() {
            self.text_line = line;
        }
        self.text.push_str(s);
    }

    fn flush_text(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.text);
        self.tokens.push_back(Token {
            kind: TokenKind::Text(text),
            line: self.text_line,
        });
    }

    fn push(&mut self, kind: TokenKind, line: u64) {
        self.flush_text();
        self.tokens.push_back(Token { kind, line });
    }
}

impl TokenSink for Recorder {
    type Handle = ();

    fn process_token(&mut self, token: RawToken, line_number: u64) -> TokenSinkResult<()> {
        match token {
            RawToken::CharacterTokens(s) => self.push_text(&s, line_number),
            RawToken::NullCharacterToken => self.push_text("\u{FFFD}", line_number),
            RawToken::TagToken(tag) => {
                let name = tag.name.to_string();
                let attrs = tag
                    .attrs
                    .iter()
                    .map(|a| Attr {
                        key: a.name.local.to_string(),
                        value: a.value.to_string(),
                    })
                    .collect();
                match tag.kind {
                    TagKind::StartTag if tag.self_closing => {
                        self.push(TokenKind::SelfClosingTag { name, attrs }, line_number);
                    }
                    TagKind::StartTag => {
                        let raw = raw_kind_for(&name);
                        self.push(TokenKind::StartTag { name, attrs }, line_number);
                        if let Some(kind) = raw {
                            return TokenSinkResult::RawData(kind);
                        }
                    }
                    TagKind::EndTag => self.push(TokenKind::EndTag { name }, line_number),
                }
            }
            RawToken::CommentToken(_) => self.push(TokenKind::Comment, line_number),
            RawToken::DoctypeToken(_) => self.push(TokenKind::Doctype, line_number),
            RawToken::ParseError(message) => {
                log::debug!("tokenizer: line {}: {}", line_number, message);
            }
            RawToken::EOFToken => self.flush_text(),
        }
        TokenSinkResult::Continue
    }
}

/// Pull-style token stream over one fully read component source.
pub struct TokenStream {
    tokens: VecDeque<Token>,
}

impl TokenStream {
    /// Tokenizes `bytes`. Fails only when the input is not UTF-8.
    pub fn new(bytes: &[u8]) -> Result<Self, String> {
        let source = std::str::from_utf8(bytes)
            .map_err(|e| format!("component source is not valid UTF-8: {}", e))?;

        let mut tokenizer = Tokenizer::new(Recorder::default(), TokenizerOpts::default());
        let mut queue = BufferQueue::default();
        queue.push_back(StrTendril::from_slice(source));
        match tokenizer.feed(&mut queue) {
            TokenizerResult::Done => {}
            // The recorder never asks to pause for a script.
            TokenizerResult::Script(()) => {
                return Err("tokenizer paused on a script element".to_string());
            }
        }
        tokenizer.end();

        let mut recorder = tokenizer.sink;
        recorder.flush_text();
        Ok(Self {
            tokens: recorder.tokens,
        })
    }
}

impl Iterator for TokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }
}
