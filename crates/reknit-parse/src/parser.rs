use drop_bomb::DropBomb;
use reknit_errors::Diagnostic;
use reknit_syntax::{Builder, Parse, ParseFailure, SyntaxKind};
use reknit_tokenizer::{Token, Tokenizer};

use crate::MAX_DEPTH;

pub(crate) struct Parser<'a> {
    text: &'a str,
    tokenizer: Tokenizer<'a>,
    events: Vec<Event>,
    diagnostics: Vec<Diagnostic>,
    depth: usize,
    too_deep: bool,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            text,
            tokenizer: Tokenizer::new(text),
            events: Vec::new(),
            diagnostics: Vec::new(),
            depth: 0,
            too_deep: false,
        }
    }

    pub(crate) fn peek_kind(&self) -> SyntaxKind {
        self.tokenizer.peek().kind
    }

    pub(crate) fn advance(&mut self) {
        if self.peek_kind() == SyntaxKind::EOF {
            return;
        }

        let token = self.tokenizer.next_token();
        self.events.push(Event::Token(token));
    }

    /// Pushes the end-of-file token; only the source file rule does this.
    pub(crate) fn finish_file(&mut self) {
        debug_assert!(self.at(SyntaxKind::EOF));
        let token = self.tokenizer.next_token();
        self.events.push(Event::Token(token));
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: SyntaxKind, message: &str) {
        if !self.eat(kind) {
            self.error(message);
        }
    }

    pub(crate) fn start(&mut self) -> Marker {
        let pos = self.events.len() as u32;
        self.events.push(Event::TOMBSTONE);
        Marker::new(pos)
    }

    pub(crate) fn start_list(&mut self) {
        self.events.push(Event::StartList);
    }

    pub(crate) fn finish_list(&mut self) {
        self.events.push(Event::FinishList);
    }

    pub(crate) fn error(&mut self, message: &str) {
        self.diagnostics.push(Diagnostic::error(message, self.tokenizer.peek().range));
    }

    /// Reports `message` and wraps the current token in an `ERROR` node.
    pub(crate) fn error_and_bump(&mut self, message: &str) {
        let m = self.start();
        self.error(message);
        self.advance();
        m.complete(self, SyntaxKind::ERROR);
    }

    /// Enters one level of nesting. Returns `false` once the limit is hit, in
    /// which case the caller must not recurse.
    pub(crate) fn enter(&mut self) -> bool {
        if self.depth >= MAX_DEPTH {
            self.too_deep = true;
            return false;
        }
        self.depth += 1;
        true
    }

    pub(crate) fn leave(&mut self) {
        self.depth -= 1;
    }

    pub(crate) fn finish(self) -> Result<Parse, ParseFailure> {
        let Parser { text, mut tokenizer, mut events, mut diagnostics, depth: _, too_deep } = self;
        if too_deep {
            return Err(ParseFailure::TooDeep { limit: MAX_DEPTH });
        }

        let mut builder = Builder::new(text);
        let mut forward_parents = Vec::new();

        for i in 0..events.len() {
            match std::mem::replace(&mut events[i], Event::TOMBSTONE) {
                Event::Start { kind, forward_parent } => {
                    // A leaf that was never preceded.
                    if kind == SyntaxKind::TOMBSTONE && forward_parent.is_none() {
                        continue;
                    }

                    if kind != SyntaxKind::TOMBSTONE {
                        forward_parents.push(kind);
                    }
                    let mut idx = i;
                    let mut fp = forward_parent;
                    while let Some(fwd) = fp {
                        idx += fwd as usize;

                        fp = match std::mem::replace(&mut events[idx], Event::TOMBSTONE) {
                            Event::Start { kind, forward_parent } => {
                                if kind != SyntaxKind::TOMBSTONE {
                                    forward_parents.push(kind);
                                }
                                forward_parent
                            }
                            _ => unreachable!(),
                        };
                    }

                    for kind in forward_parents.drain(..).rev() {
                        builder.start_node(kind);
                    }
                }
                Event::Finish => builder.finish_node(),
                Event::StartList => builder.start_list(),
                Event::FinishList => builder.finish_list(),
                Event::Token(Token { kind, range }) => builder.token(kind, range),
            }
        }

        for comment in tokenizer.take_comments() {
            builder.comment(comment);
        }
        diagnostics.extend(
            tokenizer
                .take_errors()
                .into_iter()
                .map(|error| Diagnostic::error(error.message, error.range)),
        );
        diagnostics.sort_by_key(|diagnostic| diagnostic.range().start());

        Ok(Parse::new(builder.finish(), diagnostics))
    }
}

enum Event {
    Start { kind: SyntaxKind, forward_parent: Option<u32> },
    Token(Token),
    Finish,
    StartList,
    FinishList,
}

impl Event {
    const TOMBSTONE: Self = Event::Start { kind: SyntaxKind::TOMBSTONE, forward_parent: None };
}

pub(crate) struct Marker {
    position: u32,
    bomb: DropBomb,
}

impl Marker {
    fn new(pos: u32) -> Marker {
        Marker {
            position: pos,
            bomb: DropBomb::new("Marker must be completed"),
        }
    }

    pub(crate) fn complete(mut self, p: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
        self.bomb.defuse();

        match &mut p.events[self.position as usize] {
            Event::Start { kind: slot, .. } => {
                *slot = kind;
            }
            _ => unreachable!(),
        }

        p.events.push(Event::Finish);
        CompletedMarker::new(self.position)
    }

    /// Completes a marker that wraps a single token without creating a node.
    /// The token can still be preceded by a parent later on.
    pub(crate) fn leaf(mut self) -> CompletedMarker {
        self.bomb.defuse();
        CompletedMarker::new(self.position)
    }
}

pub(crate) struct CompletedMarker {
    pos: u32,
}

impl CompletedMarker {
    fn new(pos: u32) -> Self {
        CompletedMarker { pos }
    }

    pub(crate) fn precede(self, p: &mut Parser<'_>) -> Marker {
        let new_pos = p.start();

        match &mut p.events[self.pos as usize] {
            Event::Start { forward_parent, .. } => {
                *forward_parent = Some(new_pos.position - self.pos);
            }
            _ => unreachable!(),
        }

        new_pos
    }
}
