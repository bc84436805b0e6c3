//! Toolkit-neutral styled text.
//!
//! Renderers emit [`Line`]s of [`Span`]s tagged with a semantic [`Tone`]; the
//! front-end decides what each tone looks like on screen.

/// Semantic color of a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tone {
    #[default]
    Plain,
    Bold,
    /// Grid placeholders, axis rules, secondary text.
    Dim,
    /// Below the warn threshold.
    Ok,
    Warn,
    Hot,
    /// Memory bars and memory-used figures.
    Accent,
}

/// Utilization bucket: ≥80 hot, ≥40 warn, otherwise ok.
pub fn util_tone(percent: i64) -> Tone {
    if percent >= 80 {
        Tone::Hot
    } else if percent >= 40 {
        Tone::Warn
    } else {
        Tone::Ok
    }
}

/// Temperature bucket in °C: ≥80 hot, ≥60 warn, otherwise ok.
pub fn temp_tone(celsius: i64) -> Tone {
    if celsius >= 80 {
        Tone::Hot
    } else if celsius >= 60 {
        Tone::Warn
    } else {
        Tone::Ok
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub tone: Tone,
}

impl Span {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Plain)
    }

    pub fn dim(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Dim)
    }
}

/// A row of spans. Adjacent pushes with the same tone are merged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, span: Span) {
        if span.text.is_empty() {
            return;
        }
        match self.spans.last_mut() {
            Some(last) if last.tone == span.tone => last.text.push_str(&span.text),
            _ => self.spans.push(span),
        }
    }

    pub fn with(mut self, span: Span) -> Self {
        self.push(span);
        self
    }

    /// Text with styling stripped.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Width in characters.
    pub fn width(&self) -> usize {
        self.spans.iter().map(|s| s.text.chars().count()).sum()
    }
}

impl From<Span> for Line {
    fn from(span: Span) -> Self {
        Line::new().with(span)
    }
}
