//! Typewriter dialogue box.
//!
//! Text is revealed one character at a time on a fixed interval. The box
//! itself holds only state; the web overlay mirrors it into the page and
//! uses `revision()` to skip frames where nothing changed.

/// Default reveal interval, in seconds per character.
pub const DEFAULT_SECS_PER_CHAR: f32 = 0.02;

#[derive(Debug, Clone)]
pub struct DialogueBox {
    secs_per_char: f32,
    text: String,
    /// Total characters (Unicode scalar values) in `text`.
    total: usize,
    /// Characters currently revealed.
    shown: usize,
    timer: f32,
    open: bool,
    link: Option<String>,
    revision: u64,
}

impl DialogueBox {
    pub fn new(secs_per_char: f32) -> Self {
        Self {
            secs_per_char,
            text: String::new(),
            total: 0,
            shown: 0,
            timer: 0.0,
            open: false,
            link: None,
            revision: 0,
        }
    }

    pub fn set_secs_per_char(&mut self, secs_per_char: f32) {
        self.secs_per_char = secs_per_char;
    }

    pub fn secs_per_char(&self) -> f32 {
        self.secs_per_char
    }

    /// Show the box and start typing `text` from the beginning.
    /// Anything still being typed is discarded.
    pub fn open(&mut self, text: impl Into<String>, link: Option<String>) {
        self.text = text.into();
        self.total = self.text.chars().count();
        self.shown = 0;
        self.timer = 0.0;
        self.open = true;
        self.link = link;
        self.revision += 1;
        log::debug!("dialogue opened ({} chars)", self.total);
    }

    /// Advance the typewriter. Returns true if new characters appeared.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.is_typing() {
            return false;
        }
        if self.secs_per_char <= 0.0 {
            return self.skip();
        }

        self.timer += dt;
        let before = self.shown;
        while self.timer >= self.secs_per_char && self.shown < self.total {
            self.timer -= self.secs_per_char;
            self.shown += 1;
        }
        if self.shown == self.total {
            self.timer = 0.0;
        }

        if self.shown != before {
            self.revision += 1;
            true
        } else {
            false
        }
    }

    /// Reveal the rest of the text at once. Returns true if anything changed.
    pub fn skip(&mut self) -> bool {
        if !self.is_typing() {
            return false;
        }
        self.shown = self.total;
        self.timer = 0.0;
        self.revision += 1;
        true
    }

    /// Hide the box and stop typing. Returns whether it was open.
    pub fn close(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        self.shown = self.total;
        self.timer = 0.0;
        self.revision += 1;
        log::debug!("dialogue closed");
        true
    }

    /// The part of the text revealed so far.
    pub fn visible_text(&self) -> &str {
        let end = self
            .text
            .char_indices()
            .nth(self.shown)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len());
        &self.text[..end]
    }

    pub fn full_text(&self) -> &str {
        &self.text
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open and still revealing characters.
    pub fn is_typing(&self) -> bool {
        self.open && self.shown < self.total
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Increases on every visible change (open, close, new characters).
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl Default for DialogueBox {
    fn default() -> Self {
        Self::new(DEFAULT_SECS_PER_CHAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_starts_empty_and_types() {
        let mut dialogue = DialogueBox::new(0.02);
        dialogue.open("Hello", None);
        assert!(dialogue.is_open());
        assert!(dialogue.is_typing());
        assert_eq!(dialogue.visible_text(), "");

        dialogue.tick(0.05);
        assert_eq!(dialogue.visible_text(), "He");

        dialogue.tick(1.0);
        assert_eq!(dialogue.visible_text(), "Hello");
        assert!(!dialogue.is_typing());
        assert!(dialogue.is_open());
    }

    #[test]
    fn reopen_discards_previous_text() {
        let mut dialogue = DialogueBox::new(0.02);
        dialogue.open("first message", None);
        dialogue.tick(0.1);
        dialogue.open("second", Some("https://example.com".into()));
        assert_eq!(dialogue.visible_text(), "");
        assert_eq!(dialogue.full_text(), "second");
        assert_eq!(dialogue.link(), Some("https://example.com"));
        dialogue.tick(0.021);
        assert_eq!(dialogue.visible_text(), "s");
    }

    #[test]
    fn skip_reveals_everything() {
        let mut dialogue = DialogueBox::new(0.02);
        dialogue.open("abc", None);
        assert!(dialogue.skip());
        assert_eq!(dialogue.visible_text(), "abc");
        assert!(!dialogue.skip());
    }

    #[test]
    fn close_reports_whether_open() {
        let mut dialogue = DialogueBox::default();
        assert!(!dialogue.close());
        dialogue.open("hi", None);
        assert!(dialogue.close());
        assert!(!dialogue.is_open());
        assert!(!dialogue.is_typing());
        assert!(!dialogue.tick(1.0));
    }

    #[test]
    fn multibyte_text_is_never_split() {
        let mut dialogue = DialogueBox::new(0.02);
        dialogue.open("héllo 🐟", None);
        dialogue.tick(0.025);
        assert_eq!(dialogue.visible_text(), "h");
        dialogue.tick(0.02);
        assert_eq!(dialogue.visible_text(), "hé");
        dialogue.tick(0.1);
        assert_eq!(dialogue.visible_text(), "héllo 🐟");
    }

    #[test]
    fn revision_tracks_visible_changes() {
        let mut dialogue = DialogueBox::new(0.02);
        let r0 = dialogue.revision();
        dialogue.open("ab", None);
        let r1 = dialogue.revision();
        assert!(r1 > r0);

        dialogue.tick(0.001);
        assert_eq!(dialogue.revision(), r1);

        dialogue.tick(0.1);
        let r2 = dialogue.revision();
        assert!(r2 > r1);

        dialogue.tick(0.1);
        assert_eq!(dialogue.revision(), r2);

        dialogue.close();
        assert!(dialogue.revision() > r2);
    }

    #[test]
    fn zero_interval_reveals_immediately() {
        let mut dialogue = DialogueBox::new(0.0);
        dialogue.open("instant", None);
        dialogue.tick(0.0);
        assert_eq!(dialogue.visible_text(), "instant");
    }
}
