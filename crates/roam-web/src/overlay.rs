//! Mirrors the engine's `DialogueBox` into the page's HTML overlay.
//!
//! The page provides:
//! ```html
//! <div id="textbox"><p id="content"></p><a id="link" target="_blank"></a></div>
//! ```
//! The DOM is only touched when the dialogue revision changes.

use roam_engine::DialogueBox;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlAnchorElement, HtmlElement};

pub const TEXTBOX_ID: &str = "textbox";
pub const CONTENT_ID: &str = "content";
pub const LINK_ID: &str = "link";

/// What the overlay should show after a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayUpdate {
    pub visible: bool,
    pub text: String,
    pub link: Option<String>,
}

#[derive(Debug, Default)]
pub struct DialogueOverlay {
    last_revision: Option<u64>,
    warned_missing: bool,
}

impl DialogueOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// The update to apply, or `None` if the page already shows this revision.
    /// Keeps reporting the same update until `mark_applied` is called.
    pub fn pending(&self, dialogue: &DialogueBox) -> Option<OverlayUpdate> {
        if self.last_revision == Some(dialogue.revision()) {
            return None;
        }
        Some(OverlayUpdate {
            visible: dialogue.is_open(),
            text: dialogue.visible_text().to_string(),
            // The link appears once the text has finished typing.
            link: if dialogue.is_typing() {
                None
            } else {
                dialogue.link().map(str::to_string)
            },
        })
    }

    /// Record that the page now shows the dialogue's current revision.
    pub fn mark_applied(&mut self, dialogue: &DialogueBox) {
        self.last_revision = Some(dialogue.revision());
    }

    /// Push pending changes into the DOM. A revision only counts as shown
    /// once the elements were found and written.
    pub fn sync(&mut self, dialogue: &DialogueBox) {
        let Some(update) = self.pending(dialogue) else {
            return;
        };
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if apply(&document, &update) {
            self.mark_applied(dialogue);
        } else if !self.warned_missing {
            log::warn!(
                "dialogue overlay: page is missing #{} or #{}",
                TEXTBOX_ID,
                CONTENT_ID
            );
            self.warned_missing = true;
        }
    }
}

/// Returns false when the required elements are missing.
fn apply(document: &Document, update: &OverlayUpdate) -> bool {
    let textbox = document
        .get_element_by_id(TEXTBOX_ID)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    let content = document.get_element_by_id(CONTENT_ID);
    let (Some(textbox), Some(content)) = (textbox, content) else {
        return false;
    };

    let display = if update.visible { "block" } else { "none" };
    textbox.style().set_property("display", display).ok();
    content.set_text_content(Some(&update.text));

    // The link element is optional.
    if let Some(anchor) = document
        .get_element_by_id(LINK_ID)
        .and_then(|el| el.dyn_into::<HtmlAnchorElement>().ok())
    {
        match &update.link {
            Some(url) => {
                anchor.set_href(url);
                anchor.set_text_content(Some(url));
                anchor.style().set_property("display", "inline").ok();
            }
            None => {
                anchor.style().set_property("display", "none").ok();
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    /// What `sync` does when the page has every element.
    fn take(overlay: &mut DialogueOverlay, dialogue: &DialogueBox) -> Option<OverlayUpdate> {
        let update = overlay.pending(dialogue)?;
        overlay.mark_applied(dialogue);
        Some(update)
    }

    #[test]
    fn first_sync_always_reports() {
        let mut overlay = DialogueOverlay::new();
        let dialogue = DialogueBox::default();
        let update = take(&mut overlay, &dialogue).unwrap();
        assert!(!update.visible);
        assert_eq!(update.text, "");
    }

    #[test]
    fn unchanged_revision_is_skipped() {
        let mut overlay = DialogueOverlay::new();
        let mut dialogue = DialogueBox::new(0.02);
        dialogue.open("meow", None);
        assert!(take(&mut overlay, &dialogue).is_some());
        assert!(take(&mut overlay, &dialogue).is_none());

        dialogue.tick(0.001);
        assert!(take(&mut overlay, &dialogue).is_none());

        dialogue.tick(0.02);
        assert_eq!(take(&mut overlay, &dialogue).unwrap().text, "m");
    }

    #[test]
    fn link_shows_after_typing_finishes() {
        let mut overlay = DialogueOverlay::new();
        let mut dialogue = DialogueBox::new(0.02);
        dialogue.open("my code", Some("https://github.com/".into()));
        assert_eq!(take(&mut overlay, &dialogue).unwrap().link, None);

        dialogue.skip();
        let update = take(&mut overlay, &dialogue).unwrap();
        assert_eq!(update.text, "my code");
        assert_eq!(update.link.as_deref(), Some("https://github.com/"));

        dialogue.close();
        let update = take(&mut overlay, &dialogue).unwrap();
        assert!(!update.visible);
    }

    #[test]
    fn unapplied_update_is_reported_again() {
        let mut overlay = DialogueOverlay::new();
        let mut dialogue = DialogueBox::new(0.02);
        dialogue.open("hi", None);

        // Nothing marked yet, e.g. the page lacked #textbox.
        let first = overlay.pending(&dialogue).unwrap();
        assert_eq!(overlay.pending(&dialogue), Some(first));

        overlay.mark_applied(&dialogue);
        assert!(overlay.pending(&dialogue).is_none());

        dialogue.close();
        assert!(overlay.pending(&dialogue).is_some());
        assert!(overlay.pending(&dialogue).is_some());
    }
}
