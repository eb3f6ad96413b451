/// Marks an entity the player can walk up to and inspect.
///
/// When the player stands within the game's interaction radius the entity
/// becomes the interaction target; confirming opens a dialogue box with
/// `dialogue`. An optional `link` is shown alongside the text and reported
/// back to the page when the player confirms a finished dialogue.
#[derive(Debug, Clone, PartialEq)]
pub struct Interactable {
    /// Short name, also used in logs ("cat", "bookshelf").
    pub name: String,
    pub dialogue: String,
    pub link: Option<String>,
}

impl Interactable {
    pub fn new(name: impl Into<String>, dialogue: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dialogue: dialogue.into(),
            link: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}
