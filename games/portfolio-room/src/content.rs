//! What is in the room and what it says.

use glam::Vec2;

/// How a prop looks and whether it blocks movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Look {
    /// A still sprite with a solid hitbox (size in sheet pixels).
    Furniture { sprite: &'static str, hitbox_px: Vec2 },
    /// An animated sheet with a solid hitbox.
    Critter { sheet: &'static str, anim: &'static str, hitbox_px: Vec2 },
    /// A floating orb; walk-through.
    Orb { sprite: &'static str },
}

/// One kind of interactable prop, spawned at every marker named `marker`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prop {
    pub marker: &'static str,
    pub name: &'static str,
    pub look: Look,
    pub dialogue: &'static str,
    /// Index into `LINKS`.
    pub link: Option<usize>,
}

pub const LINKS: &[&str] = &[
    "https://github.com/",
    "https://www.linkedin.com/",
    "https://x.com/",
];

pub const PROPS: &[Prop] = &[
    Prop {
        marker: "cat",
        name: "cat",
        look: Look::Critter { sheet: "cat", anim: "sleep", hitbox_px: Vec2::new(12.0, 6.0) },
        dialogue: "The cat opens one eye, decides you are not food, and goes back to sleep. \
                   She has been supervising this portfolio since day one.",
        link: None,
    },
    Prop {
        marker: "table",
        name: "table",
        look: Look::Furniture { sprite: "table", hitbox_px: Vec2::new(14.0, 8.0) },
        dialogue: "A table covered in sketches, sticky notes and one very cold coffee. \
                   Most projects start here as a doodle.",
        link: None,
    },
    Prop {
        marker: "bookshelf",
        name: "bookshelf",
        look: Look::Furniture { sprite: "bookshelf", hitbox_px: Vec2::new(16.0, 8.0) },
        dialogue: "Books on systems programming, game design and far too many on Rust. \
                   A few have bookmarks in the chapter about lifetimes.",
        link: None,
    },
    Prop {
        marker: "pc",
        name: "pc",
        look: Look::Furniture { sprite: "pc", hitbox_px: Vec2::new(14.0, 8.0) },
        dialogue: "The PC hums quietly. On screen: this very room, running in your browser, \
                   compiled from Rust to WebAssembly.",
        link: None,
    },
    Prop {
        marker: "goldfish",
        name: "goldfish",
        look: Look::Critter { sheet: "goldfish", anim: "swim", hitbox_px: Vec2::new(10.0, 6.0) },
        dialogue: "Bubbles the goldfish swims in circles. He is the only one here who \
                   never complains about merge conflicts.",
        link: None,
    },
    Prop {
        marker: "github",
        name: "github orb",
        look: Look::Orb { sprite: "orb-github" },
        dialogue: "A glowing orb with an octocat inside. Confirm again to browse the code.",
        link: Some(0),
    },
    Prop {
        marker: "linkedin",
        name: "linkedin orb",
        look: Look::Orb { sprite: "orb-linkedin" },
        dialogue: "A blue orb humming with professional energy. Confirm again to connect.",
        link: Some(1),
    },
    Prop {
        marker: "x",
        name: "x orb",
        look: Look::Orb { sprite: "orb-x" },
        dialogue: "A dark orb full of short messages. Confirm again to follow along.",
        link: Some(2),
    },
];

/// Asset manifest used until the page provides one.
pub const DEFAULT_MANIFEST: &str = r#"{
    "atlases": [
        { "name": "player", "cols": 4, "rows": 8, "path": "sprites/player.png" },
        { "name": "room", "cols": 8, "rows": 8, "path": "sprites/room.png" }
    ],
    "sheets": {
        "player": {
            "atlas": 0, "cols": 4, "rows": 8,
            "anims": {
                "walk-down-idle": 0,
                "walk-down": { "from": 0, "to": 3, "loop": true },
                "walk-left-down-idle": 4,
                "walk-left-down": { "from": 4, "to": 7, "loop": true },
                "walk-left-idle": 8,
                "walk-left": { "from": 8, "to": 11, "loop": true },
                "walk-left-up-idle": 12,
                "walk-left-up": { "from": 12, "to": 15, "loop": true },
                "walk-up-idle": 16,
                "walk-up": { "from": 16, "to": 19, "loop": true },
                "walk-right-up-idle": 20,
                "walk-right-up": { "from": 20, "to": 23, "loop": true },
                "walk-right-idle": 24,
                "walk-right": { "from": 24, "to": 27, "loop": true },
                "walk-right-down-idle": 28,
                "walk-right-down": { "from": 28, "to": 31, "loop": true }
            }
        },
        "cat": {
            "atlas": 1, "cols": 8, "rows": 8,
            "anims": { "sleep": { "from": 16, "to": 19, "loop": true, "speed": 3 } }
        },
        "goldfish": {
            "atlas": 1, "cols": 8, "rows": 8,
            "anims": { "swim": { "from": 24, "to": 27, "loop": true, "speed": 6 } }
        }
    },
    "sprites": {
        "floor": { "atlas": 1, "col": 0, "row": 0 },
        "wall": { "atlas": 1, "col": 1, "row": 0 },
        "table": { "atlas": 1, "col": 0, "row": 1 },
        "bookshelf": { "atlas": 1, "col": 1, "row": 1 },
        "pc": { "atlas": 1, "col": 2, "row": 1 },
        "orb-github": { "atlas": 1, "col": 0, "row": 4 },
        "orb-linkedin": { "atlas": 1, "col": 1, "row": 4 },
        "orb-x": { "atlas": 1, "col": 2, "row": 4 },
        "hint": { "atlas": 1, "col": 7, "row": 0 }
    },
    "sounds": {
        "blip": { "path": "sounds/blip.ogg", "event_id": 1 }
    }
}"#;
