use wasm_bindgen::prelude::*;
use roam_engine::*;

mod config;
mod content;
mod game;
mod player;
mod room;

use game::PortfolioRoom;

roam_web::export_game!(PortfolioRoom, "portfolio-room");
