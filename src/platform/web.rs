//! DOM presenter
//!
//! Positions plain `div`s with `translate3d` transforms. Pole elements are
//! kept in a map keyed by obstacle ID and synced from simulation state every
//! frame, so the simulation never holds DOM handles.

use std::collections::HashMap;

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use super::Presenter;
use crate::settings::Character;
use crate::sim::{Obstacle, PlayerState, RunSummary};

struct PolePair {
    top: Element,
    bottom: Element,
}

pub struct DomPresenter {
    document: Document,
    area: Element,
    character: Element,
    /// Sprite declaration kept in front of the per-frame transform
    sprite_style: String,
    poles: HashMap<u32, PolePair>,
    field_height: f32,
}

impl DomPresenter {
    /// Clear the game area and build ground, ceiling and character
    pub fn new(
        document: Document,
        area: Element,
        character: Character,
        field_height: f32,
    ) -> Result<Self, JsValue> {
        area.set_inner_html("");

        for class in ["ground", "ceiling"] {
            let el = document.create_element("div")?;
            el.set_class_name(class);
            area.append_child(&el)?;
        }

        let el = document.create_element("div")?;
        el.set_class_name("character-element");
        let sprite_style = match character.image() {
            Some(image) => format!("background-image: url('{}');", image),
            None => {
                el.set_text_content(Some(&character.placeholder_label()));
                el.class_list().add_1("placeholder")?;
                String::new()
            }
        };
        area.append_child(&el)?;

        Ok(Self {
            document,
            area,
            character: el,
            sprite_style,
            poles: HashMap::new(),
            field_height,
        })
    }

    fn create_pole(&self, class: &str) -> Result<Element, JsValue> {
        let pole = self.document.create_element("div")?;
        pole.set_class_name(class);
        let body = self.document.create_element("div")?;
        body.set_class_name("fire-pole-body");
        pole.append_child(&body)?;
        self.area.append_child(&pole)?;
        Ok(pole)
    }

    fn sync_poles(&mut self, obstacles: &[Obstacle]) -> Result<(), JsValue> {
        self.poles.retain(|id, pair| {
            let live = obstacles.iter().any(|o| o.id == *id);
            if !live {
                pair.top.remove();
                pair.bottom.remove();
            }
            live
        });

        for o in obstacles {
            if !self.poles.contains_key(&o.id) {
                let pair = PolePair {
                    top: self.create_pole("fire-pole top")?,
                    bottom: self.create_pole("fire-pole bottom")?,
                };
                self.poles.insert(o.id, pair);
            }
            if let Some(pair) = self.poles.get(&o.id) {
                let bottom_height = (self.field_height - o.gap_bottom()).max(0.0);
                pair.top.set_attribute(
                    "style",
                    &format!("height: {}px; transform: translate3d({}px, 0, 0)", o.gap_top, o.x),
                )?;
                pair.bottom.set_attribute(
                    "style",
                    &format!("height: {}px; transform: translate3d({}px, 0, 0)", bottom_height, o.x),
                )?;
            }
        }
        Ok(())
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }
}

impl Presenter for DomPresenter {
    fn render(&mut self, player: &PlayerState, obstacles: &[Obstacle]) {
        let style = format!(
            "{} transform: translate3d({}px, {}px, 0) rotate({}deg)",
            self.sprite_style,
            player.x(),
            player.y(),
            player.tilt_degrees()
        );
        if self.character.set_attribute("style", &style).is_err() {
            log::warn!("Failed to position character");
        }

        if let Err(e) = self.sync_poles(obstacles) {
            log::warn!("Failed to sync poles: {:?}", e);
        }
    }

    fn show_score(&mut self, score: u32) {
        self.set_text("scoreDisplay", &format!("Score: {}", score));
    }

    fn show_game_over(&mut self, summary: &RunSummary) {
        self.set_text("finalScore", &format!("Final Score: {}", summary.score));
        self.set_text("highScore", &format!("High Score: {}", summary.high_score));
    }
}

impl Drop for DomPresenter {
    fn drop(&mut self) {
        for (_, pair) in self.poles.drain() {
            pair.top.remove();
            pair.bottom.remove();
        }
    }
}
