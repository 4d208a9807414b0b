// src/panels/legend.rs

use crate::rendering::legend::{build_legend, draw_legend, required_height};
use crate::state::AppState;
use gtk4::prelude::*;
use gtk4::{Align, DrawingArea};
use std::cell::RefCell;
use std::rc::Rc;

const WIDTH: i32 = 220;

pub struct LegendPanel {
  pub area: DrawingArea,
}

impl LegendPanel {
  pub fn new(state: Rc<RefCell<AppState>>) -> Self {
    let area = DrawingArea::new();
    area.set_content_width(WIDTH);
    area.set_halign(Align::Start);
    area.set_valign(Align::End);
    area.set_margin_start(12);
    area.set_margin_bottom(12);
    // Pointer events fall through to the scene below.
    area.set_can_target(false);

    area.set_draw_func(move |_, cr, w, h| {
      let st = state.borrow();
      let legend = build_legend(st.ui.color_mode, st.dataset());
      if let Err(e) = draw_legend(cr, &legend, w as f64, h as f64) {
        log::warn!("Legend draw failed: {}", e);
      }
    });

    Self { area }
  }

  pub fn update(&self, state: &AppState) {
    let legend = build_legend(state.ui.color_mode, state.dataset());
    self.area.set_content_height(required_height(&legend).ceil() as i32);
    self.area.set_visible(state.dataset().is_some());
    self.area.queue_draw();
  }
}
