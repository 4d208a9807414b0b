// src/ui/interactions.rs

use crate::rendering::{picking, scene};
use crate::state::AppState;
use crate::ui::AppWidgets;
use gdk4::Key;
use gtk4::glib;
use gtk4::prelude::*;
use gtk4::{
  ApplicationWindow, EventControllerKey, EventControllerMotion, EventControllerScroll,
  EventControllerScrollFlags, GestureDrag,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Degrees of rotation per pixel dragged.
const DRAG_SENSITIVITY: f64 = 0.4;
/// Drags shorter than this (px) count as clicks.
const CLICK_SLOP: f64 = 4.0;

#[derive(Debug, Clone, Copy)]
struct DragStart {
  x: f64,
  y: f64,
  rot_x: f64,
  rot_y: f64,
}

/// One press-move-release gesture. Once the pointer has left the click slop
/// the gesture stays a drag, even if it comes back near where it started.
#[derive(Debug, Clone, Copy)]
struct DragTrack {
  start: DragStart,
  moved: bool,
}

impl DragTrack {
  fn new(start: DragStart) -> Self {
    Self { start, moved: false }
  }

  /// Rotation for the offset (dx, dy), or `None` while still inside the slop.
  fn update(&mut self, dx: f64, dy: f64) -> Option<(f64, f64)> {
    if !self.moved && dx.hypot(dy) < CLICK_SLOP {
      return None;
    }
    self.moved = true;
    Some(dragged_rotation(self.start, dx, dy))
  }

  fn is_click(&self) -> bool {
    !self.moved
  }
}

/// Zoom step for a vertical scroll delta; `None` for a zero delta.
fn zoom_factor(dy: f64) -> Option<f64> {
  if dy > 0.0 {
    Some(0.9)
  } else if dy < 0.0 {
    Some(1.1)
  } else {
    None
  }
}

fn scene_size(widgets: &AppWidgets) -> (f64, f64) {
  (widgets.scene.width() as f64, widgets.scene.height() as f64)
}

fn pick_at(st: &AppState, widgets: &AppWidgets, x: f64, y: f64) -> Option<u8> {
  let (w, h) = scene_size(widgets);
  let tiles = scene::calculate_scene(st, w, h);
  picking::pick(&tiles, x, y)
}

/// Recomputes the hovered tile for a pointer at `pointer`. Returns whether it changed.
fn refresh_hover(st: &mut AppState, size: (f64, f64), pointer: (f64, f64)) -> bool {
  if st.ui.selected.is_some() {
    return false;
  }
  let hit = match st.dataset() {
    Some(ds) => picking::pick_resting(
      ds,
      &st.ui,
      &st.view,
      &st.config.style,
      size,
      pointer.0,
      pointer.1,
    ),
    None => return false,
  };
  st.ui.set_hovered(hit)
}

/// Click semantics: a tile toggles its selection, empty space clears it.
fn click(state: &Rc<RefCell<AppState>>, widgets: &AppWidgets, x: f64, y: f64) {
  {
    let mut st = state.borrow_mut();
    if st.dataset().is_none() {
      return;
    }
    match pick_at(&st, widgets, x, y) {
      Some(id) => {
        st.ui.toggle_selected(id);
        match st.ui.selected.and_then(|n| st.dataset().and_then(|d| d.elements.get(n))) {
          Some(el) => log::debug!("Selected {} ({})", el.name, el.number),
          None => log::debug!("Selection cleared"),
        }
      }
      None => {
        if !st.ui.clear_selection() {
          return;
        }
        log::debug!("Selection cleared");
      }
    }
  }
  widgets.refresh(&state.borrow());
}

/// Rotation for a drag of (dx, dy) pixels from `start`.
fn dragged_rotation(start: DragStart, dx: f64, dy: f64) -> (f64, f64) {
  (
    start.rot_x - dy * DRAG_SENSITIVITY,
    start.rot_y + dx * DRAG_SENSITIVITY,
  )
}

pub fn setup_interactions(
  window: &ApplicationWindow,
  state: Rc<RefCell<AppState>>,
  widgets: Rc<AppWidgets>,
) {
  let da = widgets.scene.clone();
  // Last pointer position over the scene, for re-picking after view changes.
  let pointer: Rc<Cell<Option<(f64, f64)>>> = Rc::new(Cell::new(None));

  // 1. KEYBOARD
  let key_controller = EventControllerKey::new();
  let s = state.clone();
  let w = widgets.clone();
  let ptr = pointer.clone();
  key_controller.connect_key_pressed(move |_, keyval, _keycode, _mods| {
    let handled = {
      let mut st = s.borrow_mut();
      if keyval == Key::Escape {
        st.ui.clear_selection()
      } else if keyval == Key::r || keyval == Key::R {
        st.view.reset();
        log::debug!("View reset");
        if let Some(p) = ptr.get() {
          refresh_hover(&mut st, scene_size(&w), p);
        }
        true
      } else {
        false
      }
    };
    if handled {
      w.refresh(&s.borrow());
      glib::Propagation::Stop
    } else {
      glib::Propagation::Proceed
    }
  });
  window.add_controller(key_controller);

  // 2. HOVER
  let motion = EventControllerMotion::new();
  let s = state.clone();
  let w = widgets.clone();
  let ptr = pointer.clone();
  motion.connect_motion(move |_, x, y| {
    ptr.set(Some((x, y)));
    let changed = refresh_hover(&mut s.borrow_mut(), scene_size(&w), (x, y));
    if changed {
      w.refresh(&s.borrow());
    }
  });
  let s = state.clone();
  let w = widgets.clone();
  let ptr = pointer.clone();
  motion.connect_leave(move |_| {
    ptr.set(None);
    let changed = s.borrow_mut().ui.set_hovered(None);
    if changed {
      w.refresh(&s.borrow());
    }
  });
  da.add_controller(motion);

  // 3. DRAG (rotate) and CLICK (select)
  let drag = GestureDrag::new();
  drag.set_button(gdk4::BUTTON_PRIMARY);
  let track: Rc<Cell<Option<DragTrack>>> = Rc::new(Cell::new(None));

  let s = state.clone();
  let tr = track.clone();
  drag.connect_drag_begin(move |_, x, y| {
    let st = s.borrow();
    tr.set(Some(DragTrack::new(DragStart {
      x,
      y,
      rot_x: st.view.rot_x,
      rot_y: st.view.rot_y,
    })));
  });

  let s = state.clone();
  let tr = track.clone();
  let da_u = da.clone();
  drag.connect_drag_update(move |_, dx, dy| {
    let Some(mut t) = tr.get() else {
      return;
    };
    let rotation = t.update(dx, dy);
    tr.set(Some(t));
    if let Some((rx, ry)) = rotation {
      s.borrow_mut().view.set_rotation(rx, ry);
      da_u.queue_draw();
    }
  });

  let s = state.clone();
  let w = widgets.clone();
  let ptr = pointer.clone();
  drag.connect_drag_end(move |_, dx, dy| {
    let Some(mut t) = track.take() else {
      return;
    };
    let rotation = t.update(dx, dy);
    if t.is_click() {
      click(&s, &w, t.start.x, t.start.y);
      return;
    }
    let end = (t.start.x + dx, t.start.y + dy);
    ptr.set(Some(end));
    {
      let mut st = s.borrow_mut();
      if let Some((rx, ry)) = rotation {
        st.view.set_rotation(rx, ry);
      }
      refresh_hover(&mut st, scene_size(&w), end);
    }
    w.refresh(&s.borrow());
  });
  da.add_controller(drag);

  // 4. SCROLL (ZOOM)
  let scroll = EventControllerScroll::new(EventControllerScrollFlags::VERTICAL);
  let s = state.clone();
  let w = widgets.clone();
  let ptr = pointer;
  scroll.connect_scroll(move |_, _, dy| {
    let Some(factor) = zoom_factor(dy) else {
      return glib::Propagation::Proceed;
    };
    let changed = {
      let mut st = s.borrow_mut();
      st.view.zoom_by(factor);
      match ptr.get() {
        Some(p) => refresh_hover(&mut st, scene_size(&w), p),
        None => false,
      }
    };
    if changed {
      w.refresh(&s.borrow());
    } else {
      w.scene.queue_draw();
    }
    glib::Propagation::Stop
  });
  da.add_controller(scroll);

  // 5. RESIZE -> viewport class
  let s = state;
  let w = widgets.clone();
  let win = window.clone();
  da.connect_resize(move |_, _, _| {
    let changed = {
      let mut st = s.borrow_mut();
      let breakpoint = st.config.mobile_breakpoint;
      st.ui.update_viewport(win.width() as f64, breakpoint)
    };
    if changed {
      log::debug!("Viewport: {:?}", s.borrow().ui.viewport);
      // Relayout outside the current size allocation
      let (s, w) = (s.clone(), w.clone());
      glib::idle_add_local_once(move || w.refresh(&s.borrow()));
    }
  });
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::Config;
  use crate::model::dataset::{Dataset, ElementSet};

  #[test]
  fn test_dragged_rotation_is_relative_to_start() {
    let start = DragStart {
      x: 0.0,
      y: 0.0,
      rot_x: -20.0,
      rot_y: 10.0,
    };
    let (rx, ry) = dragged_rotation(start, 50.0, 25.0);
    assert!((rx - (-30.0)).abs() < 1e-9);
    assert!((ry - 30.0).abs() < 1e-9);

    // Same offset twice gives the same answer; updates do not accumulate.
    assert_eq!(dragged_rotation(start, 50.0, 25.0), (rx, ry));
  }

  fn origin() -> DragStart {
    DragStart {
      x: 100.0,
      y: 100.0,
      rot_x: -20.0,
      rot_y: 10.0,
    }
  }

  #[test]
  fn test_small_jitter_is_a_click() {
    let mut t = DragTrack::new(origin());
    assert_eq!(t.update(1.0, -1.5), None);
    assert_eq!(t.update(2.0, 2.0), None);
    assert!(t.is_click());
  }

  #[test]
  fn test_drag_out_and_back_is_not_a_click() {
    let mut t = DragTrack::new(origin());
    assert!(t.update(40.0, 0.0).is_some());
    // Back within the slop of the start: still a drag, rotation keeps following.
    let back = t.update(1.0, 0.5);
    assert_eq!(back, Some(dragged_rotation(origin(), 1.0, 0.5)));
    assert!(!t.is_click());
  }

  #[test]
  fn test_zoom_factor_ignores_zero_delta() {
    assert_eq!(zoom_factor(0.0), None);
    assert_eq!(zoom_factor(1.0), Some(0.9));
    assert_eq!(zoom_factor(-1.0), Some(1.1));
  }

  #[test]
  fn test_hover_follows_zoom_under_still_pointer() {
    let mut st = AppState::new(Config::default());
    let set = ElementSet::from_json_str(include_str!("../../assets/elements.json")).unwrap();
    st.set_dataset(Dataset::new(set));
    st.view.set_rotation(0.0, 0.0);
    let size = (1200.0, 800.0);

    let tiles = scene::build_scene(
      st.dataset().unwrap(),
      &st.ui,
      &st.view,
      &st.config.style,
      size.0,
      size.1,
    );
    let front = tiles.iter().find(|t| t.number == 1).and_then(|t| t.front()).unwrap();
    let p = (
      front.points.iter().map(|q| q[0]).sum::<f64>() / 4.0,
      front.points.iter().map(|q| q[1]).sum::<f64>() / 4.0,
    );

    assert!(refresh_hover(&mut st, size, p));
    assert_eq!(st.ui.hovered, Some(1));

    // Zooming out moves hydrogen away from the pointer, which is now off the grid.
    st.view.zoom_by(0.5);
    assert!(refresh_hover(&mut st, size, p));
    assert_eq!(st.ui.hovered, None);

    // Reset brings it back under the same pointer.
    st.view.reset();
    st.view.set_rotation(0.0, 0.0);
    assert!(refresh_hover(&mut st, size, p));
    assert_eq!(st.ui.hovered, Some(1));
  }

  #[test]
  fn test_no_hover_while_selected() {
    let mut st = AppState::new(Config::default());
    let set = ElementSet::from_json_str(include_str!("../../assets/elements.json")).unwrap();
    st.set_dataset(Dataset::new(set));
    st.ui.toggle_selected(8);
    assert!(!refresh_hover(&mut st, (1200.0, 800.0), (600.0, 400.0)));
    assert_eq!(st.ui.hovered, None);
  }
}
