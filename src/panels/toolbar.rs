// src/panels/toolbar.rs

use crate::config::ColorMode;
use crate::state::AppState;
use crate::ui::AppWidgets;
use gtk4::prelude::*;
use gtk4::{
  Align, Box as GtkBox, Label, ListBox, ListBoxRow, MenuButton, Orientation, Popover, SelectionMode,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// The color-mode dropdown: a menu button whose popover lists every mode.
pub struct Toolbar {
  pub container: GtkBox,
  button: MenuButton,
  popover: Popover,
  list: ListBox,
}

impl Toolbar {
  pub fn new() -> Self {
    let container = GtkBox::new(Orientation::Horizontal, 8);
    container.set_margin_start(10);
    container.set_margin_end(10);
    container.set_margin_top(6);
    container.set_margin_bottom(6);

    let caption = Label::new(Some("Color by:"));
    caption.set_halign(Align::Start);
    container.append(&caption);

    let list = ListBox::new();
    list.set_selection_mode(SelectionMode::Single);
    for mode in ColorMode::ALL {
      let row = Label::new(Some(mode.label()));
      row.set_xalign(0.0);
      row.set_margin_start(8);
      row.set_margin_end(8);
      row.set_margin_top(4);
      row.set_margin_bottom(4);
      list.append(&row);
    }

    // Separates the categorical modes from the numeric ones
    list.set_header_func(|row, before| {
      let mode_at = |r: &ListBoxRow| usize::try_from(r.index()).ok().and_then(ColorMode::from_index);
      let starts_numeric = match (before.and_then(mode_at), mode_at(row)) {
        (Some(prev), Some(mode)) => prev.is_categorical() && !mode.is_categorical(),
        _ => false,
      };
      if starts_numeric {
        let header = Label::new(Some("Properties"));
        header.set_xalign(0.0);
        header.set_margin_start(8);
        header.set_margin_top(6);
        header.add_css_class("dim-label");
        row.set_header(Some(&header));
      } else {
        row.set_header(None::<&gtk4::Widget>);
      }
    });

    let popover = Popover::new();
    popover.set_child(Some(&list));

    let button = MenuButton::new();
    button.set_popover(Some(&popover));
    container.append(&button);

    Self {
      container,
      button,
      popover,
      list,
    }
  }

  /// Connects the dropdown to the shared state. Called once the widget set
  /// exists, since choosing a mode refreshes every view.
  pub fn bind(&self, state: Rc<RefCell<AppState>>, widgets: Weak<AppWidgets>) {
    let s = state.clone();
    self.popover.connect_show(move |_| {
      s.borrow_mut().ui.set_dropdown_open(true);
    });

    let s = state.clone();
    self.popover.connect_closed(move |_| {
      s.borrow_mut().ui.set_dropdown_open(false);
    });

    let popover = self.popover.clone();
    self.list.connect_row_activated(move |_, row| {
      let Some(mode) = usize::try_from(row.index()).ok().and_then(ColorMode::from_index) else {
        return;
      };
      let changed = state.borrow_mut().ui.set_color_mode(mode);
      popover.popdown();

      if changed {
        log::info!("Color mode: {}", mode.label());
        if let Some(w) = widgets.upgrade() {
          w.refresh(&state.borrow());
        }
      }
    });
  }

  pub fn update(&self, state: &AppState) {
    let mode = state.ui.color_mode;
    self.button.set_label(mode.label());
    if let Some(row) = self.list.row_at_index(mode.index() as i32) {
      self.list.select_row(Some(&row));
    }
  }
}
