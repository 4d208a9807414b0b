// src/menu/mod.rs

use crate::state::AppState;
use crate::ui::AppWidgets;
use gtk4::prelude::*;
use gtk4::{Application, ApplicationWindow};
use std::cell::RefCell;
use std::rc::Rc;

pub mod actions_file;
pub mod actions_help;
pub mod actions_view;

pub fn build_menu_and_actions(
  app: &Application,
  window: &ApplicationWindow,
  state: Rc<RefCell<AppState>>,
  widgets: Rc<AppWidgets>,
) -> gtk4::Box {
  actions_file::setup(app, window, state.clone(), widgets.clone());
  actions_view::setup(app, state, widgets);
  actions_help::setup(app, window);

  // Keyboard Shortcuts
  app.set_accels_for_action("app.open", &["<Primary>o"]);
  app.set_accels_for_action("app.export", &["<Primary>e"]);
  app.set_accels_for_action("app.quit", &["<Primary>q"]);
  app.set_accels_for_action("app.view_reset", &["<Primary>r"]);
  app.set_accels_for_action("app.toggle_names", &["<Primary>n"]);
  app.set_accels_for_action("app.toggle_console", &["F9"]);

  // --- BUILD MENU BAR ---
  let menu_bar = gtk4::Box::new(gtk4::Orientation::Horizontal, 0);
  let root_model = gtk4::gio::Menu::new();

  let file_menu = gtk4::gio::Menu::new();
  file_menu.append(Some("Open Element Data..."), Some("app.open"));
  file_menu.append(Some("Export Image/PDF..."), Some("app.export"));
  file_menu.append(Some("Quit"), Some("app.quit"));
  root_model.append_submenu(Some("File"), &file_menu);

  let view_menu = gtk4::gio::Menu::new();
  view_menu.append(Some("Reset View"), Some("app.view_reset"));
  view_menu.append(Some("Clear Selection"), Some("app.clear_selection"));
  view_menu.append(Some("Show Element Names"), Some("app.toggle_names"));
  view_menu.append(Some("Toggle Console"), Some("app.toggle_console"));
  root_model.append_submenu(Some("View"), &view_menu);

  let help_menu = gtk4::gio::Menu::new();
  help_menu.append(Some("About"), Some("app.about"));
  root_model.append_submenu(Some("Help"), &help_menu);

  let popover_bar = gtk4::PopoverMenuBar::from_model(Some(&root_model));
  menu_bar.append(&popover_bar);

  menu_bar
}
