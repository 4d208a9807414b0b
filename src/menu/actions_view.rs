// src/menu/actions_view.rs

use crate::state::AppState;
use crate::ui::AppWidgets;
use gtk4::prelude::*;
use gtk4::Application;
use std::cell::RefCell;
use std::rc::Rc;

pub fn setup(app: &Application, state: Rc<RefCell<AppState>>, widgets: Rc<AppWidgets>) {
    // 1. Reset view
    let act_reset = gtk4::gio::SimpleAction::new("view_reset", None);
    let s_reset = state.clone();
    let w_reset = Rc::downgrade(&widgets);
    act_reset.connect_activate(move |_, _| {
        s_reset.borrow_mut().view.reset();
        if let Some(w) = w_reset.upgrade() {
            w.refresh(&s_reset.borrow());
        }
    });
    app.add_action(&act_reset);

    // 2. Clear selection
    let act_clear = gtk4::gio::SimpleAction::new("clear_selection", None);
    let s_clear = state.clone();
    let w_clear = Rc::downgrade(&widgets);
    act_clear.connect_activate(move |_, _| {
        let changed = s_clear.borrow_mut().ui.clear_selection();
        if let (true, Some(w)) = (changed, w_clear.upgrade()) {
            w.refresh(&s_clear.borrow());
        }
    });
    app.add_action(&act_clear);

    // 3. Toggle element names on tiles
    let act_names = gtk4::gio::SimpleAction::new("toggle_names", None);
    let s_names = state;
    let w_names = Rc::downgrade(&widgets);
    act_names.connect_activate(move |_, _| {
        {
            let mut st = s_names.borrow_mut();
            st.config.style.show_names = !st.config.style.show_names;
        }
        if let Some(w) = w_names.upgrade() {
            w.scene.queue_draw();
        }
    });
    app.add_action(&act_names);

    // 4. Console
    let act_console = gtk4::gio::SimpleAction::new("toggle_console", None);
    let w_console = Rc::downgrade(&widgets);
    act_console.connect_activate(move |_, _| {
        if let Some(w) = w_console.upgrade() {
            w.console.set_reveal_child(!w.console.reveals_child());
        }
    });
    app.add_action(&act_console);
}
