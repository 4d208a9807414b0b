use crate::io;
use crate::rendering::export_image;
use crate::state::AppState;
use crate::ui::AppWidgets;
use gtk4::prelude::*;
use gtk4::{Application, ApplicationWindow, FileChooserAction, FileChooserNative, FileFilter, ResponseType};
use std::cell::RefCell;
use std::rc::Rc;

pub const EXPORT_WIDTH: i32 = 2400;
pub const EXPORT_HEIGHT: i32 = 1400;

pub fn setup(
    app: &Application,
    window: &ApplicationWindow,
    state: Rc<RefCell<AppState>>,
    widgets: Rc<AppWidgets>,
) {
    // --- OPEN DATASET ---
    let open_action = gtk4::gio::SimpleAction::new("open", None);
    let win_weak = window.downgrade();
    let state_weak = Rc::downgrade(&state);
    let widgets_weak = Rc::downgrade(&widgets);

    open_action.connect_activate(move |_, _| {
        let Some(win) = win_weak.upgrade() else { return };

        let dialog = FileChooserNative::new(
            Some("Open Element Data"),
            Some(&win),
            FileChooserAction::Open,
            Some("Open"),
            Some("Cancel"),
        );

        let filter_json = FileFilter::new();
        filter_json.set_name(Some("Element data (*.json)"));
        filter_json.add_pattern("*.json");
        dialog.add_filter(&filter_json);

        let state_inner = state_weak.clone();
        let widgets_inner = widgets_weak.clone();

        dialog.connect_response(move |d, response| {
            if response == ResponseType::Accept {
                if let Some(path) = d.file().and_then(|f| f.path()) {
                    if let (Some(st), Some(w)) = (state_inner.upgrade(), widgets_inner.upgrade()) {
                        log::info!("Opening {}", path.display());
                        let (st_done, w_done) = (st.clone(), w.clone());
                        io::spawn_load(path, st.clone(), move || w_done.refresh(&st_done.borrow()));
                        // Shows the loading message until the read completes
                        w.refresh(&st.borrow());
                    }
                }
            }
            d.destroy();
        });
        dialog.show();
    });
    app.add_action(&open_action);

    // --- EXPORT IMAGE ---
    let export_action = gtk4::gio::SimpleAction::new("export", None);
    let win_weak_e = window.downgrade();
    let state_weak_e = Rc::downgrade(&state);

    export_action.connect_activate(move |_, _| {
        let Some(win) = win_weak_e.upgrade() else { return };
        let state_inner = state_weak_e.clone();

        let dialog = FileChooserNative::new(
            Some("Export Image"),
            Some(&win),
            FileChooserAction::Save,
            Some("Export"),
            Some("Cancel"),
        );

        let filter_png = FileFilter::new();
        filter_png.set_name(Some("PNG Image (*.png)"));
        filter_png.add_pattern("*.png");
        dialog.add_filter(&filter_png);
        let filter_pdf = FileFilter::new();
        filter_pdf.set_name(Some("PDF Document (*.pdf)"));
        filter_pdf.add_pattern("*.pdf");
        dialog.add_filter(&filter_pdf);

        dialog.set_filter(&filter_png);
        dialog.set_current_name("periodic-table.png");

        dialog.connect_response(move |d, response| {
            if response == ResponseType::Accept {
                if let Some(path) = d.file().and_then(|f| f.path()) {
                    let path_str = path.to_string_lossy().to_string();
                    let is_pdf = path_str.to_lowercase().ends_with(".pdf");
                    if let Some(st) = state_inner.upgrade() {
                        if let Err(e) =
                            export_image(&st.borrow(), &path_str, EXPORT_WIDTH, EXPORT_HEIGHT, is_pdf)
                        {
                            log::error!("Export failed: {}", e);
                        }
                    }
                }
            }
            d.destroy();
        });
        dialog.show();
    });
    app.add_action(&export_action);

    // --- QUIT ---
    let quit_action = gtk4::gio::SimpleAction::new("quit", None);
    let app_weak = app.downgrade();
    quit_action.connect_activate(move |_, _| {
        if let Some(app) = app_weak.upgrade() {
            app.quit();
        }
    });
    app.add_action(&quit_action);
}
