use gtk4::prelude::*;
use gtk4::{glib, Application, ApplicationWindow, DrawingArea, Orientation, Overlay, Separator, TextView};
use gtk4::Box as GtkBox;
use gtk4::{Revealer, RevealerTransitionType};
use log::LevelFilter;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

pub mod config;
pub mod io;
pub mod menu;
pub mod model;
pub mod panels;
pub mod rendering;
pub mod state;
pub mod ui;
pub mod utils;

use config::Config;
use panels::{DetailPanel, LegendPanel, Toolbar};
use state::AppState;
use ui::{setup_interactions, AppWidgets};

const APP_ID: &str = "org.mavensgroup.ptable3d";

fn main() -> glib::ExitCode {
    if let Err(e) = utils::logger::init(LevelFilter::Info) {
        eprintln!("Logger already installed: {}", e);
    }

    // GTK would treat the argument as a file to open; take it before `run`.
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "ptable3d".to_string());
    let data_arg = args.next().map(PathBuf::from);

    let app = Application::builder().application_id(APP_ID).build();
    app.connect_activate(move |app| build_ui(app, data_arg.clone()));
    app.run_with_args(&[program])
}

fn build_ui(app: &Application, data_arg: Option<PathBuf>) {
    let (config, config_msg) = Config::load();
    utils::logger::set_level(config.level_filter());

    let data_path = io::resolve_data_path(data_arg, &config);
    let state = Rc::new(RefCell::new(AppState::new(config)));

    let window = ApplicationWindow::builder()
        .application(app)
        .title("ptable3d - Interactive 3D Periodic Table")
        .default_width(1360)
        .default_height(860)
        .build();

    // 1. TOP LEVEL: menu, toolbar, main content, console
    let root_vbox = GtkBox::new(Orientation::Vertical, 0);
    window.set_child(Some(&root_vbox));

    // 2. SCENE with the legend floating in its corner
    let drawing_area = DrawingArea::new();
    drawing_area.set_hexpand(true);
    drawing_area.set_vexpand(true);
    drawing_area.set_focusable(true);

    let legend = LegendPanel::new(state.clone());
    let overlay = Overlay::new();
    overlay.set_child(Some(&drawing_area));
    overlay.add_overlay(&legend.area);
    overlay.set_hexpand(true);
    overlay.set_vexpand(true);

    let detail = DetailPanel::new();
    let main_box = GtkBox::new(Orientation::Horizontal, 0);
    main_box.append(&overlay);
    main_box.append(&detail.container);

    // 3. CONSOLE (log output), hidden behind F9
    let console_view = TextView::builder()
        .editable(false).cursor_visible(false).monospace(true)
        .left_margin(10).right_margin(10).top_margin(6).bottom_margin(6)
        .build();
    utils::logger::attach(&console_view);
    log::info!("{}", config_msg);
    let console = Revealer::builder()
        .transition_type(RevealerTransitionType::SlideUp)
        .child(&ui::console_frame(&console_view))
        .reveal_child(true)
        .build();

    let toolbar = Toolbar::new();

    let widgets = Rc::new(AppWidgets {
        scene: drawing_area.clone(),
        main_box: main_box.clone(),
        toolbar,
        legend,
        detail,
        console: console.clone(),
    });
    widgets.toolbar.bind(state.clone(), Rc::downgrade(&widgets));

    let menu_bar = menu::build_menu_and_actions(app, &window, state.clone(), widgets.clone());

    root_vbox.append(&menu_bar);
    root_vbox.append(&widgets.toolbar.container);
    root_vbox.append(&Separator::new(Orientation::Horizontal));
    root_vbox.append(&main_box);
    root_vbox.append(&console);

    // --- Setup Logic ---
    setup_interactions(&window, state.clone(), widgets.clone());

    let s = state.clone();
    drawing_area.set_draw_func(move |_, cr, w, h| {
        let st = s.borrow();
        let viewport = st.ui.viewport;
        if let Err(e) = rendering::painter::draw_frame(cr, &st, w as f64, h as f64, viewport) {
            log::warn!("Scene draw failed: {}", e);
        }
    });

    // Remember the last color mode for the next start
    let s = state.clone();
    window.connect_close_request(move |_| {
        let mut st = s.borrow_mut();
        st.config.default_color_mode = st.ui.color_mode;
        log::info!("{}", st.config.save());
        glib::Propagation::Proceed
    });

    widgets.refresh(&state.borrow());

    let (s, w) = (state.clone(), widgets.clone());
    io::spawn_load(data_path, state, move || w.refresh(&s.borrow()));

    window.present();
}
