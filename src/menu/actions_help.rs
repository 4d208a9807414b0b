use gtk4::prelude::*;
use gtk4::{AboutDialog, Application, ApplicationWindow, License};

const CONTROLS: &str = "Drag to rotate, scroll to zoom.\n\
Hover a tile to preview it, click to pin it; click empty space or press Esc to unpin.\n\
R resets the view.";

pub fn setup(app: &Application, window: &ApplicationWindow) {
    let about_action = gtk4::gio::SimpleAction::new("about", None);
    let win_weak = window.downgrade();

    about_action.connect_activate(move |_, _| {
        if let Some(win) = win_weak.upgrade() {
            let dialog = AboutDialog::builder()
                .transient_for(&win)
                .modal(true)
                .program_name("ptable3d")
                .version(env!("CARGO_PKG_VERSION"))
                .comments(format!("Interactive 3D periodic table.\n\n{}", CONTROLS))
                .license_type(License::MitX11)
                .logo_icon_name("applications-science")
                .build();

            dialog.present();
        }
    });
    app.add_action(&about_action);
}
