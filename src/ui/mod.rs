pub mod interactions;

pub use interactions::setup_interactions;

use crate::panels::{DetailPanel, LegendPanel, Toolbar};
use crate::state::{AppState, ViewportClass};
use gtk4::prelude::*;
use gtk4::{Box as GtkBox, DrawingArea, Frame, Orientation, Revealer};

/// Every widget that mirrors `AppState`. Handlers mutate the state, drop the
/// borrow, then call `refresh`.
pub struct AppWidgets {
    pub scene: DrawingArea,
    pub main_box: GtkBox,
    pub toolbar: Toolbar,
    pub legend: LegendPanel,
    pub detail: DetailPanel,
    pub console: Revealer,
}

impl AppWidgets {
    pub fn refresh(&self, state: &AppState) {
        self.apply_viewport(state.ui.viewport);
        self.toolbar.update(state);
        self.legend.update(state);
        self.detail.update(state);
        self.scene.queue_draw();
    }

    /// Mobile stacks the detail card under the scene.
    pub fn apply_viewport(&self, class: ViewportClass) {
        let orientation = match class {
            ViewportClass::Mobile => Orientation::Vertical,
            ViewportClass::Desktop => Orientation::Horizontal,
        };
        if self.main_box.orientation() != orientation {
            self.main_box.set_orientation(orientation);
            let detail = &self.detail.container;
            match class {
                ViewportClass::Mobile => {
                    detail.set_width_request(-1);
                    detail.set_height_request(220);
                }
                ViewportClass::Desktop => {
                    detail.set_width_request(280);
                    detail.set_height_request(-1);
                }
            }
        }
    }
}

/// Console view framed for the bottom of the window.
pub fn console_frame(view: &gtk4::TextView) -> Frame {
    let frame = Frame::new(None);
    let scroll = gtk4::ScrolledWindow::builder()
        .min_content_height(110)
        .child(view)
        .build();
    frame.set_child(Some(&scroll));
    frame
}
