pub mod detail;
pub mod legend;
pub mod toolbar;

pub use detail::DetailPanel;
pub use legend::LegendPanel;
pub use toolbar::Toolbar;
