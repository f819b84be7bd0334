pub mod band_scale;
pub mod curve;
pub mod dataset;
pub mod kind;
pub mod layout;
pub mod options;
pub mod pie;
pub mod quadrant;
pub mod radar;
pub mod scale;
pub mod stack;
pub mod ticks;
pub mod time_scale;
pub mod types;

pub use band_scale::{BAND_PADDING, BandScale, PointScale, nearest_index};
pub use dataset::{ChartData, ChartSpec, Dataset, Value, XValue};
pub use kind::ChartKind;
pub use layout::{Margin, PlotArea, compute_margins, radial_radius};
pub use options::{
    DEFAULT_PALETTE, Options, ResolvedOptions, SelectHandler, chart_defaults, color_slots,
    global_defaults, resolve, resolve_for,
};
pub use pie::{PieSlice, pie_layout};
pub use quadrant::{Quadrant, tooltip_quadrant};
pub use radar::{RadarGeometry, direction_angle};
pub use scale::LinearScale;
pub use stack::StackLayout;
pub use time_scale::TimeScale;
pub use types::{Bounds, Point, Viewport};
