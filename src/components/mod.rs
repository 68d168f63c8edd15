//! UI components
//!
//! Each component handles its own input and rendering. The home screen is
//! always present; sheets are layered on top of it by the app.

pub mod header;
pub mod home;
pub mod layout;
pub mod sheet;

pub use header::SheetHeader;
pub use home::{HomeComponent, HomeRenderContext};
pub use layout::{sheet_area, snap_for_row};
pub use sheet::{SheetComponent, SheetKind, SheetRenderContext};
