//! Rendering: panels host the controls, sections draw one tab each from the
//! cached `DashboardReport`, plot holds the shared chart widgets.

pub mod panels;
pub mod plot;
pub mod sections;
